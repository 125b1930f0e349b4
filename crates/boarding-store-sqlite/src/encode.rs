//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings so that `ORDER BY`
//! on the text column is chronological. Enumerations are stored as their wire
//! strings. Booleans are SQLite integers.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use boarding_core::{
  blog::BlogPost,
  school::{BoardingSchool, SchoolScholarship, SchoolSport},
  user::User,
};
use rusqlite::{Row, types::Value};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Enumerations ────────────────────────────────────────────────────────────

pub fn encode_enum<E: Into<&'static str>>(value: E) -> &'static str { value.into() }

pub fn encode_enum_value<E: Into<&'static str>>(value: E) -> Value {
  Value::Text(encode_enum(value).to_owned())
}

pub fn decode_enum<E: FromStr>(column: &'static str, s: &str) -> Result<E> {
  E::from_str(s).map_err(|_| Error::UnknownValue { column, value: s.to_owned() })
}

// ─── Nullable text ───────────────────────────────────────────────────────────

pub fn nullable_text(value: Option<String>) -> Value { value.map_or(Value::Null, Value::Text) }

/// `?, ?, ?` with `n` placeholders.
pub fn placeholders(n: usize) -> String { vec!["?"; n].join(", ") }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `boarding_schools` row.
pub struct RawSchool {
  pub id:              i64,
  pub name:            String,
  pub description:     String,
  pub region:          String,
  pub cost_range:      String,
  pub website_url:     Option<String>,
  pub contact_email:   Option<String>,
  pub contact_phone:   Option<String>,
  pub address:         Option<String>,
  pub profile_content: Option<String>,
  pub is_featured:     bool,
  pub created_at:      String,
  pub updated_at:      String,
}

impl RawSchool {
  /// Read a row selected with [`crate::schema::SCHOOL_COLUMNS`].
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      name:            row.get(1)?,
      description:     row.get(2)?,
      region:          row.get(3)?,
      cost_range:      row.get(4)?,
      website_url:     row.get(5)?,
      contact_email:   row.get(6)?,
      contact_phone:   row.get(7)?,
      address:         row.get(8)?,
      profile_content: row.get(9)?,
      is_featured:     row.get(10)?,
      created_at:      row.get(11)?,
      updated_at:      row.get(12)?,
    })
  }

  pub fn into_school(self) -> Result<BoardingSchool> {
    Ok(BoardingSchool {
      id:              self.id,
      name:            self.name,
      description:     self.description,
      region:          decode_enum("region", &self.region)?,
      cost_range:      decode_enum("cost_range", &self.cost_range)?,
      website_url:     self.website_url,
      contact_email:   self.contact_email,
      contact_phone:   self.contact_phone,
      address:         self.address,
      profile_content: self.profile_content,
      is_featured:     self.is_featured,
      created_at:      decode_dt(&self.created_at)?,
      updated_at:      decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw values read directly from a `school_sports` row.
pub struct RawSport {
  pub id:         i64,
  pub school_id:  i64,
  pub sport_type: String,
  pub is_primary: bool,
  pub created_at: String,
}

impl RawSport {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      school_id:  row.get(1)?,
      sport_type: row.get(2)?,
      is_primary: row.get(3)?,
      created_at: row.get(4)?,
    })
  }

  pub fn into_sport(self) -> Result<SchoolSport> {
    Ok(SchoolSport {
      id:         self.id,
      school_id:  self.school_id,
      sport_type: decode_enum("sport_type", &self.sport_type)?,
      is_primary: self.is_primary,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `school_scholarships` row.
pub struct RawScholarship {
  pub id:               i64,
  pub school_id:        i64,
  pub scholarship_type: String,
  pub description:      Option<String>,
  pub requirements:     Option<String>,
  pub created_at:       String,
}

impl RawScholarship {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:               row.get(0)?,
      school_id:        row.get(1)?,
      scholarship_type: row.get(2)?,
      description:      row.get(3)?,
      requirements:     row.get(4)?,
      created_at:       row.get(5)?,
    })
  }

  pub fn into_scholarship(self) -> Result<SchoolScholarship> {
    Ok(SchoolScholarship {
      id:               self.id,
      school_id:        self.school_id,
      scholarship_type: decode_enum("scholarship_type", &self.scholarship_type)?,
      description:      self.description,
      requirements:     self.requirements,
      created_at:       decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `blog_posts` row.
pub struct RawBlogPost {
  pub id:                 i64,
  pub title:              String,
  pub slug:               String,
  pub content:            String,
  pub excerpt:            Option<String>,
  pub featured_image_url: Option<String>,
  pub is_published:       bool,
  pub author_id:          i64,
  pub created_at:         String,
  pub updated_at:         String,
}

impl RawBlogPost {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                 row.get(0)?,
      title:              row.get(1)?,
      slug:               row.get(2)?,
      content:            row.get(3)?,
      excerpt:            row.get(4)?,
      featured_image_url: row.get(5)?,
      is_published:       row.get(6)?,
      author_id:          row.get(7)?,
      created_at:         row.get(8)?,
      updated_at:         row.get(9)?,
    })
  }

  pub fn into_post(self) -> Result<BlogPost> {
    Ok(BlogPost {
      id:                 self.id,
      title:              self.title,
      slug:               self.slug,
      content:            self.content,
      excerpt:            self.excerpt,
      featured_image_url: self.featured_image_url,
      is_published:       self.is_published,
      author_id:          self.author_id,
      created_at:         decode_dt(&self.created_at)?,
      updated_at:         decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw values read directly from a `users` row.
pub struct RawUser {
  pub id:         i64,
  pub email:      String,
  pub name:       String,
  pub role:       String,
  pub created_at: String,
  pub updated_at: String,
}

impl RawUser {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      email:      row.get(1)?,
      name:       row.get(2)?,
      role:       row.get(3)?,
      created_at: row.get(4)?,
      updated_at: row.get(5)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      id:         self.id,
      email:      self.email,
      name:       self.name,
      role:       decode_enum("role", &self.role)?,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}
