//! [`SqliteStore`], the SQLite implementation of [`CatalogStore`].

use std::path::Path;

use boarding_core::{
  Error as CoreError,
  blog::{BlogPost, CreateBlogPostInput, GetBlogPostsInput, UpdateBlogPostInput},
  school::{
    BoardingSchool, BoardingSchoolWithRelations, CreateBoardingSchoolInput,
    FilterSchoolsInput, ScholarshipInput, SportInput, UpdateBoardingSchoolInput,
  },
  store::CatalogStore,
  user::{CreateUserInput, User, UserRole},
};
use chrono::Utc;
use rusqlite::{OptionalExtension as _, types::Value};

use crate::{
  Error, Result,
  encode::{
    RawBlogPost, RawScholarship, RawSchool, RawSport, RawUser, decode_enum,
    encode_dt, encode_enum, encode_enum_value, nullable_text, placeholders,
  },
  schema::{
    BLOG_POST_COLUMNS, SCHEMA, SCHOLARSHIP_COLUMNS, SCHOOL_COLUMNS,
    SPORT_COLUMNS, USER_COLUMNS, register_functions,
  },
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A catalog store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        register_functions(conn)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Statement helpers ───────────────────────────────────────────────────────
//
// These run inside `Connection::call` closures, usually on a transaction
// (which derefs to `rusqlite::Connection`).

fn insert_sports(
  conn: &rusqlite::Connection,
  school_id: i64,
  sports: &[SportInput],
  now: &str,
) -> rusqlite::Result<()> {
  let mut stmt = conn.prepare(
    "INSERT INTO school_sports (school_id, sport_type, is_primary, created_at)
     VALUES (?1, ?2, ?3, ?4)",
  )?;
  for sport in sports {
    stmt.execute(rusqlite::params![
      school_id,
      encode_enum(sport.sport_type),
      sport.is_primary,
      now,
    ])?;
  }
  Ok(())
}

fn insert_scholarships(
  conn: &rusqlite::Connection,
  school_id: i64,
  scholarships: &[ScholarshipInput],
  now: &str,
) -> rusqlite::Result<()> {
  let mut stmt = conn.prepare(
    "INSERT INTO school_scholarships
       (school_id, scholarship_type, description, requirements, created_at)
     VALUES (?1, ?2, ?3, ?4, ?5)",
  )?;
  for scholarship in scholarships {
    stmt.execute(rusqlite::params![
      school_id,
      encode_enum(scholarship.scholarship_type),
      scholarship.description,
      scholarship.requirements,
      now,
    ])?;
  }
  Ok(())
}

/// The `SET` list of a sparse `UPDATE`, with its bound values in order.
#[derive(Default)]
struct Assignments {
  columns: Vec<&'static str>,
  values:  Vec<Value>,
}

impl Assignments {
  fn set(&mut self, column: &'static str, value: impl Into<Value>) {
    self.columns.push(column);
    self.values.push(value.into());
  }

  fn set_if(&mut self, column: &'static str, value: Option<impl Into<Value>>) {
    if let Some(v) = value {
      self.set(column, v);
    }
  }

  fn set_nullable_if(&mut self, column: &'static str, value: Option<Option<String>>) {
    if let Some(v) = value {
      self.set(column, nullable_text(v));
    }
  }

  /// `UPDATE {table} SET … WHERE id = ? RETURNING {returning}` plus the
  /// bound values, with `id` last.
  fn into_update(mut self, table: &str, id: i64, returning: &str) -> (String, Vec<Value>) {
    let sets = self
      .columns
      .iter()
      .map(|c| format!("{c} = ?"))
      .collect::<Vec<_>>()
      .join(", ");
    self.values.push(Value::Integer(id));
    let sql = format!("UPDATE {table} SET {sets} WHERE id = ? RETURNING {returning}");
    (sql, self.values)
  }
}

fn school_assignments(input: UpdateBoardingSchoolInput, now: String) -> Assignments {
  let mut a = Assignments::default();
  a.set_if("name", input.name);
  a.set_if("description", input.description);
  a.set_if("region", input.region.map(encode_enum_value));
  a.set_if("cost_range", input.cost_range.map(encode_enum_value));
  a.set_nullable_if("website_url", input.website_url);
  a.set_nullable_if("contact_email", input.contact_email);
  a.set_nullable_if("contact_phone", input.contact_phone);
  a.set_nullable_if("address", input.address);
  a.set_nullable_if("profile_content", input.profile_content);
  a.set_if("is_featured", input.is_featured);
  a.set("updated_at", now);
  a
}

fn blog_post_assignments(input: UpdateBlogPostInput, now: String) -> Assignments {
  let mut a = Assignments::default();
  a.set_if("title", input.title);
  a.set_if("slug", input.slug);
  a.set_if("content", input.content);
  a.set_nullable_if("excerpt", input.excerpt);
  a.set_nullable_if("featured_image_url", input.featured_image_url);
  a.set_if("is_published", input.is_published);
  a.set("updated_at", now);
  a
}

/// `WHERE` clause and bound values for [`FilterSchoolsInput`].
fn school_filter(filter: &FilterSchoolsInput) -> (String, Vec<Value>) {
  let mut conds: Vec<String> = vec![];
  let mut values: Vec<Value> = vec![];

  if !filter.regions.is_empty() {
    conds.push(format!("region IN ({})", placeholders(filter.regions.len())));
    values.extend(filter.regions.iter().copied().map(encode_enum_value));
  }
  if !filter.cost_ranges.is_empty() {
    conds.push(format!("cost_range IN ({})", placeholders(filter.cost_ranges.len())));
    values.extend(filter.cost_ranges.iter().copied().map(encode_enum_value));
  }
  if let Some(term) = filter.search.as_deref().filter(|t| !t.is_empty()) {
    // Plain substring search: no wildcard characters in the term.
    let needle = term.to_lowercase();
    conds.push(
      "(instr(casefold(name), ?) > 0 OR instr(casefold(description), ?) > 0)"
        .to_owned(),
    );
    values.push(Value::Text(needle.clone()));
    values.push(Value::Text(needle));
  }
  // Existential matches: one qualifying association row is enough.
  if !filter.sports.is_empty() {
    conds.push(format!(
      "id IN (SELECT school_id FROM school_sports WHERE sport_type IN ({}))",
      placeholders(filter.sports.len())
    ));
    values.extend(filter.sports.iter().copied().map(encode_enum_value));
  }
  if !filter.scholarships.is_empty() {
    conds.push(format!(
      "id IN (SELECT school_id FROM school_scholarships WHERE scholarship_type IN ({}))",
      placeholders(filter.scholarships.len())
    ));
    values.extend(filter.scholarships.iter().copied().map(encode_enum_value));
  }

  let where_clause = if conds.is_empty() {
    String::new()
  } else {
    format!("WHERE {}", conds.join(" AND "))
  };
  (where_clause, values)
}

/// Whether `e` is a violated `UNIQUE` constraint.
fn is_unique_violation(e: &tokio_rusqlite::Error) -> bool {
  matches!(
    e,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, _))
      if f.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = Error;

  // ── Schools ───────────────────────────────────────────────────────────────

  async fn create_school(&self, input: CreateBoardingSchoolInput) -> Result<BoardingSchool> {
    let now = encode_dt(Utc::now());

    let raw: RawSchool = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let raw = tx.query_row(
          &format!(
            "INSERT INTO boarding_schools (
               name, description, region, cost_range,
               website_url, contact_email, contact_phone, address,
               profile_content, is_featured, created_at, updated_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)
             RETURNING {SCHOOL_COLUMNS}"
          ),
          rusqlite::params![
            input.name,
            input.description,
            encode_enum(input.region),
            encode_enum(input.cost_range),
            input.website_url,
            input.contact_email,
            input.contact_phone,
            input.address,
            input.profile_content,
            input.is_featured,
            now,
          ],
          RawSchool::from_row,
        )?;

        if let Some(sports) = &input.sports {
          insert_sports(&tx, raw.id, sports, &now)?;
        }
        if let Some(scholarships) = &input.scholarships {
          insert_scholarships(&tx, raw.id, scholarships, &now)?;
        }

        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.into_school()
  }

  async fn list_schools(&self, filter: &FilterSchoolsInput) -> Result<Vec<BoardingSchool>> {
    let (where_clause, mut values) = school_filter(filter);
    values.push(Value::Integer(filter.limit.into()));
    values.push(Value::Integer(filter.offset.into()));

    let raws: Vec<RawSchool> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {SCHOOL_COLUMNS}
           FROM boarding_schools
           {where_clause}
           ORDER BY id
           LIMIT ? OFFSET ?"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(values.iter()), RawSchool::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSchool::into_school).collect()
  }

  async fn get_school(&self, id: i64) -> Result<Option<BoardingSchoolWithRelations>> {
    let found: Option<(RawSchool, Vec<RawSport>, Vec<RawScholarship>)> = self
      .conn
      .call(move |conn| {
        let school = conn
          .query_row(
            &format!("SELECT {SCHOOL_COLUMNS} FROM boarding_schools WHERE id = ?1"),
            [id],
            RawSchool::from_row,
          )
          .optional()?;

        let Some(school) = school else {
          return Ok(None);
        };

        let sports = conn
          .prepare(&format!(
            "SELECT {SPORT_COLUMNS} FROM school_sports WHERE school_id = ?1 ORDER BY id"
          ))?
          .query_map([id], RawSport::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let scholarships = conn
          .prepare(&format!(
            "SELECT {SCHOLARSHIP_COLUMNS} FROM school_scholarships
             WHERE school_id = ?1 ORDER BY id"
          ))?
          .query_map([id], RawScholarship::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some((school, sports, scholarships)))
      })
      .await?;

    let Some((school, sports, scholarships)) = found else {
      return Ok(None);
    };

    Ok(Some(BoardingSchoolWithRelations {
      school:       school.into_school()?,
      sports:       sports
        .into_iter()
        .map(RawSport::into_sport)
        .collect::<Result<_>>()?,
      scholarships: scholarships
        .into_iter()
        .map(RawScholarship::into_scholarship)
        .collect::<Result<_>>()?,
    }))
  }

  async fn update_school(&self, input: UpdateBoardingSchoolInput) -> Result<BoardingSchool> {
    let id = input.id;
    let now = encode_dt(Utc::now());
    let sports = input.sports.clone();
    let scholarships = input.scholarships.clone();
    let (sql, values) = school_assignments(input, now.clone()).into_update(
      "boarding_schools",
      id,
      SCHOOL_COLUMNS,
    );

    let raw: Option<RawSchool> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let updated = tx
          .query_row(&sql, rusqlite::params_from_iter(values.iter()), RawSchool::from_row)
          .optional()?;
        // Dropping `tx` here rolls back, so a missing school never gains
        // association rows.
        let Some(raw) = updated else {
          return Ok(None);
        };

        if let Some(sports) = &sports {
          tx.execute("DELETE FROM school_sports WHERE school_id = ?1", [id])?;
          insert_sports(&tx, id, sports, &now)?;
        }
        if let Some(scholarships) = &scholarships {
          tx.execute("DELETE FROM school_scholarships WHERE school_id = ?1", [id])?;
          insert_scholarships(&tx, id, scholarships, &now)?;
        }

        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    raw
      .ok_or(CoreError::SchoolNotFound(id))?
      .into_school()
  }

  async fn delete_school(&self, id: i64) -> Result<bool> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM boarding_schools WHERE id = ?1", [id])?)
      })
      .await?;
    Ok(deleted > 0)
  }

  async fn featured_schools(&self) -> Result<Vec<BoardingSchool>> {
    let raws: Vec<RawSchool> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SCHOOL_COLUMNS} FROM boarding_schools
           WHERE is_featured = 1
           ORDER BY updated_at DESC"
        ))?;
        let rows = stmt
          .query_map([], RawSchool::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSchool::into_school).collect()
  }

  // ── Blog posts ────────────────────────────────────────────────────────────

  async fn create_blog_post(&self, input: CreateBlogPostInput) -> Result<BlogPost> {
    let now = encode_dt(Utc::now());

    let outcome: Result<RawBlogPost> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let role: Option<String> = tx
          .query_row(
            "SELECT role FROM users WHERE id = ?1",
            [input.author_id],
            |r| r.get(0),
          )
          .optional()?;
        let Some(role) = role else {
          return Ok(Err(CoreError::UserNotFound(input.author_id).into()));
        };
        match decode_enum::<UserRole>("role", &role) {
          Ok(UserRole::Admin) => {}
          Ok(UserRole::User) => {
            return Ok(Err(CoreError::NotAdmin(input.author_id).into()));
          }
          Err(e) => return Ok(Err(e)),
        }

        let slug_taken = tx
          .query_row(
            "SELECT 1 FROM blog_posts WHERE slug = ?1",
            [&input.slug],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if slug_taken {
          return Ok(Err(CoreError::SlugTaken(input.slug).into()));
        }

        let raw = tx.query_row(
          &format!(
            "INSERT INTO blog_posts (
               title, slug, content, excerpt, featured_image_url,
               is_published, author_id, created_at, updated_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
             RETURNING {BLOG_POST_COLUMNS}"
          ),
          rusqlite::params![
            input.title,
            input.slug,
            input.content,
            input.excerpt,
            input.featured_image_url,
            input.is_published,
            input.author_id,
            now,
          ],
          RawBlogPost::from_row,
        )?;

        tx.commit()?;
        Ok(Ok(raw))
      })
      .await?;

    outcome?.into_post()
  }

  async fn list_blog_posts(&self, query: &GetBlogPostsInput) -> Result<Vec<BlogPost>> {
    let published_only = query.published_only;
    let limit = i64::from(query.limit);
    let offset = i64::from(query.offset);

    let raws: Vec<RawBlogPost> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {BLOG_POST_COLUMNS} FROM blog_posts
           WHERE (?1 = 0 OR is_published = 1)
           ORDER BY created_at DESC, id DESC
           LIMIT ?2 OFFSET ?3"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![published_only, limit, offset],
            RawBlogPost::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawBlogPost::into_post).collect()
  }

  async fn get_blog_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>> {
    let slug = slug.to_owned();

    let raw: Option<RawBlogPost> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {BLOG_POST_COLUMNS} FROM blog_posts WHERE slug = ?1"),
            [slug],
            RawBlogPost::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawBlogPost::into_post).transpose()
  }

  async fn update_blog_post(&self, input: UpdateBlogPostInput) -> Result<BlogPost> {
    let id = input.id;
    let new_slug = input.slug.clone();
    let (sql, values) = blog_post_assignments(input, encode_dt(Utc::now())).into_update(
      "blog_posts",
      id,
      BLOG_POST_COLUMNS,
    );

    let raw: Option<RawBlogPost> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(&sql, rusqlite::params_from_iter(values.iter()), RawBlogPost::from_row)
          .optional()?)
      })
      .await
      .map_err(|e| match new_slug {
        Some(slug) if is_unique_violation(&e) => Error::Core(CoreError::SlugTaken(slug)),
        _ => Error::Database(e),
      })?;

    raw
      .ok_or(CoreError::BlogPostNotFound(id))?
      .into_post()
  }

  async fn delete_blog_post(&self, id: i64) -> Result<()> {
    let deleted = self
      .conn
      .call(move |conn| Ok(conn.execute("DELETE FROM blog_posts WHERE id = ?1", [id])?))
      .await?;

    if deleted == 0 {
      return Err(CoreError::BlogPostNotFound(id).into());
    }
    Ok(())
  }

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn create_user(&self, input: CreateUserInput) -> Result<User> {
    let now = encode_dt(Utc::now());
    let email = input.email.clone();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let taken = tx
          .query_row("SELECT 1 FROM users WHERE email = ?1", [&input.email], |_| Ok(()))
          .optional()?
          .is_some();
        if taken {
          return Ok(None);
        }

        let raw = tx.query_row(
          &format!(
            "INSERT INTO users (email, name, role, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)
             RETURNING {USER_COLUMNS}"
          ),
          rusqlite::params![input.email, input.name, encode_enum(input.role), now],
          RawUser::from_row,
        )?;

        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    raw.ok_or(CoreError::EmailTaken(email))?.into_user()
  }

  async fn get_user(&self, id: i64) -> Result<Option<User>> {
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
            [id],
            RawUser::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }
}
