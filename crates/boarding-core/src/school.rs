//! Boarding schools and their sport and scholarship associations.
//!
//! A school owns zero or more [`SchoolSport`] and [`SchoolScholarship`] rows.
//! Those rows live and die with their school; deleting a school removes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

// ─── Enumerations ────────────────────────────────────────────────────────────

/// A sport a school offers.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SportType {
  Football,
  Rugby,
  Swimming,
  Tennis,
  Hockey,
  Rowing,
}

/// A kind of scholarship a school awards.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ScholarshipType {
  SportsScholarship,
  PartialScholarship,
  FullScholarship,
}

/// The UK nation a school is located in.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Region {
  England,
  Scotland,
  NorthernIreland,
  Wales,
}

/// Annual fee bucket. The wire form is the bucket's lower bound in GBP, but
/// it is a label, not a number: `"80000"` means 80k and above. Buckets
/// compare by declaration order.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
pub enum CostRange {
  #[serde(rename = "20000")]
  #[strum(serialize = "20000")]
  From20k,
  #[serde(rename = "30000")]
  #[strum(serialize = "30000")]
  From30k,
  #[serde(rename = "40000")]
  #[strum(serialize = "40000")]
  From40k,
  #[serde(rename = "50000")]
  #[strum(serialize = "50000")]
  From50k,
  #[serde(rename = "60000")]
  #[strum(serialize = "60000")]
  From60k,
  #[serde(rename = "70000")]
  #[strum(serialize = "70000")]
  From70k,
  #[serde(rename = "80000")]
  #[strum(serialize = "80000")]
  From80k,
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A school in the directory, without its associations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardingSchool {
  pub id:              i64,
  pub name:            String,
  pub description:     String,
  pub region:          Region,
  pub cost_range:      CostRange,
  pub website_url:     Option<String>,
  pub contact_email:   Option<String>,
  pub contact_phone:   Option<String>,
  pub address:         Option<String>,
  /// Admin-authored rich text (HTML). Stored and returned verbatim.
  pub profile_content: Option<String>,
  pub is_featured:     bool,
  pub created_at:      DateTime<Utc>,
  pub updated_at:      DateTime<Utc>,
}

/// A sport offered by a school. A school may list the same sport twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolSport {
  pub id:         i64,
  pub school_id:  i64,
  pub sport_type: SportType,
  pub is_primary: bool,
  pub created_at: DateTime<Utc>,
}

/// A scholarship awarded by a school.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolScholarship {
  pub id:               i64,
  pub school_id:        i64,
  pub scholarship_type: ScholarshipType,
  pub description:      Option<String>,
  pub requirements:     Option<String>,
  pub created_at:       DateTime<Utc>,
}

/// A school together with all of its associations. Serialises flat: the
/// school's own fields sit next to `sports` and `scholarships`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardingSchoolWithRelations {
  #[serde(flatten)]
  pub school:       BoardingSchool,
  pub sports:       Vec<SchoolSport>,
  pub scholarships: Vec<SchoolScholarship>,
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// One sport entry in a create or update request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SportInput {
  pub sport_type: SportType,
  #[serde(default)]
  pub is_primary: bool,
}

impl SportInput {
  pub fn new(sport_type: SportType, is_primary: bool) -> Self {
    Self { sport_type, is_primary }
  }
}

/// One scholarship entry in a create or update request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScholarshipInput {
  pub scholarship_type: ScholarshipType,
  pub description:      Option<String>,
  pub requirements:     Option<String>,
}

impl ScholarshipInput {
  pub fn new(scholarship_type: ScholarshipType) -> Self {
    Self { scholarship_type, description: None, requirements: None }
  }
}

/// Input to [`crate::store::CatalogStore::create_school`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBoardingSchoolInput {
  pub name:            String,
  pub description:     String,
  pub region:          Region,
  pub cost_range:      CostRange,
  pub website_url:     Option<String>,
  pub contact_email:   Option<String>,
  pub contact_phone:   Option<String>,
  pub address:         Option<String>,
  pub profile_content: Option<String>,
  #[serde(default)]
  pub is_featured:     bool,
  #[serde(default, deserialize_with = "crate::nullable::non_null")]
  pub sports:          Option<Vec<SportInput>>,
  #[serde(default, deserialize_with = "crate::nullable::non_null")]
  pub scholarships:    Option<Vec<ScholarshipInput>>,
}

impl CreateBoardingSchoolInput {
  /// Convenience constructor with every optional field left empty.
  pub fn new(
    name: impl Into<String>,
    description: impl Into<String>,
    region: Region,
    cost_range: CostRange,
  ) -> Self {
    Self {
      name: name.into(),
      description: description.into(),
      region,
      cost_range,
      website_url: None,
      contact_email: None,
      contact_phone: None,
      address: None,
      profile_content: None,
      is_featured: false,
      sports: None,
      scholarships: None,
    }
  }
}

/// Input to [`crate::store::CatalogStore::update_school`].
///
/// `None` means "leave unchanged". Nullable columns use `Option<Option<_>>`
/// so that `Some(None)` clears the column. `sports` and `scholarships`, when
/// present, replace the school's whole association set; an empty list clears
/// it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBoardingSchoolInput {
  pub id:              i64,
  #[serde(
    default,
    deserialize_with = "crate::nullable::non_null",
    skip_serializing_if = "Option::is_none"
  )]
  pub name:            Option<String>,
  #[serde(
    default,
    deserialize_with = "crate::nullable::non_null",
    skip_serializing_if = "Option::is_none"
  )]
  pub description:     Option<String>,
  #[serde(
    default,
    deserialize_with = "crate::nullable::non_null",
    skip_serializing_if = "Option::is_none"
  )]
  pub region:          Option<Region>,
  #[serde(
    default,
    deserialize_with = "crate::nullable::non_null",
    skip_serializing_if = "Option::is_none"
  )]
  pub cost_range:      Option<CostRange>,
  #[serde(
    default,
    deserialize_with = "crate::nullable::deserialize",
    skip_serializing_if = "Option::is_none"
  )]
  pub website_url:     Option<Option<String>>,
  #[serde(
    default,
    deserialize_with = "crate::nullable::deserialize",
    skip_serializing_if = "Option::is_none"
  )]
  pub contact_email:   Option<Option<String>>,
  #[serde(
    default,
    deserialize_with = "crate::nullable::deserialize",
    skip_serializing_if = "Option::is_none"
  )]
  pub contact_phone:   Option<Option<String>>,
  #[serde(
    default,
    deserialize_with = "crate::nullable::deserialize",
    skip_serializing_if = "Option::is_none"
  )]
  pub address:         Option<Option<String>>,
  #[serde(
    default,
    deserialize_with = "crate::nullable::deserialize",
    skip_serializing_if = "Option::is_none"
  )]
  pub profile_content: Option<Option<String>>,
  #[serde(
    default,
    deserialize_with = "crate::nullable::non_null",
    skip_serializing_if = "Option::is_none"
  )]
  pub is_featured:     Option<bool>,
  #[serde(
    default,
    deserialize_with = "crate::nullable::non_null",
    skip_serializing_if = "Option::is_none"
  )]
  pub sports:          Option<Vec<SportInput>>,
  #[serde(
    default,
    deserialize_with = "crate::nullable::non_null",
    skip_serializing_if = "Option::is_none"
  )]
  pub scholarships:    Option<Vec<ScholarshipInput>>,
}

impl UpdateBoardingSchoolInput {
  /// An update for `id` that changes nothing but `updated_at`.
  pub fn new(id: i64) -> Self { Self { id, ..Self::default() } }
}

fn default_school_limit() -> u32 { 20 }

/// Input to [`crate::store::CatalogStore::list_schools`].
///
/// Dimensions combine with AND; values inside one dimension combine with OR.
/// An empty list or empty search string does not filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSchoolsInput {
  #[serde(default)]
  pub sports:       Vec<SportType>,
  #[serde(default)]
  pub scholarships: Vec<ScholarshipType>,
  #[serde(default)]
  pub regions:      Vec<Region>,
  #[serde(default)]
  pub cost_ranges:  Vec<CostRange>,
  /// Case-insensitive substring matched against name or description.
  #[serde(default, deserialize_with = "crate::nullable::non_null")]
  pub search:       Option<String>,
  #[serde(default = "default_school_limit")]
  pub limit:        u32,
  #[serde(default)]
  pub offset:       u32,
}

impl Default for FilterSchoolsInput {
  fn default() -> Self {
    Self {
      sports:       Vec::new(),
      scholarships: Vec::new(),
      regions:      Vec::new(),
      cost_ranges:  Vec::new(),
      search:       None,
      limit:        default_school_limit(),
      offset:       0,
    }
  }
}
