//! SQL schema for the Boarding SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

use rusqlite::functions::FunctionFlags;

/// Register the scalar functions the queries rely on.
///
/// `casefold(text)` lowercases with full Unicode rules; SQLite's built-in
/// `lower` and `LIKE` only fold ASCII.
pub fn register_functions(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
  conn.create_scalar_function(
    "casefold",
    1,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|text| text.to_lowercase())),
  )
}

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `foreign_keys` is a per-connection setting, so it must run on the same
/// connection that serves queries or the cascades below are ignored.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    email       TEXT NOT NULL UNIQUE,
    name        TEXT NOT NULL,
    role        TEXT NOT NULL DEFAULT 'user'
                CHECK (role IN ('admin', 'user')),
    created_at  TEXT NOT NULL,   -- RFC 3339 UTC, fixed width
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS boarding_schools (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    name            TEXT NOT NULL,
    description     TEXT NOT NULL,
    region          TEXT NOT NULL
                    CHECK (region IN ('england', 'scotland', 'northern_ireland', 'wales')),
    cost_range      TEXT NOT NULL
                    CHECK (cost_range IN ('20000', '30000', '40000', '50000',
                                          '60000', '70000', '80000')),
    website_url     TEXT,
    contact_email   TEXT,
    contact_phone   TEXT,
    address         TEXT,
    profile_content TEXT,            -- opaque HTML
    is_featured     INTEGER NOT NULL DEFAULT 0,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS school_sports (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    school_id   INTEGER NOT NULL REFERENCES boarding_schools(id) ON DELETE CASCADE,
    sport_type  TEXT NOT NULL
                CHECK (sport_type IN ('football', 'rugby', 'swimming',
                                      'tennis', 'hockey', 'rowing')),
    is_primary  INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS school_scholarships (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    school_id         INTEGER NOT NULL REFERENCES boarding_schools(id) ON DELETE CASCADE,
    scholarship_type  TEXT NOT NULL
                      CHECK (scholarship_type IN ('sports_scholarship',
                                                  'partial_scholarship',
                                                  'full_scholarship')),
    description       TEXT,
    requirements      TEXT,
    created_at        TEXT NOT NULL
);

-- Deleting a user who still authors posts is rejected by the foreign key.
CREATE TABLE IF NOT EXISTS blog_posts (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    title               TEXT NOT NULL,
    slug                TEXT NOT NULL UNIQUE,
    content             TEXT NOT NULL,
    excerpt             TEXT,
    featured_image_url  TEXT,
    is_published        INTEGER NOT NULL DEFAULT 0,
    author_id           INTEGER NOT NULL REFERENCES users(id),
    created_at          TEXT NOT NULL,
    updated_at          TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS school_sports_school_idx       ON school_sports(school_id);
CREATE INDEX IF NOT EXISTS school_scholarships_school_idx ON school_scholarships(school_id);
CREATE INDEX IF NOT EXISTS schools_featured_idx           ON boarding_schools(is_featured, updated_at);
CREATE INDEX IF NOT EXISTS blog_posts_created_idx         ON blog_posts(created_at);

PRAGMA user_version = 1;
";

/// Column lists shared by every `SELECT` and `RETURNING` clause, in the order
/// the row readers in [`crate::encode`] expect.
pub const SCHOOL_COLUMNS: &str = "id, name, description, region, cost_range, \
  website_url, contact_email, contact_phone, address, profile_content, \
  is_featured, created_at, updated_at";

pub const SPORT_COLUMNS: &str = "id, school_id, sport_type, is_primary, created_at";

pub const SCHOLARSHIP_COLUMNS: &str =
  "id, school_id, scholarship_type, description, requirements, created_at";

pub const BLOG_POST_COLUMNS: &str = "id, title, slug, content, excerpt, \
  featured_image_url, is_published, author_id, created_at, updated_at";

pub const USER_COLUMNS: &str = "id, email, name, role, created_at, updated_at";
