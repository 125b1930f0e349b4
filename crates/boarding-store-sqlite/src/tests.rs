//! Integration tests for `SqliteStore` against an in-memory database.

use boarding_core::{
  Error as CoreError, ErrorKind,
  blog::{CreateBlogPostInput, GetBlogPostsInput, UpdateBlogPostInput},
  school::{
    BoardingSchool, CostRange, CreateBoardingSchoolInput, FilterSchoolsInput,
    Region, ScholarshipInput, ScholarshipType, SportInput, SportType,
    UpdateBoardingSchoolInput,
  },
  store::CatalogStore,
  user::{CreateUserInput, User, UserRole},
};
use chrono::{DateTime, Duration, Utc};

use crate::{Error, SqliteStore, encode::encode_dt};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn kind(err: Error) -> ErrorKind { CoreError::from(err).kind() }

fn school(name: &str, region: Region, cost_range: CostRange) -> CreateBoardingSchoolInput {
  CreateBoardingSchoolInput::new(name, format!("{name} is a boarding school"), region, cost_range)
}

fn with_sports(mut input: CreateBoardingSchoolInput, sports: &[SportType]) -> CreateBoardingSchoolInput {
  input.sports = Some(sports.iter().map(|s| SportInput::new(*s, false)).collect());
  input
}

fn with_scholarships(
  mut input: CreateBoardingSchoolInput,
  scholarships: &[ScholarshipType],
) -> CreateBoardingSchoolInput {
  input.scholarships = Some(scholarships.iter().copied().map(ScholarshipInput::new).collect());
  input
}

fn names(schools: &[BoardingSchool]) -> Vec<&str> {
  schools.iter().map(|s| s.name.as_str()).collect()
}

async fn user(s: &SqliteStore, email: &str, role: UserRole) -> User {
  s.create_user(CreateUserInput::new(email, "Test User", role))
    .await
    .unwrap()
}

/// Count association rows for `school_id` in `table`, bypassing the store API.
async fn child_rows(s: &SqliteStore, table: &'static str, school_id: i64) -> i64 {
  s.conn
    .call(move |conn| {
      Ok(conn.query_row(
        &format!("SELECT COUNT(*) FROM {table} WHERE school_id = ?1"),
        [school_id],
        |r| r.get(0),
      )?)
    })
    .await
    .unwrap()
}

/// Overwrite a timestamp column directly.
async fn set_timestamp(
  s: &SqliteStore,
  table: &'static str,
  column: &'static str,
  id: i64,
  at: DateTime<Utc>,
) {
  let at = encode_dt(at);
  s.conn
    .call(move |conn| {
      conn.execute(
        &format!("UPDATE {table} SET {column} = ?1 WHERE id = ?2"),
        rusqlite::params![at, id],
      )?;
      Ok(())
    })
    .await
    .unwrap();
}

// ─── School creation ─────────────────────────────────────────────────────────

#[tokio::test]
async fn create_school_returns_row() {
  let s = store().await;

  let mut input = school("Eton College", Region::England, CostRange::From80k);
  input.website_url = Some("https://www.etoncollege.com".into());
  input.profile_content = Some("<h1>Eton</h1><script>x</script>".into());
  input.is_featured = true;

  let created = s.create_school(input).await.unwrap();
  assert!(created.id > 0);
  assert_eq!(created.name, "Eton College");
  assert_eq!(created.region, Region::England);
  assert_eq!(created.cost_range, CostRange::From80k);
  assert_eq!(created.website_url.as_deref(), Some("https://www.etoncollege.com"));
  assert_eq!(created.profile_content.as_deref(), Some("<h1>Eton</h1><script>x</script>"));
  assert_eq!(created.contact_email, None);
  assert!(created.is_featured);
  assert_eq!(created.created_at, created.updated_at);
}

#[tokio::test]
async fn create_school_with_relations() {
  let s = store().await;

  let mut input = school("Millfield", Region::England, CostRange::From50k);
  input.sports = Some(vec![
    SportInput::new(SportType::Swimming, true),
    SportInput::new(SportType::Rugby, false),
    SportInput::new(SportType::Tennis, false),
  ]);
  input.scholarships = Some(vec![ScholarshipInput {
    scholarship_type: ScholarshipType::SportsScholarship,
    description:      Some("For elite athletes".into()),
    requirements:     Some("County level".into()),
  }]);

  let created = s.create_school(input).await.unwrap();
  let view = s.get_school(created.id).await.unwrap().unwrap();

  assert_eq!(view.school, created);
  assert_eq!(view.sports.len(), 3);
  assert_eq!(view.scholarships.len(), 1);
  assert!(view.sports.iter().all(|sp| sp.school_id == created.id));
  assert_eq!(view.sports[0].sport_type, SportType::Swimming);
  assert!(view.sports[0].is_primary);
  assert!(!view.sports[1].is_primary);
  assert_eq!(view.scholarships[0].description.as_deref(), Some("For elite athletes"));
  assert_eq!(view.scholarships[0].requirements.as_deref(), Some("County level"));
}

#[tokio::test]
async fn create_school_allows_duplicate_sports() {
  let s = store().await;

  let input = with_sports(
    school("Radley", Region::England, CostRange::From60k),
    &[SportType::Rowing, SportType::Rowing],
  );
  let created = s.create_school(input).await.unwrap();

  let view = s.get_school(created.id).await.unwrap().unwrap();
  assert_eq!(view.sports.len(), 2);
  assert!(view.sports.iter().all(|sp| sp.sport_type == SportType::Rowing));
}

#[tokio::test]
async fn create_school_with_empty_arrays() {
  let s = store().await;

  let mut input = school("Fettes College", Region::Scotland, CostRange::From60k);
  input.sports = Some(vec![]);
  input.scholarships = Some(vec![]);
  let created = s.create_school(input).await.unwrap();

  let view = s.get_school(created.id).await.unwrap().unwrap();
  assert!(view.sports.is_empty());
  assert!(view.scholarships.is_empty());
}

#[tokio::test]
async fn create_school_is_atomic_when_a_child_insert_fails() {
  let s = store().await;
  s.conn
    .call(|conn| {
      conn.execute_batch("DROP TABLE school_scholarships")?;
      Ok(())
    })
    .await
    .unwrap();

  let input = with_scholarships(
    with_sports(school("Gordonstoun", Region::Scotland, CostRange::From40k), &[SportType::Rowing]),
    &[ScholarshipType::FullScholarship],
  );
  assert!(s.create_school(input).await.is_err());

  let schools: i64 = s
    .conn
    .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM boarding_schools", [], |r| r.get(0))?))
    .await
    .unwrap();
  assert_eq!(schools, 0);
  let sports: i64 = s
    .conn
    .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM school_sports", [], |r| r.get(0))?))
    .await
    .unwrap();
  assert_eq!(sports, 0);
}

// ─── School detail ───────────────────────────────────────────────────────────

#[tokio::test]
async fn get_school_missing_returns_none() {
  let s = store().await;
  assert!(s.get_school(42).await.unwrap().is_none());
}

// ─── School deletion ─────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_school_cascades_to_relations() {
  let s = store().await;

  let input = with_scholarships(
    with_sports(
      school("Gordonstoun", Region::Scotland, CostRange::From50k),
      &[SportType::Rugby, SportType::Hockey, SportType::Rowing],
    ),
    &[ScholarshipType::FullScholarship, ScholarshipType::PartialScholarship],
  );
  let created = s.create_school(input).await.unwrap();
  assert_eq!(child_rows(&s, "school_sports", created.id).await, 3);
  assert_eq!(child_rows(&s, "school_scholarships", created.id).await, 2);

  assert!(s.delete_school(created.id).await.unwrap());

  assert!(s.get_school(created.id).await.unwrap().is_none());
  assert_eq!(child_rows(&s, "school_sports", created.id).await, 0);
  assert_eq!(child_rows(&s, "school_scholarships", created.id).await, 0);
}

#[tokio::test]
async fn delete_missing_school_returns_false() {
  let s = store().await;
  assert!(!s.delete_school(999).await.unwrap());
}

#[tokio::test]
async fn delete_school_leaves_others_untouched() {
  let s = store().await;

  let a = s
    .create_school(with_sports(school("A", Region::Wales, CostRange::From20k), &[SportType::Football]))
    .await
    .unwrap();
  let b = s
    .create_school(with_sports(school("B", Region::Wales, CostRange::From20k), &[SportType::Football]))
    .await
    .unwrap();

  assert!(s.delete_school(a.id).await.unwrap());
  assert_eq!(child_rows(&s, "school_sports", b.id).await, 1);
  assert!(!s.delete_school(a.id).await.unwrap());
}

// ─── School update ───────────────────────────────────────────────────────────

#[tokio::test]
async fn update_school_changes_only_present_fields() {
  let s = store().await;

  let mut input = school("Old Name", Region::England, CostRange::From30k);
  input.contact_phone = Some("01234 567890".into());
  input.address = Some("1 High Street".into());
  let created = s.create_school(input).await.unwrap();

  let past = Utc::now() - Duration::hours(1);
  set_timestamp(&s, "boarding_schools", "updated_at", created.id, past).await;

  let mut update = UpdateBoardingSchoolInput::new(created.id);
  update.name = Some("New Name".into());
  update.cost_range = Some(CostRange::From40k);
  update.address = Some(None);
  update.is_featured = Some(true);

  let updated = s.update_school(update).await.unwrap();
  assert_eq!(updated.id, created.id);
  assert_eq!(updated.name, "New Name");
  assert_eq!(updated.cost_range, CostRange::From40k);
  assert_eq!(updated.address, None);
  assert!(updated.is_featured);
  // Untouched fields keep their values.
  assert_eq!(updated.description, created.description);
  assert_eq!(updated.region, Region::England);
  assert_eq!(updated.contact_phone.as_deref(), Some("01234 567890"));
  assert_eq!(updated.created_at, created.created_at);
  assert!(updated.updated_at > past);
}

#[tokio::test]
async fn update_school_with_no_fields_refreshes_updated_at() {
  let s = store().await;
  let created = s
    .create_school(school("Stowe", Region::England, CostRange::From50k))
    .await
    .unwrap();

  let past = Utc::now() - Duration::days(1);
  set_timestamp(&s, "boarding_schools", "updated_at", created.id, past).await;

  let updated = s
    .update_school(UpdateBoardingSchoolInput::new(created.id))
    .await
    .unwrap();
  assert_eq!(updated.name, "Stowe");
  assert!(updated.updated_at > past);
}

#[tokio::test]
async fn update_school_empty_sports_clears_but_omitted_keeps() {
  let s = store().await;
  let base = || {
    with_scholarships(
      with_sports(
        school("Sedbergh", Region::England, CostRange::From40k),
        &[SportType::Rugby, SportType::Football],
      ),
      &[ScholarshipType::SportsScholarship],
    )
  };

  let cleared = s.create_school(base()).await.unwrap();
  let kept = s.create_school(base()).await.unwrap();

  let mut update = UpdateBoardingSchoolInput::new(cleared.id);
  update.sports = Some(vec![]);
  s.update_school(update).await.unwrap();

  let mut update = UpdateBoardingSchoolInput::new(kept.id);
  update.name = Some("Sedbergh School".into());
  s.update_school(update).await.unwrap();

  let cleared = s.get_school(cleared.id).await.unwrap().unwrap();
  let kept = s.get_school(kept.id).await.unwrap().unwrap();

  assert!(cleared.sports.is_empty());
  assert_eq!(cleared.scholarships.len(), 1, "scholarships were not in the update");
  assert_eq!(kept.sports.len(), 2);
  assert_eq!(kept.scholarships.len(), 1);
}

#[tokio::test]
async fn update_school_replaces_rather_than_merges() {
  let s = store().await;

  let created = s
    .create_school(with_scholarships(
      with_sports(
        school("Harrow", Region::England, CostRange::From60k),
        &[SportType::Football, SportType::Rugby],
      ),
      &[ScholarshipType::FullScholarship],
    ))
    .await
    .unwrap();

  let mut update = UpdateBoardingSchoolInput::new(created.id);
  update.sports = Some(vec![
    SportInput::new(SportType::Rugby, true),
    SportInput::new(SportType::Tennis, false),
  ]);
  update.scholarships = Some(vec![
    ScholarshipInput::new(ScholarshipType::PartialScholarship),
    ScholarshipInput::new(ScholarshipType::SportsScholarship),
  ]);
  s.update_school(update).await.unwrap();

  let view = s.get_school(created.id).await.unwrap().unwrap();
  let sports: Vec<_> = view.sports.iter().map(|sp| (sp.sport_type, sp.is_primary)).collect();
  assert_eq!(sports, [(SportType::Rugby, true), (SportType::Tennis, false)]);
  let scholarships: Vec<_> = view.scholarships.iter().map(|sc| sc.scholarship_type).collect();
  assert_eq!(
    scholarships,
    [ScholarshipType::PartialScholarship, ScholarshipType::SportsScholarship]
  );
}

#[tokio::test]
async fn update_missing_school_is_not_found_and_leaves_no_rows() {
  let s = store().await;

  let mut update = UpdateBoardingSchoolInput::new(77);
  update.name = Some("Ghost".into());
  update.sports = Some(vec![SportInput::new(SportType::Hockey, true)]);
  update.scholarships = Some(vec![ScholarshipInput::new(ScholarshipType::FullScholarship)]);

  let err = s.update_school(update).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::SchoolNotFound(77))));
  assert_eq!(child_rows(&s, "school_sports", 77).await, 0);
  assert_eq!(child_rows(&s, "school_scholarships", 77).await, 0);
}

// ─── School listing ──────────────────────────────────────────────────────────

async fn seed_schools(s: &SqliteStore) {
  let inputs = [
    with_scholarships(
      with_sports(
        school("Eton College", Region::England, CostRange::From80k),
        &[SportType::Rowing, SportType::Football],
      ),
      &[ScholarshipType::FullScholarship],
    ),
    with_sports(
      school("Fettes College", Region::Scotland, CostRange::From60k),
      &[SportType::Rugby],
    ),
    with_scholarships(
      with_sports(
        school("Millfield", Region::England, CostRange::From30k),
        &[SportType::Swimming, SportType::Tennis],
      ),
      &[ScholarshipType::SportsScholarship],
    ),
    with_sports(
      school("Llandovery College", Region::Wales, CostRange::From30k),
      &[SportType::Rugby, SportType::Football],
    ),
    school("Campbell College", Region::NorthernIreland, CostRange::From20k),
  ];
  for input in inputs {
    s.create_school(input).await.unwrap();
  }
}

#[tokio::test]
async fn list_schools_without_filters_returns_all_in_order() {
  let s = store().await;
  seed_schools(&s).await;

  let all = s.list_schools(&FilterSchoolsInput::default()).await.unwrap();
  assert_eq!(
    names(&all),
    [
      "Eton College",
      "Fettes College",
      "Millfield",
      "Llandovery College",
      "Campbell College"
    ]
  );
}

#[tokio::test]
async fn list_schools_ands_dimensions() {
  let s = store().await;
  seed_schools(&s).await;

  let filter = FilterSchoolsInput {
    regions: vec![Region::England],
    cost_ranges: vec![CostRange::From30k],
    ..Default::default()
  };
  let found = s.list_schools(&filter).await.unwrap();
  assert_eq!(names(&found), ["Millfield"]);
}

#[tokio::test]
async fn list_schools_ors_within_a_dimension() {
  let s = store().await;
  seed_schools(&s).await;

  let filter = FilterSchoolsInput {
    regions: vec![Region::Scotland, Region::Wales],
    ..Default::default()
  };
  let found = s.list_schools(&filter).await.unwrap();
  assert_eq!(names(&found), ["Fettes College", "Llandovery College"]);
}

#[tokio::test]
async fn list_schools_by_sport_is_existential() {
  let s = store().await;
  seed_schools(&s).await;

  let filter = FilterSchoolsInput { sports: vec![SportType::Football], ..Default::default() };
  let found = s.list_schools(&filter).await.unwrap();
  assert_eq!(names(&found), ["Eton College", "Llandovery College"]);

  // Any of the listed sports qualifies; a school matching two is listed once.
  let filter = FilterSchoolsInput {
    sports: vec![SportType::Football, SportType::Rugby],
    ..Default::default()
  };
  let found = s.list_schools(&filter).await.unwrap();
  assert_eq!(
    names(&found),
    ["Eton College", "Fettes College", "Llandovery College"]
  );

  let filter = FilterSchoolsInput { sports: vec![SportType::Hockey], ..Default::default() };
  assert!(s.list_schools(&filter).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_schools_by_scholarship_and_region() {
  let s = store().await;
  seed_schools(&s).await;

  let filter = FilterSchoolsInput {
    scholarships: vec![
      ScholarshipType::SportsScholarship,
      ScholarshipType::FullScholarship,
    ],
    ..Default::default()
  };
  let found = s.list_schools(&filter).await.unwrap();
  assert_eq!(names(&found), ["Eton College", "Millfield"]);

  let filter = FilterSchoolsInput {
    scholarships: vec![ScholarshipType::SportsScholarship],
    sports: vec![SportType::Rowing],
    ..Default::default()
  };
  assert!(s.list_schools(&filter).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_schools_search_is_case_insensitive_substring() {
  let s = store().await;
  seed_schools(&s).await;

  let search = |term: &str| FilterSchoolsInput {
    search: Some(term.to_owned()),
    ..Default::default()
  };

  let found = s.list_schools(&search("COLLEGE")).await.unwrap();
  assert_eq!(found.len(), 4);

  // Matches inside a word, not only at the start.
  let found = s.list_schools(&search("dover")).await.unwrap();
  assert_eq!(names(&found), ["Llandovery College"]);

  // Description is searched too.
  let found = s.list_schools(&search("is a boarding")).await.unwrap();
  assert_eq!(found.len(), 5);

  // An empty term does not filter.
  let found = s.list_schools(&search("")).await.unwrap();
  assert_eq!(found.len(), 5);
}

#[tokio::test]
async fn list_schools_search_treats_wildcards_literally() {
  let s = store().await;
  seed_schools(&s).await;
  s.create_school(school("100% Sport Academy", Region::Wales, CostRange::From20k))
    .await
    .unwrap();

  let filter = FilterSchoolsInput { search: Some("100%".into()), ..Default::default() };
  let found = s.list_schools(&filter).await.unwrap();
  assert_eq!(names(&found), ["100% Sport Academy"]);

  let filter = FilterSchoolsInput { search: Some("_".into()), ..Default::default() };
  assert!(s.list_schools(&filter).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_schools_search_folds_non_ascii_case() {
  let s = store().await;
  seed_schools(&s).await;
  s.create_school(school("École Internationale", Region::England, CostRange::From40k))
    .await
    .unwrap();

  for term in ["école", "ÉCOLE", "École"] {
    let filter = FilterSchoolsInput { search: Some(term.into()), ..Default::default() };
    let found = s.list_schools(&filter).await.unwrap();
    assert_eq!(names(&found), ["École Internationale"], "{term}");
  }
}

#[tokio::test]
async fn list_schools_paginates_after_filtering() {
  let s = store().await;
  seed_schools(&s).await;

  let page = |limit, offset| FilterSchoolsInput { limit, offset, ..Default::default() };

  let first = s.list_schools(&page(2, 0)).await.unwrap();
  assert_eq!(names(&first), ["Eton College", "Fettes College"]);
  let second = s.list_schools(&page(2, 2)).await.unwrap();
  assert_eq!(names(&second), ["Millfield", "Llandovery College"]);
  let past_end = s.list_schools(&page(2, 10)).await.unwrap();
  assert!(past_end.is_empty());

  let filter = FilterSchoolsInput {
    search: Some("college".into()),
    limit: 1,
    offset: 1,
    ..Default::default()
  };
  let found = s.list_schools(&filter).await.unwrap();
  assert_eq!(names(&found), ["Fettes College"]);
}

// ─── Featured schools ────────────────────────────────────────────────────────

#[tokio::test]
async fn featured_schools_newest_update_first() {
  let s = store().await;
  let now = Utc::now();

  let mut ids = vec![];
  for name in ["Two Hours Ago", "One Hour Ago", "Just Now"] {
    let mut input = school(name, Region::England, CostRange::From40k);
    input.is_featured = true;
    ids.push(s.create_school(input).await.unwrap().id);
  }
  s.create_school(school("Not Featured", Region::England, CostRange::From40k))
    .await
    .unwrap();

  set_timestamp(&s, "boarding_schools", "updated_at", ids[0], now - Duration::hours(2)).await;
  set_timestamp(&s, "boarding_schools", "updated_at", ids[1], now - Duration::hours(1)).await;
  set_timestamp(&s, "boarding_schools", "updated_at", ids[2], now).await;

  let featured = s.featured_schools().await.unwrap();
  assert_eq!(names(&featured), ["Just Now", "One Hour Ago", "Two Hours Ago"]);
}

#[tokio::test]
async fn featured_schools_reorder_after_update() {
  let s = store().await;
  let now = Utc::now();

  let mut ids = vec![];
  for name in ["First", "Second"] {
    let mut input = school(name, Region::Wales, CostRange::From20k);
    input.is_featured = true;
    ids.push(s.create_school(input).await.unwrap().id);
  }
  set_timestamp(&s, "boarding_schools", "updated_at", ids[0], now - Duration::hours(2)).await;
  set_timestamp(&s, "boarding_schools", "updated_at", ids[1], now - Duration::hours(1)).await;

  s.update_school(UpdateBoardingSchoolInput::new(ids[0])).await.unwrap();

  let featured = s.featured_schools().await.unwrap();
  assert_eq!(names(&featured), ["First", "Second"]);
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_user() {
  let s = store().await;

  let created = s
    .create_user(default_role_user("reader@example.com"))
    .await
    .unwrap();
  assert_eq!(created.role, UserRole::User);
  assert_eq!(created.email, "reader@example.com");

  let fetched = s.get_user(created.id).await.unwrap().unwrap();
  assert_eq!(fetched, created);
  assert!(s.get_user(created.id + 1).await.unwrap().is_none());
}

fn default_role_user(email: &str) -> CreateUserInput {
  CreateUserInput { email: email.into(), name: "Reader".into(), role: UserRole::default() }
}

#[tokio::test]
async fn create_user_duplicate_email_conflicts() {
  let s = store().await;
  user(&s, "head@school.org", UserRole::Admin).await;

  let err = s
    .create_user(CreateUserInput::new("head@school.org", "Other", UserRole::User))
    .await
    .unwrap_err();
  assert!(matches!(&err, Error::Core(CoreError::EmailTaken(e)) if e == "head@school.org"));
  assert_eq!(kind(err), ErrorKind::Conflict);
}

// ─── Blog posts ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_blog_post_requires_admin() {
  let s = store().await;
  let reader = user(&s, "reader@example.com", UserRole::User).await;
  let admin = user(&s, "admin@example.com", UserRole::Admin).await;

  let err = s
    .create_blog_post(CreateBlogPostInput::new("Title", "title", "Body", reader.id))
    .await
    .unwrap_err();
  assert_eq!(kind(err), ErrorKind::PermissionDenied);

  let post = s
    .create_blog_post(CreateBlogPostInput::new("Title", "title", "Body", admin.id))
    .await
    .unwrap();
  assert_eq!(post.author_id, admin.id);
  assert_eq!(post.slug, "title");
  assert!(!post.is_published);
  assert_eq!(post.created_at, post.updated_at);
}

#[tokio::test]
async fn create_blog_post_missing_author_is_not_found() {
  let s = store().await;
  let err = s
    .create_blog_post(CreateBlogPostInput::new("Title", "title", "Body", 12))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::UserNotFound(12))));
}

#[tokio::test]
async fn create_blog_post_duplicate_slug_conflicts() {
  let s = store().await;
  let admin = user(&s, "admin@example.com", UserRole::Admin).await;

  let first = s
    .create_blog_post(CreateBlogPostInput::new("First", "open-day", "One", admin.id))
    .await
    .unwrap();
  let err = s
    .create_blog_post(CreateBlogPostInput::new("Second", "open-day", "Two", admin.id))
    .await
    .unwrap_err();
  assert_eq!(kind(err), ErrorKind::Conflict);

  let fetched = s.get_blog_post_by_slug("open-day").await.unwrap().unwrap();
  assert_eq!(fetched, first);
}

#[tokio::test]
async fn get_blog_post_by_slug_ignores_published_state() {
  let s = store().await;
  let admin = user(&s, "admin@example.com", UserRole::Admin).await;

  let mut input = CreateBlogPostInput::new("Draft", "draft", "WIP", admin.id);
  input.excerpt = Some("Coming soon".into());
  let draft = s.create_blog_post(input).await.unwrap();

  let fetched = s.get_blog_post_by_slug("draft").await.unwrap().unwrap();
  assert_eq!(fetched, draft);
  assert_eq!(fetched.excerpt.as_deref(), Some("Coming soon"));
  assert!(s.get_blog_post_by_slug("Draft").await.unwrap().is_none());
  assert!(s.get_blog_post_by_slug("missing").await.unwrap().is_none());
}

async fn seed_posts(s: &SqliteStore) -> Vec<i64> {
  let admin = user(s, "admin@example.com", UserRole::Admin).await;
  let now = Utc::now();

  let mut ids = vec![];
  for (i, (slug, published)) in
    [("oldest", true), ("draft", false), ("middle", true), ("newest", true)]
      .into_iter()
      .enumerate()
  {
    let mut input = CreateBlogPostInput::new(slug, slug, "Body", admin.id);
    input.is_published = published;
    let post = s.create_blog_post(input).await.unwrap();
    let age = Duration::hours(4 - i as i64);
    set_timestamp(s, "blog_posts", "created_at", post.id, now - age).await;
    ids.push(post.id);
  }
  ids
}

#[tokio::test]
async fn list_blog_posts_published_only() {
  let s = store().await;
  seed_posts(&s).await;

  let published = s.list_blog_posts(&GetBlogPostsInput::default()).await.unwrap();
  let slugs: Vec<_> = published.iter().map(|p| p.slug.as_str()).collect();
  assert_eq!(slugs, ["newest", "middle", "oldest"]);
  assert!(published.iter().all(|p| p.is_published));

  let all = s
    .list_blog_posts(&GetBlogPostsInput { published_only: false, ..Default::default() })
    .await
    .unwrap();
  let slugs: Vec<_> = all.iter().map(|p| p.slug.as_str()).collect();
  assert_eq!(slugs, ["newest", "middle", "draft", "oldest"]);
}

#[tokio::test]
async fn list_blog_posts_paginates_after_ordering() {
  let s = store().await;
  seed_posts(&s).await;

  let query = GetBlogPostsInput { published_only: false, limit: 2, offset: 1 };
  let page = s.list_blog_posts(&query).await.unwrap();
  let slugs: Vec<_> = page.iter().map(|p| p.slug.as_str()).collect();
  assert_eq!(slugs, ["middle", "draft"]);
}

#[tokio::test]
async fn update_blog_post_partial() {
  let s = store().await;
  let admin = user(&s, "admin@example.com", UserRole::Admin).await;

  let mut input = CreateBlogPostInput::new("Title", "title", "Body", admin.id);
  input.excerpt = Some("Short".into());
  input.featured_image_url = Some("https://example.com/a.png".into());
  let post = s.create_blog_post(input).await.unwrap();

  let past = Utc::now() - Duration::hours(3);
  set_timestamp(&s, "blog_posts", "updated_at", post.id, past).await;

  let mut update = UpdateBlogPostInput::new(post.id);
  update.title = Some("New Title".into());
  update.excerpt = Some(None);
  update.is_published = Some(true);
  let updated = s.update_blog_post(update).await.unwrap();

  assert_eq!(updated.title, "New Title");
  assert_eq!(updated.excerpt, None);
  assert!(updated.is_published);
  assert_eq!(updated.slug, "title");
  assert_eq!(updated.content, "Body");
  assert_eq!(updated.featured_image_url.as_deref(), Some("https://example.com/a.png"));
  assert!(updated.updated_at > past);
  assert_eq!(updated.created_at, post.created_at);
}

#[tokio::test]
async fn update_blog_post_missing_is_not_found() {
  let s = store().await;
  let mut update = UpdateBlogPostInput::new(5);
  update.title = Some("Nope".into());
  let err = s.update_blog_post(update).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::BlogPostNotFound(5))));
}

#[tokio::test]
async fn update_blog_post_slug_must_stay_unique() {
  let s = store().await;
  let admin = user(&s, "admin@example.com", UserRole::Admin).await;
  let a = s
    .create_blog_post(CreateBlogPostInput::new("A", "a", "Body", admin.id))
    .await
    .unwrap();
  s.create_blog_post(CreateBlogPostInput::new("B", "b", "Body", admin.id))
    .await
    .unwrap();

  let mut update = UpdateBlogPostInput::new(a.id);
  update.slug = Some("b".into());
  let err = s.update_blog_post(update).await.unwrap_err();
  assert_eq!(kind(err), ErrorKind::Conflict);

  let mut update = UpdateBlogPostInput::new(a.id);
  update.slug = Some("a-renamed".into());
  let renamed = s.update_blog_post(update).await.unwrap();
  assert_eq!(renamed.slug, "a-renamed");
  assert!(s.get_blog_post_by_slug("a").await.unwrap().is_none());
}

#[tokio::test]
async fn delete_blog_post() {
  let s = store().await;
  let ids = seed_posts(&s).await;

  s.delete_blog_post(ids[0]).await.unwrap();
  assert!(s.get_blog_post_by_slug("oldest").await.unwrap().is_none());

  let err = s.delete_blog_post(ids[0]).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::BlogPostNotFound(_))));
  assert_eq!(kind(err), ErrorKind::NotFound);
}
