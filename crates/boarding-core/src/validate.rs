//! Request validation that the type system alone does not express.
//!
//! Enumerated values, required keys and non-negative offsets are already
//! enforced when an input is deserialised. [`Validate`] covers the rest:
//! non-empty strings, URL and email shapes, and positive page sizes.

use crate::{
  Error, Result,
  blog::{CreateBlogPostInput, GetBlogPostsInput, UpdateBlogPostInput},
  school::{CreateBoardingSchoolInput, FilterSchoolsInput, UpdateBoardingSchoolInput},
  user::CreateUserInput,
};

pub trait Validate {
  fn validate(&self) -> Result<()>;
}

fn non_empty(field: &str, value: &str) -> Result<()> {
  if value.is_empty() {
    return Err(Error::invalid(field, "must not be empty"));
  }
  Ok(())
}

/// Accepts absolute `http` and `https` URLs with a non-empty host.
fn url(field: &str, value: &str) -> Result<()> {
  let invalid = || Error::invalid(field, "must be an http(s) URL");

  let parsed = url::Url::parse(value).map_err(|_| invalid())?;
  if !matches!(parsed.scheme(), "http" | "https")
    || parsed.host_str().is_none_or(str::is_empty)
  {
    return Err(invalid());
  }
  Ok(())
}

fn email(field: &str, value: &str) -> Result<()> {
  let invalid = || Error::invalid(field, "must be an email address");

  let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
  if local.is_empty()
    || domain.contains('@')
    || value.chars().any(char::is_whitespace)
  {
    return Err(invalid());
  }
  // Require a dotted domain with non-empty labels, e.g. `example.com`.
  if !domain.contains('.') || domain.split('.').any(str::is_empty) {
    return Err(invalid());
  }
  Ok(())
}

fn positive(field: &str, value: u32) -> Result<()> {
  if value == 0 {
    return Err(Error::invalid(field, "must be positive"));
  }
  Ok(())
}

impl Validate for CreateBoardingSchoolInput {
  fn validate(&self) -> Result<()> {
    non_empty("name", &self.name)?;
    non_empty("description", &self.description)?;
    if let Some(v) = &self.website_url {
      url("website_url", v)?;
    }
    if let Some(v) = &self.contact_email {
      email("contact_email", v)?;
    }
    Ok(())
  }
}

impl Validate for UpdateBoardingSchoolInput {
  fn validate(&self) -> Result<()> {
    if let Some(v) = &self.name {
      non_empty("name", v)?;
    }
    if let Some(v) = &self.description {
      non_empty("description", v)?;
    }
    if let Some(Some(v)) = &self.website_url {
      url("website_url", v)?;
    }
    if let Some(Some(v)) = &self.contact_email {
      email("contact_email", v)?;
    }
    Ok(())
  }
}

impl Validate for FilterSchoolsInput {
  fn validate(&self) -> Result<()> { positive("limit", self.limit) }
}

impl Validate for CreateBlogPostInput {
  fn validate(&self) -> Result<()> {
    non_empty("title", &self.title)?;
    non_empty("slug", &self.slug)?;
    non_empty("content", &self.content)?;
    if let Some(v) = &self.featured_image_url {
      url("featured_image_url", v)?;
    }
    Ok(())
  }
}

impl Validate for UpdateBlogPostInput {
  fn validate(&self) -> Result<()> {
    if let Some(v) = &self.title {
      non_empty("title", v)?;
    }
    if let Some(v) = &self.slug {
      non_empty("slug", v)?;
    }
    if let Some(v) = &self.content {
      non_empty("content", v)?;
    }
    if let Some(Some(v)) = &self.featured_image_url {
      url("featured_image_url", v)?;
    }
    Ok(())
  }
}

impl Validate for GetBlogPostsInput {
  fn validate(&self) -> Result<()> { positive("limit", self.limit) }
}

impl Validate for CreateUserInput {
  fn validate(&self) -> Result<()> {
    email("email", &self.email)?;
    non_empty("name", &self.name)
  }
}
