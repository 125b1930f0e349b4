//! Procedure-call plumbing shared by every handler.
//!
//! Queries take their input from `?input=<url-encoded JSON>` on `GET`;
//! everything else reads a JSON request body. Output is wrapped as
//! `{"result": {"data": ...}}`.

use axum::{
  Json,
  body::Bytes,
  extract::{FromRequest, Query, Request},
  http::Method,
  response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::ApiError;

// ─── Input ────────────────────────────────────────────────────────────────────

/// Procedure input. `None` when the caller sent nothing or JSON `null`.
#[derive(Debug)]
pub struct RpcInput<T>(pub Option<T>);

impl<T> RpcInput<T> {
  /// Input for procedures that cannot run without one.
  pub fn required(self) -> Result<T, ApiError> {
    self
      .0
      .ok_or_else(|| ApiError::BadRequest("input is required".into()))
  }
}

#[derive(Deserialize)]
struct InputQuery {
  input: Option<String>,
}

impl<T, St> FromRequest<St> for RpcInput<T>
where
  T: DeserializeOwned + Send,
  St: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &St) -> Result<Self, Self::Rejection> {
    let raw = if req.method() == Method::GET {
      let Query(query) = Query::<InputQuery>::try_from_uri(req.uri())
        .map_err(|e| ApiError::BadRequest(e.body_text()))?;
      query.input.map(String::into_bytes).unwrap_or_default()
    } else {
      Bytes::from_request(req, state).await?.to_vec()
    };
    parse(&raw).map(RpcInput)
  }
}

fn parse<T: DeserializeOwned>(raw: &[u8]) -> Result<Option<T>, ApiError> {
  if raw.iter().all(u8::is_ascii_whitespace) {
    return Ok(None);
  }
  serde_json::from_slice::<Option<T>>(raw)
    .map_err(|e| ApiError::BadRequest(format!("invalid input: {e}")))
}

// ─── Output ───────────────────────────────────────────────────────────────────

/// Successful procedure output.
#[derive(Debug)]
pub struct Rpc<T>(pub T);

#[derive(Serialize)]
struct Envelope<T> {
  result: Data<T>,
}

#[derive(Serialize)]
struct Data<T> {
  data: T,
}

impl<T: Serialize> IntoResponse for Rpc<T> {
  fn into_response(self) -> Response {
    Json(Envelope { result: Data { data: self.0 } }).into_response()
  }
}

/// Output of the delete procedures.
#[derive(Debug, Serialize)]
pub struct Success {
  pub success: bool,
}
