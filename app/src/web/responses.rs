// app/src/web/responses.rs

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<'a, T: Serialize> {
  pub status: &'static str,
  pub message: &'a str,
  pub data: T,
}

/// `{"status": "success", "message": ..., "data": ...}` with the given status code.
pub fn success<T: Serialize>(status: StatusCode, message: &str, data: T) -> HttpResponse {
  HttpResponse::build(status).json(Envelope {
    status: "success",
    message,
    data,
  })
}
