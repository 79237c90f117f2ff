//! Custom extractors for Axum handlers.
//!
//! These wrap axum's own extractors so that rejections render as the
//! standard [`ErrorResponse`](crate::errors::ErrorResponse).

pub mod json_body;

pub use json_body::JsonBody;
