//! GET, POST and DELETE helpers for requestr.
//!
//! [`HttpClient`] owns one `reqwest` client with a cookie jar. Each verb takes
//! its own options struct and returns a fully buffered [`Response`] with the
//! headers flattened to one string per name.

pub mod client;
pub mod multipart;
pub mod request;
pub mod response;

pub use client::{HttpClient, HttpConfig, HttpError, PROXY_ENV};
pub use multipart::build_multipart_form;
pub use request::{
    headers, BasicAuth, ContentType, Cookie, DeleteRequest, GetRequest, PostBody, PostRequest,
};
pub use response::{canonical_header_name, flatten_headers, Response};
