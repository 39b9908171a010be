//! Normalized HTTP response.

use std::collections::{BTreeMap, HashMap};

use reqwest::header::HeaderMap;
use serde::Serialize;

use crate::client::HttpError;

/// A fully buffered response with flattened headers.
///
/// Header names use canonical casing (`Content-Type`). A header that was
/// received several times is stored once with its values joined by `", "`,
/// so values that themselves contain commas cannot be split back apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    pub status_code: u16,
    /// `-1` when the server did not announce a length.
    pub content_length: i64,
    pub body: String,
    pub headers: HashMap<String, String>,
}

impl Response {
    /// Read a `reqwest` response to completion and normalize it.
    pub async fn from_reqwest(response: reqwest::Response) -> Result<Self, HttpError> {
        let status_code = response.status().as_u16();
        let content_length = response
            .content_length()
            .and_then(|len| i64::try_from(len).ok())
            .unwrap_or(-1);
        let headers = flatten_headers(response.headers());

        let bytes = response.bytes().await.map_err(HttpError::ReadBody)?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        Ok(Self {
            status_code,
            content_length,
            body,
            headers,
        })
    }

    /// Look up a header by any casing of its name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&canonical_header_name(name))
            .map(String::as_str)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Headers ordered by name, for stable output.
    pub fn sorted_headers(&self) -> BTreeMap<&str, &str> {
        self.headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect()
    }

    pub(crate) fn log_details(&self) {
        tracing::info!("HTTP response status code: {}", self.status_code);
        tracing::info!("HTTP response content length: {}", self.content_length);
        tracing::info!("Response body:\n{}", self.body);
        tracing::info!("Response headers:");
        for (name, value) in self.sorted_headers() {
            tracing::info!("\t{} = {}", name, value);
        }
    }
}

/// Collapse a header map into one entry per name.
pub fn flatten_headers(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .keys()
        .map(|name| {
            let values: Vec<String> = headers
                .get_all(name)
                .iter()
                .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
                .collect();
            (canonical_header_name(name.as_str()), values.join(", "))
        })
        .collect()
}

/// Uppercase the first letter and every letter after a hyphen, lowercase
/// the rest: `x-request-id` becomes `X-Request-Id`.
pub fn canonical_header_name(name: &str) -> String {
    let mut upper = true;
    name.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}
