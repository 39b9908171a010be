//! Multipart body assembly.

use std::collections::BTreeMap;
use std::path::PathBuf;

use reqwest::multipart::{Form, Part};
use tokio::fs::File;

use crate::client::HttpError;
use crate::request::headers;

/// Prefix marking a multipart value as a file path.
pub const FILE_PREFIX: char = '@';

/// Returns the file path when `value` is an `@path` reference.
pub fn file_reference(value: &str) -> Option<&str> {
    value.strip_prefix(FILE_PREFIX)
}

/// Build a multipart form from field names to values.
///
/// Values of the form `@path` are streamed from disk as file parts whose
/// filename is the path itself. Everything else is sent as a text field.
pub async fn build_multipart_form(fields: &BTreeMap<String, String>) -> Result<Form, HttpError> {
    let mut form = Form::new();

    for (name, value) in fields {
        form = match file_reference(value) {
            Some(path) => {
                tracing::debug!(field = %name, path = %path, "attaching file part");
                form.part(name.clone(), file_part(path).await?)
            }
            None => form.text(name.clone(), value.clone()),
        };
    }

    Ok(form)
}

async fn file_part(path: &str) -> Result<Part, HttpError> {
    let open_error = |source: std::io::Error| HttpError::FileOpen {
        path: PathBuf::from(path),
        source,
    };

    let file = File::open(path).await.map_err(open_error)?;
    let length = file.metadata().await.map_err(open_error)?.len();

    Part::stream_with_length(file, length)
        .file_name(path.to_string())
        .mime_str(headers::CONTENT_TYPE_OCTET_STREAM)
        .map_err(HttpError::Request)
}
