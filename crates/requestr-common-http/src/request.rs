//! Per-verb request options.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::client::HttpError;

/// Content-Type values emitted for each POST body encoding.
pub mod headers {
    pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";
    pub const CONTENT_TYPE_JSON: &str = "application/json";
    pub const CONTENT_TYPE_XML: &str = "application/xml";
    pub const CONTENT_TYPE_OCTET_STREAM: &str = "application/octet-stream";
}

/// HTTP basic auth credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Credentials are only sent when a username is set.
    pub fn is_present(&self) -> bool {
        !self.username.is_empty()
    }
}

/// Options for a GET request.
#[derive(Debug, Clone, Default)]
pub struct GetRequest {
    pub auth: Option<BasicAuth>,
}

impl GetRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some(BasicAuth::new(username, password));
        self
    }
}

/// Options for a DELETE request.
#[derive(Debug, Clone, Default)]
pub struct DeleteRequest {
    pub auth: Option<BasicAuth>,
}

impl DeleteRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some(BasicAuth::new(username, password));
        self
    }
}

/// POST body discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    None,
    Form,
    Json,
    Xml,
    Multipart,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::None => "none",
            ContentType::Form => "form",
            ContentType::Json => "json",
            ContentType::Xml => "xml",
            ContentType::Multipart => "multipart",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(ContentType::None),
            "form" => Ok(ContentType::Form),
            "json" => Ok(ContentType::Json),
            "xml" => Ok(ContentType::Xml),
            "multipart" => Ok(ContentType::Multipart),
            other => Err(HttpError::InvalidContentType(other.to_string())),
        }
    }
}

/// Encoded POST payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PostBody {
    #[default]
    None,
    /// Url-encoded pairs; a key may repeat.
    Form(Vec<(String, String)>),
    Json(Vec<u8>),
    Xml(Vec<u8>),
    /// Field name to value. Values starting with `@` name a file to upload.
    Multipart(BTreeMap<String, String>),
}

impl PostBody {
    pub fn content_type(&self) -> ContentType {
        match self {
            PostBody::None => ContentType::None,
            PostBody::Form(_) => ContentType::Form,
            PostBody::Json(_) => ContentType::Json,
            PostBody::Xml(_) => ContentType::Xml,
            PostBody::Multipart(_) => ContentType::Multipart,
        }
    }

    /// Build a body from a textual discriminator and raw payload items.
    ///
    /// Form and multipart items are `name=value` pairs. JSON and XML items
    /// are joined with `&`, the way repeated `curl -d` flags are.
    pub fn from_parts(kind: &str, items: &[String]) -> Result<Self, HttpError> {
        let body = match kind.parse::<ContentType>()? {
            ContentType::None => PostBody::None,
            ContentType::Form => PostBody::Form(items.iter().map(|item| split_pair(item)).collect()),
            ContentType::Json => PostBody::Json(items.join("&").into_bytes()),
            ContentType::Xml => PostBody::Xml(items.join("&").into_bytes()),
            ContentType::Multipart => {
                PostBody::Multipart(items.iter().map(|item| split_pair(item)).collect())
            }
        };
        Ok(body)
    }

    /// Url-encode form pairs, ordered by key with repeated keys kept in
    /// insertion order.
    pub(crate) fn encode_form(pairs: &[(String, String)]) -> String {
        let mut sorted: Vec<&(String, String)> = pairs.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));

        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (name, value) in sorted {
            serializer.append_pair(name, value);
        }
        serializer.finish()
    }
}

fn split_pair(item: &str) -> (String, String) {
    match item.split_once('=') {
        Some((name, value)) => (name.to_string(), value.to_string()),
        None => (item.to_string(), String::new()),
    }
}

/// A cookie attached to a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Options for a POST request.
#[derive(Debug, Clone, Default)]
pub struct PostRequest {
    pub auth: Option<BasicAuth>,
    pub body: PostBody,
    /// Extra headers, added after the body's own `Content-Type`.
    pub headers: Vec<(String, String)>,
    pub cookies: Vec<Cookie>,
}

impl PostRequest {
    pub fn new(body: PostBody) -> Self {
        Self {
            body,
            ..Self::default()
        }
    }

    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some(BasicAuth::new(username, password));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.push(Cookie::new(name, value));
        self
    }

    pub fn content_type(&self) -> ContentType {
        self.body.content_type()
    }

    /// Value for a single `Cookie` header, if any cookies are set.
    pub(crate) fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        let pairs: Vec<String> = self.cookies.iter().map(Cookie::to_string).collect();
        Some(pairs.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_round_trips_through_text() {
        for kind in ["none", "form", "json", "xml", "multipart"] {
            let parsed: ContentType = kind.parse().unwrap();
            assert_eq!(parsed.to_string(), kind);
        }
    }

    #[test]
    fn test_unknown_content_type_is_rejected() {
        let err = "yaml".parse::<ContentType>().unwrap_err();
        assert!(matches!(err, HttpError::InvalidContentType(ref kind) if kind == "yaml"));
        assert!(err.to_string().contains("POST request mode - yaml"));
    }

    #[test]
    fn test_content_type_is_case_sensitive() {
        assert!("JSON".parse::<ContentType>().is_err());
    }

    #[test]
    fn test_basic_auth_presence() {
        assert!(BasicAuth::new("user", "").is_present());
        assert!(!BasicAuth::new("", "secret").is_present());
    }

    #[test]
    fn test_from_parts_form() {
        let body = PostBody::from_parts("form", &["a=1".into(), "flag".into(), "b=x=y".into()]).unwrap();
        assert_eq!(
            body,
            PostBody::Form(vec![
                ("a".into(), "1".into()),
                ("flag".into(), String::new()),
                ("b".into(), "x=y".into()),
            ])
        );
    }

    #[test]
    fn test_from_parts_json_and_xml() {
        let json = PostBody::from_parts("json", &[r#"{"a":1}"#.into()]).unwrap();
        assert_eq!(json, PostBody::Json(br#"{"a":1}"#.to_vec()));

        let xml = PostBody::from_parts("xml", &["<a/>".into()]).unwrap();
        assert_eq!(xml.content_type(), ContentType::Xml);
    }

    #[test]
    fn test_from_parts_multipart() {
        let body = PostBody::from_parts("multipart", &["title=hi".into(), "doc=@/tmp/x".into()]).unwrap();
        match body {
            PostBody::Multipart(fields) => {
                assert_eq!(fields.get("title").map(String::as_str), Some("hi"));
                assert_eq!(fields.get("doc").map(String::as_str), Some("@/tmp/x"));
            }
            other => panic!("expected multipart body, got {other:?}"),
        }
    }

    #[test]
    fn test_from_parts_none_ignores_items() {
        let body = PostBody::from_parts("none", &["ignored".into()]).unwrap();
        assert_eq!(body, PostBody::None);
    }

    #[test]
    fn test_from_parts_rejects_unknown_kind() {
        assert!(PostBody::from_parts("protobuf", &[]).is_err());
    }

    #[test]
    fn test_encode_form_sorts_keys() {
        let pairs = vec![
            ("b".to_string(), "two words".to_string()),
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "&".to_string()),
        ];
        assert_eq!(PostBody::encode_form(&pairs), "a=1&b=two+words&b=%26");
    }

    #[test]
    fn test_cookie_header() {
        let request = PostRequest::default();
        assert_eq!(request.cookie_header(), None);

        let request = PostRequest::default().cookie("a", "1").cookie("b", "2");
        assert_eq!(request.cookie_header().as_deref(), Some("a=1; b=2"));
    }

    #[test]
    fn test_post_request_builder() {
        let request = PostRequest::new(PostBody::Json(b"{}".to_vec()))
            .basic_auth("user", "pass")
            .header("X-Trace", "abc");

        assert_eq!(request.content_type(), ContentType::Json);
        assert_eq!(request.auth, Some(BasicAuth::new("user", "pass")));
        assert_eq!(request.headers, vec![("X-Trace".to_string(), "abc".to_string())]);
    }
}
