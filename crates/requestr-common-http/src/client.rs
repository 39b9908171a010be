//! HTTP client configuration and request dispatch.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE, COOKIE};
use reqwest::{Client, ClientBuilder, Method, Proxy, RequestBuilder, Url};
use requestr_common_log::spans::{instrument_future, record_error, record_status, request_span, Timer};
use tracing::{debug, info};

use crate::multipart::build_multipart_form;
use crate::request::{headers, BasicAuth, DeleteRequest, GetRequest, PostBody, PostRequest};
use crate::response::Response;

/// Environment variable naming the upstream proxy.
pub const PROXY_ENV: &str = "HTTP_PROXY";

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Proxy used for every scheme. `None` disables proxying entirely.
    pub proxy: Option<String>,
    /// Skip TLS certificate verification.
    pub accept_invalid_certs: bool,
    /// Keep cookies set by servers and replay them on later requests.
    pub cookie_store: bool,
    /// Enable gzip decompression. Off keeps `Content-Length` intact.
    pub gzip: bool,
    /// User agent string.
    pub user_agent: String,
    /// Connection timeout.
    pub connect_timeout: Option<Duration>,
    /// Whole-request timeout.
    pub request_timeout: Option<Duration>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            accept_invalid_certs: true,
            cookie_store: true,
            gzip: false,
            user_agent: format!("requestr/{}", env!("CARGO_PKG_VERSION")),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

impl HttpConfig {
    /// Default config with the proxy taken from `HTTP_PROXY`.
    pub fn from_env() -> Self {
        Self {
            proxy: std::env::var(PROXY_ENV).ok().filter(|url| !url.is_empty()),
            ..Self::default()
        }
    }
}

/// Build a configured HTTP client, storing cookies in `jar` when given.
fn build_client(config: &HttpConfig, jar: Option<Arc<Jar>>) -> Result<Client, HttpError> {
    let mut builder = ClientBuilder::new()
        .user_agent(&config.user_agent)
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .gzip(config.gzip);

    if let Some(jar) = jar {
        builder = builder.cookie_provider(jar);
    }

    builder = match &config.proxy {
        Some(url) => {
            let proxy = Proxy::all(url).map_err(|source| HttpError::InvalidProxy {
                url: url.clone(),
                source,
            })?;
            builder.proxy(proxy)
        }
        None => builder.no_proxy(),
    };

    if let Some(timeout) = config.connect_timeout {
        builder = builder.connect_timeout(timeout);
    }
    if let Some(timeout) = config.request_timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().map_err(HttpError::ClientBuild)
}

/// HTTP errors.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("invalid proxy URL {url}: {source}")]
    InvalidProxy {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to send HTTP request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("failed to read HTTP response body: {0}")]
    ReadBody(#[source] reqwest::Error),

    #[error("invalid POST request mode - {0}")]
    InvalidContentType(String),

    #[error("invalid header: {name}")]
    InvalidHeader { name: String },

    #[error("error while opening file {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<reqwest::Error> for HttpError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            HttpError::Timeout
        } else {
            HttpError::Request(e)
        }
    }
}

/// Shared HTTP client. Clones share one connection pool and cookie jar.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    jar: Option<Arc<Jar>>,
}

impl HttpClient {
    /// Create a client configured from the environment.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_config(HttpConfig::from_env())
    }

    /// Create a new HTTP client with custom config.
    pub fn with_config(config: HttpConfig) -> Result<Self, HttpError> {
        let jar = config.cookie_store.then(|| Arc::new(Jar::default()));
        let inner = build_client(&config, jar.clone())?;
        Ok(Self { inner, jar })
    }

    /// Explicit cookies followed by the jar's cookies for `url`.
    ///
    /// `reqwest` skips the jar once a request carries its own `Cookie`
    /// header, so both sets are joined here.
    fn cookie_header(&self, url: &str, request: &PostRequest) -> Option<String> {
        let explicit = request.cookie_header()?;

        let stored = self
            .jar
            .as_ref()
            .zip(Url::parse(url).ok())
            .and_then(|(jar, url)| jar.cookies(&url))
            .and_then(|value| value.to_str().map(str::to_string).ok());

        match stored {
            Some(stored) => Some(format!("{explicit}; {stored}")),
            None => Some(explicit),
        }
    }

    /// Send a GET request.
    pub async fn send_get(
        &self,
        url: &str,
        request: &GetRequest,
        debug: bool,
    ) -> Result<Response, HttpError> {
        let builder = with_basic_auth(self.inner.get(url), request.auth.as_ref());
        self.dispatch(Method::GET, url, builder, debug).await
    }

    /// Send a DELETE request.
    pub async fn send_delete(
        &self,
        url: &str,
        request: &DeleteRequest,
        debug: bool,
    ) -> Result<Response, HttpError> {
        let builder = with_basic_auth(self.inner.delete(url), request.auth.as_ref());
        self.dispatch(Method::DELETE, url, builder, debug).await
    }

    /// Send a POST request with the body encoded per its content type.
    ///
    /// Custom headers are appended after the body's `Content-Type`, so a
    /// caller-supplied `Content-Type` is sent in addition to it.
    pub async fn send_post(
        &self,
        url: &str,
        request: &PostRequest,
        debug: bool,
    ) -> Result<Response, HttpError> {
        let builder = self.inner.post(url);

        let mut builder = match &request.body {
            PostBody::None => builder,
            PostBody::Form(pairs) => builder
                .header(CONTENT_TYPE, headers::CONTENT_TYPE_FORM)
                .body(PostBody::encode_form(pairs)),
            PostBody::Json(data) => {
                if debug {
                    info!("JSON HTTP POST payload:\n{}", String::from_utf8_lossy(data));
                }
                builder
                    .header(CONTENT_TYPE, headers::CONTENT_TYPE_JSON)
                    .body(data.clone())
            }
            PostBody::Xml(data) => {
                if debug {
                    info!("XML HTTP POST payload:\n{}", String::from_utf8_lossy(data));
                }
                builder
                    .header(CONTENT_TYPE, headers::CONTENT_TYPE_XML)
                    .body(data.clone())
            }
            PostBody::Multipart(fields) => builder.multipart(build_multipart_form(fields).await?),
        };

        builder = with_basic_auth(builder, request.auth.as_ref());

        for (name, value) in &request.headers {
            let invalid = || HttpError::InvalidHeader { name: name.clone() };
            let header_name = HeaderName::try_from(name.as_str()).map_err(|_| invalid())?;
            let header_value = HeaderValue::try_from(value.as_str()).map_err(|_| invalid())?;
            builder = builder.header(header_name, header_value);
        }

        if let Some(cookies) = self.cookie_header(url, request) {
            builder = builder.header(COOKIE, cookies);
        }

        self.dispatch(Method::POST, url, builder, debug).await
    }

    async fn dispatch(
        &self,
        method: Method,
        url: &str,
        builder: RequestBuilder,
        debug: bool,
    ) -> Result<Response, HttpError> {
        let span = request_span(method.as_str(), url);

        let exchange = async move {
            if debug {
                info!("Sending HTTP {} request to: {}", method, url);
            } else {
                debug!("Making {} request to: {}", method, url);
            }

            let timer = Timer::start("http_request");
            let result = match builder.send().await {
                Ok(response) => Response::from_reqwest(response).await,
                Err(e) => Err(HttpError::from(e)),
            };
            timer.finish();

            let response = match result {
                Ok(response) => response,
                Err(e) => {
                    record_error(&e);
                    return Err(e);
                }
            };
            record_status(response.status_code);

            if debug {
                info!("Got HTTP response!");
                response.log_details();
            } else {
                debug!("{} response: {} {}", method, response.status_code, url);
            }

            Ok(response)
        };

        instrument_future(exchange, span).await
    }
}

fn with_basic_auth(builder: RequestBuilder, auth: Option<&BasicAuth>) -> RequestBuilder {
    match auth {
        Some(auth) if auth.is_present() => builder.basic_auth(&auth.username, Some(&auth.password)),
        _ => builder,
    }
}
