//! POST command implementation.

use clap::Parser;
use requestr_common_http::{PostBody, PostRequest};

use super::AuthArgs;
use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::print_output;

/// Send a POST request
#[derive(Debug, Parser)]
pub struct PostCommand {
    /// Target URL
    pub url: String,

    /// Body encoding: none, form, json, xml or multipart
    #[arg(short = 't', long, default_value = "none")]
    pub content_type: String,

    /// Body data. `name=value` for form and multipart (`@path` uploads a
    /// file), raw text for json and xml. Repeatable.
    #[arg(short, long = "data", value_name = "DATA")]
    pub data: Vec<String>,

    /// Extra request header, `NAME:VALUE`. Repeatable.
    #[arg(short = 'H', long = "header", value_name = "NAME:VALUE")]
    pub headers: Vec<String>,

    /// Cookie to send, `NAME=VALUE`. Repeatable.
    #[arg(short = 'b', long = "cookie", value_name = "NAME=VALUE")]
    pub cookies: Vec<String>,

    #[command(flatten)]
    pub auth: AuthArgs,
}

impl PostCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let request = self.build_request()?;
        let response = ctx.client.send_post(&self.url, &request, ctx.debug).await?;
        print_output(ctx, &response)
    }

    fn build_request(&self) -> Result<PostRequest, CliError> {
        let body = PostBody::from_parts(&self.content_type, &self.data)?;
        let mut request = PostRequest::new(body);

        if let Some((user, password)) = self.auth.credentials() {
            request = request.basic_auth(user, password);
        }

        for header in &self.headers {
            let (name, value) = header.split_once(':').ok_or_else(|| {
                CliError::validation("header", format!("expected NAME:VALUE, got {header}"))
            })?;
            request = request.header(name.trim(), value.trim());
        }

        for cookie in &self.cookies {
            let (name, value) = cookie.split_once('=').ok_or_else(|| {
                CliError::validation("cookie", format!("expected NAME=VALUE, got {cookie}"))
            })?;
            request = request.cookie(name, value);
        }

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use requestr_common_http::{ContentType, Cookie};

    fn command(args: &[&str]) -> PostCommand {
        let mut argv = vec!["post", "http://localhost/"];
        argv.extend_from_slice(args);
        PostCommand::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults_to_empty_body() {
        let request = command(&[]).build_request().unwrap();
        assert_eq!(request.content_type(), ContentType::None);
        assert!(request.headers.is_empty());
        assert!(request.cookies.is_empty());
        assert!(request.auth.is_none());
    }

    #[test]
    fn test_builds_form_request_with_extras() {
        let request = command(&[
            "-t", "form", "-d", "a=1", "-d", "b=2", "-H", "X-Trace: abc", "-b", "session=xyz",
            "-u", "user", "-p", "pass",
        ])
        .build_request()
        .unwrap();

        assert_eq!(request.content_type(), ContentType::Form);
        assert_eq!(request.headers, vec![("X-Trace".to_string(), "abc".to_string())]);
        assert_eq!(request.cookies, vec![Cookie::new("session", "xyz")]);
        assert!(request.auth.is_some());
    }

    #[test]
    fn test_unknown_content_type_is_validation_error() {
        let err = command(&["-t", "yaml"]).build_request().unwrap_err();
        assert_eq!(err.code(), 5);
    }

    #[test]
    fn test_malformed_header_is_rejected() {
        let err = command(&["-H", "no-colon"]).build_request().unwrap_err();
        assert!(matches!(err, CliError::Validation { field: Some(ref f), .. } if f == "header"));
    }

    #[test]
    fn test_password_requires_user() {
        assert!(PostCommand::try_parse_from(["post", "http://localhost/", "-p", "x"]).is_err());
    }
}
