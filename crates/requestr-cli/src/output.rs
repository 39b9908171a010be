//! Output formatting for responses.

use serde::Serialize;
use std::io::Write;

use requestr_common_http::Response;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::CliError;

/// Trait for types that can be formatted for output
pub trait FormattedOutput {
    fn format_text(&self) -> String;
    fn format_json(&self) -> Result<String, serde_json::Error>;
}

impl FormattedOutput for Response {
    fn format_text(&self) -> String {
        let mut out = format!(
            "Status: {}\nContent-Length: {}\n",
            self.status_code, self.content_length
        );
        for (name, value) in self.sorted_headers() {
            out.push_str(&format!("{name}: {value}\n"));
        }
        out.push('\n');
        out.push_str(&self.body);
        out
    }

    fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn render<T>(format: OutputFormat, value: &T) -> Result<String, CliError>
where
    T: FormattedOutput + Serialize,
{
    match format {
        OutputFormat::Text => Ok(value.format_text()),
        OutputFormat::Json => value.format_json().map_err(|e| CliError::Io {
            message: format!("JSON serialization failed: {e}"),
            source: None,
        }),
    }
}

/// Print formatted output to stdout
pub fn print_output<T>(ctx: &CommandContext, value: &T) -> Result<(), CliError>
where
    T: FormattedOutput + Serialize,
{
    write_output(ctx.format, value, std::io::stdout().lock())
}

/// Print formatted output to a writer
pub fn write_output<T, W>(format: OutputFormat, value: &T, mut writer: W) -> Result<(), CliError>
where
    T: FormattedOutput + Serialize,
    W: Write,
{
    let output = render(format, value)?;
    writeln!(writer, "{output}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn sample() -> Response {
        let mut headers = HashMap::new();
        headers.insert("X-Multi".to_string(), "a, b".to_string());
        headers.insert("Content-Type".to_string(), "text/plain".to_string());
        Response {
            status_code: 201,
            content_length: -1,
            body: "created".to_string(),
            headers,
        }
    }

    #[test]
    fn test_text_output_layout() {
        let text = sample().format_text();
        assert_eq!(
            text,
            "Status: 201\nContent-Length: -1\nContent-Type: text/plain\nX-Multi: a, b\n\ncreated"
        );
    }

    #[test]
    fn test_json_output_round_trips_fields() {
        let mut buf = Vec::new();
        write_output(OutputFormat::Json, &sample(), &mut buf).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["status_code"], 201);
        assert_eq!(value["content_length"], -1);
        assert_eq!(value["body"], "created");
        assert_eq!(value["headers"]["X-Multi"], "a, b");
    }

    #[test]
    fn test_text_writer_appends_newline() {
        let mut buf = Vec::new();
        write_output(OutputFormat::Text, &sample(), &mut buf).unwrap();
        assert!(String::from_utf8(buf).unwrap().ends_with("created\n"));
    }
}
