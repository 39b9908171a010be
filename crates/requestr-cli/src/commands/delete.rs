//! DELETE command implementation.

use clap::Parser;
use requestr_common_http::DeleteRequest;

use super::AuthArgs;
use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::print_output;

/// Send a DELETE request
#[derive(Debug, Parser)]
pub struct DeleteCommand {
    /// Target URL
    pub url: String,

    #[command(flatten)]
    pub auth: AuthArgs,
}

impl DeleteCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let mut request = DeleteRequest::new();
        if let Some((user, password)) = self.auth.credentials() {
            request = request.basic_auth(user, password);
        }

        let response = ctx.client.send_delete(&self.url, &request, ctx.debug).await?;
        print_output(ctx, &response)
    }
}
