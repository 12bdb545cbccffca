//! The mcp command handler.

use crate::commands::Out;
use crate::{mcp as server, Config, Result};

/// Runs the MCP server on stdio. Blocks until the client disconnects.
pub async fn mcp(config: Config) -> Result<Out<String>> {
    server::run_server(config, server::Io::Stdio).await?;
    Ok(Out::new_message("MCP server stopped"))
}
