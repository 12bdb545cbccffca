//! MCP (Model Context Protocol) server implementation.
//!
//! This module exposes the expense operations as tools for AI agent
//! integration. The server communicates via JSON-RPC over stdio.

/// Checks if the server has been initialized and returns an error if not.
macro_rules! require_init {
    ($self:expr) => {
        if !$self.check_initialized().await {
            return Self::uninitialized();
        }
    };
}

mod mcp_utils;
mod tools;

use crate::Config;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::model::{
    CallToolResult, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::transport::stdio;
use rmcp::ErrorData as McpError;
use rmcp::{tool_handler, ServerHandler, ServiceExt};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// The expenses MCP server.
///
/// This server exposes the expense record operations as MCP tools.
#[derive(Debug, Clone)]
pub(crate) struct ExpenseServer {
    initialized: Arc<Mutex<bool>>,
    config: Arc<Config>,
    tool_router: ToolRouter<ExpenseServer>,
}

impl ExpenseServer {
    /// Creates a new ExpenseServer with the given configuration.
    pub(crate) fn new(config: Config) -> Self {
        Self {
            initialized: Arc::new(Mutex::new(false)),
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        }
    }

    async fn check_initialized(&self) -> bool {
        *self.initialized.lock().await
    }

    fn uninitialized() -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::error(vec![rmcp::model::Content::text(
            "You have not yet initialized the service. Please call __initialize_service__ first.",
        )]))
    }
}

#[tool_handler]
impl ServerHandler for ExpenseServer {
    /// Returns server information sent to the MCP client during initialization.
    ///
    /// The `instructions` field is shown to the AI to help it understand when
    /// and how to use this server's tools. Agents tend to treat this reading
    /// as optional, so the tools additionally require a call to
    /// `initialize_service` before anything else.
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "expenses".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(include_str!("docs/INTRO.md").into()),
        }
    }
}

/// Transport type for the MCP server.
#[derive(Debug, Default)]
pub(crate) enum Io {
    #[default]
    Stdio,
    /// Mock transport for testing - holds one end of a duplex channel.
    #[cfg(test)]
    Mock(tokio::io::DuplexStream),
}

/// Runs the MCP server with stdio transport or mock transport. This function
/// starts the MCP server and blocks until the client disconnects or an error
/// occurs.
pub(crate) async fn run_server(config: Config, io: Io) -> crate::Result<()> {
    let server = ExpenseServer::new(config);
    info!("Starting MCP server...");

    let service = match io {
        Io::Stdio => server
            .serve(stdio())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to start MCP server: {e}"))?,
        #[cfg(test)]
        Io::Mock(stream) => server
            .serve(stream)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to start MCP server: {e}"))?,
    };

    info!("MCP server running, waiting for requests...");

    // Wait for the server to complete (client disconnects or error)
    service
        .waiting()
        .await
        .map_err(|e| anyhow::anyhow!("MCP server error: {e}"))?;

    info!("MCP server shut down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;
    use rmcp::model::CallToolRequestParam;
    use rmcp::ServiceExt;
    use tokio::io::duplex;

    /// Flattens a tool result's content to a single string for assertions.
    fn text_of(result: &rmcp::model::CallToolResult) -> String {
        serde_json::to_string(&result.content).unwrap_or_default()
    }

    /// Integration test for the MCP server using an in-memory transport.
    /// Drives initialize_service, add_expense, get_all_expenses and
    /// remove_expense through a real client.
    #[tokio::test]
    async fn test_mcp_server_integration() {
        // Create duplex channel - one end for server, one for client
        let (client_io, server_io) = duplex(4096);

        // Create test environment (holds TempDir alive for duration of test)
        let env = TestEnv::new().await;
        let config = env.config();

        // Spawn server in background task
        let server_handle =
            tokio::spawn(async move { run_server(config, Io::Mock(server_io)).await });

        // Create MCP client connected to the other end
        let client = ().serve(client_io).await.expect("Failed to create client");

        // Tools refuse to run before initialize_service has been called.
        let premature = client
            .call_tool(CallToolRequestParam {
                name: "get_expenses_count".into(),
                arguments: None,
            })
            .await
            .expect("get_expenses_count call failed");
        assert!(premature.is_error.unwrap_or(false));

        let init_result = client
            .call_tool(CallToolRequestParam {
                name: "initialize_service".into(),
                arguments: None,
            })
            .await
            .expect("initialize_service call failed");
        assert!(
            !init_result.is_error.unwrap_or(false),
            "initialize_service returned error: {:?}",
            init_result.content
        );

        // Record an expense through the tool surface.
        let mut args = serde_json::Map::new();
        args.insert("category".into(), serde_json::Value::String("food".into()));
        args.insert(
            "amount".into(),
            serde_json::Value::String("45.50".into()),
        );
        args.insert(
            "description".into(),
            serde_json::Value::String("groceries".into()),
        );
        let add_result = client
            .call_tool(CallToolRequestParam {
                name: "add_expense".into(),
                arguments: Some(args),
            })
            .await
            .expect("add_expense call failed");
        assert!(
            !add_result.is_error.unwrap_or(false),
            "add_expense returned error: {:?}",
            add_result.content
        );
        assert!(text_of(&add_result).contains("$45.50"));

        // The record is visible through the report tool.
        let list_result = client
            .call_tool(CallToolRequestParam {
                name: "get_all_expenses".into(),
                arguments: None,
            })
            .await
            .expect("get_all_expenses call failed");
        assert!(!list_result.is_error.unwrap_or(false));
        assert!(text_of(&list_result).contains("groceries"));

        // A failed operation surfaces as an error-flavored result, not a
        // protocol error.
        let mut args = serde_json::Map::new();
        args.insert(
            "category".into(),
            serde_json::Value::String("bogus".into()),
        );
        let remove_result = client
            .call_tool(CallToolRequestParam {
                name: "remove_expense".into(),
                arguments: Some(args),
            })
            .await
            .expect("remove_expense call failed");
        assert!(remove_result.is_error.unwrap_or(false));
        assert!(text_of(&remove_result).contains("doesn't exist"));

        // Drop client to trigger server shutdown
        drop(client);

        // Wait for server to finish (with timeout)
        let server_result = tokio::time::timeout(std::time::Duration::from_secs(5), server_handle)
            .await
            .expect("Server timed out")
            .expect("Server task panicked");

        assert!(
            server_result.is_ok(),
            "Server returned error: {:?}",
            server_result
        );
    }
}
