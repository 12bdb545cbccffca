use crate::commands::Out;
use rmcp::model::{CallToolResult, Content};
use rmcp::ErrorData;
use serde::Serialize;
use std::fmt::Debug;
use tracing::error;

/// Converts a command result into a tool-call result.
///
/// Failures become error-flavored tool content rather than protocol errors,
/// so the calling agent always receives something it can relay to the user.
pub(super) fn tool_result<T>(result: crate::Result<Out<T>>) -> Result<CallToolResult, ErrorData>
where
    T: Debug + Clone + Serialize,
{
    Ok(match result {
        Ok(out) => {
            let mut content = vec![Content::text(out.message())];
            if let Some(structure) = out.structure() {
                match Content::json(structure) {
                    Ok(json) => content.push(json),
                    Err(e) => error!("Unable to serialize JSON output: {e}"),
                }
            }
            CallToolResult::success(content)
        }
        Err(e) => CallToolResult::error(vec![Content::text(e.to_string())]),
    })
}
