//! Error types and JSON-RPC error codes for the MCP server.

use tourism_rec::RecError;

use super::message::{JsonRpcError, JsonRpcErrorObject, RequestId, JSONRPC_VERSION};

/// Standard JSON-RPC 2.0 error codes.
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// MCP-specific error codes.
pub mod mcp_error_codes {
    pub const RESOURCE_NOT_FOUND: i32 = -32802;
    pub const TOOL_NOT_FOUND: i32 = -32803;
    pub const PROMPT_NOT_FOUND: i32 = -32804;
    pub const PLACE_NOT_FOUND: i32 = -32850;
    pub const USER_NOT_FOUND: i32 = -32851;
    pub const ENGINE_ERROR: i32 = -32852;
}

/// All errors that can occur in the MCP server.
#[derive(thiserror::Error, Debug)]
pub enum McpError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Prompt not found: {0}")]
    PromptNotFound(String),

    #[error("Place not found: {0}")]
    PlaceNotFound(String),

    #[error("No ratings found for {0}")]
    UserNotFound(String),

    #[error("Engine error: {0}")]
    EngineError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    pub fn code(&self) -> i32 {
        use error_codes::*;
        use mcp_error_codes::*;
        match self {
            McpError::ParseError(_) => PARSE_ERROR,
            McpError::InvalidRequest(_) => INVALID_REQUEST,
            McpError::MethodNotFound(_) => METHOD_NOT_FOUND,
            McpError::InvalidParams(_) => INVALID_PARAMS,
            McpError::InternalError(_) | McpError::Io(_) => INTERNAL_ERROR,
            McpError::ResourceNotFound(_) => RESOURCE_NOT_FOUND,
            McpError::ToolNotFound(_) => TOOL_NOT_FOUND,
            McpError::PromptNotFound(_) => PROMPT_NOT_FOUND,
            McpError::PlaceNotFound(_) => PLACE_NOT_FOUND,
            McpError::UserNotFound(_) => USER_NOT_FOUND,
            McpError::EngineError(_) => ENGINE_ERROR,
            McpError::Json(_) => PARSE_ERROR,
        }
    }

    pub fn to_json_rpc_error(&self, id: RequestId) -> JsonRpcError {
        JsonRpcError {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            error: JsonRpcErrorObject {
                code: self.code(),
                message: self.to_string(),
                data: None,
            },
        }
    }
}

impl From<RecError> for McpError {
    fn from(e: RecError) -> Self {
        match e {
            RecError::PlaceNotFound(id) => McpError::PlaceNotFound(id.to_string()),
            RecError::PlaceNameNotFound(name) => McpError::PlaceNotFound(name),
            RecError::UserNotFound(user) => McpError::UserNotFound(user.to_string()),
            RecError::InvalidRating(_) | RecError::InvalidConfig(_) => {
                McpError::InvalidParams(e.to_string())
            }
            RecError::Io(io) => McpError::Io(io),
            other => McpError::EngineError(other.to_string()),
        }
    }
}

pub type McpResult<T> = Result<T, McpError>;

#[cfg(test)]
mod tests {
    use super::*;
    use tourism_rec::UserKey;

    #[test]
    fn test_rec_error_mapping() {
        let e: McpError = RecError::PlaceNotFound(7).into();
        assert_eq!(e.code(), mcp_error_codes::PLACE_NOT_FOUND);
        let e: McpError = RecError::UserNotFound(UserKey::Registered(3)).into();
        assert_eq!(e.code(), mcp_error_codes::USER_NOT_FOUND);
        assert_eq!(e.to_string(), "No ratings found for user 3");
        let e: McpError = RecError::InvalidRating(9).into();
        assert_eq!(e.code(), error_codes::INVALID_PARAMS);
        let e: McpError = RecError::Storage("bad".into()).into();
        assert_eq!(e.code(), mcp_error_codes::ENGINE_ERROR);
    }
}
