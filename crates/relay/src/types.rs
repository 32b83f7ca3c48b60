use serde::{Deserialize, Serialize};

/// Method name for bundle submission.
pub const SEND_BUNDLE: &str = "eth_sendBundle";

/// A JSON-RPC 2.0 request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonRpcRequest<T> {
    /// Protocol version, always `2.0`.
    pub jsonrpc: String,
    /// Request id.
    pub id: u64,
    /// Method name.
    pub method: String,
    /// Positional parameters.
    pub params: T,
}

impl<T> JsonRpcRequest<T> {
    /// Create a request with id `1`.
    pub fn new(method: &str, params: T) -> Self {
        Self { jsonrpc: "2.0".to_string(), id: 1, method: method.to_string(), params }
    }
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonRpcError {
    /// Error code.
    pub code: i64,
    /// Error message.
    pub message: String,
}

/// A JSON-RPC 2.0 response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonRpcResponse<T> {
    /// The result, absent on error. Some relays answer `null`.
    #[serde(default = "Option::default")]
    pub result: Option<T>,
    /// The error, absent on success.
    #[serde(default = "Option::default")]
    pub error: Option<JsonRpcError>,
}

impl<T> JsonRpcResponse<T> {
    /// Split the response into its result, failing on a JSON-RPC error.
    pub fn into_result(self) -> crate::error::Result<Option<T>> {
        match self.error {
            Some(JsonRpcError { code, message }) => Err(crate::RelayError::Rpc { code, message }),
            None => Ok(self.result),
        }
    }
}
