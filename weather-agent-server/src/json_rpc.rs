use serde::{Deserialize, Serialize};
use serde_json::Value;

use a2a_protocol::{JsonRpcId, JSONRPC_VERSION};

/// JSON-RPC 2.0 Request envelope, parsed before method dispatch.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Option<Value>,
    pub id: Option<JsonRpcId>,
}

/// Helper function to validate a JSON-RPC request envelope.
pub fn validate_request(request: &JsonRpcRequest) -> Result<(), crate::error::Error> {
    if request.jsonrpc != JSONRPC_VERSION {
        return Err(crate::error::Error::InvalidRequest(
            "Invalid JSON-RPC version".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_wrong_version() {
        let request = JsonRpcRequest {
            jsonrpc: "1.0".to_string(),
            method: "tasks/send".to_string(),
            params: None,
            id: None,
        };
        assert!(validate_request(&request).is_err());

        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            ..request
        };
        assert!(validate_request(&request).is_ok());
    }
}
