use thiserror::Error;

/// Failure taxonomy for tool handlers and their collaborators.
///
/// Each variant maps onto exactly one JSON-RPC error code in
/// `mcp::rpc::app_error_to_json_rpc`; handlers convert every failure into an
/// error envelope and never let one escape into a transport adapter.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    InvalidArguments { message: String },
    #[error("{message}")]
    DataUnavailable { message: String },
    #[error("{message}")]
    Upstream { message: String },
}

impl AppError {
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            message: message.into(),
        }
    }

    pub fn data_unavailable(message: impl Into<String>) -> Self {
        Self::DataUnavailable {
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }
}
