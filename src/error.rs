use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid argument: {message}")]
    InvalidArgumentType { message: String },
    #[error("shape mismatch: {message}")]
    ShapeMismatch { message: String },
    #[error("relative length {value} of example {index} is outside (0, 1]")]
    OutOfRangeLength { index: usize, value: f32 },
    #[error("{context}: {message}")]
    Tensor {
        context: &'static str,
        message: String,
    },
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl DecodeError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgumentType {
            message: message.into(),
        }
    }

    pub(crate) fn shape_mismatch(message: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            message: message.into(),
        }
    }

    pub(crate) fn out_of_range(index: usize, value: f32) -> Self {
        Self::OutOfRangeLength { index, value }
    }

    pub(crate) fn tensor(context: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Tensor {
            context,
            message: err.to_string(),
        }
    }

    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }
}
