use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid model artifact: {0}")]
    InvalidModel(String),

    #[error("Feature schema mismatch: model expects {model}, service provides {service}")]
    SchemaMismatch { model: String, service: String },

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("'{field}' is required")]
    Validation { field: String },

    #[error("Could not convert '{field}' to {kind}: {value}")]
    Coercion {
        field: String,
        kind: String,
        value: Value,
    },

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_model(msg: impl Into<String>) -> Self {
        Self::InvalidModel(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedRequest(msg.into())
    }

    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    pub fn validation(field: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
        }
    }

    /// Only a missing or null field is the client's fault; everything else
    /// the pipeline reports as a server error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
