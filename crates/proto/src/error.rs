use thiserror::Error;

/// Top-level error type
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading/validation error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Backend sender error.
    #[error("Send error: {0}")]
    Send(#[from] SendError),

    /// Internal protocol type error.
    #[error("Proto error: {0}")]
    Proto(#[from] ProtoError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Filesystem read error.
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    Toml(String),
}

/// Backend sender errors. Every variant collapses to the same fixed
/// assistant message at the submission boundary.
#[derive(Debug, Error)]
pub enum SendError {
    /// Remote API failure.
    #[error("{0}")]
    Api(String),

    /// Network/connection-level failure.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Reply payload was missing or malformed.
    #[error("Invalid response from backend: {0}")]
    InvalidResponse(String),
}

/// Internal proto errors
#[derive(Debug, Error)]
pub enum ProtoError {
    /// Invalid role string value.
    #[error("Invalid role: {0}")]
    InvalidRole(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_config_error_variant() {
        let err = ConfigError::Toml("expected table".to_string());
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn wraps_config_error_into_top_level_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = ConfigError::from(io).into();
        assert!(err.to_string().contains("Config error"));
    }

    #[test]
    fn wraps_send_error_into_top_level_error() {
        let api: Error = SendError::Api("backend offline".to_string()).into();
        assert!(api.to_string().contains("Send error"));

        let conn: Error = SendError::Connection("reset by peer".to_string()).into();
        assert!(conn.to_string().contains("Connection error"));

        let invalid: Error = SendError::InvalidResponse("empty body".to_string()).into();
        assert!(invalid.to_string().contains("Invalid response"));
    }

    #[test]
    fn wraps_proto_error_into_top_level_error() {
        let err: Error = ProtoError::InvalidRole("owner".to_string()).into();
        assert!(err.to_string().contains("Proto error"));
    }
}
