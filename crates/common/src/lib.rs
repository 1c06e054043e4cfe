use thiserror::Error;

pub mod types;
pub mod utils;
pub mod backend;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn core_error_messages_carry_cause() {
        let e = CoreError::Network("connection refused".into());
        assert_eq!(e.to_string(), "network error: connection refused");
        let e = CoreError::Parse("expected value".into());
        assert_eq!(e.to_string(), "parse error: expected value");
    }
}
