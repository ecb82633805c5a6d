//! Diagram error types.

/// Error raised by a [`DiagramEngine`](crate::DiagramEngine).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Source rejected by the syntax check.
    #[error("syntax error: {0}")]
    Syntax(String),
    /// Transport or HTTP status failure.
    #[error("HTTP error: {0}")]
    Http(String),
    /// Response body could not be read or decoded.
    #[error("I/O error: {0}")]
    Io(String),
}

/// Failure of one render pass, tagged with the stage that failed.
#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
    /// Parse phase completed but reported the source as invalid.
    #[error("Parse result is empty")]
    ParseRejected,
    /// Parse phase raised an error.
    #[error("{0}")]
    Parse(#[source] EngineError),
    /// Render phase raised an error after a successful parse.
    #[error("{0}")]
    Render(#[source] EngineError),
}

impl DiagramError {
    /// Name of the stage that failed, for logging.
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            Self::ParseRejected | Self::Parse(_) => "parse",
            Self::Render(_) => "render",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        assert_eq!(DiagramError::ParseRejected.stage(), "parse");
        assert_eq!(
            DiagramError::Parse(EngineError::Syntax("x".to_owned())).stage(),
            "parse"
        );
        assert_eq!(
            DiagramError::Render(EngineError::Http("500".to_owned())).stage(),
            "render"
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(DiagramError::ParseRejected.to_string(), "Parse result is empty");
        assert_eq!(
            DiagramError::Render(EngineError::Http("HTTP 400: bad".to_owned())).to_string(),
            "HTTP error: HTTP 400: bad"
        );
    }
}
