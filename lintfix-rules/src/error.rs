//! Error types for rule construction.
//!
//! Applying a rule cannot fail; only building one from a pattern can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    /// A regular expression did not compile.
    #[error("invalid pattern for rule {key}: {source}")]
    InvalidPattern {
        key: &'static str,
        #[source]
        source: regex::Error,
    },

    /// An insertion rule whose own line would not satisfy its presence guard,
    /// so it would insert again on every run.
    #[error("rule {key} inserts a line its guard does not recognise")]
    UnguardedInsert { key: &'static str },
}

impl RuleError {
    pub fn invalid_pattern(key: &'static str, source: regex::Error) -> Self {
        RuleError::InvalidPattern { key, source }
    }
}

#[cfg(test)]
mod tests {
    use super::RuleError;

    #[test]
    fn invalid_pattern_display_names_rule() {
        let source = regex::Regex::new("(").expect_err("unbalanced group");
        let err = RuleError::invalid_pattern("syntax.example", source);
        let msg = err.to_string();
        assert!(msg.contains("invalid pattern"));
        assert!(msg.contains("syntax.example"));
    }
}
