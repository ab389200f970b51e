//! Error types for query construction.
//!
//! All validation happens when a node is mutated, so a constructed tree can always be
//! rendered. Every error here is an invalid argument handed to a setter or parser.

use thiserror::Error;

/// Errors raised when a query node is configured with an invalid value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// Boost was negative or not a number.
    #[error("invalid boost {0}: boost must be a finite positive number or 0 to unset")]
    InvalidBoost(f64),

    /// Fuzziness was negative or not a number.
    #[error("invalid fuzziness {0}: fuzziness must be a finite positive number")]
    InvalidFuzziness(f64),

    /// Exclusion was something other than require, prohibit or none.
    #[error("invalid exclusion '{0}': expected '+', '-', 'require', 'prohibit' or empty")]
    InvalidExclusion(String),

    /// Operator was something other than AND or OR.
    #[error("invalid operator '{0}': expected AND or OR")]
    InvalidOperator(String),
}

impl QueryError {
    /// Returns a suggestion for fixing the offending call, if one applies.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidBoost(_) => Some("Use 0 to leave a clause unboosted"),
            Self::InvalidOperator(op) if op.eq_ignore_ascii_case("not") => {
                Some("Negate a clause with a prohibit exclusion instead of a NOT operator")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boost_error_display() {
        let err = QueryError::InvalidBoost(-1.0);
        assert!(err.to_string().contains("-1"));
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn operator_error_display() {
        let err = QueryError::InvalidOperator("XOR".into());
        assert!(err.to_string().contains("'XOR'"));
        assert!(err.suggestion().is_none());
    }

    #[test]
    fn not_operator_suggestion() {
        let err = QueryError::InvalidOperator("not".into());
        assert!(err.suggestion().unwrap().contains("prohibit"));
    }

    #[test]
    fn exclusion_error_display() {
        let err = QueryError::InvalidExclusion("!".into());
        assert!(err.to_string().contains("'!'"));
    }
}
