//! Single term or phrase clauses.

use crate::{
    QueryError,
    escape::escape_token,
    node::{Decoration, OP_FUZZY, QueryNode},
};

/// A single term or phrase, with optional fuzziness.
///
/// Phrases (values containing spaces) are quoted automatically. With fuzziness set, the
/// rendered term gains a `~n` suffix: edit distance for single words, proximity for
/// phrases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermNode {
    /// Trimmed value; `None` until a value is set.
    term: Option<String>,
    /// Edit distance or proximity, if any.
    fuzziness: Option<f64>,
    /// Field, exclusion and boost.
    decoration: Decoration,
}

impl TermNode {
    /// Creates an empty term node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a term node holding `value`.
    pub fn term(value: impl AsRef<str>) -> Self {
        let mut node = Self::new();
        node.set_value(value);
        node
    }

    /// Sets the term value, trimming surrounding whitespace.
    pub fn set_value(&mut self, value: impl AsRef<str>) -> &mut Self {
        self.term = Some(value.as_ref().trim().to_string());
        self
    }

    /// Returns the stored value, if one was set.
    pub fn value(&self) -> Option<&str> {
        self.term.as_deref()
    }

    /// Sets or clears the fuzziness. Negative, infinite and NaN values are rejected.
    pub fn set_fuzziness(&mut self, fuzziness: Option<f64>) -> Result<&mut Self, QueryError> {
        if let Some(f) = fuzziness
            && (!f.is_finite() || f < 0.0)
        {
            return Err(QueryError::InvalidFuzziness(f));
        }
        self.fuzziness = fuzziness;
        Ok(self)
    }

    /// Returns the fuzziness, if set.
    pub fn fuzziness(&self) -> Option<f64> {
        self.fuzziness
    }
}

impl QueryNode for TermNode {
    fn is_empty(&self) -> bool {
        self.term.is_none()
    }

    fn render_raw(&self) -> String {
        let Some(term) = &self.term else {
            return String::new();
        };

        let mut raw = escape_token(term.trim());
        if let Some(fuzziness) = self.fuzziness
            && !raw.is_empty()
        {
            raw.push(OP_FUZZY);
            raw.push_str(&fuzziness.to_string());
        }
        raw
    }

    fn decoration(&self) -> &Decoration {
        &self.decoration
    }

    fn decoration_mut(&mut self) -> &mut Decoration {
        &mut self.decoration
    }
}
