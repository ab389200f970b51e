//! The shared node contract and render pipeline.
//!
//! Every node contributes a raw fragment through [`QueryNode::render_raw`]. The provided
//! [`QueryNode::render`] then applies the node's [`Decoration`]: field scope, then either an
//! exclusion prefix or a boost suffix.

use std::{fmt, str::FromStr};

use crate::{QueryError, escape::escape_token};

/// Require operator.
pub const OP_REQUIRE: char = '+';
/// Prohibit operator.
pub const OP_PROHIBIT: char = '-';
/// Boost operator.
pub const OP_BOOST: char = '^';
/// Fuzziness and proximity operator.
pub const OP_FUZZY: char = '~';
/// Match-anything wildcard, used for unbounded range ends.
pub const WILDCARD_ALL: &str = "*";

/// Whether a clause must, or must not, match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Exclusion {
    /// The clause is optional.
    #[default]
    None,
    /// The clause must match (`+`).
    Require,
    /// The clause must not match (`-`).
    Prohibit,
}

impl Exclusion {
    /// Returns the operator character, if any.
    pub fn operator(self) -> Option<char> {
        match self {
            Self::None => None,
            Self::Require => Some(OP_REQUIRE),
            Self::Prohibit => Some(OP_PROHIBIT),
        }
    }
}

impl FromStr for Exclusion {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "+" | "require" => Ok(Self::Require),
            "-" | "prohibit" => Ok(Self::Prohibit),
            _ => Err(QueryError::InvalidExclusion(s.to_string())),
        }
    }
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Require => f.write_str("require"),
            Self::Prohibit => f.write_str("prohibit"),
        }
    }
}

/// Field scope, exclusion and boost shared by every node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decoration {
    /// Field the clause applies to; empty means the engine's default field.
    field: String,
    /// Require or prohibit operator.
    exclusion: Exclusion,
    /// Relevance multiplier; 0 means unset.
    boost: f64,
}

impl Decoration {
    /// Returns the field scope, or `None` if the clause is unscoped.
    pub fn field(&self) -> Option<&str> {
        if self.field.is_empty() {
            None
        } else {
            Some(&self.field)
        }
    }

    /// Returns the exclusion mode.
    pub fn exclusion(&self) -> Exclusion {
        self.exclusion
    }

    /// Returns the boost, or 0 if unset.
    pub fn boost(&self) -> f64 {
        self.boost
    }

    /// Sets the field scope. An empty string removes it.
    pub fn set_field(&mut self, field: impl Into<String>) {
        self.field = field.into();
    }

    /// Sets the exclusion mode.
    pub fn set_exclusion(&mut self, exclusion: Exclusion) {
        self.exclusion = exclusion;
    }

    /// Sets the boost. Negative, infinite and NaN values are rejected; 0 unsets it.
    pub fn set_boost(&mut self, boost: f64) -> Result<(), QueryError> {
        if !boost.is_finite() || boost < 0.0 {
            return Err(QueryError::InvalidBoost(boost));
        }
        self.boost = boost;
        Ok(())
    }

    /// Wraps a raw fragment with field scope and the exclusion or boost operator.
    ///
    /// Returns an empty string if `raw` is blank, so empty nodes never leave stray
    /// operators behind in a composite.
    pub fn apply(&self, raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            return String::new();
        }

        let mut out = String::with_capacity(raw.len() + self.field.len() + 8);
        if let Some(op) = self.exclusion.operator() {
            out.push(op);
        }
        if let Some(field) = self.field() {
            out.push_str(&escape_token(field));
            out.push(':');
        }
        out.push_str(raw);
        if self.exclusion == Exclusion::None && self.boost > 0.0 {
            out.push(OP_BOOST);
            out.push_str(&self.boost.to_string());
        }
        out
    }
}

/// Behaviour common to every query node.
///
/// Implementors supply their raw fragment and emptiness; rendering and the shared setters
/// are provided.
pub trait QueryNode {
    /// Returns true if this node contributes nothing to the query.
    fn is_empty(&self) -> bool;

    /// Builds the undecorated fragment for this node.
    fn render_raw(&self) -> String;

    /// Returns the node's field, exclusion and boost.
    fn decoration(&self) -> &Decoration;

    /// Returns the node's field, exclusion and boost for modification.
    fn decoration_mut(&mut self) -> &mut Decoration;

    /// Renders the node, including field scope, exclusion and boost.
    fn render(&self) -> String {
        self.decoration().apply(&self.render_raw())
    }

    /// Sets the field scope. An empty string removes it.
    fn set_field(&mut self, field: impl Into<String>) -> &mut Self
    where
        Self: Sized,
    {
        self.decoration_mut().set_field(field);
        self
    }

    /// Sets the require/prohibit exclusion.
    fn set_exclusion(&mut self, exclusion: Exclusion) -> &mut Self
    where
        Self: Sized,
    {
        self.decoration_mut().set_exclusion(exclusion);
        self
    }

    /// Sets the boost. Fails if `boost` is negative or not finite.
    fn set_boost(&mut self, boost: f64) -> Result<&mut Self, QueryError>
    where
        Self: Sized,
    {
        self.decoration_mut().set_boost(boost)?;
        Ok(self)
    }
}
