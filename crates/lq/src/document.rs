//! TOML query documents.
//!
//! A document lists clauses under `[[clause]]` tables; each clause names its `kind` and the
//! options that apply to it. Groups nest further `clause` arrays. Documents are converted
//! into an [`lq_query::Query`] using the effective [`QuerySettings`] for anything the
//! document leaves out.

use std::{io, path::PathBuf};

use lq_config::QuerySettings;
use lq_query::{
    CollectionNode, Exclusion, Node, Operator, Query, QueryError, QueryNode, RangeBound,
    RangeNode, TermCollectionNode, TermLike,
};
use serde::Deserialize;
use thiserror::Error;

/// Errors produced while loading or interpreting a query document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The document is not valid TOML or does not match the document schema.
    #[error("failed to parse query document: {0}")]
    Parse(#[from] toml::de::Error),

    /// A clause is missing a required option or carries one that does not apply.
    #[error("clause {clause}: {message}")]
    Clause {
        /// Position of the clause, e.g. `2` or `3.1` for nested clauses.
        clause: String,
        /// What is wrong with it.
        message: String,
    },

    /// A clause value was rejected by the query builder.
    #[error("clause {clause}: {source}")]
    Invalid {
        /// Position of the clause.
        clause: String,
        /// Underlying validation error.
        source: QueryError,
    },

    /// The top-level operator was rejected.
    #[error("document operator: {0}")]
    Operator(QueryError),
}

/// Root of a query document.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawDocument {
    /// Operator joining top-level clauses.
    pub operator: Option<String>,
    /// Top-level clauses.
    #[serde(rename = "clause")]
    pub clauses: Vec<RawClause>,
}

/// Kinds of clause a document can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseKind {
    /// Single term or phrase.
    Term,
    /// Group of terms.
    Terms,
    /// Value range.
    Range,
    /// Date range.
    DateRange,
    /// Nested group of clauses.
    Group,
}

/// A scalar value as written in TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    /// Integer literal.
    Integer(i64),
    /// Float literal.
    Float(f64),
    /// String literal.
    Text(String),
}

impl From<ScalarValue> for RangeBound {
    fn from(value: ScalarValue) -> Self {
        match value {
            ScalarValue::Integer(i) => Self::Integer(i),
            ScalarValue::Float(x) => Self::Float(x),
            ScalarValue::Text(s) => Self::Text(s),
        }
    }
}

impl From<ScalarValue> for TermLike {
    fn from(value: ScalarValue) -> Self {
        match value {
            ScalarValue::Integer(i) => Self::display(i),
            ScalarValue::Float(x) => Self::display(x),
            ScalarValue::Text(s) => Self::Token(s),
        }
    }
}

/// One clause of a document. Which options are allowed depends on `kind`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawClause {
    /// Clause kind.
    pub kind: ClauseKind,
    /// Field scope; falls back to the configured default field when absent.
    pub field: Option<String>,
    /// `require`, `prohibit`, `+`, `-` or `none`.
    pub exclusion: Option<String>,
    /// Relevance multiplier.
    pub boost: Option<f64>,
    /// Term value (`term`).
    pub value: Option<ScalarValue>,
    /// Edit distance or proximity (`term`).
    pub fuzziness: Option<f64>,
    /// Term values (`terms`).
    pub values: Option<Vec<ScalarValue>>,
    /// Lower bound (`range`, `date_range`); absent means unbounded.
    pub start: Option<ScalarValue>,
    /// Upper bound (`range`, `date_range`); absent means unbounded.
    pub stop: Option<ScalarValue>,
    /// Whether both bounds are inclusive (`range`, `date_range`); defaults to true.
    pub inclusive: Option<bool>,
    /// Join operator (`terms`, `group`).
    pub operator: Option<String>,
    /// Nested clauses (`group`).
    #[serde(rename = "clause")]
    pub clauses: Option<Vec<RawClause>>,
}

/// Parses a document from TOML text.
pub fn parse_document(contents: &str) -> Result<RawDocument, DocumentError> {
    Ok(toml::from_str(contents)?)
}

/// Builds a query from a parsed document.
pub fn build_query(doc: RawDocument, settings: &QuerySettings) -> Result<Query, DocumentError> {
    let operator = match &doc.operator {
        Some(op) => op.parse().map_err(DocumentError::Operator)?,
        None => settings.operator,
    };

    let mut query = Query::with_operator(operator);
    for (i, clause) in doc.clauses.into_iter().enumerate() {
        query.add(build_node(clause, settings, &(i + 1).to_string())?);
    }
    Ok(query)
}

/// Converts one clause (and its children) into a node.
fn build_node(
    clause: RawClause,
    settings: &QuerySettings,
    position: &str,
) -> Result<Node, DocumentError> {
    check_options(&clause, position)?;

    let invalid = |source| DocumentError::Invalid {
        clause: position.to_string(),
        source,
    };
    let missing = |what: &str| DocumentError::Clause {
        clause: position.to_string(),
        message: format!("{} clause requires {what}", kind_name(clause.kind)),
    };

    let mut node: Node = match clause.kind {
        ClauseKind::Term => {
            let value = clause.value.ok_or_else(|| missing("a value"))?;
            let mut term = TermLike::from(value).into_term();
            term.set_fuzziness(clause.fuzziness).map_err(invalid)?;
            term.into()
        }
        ClauseKind::Terms => {
            let values = clause.values.ok_or_else(|| missing("values"))?;
            let operator = parse_operator(clause.operator.as_deref(), settings.collection_operator)
                .map_err(invalid)?;
            let mut terms = TermCollectionNode::with_operator(operator);
            terms.add_all(values);
            terms.into()
        }
        ClauseKind::Range | ClauseKind::DateRange => {
            if clause.start.is_none() && clause.stop.is_none() {
                return Err(missing("a start or a stop"));
            }
            let mut range = if clause.kind == ClauseKind::DateRange {
                RangeNode::date()
            } else {
                RangeNode::new()
            };
            range
                .set_range(clause.start, clause.stop)
                .set_inclusive(clause.inclusive.unwrap_or(true));
            range.into()
        }
        ClauseKind::Group => {
            let operator =
                parse_operator(clause.operator.as_deref(), settings.operator).map_err(invalid)?;
            let mut group = CollectionNode::with_operator(operator);
            for (i, child) in clause.clauses.into_iter().flatten().enumerate() {
                group.add(build_node(child, settings, &format!("{position}.{}", i + 1))?);
            }
            group.into()
        }
    };

    let field = clause
        .field
        .as_deref()
        .unwrap_or(settings.default_field.as_str());
    let exclusion: Exclusion = clause
        .exclusion
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(invalid)?;
    node.set_field(field).set_exclusion(exclusion);
    node.set_boost(clause.boost.unwrap_or_default())
        .map_err(invalid)?;

    Ok(node)
}

/// Parses an optional operator, falling back to `default`.
fn parse_operator(value: Option<&str>, default: Operator) -> Result<Operator, QueryError> {
    value.map_or(Ok(default), str::parse)
}

/// Rejects options that do not apply to the clause's kind.
fn check_options(clause: &RawClause, position: &str) -> Result<(), DocumentError> {
    let kind = clause.kind;
    let present = [
        ("value", clause.value.is_some(), &[ClauseKind::Term][..]),
        ("fuzziness", clause.fuzziness.is_some(), &[ClauseKind::Term][..]),
        ("values", clause.values.is_some(), &[ClauseKind::Terms][..]),
        (
            "start",
            clause.start.is_some(),
            &[ClauseKind::Range, ClauseKind::DateRange][..],
        ),
        (
            "stop",
            clause.stop.is_some(),
            &[ClauseKind::Range, ClauseKind::DateRange][..],
        ),
        (
            "inclusive",
            clause.inclusive.is_some(),
            &[ClauseKind::Range, ClauseKind::DateRange][..],
        ),
        (
            "operator",
            clause.operator.is_some(),
            &[ClauseKind::Terms, ClauseKind::Group][..],
        ),
        ("clause", clause.clauses.is_some(), &[ClauseKind::Group][..]),
    ];

    let unexpected: Vec<String> = present
        .into_iter()
        .filter(|(_, is_set, allowed)| *is_set && !allowed.contains(&kind))
        .map(|(name, _, _)| format!("'{name}'"))
        .collect();

    if unexpected.is_empty() {
        Ok(())
    } else {
        Err(DocumentError::Clause {
            clause: position.to_string(),
            message: format!(
                "{} clause does not accept {}",
                kind_name(kind),
                unexpected.join(", ")
            ),
        })
    }
}

/// Returns the document spelling of a clause kind.
fn kind_name(kind: ClauseKind) -> &'static str {
    match kind {
        ClauseKind::Term => "term",
        ClauseKind::Terms => "terms",
        ClauseKind::Range => "range",
        ClauseKind::DateRange => "date_range",
        ClauseKind::Group => "group",
    }
}
