//! Groups of terms, such as "any of these tags".

use std::fmt;

use crate::{
    collection::{Operator, join_rendered},
    node::{Decoration, QueryNode},
    term::TermNode,
};

/// Input accepted by [`TermCollectionNode::add`]: a raw token or a prepared term.
#[derive(Debug, Clone, PartialEq)]
pub enum TermLike {
    /// Raw text, turned into a fresh [`TermNode`].
    Token(String),
    /// A term node used as-is.
    Node(TermNode),
}

impl TermLike {
    /// Converts any displayable value into a token.
    pub fn display(value: impl fmt::Display) -> Self {
        Self::Token(value.to_string())
    }

    /// Normalizes into a term node.
    pub fn into_term(self) -> TermNode {
        match self {
            Self::Token(token) => TermNode::term(token),
            Self::Node(node) => node,
        }
    }
}

impl From<&str> for TermLike {
    fn from(value: &str) -> Self {
        Self::Token(value.to_string())
    }
}

impl From<&String> for TermLike {
    fn from(value: &String) -> Self {
        Self::Token(value.clone())
    }
}

impl From<String> for TermLike {
    fn from(value: String) -> Self {
        Self::Token(value)
    }
}

impl From<i64> for TermLike {
    fn from(value: i64) -> Self {
        Self::display(value)
    }
}

impl From<u64> for TermLike {
    fn from(value: u64) -> Self {
        Self::display(value)
    }
}

impl From<i32> for TermLike {
    fn from(value: i32) -> Self {
        Self::display(value)
    }
}

impl From<TermNode> for TermLike {
    fn from(value: TermNode) -> Self {
        Self::Node(value)
    }
}

/// A collection whose children are all terms.
///
/// Plain strings and numbers are accepted wherever a term is expected and converted on
/// the way in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermCollectionNode {
    /// Terms in insertion order.
    terms: Vec<TermNode>,
    /// Join operator.
    operator: Operator,
    /// Field, exclusion and boost.
    decoration: Decoration,
}

impl TermCollectionNode {
    /// Creates an empty `AND` term collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty term collection with the given operator.
    pub fn with_operator(operator: Operator) -> Self {
        Self {
            operator,
            ..Self::default()
        }
    }

    /// Appends a term, converting raw tokens into term nodes.
    pub fn add(&mut self, element: impl Into<TermLike>) -> &mut Self {
        self.terms.push(element.into().into_term());
        self
    }

    /// Appends every element in order.
    pub fn add_all<I>(&mut self, elements: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<TermLike>,
    {
        for element in elements {
            self.add(element);
        }
        self
    }

    /// Sets the join operator.
    pub fn set_operator(&mut self, operator: Operator) -> &mut Self {
        self.operator = operator;
        self
    }

    /// Returns the join operator.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Returns the terms in insertion order.
    pub fn terms(&self) -> &[TermNode] {
        &self.terms
    }
}

impl QueryNode for TermCollectionNode {
    fn is_empty(&self) -> bool {
        self.terms.iter().all(|term| term.render().is_empty())
    }

    fn render_raw(&self) -> String {
        join_rendered(self.operator, self.terms.iter().map(QueryNode::render))
    }

    fn decoration(&self) -> &Decoration {
        &self.decoration
    }

    fn decoration_mut(&mut self) -> &mut Decoration {
        &mut self.decoration
    }
}
