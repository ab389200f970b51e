//! Boolean composition of clauses.
//!
//! A [`CollectionNode`] owns an ordered list of child [`Node`]s and joins their rendered
//! forms with `AND` or `OR`. Children that render empty are skipped, a single remaining
//! child is emitted bare, and two or more are parenthesized.

use std::{fmt, str::FromStr};

use crate::{
    QueryError,
    node::{Decoration, QueryNode},
    range::RangeNode,
    term::TermNode,
    term_collection::TermCollectionNode,
};

/// Boolean operator joining the children of a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Operator {
    /// All children should match.
    #[default]
    And,
    /// Any child may match.
    Or,
}

impl Operator {
    /// Returns the operator keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl FromStr for Operator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("and") {
            Ok(Self::And)
        } else if trimmed.eq_ignore_ascii_case("or") {
            Ok(Self::Or)
        } else {
            Err(QueryError::InvalidOperator(s.to_string()))
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any node that can be a child of a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Single term or phrase.
    Term(TermNode),
    /// Value or date range.
    Range(RangeNode),
    /// Nested group of arbitrary clauses.
    Collection(CollectionNode),
    /// Nested group of terms.
    TermCollection(TermCollectionNode),
}

impl Node {
    /// Writes an indented, one-node-per-line description of this subtree.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        match self {
            Self::Term(t) => fmt_term(t, f, indent),
            Self::Range(r) => {
                write!(
                    f,
                    "{}Range({:?} {}, {} TO {})",
                    "  ".repeat(indent),
                    r.format(),
                    if r.is_inclusive() { "inclusive" } else { "exclusive" },
                    r.start(),
                    r.stop()
                )?;
                fmt_decoration(f, r.decoration())
            }
            Self::Collection(c) => c.fmt_tree(f, indent),
            Self::TermCollection(c) => {
                write!(f, "{}Terms({})", "  ".repeat(indent), c.operator())?;
                fmt_decoration(f, c.decoration())?;
                for term in c.terms() {
                    fmt_term(term, f, indent + 1)?;
                }
                Ok(())
            }
        }
    }
}

/// Writes a single term line.
fn fmt_term(term: &TermNode, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
    write!(
        f,
        "{}Term({:?}",
        "  ".repeat(indent),
        term.value().unwrap_or_default()
    )?;
    if let Some(fuzziness) = term.fuzziness() {
        write!(f, " ~{fuzziness}")?;
    }
    f.write_str(")")?;
    fmt_decoration(f, term.decoration())
}

/// Finishes a tree line with the non-default parts of a decoration.
fn fmt_decoration(f: &mut fmt::Formatter<'_>, deco: &Decoration) -> fmt::Result {
    if let Some(field) = deco.field() {
        write!(f, " field={field:?}")?;
    }
    if let Some(op) = deco.exclusion().operator() {
        write!(f, " exclusion={op}")?;
    }
    if deco.boost() > 0.0 {
        write!(f, " boost={}", deco.boost())?;
    }
    writeln!(f)
}

/// Display adapter producing the tree dump of a collection.
struct Explain<'a>(&'a CollectionNode);

impl fmt::Display for Explain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_tree(f, 0)
    }
}

impl QueryNode for Node {
    fn is_empty(&self) -> bool {
        match self {
            Self::Term(n) => n.is_empty(),
            Self::Range(n) => n.is_empty(),
            Self::Collection(n) => n.is_empty(),
            Self::TermCollection(n) => n.is_empty(),
        }
    }

    fn render_raw(&self) -> String {
        match self {
            Self::Term(n) => n.render_raw(),
            Self::Range(n) => n.render_raw(),
            Self::Collection(n) => n.render_raw(),
            Self::TermCollection(n) => n.render_raw(),
        }
    }

    fn decoration(&self) -> &Decoration {
        match self {
            Self::Term(n) => n.decoration(),
            Self::Range(n) => n.decoration(),
            Self::Collection(n) => n.decoration(),
            Self::TermCollection(n) => n.decoration(),
        }
    }

    fn decoration_mut(&mut self) -> &mut Decoration {
        match self {
            Self::Term(n) => n.decoration_mut(),
            Self::Range(n) => n.decoration_mut(),
            Self::Collection(n) => n.decoration_mut(),
            Self::TermCollection(n) => n.decoration_mut(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<TermNode> for Node {
    fn from(node: TermNode) -> Self {
        Self::Term(node)
    }
}

impl From<RangeNode> for Node {
    fn from(node: RangeNode) -> Self {
        Self::Range(node)
    }
}

impl From<CollectionNode> for Node {
    fn from(node: CollectionNode) -> Self {
        Self::Collection(node)
    }
}

impl From<TermCollectionNode> for Node {
    fn from(node: TermCollectionNode) -> Self {
        Self::TermCollection(node)
    }
}

/// Joins already-rendered clauses with `op`, skipping empty ones.
///
/// Returns the single clause unwrapped, or the parenthesized join of two or more.
pub fn join_rendered(op: Operator, rendered: impl IntoIterator<Item = String>) -> String {
    let parts: Vec<String> = rendered.into_iter().filter(|s| !s.is_empty()).collect();
    match parts.len() {
        0 => String::new(),
        1 => parts.into_iter().next().unwrap_or_default(),
        _ => format!("({})", parts.join(&format!(" {op} "))),
    }
}

/// An ordered group of clauses joined by a boolean operator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionNode {
    /// Children in insertion order.
    children: Vec<Node>,
    /// Join operator.
    operator: Operator,
    /// Field, exclusion and boost.
    decoration: Decoration,
}

impl CollectionNode {
    /// Creates an empty `AND` collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty collection with the given operator.
    pub fn with_operator(operator: Operator) -> Self {
        Self {
            operator,
            ..Self::default()
        }
    }

    /// Appends a child.
    pub fn add(&mut self, node: impl Into<Node>) -> &mut Self {
        self.children.push(node.into());
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

    /// Returns the children in insertion order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Returns the number of children, including empty ones.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns an indented dump of the node tree, one node per line.
    pub fn explain(&self) -> String {
        Explain(self).to_string()
    }

    /// Writes this collection and its children as tree lines.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        write!(f, "{}Collection({})", "  ".repeat(indent), self.operator)?;
        fmt_decoration(f, &self.decoration)?;
        for child in &self.children {
            child.fmt_tree(f, indent + 1)?;
        }
        Ok(())
    }

    /// Adds a nested term collection and returns it.
    pub fn create_term_collection(&mut self, operator: Operator) -> &mut TermCollectionNode {
        match self.push(TermCollectionNode::with_operator(operator)) {
            Node::TermCollection(node) => node,
            _ => unreachable!("just pushed a term collection"),
        }
    }

    /// Adds a nested collection and returns it.
    pub fn create_collection(&mut self, operator: Operator) -> &mut Self {
        match self.push(Self::with_operator(operator)) {
            Node::Collection(node) => node,
            _ => unreachable!("just pushed a collection"),
        }
    }

    /// Adds an empty term and returns it.
    pub fn create_term(&mut self) -> &mut TermNode {
        match self.push(TermNode::new()) {
            Node::Term(node) => node,
            _ => unreachable!("just pushed a term"),
        }
    }

    /// Adds an unbounded value range and returns it.
    pub fn create_range(&mut self) -> &mut RangeNode {
        self.push_range(RangeNode::new())
    }

    /// Adds an unbounded date range scoped to `field` and returns it.
    pub fn create_date_range(&mut self, field: Option<&str>) -> &mut RangeNode {
        let range = self.push_range(RangeNode::date());
        range.set_field(field.unwrap_or_default());
        range
    }

    /// Appends a range and returns it.
    fn push_range(&mut self, range: RangeNode) -> &mut RangeNode {
        match self.push(range) {
            Node::Range(node) => node,
            _ => unreachable!("just pushed a range"),
        }
    }

    /// Appends a child and returns a reference to it.
    fn push(&mut self, node: impl Into<Node>) -> &mut Node {
        let index = self.children.len();
        self.children.push(node.into());
        &mut self.children[index]
    }
}

impl QueryNode for CollectionNode {
    fn is_empty(&self) -> bool {
        self.children.iter().all(|child| child.render().is_empty())
    }

    fn render_raw(&self) -> String {
        join_rendered(self.operator, self.children.iter().map(QueryNode::render))
    }

    fn decoration(&self) -> &Decoration {
        &self.decoration
    }

    fn decoration_mut(&mut self) -> &mut Decoration {
        &mut self.decoration
    }
}

impl fmt::Display for CollectionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
