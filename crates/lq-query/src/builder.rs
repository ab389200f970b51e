//! The query builder facade.
//!
//! [`Query`] is a root collection with shortcuts that create, configure and attach the
//! right node type in one call. The `create_*` methods hand back the new child for further
//! configuration; the `match_*`, `require_*` and `prohibit_*` shortcuts return the query
//! itself so calls can be chained.
//!
//! ```
//! use lq_query::{Operator, Query, QueryNode};
//!
//! let mut query = Query::new();
//! query
//!     .require_term(Some("status"), "open")
//!     .prohibit_term(None, "spam")
//!     .require_range(Some("price"), 10, 20, true);
//! query
//!     .match_term_collection(Some("tags"), ["rust", "search"], None, Operator::Or)
//!     .unwrap();
//!
//! assert_eq!(
//!     query.render(),
//!     "(+status:open AND -spam AND +price:[10 TO 20] AND tags:(rust OR search))"
//! );
//! ```

use std::fmt;

use crate::{
    QueryError,
    collection::{CollectionNode, Node, Operator},
    node::{Decoration, Exclusion, QueryNode},
    range::{RangeBound, RangeNode},
    term::TermNode,
    term_collection::{TermCollectionNode, TermLike},
};

/// A query under construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Top-level clauses.
    root: CollectionNode,
}

impl Query {
    /// Creates an empty query joining its clauses with `AND`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty query with the given top-level operator.
    pub fn with_operator(operator: Operator) -> Self {
        Self {
            root: CollectionNode::with_operator(operator),
        }
    }

    /// Returns the root collection.
    pub fn root(&self) -> &CollectionNode {
        &self.root
    }

    /// Appends an arbitrary clause.
    pub fn add(&mut self, node: impl Into<Node>) -> &mut Self {
        self.root.add(node);
        self
    }

    /// Sets the top-level operator.
    pub fn set_operator(&mut self, operator: Operator) -> &mut Self {
        self.root.set_operator(operator);
        self
    }

    /// Adds a term collection and returns it.
    pub fn create_term_collection(&mut self, operator: Operator) -> &mut TermCollectionNode {
        self.root.create_term_collection(operator)
    }

    /// Adds a nested collection and returns it.
    pub fn create_collection(&mut self, operator: Operator) -> &mut CollectionNode {
        self.root.create_collection(operator)
    }

    /// Adds an empty term and returns it.
    pub fn create_term(&mut self) -> &mut TermNode {
        self.root.create_term()
    }

    /// Adds an unbounded value range and returns it.
    pub fn create_range(&mut self) -> &mut RangeNode {
        self.root.create_range()
    }

    /// Adds an unbounded date range scoped to `field` and returns it.
    pub fn create_date_range(&mut self, field: Option<&str>) -> &mut RangeNode {
        self.root.create_date_range(field)
    }

    /// Matches a single term, optionally boosted and fuzzy.
    ///
    /// Fails if `boost` or `fuzziness` is negative; nothing is added in that case.
    pub fn match_term(
        &mut self,
        field: Option<&str>,
        term: impl Into<TermLike>,
        boost: Option<f64>,
        fuzziness: Option<f64>,
    ) -> Result<&mut Self, QueryError> {
        let mut node = term.into().into_term();
        node.set_fuzziness(fuzziness)?
            .set_boost(boost.unwrap_or_default())?
            .set_field(field.unwrap_or_default());
        self.root.add(node);
        Ok(self)
    }

    /// Requires a single term.
    pub fn require_term(&mut self, field: Option<&str>, term: impl Into<TermLike>) -> &mut Self {
        self.add_term(field, term, Exclusion::Require)
    }

    /// Prohibits a single term.
    pub fn prohibit_term(&mut self, field: Option<&str>, term: impl Into<TermLike>) -> &mut Self {
        self.add_term(field, term, Exclusion::Prohibit)
    }

    /// Matches a value range without requiring it.
    pub fn match_range(
        &mut self,
        field: Option<&str>,
        start: impl Into<RangeBound>,
        stop: impl Into<RangeBound>,
        inclusive: bool,
    ) -> &mut Self {
        self.add_range(
            RangeNode::new(),
            field,
            (start.into(), stop.into()),
            inclusive,
            Exclusion::None,
        )
    }

    /// Requires a value range.
    pub fn require_range(
        &mut self,
        field: Option<&str>,
        start: impl Into<RangeBound>,
        stop: impl Into<RangeBound>,
        inclusive: bool,
    ) -> &mut Self {
        self.add_range(
            RangeNode::new(),
            field,
            (start.into(), stop.into()),
            inclusive,
            Exclusion::Require,
        )
    }

    /// Prohibits a value range.
    pub fn prohibit_range(
        &mut self,
        field: Option<&str>,
        start: impl Into<RangeBound>,
        stop: impl Into<RangeBound>,
        inclusive: bool,
    ) -> &mut Self {
        self.add_range(
            RangeNode::new(),
            field,
            (start.into(), stop.into()),
            inclusive,
            Exclusion::Prohibit,
        )
    }

    /// Requires a date range.
    ///
    /// Bounds may be timestamps, epoch seconds or date strings; anything that does not
    /// parse as a date is rendered as given.
    pub fn require_date_range(
        &mut self,
        field: Option<&str>,
        start: impl Into<RangeBound>,
        stop: impl Into<RangeBound>,
        inclusive: bool,
    ) -> &mut Self {
        self.add_range(
            RangeNode::date(),
            field,
            (start.into(), stop.into()),
            inclusive,
            Exclusion::Require,
        )
    }

    /// Matches a group of terms, optionally boosted.
    ///
    /// Fails if `boost` is negative; nothing is added in that case.
    pub fn match_term_collection<I>(
        &mut self,
        field: Option<&str>,
        terms: I,
        boost: Option<f64>,
        operator: Operator,
    ) -> Result<&mut Self, QueryError>
    where
        I: IntoIterator,
        I::Item: Into<TermLike>,
    {
        let mut node = TermCollectionNode::with_operator(operator);
        node.add_all(terms)
            .set_field(field.unwrap_or_default())
            .set_boost(boost.unwrap_or_default())?;
        self.root.add(node);
        Ok(self)
    }

    /// Requires a group of terms.
    pub fn require_term_collection<I>(
        &mut self,
        field: Option<&str>,
        terms: I,
        operator: Operator,
    ) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<TermLike>,
    {
        self.add_term_collection(field, terms, operator, Exclusion::Require)
    }

    /// Prohibits a group of terms.
    pub fn prohibit_term_collection<I>(
        &mut self,
        field: Option<&str>,
        terms: I,
        operator: Operator,
    ) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<TermLike>,
    {
        self.add_term_collection(field, terms, operator, Exclusion::Prohibit)
    }

    /// Returns an indented dump of the node tree, one node per line.
    pub fn explain(&self) -> String {
        self.root.explain()
    }

    /// Adds a term with the given exclusion.
    fn add_term(
        &mut self,
        field: Option<&str>,
        term: impl Into<TermLike>,
        exclusion: Exclusion,
    ) -> &mut Self {
        let mut node = term.into().into_term();
        node.set_exclusion(exclusion)
            .set_field(field.unwrap_or_default());
        self.root.add(node);
        self
    }

    /// Configures `range` and adds it.
    fn add_range(
        &mut self,
        mut range: RangeNode,
        field: Option<&str>,
        (start, stop): (RangeBound, RangeBound),
        inclusive: bool,
        exclusion: Exclusion,
    ) -> &mut Self {
        range
            .set_inclusive(inclusive)
            .set_range(start, stop)
            .set_field(field.unwrap_or_default())
            .set_exclusion(exclusion);
        self.root.add(range);
        self
    }

    /// Adds a term collection with the given exclusion.
    fn add_term_collection<I>(
        &mut self,
        field: Option<&str>,
        terms: I,
        operator: Operator,
        exclusion: Exclusion,
    ) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<TermLike>,
    {
        let mut node = TermCollectionNode::with_operator(operator);
        node.add_all(terms)
            .set_field(field.unwrap_or_default())
            .set_exclusion(exclusion);
        self.root.add(node);
        self
    }
}

impl QueryNode for Query {
    fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    fn render_raw(&self) -> String {
        self.root.render_raw()
    }

    fn decoration(&self) -> &Decoration {
        self.root.decoration()
    }

    fn decoration_mut(&mut self) -> &mut Decoration {
        self.root.decoration_mut()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<Query> for Node {
    fn from(query: Query) -> Self {
        Self::Collection(query.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_term_phrase() {
        let mut query = Query::new();
        query
            .match_term(Some("title"), "hello world", None, None)
            .unwrap();
        assert_eq!(query.render(), "title:\"hello world\"");
    }

    #[test]
    fn match_term_boost_and_fuzziness() {
        let mut query = Query::new();
        query
            .match_term(None, "colour", Some(1.5), Some(1.0))
            .unwrap();
        assert_eq!(query.render(), "colour~1^1.5");
    }

    #[test]
    fn match_term_rejects_negative_boost() {
        let mut query = Query::new();
        let err = query.match_term(None, "x", Some(-1.0), None).unwrap_err();
        assert_eq!(err, QueryError::InvalidBoost(-1.0));
        assert_eq!(query.root().len(), 0);
    }

    #[test]
    fn match_term_accepts_prepared_node() {
        let mut node = TermNode::term("rust");
        node.set_fuzziness(Some(2.0)).unwrap();
        let mut query = Query::new();
        query.match_term(Some("lang"), node, None, None).unwrap();
        // Fuzziness argument overrides the node's own setting.
        assert_eq!(query.render(), "lang:rust");
    }

    #[test]
    fn require_and_prohibit_terms() {
        let mut query = Query::new();
        query.require_term(Some("status"), "open");
        assert_eq!(query.render(), "+status:open");

        let mut query = Query::new();
        query.prohibit_term(None, "spam");
        assert_eq!(query.render(), "-spam");

        let mut query = Query::new();
        query.prohibit_term(Some(""), "spam");
        assert_eq!(query.render(), "-spam");
    }

    #[test]
    fn require_range_inclusive_and_exclusive() {
        let mut query = Query::new();
        query.require_range(Some("price"), 10, 20, true);
        assert_eq!(query.render(), "+price:[10 TO 20]");

        let mut query = Query::new();
        query.require_range(Some("price"), 10, 20, false);
        assert_eq!(query.render(), "+price:{10 TO 20}");
    }

    #[test]
    fn match_and_prohibit_range() {
        let mut query = Query::with_operator(Operator::Or);
        query
            .match_range(Some("age"), 18, None::<i64>, true)
            .prohibit_range(Some("age"), 65, 70, false);
        assert_eq!(query.render(), "(age:[18 TO *] OR -age:{65 TO 70})");
    }

    #[test]
    fn require_date_range() {
        let mut query = Query::new();
        query.require_date_range(Some("created"), "2024-01-01", 0, true);
        assert_eq!(
            query.render(),
            "+created:[2024-01-01T00:00:00+0000 TO 1970-01-01T00:00:00+0000]"
        );
    }

    #[test]
    fn match_term_collection() {
        let mut query = Query::new();
        query
            .match_term_collection(Some("tags"), ["a", "b", "c"], None, Operator::Or)
            .unwrap();
        assert_eq!(query.render(), "tags:(a OR b OR c)");
    }

    #[test]
    fn match_term_collection_boosted() {
        let mut query = Query::new();
        query
            .match_term_collection(Some("tags"), ["a", "b"], Some(3.0), Operator::And)
            .unwrap();
        assert_eq!(query.render(), "tags:(a AND b)^3");
        assert!(
            query
                .match_term_collection(None, ["c"], Some(-0.5), Operator::Or)
                .is_err()
        );
    }

    #[test]
    fn require_and_prohibit_term_collections() {
        let mut query = Query::new();
        query
            .require_term_collection(Some("lang"), ["rust", "go"], Operator::Or)
            .prohibit_term_collection(Some("tags"), ["old"], Operator::Or);
        assert_eq!(query.render(), "(+lang:(rust OR go) AND -tags:old)");
    }

    #[test]
    fn create_family_returns_children() {
        let mut query = Query::new();
        query.create_term().set_value("a").set_boost(2.0).unwrap();
        query.create_range().set_range(1, 5).set_field("n");
        query.create_term_collection(Operator::Or).add_all(["x", "y"]);
        query.create_collection(Operator::And);
        assert_eq!(query.root().len(), 4);
        assert_eq!(query.render(), "(a^2 AND n:[1 TO 5] AND (x OR y))");
    }

    #[test]
    fn empty_query_renders_empty() {
        let mut query = Query::new();
        assert!(query.is_empty());
        query.create_term();
        query.create_collection(Operator::Or);
        assert!(query.is_empty());
        assert_eq!(query.to_string(), "");
    }

    #[test]
    fn queries_nest() {
        let mut inner = Query::with_operator(Operator::Or);
        inner.match_term(None, "a", None, None).unwrap();
        inner.match_term(None, "b", None, None).unwrap();
        inner.set_exclusion(Exclusion::Require);

        let mut outer = Query::new();
        outer.add(inner).require_term(Some("x"), "y");
        assert_eq!(outer.render(), "(+(a OR b) AND +x:y)");
    }

    #[test]
    fn explain_lists_every_node() {
        let mut query = Query::new();
        query
            .require_term(Some("status"), "open")
            .match_term_collection(Some("tags"), ["a", "b"], None, Operator::Or)
            .unwrap();
        let explained = query.explain();
        assert_eq!(
            explained,
            "Collection(AND)\n\
             \x20 Term(\"open\") field=\"status\" exclusion=+\n\
             \x20 Terms(OR) field=\"tags\"\n\
             \x20   Term(\"a\")\n\
             \x20   Term(\"b\")\n"
        );
    }
}
