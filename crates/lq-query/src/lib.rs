//! Programmatic construction of Lucene query strings.
//!
//! Queries are assembled as a tree of nodes and rendered to a properly escaped query
//! string:
//!
//! - **Terms**: `rust`, `"hello world"`, fuzzy `colour~1`
//! - **Ranges**: `[10 TO 20]`, `{a TO *}`, date ranges normalized to ISO-8601
//! - **Groups**: `(a OR b OR c)`, nested to any depth
//! - **Decoration**: field scope `title:`, require `+`, prohibit `-`, boost `^2.5`
//!
//! Every token is escaped before it is concatenated, so caller-supplied text cannot change
//! the structure of the query.
//!
//! # Example
//!
//! ```
//! use lq_query::{Query, QueryNode};
//!
//! let mut query = Query::new();
//! query
//!     .match_term(Some("title"), "hello world", Some(2.0), None)
//!     .unwrap()
//!     .prohibit_term(None, "spam");
//!
//! assert_eq!(query.render(), "(title:\"hello world\"^2 AND -spam)");
//! ```

#![warn(missing_docs)]

mod builder;
mod collection;
pub mod date;
mod error;
mod escape;
mod node;
mod range;
mod term;
mod term_collection;

pub use builder::Query;
pub use collection::{CollectionNode, Node, Operator};
pub use error::QueryError;
pub use escape::{RESERVED_CHARS, escape, escape_token, is_reserved};
pub use node::{
    Decoration, Exclusion, OP_BOOST, OP_FUZZY, OP_PROHIBIT, OP_REQUIRE, QueryNode, WILDCARD_ALL,
};
pub use range::{BoundFormat, RangeBound, RangeNode};
pub use term::TermNode;
pub use term_collection::{TermCollectionNode, TermLike};
