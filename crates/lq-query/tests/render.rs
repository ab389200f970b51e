//! Integration tests for lq-query.
//!
//! Builds queries through the public API only and checks the rendered strings.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{sync::Arc, thread, time::Duration};

use chrono::{TimeZone, Utc};
use lq_query::{
    CollectionNode, Exclusion, Operator, Query, QueryError, QueryNode, RESERVED_CHARS, RangeBound,
    TermCollectionNode, TermNode, escape,
};

/// Tokens free of reserved characters and spaces.
const PLAIN_TOKENS: &[&str] = &["rust", "foo_bar", "a.b", "123", "naïve", "x/y", "@home"];

#[test]
fn plain_tokens_pass_through() {
    for token in PLAIN_TOKENS {
        assert_eq!(escape(token, false), *token);
    }
}

#[test]
fn special_tokens_are_quoted() {
    let mut tokens: Vec<String> = RESERVED_CHARS.iter().map(|c| format!("a{c}b")).collect();
    tokens.push("two words".into());
    tokens.push(" leading".into());

    for token in &tokens {
        let escaped = escape(token, false);
        assert!(
            escaped.starts_with('"') && escaped.ends_with('"'),
            "{token:?} -> {escaped:?}"
        );
    }
}

#[test]
fn forced_escape_always_quotes() {
    for token in PLAIN_TOKENS.iter().copied().chain(["", "a b", "x:y"]) {
        let escaped = escape(token, true);
        assert!(escaped.starts_with('"') && escaped.ends_with('"'));
        assert!(escaped.len() >= 2);
    }
}

#[test]
fn injection_is_neutralized() {
    let mut query = Query::new();
    query.require_term(Some("user"), "alice) OR (admin:true");
    assert_eq!(
        query.render(),
        "+user:\"alice\\) OR \\(admin\\:true\""
    );
}

#[test]
fn facade_shortcuts() {
    let mut query = Query::new();
    query.match_term(Some("title"), "hello world", None, None).unwrap();
    assert_eq!(query.render(), "title:\"hello world\"");

    let mut query = Query::new();
    query.require_term(Some("status"), "open");
    assert_eq!(query.render(), "+status:open");

    let mut query = Query::new();
    query.prohibit_term(None, "spam");
    assert_eq!(query.render(), "-spam");

    let mut query = Query::new();
    query.require_range(Some("price"), 10, 20, true);
    assert_eq!(query.render(), "+price:[10 TO 20]");

    let mut query = Query::new();
    query.require_range(Some("price"), 10, 20, false);
    assert_eq!(query.render(), "+price:{10 TO 20}");

    let mut query = Query::new();
    query
        .match_term_collection(Some("tags"), ["a", "b", "c"], None, Operator::Or)
        .unwrap();
    assert_eq!(query.render(), "tags:(a OR b OR c)");
}

#[test]
fn exclusion_suppresses_boost() {
    let mut node = TermNode::term("rust");
    node.set_exclusion(Exclusion::Require).set_boost(2.0).unwrap();
    let rendered = node.render();
    assert!(rendered.starts_with('+'));
    assert!(!rendered.contains('^'));
}

#[test]
fn invalid_arguments() {
    let mut node = TermNode::term("rust");
    assert_eq!(node.set_boost(-1.0).unwrap_err(), QueryError::InvalidBoost(-1.0));
    assert!(node.set_boost(f64::INFINITY).is_err());
    assert!(node.set_fuzziness(Some(f64::INFINITY)).is_err());
    assert_eq!(node.render(), "rust");

    let mut query = Query::new();
    assert!(query.match_term(None, "x", Some(f64::INFINITY), None).is_err());
    assert!(query.match_term(None, "x", None, Some(f64::NEG_INFINITY)).is_err());
    assert!(query.is_empty());

    assert!("XOR".parse::<Operator>().is_err());
    assert!("maybe".parse::<Exclusion>().is_err());
}

#[test]
fn composite_rendering_rules() {
    let empty = CollectionNode::new();
    assert!(empty.is_empty());
    assert_eq!(empty.render(), "");

    let mut single = CollectionNode::with_operator(Operator::Or);
    let mut child = TermNode::term("solo");
    child.set_boost(1.5).unwrap();
    single.add(child.clone());
    assert_eq!(single.render(), child.render());

    let mut many = CollectionNode::with_operator(Operator::Or);
    many.add(TermNode::term("one"))
        .add(TermNode::term("two"))
        .add(TermNode::term("three"));
    assert_eq!(many.render(), "(one OR two OR three)");
}

#[test]
fn complex_query() {
    let mut query = Query::new();
    query
        .require_term(Some("type"), "article")
        .require_date_range(
            Some("published"),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            RangeBound::Unbounded,
            true,
        )
        .prohibit_term_collection(Some("tags"), ["draft", "private"], Operator::Or);

    let any_of = query.create_collection(Operator::Or);
    any_of.create_term().set_value("rust").set_field("title").set_boost(3.0).unwrap();
    any_of
        .create_term()
        .set_value("rust")
        .set_fuzziness(Some(1.0))
        .unwrap();

    let mut authors = TermCollectionNode::with_operator(Operator::Or);
    authors.add_all(["Jane Doe", "J. Smith"]).set_field("author");
    query.add(authors);

    assert_eq!(
        query.render(),
        "(+type:article \
         AND +published:[2024-01-01T00:00:00+0000 TO *] \
         AND -tags:(draft OR private) \
         AND (title:rust^3 OR rust~1) \
         AND author:(\"Jane Doe\" OR \"J. Smith\"))"
    );
}

#[test]
fn rendering_is_idempotent() {
    let mut query = Query::new();
    query
        .require_term(Some("a"), "b")
        .match_range(Some("n"), 1.5, 2.5, false);
    let first = query.render();
    assert_eq!(first, query.render());
    assert_eq!(first, query.to_string());
}

#[test]
fn relative_date_bounds_render_stably() {
    let mut query = Query::new();
    query.require_date_range(Some("ts"), "now", RangeBound::Unbounded, true);

    let first = query.render();
    assert!(first.starts_with("+ts:[") && first.ends_with(" TO *]"), "{first}");
    thread::sleep(Duration::from_millis(1100));
    assert_eq!(query.render(), first);
}

#[test]
fn blank_range_bound_is_open() {
    let mut query = Query::new();
    query.match_range(Some("n"), "", 20, true);
    assert_eq!(query.render(), "n:[* TO 20]");
}

#[test]
fn finished_tree_renders_across_threads() {
    let mut query = Query::new();
    query
        .require_term(Some("status"), "open")
        .prohibit_term(None, "spam");
    let query = Arc::new(query);
    let expected = query.render();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let query = Arc::clone(&query);
            thread::spawn(move || query.render())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
