//! Range clauses over arbitrary values or dates.

use std::fmt;

use chrono::{DateTime, FixedOffset, TimeZone};
use tracing::debug;

use crate::{
    date::{format_date, from_epoch, parse_date, resolve_relative},
    node::{Decoration, QueryNode, WILDCARD_ALL},
};

/// One end of a range.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RangeBound {
    /// Open end, rendered as `*`.
    #[default]
    Unbounded,
    /// Text, rendered as-is (or parsed as a date in date ranges).
    Text(String),
    /// Integer (epoch seconds in date ranges).
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Calendar timestamp.
    Timestamp(DateTime<FixedOffset>),
}

impl RangeBound {
    /// Returns true for an open end.
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Self::Unbounded)
    }
}

impl fmt::Display for RangeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => f.write_str(WILDCARD_ALL),
            Self::Text(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Timestamp(dt) => f.write_str(&format_date(dt)),
        }
    }
}

impl From<&str> for RangeBound {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RangeBound {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for RangeBound {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for RangeBound {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u32> for RangeBound {
    fn from(value: u32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for RangeBound {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for RangeBound {
    fn from(value: DateTime<Tz>) -> Self {
        Self::Timestamp(value.fixed_offset())
    }
}

impl<T: Into<Self>> From<Option<T>> for RangeBound {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unbounded, Into::into)
    }
}

/// How range bounds are turned into text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoundFormat {
    /// Plain string conversion.
    #[default]
    Plain,
    /// Normalize to an ISO-8601 timestamp where possible.
    Date,
}

impl BoundFormat {
    /// Renders a single bound.
    pub fn render(self, bound: &RangeBound) -> String {
        match (self, bound) {
            (Self::Date, RangeBound::Text(s)) => match parse_date(s) {
                Some(dt) => format_date(&dt),
                None => {
                    debug!(value = %s, "unparseable date bound, rendering as text");
                    s.clone()
                }
            },
            (Self::Date, RangeBound::Integer(secs)) => match from_epoch(*secs) {
                Some(dt) => format_date(&dt),
                None => {
                    debug!(value = *secs, "epoch out of range, rendering as integer");
                    secs.to_string()
                }
            },
            _ => bound.to_string(),
        }
    }
}

/// A `[start TO stop]` or `{start TO stop}` clause.
///
/// Inclusivity applies to both ends. Bounds are not checked for ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeNode {
    /// Lower bound.
    start: RangeBound,
    /// Upper bound.
    stop: RangeBound,
    /// Square brackets when true, curly braces otherwise.
    inclusive: bool,
    /// Bound rendering strategy.
    format: BoundFormat,
    /// Field, exclusion and boost.
    decoration: Decoration,
}

impl Default for RangeNode {
    fn default() -> Self {
        Self {
            start: RangeBound::Unbounded,
            stop: RangeBound::Unbounded,
            inclusive: true,
            format: BoundFormat::Plain,
            decoration: Decoration::default(),
        }
    }
}

impl RangeNode {
    /// Creates an unbounded, inclusive range over plain values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unbounded, inclusive range over dates.
    pub fn date() -> Self {
        Self {
            format: BoundFormat::Date,
            ..Self::default()
        }
    }

    /// Sets both bounds.
    ///
    /// Blank text is an open end. In date ranges, relative words such as `now` are pinned
    /// to a timestamp here, so later renders do not depend on the clock.
    pub fn set_range(
        &mut self,
        start: impl Into<RangeBound>,
        stop: impl Into<RangeBound>,
    ) -> &mut Self {
        self.start = self.normalize(start.into());
        self.stop = self.normalize(stop.into());
        self
    }

    /// Converts a bound into its stored form.
    fn normalize(&self, bound: RangeBound) -> RangeBound {
        let text = match bound {
            RangeBound::Text(text) => text,
            other => return other,
        };
        if text.trim().is_empty() {
            return RangeBound::Unbounded;
        }
        if self.format == BoundFormat::Date
            && let Some(resolved) = resolve_relative(&text)
        {
            debug!(value = %text, "pinned relative date bound");
            return RangeBound::Timestamp(resolved);
        }
        RangeBound::Text(text)
    }

    /// Sets whether both ends are inclusive.
    pub fn set_inclusive(&mut self, inclusive: bool) -> &mut Self {
        self.inclusive = inclusive;
        self
    }

    /// Returns the lower bound.
    pub fn start(&self) -> &RangeBound {
        &self.start
    }

    /// Returns the upper bound.
    pub fn stop(&self) -> &RangeBound {
        &self.stop
    }

    /// Returns true if both ends are inclusive.
    pub fn is_inclusive(&self) -> bool {
        self.inclusive
    }

    /// Returns the bound rendering strategy.
    pub fn format(&self) -> BoundFormat {
        self.format
    }

    /// Renders one bound with this range's strategy.
    pub fn render_element(&self, bound: &RangeBound) -> String {
        self.format.render(bound)
    }
}

impl QueryNode for RangeNode {
    fn is_empty(&self) -> bool {
        self.start.is_unbounded() && self.stop.is_unbounded()
    }

    fn render_raw(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let (open, close) = if self.inclusive { ('[', ']') } else { ('{', '}') };
        format!(
            "{open}{} TO {}{close}",
            self.render_element(&self.start),
            self.render_element(&self.stop)
        )
    }

    fn decoration(&self) -> &Decoration {
        &self.decoration
    }

    fn decoration_mut(&mut self) -> &mut Decoration {
        &mut self.decoration
    }
}
