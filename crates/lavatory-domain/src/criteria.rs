//! Search criteria - the AQL-style predicate language sent to the search API
//!
//! A [`Criteria`] is an AND of [`Term`]s. [`build_criteria`] produces the
//! base every retention query starts from; strategies append their own
//! terms on top of it.

use crate::item::ItemType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Path pattern excluded from every query (package index metadata)
pub const IGNORED_PATH_PATTERN: &str = "*/repodata";

/// Timestamp format understood by the search API
pub const AQL_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Format a timestamp for a date comparison term
pub fn aql_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(AQL_DATE_FORMAT).to_string()
}

/// Comparison operator of a term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Equality
    Eq,
    /// Strictly less than
    Lt,
    /// Wildcard match (`*` and `?`)
    Match,
    /// Negated wildcard match
    NMatch,
}

impl Operator {
    /// Operator keyword on the wire (`$eq`, `$lt`, ...)
    pub fn keyword(&self) -> &'static str {
        match self {
            Operator::Eq => "$eq",
            Operator::Lt => "$lt",
            Operator::Match => "$match",
            Operator::NMatch => "$nmatch",
        }
    }
}

/// Right-hand side of a term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TermValue {
    /// Numeric value (depth)
    Number(u64),
    /// Text value (names, paths, timestamps, properties)
    Text(String),
}

impl fmt::Display for TermValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermValue::Number(n) => write!(f, "{}", n),
            TermValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for TermValue {
    fn from(value: &str) -> Self {
        TermValue::Text(value.to_string())
    }
}

impl From<String> for TermValue {
    fn from(value: String) -> Self {
        TermValue::Text(value)
    }
}

impl From<u32> for TermValue {
    fn from(value: u32) -> Self {
        TermValue::Number(u64::from(value))
    }
}

impl From<u64> for TermValue {
    fn from(value: u64) -> Self {
        TermValue::Number(value)
    }
}

/// Single `field operator value` predicate
///
/// Property fields are written with a leading `@` (`@deployed`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Field name (`repo`, `type`, `path`, `name`, `depth`, `created`, `@property`)
    pub field: String,
    /// Comparison operator
    pub operator: Operator,
    /// Compared value
    pub value: TermValue,
}

impl Term {
    /// Create a term
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<TermValue>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// `field == value`
    pub fn equals(field: impl Into<String>, value: impl Into<TermValue>) -> Self {
        Self::new(field, Operator::Eq, value)
    }

    /// `field < value`
    pub fn less_than(field: impl Into<String>, value: impl Into<TermValue>) -> Self {
        Self::new(field, Operator::Lt, value)
    }

    /// `field` matches the wildcard pattern
    pub fn matches(field: impl Into<String>, pattern: impl Into<TermValue>) -> Self {
        Self::new(field, Operator::Match, pattern)
    }

    /// `field` does not match the wildcard pattern
    pub fn not_matches(field: impl Into<String>, pattern: impl Into<TermValue>) -> Self {
        Self::new(field, Operator::NMatch, pattern)
    }

    /// `created < timestamp`
    pub fn created_before(timestamp: &DateTime<Utc>) -> Self {
        Self::less_than("created", aql_timestamp(timestamp))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator.keyword(), self.value)
    }
}

/// AND-combined set of terms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    terms: Vec<Term>,
}

impl Criteria {
    /// Create empty criteria
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a term
    pub fn push(&mut self, term: Term) {
        self.terms.push(term);
    }

    /// Append a term, builder style
    pub fn and(mut self, term: Term) -> Self {
        self.push(term);
        self
    }

    /// Terms in the order they were added
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// First term on `field`, if any
    pub fn term(&self, field: &str) -> Option<&Term> {
        self.terms.iter().find(|term| term.field == field)
    }

    /// Number of terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether there are no terms
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.terms.iter().map(ToString::to_string).collect();
        f.write_str(&rendered.join(" AND "))
    }
}

/// Sort order applied by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sort {
    /// Ascending on the listed fields
    Asc(Vec<String>),
    /// Descending on the listed fields
    Desc(Vec<String>),
}

impl Sort {
    /// Descending creation time
    pub fn newest_first() -> Self {
        Sort::Desc(vec!["created".to_string()])
    }

    /// Fields sorted on
    pub fn fields(&self) -> &[String] {
        match self {
            Sort::Asc(fields) | Sort::Desc(fields) => fields,
        }
    }

    /// Whether the order is descending
    pub fn is_descending(&self) -> bool {
        matches!(self, Sort::Desc(_))
    }
}

/// Sort, offset and limit applied to one search
///
/// No pagination happens on top of this: each call returns at most the
/// server's default window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchWindow {
    /// Sort order
    pub sort: Option<Sort>,
    /// Number of leading results to skip
    pub offset: Option<usize>,
    /// Maximum number of results
    pub limit: Option<usize>,
}

impl SearchWindow {
    /// No sort, offset or limit
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Set the sort order
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Set the offset
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the limit
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Base criteria of every retention query
///
/// Terms are appended in a fixed order: the ignored path pattern, the
/// repository, the item type, the exact depth (only when `depth` is set),
/// then `extra_terms`.
pub fn build_criteria(
    repo: &str,
    item_type: ItemType,
    depth: Option<u32>,
    extra_terms: impl IntoIterator<Item = Term>,
) -> Criteria {
    let mut criteria = Criteria::new()
        .and(Term::not_matches("path", IGNORED_PATH_PATTERN))
        .and(Term::equals("repo", repo))
        .and(Term::equals("type", item_type.as_str()));

    if let Some(depth) = depth {
        criteria.push(Term::equals("depth", depth));
    }

    for term in extra_terms {
        criteria.push(term);
    }

    criteria
}
