//! AQL rendering and search result decoding.

use crate::error::ClientError;
use chrono::{DateTime, Utc};
use lavatory_domain::{ArtifactItem, Criteria, ItemType, SearchWindow, Sort, Term, TermValue};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::collections::HashMap;

/// Render a search as an AQL `items.find(...)` query
///
/// Offset and limit are left out when zero or unset.
pub fn render_query(criteria: &Criteria, window: &SearchWindow) -> String {
    let terms: Vec<Value> = criteria.terms().iter().map(render_term).collect();
    let mut query = format!("items.find({})", json!({ "$and": terms }));

    if let Some(sort) = &window.sort {
        let (direction, fields) = match sort {
            Sort::Asc(fields) => ("$asc", fields),
            Sort::Desc(fields) => ("$desc", fields),
        };
        let mut body = Map::new();
        body.insert(direction.to_string(), json!(fields));
        query.push_str(&format!(".sort({})", Value::Object(body)));
    }

    if let Some(offset) = window.offset.filter(|n| *n > 0) {
        query.push_str(&format!(".offset({})", offset));
    }

    if let Some(limit) = window.limit.filter(|n| *n > 0) {
        query.push_str(&format!(".limit({})", limit));
    }

    query
}

fn render_term(term: &Term) -> Value {
    let value = match &term.value {
        TermValue::Number(n) => json!(n),
        TermValue::Text(s) => json!(s),
    };
    let mut comparison = Map::new();
    comparison.insert(term.operator.keyword().to_string(), value);
    let mut object = Map::new();
    object.insert(term.field.clone(), Value::Object(comparison));
    Value::Object(object)
}

#[derive(Debug, Deserialize)]
struct AqlResponse {
    results: Vec<AqlItem>,
}

#[derive(Debug, Deserialize)]
struct AqlItem {
    repo: String,
    path: String,
    name: String,
    #[serde(rename = "type")]
    item_type: String,
    created: DateTime<Utc>,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    properties: Vec<AqlProperty>,
    #[serde(default)]
    stats: Option<Vec<Map<String, Value>>>,
}

#[derive(Debug, Deserialize)]
struct AqlProperty {
    key: String,
    #[serde(default)]
    value: Option<String>,
}

/// Decode the body of a `search/aql` response
pub fn parse_results(body: &str) -> Result<Vec<ArtifactItem>, ClientError> {
    let response: AqlResponse = serde_json::from_str(body)?;
    response.results.into_iter().map(aql_item_to_domain).collect()
}

fn aql_item_to_domain(item: AqlItem) -> Result<ArtifactItem, ClientError> {
    let item_type = ItemType::parse(&item.item_type)
        .ok_or_else(|| ClientError::InvalidResponse(format!("Unknown item type: {}", item.item_type)))?;

    let properties: HashMap<String, String> = item
        .properties
        .into_iter()
        .map(|p| (p.key, p.value.unwrap_or_default()))
        .collect();

    let stats = item.stats.and_then(|entries| entries.into_iter().next()).map(|entry| {
        entry
            .into_iter()
            .map(|(key, value)| (key, value_to_string(value)))
            .collect()
    });

    Ok(ArtifactItem {
        repo: item.repo,
        path: item.path,
        name: item.name,
        item_type,
        created: item.created,
        size: item.size,
        properties,
        stats,
    })
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
