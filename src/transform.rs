//! Result transformer - turns a raw series search result into table rows
//!
//! Policy per field class:
//! - container levels (`data`, `allSeries`, `edges`) fail the whole fetch,
//!   each with its own error;
//! - anything wrong inside a single edge (fewer than two teams, a missing
//!   or mistyped field) skips that edge only.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::models::SeriesRow;

/// Structural failures of a search result
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("No data found{}", reason_suffix(.0))]
    MissingData(Option<String>),
    #[error("No series found")]
    MissingSeries,
    #[error("No edges found")]
    MissingEdges,
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason.as_ref().map(|r| format!(": {}", r)).unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default, deserialize_with = "lenient_object")]
    data: Option<SeriesData>,
    #[serde(default, deserialize_with = "lenient")]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct SeriesData {
    #[serde(rename = "allSeries", default, deserialize_with = "lenient_object")]
    all_series: Option<SeriesConnection>,
}

#[derive(Debug, Deserialize)]
struct SeriesConnection {
    #[serde(default, deserialize_with = "lenient")]
    edges: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct SeriesEdge {
    node: SeriesNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeriesNode {
    id: String,
    start_time_scheduled: String,
    tournament: Tournament,
    teams: Vec<Team>,
}

#[derive(Debug, Deserialize)]
struct Tournament {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Team {
    base_info: TeamInfo,
}

#[derive(Debug, Deserialize)]
struct TeamInfo {
    name: String,
}

/// Container levels treat a value of the wrong shape as absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like `lenient`, but only a JSON object counts (derived structs also accept arrays)
fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// Convert a raw search result into rows sorted by start time.
///
/// Rows whose start time is not RFC 3339 sort first, keeping their
/// relative order.
pub fn series_rows(raw: &Value) -> Result<Vec<SeriesRow>, TransformError> {
    if !raw.is_object() {
        return Err(TransformError::MissingData(None));
    }
    let envelope = Envelope::deserialize(raw).map_err(|_| TransformError::MissingData(None))?;

    let data = envelope.data.ok_or_else(|| {
        let reason = envelope
            .errors
            .and_then(|errors| errors.into_iter().next())
            .map(|e| e.message);
        TransformError::MissingData(reason)
    })?;
    let series = data.all_series.ok_or(TransformError::MissingSeries)?;
    let edges = series.edges.ok_or(TransformError::MissingEdges)?;

    let total = edges.len();
    let mut rows: Vec<SeriesRow> = edges.into_iter().filter_map(edge_to_row).collect();
    if rows.len() < total {
        tracing::warn!(skipped = total - rows.len(), total, "Skipped incomplete series edges");
    }

    rows.sort_by_key(|row| parse_start_time(&row.start_time));
    Ok(rows)
}

fn edge_to_row(edge: Value) -> Option<SeriesRow> {
    if !edge.get("node").map(Value::is_object).unwrap_or(false) {
        tracing::warn!("Series edge without a node object");
        return None;
    }
    let edge: SeriesEdge = match serde_json::from_value(edge) {
        Ok(edge) => edge,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed series edge");
            return None;
        }
    };
    let node = edge.node;

    let mut teams = node.teams.into_iter();
    let (team_one, team_two) = match (teams.next(), teams.next()) {
        (Some(one), Some(two)) => (one.base_info.name, two.base_info.name),
        _ => return None,
    };

    Some(SeriesRow {
        start_time: node.start_time_scheduled,
        series_id: node.id,
        tournament_name: node.tournament.name,
        team_one_name: team_one,
        team_two_name: team_two,
    })
}

/// `None` sorts before every parsed time
fn parse_start_time(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
