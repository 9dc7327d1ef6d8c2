//! GraphQL payload for the series search

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::constants::SEARCH_PAGE_SIZE;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchVariables {
    pub start_time: String,
    pub end_time: String,
    pub after_cursor: Option<String>,
    pub title_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest {
    pub query: String,
    pub variables: SearchVariables,
}

/// Build the single-page search for one title scheduled within `[start, end]`
pub fn search_request(title_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> GraphQlRequest {
    GraphQlRequest {
        query: search_query(),
        variables: SearchVariables {
            start_time: format_time(start),
            end_time: format_time(end),
            after_cursor: None,
            title_ids: vec![title_id.to_string()],
        },
    }
}

pub fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn search_query() -> String {
    format!(
        r#"query GetAllSeries($startTime: String, $endTime: String, $afterCursor: Cursor, $titleIds: [ID!]) {{
  allSeries(
    first: {page_size}
    filter: {{ startTimeScheduled: {{ gte: $startTime, lte: $endTime }}, titleIds: {{ in: $titleIds }} }}
    orderBy: StartTimeScheduled
    after: $afterCursor
  ) {{
    totalCount
    pageInfo {{ hasPreviousPage hasNextPage startCursor endCursor }}
    edges {{
      cursor
      node {{
        id
        tournament {{ nameShortened name id }}
        startTimeScheduled
        format {{ nameShortened }}
        teams {{ baseInfo {{ name id }} }}
      }}
    }}
  }}
}}"#,
        page_size = SEARCH_PAGE_SIZE
    )
}
