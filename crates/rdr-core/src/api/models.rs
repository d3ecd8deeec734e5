use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Request bodies

#[derive(Debug, Serialize)]
pub struct CreateDataSourceRequest {
    #[serde(rename = "type")]
    pub data_source_type: String,
    pub name: String,
    pub options: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct CreateQueryRequest {
    pub data_source_id: u64,
    pub name: String,
    pub query: String,
    pub description: String,
    pub options: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct QueryResultsRequest {
    pub data_source_id: u64,
    pub query: String,
    pub max_age: u64,
    pub parameters: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_id: Option<u64>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct CreateVisualizationRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub visualization_type: String,
    pub query_id: u64,
    pub description: Option<String>,
    pub options: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct CreateWidgetRequest {
    pub dashboard_id: u64,
    pub text: String,
    pub visualization_id: Option<u64>,
    pub width: u32,
    pub options: WidgetOptions,
}

#[derive(Debug, Serialize)]
pub struct UpdateDashboardRequest {
    pub is_draft: bool,
}

// Operation parameters

/// Arguments for [`RedashClient::create_query`](crate::api::client::RedashClient::create_query).
///
/// `with_results` defaults to `true`: the new query is executed right after creation.
#[derive(Debug, Clone)]
pub struct CreateQueryParams {
    pub data_source_id: u64,
    pub name: String,
    pub query: String,
    pub description: String,
    pub with_results: bool,
    pub options: Map<String, Value>,
}

impl CreateQueryParams {
    pub fn new(data_source_id: u64, name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            data_source_id,
            name: name.into(),
            query: query.into(),
            description: String::new(),
            with_results: true,
            options: Map::new(),
        }
    }
}

/// Arguments for executing query text against a data source.
///
/// `max_age` of 0 forces a fresh execution. With `return_results` set the
/// client follows the job to its result in a single pass, without waiting.
#[derive(Debug, Clone)]
pub struct QueryResultsParams {
    pub data_source_id: u64,
    pub query: String,
    pub query_id: Option<u64>,
    pub max_age: u64,
    pub parameters: Map<String, Value>,
    pub return_results: bool,
}

impl QueryResultsParams {
    pub fn new(data_source_id: u64, query: impl Into<String>) -> Self {
        Self {
            data_source_id,
            query: query.into(),
            query_id: None,
            max_age: 0,
            parameters: Map::new(),
            return_results: false,
        }
    }
}

/// One plotted series of a chart visualization.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct YAxisColumn {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, rename = "type")]
    pub series_type: Option<String>,
}

impl YAxisColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Arguments for building a visualization.
///
/// `visualization_type` is `"table"`, `"pivot"` or a chart kind such as
/// `"line"`, `"bar"` or `"pie"`. Which optional fields are required depends on it.
#[derive(Debug, Clone)]
pub struct VisualizationParams {
    pub query_id: u64,
    pub visualization_type: String,
    pub name: String,
    pub columns: Option<Vec<Map<String, Value>>>,
    pub x_axis: Option<String>,
    pub y_axis: Option<Vec<YAxisColumn>>,
    pub group_by: Option<String>,
    pub custom_options: Map<String, Value>,
    pub description: Option<String>,
}

impl VisualizationParams {
    pub fn new(
        query_id: u64,
        visualization_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            query_id,
            visualization_type: visualization_type.into(),
            name: name.into(),
            columns: None,
            x_axis: None,
            y_axis: None,
            group_by: None,
            custom_options: Map::new(),
            description: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AddWidgetParams {
    pub dashboard_id: u64,
    pub text: String,
    pub visualization_id: Option<u64>,
    pub full_width: bool,
    pub position: Option<WidgetPosition>,
}

impl AddWidgetParams {
    pub fn visualization(dashboard_id: u64, visualization_id: u64) -> Self {
        Self {
            dashboard_id,
            visualization_id: Some(visualization_id),
            ..Default::default()
        }
    }

    pub fn text(dashboard_id: u64, text: impl Into<String>) -> Self {
        Self {
            dashboard_id,
            text: text.into(),
            ..Default::default()
        }
    }
}

/// Query creation outcome; `results` is set when the query was executed right away.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedQuery {
    pub query: Value,
    pub results: Option<Value>,
}

// Responses

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct WidgetPosition {
    pub col: u32,
    pub row: u32,
    #[serde(rename = "sizeX")]
    pub size_x: u32,
    #[serde(rename = "sizeY")]
    pub size_y: u32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WidgetOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<WidgetPosition>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WidgetVisualization {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub query: Option<Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Widget {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub options: WidgetOptions,
    #[serde(default)]
    pub visualization: Option<WidgetVisualization>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Dashboard {
    pub id: u64,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_draft: bool,
    #[serde(default)]
    pub public_url: Option<String>,
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardSummary {
    pub id: u64,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_draft: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardList {
    #[serde(default)]
    pub results: Vec<DashboardSummary>,
}

/// One row of the `queries` listing. A query whose data source was deleted
/// reports `data_source_id: null`.
#[derive(Debug, Clone, Deserialize)]
pub struct QuerySummary {
    pub id: u64,
    #[serde(default)]
    pub data_source_id: Option<u64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryList {
    #[serde(default)]
    pub results: Vec<QuerySummary>,
}

/// Status codes reported by the service for an execution job.
pub mod job_status {
    pub const PENDING: u8 = 1;
    pub const STARTED: u8 = 2;
    pub const SUCCESS: u8 = 3;
    pub const FAILURE: u8 = 4;
    pub const CANCELLED: u8 = 5;
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Job {
    pub id: String,
    #[serde(default)]
    pub status: u8,
    #[serde(default)]
    pub query_result_id: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response of `query_results` and `jobs/{id}`: either a pending job, or a cached result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobEnvelope {
    #[serde(default)]
    pub job: Option<Job>,
    #[serde(default)]
    pub query_result: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShareResponse {
    #[serde(default)]
    pub public_url: Option<String>,
}
