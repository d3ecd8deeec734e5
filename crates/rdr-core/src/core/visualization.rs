//! Visualization payload builder
//!
//! Turns [`VisualizationParams`] into the body posted to `visualizations`.
//! The options object has one of three shapes, selected by the visualization
//! type: table, pivot, or chart (every other type string is a chart kind).

use crate::api::models::{CreateVisualizationRequest, VisualizationParams, YAxisColumn};
use crate::error::ValidationError;
use serde_json::{Map, Value, json};

/// First `order` value assigned to table columns.
pub const TABLE_COLUMN_ORDER_BASE: u64 = 100_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisualizationType {
    Table,
    Pivot,
    Chart(String),
}

impl VisualizationType {
    pub fn parse(value: &str) -> Self {
        match value {
            "table" => VisualizationType::Table,
            "pivot" => VisualizationType::Pivot,
            kind => VisualizationType::Chart(kind.to_string()),
        }
    }

    /// Type tag sent to the service.
    pub fn tag(&self) -> &'static str {
        match self {
            VisualizationType::Table => "TABLE",
            VisualizationType::Pivot => "PIVOT",
            VisualizationType::Chart(_) => "CHART",
        }
    }
}

/// Build the `visualizations` request body without touching the network.
pub fn build_visualization(
    params: &VisualizationParams,
) -> Result<CreateVisualizationRequest, ValidationError> {
    let visualization_type = VisualizationType::parse(&params.visualization_type);

    let options = match &visualization_type {
        VisualizationType::Table => {
            table_options(params.columns.as_deref(), &params.custom_options)?
        }
        VisualizationType::Pivot => pivot_options(&params.custom_options)?,
        VisualizationType::Chart(kind) => chart_options(
            kind,
            params.x_axis.as_deref(),
            params.y_axis.as_deref(),
            params.group_by.as_deref(),
            &params.custom_options,
        )?,
    };

    Ok(CreateVisualizationRequest {
        name: params.name.clone(),
        visualization_type: visualization_type.tag().to_string(),
        query_id: params.query_id,
        description: params.description.clone(),
        options,
    })
}

/// Apply `overrides` on top of `base`, key by key. Existing keys are replaced.
pub fn apply_overrides(base: &mut Map<String, Value>, overrides: &Map<String, Value>) {
    for (key, value) in overrides {
        base.insert(key.clone(), value.clone());
    }
}

pub fn table_options(
    columns: Option<&[Map<String, Value>]>,
    custom_options: &Map<String, Value>,
) -> Result<Map<String, Value>, ValidationError> {
    let columns = match columns {
        Some(columns) if !columns.is_empty() => columns.to_vec(),
        _ => columns_from_custom_options(custom_options)?,
    };

    let descriptors = columns
        .iter()
        .enumerate()
        .map(|(index, column)| table_column(index, column).map(Value::Object))
        .collect::<Result<Vec<_>, _>>()?;

    let mut options = Map::new();
    options.insert("itemsPerPage".to_string(), json!(25));
    apply_overrides(&mut options, custom_options);
    options.insert("columns".to_string(), Value::Array(descriptors));

    Ok(options)
}

fn columns_from_custom_options(
    custom_options: &Map<String, Value>,
) -> Result<Vec<Map<String, Value>>, ValidationError> {
    let missing = || {
        ValidationError::new(
            "columns",
            "table visualizations need columns, directly or in custom options",
        )
    };

    let entries = custom_options
        .get("columns")
        .and_then(Value::as_array)
        .filter(|entries| !entries.is_empty())
        .ok_or_else(missing)?;

    entries
        .iter()
        .map(|entry| {
            entry.as_object().cloned().ok_or_else(|| {
                ValidationError::new("columns", "every column must be a JSON object")
            })
        })
        .collect()
}

/// Expand one caller column into a full column descriptor.
pub fn table_column(
    index: usize,
    column: &Map<String, Value>,
) -> Result<Map<String, Value>, ValidationError> {
    let name = column
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ValidationError::new("columns", format!("column {} has no name", index)))?;

    let defaults = json!({
        "alignContent": "left",
        "allowHTML": true,
        "allowSearch": false,
        "booleanValues": ["false", "true"],
        "dateTimeFormat": "DD/MM/YY HH:mm",
        "displayAs": "string",
        "highlightLinks": false,
        "imageHeight": "",
        "imageTitleTemplate": "{{ @ }}",
        "imageUrlTemplate": "{{ @ }}",
        "imageWidth": "",
        "linkOpenInNewTab": true,
        "linkTextTemplate": "{{ @ }}",
        "linkTitleTemplate": "{{ @ }}",
        "linkUrlTemplate": "{{ @ }}",
        "numberFormat": "0,0",
        "order": TABLE_COLUMN_ORDER_BASE + index as u64,
        "title": name,
        "visible": true,
    });

    let mut descriptor = match defaults {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    apply_overrides(&mut descriptor, column);

    Ok(descriptor)
}

pub fn pivot_options(
    custom_options: &Map<String, Value>,
) -> Result<Map<String, Value>, ValidationError> {
    if custom_options.is_empty() {
        return Err(ValidationError::new(
            "custom_options",
            "pivot visualizations need pivot table options",
        ));
    }

    Ok(custom_options.clone())
}

pub fn chart_options(
    kind: &str,
    x_axis: Option<&str>,
    y_axis: Option<&[YAxisColumn]>,
    group_by: Option<&str>,
    custom_options: &Map<String, Value>,
) -> Result<Map<String, Value>, ValidationError> {
    let x_axis = x_axis
        .filter(|x| !x.is_empty())
        .ok_or_else(|| ValidationError::new("x_axis", "chart visualizations need an x axis"))?;
    let y_axis = y_axis
        .filter(|y| !y.is_empty())
        .ok_or_else(|| ValidationError::new("y_axis", "chart visualizations need a y axis"))?;

    let mut series_options = Map::new();
    let mut column_mapping = Map::new();

    for (z_index, column) in y_axis.iter().enumerate() {
        if column.name.is_empty() {
            return Err(ValidationError::new(
                "y_axis",
                format!("y axis column {} has no name", z_index),
            ));
        }

        series_options.insert(
            column.name.clone(),
            json!({
                "index": 0,
                "type": column.series_type.as_deref().unwrap_or(kind),
                "name": column.label.as_deref().unwrap_or(&column.name),
                "yAxis": 0,
                "zIndex": z_index,
            }),
        );
        column_mapping.insert(column.name.clone(), json!("y"));
    }

    column_mapping.insert(x_axis.to_string(), json!("x"));
    if let Some(group_by) = group_by {
        column_mapping.insert(group_by.to_string(), json!("series"));
    }

    let mut options = Map::new();
    options.insert("globalSeriesType".to_string(), json!(kind));
    options.insert("sortX".to_string(), json!(true));
    options.insert("legend".to_string(), json!({"enabled": true}));
    options.insert(
        "yAxis".to_string(),
        json!([{"type": "linear"}, {"type": "linear", "opposite": true}]),
    );
    options.insert(
        "xAxis".to_string(),
        json!({"type": "category", "labels": {"enabled": true}}),
    );
    options.insert(
        "error_y".to_string(),
        json!({"type": "data", "visible": true}),
    );
    options.insert(
        "series".to_string(),
        json!({"stacking": null, "error_y": {"type": "data", "visible": true}}),
    );
    options.insert("seriesOptions".to_string(), Value::Object(series_options));
    options.insert("columnMapping".to_string(), Value::Object(column_mapping));
    options.insert("showDataLabels".to_string(), json!(kind == "pie"));

    apply_overrides(&mut options, custom_options);

    Ok(options)
}
