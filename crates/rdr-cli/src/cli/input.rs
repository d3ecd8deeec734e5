//! Conversion of raw command line values into request parameters

use rdr_core::api::models::{WidgetPosition, YAxisColumn};
use rdr_core::error::{AppError, CliError};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

fn invalid(flag: &str, reason: impl std::fmt::Display) -> AppError {
    AppError::Cli(CliError::InvalidArguments(format!(
        "--{}: {}",
        flag, reason
    )))
}

fn parse_json<T: DeserializeOwned>(flag: &str, raw: &str) -> Result<T, AppError> {
    serde_json::from_str(raw).map_err(|e| invalid(flag, format!("invalid JSON ({})", e)))
}

/// Parse a flag holding a JSON object.
pub fn parse_object(flag: &str, raw: &str) -> Result<Map<String, Value>, AppError> {
    match parse_json::<Value>(flag, raw)? {
        Value::Object(map) => Ok(map),
        other => Err(invalid(flag, format!("expected a JSON object, got {}", other))),
    }
}

/// Parse a flag holding a JSON array of objects.
pub fn parse_object_list(flag: &str, raw: &str) -> Result<Vec<Map<String, Value>>, AppError> {
    parse_json(flag, raw)
}

/// Y axis columns are either a JSON array of `{name, label?, type?}` objects or
/// a comma-separated list of column names.
pub fn parse_y_axis(raw: &str) -> Result<Vec<YAxisColumn>, AppError> {
    if raw.trim_start().starts_with('[') {
        return parse_json("y-axis", raw);
    }

    Ok(raw
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(YAxisColumn::new)
        .collect())
}

pub fn parse_position(raw: &str) -> Result<WidgetPosition, AppError> {
    parse_json("position", raw)
}

/// Collect `key=value` pairs into a query parameter map. Malformed entries are
/// skipped with a warning.
pub fn parse_params(params: &[String]) -> Map<String, Value> {
    let mut map = Map::new();
    for param in params {
        match param.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                map.insert(key.to_string(), Value::String(value.to_string()));
            }
            _ => log::warn!(
                "Invalid parameter format '{}'. Expected 'key=value'",
                param
            ),
        }
    }
    map
}
