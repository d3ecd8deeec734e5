use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets};
use rdr_core::api::models::DashboardSummary;
use rdr_core::error::{AppError, CliError};
use serde::Serialize;
use serde_json::Value;

/// Longest query text shown in a table cell
const QUERY_PREVIEW_CHARS: usize = 60;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let output = serde_json::to_string_pretty(value).map_err(|e| {
        AppError::Cli(CliError::InvalidArguments(format!(
            "Failed to serialize result to JSON: {}",
            e
        )))
    })?;
    println!("{}", output);
    Ok(())
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold).fg(Color::Cyan))
            .collect::<Vec<_>>(),
    );
    table
}

pub fn render_dashboard_list(dashboards: &[DashboardSummary]) -> String {
    let mut table = new_table(&["ID", "Slug", "Name", "Status"]);

    for dashboard in dashboards {
        let status = if dashboard.is_draft {
            "draft"
        } else {
            "published"
        };
        table.add_row(vec![
            Cell::new(dashboard.id).fg(Color::Cyan),
            Cell::new(&dashboard.slug),
            Cell::new(&dashboard.name),
            Cell::new(status),
        ]);
    }

    table.to_string()
}

/// Render the query objects attached to dashboard widgets.
pub fn render_query_list(queries: &[Value]) -> String {
    let mut table = new_table(&["ID", "Name", "Data Source", "Query"]);

    for query in queries {
        table.add_row(vec![
            Cell::new(cell_text(query.get("id"))).fg(Color::Cyan),
            Cell::new(cell_text(query.get("name"))),
            Cell::new(cell_text(query.get("data_source_id"))),
            Cell::new(truncate(&cell_text(query.get("query")), QUERY_PREVIEW_CHARS)),
        ]);
    }

    table.to_string()
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "N/A".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max_chars {
        single_line
    } else {
        let head: String = single_line.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}
