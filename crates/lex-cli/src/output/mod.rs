use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Columns shown first, in this order, when present; the rest follow
/// alphabetically.
const LEADING_COLUMNS: &[&str] = &["id", "title", "name", "counterparty", "status", "level"];

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(&serde_json::to_value(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table(value: &Value) -> anyhow::Result<String> {
    let text = match value {
        Value::Array(items) if items.is_empty() => String::from("(no rows)"),
        Value::Array(items) if items.iter().all(Value::is_object) => {
            let maps = items.iter().filter_map(Value::as_object).collect::<Vec<_>>();
            render_rows(&maps)
        }
        Value::Array(items) => {
            let rows = items.iter().map(|item| vec![cell(item)]).collect::<Vec<_>>();
            table::render_entity_table(&["value"], &rows, table_options())
        }
        Value::Object(map) => render_key_values(map),
        scalar => table::render_entity_table(&["value"], &[vec![cell(scalar)]], table_options()),
    };
    Ok(text)
}

/// One row per object; union of keys as columns.
fn render_rows(maps: &[&Map<String, Value>]) -> String {
    let mut headers = Vec::<&str>::new();
    for map in maps {
        for key in map.keys() {
            if !headers.contains(&key.as_str()) {
                headers.push(key);
            }
        }
    }
    order_columns(&mut headers);

    let rows = maps
        .iter()
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(*header).map_or_else(|| String::from("-"), cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    table::render_entity_table(&headers, &rows, table_options())
}

/// A single object as a two-column key/value table.
fn render_key_values(map: &Map<String, Value>) -> String {
    let mut keys = map.keys().map(String::as_str).collect::<Vec<_>>();
    order_columns(&mut keys);
    let rows = keys
        .iter()
        .map(|key| vec![(*key).to_string(), cell(&map[*key])])
        .collect::<Vec<_>>();
    table::render_entity_table(&["key", "value"], &rows, table_options())
}

fn order_columns(columns: &mut [&str]) {
    columns.sort_by_key(|column| {
        (
            LEADING_COLUMNS
                .iter()
                .position(|leading| leading == column)
                .unwrap_or(LEADING_COLUMNS.len()),
            column.to_string(),
        )
    });
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        // Nested objects (e.g. an organization inside a response) stay compact.
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use lex_core::analytics::PortfolioSummary;
    use lex_core::entities::Agreement;
    use lex_core::enums::{AgreementStatus, RiskLevel};
    use serde::Serialize;

    use super::{order_columns, render};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        authenticated: bool,
        organization: Option<&'static str>,
    }

    fn agreement(id: &str, title: &str) -> Agreement {
        Agreement {
            id: id.into(),
            title: title.into(),
            counterparty: "Globex".into(),
            kind: "NDA".into(),
            status: AgreementStatus::Review,
            value: 5000,
            owner: None,
            effective_date: None,
            expiry_date: None,
            risk: Some(RiskLevel::High),
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Example {
            authenticated: true,
            organization: Some("Acme"),
        };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["organization"], "Acme");
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&agreement("agr-1", "NDA"), OutputFormat::Raw).expect("raw render");
        assert!(!out.contains('\n'));
        assert!(out.contains(r#""type":"NDA""#));
    }

    #[test]
    fn table_render_for_object_shows_nulls_as_dash() {
        let value = Example {
            authenticated: false,
            organization: None,
        };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("key"));
        assert!(
            lines
                .iter()
                .any(|line| line.starts_with("organization") && line.trim_end().ends_with('-'))
        );
    }

    #[test]
    fn table_render_for_agreements_leads_with_identity_columns() {
        let out = render(
            &vec![agreement("agr-1", "Mutual NDA"), agreement("agr-2", "MSA")],
            OutputFormat::Table,
        )
        .expect("table render should work");
        let header = out.lines().next().expect("header");
        let id = header.find("id").expect("id column");
        let title = header.find("title").expect("title column");
        let value = header.find("value").expect("value column");
        assert!(id < title && title < value);
        assert_eq!(out.lines().count(), 4);
    }

    #[test]
    fn table_render_for_summary() {
        let summary = PortfolioSummary::from_agreements(&[agreement("agr-1", "NDA")]);
        let out = render(&summary, OutputFormat::Table).expect("table render should work");
        assert!(out.contains("high_risk"));
        assert!(out.contains("by_status"));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let empty: Vec<Agreement> = Vec::new();
        assert_eq!(render(&empty, OutputFormat::Table).unwrap(), "(no rows)");
    }

    #[test]
    fn order_columns_puts_known_first() {
        let mut columns = vec!["value", "status", "id", "kind", "title"];
        order_columns(&mut columns);
        assert_eq!(columns, vec!["id", "title", "status", "kind", "value"]);
    }
}
