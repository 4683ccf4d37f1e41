use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => {
            if items.is_empty() {
                return Ok(String::from("(no rows)"));
            }
            let blocks = items
                .iter()
                .map(render_entry)
                .collect::<Vec<_>>();
            Ok(blocks.join("\n\n"))
        }
        other => Ok(render_entry(&other)),
    }
}

fn render_entry(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let width = map.keys().map(String::len).max().unwrap_or(0);
            map.iter()
                .map(|(key, value)| format!("{key:width$}  {}", value_to_cell(value)))
                .collect::<Vec<_>>()
                .join("\n")
        }
        other => value_to_cell(other),
    }
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::render;
    use crate::cli::OutputFormat;

    #[test]
    fn raw_is_compact_json() {
        let value = json!({"model": "G7-Pro", "record_id": "rec123"});
        let rendered = render(&value, OutputFormat::Raw).unwrap();
        assert_eq!(rendered, r#"{"model":"G7-Pro","record_id":"rec123"}"#);
    }

    #[test]
    fn table_aligns_keys_and_dashes_nulls() {
        let value = json!({"model": "G7-Pro", "title": null});
        let rendered = render(&value, OutputFormat::Table).unwrap();
        assert_eq!(rendered, "model  G7-Pro\ntitle  -");
    }

    #[test]
    fn table_for_empty_array_says_no_rows() {
        let value = json!([]);
        let rendered = render(&value, OutputFormat::Table).unwrap();
        assert_eq!(rendered, "(no rows)");
    }
}
