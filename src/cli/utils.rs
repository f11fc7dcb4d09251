use serde_json::{json, Value};
use crate::cli::OutputFormat;

/// Print a single result: the bare value as text, or `{ "success": true, ...fields }` as JSON
pub fn output_value(output_format: OutputFormat, text: &str, fields: Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({ "success": true });
            if let (Some(target), Value::Object(extra)) = (response.as_object_mut(), fields) {
                target.extend(extra);
            }
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("{}", text);
        }
    }
    Ok(())
}
