use serde_json::json;

use crate::cli::{utils, OutputFormat};
use crate::gateway::procedures::CATALOG;

pub fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let list: Vec<_> = CATALOG
                .iter()
                .map(|(name, params)| json!({ "name": name, "params": params }))
                .collect();
            utils::output_success(&output_format, "Stored procedures", Some(json!({ "procedures": list })))
        }
        OutputFormat::Text => {
            for (name, params) in CATALOG {
                println!("{}({})", name, params.join(", "));
            }
            Ok(())
        }
    }
}
