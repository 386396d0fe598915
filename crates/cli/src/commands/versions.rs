use prcs_project::{Project, SystemRunner};

use crate::commands::fail;
use crate::OutputFormat;

pub(crate) fn cmd_versions(name: &str, runner: SystemRunner, output: OutputFormat, quiet: bool) {
    let project = Project::with_runner(name, runner);
    let versions = match project.versions() {
        Ok(versions) => versions,
        Err(e) => fail(&e.to_string(), e.to_json_value(), output, quiet),
    };

    match output {
        OutputFormat::Json => {
            let records: Vec<serde_json::Value> =
                versions.values().map(|v| v.to_json_value()).collect();
            let pretty = serde_json::to_string_pretty(&records)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
        OutputFormat::Text => {
            for summary in versions.values() {
                let deleted = if summary.deleted { "\tdeleted" } else { "" };
                println!(
                    "{}\t{}\t{}{}",
                    summary.id,
                    summary.date_text(),
                    summary.author,
                    deleted
                );
            }
        }
    }
}
