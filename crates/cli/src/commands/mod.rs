mod descriptor;
mod inspect;
mod versions;

pub(crate) use descriptor::cmd_descriptor;
pub(crate) use inspect::cmd_inspect;
pub(crate) use versions::cmd_versions;

use std::process;

use prcs_core::{FileEntry, ProjectVersionInfo};

use crate::OutputFormat;

/// Report an error on stderr in the requested format and exit with status 1.
pub(crate) fn fail(message: &str, json: serde_json::Value, output: OutputFormat, quiet: bool) -> ! {
    match output {
        OutputFormat::Json => {
            let err_json = serde_json::to_string_pretty(&json)
                .unwrap_or_else(|_| format!("{{\"message\": {:?}}}", message));
            eprintln!("{}", err_json);
        }
        OutputFormat::Text => {
            if !quiet {
                eprintln!("error: {}", message);
            }
        }
    }
    process::exit(1);
}

pub(crate) fn print_version_info(info: &ProjectVersionInfo, output: OutputFormat) {
    match output {
        OutputFormat::Json => {
            let pretty = serde_json::to_string_pretty(info)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
        OutputFormat::Text => print!("{}", render_version_info(info)),
    }
}

fn render_version_info(info: &ProjectVersionInfo) -> String {
    let mut out = String::new();
    out.push_str(&format!("version: {}\n", info.version));
    match &info.parent {
        Some(parent) => out.push_str(&format!("parent: {}\n", parent)),
        None => out.push_str("parent: (none)\n"),
    }
    if !info.merge_parents.is_empty() {
        let ids: Vec<&str> = info.merge_parents.iter().map(String::as_str).collect();
        out.push_str(&format!("merge parents: {}\n", ids.join(", ")));
    }
    out.push_str("message:\n");
    for line in info.message.lines() {
        out.push_str(&format!("  {}\n", line));
    }
    out.push_str(&format!("files ({}):\n", info.files.len()));
    for (path, entry) in &info.files {
        match entry {
            FileEntry::Regular {
                content_id,
                revision,
                mode,
            } => out.push_str(&format!(
                "  {} {:04o} {} {}\n",
                path, mode, revision, content_id
            )),
            FileEntry::Symlink { target } => {
                out.push_str(&format!("  {} -> {}\n", path, target))
            }
        }
    }
    out
}
