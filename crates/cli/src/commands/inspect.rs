use std::fs;
use std::path::Path;

use prcs_core::Descriptor;

use crate::commands::{fail, print_version_info};
use crate::OutputFormat;

pub(crate) fn cmd_inspect(file: &Path, output: OutputFormat, quiet: bool) {
    let text = match fs::read_to_string(file) {
        Ok(text) => text,
        Err(e) => {
            let message = format!("cannot read '{}': {}", file.display(), e);
            let json = serde_json::json!({ "kind": "io", "message": message });
            fail(&message, json, output, quiet)
        }
    };

    match Descriptor::parse(&text).and_then(|d| d.info()) {
        Ok(info) => print_version_info(&info, output),
        Err(e) => fail(&e.to_string(), e.to_json_value(), output, quiet),
    }
}
