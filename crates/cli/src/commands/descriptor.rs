use prcs_project::{Project, ProjectError, SystemRunner};

use crate::commands::{fail, print_version_info};
use crate::OutputFormat;

pub(crate) fn cmd_descriptor(
    name: &str,
    revision: Option<&str>,
    runner: SystemRunner,
    output: OutputFormat,
    quiet: bool,
) {
    let project = Project::with_runner(name, runner);
    let info = project
        .descriptor(revision)
        .and_then(|d| d.info().map_err(ProjectError::from));
    match info {
        Ok(info) => print_version_info(&info, output),
        Err(e) => fail(&e.to_string(), e.to_json_value(), output, quiet),
    }
}
