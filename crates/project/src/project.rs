//! A named PRCS project, driven through the `prcs` command.
//!
//! Output text is handed to `prcs-core` for parsing; this module only builds
//! argument lists, checks exit codes and manages the checked-out descriptor.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use prcs_core::{parse_info_records, Descriptor, VersionSummary};

use crate::error::ProjectError;
use crate::runner::{CommandOutput, CommandRunner, SystemRunner};

pub struct Project<R = SystemRunner> {
    name: String,
    runner: R,
}

impl Project<SystemRunner> {
    /// A project driven by the `prcs` found on `PATH`.
    pub fn new(name: impl Into<String>) -> Self {
        Project::with_runner(name, SystemRunner::default())
    }
}

impl<R: CommandRunner> Project<R> {
    pub fn with_runner(name: impl Into<String>, runner: R) -> Self {
        Project {
            name: name.into(),
            runner,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// File name of the project descriptor inside a checkout.
    pub fn descriptor_file_name(&self) -> String {
        format!("{}.prj", self.name)
    }

    /// Summary records for every version, keyed by version id.
    pub fn versions(&self) -> Result<BTreeMap<String, VersionSummary>, ProjectError> {
        let args = vec!["info".to_owned(), "-f".to_owned(), self.name.clone()];
        let output = self.run(&args, None)?;
        Ok(parse_info_records(&String::from_utf8_lossy(&output.stdout))?)
    }

    /// Check out and parse the descriptor of `version` (latest when `None`).
    ///
    /// The descriptor is checked out into a scratch directory that is removed
    /// before returning, whether or not parsing succeeds.
    pub fn descriptor(&self, version: Option<&str>) -> Result<Descriptor, ProjectError> {
        let scratch = tempfile::tempdir()?;
        let file_name = self.descriptor_file_name();
        self.checkout(version, &[file_name.clone()], Some(scratch.path()))?;

        let text = fs::read_to_string(scratch.path().join(&file_name))?;
        tracing::debug!(path = %scratch.path().display(), "removing checked-out descriptor");
        scratch.close()?;

        Ok(Descriptor::parse(&text)?)
    }

    /// Check out `files` (the whole project when empty) at `version`.
    pub fn checkout(
        &self,
        version: Option<&str>,
        files: &[String],
        cwd: Option<&Path>,
    ) -> Result<(), ProjectError> {
        let mut args = vec!["checkout".to_owned(), "-fqu".to_owned()];
        if let Some(version) = version {
            args.push("-r".to_owned());
            args.push(version.to_owned());
        }
        args.push(self.name.clone());
        args.extend(files.iter().cloned());
        self.run(&args, cwd)?;
        Ok(())
    }

    fn run(&self, args: &[String], cwd: Option<&Path>) -> Result<CommandOutput, ProjectError> {
        let output = self.runner.run(args, cwd)?;
        if !output.success() {
            let code = output.status.unwrap_or(-1);
            let message = String::from_utf8_lossy(&output.stderr).trim_end().to_owned();
            tracing::warn!(code, %message, ?args, "prcs failed");
            return Err(ProjectError::Command { code, message });
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    const DESCRIPTOR: &str = r#";; generated
(Project-Version testproject 0 2)
(Parent-Version testproject 0 1)
(Version-Log "second version")
(Files (README (testproject/0_README 1.2 644)))
(Merge-Parents)
"#;

    const INFO: &str = "\
testproject 0.1 Sat, 30 May 2020 14:38:29 +0900 by kaz
testproject 0.2 Sun, 31 May 2020 09:00:00 +0900 by kaz *DELETED*
";

    /// Simulates prcs: answers `info`, writes the descriptor on `checkout`.
    struct FakePrcs {
        descriptor: String,
        fail_with: Option<(Option<i32>, &'static str)>,
        calls: RefCell<Vec<(Vec<String>, Option<PathBuf>)>>,
    }

    impl FakePrcs {
        fn new(descriptor: &str) -> Self {
            FakePrcs {
                descriptor: descriptor.to_owned(),
                fail_with: None,
                calls: RefCell::new(Vec::new()),
            }
        }

        fn failing(status: Option<i32>, stderr: &'static str) -> Self {
            FakePrcs {
                fail_with: Some((status, stderr)),
                ..FakePrcs::new("")
            }
        }
    }

    impl CommandRunner for FakePrcs {
        fn run(
            &self,
            args: &[String],
            cwd: Option<&Path>,
        ) -> Result<CommandOutput, std::io::Error> {
            self.calls
                .borrow_mut()
                .push((args.to_vec(), cwd.map(Path::to_path_buf)));
            if let Some((status, stderr)) = self.fail_with {
                return Ok(CommandOutput {
                    status,
                    stdout: Vec::new(),
                    stderr: stderr.as_bytes().to_vec(),
                });
            }
            let mut output = CommandOutput {
                status: Some(0),
                ..CommandOutput::default()
            };
            match args.first().map(String::as_str) {
                Some("info") => output.stdout = INFO.as_bytes().to_vec(),
                Some("checkout") => {
                    let dir = cwd.unwrap_or_else(|| Path::new("."));
                    let name_pos = args.iter().position(|a| a == "testproject").unwrap();
                    for file in &args[name_pos + 1..] {
                        fs::write(dir.join(file), &self.descriptor)?;
                    }
                }
                _ => output.status = Some(1),
            }
            Ok(output)
        }
    }

    #[test]
    fn versions_runs_info_and_parses_records() {
        let project = Project::with_runner("testproject", FakePrcs::new(DESCRIPTOR));
        let versions = project.versions().unwrap();
        assert!(versions.contains_key("0.1"));
        assert!(versions["0.2"].deleted);

        let calls = project.runner.calls.borrow();
        assert_eq!(calls[0].0, vec!["info", "-f", "testproject"]);
        assert_eq!(calls[0].1, None);
    }

    #[test]
    fn descriptor_checks_out_parses_and_cleans_up() {
        let project = Project::with_runner("testproject", FakePrcs::new(DESCRIPTOR));
        let descriptor = project.descriptor(Some("0.2")).unwrap();
        assert_eq!(descriptor.version().unwrap(), "0.2");
        assert_eq!(descriptor.message().unwrap(), "second version");

        let calls = project.runner.calls.borrow();
        let (args, cwd) = &calls[0];
        assert_eq!(
            args,
            &vec!["checkout", "-fqu", "-r", "0.2", "testproject", "testproject.prj"]
        );
        let scratch = cwd.as_ref().expect("checkout should run in a scratch dir");
        assert!(!scratch.exists(), "scratch dir should be removed");
    }

    #[test]
    fn descriptor_without_version_omits_revision_flag() {
        let project = Project::with_runner("testproject", FakePrcs::new(DESCRIPTOR));
        project.descriptor(None).unwrap();
        let calls = project.runner.calls.borrow();
        assert!(!calls[0].0.iter().any(|a| a == "-r"));
    }

    #[test]
    fn unparsable_descriptor_still_cleans_up() {
        let project = Project::with_runner("testproject", FakePrcs::new("(Files (a"));
        match project.descriptor(None) {
            Err(ProjectError::Parse(prcs_core::Error::Parse(_))) => {}
            other => panic!("expected parse error, got {:?}", other.map(|_| ())),
        }
        let calls = project.runner.calls.borrow();
        assert!(!calls[0].1.as_ref().unwrap().exists());
    }

    #[test]
    fn failing_command_reports_stderr() {
        let project = Project::with_runner(
            "testproject",
            FakePrcs::failing(Some(2), "prcs: Project not found.\n"),
        );
        match project.versions() {
            Err(ProjectError::Command { code, message }) => {
                assert_eq!(code, 2);
                assert_eq!(message, "prcs: Project not found.");
            }
            other => panic!("expected Command error, got {:?}", other),
        }
    }

    #[test]
    fn killed_command_reports_minus_one() {
        let project = Project::with_runner("testproject", FakePrcs::failing(None, ""));
        match project.checkout(None, &[], None) {
            Err(ProjectError::Command { code, .. }) => assert_eq!(code, -1),
            other => panic!("expected Command error, got {:?}", other),
        }
    }

    #[test]
    fn checkout_passes_files_and_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let project = Project::with_runner("testproject", FakePrcs::new(DESCRIPTOR));
        project
            .checkout(Some("0"), &["README".to_owned()], Some(dir.path()))
            .unwrap();
        assert!(dir.path().join("README").exists());
        let calls = project.runner.calls.borrow();
        assert_eq!(
            calls[0].0,
            vec!["checkout", "-fqu", "-r", "0", "testproject", "README"]
        );
        assert_eq!(calls[0].1.as_deref(), Some(dir.path()));
    }

    #[test]
    fn error_json_shapes() {
        let err = ProjectError::Command {
            code: 1,
            message: "boom".to_owned(),
        };
        let v = err.to_json_value();
        assert_eq!(v["kind"], "command");
        assert_eq!(v["code"], 1);
    }
}
