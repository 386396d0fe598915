/// All errors that can be returned while driving the prcs command.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// The command ran but exited unsuccessfully. `message` is its stderr.
    /// A process killed by a signal reports code -1.
    #[error("prcs exited with code {code}: {message}")]
    Command { code: i32, message: String },

    /// Spawning the command or handling the checked-out file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The command's output could not be parsed.
    #[error(transparent)]
    Parse(#[from] prcs_core::Error),
}

impl ProjectError {
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            ProjectError::Command { code, message } => serde_json::json!({
                "kind":    "command",
                "code":    code,
                "message": message,
            }),
            ProjectError::Io(e) => serde_json::json!({
                "kind":    "io",
                "message": e.to_string(),
            }),
            ProjectError::Parse(e) => e.to_json_value(),
        }
    }
}
