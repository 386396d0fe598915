/// Any failure raised while turning descriptor or info text into typed records.
///
/// The four variants are the four failure classes a caller may need to tell
/// apart; each wraps a payload with the detail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// The lexer could not produce a token (an opening quote was never closed).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct LexError {
    pub line: u32,
    pub message: String,
}

/// The token stream does not form balanced lists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A list was opened but input ended before its closing parenthesis.
    #[error("line {line}: unexpected end of input inside a list")]
    UnexpectedEndOfInput { line: u32 },
    /// A closing parenthesis appeared with no list open.
    #[error("line {line}: unexpected ')' with no open list")]
    UnexpectedCloseList { line: u32 },
}

/// A descriptor property is missing or its shape does not match.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("property '{property}': {message}")]
pub struct SchemaError {
    pub property: String,
    pub message: String,
}

/// A field's text could not be converted to its target type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field} '{value}': {message}")]
pub struct FormatError {
    pub field: String,
    pub value: String,
    pub message: String,
}

impl LexError {
    pub fn new(line: u32, message: impl Into<String>) -> Self {
        LexError {
            line,
            message: message.into(),
        }
    }
}

impl SchemaError {
    pub fn new(property: &str, message: impl Into<String>) -> Self {
        SchemaError {
            property: property.to_owned(),
            message: message.into(),
        }
    }
}

impl FormatError {
    pub fn new(field: &str, value: &str, message: impl Into<String>) -> Self {
        FormatError {
            field: field.to_owned(),
            value: value.to_owned(),
            message: message.into(),
        }
    }
}

impl Error {
    /// Short name of the failure class, used in machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Lex(_) => "lex",
            Error::Parse(_) => "parse",
            Error::Schema(_) => "schema",
            Error::Format(_) => "format",
        }
    }

    /// Serialize to a flat JSON object: `kind`, `message` and the line when known.
    pub fn to_json_value(&self) -> serde_json::Value {
        let line = match self {
            Error::Lex(e) => Some(e.line),
            Error::Parse(ParseError::UnexpectedEndOfInput { line })
            | Error::Parse(ParseError::UnexpectedCloseList { line }) => Some(*line),
            Error::Schema(_) | Error::Format(_) => None,
        };
        serde_json::json!({
            "kind":    self.kind(),
            "line":    line,
            "message": self.to_string(),
        })
    }
}
