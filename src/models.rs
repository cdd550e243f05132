use serde::Serialize;

/// Machine-readable category of a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Code {
    Ignored,
    Value,
    File,
    Ascii,
    Spdx,
    Date,
    Network,
    Url,
    Unknown,
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Code::Ignored => write!(f, "IGNORED"),
            Code::Value => write!(f, "VALUE"),
            Code::File => write!(f, "FILE"),
            Code::Ascii => write!(f, "ASCII"),
            Code::Spdx => write!(f, "SPDX"),
            Code::Date => write!(f, "DATE"),
            Code::Network => write!(f, "NETWORK"),
            Code::Url => write!(f, "URL"),
            Code::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// A single problem found while reading or validating a metadata file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub code: Code,
    pub field_name: String,
    pub field_value: String,
    pub message: String,
}

impl Message {
    pub fn new(
        code: Code,
        field_name: impl Into<String>,
        field_value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            field_name: field_name.into(),
            field_value: field_value.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.field_name.is_empty() {
            write!(f, "{}: {}", self.code, self.message)
        } else {
            write!(f, "{} {}: {}", self.code, self.field_name, self.message)
        }
    }
}

/// Append-only log of errors and warnings.
///
/// Every pipeline step returns its own `Findings`; callers combine them with
/// [`Findings::extend`] in a fixed order so the final lists are reproducible.
/// A message is pushed to exactly one of the two lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Findings {
    pub errors: Vec<Message>,
    pub warnings: Vec<Message>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, message: Message) {
        self.errors.push(message);
    }

    pub fn warn(&mut self, message: Message) {
        self.warnings.push(message);
    }

    pub fn extend(&mut self, other: Findings) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// A record-level message tagged with the metadata file it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectedMessage {
    pub about_file: String,
    #[serde(flatten)]
    pub message: Message,
}
