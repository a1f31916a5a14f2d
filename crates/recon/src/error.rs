use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad threshold, empty alias list, etc.).
    ConfigValidation(String),
    /// A required column could not be resolved from any known alias.
    MissingColumn { source: String, column: String },
    /// Report serialization error.
    Render(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { source, column } => {
                write!(f, "'{source}': cannot resolve required {column} column")
            }
            Self::Render(msg) => write!(f, "report render error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
