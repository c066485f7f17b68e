//! Error types for husk-submit
//!
//! Library code returns `HuskResult`; the binary wraps these in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for husk-submit operations
pub type HuskResult<T> = Result<T, HuskError>;

/// Main error type for husk-submit operations
#[derive(Error, Debug)]
pub enum HuskError {
    /// Scene file passed on the command line does not exist
    #[error("USD file doesn't exist: {path}")]
    SceneFileNotFound { path: PathBuf },

    /// None of the configured renderer executables exist
    #[error("renderer executable not found (searched: {searched})")]
    ExecutableNotFound { searched: String },

    /// usdcat was not found next to the renderer
    #[error("usdcat binary not found at {path}")]
    UsdcatNotFound { path: PathBuf },

    /// The dump utility could not be started or exited with failure
    #[error("{tool} failed on {file}: {message}")]
    DumpFailed {
        tool: String,
        file: PathBuf,
        message: String,
    },

    /// Frame range text could not be parsed
    #[error("invalid frame range '{value}': {reason}")]
    InvalidFrameRange { value: String, reason: String },

    /// A combo option was given a value outside its choices
    #[error("invalid value '{value}' for {option} (expected one of: {choices})")]
    InvalidChoice {
        option: String,
        value: String,
        choices: String,
    },

    /// An integer option outside its allowed range
    #[error("value {value} for {option} is out of range ({min}..={max})")]
    OutOfRange {
        option: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Invalid TOML configuration
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Plugin info file is missing a required key
    #[error("missing '{key}' in plugin info {file}")]
    MissingPluginInfo { key: String, file: PathBuf },

    /// deadlinecommand could not be run
    #[error("deadlinecommand failed: {message}")]
    FarmCommand { message: String },

    /// The renderer reported an error or exited with failure
    #[error("render failed: {message}")]
    RenderFailed { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_scene_not_found() {
        let err = HuskError::SceneFileNotFound {
            path: PathBuf::from("shots/sh010.usd"),
        };
        assert_eq!(err.to_string(), "USD file doesn't exist: shots/sh010.usd");
    }

    #[test]
    fn test_error_display_invalid_choice() {
        let err = HuskError::InvalidChoice {
            option: "--headlight".to_string(),
            value: "Spot".to_string(),
            choices: "None, Distant, Dome".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value 'Spot' for --headlight (expected one of: None, Distant, Dome)"
        );
    }
}
