use crate::domain::{MemberId, ProjectId};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using ProjectPro's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the edges of the app. Store, session and timer
/// operations themselves never fail.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not access config file {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file {path} is not valid JSON: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not serialize config for {path}: {source}")]
    ConfigSerialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not determine a data directory (no home directory found)")]
    NoDataDir,

    #[error("Invalid date '{0}'. Use YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("Project {0} does not exist")]
    UnknownProject(ProjectId),

    #[error("Assignee {0} is not a member of any project")]
    UnknownAssignee(MemberId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::InvalidDate("2024-13-01".to_string()).to_string(),
            "Invalid date '2024-13-01'. Use YYYY-MM-DD."
        );
        assert_eq!(Error::UnknownProject(9).to_string(), "Project 9 does not exist");
        assert_eq!(
            Error::UnknownAssignee(4).to_string(),
            "Assignee 4 is not a member of any project"
        );
    }

    #[test]
    fn test_serialize_error_is_not_a_parse_error() {
        let source = serde_json::from_str::<u8>("x").unwrap_err();
        let err = Error::ConfigSerialize {
            path: PathBuf::from("config.json"),
            source,
        };
        assert!(err.to_string().starts_with("Could not serialize config for config.json"));
    }
}
