use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the preference store, config layer and CLI parsing.
#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown theme '{0}' (expected one of: light, dark, green, yellow, maroon)")]
    UnknownTheme(String),

    #[error("unknown status '{0}'")]
    UnknownStatus(String),

    #[error("unknown compliance class '{0}'")]
    UnknownCompliance(String),

    #[error("unknown listing '{0}' (expected airlines, airports, cities or flights)")]
    UnknownListing(String),

    #[error("could not find a config directory")]
    ConfigDir,

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    TomlDe {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize preferences: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
