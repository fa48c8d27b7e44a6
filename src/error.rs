use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("cannot read keyword file {}", path.display())]
    KeywordsUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no keyword entries found under section '{0}'")]
    EmptySection(String),

    #[error("could not open browser: no URL opener could be started")]
    NoOpener,

    #[error("cannot read config file {}", path.display())]
    ConfigUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {}", path.display())]
    ConfigInvalid {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
