use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("`{command}` exited with {status}")]
    CommandFailed { command: String, status: String },

    #[error("could not parse `{input}` from {source_name}")]
    Parse {
        source_name: &'static str,
        input: String,
    },

    #[error("battery backend error: {0}")]
    Battery(#[from] starship_battery::Error),

    #[error("no usable hardware information: {0}")]
    NoHardware(&'static str),
}

pub type Result<T> = std::result::Result<T, PlatformError>;
