//! Start-up errors. Navigation and animation never fail; only loading a
//! script or config, or driving the terminal, can.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ScriptError {
    #[error("Failed to read script {}", path.display())]
    #[diagnostic(code("SHOWCASE::SCRIPT_IO"), help("Check that the file exists and is readable"))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse script from {origin}")]
    #[diagnostic(
        code("SHOWCASE::SCRIPT_PARSE"),
        help("Scripts are TOML: a `title` plus one [[steps]] table per step")
    )]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Script '{title}' has no steps")]
    #[diagnostic(code("SHOWCASE::SCRIPT_EMPTY"), help("Add at least one [[steps]] entry"))]
    Empty { title: String },

    #[error("Step at position {index} has id {id}")]
    #[diagnostic(
        code("SHOWCASE::SCRIPT_ID"),
        help("Step ids must count up from 0 in file order")
    )]
    IdMismatch { index: usize, id: usize },
}

/// A config file exists but cannot be used. Start-up continues on defaults.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    #[diagnostic(code("SHOWCASE::CONFIG_IO"))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    #[diagnostic(
        code("SHOWCASE::CONFIG_PARSE"),
        help("Every section and key is optional; remove the bad entry to fall back")
    )]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level error returned by `main`.
#[derive(Debug, Error, Diagnostic)]
pub enum ShowcaseError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Script(#[from] ScriptError),

    #[error("Terminal I/O failed")]
    #[diagnostic(code("SHOWCASE::TERMINAL"))]
    Terminal(#[from] io::Error),
}
