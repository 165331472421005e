//! Error types for source discovery and parsing.
//!
//! Everything here is fatal for a run. Non-fatal conditions (an unsupported
//! type shape, an embedded interface member) are logged and never reach
//! this type.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid source pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("failed to list sources: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("no Go source files found under {}", .0.display())]
    NoSources(PathBuf),

    #[error("{}:{line}:{column}: syntax error near `{snippet}`", .path.display())]
    Syntax {
        path: PathBuf,
        line: usize,
        column: usize,
        snippet: String,
    },

    #[error("failed to load Go grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("{}: parser produced no tree", .0.display())]
    NoTree(PathBuf),
}
