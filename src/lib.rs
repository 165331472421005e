//! Go interface → test mock generator.
//!
//! - `parse` lowers Go source (tree-sitter) into the generic `ast`.
//! - `lower` extracts typed method signatures (`ir`) from interface members.
//! - `strategy` renders one mock per interface through `codegen`.
//! - `driver` walks source units and stitches the output file together.

pub mod ast;
pub mod cli;
pub mod codegen;
pub mod discover;
pub mod driver;
pub mod error;
pub mod ir;
pub mod lower;
pub mod parse;
pub mod strategy;

pub use driver::{Driver, Options};
pub use error::{Error, Result};
pub use strategy::StrategyKind;

use tracing_subscriber::EnvFilter;

/// Log to stderr. `RUST_LOG` wins over the built-in default.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "ifacemock=debug" } else { "ifacemock=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Discover, parse and render in one call.
pub fn generate(root: &std::path::Path, kind: StrategyKind, options: Options) -> Result<String> {
    let paths = discover::discover(root)?;
    let units = discover::load_sources(&paths)?;
    Ok(Driver::new(kind).with_options(options).render(&units))
}
