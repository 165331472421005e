//! Source discovery: the `.go` files of one directory (not recursive), or a
//! single file. Files are returned sorted so output order is stable.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;

use crate::ast::SourceUnit;
use crate::error::{Error, Result};
use crate::parse::parse_file;

pub fn discover(root: &Path) -> Result<Vec<PathBuf>> {
    let meta = std::fs::metadata(root).map_err(|source| Error::Io {
        path: root.to_path_buf(),
        source,
    })?;
    if meta.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let pattern = format!("{}/*.go", glob::Pattern::escape(&root.to_string_lossy()));
    let mut out = Vec::<PathBuf>::new();
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        if path.is_file() {
            out.push(path);
        }
    }
    if out.is_empty() {
        return Err(Error::NoSources(root.to_path_buf()));
    }
    out.sort();
    debug!(root = %root.display(), files = out.len(), "discovered sources");
    Ok(out)
}

/// Parse every file. Any failure aborts the whole load; order follows `paths`.
pub fn load_sources(paths: &[PathBuf]) -> Result<Vec<SourceUnit>> {
    paths.par_iter().map(|path| parse_file(path)).collect()
}
