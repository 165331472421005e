//! Minimal CLI: Go interfaces → (mocks | signatures)
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::driver::{Driver, Options, collect_interfaces};
use crate::ir::InterfaceDecl;
use crate::strategy::StrategyKind;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate Go test mocks for every interface declared in a package directory
#[derive(Parser, Debug)]
#[command(name = "ifacemock", version)]
pub struct CommandLineInterface {
    /// package directory (its *.go files are scanned) or a single .go file
    #[arg(default_value = ".")]
    path: PathBuf,

    /// how generated methods obtain their results
    #[arg(long, short, value_enum, default_value_t = StrategyKind::Handlers)]
    strategy: StrategyKind,

    /// package name for the generated file (defaults to the scanned package)
    #[arg(long)]
    package: Option<String>,

    /// omit the generated-code comment, package line and imports
    #[arg(long, default_value_t = false)]
    no_header: bool,

    /// output .go file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// print the extracted interfaces as JSON instead of generating mocks
    #[arg(long, default_value_t = false)]
    signatures: bool,

    /// debug logging (RUST_LOG takes precedence)
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn options(&self) -> Options {
        Options { package: self.package.clone(), header: !self.no_header }
    }

    /// Everything is parsed before anything is written, so a failure
    /// leaves no partial output behind.
    pub fn run(&self) -> Result<()> {
        let paths = crate::discover::discover(&self.path)
            .with_context(|| format!("no sources to scan at {}", self.path.display()))?;
        let units = crate::discover::load_sources(&paths).context("failed to parse sources")?;

        let rendered = if self.signatures {
            let interfaces =
                units.iter().flat_map(collect_interfaces).collect::<Vec<InterfaceDecl>>();
            let mut json = serde_json::to_string_pretty(&interfaces)?;
            json.push('\n');
            json
        } else {
            Driver::new(self.strategy).with_options(self.options()).render(&units)
        };

        match self.out.as_ref() {
            Some(out) => {
                if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("failed to create {}", parent.display()))?;
                }
                std::fs::write(out, &rendered)
                    .with_context(|| format!("failed to write {}", out.display()))?;
                info!(out = %out.display(), strategy = ?self.strategy, "mocks written");
            }
            None => print!("{rendered}"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_the_current_directory_and_handler_queues() {
        let cli = CommandLineInterface::try_parse_from(["ifacemock"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("."));
        assert_eq!(cli.strategy, StrategyKind::Handlers);
        assert!(cli.options().header);
    }

    #[test]
    fn strategy_names_are_kebab_case() {
        let args = ["ifacemock", "-s", "error-unwrap", "--no-header", "pkg"];
        let cli = CommandLineInterface::try_parse_from(args).unwrap();
        assert_eq!(cli.strategy, StrategyKind::ErrorUnwrap);
        assert_eq!(cli.path, PathBuf::from("pkg"));
        assert!(!cli.options().header);
    }

    #[test]
    fn unknown_strategies_are_rejected() {
        let args = ["ifacemock", "--strategy", "magic"];
        assert!(CommandLineInterface::try_parse_from(args).is_err());
    }

    #[test]
    fn writes_mocks_to_the_out_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = "package db\n\ntype Pinger interface {\n\tPing() error\n}\n";
        std::fs::write(dir.path().join("db.go"), src).unwrap();
        let out = dir.path().join("mocks").join("db_mock.go");
        let args: Vec<std::ffi::OsString> =
            vec!["ifacemock".into(), dir.path().into(), "--out".into(), out.clone().into()];
        let cli = CommandLineInterface::try_parse_from(args).unwrap();
        cli.run().unwrap();
        let written = std::fs::read_to_string(out).unwrap();
        assert!(written.contains("type PingerMock struct {"));
        assert!(written.contains("\npackage db\n"));
    }
}
