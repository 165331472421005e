//! Mock synthesis strategies.
//!
//! A strategy decides what the mock struct holds and how each generated
//! method obtains its results. One strategy is chosen per run.

pub mod handlers;
pub mod recording;

use crate::codegen::Codegen;
use crate::ir::{InterfaceDecl, MethodSignature};

pub use handlers::HandlerQueue;
pub use recording::{ErrorUnwrap, Recording};

/// Import path of the call recorder used by `Recording` and `ErrorUnwrap`.
pub const TESTIFY_MOCK: &str = "github.com/stretchr/testify/mock";

pub trait MockStrategy {
    /// Import paths the generated file needs. Empty means no import block.
    fn imports(&self) -> &'static [&'static str] {
        &[]
    }

    fn render_struct(&self, iface: &InterfaceDecl, cg: &mut Codegen);

    /// Once-per-mock helpers, emitted between the struct and the methods.
    fn render_helpers(&self, _iface: &InterfaceDecl, _cg: &mut Codegen) {}

    fn render_method(&self, iface: &InterfaceDecl, sig: &MethodSignature, cg: &mut Codegen);
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StrategyKind {
    /// per-method FIFO queues of handler funcs
    #[default]
    Handlers,
    /// testify `mock.Mock`, error slots via `Arguments.Error`
    Recording,
    /// testify `mock.Mock` plus a generated `toErr` helper
    ErrorUnwrap,
}

impl StrategyKind {
    pub fn build(self) -> Box<dyn MockStrategy + Send + Sync> {
        match self {
            StrategyKind::Handlers => Box::new(HandlerQueue),
            StrategyKind::Recording => Box::new(Recording),
            StrategyKind::ErrorUnwrap => Box::new(ErrorUnwrap),
        }
    }
}

/// Struct, helpers, then one method per signature, separated by blank lines.
pub fn render_mock(strategy: &dyn MockStrategy, iface: &InterfaceDecl) -> String {
    let mut cg = Codegen::new();
    strategy.render_struct(iface, &mut cg);

    let mut helpers = Codegen::new();
    strategy.render_helpers(iface, &mut helpers);
    let helpers = helpers.into_string();
    if !helpers.is_empty() {
        cg.blank();
        for line in helpers.lines() {
            cg.line(line);
        }
    }

    for sig in &iface.methods {
        cg.blank();
        strategy.render_method(iface, sig, &mut cg);
    }
    cg.into_string()
}

/// `type DBMock struct` or `type StoreMock[K comparable] struct`.
pub(crate) fn struct_header(iface: &InterfaceDecl) -> String {
    format!("type {}{} struct", iface.mock, iface.type_param_list())
}
