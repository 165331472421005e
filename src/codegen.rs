//! Text builder for generated Go, plus the signature renderers every
//! strategy shares.
//!
//! Output is gofmt-shaped: tab indentation, one blank line between
//! top-level declarations.

use std::collections::HashSet;

use crate::ir::{InterfaceDecl, MethodSignature};

#[derive(Debug, Default)]
pub struct Codegen {
    out: String,
    depth: usize,
}

impl Codegen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push('\t');
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// `open {`, the indented body, then `}`.
    pub fn block(&mut self, open: impl AsRef<str>, body: impl FnOnce(&mut Self)) {
        self.line(format!("{} {{", open.as_ref()));
        self.depth += 1;
        body(self);
        self.depth -= 1;
        self.line("}");
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

// ————————————————————————————————————————————————————————————————————————————
// SIGNATURES
// ————————————————————————————————————————————————————————————————————————————

/// `(ctx context.Context, id int) (*User, error)`
pub fn signature(sig: &MethodSignature) -> String {
    let params = sig
        .params
        .iter()
        .map(|p| format!("{} {}", p.name, p.ty))
        .collect::<Vec<_>>()
        .join(", ");
    format!("({params}){}", results(sig))
}

// Leading space included; empty when there are no results.
fn results(sig: &MethodSignature) -> String {
    match sig.returns.as_slice() {
        [] => String::new(),
        [only] if only.name.is_empty() => format!(" {}", only.ty),
        slots => {
            let items = slots
                .iter()
                .map(|r| match r.name.is_empty() {
                    true => r.ty.to_string(),
                    false => format!("{} {}", r.name, r.ty),
                })
                .collect::<Vec<_>>();
            format!(" ({})", items.join(", "))
        }
    }
}

/// Arguments for a direct call: a variadic last parameter is spread with `...`.
pub fn call_args(sig: &MethodSignature) -> String {
    sig.params
        .iter()
        .map(|p| match p.ty.is_variadic() {
            true => format!("{}...", p.name),
            false => p.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Arguments as plain values, in declaration order.
pub fn value_args(sig: &MethodSignature) -> Vec<&str> {
    sig.params.iter().map(|p| p.name.as_str()).collect()
}

/// `*DBMock` or `*StoreMock[K, V]`.
pub fn receiver_type(iface: &InterfaceDecl) -> String {
    format!("*{}{}", iface.mock, iface.type_arg_list())
}

/// Identifiers a generated method body introduces, renamed away from
/// the method's parameter and named result names.
#[derive(Debug, Clone)]
pub struct Locals {
    pub recv: String,
    pub ret: String,
    pub handler: String,
}

impl Locals {
    pub fn for_method(sig: &MethodSignature) -> Self {
        let taken = sig
            .params
            .iter()
            .map(|p| p.name.as_str())
            .chain(sig.returns.iter().map(|r| r.name.as_str()))
            .filter(|name| !name.is_empty())
            .collect::<HashSet<_>>();
        Self {
            recv: fresh("m", &taken),
            ret: fresh("ret", &taken),
            handler: fresh("f", &taken),
        }
    }
}

fn fresh(base: &str, taken: &HashSet<&str>) -> String {
    let mut name = base.to_string();
    while taken.contains(name.as_str()) {
        name.insert(0, '_');
    }
    name
}
