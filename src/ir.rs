// Strongly-typed IR for codegen. No tree-sitter or ast nodes here.

use std::fmt;

use serde::{Serialize, Serializer};

pub use crate::ast::ChanDir;

/// Canonical type expression. `Display` renders Go syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Named { package: Option<String>, name: String },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    Array { len: String, elem: Box<TypeExpr> },
    Map { key: Box<TypeExpr>, value: Box<TypeExpr> },
    Open,                    // interface{}
    Variadic(Box<TypeExpr>), // only valid as the last parameter
    Chan { dir: ChanDir, elem: Box<TypeExpr> },
    Func { params: Vec<TypeExpr>, results: Vec<TypeExpr> },
    Generic { base: Box<TypeExpr>, args: Vec<TypeExpr> },
    /// Renders as the empty string. `kind` names the node that was not understood.
    Unsupported { kind: String },
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named { package: None, name: name.into() }
    }

    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeExpr::Named { package: Some(package.into()), name: name.into() }
    }

    /// The literal `error` token. Aliased or renamed error types do not match.
    pub fn is_error(&self) -> bool {
        matches!(self, TypeExpr::Named { package: None, name } if name == "error")
    }

    pub fn is_variadic(&self) -> bool {
        matches!(self, TypeExpr::Variadic(_))
    }

    /// True if this node or any node below it is `Unsupported`.
    pub fn has_unsupported(&self) -> bool {
        match self {
            TypeExpr::Unsupported { .. } => true,
            TypeExpr::Named { .. } | TypeExpr::Open => false,
            TypeExpr::Pointer(x) | TypeExpr::Slice(x) | TypeExpr::Variadic(x) => {
                x.has_unsupported()
            }
            TypeExpr::Array { elem, .. } | TypeExpr::Chan { elem, .. } => elem.has_unsupported(),
            TypeExpr::Map { key, value } => key.has_unsupported() || value.has_unsupported(),
            TypeExpr::Func { params, results } => {
                params.iter().chain(results).any(TypeExpr::has_unsupported)
            }
            TypeExpr::Generic { base, args } => {
                base.has_unsupported() || args.iter().any(TypeExpr::has_unsupported)
            }
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named { package: Some(pkg), name } => write!(f, "{pkg}.{name}"),
            TypeExpr::Named { package: None, name } => f.write_str(name),
            TypeExpr::Pointer(x) => write!(f, "*{x}"),
            TypeExpr::Slice(x) => write!(f, "[]{x}"),
            TypeExpr::Array { len, elem } => write!(f, "[{len}]{elem}"),
            TypeExpr::Map { key, value } => write!(f, "map[{key}]{value}"),
            TypeExpr::Open => f.write_str("interface{}"),
            TypeExpr::Variadic(x) => write!(f, "...{x}"),
            TypeExpr::Chan { dir, elem } => match dir {
                // `chan <-chan T` would re-parse as `chan<- chan T`
                ChanDir::Both if matches!(**elem, TypeExpr::Chan { dir: ChanDir::Recv, .. }) => {
                    write!(f, "chan ({elem})")
                }
                ChanDir::Both => write!(f, "chan {elem}"),
                ChanDir::Send => write!(f, "chan<- {elem}"),
                ChanDir::Recv => write!(f, "<-chan {elem}"),
            },
            TypeExpr::Func { params, results } => {
                write!(f, "func({})", join(params))?;
                match results.as_slice() {
                    [] => Ok(()),
                    [single] => write!(f, " {single}"),
                    many => write!(f, " ({})", join(many)),
                }
            }
            TypeExpr::Generic { base, args } => write!(f, "{base}[{}]", join(args)),
            TypeExpr::Unsupported { .. } => Ok(()),
        }
    }
}

impl Serialize for TypeExpr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn join(types: &[TypeExpr]) -> String {
    types.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

// ————————————————————————————————————————————————————————————————————————————
// SIGNATURES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String, // declared, or `arg<ordinal>`
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    pub ordinal: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReturnSlot {
    pub name: String, // empty when undeclared
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    pub ordinal: usize,
}

impl ReturnSlot {
    pub fn is_error(&self) -> bool {
        self.ty.is_error()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodSignature {
    pub mock: String,
    pub name: String,
    pub params: Vec<Parameter>,
    pub returns: Vec<ReturnSlot>,
}

impl MethodSignature {
    pub fn has_unsupported(&self) -> bool {
        self.params.iter().any(|p| p.ty.has_unsupported())
            || self.returns.iter().any(|r| r.ty.has_unsupported())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeParam {
    pub name: String,
    pub constraint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceDecl {
    pub name: String,
    pub mock: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<TypeParam>,
    pub methods: Vec<MethodSignature>,
}

impl InterfaceDecl {
    /// `[K comparable, V any]`, or empty for non-generic interfaces.
    pub fn type_param_list(&self) -> String {
        if self.type_params.is_empty() {
            return String::new();
        }
        let items = self
            .type_params
            .iter()
            .map(|p| format!("{} {}", p.name, p.constraint))
            .collect::<Vec<_>>();
        format!("[{}]", items.join(", "))
    }

    /// `[K, V]`, or empty for non-generic interfaces.
    pub fn type_arg_list(&self) -> String {
        if self.type_params.is_empty() {
            return String::new();
        }
        let names = self.type_params.iter().map(|p| p.name.as_str()).collect::<Vec<_>>();
        format!("[{}]", names.join(", "))
    }
}
