use std::collections::HashSet;

use tracing::{debug, debug_span, warn};

use crate::ast::{Field, FuncNode, TypeNode};
use crate::ir::{MethodSignature, Parameter, ReturnSlot, TypeExpr};

/// Lower a type node. Total: shapes the IR does not model become
/// `TypeExpr::Unsupported` and are reported once, here.
pub fn lower_type(node: &TypeNode) -> TypeExpr {
    match node {
        TypeNode::Ident(name) => TypeExpr::named(name.clone()),
        TypeNode::Qualified { package, name } => TypeExpr::qualified(package.clone(), name.clone()),
        TypeNode::Pointer(x) => TypeExpr::Pointer(Box::new(lower_type(x))),
        TypeNode::Slice(x) => TypeExpr::Slice(Box::new(lower_type(x))),
        TypeNode::Ellipsis(x) => TypeExpr::Variadic(Box::new(lower_type(x))),
        TypeNode::Array { len, elem } => TypeExpr::Array {
            len: len.clone(),
            elem: Box::new(lower_type(elem)),
        },
        TypeNode::Map { key, value } => TypeExpr::Map {
            key: Box::new(lower_type(key)),
            value: Box::new(lower_type(value)),
        },
        TypeNode::Chan { dir, elem } => TypeExpr::Chan {
            dir: dir.clone(),
            elem: Box::new(lower_type(elem)),
        },
        TypeNode::Func(func) => lower_func_type(func),
        TypeNode::Generic { base, args } => TypeExpr::Generic {
            base: Box::new(lower_type(base)),
            args: args.iter().map(lower_type).collect(),
        },
        TypeNode::Interface { members } if members.is_empty() => TypeExpr::Open,
        TypeNode::Interface { .. } => unsupported("interface_type"),
        TypeNode::Other { kind } => unsupported(kind),
    }
}

/// Canonical text of a type node; empty for unsupported shapes.
pub fn format_type(node: &TypeNode) -> String {
    lower_type(node).to_string()
}

fn unsupported(kind: &str) -> TypeExpr {
    warn!(kind, "unsupported type expression, rendering an empty type");
    TypeExpr::Unsupported { kind: kind.to_string() }
}

// Function types drop parameter names: `func(a, b int)` is `func(int, int)`.
fn lower_func_type(func: &FuncNode) -> TypeExpr {
    fn flatten(groups: &[Field]) -> Vec<TypeExpr> {
        groups
            .iter()
            .flat_map(|group| {
                let ty = lower_type(&group.ty);
                std::iter::repeat_n(ty, group.names.len().max(1))
            })
            .collect()
    }
    TypeExpr::Func { params: flatten(&func.params), results: flatten(&func.results) }
}

// ————————————————————————————————————————————————————————————————————————————
// METHODS
// ————————————————————————————————————————————————————————————————————————————

/// Extract one interface member. `None` for embedded interfaces (no name)
/// and for members that are not method signatures.
pub fn extract_method(mock: &str, member: &Field) -> Option<MethodSignature> {
    let name = member.names.first()?;
    let TypeNode::Func(func) = &member.ty else {
        debug!(mock, member = %name, "member is not a method, skipping");
        return None;
    };
    let _span = debug_span!("method", mock, method = %name).entered();

    Some(MethodSignature {
        mock: mock.to_string(),
        name: name.clone(),
        params: extract_params(&func.params, &func.results),
        returns: extract_returns(&func.results),
    })
}

/// One `Parameter` per declared name; unnamed groups and `_` get
/// `arg<ordinal>`, counted over all parameters. Synthesized names avoid
/// every declared parameter and result name.
fn extract_params(groups: &[Field], results: &[Field]) -> Vec<Parameter> {
    let declared: HashSet<&str> = groups
        .iter()
        .chain(results)
        .flat_map(|g| g.names.iter().map(String::as_str))
        .filter(|n| *n != "_")
        .collect();

    let mut params = Vec::new();
    for group in groups {
        let ty = lower_type(&group.ty);
        if group.names.is_empty() {
            let ordinal = params.len();
            params.push(Parameter { name: synth_name(ordinal, &declared), ty, ordinal });
            continue;
        }
        for name in &group.names {
            let ordinal = params.len();
            let name = match name.as_str() {
                "_" => synth_name(ordinal, &declared),
                _ => name.clone(),
            };
            params.push(Parameter { name, ty: ty.clone(), ordinal });
        }
    }
    params
}

fn synth_name(ordinal: usize, declared: &HashSet<&str>) -> String {
    let mut name = format!("arg{ordinal}");
    while declared.contains(name.as_str()) {
        name.push('_');
    }
    name
}

fn extract_returns(groups: &[Field]) -> Vec<ReturnSlot> {
    let mut returns = Vec::new();
    for group in groups {
        let ty = lower_type(&group.ty);
        if group.names.is_empty() {
            let ordinal = returns.len();
            returns.push(ReturnSlot { name: String::new(), ty, ordinal });
            continue;
        }
        for name in &group.names {
            let ordinal = returns.len();
            returns.push(ReturnSlot { name: name.clone(), ty: ty.clone(), ordinal });
        }
    }
    returns
}
