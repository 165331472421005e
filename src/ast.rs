// Generic declaration tree handed to the engine. No tree-sitter types here.
//
// Only the parts of a Go file the generator looks at are modelled: the
// package clause and top-level type declarations. Type nodes keep enough
// structure for the formatter; anything else collapses into `Other`.

use std::path::PathBuf;

/// One parsed source file.
#[derive(Debug, Clone, Default)]
pub struct SourceUnit {
    pub path: PathBuf,
    pub package: Option<String>,
    pub decls: Vec<TypeDecl>, // top-level `type` specs, in source order
}

/// `type Name[TypeParams] Type`
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub name: String,
    pub type_params: Vec<TypeParamNode>,
    pub ty: TypeNode,
}

#[derive(Debug, Clone)]
pub struct TypeParamNode {
    pub names: Vec<String>,
    pub constraint: String, // verbatim source text
}

/// A named or anonymous group: `a, b int`, `int`, `Method(x int) error`,
/// or an embedded interface.
#[derive(Debug, Clone)]
pub struct Field {
    pub names: Vec<String>,
    pub ty: TypeNode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

#[derive(Debug, Clone)]
pub struct FuncNode {
    pub params: Vec<Field>,
    pub results: Vec<Field>,
}

#[derive(Debug, Clone)]
pub enum TypeNode {
    Ident(String),
    Qualified { package: String, name: String },
    Pointer(Box<TypeNode>),
    Slice(Box<TypeNode>),
    Array { len: String, elem: Box<TypeNode> },
    Map { key: Box<TypeNode>, value: Box<TypeNode> },
    Chan { dir: ChanDir, elem: Box<TypeNode> },
    Func(FuncNode),
    /// Trailing `...T` of a parameter list.
    Ellipsis(Box<TypeNode>),
    Generic { base: Box<TypeNode>, args: Vec<TypeNode> },
    Interface { members: Vec<Field> },
    /// Node kinds the tree does not model (struct literals, unions, ...).
    Other { kind: String },
}

impl TypeNode {
    pub fn other(kind: impl Into<String>) -> Self {
        TypeNode::Other { kind: kind.into() }
    }
}
