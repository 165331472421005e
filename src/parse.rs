//! Go source -> `ast::SourceUnit`, via the tree-sitter Go grammar.
//!
//! Only top-level `type` declarations are converted. A file with any syntax
//! error is rejected as a whole; tree-sitter recovers from errors, but a
//! recovered tree would produce mocks for declarations that do not exist.

use std::path::{Path, PathBuf};

use tree_sitter::{Node, Parser};

use crate::ast::{ChanDir, Field, FuncNode, SourceUnit, TypeDecl, TypeNode, TypeParamNode};
use crate::error::{Error, Result};

/// Parse one Go source file held in memory.
pub fn parse_source(path: impl Into<PathBuf>, source: &str) -> Result<SourceUnit> {
    let path = path.into();
    let mut parser = Parser::new();
    let language: tree_sitter::Language = tree_sitter_go::LANGUAGE.into();
    parser.set_language(&language)?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| Error::NoTree(path.clone()))?;
    let root = tree.root_node();

    if root.has_error() {
        return Err(syntax_error(&path, root, source));
    }

    let cx = Cx { src: source.as_bytes() };
    let mut unit = SourceUnit { path, ..SourceUnit::default() };

    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        match child.kind() {
            "package_clause" => {
                unit.package = first_named(child).map(|n| cx.text(n).to_string());
            }
            "type_declaration" => {
                let mut inner = child.walk();
                for spec in child.named_children(&mut inner) {
                    // `type A = B` shares the `name`/`type` fields of `type A B`
                    if matches!(spec.kind(), "type_spec" | "type_alias") {
                        unit.decls.push(cx.type_spec(spec));
                    }
                }
            }
            _ => {}
        }
    }

    Ok(unit)
}

/// Read and parse a file from disk.
pub fn parse_file(path: &Path) -> Result<SourceUnit> {
    let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_source(path, &source)
}

fn syntax_error(path: &Path, root: Node, source: &str) -> Error {
    let bad = first_error(root).unwrap_or(root);
    let pos = bad.start_position();
    let line_text = source.lines().nth(pos.row).unwrap_or_default().trim();
    let snippet: String = line_text.chars().take(40).collect();
    Error::Syntax {
        path: path.to_path_buf(),
        line: pos.row + 1,
        column: pos.column + 1,
        snippet,
    }
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children = node.children(&mut cursor).collect::<Vec<_>>();
    children.into_iter().filter(|c| c.has_error() || c.is_missing()).find_map(first_error)
}

fn first_named(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    let first = node.named_children(&mut cursor).find(|c| c.kind() != "comment");
    first
}

// ————————————————————————————————————————————————————————————————————————————
// CONVERSION
// ————————————————————————————————————————————————————————————————————————————

struct Cx<'s> {
    src: &'s [u8],
}

impl<'s> Cx<'s> {
    fn text(&self, node: Node) -> &'s str {
        node.utf8_text(self.src).unwrap_or_default()
    }

    fn type_spec(&self, spec: Node) -> TypeDecl {
        let name = spec
            .child_by_field_name("name")
            .map(|n| self.text(n).to_string())
            .unwrap_or_default();
        let type_params = spec
            .child_by_field_name("type_parameters")
            .map(|list| self.type_params(list))
            .unwrap_or_default();
        let ty = match spec.child_by_field_name("type") {
            Some(node) => self.type_node(node),
            None => TypeNode::other("missing_type"),
        };
        TypeDecl { name, type_params, ty }
    }

    fn type_params(&self, list: Node) -> Vec<TypeParamNode> {
        let mut cursor = list.walk();
        let decls = list.named_children(&mut cursor).collect::<Vec<_>>();
        decls
            .into_iter()
            .filter(|n| n.kind() == "type_parameter_declaration")
            .map(|decl| {
                let mut names_cursor = decl.walk();
                let names = decl
                    .children_by_field_name("name", &mut names_cursor)
                    .map(|n| self.text(n).to_string())
                    .collect();
                let constraint = decl
                    .child_by_field_name("type")
                    .map(|n| self.text(n).to_string())
                    .unwrap_or_default();
                TypeParamNode { names, constraint }
            })
            .collect()
    }

    fn type_node(&self, node: Node) -> TypeNode {
        match node.kind() {
            "type_identifier" | "identifier" => TypeNode::Ident(self.text(node).to_string()),
            "qualified_type" => {
                let field = |name: &str| {
                    node.child_by_field_name(name)
                        .map(|n| self.text(n).to_string())
                        .unwrap_or_default()
                };
                TypeNode::Qualified { package: field("package"), name: field("name") }
            }
            "pointer_type" => self.wrap(node, TypeNode::Pointer),
            "parenthesized_type" => match first_named(node) {
                Some(inner) => self.type_node(inner),
                None => TypeNode::other(node.kind()),
            },
            "slice_type" => match node.child_by_field_name("element") {
                Some(elem) => TypeNode::Slice(Box::new(self.type_node(elem))),
                None => TypeNode::other(node.kind()),
            },
            "array_type" => {
                let len = node.child_by_field_name("length");
                let elem = node.child_by_field_name("element");
                match (len, elem) {
                    (Some(len), Some(elem)) => TypeNode::Array {
                        len: self.text(len).to_string(),
                        elem: Box::new(self.type_node(elem)),
                    },
                    _ => TypeNode::other(node.kind()),
                }
            }
            "map_type" => {
                match (node.child_by_field_name("key"), node.child_by_field_name("value")) {
                    (Some(key), Some(value)) => TypeNode::Map {
                        key: Box::new(self.type_node(key)),
                        value: Box::new(self.type_node(value)),
                    },
                    _ => TypeNode::other(node.kind()),
                }
            }
            "channel_type" => self.channel(node),
            "function_type" => TypeNode::Func(self.func(node)),
            "generic_type" => self.generic(node),
            "interface_type" => TypeNode::Interface { members: self.interface_members(node) },
            // `type_elem` wraps a single type inside type argument lists
            "type_elem" => {
                let mut cursor = node.walk();
                let inner = node
                    .named_children(&mut cursor)
                    .filter(|c| c.kind() != "comment")
                    .collect::<Vec<_>>();
                match inner.as_slice() {
                    [single] => self.type_node(*single),
                    _ => TypeNode::other("union_type"),
                }
            }
            other => TypeNode::other(other),
        }
    }

    fn wrap(&self, node: Node, f: fn(Box<TypeNode>) -> TypeNode) -> TypeNode {
        match first_named(node) {
            Some(inner) => f(Box::new(self.type_node(inner))),
            None => TypeNode::other(node.kind()),
        }
    }

    fn channel(&self, node: Node) -> TypeNode {
        let Some(value) = node.child_by_field_name("value") else {
            return TypeNode::other(node.kind());
        };
        // `<-chan T` starts with the arrow; `chan<- T` has it second.
        let tokens = (0..node.child_count().min(2))
            .filter_map(|i| node.child(i))
            .map(|c| c.kind())
            .collect::<Vec<_>>();
        let dir = match tokens.as_slice() {
            ["<-", ..] => ChanDir::Recv,
            ["chan", "<-"] => ChanDir::Send,
            _ => ChanDir::Both,
        };
        TypeNode::Chan { dir, elem: Box::new(self.type_node(value)) }
    }

    fn generic(&self, node: Node) -> TypeNode {
        let Some(base) = node.child_by_field_name("type") else {
            return TypeNode::other(node.kind());
        };
        let args = match node.child_by_field_name("type_arguments") {
            Some(list) => {
                let mut cursor = list.walk();
                let args = list
                    .named_children(&mut cursor)
                    .filter(|c| c.kind() != "comment")
                    .map(|c| self.type_node(c))
                    .collect::<Vec<_>>();
                args
            }
            None => Vec::new(),
        };
        TypeNode::Generic { base: Box::new(self.type_node(base)), args }
    }

    /// Shared by `function_type` and `method_elem`; both carry
    /// `parameters` and an optional `result` field.
    fn func(&self, node: Node) -> FuncNode {
        let params = node
            .child_by_field_name("parameters")
            .map(|list| self.parameter_list(list))
            .unwrap_or_default();
        let results = match node.child_by_field_name("result") {
            Some(result) if result.kind() == "parameter_list" => self.parameter_list(result),
            Some(result) => vec![Field { names: Vec::new(), ty: self.type_node(result) }],
            None => Vec::new(),
        };
        FuncNode { params, results }
    }

    fn parameter_list(&self, list: Node) -> Vec<Field> {
        let mut cursor = list.walk();
        let decls = list.named_children(&mut cursor).collect::<Vec<_>>();
        decls
            .into_iter()
            .filter_map(|decl| {
                let ty = decl.child_by_field_name("type")?;
                let mut names_cursor = decl.walk();
                let names = decl
                    .children_by_field_name("name", &mut names_cursor)
                    .map(|n| self.text(n).to_string())
                    .collect();
                let ty = match decl.kind() {
                    "variadic_parameter_declaration" => {
                        TypeNode::Ellipsis(Box::new(self.type_node(ty)))
                    }
                    "parameter_declaration" => self.type_node(ty),
                    _ => return None,
                };
                Some(Field { names, ty })
            })
            .collect()
    }

    fn interface_members(&self, node: Node) -> Vec<Field> {
        let mut cursor = node.walk();
        let members = node.named_children(&mut cursor).collect::<Vec<_>>();
        members
            .into_iter()
            .filter_map(|member| match member.kind() {
                // older grammar releases call it `method_spec`
                "method_elem" | "method_spec" => {
                    let name = member.child_by_field_name("name")?;
                    Some(Field {
                        names: vec![self.text(name).to_string()],
                        ty: TypeNode::Func(self.func(member)),
                    })
                }
                "comment" => None,
                _ => Some(Field { names: Vec::new(), ty: self.type_node(member) }),
            })
            .collect()
    }
}
