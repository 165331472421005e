//! Declaration driver: source units in, one mock per interface out.

use tracing::{debug, info};

use crate::ast::{SourceUnit, TypeDecl, TypeNode};
use crate::ir::{InterfaceDecl, TypeParam};
use crate::lower::extract_method;
use crate::strategy::{MockStrategy, StrategyKind, render_mock};

pub const MOCK_SUFFIX: &str = "Mock";
pub const GENERATED_HEADER: &str = "// Code generated by ifacemock. DO NOT EDIT.";

#[derive(Debug, Clone)]
pub struct Options {
    /// Overrides the package taken from the first source unit.
    pub package: Option<String>,
    /// Generated-code comment, package line and imports.
    pub header: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { package: None, header: true }
    }
}

pub struct Driver {
    strategy: Box<dyn MockStrategy + Send + Sync>,
    options: Options,
}

impl Driver {
    pub fn new(kind: StrategyKind) -> Self {
        Self { strategy: kind.build(), options: Options::default() }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Render every interface of every unit, in encounter order.
    pub fn render(&self, units: &[SourceUnit]) -> String {
        let mut parts = Vec::<String>::new();

        if self.options.header {
            let package = self
                .options
                .package
                .clone()
                .or_else(|| units.iter().find_map(|u| u.package.clone()));
            let mut head = format!("{GENERATED_HEADER}\n");
            if let Some(package) = package {
                head.push_str(&format!("\npackage {package}\n"));
            }
            parts.push(head);

            let imports = self.strategy.imports();
            if !imports.is_empty() {
                let mut block = String::from("import (\n");
                for path in imports {
                    block.push_str(&format!("\t{path:?}\n"));
                }
                block.push_str(")\n");
                parts.push(block);
            }
        }

        for unit in units {
            for iface in collect_interfaces(unit) {
                parts.push(self.render_interface(&iface));
            }
        }

        parts.join("\n")
    }

    pub fn render_interface(&self, iface: &InterfaceDecl) -> String {
        debug!(interface = %iface.name, methods = iface.methods.len(), "rendering mock");
        render_mock(self.strategy.as_ref(), iface)
    }
}

/// Interface-shaped top-level declarations of one unit, in source order.
pub fn collect_interfaces(unit: &SourceUnit) -> Vec<InterfaceDecl> {
    let found = unit.decls.iter().filter_map(lower_interface).collect::<Vec<_>>();
    info!(path = %unit.path.display(), interfaces = found.len(), "scanned source");
    found
}

/// `None` for non-interface declarations and for constraint-only
/// interfaces (type sets such as `~int | ~string`), which cannot be mocked.
pub fn lower_interface(decl: &TypeDecl) -> Option<InterfaceDecl> {
    let TypeNode::Interface { members } = &decl.ty else {
        return None;
    };
    let is_constraint = members
        .iter()
        .any(|m| m.names.is_empty() && matches!(m.ty, TypeNode::Other { .. }));
    if is_constraint {
        debug!(interface = %decl.name, "constraint interface, skipping");
        return None;
    }

    let mock = format!("{}{MOCK_SUFFIX}", decl.name);
    let methods = members
        .iter()
        .filter_map(|member| {
            let sig = extract_method(&mock, member);
            if sig.is_none() {
                debug!(interface = %decl.name, "embedded member skipped");
            }
            sig
        })
        .collect();
    let type_params = decl
        .type_params
        .iter()
        .flat_map(|group| {
            group.names.iter().map(|name| TypeParam {
                name: name.clone(),
                constraint: group.constraint.clone(),
            })
        })
        .collect();

    Some(InterfaceDecl { name: decl.name.clone(), mock, type_params, methods })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Field, FuncNode};

    fn unit(decls: Vec<TypeDecl>) -> SourceUnit {
        SourceUnit { path: "x.go".into(), package: Some("store".into()), decls }
    }

    fn iface(name: &str, members: Vec<Field>) -> TypeDecl {
        TypeDecl { name: name.into(), type_params: vec![], ty: TypeNode::Interface { members } }
    }

    fn method(name: &str) -> Field {
        Field {
            names: vec![name.into()],
            ty: TypeNode::Func(FuncNode { params: vec![], results: vec![] }),
        }
    }

    fn embedded(name: &str) -> Field {
        Field { names: vec![], ty: TypeNode::Ident(name.into()) }
    }

    #[test]
    fn only_interfaces_are_collected_in_encounter_order() {
        let u = unit(vec![
            iface("B", vec![method("Run")]),
            TypeDecl { name: "S".into(), type_params: vec![], ty: TypeNode::other("struct_type") },
            iface("A", vec![]),
        ]);
        let names = collect_interfaces(&u).into_iter().map(|i| i.mock).collect::<Vec<_>>();
        assert_eq!(names, ["BMock", "AMock"]);
    }

    #[test]
    fn embedded_members_are_left_out() {
        let u = unit(vec![iface("RW", vec![method("Read"), embedded("Closer"), method("Write")])]);
        let found = collect_interfaces(&u);
        let methods = found[0].methods.iter().map(|m| m.name.as_str()).collect::<Vec<_>>();
        assert_eq!(methods, ["Read", "Write"]);
        assert!(found[0].methods.iter().all(|m| m.mock == "RWMock"));
    }

    #[test]
    fn alias_declared_interfaces_are_mocked() {
        let src = "package p\n\ntype A = interface {\n\tM() error\n}\n";
        let unit = crate::parse::parse_source("alias.go", src).unwrap();
        let found = collect_interfaces(&unit);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].mock, "AMock");
        assert_eq!(found[0].methods[0].name, "M");
    }

    #[test]
    fn constraint_interfaces_are_not_mocked() {
        let union = Field { names: vec![], ty: TypeNode::other("union_type") };
        let number = iface("Number", vec![union]);
        assert!(lower_interface(&number).is_none());
    }

    #[test]
    fn header_package_and_imports_precede_the_mocks() {
        let u = unit(vec![iface("A", vec![method("Run")])]);
        let out = Driver::new(StrategyKind::Recording).render(&[u]);
        let imports = "import (\n\t\"github.com/stretchr/testify/mock\"\n)\n";
        let want = format!("{GENERATED_HEADER}\n\npackage store\n\n{imports}\n// AMock is");
        assert!(out.starts_with(&want), "{out}");
    }

    #[test]
    fn package_override_and_header_switch() {
        let u = unit(vec![iface("A", vec![])]);
        let renamed = Driver::new(StrategyKind::Handlers)
            .with_options(Options { package: Some("mocks".into()), header: true })
            .render(std::slice::from_ref(&u));
        assert!(renamed.contains("\npackage mocks\n\nimport (\n\t\"testing\"\n)\n"));

        let bare = Driver::new(StrategyKind::Recording)
            .with_options(Options { package: None, header: false })
            .render(&[u]);
        assert!(bare.starts_with("// AMock is a recording mock of A."));
    }

    #[test]
    fn mocks_are_separated_by_one_blank_line() {
        let u = unit(vec![iface("A", vec![]), iface("B", vec![])]);
        let out = Driver::new(StrategyKind::Recording)
            .with_options(Options { package: None, header: false })
            .render(&[u]);
        assert!(out.contains("mock.Mock\n}\n\n// BMock is"));
    }
}
