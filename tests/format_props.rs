use ifacemock::driver::collect_interfaces;
use ifacemock::ir::{ChanDir, TypeExpr};
use ifacemock::parse::parse_source;
use proptest::prelude::*;

fn leaf() -> impl Strategy<Value = TypeExpr> {
    prop_oneof![
        prop::sample::select(vec!["int", "string", "error", "any", "User"])
            .prop_map(TypeExpr::named),
        prop::sample::select(vec![("io", "Reader"), ("time", "Duration"), ("context", "Context")])
            .prop_map(|(pkg, name)| TypeExpr::qualified(pkg, name)),
        Just(TypeExpr::Open),
    ]
}

fn chan_dir() -> impl Strategy<Value = ChanDir> {
    prop_oneof![Just(ChanDir::Both), Just(ChanDir::Send), Just(ChanDir::Recv)]
}

fn type_expr() -> impl Strategy<Value = TypeExpr> {
    leaf().prop_recursive(4, 24, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(|t| TypeExpr::Pointer(Box::new(t))),
            inner.clone().prop_map(|t| TypeExpr::Slice(Box::new(t))),
            inner.clone().prop_map(|t| TypeExpr::Array { len: "4".into(), elem: Box::new(t) }),
            (inner.clone(), inner.clone())
                .prop_map(|(k, v)| TypeExpr::Map { key: Box::new(k), value: Box::new(v) }),
            (chan_dir(), inner.clone())
                .prop_map(|(dir, elem)| TypeExpr::Chan { dir, elem: Box::new(elem) }),
            (prop::sample::select(vec!["List", "Pair"]), prop::collection::vec(inner.clone(), 1..3))
                .prop_map(|(base, args)| TypeExpr::Generic {
                    base: Box::new(TypeExpr::named(base)),
                    args,
                }),
            (prop::collection::vec(inner.clone(), 0..3), prop::collection::vec(inner, 0..3))
                .prop_map(|(params, results)| TypeExpr::Func { params, results }),
        ]
    })
}

/// Render, embed as a parameter and a result, parse back, render again.
fn reparse(ty: &TypeExpr) -> (TypeExpr, TypeExpr) {
    let src = format!("package p\n\ntype T interface {{\n\tM(x {ty}) ({ty}, error)\n}}\n");
    let unit = parse_source("prop.go", &src).unwrap_or_else(|e| panic!("{e}\n{src}"));
    let mut interfaces = collect_interfaces(&unit);
    let mut method = interfaces.remove(0).methods.remove(0);
    (method.params.remove(0).ty, method.returns.remove(0).ty)
}

/// `...T` is only legal as the last parameter.
fn reparse_variadic(elem: &TypeExpr) -> TypeExpr {
    let src =
        format!("package p\n\ntype T interface {{\n\tM(format string, rest ...{elem})\n}}\n");
    let unit = parse_source("prop.go", &src).unwrap_or_else(|e| panic!("{e}\n{src}"));
    let mut interfaces = collect_interfaces(&unit);
    let mut method = interfaces.remove(0).methods.remove(0);
    method.params.remove(1).ty
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]
    #[test]
    fn formatting_is_stable_under_reparsing(ty in type_expr()) {
        let text = ty.to_string();
        let (param, result) = reparse(&ty);

        prop_assert_eq!(param.to_string(), text.clone(), "parameter position");
        prop_assert_eq!(result.to_string(), text, "result position");
        prop_assert_eq!(param, ty);
    }

    #[test]
    fn variadic_parameters_survive_reparsing(elem in type_expr()) {
        let back = reparse_variadic(&elem);
        let ty = TypeExpr::Variadic(Box::new(elem));
        prop_assert_eq!(back.to_string(), ty.to_string());
        prop_assert_eq!(back, ty);
    }
}
