// Recording strategies: the mock embeds testify's `mock.Mock`, forwards
// every call to `MethodCalled` and type-asserts the recorded results back.
// A result of the wrong type panics at the assertion.

use crate::codegen::{Codegen, Locals, receiver_type, signature, value_args};
use crate::ir::{InterfaceDecl, MethodSignature, ReturnSlot};

use super::{MockStrategy, TESTIFY_MOCK, struct_header};

/// Error slots go through `Arguments.Error(i)`, which maps nil to a nil error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Recording;

/// Error slots go through a generated `toErr` helper on the mock.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorUnwrap;

impl MockStrategy for Recording {
    fn imports(&self) -> &'static [&'static str] {
        &[TESTIFY_MOCK]
    }

    fn render_struct(&self, iface: &InterfaceDecl, cg: &mut Codegen) {
        recorded_struct(iface, cg);
    }

    fn render_method(&self, iface: &InterfaceDecl, sig: &MethodSignature, cg: &mut Codegen) {
        recorded_method(iface, sig, cg, |locals, slot| {
            format!("{}.Error({})", locals.ret, slot.ordinal)
        });
    }
}

impl MockStrategy for ErrorUnwrap {
    fn imports(&self) -> &'static [&'static str] {
        &[TESTIFY_MOCK]
    }

    fn render_struct(&self, iface: &InterfaceDecl, cg: &mut Codegen) {
        recorded_struct(iface, cg);
    }

    fn render_helpers(&self, iface: &InterfaceDecl, cg: &mut Codegen) {
        let open = format!("func (m {}) toErr(v interface{{}}) error", receiver_type(iface));
        cg.block(open, |cg| {
            cg.block("if v == nil", |cg| cg.line("return nil"));
            cg.blank();
            cg.line("return v.(error)");
        });
    }

    fn render_method(&self, iface: &InterfaceDecl, sig: &MethodSignature, cg: &mut Codegen) {
        recorded_method(iface, sig, cg, |locals, slot| {
            format!("{}.toErr({}.Get({}))", locals.recv, locals.ret, slot.ordinal)
        });
    }
}

fn recorded_struct(iface: &InterfaceDecl, cg: &mut Codegen) {
    cg.line(format!("// {} is a recording mock of {}.", iface.mock, iface.name));
    cg.block(struct_header(iface), |cg| cg.line("mock.Mock"));
}

fn recorded_method(
    iface: &InterfaceDecl,
    sig: &MethodSignature,
    cg: &mut Codegen,
    error_slot: impl Fn(&Locals, &ReturnSlot) -> String,
) {
    let locals = Locals::for_method(sig);
    let mut dispatch_args = vec![format!("{:?}", sig.name)];
    dispatch_args.extend(value_args(sig).into_iter().map(str::to_string));
    let call = format!("{}.MethodCalled({})", locals.recv, dispatch_args.join(", "));

    let receiver = receiver_type(iface);
    let open = format!("func ({} {receiver}) {}{}", locals.recv, sig.name, signature(sig));
    cg.block(open, |cg| {
        if sig.returns.is_empty() {
            cg.line(call);
            return;
        }

        cg.line(format!("{} := {call}", locals.ret));
        cg.blank();

        let values = sig
            .returns
            .iter()
            .map(|slot| match slot.is_error() {
                true => error_slot(&locals, slot),
                false => format!("{}.Get({}).({})", locals.ret, slot.ordinal, slot.ty),
            })
            .collect::<Vec<_>>();
        cg.line(format!("return {}", values.join(", ")));
    });
}
