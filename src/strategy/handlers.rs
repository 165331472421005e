// Handler-queue strategy: one `[]func` field per method. Each call pops the
// first queued handler and forwards to it; an empty queue panics.
//
// Popping is a read-then-write on the slice, so generated mocks must not
// receive concurrent calls into the same method.

use crate::codegen::{Codegen, Locals, call_args, receiver_type, signature};
use crate::ir::{InterfaceDecl, MethodSignature};

use super::{MockStrategy, struct_header};

#[derive(Debug, Clone, Copy, Default)]
pub struct HandlerQueue;

pub fn queue_field(sig: &MethodSignature) -> String {
    format!("{}Handlers", sig.name)
}

impl MockStrategy for HandlerQueue {
    /// `AssertExpectations` takes a `*testing.T`.
    fn imports(&self) -> &'static [&'static str] {
        &["testing"]
    }

    fn render_struct(&self, iface: &InterfaceDecl, cg: &mut Codegen) {
        cg.line(format!("// {} is a handler-queue mock of {}.", iface.mock, iface.name));
        cg.line("// It is not safe for concurrent calls into the same method.");
        if iface.methods.is_empty() {
            cg.line(format!("{}{{}}", struct_header(iface)));
            return;
        }
        cg.block(struct_header(iface), |cg| {
            for sig in &iface.methods {
                cg.line(format!("{} []func{}", queue_field(sig), signature(sig)));
            }
        });
    }

    /// `AssertExpectations` fails the test for every queue with handlers left.
    fn render_helpers(&self, iface: &InterfaceDecl, cg: &mut Codegen) {
        let open = format!("func (m {}) AssertExpectations(t *testing.T)", receiver_type(iface));
        cg.block(open, |cg| {
            cg.line("t.Helper()");
            for sig in &iface.methods {
                let field = queue_field(sig);
                cg.blank();
                cg.block(format!("if n := len(m.{field}); n > 0"), |cg| {
                    let mock = &iface.mock;
                    cg.line(format!("t.Errorf(\"{mock}.{field}: %d handler(s) not called\", n)"));
                });
            }
        });
    }

    fn render_method(&self, iface: &InterfaceDecl, sig: &MethodSignature, cg: &mut Codegen) {
        let Locals { recv: m, handler: f, .. } = Locals::for_method(sig);
        let field = format!("{m}.{}", queue_field(sig));

        let open = format!("func ({m} {}) {}{}", receiver_type(iface), sig.name, signature(sig));
        cg.block(open, |cg| {
            cg.block(format!("if len({field}) == 0"), |cg| {
                cg.line(format!("panic(\"{}.{} is empty\")", iface.mock, queue_field(sig)));
            });
            cg.blank();
            cg.line(format!("{f} := {field}[0]"));
            cg.line(format!("{field} = {field}[1:]"));
            cg.blank();

            let call = format!("{f}({})", call_args(sig));
            match sig.returns.is_empty() {
                true => cg.line(call),
                false => cg.line(format!("return {call}")),
            }
        });
    }
}
