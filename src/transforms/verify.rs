//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::ir::*;
use crate::pass::*;
use thiserror::Error;

static INFO: PassInfo = PassInfo {
    name: "verify",
    prerequisites: &[],
    preserves_all: true,
};

/// A single violation of the invariants that the passes in this crate assume.
///
/// Every error carries the name of the module it was found in and the rendered
/// statement it was found in.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum VerifyError {
    /// The circuit's `main` isn't one of its modules.
    #[error("top-level module `{0}` does not exist")]
    MissingMain(String),
    /// The zero-length vector placeholder escaped the pass that creates it.
    #[error("in `{module}`: placeholder value in `{stmt}`")]
    Placeholder {
        /// The module the error is in.
        module: String,
        /// The offending statement.
        stmt: String,
    },
    /// A connect, invalidate or node of aggregate type, which connection expansion removes.
    #[error("in `{module}`: aggregate-typed value in `{stmt}`")]
    AggregateValue {
        /// The module the error is in.
        module: String,
        /// The offending statement.
        stmt: String,
    },
    /// A field/index access whose base doesn't have the right type.
    #[error("in `{module}`: `{expr}` is not a valid access (in `{stmt}`)")]
    InvalidAccess {
        /// The module the error is in.
        module: String,
        /// The offending statement.
        stmt: String,
        /// The offending access.
        expr: String,
    },
    /// The root of a sink isn't marked as write-facing.
    #[error("in `{module}`: sink `{expr}` is not write-facing (in `{stmt}`)")]
    SinkNotWriteFacing {
        /// The module the error is in.
        module: String,
        /// The offending statement.
        stmt: String,
        /// The offending sink.
        expr: String,
    },
    /// A reference being read isn't marked as read-facing.
    #[error("in `{module}`: `{expr}` is read but not read-facing (in `{stmt}`)")]
    SourceNotReadFacing {
        /// The module the error is in.
        module: String,
        /// The offending statement.
        stmt: String,
        /// The offending reference.
        expr: String,
    },
    /// An `attach` member that isn't analog.
    #[error("in `{module}`: attach member `{expr}` is not analog (in `{stmt}`)")]
    NonAnalogAttach {
        /// The module the error is in.
        module: String,
        /// The offending statement.
        stmt: String,
        /// The offending member.
        expr: String,
    },
}

/// A circuit validity verification pass.
///
/// This scans the entire circuit, and does nothing if the circuit is valid. If
/// it isn't, every violation is reported through [`PipelineError::Verify`].
pub struct VerifyCircuitPass;

impl CircuitTransformPass for VerifyCircuitPass {
    fn info(&self) -> &'static PassInfo {
        &INFO
    }

    fn run(&mut self, circuit: Circuit) -> Result<Circuit, PipelineError> {
        verify_circuit(&circuit).map_err(PipelineError::Verify)?;

        Ok(circuit)
    }
}

/// Verifies that an entire circuit satisfies the invariants the passes rely on.
///
/// This checks that no placeholder is present, that every connect/invalidate/node
/// is ground-typed, that every access is into an aggregate of the right kind,
/// that reference facings match their positions, and that `attach` only joins
/// analog values.
///
/// If it isn't valid, this returns every error that was found.
pub fn verify_circuit(circuit: &Circuit) -> Result<(), Vec<VerifyError>> {
    let mut errors = Vec::new();

    if circuit.main_module().is_none() {
        errors.push(VerifyError::MissingMain(circuit.main.clone()));
    }

    for module in &circuit.modules {
        let mut verifier = Verifier {
            module,
            errors: &mut errors,
        };

        for stmt in &module.body {
            verifier.stmt(stmt);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

macro_rules! verify_assert {
    ($self:expr, $cond:expr, $variant:ident { $stmt:expr $(, $expr:expr)? }) => {
        if !($cond) {
            let error = VerifyError::$variant {
                module: $self.module.name.clone(),
                stmt: $stmt.to_string().trim_end().to_owned(),
                $(expr: $expr.to_string(),)?
            };

            $self.errors.push(error);
        }
    };
}

struct Verifier<'m, 'e> {
    module: &'m Module,
    errors: &'e mut Vec<VerifyError>,
}

impl Verifier<'_, '_> {
    fn stmt(&mut self, stmt: &Statement) {
        let mut has_placeholder = false;

        stmt.for_each_expr(|e| {
            has_placeholder = has_placeholder || e.any(&mut |e| e.is_placeholder())
        });

        verify_assert!(self, !has_placeholder, Placeholder { stmt });

        match stmt {
            Statement::Connect { sink, source } => {
                verify_assert!(self, source.ty().is_ground(), AggregateValue { stmt });

                self.sink(stmt, sink);
                self.source(stmt, source);
            }
            Statement::IsInvalid(target) => {
                verify_assert!(self, target.ty().is_ground(), AggregateValue { stmt });

                self.sink(stmt, target);
            }
            Statement::DefNode { value, .. } => {
                verify_assert!(self, value.ty().is_ground(), AggregateValue { stmt });

                self.source(stmt, value);
            }
            Statement::Attach(members) => {
                for member in members {
                    let analog = member.ty().is_analog();

                    verify_assert!(self, analog, NonAnalogAttach { stmt, member });

                    self.accesses(stmt, member);
                }
            }
            Statement::DefRegister { clock, reset, .. } => {
                self.source(stmt, clock);

                if let Some((signal, init)) = reset {
                    self.source(stmt, signal);
                    self.source(stmt, init);
                }
            }
            Statement::Print {
                clock,
                enable,
                args,
                ..
            } => {
                self.source(stmt, clock);
                self.source(stmt, enable);

                for arg in args {
                    self.source(stmt, arg);
                }
            }
            Statement::Block(_) => stmt.for_each_stmt(|s| self.stmt(s)),
            Statement::DefWire { .. } | Statement::Empty => {}
        }
    }

    fn sink(&mut self, stmt: &Statement, sink: &Expression) {
        let write_facing = matches!(
            sink.root(),
            Some(Expression::Reference {
                facing: Facing::Write,
                ..
            })
        );

        verify_assert!(self, write_facing, SinkNotWriteFacing { stmt, sink });

        self.accesses(stmt, sink);
        self.sink_indices(stmt, sink);
    }

    // the dynamic indices of a sink are still reads
    fn sink_indices(&mut self, stmt: &Statement, sink: &Expression) {
        if let Expression::SubAccess { index, .. } = sink {
            self.source(stmt, index);
        }

        if let Some(base) = sink.access_base() {
            self.sink_indices(stmt, base);
        }
    }

    fn source(&mut self, stmt: &Statement, source: &Expression) {
        self.reads(stmt, source);
        self.accesses(stmt, source);
    }

    fn reads(&mut self, stmt: &Statement, expr: &Expression) {
        if let Expression::Reference { facing, .. } = expr {
            verify_assert!(self, *facing == Facing::Read, SourceNotReadFacing { stmt, expr });
        }

        expr.for_each_expr(|child| self.reads(stmt, child));
    }

    fn accesses(&mut self, stmt: &Statement, expr: &Expression) {
        let valid = match expr {
            Expression::SubField { base, field, ty } => base
                .ty()
                .field(field)
                .map_or(false, |f| f.ty == *ty),
            Expression::SubIndex { base, ty, .. } | Expression::SubAccess { base, ty, .. } => {
                base.ty().element() == Some(ty)
            }
            _ => true,
        };

        verify_assert!(self, valid, InvalidAccess { stmt, expr });

        expr.for_each_expr(|child| self.accesses(stmt, child));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circuit(module: Module) -> Circuit {
        CircuitBuilder::new(module.name.clone()).module(module).build()
    }

    #[test]
    fn well_formed_circuit_passes() {
        let mut b = ModuleBuilder::new("Top");
        let clk = b.input("clk", Type::Clock);
        let i = b.input("i", Type::uint(2));
        let a = b.input("a", Type::analog(1));
        let c = b.input("c", Type::analog(1));
        let out = b.output("out", Type::uint(8));
        let v = b.wire("v", Type::vector(Type::uint(8), 4));
        let r = b.reg("r", Type::uint(8), clk);

        b.connect(Expression::sub_access(v.clone(), i.clone()), r.clone());
        b.connect(out, Expression::sub_access(v, i));
        b.attach(&[a, c]);

        let mut pass = VerifyCircuitPass;

        assert!(pass.run(circuit(b.build())).is_ok());
    }

    #[test]
    fn missing_main_is_reported() {
        let circuit = Circuit::new("Nope");

        assert_eq!(
            verify_circuit(&circuit),
            Err(vec![VerifyError::MissingMain("Nope".into())])
        );
    }

    #[test]
    fn placeholder_and_aggregates_are_rejected() {
        let elem = Type::bundle(&[("a", Type::uint(1))]);
        let mut b = ModuleBuilder::new("Top");
        let out = b.output("out", elem.clone());

        b.connect(out, Expression::Placeholder(elem));

        let errors = verify_circuit(&circuit(b.build())).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(matches!(&errors[0], VerifyError::Placeholder { module, .. } if module == "Top"));
        assert!(matches!(errors[1], VerifyError::AggregateValue { .. }));
    }

    #[test]
    fn facing_mismatches_are_rejected() {
        let mut b = ModuleBuilder::new("Top");
        let x = b.input("x", Type::uint(1));
        let w = b.wire("w", Type::uint(1));

        b.stmt(Statement::Connect {
            sink: w,
            source: x.into_sink(),
        });

        let errors = verify_circuit(&circuit(b.build())).unwrap_err();

        assert!(matches!(errors[0], VerifyError::SinkNotWriteFacing { .. }));
        assert!(matches!(errors[1], VerifyError::SourceNotReadFacing { .. }));
    }

    #[test]
    fn bad_accesses_and_attach_members_are_rejected() {
        let mut b = ModuleBuilder::new("Top");
        let x = b.input("x", Type::uint(4));
        let a = b.input("a", Type::analog(1));
        let out = b.output("out", Type::uint(4));

        b.connect(out, Expression::sub_field(x.clone(), "nope"));
        b.attach(&[a, x]);

        let errors = verify_circuit(&circuit(b.build())).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(matches!(&errors[0], VerifyError::InvalidAccess { expr, .. } if expr == "x.nope"));
        assert!(matches!(&errors[1], VerifyError::NonAnalogAttach { expr, .. } if expr == "x"));
    }

    #[test]
    fn errors_render_with_context() {
        let error = VerifyError::NonAnalogAttach {
            module: "Top".into(),
            stmt: "attach(a, x)".into(),
            expr: "x".into(),
        };

        assert_eq!(
            error.to_string(),
            "in `Top`: attach member `x` is not analog (in `attach(a, x)`)"
        );
    }
}
