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
use crate::pass::{ModuleTransformPass, PassInfo, Prerequisite};
use crate::utility::SaHashSet;

static INFO: PassInfo = PassInfo {
    name: "zero-length-vecs",
    prerequisites: &[
        Prerequisite::ExpandWhens,
        Prerequisite::ResolveKinds,
        Prerequisite::InferTypes,
        Prerequisite::ExpandConnects,
    ],
    preserves_all: true,
};

/// Removes every use of a zero-length vector.
///
/// A zero-length vector has no elements, so any access into it (and anything
/// accessed through that) denotes a location that doesn't exist. This pass:
///
/// 1. Drops connects and invalidations whose sink is such a location
/// 2. Removes such locations from `attach` statements, dropping the attach if
///    fewer than two members are left
/// 3. Replaces reads of such locations with a zero of the same type
///
/// A circuit without any zero-length vectors comes out unchanged.
pub struct ZeroLengthVecsPass;

impl ModuleTransformPass for ZeroLengthVecsPass {
    fn info(&self) -> &'static PassInfo {
        &INFO
    }

    fn run(&self, module: Module) -> Module {
        remove_zero_length_vecs(module)
    }
}

/// Checks whether `expr` is (or is accessed through) a zero-length vector.
///
/// This is true if `expr` is itself typed as a zero-length vector, or if it's a
/// `SubField`/`SubIndex`/`SubAccess` whose base recursively satisfies this. The
/// placeholder that stands in for an already-rewritten part of a chain counts
/// as derived as well.
///
/// ```
/// # use garnet::ir::*;
/// # use garnet::transforms::derives_from_zero_length_vector;
/// let elem = Type::bundle(&[("a", Type::uint(8))]);
/// let w = Expression::wire("w", Type::vector(elem, 0));
/// let a = Expression::sub_field(Expression::sub_index(w, 0), "a");
///
/// assert!(derives_from_zero_length_vector(&a));
/// ```
pub fn derives_from_zero_length_vector(expr: &Expression) -> bool {
    ZeroLengthVecs::default().derives(expr)
}

/// Produces the value that an unreachable read of type `expr.ty()` is replaced with.
///
/// The result always has exactly the same type as `expr`:
///
/// - `UInt`, `SInt` and `Fixed` reads become a zero literal of the same width (and point)
/// - `Interval` reads become a zero clipped into the interval's range, since zero
///   may not be inside of it
/// - `Clock` reads become `asClock(UInt<1>(0))`
/// - aggregate reads become the placeholder, which the pass resolves before it finishes
///
/// Analog values have no driver to replace, they are returned unchanged. They are
/// only legal inside of `attach`, which handles them separately.
pub fn dont_care_for(expr: &Expression) -> Expression {
    match expr.ty() {
        Type::UInt(width) => Expression::Literal(Literal::UInt { value: 0, width }),
        Type::SInt(width) => Expression::Literal(Literal::SInt { value: 0, width }),
        Type::Fixed { width, point } => Expression::Literal(Literal::Fixed {
            value: 0,
            width,
            point,
        }),
        ty @ Type::Interval { .. } => {
            let zero = Expression::Literal(Literal::Interval {
                value: 0,
                ty: Type::Interval {
                    lower: Bound::Closed(0),
                    upper: Bound::Closed(0),
                    point: Width::Known(0),
                },
            });

            Expression::prim(PrimOp::Clip, [zero], ty)
        }
        Type::Clock => Expression::as_clock(Expression::uint_lit(0, 1), Type::Clock),
        Type::Analog(_) => expr.clone(),
        ty @ (Type::Vector(_, _) | Type::Bundle(_)) => Expression::Placeholder(ty),
    }
}

/// Rewrites every read of a location derived from a zero-length vector inside of
/// `expr` into [`dont_care_for`] that location.
///
/// Children are rewritten first, so only the outermost access of a chain ends
/// up replaced.
pub fn drop_zero_length_sub_accesses(expr: Expression) -> Expression {
    ZeroLengthVecs::default().drop_sub_accesses(expr)
}

/// Runs the zero-length vector elimination over a single module.
pub fn remove_zero_length_vecs(module: Module) -> Module {
    log::trace!("zero-length-vecs: before:\n{module}");

    let Module { name, ports, body } = module;
    let mut state = ZeroLengthVecs::default();
    let body: Vec<Statement> = body.into_iter().map(|s| state.on_stmt(s)).collect();

    log::debug!(
        "zero-length-vecs: `{name}`: dropped {} statement(s), replaced {} read(s)",
        state.dropped,
        state.replaced
    );

    let module = Module { name, ports, body };

    log::trace!("zero-length-vecs: after:\n{module}");

    module
}

// per-module scratch state, dropped at the end of `remove_zero_length_vecs`
#[derive(Default)]
struct ZeroLengthVecs {
    // nodes whose entire value turned out to be a placeholder. since nodes are
    // always declared before they're used, any later read of one of these is
    // just as unreachable as the value it was defined with
    vacuous: SaHashSet<String>,
    dropped: usize,
    replaced: usize,
}

impl ZeroLengthVecs {
    fn is_vacuous(&self, expr: &Expression) -> bool {
        match expr {
            Expression::Reference {
                name,
                kind: ReferenceKind::Node,
                ..
            } => self.vacuous.contains(name.as_str()),
            _ => false,
        }
    }

    fn derives(&self, expr: &Expression) -> bool {
        let direct = match expr.stored_ty() {
            Some(ty) => ty.is_zero_length_vector() || expr.is_placeholder(),
            None => false,
        };

        direct
            || self.is_vacuous(expr)
            || expr.access_base().map_or(false, |base| self.derives(base))
    }

    fn drop_sub_accesses(&mut self, expr: Expression) -> Expression {
        let expr = expr.map_expr(|e| self.drop_sub_accesses(e));

        if (expr.is_sub_access() || self.is_vacuous(&expr)) && self.derives(&expr) {
            self.replaced += 1;

            dont_care_for(&expr)
        } else {
            expr
        }
    }

    fn on_stmt(&mut self, stmt: Statement) -> Statement {
        match stmt {
            Statement::Connect { sink, .. } if self.derives(&sink) => self.drop(),
            Statement::IsInvalid(target) if self.derives(&target) => self.drop(),
            Statement::Attach(members) => {
                let before = members.len();
                let members: Vec<Expression> = members
                    .into_iter()
                    .filter(|member| !self.derives(member))
                    .collect();

                if members.len() < 2 {
                    self.drop()
                } else {
                    self.replaced += before - members.len();

                    Statement::Attach(members)
                }
            }
            other => {
                let other = other
                    .map_stmt(|s| self.on_stmt(s))
                    .map_expr(|e| self.drop_sub_accesses(e));

                self.resolve_placeholders(other)
            }
        }
    }

    fn drop(&mut self) -> Statement {
        self.dropped += 1;

        Statement::Empty
    }

    // once a statement's expressions are rewritten, a placeholder can only be left
    // in an aggregate-valued position. those get resolved here so that the
    // placeholder never leaves the pass
    fn resolve_placeholders(&mut self, stmt: Statement) -> Statement {
        match stmt.map_expr(collapse_placeholder_arms) {
            Statement::Connect {
                sink,
                source: Expression::Placeholder(_),
            } => {
                log::warn!("zero-length-vecs: aggregate connect into `{sink}` from a zero-length vector, invalidating instead");

                Statement::IsInvalid(sink)
            }
            Statement::DefNode {
                name,
                value: Expression::Placeholder(_),
            } => {
                log::debug!("zero-length-vecs: node `{name}` is unreachable, removing it");

                self.vacuous.insert(name);
                self.drop()
            }
            Statement::DefRegister {
                name,
                ty,
                clock,
                reset: Some((_, Expression::Placeholder(_))),
            } => {
                log::debug!("zero-length-vecs: reset value of `{name}` is unreachable, removing the reset");

                Statement::DefRegister {
                    name,
                    ty,
                    clock,
                    reset: None,
                }
            }
            other => other,
        }
    }
}

// a mux/validif that picks a placeholder is free to pick anything in that case,
// so it can just pick the other side
fn collapse_placeholder_arms(expr: Expression) -> Expression {
    match expr.map_expr(collapse_placeholder_arms) {
        Expression::Mux { tval, fval, .. } if tval.is_placeholder() => *fval,
        Expression::Mux { tval, fval, .. } if fval.is_placeholder() => *tval,
        Expression::ValidIf { value, ty, .. } if value.is_placeholder() => {
            Expression::Placeholder(ty)
        }
        other => other,
    }
}
