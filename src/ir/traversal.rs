//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

//! One-level traversal combinators for expressions and statements.
//!
//! Every combinator here only touches the *immediate* children of a node. Deep
//! walks are built by each pass with explicit recursion, since different passes
//! need different orders (top-down for detection, bottom-up for rewriting):
//!
//! ```
//! # use garnet::ir::*;
//! // bottom-up: rewrite children first, then look at the node itself
//! fn zero_literals(expr: Expression) -> Expression {
//!     match expr.map_expr(zero_literals) {
//!         Expression::Literal(Literal::UInt { width, .. }) => {
//!             Expression::Literal(Literal::UInt { value: 0, width })
//!         }
//!         other => other,
//!     }
//! }
//!
//! let a = Expression::port("a", Type::uint(4));
//! let e = Expression::prim(PrimOp::Add, [a.clone(), Expression::uint_lit(3, 4)], Type::uint(5));
//! let z = Expression::prim(PrimOp::Add, [a, Expression::uint_lit(0, 4)], Type::uint(5));
//!
//! assert_eq!(zero_literals(e), z);
//! ```
//!
//! Every match in this module is exhaustive with no wildcard arm, adding a new
//! variant is a compile error here until it's handled.

use crate::ir::{Expression, Statement};

impl Expression {
    /// Applies `f` to each immediate sub-expression and rebuilds the node with
    /// the same variant and type.
    pub fn map_expr(self, mut f: impl FnMut(Expression) -> Expression) -> Expression {
        match self {
            Expression::Reference { .. } | Expression::Literal(_) | Expression::Placeholder(_) => {
                self
            }
            Expression::SubField { base, field, ty } => Expression::SubField {
                base: Box::new(f(*base)),
                field,
                ty,
            },
            Expression::SubIndex { base, index, ty } => Expression::SubIndex {
                base: Box::new(f(*base)),
                index,
                ty,
            },
            Expression::SubAccess { base, index, ty } => {
                let base = Box::new(f(*base));
                let index = Box::new(f(*index));

                Expression::SubAccess { base, index, ty }
            }
            Expression::Primitive {
                op,
                args,
                consts,
                ty,
            } => Expression::Primitive {
                op,
                args: args.into_iter().map(f).collect(),
                consts,
                ty,
            },
            Expression::Mux {
                cond,
                tval,
                fval,
                ty,
            } => {
                let cond = Box::new(f(*cond));
                let tval = Box::new(f(*tval));
                let fval = Box::new(f(*fval));

                Expression::Mux {
                    cond,
                    tval,
                    fval,
                    ty,
                }
            }
            Expression::ValidIf { cond, value, ty } => {
                let cond = Box::new(f(*cond));
                let value = Box::new(f(*value));

                Expression::ValidIf { cond, value, ty }
            }
        }
    }

    /// Calls `f` on each immediate sub-expression, in order.
    pub fn for_each_expr<'a>(&'a self, mut f: impl FnMut(&'a Expression)) {
        match self {
            Expression::Reference { .. } | Expression::Literal(_) | Expression::Placeholder(_) => {}
            Expression::SubField { base, .. } | Expression::SubIndex { base, .. } => f(base),
            Expression::SubAccess { base, index, .. } => {
                f(base);
                f(index);
            }
            Expression::Primitive { args, .. } => args.iter().for_each(f),
            Expression::Mux {
                cond, tval, fval, ..
            } => {
                f(cond);
                f(tval);
                f(fval);
            }
            Expression::ValidIf { cond, value, .. } => {
                f(cond);
                f(value);
            }
        }
    }

    /// Checks if `pred` holds for this expression or any expression below it.
    pub fn any(&self, pred: &mut impl FnMut(&Expression) -> bool) -> bool {
        if pred(self) {
            return true;
        }

        let mut found = false;

        self.for_each_expr(|child| found = found || child.any(&mut *pred));

        found
    }
}

impl Statement {
    /// Applies `f` to each immediate sub-statement and rebuilds the node.
    ///
    /// Only [`Statement::Block`] has sub-statements, everything else is returned
    /// as-is.
    pub fn map_stmt(self, f: impl FnMut(Statement) -> Statement) -> Statement {
        match self {
            Statement::Block(stmts) => Statement::Block(stmts.into_iter().map(f).collect()),
            Statement::Connect { .. }
            | Statement::IsInvalid(_)
            | Statement::Attach(_)
            | Statement::DefWire { .. }
            | Statement::DefNode { .. }
            | Statement::DefRegister { .. }
            | Statement::Print { .. }
            | Statement::Empty => self,
        }
    }

    /// Applies `f` to each expression directly held by this statement and rebuilds
    /// the node. Expressions inside of sub-statements are not visited.
    pub fn map_expr(self, mut f: impl FnMut(Expression) -> Expression) -> Statement {
        match self {
            Statement::Connect { sink, source } => {
                let sink = f(sink);
                let source = f(source);

                Statement::Connect { sink, source }
            }
            Statement::IsInvalid(target) => Statement::IsInvalid(f(target)),
            Statement::Attach(members) => Statement::Attach(members.into_iter().map(f).collect()),
            Statement::DefNode { name, value } => Statement::DefNode {
                name,
                value: f(value),
            },
            Statement::DefRegister {
                name,
                ty,
                clock,
                reset,
            } => {
                let clock = f(clock);
                let reset = reset.map(|(signal, init)| {
                    let signal = f(signal);
                    let init = f(init);

                    (signal, init)
                });

                Statement::DefRegister {
                    name,
                    ty,
                    clock,
                    reset,
                }
            }
            Statement::Print {
                clock,
                enable,
                format,
                args,
            } => {
                let clock = f(clock);
                let enable = f(enable);
                let args = args.into_iter().map(&mut f).collect();

                Statement::Print {
                    clock,
                    enable,
                    format,
                    args,
                }
            }
            Statement::DefWire { .. } | Statement::Block(_) | Statement::Empty => self,
        }
    }

    /// Calls `f` on each immediate sub-statement, in order.
    pub fn for_each_stmt<'a>(&'a self, f: impl FnMut(&'a Statement)) {
        match self {
            Statement::Block(stmts) => stmts.iter().for_each(f),
            Statement::Connect { .. }
            | Statement::IsInvalid(_)
            | Statement::Attach(_)
            | Statement::DefWire { .. }
            | Statement::DefNode { .. }
            | Statement::DefRegister { .. }
            | Statement::Print { .. }
            | Statement::Empty => {}
        }
    }

    /// Calls `f` on each expression directly held by this statement, in order.
    pub fn for_each_expr<'a>(&'a self, mut f: impl FnMut(&'a Expression)) {
        match self {
            Statement::Connect { sink, source } => {
                f(sink);
                f(source);
            }
            Statement::IsInvalid(target) => f(target),
            Statement::Attach(members) => members.iter().for_each(f),
            Statement::DefNode { value, .. } => f(value),
            Statement::DefRegister { clock, reset, .. } => {
                f(clock);

                if let Some((signal, init)) = reset {
                    f(signal);
                    f(init);
                }
            }
            Statement::Print {
                clock,
                enable,
                args,
                ..
            } => {
                f(clock);
                f(enable);
                args.iter().for_each(f);
            }
            Statement::DefWire { .. } | Statement::Block(_) | Statement::Empty => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ir::*;

    fn count_refs(expr: &Expression) -> usize {
        let mut total = usize::from(matches!(expr, Expression::Reference { .. }));

        expr.for_each_expr(|child| total += count_refs(child));

        total
    }

    #[test]
    fn map_expr_is_one_level() {
        let a = Expression::port("a", Type::uint(4));
        let b = Expression::port("b", Type::uint(4));
        let inner = Expression::prim(PrimOp::And, [a.clone(), b.clone()], Type::uint(4));
        let outer = Expression::prim(PrimOp::Not, [inner.clone()], Type::uint(4));

        let mut seen = Vec::new();
        let rebuilt = outer.clone().map_expr(|e| {
            seen.push(e.clone());
            e
        });

        assert_eq!(rebuilt, outer);
        assert_eq!(seen, vec![inner]);
    }

    #[test]
    fn map_expr_preserves_variant_and_type() {
        let c = Expression::port("c", Type::uint(1));
        let a = Expression::port("a", Type::uint(4));
        let mux = Expression::mux(c.clone(), a.clone(), a.clone());
        let lit = Expression::uint_lit(0, 4);

        let rewritten = mux.map_expr(|e| match e.ty() {
            Type::UInt(Width::Known(4)) => lit.clone(),
            _ => e,
        });

        assert_eq!(rewritten, Expression::mux(c, lit.clone(), lit));
    }

    #[test]
    fn for_each_expr_visits_sub_access_base_and_index() {
        let v = Expression::wire("v", Type::vector(Type::uint(8), 4));
        let i = Expression::port("i", Type::uint(2));
        let access = Expression::sub_access(v.clone(), i.clone());
        let mut seen = Vec::new();

        access.for_each_expr(|e| seen.push(e));

        assert_eq!(seen, vec![&v, &i]);
        assert_eq!(count_refs(&access), 2);
    }

    #[test]
    fn statement_map_expr_skips_sub_statements() {
        let a = Expression::port("a", Type::uint(1));
        let inner = Statement::IsInvalid(a.clone().into_sink());
        let block = Statement::Block(vec![inner.clone()]);

        let mut calls = 0;
        let same = block.clone().map_expr(|e| {
            calls += 1;
            e
        });

        assert_eq!(same, block);
        assert_eq!(calls, 0);

        let mut visited = Vec::new();

        block.for_each_stmt(|s| visited.push(s.clone()));

        assert_eq!(visited, vec![inner]);
    }

    #[test]
    fn register_reset_is_visited() {
        let clk = Expression::port("clk", Type::Clock);
        let rst = Expression::port("rst", Type::uint(1));
        let init = Expression::uint_lit(0, 8);
        let reg = Statement::DefRegister {
            name: "r".into(),
            ty: Type::uint(8),
            clock: clk.clone(),
            reset: Some((rst.clone(), init.clone())),
        };

        let mut seen = Vec::new();

        reg.for_each_expr(|e| seen.push(e.clone()));

        assert_eq!(seen, vec![clk, rst, init]);
    }

    #[test]
    fn any_finds_nested() {
        let c = Expression::port("c", Type::uint(1));
        let a = Expression::port("a", Type::uint(4));
        let nested = Expression::prim(
            PrimOp::Not,
            [Expression::valid_if(c, a.clone())],
            Type::uint(4),
        );

        assert!(nested.any(&mut |e| matches!(e, Expression::ValidIf { .. })));
        assert!(!a.any(&mut |e| matches!(e, Expression::Mux { .. })));
    }
}
