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
use crate::utility::{SaHashMap, SaHashSet};

static INFO: PassInfo = PassInfo {
    name: "inline-single-assignment",
    prerequisites: &[
        Prerequisite::ExpandWhens,
        Prerequisite::ResolveKinds,
        Prerequisite::InferTypes,
    ],
    preserves_all: true,
};

/// Inlines local wires and nodes that are assigned exactly once with a value
/// that doesn't instantiate any hardware.
///
/// ```text
/// node n = asUInt(x)         ; removed
/// out <= n                   ; becomes `out <= asUInt(x)`
/// ```
///
/// The set of candidates is decided once, on the module as it was given to the
/// pass. Chains of candidates are substituted all the way through, so running
/// the pass again on its own output does nothing.
pub struct InlineSingleAssignmentPass;

impl ModuleTransformPass for InlineSingleAssignmentPass {
    fn info(&self) -> &'static PassInfo {
        &INFO
    }

    fn run(&self, module: Module) -> Module {
        inline_single_assignments(module)
    }
}

/// The largest expression (counted in expression nodes) that a candidate may
/// expand to once every candidate it reads has been substituted into it.
///
/// A signal over this size is kept as a node, so reads of it stay references
/// and the output grows at most linearly with the input.
pub const MAX_INLINED_SIZE: usize = 128;

/// The primitives that can be duplicated without creating new hardware, since
/// they only reinterpret or rearrange bits.
const FREE_PRIMITIVES: [PrimOp; 5] = [
    PrimOp::AsUInt,
    PrimOp::AsSInt,
    PrimOp::AsClock,
    PrimOp::Cvt,
    PrimOp::Cat,
];

/// Checks whether `expr` can be copied to any number of read sites without
/// duplicating hardware.
///
/// Any `mux`/`validif` or any primitive other than `asUInt`, `asSInt`, `asClock`,
/// `cvt` and `cat` anywhere in the tree makes the whole expression not logic-free.
///
/// ```
/// # use garnet::ir::*;
/// # use garnet::transforms::is_logic_free;
/// let a = Expression::port("a", Type::uint(4));
/// let b = Expression::port("b", Type::uint(4));
///
/// assert!(is_logic_free(&Expression::cat(a.clone(), b.clone(), Type::uint(8))));
/// assert!(!is_logic_free(&Expression::prim(PrimOp::Add, [a, b], Type::uint(5))));
/// ```
pub fn is_logic_free(expr: &Expression) -> bool {
    !expr.any(&mut |e| match e {
        Expression::Mux { .. } | Expression::ValidIf { .. } | Expression::Placeholder(_) => true,
        Expression::Primitive { op, .. } => !FREE_PRIMITIVES.contains(op),
        Expression::Reference { .. }
        | Expression::SubField { .. }
        | Expression::SubIndex { .. }
        | Expression::SubAccess { .. }
        | Expression::Literal(_) => false,
    })
}

/// The signals of a module that [`inline_single_assignments`] will remove, along
/// with the single value each of them is assigned.
#[derive(Clone, Debug, Default)]
pub struct Candidates {
    values: SaHashMap<String, Expression>,
}

impl Candidates {
    /// Gets the value the candidate `name` is assigned, if `name` is a candidate.
    pub fn value(&self, name: &str) -> Option<&Expression> {
        self.values.get(name)
    }

    /// Checks if `name` is a candidate.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Gets the number of candidates.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Checks if there are no candidates at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Finds every local wire/node that can be inlined.
///
/// A signal is a candidate when all of these hold:
///
/// 1. it's declared by a `wire` or `node` in the module and isn't analog
/// 2. it has a ground type
/// 3. it's written exactly once (an `is invalid` counts as a write), by a
///    connect with a source of the exact same type or by its node definition
/// 4. that value [is logic-free](is_logic_free)
/// 5. its value doesn't end up referring back to itself through other candidates
/// 6. its value, with the candidates it reads substituted in, has no more than
///    [`MAX_INLINED_SIZE`] expression nodes
pub fn find_candidates(module: &Module) -> Candidates {
    let mut discovery = Discovery::default();

    for stmt in &module.body {
        discovery.visit(stmt);
    }

    discovery.finish()
}

/// Runs single-assignment inlining over a single module.
pub fn inline_single_assignments(module: Module) -> Module {
    log::trace!("inline-single-assignment: before:\n{module}");

    let candidates = find_candidates(&module);
    let Module { name, ports, body } = module;

    if candidates.is_empty() {
        log::debug!("inline-single-assignment: `{name}`: no candidates");

        return Module { name, ports, body };
    }

    let mut inliner = Inliner::new(candidates);
    let body: Vec<Statement> = body.into_iter().map(|s| inliner.on_stmt(s)).collect();

    log::debug!(
        "inline-single-assignment: `{name}`: inlined {} signal(s) into {} read(s), removed {} statement(s)",
        inliner.values.len(),
        inliner.reads,
        inliner.removed
    );

    let module = Module { name, ports, body };

    log::trace!("inline-single-assignment: after:\n{module}");

    module
}

#[derive(Default)]
struct Discovery {
    locals: SaHashMap<String, Type>,
    writes: SaHashMap<String, usize>,
    values: SaHashMap<String, Expression>,
    rejected: SaHashSet<String>,
}

impl Discovery {
    fn visit(&mut self, stmt: &Statement) {
        match stmt {
            Statement::DefWire { name, ty } => {
                self.locals.insert(name.clone(), ty.clone());
            }
            Statement::DefNode { name, value } => {
                self.locals.insert(name.clone(), value.ty());
                self.write(name, Some(value));
            }
            Statement::Connect { sink, source } => match sink {
                Expression::Reference { name, .. } => self.write(name, Some(source)),
                _ => self.write_through(sink),
            },
            Statement::IsInvalid(target) => self.write_through(target),
            Statement::Attach(members) => {
                for member in members {
                    self.write_through(member);
                }
            }
            Statement::DefRegister { .. } | Statement::Print { .. } | Statement::Empty => {}
            Statement::Block(_) => stmt.for_each_stmt(|s| self.visit(s)),
        }
    }

    // anything that writes somewhere other than exactly `name <= value`
    // disqualifies the signal at the root of the target
    fn write_through(&mut self, target: &Expression) {
        if let Some(name) = target.root().and_then(Expression::reference_name) {
            self.write(name, None);
        }
    }

    fn write(&mut self, name: &str, value: Option<&Expression>) {
        let Some(ty) = self.locals.get(name) else {
            return;
        };

        *self.writes.entry(name.to_string()).or_insert(0) += 1;

        match value {
            Some(value)
                if ty.is_ground() && !ty.is_analog() && value.ty() == *ty && is_logic_free(value) =>
            {
                self.values.insert(name.to_string(), value.clone());
            }
            _ => {
                self.rejected.insert(name.to_string());
            }
        }
    }

    fn finish(self) -> Candidates {
        let Discovery {
            writes,
            mut values,
            rejected,
            ..
        } = self;

        values.retain(|name, _| writes.get(name) == Some(&1) && !rejected.contains(name));

        let cyclic: Vec<String> = values
            .keys()
            .filter(|name| is_on_cycle(&values, name))
            .cloned()
            .collect();

        for name in cyclic {
            log::debug!("inline-single-assignment: `{name}` is part of a combinational loop, not inlining it");

            values.remove(&name);
        }

        let mut sizes = SaHashMap::default();
        let names: Vec<String> = values.keys().cloned().collect();

        for name in &names {
            inlined_size(&values, &mut sizes, name);
        }

        values.retain(|name, _| match sizes.get(name) {
            Some(&size) if size > MAX_INLINED_SIZE => {
                log::debug!("inline-single-assignment: `{name}` would expand to {size} expression(s), keeping it");

                false
            }
            _ => true,
        });

        Candidates { values }
    }
}

// the size of `name`'s value once inlined. candidates over the limit stay
// declared, so their reads count as a single reference
fn inlined_size(
    values: &SaHashMap<String, Expression>,
    sizes: &mut SaHashMap<String, usize>,
    name: &str,
) -> usize {
    if let Some(&size) = sizes.get(name) {
        return size;
    }

    let size = values.get(name).map_or(1, |value| expr_size(value, values, sizes));

    sizes.insert(name.to_string(), size);

    size
}

fn expr_size(
    expr: &Expression,
    values: &SaHashMap<String, Expression>,
    sizes: &mut SaHashMap<String, usize>,
) -> usize {
    match expr {
        Expression::Reference {
            name,
            kind,
            facing: Facing::Read,
            ..
        } if kind.is_local_signal() && values.contains_key(name) => {
            match inlined_size(values, sizes, name) {
                size if size > MAX_INLINED_SIZE => 1,
                size => size,
            }
        }
        _ => {
            let mut size = 1;

            expr.for_each_expr(|child| size += expr_size(child, values, sizes));

            size
        }
    }
}

fn local_reads<'a>(expr: &'a Expression, out: &mut Vec<&'a str>) {
    if let Expression::Reference { name, kind, .. } = expr {
        if kind.is_local_signal() {
            out.push(name);
        }
    }

    expr.for_each_expr(|child| local_reads(child, out));
}

fn is_on_cycle(values: &SaHashMap<String, Expression>, start: &str) -> bool {
    let mut seen = SaHashSet::default();
    let mut worklist = Vec::new();

    if let Some(value) = values.get(start) {
        local_reads(value, &mut worklist);
    }

    while let Some(name) = worklist.pop() {
        if name == start {
            return true;
        }

        if !seen.insert(name) {
            continue;
        }

        if let Some(value) = values.get(name) {
            local_reads(value, &mut worklist);
        }
    }

    false
}

struct Inliner {
    values: SaHashMap<String, Expression>,
    // candidate values with every other candidate already substituted into them
    resolved: SaHashMap<String, Expression>,
    reads: usize,
    removed: usize,
}

impl Inliner {
    fn new(candidates: Candidates) -> Self {
        Self {
            values: candidates.values,
            resolved: SaHashMap::default(),
            reads: 0,
            removed: 0,
        }
    }

    fn resolve(&mut self, name: &str) -> Option<Expression> {
        if let Some(value) = self.resolved.get(name) {
            return Some(value.clone());
        }

        let value = self.values.get(name)?.clone();
        let value = self.substitute(value);

        self.resolved.insert(name.to_string(), value.clone());

        Some(value)
    }

    fn substitute(&mut self, expr: Expression) -> Expression {
        match expr {
            Expression::Reference {
                name,
                ty,
                kind,
                facing: Facing::Read,
            } if kind.is_local_signal() => match self.resolve(&name) {
                Some(value) => {
                    self.reads += 1;

                    value
                }
                None => Expression::Reference {
                    name,
                    ty,
                    kind,
                    facing: Facing::Read,
                },
            },
            other => other.map_expr(|e| self.substitute(e)),
        }
    }

    fn on_stmt(&mut self, stmt: Statement) -> Statement {
        match stmt {
            Statement::DefWire { name, .. } | Statement::DefNode { name, .. }
                if self.values.contains_key(&name) =>
            {
                self.remove()
            }
            Statement::Connect {
                sink: Expression::Reference { name, .. },
                ..
            } if self.values.contains_key(&name) => self.remove(),
            other => other
                .map_stmt(|s| self.on_stmt(s))
                .map_expr(|e| self.substitute(e)),
        }
    }

    fn remove(&mut self) -> Statement {
        self.removed += 1;

        Statement::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn references(module: &Module, name: &str) -> bool {
        fn stmt_has(stmt: &Statement, name: &str) -> bool {
            let mut found = false;

            stmt.for_each_expr(|e| {
                found = found || e.any(&mut |e| e.reference_name() == Some(name))
            });
            stmt.for_each_stmt(|s| found = found || stmt_has(s, name));

            found
        }

        module.body.iter().any(|s| stmt_has(s, name))
    }

    fn declares(module: &Module, name: &str) -> bool {
        Statement::Block(module.body.clone())
            .flatten()
            .iter()
            .any(|s| s.declared_name() == Some(name))
    }

    #[test]
    fn logic_free_predicate() {
        let a = Expression::port("a", Type::uint(4));
        let v = Expression::port("v", Type::vector(Type::uint(4), 2));
        let c = Expression::port("c", Type::uint(1));

        assert!(is_logic_free(&a));
        assert!(is_logic_free(&Expression::uint_lit(3, 2)));
        assert!(is_logic_free(&Expression::sub_index(v.clone(), 1)));
        assert!(is_logic_free(&Expression::as_sint(
            Expression::cat(a.clone(), a.clone(), Type::uint(8)),
            Type::sint(8)
        )));
        assert!(is_logic_free(&Expression::as_clock(c.clone(), Type::Clock)));
        assert!(is_logic_free(&Expression::cvt(a.clone(), Type::sint(5))));

        assert!(!is_logic_free(&Expression::mux(c.clone(), a.clone(), a.clone())));
        assert!(!is_logic_free(&Expression::valid_if(c.clone(), a.clone())));
        assert!(!is_logic_free(&Expression::prim_with(
            PrimOp::Bits,
            [a.clone()],
            &[1, 0],
            Type::uint(2)
        )));
        assert!(!is_logic_free(&Expression::as_uint(
            Expression::prim(PrimOp::Not, [a.clone()], Type::uint(4)),
            Type::uint(4)
        )));
        assert!(!is_logic_free(&Expression::sub_access(v, Expression::mux(c, a.clone(), a))));
    }

    #[test]
    fn cast_node_is_inlined_at_its_read() {
        let mut b = ModuleBuilder::new("Top");
        let x = b.input("x", Type::sint(8));
        let out = b.output("out", Type::uint(8));
        let raw = b.output("raw", Type::sint(8));
        let n = b.node("n", Expression::as_uint(x.clone(), Type::uint(8)));

        b.connect(out.clone(), n);
        b.connect(raw.clone(), x.clone());

        let module = inline_single_assignments(b.build());

        assert_eq!(
            module.body,
            vec![
                Statement::Empty,
                Statement::Connect {
                    sink: out.into_sink(),
                    source: Expression::as_uint(x.clone(), Type::uint(8)),
                },
                Statement::Connect {
                    sink: raw.into_sink(),
                    source: x,
                },
            ]
        );
    }

    #[test]
    fn mux_value_is_not_inlined() {
        let mut b = ModuleBuilder::new("Top");
        let p = b.input("p", Type::uint(1));
        let x = b.input("x", Type::uint(8));
        let y = b.input("y", Type::uint(8));
        let out = b.output("out", Type::uint(9));
        let n = b.wire("n", Type::uint(8));

        b.connect(n.clone(), Expression::mux(p, x, y));

        let m = b.node(
            "m",
            Expression::prim(PrimOp::Add, [n, Expression::uint_lit(1, 8)], Type::uint(9)),
        );

        b.connect(out, m);

        let module = b.build();

        assert!(find_candidates(&module).is_empty());
        assert_eq!(inline_single_assignments(module.clone()), module);
    }

    #[test]
    fn logic_free_node_over_disqualified_wire() {
        let mut b = ModuleBuilder::new("Top");
        let p = b.input("p", Type::uint(1));
        let x = b.input("x", Type::uint(8));
        let y = b.input("y", Type::uint(8));
        let out = b.output("out", Type::sint(8));
        let n = b.wire("n", Type::uint(8));

        b.connect(n.clone(), Expression::mux(p, x, y));

        let m = b.node("m", Expression::as_sint(n.clone(), Type::sint(8)));

        b.connect(out.clone(), m);

        let module = inline_single_assignments(b.build());

        assert!(declares(&module, "n"));
        assert!(!declares(&module, "m"));
        assert_eq!(
            module.body[3],
            Statement::Connect {
                sink: out.into_sink(),
                source: Expression::as_sint(n, Type::sint(8)),
            }
        );
    }

    #[test]
    fn multiple_writes_disqualify() {
        let mut b = ModuleBuilder::new("Top");
        let x = b.input("x", Type::uint(8));
        let y = b.input("y", Type::uint(8));
        let out = b.output("out", Type::uint(8));
        let w = b.wire("w", Type::uint(8));
        let v = b.wire("v", Type::uint(8));
        let u = b.wire("u", Type::uint(8));

        b.connect(w.clone(), x.clone());
        b.connect(w.clone(), y);
        b.invalidate(v.clone());
        b.connect(v.clone(), x);
        b.invalidate(u.clone());
        b.connect(out, Expression::cat(w, Expression::cat(v, u, Type::uint(16)), Type::uint(24)));

        let module = b.build();

        assert!(find_candidates(&module).is_empty());
        assert_eq!(inline_single_assignments(module.clone()), module);
    }

    #[test]
    fn type_mismatched_connect_is_not_a_candidate() {
        let mut b = ModuleBuilder::new("Top");
        let x = b.input("x", Type::uint(4));
        let out = b.output("out", Type::uint(8));
        let w = b.wire("w", Type::uint(8));

        b.connect(w.clone(), x);
        b.connect(out, w);

        let module = b.build();

        assert!(!find_candidates(&module).contains("w"));
        assert_eq!(inline_single_assignments(module.clone()), module);
    }

    #[test]
    fn only_ground_locals_are_candidates() {
        let mut b = ModuleBuilder::new("Top");
        let clk = b.input("clk", Type::Clock);
        let x = b.input("x", Type::uint(8));
        let out = b.output("out", Type::uint(8));
        let v = b.wire("v", Type::vector(Type::uint(8), 2));
        let r = b.reg("r", Type::uint(8), clk);

        b.connect(Expression::sub_index(v.clone(), 0), x.clone());
        b.connect(Expression::sub_index(v.clone(), 1), x.clone());
        b.connect(r.clone(), x);
        b.connect(out.clone(), Expression::sub_index(v, 0));
        b.connect(out, r);

        let module = b.build();

        assert!(find_candidates(&module).is_empty());
        assert_eq!(inline_single_assignments(module.clone()), module);
    }

    #[test]
    fn chains_are_substituted_transitively() {
        let mut b = ModuleBuilder::new("Top");
        let x = b.input("x", Type::sint(4));
        let out = b.output("out", Type::sint(5));
        let a = b.node("a", Expression::as_uint(x.clone(), Type::uint(4)));
        let w = b.wire("w", Type::sint(5));

        b.connect(w.clone(), Expression::cvt(a, Type::sint(5)));
        b.connect(out.clone(), w);

        let module = inline_single_assignments(b.build());
        let expected = Expression::cvt(Expression::as_uint(x, Type::uint(4)), Type::sint(5));

        assert_eq!(
            Statement::Block(module.body.clone()).flatten(),
            vec![Statement::Connect {
                sink: out.into_sink(),
                source: expected,
            }]
        );
        assert!(!references(&module, "a"));
        assert!(!references(&module, "w"));
    }

    #[test]
    fn runs_exactly_once() {
        let mut b = ModuleBuilder::new("Top");
        let x = b.input("x", Type::uint(4));
        let y = b.input("y", Type::uint(4));
        let out = b.output("out", Type::uint(8));
        let hi = b.node("hi", Expression::as_uint(x, Type::uint(4)));
        let both = b.node("both", Expression::cat(hi, y.clone(), Type::uint(8)));
        let sum = b.node(
            "sum",
            Expression::prim(PrimOp::Add, [both, Expression::uint_lit(1, 8)], Type::uint(9)),
        );

        b.connect(
            out,
            Expression::prim_with(PrimOp::Bits, [sum], &[7, 0], Type::uint(8)),
        );

        let input = b.build();
        let candidates = find_candidates(&input);

        assert_eq!(candidates.len(), 2);
        assert!(candidates.contains("hi") && candidates.contains("both"));

        let once = inline_single_assignments(input);

        assert!(find_candidates(&once).is_empty());
        assert_eq!(inline_single_assignments(once.clone()), once);
        assert!(declares(&once, "sum"));
    }

    #[test]
    fn combinational_loops_are_left_alone() {
        let mut b = ModuleBuilder::new("Top");
        let out = b.output("out", Type::uint(4));
        let p = b.wire("p", Type::uint(4));
        let q = b.wire("q", Type::uint(4));

        b.connect(p.clone(), Expression::as_uint(q.clone(), Type::uint(4)));
        b.connect(q, p.clone());
        b.connect(out, p);

        let module = b.build();

        assert!(find_candidates(&module).is_empty());
        assert_eq!(inline_single_assignments(module.clone()), module);
    }

    #[test]
    fn unread_candidates_are_removed() {
        let mut b = ModuleBuilder::new("Top");
        let x = b.input("x", Type::uint(4));
        let w = b.wire("w", Type::uint(4));

        b.connect(w, x);

        let module = inline_single_assignments(b.build());

        assert!(Statement::Block(module.body).flatten().is_empty());
    }

    #[test]
    fn reads_inside_blocks_and_registers() {
        let mut b = ModuleBuilder::new("Top");
        let clk = b.input("clk", Type::Clock);
        let rst = b.input("rst", Type::uint(1));
        let x = b.input("x", Type::uint(1));
        let en = b.node("en", Expression::as_uint(x.clone(), Type::uint(1)));
        let gated = b.node("gated", Expression::as_clock(clk.clone(), Type::Clock));

        b.stmt(Statement::Block(vec![
            Statement::DefRegister {
                name: "r".into(),
                ty: Type::uint(1),
                clock: gated,
                reset: Some((rst.clone(), en.clone())),
            },
            Statement::Print {
                clock: clk.clone(),
                enable: en,
                format: "tick\n".into(),
                args: vec![],
            },
        ]));

        let module = inline_single_assignments(b.build());
        let en = Expression::as_uint(x, Type::uint(1));

        assert_eq!(
            Statement::Block(module.body).flatten(),
            vec![
                Statement::DefRegister {
                    name: "r".into(),
                    ty: Type::uint(1),
                    clock: Expression::as_clock(clk.clone(), Type::Clock),
                    reset: Some((rst, en.clone())),
                },
                Statement::Print {
                    clock: clk,
                    enable: en,
                    format: "tick\n".into(),
                    args: vec![],
                },
            ]
        );
    }

    #[test]
    fn removed_signals_were_candidates_and_leave_no_reads() {
        let modules = {
            let mut b = ModuleBuilder::new("A");
            let x = b.input("x", Type::uint(8));
            let p = b.input("p", Type::uint(1));
            let out = b.output("out", Type::uint(16));
            let t = b.node("t", Expression::cat(x.clone(), x.clone(), Type::uint(16)));
            let m = b.wire("m", Type::uint(16));

            b.connect(m.clone(), Expression::mux(p, t.clone(), t));
            b.connect(out, m);

            let first = b.build();
            let mut b = ModuleBuilder::new("B");
            let y = b.input("y", Type::uint(2));
            let out = b.output("out", Type::sint(3));
            let k = b.node("k", Expression::cvt(y, Type::sint(3)));
            let j = b.wire("j", Type::sint(3));

            b.connect(j.clone(), k.clone());
            b.connect(out.clone(), j);
            b.connect(out, k);

            [first, b.build()]
        };

        for module in modules {
            let candidates = find_candidates(&module);
            let result = inline_single_assignments(module.clone());

            for stmt in Statement::Block(module.body.clone()).flatten() {
                let Some(name) = stmt.declared_name() else {
                    continue;
                };

                if declares(&result, name) {
                    assert!(!candidates.contains(name));
                } else {
                    assert!(candidates.contains(name));
                    assert!(!references(&result, name));
                }
            }
        }
    }

    fn expr_count(expr: &Expression) -> usize {
        let mut count = 1;

        expr.for_each_expr(|child| count += expr_count(child));

        count
    }

    fn module_size(module: &Module) -> usize {
        let mut count = 0;

        for stmt in Statement::Block(module.body.clone()).flatten() {
            stmt.for_each_expr(|e| count += expr_count(e));
        }

        count
    }

    #[test]
    fn repeated_reads_in_chains_grow_linearly() {
        let mut b = ModuleBuilder::new("Top");
        let x = b.input("x", Type::uint(1));
        let out = b.output("out", Type::uint(1 << 20));
        let mut prev = b.node("n0", Expression::cat(x.clone(), x, Type::uint(2)));

        for i in 1..20 {
            let ty = Type::uint(2 << i);

            prev = b.node(&format!("n{i}"), Expression::cat(prev.clone(), prev, ty));
        }

        b.connect(out, prev);

        let input = b.build();
        let candidates = find_candidates(&input);
        let result = inline_single_assignments(input.clone());

        assert_eq!(candidates.len(), 18);
        assert!(!candidates.contains("n6") && !candidates.contains("n13"));
        assert!(declares(&result, "n6") && declares(&result, "n13"));
        assert!(!declares(&result, "n19") && !references(&result, "n19"));
        assert!(module_size(&result) <= 6 * MAX_INLINED_SIZE);
        assert!(find_candidates(&result).is_empty());
        assert_eq!(inline_single_assignments(result.clone()), result);
    }

    #[test]
    fn pass_metadata() {
        let info = InlineSingleAssignmentPass.info();

        assert_eq!(info.name, "inline-single-assignment");
        assert!(info.preserves_all);
        assert!(info.requires(Prerequisite::ResolveKinds));
        assert!(info.requires(Prerequisite::InferTypes));
    }
}
