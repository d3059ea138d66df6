//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use garnet::ir::*;

pub const NAMES: [&str; 6] = [
    "dynamic-read",
    "attach",
    "degenerate-attach",
    "cast-node",
    "mux-wire",
    "multi-module",
];

pub fn by_name(name: &str) -> Option<Circuit> {
    let module = match name {
        "dynamic-read" => dynamic_read(),
        "attach" => attach(),
        "degenerate-attach" => degenerate_attach(),
        "cast-node" => cast_node(),
        "mux-wire" => mux_wire(),
        "multi-module" => return Some(multi_module()),
        _ => return None,
    };

    Some(CircuitBuilder::new(module.name.clone()).module(module).build())
}

fn dynamic_read() -> Module {
    let mut b = ModuleBuilder::new("DynamicRead");
    let idx = b.input("idx", Type::uint(2));
    let out = b.output("b", Type::uint(8));
    let w = b.wire("w", Type::vector(Type::uint(8), 0));

    b.connect(out, Expression::sub_access(w, idx));
    b.build()
}

fn attach() -> Module {
    let mut b = ModuleBuilder::new("Attach");
    let a = b.input("a", Type::analog(1));
    let c = b.input("b", Type::analog(1));
    let v = b.wire("v", Type::vector(Type::analog(1), 0));

    b.attach(&[a, c, Expression::sub_index(v, 0)]);
    b.build()
}

fn degenerate_attach() -> Module {
    let mut b = ModuleBuilder::new("DegenerateAttach");
    let v = b.wire("v", Type::vector(Type::analog(1), 0));
    let u = b.wire("u", Type::vector(Type::analog(1), 0));

    b.attach(&[Expression::sub_index(v, 0), Expression::sub_index(u, 0)]);
    b.build()
}

fn cast_node() -> Module {
    let mut b = ModuleBuilder::new("CastNode");
    let x = b.input("x", Type::sint(8));
    let out = b.output("out", Type::uint(8));
    let raw = b.output("raw", Type::sint(8));
    let n = b.node("n", Expression::as_uint(x.clone(), Type::uint(8)));

    b.connect(out, n);
    b.connect(raw, x);
    b.build()
}

fn mux_wire() -> Module {
    let mut b = ModuleBuilder::new("MuxWire");
    let p = b.input("p", Type::uint(1));
    let x = b.input("x", Type::uint(8));
    let y = b.input("y", Type::uint(8));
    let out = b.output("out", Type::uint(9));
    let n = b.wire("n", Type::uint(8));

    b.connect(n.clone(), Expression::mux(p, x, y));

    let one = Expression::uint_lit(1, 8);
    let m = b.node("m", Expression::prim(PrimOp::Add, [n, one], Type::uint(9)));

    b.connect(out, m);
    b.build()
}

fn multi_module() -> Circuit {
    let elem = Type::bundle(&[("data", Type::uint(4)), ("valid", Type::uint(1))]);

    let queue = {
        let mut b = ModuleBuilder::new("Queue");
        let clk = b.input("clk", Type::Clock);
        let i = b.input("i", Type::uint(1));
        let out = b.output("out", Type::uint(4));
        let slots = b.wire("slots", Type::vector(elem, 0));
        let data = Expression::sub_field(Expression::sub_access(slots, i), "data");
        let bits = b.node("bits", Expression::as_uint(data, Type::uint(4)));
        let r = b.reg("r", Type::uint(4), clk);

        b.connect(r.clone(), bits);
        b.connect(out, r);
        b.build()
    };

    let top = {
        let mut b = ModuleBuilder::new("Top");
        let hi = b.input("hi", Type::uint(4));
        let lo = b.input("lo", Type::uint(4));
        let out = b.output("out", Type::sint(9));
        let both = b.node("both", Expression::cat(hi, lo, Type::uint(8)));
        let w = b.wire("w", Type::sint(9));

        b.connect(w.clone(), Expression::cvt(both, Type::sint(9)));
        b.connect(out, w);
        b.build()
    };

    CircuitBuilder::new("Top").module(top).module(queue).build()
}
