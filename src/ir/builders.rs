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
use paste::paste;
use smallvec::SmallVec;

impl Type {
    /// Shorthand for `Type::UInt(Width::Known(width))`.
    pub fn uint(width: u32) -> Self {
        Type::UInt(Width::Known(width))
    }

    /// Shorthand for `Type::SInt(Width::Known(width))`.
    pub fn sint(width: u32) -> Self {
        Type::SInt(Width::Known(width))
    }

    /// Shorthand for a fixed-point type with known width and point.
    pub fn fixed(width: u32, point: u32) -> Self {
        Type::Fixed {
            width: Width::Known(width),
            point: Width::Known(point),
        }
    }

    /// Shorthand for the closed interval `[lower, upper]` with binary point `point`.
    pub fn interval(lower: i64, upper: i64, point: u32) -> Self {
        Type::Interval {
            lower: Bound::Closed(lower),
            upper: Bound::Closed(upper),
            point: Width::Known(point),
        }
    }

    /// Shorthand for `Type::Analog(Width::Known(width))`.
    pub fn analog(width: u32) -> Self {
        Type::Analog(Width::Known(width))
    }

    /// Creates a vector type of `len` elements of type `elem`.
    pub fn vector(elem: Type, len: usize) -> Self {
        Type::Vector(Box::new(elem), len)
    }

    /// Creates a bundle of non-flipped fields.
    pub fn bundle(fields: &[(&str, Type)]) -> Self {
        Type::Bundle(
            fields
                .iter()
                .map(|(name, ty)| Field {
                    name: name.to_string(),
                    flipped: false,
                    ty: ty.clone(),
                })
                .collect(),
        )
    }
}

impl Expression {
    /// Creates a read-facing reference.
    pub fn reference(name: impl Into<String>, ty: Type, kind: ReferenceKind) -> Self {
        Expression::Reference {
            name: name.into(),
            ty,
            kind,
            facing: Facing::Read,
        }
    }

    /// Creates a read-facing reference to a port.
    pub fn port(name: impl Into<String>, ty: Type) -> Self {
        Self::reference(name, ty, ReferenceKind::Port)
    }

    /// Creates a read-facing reference to a wire.
    pub fn wire(name: impl Into<String>, ty: Type) -> Self {
        Self::reference(name, ty, ReferenceKind::Wire)
    }

    /// Creates a read-facing reference to a node.
    pub fn node(name: impl Into<String>, ty: Type) -> Self {
        Self::reference(name, ty, ReferenceKind::Node)
    }

    /// Creates a read-facing reference to a register.
    pub fn register(name: impl Into<String>, ty: Type) -> Self {
        Self::reference(name, ty, ReferenceKind::Register)
    }

    /// Returns the same expression, with the reference at the root of the
    /// access chain marked as write-facing.
    ///
    /// This is what connection sinks and invalidation targets look like after
    /// flow resolution.
    pub fn into_sink(self) -> Self {
        self.with_root_facing(Facing::Write)
    }

    /// Returns the same expression, with the reference at the root of the
    /// access chain marked as read-facing.
    pub fn into_source(self) -> Self {
        self.with_root_facing(Facing::Read)
    }

    fn with_root_facing(self, new: Facing) -> Self {
        match self {
            Expression::Reference {
                name, ty, kind, ..
            } => Expression::Reference {
                name,
                ty,
                kind,
                facing: new,
            },
            Expression::SubField { base, field, ty } => Expression::SubField {
                base: Box::new(base.with_root_facing(new)),
                field,
                ty,
            },
            Expression::SubIndex { base, index, ty } => Expression::SubIndex {
                base: Box::new(base.with_root_facing(new)),
                index,
                ty,
            },
            Expression::SubAccess { base, index, ty } => Expression::SubAccess {
                base: Box::new(base.with_root_facing(new)),
                index,
                ty,
            },
            other => other,
        }
    }

    /// Creates `base.field`, the type is looked up in the base's bundle type.
    ///
    /// If the field doesn't exist the access is typed as a zero-width `UInt`,
    /// the verifier will reject it later.
    pub fn sub_field(base: Expression, field: &str) -> Self {
        let ty = base
            .ty()
            .field(field)
            .map_or(Type::UInt(Width::Known(0)), |f| f.ty.clone());

        Expression::SubField {
            base: Box::new(base),
            field: field.to_string(),
            ty,
        }
    }

    /// Creates `base[index]`, the type is the base's element type.
    pub fn sub_index(base: Expression, index: usize) -> Self {
        let ty = element_of(&base);

        Expression::SubIndex {
            base: Box::new(base),
            index,
            ty,
        }
    }

    /// Creates `base[index]` with a dynamic index, the type is the base's element type.
    pub fn sub_access(base: Expression, index: Expression) -> Self {
        let ty = element_of(&base);

        Expression::SubAccess {
            base: Box::new(base),
            index: Box::new(index),
            ty,
        }
    }

    /// Creates `UInt<width>(value)`.
    pub fn uint_lit(value: u128, width: u32) -> Self {
        Expression::Literal(Literal::UInt {
            value,
            width: Width::Known(width),
        })
    }

    /// Creates `SInt<width>(value)`.
    pub fn sint_lit(value: i128, width: u32) -> Self {
        Expression::Literal(Literal::SInt {
            value,
            width: Width::Known(width),
        })
    }

    /// Creates `Fixed<width><<point>>(value)`.
    pub fn fixed_lit(value: i128, width: u32, point: u32) -> Self {
        Expression::Literal(Literal::Fixed {
            value,
            width: Width::Known(width),
            point: Width::Known(point),
        })
    }

    /// Creates `mux(cond, tval, fval)`, typed as `tval`.
    pub fn mux(cond: Expression, tval: Expression, fval: Expression) -> Self {
        let ty = tval.ty();

        Expression::Mux {
            cond: Box::new(cond),
            tval: Box::new(tval),
            fval: Box::new(fval),
            ty,
        }
    }

    /// Creates `validif(cond, value)`, typed as `value`.
    pub fn valid_if(cond: Expression, value: Expression) -> Self {
        let ty = value.ty();

        Expression::ValidIf {
            cond: Box::new(cond),
            value: Box::new(value),
            ty,
        }
    }

    /// Creates a primitive operation with no static parameters.
    pub fn prim<const N: usize>(op: PrimOp, args: [Expression; N], ty: Type) -> Self {
        Self::prim_with(op, args, &[], ty)
    }

    /// Creates a primitive operation with static parameters.
    pub fn prim_with<const N: usize>(
        op: PrimOp,
        args: [Expression; N],
        consts: &[u64],
        ty: Type,
    ) -> Self {
        Expression::Primitive {
            op,
            args: args.into_iter().collect(),
            consts: SmallVec::from_slice(consts),
            ty,
        }
    }
}

fn element_of(base: &Expression) -> Type {
    base.ty()
        .element()
        .cloned()
        .unwrap_or(Type::UInt(Width::Known(0)))
}

macro_rules! cast_builder {
    ($suffix:ident, $op:ident) => {
        paste! {
            #[doc = concat!("Creates `as", stringify!($op), "(arg)`, typed as `ty`.")]
            pub fn [< as_ $suffix >](arg: Expression, ty: Type) -> Self {
                Self::prim(PrimOp::[< As $op >], [arg], ty)
            }
        }
    };
}

impl Expression {
    cast_builder!(uint, UInt);
    cast_builder!(sint, SInt);
    cast_builder!(clock, Clock);

    /// Creates `cvt(arg)`, typed as `ty`.
    pub fn cvt(arg: Expression, ty: Type) -> Self {
        Self::prim(PrimOp::Cvt, [arg], ty)
    }

    /// Creates `cat(hi, lo)`, typed as `ty`.
    pub fn cat(hi: Expression, lo: Expression, ty: Type) -> Self {
        Self::prim(PrimOp::Cat, [hi, lo], ty)
    }
}

/// Helper for building the body of a [`Module`].
///
/// Declarations return the read-facing reference to whatever was declared, so they
/// can be used directly as sources. Use [`Expression::into_sink`] on them for sinks.
///
/// ```
/// # use garnet::ir::*;
/// let mut b = ModuleBuilder::new("Top");
/// let a = b.input("a", Type::uint(8));
/// let out = b.output("out", Type::uint(8));
/// let n = b.node("n", Expression::as_uint(a, Type::uint(8)));
///
/// b.connect(out, n);
///
/// let module = b.build();
///
/// assert_eq!(module.ports.len(), 2);
/// assert_eq!(module.body.len(), 2);
/// ```
pub struct ModuleBuilder {
    module: Module,
}

impl ModuleBuilder {
    /// Creates a builder for an empty module named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            module: Module::new(name),
        }
    }

    fn port(&mut self, name: &str, direction: PortDirection, ty: Type) -> Expression {
        self.module.ports.push(Port {
            name: name.to_string(),
            direction,
            ty: ty.clone(),
        });

        Expression::port(name, ty)
    }

    /// Declares an input port.
    pub fn input(&mut self, name: &str, ty: Type) -> Expression {
        self.port(name, PortDirection::Input, ty)
    }

    /// Declares an output port.
    pub fn output(&mut self, name: &str, ty: Type) -> Expression {
        self.port(name, PortDirection::Output, ty)
    }

    /// Appends `wire name : ty`.
    pub fn wire(&mut self, name: &str, ty: Type) -> Expression {
        self.stmt(Statement::DefWire {
            name: name.to_string(),
            ty: ty.clone(),
        });

        Expression::wire(name, ty)
    }

    /// Appends `node name = value`.
    pub fn node(&mut self, name: &str, value: Expression) -> Expression {
        let ty = value.ty();

        self.stmt(Statement::DefNode {
            name: name.to_string(),
            value,
        });

        Expression::node(name, ty)
    }

    /// Appends `reg name : ty, clock` with no reset.
    pub fn reg(&mut self, name: &str, ty: Type, clock: Expression) -> Expression {
        self.stmt(Statement::DefRegister {
            name: name.to_string(),
            ty: ty.clone(),
            clock,
            reset: None,
        });

        Expression::register(name, ty)
    }

    /// Appends `sink <= source`. The sink is marked as write-facing, the source
    /// as read-facing.
    pub fn connect(&mut self, sink: Expression, source: Expression) {
        self.stmt(Statement::Connect {
            sink: sink.into_sink(),
            source: source.into_source(),
        });
    }

    /// Appends `target is invalid`.
    pub fn invalidate(&mut self, target: Expression) {
        self.stmt(Statement::IsInvalid(target.into_sink()));
    }

    /// Appends `attach(members...)`.
    pub fn attach(&mut self, members: &[Expression]) {
        self.stmt(Statement::Attach(members.to_vec()));
    }

    /// Appends an arbitrary statement.
    pub fn stmt(&mut self, stmt: Statement) {
        self.module.body.push(stmt);
    }

    /// Finishes building the module.
    pub fn build(self) -> Module {
        self.module
    }
}

/// Helper for building a [`Circuit`] out of modules.
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Creates a builder for a circuit with top-level module `main`.
    pub fn new(main: impl Into<String>) -> Self {
        Self {
            circuit: Circuit::new(main),
        }
    }

    /// Adds a module to the circuit.
    pub fn module(mut self, module: Module) -> Self {
        self.circuit.modules.push(module);

        self
    }

    /// Finishes building the circuit.
    pub fn build(self) -> Circuit {
        self.circuit
    }
}
