//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::ir::{Type, Width};
use smallvec::SmallVec;
use static_assertions::assert_eq_size;

#[cfg(feature = "enable-serde")]
use serde::{Deserialize, Serialize};

/// Whether a reference occurrence is being read from or written to.
///
/// This is a property of one *occurrence* of a reference in the tree, not a
/// property of the declared signal. It is computed by kind/flow resolution
/// before any pass in this crate runs, and is never re-derived here.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub enum Facing {
    /// The occurrence is in a read position (e.g. a connect source).
    Read,
    /// The occurrence is in a write position (e.g. a connect sink).
    Write,
}

assert_eq_size!(Facing, u8);

/// The kind of declaration a reference resolves to.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub enum ReferenceKind {
    /// A module port.
    Port,
    /// A local `wire`.
    Wire,
    /// A local `node`.
    Node,
    /// A local `reg`.
    Register,
}

impl ReferenceKind {
    /// Checks if the kind is a local combinational signal (a wire or a node).
    pub fn is_local_signal(self) -> bool {
        matches!(self, ReferenceKind::Wire | ReferenceKind::Node)
    }
}

/// A literal constant.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub enum Literal {
    /// An unsigned integer literal.
    UInt {
        /// The value of the literal.
        value: u128,
        /// The width of the literal.
        width: Width,
    },
    /// A signed integer literal.
    SInt {
        /// The value of the literal.
        value: i128,
        /// The width of the literal.
        width: Width,
    },
    /// A fixed-point literal, `value` is the raw bit pattern.
    Fixed {
        /// The raw value of the literal.
        value: i128,
        /// The width of the literal.
        width: Width,
        /// The binary point of the literal.
        point: Width,
    },
    /// An interval-typed literal.
    Interval {
        /// The value of the literal.
        value: i128,
        /// The (interval) type of the literal.
        ty: Type,
    },
}

impl Literal {
    /// Gets the type of the literal.
    pub fn ty(&self) -> Type {
        match self {
            Literal::UInt { width, .. } => Type::UInt(*width),
            Literal::SInt { width, .. } => Type::SInt(*width),
            Literal::Fixed { width, point, .. } => Type::Fixed {
                width: *width,
                point: *point,
            },
            Literal::Interval { ty, .. } => ty.clone(),
        }
    }
}

/// A primitive operation.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub enum PrimOp {
    /// `add(a, b)`
    Add,
    /// `sub(a, b)`
    Sub,
    /// `mul(a, b)`
    Mul,
    /// `div(a, b)`
    Div,
    /// `rem(a, b)`
    Rem,
    /// `lt(a, b)`
    Lt,
    /// `leq(a, b)`
    Leq,
    /// `gt(a, b)`
    Gt,
    /// `geq(a, b)`
    Geq,
    /// `eq(a, b)`
    Eq,
    /// `neq(a, b)`
    Neq,
    /// `pad(a, n)`
    Pad,
    /// `asUInt(a)`, reinterprets the bits as unsigned
    AsUInt,
    /// `asSInt(a)`, reinterprets the bits as signed
    AsSInt,
    /// `asClock(a)`, reinterprets the bit as a clock
    AsClock,
    /// `asFixedPoint(a, p)`
    AsFixed,
    /// `shl(a, n)`
    Shl,
    /// `shr(a, n)`
    Shr,
    /// `dshl(a, b)`
    Dshl,
    /// `dshr(a, b)`
    Dshr,
    /// `cvt(a)`, converts to signed (zero-extending unsigned values by a bit)
    Cvt,
    /// `neg(a)`
    Neg,
    /// `not(a)`
    Not,
    /// `and(a, b)`
    And,
    /// `or(a, b)`
    Or,
    /// `xor(a, b)`
    Xor,
    /// `andr(a)`
    Andr,
    /// `orr(a)`
    Orr,
    /// `xorr(a)`
    Xorr,
    /// `cat(a, b)`
    Cat,
    /// `bits(a, hi, lo)`
    Bits,
    /// `head(a, n)`
    Head,
    /// `tail(a, n)`
    Tail,
    /// `clip(a)`, clamps `a` into the bounds of the interval result type
    Clip,
}

impl PrimOp {
    /// Gets the textual name of the operation.
    pub fn mnemonic(self) -> &'static str {
        match self {
            PrimOp::Add => "add",
            PrimOp::Sub => "sub",
            PrimOp::Mul => "mul",
            PrimOp::Div => "div",
            PrimOp::Rem => "rem",
            PrimOp::Lt => "lt",
            PrimOp::Leq => "leq",
            PrimOp::Gt => "gt",
            PrimOp::Geq => "geq",
            PrimOp::Eq => "eq",
            PrimOp::Neq => "neq",
            PrimOp::Pad => "pad",
            PrimOp::AsUInt => "asUInt",
            PrimOp::AsSInt => "asSInt",
            PrimOp::AsClock => "asClock",
            PrimOp::AsFixed => "asFixedPoint",
            PrimOp::Shl => "shl",
            PrimOp::Shr => "shr",
            PrimOp::Dshl => "dshl",
            PrimOp::Dshr => "dshr",
            PrimOp::Cvt => "cvt",
            PrimOp::Neg => "neg",
            PrimOp::Not => "not",
            PrimOp::And => "and",
            PrimOp::Or => "or",
            PrimOp::Xor => "xor",
            PrimOp::Andr => "andr",
            PrimOp::Orr => "orr",
            PrimOp::Xorr => "xorr",
            PrimOp::Cat => "cat",
            PrimOp::Bits => "bits",
            PrimOp::Head => "head",
            PrimOp::Tail => "tail",
            PrimOp::Clip => "clip",
        }
    }
}

/// Models an expression in the IR.
///
/// Expressions are immutable values: every pass that rewrites an expression
/// builds a new tree. Each variant carries (or can compute) its own type, see
/// [`Self::ty`].
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub enum Expression {
    /// A reference to a declared signal.
    Reference {
        /// The name of the signal.
        name: String,
        /// The resolved type of the signal.
        ty: Type,
        /// What kind of declaration the name resolves to.
        kind: ReferenceKind,
        /// Whether this occurrence is read or written.
        facing: Facing,
    },
    /// `base.field`
    SubField {
        /// The bundle being accessed.
        base: Box<Expression>,
        /// The field name.
        field: String,
        /// The type of the field.
        ty: Type,
    },
    /// `base[index]` with a constant index.
    SubIndex {
        /// The vector being accessed.
        base: Box<Expression>,
        /// The element index.
        index: usize,
        /// The element type.
        ty: Type,
    },
    /// `base[index]` with a dynamic index.
    SubAccess {
        /// The vector being accessed.
        base: Box<Expression>,
        /// The index expression.
        index: Box<Expression>,
        /// The element type.
        ty: Type,
    },
    /// A constant.
    Literal(Literal),
    /// A primitive operation over `args`, with the static parameters `consts`.
    Primitive {
        /// The operation being performed.
        op: PrimOp,
        /// The operands of the operation.
        args: Vec<Expression>,
        /// Any static integer parameters (e.g. `hi`/`lo` for `bits`).
        consts: SmallVec<[u64; 2]>,
        /// The result type.
        ty: Type,
    },
    /// `mux(cond, tval, fval)`
    Mux {
        /// The selector.
        cond: Box<Expression>,
        /// The value when `cond` is true.
        tval: Box<Expression>,
        /// The value when `cond` is false.
        fval: Box<Expression>,
        /// The result type.
        ty: Type,
    },
    /// `validif(cond, value)`, the value is only defined when `cond` is true.
    ValidIf {
        /// The validity condition.
        cond: Box<Expression>,
        /// The value.
        value: Box<Expression>,
        /// The result type.
        ty: Type,
    },
    /// A value that is unreachable because it derives from a zero-length vector.
    ///
    /// This is scaffolding for the zero-length vector pass and never leaves it,
    /// the verifier rejects any circuit that contains one.
    Placeholder(Type),
}

impl Expression {
    /// Gets the type of the expression.
    pub fn ty(&self) -> Type {
        match self {
            Expression::Reference { ty, .. }
            | Expression::SubField { ty, .. }
            | Expression::SubIndex { ty, .. }
            | Expression::SubAccess { ty, .. }
            | Expression::Primitive { ty, .. }
            | Expression::Mux { ty, .. }
            | Expression::ValidIf { ty, .. }
            | Expression::Placeholder(ty) => ty.clone(),
            Expression::Literal(lit) => lit.ty(),
        }
    }

    /// Gets the type stored inside of the expression without cloning it.
    ///
    /// Literals compute their type instead of storing it, this returns `None` for them.
    pub fn stored_ty(&self) -> Option<&Type> {
        match self {
            Expression::Reference { ty, .. }
            | Expression::SubField { ty, .. }
            | Expression::SubIndex { ty, .. }
            | Expression::SubAccess { ty, .. }
            | Expression::Primitive { ty, .. }
            | Expression::Mux { ty, .. }
            | Expression::ValidIf { ty, .. }
            | Expression::Placeholder(ty) => Some(ty),
            Expression::Literal(_) => None,
        }
    }

    /// Checks if this is a `SubField`, `SubIndex` or `SubAccess`.
    pub fn is_sub_access(&self) -> bool {
        matches!(
            self,
            Expression::SubField { .. } | Expression::SubIndex { .. } | Expression::SubAccess { .. }
        )
    }

    /// If this is an access into an aggregate, gets the aggregate being accessed.
    pub fn access_base(&self) -> Option<&Expression> {
        match self {
            Expression::SubField { base, .. }
            | Expression::SubIndex { base, .. }
            | Expression::SubAccess { base, .. } => Some(base),
            _ => None,
        }
    }

    /// Follows an access chain down to the reference at its root, if there is one.
    ///
    /// `a.b[3][i]` has root `a`.
    pub fn root(&self) -> Option<&Expression> {
        match self {
            Expression::Reference { .. } => Some(self),
            _ => self.access_base().and_then(Expression::root),
        }
    }

    /// If this is a reference, gets the name it refers to.
    pub fn reference_name(&self) -> Option<&str> {
        match self {
            Expression::Reference { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Checks if this is the zero-length vector placeholder.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Expression::Placeholder(_))
    }
}
