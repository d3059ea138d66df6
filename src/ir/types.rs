//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

#[cfg(feature = "enable-serde")]
use serde::{Deserialize, Serialize};

/// The bit-width of a ground type.
///
/// Width inference runs after the passes in this crate, so a width may still
/// be unknown when the IR reaches them. Two unknown widths compare equal.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub enum Width {
    /// A width that has been declared or inferred.
    Known(u32),
    /// A width that has not been inferred yet.
    Unknown,
}

impl Width {
    /// Gets the width if it's known.
    pub fn known(self) -> Option<u32> {
        match self {
            Width::Known(w) => Some(w),
            Width::Unknown => None,
        }
    }
}

impl From<u32> for Width {
    fn from(width: u32) -> Self {
        Width::Known(width)
    }
}

/// One end of an interval type's range.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub enum Bound {
    /// The bound is excluded from the range.
    Open(i64),
    /// The bound is included in the range.
    Closed(i64),
    /// The bound has not been inferred yet.
    Unknown,
}

/// A single field of a bundle type.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub struct Field {
    /// The field's name, unique inside of its bundle.
    pub name: String,
    /// Whether the field flows in the opposite direction to the bundle.
    pub flipped: bool,
    /// The type of the field.
    pub ty: Type,
}

/// Models a type in the IR.
///
/// Ground types are scalars, aggregates (vectors and bundles) are built out
/// of other types and are only ever accessed through `SubField`/`SubIndex`/`SubAccess`
/// chains once connection expansion has run.
///
/// ```
/// # use garnet::ir::*;
/// let vec = Type::vector(Type::uint(8), 0);
///
/// assert!(vec.is_aggregate());
/// assert!(vec.is_zero_length_vector());
/// assert_eq!(vec.element(), Some(&Type::uint(8)));
/// ```
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub enum Type {
    /// An unsigned integer.
    UInt(Width),
    /// A two's complement signed integer.
    SInt(Width),
    /// A fixed-point number with `point` fractional bits.
    Fixed {
        /// The total width.
        width: Width,
        /// The number of bits after the binary point.
        point: Width,
    },
    /// A value constrained to the range `[lower, upper]`, with `point` bits
    /// of precision after the binary point.
    Interval {
        /// The lower end of the range.
        lower: Bound,
        /// The upper end of the range.
        upper: Bound,
        /// The binary point of the interval.
        point: Width,
    },
    /// A clock signal.
    Clock,
    /// An undirected (analog) wire, only ever joined through `attach`.
    Analog(Width),
    /// A fixed-length homogeneous array.
    Vector(Box<Type>, usize),
    /// A set of named heterogeneous fields.
    Bundle(Vec<Field>),
}

impl Type {
    /// Checks if the type is a scalar type.
    pub fn is_ground(&self) -> bool {
        !self.is_aggregate()
    }

    /// Checks if the type is a vector or a bundle.
    pub fn is_aggregate(&self) -> bool {
        matches!(self, Type::Vector(_, _) | Type::Bundle(_))
    }

    /// Checks if the type is a vector with no elements.
    pub fn is_zero_length_vector(&self) -> bool {
        matches!(self, Type::Vector(_, 0))
    }

    /// Checks if the type is an analog type.
    pub fn is_analog(&self) -> bool {
        matches!(self, Type::Analog(_))
    }

    /// If this is a vector, gets the element type.
    pub fn element(&self) -> Option<&Type> {
        match self {
            Type::Vector(elem, _) => Some(elem),
            _ => None,
        }
    }

    /// If this is a bundle, looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        match self {
            Type::Bundle(fields) => fields.iter().find(|field| field.name == name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_queries() {
        let bundle = Type::bundle(&[("a", Type::uint(1)), ("b", Type::vector(Type::sint(4), 3))]);

        assert!(bundle.is_aggregate());
        assert!(!bundle.is_zero_length_vector());
        assert_eq!(bundle.field("a").map(|f| &f.ty), Some(&Type::uint(1)));
        assert_eq!(bundle.field("c"), None);
        assert_eq!(bundle.element(), None);

        let inner = bundle.field("b").unwrap();

        assert_eq!(inner.ty.element(), Some(&Type::sint(4)));
        assert!(Type::Clock.is_ground());
        assert!(Type::analog(1).is_ground());
    }

    #[test]
    fn unknown_widths_compare_equal() {
        assert_eq!(Type::UInt(Width::Unknown), Type::UInt(Width::Unknown));
        assert_ne!(Type::UInt(Width::Unknown), Type::uint(8));
        assert_eq!(Width::Known(3).known(), Some(3));
        assert_eq!(Width::Unknown.known(), None);
    }

    #[cfg(feature = "enable-serde")]
    use serde_test::{assert_tokens, Token};

    #[test]
    #[cfg(feature = "enable-serde")]
    fn serialize_ground() {
        assert_tokens(
            &Type::uint(8),
            &[
                Token::NewtypeVariant {
                    name: "Type",
                    variant: "UInt",
                },
                Token::NewtypeVariant {
                    name: "Width",
                    variant: "Known",
                },
                Token::U32(8),
            ],
        );
    }

    #[test]
    #[cfg(feature = "enable-serde")]
    fn serialize_zero_length_vector() {
        assert_tokens(
            &Type::vector(Type::Clock, 0),
            &[
                Token::TupleVariant {
                    name: "Type",
                    variant: "Vector",
                    len: 2,
                },
                Token::UnitVariant {
                    name: "Type",
                    variant: "Clock",
                },
                Token::U64(0),
                Token::TupleVariantEnd,
            ],
        );
    }
}
