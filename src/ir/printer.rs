//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

//! Human-readable textual form of the IR.
//!
//! This is meant for debugging and for test output, it is not the persisted
//! format of the IR. The zero-length vector placeholder is printed as
//! `$dontcare<type>` so that a leak is obvious.

use crate::ir::*;
use std::fmt;
use std::fmt::{Display, Formatter};

const INDENT: &str = "  ";

impl Display for Width {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Width::Known(w) => write!(f, "<{w}>"),
            Width::Unknown => Ok(()),
        }
    }
}

fn write_point(f: &mut Formatter<'_>, point: Width) -> fmt::Result {
    match point {
        Width::Known(p) => write!(f, "<<{p}>>"),
        Width::Unknown => Ok(()),
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Type::UInt(w) => write!(f, "UInt{w}"),
            Type::SInt(w) => write!(f, "SInt{w}"),
            Type::Fixed { width, point } => {
                write!(f, "Fixed{width}")?;
                write_point(f, *point)
            }
            Type::Interval {
                lower,
                upper,
                point,
            } => {
                let open = match lower {
                    Bound::Open(v) => format!("({v}"),
                    Bound::Closed(v) => format!("[{v}"),
                    Bound::Unknown => "[?".to_string(),
                };
                let close = match upper {
                    Bound::Open(v) => format!("{v})"),
                    Bound::Closed(v) => format!("{v}]"),
                    Bound::Unknown => "?]".to_string(),
                };

                write!(f, "Interval{open}, {close}")?;

                match point {
                    Width::Known(p) => write!(f, ".{p}"),
                    Width::Unknown => Ok(()),
                }
            }
            Type::Clock => write!(f, "Clock"),
            Type::Analog(w) => write!(f, "Analog{w}"),
            Type::Vector(elem, len) => write!(f, "{elem}[{len}]"),
            Type::Bundle(fields) => {
                write!(f, "{{")?;

                for (i, field) in fields.iter().enumerate() {
                    let sep = if i == 0 { "" } else { ", " };
                    let flip = if field.flipped { "flip " } else { "" };

                    write!(f, "{sep}{flip}{} : {}", field.name, field.ty)?;
                }

                write!(f, "}}")
            }
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Literal::UInt { value, width } => write!(f, "UInt{width}({value})"),
            Literal::SInt { value, width } => write!(f, "SInt{width}({value})"),
            Literal::Fixed {
                value,
                width,
                point,
            } => {
                write!(f, "Fixed{width}")?;
                write_point(f, *point)?;
                write!(f, "({value})")
            }
            Literal::Interval { value, ty } => write!(f, "{ty}({value})"),
        }
    }
}

fn write_list<T: Display>(f: &mut Formatter<'_>, items: impl IntoIterator<Item = T>) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i != 0 {
            write!(f, ", ")?;
        }

        write!(f, "{item}")?;
    }

    Ok(())
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Reference { name, .. } => write!(f, "{name}"),
            Expression::SubField { base, field, .. } => write!(f, "{base}.{field}"),
            Expression::SubIndex { base, index, .. } => write!(f, "{base}[{index}]"),
            Expression::SubAccess { base, index, .. } => write!(f, "{base}[{index}]"),
            Expression::Literal(lit) => write!(f, "{lit}"),
            Expression::Primitive {
                op, args, consts, ..
            } => {
                write!(f, "{}(", op.mnemonic())?;
                write_list(f, args.iter())?;

                if !args.is_empty() && !consts.is_empty() {
                    write!(f, ", ")?;
                }

                write_list(f, consts.iter())?;
                write!(f, ")")
            }
            Expression::Mux {
                cond, tval, fval, ..
            } => write!(f, "mux({cond}, {tval}, {fval})"),
            Expression::ValidIf { cond, value, .. } => write!(f, "validif({cond}, {value})"),
            Expression::Placeholder(ty) => write!(f, "$dontcare<{ty}>"),
        }
    }
}

struct Indented<'a>(&'a Statement, usize);

impl Display for Indented<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Indented(stmt, depth) = *self;
        let pad = INDENT.repeat(depth);

        match stmt {
            Statement::Connect { sink, source } => writeln!(f, "{pad}{sink} <= {source}"),
            Statement::IsInvalid(target) => writeln!(f, "{pad}{target} is invalid"),
            Statement::Attach(members) => {
                write!(f, "{pad}attach(")?;
                write_list(f, members.iter())?;
                writeln!(f, ")")
            }
            Statement::DefWire { name, ty } => writeln!(f, "{pad}wire {name} : {ty}"),
            Statement::DefNode { name, value } => writeln!(f, "{pad}node {name} = {value}"),
            Statement::DefRegister {
                name,
                ty,
                clock,
                reset,
            } => match reset {
                Some((signal, init)) => writeln!(
                    f,
                    "{pad}reg {name} : {ty}, {clock} with : (reset => ({signal}, {init}))"
                ),
                None => writeln!(f, "{pad}reg {name} : {ty}, {clock}"),
            },
            Statement::Print {
                clock,
                enable,
                format,
                args,
            } => {
                write!(f, "{pad}printf({clock}, {enable}, {format:?}")?;

                for arg in args {
                    write!(f, ", {arg}")?;
                }

                writeln!(f, ")")
            }
            Statement::Block(stmts) => {
                for stmt in stmts {
                    write!(f, "{}", Indented(stmt, depth))?;
                }

                Ok(())
            }
            Statement::Empty => writeln!(f, "{pad}skip"),
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Indented(self, 0))
    }
}

impl Display for Module {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "module {} :", self.name)?;

        for port in self.ports.iter() {
            let dir = match port.direction {
                PortDirection::Input => "input",
                PortDirection::Output => "output",
            };

            writeln!(f, "{INDENT}{dir} {} : {}", port.name, port.ty)?;
        }

        if !self.ports.is_empty() && !self.body.is_empty() {
            writeln!(f)?;
        }

        for stmt in self.body.iter() {
            write!(f, "{}", Indented(stmt, 1))?;
        }

        Ok(())
    }
}

impl Display for Circuit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "circuit {} :", self.main)?;

        for (i, module) in self.modules.iter().enumerate() {
            if i != 0 {
                writeln!(f)?;
            }

            for line in module.to_string().lines() {
                writeln!(f, "{INDENT}{line}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_types() {
        assert_eq!(Type::uint(8).to_string(), "UInt<8>");
        assert_eq!(Type::UInt(Width::Unknown).to_string(), "UInt");
        assert_eq!(Type::vector(Type::sint(4), 0).to_string(), "SInt<4>[0]");
        assert_eq!(Type::fixed(8, 2).to_string(), "Fixed<8><<2>>");
        assert_eq!(Type::interval(-2, 5, 1).to_string(), "Interval[-2, 5].1");
        assert_eq!(
            Type::bundle(&[("a", Type::uint(1)), ("b", Type::Clock)]).to_string(),
            "{a : UInt<1>, b : Clock}"
        );
    }

    #[test]
    fn print_expressions() {
        let w = Expression::wire("w", Type::vector(Type::uint(8), 0));
        let i = Expression::port("i", Type::uint(1));
        let bits = Expression::prim_with(PrimOp::Bits, [i.clone()], &[0, 0], Type::uint(1));

        assert_eq!(Expression::sub_access(w.clone(), i).to_string(), "w[i]");
        assert_eq!(Expression::sub_index(w, 0).to_string(), "w[0]");
        assert_eq!(bits.to_string(), "bits(i, 0, 0)");
        assert_eq!(
            Expression::Placeholder(Type::vector(Type::uint(1), 2)).to_string(),
            "$dontcare<UInt<1>[2]>"
        );
    }

    #[test]
    fn print_module() {
        let mut b = ModuleBuilder::new("Top");
        let a = b.input("a", Type::uint(8));
        let out = b.output("out", Type::uint(8));
        let w = b.wire("w", Type::uint(8));

        b.connect(w.clone(), a);
        b.connect(out, w);

        let expected = "module Top :\n  input a : UInt<8>\n  output out : UInt<8>\n\n  wire w : UInt<8>\n  w <= a\n  out <= w\n";

        assert_eq!(b.build().to_string(), expected);
    }
}
