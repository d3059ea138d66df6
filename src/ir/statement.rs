//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::ir::{Expression, Type};

#[cfg(feature = "enable-serde")]
use serde::{Deserialize, Serialize};

/// Models a statement in the body of a module.
///
/// Statements form a tree, a [`Statement::Block`] exclusively owns the statements
/// inside of it. Conditional assignment has already been flattened by the time
/// any pass in this crate sees the IR, so there is no `when` statement.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub enum Statement {
    /// `sink <= source`
    Connect {
        /// The location being written.
        sink: Expression,
        /// The value being written.
        source: Expression,
    },
    /// `target is invalid`
    IsInvalid(Expression),
    /// `attach(a, b, ...)`, joins analog signals together.
    Attach(Vec<Expression>),
    /// `wire name : ty`
    DefWire {
        /// The name of the wire.
        name: String,
        /// The type of the wire.
        ty: Type,
    },
    /// `node name = value`
    DefNode {
        /// The name of the node.
        name: String,
        /// The value of the node.
        value: Expression,
    },
    /// `reg name : ty, clock with (reset => (signal, init))`
    DefRegister {
        /// The name of the register.
        name: String,
        /// The type of the register.
        ty: Type,
        /// The clock the register is updated on.
        clock: Expression,
        /// The reset signal and the value to reset to, if the register has one.
        reset: Option<(Expression, Expression)>,
    },
    /// `printf(clock, enable, "format", args...)`
    Print {
        /// The clock the print is triggered on.
        clock: Expression,
        /// Whether the print is enabled.
        enable: Expression,
        /// The format string.
        format: String,
        /// The format arguments.
        args: Vec<Expression>,
    },
    /// A sequence of statements.
    Block(Vec<Statement>),
    /// A statement that does nothing.
    Empty,
}

impl Statement {
    /// Checks if this is [`Statement::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Statement::Empty)
    }

    /// Gets the name declared by this statement, if it declares one.
    pub fn declared_name(&self) -> Option<&str> {
        match self {
            Statement::DefWire { name, .. }
            | Statement::DefNode { name, .. }
            | Statement::DefRegister { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Removes every [`Statement::Empty`] and splices nested blocks into their parent,
    /// returning the resulting flat list of statements.
    ///
    /// ```
    /// # use garnet::ir::*;
    /// let w = Statement::DefWire { name: "w".into(), ty: Type::uint(1) };
    /// let nested = Statement::Block(vec![
    ///     Statement::Empty,
    ///     Statement::Block(vec![w.clone(), Statement::Empty]),
    /// ]);
    ///
    /// assert_eq!(nested.flatten(), vec![w]);
    /// ```
    pub fn flatten(self) -> Vec<Statement> {
        let mut out = Vec::new();

        self.flatten_into(&mut out);

        out
    }

    fn flatten_into(self, out: &mut Vec<Statement>) {
        match self {
            Statement::Block(stmts) => {
                for stmt in stmts {
                    stmt.flatten_into(out);
                }
            }
            Statement::Empty => {}
            other => out.push(other),
        }
    }
}
