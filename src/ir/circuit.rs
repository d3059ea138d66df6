//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::ir::{Statement, Type};
use static_assertions::assert_impl_all;

#[cfg(feature = "enable-serde")]
use serde::{Deserialize, Serialize};

/// The direction of a module port.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub enum PortDirection {
    /// Driven from outside of the module.
    Input,
    /// Driven from inside of the module.
    Output,
}

/// A single port of a module.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub struct Port {
    /// The name of the port.
    pub name: String,
    /// Which way the port is driven.
    pub direction: PortDirection,
    /// The type of the port.
    pub ty: Type,
}

/// A single hardware module: a name, a list of ports and a body.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub struct Module {
    /// The name of the module, unique inside of the circuit.
    pub name: String,
    /// The ports of the module, in declaration order.
    pub ports: Vec<Port>,
    /// The statements making up the body of the module, in order.
    pub body: Vec<Statement>,
}

impl Module {
    /// Creates a module with no ports and an empty body.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ports: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Creates a module with the same name and ports, but with a new body.
    pub fn with_body(self, body: Vec<Statement>) -> Self {
        Self {
            name: self.name,
            ports: self.ports,
            body,
        }
    }
}

/// Contains the data for a whole circuit: every module, plus the name of the
/// top-level module.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub struct Circuit {
    /// The name of the top-level module.
    pub main: String,
    /// Every module in the circuit, in order.
    pub modules: Vec<Module>,
}

// modules get shipped off to worker threads
assert_impl_all!(Circuit: Send, Sync);
assert_impl_all!(Module: Send, Sync);

impl Circuit {
    /// Creates a circuit with the given top-level module name and no modules.
    pub fn new(main: impl Into<String>) -> Self {
        Self {
            main: main.into(),
            modules: Vec::new(),
        }
    }

    /// Looks up a module by name.
    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|module| module.name == name)
    }

    /// Gets the top-level module, if the circuit actually contains it.
    pub fn main_module(&self) -> Option<&Module> {
        self.module(&self.main)
    }
}
