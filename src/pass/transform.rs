//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::ir::{Circuit, Module};
use crate::pass::{PassInfo, PipelineError};

/// Models a pass that transforms a whole circuit.
///
/// This is the granularity the [`PassManager`](crate::pass::PassManager) works at,
/// module-local passes are adapted into one of these with
/// [`ModuleToCircuitPassAdapter`](crate::pass::ModuleToCircuitPassAdapter).
pub trait CircuitTransformPass {
    /// Gets the scheduling metadata of the pass.
    fn info(&self) -> &'static PassInfo;

    /// Performs the transformation over a given circuit.
    ///
    /// Transformations are expected to act as-if they were pure, i.e. running the
    /// same pass over the same IR should produce equivalent IR each time. The only
    /// reason this is fallible is for passes (like verification) that exist to
    /// reject IR.
    fn run(&mut self, circuit: Circuit) -> Result<Circuit, PipelineError>;
}

/// Defines a transformation over a single module, independent of every other
/// module in the circuit.
///
/// Module passes take `&self` and must be `Send + Sync`: any per-module state
/// lives on the stack of [`Self::run`], which makes it safe to run the same pass
/// over several modules at the same time.
pub trait ModuleTransformPass: Send + Sync {
    /// Gets the scheduling metadata of the pass.
    fn info(&self) -> &'static PassInfo;

    /// Performs the transformation over a given module, producing a new module.
    fn run(&self, module: Module) -> Module;
}
