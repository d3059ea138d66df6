//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

//! Defines the pass infrastructure used by the simplification pipeline.
//!
//! Passes at their core are just pure functions from a circuit to a new circuit:
//!
//! ```
//! # use garnet::ir::Circuit;
//! struct Pass { /* ... */ }
//!
//! impl Pass {
//!     fn run(&self, ir: Circuit) -> Circuit { /* ... */ ir }
//! }
//! ```
//!
//! Of course it's a bit more complicated than that, but at their core,
//! every single pass boils down to roughly that pattern.
//!
//! # Module vs. Circuit Passes
//! Most passes only ever look at one module at a time, and those implement
//! [`ModuleTransformPass`]. Since they can't observe any other module they can
//! be run over several modules at once, see [`ModuleToCircuitPassAdapter`].
//!
//! Passes that need the whole circuit (or that can fail, like verification)
//! implement [`CircuitTransformPass`] directly.
//!
//! # Pass Metadata
//! Each pass carries a [`PassInfo`]: the canonicalization passes that must
//! have run before it, and whether it keeps every invariant those passes
//! established. The [`PassManager`] uses this to refuse to run passes out of
//! order, it does not reorder anything itself.

mod error;
mod info;
mod manager;
mod transform;

pub use error::*;
pub use info::*;
pub use manager::*;
pub use transform::*;
