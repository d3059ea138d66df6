//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

//! Defines the "transform" passes over the IR.
//!
//! These are the passes that can (potentially) modify a circuit, and don't
//! logically yield a result other than the circuit that exists after they run.
//!
//! The verify pass is a "transform pass" even though it never changes anything,
//! it exists to reject circuits that break the invariants the other passes
//! assume.

mod inline;
mod verify;
mod zero_length_vecs;

pub use inline::*;
pub use verify::*;
pub use zero_length_vecs::*;
