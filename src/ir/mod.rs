//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

//! Provides the interfaces and the types required to properly
//! manipulate the circuit IR.
//!
//! This only contains the code for representing and traversing the IR itself,
//! the transforms done by the simplification passes are defined in
//! [`crate::transforms`].

mod builders;
mod circuit;
mod expression;
mod printer;
mod statement;
mod traversal;
mod types;

pub use builders::*;
pub use circuit::*;
pub use expression::*;
pub use statement::*;
pub use types::*;
