//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::pass::Prerequisite;
use crate::transforms::VerifyError;
use thiserror::Error;

/// The ways that running a pipeline of passes can fail.
///
/// The simplification passes themselves never fail, these all come from the
/// machinery around them.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A pass was asked to run before one of the passes it depends on.
    #[error("pass `{pass}` requires `{prerequisite}` to have run first")]
    MissingPrerequisite {
        /// The pass that was about to run.
        pass: &'static str,
        /// The invariant that was not established yet.
        prerequisite: Prerequisite,
    },
    /// The circuit violates an invariant the pipeline relies on.
    #[error("circuit failed verification with {} error(s)", .0.len())]
    Verify(Vec<VerifyError>),
    /// A pass name given by the user doesn't correspond to any pass.
    #[error("unknown pass `{0}`")]
    UnknownPass(String),
    /// A worker thread panicked while running a pass over a module.
    #[error("pass `{pass}` panicked while running over module `{module}`")]
    WorkerPanicked {
        /// The pass that was running.
        pass: &'static str,
        /// The module it was running over.
        module: String,
    },
}
