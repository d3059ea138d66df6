//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use std::fmt;

/// The canonicalization passes that the passes in this crate may depend on.
///
/// None of these are implemented here, they run earlier in the pipeline and
/// establish the invariants that the passes here rely on.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Prerequisite {
    /// Conditional assignments (`when` blocks) have been flattened into muxes.
    ExpandWhens,
    /// Every reference carries a resolved [`ReferenceKind`](crate::ir::ReferenceKind).
    ResolveKinds,
    /// Every expression carries a resolved type.
    InferTypes,
    /// Aggregate connects have been expanded into connects of ground-typed
    /// access chains.
    ExpandConnects,
}

impl Prerequisite {
    /// Gets the name of the pass that establishes this invariant.
    pub fn name(self) -> &'static str {
        match self {
            Prerequisite::ExpandWhens => "expand-whens",
            Prerequisite::ResolveKinds => "resolve-kinds",
            Prerequisite::InferTypes => "infer-types",
            Prerequisite::ExpandConnects => "expand-connects",
        }
    }

    /// Every prerequisite, in the order the pipeline establishes them.
    pub fn all() -> &'static [Prerequisite] {
        &[
            Prerequisite::ExpandWhens,
            Prerequisite::ResolveKinds,
            Prerequisite::InferTypes,
            Prerequisite::ExpandConnects,
        ]
    }
}

impl fmt::Display for Prerequisite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static scheduling metadata for a single pass.
///
/// This is plain data: the scheduler reads it, passes never consult it
/// themselves.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PassInfo {
    /// The user-facing name of the pass.
    pub name: &'static str,
    /// The passes that must have run on the circuit before this one.
    pub prerequisites: &'static [Prerequisite],
    /// Whether the pass keeps every invariant established by other passes, i.e.
    /// nothing needs to be re-run after it.
    pub preserves_all: bool,
}

impl PassInfo {
    /// Checks if `prereq` must run before this pass.
    pub fn requires(&self, prereq: Prerequisite) -> bool {
        self.prerequisites.contains(&prereq)
    }
}
