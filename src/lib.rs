//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

#![deny(
    unreachable_pub,
    missing_docs,
    missing_abi,
    rust_2018_idioms,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links
)]

//! # Garnet
//!
//! Structural simplification passes over a FIRRTL-style hardware IR.
//!
//! The IR itself lives in [`ir`], the pass machinery in [`pass`] and the
//! passes in [`transforms`]. Every pass assumes that the usual canonicalization
//! (when-expansion, kind resolution, type inference and connection expansion)
//! has already happened, those live outside of this crate.

pub mod ir;
pub mod pass;
pub mod transforms;
pub mod utility;

#[cfg(feature = "dev-tools")]
pub mod cli;

use crate::ir::Circuit;
use crate::pass::{ModuleToCircuitPassAdapter, PassManager, PipelineError, Prerequisite};
use crate::transforms::{InlineSingleAssignmentPass, VerifyCircuitPass, ZeroLengthVecsPass};

/// The names of every pass that [`run_passes`] understands.
pub const PASS_NAMES: [&str; 3] = ["zero-length-vecs", "inline-single-assignment", "verify"];

/// The options for a user-specified pipeline, see [`run_passes`].
#[derive(Clone, Debug, Default)]
pub struct PipelineOptions {
    /// Whether to insert verify passes before and after every pass.
    pub verify: bool,
    /// How many modules to process at the same time. `None` means one at a time.
    pub jobs: Option<usize>,
    /// The passes to run, in order.
    pub passes: Vec<String>,
}

/// A helper function that handles "run these passes specified by the user" in a way that multiple
/// tools can use.
///
/// This is not intended to be used for pre-determined pass pipelines, but is useful for tools
/// that work like `garnet-opt`. The input is assumed to have gone through every
/// canonicalization pass already.
///
/// ```
/// # use garnet::ir::*;
/// # use garnet::PipelineOptions;
/// let mut b = ModuleBuilder::new("Top");
/// let x = b.input("x", Type::uint(4));
/// let out = b.output("out", Type::uint(4));
/// let n = b.node("n", Expression::as_uint(x.clone(), Type::uint(4)));
///
/// b.connect(out, n);
///
/// let circuit = CircuitBuilder::new("Top").module(b.build()).build();
/// let options = PipelineOptions {
///     verify: true,
///     jobs: None,
///     passes: vec!["inline-single-assignment".into()],
/// };
///
/// let result = garnet::run_passes(circuit, &options).unwrap();
///
/// assert_eq!(result.modules[0].body[0], Statement::Empty);
/// ```
pub fn run_passes(circuit: Circuit, options: &PipelineOptions) -> Result<Circuit, PipelineError> {
    let jobs = options.jobs.unwrap_or(1);
    let mut pm = PassManager::new();

    pm.assume_established(Prerequisite::all());

    if options.verify {
        pm.add_pass(VerifyCircuitPass);
    }

    for pass in options.passes.iter() {
        match pass.as_str() {
            "zero-length-vecs" => {
                pm.add_pass(ModuleToCircuitPassAdapter::adapt_parallel(
                    ZeroLengthVecsPass,
                    jobs,
                ));
            }
            "inline-single-assignment" => {
                pm.add_pass(ModuleToCircuitPassAdapter::adapt_parallel(
                    InlineSingleAssignmentPass,
                    jobs,
                ));
            }
            "verify" => pm.add_pass(VerifyCircuitPass),
            _ => return Err(PipelineError::UnknownPass(pass.clone())),
        }

        if options.verify {
            pm.add_pass(VerifyCircuitPass);
        }
    }

    pm.run(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::*;

    fn sample() -> Circuit {
        let mut b = ModuleBuilder::new("Top");
        let i = b.input("i", Type::uint(2));
        let out = b.output("out", Type::uint(8));
        let w = b.wire("w", Type::vector(Type::uint(8), 0));
        let n = b.node("n", Expression::sub_access(w, i));

        b.connect(out, n);

        CircuitBuilder::new("Top").module(b.build()).build()
    }

    fn options(passes: &[&str]) -> PipelineOptions {
        PipelineOptions {
            verify: true,
            jobs: Some(2),
            passes: passes.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn unknown_pass_is_rejected() {
        match run_passes(sample(), &options(&["zero-length-vecs", "dce"])) {
            Err(PipelineError::UnknownPass(name)) => assert_eq!(name, "dce"),
            other => panic!("expected unknown pass, got {other:?}"),
        }
    }

    #[test]
    fn full_pipeline() {
        let result = run_passes(
            sample(),
            &options(&["zero-length-vecs", "inline-single-assignment"]),
        )
        .unwrap();

        let body = Statement::Block(result.modules[0].body.clone()).flatten();
        let out = Expression::port("out", Type::uint(8)).into_sink();

        assert_eq!(
            body,
            vec![
                Statement::DefWire {
                    name: "w".into(),
                    ty: Type::vector(Type::uint(8), 0),
                },
                Statement::Connect {
                    sink: out,
                    source: Expression::uint_lit(0, 8),
                },
            ]
        );
    }

    #[test]
    fn verification_rejects_placeholders() {
        let mut circuit = sample();

        circuit.modules[0].body.push(Statement::IsInvalid(Expression::Placeholder(
            Type::uint(1),
        )));

        assert!(matches!(
            run_passes(circuit, &options(&[])),
            Err(PipelineError::Verify(errors)) if !errors.is_empty()
        ));
    }
}
