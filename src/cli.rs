//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

//! Contains utility code specifically for the CLI tools located in
//! the `tools/` subdirectory.
//!
//! Every tool should look/feel uniform, so the shared arguments are pulled
//! into this module and then used in the drivers of the different tools.

use crate::PipelineOptions;
use bpaf::{construct, OptionParser, Parser};
use std::path::PathBuf;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Basic options that every CLI tool in the suite takes in.
pub struct BaseOptions {
    /// The file to output results to
    pub output: Option<PathBuf>,
    /// Whether or not to run the logging in verbose mode.
    pub verbose: bool,
}

impl BaseOptions {
    /// Installs the global logger, at `debug` level with `--verbose` and at `warn`
    /// level otherwise. `RUST_LOG` still overrides both.
    pub fn init_logging(&self) {
        let level = if self.verbose { "debug" } else { "warn" };

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
            .format_timestamp(None)
            .init();
    }
}

/// Returns a [`OptionParser`] preconfigured with the standard options and
/// additional tool-specific options.
pub fn tool_with<T>(
    description: &'static str,
    usage: &'static str,
    additional: impl Parser<T> + 'static,
) -> OptionParser<(T, BaseOptions)> {
    let res = construct!(additional, default());

    res.to_options()
        .descr(description)
        .version(VERSION)
        .usage(usage)
}

/// Gets the baseline default options that every tool needs.
pub fn default() -> impl Parser<BaseOptions> {
    let output = output();
    let verbose = verbose();

    construct!(BaseOptions { output, verbose })
}

/// Gets the output file specified on the CLI, if one exists.
pub fn output() -> impl Parser<Option<PathBuf>> {
    bpaf::long("output")
        .short('o')
        .help("the file to output to")
        .argument::<PathBuf>("FILE")
        .optional()
}

/// Checks for the presence of `-v` or `--verbose`
pub fn verbose() -> impl Parser<bool> {
    bpaf::long("verbose")
        .short('v')
        .help("enable verbose output")
        .flag(true, false)
}

/// Checks for the presence of `--verify`
pub fn verify() -> impl Parser<bool> {
    bpaf::long("verify")
        .help("verify the circuit before and after every pass")
        .flag(true, false)
}

/// Gets the number of modules to process at the same time
pub fn jobs() -> impl Parser<Option<usize>> {
    bpaf::long("jobs")
        .short('j')
        .help("the number of modules to run passes over concurrently")
        .argument::<usize>("JOBS")
        .guard(|jobs| *jobs > 0, "must run at least one job")
        .optional()
}

/// Gets a list of passes to run over the IR
pub fn passes() -> impl Parser<Vec<String>> {
    bpaf::long("passes")
        .short('p')
        .help("a pass to run over the input")
        .argument::<String>("PASS-NAME")
        .guard(
            |pass| crate::PASS_NAMES.contains(&pass.as_str()),
            "pass must be one of 'zero-length-vecs', 'inline-single-assignment', 'verify'",
        )
        .many()
}

/// Gets the built-in sample circuit to use as input, if one was named
pub fn sample() -> impl Parser<Option<String>> {
    bpaf::long("sample")
        .short('s')
        .help("the built-in sample circuit to run the passes over")
        .argument::<String>("NAME")
        .optional()
}

/// Gets every option that configures the pass pipeline.
pub fn pipeline() -> impl Parser<PipelineOptions> {
    let verify = verify();
    let jobs = jobs();
    let passes = passes();

    construct!(PipelineOptions {
        verify,
        jobs,
        passes,
    })
}
