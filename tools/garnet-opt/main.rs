//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

mod samples;

use ansi_term::Color::{Green, Red, White};
use garnet::cli;
use garnet::cli::BaseOptions;
use garnet::ir::{Circuit, Statement};
use garnet::PipelineOptions;
use std::io::ErrorKind;
use std::{fs, io};

fn main() -> io::Result<()> {
    let (base, mut pipeline, sample) = parse_options();

    base.init_logging();

    if pipeline.passes.is_empty() {
        pipeline.passes = vec!["zero-length-vecs".into(), "inline-single-assignment".into()];
    }

    let chosen: Vec<(&str, Circuit)> = match sample.as_deref() {
        Some(name) => match samples::by_name(name) {
            Some(circuit) => vec![(name, circuit)],
            None => {
                let known = samples::NAMES.join("', '");

                return Err(io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("unknown sample `{name}`, expected one of '{known}'"),
                ));
            }
        },
        None => samples::NAMES
            .iter()
            .filter_map(|&name| samples::by_name(name).map(|c| (name, c)))
            .collect(),
    };

    let mut emitted = String::new();

    for (name, circuit) in chosen {
        let before = tidy(&circuit);
        let after = match garnet::run_passes(circuit, &pipeline) {
            Ok(circuit) => circuit,
            Err(e) => {
                eprintln!("{}: {e}", Red.bold().paint("error"));

                if let garnet::pass::PipelineError::Verify(errors) = &e {
                    for error in errors {
                        eprintln!("  {error}");
                    }
                }

                return Err(io::Error::new(ErrorKind::InvalidData, "pipeline failed"));
            }
        };

        let after = tidy(&after);

        println!("{}", White.bold().paint(format!("sample '{name}'")));
        println!("{}", prettify_diff(&before, &after));

        emitted += &after;
    }

    if let Some(path) = &base.output {
        fs::write(path, emitted)?;
    }

    Ok(())
}

fn parse_options() -> (BaseOptions, PipelineOptions, Option<String>) {
    let pipeline = cli::pipeline();
    let sample = cli::sample();
    let ((pipeline, sample), base) = cli::tool_with(
        "garnet circuit simplifier, runs passes over the built-in sample circuits",
        "Usage: garnet-opt [options]",
        bpaf::construct!(pipeline, sample),
    )
    .run();

    (base, pipeline, sample)
}

// prints the circuit with every `Empty` and nested block flattened out
fn tidy(circuit: &Circuit) -> String {
    let modules = circuit
        .modules
        .iter()
        .map(|m| {
            let body = Statement::Block(m.body.clone()).flatten();

            m.clone().with_body(body)
        })
        .collect();

    Circuit {
        main: circuit.main.clone(),
        modules,
    }
    .to_string()
}

fn prettify_diff(before: &str, after: &str) -> String {
    let mut result = String::new();

    for (line, diff) in diff::lines(before, after).into_iter().enumerate() {
        result += &format!("{:3} |", line + 1);

        let line = match diff {
            diff::Result::Left(l) => Red.paint(format!("- {l}")).to_string(),
            diff::Result::Both(l, _) => format!("  {l}"),
            diff::Result::Right(r) => Green.paint(format!("+ {r}")).to_string(),
        };

        result += &line;
        result += "\n";
    }

    result
}
