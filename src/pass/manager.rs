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
use crate::pass::*;
use crate::utility::SaHashSet;
use std::sync::{mpsc, Arc};
use threadpool::ThreadPool;

/// Manages running an ordered list of passes over a circuit.
///
/// This does not schedule anything, passes run in exactly the order they were
/// added. It does however track which invariants have been established, and
/// refuses to run a pass whose prerequisites aren't among them.
///
/// Since the canonicalization passes live outside of this crate, whatever they
/// established has to be declared up-front with [`Self::assume_established`].
#[derive(Default)]
pub struct PassManager {
    passes: Vec<Box<dyn CircuitTransformPass>>,
    established: SaHashSet<Prerequisite>,
}

impl PassManager {
    /// Creates a new, empty, pass manager that assumes nothing about its input.
    pub fn new() -> Self {
        Self {
            passes: Vec::default(),
            established: SaHashSet::default(),
        }
    }

    /// Declares that the input circuit already satisfies the invariants of `prereqs`.
    pub fn assume_established(&mut self, prereqs: &[Prerequisite]) {
        self.established.extend(prereqs.iter().copied());
    }

    /// Adds a transformation pass to the pass manager. This pass's order is defined
    /// relative to other calls to [`Self::add_pass`].
    pub fn add_pass<T: CircuitTransformPass + 'static>(&mut self, pass: T) {
        self.passes.push(Box::new(pass));
    }

    /// Gets the number of passes that have been added.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Checks if no passes have been added.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Runs every pass in order over `circuit`.
    pub fn run(&mut self, circuit: Circuit) -> Result<Circuit, PipelineError> {
        let mut circuit = circuit;

        for pass in self.passes.iter_mut() {
            let info = pass.info();

            if let Some(missing) = info
                .prerequisites
                .iter()
                .find(|prereq| !self.established.contains(*prereq))
            {
                return Err(PipelineError::MissingPrerequisite {
                    pass: info.name,
                    prerequisite: *missing,
                });
            }

            log::debug!("running pass `{}` over circuit `{}`", info.name, circuit.main);

            circuit = pass.run(circuit)?;

            // a pass that doesn't preserve everything may have broken invariants that
            // later passes want, those need to be re-established
            if !info.preserves_all {
                self.established.clear();
            }
        }

        Ok(circuit)
    }
}

/// Adapts a module transform pass to a circuit pass that runs the given
/// module pass over every module in the circuit.
///
/// With more than one job, modules are processed on a thread pool. Results are
/// always put back in the original module order.
pub struct ModuleToCircuitPassAdapter {
    pass: Arc<dyn ModuleTransformPass>,
    jobs: usize,
}

impl ModuleToCircuitPassAdapter {
    /// Adapts a given pass into a [`ModuleToCircuitPassAdapter`] that runs over one
    /// module at a time.
    pub fn adapt<T: ModuleTransformPass + 'static>(pass: T) -> Self {
        Self::adapt_parallel(pass, 1)
    }

    /// Adapts a given pass into a [`ModuleToCircuitPassAdapter`] that runs over up to
    /// `jobs` modules at the same time.
    pub fn adapt_parallel<T: ModuleTransformPass + 'static>(pass: T, jobs: usize) -> Self {
        Self {
            pass: Arc::new(pass),
            jobs: jobs.max(1),
        }
    }

    fn run_parallel(&self, modules: Vec<Module>) -> Result<Vec<Module>, PipelineError> {
        let names: Vec<String> = modules.iter().map(|m| m.name.clone()).collect();
        let pool = ThreadPool::new(self.jobs.min(modules.len()));
        let (tx, rx) = mpsc::channel();

        for (i, module) in modules.into_iter().enumerate() {
            let tx = tx.clone();
            let pass = Arc::clone(&self.pass);

            pool.execute(move || {
                // the receiver outlives every job, this can't fail
                let _ = tx.send((i, pass.run(module)));
            });
        }

        // once every job is done (or dead), the receiver sees the channel close
        drop(tx);

        let mut results: Vec<Option<Module>> = names.iter().map(|_| None).collect();

        for (i, module) in rx.iter() {
            results[i] = Some(module);
        }

        results
            .into_iter()
            .zip(names)
            .map(|(result, module)| {
                result.ok_or_else(|| PipelineError::WorkerPanicked {
                    pass: self.pass.info().name,
                    module,
                })
            })
            .collect()
    }
}

impl CircuitTransformPass for ModuleToCircuitPassAdapter {
    fn info(&self) -> &'static PassInfo {
        self.pass.info()
    }

    fn run(&mut self, circuit: Circuit) -> Result<Circuit, PipelineError> {
        let Circuit { main, modules } = circuit;

        let modules = if self.jobs > 1 && modules.len() > 1 {
            self.run_parallel(modules)?
        } else {
            modules.into_iter().map(|m| self.pass.run(m)).collect()
        };

        Ok(Circuit { main, modules })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::*;

    static RENAME_INFO: PassInfo = PassInfo {
        name: "rename",
        prerequisites: &[Prerequisite::InferTypes],
        preserves_all: true,
    };

    static CLOBBER_INFO: PassInfo = PassInfo {
        name: "clobber",
        prerequisites: &[],
        preserves_all: false,
    };

    struct Rename;

    impl ModuleTransformPass for Rename {
        fn info(&self) -> &'static PassInfo {
            &RENAME_INFO
        }

        fn run(&self, module: Module) -> Module {
            Module {
                name: format!("{}_renamed", module.name),
                ..module
            }
        }
    }

    struct Clobber;

    impl ModuleTransformPass for Clobber {
        fn info(&self) -> &'static PassInfo {
            &CLOBBER_INFO
        }

        fn run(&self, module: Module) -> Module {
            module
        }
    }

    fn circuit_of(n: usize) -> Circuit {
        let mut circuit = Circuit::new("m0");

        for i in 0..n {
            circuit.modules.push(Module::new(format!("m{i}")));
        }

        circuit
    }

    #[test]
    fn parallel_adapter_keeps_module_order() {
        let mut adapter = ModuleToCircuitPassAdapter::adapt_parallel(Rename, 4);
        let circuit = adapter.run(circuit_of(16)).unwrap();
        let names: Vec<String> = circuit.modules.iter().map(|m| m.name.clone()).collect();
        let expected: Vec<String> = (0..16).map(|i| format!("m{i}_renamed")).collect();

        assert_eq!(names, expected);
        assert_eq!(circuit.main, "m0");
    }

    #[test]
    fn sequential_and_parallel_agree() {
        let seq = ModuleToCircuitPassAdapter::adapt(Rename)
            .run(circuit_of(5))
            .unwrap();
        let par = ModuleToCircuitPassAdapter::adapt_parallel(Rename, 3)
            .run(circuit_of(5))
            .unwrap();

        assert_eq!(seq, par);
    }

    #[test]
    fn missing_prerequisite_is_rejected() {
        let mut pm = PassManager::new();

        pm.add_pass(ModuleToCircuitPassAdapter::adapt(Rename));

        match pm.run(circuit_of(1)) {
            Err(PipelineError::MissingPrerequisite { pass, prerequisite }) => {
                assert_eq!(pass, "rename");
                assert_eq!(prerequisite, Prerequisite::InferTypes);
            }
            other => panic!("expected missing prerequisite, got {other:?}"),
        }
    }

    #[test]
    fn non_preserving_pass_clears_established() {
        let mut pm = PassManager::new();

        pm.assume_established(Prerequisite::all());
        pm.add_pass(ModuleToCircuitPassAdapter::adapt(Rename));
        pm.add_pass(ModuleToCircuitPassAdapter::adapt(Clobber));
        pm.add_pass(ModuleToCircuitPassAdapter::adapt(Rename));

        assert_eq!(pm.len(), 3);
        assert!(matches!(
            pm.run(circuit_of(1)),
            Err(PipelineError::MissingPrerequisite { pass: "rename", .. })
        ));
    }
}
