//! Unit tests for the generation service use case

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use splice_application::GenerationService;
use splice_domain::ports::{GraphSource, ImplementationEmitter};
use splice_domain::{Error, GeneratedFile, Graph, Result};

use crate::fixtures;

struct StaticGraphSource {
    build: fn() -> Graph,
}

impl GraphSource for StaticGraphSource {
    fn load_graph(&self) -> Result<Graph> {
        Ok((self.build)())
    }

    fn describe(&self) -> String {
        "static test graph".to_string()
    }
}

struct FailingGraphSource;

impl GraphSource for FailingGraphSource {
    fn load_graph(&self) -> Result<Graph> {
        Err(Error::manifest("unknown module `Missing`"))
    }

    fn describe(&self) -> String {
        "failing test graph".to_string()
    }
}

#[derive(Default)]
struct RecordingEmitter {
    files: Mutex<Vec<GeneratedFile>>,
}

impl RecordingEmitter {
    fn paths(&self) -> Vec<PathBuf> {
        self.files
            .lock()
            .expect("lock")
            .iter()
            .map(|f| f.path.clone())
            .collect()
    }
}

impl ImplementationEmitter for RecordingEmitter {
    fn emit(&self, file: &GeneratedFile) -> Result<()> {
        self.files.lock().expect("lock").push(file.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

fn service(build: fn() -> Graph, emitter: &Arc<RecordingEmitter>) -> GenerationService {
    GenerationService::new(Arc::new(StaticGraphSource { build }), emitter.clone())
}

#[test]
fn test_run_emits_generated_files() {
    let emitter = Arc::new(RecordingEmitter::default());

    let report = service(fixtures::circular, &emitter).run().expect("run");

    assert_eq!(report.components, 1);
    assert_eq!(report.files, vec![PathBuf::from("src/gen/index.ts")]);
    assert_eq!(report.accessors, 4);
    assert_eq!(emitter.paths(), report.files);
}

#[test]
fn test_resolution_failure_emits_nothing() {
    let emitter = Arc::new(RecordingEmitter::default());

    let result = service(fixtures::ambiguous, &emitter).run();

    match result {
        Err(error) => assert!(error.is_resolution_failure()),
        Ok(_) => panic!("Expected resolution failure"),
    }
    assert!(emitter.paths().is_empty());
}

#[test]
fn test_source_failure_is_propagated() {
    let emitter = Arc::new(RecordingEmitter::default());
    let service = GenerationService::new(Arc::new(FailingGraphSource), emitter.clone());

    assert!(matches!(service.run(), Err(Error::Manifest { .. })));
    assert!(emitter.paths().is_empty());
}

#[test]
fn test_sequential_and_parallel_runs_match() {
    let parallel = Arc::new(RecordingEmitter::default());
    let sequential = Arc::new(RecordingEmitter::default());

    service(fixtures::async_providers_graph, &parallel)
        .run()
        .expect("parallel run");
    service(fixtures::async_providers_graph, &sequential)
        .with_parallel(false)
        .run()
        .expect("sequential run");

    assert_eq!(
        *parallel.files.lock().expect("lock"),
        *sequential.files.lock().expect("lock")
    );
}
