use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use autodoc_batch::{BatchRunner, FileSelector};
use autodoc_config::ProjectConfig;
use autodoc_test_support::{setup_file, test_config, FakeEngine};
use tempfile::TempDir;

fn select_all(temp: &TempDir) -> Vec<autodoc_batch::FileCandidate> {
    let project = ProjectConfig::load(temp.path(), None).expect("load project config");
    FileSelector::new(&project).select(temp.path())
}

fn make_read_only(path: &PathBuf) {
    let mut permissions = fs::metadata(path).expect("metadata").permissions();
    permissions.set_readonly(true);
    fs::set_permissions(path, permissions).expect("set permissions");
}

#[test]
fn every_candidate_reaches_exactly_one_classification() {
    let temp = TempDir::new().expect("tempdir");
    for index in 0..5 {
        setup_file(temp.path(), &format!("F{index}.java"), "class F {}");
    }

    let candidates = select_all(&temp);
    let config = test_config();
    let engine = FakeEngine::succeeding();
    let report = BatchRunner::new(&config).run(&candidates, &engine, Instant::now());

    assert_eq!(report.total(), candidates.len());
    assert_eq!(report.succeeded, 5);
    assert_eq!(engine.processed().len(), 5);
}

#[test]
fn mixed_outcomes_scenario() {
    // A processes cleanly, B is read-only, C vanishes before processing.
    let temp = TempDir::new().expect("tempdir");
    setup_file(temp.path(), "A.java", "class A {}");
    setup_file(temp.path(), "B.java", "class B {}");
    setup_file(temp.path(), "C.java", "class C {}");

    let candidates = select_all(&temp);
    assert_eq!(candidates.len(), 3);

    make_read_only(&temp.path().join("B.java"));
    fs::remove_file(temp.path().join("C.java")).expect("remove C");

    let config = test_config();
    let engine = FakeEngine::succeeding();
    let report = BatchRunner::new(&config).run(&candidates, &engine, Instant::now());

    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.read_only, 1);
    assert_eq!(report.total(), 3);

    // Neither the read-only nor the vanished file reached the engine.
    assert_eq!(engine.processed(), vec![temp.path().join("A.java")]);
}

#[test]
fn one_corrupt_file_does_not_abort_the_batch() {
    let temp = TempDir::new().expect("tempdir");
    setup_file(temp.path(), "A.java", "class A {}");
    setup_file(temp.path(), "Broken.java", "cl@ss");
    setup_file(temp.path(), "Z.java", "class Z {}");

    let candidates = select_all(&temp);
    let config = test_config();
    let engine = FakeEngine::failing_on(&["Broken.java"]);
    let report = BatchRunner::new(&config).run(&candidates, &engine, Instant::now());

    assert_eq!(report.total(), 3);
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failed, 0);

    // All three candidates were dispatched; the failure stayed isolated.
    assert_eq!(engine.processed().len(), 3);
}

#[test]
fn rerun_classifies_the_same_number_of_files() {
    let temp = TempDir::new().expect("tempdir");
    setup_file(temp.path(), "A.java", "class A {}");
    setup_file(temp.path(), "B.java", "class B {}");

    let candidates = select_all(&temp);
    let config = test_config();
    let engine = FakeEngine::succeeding();
    let runner = BatchRunner::new(&config);

    let first = runner.run(&candidates, &engine, Instant::now());
    let second = runner.run(&candidates, &engine, Instant::now());

    assert_eq!(first.total(), second.total());
}

#[test]
fn elapsed_covers_time_before_the_loop() {
    let temp = TempDir::new().expect("tempdir");
    setup_file(temp.path(), "A.java", "class A {}");

    let started = Instant::now();
    std::thread::sleep(std::time::Duration::from_millis(20));

    let candidates = select_all(&temp);
    let config = test_config();
    let engine = FakeEngine::succeeding();
    let report = BatchRunner::new(&config).run(&candidates, &engine, started);

    assert!(report.elapsed >= std::time::Duration::from_millis(20));
}
