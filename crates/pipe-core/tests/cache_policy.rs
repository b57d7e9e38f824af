//! Política de cache: perillas force/overwrite y misses por fingerprint.

use serde_json::json;

use pipe_adapters::{EchoStep, FetchRowsStep};
use pipe_core::{step, CachePolicy, RunEventKind, StepRunner};

#[test]
fn force_without_overwrite_records_under_a_suffixed_name() {
    let mut runner = StepRunner::in_memory("geo");
    runner.run(&step(FetchRowsStep::default(), vec![])).expect("primera corrida");

    runner.set_policy(CachePolicy { force: true,
                                    overwrite: false });
    runner.run(&step(FetchRowsStep::default(), vec![])).expect("corrida forzada");

    let cache = runner.cache();
    assert_eq!(cache.len(), 2);
    assert!(cache.entry("geo", "FetchRowsStep").is_some());
    assert!(cache.entry("geo", "FetchRowsStep_1").is_some());
}

#[test]
fn force_with_overwrite_replaces_the_base_entry() {
    let mut runner = StepRunner::in_memory("geo");
    runner.run(&step(FetchRowsStep::default(), vec![])).expect("primera corrida");

    runner.set_policy(CachePolicy { force: true,
                                    overwrite: true });
    runner.run(&step(FetchRowsStep::default(), vec![])).expect("corrida con overwrite");

    let cache = runner.cache();
    assert_eq!(cache.len(), 1, "el reemplazo no debe duplicar entradas");
    assert!(cache.entry("geo", "FetchRowsStep").is_some());
}

#[test]
fn same_name_with_different_config_is_a_cache_miss() {
    let mut runner = StepRunner::in_memory("geo");
    runner.run(&step(EchoStep::with_foo(json!(1)), vec![])).expect("foo=1");

    // misma clase, config distinta: la identidad no coincide, se re-ejecuta
    runner.run(&step(EchoStep::with_foo(json!(2)), vec![])).expect("foo=2");

    let started = runner.events()
                        .iter()
                        .filter(|e| matches!(e.kind, RunEventKind::StepStarted { .. }))
                        .count();
    let cached = runner.events()
                       .iter()
                       .filter(|e| matches!(e.kind, RunEventKind::StepCached { .. }))
                       .count();
    assert_eq!(started, 2);
    assert_eq!(cached, 0);
    // la segunda quedó registrada bajo nombre sufijado (sin overwrite)
    assert!(runner.cache().entry("geo", "EchoStep_1").is_some());
}
