//! Binario de validación: ejercita el motor local, la cache y la relocación
//! contra el backend en memoria, imprimiendo cada etapa.

use serde_json::json;

use pipe_adapters::{default_registry, EchoStep, FetchRowsStep, SelectColumnsStep, SelectParams, TrainModelStep};
use pipe_core::{step, CachePolicy, RunEventKind, StepInput, StepRunner};
use pipe_remote::{remote_main, InMemoryBackend, Relocator, CONFIG};

fn main() {
    let _ = dotenvy::dotenv();
    run_local_validation();
    run_cache_validation();
    run_relocation_validation();
    println!("\nvalidaciones completas");
}

/// Pipeline local: fetch -> select -> train, resolución depth-first.
fn run_local_validation() {
    println!("== validación local ==");
    let fetch = step(FetchRowsStep::default(), vec![]);
    let select = step(SelectColumnsStep::new(SelectParams { columns: vec!["cell".into(), "value".into()] }),
                      vec![StepInput::step(&fetch)]);
    let train = step(TrainModelStep::default(), vec![StepInput::step(&select)]);

    let mut runner = StepRunner::in_memory(&CONFIG.project);
    let artifact = runner.run(&train).expect("el pipeline local debería completar");

    println!("secuencia de eventos: {:?}", runner.event_variants());
    println!("artifact de modelo: {}", artifact.payload["model"]);
    assert!(fetch.borrow().completed && select.borrow().completed && train.borrow().completed);
}

/// Cache: una corrida equivalente se resuelve sin trabajo; `force` re-ejecuta
/// y registra bajo nombre sufijado.
fn run_cache_validation() {
    println!("\n== validación de cache ==");
    let mut runner = StepRunner::in_memory(&CONFIG.project);

    let first = step(FetchRowsStep::default(), vec![]);
    runner.run(&first).expect("primera corrida");

    let twin = step(FetchRowsStep::default(), vec![]);
    runner.run(&twin).expect("gemela");
    let cached = runner.events()
                       .iter()
                       .filter(|e| matches!(e.kind, RunEventKind::StepCached { .. }))
                       .count();
    println!("hits de cache: {cached}");
    assert_eq!(cached, 1);

    runner.set_policy(CachePolicy { force: true,
                                    overwrite: false });
    let forced = step(FetchRowsStep::default(), vec![]);
    runner.run(&forced).expect("corrida forzada");
    let renamed = runner.events().iter().any(|e| {
                                            matches!(&e.kind,
                                                     RunEventKind::StepFinished { task_name, .. }
                                                     if task_name == "FetchRowsStep_1")
                                        });
    println!("registro sufijado tras force: {renamed}");
    assert!(renamed);
}

/// Relocación: snapshot + entry point + sumisión, y el trampolín remoto
/// reconstruyendo el paso desde el registro.
fn run_relocation_validation() {
    println!("\n== validación de relocación ==");
    let mut backend = InMemoryBackend::new();
    let node = step(EchoStep::with_foo(json!(42)), vec![]);

    let relocation = Relocator::new(&mut backend, CONFIG.project.clone())
        .relocate(&node, CONFIG.queue.as_deref().or(Some("default")))
        .expect("la relocación debería someter");
    println!("task: {}/{} (intentos: {}, encolada: {})",
             relocation.task.project, relocation.task.name, relocation.name_attempts, relocation.queued);

    // dejar la sumisión en el log de la corrida local
    let mut runner = StepRunner::in_memory(&CONFIG.project);
    runner.record_event(RunEventKind::RelocationSubmitted { step_id: node.borrow().id,
                                                            kind_name: node.borrow().kind_name(),
                                                            task_name: relocation.task.name.clone(),
                                                            queued: relocation.queued });
    println!("secuencia: {:?}", runner.event_variants());

    backend.make_current(&relocation.task);
    let artifact = remote_main(&backend, &default_registry(), json!({})).expect("el trampolín debería correr");
    println!("payload remoto: {}", artifact.payload);
    assert_eq!(artifact.payload, json!(42));
}
