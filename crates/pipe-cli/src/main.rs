//! CLI mínima: caller delgado sobre `StepRunner` y `Relocator`.
//!
//! Subcomandos:
//!   pipe-cli demo                         corre el pipeline sintético local
//!   pipe-cli relocate [--queue Q] [--foo V] [--binary]
//!                                         somete un EchoStep al backend en
//!                                         memoria y corre el trampolín
//!   pipe-cli runner --entry-point FILE    valida un manifiesto de entry point

use serde_json::{json, Value};

use pipe_adapters::{default_registry, EchoStep, FetchRowsStep, SelectColumnsStep, SelectParams, TrainModelStep};
use pipe_core::{step, StepInput, StepRunner};
use pipe_remote::{parse_entry_point, remote_main, InMemoryBackend, Relocator, SnapshotEncoding, CONFIG};

fn main() {
    // Cargar .env si existe para PIPEFLOW_PROJECT / PIPEFLOW_QUEUE
    let _ = dotenvy::dotenv();
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("demo") => run_demo(),
        Some("relocate") => run_relocate(&args[2..]),
        Some("runner") => run_runner(&args[2..]),
        _ => {
            eprintln!("uso: pipe-cli <demo|relocate|runner> [opciones]");
            std::process::exit(2);
        }
    }
}

fn run_demo() {
    let fetch = step(FetchRowsStep::default(), vec![]);
    let select = step(SelectColumnsStep::new(SelectParams { columns: vec!["cell".into(), "value".into()] }),
                      vec![StepInput::step(&fetch)]);
    let train = step(TrainModelStep::default(), vec![StepInput::step(&select)]);

    let mut runner = StepRunner::in_memory(&CONFIG.project);
    match runner.run(&train) {
        Ok(artifact) => {
            println!("eventos: {:?}", runner.event_variants());
            println!("modelo: {}", artifact.payload);
        }
        Err(e) => {
            eprintln!("[pipe-cli demo] error: {e}");
            std::process::exit(5);
        }
    }
}

fn run_relocate(args: &[String]) {
    let mut queue: Option<String> = CONFIG.queue.clone();
    let mut foo: Value = json!(42);
    let mut encoding = SnapshotEncoding::Json;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--queue" => {
                i += 1;
                if i < args.len() {
                    queue = Some(args[i].clone());
                }
            }
            "--foo" => {
                i += 1;
                if i < args.len() {
                    foo = serde_json::from_str(&args[i]).unwrap_or_else(|_| json!(args[i].clone()));
                }
            }
            "--binary" => encoding = SnapshotEncoding::Binary,
            _ => {}
        }
        i += 1;
    }

    let mut backend = InMemoryBackend::new();
    let node = step(EchoStep::with_foo(foo), vec![]);
    let relocation = match Relocator::new(&mut backend, CONFIG.project.clone()).with_encoding(encoding)
                                                                               .relocate(&node, queue.as_deref())
    {
        Ok(r) => r,
        Err(e) => {
            eprintln!("[pipe-cli relocate] error: {e}");
            std::process::exit(5);
        }
    };
    println!("task creada: {} / {} (intentos de nombre: {}, encolada: {})",
             relocation.task.project, relocation.task.name, relocation.name_attempts, relocation.queued);

    // contra el backend en memoria podemos además correr el trampolín
    backend.make_current(&relocation.task);
    match remote_main(&backend, &default_registry(), json!({})) {
        Ok(artifact) => println!("resultado remoto: {}", artifact.payload),
        Err(e) => {
            eprintln!("[pipe-cli relocate] trampolín: {e}");
            std::process::exit(5);
        }
    }
}

fn run_runner(args: &[String]) {
    let mut entry_point: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--entry-point" {
            i += 1;
            if i < args.len() {
                entry_point = Some(args[i].clone());
            }
        }
        i += 1;
    }

    let Some(path) = entry_point else {
        eprintln!("[pipe-cli runner] falta --entry-point FILE");
        std::process::exit(2);
    };
    let text = match std::fs::read_to_string(&path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("[pipe-cli runner] no se pudo leer {path}: {e}");
            std::process::exit(5);
        }
    };
    match parse_entry_point(&text) {
        Ok(manifest) => {
            println!("manifiesto ok: clase={} payload={} encoding={}",
                     manifest.step_kind, manifest.payload_key, manifest.payload_encoding);
            // correr de verdad requiere el contexto de task de un backend
            // concreto; esta build sólo enlaza el stub en memoria
            eprintln!("[pipe-cli runner] sin backend concreto al cual adjuntarse");
            std::process::exit(4);
        }
        Err(e) => {
            eprintln!("[pipe-cli runner] manifiesto inválido: {e}");
            std::process::exit(5);
        }
    }
}
