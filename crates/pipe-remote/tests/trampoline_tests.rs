//! Contrato del trampolín remoto: decodificación dual, referencias de
//! archivo, kwargs inyectados y clases no registradas.

use serde_json::json;

use pipe_adapters::{default_registry, EchoStep};
use pipe_core::{step, StepRunner};
use pipe_remote::{remote_main, run_step, InMemoryBackend, Relocator, RemoteBackend, RemoteError, SnapshotEncoding,
                  StepRegistry, StepSnapshot, TaskContext, TaskSpec, SELF_ARTIFACT_KEY};

#[test]
fn reconstructed_step_matches_local_run_output() {
    // corrida local de referencia
    let local = step(EchoStep::with_foo(json!({ "aoi": [1, 2, 3] })), vec![]);
    let mut runner = StepRunner::in_memory("geo");
    let local_artifact = runner.run(&local).expect("corre local");

    // round-trip: snapshot subido -> trampolín
    let mut backend = InMemoryBackend::new();
    let remote = step(EchoStep::with_foo(json!({ "aoi": [1, 2, 3] })), vec![]);
    let relocation = Relocator::new(&mut backend, "geo").relocate(&remote, None).expect("somete");
    backend.make_current(&relocation.task);

    let remote_artifact = remote_main(&backend, &default_registry(), json!({})).expect("corre remoto");
    assert_eq!(remote_artifact.payload, local_artifact.payload);
    assert_eq!(remote_artifact.hash, local_artifact.hash);
}

#[test]
fn binary_snapshot_decodes_through_the_fallback_path() {
    let mut backend = InMemoryBackend::new();
    let node = step(EchoStep::with_foo(json!(7)), vec![]);

    let relocation = Relocator::new(&mut backend, "geo").with_encoding(SnapshotEncoding::Binary)
                                                        .relocate(&node, None)
                                                        .expect("somete en binario");
    backend.make_current(&relocation.task);

    let artifact = remote_main(&backend, &default_registry(), json!({})).expect("decodifica con fallback");
    assert_eq!(artifact.payload, json!(7));
}

#[test]
fn path_reference_artifacts_are_opened_and_decoded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut backend = InMemoryBackend::new();
    backend.serve_artifacts_from(dir.path().to_path_buf());

    let node = step(EchoStep::with_foo(json!("desde-archivo")), vec![]);
    let relocation = Relocator::new(&mut backend, "geo").relocate(&node, None).expect("somete");
    backend.make_current(&relocation.task);

    let artifact = remote_main(&backend, &default_registry(), json!({})).expect("lee la ruta y decodifica");
    assert_eq!(artifact.payload, json!("desde-archivo"));
}

#[test]
fn injected_kwargs_override_snapshot_config() {
    let mut backend = InMemoryBackend::new();
    backend.set_injected_params(json!({ "foo": "inyectado" }));

    let node = step(EchoStep::with_foo(json!("ligado")), vec![]);
    let relocation = Relocator::new(&mut backend, "geo").relocate(&node, None).expect("somete");
    backend.make_current(&relocation.task);

    let artifact = remote_main(&backend, &default_registry(), json!({})).expect("corre con kwargs");
    assert_eq!(artifact.payload, json!("inyectado"));
}

#[test]
fn unknown_step_kind_is_rejected_by_the_registry() {
    let mut backend = InMemoryBackend::new();
    let task = backend.create_task(&TaskSpec { project: "geo".into(),
                                               name: "GhostStep".into(),
                                               no_auto_init: true })
                      .expect("crea la task");

    // snapshot de una clase que el runner no enlaza
    let node = step(EchoStep::with_foo(json!(1)), vec![]);
    let mut snapshot = StepSnapshot::from_handle(&node).expect("snapshot");
    snapshot.step_kind = "GhostStep".to_string();
    let bytes = serde_json::to_vec(&snapshot).expect("serializa");
    backend.upload_artifact(&task, SELF_ARTIFACT_KEY, bytes, true).expect("sube");

    let ctx = TaskContext::new(&backend, task);
    let err = run_step(&ctx, &default_registry(), json!({})).unwrap_err();
    assert!(matches!(err, RemoteError::UnknownStepKind(kind) if kind == "GhostStep"));
}

#[test]
fn trampoline_without_current_task_fails_explicitly() {
    let backend = InMemoryBackend::new();
    let err = remote_main(&backend, &StepRegistry::new(), json!({})).unwrap_err();
    assert!(matches!(err, RemoteError::NoCurrentTask));
}
