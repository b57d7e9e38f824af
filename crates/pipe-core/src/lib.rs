//! pipe-core: grafo de pasos, resolución de dependencias y cache.
//!
//! El core no conoce ningún backend remoto: expone el modelo de pasos
//! (`StepWork`, `StepNode`, `StepInput`), el motor local (`StepRunner`), la
//! política de cache y los eventos de corrida. La relocación remota vive en
//! `pipe-remote` y se apoya en estos tipos.
pub mod cache;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod injection;
pub mod model;
pub mod step;

pub use cache::{step_fingerprint, CacheIndex, CacheKey, CachePolicy, InMemoryCacheIndex};
pub use engine::{detect_cycle, StepRunner};
pub use errors::CoreError;
pub use event::{EventStore, InMemoryEventStore, RunEvent, RunEventKind};
pub use injection::merge_json;
pub use model::{Artifact, ArtifactKind, ExecutionContext, ResolvedInput};
pub use step::{post_run, step, StepCategory, StepHandle, StepInput, StepNode, StepWork};

// El macro `work_step!` ya se exporta en la raíz vía #[macro_export].

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    #[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
    pub struct EchoParams {
        pub foo: Option<Value>,
    }

    // Paso genérico declarado con el macro, como lo harían los adapters.
    work_step! {
        EchoStep {
            kind: "EchoStep",
            category: StepCategory::Generic,
            config: EchoParams,
            run(_me, _ctx, p) {
                Ok(p.foo.clone().unwrap_or(Value::Null))
            }
        }
    }

    #[test]
    fn step_with_no_inputs_runs_immediately_and_returns_config_value() {
        let node = step(EchoStep::new(EchoParams { foo: Some(json!("x")) }), vec![]);
        assert!(!node.borrow().completed);
        assert!(!node.borrow().has_dependencies());

        let mut runner = StepRunner::in_memory("demo");
        let artifact = runner.run(&node).expect("corre sin dependencias");

        assert_eq!(artifact.payload, json!("x"));
        assert_eq!(artifact.kind, ArtifactKind::Raw);
        assert!(node.borrow().completed);
    }

    #[test]
    fn has_dependencies_is_derived_from_inputs() {
        let leaf = step(EchoStep::new(EchoParams { foo: Some(json!(1)) }), vec![]);
        let with_dep = step(EchoStep::default(), vec![StepInput::step(&leaf)]);
        let plain_only = step(EchoStep::default(), vec![StepInput::value(json!(42))]);

        assert!(with_dep.borrow().has_dependencies());
        assert!(!plain_only.borrow().has_dependencies());
    }

    #[test]
    fn fingerprint_depends_on_config_and_dependency_identity() {
        let a = step(EchoStep::new(EchoParams { foo: Some(json!(1)) }), vec![]);
        let b = step(EchoStep::new(EchoParams { foo: Some(json!(1)) }), vec![]);
        let c = step(EchoStep::new(EchoParams { foo: Some(json!(2)) }), vec![]);

        let fp_a = step_fingerprint("p", &a.borrow());
        let fp_b = step_fingerprint("p", &b.borrow());
        let fp_c = step_fingerprint("p", &c.borrow());

        // misma clase + misma config => misma identidad, sin importar la
        // instancia; config distinta => identidad distinta
        assert_eq!(fp_a, fp_b);
        assert_ne!(fp_a, fp_c);

        let parent_of_a = step(EchoStep::default(), vec![StepInput::step(&a)]);
        let parent_of_c = step(EchoStep::default(), vec![StepInput::step(&c)]);
        assert_ne!(step_fingerprint("p", &parent_of_a.borrow()),
                   step_fingerprint("p", &parent_of_c.borrow()));
    }

    #[test]
    fn runner_overrides_are_merged_into_params() {
        let node = step(EchoStep::new(EchoParams { foo: Some(json!("bound")) }), vec![]);
        let mut runner = StepRunner::in_memory("demo");
        runner.set_param_overrides(json!({ "foo": "injected" }));

        let artifact = runner.run(&node).expect("corre con overrides");
        assert_eq!(artifact.payload, json!("injected"));
    }
}
