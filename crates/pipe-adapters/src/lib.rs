//! pipe-adapters: implementaciones concretas de pasos.
//!
//! Este crate provee el conjunto fijo de clases de paso contra el que
//! enlaza el runner remoto, más el `default_registry()` que las registra.
//! Son pasos deterministas y sin IO externo: fuentes sintéticas de datos,
//! transformaciones simples y un stub de entrenamiento; suficientes para
//! ejercitar el motor, la cache y la relocación de punta a punta.

pub mod registry;
pub mod steps;

pub use registry::default_registry;
pub use steps::collect::{CollectParams, CollectValuesStep};
pub use steps::echo::{EchoParams, EchoStep};
pub use steps::fetch::{FetchParams, FetchRowsStep};
pub use steps::select::{SelectColumnsStep, SelectParams};
pub use steps::train::{TrainModelStep, TrainParams};

#[cfg(test)]
mod tests {
    use serde_json::json;

    use pipe_core::{step, ArtifactKind, StepInput, StepRunner};

    use super::*;

    #[test]
    fn data_step_runs_its_leaf_input_first() {
        let leaf = step(EchoStep::with_foo(json!(1)), vec![]);
        let data = step(CollectValuesStep::default(), vec![StepInput::step(&leaf)]);

        assert!(!leaf.borrow().completed);

        let mut runner = StepRunner::in_memory("demo");
        let artifact = runner.run(&data).expect("el paso de datos completa");

        assert!(leaf.borrow().completed);
        let leaf_artifact = leaf.borrow().artifact.clone().expect("leaf con artifact");
        assert_eq!(leaf_artifact.payload, json!(1));
        assert_eq!(artifact.kind, ArtifactKind::Data);
        assert_eq!(artifact.payload["values"], json!([1]));
    }

    #[test]
    fn fetch_select_train_pipeline_produces_a_model_artifact() {
        let fetch = step(FetchRowsStep::default(), vec![]);
        let select = step(SelectColumnsStep::new(SelectParams { columns: vec!["cell".into(), "value".into()] }),
                          vec![StepInput::step(&fetch)]);
        let train = step(TrainModelStep::default(), vec![StepInput::step(&select)]);

        let mut runner = StepRunner::in_memory("demo");
        let artifact = runner.run(&train).expect("el pipeline completa");

        assert_eq!(artifact.kind, ArtifactKind::Model);
        assert_eq!(artifact.payload["model"]["kind"], json!("mean_regressor"));
        assert!(fetch.borrow().completed);
        assert!(select.borrow().completed);
    }

    #[test]
    fn default_registry_knows_every_shipped_step_kind() {
        let registry = default_registry();
        for kind in ["EchoStep", "FetchRowsStep", "SelectColumnsStep", "TrainModelStep", "CollectValuesStep"] {
            assert!(registry.contains(kind), "falta {kind} en el registro");
        }
    }
}
