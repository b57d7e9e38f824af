//! Identidad de cache de un paso.

use serde_json::json;

use crate::constants::PIPELINE_VERSION;
use crate::hashing::hash_value;
use crate::step::{StepInput, StepNode};

/// Tupla de identidad: (proyecto, nombre de task, fingerprint de contenido).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    pub project: String,
    pub task_name: String,
    pub fingerprint: String,
}

/// Fingerprint recursiva de un paso: versión del motor + clase + config +
/// identidad de cada input. Un input plano aporta el hash de su JSON
/// canónico; un input paso aporta su propia fingerprint.
///
/// Precondición: el grafo es acíclico (el runner valida ciclos antes); de lo
/// contrario esta recursión no terminaría.
pub fn step_fingerprint(project: &str, node: &StepNode) -> String {
    let input_ids: Vec<serde_json::Value> =
        node.inputs
            .iter()
            .map(|input| match input {
                StepInput::Value(v) => json!({ "value": hash_value(v) }),
                StepInput::Step(dep) => json!({ "step": step_fingerprint(project, &dep.borrow()) }),
            })
            .collect();

    hash_value(&json!({
        "pipeline_version": PIPELINE_VERSION,
        "project": project,
        "step_kind": node.work.kind_name(),
        "config": node.work.config(),
        "inputs": input_ids,
    }))
}
