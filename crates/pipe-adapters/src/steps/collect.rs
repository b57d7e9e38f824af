//! CollectValuesStep: junta sus inputs resueltos en un artifact de datos.
//!
//! Paso de datos mínimo: envuelve los valores de entrada (planos o payloads
//! de pasos aguas arriba) en orden de declaración.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use pipe_core::step::StepCategory;
use pipe_core::work_step;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CollectParams {
    /// Etiqueta opcional que acompaña a los valores recogidos.
    pub label: Option<String>,
}

work_step! {
    CollectValuesStep {
        kind: "CollectValuesStep",
        category: StepCategory::Data,
        config: CollectParams,
        run(_me, ctx, p) {
            let values: Vec<Value> = ctx.inputs.iter().map(|input| input.as_value().clone()).collect();
            let mut payload = json!({ "values": values });
            if let Some(label) = &p.label {
                payload["label"] = json!(label);
            }
            Ok(payload)
        }
    }
}
