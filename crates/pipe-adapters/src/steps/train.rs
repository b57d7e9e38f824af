//! TrainModelStep: stub determinista de entrenamiento.
//!
//! "Entrena" un regresor de media sobre la columna objetivo del input de
//! datos. El punto no es el modelo sino el contrato: categoría Model,
//! artifact con tag de storage propio, consumo por referencia del artifact
//! aguas arriba.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use pipe_core::errors::CoreError;
use pipe_core::step::StepCategory;
use pipe_core::work_step;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrainParams {
    pub epochs: u32,
    /// Columna numérica objetivo.
    pub target: String,
}

impl Default for TrainParams {
    fn default() -> Self {
        Self { epochs: 1,
               target: "value".to_string() }
    }
}

work_step! {
    TrainModelStep {
        kind: "TrainModelStep",
        category: StepCategory::Model,
        config: TrainParams,
        run(_me, ctx, p) {
            let input = ctx.first_input()
                           .ok_or_else(|| CoreError::InvalidInput { step: "TrainModelStep".to_string(),
                                                                    reason: "requires one upstream data input".to_string() })?;
            let rows = input.as_value()
                            .get("rows")
                            .and_then(Value::as_array)
                            .ok_or_else(|| CoreError::InvalidInput { step: "TrainModelStep".to_string(),
                                                                     reason: "upstream payload has no 'rows' array".to_string() })?;
            let samples: Vec<f64> = rows.iter()
                                        .filter_map(|row| row.get(&p.target).and_then(Value::as_f64))
                                        .collect();
            if samples.is_empty() {
                return Err(CoreError::InvalidInput { step: "TrainModelStep".to_string(),
                                                     reason: format!("no numeric samples under target '{}'", p.target) });
            }
            let weight = samples.iter().sum::<f64>() / samples.len() as f64;
            Ok(json!({
                "model": {
                    "kind": "mean_regressor",
                    "target": p.target,
                    "weight": weight,
                    "epochs": p.epochs,
                },
                "trained_on": samples.len(),
            }))
        }
    }
}
