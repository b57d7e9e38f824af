//! FetchRowsStep: fuente determinista de filas sintéticas.
//!
//! No accede a IO externo; sólo construye estructuras en memoria. Evitar
//! cambios de orden o contenido en los datasets para preservar determinismo
//! (y con él, las identidades de cache).

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use pipe_core::step::StepCategory;
use pipe_core::work_step;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FetchParams {
    /// Nombre del dataset sintético. Por defecto: "synthetic_v1".
    pub dataset: String,
}

impl Default for FetchParams {
    fn default() -> Self {
        Self { dataset: "synthetic_v1".to_string() }
    }
}

fn synthetic_rows(dataset: &str) -> Vec<Value> {
    // filas estables; datasets no reconocidos caen al default
    match dataset {
        "synthetic_v1" | "default" | "" => vec![json!({ "cell": "8a2a1072b59ffff", "value": 10.0, "source": "s3" }),
                                                json!({ "cell": "8a2a1072b597fff", "value": 14.0, "source": "s3" }),
                                                json!({ "cell": "8a2a1072b5b7fff", "value": 18.0, "source": "sql" })],
        _ => synthetic_rows("synthetic_v1"),
    }
}

work_step! {
    FetchRowsStep {
        kind: "FetchRowsStep",
        category: StepCategory::Data,
        config: FetchParams,
        run(_me, _ctx, p) {
            Ok(json!({
                "dataset": p.dataset,
                "rows": synthetic_rows(&p.dataset),
            }))
        }
    }
}
