//! SelectColumnsStep: proyección de columnas sobre filas de un input de
//! datos.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use pipe_core::errors::CoreError;
use pipe_core::step::StepCategory;
use pipe_core::work_step;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SelectParams {
    /// Columnas a conservar, en el orden pedido.
    pub columns: Vec<String>,
}

work_step! {
    SelectColumnsStep {
        kind: "SelectColumnsStep",
        category: StepCategory::Data,
        config: SelectParams,
        run(_me, ctx, p) {
            let input = ctx.first_input()
                           .ok_or_else(|| CoreError::InvalidInput { step: "SelectColumnsStep".to_string(),
                                                                    reason: "requires one upstream data input".to_string() })?;
            let rows = input.as_value()
                            .get("rows")
                            .and_then(Value::as_array)
                            .ok_or_else(|| CoreError::InvalidInput { step: "SelectColumnsStep".to_string(),
                                                                     reason: "upstream payload has no 'rows' array".to_string() })?;
            let projected: Vec<Value> = rows.iter()
                                            .map(|row| match row {
                                                Value::Object(fields) => {
                                                    let mut kept = Map::new();
                                                    for column in &p.columns {
                                                        if let Some(v) = fields.get(column) {
                                                            kept.insert(column.clone(), v.clone());
                                                        }
                                                    }
                                                    Value::Object(kept)
                                                }
                                                other => other.clone(),
                                            })
                                            .collect();
            Ok(json!({
                "columns": p.columns,
                "rows": projected,
            }))
        }
    }
}
