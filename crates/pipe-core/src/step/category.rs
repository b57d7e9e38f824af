//! Categorías de paso y sus hooks post-run.
//!
//! El conjunto es cerrado y chico, así que el hook se selecciona por match
//! y no por override virtual. Cada hook recibe el valor crudo devuelto por
//! la función de trabajo, exactamente una vez por corrida exitosa, y lo
//! convierte en el artifact tipado de su contrato.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::model::{Artifact, ArtifactKind};

/// Categoría de un paso: decide el contrato del artifact resultante.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepCategory {
    /// Pasos de datos: fuerzan un artifact `data` con metadata simple.
    Data,
    /// Pasos de modelo: fuerzan un artifact `model` con tag de storage.
    Model,
    /// Pasos hoja/utilitarios: el valor crudo pasa sin envolver contrato.
    Generic,
}

/// Convierte el resultado crudo en artifact según la categoría. El motor
/// asigna el hash después y marca `completed` como último efecto, de modo
/// que un fallo aquí deja el paso re-ejecutable.
pub fn post_run(category: StepCategory, raw: Value) -> Artifact {
    match category {
        StepCategory::Data => {
            let meta = json!({
                "payload_bytes": raw.to_string().len(),
                "shape": shape_hint(&raw),
            });
            Artifact::new_unhashed(ArtifactKind::Data, raw, Some(meta))
        }
        StepCategory::Model => {
            let meta = json!({
                "storage_tag": "models",
                "format": "json",
            });
            Artifact::new_unhashed(ArtifactKind::Model, raw, Some(meta))
        }
        StepCategory::Generic => Artifact::new_unhashed(ArtifactKind::Raw, raw, None),
    }
}

/// Pista de esquema liviana para artifacts de datos.
fn shape_hint(value: &Value) -> String {
    match value {
        Value::Array(items) => format!("array[{}]", items.len()),
        Value::Object(map) => format!("object[{}]", map.len()),
        Value::Null => "null".to_string(),
        Value::Bool(_) => "bool".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::String(_) => "string".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_hook_attaches_shape_metadata() {
        let art = post_run(StepCategory::Data, json!([1, 2, 3]));
        assert_eq!(art.kind, ArtifactKind::Data);
        let meta = art.metadata.expect("data artifact lleva metadata");
        assert_eq!(meta["shape"], json!("array[3]"));
    }

    #[test]
    fn generic_hook_passes_raw_value_through() {
        let art = post_run(StepCategory::Generic, json!("x"));
        assert_eq!(art.kind, ArtifactKind::Raw);
        assert_eq!(art.payload, json!("x"));
        assert!(art.metadata.is_none());
    }
}
