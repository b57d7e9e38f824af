//! Artifact: la salida almacenada y tipada de un paso.
//!
//! - `payload` es JSON genérico; el motor no interpreta su semántica.
//! - `hash` es calculado por el motor sobre el JSON canonicalizado y sirve
//!   como identidad para deduplicación y trazabilidad.
//! - `metadata` es información auxiliar calculada por el hook post-run de la
//!   categoría del paso; no entra al hash.
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Clase de artifact, determinada por la categoría del paso que lo produjo.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Salida de un paso de datos (tablas, AOIs, features).
    Data,
    /// Salida de un paso de modelo (pesos, referencias de entrenamiento).
    Model,
    /// Valor crudo sin contrato adicional (pasos genéricos/utilitarios).
    Raw,
}

/// Artifact producido por un paso y consumido, por referencia, por los pasos
/// que lo declaran como input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub hash: String,
    pub payload: Value,
    pub metadata: Option<Value>,
}

impl Artifact {
    /// Constructor interno; el hash lo asigna el motor tras canonicalizar.
    pub(crate) fn new_unhashed(kind: ArtifactKind, payload: Value, metadata: Option<Value>) -> Self {
        Self { kind,
               hash: String::new(),
               payload,
               metadata }
    }
}
