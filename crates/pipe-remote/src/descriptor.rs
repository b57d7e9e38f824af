//! Descriptores de task remota.
//!
//! Un descriptor se construye al momento de la relocación, se somete una vez
//! y queda inmutable salvo los identificadores que asigna el backend.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pedido de creación de task: proyecto + nombre (clase del paso, con sufijo
/// numérico en colisión). El script se liga después vía `set_script`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskSpec {
    pub project: String,
    pub name: String,
    /// El backend no debe inyectar su propia llamada de init: el entry point
    /// sintetizado ya inicializa el contexto.
    pub no_auto_init: bool,
}

/// Definición ejecutable de la task: el backend ejecuta el texto inline
/// (`diff`) directamente, sin resolverlo desde un checkout de repositorio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScriptSpec {
    pub entry_point: String,
    pub working_dir: String,
    pub diff: String,
}

/// Referencia a una task ya creada en el backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskHandle {
    /// Identificador asignado por el backend.
    pub id: Uuid,
    pub project: String,
    pub name: String,
}
