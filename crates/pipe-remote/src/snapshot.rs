//! Snapshot serializable de una instancia de paso.
//!
//! El lado remoto no comparte memoria ni filesystem con el caller: lo que
//! viaja es un esquema explícito y versionado, y el runner remoto enlaza
//! contra el conjunto fijo de implementaciones registradas. Nada de
//! auto-serialización de código fuente.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use pipe_core::step::{StepCategory, StepHandle, StepInput, StepNode};

use crate::errors::RemoteError;

/// Incrementar ante cambios incompatibles del esquema de wire.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Estado empaquetado de un paso listo para relocar: clase, categoría,
/// config y todos los inputs ya reducidos a valores planos.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepSnapshot {
    pub schema_version: u32,
    pub step_kind: String,
    pub category: StepCategory,
    pub config: Value,
    pub inputs: Vec<Value>,
}

impl StepSnapshot {
    /// Construye el snapshot reduciendo cada input: los valores planos pasan
    /// tal cual; un input paso debe estar completado y aporta el payload de
    /// su artifact. Un input paso sin resolver es error: el requisito se
    /// exige, no se asume.
    pub fn from_node(node: &StepNode) -> Result<Self, RemoteError> {
        let mut inputs = Vec::with_capacity(node.inputs.len());
        for input in &node.inputs {
            match input {
                StepInput::Value(v) => inputs.push(v.clone()),
                StepInput::Step(dep) => {
                    let dep = dep.borrow();
                    if !dep.completed {
                        return Err(RemoteError::UnresolvedInput { step: dep.kind_name() });
                    }
                    match &dep.artifact {
                        Some(artifact) => inputs.push(artifact.payload.clone()),
                        None => return Err(RemoteError::UnresolvedInput { step: dep.kind_name() }),
                    }
                }
            }
        }
        Ok(Self { schema_version: SNAPSHOT_SCHEMA_VERSION,
                  step_kind: node.kind_name(),
                  category: node.work.category(),
                  config: node.work.config(),
                  inputs })
    }

    pub fn from_handle(handle: &StepHandle) -> Result<Self, RemoteError> {
        Self::from_node(&handle.borrow())
    }
}
