//! Contexto de ejecución entregado a `StepWork::work`.
//!
//! A diferencia del diseño original (que leía `self.inputs` implícitamente),
//! el motor entrega los inputs ya resueltos de forma explícita, preservando
//! el orden de declaración. Los artifacts de dependencias se comparten por
//! referencia (`Rc`), nunca se copian.

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::Artifact;

/// Un input ya resuelto: o bien el valor plano declarado, o bien el artifact
/// del paso dependencia (ya completado).
#[derive(Debug, Clone)]
pub enum ResolvedInput {
    Value(Value),
    Artifact(Rc<Artifact>),
}

impl ResolvedInput {
    /// Vista uniforme del contenido: el valor plano o el payload del
    /// artifact.
    pub fn as_value(&self) -> &Value {
        match self {
            ResolvedInput::Value(v) => v,
            ResolvedInput::Artifact(a) => &a.payload,
        }
    }

    /// Artifact subyacente, si este input proviene de un paso.
    pub fn artifact(&self) -> Option<&Rc<Artifact>> {
        match self {
            ResolvedInput::Value(_) => None,
            ResolvedInput::Artifact(a) => Some(a),
        }
    }
}

/// Contexto neutro de una invocación de trabajo.
pub struct ExecutionContext {
    /// Inputs resueltos, en orden de declaración.
    pub inputs: Vec<ResolvedInput>,
    /// Parámetros efectivos (config del paso + overrides mergeados).
    pub params: Value,
}

impl ExecutionContext {
    /// Decodifica los params efectivos a un tipo concreto.
    pub fn params_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.params.clone())
    }

    /// Primer input resuelto, si existe (conveniencia para pasos 1-input).
    pub fn first_input(&self) -> Option<&ResolvedInput> {
        self.inputs.first()
    }
}
