//! Suma explícita de inputs declarados por un paso.
//!
//! El original hacía chequeos duck-typed ("¿es esto un Step?") sobre una
//! lista heterogénea; aquí el resolver hace match exhaustivo sobre un enum.

use serde_json::Value;

use super::StepHandle;

/// Elemento de la secuencia `inputs` de un paso: un valor plano o una
/// referencia a otro paso.
#[derive(Clone)]
pub enum StepInput {
    Value(Value),
    Step(StepHandle),
}

impl StepInput {
    /// Conveniencia para valores planos.
    pub fn value(v: impl Into<Value>) -> Self {
        StepInput::Value(v.into())
    }

    /// Conveniencia para dependencias (clona el handle, no el nodo).
    pub fn step(handle: &StepHandle) -> Self {
        StepInput::Step(handle.clone())
    }

    pub fn is_step(&self) -> bool {
        matches!(self, StepInput::Step(_))
    }
}
