//! Registro de clases de paso que el runner remoto puede reconstruir.
//!
//! El conjunto es fijo y explícito: el worker enlaza contra estas
//! implementaciones en lugar de recibir código fuente. El registro es un
//! objeto que se pasa al trampolín, no estado global de proceso.

use indexmap::IndexMap;
use serde_json::Value;

use pipe_core::step::{StepHandle, StepInput, StepNode, StepWork};

use crate::errors::RemoteError;
use crate::snapshot::StepSnapshot;

/// Fábrica de un paso a partir de su config efectiva.
pub type StepFactory = fn(Value) -> Result<Box<dyn StepWork>, RemoteError>;

/// Mapa nombre de clase → fábrica. `IndexMap` para iteración determinista
/// (el orden de registro es observable en logs y listados).
#[derive(Default)]
pub struct StepRegistry {
    factories: IndexMap<String, StepFactory>,
}

impl StepRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind_name: &str, factory: StepFactory) {
        self.factories.insert(kind_name.to_string(), factory);
    }

    pub fn contains(&self, kind_name: &str) -> bool {
        self.factories.contains_key(kind_name)
    }

    /// Nombres registrados, en orden de registro.
    pub fn kinds(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Reconstruye un nodo ejecutable desde un snapshot. Los inputs del
    /// snapshot ya son valores planos, así que el nodo resultante no tiene
    /// dependencias.
    pub fn instantiate(&self, snapshot: &StepSnapshot, effective_config: Value) -> Result<StepHandle, RemoteError> {
        let factory = self.factories
                          .get(&snapshot.step_kind)
                          .ok_or_else(|| RemoteError::UnknownStepKind(snapshot.step_kind.clone()))?;
        let work = factory(effective_config)?;
        let inputs = snapshot.inputs.iter().cloned().map(StepInput::Value).collect();
        Ok(StepNode::new(work, inputs))
    }
}
