//! Registro por defecto: el conjunto fijo de clases que el runner remoto
//! sabe reconstruir. Cada fábrica decodifica la config efectiva (snapshot +
//! kwargs inyectados) al struct de params del paso.

use serde_json::Value;

use pipe_core::step::StepWork;
use pipe_remote::{RemoteError, StepRegistry};

use crate::steps::collect::CollectValuesStep;
use crate::steps::echo::EchoStep;
use crate::steps::fetch::FetchRowsStep;
use crate::steps::select::SelectColumnsStep;
use crate::steps::train::TrainModelStep;

fn decode<T: serde::de::DeserializeOwned>(kind: &str, config: Value) -> Result<T, RemoteError> {
    serde_json::from_value(config).map_err(|e| RemoteError::Deserialization(format!("{kind} config: {e}")))
}

fn echo_factory(config: Value) -> Result<Box<dyn StepWork>, RemoteError> {
    Ok(Box::new(EchoStep::new(decode("EchoStep", config)?)))
}

fn fetch_factory(config: Value) -> Result<Box<dyn StepWork>, RemoteError> {
    Ok(Box::new(FetchRowsStep::new(decode("FetchRowsStep", config)?)))
}

fn select_factory(config: Value) -> Result<Box<dyn StepWork>, RemoteError> {
    Ok(Box::new(SelectColumnsStep::new(decode("SelectColumnsStep", config)?)))
}

fn train_factory(config: Value) -> Result<Box<dyn StepWork>, RemoteError> {
    Ok(Box::new(TrainModelStep::new(decode("TrainModelStep", config)?)))
}

fn collect_factory(config: Value) -> Result<Box<dyn StepWork>, RemoteError> {
    Ok(Box::new(CollectValuesStep::new(decode("CollectValuesStep", config)?)))
}

/// Registro con todas las clases de este crate.
pub fn default_registry() -> StepRegistry {
    let mut registry = StepRegistry::new();
    registry.register("EchoStep", echo_factory);
    registry.register("FetchRowsStep", fetch_factory);
    registry.register("SelectColumnsStep", select_factory);
    registry.register("TrainModelStep", train_factory);
    registry.register("CollectValuesStep", collect_factory);
    registry
}
