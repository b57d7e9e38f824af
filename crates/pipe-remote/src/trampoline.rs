//! Trampolín del lado remoto.
//!
//! Contrato: recuperar el snapshot subido bajo `inputs/self`; si el storage
//! devolvió una referencia de archivo en vez del objeto inline, leerla;
//! decodificar texto-primero con fallback binario; reconstruir la instancia
//! vía registro y correrla con los kwargs que el backend haya inyectado. El
//! contexto de task es un objeto explícito que se enhebra, no estado global.

use std::fs;

use serde_json::Value;

use pipe_core::{merge_json, Artifact, StepRunner};

use crate::backend::{ArtifactValue, RemoteBackend};
use crate::codec::decode_snapshot;
use crate::descriptor::TaskHandle;
use crate::entry_point::SELF_ARTIFACT_KEY;
use crate::errors::RemoteError;
use crate::registry::StepRegistry;

/// Contexto de ejecución remota: el backend y la task bajo la que corre este
/// proceso.
pub struct TaskContext<'a, B: RemoteBackend> {
    pub backend: &'a B,
    pub task: TaskHandle,
}

impl<'a, B: RemoteBackend> TaskContext<'a, B> {
    pub fn new(backend: &'a B, task: TaskHandle) -> Self {
        Self { backend, task }
    }

    /// Contexto de la task activa del proceso, si existe.
    pub fn current(backend: &'a B) -> Result<Self, RemoteError> {
        let task = backend.current_task().ok_or(RemoteError::NoCurrentTask)?;
        Ok(Self { backend, task })
    }
}

/// Reconstruye el paso subido y lo ejecuta con los kwargs inyectados.
/// Devuelve el artifact producido por la corrida remota.
pub fn run_step<B: RemoteBackend>(ctx: &TaskContext<'_, B>,
                                  registry: &StepRegistry,
                                  kwargs: Value)
                                  -> Result<Artifact, RemoteError> {
    let stored = ctx.backend.get_artifact(&ctx.task, SELF_ARTIFACT_KEY)?;
    let bytes = match stored {
        ArtifactValue::Inline(bytes) => bytes,
        // el artifact puede ser una ruta a un archivo serializado
        ArtifactValue::PathRef(path) => {
            fs::read(&path).map_err(|e| RemoteError::Deserialization(format!("read {}: {e}", path.display())))?
        }
    };
    let snapshot = decode_snapshot(&bytes)?;

    let injected = ctx.backend.connect_parameters(&ctx.task, kwargs)?;
    let effective_config = merge_json(&snapshot.config, &injected);

    let step = registry.instantiate(&snapshot, effective_config)?;
    let mut runner = StepRunner::in_memory(&ctx.task.project);
    let artifact = runner.run(&step)?;
    Ok((*artifact).clone())
}

/// Entry del runner remoto: inicializa el contexto desde la task activa,
/// recoge los kwargs inyectados y llama al trampolín.
pub fn remote_main<B: RemoteBackend>(backend: &B,
                                     registry: &StepRegistry,
                                     kwargs: Value)
                                     -> Result<Artifact, RemoteError> {
    let ctx = TaskContext::current(backend)?;
    run_step(&ctx, registry, kwargs)
}
