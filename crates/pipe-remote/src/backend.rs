//! Contrato capability-typed del backend de ejecución remota.
//!
//! El backend concreto (naming de proyectos/tasks, storage de artifacts,
//! semántica de colas) queda fuera de alcance: este trait captura sólo las
//! capacidades que el protocolo de relocación necesita. El trait es síncrono
//! a propósito: la sumisión es fire-and-forget y el motor local es
//! single-threaded.

use std::path::PathBuf;

use serde_json::Value;

use crate::descriptor::{ScriptSpec, TaskHandle, TaskSpec};
use crate::errors::BackendError;

/// Valor devuelto por `get_artifact`: el storage puede entregar los bytes
/// inline o una referencia a archivo; el trampolín debe soportar ambos.
#[derive(Debug, Clone)]
pub enum ArtifactValue {
    Inline(Vec<u8>),
    PathRef(PathBuf),
}

/// Confirmación de subida. `confirmed == false` significa que el backend no
/// garantiza visibilidad todavía: el protocolo no debe continuar.
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    pub key: String,
    pub confirmed: bool,
}

/// Capacidades requeridas del colaborador externo.
pub trait RemoteBackend {
    /// Crea una task nombrada. Falla con `NameConflict` si el nombre ya
    /// existe dentro del proyecto.
    fn create_task(&mut self, spec: &TaskSpec) -> Result<TaskHandle, BackendError>;

    /// Sube un artifact nombrado. Con `wait == true` el receipt refleja la
    /// confirmación de visibilidad.
    fn upload_artifact(&mut self,
                       task: &TaskHandle,
                       key: &str,
                       bytes: Vec<u8>,
                       wait: bool)
                       -> Result<UploadReceipt, BackendError>;

    /// Liga (idempotente) la definición ejecutable de la task.
    fn set_script(&mut self, task: &TaskHandle, script: &ScriptSpec) -> Result<(), BackendError>;

    /// Somete la task a una cola para ejecución. Retorna al encolar, no al
    /// terminar la corrida remota.
    fn enqueue(&mut self, task: &TaskHandle, queue: &str) -> Result<(), BackendError>;

    /// Cancela una task creada/encolada. Única forma de cancelación que el
    /// protocolo expone; nunca a mitad de resolución local.
    fn cancel(&mut self, task: &TaskHandle) -> Result<(), BackendError>;

    /// Task bajo la cual corre este proceso, si es un runner remoto.
    fn current_task(&self) -> Option<TaskHandle>;

    /// Recupera un artifact subido previamente.
    fn get_artifact(&self, task: &TaskHandle, key: &str) -> Result<ArtifactValue, BackendError>;

    /// Mecanismo de inyección de parámetros del backend: recibe los kwargs
    /// base del proceso y devuelve el mapping efectivo con lo inyectado
    /// externamente.
    fn connect_parameters(&self, task: &TaskHandle, base: Value) -> Result<Value, BackendError>;
}
