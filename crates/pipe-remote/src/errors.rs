//! Errores del protocolo de relocación y del borde con el backend.

use thiserror::Error;
use uuid::Uuid;

use pipe_core::CoreError;

/// Fallas reportadas por el backend externo (colaborador capability-typed).
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("task name already exists: {name}")]
    NameConflict { name: String },
    #[error("unknown task: {0}")]
    UnknownTask(Uuid),
    #[error("artifact not found under key '{key}'")]
    ArtifactNotFound { key: String },
    #[error("backend failure: {0}")]
    Failure(String),
}

/// Fallas del protocolo de relocación (lado que somete) y del trampolín
/// (lado remoto). Todas se propagan al caller inmediato; ninguna se traga.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Se agotó el techo de reintentos de sufijo de nombre.
    #[error("relocation failed after {attempts} task name attempts")]
    RelocationFailed { attempts: u32 },
    /// El snapshot no pudo codificarse para el wire.
    #[error("snapshot serialization: {0}")]
    Serialization(String),
    /// Los bytes no decodificaron ni como texto ni como binario. Fatal, sin
    /// reintento.
    #[error("snapshot could not be decoded as text nor binary: {0}")]
    Deserialization(String),
    /// La subida del artifact no se confirmó; bloquea todo lo posterior.
    #[error("artifact upload not confirmed for key '{key}'")]
    UploadIncomplete { key: String },
    /// Un input del paso sigue siendo una dependencia sin resolver: el
    /// snapshot exige inputs reducidos a valores planos.
    #[error("step '{step}' has an unresolved step-typed input; run dependencies before relocating")]
    UnresolvedInput { step: String },
    /// La clase del paso no está registrada en el runner remoto.
    #[error("unknown step kind '{0}' (not registered)")]
    UnknownStepKind(String),
    /// El proceso remoto no tiene task activa que reconstruir.
    #[error("no current task in the remote execution context")]
    NoCurrentTask,
    /// IO local sobre el entry point temporal.
    #[error("entry point io: {0}")]
    EntryPointIo(String),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Core(#[from] CoreError),
}
