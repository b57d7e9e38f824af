//! Tipos de evento de una corrida y estructura `RunEvent`.
//!
//! Cada corrida del `StepRunner` emite eventos a un `EventStore` append-only.
//! El enum `RunEventKind` es el contrato observable del motor: permite
//! auditar orden de resolución, hits de cache y fallos sin inspeccionar los
//! nodos.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;

/// Eventos soportados por el ciclo de vida de un paso.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RunEventKind {
    /// Un paso comenzó su función de trabajo. No implica éxito.
    StepStarted { step_id: Uuid, kind_name: String },
    /// Un paso terminó bien: hash de su artifact, fingerprint de cache y el
    /// nombre de task bajo el que quedó registrado (puede llevar sufijo).
    StepFinished {
        step_id: Uuid,
        kind_name: String,
        artifact_hash: String,
        fingerprint: String,
        task_name: String,
    },
    /// El paso se resolvió desde cache: no se invocó la función de trabajo.
    StepCached {
        step_id: Uuid,
        kind_name: String,
        fingerprint: String,
    },
    /// El paso falló. La falla se propaga sin rollback de hermanos.
    StepFailed {
        step_id: Uuid,
        kind_name: String,
        error: CoreError,
    },
    /// Un paso fue empaquetado y entregado a un backend remoto. `queued`
    /// indica si además se encoló para ejecución.
    RelocationSubmitted {
        step_id: Uuid,
        kind_name: String,
        task_name: String,
        queued: bool,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunEvent {
    /// Orden de append dentro de la corrida (asignado por el store).
    pub seq: u64,
    pub run_id: Uuid,
    pub kind: RunEventKind,
    /// Metadato temporal; nunca entra a fingerprints.
    pub ts: DateTime<Utc>,
}
