//! Protocolo de sumisión: mover la ejecución de un paso ligado a un worker
//! que no comparte memoria de proceso con el caller.
//!
//! Orden del protocolo: snapshot → entry point → create_task (con reintento
//! de sufijo acotado) → subida confirmada del snapshot → binding del script
//! inline → encolado opcional. La relocación nunca espera la finalización
//! remota; cualquier falla aborta antes del encolado, sin dejar tasks
//! huérfanas en cola.

use log::{debug, warn};

use pipe_core::step::StepHandle;

use crate::backend::RemoteBackend;
use crate::codec::{encode_snapshot, SnapshotEncoding};
use crate::config::CONFIG;
use crate::descriptor::{ScriptSpec, TaskHandle, TaskSpec};
use crate::entry_point::{render_entry_point, synthesize_entry_point, write_private_entry_point, ENTRY_POINT_NAME,
                         SELF_ARTIFACT_KEY};
use crate::errors::{BackendError, RemoteError};
use crate::snapshot::StepSnapshot;

/// Resultado de una sumisión: la task creada, cuántos intentos de nombre
/// costó y si quedó encolada.
#[derive(Debug, Clone)]
pub struct Relocation {
    pub task: TaskHandle,
    pub name_attempts: u32,
    pub queued: bool,
}

/// Orquestador de la relocación contra un backend concreto.
pub struct Relocator<'a, B: RemoteBackend> {
    backend: &'a mut B,
    project: String,
    encoding: SnapshotEncoding,
    max_name_retries: u32,
}

impl<'a, B: RemoteBackend> Relocator<'a, B> {
    pub fn new(backend: &'a mut B, project: impl Into<String>) -> Self {
        Self { backend,
               project: project.into(),
               encoding: SnapshotEncoding::Json,
               max_name_retries: CONFIG.max_name_retries }
    }

    pub fn with_encoding(mut self, encoding: SnapshotEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_max_name_retries(mut self, ceiling: u32) -> Self {
        self.max_name_retries = ceiling;
        self
    }

    /// Empaqueta y somete el paso. `queue == None` deja la task creada pero
    /// pendiente de sumisión externa.
    pub fn relocate(&mut self, step: &StepHandle, queue: Option<&str>) -> Result<Relocation, RemoteError> {
        let snapshot = StepSnapshot::from_handle(step)?;
        let manifest = synthesize_entry_point(&self.project, &snapshot.step_kind, self.encoding);
        let diff = render_entry_point(&manifest)?;

        // El archivo temporal existe sólo durante la sumisión; el drop del
        // handle lo elimina sin importar el resultado.
        let temp = write_private_entry_point(&diff)?;
        let result = self.submit(&snapshot, &diff, queue);
        drop(temp);
        result
    }

    fn submit(&mut self, snapshot: &StepSnapshot, diff: &str, queue: Option<&str>) -> Result<Relocation, RemoteError> {
        let base_name = snapshot.step_kind.clone();
        let mut attempts: u32 = 0;
        let task = loop {
            let name = if attempts == 0 {
                base_name.clone()
            } else {
                format!("{base_name}_{attempts}")
            };
            attempts += 1;
            match self.backend.create_task(&TaskSpec { project: self.project.clone(),
                                                       name: name.clone(),
                                                       no_auto_init: true }) {
                Ok(task) => break task,
                Err(BackendError::NameConflict { .. }) if attempts <= self.max_name_retries => {
                    debug!("task name '{name}' taken, retrying with suffix ({attempts} attempts)");
                    continue;
                }
                Err(BackendError::NameConflict { .. }) => {
                    warn!("task name retry ceiling reached after {attempts} attempts");
                    return Err(RemoteError::RelocationFailed { attempts });
                }
                Err(other) => return Err(other.into()),
            }
        };

        // Subida bloqueante del snapshot: una corrida encolada después debe
        // poder observarlo sí o sí.
        let bytes = encode_snapshot(snapshot, self.encoding)?;
        let receipt = self.backend.upload_artifact(&task, SELF_ARTIFACT_KEY, bytes, true)?;
        if !receipt.confirmed {
            return Err(RemoteError::UploadIncomplete { key: SELF_ARTIFACT_KEY.to_string() });
        }

        self.backend.set_script(&task,
                                &ScriptSpec { entry_point: ENTRY_POINT_NAME.to_string(),
                                              working_dir: ".".to_string(),
                                              diff: diff.to_string() })?;

        let queued = match queue {
            Some(q) => {
                self.backend.enqueue(&task, q)?;
                true
            }
            None => false,
        };

        debug!("relocated '{}' as task '{}' (queued: {queued})", snapshot.step_kind, task.name);
        Ok(Relocation { task,
                        name_attempts: attempts,
                        queued })
    }

    /// Cancelación en el único borde donde se expone: la task sometida.
    pub fn cancel(&mut self, task: &TaskHandle) -> Result<(), RemoteError> {
        self.backend.cancel(task).map_err(Into::into)
    }
}
