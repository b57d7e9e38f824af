//! Backend en memoria para tests y demos.
//!
//! Implementa el set de capacidades completo sobre mapas locales, con dos
//! perillas de simulación: una cantidad de rechazos `NameConflict` iniciales
//! (para ejercitar el reintento de sufijo) y un switch de confirmación de
//! subidas (para ejercitar `UploadIncomplete`). Opcionalmente sirve los
//! artifacts como referencias de archivo en un directorio dado, en lugar de
//! inline.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde_json::{json, Value};
use uuid::Uuid;

use pipe_core::merge_json;

use crate::backend::{ArtifactValue, RemoteBackend, UploadReceipt};
use crate::descriptor::{ScriptSpec, TaskHandle, TaskSpec};
use crate::errors::BackendError;

/// Task almacenada en el stub.
pub struct StoredTask {
    pub handle: TaskHandle,
    pub script: Option<ScriptSpec>,
    pub artifacts: HashMap<String, Vec<u8>>,
    pub queue: Option<String>,
    pub cancelled: bool,
}

#[derive(Default)]
pub struct InMemoryBackend {
    tasks: HashMap<Uuid, StoredTask>,
    reject_next_creates: u32,
    refuse_upload_confirmation: bool,
    artifact_dir: Option<PathBuf>,
    injected: Value,
    current: Option<Uuid>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self { injected: json!({}),
               ..Self::default() }
    }

    /// Rechaza con `NameConflict` las próximas `n` creaciones de task.
    pub fn reject_next_creates(&mut self, n: u32) {
        self.reject_next_creates = n;
    }

    /// Simula un storage que nunca confirma subidas.
    pub fn refuse_upload_confirmation(&mut self) {
        self.refuse_upload_confirmation = true;
    }

    /// Sirve los artifacts como rutas de archivo bajo `dir` en lugar de
    /// bytes inline.
    pub fn serve_artifacts_from(&mut self, dir: PathBuf) {
        self.artifact_dir = Some(dir);
    }

    /// Params que el backend inyecta en `connect_parameters`.
    pub fn set_injected_params(&mut self, params: Value) {
        self.injected = params;
    }

    /// Marca la task bajo la cual "corre" el proceso remoto simulado.
    pub fn make_current(&mut self, task: &TaskHandle) {
        self.current = Some(task.id);
    }

    pub fn task(&self, id: Uuid) -> Option<&StoredTask> {
        self.tasks.get(&id)
    }

    pub fn task_by_name(&self, project: &str, name: &str) -> Option<&StoredTask> {
        self.tasks
            .values()
            .find(|t| t.handle.project == project && t.handle.name == name)
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    fn name_taken(&self, project: &str, name: &str) -> bool {
        self.task_by_name(project, name).is_some()
    }
}

impl RemoteBackend for InMemoryBackend {
    fn create_task(&mut self, spec: &TaskSpec) -> Result<TaskHandle, BackendError> {
        if self.reject_next_creates > 0 {
            self.reject_next_creates -= 1;
            return Err(BackendError::NameConflict { name: spec.name.clone() });
        }
        if self.name_taken(&spec.project, &spec.name) {
            return Err(BackendError::NameConflict { name: spec.name.clone() });
        }
        let handle = TaskHandle { id: Uuid::new_v4(),
                                  project: spec.project.clone(),
                                  name: spec.name.clone() };
        self.tasks.insert(handle.id,
                          StoredTask { handle: handle.clone(),
                                       script: None,
                                       artifacts: HashMap::new(),
                                       queue: None,
                                       cancelled: false });
        Ok(handle)
    }

    fn upload_artifact(&mut self,
                       task: &TaskHandle,
                       key: &str,
                       bytes: Vec<u8>,
                       wait: bool)
                       -> Result<UploadReceipt, BackendError> {
        let stored = self.tasks.get_mut(&task.id).ok_or(BackendError::UnknownTask(task.id))?;
        stored.artifacts.insert(key.to_string(), bytes);
        Ok(UploadReceipt { key: key.to_string(),
                           confirmed: wait && !self.refuse_upload_confirmation })
    }

    fn set_script(&mut self, task: &TaskHandle, script: &ScriptSpec) -> Result<(), BackendError> {
        let stored = self.tasks.get_mut(&task.id).ok_or(BackendError::UnknownTask(task.id))?;
        stored.script = Some(script.clone());
        Ok(())
    }

    fn enqueue(&mut self, task: &TaskHandle, queue: &str) -> Result<(), BackendError> {
        let stored = self.tasks.get_mut(&task.id).ok_or(BackendError::UnknownTask(task.id))?;
        stored.queue = Some(queue.to_string());
        Ok(())
    }

    fn cancel(&mut self, task: &TaskHandle) -> Result<(), BackendError> {
        let stored = self.tasks.get_mut(&task.id).ok_or(BackendError::UnknownTask(task.id))?;
        stored.queue = None;
        stored.cancelled = true;
        Ok(())
    }

    fn current_task(&self) -> Option<TaskHandle> {
        self.current
            .and_then(|id| self.tasks.get(&id))
            .map(|t| t.handle.clone())
    }

    fn get_artifact(&self, task: &TaskHandle, key: &str) -> Result<ArtifactValue, BackendError> {
        let stored = self.tasks.get(&task.id).ok_or(BackendError::UnknownTask(task.id))?;
        let bytes = stored.artifacts
                          .get(key)
                          .ok_or_else(|| BackendError::ArtifactNotFound { key: key.to_string() })?;
        match &self.artifact_dir {
            None => Ok(ArtifactValue::Inline(bytes.clone())),
            Some(dir) => {
                let file_name = format!("{}__{}", task.id, key.replace('/', "_"));
                let path = dir.join(file_name);
                fs::write(&path, bytes).map_err(|e| BackendError::Failure(format!("write {}: {e}", path.display())))?;
                Ok(ArtifactValue::PathRef(path))
            }
        }
    }

    fn connect_parameters(&self, _task: &TaskHandle, base: Value) -> Result<Value, BackendError> {
        if self.injected.is_null() {
            return Ok(base);
        }
        Ok(merge_json(&base, &self.injected))
    }
}
