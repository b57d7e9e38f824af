//! `StepRunner`: ejecución local, síncrona y depth-first del grafo.
//!
//! Responsable de orquestar la resolución de dependencias, consultar la
//! política de cache, invocar el trabajo de cada paso y emitir eventos. El
//! scheduling es deliberadamente single-threaded: sin fan-out paralelo aun
//! cuando inputs independientes lo permitirían.

use std::rc::Rc;

use serde_json::{json, Value};
use uuid::Uuid;

use super::resolve::{detect_cycle, resolve_inputs};
use crate::cache::{step_fingerprint, CacheIndex, CacheKey, CachePolicy, InMemoryCacheIndex};
use crate::errors::CoreError;
use crate::event::{EventStore, InMemoryEventStore, RunEvent, RunEventKind};
use crate::hashing::hash_value;
use crate::injection::merge_json;
use crate::model::{Artifact, ExecutionContext};
use crate::step::{post_run, StepHandle};

/// Motor local de pasos, genérico en sus stores (eventos y cache).
pub struct StepRunner<E, C>
    where E: EventStore,
          C: CacheIndex
{
    events: E,
    cache: C,
    project: String,
    policy: CachePolicy,
    overrides: Value,
    run_id: Uuid,
}

impl StepRunner<InMemoryEventStore, InMemoryCacheIndex> {
    /// Runner con stores en memoria, suficiente para corridas locales.
    pub fn in_memory(project: &str) -> Self {
        Self::new_with_stores(InMemoryEventStore::default(), InMemoryCacheIndex::new(), project)
    }
}

impl<E, C> StepRunner<E, C>
    where E: EventStore,
          C: CacheIndex
{
    pub fn new_with_stores(events: E, cache: C, project: &str) -> Self {
        Self { events,
               cache,
               project: project.to_string(),
               policy: CachePolicy::default(),
               overrides: json!({}),
               run_id: Uuid::new_v4() }
    }

    /// Ajusta las perillas `force` / `overwrite` de la corrida.
    pub fn set_policy(&mut self, policy: CachePolicy) {
        self.policy = policy;
    }

    /// Overrides de params aplicados sobre la config de cada paso (merge
    /// shallow). Dictan el flujo de ejecución: no entran a la identidad de
    /// cache del paso.
    pub fn set_param_overrides(&mut self, overrides: Value) {
        self.overrides = overrides;
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Eventos de esta corrida, en orden de emisión.
    pub fn events(&self) -> Vec<RunEvent> {
        self.events.list(self.run_id)
    }

    /// Registra un evento externo (p.ej. una relocación remota) en el log de
    /// esta corrida.
    pub fn record_event(&mut self, kind: RunEventKind) -> RunEvent {
        self.events.append_kind(self.run_id, kind)
    }

    /// Variante compacta de la secuencia de eventos, útil en asserts y demos.
    pub fn event_variants(&self) -> Vec<&'static str> {
        self.events()
            .iter()
            .map(|e| match e.kind {
                RunEventKind::StepStarted { .. } => "S",
                RunEventKind::StepFinished { .. } => "F",
                RunEventKind::StepCached { .. } => "H",
                RunEventKind::StepFailed { .. } => "X",
                RunEventKind::RelocationSubmitted { .. } => "R",
            })
            .collect()
    }

    /// Ejecuta el paso y, antes, todo su subárbol de dependencias sin
    /// completar, depth-first y en orden de declaración. Garantiza que al
    /// retornar `Ok` el paso está completado y su artifact disponible.
    pub fn run(&mut self, root: &StepHandle) -> Result<Rc<Artifact>, CoreError> {
        detect_cycle(root)?;
        self.run_resolved(root)
    }

    fn run_resolved(&mut self, handle: &StepHandle) -> Result<Rc<Artifact>, CoreError> {
        // Idempotencia: un paso completado no vuelve a trabajar.
        if handle.borrow().completed {
            let node = handle.borrow();
            return node.artifact
                       .clone()
                       .ok_or_else(|| CoreError::MissingArtifact { step: node.kind_name() });
        }

        // Resolver dependencias pendientes antes del propio trabajo.
        let pending: Vec<StepHandle> = handle.borrow()
                                             .inputs
                                             .iter()
                                             .filter_map(|input| match input {
                                                 crate::step::StepInput::Step(dep) if !dep.borrow().completed => {
                                                     Some(dep.clone())
                                                 }
                                                 _ => None,
                                             })
                                             .collect();
        for dep in &pending {
            self.run_resolved(dep)?;
        }

        let (step_id, kind_name, fingerprint, config) = {
            let node = handle.borrow();
            (node.id, node.kind_name(), step_fingerprint(&self.project, &node), node.work.config())
        };
        let key = CacheKey { project: self.project.clone(),
                             task_name: kind_name.clone(),
                             fingerprint: fingerprint.clone() };

        // Lookup de cache, salvo que la corrida fuerce re-ejecución.
        if !self.policy.force {
            if let Some(cached) = self.cache.lookup(&key.project, &key.task_name, &key.fingerprint) {
                let artifact = Rc::new(cached);
                self.events.append_kind(self.run_id,
                                        RunEventKind::StepCached { step_id,
                                                                   kind_name: kind_name.clone(),
                                                                   fingerprint: fingerprint.clone() });
                let mut node = handle.borrow_mut();
                node.artifact = Some(artifact.clone());
                node.completed = true;
                return Ok(artifact);
            }
        }

        self.events.append_kind(self.run_id,
                                RunEventKind::StepStarted { step_id,
                                                            kind_name: kind_name.clone() });

        let raw = {
            let node = handle.borrow();
            let ctx = ExecutionContext { inputs: resolve_inputs(&node)?,
                                         params: merge_json(&config, &self.overrides) };
            node.work.work(&ctx)
        };

        let raw = match raw {
            Ok(value) => value,
            Err(error) => {
                self.events.append_kind(self.run_id,
                                        RunEventKind::StepFailed { step_id,
                                                                   kind_name,
                                                                   error: error.clone() });
                // propagación inmediata; hermanos ya corridos quedan como están
                return Err(error);
            }
        };

        // Hook post-run de la categoría, exactamente una vez por éxito.
        let category = handle.borrow().work.category();
        let mut artifact = post_run(category, raw);
        artifact.hash = hash_value(&artifact.payload);
        let recorded_name = self.cache.record(&key, &artifact, self.policy.overwrite);

        let artifact = Rc::new(artifact);
        self.events.append_kind(self.run_id,
                                RunEventKind::StepFinished { step_id,
                                                             kind_name,
                                                             artifact_hash: artifact.hash.clone(),
                                                             fingerprint,
                                                             task_name: recorded_name });

        // `completed` es el último efecto: un fallo previo deja el paso
        // re-ejecutable.
        let mut node = handle.borrow_mut();
        node.artifact = Some(artifact.clone());
        node.completed = true;
        Ok(artifact)
    }
}
