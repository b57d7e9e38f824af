//! Índice de corridas registradas, consultable por (proyecto, nombre).
//!
//! El índice guarda el último resultado registrado bajo cada nombre de task
//! junto con su fingerprint. Un lookup sólo es hit si la fingerprint además
//! coincide: mismo nombre con dependencias distintas es un miss (entrada
//! vieja, no reutilizable).

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::CacheKey;
use crate::model::Artifact;

/// Entrada registrada para un nombre de task.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub task_name: String,
    pub fingerprint: String,
    pub artifact: Artifact,
    pub created_at: DateTime<Utc>,
}

/// Contrato de consulta/registro de corridas previas. La durabilidad es la
/// que provea la implementación; el motor no asume más que esto.
pub trait CacheIndex {
    /// Busca una corrida completada equivalente. Devuelve el artifact sólo
    /// si nombre y fingerprint coinciden.
    fn lookup(&self, project: &str, task_name: &str, fingerprint: &str) -> Option<Artifact>;

    /// Registra un resultado bajo `key.task_name`. Si el nombre está ocupado
    /// y no hay `overwrite`, busca `nombre_1`, `nombre_2`, … hasta un hueco
    /// libre (misma convención de renombre que la task remota). Devuelve el
    /// nombre efectivamente usado.
    fn record(&mut self, key: &CacheKey, artifact: &Artifact, overwrite: bool) -> String;
}

#[derive(Default)]
pub struct InMemoryCacheIndex {
    inner: HashMap<(String, String), CacheEntry>,
}

impl InMemoryCacheIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cantidad de entradas registradas (útil en asserts).
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Entrada bajo un nombre exacto, si existe.
    pub fn entry(&self, project: &str, task_name: &str) -> Option<&CacheEntry> {
        self.inner.get(&(project.to_string(), task_name.to_string()))
    }
}

impl CacheIndex for InMemoryCacheIndex {
    fn lookup(&self, project: &str, task_name: &str, fingerprint: &str) -> Option<Artifact> {
        self.inner
            .get(&(project.to_string(), task_name.to_string()))
            .filter(|entry| entry.fingerprint == fingerprint)
            .map(|entry| entry.artifact.clone())
    }

    fn record(&mut self, key: &CacheKey, artifact: &Artifact, overwrite: bool) -> String {
        let mut name = key.task_name.clone();
        if !overwrite {
            let mut suffix = 0u32;
            while self.inner.contains_key(&(key.project.clone(), name.clone())) {
                suffix += 1;
                name = format!("{}_{}", key.task_name, suffix);
            }
        }
        let entry = CacheEntry { task_name: name.clone(),
                                 fingerprint: key.fingerprint.clone(),
                                 artifact: artifact.clone(),
                                 created_at: Utc::now() };
        self.inner.insert((key.project.clone(), name.clone()), entry);
        name
    }
}
