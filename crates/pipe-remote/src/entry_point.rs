//! Síntesis del entry point remoto.
//!
//! El original generaba un programa fuente autocontenido (clase + trampolín
//! + main). En esta reimplementación el texto sintetizado es un manifiesto
//! determinista que el binario runner genérico interpreta: qué clase
//! reconstruir, bajo qué clave está el snapshot subido y con qué encoding.
//! La completitud semántica la da el par runner + registry: el manifiesto es
//! ejecutable standalone por cualquier worker que enlace `pipe-adapters`.

use std::io::Write;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::codec::SnapshotEncoding;
use crate::errors::RemoteError;

/// Clave bajo la que se sube el snapshot serializado del paso.
pub const SELF_ARTIFACT_KEY: &str = "inputs/self";

/// Nombre lógico del entry point dentro de la task.
pub const ENTRY_POINT_NAME: &str = "run_step.json";

pub const ENTRY_POINT_SCHEMA_VERSION: u32 = 1;

/// Invocación que el worker debe lanzar para ejecutar el manifiesto.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunnerSpec {
    pub program: String,
    pub args: Vec<String>,
}

/// Programa sintetizado, con estructura determinista. No se exige
/// reproducibilidad byte a byte, sí completitud semántica.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntryPointManifest {
    pub schema_version: u32,
    pub project: String,
    pub step_kind: String,
    pub payload_key: String,
    pub payload_encoding: String,
    pub runner: RunnerSpec,
}

/// Construye el manifiesto para un paso concreto.
pub fn synthesize_entry_point(project: &str, step_kind: &str, encoding: SnapshotEncoding) -> EntryPointManifest {
    EntryPointManifest { schema_version: ENTRY_POINT_SCHEMA_VERSION,
                         project: project.to_string(),
                         step_kind: step_kind.to_string(),
                         payload_key: SELF_ARTIFACT_KEY.to_string(),
                         payload_encoding: encoding.as_str().to_string(),
                         runner: RunnerSpec { program: "pipe-cli".to_string(),
                                              args: vec!["runner".to_string(),
                                                         "--artifact".to_string(),
                                                         SELF_ARTIFACT_KEY.to_string()] } }
}

/// Texto del entry point (JSON pretty, con newline final).
pub fn render_entry_point(manifest: &EntryPointManifest) -> Result<String, RemoteError> {
    let mut text = serde_json::to_string_pretty(manifest).map_err(|e| RemoteError::Serialization(e.to_string()))?;
    text.push('\n');
    Ok(text)
}

/// Parseo del lado runner.
pub fn parse_entry_point(text: &str) -> Result<EntryPointManifest, RemoteError> {
    serde_json::from_str(text).map_err(|e| RemoteError::Deserialization(e.to_string()))
}

/// Escribe el entry point a un archivo temporal privado. Relocaciones
/// concurrentes desde el mismo working directory no deben pisarse: cada una
/// usa su propia ruta no-colisionante, y el archivo se elimina al soltar el
/// handle, haya ido bien o mal la sumisión.
pub(crate) fn write_private_entry_point(text: &str) -> Result<NamedTempFile, RemoteError> {
    let mut file = NamedTempFile::new().map_err(|e| RemoteError::EntryPointIo(e.to_string()))?;
    file.write_all(text.as_bytes())
        .map_err(|e| RemoteError::EntryPointIo(e.to_string()))?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_round_trips_and_names_the_step_kind() {
        let manifest = synthesize_entry_point("geo", "TrainModelStep", SnapshotEncoding::Json);
        let text = render_entry_point(&manifest).expect("render");
        assert!(text.contains("TrainModelStep"));
        assert!(text.contains(SELF_ARTIFACT_KEY));
        let parsed = parse_entry_point(&text).expect("parse");
        assert_eq!(parsed, manifest);
    }

    #[test]
    fn private_entry_point_file_is_removed_on_drop() {
        let file = write_private_entry_point("{}\n").expect("escribe el temporal");
        let path = file.path().to_path_buf();
        assert!(path.exists());
        // soltar el handle limpia el archivo, haya ido bien o mal la sumisión
        drop(file);
        assert!(!path.exists());
    }
}
