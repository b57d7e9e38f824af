//! pipe-remote: protocolo de relocación de pasos a un backend externo.
//!
//! Dado un paso instanciado (de `pipe-core`), este crate serializa su
//! estado, sintetiza un entry point ejecutable, lo somete al backend y
//! define cómo el runner remoto reconstruye e invoca el paso. El backend
//! concreto queda detrás del trait `RemoteBackend`; acá sólo vive el
//! protocolo.
pub mod backend;
pub mod codec;
pub mod config;
pub mod descriptor;
pub mod entry_point;
pub mod errors;
pub mod registry;
pub mod relocate;
pub mod snapshot;
pub mod stub;
pub mod trampoline;

pub use backend::{ArtifactValue, RemoteBackend, UploadReceipt};
pub use codec::{decode_snapshot, encode_snapshot, SnapshotEncoding};
pub use config::{RemoteConfig, CONFIG};
pub use descriptor::{ScriptSpec, TaskHandle, TaskSpec};
pub use entry_point::{parse_entry_point, render_entry_point, synthesize_entry_point, EntryPointManifest, RunnerSpec,
                      ENTRY_POINT_NAME, SELF_ARTIFACT_KEY};
pub use errors::{BackendError, RemoteError};
pub use registry::{StepFactory, StepRegistry};
pub use relocate::{Relocation, Relocator};
pub use snapshot::{StepSnapshot, SNAPSHOT_SCHEMA_VERSION};
pub use stub::InMemoryBackend;
pub use trampoline::{remote_main, run_step, TaskContext};
