//! pipeflow: motor de pipelines de pasos para flujos de datos/modelos.
//!
//! Este crate raíz es el paraguas del workspace:
//! - `pipe-core`: grafo de pasos, resolución de dependencias, cache.
//! - `pipe-remote`: protocolo de relocación a un backend externo.
//! - `pipe-adapters`: clases de paso concretas + registro por defecto.
//!
//! Puede usarse desde `main.rs` (demos de validación) o por otros clientes.

pub use pipe_adapters as adapters;
pub use pipe_core as core;
pub use pipe_remote as remote;
