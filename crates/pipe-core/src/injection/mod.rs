//! Fusión determinista de parámetros.
//!
//! Usada en dos bordes: overrides locales del runner sobre la config del
//! paso, y kwargs inyectados por el backend remoto sobre la config del
//! snapshot reconstruido.

mod merge;

pub use merge::merge_json;
