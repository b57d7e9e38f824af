//! Constantes del motor de pasos.
//!
//! Valores estáticos que participan en el cálculo de fingerprints de cache.
//! `PIPELINE_VERSION` forma parte del input del hashing: un cambio de versión
//! del motor invalida determinísticamente las identidades de cache aunque la
//! configuración y los datos no cambien.

/// Versión lógica del motor de pasos. Mantener estable mientras no haya
/// cambios incompatibles en el contrato de ejecución o de cache.
pub const PIPELINE_VERSION: &str = "P1.0";
