//! Configuración del borde remoto.
//! Carga variables de entorno y expone una estructura inmutable (`CONFIG`).
//! Los binarios cargan `.env` (dotenvy) antes del primer acceso.

use once_cell::sync::Lazy;
use std::env;

/// Parámetros del protocolo de relocación.
pub struct RemoteConfig {
    /// Proyecto por defecto bajo el que se crean tasks.
    pub project: String,
    /// Cola por defecto; `None` deja las tasks creadas sin encolar.
    pub queue: Option<String>,
    /// Techo de reintentos de sufijo ante colisión de nombre.
    pub max_name_retries: u32,
}

/// Instancia global perezosa, evaluada una sola vez.
pub static CONFIG: Lazy<RemoteConfig> = Lazy::new(|| {
    let project = env::var("PIPEFLOW_PROJECT").unwrap_or_else(|_| "pipeflow".to_string());
    let queue = env::var("PIPEFLOW_QUEUE").ok().filter(|q| !q.is_empty());
    let max_name_retries = env::var("PIPEFLOW_NAME_RETRY_MAX").ok()
                                                              .and_then(|v| v.parse().ok())
                                                              .unwrap_or(25);
    RemoteConfig { project,
                   queue,
                   max_name_retries }
});
