//! Política de identidad y reuso de corridas previas.
//!
//! La identidad de cache de un paso es la tupla (proyecto, nombre de clase,
//! firma de dependencias). Dos pasos son cache-equivalentes si coinciden su
//! clase, su configuración y la identidad de cada input. Las perillas son
//! `force` (siempre re-ejecutar) y `overwrite` (permiso explícito para
//! reemplazar un resultado cacheado).

pub mod index;
pub mod key;

pub use index::{CacheEntry, CacheIndex, InMemoryCacheIndex};
pub use key::{step_fingerprint, CacheKey};

/// Perillas de la política de cache para una corrida.
#[derive(Debug, Clone, Copy, Default)]
pub struct CachePolicy {
    /// Saltear el lookup y re-ejecutar siempre. El resultado se registra
    /// bajo un nombre sufijado (convención de renombre, igual que la task
    /// remota en colisión).
    pub force: bool,
    /// Permiso explícito para reemplazar la entrada bajo el nombre base.
    pub overwrite: bool,
}
