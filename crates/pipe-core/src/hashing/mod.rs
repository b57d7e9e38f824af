//! Hashing canónico del core.
//!
//! La identidad de artifacts y las fingerprints de cache se calculan sobre
//! JSON canonicalizado (claves de objeto ordenadas) hasheado con blake3. La
//! abstracción permite cambiar de algoritmo sin tocar el resto del core.

mod canonical;

pub use canonical::to_canonical_json;

use blake3::Hasher;
use serde_json::Value;

/// Hashea un string y devuelve hex (64 chars).
pub fn hash_str(input: &str) -> String {
    let mut h = Hasher::new();
    h.update(input.as_bytes());
    h.finalize().to_hex().to_string()
}

/// Hashea un `Value` en su forma canónica. Dos valores estructuralmente
/// iguales producen el mismo hash sin importar el orden de inserción de
/// claves.
pub fn hash_value(value: &Value) -> String {
    hash_str(&to_canonical_json(value))
}
