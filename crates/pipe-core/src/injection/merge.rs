//! Merge shallow de JSON: las claves de `b` reemplazan a las de `a`.
//! Mantener la semántica simple y predecible; deep-merge sólo si un caso
//! real lo pide.

use serde_json::Value;

/// Cuando ambos valores son objetos, une claves con precedencia de `b`.
/// Cuando alguno no es objeto, `b` reemplaza por completo.
pub fn merge_json(a: &Value, b: &Value) -> Value {
    match (a, b) {
        (Value::Object(ma), Value::Object(mb)) => {
            let mut out = ma.clone();
            for (k, v) in mb.iter() {
                out.insert(k.clone(), v.clone());
            }
            Value::Object(out)
        }
        (_, other) => other.clone(),
    }
}
