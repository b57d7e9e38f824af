//! Canonicalización JSON mínima: objetos con claves en orden lexicográfico,
//! sin espacios. Suficiente para identidad estable dentro del motor.

use serde_json::Value;

/// Serializa `value` a su representación canónica.
pub fn to_canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => out.push_str(&escape_str(s)),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&escape_str(key));
                out.push(':');
                // la clave existe: acabamos de sacarla del mapa
                if let Some(v) = map.get(*key) {
                    write_canonical(v, out);
                }
            }
            out.push('}');
        }
    }
}

fn escape_str(s: &str) -> String {
    // serde_json escapa de forma estable; lo reutilizamos para strings
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""))
}
