use pipe_core::hashing::hash_value;
use serde_json::json;

#[test]
fn hash_value_is_hex_64_and_key_order_independent() {
    let v = json!({"b": 2, "a": 1});
    let h = hash_value(&v);
    // blake3 hex tiene 64 chars
    assert_eq!(h.len(), 64);
    // determinista: distinto orden de claves, mismo hash
    let v2 = json!({"a": 1, "b": 2});
    assert_eq!(h, hash_value(&v2));
    // contenido distinto, hash distinto
    assert_ne!(h, hash_value(&json!({"a": 1, "b": 3})));
}
