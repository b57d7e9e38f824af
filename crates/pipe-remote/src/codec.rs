//! Codificación de snapshots para el wire.
//!
//! El encoding primario es texto JSON; el binario usa bincode con la config
//! estándar. El decoder intenta primero la decodificación texto-segura y cae
//! al binario si falla: la representación de storage del artifact no está
//! garantizada de antemano, así que ambas deben intentarse.

use serde::{Deserialize, Serialize};

use pipe_core::step::StepCategory;

use crate::errors::RemoteError;
use crate::snapshot::{StepSnapshot, SNAPSHOT_SCHEMA_VERSION};

/// Encoding elegido por el lado que somete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotEncoding {
    Json,
    Binary,
}

impl SnapshotEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotEncoding::Json => "json",
            SnapshotEncoding::Binary => "binary",
        }
    }
}

/// Espejo de wire para el camino binario. `serde_json::Value` no sobrevive
/// bincode (requiere `deserialize_any`), así que los campos JSON viajan como
/// texto embebido.
#[derive(Serialize, Deserialize)]
struct BinarySnapshot {
    schema_version: u32,
    step_kind: String,
    category: StepCategory,
    config: String,
    inputs: Vec<String>,
}

impl BinarySnapshot {
    fn from_snapshot(snapshot: &StepSnapshot) -> Result<Self, RemoteError> {
        let config = serde_json::to_string(&snapshot.config).map_err(|e| RemoteError::Serialization(e.to_string()))?;
        let mut inputs = Vec::with_capacity(snapshot.inputs.len());
        for input in &snapshot.inputs {
            inputs.push(serde_json::to_string(input).map_err(|e| RemoteError::Serialization(e.to_string()))?);
        }
        Ok(Self { schema_version: snapshot.schema_version,
                  step_kind: snapshot.step_kind.clone(),
                  category: snapshot.category,
                  config,
                  inputs })
    }

    fn into_snapshot(self) -> Result<StepSnapshot, RemoteError> {
        let config = serde_json::from_str(&self.config).map_err(|e| RemoteError::Deserialization(e.to_string()))?;
        let mut inputs = Vec::with_capacity(self.inputs.len());
        for input in &self.inputs {
            inputs.push(serde_json::from_str(input).map_err(|e| RemoteError::Deserialization(e.to_string()))?);
        }
        Ok(StepSnapshot { schema_version: self.schema_version,
                          step_kind: self.step_kind,
                          category: self.category,
                          config,
                          inputs })
    }
}

/// Serializa el snapshot en el encoding pedido.
pub fn encode_snapshot(snapshot: &StepSnapshot, encoding: SnapshotEncoding) -> Result<Vec<u8>, RemoteError> {
    match encoding {
        SnapshotEncoding::Json => {
            serde_json::to_vec(snapshot).map_err(|e| RemoteError::Serialization(e.to_string()))
        }
        SnapshotEncoding::Binary => {
            let wire = BinarySnapshot::from_snapshot(snapshot)?;
            bincode::serde::encode_to_vec(&wire, bincode::config::standard())
                .map_err(|e| RemoteError::Serialization(e.to_string()))
        }
    }
}

/// Decodifica bytes de snapshot: texto primero, binario como fallback. Si
/// ambos fallan el error es fatal (`Deserialization`), sin reintento.
pub fn decode_snapshot(bytes: &[u8]) -> Result<StepSnapshot, RemoteError> {
    let text_err = match serde_json::from_slice::<StepSnapshot>(bytes) {
        Ok(snapshot) => return check_schema(snapshot),
        Err(e) => e.to_string(),
    };
    match bincode::serde::decode_from_slice::<BinarySnapshot, _>(bytes, bincode::config::standard()) {
        Ok((wire, _)) => check_schema(wire.into_snapshot()?),
        Err(bin_err) => Err(RemoteError::Deserialization(format!("text: {text_err}; binary: {bin_err}"))),
    }
}

fn check_schema(snapshot: StepSnapshot) -> Result<StepSnapshot, RemoteError> {
    if snapshot.schema_version != SNAPSHOT_SCHEMA_VERSION {
        return Err(RemoteError::Deserialization(format!("unsupported snapshot schema_version {} (expected {})",
                                                        snapshot.schema_version, SNAPSHOT_SCHEMA_VERSION)));
    }
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> StepSnapshot {
        StepSnapshot { schema_version: SNAPSHOT_SCHEMA_VERSION,
                       step_kind: "EchoStep".into(),
                       category: StepCategory::Generic,
                       config: json!({ "foo": 42 }),
                       inputs: vec![json!(1), json!({ "rows": [1, 2] })] }
    }

    #[test]
    fn binary_bytes_decode_via_fallback_path() {
        let bytes = encode_snapshot(&sample(), SnapshotEncoding::Binary).expect("encode binario");
        // los bytes binarios no son JSON válido: debe entrar el fallback
        assert!(serde_json::from_slice::<StepSnapshot>(&bytes).is_err());
        let decoded = decode_snapshot(&bytes).expect("decode con fallback");
        assert_eq!(decoded, sample());
    }

    #[test]
    fn garbage_bytes_fail_both_decodings() {
        let err = decode_snapshot(b"\xff\xfe not a snapshot").unwrap_err();
        assert!(matches!(err, RemoteError::Deserialization(_)));
    }

    #[test]
    fn unsupported_schema_version_is_rejected() {
        let mut snapshot = sample();
        snapshot.schema_version = 99;
        let bytes = serde_json::to_vec(&snapshot).expect("serializa");
        assert!(matches!(decode_snapshot(&bytes), Err(RemoteError::Deserialization(_))));
    }
}
