//! EchoStep: paso hoja genérico que devuelve su propia config.
//!
//! Útil como leaf en tests y como carga mínima de relocación: el valor
//! `foo` viaja en el snapshot y vuelve como payload del artifact.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use pipe_core::step::StepCategory;
use pipe_core::work_step;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EchoParams {
    /// Payload arbitrario ligado a la instancia.
    pub foo: Option<Value>,
}

work_step! {
    EchoStep {
        kind: "EchoStep",
        category: StepCategory::Generic,
        config: EchoParams,
        run(_me, _ctx, p) {
            Ok(p.foo.clone().unwrap_or(Value::Null))
        }
    }
}

impl EchoStep {
    /// Conveniencia: `EchoStep::with_foo(json!(42))`.
    pub fn with_foo(foo: impl Into<Value>) -> Self {
        Self::new(EchoParams { foo: Some(foo.into()) })
    }
}
