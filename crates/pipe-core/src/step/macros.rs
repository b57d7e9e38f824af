//! Macro utilitaria para reducir boilerplate al declarar pasos.
//!
//! Exportada en la raíz del crate para poder usarla como:
//!   use pipe_core::work_step;

/// Declara un `StepWork` con struct de config serde y cuerpo de trabajo.
///
/// Forma soportada:
/// ```ignore
/// work_step! {
///     EchoStep {
///         kind: "EchoStep",
///         category: StepCategory::Generic,
///         config: EchoParams,
///         run(me, ctx, p) {
///             Ok(p.foo.clone().unwrap_or(serde_json::Value::Null))
///         }
///     }
/// }
/// ```
/// La config debe implementar Clone + Default + Serialize + DeserializeOwned.
/// En `run`, `p` son los params efectivos ya decodificados (config +
/// overrides); si la decodificación falla se usa la config ligada.
#[macro_export]
macro_rules! work_step {
    (
        $name:ident {
            kind: $kind:expr,
            category: $cat:expr,
            config: $cfg:ty,
            run($self_ident:ident, $ctx_ident:ident, $cfg_ident:ident) $body:block
        }
    ) => {
        #[derive(Clone, Debug)]
        pub struct $name {
            pub config: $cfg,
        }

        impl $name {
            pub fn new(config: $cfg) -> Self {
                Self { config }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new(<$cfg as Default>::default())
            }
        }

        impl $crate::step::StepWork for $name {
            fn kind_name(&self) -> &str {
                $kind
            }

            fn category(&self) -> $crate::step::StepCategory {
                $cat
            }

            fn config(&self) -> serde_json::Value {
                serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
            }

            fn work(&self,
                    $ctx_ident: &$crate::model::ExecutionContext)
                    -> Result<serde_json::Value, $crate::errors::CoreError> {
                let $self_ident = self;
                let $cfg_ident: $cfg = match $ctx_ident.params_as::<$cfg>() {
                    Ok(p) => p,
                    Err(_) => $self_ident.config.clone(),
                };
                $body
            }
        }
    };
}
