use serde_json::Value;

use super::StepCategory;
use crate::errors::CoreError;
use crate::model::ExecutionContext;

/// Comportamiento de un Step. Implementaciones deben ser puras respecto a
/// inputs resueltos + params: nada de estado oculto que afecte el resultado.
pub trait StepWork {
    /// Nombre de clase del paso. Se usa para nombrar tasks remotas y como
    /// bucket de cache, no como identidad de instancia.
    fn kind_name(&self) -> &str;

    /// Categoría cerrada que selecciona el hook post-run.
    fn category(&self) -> StepCategory;

    /// Configuración serializable ligada a la instancia (payload arbitrario,
    /// p.ej. `foo`). Entra a la identidad de cache.
    fn config(&self) -> Value;

    /// Función de trabajo. Recibe los inputs ya resueltos vía contexto;
    /// devuelve el valor crudo que el hook de categoría convertirá en
    /// artifact.
    fn work(&self, ctx: &ExecutionContext) -> Result<Value, CoreError>;
}
