//! Definiciones relacionadas a Steps.
//!
//! Un Step es una unidad de trabajo con inputs declarados, un comportamiento
//! de ejecución y un flag de completitud. Este módulo define:
//! - `StepWork`: el comportamiento (nombre de clase, categoría, config,
//!   función de trabajo).
//! - `StepInput`: suma explícita valor-plano | paso, para que el walk del
//!   resolver sea exhaustivo.
//! - `StepNode` / `StepHandle`: el nodo del grafo con estado de ciclo de
//!   vida, compartible entre pasos aguas abajo.
//! - `StepCategory` y sus hooks post-run cerrados.

pub mod category;
pub mod input;
pub mod macros;
pub mod node;
mod work;

pub use category::{post_run, StepCategory};
pub use input::StepInput;
pub use node::{step, StepHandle, StepNode};
pub use work::StepWork;
