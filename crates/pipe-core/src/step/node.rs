//! Nodo del grafo de pasos y su handle compartido.

use std::cell::RefCell;
use std::rc::Rc;

use uuid::Uuid;

use super::{StepInput, StepWork};
use crate::model::Artifact;

/// Handle compartido a un nodo. El motor es single-threaded por diseño, así
/// que `Rc<RefCell<_>>` alcanza para que un mismo paso aparezca como input de
/// varios pasos aguas abajo.
pub type StepHandle = Rc<RefCell<StepNode>>;

/// Un paso instanciado: comportamiento + inputs ligados en construcción +
/// estado de ciclo de vida. Sólo el motor muta `completed` y `artifact`.
pub struct StepNode {
    /// Identidad de instancia (distinta del `kind_name`, que es de clase).
    pub id: Uuid,
    pub work: Box<dyn StepWork>,
    /// Secuencia ordenada y heterogénea de inputs, inmutable tras construir.
    pub inputs: Vec<StepInput>,
    /// True sólo después de una corrida local/remota exitosa o de un hit de
    /// cache adoptado.
    pub completed: bool,
    /// Artifact producido; compartido por referencia con pasos aguas abajo.
    pub artifact: Option<Rc<Artifact>>,
}

impl StepNode {
    pub fn new(work: Box<dyn StepWork>, inputs: Vec<StepInput>) -> StepHandle {
        Rc::new(RefCell::new(Self { id: Uuid::new_v4(),
                                    work,
                                    inputs,
                                    completed: false,
                                    artifact: None }))
    }

    /// Derivado: ¿algún input es otro paso?
    pub fn has_dependencies(&self) -> bool {
        self.inputs.iter().any(StepInput::is_step)
    }

    pub fn kind_name(&self) -> String {
        self.work.kind_name().to_string()
    }
}

/// Constructor libre ergonómico: `step(EchoStep::new(..), vec![..])`.
pub fn step(work: impl StepWork + 'static, inputs: Vec<StepInput>) -> StepHandle {
    StepNode::new(Box::new(work), inputs)
}
