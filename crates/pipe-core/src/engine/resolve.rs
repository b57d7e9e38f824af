//! Validación y materialización del grafo de dependencias.

use std::collections::HashSet;

use uuid::Uuid;

use crate::errors::CoreError;
use crate::model::ResolvedInput;
use crate::step::{StepHandle, StepInput, StepNode};

/// Verifica que el grafo alcanzable desde `root` sea acíclico, antes de que
/// cualquier función de trabajo ejecute. Usa un set de nodos en pila (gris):
/// reencontrar un nodo todavía en pila es un back-edge, o sea un ciclo. Un
/// diamante (nodo compartido sin back-edge) es legal.
pub fn detect_cycle(root: &StepHandle) -> Result<(), CoreError> {
    let mut in_stack = HashSet::new();
    let mut done = HashSet::new();
    visit(root, &mut in_stack, &mut done)
}

fn visit(handle: &StepHandle, in_stack: &mut HashSet<Uuid>, done: &mut HashSet<Uuid>) -> Result<(), CoreError> {
    let (id, kind_name, deps) = {
        let node = handle.borrow();
        let deps: Vec<StepHandle> = node.inputs
                                        .iter()
                                        .filter_map(|input| match input {
                                            StepInput::Step(dep) => Some(dep.clone()),
                                            StepInput::Value(_) => None,
                                        })
                                        .collect();
        (node.id, node.kind_name(), deps)
    };

    if done.contains(&id) {
        return Ok(());
    }
    if !in_stack.insert(id) {
        return Err(CoreError::DependencyCycle { step: kind_name });
    }
    for dep in &deps {
        visit(dep, in_stack, done)?;
    }
    in_stack.remove(&id);
    done.insert(id);
    Ok(())
}

/// Materializa los inputs de un nodo en orden de declaración. Precondición:
/// toda dependencia ya está completada (el runner resolvió antes); un paso
/// completado sin artifact es un invariante roto.
pub(crate) fn resolve_inputs(node: &StepNode) -> Result<Vec<ResolvedInput>, CoreError> {
    node.inputs
        .iter()
        .map(|input| match input {
            StepInput::Value(v) => Ok(ResolvedInput::Value(v.clone())),
            StepInput::Step(dep) => {
                let dep = dep.borrow();
                dep.artifact
                   .clone()
                   .map(ResolvedInput::Artifact)
                   .ok_or_else(|| CoreError::MissingArtifact { step: dep.kind_name() })
            }
        })
        .collect()
}
