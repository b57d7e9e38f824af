//! Motor de ejecución local.
//!
//! `StepRunner` orquesta la resolución recursiva de dependencias, la
//! política de cache y la emisión de eventos. `resolve` contiene el walk de
//! validación de ciclos y la materialización de inputs.

pub mod resolve;
pub mod runner;

pub use resolve::detect_cycle;
pub use runner::StepRunner;

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde_json::{json, Value};

    use crate::errors::CoreError;
    use crate::event::RunEventKind;
    use crate::model::ExecutionContext;
    use crate::step::{step, StepCategory, StepInput, StepWork};
    use crate::StepRunner;

    /// Paso de prueba que registra cada invocación de trabajo en un log
    /// compartido y devuelve un valor fijo.
    struct ProbeStep {
        label: &'static str,
        output: Value,
        calls: Rc<RefCell<Vec<&'static str>>>,
    }

    impl ProbeStep {
        fn new(label: &'static str, output: Value, calls: &Rc<RefCell<Vec<&'static str>>>) -> Self {
            Self { label,
                   output,
                   calls: calls.clone() }
        }
    }

    impl StepWork for ProbeStep {
        fn kind_name(&self) -> &str {
            self.label
        }
        fn category(&self) -> StepCategory {
            StepCategory::Generic
        }
        fn config(&self) -> Value {
            json!({ "label": self.label })
        }
        fn work(&self, _ctx: &ExecutionContext) -> Result<Value, CoreError> {
            self.calls.borrow_mut().push(self.label);
            Ok(self.output.clone())
        }
    }

    struct FailingStep;

    impl StepWork for FailingStep {
        fn kind_name(&self) -> &str {
            "FailingStep"
        }
        fn category(&self) -> StepCategory {
            StepCategory::Generic
        }
        fn config(&self) -> Value {
            json!({})
        }
        fn work(&self, _ctx: &ExecutionContext) -> Result<Value, CoreError> {
            Err(CoreError::WorkFailed("boom".into()))
        }
    }

    #[test]
    fn resolves_incomplete_inputs_depth_first_in_declaration_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let grandchild = step(ProbeStep::new("gc", json!(0), &calls), vec![]);
        let left = step(ProbeStep::new("left", json!(1), &calls),
                        vec![StepInput::step(&grandchild)]);
        let right = step(ProbeStep::new("right", json!(2), &calls), vec![]);
        let root = step(ProbeStep::new("root", json!(3), &calls),
                        vec![StepInput::step(&left),
                             StepInput::value(json!("plain")),
                             StepInput::step(&right)]);

        let mut runner = StepRunner::in_memory("test");
        runner.run(&root).expect("la corrida debería completar");

        // profundidad primero, izquierda a derecha, el propio trabajo al final
        assert_eq!(*calls.borrow(), vec!["gc", "left", "right", "root"]);
        assert!(root.borrow().completed);
        assert!(left.borrow().completed);
    }

    #[test]
    fn run_on_completed_step_is_a_noop() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let node = step(ProbeStep::new("once", json!(7), &calls), vec![]);

        let mut runner = StepRunner::in_memory("test");
        let first = runner.run(&node).expect("primera corrida");
        let second = runner.run(&node).expect("segunda corrida");

        assert_eq!(calls.borrow().len(), 1, "el trabajo no debe re-invocarse");
        assert_eq!(first.hash, second.hash);
    }

    #[test]
    fn completed_inputs_are_not_rerun() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let leaf = step(ProbeStep::new("leaf", json!(1), &calls), vec![]);
        let a = step(ProbeStep::new("a", json!(2), &calls), vec![StepInput::step(&leaf)]);
        let b = step(ProbeStep::new("b", json!(3), &calls), vec![StepInput::step(&leaf)]);

        let mut runner = StepRunner::in_memory("test");
        runner.run(&a).expect("a completa");
        runner.run(&b).expect("b completa");

        assert_eq!(calls.borrow().iter().filter(|c| **c == "leaf").count(), 1);
    }

    #[test]
    fn cycle_is_detected_before_any_work_runs() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let a = step(ProbeStep::new("a", json!(1), &calls), vec![]);
        let b = step(ProbeStep::new("b", json!(2), &calls), vec![StepInput::step(&a)]);
        // cerrar el ciclo a -> b -> a
        a.borrow_mut().inputs.push(StepInput::step(&b));

        let mut runner = StepRunner::in_memory("test");
        let err = runner.run(&a).unwrap_err();

        assert!(matches!(err, CoreError::DependencyCycle { .. }));
        assert!(calls.borrow().is_empty(), "ningún trabajo debe ejecutarse");
        assert!(!a.borrow().completed);
    }

    #[test]
    fn self_cycle_is_detected() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let a = step(ProbeStep::new("a", json!(1), &calls), vec![]);
        a.borrow_mut().inputs.push(StepInput::step(&a));

        let mut runner = StepRunner::in_memory("test");
        assert!(matches!(runner.run(&a), Err(CoreError::DependencyCycle { .. })));
    }

    #[test]
    fn failure_propagates_and_completed_siblings_stand() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let ok_leaf = step(ProbeStep::new("ok", json!(1), &calls), vec![]);
        let bad_leaf = step(FailingStep, vec![]);
        let root = step(ProbeStep::new("root", json!(2), &calls),
                        vec![StepInput::step(&ok_leaf), StepInput::step(&bad_leaf)]);

        let mut runner = StepRunner::in_memory("test");
        let err = runner.run(&root).unwrap_err();

        assert_eq!(err, CoreError::WorkFailed("boom".into()));
        // el hermano ya corrido queda completado (reanudable en retry)
        assert!(ok_leaf.borrow().completed);
        assert!(!root.borrow().completed);
        assert!(!calls.borrow().contains(&"root"));
    }

    #[test]
    fn equivalent_step_reuses_cache_without_work() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let first = step(ProbeStep::new("same", json!(5), &calls), vec![]);
        let twin = step(ProbeStep::new("same", json!(5), &calls), vec![]);

        let mut runner = StepRunner::in_memory("test");
        runner.run(&first).expect("primera corrida");
        runner.run(&twin).expect("gemela desde cache");

        assert_eq!(calls.borrow().len(), 1, "la gemela no debe trabajar");
        assert!(twin.borrow().completed);
        let events = runner.events();
        assert!(events.iter()
                      .any(|e| matches!(&e.kind, RunEventKind::StepCached { kind_name, .. } if kind_name == "same")));
    }
}
