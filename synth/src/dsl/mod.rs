//! The symbol algebra: values, types, and the contents a program blank can
//! receive (inputs, constants, operations and the structural if-branch),
//! gathered into a [`Dsl`].

pub mod content;
pub mod value;

pub use content::{
    Constant, Content, ContentKey, ContentKind, IfBranching, Input, OpFn, Operation, Signature, Sym,
};
pub use value::{Value, ValueType};

use std::sync::Arc;

use crate::task::Task;

/// A domain-specific language: the pool of contents available to fill program
/// blanks with.
///
/// Symbols are identified by name across all categories. Registering a name
/// twice keeps the first registration and logs a warning, so that the candidate
/// pool never contains two contents with the same identity.
#[derive(Clone, Default)]
pub struct Dsl {
    inputs: Vec<Input>,
    constants: Vec<Constant>,
    operations: Vec<Arc<Operation>>,
    standard_ops: Vec<Content>,
}

impl Dsl {
    pub fn new() -> Dsl {
        Dsl::default()
    }

    pub fn with_input(mut self, name: impl Into<Sym>, tpe: ValueType) -> Dsl {
        self.add_input(Input::new(name, tpe));
        self
    }

    pub fn with_constant(mut self, name: impl Into<Sym>, value: impl Into<Value>) -> Dsl {
        let constant = Constant::new(name, value);
        if self.register(constant.name.clone()) {
            self.constants.push(constant);
        }
        self
    }

    pub fn with_operation(mut self, operation: Operation) -> Dsl {
        if self.register(operation.name.clone()) {
            self.operations.push(Arc::new(operation));
        }
        self
    }

    /// Makes the structural if-branch available to the search.
    pub fn with_if_branching(mut self) -> Dsl {
        let content = Content::If(IfBranching);
        if !self.standard_ops.contains(&content) {
            self.standard_ops.push(content);
        }
        self
    }

    /// Adds the task's inputs, in declaration order. Inputs already present
    /// under the same name are left untouched.
    pub fn add_task_inputs(&mut self, task: &Task) {
        for (name, tpe) in task.input_types() {
            if self.inputs.iter().any(|i| &i.name == name) {
                continue;
            }
            self.add_input(Input::new(name.clone(), *tpe));
        }
    }

    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    pub fn operations(&self) -> &[Arc<Operation>] {
        &self.operations
    }

    /// The candidate pool, in the canonical order: inputs, constants,
    /// operations, standard operations.
    pub fn contents(&self) -> Vec<Content> {
        let mut pool = Vec::with_capacity(
            self.inputs.len() + self.constants.len() + self.operations.len() + self.standard_ops.len(),
        );
        pool.extend(self.inputs.iter().cloned().map(Content::Input));
        pool.extend(self.constants.iter().cloned().map(Content::Constant));
        pool.extend(self.operations.iter().cloned().map(Content::Operation));
        pool.extend(self.standard_ops.iter().cloned());
        pool
    }

    fn add_input(&mut self, input: Input) {
        if self.register(input.name.clone()) {
            self.inputs.push(input);
        }
    }

    /// Returns false (and warns) if the name is already taken.
    fn register(&self, name: Sym) -> bool {
        let taken = self.inputs.iter().any(|i| i.name == name)
            || self.constants.iter().any(|c| c.name == name)
            || self.operations.iter().any(|o| o.name == name);
        if taken {
            tracing::warn!("duplicated symbol, keeping the first registration: {}", name);
        }
        !taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_op(name: &str, out: ValueType) -> Operation {
        Operation::new(name, out, vec![("x", ValueType::Int)], "", Arc::new(|_: &[Value]| Ok(Value::Int(0))))
    }

    #[test]
    fn pool_order_is_inputs_constants_operations_standard() {
        let dsl = Dsl::new()
            .with_constant("N", 42)
            .with_operation(dummy_op("inc", ValueType::Int))
            .with_input("number", ValueType::Int)
            .with_if_branching();
        let pool = dsl.contents();
        let names: Vec<&str> = pool.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["number", "N", "inc", "if"]);
    }

    #[test]
    fn duplicate_names_keep_the_first_registration() {
        let dsl = Dsl::new()
            .with_constant("x", 1)
            .with_constant("x", 2)
            .with_input("x", ValueType::Str);
        assert_eq!(dsl.constants().len(), 1);
        assert_eq!(dsl.constants()[0].value, Value::Int(1));
        assert!(dsl.inputs().is_empty());
    }

    #[test]
    fn if_branching_is_registered_once() {
        let dsl = Dsl::new().with_if_branching().with_if_branching();
        assert_eq!(dsl.contents().len(), 1);
    }
}
