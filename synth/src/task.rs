//! Synthesis tasks: sets of input/output examples with consistent types.

use anyhow::{bail, ensure, Result};

use crate::dsl::{Sym, Value, ValueType};

/// One observation: a full assignment of the inputs and the expected output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Example {
    pub inputs: Vec<(Sym, Value)>,
    pub output: Value,
}

/// A set of examples sharing input names, input types and an output type.
#[derive(Clone, Debug)]
pub struct Task {
    examples: Vec<Example>,
    input_types: Vec<(Sym, ValueType)>,
    output_type: ValueType,
}

impl Task {
    /// Builds a task from `(inputs, expected output)` pairs. Input names,
    /// input types and the output type are derived from the first example;
    /// every other example must be consistent with it, and no two examples
    /// may share the same inputs.
    pub fn from_examples(examples: Vec<(Vec<(&str, Value)>, Value)>) -> Result<Task> {
        ensure!(!examples.is_empty(), "a task needs at least one example");

        let (first_inputs, first_output) = &examples[0];
        let input_types: Vec<(Sym, ValueType)> = first_inputs
            .iter()
            .map(|(name, value)| (Sym::from(*name), value.value_type()))
            .collect();
        let output_type = first_output.value_type();

        let mut checked: Vec<Example> = Vec::with_capacity(examples.len());
        for (inputs, output) in &examples {
            ensure!(
                inputs.len() == input_types.len(),
                "example {:?} does not assign every input of the defining example",
                inputs
            );
            for (name, value) in inputs {
                let Some((_, expected)) = input_types.iter().find(|(n, _)| n == name) else {
                    bail!("unknown argument {name}, not present in the defining example");
                };
                ensure!(
                    *expected == value.value_type(),
                    "argument {name} is of type {}, which is not compatible with the defining example",
                    value.value_type()
                );
            }
            ensure!(
                output.value_type() == output_type,
                "output type {} is not compatible with the defining example",
                output.value_type()
            );
            let example = Example {
                inputs: inputs
                    .iter()
                    .map(|(name, value)| (Sym::from(*name), value.clone()))
                    .collect(),
                output: output.clone(),
            };
            ensure!(
                checked.iter().all(|e| e.inputs != example.inputs),
                "an example was already given for inputs {:?}",
                example.inputs
            );
            checked.push(example);
        }

        Ok(Task {
            examples: checked,
            input_types,
            output_type,
        })
    }

    /// Input names and types, in declaration order.
    pub fn input_types(&self) -> &[(Sym, ValueType)] {
        &self.input_types
    }

    pub fn output_type(&self) -> ValueType {
        self.output_type
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_are_derived_from_the_first_example() {
        let task = Task::from_examples(vec![
            (vec![("input_string", Value::from("abc"))], Value::from("abcabcabc")),
            (vec![("input_string", Value::from("ab"))], Value::from("ababab")),
        ])
        .unwrap();
        assert_eq!(task.input_types(), &[(Sym::from("input_string"), ValueType::Str)]);
        assert_eq!(task.output_type(), ValueType::Str);
        assert_eq!(task.examples().len(), 2);
    }

    #[test]
    fn unknown_argument_is_rejected() {
        let err = Task::from_examples(vec![
            (vec![("a", Value::from(1))], Value::from(1)),
            (vec![("b", Value::from(1))], Value::from(1)),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("unknown argument"));
    }

    #[test]
    fn input_type_mismatch_is_rejected() {
        let err = Task::from_examples(vec![
            (vec![("a", Value::from(1))], Value::from(1)),
            (vec![("a", Value::from("one"))], Value::from(1)),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("argument a"));
    }

    #[test]
    fn output_type_mismatch_is_rejected() {
        let err = Task::from_examples(vec![
            (vec![("a", Value::from(1))], Value::from(1)),
            (vec![("a", Value::from(2))], Value::from("two")),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("output type"));
    }

    #[test]
    fn duplicated_inputs_are_rejected() {
        let err = Task::from_examples(vec![
            (vec![("a", Value::from(1))], Value::from(1)),
            (vec![("a", Value::from(1))], Value::from(2)),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("already given"));
    }
}
