//! Evaluation of complete programs against a task's examples.
//!
//! The executor is a collaborator of the engine: the [`Evaluator`] trait is its
//! contract, and [`GraphEvaluator`] the built-in implementation interpreting
//! the program graph directly, with no sandbox.

use crate::dsl::{Content, Sym, Value};
use crate::error::EvalError;
use crate::program::{Artifact, BlankId, ProgramGraph};
use crate::task::Task;

/// Result of running a program on one example.
#[derive(Clone, Debug)]
pub struct ExampleOutcome {
    pub expected: Value,
    pub actual: Result<Value, EvalError>,
    pub success: bool,
}

/// Per-example results and their conjunction.
#[derive(Clone, Debug)]
pub struct EvalReport {
    pub outcomes: Vec<ExampleOutcome>,
    pub full_success: bool,
}

impl EvalReport {
    pub fn from_outcomes(outcomes: Vec<ExampleOutcome>) -> EvalReport {
        let full_success = outcomes.iter().all(|o| o.success);
        EvalReport { outcomes, full_success }
    }
}

/// Runs a synthesized program against every example of a task. An evaluation
/// failure marks that example as failed; it never aborts the enumeration.
pub trait Evaluator {
    fn evaluate(&mut self, graph: &ProgramGraph, artifact: &Artifact, task: &Task) -> EvalReport;
}

/// Interprets the program graph itself: inputs from the example environment,
/// constants by value, operations through their callable, branches by the
/// test's boolean.
#[derive(Default)]
pub struct GraphEvaluator;

impl GraphEvaluator {
    pub fn new() -> GraphEvaluator {
        GraphEvaluator
    }
}

impl Evaluator for GraphEvaluator {
    fn evaluate(&mut self, graph: &ProgramGraph, _artifact: &Artifact, task: &Task) -> EvalReport {
        let outcomes = task
            .examples()
            .iter()
            .map(|example| {
                let actual = eval_blank(graph, &graph.root_id(), &example.inputs);
                let success = matches!(&actual, Ok(value) if *value == example.output);
                ExampleOutcome {
                    expected: example.output.clone(),
                    actual,
                    success,
                }
            })
            .collect();
        EvalReport::from_outcomes(outcomes)
    }
}

/// Evaluates the subtree rooted at the given blank in the environment binding
/// input names to values.
pub fn eval_blank(
    graph: &ProgramGraph,
    blank: &BlankId,
    env: &[(Sym, Value)],
) -> Result<Value, EvalError> {
    let content = graph
        .content(blank)
        .ok_or_else(|| EvalError::new(format!("blank `{blank}` is empty")))?;
    match content {
        Content::Input(input) => env
            .iter()
            .find(|(name, _)| *name == input.name)
            .map(|(_, value)| value.clone())
            .ok_or_else(|| EvalError::new(format!("no value bound to input `{}`", input.name))),
        Content::Constant(constant) => Ok(constant.value.clone()),
        Content::Operation(op) => {
            let subs = graph.sub_blanks(blank);
            let mut args = Vec::with_capacity(subs.len());
            for sub in &subs {
                args.push(eval_blank(graph, sub, env)?);
            }
            op.apply(&args)
        }
        Content::If(_) => {
            let subs = graph.sub_blanks(blank);
            let test = eval_blank(graph, &subs[0], env)?;
            let test = test
                .as_bool()
                .ok_or_else(|| EvalError::new("branch test did not produce a boolean"))?;
            if test {
                eval_blank(graph, &subs[1], env)
            } else {
                eval_blank(graph, &subs[2], env)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::{Constant, IfBranching, Input, OpFn, Operation, ValueType};
    use std::sync::Arc;

    fn repeat_fn() -> OpFn {
        Arc::new(|args: &[Value]| match (&args[0], &args[1]) {
            (Value::Str(s), Value::Int(n)) if *n >= 0 => Ok(Value::Str(s.repeat(*n as usize))),
            _ => Err(EvalError::new("repeat expects a string and a non-negative count")),
        })
    }

    fn repeat() -> Operation {
        Operation::new(
            "repeat",
            ValueType::Str,
            vec![("string", ValueType::Str), ("times", ValueType::Int)],
            "def repeat(string: str, times: int) -> str:\n    return string * times\n",
            repeat_fn(),
        )
    }

    fn env(s: &str) -> Vec<(Sym, Value)> {
        vec![(Sym::from("input_string"), Value::from(s))]
    }

    #[test]
    fn evaluates_operations_over_inputs_and_constants() {
        let mut graph = ProgramGraph::new(ValueType::Str);
        graph
            .fill_blank(&BlankId::ROOT, &Content::Operation(Arc::new(repeat())))
            .unwrap();
        graph
            .fill_blank(
                &BlankId::new("return>repeat>string"),
                &Content::Input(Input::new("input_string", ValueType::Str)),
            )
            .unwrap();
        graph
            .fill_blank(
                &BlankId::new("return>repeat>times"),
                &Content::Constant(Constant::new("THREE", 3)),
            )
            .unwrap();

        let result = eval_blank(&graph, &BlankId::ROOT, &env("ab")).unwrap();
        assert_eq!(result, Value::from("ababab"));
    }

    #[test]
    fn branch_follows_the_test() {
        let even = Operation::new(
            "is_even",
            ValueType::Bool,
            vec![("number", ValueType::Int)],
            "",
            Arc::new(|args: &[Value]| match &args[0] {
                Value::Int(n) => Ok(Value::Bool(n % 2 == 0)),
                _ => Err(EvalError::new("is_even expects an int")),
            }),
        );
        let mut graph = ProgramGraph::new(ValueType::Str);
        graph.fill_blank(&BlankId::ROOT, &Content::If(IfBranching)).unwrap();
        graph
            .fill_blank(&BlankId::new("return>if>test"), &Content::Operation(Arc::new(even)))
            .unwrap();
        graph
            .fill_blank(
                &BlankId::new("return>if>test>is_even>number"),
                &Content::Input(Input::new("number", ValueType::Int)),
            )
            .unwrap();
        graph
            .fill_blank(
                &BlankId::new("return>if>body"),
                &Content::Constant(Constant::new("EVEN", "even")),
            )
            .unwrap();
        graph
            .fill_blank(
                &BlankId::new("return>if>else"),
                &Content::Constant(Constant::new("ODD", "odd")),
            )
            .unwrap();

        let run = |n: i64| {
            eval_blank(&graph, &BlankId::ROOT, &[(Sym::from("number"), Value::from(n))]).unwrap()
        };
        assert_eq!(run(4), Value::from("even"));
        assert_eq!(run(7), Value::from("odd"));
    }

    #[test]
    fn operation_failures_are_recorded_per_example() {
        let mut graph = ProgramGraph::new(ValueType::Str);
        graph
            .fill_blank(&BlankId::ROOT, &Content::Operation(Arc::new(repeat())))
            .unwrap();
        graph
            .fill_blank(
                &BlankId::new("return>repeat>string"),
                &Content::Input(Input::new("input_string", ValueType::Str)),
            )
            .unwrap();
        graph
            .fill_blank(
                &BlankId::new("return>repeat>times"),
                &Content::Constant(Constant::new("NEG", -1)),
            )
            .unwrap();

        let task = Task::from_examples(vec![(
            vec![("input_string", Value::from("ab"))],
            Value::from("ababab"),
        )])
        .unwrap();
        let artifact = Artifact {
            name: "generated_func".to_string(),
            source: String::new(),
        };
        let report = GraphEvaluator::new().evaluate(&graph, &artifact, &task);
        assert!(!report.full_success);
        assert_eq!(report.outcomes.len(), 1);
        assert!(report.outcomes[0].actual.is_err());
    }
}
