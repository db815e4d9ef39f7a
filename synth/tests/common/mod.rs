#![allow(dead_code)]

use std::sync::Arc;

use lacuna::prelude::*;

pub fn concat() -> Operation {
    Operation::new(
        "concat",
        ValueType::Str,
        vec![("string", ValueType::Str), ("other", ValueType::Str)],
        "def concat(string: str, other: str) -> str:\n    return string + other\n",
        Arc::new(|args: &[Value]| match (&args[0], &args[1]) {
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{a}{b}"))),
            _ => Err(EvalError::new("concat expects two strings")),
        }),
    )
}

pub fn repeat() -> Operation {
    Operation::new(
        "repeat",
        ValueType::Str,
        vec![("string", ValueType::Str), ("times", ValueType::Int)],
        "def repeat(string: str, times: int) -> str:\n    return string * times\n",
        Arc::new(|args: &[Value]| match (&args[0], &args[1]) {
            (Value::Str(s), Value::Int(n)) if *n >= 0 => Ok(Value::Str(s.repeat(*n as usize))),
            _ => Err(EvalError::new("repeat expects a string and a non-negative count")),
        }),
    )
}

pub fn add_one() -> Operation {
    Operation::new(
        "add_one",
        ValueType::Int,
        vec![("number", ValueType::Int)],
        "def add_one(number: int) -> int:\n    return number + 1\n",
        Arc::new(|args: &[Value]| match &args[0] {
            Value::Int(n) => Ok(Value::Int(n + 1)),
            _ => Err(EvalError::new("add_one expects an int")),
        }),
    )
}

pub fn double() -> Operation {
    Operation::new(
        "double",
        ValueType::Int,
        vec![("number", ValueType::Int)],
        "def double(number: int) -> int:\n    return number * 2\n",
        Arc::new(|args: &[Value]| match &args[0] {
            Value::Int(n) => Ok(Value::Int(n * 2)),
            _ => Err(EvalError::new("double expects an int")),
        }),
    )
}

pub fn is_even() -> Operation {
    Operation::new(
        "is_even",
        ValueType::Bool,
        vec![("number", ValueType::Int)],
        "def is_even(number: int) -> bool:\n    return number % 2 == 0\n",
        Arc::new(|args: &[Value]| match &args[0] {
            Value::Int(n) => Ok(Value::Bool(n % 2 == 0)),
            _ => Err(EvalError::new("is_even expects an int")),
        }),
    )
}

/// Enumerates every program with a fresh `TopDownBFS` agent and renders each
/// with the default name.
pub fn enumerate_programs(
    dsl: &Dsl,
    output: ValueType,
    max_depth: u32,
) -> Vec<(ProgramGraph, Artifact)> {
    let mut agent = TopDownBFS::new();
    let mut enumerator = Enumerator::new(dsl, output, &mut agent, max_depth).unwrap();
    let mut programs = Vec::new();
    while let Some(graph) = enumerator.next_program().unwrap() {
        let artifact = render(&graph, "generated_func", dsl).unwrap();
        programs.push((graph, artifact));
    }
    programs
}

/// The function body of a rendered artifact, one trimmed line per entry.
pub fn body_lines(source: &str) -> Vec<String> {
    let lines: Vec<&str> = source.lines().collect();
    let def = lines
        .iter()
        .rposition(|line| line.starts_with("def generated_func"))
        .expect("artifact has no function definition");
    lines[def + 1..]
        .iter()
        .take_while(|line| !line.is_empty())
        .map(|line| line.strip_prefix("    ").unwrap_or(line).to_string())
        .collect()
}

pub fn enumerate_bodies(dsl: &Dsl, output: ValueType, max_depth: u32) -> Vec<Vec<String>> {
    enumerate_programs(dsl, output, max_depth)
        .iter()
        .map(|(_, artifact)| body_lines(&artifact.source))
        .collect()
}
