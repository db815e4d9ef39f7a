//! Synthesizes string programs from a few input/output examples and prints
//! every program satisfying all of them.

use std::sync::Arc;

use anyhow::Result;
use lacuna::prelude::*;

fn string_dsl() -> Dsl {
    let repeat = Operation::new(
        "repeat",
        ValueType::Str,
        vec![("string", ValueType::Str), ("times", ValueType::Int)],
        "def repeat(string: str, times: int) -> str:\n    return string * times\n",
        Arc::new(|args: &[Value]| match (&args[0], &args[1]) {
            (Value::Str(s), Value::Int(n)) if *n >= 0 => Ok(Value::Str(s.repeat(*n as usize))),
            _ => Err(EvalError::new("repeat expects a string and a non-negative count")),
        }),
    );
    let concat = Operation::new(
        "concat",
        ValueType::Str,
        vec![("string", ValueType::Str), ("other", ValueType::Str)],
        "def concat(string: str, other: str) -> str:\n    return string + other\n",
        Arc::new(|args: &[Value]| match (&args[0], &args[1]) {
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{a}{b}"))),
            _ => Err(EvalError::new("concat expects two strings")),
        }),
    );
    Dsl::new()
        .with_constant("TWO", 2)
        .with_constant("THREE", 3)
        .with_operation(repeat)
        .with_operation(concat)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let task = Task::from_examples(vec![
        (vec![("input_string", Value::from("abc"))], Value::from("abcabcabc")),
        (vec![("input_string", Value::from("ab"))], Value::from("ababab")),
        (vec![("input_string", Value::from("abcd"))], Value::from("abcdabcdabcd")),
    ])?;

    let mut synthesizer = Synthesizer::new(string_dsl(), task);
    let result = synthesizer.run(2)?;

    println!(
        "generated {} programs, {} successful, in {:.3}s",
        result.stats.n_generated, result.stats.n_successful, result.stats.runtime_seconds
    );
    for artifact in &result.successful_programs {
        println!("----------------------------------------");
        print!("{}", artifact.source);
    }
    if let Some(best) = result.best() {
        println!("========================================");
        println!("smallest solution ({} bytes):", best.len());
        print!("{}", best.source);
    }
    Ok(())
}
