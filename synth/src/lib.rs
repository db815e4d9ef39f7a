//! Inductive program synthesis by typed enumerative search over a
//! domain-specific language.
//!
//! Given a DSL of inputs, constants and typed operations, an expected output
//! type and a set of input/output examples, the engine enumerates candidate
//! programs up to a bounded depth, renders each as a source artifact,
//! evaluates it against the examples and returns those satisfying every one.
//!
//! The enumeration is driven by a search over *configurations*: partial
//! programs represented as typed trees of blanks and contents. A candidate
//! generator computes the applicable actions (fill a group of blanks, empty a
//! group of sub-blanks, jump to an unexplored configuration, stop) and an
//! agent picks one; the search-state graph guarantees that no complete
//! program is yielded twice and that the depth bound is respected.
//!
//! ```
//! use std::sync::Arc;
//! use lacuna::prelude::*;
//!
//! let repeat = Operation::new(
//!     "repeat",
//!     ValueType::Str,
//!     vec![("string", ValueType::Str), ("times", ValueType::Int)],
//!     "def repeat(string: str, times: int) -> str:\n    return string * times\n",
//!     Arc::new(|args: &[Value]| match (&args[0], &args[1]) {
//!         (Value::Str(s), Value::Int(n)) => Ok(Value::Str(s.repeat(*n as usize))),
//!         _ => Err(EvalError::new("repeat expects a string and a count")),
//!     }),
//! );
//! let dsl = Dsl::new().with_constant("THREE", 3).with_operation(repeat);
//! let task = Task::from_examples(vec![
//!     (vec![("input_string", Value::from("ab"))], Value::from("ababab")),
//! ])
//! .unwrap();
//!
//! let mut synthesizer = Synthesizer::new(dsl, task);
//! let result = synthesizer.run(2).unwrap();
//! assert!(result.best().is_some());
//! ```

pub mod dsl;
pub mod error;
pub mod eval;
pub mod prelude;
pub mod program;
pub mod search;
pub mod synthesizer;
pub mod task;
pub mod utils;
