//! Module that re-exports the most commonly used types and traits to ease import.

pub use crate::dsl::{Constant, Content, Dsl, IfBranching, Input, Operation, Signature, Value, ValueType};
pub use crate::error::{EvalError, SynthError};
pub use crate::eval::{EvalReport, Evaluator, GraphEvaluator};
pub use crate::program::{render, Artifact, Blank, BlankId, ProgramGraph, ProgramHash};
pub use crate::search::{Enumerator, SearchStats, SynthAction, SynthesisAgent, TopDownBFS};
pub use crate::synthesizer::{
    DefaultNamer, ProgramNamer, SynthesisResult, SynthesisStats, Synthesizer,
};
pub use crate::task::{Example, Task};
