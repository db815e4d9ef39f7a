//! The synthesis driver: enumerate, render, evaluate, collect.

use std::time::Instant;

use env_param::EnvParam;

use crate::dsl::Dsl;
use crate::error::SynthError;
use crate::eval::{Evaluator, GraphEvaluator};
use crate::program::{render, Artifact, ProgramGraph};
use crate::search::{Enumerator, SynthesisAgent, TopDownBFS};
use crate::task::Task;

/// Depth bound used by [`Synthesizer::run_default`].
static DEFAULT_MAX_DEPTH: EnvParam<u32> = EnvParam::new("LACUNA_DEFAULT_MAX_DEPTH", "3");

/// Names a program from its graph.
pub trait ProgramNamer {
    fn name(&self, graph: &ProgramGraph) -> String;
}

/// Names every program `generated_func`.
#[derive(Default)]
pub struct DefaultNamer;

impl ProgramNamer for DefaultNamer {
    fn name(&self, _graph: &ProgramGraph) -> String {
        "generated_func".to_string()
    }
}

/// Counters of one synthesis run.
#[derive(Clone, Debug)]
pub struct SynthesisStats {
    /// Number of programs generated during the synthesis.
    pub n_generated: u64,
    /// Number of generated programs satisfying every example of the task.
    pub n_successful: u64,
    /// Wall-clock time of the run, in seconds.
    pub runtime_seconds: f64,
}

/// Outcome of one synthesis run.
#[derive(Debug)]
pub struct SynthesisResult {
    /// The artifacts satisfying every example, in generation order.
    pub successful_programs: Vec<Artifact>,
    pub stats: SynthesisStats,
}

impl SynthesisResult {
    /// The smallest successful artifact by source length, first generated on
    /// ties.
    pub fn best(&self) -> Option<&Artifact> {
        self.successful_programs
            .iter()
            .enumerate()
            .min_by_key(|(i, artifact)| (artifact.len(), *i))
            .map(|(_, artifact)| artifact)
    }
}

/// Ties a DSL and a task together and drives the enumeration over rendered,
/// evaluated programs.
pub struct Synthesizer {
    dsl: Dsl,
    task: Task,
    agent: Box<dyn SynthesisAgent>,
    namer: Box<dyn ProgramNamer>,
    evaluator: Box<dyn Evaluator>,
}

impl Synthesizer {
    /// The DSL is augmented with the task's inputs, in declaration order.
    pub fn new(mut dsl: Dsl, task: Task) -> Synthesizer {
        dsl.add_task_inputs(&task);
        Synthesizer {
            dsl,
            task,
            agent: Box::new(TopDownBFS::new()),
            namer: Box::new(DefaultNamer),
            evaluator: Box::new(GraphEvaluator::new()),
        }
    }

    pub fn with_agent(mut self, agent: impl SynthesisAgent + 'static) -> Synthesizer {
        self.agent = Box::new(agent);
        self
    }

    pub fn with_namer(mut self, namer: impl ProgramNamer + 'static) -> Synthesizer {
        self.namer = Box::new(namer);
        self
    }

    pub fn with_evaluator(mut self, evaluator: impl Evaluator + 'static) -> Synthesizer {
        self.evaluator = Box::new(evaluator);
        self
    }

    /// Runs the synthesis with the `LACUNA_DEFAULT_MAX_DEPTH` bound.
    pub fn run_default(&mut self) -> Result<SynthesisResult, SynthError> {
        self.run(DEFAULT_MAX_DEPTH.get())
    }

    /// Enumerates every program up to `max_depth`, rendering and evaluating
    /// each, and collects those satisfying every example of the task.
    pub fn run(&mut self, max_depth: u32) -> Result<SynthesisResult, SynthError> {
        let Synthesizer {
            dsl,
            task,
            agent,
            namer,
            evaluator,
        } = self;
        let start = Instant::now();
        let mut enumerator = Enumerator::new(dsl, task.output_type(), agent.as_mut(), max_depth)?;

        let mut successful_programs: Vec<Artifact> = Vec::new();
        let mut n_generated: u64 = 0;
        while let Some(graph) = enumerator.next_program()? {
            n_generated += 1;
            let name = namer.name(&graph);
            let artifact = render(&graph, &name, dsl)?;
            let report = evaluator.evaluate(&graph, &artifact, task);
            if report.full_success {
                tracing::debug!(program = %artifact.name, len = artifact.len(), "successful program");
                successful_programs.push(artifact);
            }
        }

        let stats = SynthesisStats {
            n_generated,
            n_successful: successful_programs.len() as u64,
            runtime_seconds: start.elapsed().as_secs_f64(),
        };
        tracing::debug!(
            generated = stats.n_generated,
            successful = stats.n_successful,
            "synthesis finished"
        );
        Ok(SynthesisResult {
            successful_programs,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::Value;

    #[test]
    fn best_prefers_the_shortest_then_the_first() {
        let artifact = |name: &str, source: &str| Artifact {
            name: name.to_string(),
            source: source.to_string(),
        };
        let result = SynthesisResult {
            successful_programs: vec![
                artifact("a", "xxxx"),
                artifact("b", "xx"),
                artifact("c", "xx"),
            ],
            stats: SynthesisStats {
                n_generated: 3,
                n_successful: 3,
                runtime_seconds: 0.0,
            },
        };
        assert_eq!(result.best().map(|a| a.name.as_str()), Some("b"));
    }

    #[test]
    fn impossible_tasks_surface_a_synthesis_error() {
        let dsl = Dsl::new().with_constant("A", "a");
        let task = Task::from_examples(vec![(vec![], Value::from(1))]).unwrap();
        let mut synthesizer = Synthesizer::new(dsl, task);
        let err = synthesizer.run(2).unwrap_err();
        assert!(matches!(err, SynthError::Synthesis(_)));
    }
}
