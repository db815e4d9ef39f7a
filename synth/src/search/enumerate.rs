use env_param::EnvParam;

use crate::dsl::{Content, Dsl, ValueType};
use crate::error::SynthError;
use crate::program::ProgramGraph;
use crate::search::action::SynthAction;
use crate::search::agent::SynthesisAgent;
use crate::search::generate::{update_frontier, Candidate};
use crate::search::space::{NodeId, SearchSpace};
use crate::search::stats::SearchStats;

/// If true, every chosen action will be logged to the standard output.
static LOG_ACTIONS: EnvParam<bool> = EnvParam::new("LACUNA_LOG_ACTIONS", "false");

/// If true, the search counters will be printed at each complete program.
static STATS_AT_PROGRAM: EnvParam<bool> = EnvParam::new("LACUNA_STATS_AT_PROGRAM", "false");

/// Lazy enumeration of the complete programs reachable within the depth
/// bound.
///
/// The enumerator drives the candidate generator and the agent, keeps the
/// search space and its frontier up to date, and yields each complete
/// configuration exactly once. The yielded sequence is fully deterministic
/// for a fixed DSL, output type, agent and depth bound.
pub struct Enumerator<'a> {
    pool: Vec<Content>,
    agent: &'a mut dyn SynthesisAgent,
    space: SearchSpace,
    current: NodeId,
    candidates: Vec<Candidate>,
    max_depth: u32,
    stats: SearchStats,
    done: bool,
}

impl std::fmt::Debug for Enumerator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enumerator")
            .field("pool", &self.pool)
            .field("current", &self.current)
            .field("candidates", &self.candidates)
            .field("max_depth", &self.max_depth)
            .field("stats", &self.stats)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl<'a> Enumerator<'a> {
    /// Prepares the enumeration of programs of the given output type.
    ///
    /// Fails with [`SynthError::Synthesis`] when no content of the DSL can
    /// produce the expected output type.
    pub fn new(
        dsl: &Dsl,
        output_type: ValueType,
        agent: &'a mut dyn SynthesisAgent,
        max_depth: u32,
    ) -> Result<Enumerator<'a>, SynthError> {
        let pool = dsl.contents();
        let graph = ProgramGraph::new(output_type);
        let mut space = SearchSpace::new();
        let root = space.insert(graph.program_hash(), graph, 0);
        let candidates = update_frontier(&mut space, root, &pool, max_depth)?;
        if !candidates
            .iter()
            .any(|c| matches!(c.action, SynthAction::FillBlanks(_)))
        {
            return Err(SynthError::Synthesis(format!(
                "no available content can produce a value of type {output_type}"
            )));
        }
        Ok(Enumerator {
            pool,
            agent,
            space,
            current: root,
            candidates,
            max_depth,
            stats: SearchStats::new(),
            done: false,
        })
    }

    /// Advances the search until the next complete program or the agent's
    /// stop.
    pub fn next_program(&mut self) -> Result<Option<ProgramGraph>, SynthError> {
        if self.done {
            return Ok(None);
        }
        loop {
            let actions: Vec<SynthAction> =
                self.candidates.iter().map(|c| c.action.clone()).collect();
            let chosen = self.agent.act(&actions, &self.space[self.current].graph);
            if LOG_ACTIONS.get() {
                println!("[lacuna] {chosen}");
            }
            tracing::trace!(action = %chosen, "agent decision");
            self.stats.n_decisions += 1;
            match &chosen {
                SynthAction::FillBlanks(_) => self.stats.n_fills += 1,
                SynthAction::EmptySubBlanks(_) => self.stats.n_empties += 1,
                SynthAction::JumpToFrontier(_) => self.stats.n_jumps += 1,
                SynthAction::Stop => {}
            }
            if chosen == SynthAction::Stop {
                self.done = true;
                return Ok(None);
            }
            let position = self
                .candidates
                .iter()
                .position(|c| c.action == chosen)
                .ok_or_else(|| {
                    SynthError::State("the agent chose an action outside of the candidate set".to_string())
                })?;
            let Candidate { hash, graph, .. } = self.candidates.swap_remove(position);
            let node = self.space.lookup(&hash).ok_or_else(|| {
                SynthError::State("the chosen action targets an unregistered configuration".to_string())
            })?;
            self.current = node;
            let complete = graph.is_complete();
            self.candidates = update_frontier(&mut self.space, node, &self.pool, self.max_depth)?;
            if complete {
                self.stats.n_programs += 1;
                self.stats.n_configurations = self.space.num_nodes() as u64;
                tracing::debug!(
                    nodes = self.space.num_nodes(),
                    frontier = self.space.frontier().len(),
                    "complete program found"
                );
                if STATS_AT_PROGRAM.get() {
                    println!("{}", self.stats);
                }
                return Ok(Some(graph));
            }
        }
    }

    /// The search-state graph accumulated so far.
    pub fn search_space(&self) -> &SearchSpace {
        &self.space
    }

    /// The counters accumulated so far.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

impl Iterator for Enumerator<'_> {
    type Item = Result<ProgramGraph, SynthError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_program().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::Dsl;
    use crate::search::agent::TopDownBFS;

    #[test]
    fn an_unproducible_output_type_is_an_error() {
        let dsl = Dsl::new().with_input("desc", ValueType::Str);
        let mut agent = TopDownBFS::new();
        let err = Enumerator::new(&dsl, ValueType::Int, &mut agent, 3).unwrap_err();
        assert!(matches!(err, SynthError::Synthesis(_)));
    }

    #[test]
    fn single_program_universe() {
        let dsl = Dsl::new().with_input("number", ValueType::Int);
        let mut agent = TopDownBFS::new();
        let mut programs = Enumerator::new(&dsl, ValueType::Int, &mut agent, 0).unwrap();
        let first = programs.next_program().unwrap().unwrap();
        assert!(first.is_complete());
        assert!(programs.next_program().unwrap().is_none());
        // once stopped, the enumerator stays stopped
        assert!(programs.next_program().unwrap().is_none());
    }
}
