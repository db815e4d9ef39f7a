use hashbrown::HashSet;

use crate::program::{BlankId, ProgramGraph};
use crate::search::action::{FillBlanks, SynthAction};

/// Decision function of the search: given the applicable actions on the
/// current configuration, pick one. The candidate order is deterministic and
/// meaningful; it reflects the generator's traversal.
pub trait SynthesisAgent {
    fn act(&mut self, candidates: &[SynthAction], graph: &ProgramGraph) -> SynthAction;
}

/// Top-down enumeration of all programs.
///
/// Fills whole groups of blanks with variables first, backtracks a group as
/// long as other constant choices remain for it, then escapes to the frontier
/// when the local region is exhausted.
#[derive(Default)]
pub struct TopDownBFS {
    /// Blank groups for which constant-only alternatives were left behind.
    blanks_with_other_constants: HashSet<Vec<BlankId>>,
}

impl TopDownBFS {
    pub fn new() -> TopDownBFS {
        TopDownBFS::default()
    }
}

impl SynthesisAgent for TopDownBFS {
    fn act(&mut self, candidates: &[SynthAction], _graph: &ProgramGraph) -> SynthAction {
        let fills: Vec<&FillBlanks> = candidates
            .iter()
            .filter_map(|action| match action {
                SynthAction::FillBlanks(fill) => Some(fill),
                _ => None,
            })
            .collect();

        let constant_fills: Vec<&FillBlanks> =
            fills.iter().copied().filter(|fill| fill.all_constants()).collect();
        if let Some(&chosen) = constant_fills.first() {
            let blanks = chosen.blank_ids();
            let more_choices = constant_fills
                .iter()
                .any(|other| *other != chosen && other.blank_ids() == blanks);
            if more_choices {
                self.blanks_with_other_constants.insert(blanks);
            }
            return SynthAction::FillBlanks(chosen.clone());
        }

        for action in candidates {
            if let SynthAction::EmptySubBlanks(empty) = action {
                let key: Vec<BlankId> = empty.blanks.to_vec();
                if self.blanks_with_other_constants.remove(&key) {
                    return action.clone();
                }
            }
        }

        if let Some(jump) = candidates
            .iter()
            .find(|action| matches!(action, SynthAction::JumpToFrontier(_)))
        {
            self.blanks_with_other_constants.clear();
            return jump.clone();
        }

        if let Some(empty) = candidates
            .iter()
            .find(|action| matches!(action, SynthAction::EmptySubBlanks(_)))
        {
            return empty.clone();
        }

        SynthAction::Stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::{Constant, Content, Input, ValueType};
    use crate::search::action::{EmptySubBlanks, JumpToFrontier};
    use crate::program::ProgramHash;
    use smallvec::smallvec;

    fn graph() -> ProgramGraph {
        ProgramGraph::new(ValueType::Int)
    }

    fn const_fill(name: &str) -> SynthAction {
        SynthAction::FillBlanks(FillBlanks {
            fills: vec![(BlankId::ROOT, Content::Constant(Constant::new(name, 1)))],
        })
    }

    fn input_fill(name: &str) -> SynthAction {
        SynthAction::FillBlanks(FillBlanks {
            fills: vec![(BlankId::ROOT, Content::Input(Input::new(name, ValueType::Int)))],
        })
    }

    fn root_empty() -> SynthAction {
        SynthAction::EmptySubBlanks(EmptySubBlanks {
            parent: None,
            blanks: smallvec![BlankId::ROOT],
        })
    }

    fn jump() -> SynthAction {
        SynthAction::JumpToFrontier(JumpToFrontier {
            target: ProgramHash(vec![(BlankId::ROOT, None)]),
        })
    }

    #[test]
    fn picks_the_first_constant_fill_and_remembers_alternatives() {
        let mut agent = TopDownBFS::new();
        let candidates = vec![input_fill("number"), const_fill("N"), SynthAction::Stop];
        let chosen = agent.act(&candidates, &graph());
        assert_eq!(chosen, input_fill("number"));
        // the alternative constant choice for the same blanks is remembered
        let followup = vec![root_empty(), jump(), SynthAction::Stop];
        let chosen = agent.act(&followup, &graph());
        assert_eq!(chosen, root_empty());
    }

    #[test]
    fn without_remembered_constants_jumps_take_priority_over_empties() {
        let mut agent = TopDownBFS::new();
        let candidates = vec![root_empty(), jump(), SynthAction::Stop];
        assert_eq!(agent.act(&candidates, &graph()), jump());
    }

    #[test]
    fn jumping_clears_the_memory() {
        let mut agent = TopDownBFS::new();
        let chosen = agent.act(&[input_fill("a"), const_fill("b"), SynthAction::Stop], &graph());
        assert_eq!(chosen, input_fill("a"));
        // a jump wipes the remembered groups
        assert_eq!(agent.act(&[jump(), SynthAction::Stop], &graph()), jump());
        let followup = vec![root_empty(), jump(), SynthAction::Stop];
        assert_eq!(agent.act(&followup, &graph()), jump());
    }

    #[test]
    fn single_constant_choice_is_not_remembered() {
        let mut agent = TopDownBFS::new();
        let chosen = agent.act(&[const_fill("N"), SynthAction::Stop], &graph());
        assert_eq!(chosen, const_fill("N"));
        let followup = vec![root_empty(), jump(), SynthAction::Stop];
        assert_eq!(agent.act(&followup, &graph()), jump());
    }

    #[test]
    fn falls_back_to_empty_then_stop() {
        let mut agent = TopDownBFS::new();
        assert_eq!(agent.act(&[root_empty(), SynthAction::Stop], &graph()), root_empty());
        assert_eq!(agent.act(&[SynthAction::Stop], &graph()), SynthAction::Stop);
    }
}
