use std::fmt::{Display, Formatter};

use smallvec::SmallVec;

use crate::dsl::Content;
use crate::program::{BlankId, ProgramHash};

/// Fill every listed blank with the paired content, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FillBlanks {
    pub fills: Vec<(BlankId, Content)>,
}

impl FillBlanks {
    /// True when every content is an input or a constant. Such a fill closes
    /// blanks without creating new ones and does not increase the depth.
    pub fn all_constants(&self) -> bool {
        self.fills.iter().all(|(_, content)| content.is_leaf())
    }

    pub fn blank_ids(&self) -> Vec<BlankId> {
        self.fills.iter().map(|(blank, _)| blank.clone()).collect()
    }
}

impl Display for FillBlanks {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "fill{{")?;
        for (i, (blank, content)) in self.fills.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{blank}<-{content}")?;
        }
        write!(f, "}}")
    }
}

/// Return the listed blanks (sub-blanks of `parent` when set) to the empty
/// state, dropping their subtrees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmptySubBlanks {
    pub parent: Option<BlankId>,
    pub blanks: SmallVec<[BlankId; 3]>,
}

impl Display for EmptySubBlanks {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "empty{{")?;
        crate::utils::disp_iter(f, &self.blanks, ", ")?;
        write!(f, "}}")
    }
}

/// Teleport to a discovered but unexplored configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JumpToFrontier {
    pub target: ProgramHash,
}

impl Display for JumpToFrontier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "jump to {:?}", self.target)
    }
}

/// An action applicable to the current configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SynthAction {
    FillBlanks(FillBlanks),
    EmptySubBlanks(EmptySubBlanks),
    JumpToFrontier(JumpToFrontier),
    Stop,
}

impl Display for SynthAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SynthAction::FillBlanks(a) => write!(f, "{a}"),
            SynthAction::EmptySubBlanks(a) => write!(f, "{a}"),
            SynthAction::JumpToFrontier(a) => write!(f, "{a}"),
            SynthAction::Stop => write!(f, "stop"),
        }
    }
}
