//! The enumeration engine: the action algebra, the search-state graph over
//! configurations, the candidate generator, the deciding agent and the
//! orchestrating enumerator.

pub mod action;
pub mod agent;
pub mod enumerate;
pub mod generate;
pub mod space;
pub mod stats;

pub use action::{EmptySubBlanks, FillBlanks, JumpToFrontier, SynthAction};
pub use agent::{SynthesisAgent, TopDownBFS};
pub use enumerate::Enumerator;
pub use generate::{fill_options, Candidate};
pub use space::{NodeId, SearchEdge, SearchNode, SearchSpace};
pub use stats::SearchStats;
