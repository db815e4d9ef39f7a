use hashbrown::HashSet;
use smallvec::smallvec;
use streaming_iterator::StreamingIterator;

use crate::dsl::Content;
use crate::error::SynthError;
use crate::program::{Blank, BlankId, ProgramGraph, ProgramHash, SubBlanks};
use crate::search::action::{EmptySubBlanks, FillBlanks, JumpToFrontier, SynthAction};
use crate::search::space::{NodeId, SearchSpace};

/// An applicable action together with the configuration it leads to.
#[derive(Debug)]
pub struct Candidate {
    pub action: SynthAction,
    pub hash: ProgramHash,
    pub graph: ProgramGraph,
}

/// The contents of the pool able to fill the given blank.
///
/// Inputs, constants and operations must produce a subtype of the blank's
/// type. The if-branch fits any type but may not fill a direct sub-blank of
/// another if-branch.
pub fn fill_options(blank: &Blank, graph: &ProgramGraph, pool: &[Content]) -> Vec<Content> {
    pool.iter()
        .filter(|content| match content {
            Content::Input(input) => blank.tpe.accepts(input.tpe),
            Content::Constant(constant) => blank.tpe.accepts(constant.tpe()),
            Content::Operation(op) => blank.tpe.accepts(op.output_type),
            Content::If(_) => match blank.id.parent_blank() {
                Some(parent) => !matches!(graph.content(&parent), Some(Content::If(_))),
                None => true,
            },
        })
        .cloned()
        .collect()
}

/// Computes the applicable actions at the (just explored) current node and
/// records every reached configuration in the search space.
///
/// Candidate order is fixed: fills in product order, empties in traversal
/// order with the root empty last, jumps in frontier insertion order, stop.
/// A fill leading to an already explored configuration is registered as an
/// edge but offered to no agent, as is one that would exceed the depth bound.
pub fn update_frontier(
    space: &mut SearchSpace,
    current: NodeId,
    pool: &[Content],
    max_depth: u32,
) -> Result<Vec<Candidate>, SynthError> {
    space.mark_explored(current);
    let current_graph = space[current].graph.clone();
    let current_depth = space[current].depth;

    let mut candidates: Vec<Candidate> = Vec::new();
    let mut targeted: HashSet<NodeId> = HashSet::new();

    // one fill per element of the product of the per-blank options
    let empty_blanks = current_graph.empty_blanks();
    if !empty_blanks.is_empty() {
        let options: Vec<Vec<Content>> = empty_blanks
            .iter()
            .map(|blank| fill_options(blank, &current_graph, pool))
            .collect();
        let mut product = FillProduct::new(&options);
        while let Some(pick) = product.next() {
            let fills: Vec<(BlankId, Content)> = empty_blanks
                .iter()
                .zip(pick.iter())
                .map(|(blank, content)| (blank.id.clone(), (*content).clone()))
                .collect();
            let leaf_only = fills.iter().all(|(_, content)| content.is_leaf());
            let depth = current_depth + u32::from(!leaf_only);

            let mut target = current_graph.clone();
            for (blank, content) in &fills {
                target.fill_blank(blank, content)?;
            }
            let hash = target.program_hash();

            let node = match space.lookup(&hash) {
                Some(known) => {
                    space.tighten_depth(known, depth);
                    known
                }
                None => {
                    if depth > max_depth {
                        continue;
                    }
                    space.insert(hash.clone(), target.clone(), depth)
                }
            };
            let action = SynthAction::FillBlanks(FillBlanks { fills });
            space.add_edge(current, node, action.clone());
            targeted.insert(node);
            if !space[node].explored {
                candidates.push(Candidate { action, hash, graph: target });
            }
        }
    }

    // one empty per filled operation/if whose sub-blanks are not all empty
    for blank in current_graph.blanks() {
        let Some(content) = current_graph.content(&blank.id) else { continue };
        if content.is_leaf() {
            continue;
        }
        let subs = current_graph.sub_blanks(&blank.id);
        if subs.iter().all(|sub| current_graph.content(sub).is_none()) {
            continue;
        }
        emit_empty(
            space,
            current,
            &current_graph,
            current_depth,
            Some(blank.id.clone()),
            subs,
            &mut targeted,
            &mut candidates,
        )?;
    }
    let root = current_graph.root_id();
    if current_graph.content(&root).is_some() {
        emit_empty(
            space,
            current,
            &current_graph,
            current_depth,
            None,
            smallvec![root],
            &mut targeted,
            &mut candidates,
        )?;
    }

    // jumps along the frontier, skipping configurations already reached above
    for node in space.frontier().to_vec() {
        if targeted.contains(&node) || space[node].depth > max_depth {
            continue;
        }
        let action = SynthAction::JumpToFrontier(JumpToFrontier {
            target: space[node].hash.clone(),
        });
        candidates.push(Candidate {
            action: action.clone(),
            hash: space[node].hash.clone(),
            graph: space[node].graph.clone(),
        });
        space.add_edge(current, node, action);
    }

    candidates.push(Candidate {
        action: SynthAction::Stop,
        hash: space[current].hash.clone(),
        graph: current_graph,
    });
    Ok(candidates)
}

#[allow(clippy::too_many_arguments)]
fn emit_empty(
    space: &mut SearchSpace,
    current: NodeId,
    current_graph: &ProgramGraph,
    current_depth: u32,
    parent: Option<BlankId>,
    blanks: SubBlanks,
    targeted: &mut HashSet<NodeId>,
    candidates: &mut Vec<Candidate>,
) -> Result<(), SynthError> {
    let mut target = current_graph.clone();
    for blank in &blanks {
        target.empty_blank(blank)?;
    }
    let hash = target.program_hash();
    let node = match space.lookup(&hash) {
        Some(known) => {
            // emptying cannot make the configuration deeper than it was
            space.tighten_depth(known, current_depth);
            known
        }
        None => space.insert(hash.clone(), target.clone(), current_depth),
    };
    let action = SynthAction::EmptySubBlanks(EmptySubBlanks { parent, blanks });
    space.add_edge(current, node, action.clone());
    targeted.insert(node);
    candidates.push(Candidate { action, hash, graph: target });
    Ok(())
}

/// Streams the fill product: one content picked per empty blank, every
/// combination of the per-blank option lists, with the last blank varying
/// fastest. Produces nothing when there is no empty blank or when some blank
/// has no candidate at all.
struct FillProduct<'a> {
    options: &'a [Vec<Content>],
    /// One cursor per empty blank into its option list.
    cursors: Vec<usize>,
    picks: Vec<&'a Content>,
    started: bool,
    done: bool,
}

impl<'a> FillProduct<'a> {
    fn new(options: &'a [Vec<Content>]) -> FillProduct<'a> {
        FillProduct {
            options,
            cursors: vec![0; options.len()],
            picks: Vec::with_capacity(options.len()),
            started: false,
            done: false,
        }
    }

    fn load_picks(&mut self) {
        let options = self.options;
        self.picks.clear();
        for (list, &cursor) in options.iter().zip(&self.cursors) {
            self.picks.push(&list[cursor]);
        }
    }
}

impl<'a> StreamingIterator for FillProduct<'a> {
    type Item = [&'a Content];

    fn advance(&mut self) {
        if self.done {
            return;
        }
        if !self.started {
            self.started = true;
            if self.options.is_empty() || self.options.iter().any(|list| list.is_empty()) {
                self.done = true;
            } else {
                self.load_picks();
            }
            return;
        }
        // advance the rightmost cursor, carrying leftwards on overflow
        for position in (0..self.cursors.len()).rev() {
            self.cursors[position] += 1;
            if self.cursors[position] < self.options[position].len() {
                self.load_picks();
                return;
            }
            self.cursors[position] = 0;
        }
        self.done = true;
    }

    fn get(&self) -> Option<&Self::Item> {
        if self.done || !self.started {
            None
        } else {
            Some(self.picks.as_slice())
        }
    }
}
