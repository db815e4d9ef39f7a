use std::fmt::{Debug, Formatter};

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::dsl::{Content, IfBranching, ValueType};
use crate::error::SynthError;
use crate::program::blanks::{Blank, BlankId, ProgramHash};

/// Sub-blank tuples: operation arity is almost always small, and the if-branch
/// has exactly three.
pub type SubBlanks = SmallVec<[BlankId; 3]>;

#[derive(Clone)]
struct BlankNode {
    tpe: ValueType,
    depth: u32,
    content: Option<Content>,
}

/// The typed tree of blanks and their contents: the heart of a partial
/// program.
///
/// The tree is stored as an arena keyed by [`BlankId`]. Adjacency is never
/// stored: the identifier scheme (`parent>content>arg`) makes the children of
/// a filled blank derivable from its content, and parent links recoverable
/// from the identifier itself. Cloning is a value copy in O(size).
#[derive(Clone)]
pub struct ProgramGraph {
    output_type: ValueType,
    nodes: HashMap<BlankId, BlankNode>,
}

impl ProgramGraph {
    /// A fresh graph with the single empty root blank `return`.
    pub fn new(output_type: ValueType) -> ProgramGraph {
        let mut nodes = HashMap::new();
        nodes.insert(
            BlankId::ROOT,
            BlankNode {
                tpe: output_type,
                depth: 0,
                content: None,
            },
        );
        ProgramGraph { output_type, nodes }
    }

    pub fn root_id(&self) -> BlankId {
        BlankId::ROOT
    }

    pub fn output_type(&self) -> ValueType {
        self.output_type
    }

    /// Fills an empty blank. For an operation or if content, creates one fresh
    /// empty sub-blank per argument, one level deeper.
    pub fn fill_blank(&mut self, blank: &BlankId, content: &Content) -> Result<(), SynthError> {
        let node = self
            .nodes
            .get(blank)
            .ok_or_else(|| SynthError::State(format!("unknown blank `{blank}`")))?;
        if node.content.is_some() {
            return Err(SynthError::State(format!("blank `{blank}` is already filled")));
        }
        let depth = node.depth + 1;
        let tpe = node.tpe;

        let mut children: SubBlanks = SmallVec::new();
        let mut child_types: SmallVec<[ValueType; 3]> = SmallVec::new();
        match content {
            Content::Operation(op) => {
                let base = blank.child(&op.name);
                for (arg, arg_tpe) in &op.params {
                    children.push(base.child(arg));
                    child_types.push(*arg_tpe);
                }
            }
            Content::If(_) => {
                let base = blank.child(IfBranching::NAME);
                children.push(base.child(IfBranching::TEST));
                child_types.push(ValueType::Bool);
                children.push(base.child(IfBranching::BODY));
                child_types.push(tpe);
                children.push(base.child(IfBranching::ELSE));
                child_types.push(tpe);
            }
            Content::Input(_) | Content::Constant(_) => {}
        }
        for (child, child_tpe) in children.into_iter().zip(child_types) {
            self.nodes.insert(
                child,
                BlankNode {
                    tpe: child_tpe,
                    depth,
                    content: None,
                },
            );
        }
        if let Some(node) = self.nodes.get_mut(blank) {
            node.content = Some(content.clone());
        }
        Ok(())
    }

    /// Removes all descendants of the blank and returns it to the empty state.
    /// Idempotent on already-empty blanks.
    pub fn empty_blank(&mut self, blank: &BlankId) -> Result<(), SynthError> {
        if !self.nodes.contains_key(blank) {
            return Err(SynthError::State(format!("unknown blank `{blank}`")));
        }
        self.nodes.retain(|id, _| !id.is_descendant_of(blank));
        if let Some(node) = self.nodes.get_mut(blank) {
            node.content = None;
        }
        Ok(())
    }

    /// Empties the blank if needed, then fills it with the new content.
    pub fn replace_blank(&mut self, blank: &BlankId, content: &Content) -> Result<(), SynthError> {
        if self.content(blank).is_some() {
            self.empty_blank(blank)?;
        }
        self.fill_blank(blank, content)
    }

    pub fn content(&self, blank: &BlankId) -> Option<&Content> {
        self.nodes.get(blank)?.content.as_ref()
    }

    pub fn blank(&self, id: &BlankId) -> Option<Blank> {
        self.nodes.get(id).map(|n| Blank::new(id.clone(), n.tpe))
    }

    pub fn depth_of(&self, id: &BlankId) -> Option<u32> {
        self.nodes.get(id).map(|n| n.depth)
    }

    /// The sub-blanks created by the blank's content, in argument order
    /// (`test`, `body`, `else` for an if). Empty for leaves and empty blanks.
    pub fn sub_blanks(&self, blank: &BlankId) -> SubBlanks {
        let mut subs = SubBlanks::new();
        match self.content(blank) {
            Some(Content::Operation(op)) => {
                let base = blank.child(&op.name);
                for (arg, _) in &op.params {
                    subs.push(base.child(arg));
                }
            }
            Some(Content::If(_)) => {
                let base = blank.child(IfBranching::NAME);
                subs.push(base.child(IfBranching::TEST));
                subs.push(base.child(IfBranching::BODY));
                subs.push(base.child(IfBranching::ELSE));
            }
            _ => {}
        }
        subs
    }

    /// All blanks in canonical traversal order.
    pub fn blanks(&self) -> Vec<Blank> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.visit(&BlankId::ROOT, &mut |id, node| {
            out.push(Blank::new(id.clone(), node.tpe));
        });
        out
    }

    /// The blanks still awaiting a content, in canonical traversal order.
    pub fn empty_blanks(&self) -> Vec<Blank> {
        let mut out = Vec::new();
        self.visit(&BlankId::ROOT, &mut |id, node| {
            if node.content.is_none() {
                out.push(Blank::new(id.clone(), node.tpe));
            }
        });
        out
    }

    /// A program is complete once no blank is left empty.
    pub fn is_complete(&self) -> bool {
        self.nodes.values().all(|n| n.content.is_some())
    }

    /// The `(blank, content?)` pairs in canonical traversal order.
    pub fn config(&self) -> Vec<(Blank, Option<&Content>)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.visit(&BlankId::ROOT, &mut |id, node| {
            out.push((Blank::new(id.clone(), node.tpe), node.content.as_ref()));
        });
        out
    }

    /// The canonical hashable configuration, the sole structural identity used
    /// by the search.
    pub fn program_hash(&self) -> ProgramHash {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.visit(&BlankId::ROOT, &mut |id, node| {
            out.push((id.clone(), node.content.as_ref().map(|c| c.key())));
        });
        ProgramHash(out)
    }

    fn visit<'a>(&'a self, id: &BlankId, f: &mut impl FnMut(&BlankId, &'a BlankNode)) {
        let Some(node) = self.nodes.get(id) else { return };
        f(id, node);
        for sub in self.sub_blanks(id) {
            self.visit(&sub, f);
        }
    }
}

impl Debug for ProgramGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.program_hash())
    }
}
