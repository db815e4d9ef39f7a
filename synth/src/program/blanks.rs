use std::fmt::{Debug, Display, Formatter};

use compact_str::format_compact;

use crate::dsl::{ContentKey, Sym, ValueType};

/// Hierarchical identifier of a blank. The identifier encodes parentage: a
/// blank created for an argument of a content filling `return` is keyed
/// `return>content>arg`, so parent links never need to be stored.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlankId(Sym);

impl BlankId {
    pub const ROOT: BlankId = BlankId(Sym::const_new("return"));

    pub fn new(id: impl Into<Sym>) -> BlankId {
        BlankId(id.into())
    }

    pub fn child(&self, segment: &str) -> BlankId {
        BlankId(format_compact!("{}>{}", self.0, segment))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_descendant_of(&self, other: &BlankId) -> bool {
        self.0.len() > other.0.len()
            && self.0.starts_with(other.0.as_str())
            && self.0.as_bytes()[other.0.len()] == b'>'
    }

    /// The blank two levels up the `blank > content > blank` chain, if any.
    pub fn parent_blank(&self) -> Option<BlankId> {
        let content = self.0.rfind('>')?;
        let parent = self.0[..content].rfind('>').map(|i| &self.0[..i]);
        parent.map(|p| BlankId(Sym::from(p)))
    }
}

impl Debug for BlankId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for BlankId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A typed hole of the program.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Blank {
    pub id: BlankId,
    pub tpe: ValueType,
}

impl Blank {
    pub fn new(id: BlankId, tpe: ValueType) -> Blank {
        Blank { id, tpe }
    }
}

/// Canonical configuration of a program graph: the `(blank, content?)` pairs in
/// traversal order (root first, children in argument order). Two graphs denote
/// the same partial program iff their hashes are equal.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ProgramHash(pub Vec<(BlankId, Option<ContentKey>)>);

impl Debug for ProgramHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (blank, content)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match content {
                Some(key) => write!(f, "{blank}<-{}", key.name)?,
                None => write!(f, "{blank}<-_")?,
            }
        }
        write!(f, "}}")
    }
}
