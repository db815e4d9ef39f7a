use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use compact_str::CompactString;

use crate::dsl::value::{Value, ValueType};
use crate::error::{EvalError, SynthError};

/// Symbol names are short and heavily cloned.
pub type Sym = CompactString;

/// A named input parameter of the synthesized program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Input {
    pub name: Sym,
    pub tpe: ValueType,
}

impl Input {
    pub fn new(name: impl Into<Sym>, tpe: ValueType) -> Input {
        Input { name: name.into(), tpe }
    }
}

/// A named constant. Its type is derived from its value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constant {
    pub name: Sym,
    pub value: Value,
}

impl Constant {
    pub fn new(name: impl Into<Sym>, value: impl Into<Value>) -> Constant {
        Constant {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn tpe(&self) -> ValueType {
        self.value.value_type()
    }
}

/// Executable semantics of an operation, used by the graph evaluator.
pub type OpFn = Arc<dyn Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync>;

/// A user-defined typed callable. Its argument names and types drive sub-blank
/// creation, its `source` is emitted verbatim by the renderer.
#[derive(Clone)]
pub struct Operation {
    pub name: Sym,
    pub output_type: ValueType,
    pub params: Vec<(Sym, ValueType)>,
    pub source: String,
    func: OpFn,
}

impl Operation {
    pub fn new(
        name: impl Into<Sym>,
        output_type: ValueType,
        params: Vec<(&str, ValueType)>,
        source: impl Into<String>,
        func: OpFn,
    ) -> Operation {
        Operation {
            name: name.into(),
            output_type,
            params: params.into_iter().map(|(n, t)| (Sym::from(n), t)).collect(),
            source: source.into(),
            func,
        }
    }

    /// Builds an operation from a possibly partially annotated signature.
    /// Every parameter and the return must carry a type annotation.
    pub fn from_signature(
        sig: Signature,
        source: impl Into<String>,
        func: OpFn,
    ) -> Result<Operation, SynthError> {
        let mut params = Vec::with_capacity(sig.params.len());
        for (name, tpe) in sig.params {
            let tpe = tpe.ok_or_else(|| SynthError::AnnotationMissing {
                operation: sig.name.to_string(),
                symbol: name.to_string(),
            })?;
            params.push((name, tpe));
        }
        let output_type = sig.ret.ok_or_else(|| SynthError::AnnotationMissing {
            operation: sig.name.to_string(),
            symbol: "return".to_string(),
        })?;
        Ok(Operation {
            name: sig.name,
            output_type,
            params,
            source: source.into(),
            func,
        })
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Runs the operation on already evaluated arguments.
    pub fn apply(&self, args: &[Value]) -> Result<Value, EvalError> {
        (self.func)(args)
    }
}

impl Debug for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, (name, tpe)) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {tpe}")?;
        }
        write!(f, ") -> {}", self.output_type)
    }
}

/// Declared signature of an operation, before annotation checking.
#[derive(Clone, Debug)]
pub struct Signature {
    pub name: Sym,
    pub params: Vec<(Sym, Option<ValueType>)>,
    pub ret: Option<ValueType>,
}

impl Signature {
    pub fn new(name: impl Into<Sym>) -> Signature {
        Signature {
            name: name.into(),
            params: Vec::new(),
            ret: None,
        }
    }

    pub fn param(mut self, name: impl Into<Sym>, tpe: Option<ValueType>) -> Signature {
        self.params.push((name.into(), tpe));
        self
    }

    pub fn returns(mut self, tpe: Option<ValueType>) -> Signature {
        self.ret = tpe;
        self
    }
}

/// The only standard (structural) operation: a two-way branch with three
/// sub-blanks `test`, `body` and `else`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct IfBranching;

impl IfBranching {
    pub const NAME: &'static str = "if";
    pub const TEST: &'static str = "test";
    pub const BODY: &'static str = "body";
    pub const ELSE: &'static str = "else";
}

/// Category of a blank content.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ContentKind {
    Input,
    Constant,
    Operation,
    If,
}

/// A filler for a blank. Identity (equality and hash) is the category tag plus
/// the name, which keeps it stable across graph clones.
#[derive(Clone)]
pub enum Content {
    Input(Input),
    Constant(Constant),
    Operation(Arc<Operation>),
    If(IfBranching),
}

impl Content {
    pub fn kind(&self) -> ContentKind {
        match self {
            Content::Input(_) => ContentKind::Input,
            Content::Constant(_) => ContentKind::Constant,
            Content::Operation(_) => ContentKind::Operation,
            Content::If(_) => ContentKind::If,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Content::Input(i) => &i.name,
            Content::Constant(c) => &c.name,
            Content::Operation(o) => &o.name,
            Content::If(_) => IfBranching::NAME,
        }
    }

    /// True for inputs and constants, the contents that close a blank without
    /// creating sub-blanks.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Content::Input(_) | Content::Constant(_))
    }

    pub fn key(&self) -> ContentKey {
        ContentKey {
            kind: self.kind(),
            name: Sym::from(self.name()),
        }
    }
}

impl PartialEq for Content {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.name() == other.name()
    }
}
impl Eq for Content {}

impl Hash for Content {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        self.name().hash(state);
    }
}

impl Debug for Content {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Content::Input(i) => write!(f, "input:{}", i.name),
            Content::Constant(c) => write!(f, "constant:{}", c.name),
            Content::Operation(o) => write!(f, "operation:{}", o.name),
            Content::If(_) => write!(f, "if"),
        }
    }
}

impl Display for Content {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Hashable identity of a content, used in canonical configurations.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ContentKey {
    pub kind: ContentKind,
    pub name: Sym,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> OpFn {
        Arc::new(|_: &[Value]| Ok(Value::Int(0)))
    }

    #[test]
    fn identity_is_kind_and_name() {
        let a = Content::Input(Input::new("x", ValueType::Int));
        let b = Content::Input(Input::new("x", ValueType::Str));
        let c = Content::Constant(Constant::new("x", 3));
        assert_eq!(a, b);
        assert_ne!(a, c);

        let op = Content::Operation(Arc::new(Operation::new(
            "x",
            ValueType::Int,
            vec![],
            "",
            noop(),
        )));
        assert_ne!(a, op);
        assert_eq!(op.key().kind, ContentKind::Operation);
    }

    #[test]
    fn if_is_a_singleton_identity() {
        let a = Content::If(IfBranching);
        let b = Content::If(IfBranching);
        assert_eq!(a, b);
        assert_eq!(a.name(), "if");
    }

    #[test]
    fn from_signature_requires_full_annotations() {
        let sig = Signature::new("add")
            .param("x", Some(ValueType::Int))
            .param("y", None)
            .returns(Some(ValueType::Int));
        let err = Operation::from_signature(sig, "", noop()).unwrap_err();
        match err {
            SynthError::AnnotationMissing { operation, symbol } => {
                assert_eq!(operation, "add");
                assert_eq!(symbol, "y");
            }
            other => panic!("unexpected error: {other}"),
        }

        let sig = Signature::new("add")
            .param("x", Some(ValueType::Int))
            .returns(None);
        let err = Operation::from_signature(sig, "", noop()).unwrap_err();
        match err {
            SynthError::AnnotationMissing { symbol, .. } => assert_eq!(symbol, "return"),
            other => panic!("unexpected error: {other}"),
        }

        let sig = Signature::new("add")
            .param("x", Some(ValueType::Int))
            .param("y", Some(ValueType::Int))
            .returns(Some(ValueType::Int));
        let op = Operation::from_signature(sig, "def add(x, y): ...", noop()).unwrap();
        assert_eq!(op.arity(), 2);
        assert_eq!(op.output_type, ValueType::Int);
    }
}
