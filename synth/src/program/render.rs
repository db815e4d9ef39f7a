use std::collections::BTreeMap;
use std::collections::VecDeque;

use itertools::Itertools;

use crate::dsl::{Content, Dsl};
use crate::error::SynthError;
use crate::program::blanks::BlankId;
use crate::program::graph::ProgramGraph;

/// A rendered program: a name and the source text of a self-contained module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub source: String,
}

impl Artifact {
    /// The length of the artifact is the length of its source, used to pick
    /// the smallest of several successful programs.
    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}

/// Renders a complete program graph into a source artifact.
///
/// The module contains, in order: the active constants (sorted by name), the
/// active operations (their declaration source, verbatim, sorted by name) and
/// one function definition whose parameters are the DSL inputs in declaration
/// order. Operation arguments that are themselves operations are hoisted into
/// intermediate bindings `x0, x1, ...` named in discovery order and emitted
/// deepest first, so the body stays straight-line single-assignment.
pub fn render(graph: &ProgramGraph, name: &str, dsl: &Dsl) -> Result<Artifact, SynthError> {
    let mut constants: BTreeMap<&str, String> = BTreeMap::new();
    let mut operations: BTreeMap<&str, &str> = BTreeMap::new();
    for (_, content) in graph.config() {
        match content {
            Some(Content::Constant(c)) => {
                constants.entry(c.name.as_str()).or_insert_with(|| c.value.literal());
            }
            Some(Content::Operation(op)) => {
                operations.entry(op.name.as_str()).or_insert_with(|| op.source.trim_end());
            }
            _ => {}
        }
    }

    let params = dsl
        .inputs()
        .iter()
        .map(|input| format!("{}: {}", input.name, input.tpe))
        .join(", ");

    let body = render_body(graph)?;

    let mut blocks: Vec<String> = Vec::new();
    if !constants.is_empty() {
        let lines: Vec<String> = constants
            .iter()
            .map(|(name, literal)| format!("{name} = {literal}"))
            .collect();
        blocks.push(lines.join("\n"));
    }
    for source in operations.values() {
        blocks.push((*source).to_string());
    }
    blocks.push(format!("def {name}({params}):\n{}", body.join("\n")));

    Ok(Artifact {
        name: name.to_string(),
        source: format!("{}\n", blocks.join("\n\n")),
    })
}

/// Renders the function body, root statement plus hoisted bindings.
fn render_body(graph: &ProgramGraph) -> Result<Vec<String>, SynthError> {
    let mut builder = BodyBuilder {
        graph,
        counter: 0,
        pending: VecDeque::new(),
    };
    let root = graph.root_id();
    let root_content = graph
        .content(&root)
        .ok_or_else(|| SynthError::Render("the root blank is empty".to_string()))?;

    let mut lines: Vec<String> = Vec::new();
    if let Content::If(_) = root_content {
        let subs = graph.sub_blanks(&root);
        let test = builder.reference(&subs[0])?;
        let body = builder.reference(&subs[1])?;
        let orelse = builder.reference(&subs[2])?;
        lines.push(format!("    if {test}:"));
        lines.push(format!("        return {body}"));
        lines.push("    else:".to_string());
        lines.push(format!("        return {orelse}"));
    } else {
        let expr = builder.expression(&root)?;
        lines.push(format!("    return {expr}"));
    }

    while let Some((var, blank)) = builder.pending.pop_front() {
        let expr = builder.expression(&blank)?;
        lines.insert(0, format!("    {var} = {expr}"));
    }
    Ok(lines)
}

struct BodyBuilder<'a> {
    graph: &'a ProgramGraph,
    counter: usize,
    /// Hoisted operation blanks awaiting their binding, in discovery order.
    pending: VecDeque<(String, BlankId)>,
}

impl BodyBuilder<'_> {
    /// How the value of a blank is referred to from its parent expression:
    /// variables by name, operations through a fresh intermediate, branches
    /// inline.
    fn reference(&mut self, blank: &BlankId) -> Result<String, SynthError> {
        let content = self.content(blank)?;
        match content {
            Content::Input(i) => Ok(i.name.to_string()),
            Content::Constant(c) => Ok(c.name.to_string()),
            Content::Operation(_) => {
                let var = format!("x{}", self.counter);
                self.counter += 1;
                self.pending.push_back((var.clone(), blank.clone()));
                Ok(var)
            }
            Content::If(_) => self.inline_if(blank),
        }
    }

    /// The full expression for a blank's content.
    fn expression(&mut self, blank: &BlankId) -> Result<String, SynthError> {
        let content = self.content(blank)?;
        match content {
            Content::Input(i) => Ok(i.name.to_string()),
            Content::Constant(c) => Ok(c.name.to_string()),
            Content::Operation(op) => {
                let name = op.name.clone();
                let subs = self.graph.sub_blanks(blank);
                let mut args = Vec::with_capacity(subs.len());
                for sub in &subs {
                    args.push(self.reference(sub)?);
                }
                Ok(format!("{}({})", name, args.join(", ")))
            }
            Content::If(_) => self.inline_if(blank),
        }
    }

    fn inline_if(&mut self, blank: &BlankId) -> Result<String, SynthError> {
        let subs = self.graph.sub_blanks(blank);
        let test = self.reference(&subs[0])?;
        let body = self.reference(&subs[1])?;
        let orelse = self.reference(&subs[2])?;
        Ok(format!("{body} if {test} else {orelse}"))
    }

    fn content(&self, blank: &BlankId) -> Result<Content, SynthError> {
        self.graph
            .content(blank)
            .cloned()
            .ok_or_else(|| SynthError::Render(format!("blank `{blank}` is empty")))
    }
}
