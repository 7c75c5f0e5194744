//! Query selections
//!
//! A [`Selection`] is an ordered chain of field selections that renders to
//! the engine's query syntax. Chains are immutable; extending one clones it,
//! so a base selection (say, a loaded object) can branch into many calls.

use std::fmt;

use serde_json::Value as JsonValue;

/// One field in a selection chain, with its arguments.
#[derive(Debug, Clone, PartialEq)]
struct SelNode {
    name: String,
    args: Vec<(String, ArgValue)>,
}

#[derive(Debug, Clone, PartialEq)]
enum ArgValue {
    /// Rendered as a JSON literal; valid for strings, numbers and booleans.
    Literal(JsonValue),
    /// Rendered bare, the way the query syntax spells enum members.
    EnumMember(String),
}

impl ArgValue {
    fn render(&self) -> String {
        match self {
            ArgValue::Literal(value) => value.to_string(),
            ArgValue::EnumMember(member) => member.clone(),
        }
    }
}

/// An immutable chain of field selections.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    nodes: Vec<SelNode>,
}

impl Selection {
    /// An empty selection.
    pub fn new() -> Self {
        Selection::default()
    }

    /// Extend the chain with a field selection.
    pub fn select(&self, name: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.nodes.push(SelNode {
            name: name.into(),
            args: Vec::new(),
        });
        next
    }

    /// Attach an argument to the innermost field. No-op on an empty chain.
    pub fn arg(&self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.push_arg(name.into(), ArgValue::Literal(value.into()))
    }

    /// Attach an enum-member argument to the innermost field; members render
    /// without quotes.
    pub fn arg_enum(&self, name: impl Into<String>, member: impl Into<String>) -> Self {
        self.push_arg(name.into(), ArgValue::EnumMember(member.into()))
    }

    fn push_arg(&self, name: String, value: ArgValue) -> Self {
        let mut next = self.clone();
        if let Some(node) = next.nodes.last_mut() {
            node.args.push((name, value));
        }
        next
    }

    /// Whether the chain selects anything at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The field names in selection order; also the extraction path into the
    /// engine's response.
    pub fn path(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.name.as_str()).collect()
    }

    /// Render the chain in the engine's query syntax.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                out.push_str(" { ");
            }
            out.push_str(&node.name);
            if !node.args.is_empty() {
                out.push('(');
                for (j, (name, value)) in node.args.iter().enumerate() {
                    if j > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(name);
                    out.push_str(": ");
                    out.push_str(&value.render());
                }
                out.push(')');
            }
        }
        for _ in 1..self.nodes.len() {
            out.push_str(" }");
        }
        out
    }

    /// Walk the response `data` down this chain and return the innermost
    /// payload, or `None` when any step is missing.
    pub fn extract(&self, data: &JsonValue) -> Option<JsonValue> {
        let mut cursor = data;
        for node in &self.nodes {
            cursor = cursor.get(&node.name)?;
        }
        Some(cursor.clone())
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
