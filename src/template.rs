use crate::{
    context::{ContextKey, RenderingContext},
    errors::ContextError,
};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A parsed template with `{{key}}` placeholders and `{{#key}}…{{/key}}` /
/// `{{^key}}…{{/key}}` sections that are rendered only when `key` is present
/// or absent respectively.
///
/// Unlike format-string substitution, a mismatch between the template and
/// the context is always an error: unknown names fail at parse time, missing
/// values fail at render time.
///
/// ## Example
///
/// ```not_rust
/// "{{#version}}v{{version}}{{/version}}{{^version}}draft{{/version}}"
///     with version = "2" -> "v2"
///     without version    -> "draft"
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Placeholder(ContextKey),
    Section {
        key: ContextKey,
        inverted: bool,
        children: Vec<Node>,
    },
}

#[derive(Debug)]
struct OpenSection {
    key: ContextKey,
    inverted: bool,
    position: usize,
    children: Vec<Node>,
}

impl Template {
    pub fn parse(text: &str) -> Result<Self, ContextError> {
        let mut nodes = Vec::new();
        let mut stack: Vec<OpenSection> = Vec::new();

        let mut rest = text;
        let mut offset = 0;
        while let Some(start) = rest.find(OPEN) {
            push_text(target(&mut nodes, &mut stack), &rest[..start]);

            let position = offset + start;
            let after_open = &rest[start + OPEN.len()..];
            let end = after_open
                .find(CLOSE)
                .ok_or_else(|| malformed(position, "unterminated `{{`"))?;
            let tag = after_open[..end].trim();

            if let Some(name) = tag.strip_prefix('#') {
                stack.push(OpenSection {
                    key: parse_key(name, position)?,
                    inverted: false,
                    position,
                    children: Vec::new(),
                });
            } else if let Some(name) = tag.strip_prefix('^') {
                stack.push(OpenSection {
                    key: parse_key(name, position)?,
                    inverted: true,
                    position,
                    children: Vec::new(),
                });
            } else if let Some(name) = tag.strip_prefix('/') {
                let key = parse_key(name, position)?;
                let section = stack.pop().ok_or_else(|| {
                    malformed(position, &format!("`{{{{/{key}}}}}` closes nothing"))
                })?;
                if section.key != key {
                    return Err(malformed(
                        position,
                        &format!("`{{{{/{key}}}}}` closes section `{}`", section.key),
                    ));
                }
                target(&mut nodes, &mut stack).push(Node::Section {
                    key,
                    inverted: section.inverted,
                    children: section.children,
                });
            } else {
                let key = parse_key(tag, position)?;
                target(&mut nodes, &mut stack).push(Node::Placeholder(key));
            }

            let consumed = start + OPEN.len() + end + CLOSE.len();
            rest = &rest[consumed..];
            offset += consumed;
        }
        push_text(target(&mut nodes, &mut stack), rest);

        if let Some(section) = stack.pop() {
            return Err(malformed(
                section.position,
                &format!("section `{}` is never closed", section.key),
            ));
        }

        Ok(Self { nodes })
    }

    /// Substitute every placeholder with its value from `context`.
    pub fn render(&self, context: &RenderingContext) -> Result<String, ContextError> {
        let mut output = String::new();
        render_nodes(&self.nodes, context, &mut output)?;
        Ok(output)
    }

    /// Check that rendering can't fail given which keys will be present,
    /// without needing their values yet.
    pub fn check(&self, is_present: &dyn Fn(ContextKey) -> bool) -> Result<(), ContextError> {
        check_nodes(&self.nodes, is_present)
    }
}

fn target<'a>(nodes: &'a mut Vec<Node>, stack: &'a mut [OpenSection]) -> &'a mut Vec<Node> {
    match stack.last_mut() {
        Some(section) => &mut section.children,
        None => nodes,
    }
}

fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if !text.is_empty() {
        nodes.push(Node::Text(text.to_owned()));
    }
}

fn parse_key(name: &str, position: usize) -> Result<ContextKey, ContextError> {
    let key: ContextKey = name.trim().parse()?;
    if !key.is_substitutable() {
        return Err(malformed(
            position,
            &format!("`{key}` can't be used inside a template"),
        ));
    }
    Ok(key)
}

fn malformed(position: usize, reason: &str) -> ContextError {
    ContextError::MalformedTemplate {
        position,
        reason: reason.to_owned(),
    }
}

fn render_nodes(
    nodes: &[Node],
    context: &RenderingContext,
    output: &mut String,
) -> Result<(), ContextError> {
    for node in nodes {
        match node {
            Node::Text(text) => output.push_str(text),
            Node::Placeholder(key) => {
                let value = context.get(*key).ok_or(ContextError::MissingValue(*key))?;
                output.push_str(value);
            }
            Node::Section {
                key,
                inverted,
                children,
            } => {
                if context.contains(*key) != *inverted {
                    render_nodes(children, context, output)?;
                }
            }
        }
    }
    Ok(())
}

fn check_nodes(nodes: &[Node], is_present: &dyn Fn(ContextKey) -> bool) -> Result<(), ContextError> {
    for node in nodes {
        match node {
            Node::Text(_) => {}
            Node::Placeholder(key) => {
                if !is_present(*key) {
                    return Err(ContextError::MissingValue(*key));
                }
            }
            Node::Section {
                key,
                inverted,
                children,
            } => {
                if is_present(*key) != *inverted {
                    check_nodes(children, is_present)?;
                }
            }
        }
    }
    Ok(())
}
