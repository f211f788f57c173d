use log::{trace, warn};

use crate::types::{Declaration, LinePattern};

/// Result of testing one manifest line against the recognized declaration
/// shapes. The shapes are probed independently, so a single line may
/// satisfy more than one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShapeMatch {
    /// `  name,` as one member of a formatter-expanded export block.
    NamedContinuation(String),
    /// `export * as name`, an aliased star re-export.
    AliasedStar(String),
    /// `export { a, b } from ...`, a named list on a single line.
    NamedList(Vec<String>),
}

pub(crate) fn match_shapes(line: &str) -> Vec<ShapeMatch> {
    let mut matches = Vec::new();
    if let Some(name) = match_continuation(line) {
        matches.push(ShapeMatch::NamedContinuation(name));
    }
    if let Some(name) = match_aliased_star(line) {
        matches.push(ShapeMatch::AliasedStar(name));
    }
    if let Some(names) = match_named_list(line) {
        matches.push(ShapeMatch::NamedList(names));
    }
    matches
}

/// Exactly two leading spaces followed by an identifier.
///
/// This shape assumes the manifest has been through the canonical formatter,
/// which emits export blocks one name per line at two-space indentation. A
/// trailing comma is not part of the name. Deeper indentation, or a third
/// column that is not an identifier character, does not match, so the parser
/// cannot emit an empty or whitespace-only name.
pub(crate) fn match_continuation(line: &str) -> Option<String> {
    let rest = line.strip_prefix("  ")?;
    let name: String = rest.chars().take_while(char::is_ascii_alphanumeric).collect();
    if name.is_empty() { None } else { Some(name) }
}

/// A line containing `export * as <identifier>`.
pub(crate) fn match_aliased_star(line: &str) -> Option<String> {
    const MARKER: &str = "export * as ";
    let at = line.find(MARKER)?;
    let name: String =
        line[at + MARKER.len()..].chars().take_while(char::is_ascii_alphanumeric).collect();
    if name.is_empty() { None } else { Some(name) }
}

/// A line containing a brace-delimited, comma-separated name list.
pub(crate) fn match_named_list(line: &str) -> Option<Vec<String>> {
    let open = line.find('{')?;
    let close = open + line[open..].find('}')?;
    let names: Vec<String> = line[open + 1..close]
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();
    if names.is_empty() { None } else { Some(names) }
}

impl LinePattern {
    /// True when `line` is the declaration line this pattern was derived
    /// from.
    ///
    /// An aliased star export is located through its `export * from <name>`
    /// forwarding form, never through the `export * as` line itself.
    pub fn matches_line(&self, line: &str) -> bool {
        match self {
            LinePattern::Continuation(name) => {
                match_continuation(line).as_deref() == Some(name.as_str())
            }
            LinePattern::StarForward(name) => line.contains(&format!("export * from {name}")),
            LinePattern::Bare(name) => {
                match_named_list(line).is_some_and(|names| names.iter().any(|n| n == name))
            }
        }
    }
}

/// Extracts every declaration from a manifest's text.
///
/// Blank lines and `//` comment lines never reach the shape matchers, since
/// manifests conventionally contain only comments and export statements. A
/// name already declared in the same manifest is rejected with a warning and
/// the first occurrence kept. A line matching no shape is not an error.
pub fn parse_manifest(text: &str, origin: &str) -> Vec<Declaration> {
    let mut declarations: Vec<Declaration> = Vec::new();

    let lines = text
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.trim_start().starts_with("//"));

    for line in lines {
        for shape in match_shapes(line) {
            match shape {
                ShapeMatch::NamedContinuation(name) => {
                    let pattern = LinePattern::Continuation(name.clone());
                    push_declaration(&mut declarations, origin, name, pattern);
                }
                ShapeMatch::AliasedStar(name) => {
                    let pattern = LinePattern::StarForward(name.clone());
                    push_declaration(&mut declarations, origin, name, pattern);
                }
                ShapeMatch::NamedList(names) => {
                    for name in names {
                        let pattern = LinePattern::Bare(name.clone());
                        push_declaration(&mut declarations, origin, name, pattern);
                    }
                }
            }
        }
    }

    declarations
}

fn push_declaration(
    declarations: &mut Vec<Declaration>,
    origin: &str,
    name: String,
    pattern: LinePattern,
) {
    if declarations.iter().any(|d| d.name == name) {
        warn!("Duplicate declaration of \"{}\" in {}, keeping the first", name, origin);
        return;
    }
    trace!("Declared \"{}\" in {}", name, origin);
    declarations.push(Declaration { name, origin: origin.to_string(), used: false, pattern });
}
