//! Minimal selector language for picking banner elements out of a document.
//!
//! Supported grammar: compound selectors joined by the descendant combinator (whitespace).
//! A compound is an optional tag name or `*`, followed by any number of `.class` parts:
//!
//! ```text
//! .image-slider img
//! div.slider.wide img.banner
//! * .banner
//! ```
//!
//! Tag names compare case-insensitively, class names case-sensitively.

use crate::error::{Result, RotatorError};
use std::fmt;

/// Something a selector can be tested against.
pub trait SelectorSubject {
    fn tag_name(&self) -> &str;
    fn has_class(&self, class: &str) -> bool;
}

/// One whitespace-separated step of a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compound {
    /// `None` matches any tag (`*` or class-only compound)
    tag: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn matches<S: SelectorSubject>(&self, subject: &S) -> bool {
        if let Some(tag) = &self.tag {
            if !tag.eq_ignore_ascii_case(subject.tag_name()) {
                return false;
            }
        }
        self.classes.iter().all(|class| subject.has_class(class))
    }
}

/// A parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    /// Never empty; ordered outermost first
    compounds: Vec<Compound>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self> {
        let compounds = source
            .split_whitespace()
            .map(|part| parse_compound(source, part))
            .collect::<Result<Vec<_>>>()?;

        if compounds.is_empty() {
            return Err(RotatorError::invalid_selector(source, "selector is empty"));
        }

        Ok(Self {
            source: source.trim().to_string(),
            compounds,
        })
    }

    /// The selector text as given (trimmed).
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Test `subject` given its ancestors, ordered root first.
    pub fn matches<S: SelectorSubject>(&self, ancestors: &[S], subject: &S) -> bool {
        let Some((last, outer)) = self.compounds.split_last() else {
            return false;
        };
        if !last.matches(subject) {
            return false;
        }

        // Descendant-only chains can be matched greedily from the nearest ancestor outward.
        let mut pending = outer.iter().rev();
        let mut wanted = pending.next();
        for ancestor in ancestors.iter().rev() {
            match wanted {
                None => break,
                Some(compound) if compound.matches(ancestor) => wanted = pending.next(),
                Some(_) => {}
            }
        }
        wanted.is_none()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

fn parse_compound(source: &str, part: &str) -> Result<Compound> {
    let mut tag = None;
    let mut classes = Vec::new();

    let rest = if let Some(rest) = part.strip_prefix('*') {
        rest
    } else {
        let end = part.find(|ch: char| !is_ident_char(ch)).unwrap_or(part.len());
        if end > 0 {
            tag = Some(part[..end].to_ascii_lowercase());
        }
        &part[end..]
    };

    let mut rest = rest;
    while !rest.is_empty() {
        let Some(after_dot) = rest.strip_prefix('.') else {
            let unexpected = rest.chars().next().unwrap_or_default();
            return Err(RotatorError::invalid_selector(
                source,
                format!("unsupported token '{}'", unexpected),
            ));
        };
        let end = after_dot
            .find(|ch: char| !is_ident_char(ch))
            .unwrap_or(after_dot.len());
        if end == 0 {
            return Err(RotatorError::invalid_selector(
                source,
                "expected a class name after '.'",
            ));
        }
        classes.push(after_dot[..end].to_string());
        rest = &after_dot[end..];
    }

    Ok(Compound { tag, classes })
}
