//! Uncompiled rule templates
//!
//! A template pairs a pattern (with `{name}` placeholders) with a
//! [`Replacement`] and an optional message. Templates nest through
//! [`TemplateNode::Group`]; the nesting is carried verbatim into the
//! compiled catalog.

use std::ops::Range;

/// Programmatic rewrite of one match
///
/// Receives the current line and the match span (byte offsets into the
/// original line) and returns the whole new line.
pub type TransformFn = fn(&str, Range<usize>) -> String;

/// What a rule does to the line when its pattern matches
#[derive(Debug, Clone)]
pub enum Replacement {
    /// Report only, the line is left as is
    Detect,
    /// Substitute every match in the current line; `$1`/`${name}` refer to capture groups
    Replace(String),
    /// Rewrite the matched span programmatically
    Transform(TransformFn),
}

impl Replacement {
    #[must_use]
    pub fn corrects(&self) -> bool {
        !matches!(self, Replacement::Detect)
    }
}

#[derive(Debug, Clone)]
pub struct RuleTemplate {
    pub pattern: String,
    pub replacement: Replacement,
    pub message: Option<String>,
}

impl RuleTemplate {
    #[must_use]
    pub fn new(pattern: &str, replacement: Replacement, message: Option<&str>) -> Self {
        Self {
            pattern: pattern.to_string(),
            replacement,
            message: message.map(str::to_string),
        }
    }

    /// Rule with a static substitution template
    #[must_use]
    pub fn replace(pattern: &str, template: &str, message: &str) -> Self {
        Self::new(pattern, Replacement::Replace(template.to_string()), Some(message))
    }

    /// Rule with a programmatic rewrite
    #[must_use]
    pub fn transform(pattern: &str, transform: TransformFn, message: &str) -> Self {
        Self::new(pattern, Replacement::Transform(transform), Some(message))
    }

    /// Detection-only rule
    #[must_use]
    pub fn detect(pattern: &str, message: &str) -> Self {
        Self::new(pattern, Replacement::Detect, Some(message))
    }

    /// Suppression rule: no correction, no message
    ///
    /// Placed ahead of siblings in a nested group, a match vetoes the rest of
    /// that group for the line.
    #[must_use]
    pub fn skip(pattern: &str) -> Self {
        Self::new(pattern, Replacement::Detect, None)
    }

    #[must_use]
    pub fn is_suppression(&self) -> bool {
        !self.replacement.corrects() && self.message.is_none()
    }
}

/// A template or an ordered group of template nodes
#[derive(Debug, Clone)]
pub enum TemplateNode {
    Rule(RuleTemplate),
    Group(Vec<TemplateNode>),
}

impl TemplateNode {
    #[must_use]
    pub fn group<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TemplateNode>,
    {
        TemplateNode::Group(children.into_iter().map(Into::into).collect())
    }
}

impl From<RuleTemplate> for TemplateNode {
    fn from(rule: RuleTemplate) -> Self {
        TemplateNode::Rule(rule)
    }
}
