//! Compiled rule tree
//!
//! [`RuleCatalog::build`] interpolates every template against a
//! [`FragmentTable`] and the line-length limit, compiles the patterns and
//! keeps the template nesting: rules become [`RuleNode::Leaf`], lists become
//! [`RuleNode::Group`]. The catalog is immutable afterwards and can be shared
//! across threads.

use regex::{Regex, RegexBuilder};

use super::fortran::{default_fragments, default_rules};
use super::fragments::{FragmentTable, Placeholders};
use super::template::{Replacement, RuleTemplate, TemplateNode};
use crate::error::CatalogError;

/// A rule with its pattern and message fully resolved
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pattern: Regex,
    replacement: Replacement,
    message: Option<String>,
}

impl CompiledRule {
    fn compile(template: &RuleTemplate, placeholders: &Placeholders) -> Result<Self, CatalogError> {
        let unresolved = |name: &str| CatalogError::UnresolvedPlaceholder {
            template: template.pattern.clone(),
            name: name.to_string(),
        };

        let source = placeholders
            .interpolate(&template.pattern)
            .map_err(unresolved)?;
        let message = template
            .message
            .as_deref()
            .map(|message| placeholders.interpolate(message).map_err(unresolved))
            .transpose()?;

        // Lines keep their trailing newline: `$` has to match in front of it
        let pattern = RegexBuilder::new(&source)
            .multi_line(true)
            .build()
            .map_err(|source_err| CatalogError::InvalidPattern {
                template: template.pattern.clone(),
                pattern: source.clone(),
                source: source_err,
            })?;

        Ok(Self {
            pattern,
            replacement: template.replacement.clone(),
            message,
        })
    }

    #[must_use]
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    #[must_use]
    pub fn replacement(&self) -> &Replacement {
        &self.replacement
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn is_suppression(&self) -> bool {
        !self.replacement.corrects() && self.message.is_none()
    }
}

#[derive(Debug, Clone)]
pub enum RuleNode {
    Leaf(CompiledRule),
    Group(Vec<RuleNode>),
}

impl RuleNode {
    fn compile(node: &TemplateNode, placeholders: &Placeholders) -> Result<Self, CatalogError> {
        match node {
            TemplateNode::Rule(template) => {
                CompiledRule::compile(template, placeholders).map(RuleNode::Leaf)
            }
            TemplateNode::Group(children) => children
                .iter()
                .map(|child| RuleNode::compile(child, placeholders))
                .collect::<Result<Vec<_>, _>>()
                .map(RuleNode::Group),
        }
    }

    /// Number of leaves below this node
    #[must_use]
    pub fn rule_count(&self) -> usize {
        match self {
            RuleNode::Leaf(_) => 1,
            RuleNode::Group(children) => children.iter().map(RuleNode::rule_count).sum(),
        }
    }
}

/// The compiled rule tree for one line-length setting
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    root: RuleNode,
    line_length: usize,
}

impl RuleCatalog {
    /// Compile the built-in Fortran rules against `fragments`
    pub fn build(fragments: &FragmentTable, line_length: usize) -> Result<Self, CatalogError> {
        Self::from_templates(&default_rules(), fragments, line_length)
    }

    /// Compile the built-in Fortran rules and fragments
    pub fn fortran(line_length: usize) -> Result<Self, CatalogError> {
        Self::build(&default_fragments(), line_length)
    }

    /// Compile an arbitrary template tree
    ///
    /// The templates form the top-level group: every entry runs on every
    /// line. Fails on the first template that does not resolve or compile.
    pub fn from_templates(
        templates: &[TemplateNode],
        fragments: &FragmentTable,
        line_length: usize,
    ) -> Result<Self, CatalogError> {
        let placeholders = Placeholders::resolve(fragments, line_length);
        let root = templates
            .iter()
            .map(|node| RuleNode::compile(node, &placeholders))
            .collect::<Result<Vec<_>, _>>()
            .map(RuleNode::Group)?;

        log::debug!(
            "compiled rule catalog: {} rules, line length {line_length}",
            root.rule_count()
        );

        Ok(Self { root, line_length })
    }

    /// The top-level group
    #[must_use]
    pub fn root(&self) -> &RuleNode {
        &self.root
    }

    #[must_use]
    pub fn line_length(&self) -> usize {
        self.line_length
    }

    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.root.rule_count()
    }
}
