//! Named pattern fragments and placeholder interpolation
//!
//! Rule templates refer to shared snippet lists through `{name}` placeholders.
//! [`Placeholders::resolve`] turns a [`FragmentTable`] and the line-length
//! limit into a lookup table of finished strings, which is then applied to
//! every template before any pattern is compiled.

use std::collections::HashMap;

/// Named, ordered lists of regex snippets
#[derive(Debug, Clone, Default)]
pub struct FragmentTable {
    groups: HashMap<String, Vec<String>>,
}

impl FragmentTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a fragment group, builder style
    #[must_use]
    pub fn with_group<I, S>(mut self, name: &str, snippets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(name, snippets);
        self
    }

    /// Add (or replace) a fragment group
    pub fn insert<I, S>(&mut self, name: &str, snippets: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups.insert(
            name.to_string(),
            snippets.into_iter().map(Into::into).collect(),
        );
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    /// Snippets of a group joined into a single alternation
    #[must_use]
    pub fn alternation(&self, name: &str) -> Option<String> {
        self.get(name).map(|snippets| snippets.join("|"))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }
}

/// Fully resolved placeholder values
///
/// Besides one entry per fragment group (the group's alternation), three
/// derived entries are always present:
/// - `types_upper`: the `types` alternation with literal characters uppercased
/// - `linelen`: the line-length limit as a decimal number
/// - `linelen_re`: the limit as a repetition count, e.g. `{120}`
#[derive(Debug, Clone)]
pub struct Placeholders {
    values: HashMap<String, String>,
}

impl Placeholders {
    #[must_use]
    pub fn resolve(fragments: &FragmentTable, line_length: usize) -> Self {
        let mut values: HashMap<String, String> = fragments
            .names()
            .filter_map(|name| Some((name.to_string(), fragments.alternation(name)?)))
            .collect();

        if let Some(types) = fragments.alternation("types") {
            values.insert("types_upper".to_string(), uppercase_literals(&types));
        }
        values.insert("linelen".to_string(), line_length.to_string());
        values.insert("linelen_re".to_string(), format!("{{{line_length}}}"));

        Self { values }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Substitute every `{name}` placeholder in `template`
    ///
    /// Only braces enclosing an identifier are placeholders. Repetition
    /// counts such as `{3}` or `{2,5}` and escapes such as `\p{Greek}` pass
    /// through untouched.
    ///
    /// # Errors
    ///
    /// Returns the first placeholder name with no binding.
    pub fn interpolate<'t>(&self, template: &'t str) -> Result<String, &'t str> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let name = after
                .find('}')
                .map(|close| &after[..close])
                .filter(|name| is_placeholder_name(name) && !follows_escape(&out));

            match name {
                Some(name) => {
                    out.push_str(self.get(name).ok_or(name)?);
                    rest = &after[name.len() + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);

        Ok(out)
    }
}

fn is_placeholder_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// `\p{..}`, `\x{..}` and friends: the brace belongs to the escape
fn follows_escape(text: &str) -> bool {
    let mut tail = text.chars().rev();
    matches!(
        (tail.next(), tail.next()),
        (Some(c), Some('\\')) if c.is_ascii_alphabetic()
    )
}

/// Uppercase a pattern without touching escape sequences (`\w` stays `\w`)
fn uppercase_literals(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut escaped = false;
    for c in pattern.chars() {
        if escaped {
            out.push(c);
            escaped = false;
        } else {
            escaped = c == '\\';
            out.extend(c.to_uppercase());
        }
    }
    out
}
