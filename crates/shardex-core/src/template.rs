//! `$name` placeholder substitution with strict semantics.
//!
//! A placeholder is `$name` or `${name}` where `name` is an ASCII
//! identifier. `$$` renders a literal `$`. Substitution is strict: a
//! placeholder with no entry in the [`RenderContext`] is an error, never
//! left in the output. Substituted values are inserted verbatim; there is no
//! nested or recursive expansion.

use crate::error::{ExportError, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Placeholder name → substitution value mapping, built per document.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    values: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Render `template`, substituting every placeholder from `ctx`.
pub fn render(template: &str, ctx: &RenderContext) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut offset = 0usize;

    while let Some(dollar) = rest.find('$') {
        out.push_str(&rest[..dollar]);
        let after = &rest[dollar + 1..];
        let at = offset + dollar;

        let consumed = match after.chars().next() {
            Some('$') => {
                out.push('$');
                1
            }
            Some('{') => {
                let inner = &after[1..];
                let close = inner
                    .find('}')
                    .ok_or(ExportError::InvalidPlaceholder { position: at })?;
                let name = &inner[..close];
                if name.is_empty() || !name.chars().all(is_ident_continue) {
                    return Err(ExportError::InvalidPlaceholder { position: at });
                }
                out.push_str(lookup(ctx, name)?);
                close + 2
            }
            Some(c) if is_ident_start(c) => {
                let end = after
                    .find(|c: char| !is_ident_continue(c))
                    .unwrap_or(after.len());
                let name = &after[..end];
                out.push_str(lookup(ctx, name)?);
                end
            }
            _ => return Err(ExportError::InvalidPlaceholder { position: at }),
        };

        rest = &after[consumed..];
        offset = at + 1 + consumed;
    }

    out.push_str(rest);
    Ok(out)
}

/// Read a template file and render it.
pub fn render_file(path: &Path, ctx: &RenderContext) -> Result<String> {
    let template = std::fs::read_to_string(path).map_err(|source| ExportError::TemplateRead {
        path: path.to_path_buf(),
        source,
    })?;
    render(&template, ctx)
}

fn lookup<'a>(ctx: &'a RenderContext, name: &str) -> Result<&'a str> {
    ctx.get(name).ok_or_else(|| ExportError::MissingPlaceholder {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_simple_placeholder() {
        let ctx = RenderContext::new().with("label", "alice");
        assert_eq!(render("share for $label.", &ctx).unwrap(), "share for alice.");
    }

    #[test]
    fn substitutes_braced_placeholder() {
        let ctx = RenderContext::new().with("label", "alice");
        assert_eq!(render("${label}-1.md", &ctx).unwrap(), "alice-1.md");
    }

    #[test]
    fn dollar_dollar_escapes() {
        let ctx = RenderContext::new();
        assert_eq!(render("costs $$5", &ctx).unwrap(), "costs $5");
    }

    #[test]
    fn missing_placeholder_is_an_error() {
        let ctx = RenderContext::new();
        let err = render("hello $nobody", &ctx).unwrap_err();
        match err {
            ExportError::MissingPlaceholder { name } => assert_eq!(name, "nobody"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bare_dollar_is_invalid() {
        let ctx = RenderContext::new();
        let err = render("100$ only", &ctx).unwrap_err();
        assert!(matches!(err, ExportError::InvalidPlaceholder { position: 3 }));
    }

    #[test]
    fn unterminated_brace_is_invalid() {
        let ctx = RenderContext::new().with("label", "alice");
        let err = render("${label", &ctx).unwrap_err();
        assert!(matches!(err, ExportError::InvalidPlaceholder { position: 0 }));
    }

    #[test]
    fn no_recursive_expansion() {
        let ctx = RenderContext::new()
            .with("a", "$b")
            .with("b", "oops");
        assert_eq!(render("$a", &ctx).unwrap(), "$b");
    }

    #[test]
    fn value_inserted_verbatim() {
        let content = "line1\nline2 <>&\"' \u{1F511}";
        let ctx = RenderContext::new().with("fragment", content);
        assert_eq!(render("$fragment", &ctx).unwrap(), content);
    }

    #[test]
    fn placeholder_name_stops_at_non_identifier() {
        let ctx = RenderContext::new().with("label", "alice");
        assert_eq!(render("$label.md", &ctx).unwrap(), "alice.md");
    }

    #[test]
    fn unreadable_template_file_is_an_error() {
        let ctx = RenderContext::new();
        let err = render_file(Path::new("/nonexistent/template.md"), &ctx).unwrap_err();
        assert!(matches!(err, ExportError::TemplateRead { .. }));
    }
}
