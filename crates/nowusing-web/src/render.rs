//! Status page rendering
//!
//! The page template uses `{{name}}` placeholders. Values are HTML-escaped
//! on the way in, so a window title like `<script>` shows up as text.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    #[error("unknown placeholder {{{{{0}}}}}")]
    UnknownPlaceholder(String),
    #[error("unterminated placeholder at byte {0}")]
    Unterminated(usize),
}

/// Values available to the page template
#[derive(Debug, Clone)]
pub struct PageContext<'a> {
    pub username: &'a str,
    pub app: &'a str,
    pub refresh_interval_ms: u64,
}

impl PageContext<'_> {
    fn lookup(&self, name: &str) -> Option<String> {
        match name {
            "username" => Some(escape_html(self.username)),
            "app" => Some(escape_html(self.app)),
            "refresh_interval" => Some(self.refresh_interval_ms.to_string()),
            _ => None,
        }
    }
}

pub fn render_page(template: &str, ctx: &PageContext<'_>) -> Result<String, RenderError> {
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find("}}")
            .ok_or_else(|| RenderError::Unterminated(template.len() - rest.len() + start))?;

        let name = after[..end].trim();
        let value = ctx
            .lookup(name)
            .ok_or_else(|| RenderError::UnknownPlaceholder(name.to_string()))?;
        out.push_str(&value);

        rest = &after[end + 2..];
    }
    out.push_str(rest);

    Ok(out)
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
