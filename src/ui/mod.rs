//! Markup rendering. Every component is a pure function of the data it is
//! handed; nothing here reads or writes application state.

pub mod components;
pub mod layout;
pub mod theme;

use std::fmt::Write;

use crate::event::Action;

/// A region of the page that renders to an HTML fragment.
pub trait Component {
    fn render(&self) -> String;
}

/// Escape text for use in element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// ` data-action="..." data-arg="..."` for an interactive element.
pub fn action_attrs(action: &Action) -> String {
    let mut attrs = format!(" data-action=\"{}\"", action.kind().to_key());
    if let Some(arg) = action.arg() {
        let _ = write!(attrs, " data-arg=\"{}\"", escape_html(&arg));
    }
    attrs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<a href=\"x\">Tom & 'Jerry'</a>"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_action_attrs() {
        assert_eq!(
            action_attrs(&Action::SelectLesson("3".to_string())),
            " data-action=\"select_lesson\" data-arg=\"3\""
        );
        assert_eq!(
            action_attrs(&Action::GoDashboard),
            " data-action=\"go_dashboard\""
        );
    }
}
