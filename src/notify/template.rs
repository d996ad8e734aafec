// ABOUTME: Single-placeholder notification template.
// ABOUTME: Substitutes the first %s or %v with the computed message.

use std::fmt;

/// Template wrapping every notification message, e.g. `"[ops] %v"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationTemplate(String);

impl NotificationTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Render the template with `message`.
    ///
    /// `%%` yields a literal `%`. Only the first `%s`/`%v` is substituted; a
    /// template without a placeholder is returned verbatim.
    pub fn render(&self, message: &str) -> String {
        let mut out = String::with_capacity(self.0.len() + message.len());
        let mut substituted = false;
        let mut chars = self.0.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            match chars.peek() {
                Some('%') => {
                    chars.next();
                    out.push('%');
                }
                Some('s') | Some('v') if !substituted => {
                    chars.next();
                    out.push_str(message);
                    substituted = true;
                }
                _ => out.push('%'),
            }
        }

        out
    }
}

impl Default for NotificationTemplate {
    fn default() -> Self {
        Self::new("%v")
    }
}

impl fmt::Display for NotificationTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
