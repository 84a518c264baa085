//! Positional `{0}`, `{1}`, … template substitution.
//! Used by: notify::send_templated, cli.

use std::path::Path;

pub trait TemplateRenderer {
    fn render(&self, template: &str, values: &[&str]) -> String;
}

/// Replaces `{i}` with `values[i]`, where `i` is written in canonical decimal
/// (`{0}`, `{12}`; never `{00}` or `{+1}`). Placeholders without a value are
/// left as written and surplus values are ignored.
///
/// Substitution is one left-to-right scan: text inserted for a placeholder is
/// never scanned again, so `("{0}{1}", ["{1}", "b"])` renders `"{1}b"`, not
/// `"bb"` as repeated whole-string replacement would.
#[derive(Debug, Default, Clone, Copy)]
pub struct PositionalRenderer;

impl TemplateRenderer for PositionalRenderer {
    fn render(&self, template: &str, values: &[&str]) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let digits = after.bytes().take_while(u8::is_ascii_digit).count();
            let closed = digits > 0 && after.as_bytes().get(digits) == Some(&b'}');
            let canonical = digits == 1 || !after.starts_with('0');
            let value = (closed && canonical)
                .then(|| after[..digits].parse::<usize>().ok())
                .flatten()
                .and_then(|index| values.get(index));

            match value {
                Some(value) => {
                    out.push_str(value);
                    rest = &after[digits + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

pub fn load_template(path: impl AsRef<Path>) -> std::io::Result<String> {
    std::fs::read_to_string(path)
}
