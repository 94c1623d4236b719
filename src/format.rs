//! `{{variable}}` template substitution.
//!
//! Resolved translation strings may contain `{{name}}` placeholders filled
//! in by the caller at render time. Substitution is pure string work: no
//! escaping and no HTML sanitization (translation strings are trusted,
//! locally-authored content, not user input).

use std::collections::HashMap;

use serde_json::Value;

/// Caller-supplied values for `{{name}}` placeholders.
pub type TemplateVars = HashMap<String, Value>;

/// Substitutes `{{name}}` placeholders in `template`.
///
/// The template is scanned once, left to right. Each placeholder whose name
/// has a supplied variable is replaced; placeholders with no matching
/// variable are left untouched, so a missing variable surfaces visibly
/// instead of producing an empty gap. Substituted text is never rescanned:
/// a variable value containing `{{...}}` is emitted verbatim. With no
/// variables at all the template is returned unchanged.
#[must_use]
pub fn apply_vars(template: &str, vars: Option<&TemplateVars>) -> String {
    let Some(vars) = vars else {
        return template.to_string();
    };

    let mut output = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        let (before, braced) = rest.split_at(open);
        output.push_str(before);

        let Some(after_open) = braced.strip_prefix("{{") else {
            break;
        };
        match split_placeholder(after_open) {
            Some((name, after_close)) => {
                match vars.get(name) {
                    Some(value) => output.push_str(&render_value(value)),
                    None => {
                        output.push_str("{{");
                        output.push_str(name);
                        output.push_str("}}");
                    }
                }
                rest = after_close;
            }
            None => {
                // `{{` が有効なプレースホルダーを開いていない場合はそのまま出力
                output.push_str("{{");
                rest = after_open;
            }
        }
    }
    output.push_str(rest);
    output
}

/// Splits text following `{{` into the placeholder name and the text after
/// its closing `}}`. Returns `None` unless the enclosed name is a
/// non-empty identifier (word characters only).
fn split_placeholder(rest: &str) -> Option<(&str, &str)> {
    let (name, after) = rest.split_once("}}")?;
    let is_identifier = !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_');
    is_identifier.then_some((name, after))
}

/// Stringifies a variable value: strings verbatim, everything else via its
/// JSON rendering.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
