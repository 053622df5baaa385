use std::collections::HashMap;

/// Replaces `{{key}}` placeholders in `template` with values from `vars`.
/// Unknown keys render as the empty string and whitespace inside the
/// braces is tolerated, so `{{ name }}` and `{{name}}` are the same
/// placeholder. Total: malformed input passes through unchanged.
pub fn render_template(template: &str, vars: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        match rest[open + 2..].find("}}") {
            Some(close) => {
                let key = rest[open + 2..open + 2 + close].trim();
                if let Some(value) = vars.get(key) {
                    out.push_str(value);
                }
                rest = &rest[open + 2 + close + 2..];
            }
            None => {
                // Unclosed placeholder, keep the raw text.
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
