//! `curl` command-line form.

use crate::model::CapturedMatch;

use super::post_body;

const CONTINUATION: &str = " \\\n  ";

/// Quote `s` for a POSIX shell: wrap in single quotes, with embedded quotes as `'\''`.
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// Method token for `-X`; quoted unless it is plain letters, digits, `-` or `_`.
fn method_arg(method: &str) -> String {
    let plain = !method.is_empty()
        && method
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if plain {
        method.to_string()
    } else {
        shell_quote(method)
    }
}

/// One `curl` invocation: method, URL, one `-H` per header in recorded order,
/// and `--data-raw` when there is a post body.
pub fn to_curl(m: &CapturedMatch) -> String {
    let mut parts = vec![format!("curl -X {} {}", method_arg(&m.method), shell_quote(&m.url))];
    for (name, value) in &m.request_headers {
        parts.push(format!("-H {}", shell_quote(&format!("{}: {}", name, value))));
    }
    if let Some(body) = post_body(m) {
        parts.push(format!("--data-raw {}", shell_quote(body)));
    }
    parts.join(CONTINUATION)
}
