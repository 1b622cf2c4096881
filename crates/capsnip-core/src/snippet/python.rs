//! Python `requests` program form.

use crate::model::CapturedMatch;

use super::post_body;

/// Methods with a dedicated `requests.<method>` helper.
const REQUESTS_HELPERS: [&str; 7] = ["get", "post", "put", "patch", "delete", "head", "options"];

/// Python string literal. JSON string syntax is a valid Python literal.
fn py_str(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Headers as a dict literal, two-space indented, in recorded order.
fn py_headers(headers: &[(String, String)]) -> String {
    if headers.is_empty() {
        return "{}".to_string();
    }
    let entries: Vec<String> = headers
        .iter()
        .map(|(k, v)| format!("  {}: {}", py_str(k), py_str(v)))
        .collect();
    format!("{{\n{}\n}}", entries.join(",\n"))
}

/// A self-contained script that repeats the request and prints the status
/// and the first `preview_chars` characters of the response text.
pub fn to_python(m: &CapturedMatch, preview_chars: usize) -> String {
    let body = post_body(m);
    let method = m.method.to_ascii_lowercase();

    let mut out = String::from("import requests\n\n");
    out.push_str(&format!("url = {}\n", py_str(&m.url)));
    out.push_str(&format!("headers = {}\n", py_headers(&m.request_headers)));
    if let Some(body) = body {
        out.push_str(&format!("data = {}\n", py_str(body)));
    }

    let data_arg = if body.is_some() { ", data=data" } else { "" };
    let call = if REQUESTS_HELPERS.contains(&method.as_str()) {
        format!("requests.{}(url, headers=headers{})", method, data_arg)
    } else {
        format!(
            "requests.request({}, url, headers=headers{})",
            py_str(&m.method),
            data_arg
        )
    };
    out.push_str(&format!("response = {}\n", call));
    out.push_str("print(response.status_code)\n");
    out.push_str(&format!("print(response.text[:{}])\n", preview_chars));
    out
}
