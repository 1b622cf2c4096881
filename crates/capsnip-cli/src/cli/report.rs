//! Report presenter: the ordered list of matches as text or JSON.

use anyhow::{Context, Result};
use capsnip_core::snippet::{render_with, RenderedMatch};
use capsnip_core::{CaptureRequest, CapturedMatch};
use std::fs;
use std::io::{self, Write};

use super::{OutputArgs, ReportFormat};

/// Render every match and write the report to `--output` or stdout.
pub fn emit(
    matches: &[CapturedMatch],
    request: &CaptureRequest,
    preview_chars: usize,
    output: &OutputArgs,
) -> Result<()> {
    let rendered: Vec<RenderedMatch> = matches
        .iter()
        .map(|m| render_with(m, preview_chars))
        .collect();

    match &output.output {
        Some(path) => {
            let mut file = fs::File::create(path)
                .with_context(|| format!("create report: {}", path.display()))?;
            write_report(&mut file, &rendered, request, output.format)?;
            eprintln!("Wrote {} match(es) to {}", rendered.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_report(&mut lock, &rendered, request, output.format)?;
        }
    }
    Ok(())
}

pub fn write_report<W: Write>(
    w: &mut W,
    rendered: &[RenderedMatch],
    request: &CaptureRequest,
    format: ReportFormat,
) -> Result<()> {
    match format {
        ReportFormat::Text => write_text(w, rendered, request)?,
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *w, rendered)?;
            writeln!(w)?;
        }
    }
    w.flush()?;
    Ok(())
}

/// One-line summary used as each block's heading.
pub fn summary_line(index: usize, m: &CapturedMatch) -> String {
    format!(
        "{}. [{}] {} {} -> {}",
        index, m.file_type, m.method, m.status, m.url
    )
}

fn write_text<W: Write>(
    w: &mut W,
    rendered: &[RenderedMatch],
    request: &CaptureRequest,
) -> io::Result<()> {
    let types: Vec<&str> = request.file_types.iter().map(|t| t.as_str()).collect();
    writeln!(
        w,
        "Captured {} matching requests (body contains keywords, type in [{}]).",
        rendered.len(),
        types.join(", ")
    )?;

    for (i, r) in rendered.iter().enumerate() {
        let heading = summary_line(i + 1, &r.captured);
        writeln!(w)?;
        writeln!(w, "{}", heading)?;
        writeln!(w, "{}", "=".repeat(heading.chars().count().min(100)))?;
        section(w, "cURL", &r.curl)?;
        section(w, "Python (requests)", &r.python)?;
        if !r.captured.body_snippet.is_empty() {
            section(w, "Response Snippet", &r.captured.body_snippet)?;
        }
    }
    Ok(())
}

fn section<W: Write>(w: &mut W, title: &str, body: &str) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "--- {} ---", title)?;
    writeln!(w, "{}", body.trim_end_matches('\n'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use capsnip_core::snippet::render;
    use capsnip_core::FileType;

    fn request() -> CaptureRequest {
        CaptureRequest::new(
            "https://example.com",
            vec!["welcome".to_string()],
            [FileType::Html, FileType::Json],
        )
        .unwrap()
    }

    fn captured(body: &str) -> CapturedMatch {
        CapturedMatch {
            method: "GET".to_string(),
            url: "https://example.com".to_string(),
            status: 200,
            file_type: FileType::Html,
            request_headers: vec![("accept".to_string(), "text/html".to_string())],
            post_body: None,
            body_snippet: body.to_string(),
        }
    }

    fn text(rendered: &[RenderedMatch]) -> String {
        let mut buf = Vec::new();
        write_report(&mut buf, rendered, &request(), ReportFormat::Text).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn summary_line_format() {
        assert_eq!(
            summary_line(1, &captured("")),
            "1. [html] GET 200 -> https://example.com"
        );
    }

    #[test]
    fn text_report_has_banner_and_sections() {
        let out = text(&[render(&captured("<h1>Welcome</h1>"))]);
        assert!(out.starts_with(
            "Captured 1 matching requests (body contains keywords, type in [json, html])."
        ));
        assert!(out.contains("1. [html] GET 200 -> https://example.com"));
        assert!(out.contains("--- cURL ---\ncurl -X GET 'https://example.com'"));
        assert!(out.contains("--- Python (requests) ---\nimport requests"));
        assert!(out.contains("--- Response Snippet ---\n<h1>Welcome</h1>"));
    }

    #[test]
    fn empty_body_snippet_section_is_omitted() {
        let out = text(&[render(&captured(""))]);
        assert!(!out.contains("Response Snippet"));
    }

    #[test]
    fn empty_report_only_has_banner() {
        let out = text(&[]);
        assert_eq!(
            out,
            "Captured 0 matching requests (body contains keywords, type in [json, html]).\n"
        );
    }

    #[test]
    fn json_report_is_an_array() {
        let mut buf = Vec::new();
        let rendered = vec![render(&captured("x")), render(&captured("y"))];
        write_report(&mut buf, &rendered, &request(), ReportFormat::Json).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let arr = v.as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0]["body_snippet"], "x");
        assert_eq!(arr[1]["file_type"], "html");
        assert!(arr[0]["curl"].as_str().unwrap().contains("-H 'accept: text/html'"));
    }

    #[test]
    fn emit_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let output = OutputArgs {
            format: ReportFormat::Json,
            output: Some(path.clone()),
        };
        emit(&[captured("hello")], &request(), 500, &output).unwrap();
        let data = std::fs::read_to_string(&path).unwrap();
        assert!(data.contains("\"body_snippet\": \"hello\""));
        assert!(data.contains("print(response.text[:500])"));
    }
}
