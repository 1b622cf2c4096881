//! Minimal HTTP/1.1 server for browser tests.
//!
//! Serves an HTML page at `/` that fetches `/api/user.json` and loads
//! `/style.css`, so one navigation produces html, json and css responses.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

pub const INDEX_HTML: &str = "<!doctype html><html><head>\
<link rel=\"stylesheet\" href=\"/style.css\"></head>\
<body><h1>Welcome back</h1>\
<script>fetch('/api/user.json', {headers: {'X-Client': 'capsnip'}});</script>\
</body></html>";
pub const USER_JSON: &str = "{\"user\":\"alice\",\"token\":\"abc123\"}";
pub const STYLE_CSS: &str = "/* token */ h1 { color: red; }";

/// Starts a server in a background thread. Returns the base URL
/// (e.g. "http://127.0.0.1:12345/"). The server runs until the process exits.
pub fn start() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            thread::spawn(move || handle(stream));
        }
    });
    format!("http://127.0.0.1:{}/", port)
}

fn handle(mut stream: std::net::TcpStream) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");
    let (status, content_type, body) = match path {
        "/" => ("200 OK", "text/html; charset=utf-8", INDEX_HTML),
        "/api/user.json" => ("200 OK", "application/json", USER_JSON),
        "/style.css" => ("200 OK", "text/css", STYLE_CSS),
        _ => ("404 Not Found", "text/plain", "not found"),
    };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        content_type,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}
