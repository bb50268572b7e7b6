//! Minimal HTTP/1.1 server for external script tests.
//!
//! Serves a fixed table of paths (query strings ignored). Unknown paths get 404. Every request path
//! is recorded so tests can assert fetch order.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// One canned response.
#[derive(Debug, Clone)]
pub struct Route {
    pub path: &'static str,
    pub status: u16,
    pub body: Vec<u8>,
}

impl Route {
    pub fn ok(path: &'static str, body: &[u8]) -> Self {
        Self {
            path,
            status: 200,
            body: body.to_vec(),
        }
    }

    pub fn status(path: &'static str, status: u16) -> Self {
        Self {
            path,
            status,
            body: Vec::new(),
        }
    }
}

pub struct ScriptServer {
    /// Base URL without trailing slash, e.g. `http://127.0.0.1:12345`.
    pub base: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ScriptServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(routes: Vec<Route>) -> ScriptServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let log = Arc::clone(&log);
            thread::spawn(move || handle(stream, &routes, &log));
        }
    });
    ScriptServer {
        base: format!("http://127.0.0.1:{}", port),
        requests,
    }
}

fn handle(mut stream: TcpStream, routes: &[Route], log: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
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
        .unwrap_or("/")
        .to_string();
    log.lock().unwrap().push(path.clone());

    let route_path = path.split('?').next().unwrap_or("");
    let (status, body) = match routes.iter().find(|r| r.path == route_path) {
        Some(r) => (r.status, r.body.as_slice()),
        None => (404, &b""[..]),
    };
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nContent-Type: text/javascript\r\nConnection: close\r\n\r\n",
        status,
        reason(status),
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}
