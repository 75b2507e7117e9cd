//! One-shot HTTP server for exercising the client in tests

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

pub struct MockResponse {
    status: u16,
    content_type: &'static str,
    body: Body,
}

enum Body {
    Full(String),
    /// Close-delimited body written chunk by chunk
    Chunks(Vec<String>),
}

impl MockResponse {
    pub fn new(status: u16, content_type: &'static str, body: &str) -> Self {
        Self {
            status,
            content_type,
            body: Body::Full(body.to_string()),
        }
    }

    pub fn json(status: u16, body: &str) -> Self {
        Self::new(status, "application/json", body)
    }

    pub fn stream(chunks: Vec<String>) -> Self {
        Self {
            status: 200,
            content_type: "text/event-stream",
            body: Body::Chunks(chunks),
        }
    }
}

pub struct SeenRequest {
    /// Request line and headers
    pub head: String,
    pub body: String,
}

pub struct MockServer {
    pub base_url: String,
    seen: oneshot::Receiver<SeenRequest>,
    accepted: Arc<AtomicBool>,
}

impl MockServer {
    /// Whether any client has connected so far.
    pub fn accepted(&self) -> bool {
        self.accepted.load(Ordering::SeqCst)
    }

    pub async fn request(self) -> SeenRequest {
        self.seen.await.expect("mock server never saw a request")
    }
}

/// Accept a single connection, record the request, reply, close.
pub async fn serve(response: MockResponse) -> MockServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();
    let accepted = Arc::new(AtomicBool::new(false));
    let flag = accepted.clone();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        flag.store(true, Ordering::SeqCst);
        let seen = read_request(&mut socket).await;
        let _ = tx.send(seen);
        write_response(&mut socket, response).await;
    });

    MockServer {
        base_url: format!("http://{addr}"),
        seen: rx,
        accepted,
    }
}

/// A base URL nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn read_request(socket: &mut TcpStream) -> SeenRequest {
    let mut buf = Vec::new();
    let mut tmp = [0u8; 1024];

    let header_end = loop {
        let n = socket.read(&mut tmp).await.unwrap();
        assert!(n > 0, "client closed before sending headers");
        buf.extend_from_slice(&tmp[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|l| l.split_once(':'))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() - header_end < content_length {
        let n = socket.read(&mut tmp).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&tmp[..n]);
    }

    SeenRequest {
        head,
        body: String::from_utf8_lossy(&buf[header_end..]).to_string(),
    }
}

async fn write_response(socket: &mut TcpStream, response: MockResponse) {
    let reason = match response.status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        _ => "Status",
    };

    match response.body {
        Body::Full(body) => {
            let raw = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                response.status,
                reason,
                response.content_type,
                body.len(),
                body
            );
            let _ = socket.write_all(raw.as_bytes()).await;
        }
        Body::Chunks(chunks) => {
            let head = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nConnection: close\r\n\r\n",
                response.status, reason, response.content_type
            );
            let _ = socket.write_all(head.as_bytes()).await;
            for chunk in chunks {
                let _ = socket.write_all(chunk.as_bytes()).await;
                let _ = socket.flush().await;
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        }
    }
    let _ = socket.shutdown().await;
}
