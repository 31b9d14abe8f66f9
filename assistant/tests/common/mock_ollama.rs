//! Minimal HTTP/1.1 stand-in for an Ollama server
//!
//! Each connection serves one request and is then closed.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// A request as seen by the mock server
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// What the mock server does with a request
#[derive(Debug, Clone)]
pub enum Reply {
    /// Send the body in pieces, pausing between them
    Send {
        status: u16,
        content_type: &'static str,
        chunks: Vec<String>,
        pause: Duration,
    },
    /// Accept the request and never answer
    Hang,
}

impl Reply {
    pub fn json(status: u16, body: &str) -> Self {
        Reply::Send {
            status,
            content_type: "application/json",
            chunks: vec![body.to_string()],
            pause: Duration::ZERO,
        }
    }

    pub fn ndjson(lines: &[&str]) -> Self {
        Self::ndjson_every(lines, Duration::from_millis(10))
    }

    /// Stream `lines` with `pause` between consecutive writes
    pub fn ndjson_every(lines: &[&str], pause: Duration) -> Self {
        Reply::Send {
            status: 200,
            content_type: "application/x-ndjson",
            chunks: lines.iter().map(|l| l.to_string()).collect(),
            pause,
        }
    }
}

type Handler = Arc<dyn Fn(&CapturedRequest) -> Reply + Send + Sync>;

pub struct MockOllama {
    pub url: String,
    pub requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockOllama {
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&CapturedRequest) -> Reply + Send + Sync + 'static,
    {
        // A proxy from the environment would swallow loopback requests
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handler: Handler = Arc::new(handler);

        let captured = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let handler = handler.clone();
                let captured = captured.clone();
                tokio::spawn(async move {
                    let _ = serve_connection(stream, handler, captured).await;
                });
            }
        });

        Self { url, requests }
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// URL of a port nothing listens on
pub async fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn serve_connection(
    mut stream: TcpStream,
    handler: Handler,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
) -> std::io::Result<()> {
    let request = read_request(&mut stream).await?;
    let reply = handler(&request);
    captured.lock().unwrap().push(request);

    match reply {
        Reply::Hang => {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
        Reply::Send {
            status,
            content_type,
            chunks,
            pause,
        } => {
            let length: usize = chunks.iter().map(|c| c.len()).sum();
            let head = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                reason(status),
                content_type,
                length
            );
            stream.write_all(head.as_bytes()).await?;
            for (i, chunk) in chunks.iter().enumerate() {
                if i > 0 {
                    tokio::time::sleep(pause).await;
                }
                stream.write_all(chunk.as_bytes()).await?;
                stream.flush().await?;
            }
            stream.shutdown().await?;
        }
    }
    Ok(())
}

async fn read_request(stream: &mut TcpStream) -> std::io::Result<CapturedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next().unwrap_or("").split_whitespace();
    let method = request_line.next().unwrap_or("").to_string();
    let path = request_line.next().unwrap_or("").to_string();
    let content_length: usize = lines
        .filter_map(|l| l.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let end = (header_end + content_length).min(buf.len());
    let body = String::from_utf8_lossy(&buf[header_end..end]).to_string();

    Ok(CapturedRequest { method, path, body })
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
