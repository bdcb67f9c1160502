//! Shared utilities for integration testing.

use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use solythra_deploy::contracts::ContractKind;

/// One request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Request target, path plus query.
    pub target: String,
    pub body: String,
}

#[allow(dead_code)]
impl RecordedRequest {
    pub fn query_param(&self, key: &str) -> Option<String> {
        let (_, query) = self.target.split_once('?')?;
        lookup(query, key)
    }

    pub fn form_field(&self, key: &str) -> Option<String> {
        lookup(&self.body, key)
    }
}

fn lookup(encoded: &str, key: &str) -> Option<String> {
    url::form_urlencoded::parse(encoded.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Handle to a running mock backend.
#[allow(dead_code)]
pub struct MockBackend {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Start a programmable mock backend on an ephemeral port.
///
/// `f` sees every request (after it has been recorded) and returns the
/// status code and body to answer with. One request per connection.
#[allow(dead_code)]
pub async fn start_programmable_backend<F>(f: F) -> MockBackend
where
    F: Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let recorded = requests.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let f = f.clone();
                    let recorded = recorded.clone();
                    tokio::spawn(async move {
                        handle_connection(socket, f, recorded).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockBackend { addr, requests }
}

async fn handle_connection<F>(
    mut socket: TcpStream,
    f: Arc<F>,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
) where
    F: Fn(&RecordedRequest) -> (u16, String),
{
    let Some(request) = read_request(&mut socket).await else {
        return;
    };
    recorded.lock().unwrap().push(request.clone());

    let (status, body) = f(&request);
    let status_text = match status {
        200 => "200 OK",
        400 => "400 Bad Request",
        404 => "404 Not Found",
        429 => "429 Too Many Requests",
        500 => "500 Internal Server Error",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    };

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_text,
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

async fn read_request(socket: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();

    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let body_end = buf.len().min(header_end + content_length);
    let body = String::from_utf8_lossy(&buf[header_end..body_end]).to_string();

    Some(RecordedRequest {
        method,
        target,
        body,
    })
}

#[allow(dead_code)]
pub const SOLC_LONG_VERSION: &str = "0.8.22+commit.4fc1097e";

/// Write a Hardhat-layout artifacts tree for every contract under a fresh
/// temp directory and return its root.
#[allow(dead_code)]
pub fn write_artifacts(tag: &str) -> PathBuf {
    let root = std::env::temp_dir().join(format!(
        "solythra-it-{}-{}",
        tag,
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&root);
    fs::create_dir_all(root.join("build-info")).unwrap();
    fs::write(
        root.join("build-info").join("f00d.json"),
        format!(
            r#"{{
                "solcVersion": "0.8.22",
                "solcLongVersion": "{}",
                "input": {{"language": "Solidity", "sources": {{}}, "settings": {{"optimizer": {{"enabled": true, "runs": 200}}}}}}
            }}"#,
            SOLC_LONG_VERSION
        ),
    )
    .unwrap();

    for kind in ContractKind::DEPLOY_ORDER {
        let name = kind.artifact_name();
        let dir = root.join("contracts").join(format!("{}.sol", name));
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(format!("{}.json", name)),
            format!(
                r#"{{"contractName": "{name}", "sourceName": "contracts/{name}.sol", "abi": [], "bytecode": "0x6080604052"}}"#
            ),
        )
        .unwrap();
        fs::write(
            dir.join(format!("{}.dbg.json", name)),
            r#"{"_format": "hh-sol-dbg-1", "buildInfo": "../../build-info/f00d.json"}"#,
        )
        .unwrap();
    }

    root
}
