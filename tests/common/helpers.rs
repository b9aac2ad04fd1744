use std::path::Path;

use rmpv::Value;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{body_string, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dreamcatcher::retriever::{Retriever, RetrieverBuilder};

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Encodes a value as MessagePack bytes
pub fn encode_value(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    rmpv::encode::write_value(&mut buf, value).expect("Failed to encode value");
    buf
}

/// Builds one dream entry as it appears in a query response
pub fn dream_entry(id: u64, meta_token: &str, content_tokens: &[&str]) -> Value {
    let contents = content_tokens
        .iter()
        .map(|token| Value::Map(vec![(Value::from("url"), Value::from(*token))]))
        .collect();
    Value::Map(vec![
        (Value::from("id"), Value::from(id)),
        (Value::from("meta"), Value::from(meta_token)),
        (Value::from("contents"), Value::Array(contents)),
    ])
}

/// Builds an encoded query response holding the given dream entries
pub fn dreams_response(entries: Vec<Value>) -> Vec<u8> {
    encode_value(&Value::Map(vec![(
        Value::from("dreams"),
        Value::Array(entries),
    )]))
}

/// Builds an encoded query response with an empty dreams list
pub fn empty_dreams_response() -> Vec<u8> {
    dreams_response(Vec::new())
}

/// Builds a metadata document with a fixed upload time of 2023.01.02@03-04
pub fn meta_document(island: &str) -> Value {
    let time = Value::Map(vec![
        (Value::from("mYear"), Value::from(2023)),
        (Value::from("mMonth"), Value::from(1)),
        (Value::from("mDay"), Value::from(2)),
        (Value::from("mHour"), Value::from(3)),
        (Value::from("mMin"), Value::from(4)),
    ]);
    Value::Map(vec![
        (Value::from("mMtVNm"), Value::from(island)),
        (Value::from("mMtCurUploadTime"), time),
    ])
}

/// Encoded form of [`meta_document`]
pub fn meta_bytes(island: &str) -> Vec<u8> {
    encode_value(&meta_document(island))
}

/// Mounts a query-endpoint mock matching one query parameter
pub async fn mount_query(server: &MockServer, param: (&str, &str), body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path("/dream_query"))
        .and(query_param(param.0, param.1))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(server)
        .await;
}

/// Mounts a download-endpoint mock for one token, expecting exactly
/// `expected_calls` requests
pub async fn mount_download(server: &MockServer, token: &str, body: Vec<u8>, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/dream_download"))
        .and(body_string(token))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Builds a retriever with all pacing disabled, pointed at a test server
pub fn unpaced_retriever(base_url: &str, directory: &Path) -> Retriever {
    RetrieverBuilder::new(base_url)
        .directory(directory.to_path_buf())
        .unpaced()
        .build()
        .expect("Failed to build retriever")
}

/// Serves a single chunked HTTP response that ends mid-transfer.
///
/// The listener answers exactly one request with the given chunks and then
/// closes the connection without the terminal chunk, which is how the dream
/// server drops long transfers. Returns the base URL to point a client at.
pub async fn spawn_truncating_server(chunks: Vec<Vec<u8>>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to read local address");

    let mut response =
        b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n".to_vec();
    for chunk in &chunks {
        response.extend_from_slice(format!("{:x}\r\n", chunk.len()).as_bytes());
        response.extend_from_slice(chunk);
        response.extend_from_slice(b"\r\n");
    }

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            // Drain the whole request before answering, so the client is
            // not still writing its body when the connection goes away.
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => {
                        request.extend_from_slice(&buf[..n]);
                        if request_complete(&request) {
                            break;
                        }
                    }
                }
            }
            let _ = socket.write_all(&response).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{addr}")
}

/// Whether a raw HTTP request has arrived in full (headers plus any
/// Content-Length-sized body)
fn request_complete(request: &[u8]) -> bool {
    let text = String::from_utf8_lossy(request);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let body_len = text[..header_end]
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())?
        })
        .unwrap_or(0);
    request.len() >= header_end + 4 + body_len
}
