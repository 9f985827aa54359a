// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the reaction client against a canned-response HTTP server.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::reaction::{ReactionClient, ReactionError};

/// Serve exactly one request with a canned response, returning the raw
/// request bytes for inspection.
async fn one_shot_server(response: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        while !request_complete(&request) {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
        }

        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        String::from_utf8_lossy(&request).to_string()
    });

    (format!("http://{}", addr), handle)
}

/// True once `buf` holds the full head and content-length worth of body.
fn request_complete(buf: &[u8]) -> bool {
    let text = String::from_utf8_lossy(buf);
    let Some(head_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);
    buf.len() >= head_end + 4 + content_length
}

fn response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    )
}

#[tokio::test]
async fn no_content_is_success() {
    let (url, server) = one_shot_server(
        "HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n".to_string(),
    )
    .await;

    let client = ReactionClient::new(&url, "secret-token");
    client.create("n1", "👍").await.unwrap();

    let request = server.await.unwrap();
    let lowered = request.to_lowercase();
    assert!(request.starts_with("POST /api/notes/reactions/create HTTP/1.1"));
    assert!(lowered.contains("authorization: bearer secret-token"));
    assert!(lowered.contains("content-type: application/json"));
    assert!(request.contains(r#""noteId":"n1""#));
    assert!(request.contains(r#""reaction":"👍""#));
}

#[tokio::test]
async fn api_rejection_with_code() {
    let (url, _server) = one_shot_server(response(
        "400 Bad Request",
        r#"{"error":{"message":"Note not found.","code":"NOTE_NOT_FOUND"}}"#,
    ))
    .await;

    let client = ReactionClient::new(&url, "secret-token");
    let err = client.create("n1", "👍").await.unwrap_err();

    assert!(matches!(err, ReactionError::Api { status: 400, .. }));
    assert_eq!(
        err.to_string(),
        "API error: Note not found. (Code: NOTE_NOT_FOUND) (Status: 400)"
    );
}

#[tokio::test]
async fn api_rejection_without_code() {
    let (url, _server) = one_shot_server(response(
        "403 Forbidden",
        r#"{"error":{"message":"Your app does not have the necessary permissions."}}"#,
    ))
    .await;

    let client = ReactionClient::new(&url, "secret-token");
    let err = client.create("n1", "👍").await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "API error: Your app does not have the necessary permissions. (Status: 403)"
    );
}

#[tokio::test]
async fn unparseable_error_body_carries_the_raw_body() {
    let (url, _server) =
        one_shot_server(response("500 Internal Server Error", "everything is on fire")).await;

    let client = ReactionClient::new(&url, "secret-token");
    let err = client.create("n1", "👍").await.unwrap_err();

    match err {
        ReactionError::UnexpectedResponse { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "everything is on fire");
        }
        other => panic!("expected UnexpectedResponse, got {:?}", other),
    }
}

#[tokio::test]
async fn success_status_other_than_204_is_a_failure() {
    let (url, _server) = one_shot_server(response("200 OK", "{}")).await;

    let client = ReactionClient::new(&url, "secret-token");
    let err = client.create("n1", "👍").await.unwrap_err();

    // 200 with a non-error body still fails; only 204 acknowledges.
    assert!(matches!(
        err,
        ReactionError::UnexpectedResponse { status: 200, .. }
    ));
}

#[tokio::test]
async fn refused_connection_is_a_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = ReactionClient::new(format!("http://127.0.0.1:{}", port), "secret-token");
    let err = client.create("n1", "👍").await.unwrap_err();

    assert!(matches!(err, ReactionError::Request(_)));
}

#[tokio::test]
async fn base_url_trailing_slash_is_trimmed() {
    let (url, server) = one_shot_server(
        "HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n".to_string(),
    )
    .await;

    let client = ReactionClient::new(format!("{}/", url), "secret-token");
    client.create("n1", "👍").await.unwrap();

    let request = server.await.unwrap();
    // No double slash in the request path.
    assert!(request.starts_with("POST /api/notes/reactions/create HTTP/1.1"));
}
