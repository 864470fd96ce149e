//! Local HTTP stubs for tests.

use crate::config::LyricsConfig;
use crate::lyrics::OvhClient;
use axum::Router;
use axum::routing::get;
use axum::Json;
use serde_json::json;

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A lyrics service that answers every pair with the same body.
pub async fn lyrics_stub(body: serde_json::Value) -> String {
    let router = Router::new().route(
        "/v1/{artist}/{song}",
        get(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    );
    serve(router).await
}

/// A lyrics service that knows `lyrics` for every pair.
pub async fn lyrics_found(lyrics: &str) -> String {
    lyrics_stub(json!({ "lyrics": lyrics })).await
}

/// A base URL nothing listens on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn client_for(base_url: &str) -> OvhClient {
    OvhClient::new(&LyricsConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        cache_size: 0,
    })
    .unwrap()
}

/// WAV bytes (one second of 8 kHz mono silence) carrying a RIFF INFO list.
///
/// `tags` are INFO chunk ids and values, e.g. `(*b"INAM", "Yesterday")`.
pub fn wav_with_info(tags: &[([u8; 4], &str)]) -> Vec<u8> {
    let mut fmt = Vec::new();
    fmt.extend_from_slice(&1u16.to_le_bytes()); // PCM
    fmt.extend_from_slice(&1u16.to_le_bytes()); // channels
    fmt.extend_from_slice(&8000u32.to_le_bytes()); // sample rate
    fmt.extend_from_slice(&16000u32.to_le_bytes()); // byte rate
    fmt.extend_from_slice(&2u16.to_le_bytes()); // block align
    fmt.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

    let data = vec![0u8; 16000];

    let mut info = b"INFO".to_vec();
    for (id, value) in tags {
        let mut bytes = value.as_bytes().to_vec();
        bytes.push(0);
        push_chunk(&mut info, id, &bytes);
    }

    let mut body = b"WAVE".to_vec();
    push_chunk(&mut body, b"fmt ", &fmt);
    push_chunk(&mut body, b"data", &data);
    if !tags.is_empty() {
        push_chunk(&mut body, b"LIST", &info);
    }

    let mut out = b"RIFF".to_vec();
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(&body);
    out
}

fn push_chunk(out: &mut Vec<u8>, id: &[u8; 4], payload: &[u8]) {
    out.extend_from_slice(id);
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(payload);
    if payload.len() % 2 == 1 {
        out.push(0);
    }
}
