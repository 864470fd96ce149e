//! Lyrics lookup against lyrics.ovh
//!
//! This module provides:
//! - `OvhClient`, the HTTP client (timeout + optional LRU cache)
//! - `lookup`, which folds every result into a `LookupOutcome`

pub mod ovh;

pub use ovh::OvhClient;

/// Result of one lookup. Transport errors are values here, never faults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(String),
    NotFound,
    TransportFailure(String),
}

/// Look up lyrics for a song. One request, no retries.
pub async fn lookup(client: &OvhClient, song: &str, artist: &str) -> LookupOutcome {
    match client.fetch(song, artist).await {
        Ok(Some(lyrics)) => {
            tracing::info!(song, artist, "lyrics found");
            LookupOutcome::Found(lyrics)
        }
        Ok(None) => {
            tracing::info!(song, artist, "lyrics not found");
            LookupOutcome::NotFound
        }
        Err(e) => {
            tracing::warn!(song, artist, "lyrics lookup failed: {e:#}");
            LookupOutcome::TransportFailure(format!("{e:#}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LyricsConfig;
    use crate::test_support;
    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_found_returns_exact_text() {
        let text = "Yesterday, all my troubles seemed so far away";
        let base = test_support::lyrics_found(text).await;
        let client = test_support::client_for(&base);

        let outcome = lookup(&client, "Yesterday", "The Beatles").await;
        assert_eq!(outcome, LookupOutcome::Found(text.to_string()));
    }

    #[tokio::test]
    async fn test_empty_object_is_not_found() {
        let base = test_support::lyrics_stub(json!({})).await;
        let client = test_support::client_for(&base);

        assert_eq!(lookup(&client, "Yesterday", "The Beatles").await, LookupOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_blank_lyrics_is_not_found() {
        let base = test_support::lyrics_stub(json!({ "lyrics": "  \n" })).await;
        let client = test_support::client_for(&base);

        assert_eq!(lookup(&client, "Yesterday", "The Beatles").await, LookupOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_404_is_not_found() {
        let router = Router::new().route(
            "/v1/{artist}/{song}",
            get(|| async { (StatusCode::NOT_FOUND, Json(json!({ "error": "No lyrics found" }))) }),
        );
        let base = test_support::serve(router).await;
        let client = test_support::client_for(&base);

        assert_eq!(lookup(&client, "Nope", "Nobody").await, LookupOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_connection_error_is_transport_failure() {
        let base = test_support::dead_url().await;
        let client = test_support::client_for(&base);

        let outcome = lookup(&client, "Yesterday", "The Beatles").await;
        assert!(matches!(outcome, LookupOutcome::TransportFailure(_)));
    }

    #[tokio::test]
    async fn test_server_error_is_transport_failure() {
        let router = Router::new().route(
            "/v1/{artist}/{song}",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let base = test_support::serve(router).await;
        let client = test_support::client_for(&base);

        let outcome = lookup(&client, "Yesterday", "The Beatles").await;
        assert!(matches!(outcome, LookupOutcome::TransportFailure(_)));
    }

    #[tokio::test]
    async fn test_malformed_json_is_transport_failure() {
        let router = Router::new().route("/v1/{artist}/{song}", get(|| async { "<html>oops</html>" }));
        let base = test_support::serve(router).await;
        let client = test_support::client_for(&base);

        let outcome = lookup(&client, "Yesterday", "The Beatles").await;
        assert!(matches!(outcome, LookupOutcome::TransportFailure(_)));
    }

    #[tokio::test]
    async fn test_path_segments_are_escaped() {
        let router = Router::new().route(
            "/v1/{artist}/{song}",
            get(|Path((artist, song)): Path<(String, String)>| async move {
                Json(json!({ "lyrics": format!("{artist}|{song}") }))
            }),
        );
        let base = test_support::serve(router).await;
        let client = test_support::client_for(&base);

        let outcome = lookup(&client, "Sweet Child O' Mine", "Guns N' Roses").await;
        assert_eq!(
            outcome,
            LookupOutcome::Found("Guns N' Roses|Sweet Child O' Mine".to_string())
        );
    }

    #[tokio::test]
    async fn test_cache_skips_second_request() {
        let hits = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .route(
                "/v1/{artist}/{song}",
                get(|State(hits): State<Arc<AtomicUsize>>| async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Json(json!({ "lyrics": "la la la" }))
                }),
            )
            .with_state(hits.clone());
        let base = test_support::serve(router).await;
        let client = OvhClient::new(&LyricsConfig {
            base_url: base,
            timeout_secs: 5,
            cache_size: 8,
        })
        .unwrap();

        assert!(matches!(lookup(&client, "Yesterday", "The Beatles").await, LookupOutcome::Found(_)));
        assert!(matches!(lookup(&client, "yesterday", "THE BEATLES").await, LookupOutcome::Found(_)));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_slow_service_times_out() {
        let router = Router::new().route(
            "/v1/{artist}/{song}",
            get(|| async {
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                Json(json!({ "lyrics": "too late" }))
            }),
        );
        let base = test_support::serve(router).await;
        let client = OvhClient::new(&LyricsConfig {
            base_url: base,
            timeout_secs: 1,
            cache_size: 0,
        })
        .unwrap();

        let outcome = lookup(&client, "Yesterday", "The Beatles").await;
        assert!(matches!(outcome, LookupOutcome::TransportFailure(_)));
    }
}
