//! HTTP surface: `POST /api/extract-lyrics`.

use crate::config::Config;
use crate::lyrics::OvhClient;
use crate::pipeline::{self, ExtractReply, Upload};
use anyhow::Context;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};

#[derive(Clone)]
struct AppState {
    lyrics: OvhClient,
}

pub fn router(lyrics: OvhClient, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/api/extract-lyrics", post(extract_lyrics))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(AppState { lyrics })
}

pub async fn serve(cfg: &Config) -> anyhow::Result<()> {
    let lyrics = OvhClient::new(&cfg.lyrics)?;
    let app = router(lyrics, cfg.server.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(&cfg.server.bind)
        .await
        .with_context(|| format!("bind {}", cfg.server.bind))?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve http")?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("cannot listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}

async fn extract_lyrics(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let mut multipart = match multipart {
        Ok(m) => m,
        Err(e) => {
            tracing::warn!("rejecting non-multipart upload: {e}");
            return reply(ExtractReply::Failed);
        }
    };

    let upload = match read_file_field(&mut multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => return reply(ExtractReply::NoFile),
        Err(e) => {
            tracing::error!("error processing audio: {e:#}");
            return reply(ExtractReply::Failed);
        }
    };

    reply(pipeline::extract_lyrics(&state.lyrics, upload).await)
}

/// The first non-empty `file` field, if any.
async fn read_file_field(multipart: &mut Multipart) -> anyhow::Result<Option<Upload>> {
    while let Some(field) = multipart.next_field().await.context("read multipart field")? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let media_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.context("read upload body")?;
        if bytes.is_empty() {
            continue;
        }
        return Ok(Some(Upload {
            bytes: bytes.to_vec(),
            media_type,
            file_name,
        }));
    }
    Ok(None)
}

fn reply(reply: ExtractReply) -> Response {
    let status = match reply {
        ExtractReply::NoFile => StatusCode::BAD_REQUEST,
        ExtractReply::Failed => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::OK,
    };
    (status, Json(reply.to_json())).into_response()
}
