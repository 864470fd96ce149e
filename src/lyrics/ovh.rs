//! lyrics.ovh API client
//!
//! A single endpoint: `GET /v1/{artist}/{title}` answering `{"lyrics": "..."}`,
//! or 404 with `{"error": "No lyrics found"}` when the pair is unknown.

use crate::config::LyricsConfig;
use anyhow::Context;
use lru::LruCache;
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// lyrics.ovh API response
#[derive(Debug, Deserialize)]
struct OvhResponse {
    #[serde(default)]
    lyrics: Option<String>,
}

type CacheKey = (String, String);

struct Inner {
    http: reqwest::Client,
    base_url: String,
    cache: Option<Mutex<LruCache<CacheKey, String>>>,
}

/// lyrics.ovh API client
#[derive(Clone)]
pub struct OvhClient {
    inner: Arc<Inner>,
}

impl OvhClient {
    const USER_AGENT: &'static str = "Lyrix/0.1.0";

    pub fn new(cfg: &LyricsConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(Self::USER_AGENT)
            .timeout(Duration::from_secs(cfg.timeout_secs.max(1)))
            .build()
            .context("build reqwest client")?;

        let cache = NonZeroUsize::new(cfg.cache_size).map(|cap| Mutex::new(LruCache::new(cap)));

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                base_url: cfg.base_url.trim_end_matches('/').to_string(),
                cache,
            }),
        })
    }

    /// Fetch lyrics for a song. `Ok(None)` means the service has nothing for the pair.
    pub async fn fetch(&self, song: &str, artist: &str) -> anyhow::Result<Option<String>> {
        let key = cache_key(song, artist);
        if let Some(hit) = self.cached(&key) {
            tracing::debug!(song, artist, "lyrics cache hit");
            return Ok(Some(hit));
        }

        let url = format!(
            "{}/v1/{}/{}",
            self.inner.base_url,
            urlencoding::encode(artist),
            urlencoding::encode(song)
        );

        let response = self
            .inner
            .http
            .get(&url)
            .send()
            .await
            .context("send lyrics request")?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            anyhow::bail!("lyrics.ovh API error: {}", response.status());
        }

        let body: OvhResponse = response.json().await.context("parse lyrics json")?;
        let lyrics = body.lyrics.filter(|l| !l.trim().is_empty());

        if let Some(text) = &lyrics {
            self.remember(key, text.clone());
        }
        Ok(lyrics)
    }

    fn cached(&self, key: &CacheKey) -> Option<String> {
        let cache = self.inner.cache.as_ref()?;
        let mut cache = cache.lock().ok()?;
        cache.get(key).cloned()
    }

    fn remember(&self, key: CacheKey, lyrics: String) {
        if let Some(cache) = &self.inner.cache
            && let Ok(mut cache) = cache.lock()
        {
            cache.put(key, lyrics);
        }
    }
}

fn cache_key(song: &str, artist: &str) -> CacheKey {
    (song.to_lowercase(), artist.to_lowercase())
}
