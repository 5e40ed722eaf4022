//! Backend entry point: wires the in-memory stores, seeds starter news,
//! and serves the news and notes sites.

use std::env;
use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use chrono::{Days, Utc};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use gazette::domain::News;
use gazette::domain::ports::NewsRepository;
use gazette::server::{self, DEFAULT_PAGE_SIZE, MemoryBackends, ServerConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    let key = match std::fs::read(&key_path) {
        Ok(bytes) => Key::derive_from(&bytes),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "session key unreadable, generating an ephemeral one");
                Key::generate()
            } else {
                return Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )));
            }
        }
    };

    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()
        .map_err(std::io::Error::other)?;

    let page_size = env::var("NEWS_PAGE_SIZE")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(DEFAULT_PAGE_SIZE);

    let (state, backends) = server::build_memory_state(page_size);
    seed_news(&backends).await;

    let config = ServerConfig::new(key, cookie_secure, SameSite::Lax, bind_addr)
        .with_page_size(page_size);
    server::run(config, state).await
}

/// Starter content so a fresh instance has something on the home page.
async fn seed_news(backends: &MemoryBackends) {
    let today = Utc::now().date_naive();
    let seeds = [
        ("Service is live", "The news site is up and accepting comments."),
        ("Notes have arrived", "Signed-in readers can keep personal notes."),
    ];
    for (offset, (title, text)) in seeds.into_iter().enumerate() {
        let date = today - Days::new(offset as u64);
        if let Err(error) = backends.news.insert(&News::new(title, text, date)).await {
            warn!(%error, "failed to seed news");
        }
    }
}
