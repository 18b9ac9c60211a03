//! Preview server for a built site.
//!
//! Serves the static output directory and puts the locale-redirect filter in
//! front of it: requests without a locale prefix get a temporary redirect to
//! the best `Accept-Language` match. The search route is answered dynamically
//! from the emitted search index.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, Request, State},
    handler::HandlerWithoutStateExt,
    http::{StatusCode, header},
    middleware::{self, Next},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use log::{info, warn};
use serde::Deserialize;
use tokio::fs;
use tower_http::services::ServeDir;

use duckov_wiki::i18n::{Dictionaries, Locale, negotiate};
use duckov_wiki::search::{SearchRecord, search};
use duckov_wiki::{WikiError, seo};

use crate::pages;

#[derive(Clone)]
struct AppState {
    dist: PathBuf,
    dicts: Arc<Dictionaries>,
}

pub async fn serve(
    dist: PathBuf,
    locales: PathBuf,
    port: u16,
    host: bool,
) -> Result<(), WikiError> {
    let dicts = Arc::new(Dictionaries::load(&locales)?);
    let state = AppState {
        dist: dist.clone(),
        dicts,
    };

    async fn handle_404(dist_dir: PathBuf) -> impl IntoResponse {
        let content = match fs::read_to_string(dist_dir.join("404.html")).await {
            Ok(custom_content) => custom_content,
            Err(_) => format!("<h1>404</h1><p>{} has nothing here.</p>", seo::SITE_NAME),
        };

        (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            content,
        )
            .into_response()
    }

    let dist_dir_clone = dist.clone();
    let service = (move || handle_404(dist_dir_clone.clone())).into_service();
    let serve_dir = ServeDir::new(dist).not_found_service(service);

    let router = Router::new()
        .route("/{locale}/search", get(search_handler))
        .fallback_service(serve_dir)
        .layer(middleware::from_fn(locale_redirect))
        .with_state(state);

    let addr = if host {
        IpAddr::from([0, 0, 0, 0])
    } else {
        IpAddr::from([127, 0, 0, 1])
    };
    let socket_addr = SocketAddr::new(addr, port);

    let listener = tokio::net::TcpListener::bind(socket_addr).await?;
    info!(target: "serve", "Listening on http://{}", socket_addr);

    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}

/// Redirects locale-less page requests to `/{locale}{path}`, picked from the
/// request's `Accept-Language` header. Paths that already carry a locale
/// prefix and asset-looking paths (anything with a file extension) pass
/// through untouched. Temporary redirect, so method and body survive.
async fn locale_redirect(req: Request, next: Next) -> Response {
    let path = req.uri().path();
    if has_locale_prefix(path) || is_asset_path(path) {
        return next.run(req).await;
    }

    let header_value = req
        .headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    let locale = negotiate(header_value);

    let target = match req.uri().query() {
        Some(query) => format!("/{}{}?{}", locale, path, query),
        None => format!("/{}{}", locale, path),
    };

    Redirect::temporary(&target).into_response()
}

/// Exact first-segment match against the supported locale set. `/enigma`
/// does not count as an `en` prefix.
fn has_locale_prefix(path: &str) -> bool {
    let first = path.trim_start_matches('/').split('/').next().unwrap_or("");
    first.parse::<Locale>().is_ok()
}

fn is_asset_path(path: &str) -> bool {
    path.rsplit('/').next().is_some_and(|segment| segment.contains('.'))
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

async fn search_handler(
    Path(locale): Path<String>,
    Query(query): Query<SearchQuery>,
    State(state): State<AppState>,
) -> Response {
    let Ok(locale) = locale.parse::<Locale>() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let records = load_search_index(&state.dist, locale).await;
    let results = search(&query.q, &records);

    Html(pages::search_page(locale, &state.dicts, &query.q, &results).into_string())
        .into_response()
}

async fn load_search_index(dist: &std::path::Path, locale: Locale) -> Vec<SearchRecord> {
    let path = dist.join(locale.as_str()).join("search-index.json");

    match fs::read_to_string(&path).await {
        Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!(target: "serve", "Invalid search index {}: {}", path.display(), err);
            Vec::new()
        }),
        Err(err) => {
            warn!(target: "serve", "Missing search index {}: {}", path.display(), err);
            Vec::new()
        }
    }
}
