//! Page shells.
//!
//! The browser UI is served elsewhere; these give the route guard real
//! destinations to protect and redirect to.

use axum::{
    extract::OriginalUri,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use crate::api::AppState;

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { shell("Início") }))
        .route("/auth", get(|| async { shell("Entrar") }))
        .route("/login", get(|| async { shell("Entrar") }))
        .route("/register", get(|| async { shell("Cadastro") }))
        .route("/access-denied", get(access_denied))
        .route("/dashboard", get(|| async { shell("Painel") }))
        .route("/dashboard/*rest", get(|| async { shell("Painel") }))
        .route("/app", get(|| async { shell("Administração") }))
        .route("/app/*rest", get(|| async { shell("Administração") }))
        .route("/admin-tools", get(|| async { shell("Ferramentas") }))
        .route("/admin-tools/*rest", get(|| async { shell("Ferramentas") }))
}

async fn access_denied() -> impl IntoResponse {
    (StatusCode::FORBIDDEN, shell("Acesso negado"))
}

/// Fallback for unknown paths.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    tracing::debug!(path = %uri.path(), "No route matched");
    (StatusCode::NOT_FOUND, shell("Página não encontrada"))
}

fn shell(title: &str) -> Html<String> {
    Html(format!(
        "<!doctype html><html lang=\"pt-BR\"><head><meta charset=\"utf-8\">\
         <title>{title}</title></head><body><main><h1>{title}</h1></main></body></html>"
    ))
}
