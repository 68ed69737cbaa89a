use axum::{
    Form, Json,
    extract::{Path, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, warn};

use sweepr_core::{LivenessReport, RegistryError};

use super::{ApiResult, AppState, pages};

pub async fn index(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let cidrs = state.registry.lock().await.load()?;
    Ok(Html(pages::index(&cidrs)))
}

pub async fn manage_page(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let cidrs = state.registry.lock().await.load()?;
    Ok(Html(pages::manage(&cidrs)))
}

#[derive(Debug, Deserialize)]
pub struct ManageForm {
    pub action: Option<String>,
    pub cidr: Option<String>,
}

/// Adds or deletes a network, then sends the browser back to the manage page.
///
/// Invalid networks are dropped without an error page.
pub async fn manage_submit(
    State(state): State<AppState>,
    Form(form): Form<ManageForm>,
) -> ApiResult<Redirect> {
    let registry = state.registry.lock().await;
    let cidr = form.cidr.as_deref().unwrap_or_default();

    match form.action.as_deref() {
        Some("add") => match registry.add(cidr) {
            Ok(true) => info!("Registered {cidr}"),
            Ok(false) => {}
            Err(RegistryError::InvalidNetworkSpec(e)) => warn!("Ignoring network: {e}"),
            Err(e) => return Err(e.into()),
        },
        Some("delete") => {
            if registry.remove(cidr)? {
                info!("Removed {cidr}");
            }
        }
        other => warn!("Unknown manage action {other:?}"),
    }

    Ok(Redirect::to("/manage"))
}

pub async fn scan(
    State(state): State<AppState>,
    Path(cidr): Path<String>,
) -> ApiResult<Json<LivenessReport>> {
    let report = state.scanner.scan(&cidr).await?;
    Ok(Json(report))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
