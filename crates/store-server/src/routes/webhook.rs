//! Webhook command dispatch.
//!
//! The chat integration POSTs a command payload here. Three commands map
//! 1:1 onto resolver operations against the first configured repository,
//! always anonymously. `add_repository` never touches the resolver; it
//! registers a new store URL by calling back the payload's hook.

use std::collections::HashMap;

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Value, json};
use store_git::Credentials;

use crate::AppState;
use crate::error::ApiErr;

/// Repositories configured for the webhook caller.
#[derive(Debug, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub repositories: Vec<String>,
}

/// Inbound command payload from the chat integration.
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub payload_action: String,
    #[serde(default)]
    pub payload: HashMap<String, Value>,
    #[serde(default, rename = "authorization_token")]
    pub token: String,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub hook: String,
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub form: Option<HashMap<String, Value>>,
}

fn param(payload: &WebhookPayload, key: &str) -> Result<String, ApiErr> {
    payload
        .payload
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ApiErr::bad_request(format!("missing '{key}' in payload")))
}

/// POST /webhook — dispatch one chat command.
pub async fn post_webhook(
    State(state): State<AppState>,
    Json(payload): Json<WebhookPayload>,
) -> Result<Response, ApiErr> {
    if payload.payload_action == "add_repository" {
        return add_repository(&state, &payload).await;
    }

    let store = payload
        .settings
        .repositories
        .first()
        .cloned()
        .ok_or_else(|| ApiErr::bad_request("no repository configured"))?;
    let command = payload
        .payload
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiErr::bad_request("missing command name"))?;
    let resolver = state.resolver;

    match command {
        "get_extension_list" => {
            let content = tokio::task::spawn_blocking(move || {
                resolver.list_store(&store, &Credentials::Anonymous)
            })
            .await
            .map_err(|e| ApiErr::internal(format!("task failed: {e}")))??;
            Ok(Json(content).into_response())
        }
        "get_extension_version" => {
            let extension = param(&payload, "extension")?;
            let content =
                tokio::task::spawn_blocking(move || resolver.list_versions(&store, &extension))
                    .await
                    .map_err(|e| ApiErr::internal(format!("task failed: {e}")))??;
            Ok(Json(content).into_response())
        }
        "checkout_extension" => {
            let extension = param(&payload, "extension")?;
            let version = param(&payload, "version")?;
            let content = tokio::task::spawn_blocking(move || {
                resolver.checkout(&store, &extension, &version, &Credentials::Anonymous)
            })
            .await
            .map_err(|e| ApiErr::internal(format!("task failed: {e}")))??;
            Ok(Json(content).into_response())
        }
        other => Err(ApiErr::bad_request(format!("unknown command '{other}'"))),
    }
}

/// Register a new store URL by PATCHing it back to the payload's hook.
///
/// With a submitted form the hook is called and a confirmation intent is
/// returned on success; otherwise the caller gets a form intent asking
/// for the URL.
async fn add_repository(state: &AppState, payload: &WebhookPayload) -> Result<Response, ApiErr> {
    let url = payload
        .form
        .as_ref()
        .and_then(|form| form.get("url"))
        .and_then(Value::as_str);

    if let Some(url) = url {
        let body = json!({"settings": {"repositories": [url]}});
        let response = state
            .http
            .patch(&payload.hook)
            .bearer_auth(&payload.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiErr::internal(format!("hook callback failed: {e}")))?;

        if response.status().is_success() {
            return Ok(Json(json!({
                "intent": {"form": null, "info": {"message": "Repository was added."}}
            }))
            .into_response());
        }
        tracing::warn!(status = %response.status(), "hook rejected repository registration");
    }

    Ok(Json(json!({
        "intent": {
            "form": {
                "command": payload.command,
                "schema": {"properties": {"url": {"type": "string"}}}
            }
        }
    }))
    .into_response())
}
