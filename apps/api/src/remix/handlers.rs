//! Axum route handlers for the remix relay.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::CompletionTarget;
use crate::remix::platforms::{PlatformGuide, DEFAULT_PLATFORM};
use crate::remix::prompts::{build_prompt, PERSONA};
use crate::state::AppState;

/// Longest accepted content, counted in characters after trimming.
pub const MAX_CONTENT_CHARS: usize = 10_000;

/// Returned in place of an empty completion.
pub const EMPTY_RESULT_FALLBACK: &str = "抱歉，AI 没有返回结果，请稍后重试。";

const MSG_BAD_BODY: &str = "请求体格式错误，请提交 JSON。";
const MSG_MISSING_CONTENT: &str = "请输入要转换的原始内容。";
const MSG_MISSING_KEY: &str = "请先在页面配置 API Key 或设置环境变量。";
const MSG_EMPTY_CONTENT: &str = "内容不能为空。";
const MSG_CONTENT_TOO_LONG: &str = "内容过长，请控制在 10000 字以内。";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Body of `POST /api/generate`.
///
/// `content` and `platform` are kept as raw JSON so a wrong type is reported
/// as a missing field (content) or silently falls back (platform).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub platform: Option<Value>,
    #[serde(default)]
    pub api_config: Option<ApiConfig>,
}

/// Per-request overrides for the upstream endpoint. Blank values count as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_base: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub result: String,
}

#[derive(Debug, Serialize)]
pub struct PlatformsResponse {
    pub platforms: Vec<PlatformGuide>,
    pub default: &'static str,
}

/// A request that passed validation, with every fallback applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    pub target: CompletionTarget,
    pub platform: Option<String>,
    /// Trimmed user content.
    pub content: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

/// First non-blank value among the candidates, trimmed.
fn first_non_blank<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

/// Validates the payload and resolves key, endpoint and model.
///
/// Check order: content present and a string, then an API key is resolvable,
/// then trimmed content is non-empty and within `MAX_CONTENT_CHARS`.
pub fn resolve_request(req: GenerateRequest, config: &Config) -> Result<ResolvedRequest, AppError> {
    let content = match req.content {
        Some(Value::String(s)) if !s.is_empty() => s,
        _ => return Err(AppError::Validation(MSG_MISSING_CONTENT.to_string())),
    };

    let api_config = req.api_config.unwrap_or_default();

    let api_key = first_non_blank([
        api_config.api_key.as_deref(),
        config.default_api_key.as_deref(),
    ])
    .ok_or_else(|| AppError::Validation(MSG_MISSING_KEY.to_string()))?;

    let api_base = first_non_blank([
        api_config.api_base.as_deref(),
        Some(config.default_api_base.as_str()),
    ])
    .unwrap_or_else(|| crate::config::DEFAULT_API_BASE.to_string());

    let model = first_non_blank([
        api_config.model.as_deref(),
        Some(config.default_model.as_str()),
    ])
    .unwrap_or_else(|| crate::config::DEFAULT_MODEL.to_string());

    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(MSG_EMPTY_CONTENT.to_string()));
    }
    if trimmed.chars().count() > MAX_CONTENT_CHARS {
        return Err(AppError::Validation(MSG_CONTENT_TOO_LONG.to_string()));
    }

    let platform = match req.platform {
        Some(Value::String(key)) => Some(key),
        _ => None,
    };

    Ok(ResolvedRequest {
        target: CompletionTarget {
            api_base,
            api_key,
            model,
        },
        platform,
        content: trimmed.to_string(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/generate
///
/// Validates the payload, builds the platform prompt and relays it to the
/// configured LLM endpoint. One outbound call, no retries.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::Validation(MSG_CONTENT_TOO_LONG.to_string())
        } else {
            AppError::Validation(MSG_BAD_BODY.to_string())
        }
    })?;

    let resolved = resolve_request(request, &state.config)?;
    let guide = state.guides.resolve(resolved.platform.as_deref());
    let prompt = build_prompt(guide, &resolved.content);

    info!(
        platform = guide.key,
        model = %resolved.target.model,
        content_chars = resolved.content.chars().count(),
        timeout_ms = state.llm.timeout().as_millis() as u64,
        "Relaying remix request"
    );

    let completion = state
        .llm
        .complete(&resolved.target, PERSONA, &prompt)
        .await?;

    let result = completion
        .first_text()
        .unwrap_or(EMPTY_RESULT_FALLBACK)
        .to_string();

    Ok(Json(GenerateResponse { result }))
}

/// GET /api/platforms
///
/// Lists the selectable platforms in display order.
pub async fn handle_platforms(State(state): State<AppState>) -> Json<PlatformsResponse> {
    Json(PlatformsResponse {
        platforms: state.guides.all().to_vec(),
        default: DEFAULT_PLATFORM,
    })
}
