use actix_web::{HttpResponse, get, post, web};

use crate::api::error::ApiError;
use crate::app::AppState;
use crate::model::judge::all_profiles;
use crate::model::precedent::{find_precedent, precedents};
use crate::model::{CasePayload, Judge, Mode};
use crate::service::arbitration::prompts::decision_schema;

fn parse_mode(value: &str) -> Result<Mode, ApiError> {
    Mode::parse(value).ok_or_else(|| {
        ApiError::BadRequest(format!(
            "Unknown mode '{}', expected 'compare' or 'advisory'",
            value
        ))
    })
}

fn parse_judge(value: &str) -> Result<Judge, ApiError> {
    Judge::parse(value).ok_or_else(|| {
        ApiError::BadRequest(format!(
            "Unknown judge '{}', expected 'reliability' or 'innovation'",
            value
        ))
    })
}

/// Validate, arbitrate and store one case
async fn decide(state: &AppState, payload: CasePayload) -> Result<HttpResponse, ApiError> {
    let payload = payload.validate().map_err(ApiError::BadRequest)?;

    let record = state.arbitration.arbitrate(&payload).await?;
    let record = state.store.store(record).await;

    Ok(HttpResponse::Ok().json(record.as_ref()))
}

/// Submit a case for arbitration
///
/// Always answers with a decision that satisfies the mode contract, whether
/// it came from inference or from the deterministic engine.
#[post("/v1/arbitrate")]
pub async fn arbitrate(
    state: web::Data<AppState>,
    payload: web::Json<CasePayload>,
) -> Result<HttpResponse, ApiError> {
    decide(&state, payload.into_inner()).await
}

#[get("/v1/decisions")]
pub async fn list_decisions(state: web::Data<AppState>) -> HttpResponse {
    let records = state.store.all().await;
    let records: Vec<_> = records.iter().map(|r| r.as_ref()).collect();
    HttpResponse::Ok().json(records)
}

/// Latest decision for one mode and judge
#[get("/v1/decisions/{mode}/{judge}")]
pub async fn get_decision(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (mode, judge) = path.into_inner();
    let mode = parse_mode(&mode)?;
    let judge = parse_judge(&judge)?;

    let record = state.store.get(mode, judge).await.ok_or_else(|| {
        ApiError::NotFound(format!(
            "No {} decision from the {} judge",
            mode.as_str(),
            judge.as_str()
        ))
    })?;

    Ok(HttpResponse::Ok().json(record.as_ref()))
}

#[get("/v1/judges")]
pub async fn list_judges() -> HttpResponse {
    HttpResponse::Ok().json(all_profiles())
}

#[get("/v1/precedents")]
pub async fn list_precedents() -> HttpResponse {
    HttpResponse::Ok().json(precedents())
}

/// Replay a built-in precedent through the regular arbitration path
#[post("/v1/precedents/{id}/arbitrate")]
pub async fn arbitrate_precedent(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let precedent =
        find_precedent(&id).ok_or_else(|| ApiError::NotFound(format!("Precedent '{}'", id)))?;

    tracing::debug!(precedent = precedent.id, "Replaying precedent");

    decide(&state, precedent.case).await
}

/// JSON Schema of the decision contract for a mode
#[get("/v1/schema/{mode}")]
pub async fn get_schema(path: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let mode = parse_mode(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(decision_schema(mode)))
}

/// Configure arbitration routes
///
/// Body deserialization failures are answered with the unified error body.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    )
    .service(arbitrate)
    .service(list_decisions)
    .service(get_decision)
    .service(list_judges)
    .service(list_precedents)
    .service(arbitrate_precedent)
    .service(get_schema);
}
