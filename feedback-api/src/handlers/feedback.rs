use crate::error::{AppError, AppResult};
use crate::handlers::{AppState, FeedbackBackend};
use crate::mapping::{SubmitTarget, Submission};
use crate::models::{
    FeedbackStatusResponse, FetchFeedbackQuery, SubmitFeedbackResponse, SUBMITTED_MESSAGE,
};
use crate::schema::{
    FeedbackType, FEEDBACK_ID_COLUMN, FEEDBACK_TYPE_COLUMN, STATUS_COLUMN, STATUS_PENDING,
    TUTOR_NAME_COLUMN,
};
use actix_web::{http::Method, web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

/// Single entry point for `/api/feedback`. Preflight is answered before the
/// configuration check, which in turn runs before method dispatch.
pub async fn feedback(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    if req.method() == Method::OPTIONS {
        return Ok(HttpResponse::Ok().finish());
    }

    let backend = state.backend()?;

    if req.method() == Method::GET {
        fetch_feedback(backend, req.query_string()).await
    } else if req.method() == Method::POST {
        submit_feedback(backend, &body).await
    } else {
        warn!(method = %req.method(), "Unsupported method on feedback endpoint");
        Err(AppError::MethodNotAllowed)
    }
}

fn invalid(message: &str) -> AppError {
    warn!(reason = message, "Rejected feedback request");
    AppError::InvalidRequest(message.to_string())
}

async fn fetch_feedback(backend: &FeedbackBackend, query: &str) -> AppResult<HttpResponse> {
    let query = web::Query::<FetchFeedbackQuery>::from_query(query)
        .map_err(|_| invalid("Invalid query string"))?
        .into_inner();

    let raw_id = query
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| invalid("Missing feedback ID"))?;
    let feedback_id: u64 = raw_id
        .parse()
        .map_err(|_| invalid("Invalid feedback ID"))?;
    let requested_type = query
        .feedback_type
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| invalid("Missing feedback type"))?;
    let feedback_type =
        FeedbackType::parse(requested_type).ok_or_else(|| invalid("Invalid feedback type"))?;

    let table = backend.tables.for_type(feedback_type);
    let formula = format!("{{{}}} = {}", FEEDBACK_ID_COLUMN, feedback_id);
    info!(feedback_id, feedback_type = %feedback_type, table, "Fetching feedback record");

    let records = backend
        .store
        .find_records(table, &formula)
        .await
        .map_err(|e| {
            error!(
                store = backend.store.store_name(),
                error = %e,
                feedback_id,
                "Store query failed"
            );
            match AppError::from(e) {
                AppError::Upstream { details, .. } => AppError::Upstream {
                    message: "Failed to fetch feedback record".to_string(),
                    details,
                },
                other => other,
            }
        })?;

    if records.len() > 1 {
        warn!(
            feedback_id,
            matches = records.len(),
            "Several records share a feedback ID; using the first"
        );
    }
    let record = records.into_iter().next().ok_or_else(|| {
        warn!(feedback_id, "Feedback record not found");
        AppError::NotFound("Feedback record not found".to_string())
    })?;

    let response = FeedbackStatusResponse {
        feedback_type: record
            .text_field(FEEDBACK_TYPE_COLUMN)
            .and_then(FeedbackType::parse)
            .unwrap_or(feedback_type),
        status: record
            .text_field(STATUS_COLUMN)
            .unwrap_or(STATUS_PENDING)
            .to_string(),
        tutor_name: record.text_field(TUTOR_NAME_COLUMN).map(str::to_string),
        record_id: record.id,
    };

    Ok(HttpResponse::Ok().json(response))
}

async fn submit_feedback(backend: &FeedbackBackend, body: &[u8]) -> AppResult<HttpResponse> {
    let form: Map<String, Value> =
        serde_json::from_slice(body).map_err(|_| invalid("Invalid JSON body"))?;
    let payload = Value::Object(form.clone());
    debug!(payload = %payload, "Received feedback submission");

    let submission = Submission::validate(form).inspect_err(|e| {
        warn!(reason = %e, "Rejected feedback submission");
    })?;

    let table = backend.tables.for_type(submission.feedback_type);
    let fields = submission.record_fields(Utc::now());
    let mapped = Value::Object(fields.clone());
    debug!(payload = %mapped, table, "Mapped feedback record");

    let record_id = match &submission.target {
        SubmitTarget::Update { record_id } => {
            info!(
                record_id = %record_id,
                feedback_type = %submission.feedback_type,
                "Updating feedback record"
            );
            backend
                .store
                .update_record(table, record_id, fields)
                .await
                .map_err(|e| {
                    error!(
                        store = backend.store.store_name(),
                        error = %e,
                        record_id = %record_id,
                        "Store update failed"
                    );
                    AppError::from_store(e, "Failed to update feedback")
                })?;
            None
        }
        SubmitTarget::Create { .. } => {
            info!(feedback_type = %submission.feedback_type, "Creating feedback record");
            let record = backend
                .store
                .create_record(table, fields)
                .await
                .map_err(|e| {
                    error!(
                        store = backend.store.store_name(),
                        error = %e,
                        "Store create failed"
                    );
                    AppError::from_store(e, "Failed to save feedback")
                })?;
            Some(record.id)
        }
    };

    Ok(HttpResponse::Ok().json(SubmitFeedbackResponse {
        success: true,
        message: SUBMITTED_MESSAGE.to_string(),
        record_id,
    }))
}
