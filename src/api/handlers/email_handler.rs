use axum::{Json, extract::State, response::IntoResponse};
use tracing::debug;
use validator::ValidateEmail;

use crate::{
    api::{app_state::AppState, dto::email_dto::*, extract::ApiJson},
    error::{AppError, Result},
    services::mail::OutgoingEmail,
};

fn validate_addresses(field: &str, addresses: &[String]) -> Result<()> {
    match addresses.iter().find(|addr| !addr.validate_email()) {
        Some(bad) => Err(AppError::Validation(format!(
            "{}: enter a valid email address ({})",
            field, bad
        ))),
        None => Ok(()),
    }
}

/// Send an email from the configured sender address
///
/// POST /api/v1/email
pub async fn send_email(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<EmailRequest>,
) -> Result<impl IntoResponse> {
    debug!("Sending email to {:?}: {}", request.to, request.subject);

    if request.to.is_empty() {
        return Err(AppError::Validation(
            "to: at least one recipient is required".to_string(),
        ));
    }
    validate_addresses("to", &request.to)?;
    validate_addresses("cc", &request.cc)?;
    validate_addresses("bcc", &request.bcc)?;

    let email = OutgoingEmail {
        from: state.from_address.clone(),
        to: request.to,
        cc: request.cc,
        bcc: request.bcc,
        subject: request.subject,
        body: request.body,
    };

    state.mailer.send(&email).await?;
    state.metrics.record_email();

    Ok(Json(EmailResponse { sent: true }))
}
