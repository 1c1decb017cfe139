//! Contact route handlers.
//!
//! Each handler validates presence of the write fields (if any), runs one
//! repository call, and serializes the result.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Serialize;
use tracing::instrument;

use contact_book_core::{Contact, ContactFields, ContactId, ContactInput};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Response for a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

/// Parse a path segment as a contact id.
///
/// A segment that is not an `i32` cannot name a stored contact.
fn parse_id(raw: &str) -> Result<ContactId> {
    raw.parse().map_err(|_| AppError::contact_not_found())
}

/// Unwrap a JSON body and run the presence check.
fn validated(body: std::result::Result<Json<ContactInput>, JsonRejection>) -> Result<ContactFields> {
    let Json(input) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected request body");
        AppError::BadRequest("Invalid JSON body".to_string())
    })?;

    Ok(input.validate()?)
}

/// List all contacts.
///
/// GET /contacts
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Contact>>> {
    let contacts = state
        .contacts()
        .list()
        .await
        .map_err(AppError::store("Failed to fetch contacts"))?;

    Ok(Json(contacts))
}

/// Get a single contact.
///
/// GET /contacts/{id}
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Contact>> {
    let id = parse_id(&id)?;

    state
        .contacts()
        .get(id)
        .await
        .map_err(AppError::store("Failed to fetch contact"))?
        .map(Json)
        .ok_or_else(AppError::contact_not_found)
}

/// Create a contact.
///
/// POST /contacts
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<ContactInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Contact>)> {
    let fields = validated(body)?;

    let contact = state
        .contacts()
        .create(&fields)
        .await
        .map_err(AppError::store("Failed to create contact"))?;

    tracing::info!(contact_id = %contact.id, "Contact created");
    Ok((StatusCode::CREATED, Json(contact)))
}

/// Replace a contact's fields.
///
/// PUT /contacts/{id}
///
/// The body is checked before the id is looked up, so an incomplete body
/// yields 400 even for an unknown id.
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: std::result::Result<Json<ContactInput>, JsonRejection>,
) -> Result<Json<Contact>> {
    let fields = validated(body)?;
    let id = parse_id(&id)?;

    let contact = state
        .contacts()
        .update(id, &fields)
        .await
        .map_err(AppError::store("Failed to update contact"))?
        .ok_or_else(AppError::contact_not_found)?;

    tracing::info!(contact_id = %contact.id, "Contact updated");
    Ok(Json(contact))
}

/// Delete a contact.
///
/// DELETE /contacts/{id}
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let id = parse_id(&id)?;

    let deleted = state
        .contacts()
        .delete(id)
        .await
        .map_err(AppError::store("Failed to delete contact"))?;

    if !deleted {
        return Err(AppError::contact_not_found());
    }

    tracing::info!(contact_id = %id, "Contact deleted");
    Ok(Json(DeleteResponse {
        message: "Contact deleted successfully",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12").ok(), Some(ContactId::new(12)));
        assert!(matches!(parse_id("abc"), Err(AppError::NotFound(_))));
        assert!(matches!(parse_id("1.5"), Err(AppError::NotFound(_))));
    }
}
