use mongodb::bson::{doc, Document};

use crate::database::DocumentStore;
use crate::models::{json_to_document, UpdateSummary, User, ADMIN_ROLE, USERS_COLLECTION};
use crate::services::auth_service::Claims;
use crate::utils::AppError;

/// Stored user documents carry no schema; a `role` that is not a string reads as no role.
pub async fn find_user(store: &dyn DocumentStore, email: &str) -> Result<Option<User>, AppError> {
    let document = store.find_one(USERS_COLLECTION, doc! { "email": email }).await?;
    Ok(document.map(|document| User {
        email: document.get_str("email").unwrap_or(email).to_string(),
        role: document.get_str("role").ok().map(String::from),
    }))
}

/// Body fields a caller may write onto their own user document.
fn profile_fields(email: &str, body: serde_json::Value) -> Result<Document, AppError> {
    let mut fields = json_to_document(body)?;
    fields.remove("_id");
    fields.remove("role");
    fields.insert("email", email);
    Ok(fields)
}

/// Upserts the user keyed by `email`.
///
/// Creating a new user is open. Overwriting an existing one requires `caller` to be a
/// verified token for that same email.
pub async fn upsert_user(
    store: &dyn DocumentStore,
    email: &str,
    body: serde_json::Value,
    caller: Result<Claims, AppError>,
) -> Result<UpdateSummary, AppError> {
    let fields = profile_fields(email, body)?;

    if find_user(store, email).await?.is_some() {
        let claims = caller?;
        if claims.email != email {
            return Err(AppError::Forbidden("Token does not match user".into()));
        }
    }

    store
        .set_fields(USERS_COLLECTION, doc! { "email": email }, fields, true)
        .await
}

pub async fn list_users(store: &dyn DocumentStore) -> Result<Vec<Document>, AppError> {
    store.find(USERS_COLLECTION, doc! {}).await
}

pub async fn is_admin(store: &dyn DocumentStore, email: &str) -> Result<bool, AppError> {
    Ok(find_user(store, email).await?.map(|u| u.is_admin()).unwrap_or(false))
}

/// Passes only when a stored user with `email` has the admin role.
pub async fn require_admin(store: &dyn DocumentStore, email: &str) -> Result<(), AppError> {
    match find_user(store, email).await? {
        Some(user) if user.is_admin() => Ok(()),
        Some(_) => Err(AppError::Forbidden("Admin role required".into())),
        None => Err(AppError::Forbidden("User not found".into())),
    }
}

pub async fn make_admin(store: &dyn DocumentStore, email: &str) -> Result<UpdateSummary, AppError> {
    let result = store
        .set_fields(
            USERS_COLLECTION,
            doc! { "email": email },
            doc! { "role": ADMIN_ROLE },
            false,
        )
        .await?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(format!("User {}", email)));
    }
    Ok(result)
}
