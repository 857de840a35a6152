use std::path::PathBuf;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::dependencies::{CommonParameters, Depends};
use crate::http::extract::{ValidJson, ValidQuery};
use crate::http::server::AppState;
use crate::models::{EmailBody, User, UserDetails, UserIn, UserTypeQuery};
use crate::tasks::{write_notification, BackgroundTasks};

pub const NOTIFICATION_MESSAGE: &str = "some notification";

pub async fn create_user(
    ValidQuery(query): ValidQuery<UserTypeQuery>,
    ValidJson(user): ValidJson<UserDetails>,
) -> Json<UserDetails> {
    tracing::debug!(user_type = ?query.user_type, "Creating user");
    Json(user)
}

/// Accepts a `UserIn` and answers with the public `User` view.
pub async fn profile(ValidJson(user): ValidJson<UserIn>) -> Json<User> {
    Json(User::from(user))
}

pub async fn send_email(
    State(state): State<AppState>,
    tasks: BackgroundTasks,
    ValidJson(body): ValidJson<EmailBody>,
) -> Json<Value> {
    let path = PathBuf::from(&state.config.notifications.log_path);
    tasks.add_task(
        "write_notification",
        write_notification(path, body.email.clone(), NOTIFICATION_MESSAGE.to_string()),
    );
    Json(json!({ "detail": format!("Email Sent to {}", body.email) }))
}

pub async fn tell_secret(Depends(CommonParameters(commons)): Depends<CommonParameters>) -> Json<Value> {
    let commons = Value::Object(commons);
    tracing::info!(commons = %commons, "Resolved common parameters");
    Json(json!({ "secret": "Some top level secret" }))
}
