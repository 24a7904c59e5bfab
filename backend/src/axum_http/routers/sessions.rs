use crate::auth;
use crate::config::config_model::DotEnvyConfig;
use crate::usecases::sessions::{SessionError, SessionUseCase};
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, post},
};
use crates::{
    domain::repositories::users::UserRepository,
    infra::db::{postgres::postgres_connection::PgPoolSquad, repositories::users::UserPostgres},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

pub fn routes(db_pool: Arc<PgPoolSquad>, config: Arc<DotEnvyConfig>) -> Router {
    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let session_usecase = SessionUseCase::new(
        Arc::new(user_repository),
        config.session.jwt_secret.clone(),
        config.session.ttl_seconds,
    );

    Router::new()
        .route("/login", post(login))
        .route("/logout", delete(logout))
        .with_state(Arc::new(session_usecase))
}

#[derive(Debug, Deserialize)]
pub struct LoginModel {
    pub email: String,
    pub password: String,
}

pub async fn login<U>(
    State(session_usecase): State<Arc<SessionUseCase<U>>>,
    Json(body): Json<LoginModel>,
) -> Result<impl IntoResponse, SessionError>
where
    U: UserRepository + Send + Sync + 'static,
{
    let token = session_usecase.login(&body.email, &body.password).await?;
    Ok(Json(
        json!({ "message": "You are logged in.", "token": token }),
    ))
}

/// Sessions are stateless tokens, so logout only acknowledges the caller.
pub async fn logout(headers: HeaderMap) -> impl IntoResponse {
    match auth::authenticate_bearer(&headers) {
        Some(user) => {
            info!(user_id = %user.user_id, "sessions: logout acknowledged");
            (
                StatusCode::OK,
                Json(json!({ "message": "You are logged out." })),
            )
        }
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Hmm nothing happened." })),
        ),
    }
}
