use axum::{
    Json,
    response::{IntoResponse, Response},
};
use crates::domain::value_objects::plan_schedule::FieldErrors;
use serde_json::json;

use crate::usecases::{
    plan_purchase::PurchaseError, plan_schedule::PlanError, sessions::SessionError,
};

// Internal detail never reaches the client; it is already on the error log.
const GENERIC_FAILURE: &str = "something wrong";

impl IntoResponse for PlanError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            PlanError::Validation(fields) => json!({ "message": fields }),
            PlanError::Construction { field, message } => {
                let fields =
                    FieldErrors::from([(field.to_string(), message.to_string())]);
                json!({ "message": fields })
            }
            PlanError::PlanNotFound => json!({ "message": "plan not found" }),
            PlanError::Internal(_) => json!({ "message": GENERIC_FAILURE }),
        };

        (status, Json(body)).into_response()
    }
}

impl IntoResponse for PurchaseError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            PurchaseError::Internal(_) => GENERIC_FAILURE.to_string(),
            other => other.to_string(),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            SessionError::Internal(_) => GENERIC_FAILURE.to_string(),
            other => other.to_string(),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
