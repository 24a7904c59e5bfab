use crate::auth::AuthUser;
use crate::config::config_model::DotEnvyConfig;
use crate::usecases::{
    plan_purchase::{PlanPurchaseUseCase, PurchaseError},
    plan_schedule::{PlanError, PlanScheduleUseCase},
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use crates::{
    domain::{
        repositories::{
            plan_activation::PlanActivationRepository, plans::PlanRepository,
            recipes::RecipeRepository, users::UserRepository,
        },
        value_objects::plan_schedule::SubmitPlanModel,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            plan_activation::PlanActivationPostgres, plans::PlanPostgres, recipes::RecipePostgres,
            users::UserPostgres,
        },
    },
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

pub struct PlansState<P, R, A, U>
where
    P: PlanRepository + Send + Sync + 'static,
    R: RecipeRepository + Send + Sync + 'static,
    A: PlanActivationRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    pub schedule_usecase: PlanScheduleUseCase<P, R>,
    pub purchase_usecase: PlanPurchaseUseCase<P, A, U>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitPlanRequest {
    pub plan: SubmitPlanModel,
}

pub fn routes(db_pool: Arc<PgPoolSquad>, config: Arc<DotEnvyConfig>) -> Router {
    let plan_repository = Arc::new(PlanPostgres::new(Arc::clone(&db_pool)));
    let recipe_repository = Arc::new(RecipePostgres::new(Arc::clone(&db_pool)));
    let activation_repository = Arc::new(PlanActivationPostgres::new(Arc::clone(&db_pool)));
    let user_repository = Arc::new(UserPostgres::new(Arc::clone(&db_pool)));

    let state = PlansState {
        schedule_usecase: PlanScheduleUseCase::new(
            Arc::clone(&plan_repository),
            recipe_repository,
            config.plan_urls.base_url.clone(),
        ),
        purchase_usecase: PlanPurchaseUseCase::new(
            plan_repository,
            activation_repository,
            user_repository,
        ),
    };

    Router::new()
        .route("/", get(list_plans).post(create_plan))
        .route(
            "/:plan_id",
            get(show_plan)
                .put(update_plan)
                .patch(update_plan)
                .delete(delete_plan),
        )
        .route("/:plan_id/buy", post(buy_plan))
        .with_state(Arc::new(state))
}

pub async fn list_plans<P, R, A, U>(
    State(state): State<Arc<PlansState<P, R, A, U>>>,
) -> Result<impl IntoResponse, PlanError>
where
    P: PlanRepository + Send + Sync + 'static,
    R: RecipeRepository + Send + Sync + 'static,
    A: PlanActivationRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let plans = state.schedule_usecase.list_plans().await?;
    Ok(Json(json!({ "plans": plans })))
}

pub async fn show_plan<P, R, A, U>(
    State(state): State<Arc<PlansState<P, R, A, U>>>,
    Path(plan_id): Path<i64>,
) -> Result<impl IntoResponse, PlanError>
where
    P: PlanRepository + Send + Sync + 'static,
    R: RecipeRepository + Send + Sync + 'static,
    A: PlanActivationRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let plan = state.schedule_usecase.get_plan(plan_id).await?;
    Ok(Json(json!({ "plan": plan })))
}

pub async fn create_plan<P, R, A, U>(
    State(state): State<Arc<PlansState<P, R, A, U>>>,
    _auth: AuthUser,
    Json(body): Json<SubmitPlanRequest>,
) -> Result<impl IntoResponse, PlanError>
where
    P: PlanRepository + Send + Sync + 'static,
    R: RecipeRepository + Send + Sync + 'static,
    A: PlanActivationRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let plan = state.schedule_usecase.create_plan(body.plan).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "plan created", "plan": plan })),
    ))
}

pub async fn update_plan<P, R, A, U>(
    State(state): State<Arc<PlansState<P, R, A, U>>>,
    Path(plan_id): Path<i64>,
    _auth: AuthUser,
    Json(body): Json<SubmitPlanRequest>,
) -> Result<impl IntoResponse, PlanError>
where
    P: PlanRepository + Send + Sync + 'static,
    R: RecipeRepository + Send + Sync + 'static,
    A: PlanActivationRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let plan = state.schedule_usecase.update_plan(plan_id, body.plan).await?;
    Ok(Json(json!({ "message": "plan updated", "plan": plan })))
}

pub async fn delete_plan<P, R, A, U>(
    State(state): State<Arc<PlansState<P, R, A, U>>>,
    Path(plan_id): Path<i64>,
    _auth: AuthUser,
) -> Result<impl IntoResponse, PlanError>
where
    P: PlanRepository + Send + Sync + 'static,
    R: RecipeRepository + Send + Sync + 'static,
    A: PlanActivationRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    state.schedule_usecase.delete_plan(plan_id).await?;
    Ok(Json(json!({ "message": "plan deleted" })))
}

pub async fn buy_plan<P, R, A, U>(
    State(state): State<Arc<PlansState<P, R, A, U>>>,
    Path(plan_id): Path<i64>,
    auth: AuthUser,
) -> Result<impl IntoResponse, PurchaseError>
where
    P: PlanRepository + Send + Sync + 'static,
    R: RecipeRepository + Send + Sync + 'static,
    A: PlanActivationRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let bill = state
        .purchase_usecase
        .buy_plan(auth.user_id, plan_id)
        .await?;
    Ok(Json(json!({ "message": bill })))
}
