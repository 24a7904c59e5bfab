use std::sync::Arc;

use anyhow::{Context, anyhow};
use chrono::{DateTime, Duration, Utc};
use crates::domain::{
    entities::{active_plans::InsertActivePlanEntity, users::ActivateUserEntity},
    repositories::{
        plan_activation::PlanActivationRepository, plans::PlanRepository, users::UserRepository,
    },
    value_objects::plans::Bill,
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PurchaseError {
    #[error("plan not found")]
    PlanNotFound,
    #[error("your plan is already activated try to buy after {remaining_days} days")]
    AlreadyActive { remaining_days: i64 },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PurchaseError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            PurchaseError::PlanNotFound => StatusCode::NOT_FOUND,
            PurchaseError::AlreadyActive { .. } => StatusCode::NOT_ACCEPTABLE,
            PurchaseError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, PurchaseError>;

pub struct PlanPurchaseUseCase<P, A, U>
where
    P: PlanRepository + Send + Sync + 'static,
    A: PlanActivationRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    plan_repository: Arc<P>,
    activation_repository: Arc<A>,
    user_repository: Arc<U>,
}

impl<P, A, U> PlanPurchaseUseCase<P, A, U>
where
    P: PlanRepository + Send + Sync + 'static,
    A: PlanActivationRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(
        plan_repository: Arc<P>,
        activation_repository: Arc<A>,
        user_repository: Arc<U>,
    ) -> Self {
        Self {
            plan_repository,
            activation_repository,
            user_repository,
        }
    }

    pub async fn buy_plan(&self, user_id: Uuid, plan_id: i64) -> UseCaseResult<Bill> {
        info!(%user_id, plan_id, "purchase: buy plan requested");

        let plan = self
            .plan_repository
            .find_by_id(plan_id)
            .await
            .map_err(|err| {
                error!(plan_id, db_error = ?err, "purchase: failed to load plan");
                PurchaseError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = PurchaseError::PlanNotFound;
                warn!(
                    plan_id,
                    status = err.status_code().as_u16(),
                    "purchase: plan not found"
                );
                err
            })?;

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "purchase: failed to load user");
                PurchaseError::Internal(err)
            })?
            .ok_or_else(|| {
                // The session referenced a user the store no longer knows.
                error!(%user_id, "purchase: authenticated user missing from store");
                PurchaseError::Internal(anyhow!("user {user_id} not found"))
            })?;

        if user.active_plan {
            let remaining_days = remaining_days(user.plan_expires_at, Utc::now());
            let err = PurchaseError::AlreadyActive { remaining_days };
            warn!(
                %user_id,
                plan_id,
                remaining_days,
                status = err.status_code().as_u16(),
                "purchase: user already has an active plan"
            );
            return Err(err);
        }

        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(Duration::days(plan.plan_duration.into()))
            .context("failed to compute plan expiry date")?;

        let active_plan = InsertActivePlanEntity {
            user_id,
            plan_id,
            created_at: now,
        };
        let user_update = ActivateUserEntity {
            active_plan: true,
            purchased_duration_days: Some(plan.plan_duration),
            plan_expires_at: Some(expires_at),
        };

        self.activation_repository
            .activate(active_plan, user_update)
            .await
            .map_err(|err| {
                error!(
                    %user_id,
                    plan_id,
                    db_error = ?err,
                    "purchase: failed to record activation"
                );
                PurchaseError::Internal(err)
            })?;

        info!(%user_id, plan_id, %expires_at, "purchase: plan activated");
        Ok(Bill::new(&plan, expires_at))
    }
}

fn remaining_days(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i64 {
    expires_at
        .map(|expiry| (expiry - now).num_days().max(0))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crates::domain::{
        entities::{plans::PlanEntity, users::UserEntity},
        repositories::{
            plan_activation::MockPlanActivationRepository, plans::MockPlanRepository,
            users::MockUserRepository,
        },
        value_objects::plans::format_bill_date,
    };
    use mockall::predicate::eq;

    fn sample_plan(id: i64, duration: i32) -> PlanEntity {
        let now = Utc::now();
        PlanEntity {
            id,
            name: "Keto Fortnight".to_string(),
            description: "Fourteen days of keto meals".to_string(),
            plan_duration: duration,
            plan_cost: 2500,
            image: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_user(id: Uuid, active_plan: bool) -> UserEntity {
        UserEntity {
            id,
            email: "buyer@example.com".to_string(),
            password_hash: "argon2-hash".to_string(),
            active_plan,
            purchased_duration_days: None,
            plan_expires_at: None,
            created_at: Utc::now(),
        }
    }

    fn usecase(
        plan_repository: MockPlanRepository,
        activation_repository: MockPlanActivationRepository,
        user_repository: MockUserRepository,
    ) -> PlanPurchaseUseCase<MockPlanRepository, MockPlanActivationRepository, MockUserRepository>
    {
        PlanPurchaseUseCase::new(
            Arc::new(plan_repository),
            Arc::new(activation_repository),
            Arc::new(user_repository),
        )
    }

    #[tokio::test]
    async fn buy_activates_the_plan_and_returns_the_bill() {
        let user_id = Uuid::new_v4();

        let mut plan_repository = MockPlanRepository::new();
        let mut activation_repository = MockPlanActivationRepository::new();
        let mut user_repository = MockUserRepository::new();

        plan_repository
            .expect_find_by_id()
            .with(eq(5))
            .returning(|_| Box::pin(async { Ok(Some(sample_plan(5, 14))) }));

        user_repository
            .expect_find_by_id()
            .with(eq(user_id))
            .returning(move |_| Box::pin(async move { Ok(Some(sample_user(user_id, false))) }));

        activation_repository
            .expect_activate()
            .withf(move |active_plan, user_update| {
                active_plan.user_id == user_id
                    && active_plan.plan_id == 5
                    && user_update.active_plan
                    && user_update.purchased_duration_days == Some(14)
                    && user_update.plan_expires_at
                        == Some(active_plan.created_at + Duration::days(14))
            })
            .returning(|_, _| Box::pin(async { Ok(1) }));

        let before = Utc::now();
        let bill = usecase(plan_repository, activation_repository, user_repository)
            .buy_plan(user_id, 5)
            .await
            .expect("purchase should succeed");
        let after = Utc::now();

        assert_eq!(bill.plan_name, "Keto Fortnight");
        assert_eq!(bill.plan_cost, 2500);
        assert_eq!(bill.plan_duration, 14);

        let expected_dates = [
            format_bill_date(before + Duration::days(14)),
            format_bill_date(after + Duration::days(14)),
        ];
        assert!(expected_dates.contains(&bill.expiry_date));
    }

    #[tokio::test]
    async fn buy_is_rejected_while_a_plan_is_active() {
        let user_id = Uuid::new_v4();

        let mut plan_repository = MockPlanRepository::new();
        let activation_repository = MockPlanActivationRepository::new();
        let mut user_repository = MockUserRepository::new();

        plan_repository
            .expect_find_by_id()
            .with(eq(5))
            .returning(|_| Box::pin(async { Ok(Some(sample_plan(5, 14))) }));

        user_repository
            .expect_find_by_id()
            .with(eq(user_id))
            .returning(move |_| {
                Box::pin(async move {
                    let mut user = sample_user(user_id, true);
                    // One minute past five whole days so the hint stays at 5.
                    user.plan_expires_at =
                        Some(Utc::now() + Duration::days(5) + Duration::minutes(1));
                    Ok(Some(user))
                })
            });

        let result = usecase(plan_repository, activation_repository, user_repository)
            .buy_plan(user_id, 5)
            .await;

        match result {
            Err(PurchaseError::AlreadyActive { remaining_days }) => {
                assert_eq!(remaining_days, 5);
            }
            other => panic!("expected already-active rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn buy_maps_missing_plan_to_not_found() {
        let user_id = Uuid::new_v4();

        let mut plan_repository = MockPlanRepository::new();
        let activation_repository = MockPlanActivationRepository::new();
        let user_repository = MockUserRepository::new();

        plan_repository
            .expect_find_by_id()
            .with(eq(404))
            .returning(|_| Box::pin(async { Ok(None) }));

        let result = usecase(plan_repository, activation_repository, user_repository)
            .buy_plan(user_id, 404)
            .await;

        assert!(matches!(result, Err(PurchaseError::PlanNotFound)));
    }

    #[test]
    fn remaining_days_handles_missing_and_past_expiries() {
        let now = Utc::now();
        assert_eq!(remaining_days(None, now), 0);
        assert_eq!(remaining_days(Some(now - Duration::days(3)), now), 0);
        assert_eq!(
            remaining_days(Some(now + Duration::days(8) + Duration::minutes(1)), now),
            8
        );
    }
}
