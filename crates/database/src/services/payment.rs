use crate::{
    entities::{payments, users},
    error::{ServiceError, ServiceResult},
};
use chrono::Utc;
use models::payment_status::PaymentStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

pub const DEFAULT_CURRENCY: &str = "INR";

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub payer_id: i32,
    pub amount: f64,
    pub currency: Option<String>,
    pub status: Option<PaymentStatus>,
    pub reference: Option<String>,
    pub metadata: Option<String>,
}

pub struct PaymentService;

impl PaymentService {
    pub async fn record(
        db: &DatabaseConnection,
        payment: NewPayment,
    ) -> ServiceResult<payments::Model> {
        if users::Entity::find_by_id(payment.payer_id).one(db).await?.is_none() {
            return Err(ServiceError::not_found("Payer"));
        }
        if !payment.amount.is_finite() || payment.amount < 0.0 {
            return Err(ServiceError::BadRequest(
                "amount must be a non-negative number".to_string(),
            ));
        }

        let row = payments::ActiveModel {
            payer_id: Set(payment.payer_id),
            amount: Set(payment.amount),
            currency: Set(payment
                .currency
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())),
            status: Set(payment.status.unwrap_or_default()),
            reference: Set(payment.reference),
            payment_metadata: Set(payment.metadata),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        Ok(row.insert(db).await?)
    }

    /// Payments made by one user, newest first
    pub async fn list_for(
        db: &DatabaseConnection,
        payer_id: i32,
    ) -> ServiceResult<Vec<payments::Model>> {
        Ok(payments::Entity::find()
            .filter(payments::Column::PayerId.eq(payer_id))
            .order_by_desc(payments::Column::CreatedAt)
            .order_by_desc(payments::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn update_status(
        db: &DatabaseConnection,
        id: i32,
        status: PaymentStatus,
    ) -> ServiceResult<payments::Model> {
        let payment = payments::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Payment"))?;

        let mut active: payments::ActiveModel = payment.into();
        active.status = Set(status);
        Ok(active.update(db).await?)
    }
}
