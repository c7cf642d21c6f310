use super::parse_enum;
use crate::error::ApiError;
use chrono::{DateTime, FixedOffset};
use database::{entities::payments, services::payment::NewPayment};
use models::payment_status::PaymentStatus;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentResponse {
    pub id: i32,
    pub payer_id: i32,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    pub reference: Option<String>,
    pub metadata: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}

impl From<payments::Model> for PaymentResponse {
    fn from(payment: payments::Model) -> Self {
        Self {
            id: payment.id,
            payer_id: payment.payer_id,
            amount: payment.amount,
            currency: payment.currency,
            status: payment.status.to_string(),
            reference: payment.reference,
            metadata: payment.payment_metadata,
            created_at: payment.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordPaymentRequest {
    pub payer_id: i32,
    #[serde(default)]
    pub amount: f64,
    /// Defaults to `INR`
    pub currency: Option<String>,
    /// `pending` (default), `success`, `failed` or `refunded`
    pub status: Option<String>,
    pub reference: Option<String>,
    pub metadata: Option<String>,
}

impl TryFrom<RecordPaymentRequest> for NewPayment {
    type Error = ApiError;

    fn try_from(req: RecordPaymentRequest) -> Result<Self, Self::Error> {
        let status = req
            .status
            .as_deref()
            .map(|name| parse_enum::<PaymentStatus>("status", name))
            .transpose()?;

        Ok(Self {
            payer_id: req.payer_id,
            amount: req.amount,
            currency: req.currency,
            status,
            reference: req.reference,
            metadata: req.metadata,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentStatusRequest {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_metadata_exposed_under_short_name() {
        let payment = payments::Model {
            id: 1,
            payer_id: 2,
            amount: 1200.5,
            currency: "INR".to_string(),
            status: PaymentStatus::Refunded,
            reference: None,
            payment_metadata: Some("{\"gateway\":\"upi\"}".to_string()),
            created_at: Utc::now().into(),
        };

        let json = serde_json::to_value(PaymentResponse::from(payment)).unwrap();
        assert_eq!(json["status"], "refunded");
        assert_eq!(json["metadata"], "{\"gateway\":\"upi\"}");
        assert!(json.get("payment_metadata").is_none());
    }

    #[test]
    fn test_unknown_status_rejected() {
        let req = RecordPaymentRequest {
            payer_id: 1,
            amount: 10.0,
            currency: None,
            status: Some("chargeback".to_string()),
            reference: None,
            metadata: None,
        };

        assert!(NewPayment::try_from(req).is_err());
    }
}
