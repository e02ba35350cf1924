use std::path::PathBuf;

use serde_json::Value;

use crate::{
    codec::{subscription_codec, SubscriptionCodec},
    domain::{PaymentStatus, Subscription, SubscriptionPlan},
    error::{AppError, Result},
    repository::{CodecRepository, SubscriptionRepository},
};

pub struct JsonSubscriptionRepository {
    inner: CodecRepository<SubscriptionCodec>,
}

impl JsonSubscriptionRepository {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            inner: CodecRepository::open(path, &subscription_codec::KEY_FIELDS)?,
        })
    }
}

impl SubscriptionRepository for JsonSubscriptionRepository {
    fn save(&self, subscription: &Subscription) -> Result<()> {
        // Non-finite numbers cannot be written as JSON numbers.
        if !subscription.amount.is_finite() {
            return Err(AppError::Validation(format!(
                "subscription amount must be finite, got {}",
                subscription.amount
            )));
        }
        if let SubscriptionPlan::Annual { discount_rate } = subscription.plan {
            if !discount_rate.is_finite() {
                return Err(AppError::Validation(format!(
                    "annual discount rate must be finite, got {}",
                    discount_rate
                )));
            }
        }
        self.inner.save(subscription)
    }

    fn find_by_student(&self, student_id: i64) -> Vec<Subscription> {
        self.inner
            .find_all(subscription_codec::STUDENT_ID, &Value::from(student_id))
    }

    fn find_all_by(&self, field: &str, value: Value) -> Vec<Subscription> {
        self.inner.find_all(field, &value)
    }

    fn load_all(&self) -> Vec<Subscription> {
        self.inner.load_all()
    }

    fn paid_subscriptions(&self) -> Vec<Subscription> {
        self.inner.find_all(
            subscription_codec::STATUS,
            &Value::from(PaymentStatus::Paid.as_str()),
        )
    }

    fn total_revenue(&self) -> f64 {
        self.paid_subscriptions()
            .iter()
            .map(|subscription| subscription.amount)
            .sum()
    }

    fn delete(&self, student_id: i64) -> Result<()> {
        self.inner
            .delete(subscription_codec::STUDENT_ID, &Value::from(student_id))?;
        Ok(())
    }

    fn delete_one(&self, subscription: &Subscription) -> Result<()> {
        self.inner.delete_entity(subscription)?;
        Ok(())
    }
}
