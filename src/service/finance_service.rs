use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    domain::*,
    error::{AppError, Result},
    repository::SubscriptionRepository,
};

pub struct FinanceService {
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl FinanceService {
    pub fn new(subscriptions: Arc<dyn SubscriptionRepository>) -> Self {
        Self { subscriptions }
    }

    /// Marks the stored subscription identified by student, date and type as paid.
    pub fn record_payment(
        &self,
        student_id: i64,
        date: NaiveDate,
        subscription_type: SubscriptionType,
    ) -> Result<Subscription> {
        let mut subscription = self
            .subscriptions
            .find_by_student(student_id)
            .into_iter()
            .find(|s| s.date == date && s.subscription_type() == subscription_type)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No {} subscription for student #{} on {}",
                    subscription_type.as_str(),
                    student_id,
                    date.format("%Y-%m-%d")
                ))
            })?;

        if !subscription.is_paid() {
            subscription.mark_paid();
            self.subscriptions.save(&subscription)?;
            tracing::info!(student_id, amount = subscription.amount, "payment recorded");
        }

        Ok(subscription)
    }

    pub fn total_revenue(&self) -> f64 {
        self.subscriptions.total_revenue()
    }

    /// Unpaid subscriptions of one student, at their displayed amount.
    pub fn outstanding_balance(&self, student_id: i64) -> f64 {
        self.subscriptions
            .find_by_student(student_id)
            .iter()
            .filter(|s| !s.is_paid())
            .map(Subscription::display_amount)
            .sum()
    }
}
