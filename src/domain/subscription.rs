use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DONOR_NAME: &str = "Anonymous";
pub const DEFAULT_ANNUAL_DISCOUNT: f64 = 0.10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub student_id: i64,
    pub amount: f64,
    pub date: NaiveDate,
    pub status: PaymentStatus,
    pub plan: SubscriptionPlan,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    #[default]
    Unpaid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Unpaid => "unpaid",
        }
    }
}

/// Variant-specific payload; `Monthly` carries nothing beyond the base, its
/// amount is a single period's due.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SubscriptionPlan {
    Standard,
    Donation { donor_name: String },
    Monthly,
    Annual { discount_rate: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubscriptionType {
    Standard,
    Donation,
    Monthly,
    Annual,
}

impl SubscriptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionType::Standard => "Standard",
            SubscriptionType::Donation => "Donation",
            SubscriptionType::Monthly => "Monthly",
            SubscriptionType::Annual => "Annual",
        }
    }
}

impl SubscriptionPlan {
    pub fn subscription_type(&self) -> SubscriptionType {
        match self {
            SubscriptionPlan::Standard => SubscriptionType::Standard,
            SubscriptionPlan::Donation { .. } => SubscriptionType::Donation,
            SubscriptionPlan::Monthly => SubscriptionType::Monthly,
            SubscriptionPlan::Annual { .. } => SubscriptionType::Annual,
        }
    }
}

impl Subscription {
    /// A standard, unpaid subscription.
    pub fn new(student_id: i64, amount: f64, date: NaiveDate) -> Self {
        Self {
            student_id,
            amount,
            date,
            status: PaymentStatus::Unpaid,
            plan: SubscriptionPlan::Standard,
        }
    }

    pub fn donation(
        student_id: i64,
        amount: f64,
        date: NaiveDate,
        donor_name: impl Into<String>,
    ) -> Self {
        Self::new(student_id, amount, date).with_plan(SubscriptionPlan::Donation {
            donor_name: donor_name.into(),
        })
    }

    pub fn monthly(student_id: i64, amount: f64, date: NaiveDate) -> Self {
        Self::new(student_id, amount, date).with_plan(SubscriptionPlan::Monthly)
    }

    pub fn annual(student_id: i64, amount: f64, date: NaiveDate) -> Self {
        Self::new(student_id, amount, date).with_plan(SubscriptionPlan::Annual {
            discount_rate: DEFAULT_ANNUAL_DISCOUNT,
        })
    }

    pub fn with_plan(mut self, plan: SubscriptionPlan) -> Self {
        self.plan = plan;
        self
    }

    pub fn subscription_type(&self) -> SubscriptionType {
        self.plan.subscription_type()
    }

    pub fn mark_paid(&mut self) {
        self.status = PaymentStatus::Paid;
    }

    pub fn mark_unpaid(&mut self) {
        self.status = PaymentStatus::Unpaid;
    }

    pub fn is_paid(&self) -> bool {
        self.status == PaymentStatus::Paid
    }

    /// Amount shown to members; annual plans apply their discount.
    pub fn display_amount(&self) -> f64 {
        match self.plan {
            SubscriptionPlan::Annual { discount_rate } => self.amount * (1.0 - discount_rate),
            _ => self.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn new_subscription_is_unpaid_standard() {
        let sub = Subscription::new(1001, 40.0, date());
        assert_eq!(sub.status, PaymentStatus::Unpaid);
        assert_eq!(sub.subscription_type(), SubscriptionType::Standard);
    }

    #[test]
    fn mark_paid_and_unpaid() {
        let mut sub = Subscription::monthly(1001, 40.0, date());
        sub.mark_paid();
        assert!(sub.is_paid());
        sub.mark_unpaid();
        assert!(!sub.is_paid());
    }

    #[test]
    fn annual_display_amount_applies_discount() {
        let sub = Subscription::annual(1001, 200.0, date());
        assert!((sub.display_amount() - 180.0).abs() < 1e-9);

        let donation = Subscription::donation(1001, 25.0, date(), DEFAULT_DONOR_NAME);
        assert_eq!(donation.display_amount(), 25.0);
    }
}
