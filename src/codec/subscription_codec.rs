use serde_json::Value;

use crate::codec::{
    optional_f64, optional_str, put_date, put_str, required_date, required_f64, required_i64,
    RecordCodec,
};
use crate::domain::{
    PaymentStatus, Subscription, SubscriptionPlan, SubscriptionType, DEFAULT_ANNUAL_DISCOUNT,
    DEFAULT_DONOR_NAME,
};
use crate::error::CodecError;
use crate::store::Record;

pub const TYPE: &str = "type";
pub const STUDENT_ID: &str = "student_id";
pub const AMOUNT: &str = "amount";
pub const DATE: &str = "date";
pub const STATUS: &str = "status";
pub const DONOR_NAME: &str = "donor_name";
pub const DISCOUNT: &str = "discount";

/// Fields that together identify one subscription in the store.
pub const KEY_FIELDS: [&str; 3] = [STUDENT_ID, DATE, TYPE];

pub struct SubscriptionCodec;

pub fn parse_subscription_type(s: &str) -> Option<SubscriptionType> {
    match s {
        "Standard" => Some(SubscriptionType::Standard),
        "Donation" => Some(SubscriptionType::Donation),
        "Monthly" => Some(SubscriptionType::Monthly),
        "Annual" => Some(SubscriptionType::Annual),
        _ => None,
    }
}

pub fn parse_payment_status(s: &str) -> PaymentStatus {
    match s {
        "paid" => PaymentStatus::Paid,
        _ => PaymentStatus::Unpaid,
    }
}

impl RecordCodec for SubscriptionCodec {
    type Entity = Subscription;
    const FAMILY: &'static str = "subscription";

    fn encode(subscription: &Subscription) -> Record {
        let mut record = Record::new();
        record.insert(STUDENT_ID.to_string(), Value::from(subscription.student_id));
        record.insert(AMOUNT.to_string(), Value::from(subscription.amount));
        put_date(&mut record, DATE, subscription.date);
        put_str(&mut record, STATUS, subscription.status.as_str());

        match &subscription.plan {
            SubscriptionPlan::Standard | SubscriptionPlan::Monthly => {}
            SubscriptionPlan::Donation { donor_name } => {
                put_str(&mut record, DONOR_NAME, donor_name)
            }
            SubscriptionPlan::Annual { discount_rate } => {
                record.insert(DISCOUNT.to_string(), Value::from(*discount_rate));
            }
        }

        put_str(&mut record, TYPE, subscription.subscription_type().as_str());
        record
    }

    fn decode(record: &Record) -> Result<Subscription, CodecError> {
        let subscription_type = record
            .get(TYPE)
            .and_then(Value::as_str)
            .and_then(parse_subscription_type)
            .unwrap_or(SubscriptionType::Standard);

        let plan = match subscription_type {
            SubscriptionType::Standard => SubscriptionPlan::Standard,
            SubscriptionType::Monthly => SubscriptionPlan::Monthly,
            SubscriptionType::Donation => SubscriptionPlan::Donation {
                donor_name: optional_str(record, DONOR_NAME)
                    .unwrap_or_else(|| DEFAULT_DONOR_NAME.to_string()),
            },
            SubscriptionType::Annual => SubscriptionPlan::Annual {
                discount_rate: optional_f64(record, DISCOUNT).unwrap_or(DEFAULT_ANNUAL_DISCOUNT),
            },
        };

        Ok(Subscription {
            student_id: required_i64(record, STUDENT_ID)?,
            amount: required_f64(record, AMOUNT)?,
            date: required_date(record, DATE)?,
            status: optional_str(record, STATUS)
                .as_deref()
                .map(parse_payment_status)
                .unwrap_or_default(),
            plan,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
    }

    #[test]
    fn every_subscription_variant_round_trips() {
        let mut paid_annual = Subscription::annual(1001, 240.0, date());
        paid_annual.mark_paid();

        for subscription in [
            Subscription::new(1001, 150.0, date()),
            Subscription::donation(1002, 20.5, date(), "Mme Leroy"),
            Subscription::monthly(1003, 30.0, date()),
            paid_annual,
            Subscription::annual(1004, 100.0, date()).with_plan(SubscriptionPlan::Annual {
                discount_rate: 0.25,
            }),
        ] {
            let encoded = SubscriptionCodec::encode(&subscription);
            let decoded = SubscriptionCodec::decode(&encoded).unwrap();
            assert_eq!(decoded, subscription);
        }
    }

    #[test]
    fn variant_defaults_apply_when_fields_are_absent() {
        let donation = record(json!({
            "student_id": 1, "amount": 10, "date": "2025-09-01", "status": "paid",
            "type": "Donation"
        }));
        assert_eq!(
            SubscriptionCodec::decode(&donation).unwrap().plan,
            SubscriptionPlan::Donation {
                donor_name: "Anonymous".to_string()
            }
        );

        let annual = record(json!({
            "student_id": 1, "amount": 100, "date": "2025-09-01", "type": "Annual"
        }));
        let annual = SubscriptionCodec::decode(&annual).unwrap();
        assert_eq!(annual.status, PaymentStatus::Unpaid);
        assert!((annual.display_amount() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn missing_or_unknown_type_is_standard() {
        let r = record(json!({
            "student_id": 1, "amount": 10.0, "date": "2025-09-01", "type": "Lifetime"
        }));
        assert_eq!(
            SubscriptionCodec::decode(&r).unwrap().subscription_type(),
            SubscriptionType::Standard
        );
    }

    #[test]
    fn integer_amounts_decode_as_floats() {
        let r = record(json!({"student_id": 1, "amount": 150, "date": "2025-09-01"}));
        assert_eq!(SubscriptionCodec::decode(&r).unwrap().amount, 150.0);
    }

    #[test]
    fn missing_student_id_is_a_decode_error() {
        let r = record(json!({"amount": 150, "date": "2025-09-01"}));
        assert_eq!(
            SubscriptionCodec::decode(&r),
            Err(CodecError::MissingField(STUDENT_ID))
        );
    }
}
