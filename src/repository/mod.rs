use serde_json::Value;
use crate::domain::*;
use crate::error::Result;

pub mod codec_repository;
pub mod member_repository;
pub mod student_repository;
pub mod teacher_repository;
pub mod event_repository;
pub mod subscription_repository;

pub use codec_repository::CodecRepository;
pub use member_repository::JsonMemberRepository;
pub use student_repository::JsonStudentRepository;
pub use teacher_repository::JsonTeacherRepository;
pub use event_repository::JsonEventRepository;
pub use subscription_repository::JsonSubscriptionRepository;

/// Every member-family variant, keyed by email.
pub trait MemberRepository: Send + Sync {
    fn save(&self, person: &Person) -> Result<()>;
    fn find_by_email(&self, email: &str) -> Option<Person>;
    fn find_all_by(&self, field: &str, value: Value) -> Vec<Person>;
    fn find_by_kind(&self, kind: MemberKind) -> Vec<Person>;
    fn load_all(&self) -> Vec<Person>;
    fn delete(&self, email: &str) -> Result<()>;
}

pub trait StudentRepository: Send + Sync {
    fn save(&self, student: &Student) -> Result<()>;
    fn find_by_id(&self, student_id: i64) -> Option<Student>;
    fn find_by_email(&self, email: &str) -> Option<Student>;
    fn find_by_subscription_status(&self, status: SubscriptionStatus) -> Vec<Student>;
    fn find_all_by(&self, field: &str, value: Value) -> Vec<Student>;
    fn load_all(&self) -> Vec<Student>;
    fn delete(&self, student_id: i64) -> Result<()>;
}

pub trait TeacherRepository: Send + Sync {
    fn save(&self, teacher: &Teacher) -> Result<()>;
    fn find_by_id(&self, teacher_id: i64) -> Option<Teacher>;
    fn find_by_email(&self, email: &str) -> Option<Teacher>;
    fn find_by_specialization(&self, specialization: &str) -> Vec<Teacher>;
    fn find_all_by(&self, field: &str, value: Value) -> Vec<Teacher>;
    fn load_all(&self) -> Vec<Teacher>;
    fn delete(&self, teacher_id: i64) -> Result<()>;
}

pub trait EventRepository: Send + Sync {
    fn save(&self, event: &Event) -> Result<()>;
    fn find_by_name(&self, event_name: &str) -> Option<Event>;
    fn find_by_type(&self, event_type: EventType) -> Vec<Event>;
    fn find_all_by(&self, field: &str, value: Value) -> Vec<Event>;
    fn load_all(&self) -> Vec<Event>;
    fn delete(&self, event_name: &str) -> Result<()>;
}

/// Several subscriptions may exist per student; one is identified by
/// student id, date and type together.
pub trait SubscriptionRepository: Send + Sync {
    fn save(&self, subscription: &Subscription) -> Result<()>;
    fn find_by_student(&self, student_id: i64) -> Vec<Subscription>;
    fn find_all_by(&self, field: &str, value: Value) -> Vec<Subscription>;
    fn load_all(&self) -> Vec<Subscription>;
    fn paid_subscriptions(&self) -> Vec<Subscription>;
    fn total_revenue(&self) -> f64;
    /// Removes every subscription of `student_id`.
    fn delete(&self, student_id: i64) -> Result<()>;
    fn delete_one(&self, subscription: &Subscription) -> Result<()>;
}
