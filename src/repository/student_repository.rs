use std::path::PathBuf;

use serde_json::Value;

use crate::{
    codec::{member_codec, StudentCodec},
    domain::{Student, SubscriptionStatus},
    error::Result,
    repository::{CodecRepository, StudentRepository},
};

pub struct JsonStudentRepository {
    inner: CodecRepository<StudentCodec>,
}

impl JsonStudentRepository {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            inner: CodecRepository::open(path, &[member_codec::STUDENT_ID])?,
        })
    }
}

impl StudentRepository for JsonStudentRepository {
    fn save(&self, student: &Student) -> Result<()> {
        self.inner.save(student)
    }

    fn find_by_id(&self, student_id: i64) -> Option<Student> {
        self.inner.find_one(member_codec::STUDENT_ID, &Value::from(student_id))
    }

    fn find_by_email(&self, email: &str) -> Option<Student> {
        self.inner.find_one(member_codec::EMAIL, &Value::from(email))
    }

    fn find_by_subscription_status(&self, status: SubscriptionStatus) -> Vec<Student> {
        self.inner
            .find_all(member_codec::SUBSCRIPTION_STATUS, &Value::from(status.as_str()))
    }

    fn find_all_by(&self, field: &str, value: Value) -> Vec<Student> {
        self.inner.find_all(field, &value)
    }

    fn load_all(&self) -> Vec<Student> {
        self.inner.load_all()
    }

    fn delete(&self, student_id: i64) -> Result<()> {
        self.inner.delete(member_codec::STUDENT_ID, &Value::from(student_id))?;
        Ok(())
    }
}
