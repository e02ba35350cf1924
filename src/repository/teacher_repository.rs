use std::path::PathBuf;

use serde_json::Value;

use crate::{
    codec::{member_codec, TeacherCodec},
    domain::Teacher,
    error::Result,
    repository::{CodecRepository, TeacherRepository},
};

pub struct JsonTeacherRepository {
    inner: CodecRepository<TeacherCodec>,
}

impl JsonTeacherRepository {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            inner: CodecRepository::open(path, &[member_codec::TEACHER_ID])?,
        })
    }
}

impl TeacherRepository for JsonTeacherRepository {
    fn save(&self, teacher: &Teacher) -> Result<()> {
        self.inner.save(teacher)
    }

    fn find_by_id(&self, teacher_id: i64) -> Option<Teacher> {
        self.inner.find_one(member_codec::TEACHER_ID, &Value::from(teacher_id))
    }

    fn find_by_email(&self, email: &str) -> Option<Teacher> {
        self.inner.find_one(member_codec::EMAIL, &Value::from(email))
    }

    fn find_by_specialization(&self, specialization: &str) -> Vec<Teacher> {
        self.inner
            .find_all(member_codec::SPECIALIZATION, &Value::from(specialization))
    }

    fn find_all_by(&self, field: &str, value: Value) -> Vec<Teacher> {
        self.inner.find_all(field, &value)
    }

    fn load_all(&self) -> Vec<Teacher> {
        self.inner.load_all()
    }

    fn delete(&self, teacher_id: i64) -> Result<()> {
        self.inner.delete(member_codec::TEACHER_ID, &Value::from(teacher_id))?;
        Ok(())
    }
}
