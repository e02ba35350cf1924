use std::path::PathBuf;

use serde_json::Value;

use crate::{
    codec::{member_codec, PersonCodec},
    domain::{MemberKind, Person},
    error::Result,
    repository::{CodecRepository, MemberRepository},
};

pub struct JsonMemberRepository {
    inner: CodecRepository<PersonCodec>,
}

impl JsonMemberRepository {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            inner: CodecRepository::open(path, &[member_codec::EMAIL])?,
        })
    }
}

impl MemberRepository for JsonMemberRepository {
    fn save(&self, person: &Person) -> Result<()> {
        self.inner.save(person)
    }

    fn find_by_email(&self, email: &str) -> Option<Person> {
        self.inner.find_one(member_codec::EMAIL, &Value::from(email))
    }

    fn find_all_by(&self, field: &str, value: Value) -> Vec<Person> {
        self.inner.find_all(field, &value)
    }

    fn find_by_kind(&self, kind: MemberKind) -> Vec<Person> {
        // Untagged or unknown records decode as plain members, so filter on
        // the decoded variant rather than the raw field.
        self.inner
            .load_all()
            .into_iter()
            .filter(|person| person.kind() == kind)
            .collect()
    }

    fn load_all(&self) -> Vec<Person> {
        self.inner.load_all()
    }

    fn delete(&self, email: &str) -> Result<()> {
        self.inner.delete(member_codec::EMAIL, &Value::from(email))?;
        Ok(())
    }
}
