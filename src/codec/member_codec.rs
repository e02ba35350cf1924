use serde_json::Value;

use crate::codec::{
    optional_i64, optional_list, optional_str, put_date, put_list, put_str, required_date,
    required_str, RecordCodec,
};
use crate::domain::{
    Member, MemberKind, Person, Student, SubscriptionStatus, Teacher, DEFAULT_SPECIALIZATION,
};
use crate::error::CodecError;
use crate::store::Record;

pub const KIND: &str = "kind";
/// Discriminant written by older files.
pub const LEGACY_KIND: &str = "type";

pub const FULL_NAME: &str = "full_name";
pub const EMAIL: &str = "email";
pub const PHONE: &str = "phone";
pub const ADDRESS: &str = "address";
pub const JOIN_DATE: &str = "join_date";
pub const SKILLS: &str = "skills";
pub const INTERESTS: &str = "interests";
pub const STUDENT_ID: &str = "student_id";
pub const SUBSCRIPTION_STATUS: &str = "subscription_status";
pub const TEACHER_ID: &str = "teacher_id";
pub const SPECIALIZATION: &str = "specialization";
pub const GROUPS: &str = "groups";
pub const ASSIGNED_EVENTS: &str = "assigned_events";

/// Any variant of the member family, keyed by the `kind` discriminant.
pub struct PersonCodec;

/// Student-scoped view of the member family.
pub struct StudentCodec;

/// Teacher-scoped view of the member family.
pub struct TeacherCodec;

pub fn parse_member_kind(s: &str) -> Option<MemberKind> {
    match s {
        "Member" => Some(MemberKind::Member),
        "Student" => Some(MemberKind::Student),
        "Teacher" => Some(MemberKind::Teacher),
        _ => None,
    }
}

pub fn parse_subscription_status(s: &str) -> Option<SubscriptionStatus> {
    match s {
        "Pending" => Some(SubscriptionStatus::Pending),
        "Active" => Some(SubscriptionStatus::Active),
        "Inactive" => Some(SubscriptionStatus::Inactive),
        _ => None,
    }
}

fn read_kind(record: &Record) -> MemberKind {
    record
        .get(KIND)
        .or_else(|| record.get(LEGACY_KIND))
        .and_then(Value::as_str)
        .and_then(parse_member_kind)
        .unwrap_or(MemberKind::Member)
}

fn encode_member(member: &Member, record: &mut Record) {
    put_str(record, FULL_NAME, &member.full_name);
    put_str(record, EMAIL, &member.email);
    put_str(record, PHONE, &member.phone);
    put_str(record, ADDRESS, &member.address);
    put_date(record, JOIN_DATE, member.join_date);
    put_list(record, SKILLS, &member.skills);
    put_list(record, INTERESTS, &member.interests);
}

fn decode_member(record: &Record) -> Result<Member, CodecError> {
    Ok(Member {
        full_name: required_str(record, FULL_NAME)?,
        email: required_str(record, EMAIL)?,
        phone: optional_str(record, PHONE).unwrap_or_default(),
        address: optional_str(record, ADDRESS).unwrap_or_default(),
        join_date: required_date(record, JOIN_DATE)?,
        skills: optional_list(record, SKILLS),
        interests: optional_list(record, INTERESTS),
    })
}

fn encode_student_fields(student: &Student, record: &mut Record) {
    record.insert(STUDENT_ID.to_string(), Value::from(student.student_id));
    put_str(record, SUBSCRIPTION_STATUS, student.subscription_status.as_str());
}

fn decode_student_fields(member: Member, record: &Record) -> Student {
    Student {
        member,
        student_id: optional_i64(record, STUDENT_ID).unwrap_or(0),
        subscription_status: optional_str(record, SUBSCRIPTION_STATUS)
            .as_deref()
            .and_then(parse_subscription_status)
            .unwrap_or_default(),
    }
}

fn encode_teacher_fields(teacher: &Teacher, record: &mut Record) {
    record.insert(TEACHER_ID.to_string(), Value::from(teacher.teacher_id));
    put_str(record, SPECIALIZATION, &teacher.specialization);
    put_list(record, GROUPS, &teacher.groups);
    put_list(record, ASSIGNED_EVENTS, &teacher.assigned_events);
}

fn decode_teacher_fields(member: Member, record: &Record) -> Teacher {
    Teacher {
        member,
        teacher_id: optional_i64(record, TEACHER_ID).unwrap_or(0),
        specialization: optional_str(record, SPECIALIZATION)
            .unwrap_or_else(|| DEFAULT_SPECIALIZATION.to_string()),
        groups: optional_list(record, GROUPS),
        assigned_events: optional_list(record, ASSIGNED_EVENTS),
    }
}

fn tagged(mut record: Record, kind: MemberKind) -> Record {
    put_str(&mut record, KIND, kind.as_str());
    record
}

impl RecordCodec for PersonCodec {
    type Entity = Person;
    const FAMILY: &'static str = "member";

    fn encode(person: &Person) -> Record {
        let mut record = Record::new();
        encode_member(person.member(), &mut record);
        match person {
            Person::Member(_) => {}
            Person::Student(student) => encode_student_fields(student, &mut record),
            Person::Teacher(teacher) => encode_teacher_fields(teacher, &mut record),
        }
        tagged(record, person.kind())
    }

    fn decode(record: &Record) -> Result<Person, CodecError> {
        let member = decode_member(record)?;
        Ok(match read_kind(record) {
            MemberKind::Member => Person::Member(member),
            MemberKind::Student => Person::Student(decode_student_fields(member, record)),
            MemberKind::Teacher => Person::Teacher(decode_teacher_fields(member, record)),
        })
    }
}

impl RecordCodec for StudentCodec {
    type Entity = Student;
    const FAMILY: &'static str = "student";

    fn encode(student: &Student) -> Record {
        let mut record = Record::new();
        encode_member(&student.member, &mut record);
        encode_student_fields(student, &mut record);
        tagged(record, MemberKind::Student)
    }

    fn decode(record: &Record) -> Result<Student, CodecError> {
        if read_kind(record) == MemberKind::Teacher {
            return Err(CodecError::VariantMismatch {
                expected: MemberKind::Student.as_str(),
                found: MemberKind::Teacher.as_str(),
            });
        }
        Ok(decode_student_fields(decode_member(record)?, record))
    }
}

impl RecordCodec for TeacherCodec {
    type Entity = Teacher;
    const FAMILY: &'static str = "teacher";

    fn encode(teacher: &Teacher) -> Record {
        let mut record = Record::new();
        encode_member(&teacher.member, &mut record);
        encode_teacher_fields(teacher, &mut record);
        tagged(record, MemberKind::Teacher)
    }

    fn decode(record: &Record) -> Result<Teacher, CodecError> {
        if read_kind(record) == MemberKind::Student {
            return Err(CodecError::VariantMismatch {
                expected: MemberKind::Teacher.as_str(),
                found: MemberKind::Student.as_str(),
            });
        }
        Ok(decode_teacher_fields(decode_member(record)?, record))
    }
}
