use chrono::NaiveDate;
use clubhouse::{
    domain::{Member, MemberKind, Person, Student, SubscriptionStatus, Teacher},
    repository::{
        JsonMemberRepository, JsonStudentRepository, JsonTeacherRepository, MemberRepository,
        StudentRepository, TeacherRepository,
    },
};
use serde_json::json;
use tempfile::TempDir;

fn member(name: &str, email: &str) -> Member {
    Member::new(
        name,
        email,
        "0600000000",
        "1 Rue de la Paix",
        NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
    )
}

#[test]
fn test_member_crud() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let repo = JsonMemberRepository::new(dir.path().join("members.json"))?;

    // Fresh store
    assert!(repo.load_all().is_empty());

    // Create
    let mut alice = member("Alice Martin", "alice@example.com");
    alice.add_skill("Python");
    repo.save(&Person::Member(alice.clone()))?;

    // Find by email
    let found = repo.find_by_email("alice@example.com");
    assert_eq!(found, Some(Person::Member(alice.clone())));
    assert!(repo.find_by_email("nobody@example.com").is_none());

    // Update by key
    alice.add_skill("Java");
    alice.phone = "0799999999".to_string();
    repo.save(&Person::Member(alice.clone()))?;
    let all = repo.load_all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].member().phone, "0799999999");
    assert_eq!(all[0].member().skills.as_slice(), ["Python", "Java"]);

    // Delete
    repo.delete("alice@example.com")?;
    assert!(repo.find_by_email("alice@example.com").is_none());
    assert!(repo.load_all().is_empty());

    Ok(())
}

#[test]
fn test_member_store_holds_every_variant() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let repo = JsonMemberRepository::new(dir.path().join("members.json"))?;

    let people = vec![
        Person::Member(member("Alice Martin", "alice@example.com")),
        Person::Student(Student::new(member("Bob Durand", "bob@example.com"), 1001)),
        Person::Teacher(Teacher::new(member("David Petit", "david@example.com"), 1, "Physics")),
    ];
    for person in &people {
        repo.save(person)?;
    }

    // A fresh handle on the same file reconstructs the concrete variants.
    let reopened = JsonMemberRepository::new(dir.path().join("members.json"))?;
    assert_eq!(reopened.load_all(), people);

    assert_eq!(reopened.find_by_kind(MemberKind::Student).len(), 1);
    assert_eq!(reopened.find_by_kind(MemberKind::Teacher)[0].email(), "david@example.com");
    assert_eq!(reopened.find_all_by("specialization", json!("Physics")).len(), 1);

    Ok(())
}

#[test]
fn test_student_upsert_replaces_by_id() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let repo = JsonStudentRepository::new(dir.path().join("students.json"))?;

    let pending = Student::new(member("Bob Durand", "bob@example.com"), 1001);
    repo.save(&pending)?;
    repo.save(&Student::new(member("Chloé Bernard", "chloe@example.com"), 1002))?;
    assert_eq!(repo.load_all().len(), 2);

    let mut active = pending.clone();
    active.update_subscription_status(SubscriptionStatus::Active);
    repo.save(&active)?;

    assert_eq!(repo.load_all().len(), 2);
    let found = repo.find_by_id(1001).expect("student 1001");
    assert_eq!(found.subscription_status, SubscriptionStatus::Active);
    assert_eq!(repo.find_by_email("chloe@example.com").map(|s| s.student_id), Some(1002));

    let active_students = repo.find_by_subscription_status(SubscriptionStatus::Active);
    assert_eq!(active_students.len(), 1);
    assert_eq!(active_students[0].student_id, 1001);

    // Deleting an unknown id changes nothing.
    repo.delete(9999)?;
    assert_eq!(repo.load_all().len(), 2);

    repo.delete(1001)?;
    assert!(repo.find_by_id(1001).is_none());
    assert_eq!(repo.load_all().len(), 1);

    Ok(())
}

#[test]
fn test_teacher_lists_survive_storage() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let repo = JsonTeacherRepository::new(dir.path().join("teachers.json"))?;

    let mut teacher = Teacher::new(member("David Petit", "david@example.com"), 7, "Mathematics");
    teacher.assign_group("Group A");
    teacher.assign_group("Group A");
    teacher.assign_group("Group B");
    teacher.assign_event("Science Fair");
    teacher.member.add_skill("Python");
    teacher.member.add_skill("Python");
    teacher.member.add_skill("Java");
    repo.save(&teacher)?;

    let found = repo.find_by_id(7).expect("teacher 7");
    assert_eq!(found, teacher);
    assert_eq!(found.groups.as_slice(), ["Group A", "Group B"]);
    assert_eq!(found.member.skills.as_slice(), ["Python", "Java"]);
    assert_eq!(repo.find_by_specialization("Mathematics").len(), 1);
    assert!(repo.find_by_specialization("History").is_empty());

    Ok(())
}

#[test]
fn test_scoped_repositories_skip_bad_records() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("students.json");
    std::fs::write(
        &path,
        json!([
            {"full_name": "Bob Durand", "email": "bob@example.com", "phone": "", "address": "",
             "join_date": "2024-09-01", "student_id": 1001, "subscription_status": "Active",
             "type": "Student"},
            {"full_name": "David Petit", "email": "david@example.com", "phone": "", "address": "",
             "join_date": "2024-09-01", "teacher_id": 1, "kind": "Teacher"},
            {"full_name": "No Date", "email": "nodate@example.com", "student_id": 1003},
        ])
        .to_string(),
    )?;

    let repo = JsonStudentRepository::new(&path)?;
    let students = repo.load_all();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].student_id, 1001);
    assert_eq!(students[0].subscription_status, SubscriptionStatus::Active);

    Ok(())
}

#[test]
fn test_corrupt_member_file_loads_empty_and_recovers() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("members.json");
    std::fs::write(&path, "[{ this is not json")?;

    let repo = JsonMemberRepository::new(&path)?;
    assert!(repo.load_all().is_empty());
    assert!(repo.find_by_email("alice@example.com").is_none());

    // The next save rewrites the file with a valid collection.
    repo.save(&Person::Member(member("Alice Martin", "alice@example.com")))?;
    assert_eq!(repo.load_all().len(), 1);

    Ok(())
}
