use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Insertion-ordered list of distinct, non-blank strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct UniqueList(Vec<String>);

impl UniqueList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds `item` (trimmed) unless it is blank or already present.
    pub fn insert(&mut self, item: &str) -> bool {
        let item = item.trim();
        if item.is_empty() || self.contains(item) {
            return false;
        }
        self.0.push(item.to_string());
        true
    }

    pub fn remove(&mut self, item: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|existing| existing != item);
        self.0.len() != before
    }

    pub fn contains(&self, item: &str) -> bool {
        self.0.iter().any(|existing| existing == item)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for UniqueList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = UniqueList::new();
        for item in iter {
            list.insert(item.as_ref());
        }
        list
    }
}

impl From<Vec<String>> for UniqueList {
    fn from(items: Vec<String>) -> Self {
        items.into_iter().collect()
    }
}

impl From<UniqueList> for Vec<String> {
    fn from(list: UniqueList) -> Self {
        list.0
    }
}

impl<'a> IntoIterator for &'a UniqueList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub join_date: NaiveDate,
    pub skills: UniqueList,
    pub interests: UniqueList,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactUpdate {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl Member {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
        join_date: NaiveDate,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            phone: phone.into(),
            address: address.into(),
            join_date,
            skills: UniqueList::new(),
            interests: UniqueList::new(),
        }
    }

    pub fn add_skill(&mut self, skill: &str) -> bool {
        self.skills.insert(skill)
    }

    pub fn add_interest(&mut self, interest: &str) -> bool {
        self.interests.insert(interest)
    }

    pub fn update_contact(&mut self, update: ContactUpdate) {
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
    }

    pub fn display(&self) -> String {
        format!(
            "{} | {} | {} | {} | {}",
            self.full_name,
            self.email,
            self.phone,
            self.address,
            self.join_date.format("%Y-%m-%d")
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubscriptionStatus {
    #[default]
    Pending,
    Active,
    Inactive,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Pending => "Pending",
            SubscriptionStatus::Active => "Active",
            SubscriptionStatus::Inactive => "Inactive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub member: Member,
    pub student_id: i64,
    pub subscription_status: SubscriptionStatus,
}

impl Student {
    pub fn new(member: Member, student_id: i64) -> Self {
        Self {
            member,
            student_id,
            subscription_status: SubscriptionStatus::Pending,
        }
    }

    pub fn check_subscription(&self) -> SubscriptionStatus {
        self.subscription_status
    }

    pub fn update_subscription_status(&mut self, status: SubscriptionStatus) {
        self.subscription_status = status;
    }

    pub fn display(&self) -> String {
        format!(
            "#{} {} [{}]",
            self.student_id,
            self.member.full_name,
            self.subscription_status.as_str()
        )
    }
}

pub const DEFAULT_SPECIALIZATION: &str = "General";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub member: Member,
    pub teacher_id: i64,
    pub specialization: String,
    pub groups: UniqueList,
    pub assigned_events: UniqueList,
}

impl Teacher {
    pub fn new(member: Member, teacher_id: i64, specialization: impl Into<String>) -> Self {
        Self {
            member,
            teacher_id,
            specialization: specialization.into(),
            groups: UniqueList::new(),
            assigned_events: UniqueList::new(),
        }
    }

    pub fn assign_group(&mut self, group_name: &str) -> bool {
        self.groups.insert(group_name)
    }

    pub fn remove_group(&mut self, group_name: &str) -> bool {
        self.groups.remove(group_name)
    }

    pub fn assign_event(&mut self, event_name: &str) -> bool {
        self.assigned_events.insert(event_name)
    }

    pub fn assigned_events(&self) -> &[String] {
        self.assigned_events.as_slice()
    }

    pub fn display(&self) -> String {
        format!(
            "Teacher #{} | {} | {}",
            self.teacher_id, self.member.full_name, self.specialization
        )
    }

    pub fn display_groups(&self) -> String {
        if self.groups.is_empty() {
            format!("Groups of {}: none", self.member.full_name)
        } else {
            format!(
                "Groups of {}: {}",
                self.member.full_name,
                self.groups.as_slice().join(", ")
            )
        }
    }
}

/// Discriminant of the member family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberKind {
    Member,
    Student,
    Teacher,
}

impl MemberKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Member => "Member",
            MemberKind::Student => "Student",
            MemberKind::Teacher => "Teacher",
        }
    }
}

/// Any record of the member family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Person {
    Member(Member),
    Student(Student),
    Teacher(Teacher),
}

impl Person {
    pub fn kind(&self) -> MemberKind {
        match self {
            Person::Member(_) => MemberKind::Member,
            Person::Student(_) => MemberKind::Student,
            Person::Teacher(_) => MemberKind::Teacher,
        }
    }

    pub fn member(&self) -> &Member {
        match self {
            Person::Member(member) => member,
            Person::Student(student) => &student.member,
            Person::Teacher(teacher) => &teacher.member,
        }
    }

    pub fn member_mut(&mut self) -> &mut Member {
        match self {
            Person::Member(member) => member,
            Person::Student(student) => &mut student.member,
            Person::Teacher(teacher) => &mut teacher.member,
        }
    }

    pub fn email(&self) -> &str {
        &self.member().email
    }

    pub fn display(&self) -> String {
        match self {
            Person::Member(member) => member.display(),
            Person::Student(student) => student.display(),
            Person::Teacher(teacher) => teacher.display(),
        }
    }
}

impl From<Member> for Person {
    fn from(member: Member) -> Self {
        Person::Member(member)
    }
}

impl From<Student> for Person {
    fn from(student: Student) -> Self {
        Person::Student(student)
    }
}

impl From<Teacher> for Person {
    fn from(teacher: Teacher) -> Self {
        Person::Teacher(teacher)
    }
}
