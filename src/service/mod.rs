pub mod member_service;
pub mod finance_service;

use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::Settings;
use crate::domain::Event;
use crate::error::Result;
use crate::repository::*;

pub use finance_service::FinanceService;
pub use member_service::MemberService;

pub struct ServiceContext {
    pub member_repo: Arc<dyn MemberRepository>,
    pub student_repo: Arc<dyn StudentRepository>,
    pub teacher_repo: Arc<dyn TeacherRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub subscription_repo: Arc<dyn SubscriptionRepository>,
    pub member_service: Arc<MemberService>,
    pub finance_service: Arc<FinanceService>,
}

/// Counts and totals across every store.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub members: usize,
    pub students: usize,
    pub teachers: usize,
    pub events: usize,
    pub subscriptions: usize,
    pub total_revenue: f64,
    pub upcoming_events: Vec<Event>,
}

impl ServiceContext {
    pub fn new(
        member_repo: Arc<dyn MemberRepository>,
        student_repo: Arc<dyn StudentRepository>,
        teacher_repo: Arc<dyn TeacherRepository>,
        event_repo: Arc<dyn EventRepository>,
        subscription_repo: Arc<dyn SubscriptionRepository>,
    ) -> Self {
        let member_service = Arc::new(MemberService::new(
            student_repo.clone(),
            teacher_repo.clone(),
            event_repo.clone(),
        ));
        let finance_service = Arc::new(FinanceService::new(subscription_repo.clone()));

        Self {
            member_repo,
            student_repo,
            teacher_repo,
            event_repo,
            subscription_repo,
            member_service,
            finance_service,
        }
    }

    /// Opens one JSON store per family under the configured data directory.
    pub fn open(settings: &Settings) -> Result<Self> {
        let storage = &settings.storage;
        tracing::info!(data_dir = %storage.data_dir.display(), "opening record stores");

        Ok(Self::new(
            Arc::new(JsonMemberRepository::new(storage.members_path())?),
            Arc::new(JsonStudentRepository::new(storage.students_path())?),
            Arc::new(JsonTeacherRepository::new(storage.teachers_path())?),
            Arc::new(JsonEventRepository::new(storage.events_path())?),
            Arc::new(JsonSubscriptionRepository::new(storage.subscriptions_path())?),
        ))
    }

    /// Upcoming events are those dated `today` or later, soonest first.
    pub fn summary(&self, today: NaiveDate) -> Summary {
        let events = self.event_repo.load_all();
        let mut upcoming_events: Vec<Event> = events
            .iter()
            .filter(|event| event.event_date >= today)
            .cloned()
            .collect();
        upcoming_events.sort_by_key(|event| event.event_date);

        Summary {
            members: self.member_repo.load_all().len(),
            students: self.student_repo.load_all().len(),
            teachers: self.teacher_repo.load_all().len(),
            events: events.len(),
            subscriptions: self.subscription_repo.load_all().len(),
            total_revenue: self.subscription_repo.total_revenue(),
            upcoming_events,
        }
    }
}
