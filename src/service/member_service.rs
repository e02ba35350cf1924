use std::sync::Arc;
use crate::{
    domain::*,
    error::{AppError, Result},
    repository::{EventRepository, StudentRepository, TeacherRepository},
};

pub struct MemberService {
    students: Arc<dyn StudentRepository>,
    teachers: Arc<dyn TeacherRepository>,
    events: Arc<dyn EventRepository>,
}

impl MemberService {
    pub fn new(
        students: Arc<dyn StudentRepository>,
        teachers: Arc<dyn TeacherRepository>,
        events: Arc<dyn EventRepository>,
    ) -> Self {
        Self { students, teachers, events }
    }

    pub fn activate_student(&self, student_id: i64) -> Result<Student> {
        let mut student = self.students.find_by_id(student_id)
            .ok_or_else(|| AppError::NotFound(format!("Student #{} not found", student_id)))?;

        if student.check_subscription() == SubscriptionStatus::Active {
            return Ok(student);
        }

        student.update_subscription_status(SubscriptionStatus::Active);
        self.students.save(&student)?;

        tracing::info!(student_id, "student subscription activated");
        Ok(student)
    }

    pub fn deactivate_student(&self, student_id: i64) -> Result<Student> {
        let mut student = self.students.find_by_id(student_id)
            .ok_or_else(|| AppError::NotFound(format!("Student #{} not found", student_id)))?;

        student.update_subscription_status(SubscriptionStatus::Inactive);
        self.students.save(&student)?;

        tracing::info!(student_id, "student subscription deactivated");
        Ok(student)
    }

    /// Records `event_name` on the teacher; the event must already exist.
    pub fn assign_teacher_to_event(&self, teacher_id: i64, event_name: &str) -> Result<Teacher> {
        let mut teacher = self.teachers.find_by_id(teacher_id)
            .ok_or_else(|| AppError::NotFound(format!("Teacher #{} not found", teacher_id)))?;

        if self.events.find_by_name(event_name).is_none() {
            return Err(AppError::NotFound(format!("Event '{}' not found", event_name)));
        }

        if teacher.assign_event(event_name) {
            self.teachers.save(&teacher)?;
            tracing::info!(teacher_id, event_name, "teacher assigned to event");
        }

        Ok(teacher)
    }
}
