use tracing::info;

use holeout_domain::id::CourseId;
use holeout_domain::money::Pence;

use crate::domain::repository::CourseRepository;
use crate::domain::types::Course;
use crate::error::LedgerError;

pub struct ListCoursesUseCase<C: CourseRepository> {
    pub courses: C,
}

impl<C: CourseRepository> ListCoursesUseCase<C> {
    pub async fn execute(&self) -> Result<Vec<Course>, LedgerError> {
        self.courses.list().await
    }
}

pub struct GetCourseUseCase<C: CourseRepository> {
    pub courses: C,
}

impl<C: CourseRepository> GetCourseUseCase<C> {
    pub async fn execute(&self, course_id: CourseId) -> Result<Course, LedgerError> {
        self.courses
            .find_by_id(course_id)
            .await?
            .ok_or(LedgerError::CourseNotFound)
    }
}

/// Admin: set or clear a course's hole-in-one prize pot.
pub struct UpdateCoursePrizeUseCase<C: CourseRepository> {
    pub courses: C,
}

impl<C: CourseRepository> UpdateCoursePrizeUseCase<C> {
    pub async fn execute(
        &self,
        course_id: CourseId,
        prize_amount: Option<Pence>,
    ) -> Result<Course, LedgerError> {
        if prize_amount.is_some_and(Pence::is_negative) {
            return Err(LedgerError::InvalidInput(
                "prize_amount cannot be negative".to_owned(),
            ));
        }
        if !self
            .courses
            .update_prize_amount(course_id, prize_amount)
            .await?
        {
            return Err(LedgerError::CourseNotFound);
        }
        info!(%course_id, prize_amount = prize_amount.map(|p| p.0), "course prize updated");
        self.courses
            .find_by_id(course_id)
            .await?
            .ok_or(LedgerError::CourseNotFound)
    }
}
