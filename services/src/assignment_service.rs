use chrono::{DateTime, Utc};
use db::models::{
    assignment::{Model as Assignment, NewAssignment},
    class_member::Model as ClassMember,
    student_project::{Model as Project, ProjectType},
    Assignment as AssignmentEntity, Class,
};
use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::info;

use crate::access;
use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone)]
pub struct CreateAssignment {
    pub assignment_type: ProjectType,
    pub source_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

/// A student's view of one assignment.
#[derive(Debug, Clone)]
pub struct AssignmentStatus {
    pub assignment: Assignment,
    pub project: Option<Project>,
    pub is_submitted: bool,
    pub is_overdue: bool,
}

#[derive(Debug, Clone)]
pub struct AssignmentService {
    db: DatabaseConnection,
}

impl AssignmentService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Staff publish assignments to a class.
    pub async fn create_assignment(
        &self,
        class_id: i64,
        teacher_id: i64,
        req: CreateAssignment,
    ) -> ServiceResult<Assignment> {
        if req.title.trim().is_empty() {
            return Err(ServiceError::invalid("Title is required"));
        }
        let class = Class::find_by_id(class_id)
            .one(&self.db)
            .await?
            .ok_or(ServiceError::NotFound("Class"))?;
        access::ensure_class_staff(&self.db, &class, teacher_id).await?;

        let assignment = Assignment::create(
            &self.db,
            NewAssignment {
                class_id: class.id,
                teacher_id,
                assignment_type: req.assignment_type,
                source_id: req.source_id,
                title: req.title,
                description: req.description,
                due_date: req.due_date,
            },
        )
        .await?;

        info!(class_id, assignment_id = assignment.id, "assignment published");
        Ok(assignment)
    }

    /// Any class member may see the class's assignments.
    pub async fn list_for_class(&self, class_id: i64, user_id: i64) -> ServiceResult<Vec<Assignment>> {
        let class = Class::find_by_id(class_id)
            .one(&self.db)
            .await?
            .ok_or(ServiceError::NotFound("Class"))?;
        if class.teacher_id != user_id && ClassMember::find(&self.db, class.id, user_id).await?.is_none() {
            return Err(ServiceError::forbidden("You are not a member of this class"));
        }
        Ok(Assignment::list_for_class(&self.db, class.id).await?)
    }

    pub async fn get_assignment(&self, assignment_id: i64) -> ServiceResult<Assignment> {
        AssignmentEntity::find_by_id(assignment_id)
            .one(&self.db)
            .await?
            .ok_or(ServiceError::NotFound("Assignment"))
    }

    /// Where a student stands on an assignment: their project (if any), submission and deadline.
    pub async fn student_status(&self, assignment_id: i64, user_id: i64) -> ServiceResult<AssignmentStatus> {
        let assignment = self.get_assignment(assignment_id).await?;
        if ClassMember::find(&self.db, assignment.class_id, user_id).await?.is_none() {
            return Err(ServiceError::forbidden("You are not a member of this class"));
        }

        let project = Project::find_for_assignment(&self.db, assignment.id, user_id).await?;
        let is_submitted = project.as_ref().is_some_and(|p| p.submitted_at.is_some());
        let is_overdue = !is_submitted && assignment.is_overdue(Utc::now());

        Ok(AssignmentStatus { assignment, project, is_submitted, is_overdue })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project_service::{CreateProject, ProjectService};
    use crate::test_support::{seed_class, seed_member};
    use chrono::Duration;
    use db::models::class_member::MemberRole;
    use db::test_utils::setup_test_db;

    fn req(due_date: Option<DateTime<Utc>>) -> CreateAssignment {
        CreateAssignment {
            assignment_type: ProjectType::Script,
            source_id: 3,
            title: "Build a FAQ bot".into(),
            description: None,
            due_date,
        }
    }

    #[tokio::test]
    async fn staff_publish_and_members_list() {
        let db = setup_test_db().await;
        let class = seed_class(&db, 1, 100, "ASG1").await;
        seed_member(&db, class.id, 10, MemberRole::Student).await;
        let service = AssignmentService::new(db.clone());

        let later = service
            .create_assignment(class.id, 100, req(Some(Utc::now() + Duration::days(7))))
            .await
            .unwrap();
        let sooner = service
            .create_assignment(class.id, 100, req(Some(Utc::now() + Duration::days(1))))
            .await
            .unwrap();
        let undated = service.create_assignment(class.id, 100, req(None)).await.unwrap();

        let listed = service.list_for_class(class.id, 10).await.unwrap();
        let ids: Vec<_> = listed.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![sooner.id, later.id, undated.id]);

        let err = service.create_assignment(class.id, 10, req(None)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
        let err = service.list_for_class(class.id, 77).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[tokio::test]
    async fn student_status_tracks_project_and_deadline() {
        let db = setup_test_db().await;
        let class = seed_class(&db, 1, 100, "ASG2").await;
        seed_member(&db, class.id, 10, MemberRole::Student).await;
        let service = AssignmentService::new(db.clone());
        let projects = ProjectService::new(db.clone());

        let overdue = service
            .create_assignment(class.id, 100, req(Some(Utc::now() - Duration::days(1))))
            .await
            .unwrap();

        let status = service.student_status(overdue.id, 10).await.unwrap();
        assert!(status.project.is_none());
        assert!(!status.is_submitted);
        assert!(status.is_overdue);

        let project = projects
            .create_project(
                10,
                CreateProject {
                    space_id: 1,
                    project_type: ProjectType::Script,
                    source_id: 3,
                    title: "FAQ bot".into(),
                    description: None,
                    class_id: None,
                    assignment_id: Some(overdue.id),
                },
            )
            .await
            .unwrap();
        projects.submit_project(project.id, 10).await.unwrap();

        let status = service.student_status(overdue.id, 10).await.unwrap();
        assert_eq!(status.project.map(|p| p.id), Some(project.id));
        assert!(status.is_submitted);
        assert!(!status.is_overdue);

        let err = service.student_status(overdue.id, 55).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }
}
