use chrono::Utc;
use db::models::{
    class::Model as ClassModel,
    class_member::Model as ClassMember,
    project_stage::{Model as Stage, StageStatus},
    student_project::{
        ActiveModel, Model as Project, NewProject, ProjectFilter, ProjectStatus, ProjectType,
    },
    Assignment as AssignmentEntity, Class, ProjectStage, StudentProject,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, IntoActiveModel,
    TransactionTrait,
};
use tracing::info;

use crate::access;
use crate::error::{ServiceError, ServiceResult};
use crate::stage;

/// Stage names seeded, in order, for every script project.
pub const SCRIPT_STAGES: [&str; 3] = ["concept understanding", "feature design", "bot development"];

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

#[derive(Debug, Clone)]
pub struct CreateProject {
    pub space_id: i64,
    pub project_type: ProjectType,
    pub source_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub class_id: Option<i64>,
    pub assignment_id: Option<i64>,
}

/// Result of finishing a stage.
#[derive(Debug, Clone)]
pub struct StageAdvance {
    pub completed: Stage,
    /// The stage that was started, if one follows.
    pub next_stage: Option<Stage>,
    pub project: Project,
}

/// A page of results with the total match count.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

/// Clamps paging input: page starts at 1, size defaults to 20 and is capped at 100.
pub fn normalize_paging(page: Option<u64>, page_size: Option<u64>) -> (u64, u64) {
    let page = page.filter(|p| *p > 0).unwrap_or(1);
    let page_size = page_size
        .filter(|s| *s > 0)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .min(MAX_PAGE_SIZE);
    (page, page_size)
}

#[derive(Debug, Clone)]
pub struct ProjectService {
    db: DatabaseConnection,
}

impl ProjectService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a project owned by `user_id`. Script projects get their three stages seeded
    /// in the same transaction: stage 1 in progress, the rest not started.
    ///
    /// When an assignment is given, the project is attached to the assignment's class and
    /// the caller must belong to that class.
    pub async fn create_project(&self, user_id: i64, req: CreateProject) -> ServiceResult<Project> {
        if req.title.trim().is_empty() {
            return Err(ServiceError::invalid("Title is required"));
        }

        let mut class_id = req.class_id;
        if let Some(assignment_id) = req.assignment_id {
            let assignment = AssignmentEntity::find_by_id(assignment_id)
                .one(&self.db)
                .await?
                .ok_or(ServiceError::NotFound("Assignment"))?;
            if class_id.is_some_and(|id| id != assignment.class_id) {
                return Err(ServiceError::invalid(
                    "Assignment does not belong to the given class",
                ));
            }
            class_id = Some(assignment.class_id);
        }

        if let Some(id) = class_id {
            let class = Class::find_by_id(id)
                .one(&self.db)
                .await?
                .ok_or(ServiceError::NotFound("Class"))?;
            if class.space_id != req.space_id {
                return Err(ServiceError::invalid("Class does not belong to this space"));
            }
            if !is_member(&self.db, &class, user_id).await? {
                return Err(ServiceError::forbidden("You are not a member of this class"));
            }
        }

        let txn = self.db.begin().await?;

        let project = Project::create(
            &txn,
            NewProject {
                user_id,
                space_id: req.space_id,
                project_type: req.project_type,
                source_id: req.source_id,
                title: req.title,
                description: req.description,
                class_id,
                assignment_id: req.assignment_id,
            },
        )
        .await?;

        if project.project_type == ProjectType::Script {
            for (idx, name) in SCRIPT_STAGES.iter().enumerate() {
                let status = if idx == 0 {
                    StageStatus::InProgress
                } else {
                    StageStatus::NotStarted
                };
                Stage::create(&txn, project.id, idx as i32 + 1, name, status).await?;
            }
        }

        txn.commit().await?;

        info!(project_id = project.id, user_id, kind = %project.project_type, "project created");
        Ok(project)
    }

    pub async fn get_project(&self, project_id: i64) -> ServiceResult<Project> {
        StudentProject::find_by_id(project_id)
            .one(&self.db)
            .await?
            .ok_or(ServiceError::NotFound("Project"))
    }

    /// Loads a project the caller may read (owner or class staff).
    pub async fn get_visible_project(&self, project_id: i64, user_id: i64) -> ServiceResult<Project> {
        let project = self.get_project(project_id).await?;
        access::ensure_project_viewer(&self.db, &project, user_id).await?;
        Ok(project)
    }

    /// Loads a project the caller owns.
    pub async fn get_owned_project(&self, project_id: i64, user_id: i64) -> ServiceResult<Project> {
        let project = self.get_project(project_id).await?;
        access::ensure_project_owner(&project, user_id)?;
        Ok(project)
    }

    pub async fn list_user_projects(
        &self,
        user_id: i64,
        space_id: i64,
        filter: &ProjectFilter,
        page: Option<u64>,
        page_size: Option<u64>,
    ) -> ServiceResult<Page<Project>> {
        let (page, page_size) = normalize_paging(page, page_size);
        let (items, total) =
            Project::list_for_user(&self.db, user_id, space_id, filter, page, page_size).await?;
        Ok(Page { items, total, page, page_size })
    }

    pub async fn get_project_stages(&self, project_id: i64, user_id: i64) -> ServiceResult<Vec<Stage>> {
        let project = self.get_visible_project(project_id, user_id).await?;
        Ok(Stage::list_for_project(&self.db, project.id).await?)
    }

    pub async fn get_stage(&self, project_id: i64, stage_order: i32) -> ServiceResult<Stage> {
        Stage::find_by_order(&self.db, project_id, stage_order)
            .await?
            .ok_or(ServiceError::NotFound("Stage"))
    }

    /// Completes stage `stage_order` and starts the one after it, atomically.
    ///
    /// Script projects move their `current_stage` forward. When no stage follows, the
    /// project itself is completed.
    pub async fn advance_stage(
        &self,
        project_id: i64,
        user_id: i64,
        stage_order: i32,
        output: String,
        score: f64,
        feedback: String,
    ) -> ServiceResult<StageAdvance> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let project = StudentProject::find_by_id(project_id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::NotFound("Project"))?;
        access::ensure_project_owner(&project, user_id)?;
        if project.status != ProjectStatus::InProgress {
            return Err(ServiceError::InvalidTransition(format!(
                "project is {} and cannot advance",
                project.status
            )));
        }

        let current = Stage::find_by_order(&txn, project_id, stage_order)
            .await?
            .ok_or(ServiceError::NotFound("Stage"))?;
        // Stages run one at a time; only the active stage or an earlier one may be completed.
        if stage_order > project.current_stage {
            return Err(ServiceError::InvalidTransition(format!(
                "stage {stage_order} has not been reached; the current stage is {}",
                project.current_stage
            )));
        }
        let completed = stage::complete(current, output, score, feedback, now)
            .update(&txn)
            .await?;

        let following = Stage::find_by_order(&txn, project_id, stage_order + 1).await?;

        let project_type = project.project_type;
        let current_stage = project.current_stage;
        let mut active: ActiveModel = project.into_active_model();

        let next_stage = match following {
            Some(next) => {
                // Re-completing an earlier stage leaves an already running successor alone.
                let started = if next.status == StageStatus::NotStarted {
                    stage::start(next, now)?.update(&txn).await?
                } else {
                    next
                };
                if project_type == ProjectType::Script && stage_order == current_stage {
                    active.current_stage = Set(current_stage + 1);
                }
                Some(started)
            }
            None => {
                active.status = Set(ProjectStatus::Completed);
                active.completed_at = Set(Some(now));
                None
            }
        };
        active.updated_at = Set(now);
        let project = active.update(&txn).await?;

        txn.commit().await?;

        info!(
            project_id,
            stage_order,
            score,
            finished = next_stage.is_none(),
            "stage completed"
        );
        Ok(StageAdvance { completed, next_stage, project })
    }

    /// Saves a draft of a stage's output. Only the project owner may do this.
    pub async fn update_stage_output(
        &self,
        stage_id: i64,
        user_id: i64,
        content: String,
    ) -> ServiceResult<Stage> {
        let current = ProjectStage::find_by_id(stage_id)
            .one(&self.db)
            .await?
            .ok_or(ServiceError::NotFound("Stage"))?;
        self.get_owned_project(current.project_id, user_id).await?;
        Ok(stage::update_output(current, content, Utc::now())
            .update(&self.db)
            .await?)
    }

    /// Marks an assignment project as submitted. Resubmitting moves the timestamp.
    pub async fn submit_project(&self, project_id: i64, user_id: i64) -> ServiceResult<Project> {
        let project = self.get_owned_project(project_id, user_id).await?;
        if project.assignment_id.is_none() {
            return Err(ServiceError::invalid("project is not an assignment"));
        }

        let now = Utc::now();
        let mut active = project.into_active_model();
        active.submitted_at = Set(Some(now));
        active.updated_at = Set(now);
        let project = active.update(&self.db).await?;

        info!(project_id, user_id, "project submitted");
        Ok(project)
    }
}

async fn is_member(db: &DatabaseConnection, class: &ClassModel, user_id: i64) -> ServiceResult<bool> {
    if class.teacher_id == user_id {
        return Ok(true);
    }
    Ok(ClassMember::find(db, class.id, user_id).await?.is_some())
}
