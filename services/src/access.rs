//! Who may see or change classes and projects.

use db::models::{
    class::Model as Class,
    class_member::{MemberRole, Model as ClassMember},
    student_project::Model as Project,
};
use sea_orm::{ConnectionTrait, DbErr, EntityTrait};

use crate::error::{ServiceError, ServiceResult};

pub async fn class_role<C>(db: &C, class_id: i64, user_id: i64) -> Result<Option<MemberRole>, DbErr>
where
    C: ConnectionTrait,
{
    Ok(ClassMember::find(db, class_id, user_id).await?.map(|m| m.role))
}

/// The owning teacher, or any member holding a teacher/assistant role.
pub async fn is_class_staff<C>(db: &C, class: &Class, user_id: i64) -> Result<bool, DbErr>
where
    C: ConnectionTrait,
{
    if class.teacher_id == user_id {
        return Ok(true);
    }
    Ok(class_role(db, class.id, user_id)
        .await?
        .is_some_and(MemberRole::is_staff))
}

pub async fn ensure_class_staff<C>(db: &C, class: &Class, user_id: i64) -> ServiceResult<()>
where
    C: ConnectionTrait,
{
    if is_class_staff(db, class, user_id).await? {
        Ok(())
    } else {
        Err(ServiceError::forbidden("Only class staff can perform this action"))
    }
}

pub fn ensure_project_owner(project: &Project, user_id: i64) -> ServiceResult<()> {
    if project.user_id == user_id {
        Ok(())
    } else {
        Err(ServiceError::forbidden("You do not own this project"))
    }
}

/// Owners may always read their project; staff of the project's class may read it too.
pub async fn ensure_project_viewer<C>(db: &C, project: &Project, user_id: i64) -> ServiceResult<()>
where
    C: ConnectionTrait,
{
    if project.user_id == user_id {
        return Ok(());
    }
    if let Some(class_id) = project.class_id {
        if let Some(class) = db::models::Class::find_by_id(class_id).one(db).await? {
            if is_class_staff(db, &class, user_id).await? {
                return Ok(());
            }
        }
    }
    Err(ServiceError::forbidden("You cannot view this project"))
}
