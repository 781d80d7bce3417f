use chrono::{DateTime, NaiveDate, Utc};
use db::models::{
    class::{ClassStatus, Model as Class, NewClass},
    class_invite_code::Model as InviteCode,
    class_member::{MemberCounts, MemberRole, Model as ClassMember},
    Class as ClassEntity,
};
use rand::RngCore;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, IntoActiveModel,
    TransactionTrait,
};
use tracing::{info, warn};

use crate::access;
use crate::error::{is_unique_violation, ServiceError, ServiceResult};

#[derive(Debug, Clone)]
pub struct CreateClass {
    pub space_id: i64,
    pub name: String,
    pub code: String,
    pub description: String,
    pub semester: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateClass {
    pub name: Option<String>,
    pub description: Option<String>,
    pub semester: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<ClassStatus>,
}

#[derive(Debug, Clone)]
pub struct NewMember {
    pub user_id: i64,
    pub role: MemberRole,
    pub student_no: Option<String>,
}

/// Outcome of a bulk add. Users that were already members are listed in `failed_users`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddMembersOutcome {
    pub success: usize,
    pub failed: usize,
    pub failed_users: Vec<i64>,
}

#[derive(Debug, Clone)]
pub struct ClassSummary {
    pub class: Class,
    pub member_count: u64,
    pub student_count: u64,
}

#[derive(Debug, Clone)]
pub struct ClassDetail {
    pub class: Class,
    pub my_role: MemberRole,
    pub members: Vec<ClassMember>,
}

#[derive(Debug, Clone)]
pub struct CreateInviteCode {
    pub role: MemberRole,
    /// 0 means unlimited.
    pub max_uses: i32,
    pub expires_at: Option<DateTime<Utc>>,
}

/// 16 random bytes, hex encoded.
pub fn generate_invite_code() -> String {
    let mut buf = [0u8; 16];
    rand::rng().fill_bytes(&mut buf);
    hex::encode(buf)
}

#[derive(Debug, Clone)]
pub struct ClassService {
    db: DatabaseConnection,
}

impl ClassService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a class owned by `teacher_id` and enrols the teacher as a member.
    ///
    /// Enrolment failure does not undo the class; it is logged instead.
    pub async fn create_class(&self, teacher_id: i64, req: CreateClass) -> ServiceResult<Class> {
        if req.name.trim().is_empty() || req.code.trim().is_empty() {
            return Err(ServiceError::invalid("Class name and code are required"));
        }
        check_date_range(req.start_date, req.end_date)?;

        if Class::find_by_code(&self.db, &req.code).await?.is_some() {
            return Err(ServiceError::Conflict("Class code already exists".into()));
        }

        let class = Class::create(
            &self.db,
            NewClass {
                space_id: req.space_id,
                name: req.name,
                code: req.code,
                description: req.description,
                teacher_id,
                semester: req.semester,
                start_date: req.start_date,
                end_date: req.end_date,
            },
        )
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                ServiceError::Conflict("Class code already exists".into())
            } else {
                err.into()
            }
        })?;

        if let Err(err) =
            ClassMember::create(&self.db, class.id, teacher_id, MemberRole::Teacher, None).await
        {
            warn!(class_id = class.id, teacher_id, error = %err, "failed to enrol class teacher");
        }

        info!(class_id = class.id, teacher_id, code = %class.code, "class created");
        Ok(class)
    }

    /// Classes the teacher owns in a space, with member and student counts.
    pub async fn my_classes(&self, teacher_id: i64, space_id: i64) -> ServiceResult<Vec<ClassSummary>> {
        let classes = Class::find_by_teacher(&self.db, teacher_id, space_id).await?;
        self.summarize(classes).await
    }

    pub async fn get_class(&self, class_id: i64) -> ServiceResult<Class> {
        ClassEntity::find_by_id(class_id)
            .one(&self.db)
            .await?
            .filter(|c| c.status != ClassStatus::Deleted)
            .ok_or(ServiceError::NotFound("Class"))
    }

    /// Class detail for staff.
    pub async fn get_class_for_staff(&self, class_id: i64, user_id: i64) -> ServiceResult<ClassSummary> {
        let class = self.get_class(class_id).await?;
        access::ensure_class_staff(&self.db, &class, user_id).await?;
        let counts = ClassMember::counts_for_class(&self.db, class.id).await?;
        Ok(summary(class, counts))
    }

    /// Only the owning teacher can edit a class.
    pub async fn update_class(&self, class_id: i64, user_id: i64, req: UpdateClass) -> ServiceResult<Class> {
        let class = self.get_class(class_id).await?;
        if class.teacher_id != user_id {
            return Err(ServiceError::forbidden("Only the class teacher can edit this class"));
        }
        check_date_range(
            req.start_date.or(class.start_date),
            req.end_date.or(class.end_date),
        )?;

        let mut active = class.into_active_model();
        if let Some(name) = req.name.filter(|n| !n.trim().is_empty()) {
            active.name = Set(name);
        }
        if let Some(description) = req.description {
            active.description = Set(description);
        }
        if let Some(semester) = req.semester {
            active.semester = Set(semester);
        }
        if let Some(start) = req.start_date {
            active.start_date = Set(Some(start));
        }
        if let Some(end) = req.end_date {
            active.end_date = Set(Some(end));
        }
        if let Some(status) = req.status {
            if status == ClassStatus::Deleted {
                return Err(ServiceError::invalid("Status must be active or archived"));
            }
            active.status = Set(status);
        }
        active.updated_at = Set(Utc::now());

        Ok(active.update(&self.db).await?)
    }

    /// Adds members one by one. Existing members are skipped and reported, not fatal.
    pub async fn add_members(
        &self,
        class_id: i64,
        actor_id: i64,
        members: Vec<NewMember>,
    ) -> ServiceResult<AddMembersOutcome> {
        let class = self.get_class(class_id).await?;
        access::ensure_class_staff(&self.db, &class, actor_id).await?;

        let mut outcome = AddMembersOutcome::default();
        for member in members {
            if ClassMember::find(&self.db, class.id, member.user_id).await?.is_some() {
                outcome.failed += 1;
                outcome.failed_users.push(member.user_id);
                continue;
            }
            match ClassMember::create(&self.db, class.id, member.user_id, member.role, member.student_no).await {
                Ok(_) => outcome.success += 1,
                Err(err) if is_unique_violation(&err) => {
                    outcome.failed += 1;
                    outcome.failed_users.push(member.user_id);
                }
                Err(err) => return Err(err.into()),
            }
        }

        info!(class_id, added = outcome.success, skipped = outcome.failed, "class members added");
        Ok(outcome)
    }

    pub async fn members(
        &self,
        class_id: i64,
        actor_id: i64,
        role: Option<MemberRole>,
    ) -> ServiceResult<Vec<ClassMember>> {
        let class = self.get_class(class_id).await?;
        access::ensure_class_staff(&self.db, &class, actor_id).await?;
        Ok(ClassMember::list_for_class(&self.db, class.id, role).await?)
    }

    pub async fn remove_member(&self, class_id: i64, actor_id: i64, user_id: i64) -> ServiceResult<()> {
        let class = self.get_class(class_id).await?;
        access::ensure_class_staff(&self.db, &class, actor_id).await?;
        if user_id == class.teacher_id {
            return Err(ServiceError::forbidden("The class teacher cannot be removed"));
        }
        if ClassMember::remove(&self.db, class.id, user_id).await? == 0 {
            return Err(ServiceError::NotFound("Member"));
        }
        info!(class_id, user_id, removed_by = actor_id, "class member removed");
        Ok(())
    }

    pub async fn create_invite_code(
        &self,
        class_id: i64,
        actor_id: i64,
        req: CreateInviteCode,
    ) -> ServiceResult<InviteCode> {
        let class = self.get_class(class_id).await?;
        access::ensure_class_staff(&self.db, &class, actor_id).await?;

        if req.role == MemberRole::Teacher {
            return Err(ServiceError::invalid("Invite codes cannot grant the teacher role"));
        }
        if req.max_uses < 0 {
            return Err(ServiceError::invalid("max_uses cannot be negative"));
        }
        if req.expires_at.is_some_and(|at| at <= Utc::now()) {
            return Err(ServiceError::invalid("expires_at must be in the future"));
        }

        let code = generate_invite_code();
        let invite = InviteCode::create(
            &self.db,
            class.id,
            &code,
            req.role,
            req.max_uses,
            req.expires_at,
            actor_id,
        )
        .await?;

        info!(class_id, invite_id = invite.id, role = %invite.role, "invite code created");
        Ok(invite)
    }

    pub async fn invite_codes(&self, class_id: i64, actor_id: i64) -> ServiceResult<Vec<InviteCode>> {
        let class = self.get_class(class_id).await?;
        access::ensure_class_staff(&self.db, &class, actor_id).await?;
        Ok(InviteCode::list_for_class(&self.db, class.id).await?)
    }

    /// Redeems an invite code for `user_id` inside `space_id`.
    ///
    /// Checks run in order: the code exists, has not expired, is not used up, its class
    /// exists and belongs to the space, and the user is not already a member.
    pub async fn join_by_invite_code(
        &self,
        space_id: i64,
        user_id: i64,
        code: &str,
        student_no: Option<String>,
    ) -> ServiceResult<Class> {
        let invite = InviteCode::find_by_code(&self.db, code.trim())
            .await?
            .ok_or_else(|| ServiceError::invalid("Invalid invite code"))?;

        if invite.is_expired(Utc::now()) {
            return Err(ServiceError::invalid("Invite code has expired"));
        }
        if invite.is_exhausted() {
            return Err(ServiceError::invalid("Invite code has reached its usage limit"));
        }

        let class = self.get_class(invite.class_id).await?;
        if class.space_id != space_id {
            return Err(ServiceError::invalid("Invite code does not belong to this space"));
        }
        if ClassMember::find(&self.db, class.id, user_id).await?.is_some() {
            return Err(ServiceError::Conflict("You are already a member of this class".into()));
        }

        // The use is claimed and the member added together; a rejected join leaves the counter alone.
        let txn = self.db.begin().await?;
        if !InviteCode::increment_used(&txn, invite.id).await? {
            return Err(ServiceError::invalid("Invite code has reached its usage limit"));
        }
        ClassMember::create(&txn, class.id, user_id, invite.role, student_no)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    ServiceError::Conflict("You are already a member of this class".into())
                } else {
                    err.into()
                }
            })?;
        txn.commit().await?;

        info!(class_id = class.id, user_id, role = %invite.role, "joined class by invite code");
        Ok(class)
    }

    /// Classes in a space the user belongs to, in any role.
    pub async fn student_classes(&self, user_id: i64, space_id: i64) -> ServiceResult<Vec<ClassSummary>> {
        let classes = Class::find_by_member(&self.db, user_id, space_id).await?;
        self.summarize(classes).await
    }

    /// A class the user belongs to, with its member list.
    pub async fn student_class_detail(
        &self,
        space_id: i64,
        class_id: i64,
        user_id: i64,
    ) -> ServiceResult<ClassDetail> {
        let class = self.get_class(class_id).await?;
        if class.space_id != space_id {
            return Err(ServiceError::invalid("Class does not belong to this space"));
        }
        let membership = ClassMember::find(&self.db, class.id, user_id)
            .await?
            .ok_or_else(|| ServiceError::forbidden("You are not a member of this class"))?;
        let members = ClassMember::list_for_class(&self.db, class.id, None).await?;

        Ok(ClassDetail { class, my_role: membership.role, members })
    }

    async fn summarize(&self, classes: Vec<Class>) -> ServiceResult<Vec<ClassSummary>> {
        let mut out = Vec::with_capacity(classes.len());
        for class in classes {
            let counts = ClassMember::counts_for_class(&self.db, class.id).await?;
            out.push(summary(class, counts));
        }
        Ok(out)
    }
}

fn summary(class: Class, counts: MemberCounts) -> ClassSummary {
    ClassSummary {
        class,
        member_count: counts.members,
        student_count: counts.students,
    }
}

fn check_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> ServiceResult<()> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => {
            Err(ServiceError::invalid("end_date cannot be before start_date"))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::seed_member;
    use chrono::Duration;
    use db::test_utils::setup_test_db;

    fn create_req(space_id: i64, code: &str) -> CreateClass {
        CreateClass {
            space_id,
            name: "AI Basics".into(),
            code: code.into(),
            description: "Intro class".into(),
            semester: "2025 autumn".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 9, 1),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 15),
        }
    }

    fn invite(role: MemberRole, max_uses: i32) -> CreateInviteCode {
        CreateInviteCode { role, max_uses, expires_at: None }
    }

    #[test]
    fn invite_codes_are_32_hex_chars() {
        let a = generate_invite_code();
        let b = generate_invite_code();
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn creating_a_class_enrols_the_teacher() {
        let db = setup_test_db().await;
        let service = ClassService::new(db.clone());

        let class = service.create_class(100, create_req(1, "AI-101")).await.unwrap();
        assert_eq!(class.status, ClassStatus::Active);

        let member = ClassMember::find(&db, class.id, 100).await.unwrap().unwrap();
        assert_eq!(member.role, MemberRole::Teacher);

        let mine = service.my_classes(100, 1).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].member_count, 1);
        assert_eq!(mine[0].student_count, 0);
    }

    #[tokio::test]
    async fn duplicate_codes_conflict() {
        let db = setup_test_db().await;
        let service = ClassService::new(db.clone());
        service.create_class(100, create_req(1, "AI-101")).await.unwrap();

        let err = service.create_class(101, create_req(2, "AI-101")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn reversed_dates_are_rejected() {
        let db = setup_test_db().await;
        let service = ClassService::new(db.clone());
        let mut req = create_req(1, "AI-102");
        req.end_date = NaiveDate::from_ymd_opt(2025, 1, 1);
        let err = service.create_class(100, req).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn only_the_owner_can_update() {
        let db = setup_test_db().await;
        let service = ClassService::new(db.clone());
        let class = service.create_class(100, create_req(1, "AI-103")).await.unwrap();
        seed_member(&db, class.id, 101, MemberRole::Assistant).await;

        let update = UpdateClass {
            name: Some("AI Advanced".into()),
            ..Default::default()
        };
        let err = service.update_class(class.id, 101, update.clone()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let updated = service.update_class(class.id, 100, update).await.unwrap();
        assert_eq!(updated.name, "AI Advanced");
        assert_eq!(updated.code, "AI-103");
    }

    #[tokio::test]
    async fn bulk_add_skips_existing_members() {
        let db = setup_test_db().await;
        let service = ClassService::new(db.clone());
        let class = service.create_class(100, create_req(1, "AI-104")).await.unwrap();
        seed_member(&db, class.id, 2, MemberRole::Student).await;

        let members = [1, 2, 3, 3]
            .into_iter()
            .map(|user_id| NewMember {
                user_id,
                role: MemberRole::Student,
                student_no: Some(format!("S{user_id}")),
            })
            .collect();
        let outcome = service.add_members(class.id, 100, members).await.unwrap();
        assert_eq!(
            outcome,
            AddMembersOutcome { success: 2, failed: 2, failed_users: vec![2, 3] }
        );

        let students = service
            .members(class.id, 100, Some(MemberRole::Student))
            .await
            .unwrap();
        assert_eq!(students.len(), 3);

        let err = service.add_members(class.id, 1, vec![]).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[tokio::test]
    async fn removing_members() {
        let db = setup_test_db().await;
        let service = ClassService::new(db.clone());
        let class = service.create_class(100, create_req(1, "AI-105")).await.unwrap();
        seed_member(&db, class.id, 5, MemberRole::Student).await;

        service.remove_member(class.id, 100, 5).await.unwrap();
        let err = service.remove_member(class.id, 100, 5).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound("Member")));
        let err = service.remove_member(class.id, 100, 100).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[tokio::test]
    async fn join_by_invite_code_happy_path() {
        let db = setup_test_db().await;
        let service = ClassService::new(db.clone());
        let class = service.create_class(100, create_req(1, "AI-106")).await.unwrap();
        let code = service
            .create_invite_code(class.id, 100, invite(MemberRole::Student, 0))
            .await
            .unwrap();

        let joined = service
            .join_by_invite_code(1, 7, &code.code, Some("2025001".into()))
            .await
            .unwrap();
        assert_eq!(joined.id, class.id);

        let member = ClassMember::find(&db, class.id, 7).await.unwrap().unwrap();
        assert_eq!(member.role, MemberRole::Student);
        assert_eq!(member.student_no.as_deref(), Some("2025001"));

        let codes = service.invite_codes(class.id, 100).await.unwrap();
        assert_eq!(codes[0].used_count, 1);

        let err = service.join_by_invite_code(1, 7, &code.code, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let mine = service.student_classes(7, 1).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].student_count, 1);

        let detail = service.student_class_detail(1, class.id, 7).await.unwrap();
        assert_eq!(detail.my_role, MemberRole::Student);
        assert_eq!(detail.members.len(), 2);
        let err = service.student_class_detail(1, class.id, 8).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[tokio::test]
    async fn join_rejects_bad_codes_in_order() {
        let db = setup_test_db().await;
        let service = ClassService::new(db.clone());
        let class = service.create_class(100, create_req(1, "AI-107")).await.unwrap();

        let err = service.join_by_invite_code(1, 7, "nope", None).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(msg) if msg == "Invalid invite code"));

        let expired = InviteCode::create(
            &db,
            class.id,
            "expired-code",
            MemberRole::Student,
            0,
            Some(Utc::now() - Duration::hours(1)),
            100,
        )
        .await
        .unwrap();
        let err = service.join_by_invite_code(1, 7, &expired.code, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(msg) if msg.contains("expired")));

        let single = service
            .create_invite_code(class.id, 100, invite(MemberRole::Student, 1))
            .await
            .unwrap();
        service.join_by_invite_code(1, 7, &single.code, None).await.unwrap();
        let err = service.join_by_invite_code(1, 8, &single.code, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(msg) if msg.contains("usage limit")));
        let stored = InviteCode::find_by_code(&db, &single.code).await.unwrap().unwrap();
        assert_eq!(stored.used_count, 1);

        // A stale read of the code cannot push the counter past its limit.
        assert!(!InviteCode::increment_used(&db, single.id).await.unwrap());
        assert!(ClassMember::find(&db, class.id, 8).await.unwrap().is_none());

        let other_space = service
            .create_invite_code(class.id, 100, invite(MemberRole::Assistant, 0))
            .await
            .unwrap();
        let err = service.join_by_invite_code(2, 9, &other_space.code, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(msg) if msg.contains("space")));
        assert!(ClassMember::find(&db, class.id, 9).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn invite_codes_cannot_grant_teacher() {
        let db = setup_test_db().await;
        let service = ClassService::new(db.clone());
        let class = service.create_class(100, create_req(1, "AI-108")).await.unwrap();

        let err = service
            .create_invite_code(class.id, 100, invite(MemberRole::Teacher, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));

        let err = service
            .create_invite_code(class.id, 55, invite(MemberRole::Student, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }
}
