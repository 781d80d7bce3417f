use db::models::{
    class::{ClassStatus, Model as Class},
    class_invite_code::Model as InviteCode,
    class_member::{MemberRole, Model as ClassMember},
};
use serde::Serialize;
use services::class_service::ClassSummary;

use crate::routes::common::{rfc3339, rfc3339_opt};

lazy_static::lazy_static! {
    pub static ref CLASS_CODE_REGEX: regex::Regex = regex::Regex::new("^[A-Za-z0-9_-]{1,50}$").unwrap();
}

#[derive(Debug, Serialize)]
pub struct ClassResponse {
    pub id: i64,
    pub space_id: i64,
    pub name: String,
    pub code: String,
    pub description: String,
    pub teacher_id: i64,
    pub semester: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: ClassStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Class> for ClassResponse {
    fn from(c: Class) -> Self {
        Self {
            id: c.id,
            space_id: c.space_id,
            name: c.name,
            code: c.code,
            description: c.description,
            teacher_id: c.teacher_id,
            semester: c.semester,
            start_date: c.start_date.map(|d| d.format("%Y-%m-%d").to_string()),
            end_date: c.end_date.map(|d| d.format("%Y-%m-%d").to_string()),
            status: c.status,
            created_at: rfc3339(&c.created_at),
            updated_at: rfc3339(&c.updated_at),
        }
    }
}

/// A class with its head counts.
#[derive(Debug, Serialize)]
pub struct ClassSummaryResponse {
    #[serde(flatten)]
    pub class: ClassResponse,
    pub member_count: u64,
    pub student_count: u64,
}

impl From<ClassSummary> for ClassSummaryResponse {
    fn from(s: ClassSummary) -> Self {
        Self {
            class: ClassResponse::from(s.class),
            member_count: s.member_count,
            student_count: s.student_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub id: i64,
    pub class_id: i64,
    pub user_id: i64,
    pub role: MemberRole,
    pub student_no: Option<String>,
    pub joined_at: String,
}

impl From<ClassMember> for MemberResponse {
    fn from(m: ClassMember) -> Self {
        Self {
            id: m.id,
            class_id: m.class_id,
            user_id: m.user_id,
            role: m.role,
            student_no: m.student_no,
            joined_at: rfc3339(&m.joined_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InviteCodeResponse {
    pub id: i64,
    pub class_id: i64,
    pub code: String,
    pub role: MemberRole,
    pub max_uses: i32,
    pub used_count: i32,
    pub expires_at: Option<String>,
    pub created_by: i64,
    pub created_at: String,
}

impl From<InviteCode> for InviteCodeResponse {
    fn from(i: InviteCode) -> Self {
        Self {
            id: i.id,
            class_id: i.class_id,
            code: i.code,
            role: i.role,
            max_uses: i.max_uses,
            used_count: i.used_count,
            expires_at: rfc3339_opt(&i.expires_at),
            created_by: i.created_by,
            created_at: rfc3339(&i.created_at),
        }
    }
}
