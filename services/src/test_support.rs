use db::models::{
    assignment::{Model as Assignment, NewAssignment},
    class::{Model as Class, NewClass},
    class_member::{MemberRole, Model as ClassMember},
    student_project::ProjectType,
};
use sea_orm::DatabaseConnection;

pub async fn seed_class(db: &DatabaseConnection, space_id: i64, teacher_id: i64, code: &str) -> Class {
    let class = Class::create(
        db,
        NewClass {
            space_id,
            name: format!("Class {code}"),
            code: code.to_string(),
            description: String::new(),
            teacher_id,
            semester: "2025 spring".into(),
            start_date: None,
            end_date: None,
        },
    )
    .await
    .unwrap();
    ClassMember::create(db, class.id, teacher_id, MemberRole::Teacher, None)
        .await
        .unwrap();
    class
}

pub async fn seed_member(db: &DatabaseConnection, class_id: i64, user_id: i64, role: MemberRole) -> ClassMember {
    ClassMember::create(db, class_id, user_id, role, None).await.unwrap()
}

pub async fn seed_assignment(db: &DatabaseConnection, class_id: i64, teacher_id: i64) -> Assignment {
    Assignment::create(
        db,
        NewAssignment {
            class_id,
            teacher_id,
            assignment_type: ProjectType::Script,
            source_id: 7,
            title: "Week 1".into(),
            description: None,
            due_date: None,
        },
    )
    .await
    .unwrap()
}
