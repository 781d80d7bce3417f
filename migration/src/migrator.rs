use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202510010001_create_edu_classes::Migration),
            Box::new(migrations::m202510010002_create_edu_class_members::Migration),
            Box::new(migrations::m202510010003_create_edu_class_invite_codes::Migration),
            Box::new(migrations::m202510010004_create_edu_assignments::Migration),
            Box::new(migrations::m202510010005_create_edu_scripts::Migration),
            Box::new(migrations::m202510010006_create_edu_student_projects::Migration),
            Box::new(migrations::m202510010007_create_edu_project_stages::Migration),
            Box::new(migrations::m202510010008_create_edu_evaluations::Migration),
            Box::new(migrations::m202510010009_create_edu_chat_messages::Migration),
        ]
    }
}
