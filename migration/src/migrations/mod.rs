pub mod m202510010001_create_edu_classes;
pub mod m202510010002_create_edu_class_members;
pub mod m202510010003_create_edu_class_invite_codes;
pub mod m202510010004_create_edu_assignments;
pub mod m202510010005_create_edu_scripts;
pub mod m202510010006_create_edu_student_projects;
pub mod m202510010007_create_edu_project_stages;
pub mod m202510010008_create_edu_evaluations;
pub mod m202510010009_create_edu_chat_messages;
