pub mod assignment;
pub mod chat_message;
pub mod class;
pub mod class_invite_code;
pub mod class_member;
pub mod evaluation;
pub mod json;
pub mod project_stage;
pub mod script;
pub mod student_project;

pub use assignment::Entity as Assignment;
pub use chat_message::Entity as ChatMessage;
pub use class::Entity as Class;
pub use class_invite_code::Entity as ClassInviteCode;
pub use class_member::Entity as ClassMember;
pub use evaluation::Entity as Evaluation;
pub use project_stage::Entity as ProjectStage;
pub use script::Entity as Script;
pub use student_project::Entity as StudentProject;
