use db::models::{
    script::{Model as Script, ScriptFilter},
    Script as ScriptEntity,
};
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::error::{ServiceError, ServiceResult};
use crate::project_service::{normalize_paging, Page};

/// Read-only access to the script catalog.
#[derive(Debug, Clone)]
pub struct ScriptService {
    db: DatabaseConnection,
}

impl ScriptService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_scripts(
        &self,
        space_id: i64,
        filter: &ScriptFilter,
        page: Option<u64>,
        page_size: Option<u64>,
    ) -> ServiceResult<Page<Script>> {
        let (page, page_size) = normalize_paging(page, page_size);
        let (items, total) = Script::list_visible(&self.db, space_id, filter, page, page_size).await?;
        Ok(Page { items, total, page, page_size })
    }

    pub async fn get_script(&self, script_id: i64) -> ServiceResult<Script> {
        ScriptEntity::find_by_id(script_id)
            .one(&self.db)
            .await?
            .ok_or(ServiceError::NotFound("Script"))
    }
}
