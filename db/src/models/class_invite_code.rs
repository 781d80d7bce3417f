//! Shareable invite codes that grant a role in one class.

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::QueryOrder;

use super::class_member::MemberRole;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "edu_class_invite_codes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub class_id: i64,
    #[sea_orm(unique)]
    pub code: String,
    pub role: MemberRole,

    /// Zero means unlimited.
    pub max_uses: i32,
    pub used_count: i32,
    pub expires_at: Option<DateTime<Utc>>,

    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::class::Entity",
        from = "Column::ClassId",
        to = "super::class::Column::Id",
        on_delete = "Cascade"
    )]
    Class,
}

impl Related<super::class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C>(
        db: &C,
        class_id: i64,
        code: &str,
        role: MemberRole,
        max_uses: i32,
        expires_at: Option<DateTime<Utc>>,
        created_by: i64,
    ) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let active_model = ActiveModel {
            class_id: Set(class_id),
            code: Set(code.to_owned()),
            role: Set(role),
            max_uses: Set(max_uses),
            used_count: Set(0),
            expires_at: Set(expires_at),
            created_by: Set(created_by),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn find_by_code<C>(db: &C, code: &str) -> Result<Option<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find().filter(Column::Code.eq(code)).one(db).await
    }

    pub async fn list_for_class<C>(db: &C, class_id: i64) -> Result<Vec<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    pub fn is_exhausted(&self) -> bool {
        self.max_uses > 0 && self.used_count >= self.max_uses
    }

    /// Claims one use of the code in a single conditional `UPDATE`.
    ///
    /// Returns `false` when a limited code is already used up, so `used_count` never
    /// passes `max_uses`.
    pub async fn increment_used<C>(db: &C, id: i64) -> Result<bool, DbErr>
    where
        C: ConnectionTrait,
    {
        let result = Entity::update_many()
            .col_expr(Column::UsedCount, Expr::col(Column::UsedCount).add(1))
            .filter(Column::Id.eq(id))
            .filter(
                Column::MaxUses
                    .eq(0)
                    .or(Expr::col(Column::UsedCount).lt(Expr::col(Column::MaxUses))),
            )
            .exec(db)
            .await?;
        Ok(result.rows_affected == 1)
    }
}
