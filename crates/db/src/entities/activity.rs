use sea_orm::entity::prelude::*;
use serde::Serialize;

/// `entity_type` value for every row the pipeline subsystem writes.
pub const PIPELINE: &str = "pipeline";

/// Append-only journal of deal mutations. Rows are never updated or
/// deleted, and `metadata.dealId` is a lookup reference, not a foreign
/// key: an entry can outlive the deal it describes.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "activity")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub entity_type: String,
    pub action: Action,
    pub description: String,
    pub metadata: Json,
    #[sea_orm(indexed)]
    pub timestamp: DateTimeUtc,
    pub user_id: Option<i32>,
}

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum Action {
    #[sea_orm(string_value = "create_deal")]
    CreateDeal,
    #[sea_orm(string_value = "update_deal")]
    UpdateDeal,
    #[sea_orm(string_value = "move_deal")]
    MoveDeal,
    #[sea_orm(string_value = "delete_deal")]
    DeleteDeal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
