use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Stages the kanban board knows about, in board order.
///
/// `current_stage` is stored as free text and is not checked against this
/// set on writes; the board client only ever sends these values.
pub const STAGES: [&str; 6] = [
    "lead",
    "contact",
    "proposal",
    "negotiation",
    "closed-won",
    "closed-lost",
];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "deal")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub company_name: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub value: f64,
    pub probability: i32,
    #[sea_orm(indexed)]
    pub current_stage: String,
    #[sea_orm(indexed)]
    pub assigned_to: Option<String>,
    pub product: Option<String>,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
