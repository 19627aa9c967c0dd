use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order status, stored and serialized as the same lowercase strings the
/// public site writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl Status {
    /// Parse a query-string filter value. `None` for anything unknown.
    pub fn parse(s: &str) -> Option<Status> {
        match s {
            "pending" => Some(Status::Pending),
            "in_progress" => Some(Status::InProgress),
            "completed" => Some(Status::Completed),
            _ => None,
        }
    }
}

/// SeaORM entity for the `orders` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service_name: String,
    #[sea_orm(column_type = "Text")]
    pub requirements: String,
    pub status: Status,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderStatus {
    pub status: Status,
}

/// Query params for `GET /api/orders`. `status=all` (or absent) means no filter.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderFilterQuery {
    pub status: Option<String>,
}
