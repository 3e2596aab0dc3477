use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::proximity::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "service_status")]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl ServiceStatus {
    /// Statuses a mechanic can still be matched against
    pub fn parse_open(raw: &str) -> Option<Self> {
        match raw.trim() {
            "pending" => Some(ServiceStatus::Pending),
            "accepted" => Some(ServiceStatus::Accepted),
            "in_progress" => Some(ServiceStatus::InProgress),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_request")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub status: ServiceStatus,
    pub urgency_level: String,
    pub is_emergency: bool,
    pub location_address: Option<String>,
    pub location_latitude: Option<f64>,
    pub location_longitude: Option<f64>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn location(&self) -> Option<Coordinate> {
        Coordinate::from_parts(self.location_latitude, self.location_longitude)
    }
}
