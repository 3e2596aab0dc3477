use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::proximity::Coordinate;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "mechanic_profile")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub display_name: String,
    /// JSON array of specialization slugs, e.g. `["brakes", "electrical"]`
    pub specializations: Json,
    pub is_verified: bool,
    pub is_available: bool,
    pub travel_radius_km: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
    pub location_updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn location(&self) -> Option<Coordinate> {
        Coordinate::from_parts(self.latitude, self.longitude)
    }

    pub fn specialization_list(&self) -> Vec<String> {
        self.specializations
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn has_specialization(&self, wanted: &str) -> bool {
        let wanted = wanted.trim();
        self.specialization_list()
            .iter()
            .any(|s| s.eq_ignore_ascii_case(wanted))
    }
}
