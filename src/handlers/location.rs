use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::entities::mechanic_profile;
use crate::entities::service_request::{self, ServiceStatus};
use crate::error::{AppError, AppResult};
use crate::extract::{ValidatedJson, ValidatedQuery};
use crate::proximity::{Candidate, Coordinate, RadiusStatus, RankOptions, TravelInfo};
use crate::AppState;

const MIN_SEARCH_RADIUS_KM: f64 = 1.0;
const MAX_SEARCH_RADIUS_KM: f64 = 100.0;
const MAX_RESULTS: usize = 100;
const MAX_ADDRESS_LEN: usize = 500;

// ============ Mechanic Location ============

#[derive(Debug, Deserialize)]
pub struct UpdateLocationRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MechanicLocationResponse {
    pub mechanic_id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub travel_radius_km: Option<f64>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Store a mechanic's current location
pub async fn update_mechanic_location(
    State(state): State<AppState>,
    Path(mechanic_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateLocationRequest>,
) -> AppResult<Json<MechanicLocationResponse>> {
    let location = validate_coordinate(payload.latitude, payload.longitude)?;
    if let Some(address) = &payload.address {
        if address.chars().count() > MAX_ADDRESS_LEN {
            return Err(AppError::Validation(format!(
                "Address must be at most {} characters",
                MAX_ADDRESS_LEN
            )));
        }
    }

    let mechanic = find_mechanic(&state, mechanic_id).await?;

    let mut active: mechanic_profile::ActiveModel = mechanic.into();
    active.latitude = Set(Some(location.latitude()));
    active.longitude = Set(Some(location.longitude()));
    active.address = Set(payload.address);
    active.location_updated_at = Set(Some(Utc::now().fixed_offset()));
    let mechanic = active.update(state.db.as_ref()).await?;

    tracing::info!(
        mechanic_id,
        latitude = location.latitude(),
        longitude = location.longitude(),
        "Mechanic location updated"
    );

    Ok(Json(location_response(&mechanic, location)))
}

/// Get a mechanic's stored location
pub async fn get_mechanic_location(
    State(state): State<AppState>,
    Path(mechanic_id): Path<i32>,
) -> AppResult<Json<MechanicLocationResponse>> {
    let mechanic = find_mechanic(&state, mechanic_id).await?;
    let location = mechanic
        .location()
        .ok_or_else(|| AppError::NotFound("Mechanic location is not configured".to_string()))?;

    Ok(Json(location_response(&mechanic, location)))
}

// ============ Distance ============

#[derive(Debug, Serialize)]
pub struct ServiceDistanceResponse {
    pub mechanic_id: i32,
    pub service_id: i32,
    pub travel_info: TravelInfo,
}

/// Distance and travel estimate from a mechanic to one service request
pub async fn distance_to_service(
    State(state): State<AppState>,
    Path((mechanic_id, service_id)): Path<(i32, i32)>,
) -> AppResult<Json<ServiceDistanceResponse>> {
    let mechanic = find_mechanic(&state, mechanic_id).await?;
    let service = service_request::Entity::find_by_id(service_id)
        .one(state.db.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("Service request not found".to_string()))?;

    let Some(origin) = mechanic.location() else {
        tracing::warn!(mechanic_id, service_id, "Distance requested for mechanic without location");
        return Err(AppError::BadRequest(
            "Mechanic location is not configured".to_string(),
        ));
    };
    let Some(target) = service.location() else {
        tracing::warn!(mechanic_id, service_id, "Distance requested for service without coordinates");
        return Err(AppError::BadRequest(
            "Service coordinates are not available".to_string(),
        ));
    };

    let radius_km = mechanic
        .travel_radius_km
        .unwrap_or(state.config.proximity.default_service_radius_km);

    Ok(Json(ServiceDistanceResponse {
        mechanic_id,
        service_id,
        travel_info: state.engine.travel_info(&origin, &target, radius_km),
    }))
}

// ============ Nearby Services (for mechanics) ============

#[derive(Debug, Default, Deserialize)]
pub struct NearbyServicesQuery {
    pub radius_km: Option<f64>,
    pub status: Option<String>,
    /// Comma-separated proximity statuses, e.g. `optimal,good`
    pub proximity: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct NearbyServiceInfo {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub status: ServiceStatus,
    pub urgency_level: String,
    pub is_emergency: bool,
    pub location_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub travel_info: TravelInfo,
}

#[derive(Debug, Serialize)]
pub struct ServiceSearchParams {
    pub radius_km: f64,
    pub status: ServiceStatus,
    pub proximity: Option<Vec<RadiusStatus>>,
    pub mechanic_location: Coordinate,
}

#[derive(Debug, Serialize)]
pub struct NearbyServicesResponse {
    pub services: Vec<NearbyServiceInfo>,
    pub search_params: ServiceSearchParams,
}

/// Open service requests within reach of a mechanic, nearest first
pub async fn nearby_services(
    State(state): State<AppState>,
    Path(mechanic_id): Path<i32>,
    ValidatedQuery(params): ValidatedQuery<NearbyServicesQuery>,
) -> AppResult<Json<NearbyServicesResponse>> {
    let status = match params.status.as_deref() {
        Some(raw) => ServiceStatus::parse_open(raw).ok_or_else(|| {
            AppError::Validation(
                "status must be one of pending, accepted, in_progress".to_string(),
            )
        })?,
        None => ServiceStatus::Pending,
    };
    let proximity = parse_proximity_filter(params.proximity.as_deref())?;
    let limit = validate_limit(params.limit)?;
    if let Some(radius_km) = params.radius_km {
        validate_radius(radius_km)?;
    }

    let mechanic = find_mechanic(&state, mechanic_id).await?;
    let origin = mechanic
        .location()
        .ok_or_else(|| AppError::BadRequest("Mechanic location is not configured".to_string()))?;
    let radius_km = params
        .radius_km
        .or(mechanic.travel_radius_km)
        .unwrap_or(state.config.proximity.default_service_radius_km);

    // Coarse box in SQL, exact great-circle check in the ranker
    let bbox = origin.bounding_box(radius_km + 0.01);
    let mut query = service_request::Entity::find()
        .filter(service_request::Column::Status.eq(status))
        .filter(service_request::Column::LocationLatitude.between(bbox.min_latitude, bbox.max_latitude))
        .filter(service_request::Column::LocationLongitude.is_not_null());
    if let Some((min_lng, max_lng)) = bbox.longitude_range {
        query = query.filter(service_request::Column::LocationLongitude.between(min_lng, max_lng));
    }
    let services = query.all(state.db.as_ref()).await?;

    let candidates = services
        .into_iter()
        .map(|service| Candidate {
            id: service.id,
            location: service.location(),
            travel_radius_km: None,
            payload: service,
        })
        .collect();

    let mut options = RankOptions::new(radius_km).within_radius_only();
    options.statuses = proximity.clone();
    options.limit = limit;
    let ranked = state.engine.rank(&origin, candidates, &options);

    let services = ranked
        .into_iter()
        .map(|entry| {
            let travel_info = state.engine.entry_travel_info(&entry);
            let service = entry.payload;
            NearbyServiceInfo {
                id: service.id,
                title: service.title,
                description: service.description,
                status: service.status,
                urgency_level: service.urgency_level,
                is_emergency: service.is_emergency,
                location_address: service.location_address,
                created_at: service.created_at.with_timezone(&Utc),
                travel_info,
            }
        })
        .collect();

    Ok(Json(NearbyServicesResponse {
        services,
        search_params: ServiceSearchParams {
            radius_km,
            status,
            proximity,
            mechanic_location: origin,
        },
    }))
}

// ============ Nearby Mechanics (for clients) ============

#[derive(Debug, Default, Deserialize)]
pub struct NearbyMechanicsQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: Option<f64>,
    pub specialization: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct NearbyMechanicInfo {
    pub id: i32,
    pub display_name: String,
    pub specializations: Vec<String>,
    pub is_available: bool,
    pub travel_radius_km: Option<f64>,
    pub address: Option<String>,
    pub travel_info: TravelInfo,
}

#[derive(Debug, Serialize)]
pub struct MechanicSearchParams {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
    pub specialization: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NearbyMechanicsResponse {
    pub mechanics: Vec<NearbyMechanicInfo>,
    pub search_params: MechanicSearchParams,
}

/// Verified mechanics whose travel radius covers the client's location
pub async fn nearby_mechanics(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<NearbyMechanicsQuery>,
) -> AppResult<Json<NearbyMechanicsResponse>> {
    let origin = validate_coordinate(params.latitude, params.longitude)?;
    if let Some(radius_km) = params.radius_km {
        validate_radius(radius_km)?;
    }
    let limit = validate_limit(params.limit)?;
    let radius_km = params
        .radius_km
        .unwrap_or(state.config.proximity.default_search_radius_km);
    let specialization = params
        .specialization
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let mechanics = mechanic_profile::Entity::find()
        .filter(mechanic_profile::Column::IsVerified.eq(true))
        .filter(mechanic_profile::Column::Latitude.is_not_null())
        .filter(mechanic_profile::Column::Longitude.is_not_null())
        .all(state.db.as_ref())
        .await?;

    let candidates = mechanics
        .into_iter()
        .filter(|m| {
            specialization
                .as_deref()
                .is_none_or(|wanted| m.has_specialization(wanted))
        })
        .map(|mechanic| Candidate {
            id: mechanic.id,
            location: mechanic.location(),
            travel_radius_km: mechanic.travel_radius_km,
            payload: mechanic,
        })
        .collect();

    let mut options = RankOptions::new(radius_km).within_radius_only();
    options.limit = limit;
    let ranked = state.engine.rank(&origin, candidates, &options);

    let mechanics = ranked
        .into_iter()
        .map(|entry| {
            let travel_info = state.engine.entry_travel_info(&entry);
            let mechanic = entry.payload;
            NearbyMechanicInfo {
                id: mechanic.id,
                specializations: mechanic.specialization_list(),
                display_name: mechanic.display_name,
                is_available: mechanic.is_available,
                travel_radius_km: mechanic.travel_radius_km,
                address: mechanic.address,
                travel_info,
            }
        })
        .collect();

    Ok(Json(NearbyMechanicsResponse {
        mechanics,
        search_params: MechanicSearchParams {
            latitude: origin.latitude(),
            longitude: origin.longitude(),
            radius_km,
            specialization,
        },
    }))
}

// ============ Helpers ============

async fn find_mechanic(state: &AppState, mechanic_id: i32) -> AppResult<mechanic_profile::Model> {
    mechanic_profile::Entity::find_by_id(mechanic_id)
        .one(state.db.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("Mechanic profile not found".to_string()))
}

fn location_response(
    mechanic: &mechanic_profile::Model,
    location: Coordinate,
) -> MechanicLocationResponse {
    MechanicLocationResponse {
        mechanic_id: mechanic.id,
        latitude: location.latitude(),
        longitude: location.longitude(),
        address: mechanic.address.clone(),
        travel_radius_km: mechanic.travel_radius_km,
        updated_at: mechanic.location_updated_at.map(|t| t.with_timezone(&Utc)),
    }
}

fn validate_coordinate(latitude: f64, longitude: f64) -> AppResult<Coordinate> {
    let coordinate = Coordinate::new(latitude, longitude);
    if !coordinate.is_valid() {
        return Err(AppError::Validation(
            "latitude must be within [-90, 90] and longitude within [-180, 180]".to_string(),
        ));
    }
    Ok(coordinate)
}

fn validate_radius(radius_km: f64) -> AppResult<()> {
    if !(MIN_SEARCH_RADIUS_KM..=MAX_SEARCH_RADIUS_KM).contains(&radius_km) {
        return Err(AppError::Validation(format!(
            "radius_km must be between {} and {}",
            MIN_SEARCH_RADIUS_KM, MAX_SEARCH_RADIUS_KM
        )));
    }
    Ok(())
}

fn validate_limit(limit: Option<usize>) -> AppResult<Option<usize>> {
    match limit {
        Some(0) => Err(AppError::Validation("limit must be at least 1".to_string())),
        Some(n) => Ok(Some(n.min(MAX_RESULTS))),
        None => Ok(None),
    }
}

fn parse_proximity_filter(raw: Option<&str>) -> AppResult<Option<Vec<RadiusStatus>>> {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return Ok(None);
    };

    raw.split(',')
        .map(|part| part.parse::<RadiusStatus>().map_err(AppError::Validation))
        .collect::<AppResult<Vec<_>>>()
        .map(Some)
}
