use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use validator::Validate;

use crate::dto::vehicle_dto::{CreateVehicleRequest, ListVehiclesQuery, UpdateVehicleRequest};
use crate::models::vehicle::Vehicle;
use crate::services::vehicle_query::VehicleFilter;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route(
            "/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
}

async fn list_vehicles(
    State(state): State<AppState>,
    query: Result<Query<ListVehiclesQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Vehicle>>> {
    let Query(query) = query?;
    let filter = VehicleFilter::from(query);
    let vehicles = state.vehicles.list(&filter).await?;
    Ok(Json(vehicles))
}

async fn create_vehicle(
    State(state): State<AppState>,
    payload: Result<Json<CreateVehicleRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Vehicle>)> {
    let Json(request) = payload?;
    request.validate()?;
    let vehicle = state.vehicles.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vehicle>> {
    let vehicle = state.vehicles.get(&id).await?;
    Ok(Json(vehicle))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateVehicleRequest>, JsonRejection>,
) -> AppResult<Json<Vehicle>> {
    let Json(request) = payload?;
    request.validate()?;
    let vehicle = state.vehicles.update(&id, request.into()).await?;
    Ok(Json(vehicle))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.vehicles.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
