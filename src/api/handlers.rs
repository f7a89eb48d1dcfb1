use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use serde::Serialize;
use std::sync::Arc;

use crate::logic::{self, ClinicResult};
use crate::model::{
    AppointmentCreate, Owner, OwnerCreate, OwnerDetail, OwnerId, PetCreate, PetWithOwner,
    UpcomingAppointment,
};
use crate::store::traits::Store;

pub type AppState<S> = Arc<S>;

/// Body extractor that keeps JSON rejections inside the clinic error taxonomy
type Payload<T> = Result<Json<T>, JsonRejection>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

fn created<T: Serialize>(location: String, body: T) -> impl IntoResponse {
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(body))
}

pub async fn list_owners<S: Store>(
    State(store): State<AppState<S>>,
) -> ClinicResult<Json<Vec<Owner>>> {
    Ok(Json(logic::list_owners(&*store).await?))
}

pub async fn get_owner<S: Store>(
    State(store): State<AppState<S>>,
    owner_id: Result<Path<OwnerId>, PathRejection>,
) -> ClinicResult<Json<OwnerDetail>> {
    let Path(owner_id) = owner_id?;
    Ok(Json(logic::get_owner_detail(&*store, owner_id).await?))
}

pub async fn create_owner<S: Store>(
    State(store): State<AppState<S>>,
    payload: Payload<OwnerCreate>,
) -> ClinicResult<impl IntoResponse> {
    let Json(input) = payload?;
    let owner = logic::create_owner(&*store, input).await?;
    Ok(created(format!("/owners/{}", owner.owner_id), owner))
}

pub async fn list_pets<S: Store>(
    State(store): State<AppState<S>>,
) -> ClinicResult<Json<Vec<PetWithOwner>>> {
    Ok(Json(logic::list_pets(&*store).await?))
}

pub async fn create_pet<S: Store>(
    State(store): State<AppState<S>>,
    payload: Payload<PetCreate>,
) -> ClinicResult<impl IntoResponse> {
    let Json(input) = payload?;
    let pet = logic::create_pet(&*store, input).await?;
    Ok(created(format!("/pets/{}", pet.pet_id), pet))
}

pub async fn list_upcoming_appointments<S: Store>(
    State(store): State<AppState<S>>,
) -> ClinicResult<Json<Vec<UpcomingAppointment>>> {
    let now = chrono::Utc::now();
    Ok(Json(logic::upcoming_appointments(&*store, now).await?))
}

pub async fn create_appointment<S: Store>(
    State(store): State<AppState<S>>,
    payload: Payload<AppointmentCreate>,
) -> ClinicResult<impl IntoResponse> {
    let Json(input) = payload?;
    let appointment = logic::create_appointment(&*store, input).await?;
    Ok(created(
        format!("/appointments/{}", appointment.appointment_id),
        appointment,
    ))
}
