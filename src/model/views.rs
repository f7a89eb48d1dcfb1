use crate::model::{AppointmentId, AppointmentStatus, Owner, OwnerId, Pet};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Owner with the full list of its pets, served by `GET /owners/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDetail {
    #[serde(flatten)]
    pub owner: Owner,
    pub pets: Vec<Pet>,
}

/// Abbreviated owner nested inside pet listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerBrief {
    pub owner_id: OwnerId,
    pub name: String,
    pub phone: Option<String>,
}

impl From<&Owner> for OwnerBrief {
    fn from(owner: &Owner) -> Self {
        Self {
            owner_id: owner.owner_id,
            name: owner.name.clone(),
            phone: owner.phone.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetWithOwner {
    #[serde(flatten)]
    pub pet: Pet,
    pub owner: OwnerBrief,
}

/// Appointment flattened with its pet and the pet's owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingAppointment {
    pub appointment_id: AppointmentId,
    pub visit_date: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub pet_name: String,
    pub species: String,
    pub owner_name: String,
    pub phone: Option<String>,
}
