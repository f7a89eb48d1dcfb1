use crate::model::{
    Appointment, NewAppointment, NewOwner, NewPet, Owner, OwnerId, Pet, PetId, PetWithOwner,
    UpcomingAppointment,
};
use crate::seed::plan::SeedOwner;
use anyhow::Result;
use chrono::{DateTime, Utc};

#[async_trait::async_trait]
pub trait OwnerStore: Send + Sync {
    async fn list_owners(&self) -> Result<Vec<Owner>>;
    async fn get_owner(&self, id: OwnerId) -> Result<Option<Owner>>;
    async fn owner_exists(&self, id: OwnerId) -> Result<bool>;
    async fn insert_owner(&self, owner: NewOwner) -> Result<Owner>;
    /// Delete an owner together with its pets and their appointments
    async fn delete_owner(&self, id: OwnerId) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait PetStore: Send + Sync {
    async fn list_pets_with_owner(&self) -> Result<Vec<PetWithOwner>>;
    async fn list_pets_for_owner(&self, owner_id: OwnerId) -> Result<Vec<Pet>>;
    async fn pet_exists(&self, id: PetId) -> Result<bool>;
    /// Fails when `pet.owner_id` does not reference a stored owner
    async fn insert_pet(&self, pet: NewPet) -> Result<Pet>;
    /// Delete a pet together with its appointments
    async fn delete_pet(&self, id: PetId) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Appointments with `visit_date >= now`, ascending by visit date, at most `limit` rows
    async fn list_upcoming_appointments(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<UpcomingAppointment>>;
    /// Fails when `appointment.pet_id` does not reference a stored pet
    async fn insert_appointment(&self, appointment: NewAppointment) -> Result<Appointment>;
}

#[async_trait::async_trait]
pub trait SeedStore: Send + Sync {
    /// Write every owner, pet and visit of `plan` as one unit, only while no owners exist.
    ///
    /// Returns `false` without writing when owners are already present. A failure
    /// part way through leaves the store as it was.
    async fn insert_seed_if_empty(&self, plan: &[SeedOwner]) -> Result<bool>;
}

pub trait Store: OwnerStore + PetStore + AppointmentStore + SeedStore + Send + Sync {}

impl<T: OwnerStore + PetStore + AppointmentStore + SeedStore + Send + Sync> Store for T {}
