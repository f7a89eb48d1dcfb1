use crate::logic::validate::{
    validate_appointment_create, validate_owner_create, validate_pet_create,
};
use crate::logic::ClinicResult;
use crate::model::{Appointment, AppointmentCreate, Owner, OwnerCreate, Pet, PetCreate};
use crate::store::traits::Store;

pub async fn create_owner<S: Store>(store: &S, input: OwnerCreate) -> ClinicResult<Owner> {
    let owner = validate_owner_create(input)?;
    let owner = store.insert_owner(owner).await?;
    log::info!("Created owner {} ({})", owner.owner_id, owner.name);
    Ok(owner)
}

pub async fn create_pet<S: Store>(store: &S, input: PetCreate) -> ClinicResult<Pet> {
    // Not fenced against a concurrent owner delete; the foreign key still guards the insert.
    let owner_exists = store.owner_exists(input.owner_id).await?;
    let pet = validate_pet_create(input, owner_exists)?;
    let pet = store.insert_pet(pet).await?;
    log::info!("Created pet {} for owner {}", pet.pet_id, pet.owner_id);
    Ok(pet)
}

pub async fn create_appointment<S: Store>(
    store: &S,
    input: AppointmentCreate,
) -> ClinicResult<Appointment> {
    let pet_exists = store.pet_exists(input.pet_id).await?;
    let appointment = validate_appointment_create(input, pet_exists)?;
    let appointment = store.insert_appointment(appointment).await?;
    log::info!(
        "Created appointment {} for pet {} at {}",
        appointment.appointment_id,
        appointment.pet_id,
        appointment.visit_date
    );
    Ok(appointment)
}
