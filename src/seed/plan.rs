use chrono::{DateTime, NaiveDate, Utc};

use crate::model::{AppointmentStatus, NewAppointment, NewOwner, NewPet, OwnerId, PetId};

/// An owner together with the pets registered under it.
///
/// Records in a plan carry no identifiers; the store assigns them while
/// writing, so pets and visits are linked by nesting instead.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedOwner {
    pub owner: NewOwner,
    pub pets: Vec<SeedPet>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeedPet {
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub is_neutered: bool,
    pub visits: Vec<SeedVisit>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeedVisit {
    pub visit_date: DateTime<Utc>,
    pub reason: String,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

impl SeedPet {
    pub fn to_new_pet(&self, owner_id: OwnerId) -> NewPet {
        NewPet {
            name: self.name.clone(),
            species: self.species.clone(),
            breed: self.breed.clone(),
            birth_date: self.birth_date,
            is_neutered: self.is_neutered,
            owner_id,
        }
    }
}

impl SeedVisit {
    pub fn to_new_appointment(&self, pet_id: PetId) -> NewAppointment {
        NewAppointment {
            pet_id,
            visit_date: self.visit_date,
            reason: self.reason.clone(),
            status: self.status,
            notes: self.notes.clone(),
        }
    }
}

/// Owner, pet and appointment counts of a plan
pub fn plan_totals(plan: &[SeedOwner]) -> (usize, usize, usize) {
    let pets = plan.iter().map(|owner| owner.pets.len()).sum();
    let visits = plan
        .iter()
        .flat_map(|owner| &owner.pets)
        .map(|pet| pet.visits.len())
        .sum();
    (plan.len(), pets, visits)
}
