use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::BTreeMap;

use crate::logic::projection::{pet_with_owner, select_upcoming, upcoming_view};
use crate::model::{
    Appointment, AppointmentId, NewAppointment, NewOwner, NewPet, Owner, OwnerId, Pet, PetId,
    PetWithOwner, UpcomingAppointment,
};
use crate::seed::plan::SeedOwner;
use crate::store::traits::{AppointmentStore, OwnerStore, PetStore, SeedStore};

#[derive(Debug, Default, Clone)]
struct Tables {
    owners: BTreeMap<OwnerId, Owner>,
    pets: BTreeMap<PetId, Pet>,
    appointments: BTreeMap<AppointmentId, Appointment>,
    last_owner_id: OwnerId,
    last_pet_id: PetId,
    last_appointment_id: AppointmentId,
}

impl Tables {
    fn insert_owner(&mut self, owner: NewOwner) -> Owner {
        self.last_owner_id += 1;
        let owner = owner.into_owner(self.last_owner_id);
        self.owners.insert(owner.owner_id, owner.clone());
        owner
    }

    fn insert_pet(&mut self, pet: NewPet) -> Result<Pet> {
        if !self.owners.contains_key(&pet.owner_id) {
            return Err(anyhow!(
                "Foreign key violation: owner {} does not exist",
                pet.owner_id
            ));
        }

        self.last_pet_id += 1;
        let pet = pet.into_pet(self.last_pet_id);
        self.pets.insert(pet.pet_id, pet.clone());
        Ok(pet)
    }

    fn insert_appointment(&mut self, appointment: NewAppointment) -> Result<Appointment> {
        if !self.pets.contains_key(&appointment.pet_id) {
            return Err(anyhow!(
                "Foreign key violation: pet {} does not exist",
                appointment.pet_id
            ));
        }

        self.last_appointment_id += 1;
        let appointment = appointment.into_appointment(self.last_appointment_id);
        self.appointments
            .insert(appointment.appointment_id, appointment.clone());
        Ok(appointment)
    }

    fn remove_pet_cascade(&mut self, pet_id: PetId) -> bool {
        if self.pets.remove(&pet_id).is_none() {
            return false;
        }
        self.appointments.retain(|_, appointment| appointment.pet_id != pet_id);
        true
    }
}

/// Id-keyed in-process tables with the same foreign-key and cascade rules as the SQL schema.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pet_count(&self) -> usize {
        self.tables.read().pets.len()
    }

    pub fn appointment_count(&self) -> usize {
        self.tables.read().appointments.len()
    }
}

#[async_trait::async_trait]
impl OwnerStore for MemoryStore {
    async fn list_owners(&self) -> Result<Vec<Owner>> {
        Ok(self.tables.read().owners.values().cloned().collect())
    }

    async fn get_owner(&self, id: OwnerId) -> Result<Option<Owner>> {
        Ok(self.tables.read().owners.get(&id).cloned())
    }

    async fn owner_exists(&self, id: OwnerId) -> Result<bool> {
        Ok(self.tables.read().owners.contains_key(&id))
    }

    async fn insert_owner(&self, owner: NewOwner) -> Result<Owner> {
        Ok(self.tables.write().insert_owner(owner))
    }

    async fn delete_owner(&self, id: OwnerId) -> Result<bool> {
        let mut tables = self.tables.write();
        if tables.owners.remove(&id).is_none() {
            return Ok(false);
        }

        let owned_pets: Vec<PetId> = tables
            .pets
            .values()
            .filter(|pet| pet.owner_id == id)
            .map(|pet| pet.pet_id)
            .collect();
        for pet_id in owned_pets {
            tables.remove_pet_cascade(pet_id);
        }

        Ok(true)
    }
}

#[async_trait::async_trait]
impl PetStore for MemoryStore {
    async fn list_pets_with_owner(&self) -> Result<Vec<PetWithOwner>> {
        let tables = self.tables.read();
        tables
            .pets
            .values()
            .map(|pet| -> Result<PetWithOwner> {
                let owner = tables
                    .owners
                    .get(&pet.owner_id)
                    .ok_or_else(|| anyhow!("Pet {} references missing owner {}", pet.pet_id, pet.owner_id))?;
                Ok(pet_with_owner(pet, owner))
            })
            .collect()
    }

    async fn list_pets_for_owner(&self, owner_id: OwnerId) -> Result<Vec<Pet>> {
        Ok(self
            .tables
            .read()
            .pets
            .values()
            .filter(|pet| pet.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn pet_exists(&self, id: PetId) -> Result<bool> {
        Ok(self.tables.read().pets.contains_key(&id))
    }

    async fn insert_pet(&self, pet: NewPet) -> Result<Pet> {
        self.tables.write().insert_pet(pet)
    }

    async fn delete_pet(&self, id: PetId) -> Result<bool> {
        Ok(self.tables.write().remove_pet_cascade(id))
    }
}

#[async_trait::async_trait]
impl AppointmentStore for MemoryStore {
    async fn list_upcoming_appointments(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<UpcomingAppointment>> {
        let tables = self.tables.read();
        select_upcoming(tables.appointments.values(), now, limit)
            .into_iter()
            .map(|appointment| -> Result<UpcomingAppointment> {
                let pet = tables.pets.get(&appointment.pet_id).ok_or_else(|| {
                    anyhow!("Appointment {} references missing pet", appointment.appointment_id)
                })?;
                let owner = tables
                    .owners
                    .get(&pet.owner_id)
                    .ok_or_else(|| anyhow!("Pet {} references missing owner", pet.pet_id))?;
                Ok(upcoming_view(appointment, pet, owner))
            })
            .collect()
    }

    async fn insert_appointment(&self, appointment: NewAppointment) -> Result<Appointment> {
        self.tables.write().insert_appointment(appointment)
    }
}

#[async_trait::async_trait]
impl SeedStore for MemoryStore {
    async fn insert_seed_if_empty(&self, plan: &[SeedOwner]) -> Result<bool> {
        let mut tables = self.tables.write();
        if !tables.owners.is_empty() {
            return Ok(false);
        }

        // staged on a copy so a failed plan leaves nothing behind
        let mut staged = Tables::clone(&tables);
        for seed_owner in plan {
            let owner = staged.insert_owner(seed_owner.owner.clone());
            for seed_pet in &seed_owner.pets {
                let pet = staged.insert_pet(seed_pet.to_new_pet(owner.owner_id))?;
                for seed_visit in &seed_pet.visits {
                    staged.insert_appointment(seed_visit.to_new_appointment(pet.pet_id))?;
                }
            }
        }

        *tables = staged;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AppointmentStatus;
    use crate::seed::plan::{SeedPet, SeedVisit};
    use chrono::Duration;

    fn new_owner(name: &str) -> NewOwner {
        NewOwner {
            name: name.to_string(),
            email: None,
            phone: Some("555-0101".to_string()),
        }
    }

    fn new_pet(owner_id: OwnerId, name: &str) -> NewPet {
        NewPet {
            name: name.to_string(),
            species: "Dog".to_string(),
            breed: None,
            birth_date: None,
            is_neutered: false,
            owner_id,
        }
    }

    fn new_appointment(pet_id: PetId, visit_date: DateTime<Utc>) -> NewAppointment {
        NewAppointment {
            pet_id,
            visit_date,
            reason: "Check-up".to_string(),
            status: AppointmentStatus::Scheduled,
            notes: None,
        }
    }

    #[tokio::test]
    async fn identifiers_are_assigned_per_table() {
        let store = MemoryStore::new();
        let first = store.insert_owner(new_owner("Ana")).await.unwrap();
        let second = store.insert_owner(new_owner("Ana")).await.unwrap();
        assert_eq!(first.owner_id, 1);
        assert_eq!(second.owner_id, 2);

        let pet = store.insert_pet(new_pet(first.owner_id, "Rex")).await.unwrap();
        assert_eq!(pet.pet_id, 1);
    }

    #[tokio::test]
    async fn dangling_foreign_keys_are_rejected() {
        let store = MemoryStore::new();
        assert!(store.insert_pet(new_pet(42, "Ghost")).await.is_err());
        assert!(store
            .insert_appointment(new_appointment(42, Utc::now()))
            .await
            .is_err());
        assert_eq!(store.pet_count(), 0);
        assert_eq!(store.appointment_count(), 0);
    }

    #[tokio::test]
    async fn deleting_an_owner_cascades_to_pets_and_appointments() {
        let store = MemoryStore::new();
        let kept = store.insert_owner(new_owner("Kept")).await.unwrap();
        let gone = store.insert_owner(new_owner("Gone")).await.unwrap();
        let kept_pet = store.insert_pet(new_pet(kept.owner_id, "Stay")).await.unwrap();
        let gone_pet = store.insert_pet(new_pet(gone.owner_id, "Leave")).await.unwrap();
        let later = Utc::now() + Duration::days(1);
        store.insert_appointment(new_appointment(kept_pet.pet_id, later)).await.unwrap();
        store.insert_appointment(new_appointment(gone_pet.pet_id, later)).await.unwrap();

        assert!(store.delete_owner(gone.owner_id).await.unwrap());
        assert!(!store.delete_owner(gone.owner_id).await.unwrap());

        assert!(!store.pet_exists(gone_pet.pet_id).await.unwrap());
        assert!(store.pet_exists(kept_pet.pet_id).await.unwrap());
        assert_eq!(store.appointment_count(), 1);
        assert_eq!(store.list_pets_with_owner().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn deleting_a_pet_cascades_to_appointments() {
        let store = MemoryStore::new();
        let owner = store.insert_owner(new_owner("Ana")).await.unwrap();
        let pet = store.insert_pet(new_pet(owner.owner_id, "Rex")).await.unwrap();
        store
            .insert_appointment(new_appointment(pet.pet_id, Utc::now()))
            .await
            .unwrap();

        assert!(store.delete_pet(pet.pet_id).await.unwrap());
        assert_eq!(store.appointment_count(), 0);
        assert!(store.owner_exists(owner.owner_id).await.unwrap());
    }

    #[tokio::test]
    async fn seed_plan_is_written_only_into_an_empty_store() {
        let store = MemoryStore::new();
        let plan = vec![SeedOwner {
            owner: new_owner("Ana"),
            pets: vec![SeedPet {
                name: "Rex".to_string(),
                species: "Dog".to_string(),
                breed: None,
                birth_date: None,
                is_neutered: true,
                visits: vec![SeedVisit {
                    visit_date: Utc::now() + Duration::days(1),
                    reason: "Check-up".to_string(),
                    status: AppointmentStatus::Scheduled,
                    notes: None,
                }],
            }],
        }];

        assert!(store.insert_seed_if_empty(&plan).await.unwrap());
        let owners = store.list_owners().await.unwrap();
        assert_eq!(owners.len(), 1);
        let pets = store.list_pets_for_owner(owners[0].owner_id).await.unwrap();
        assert_eq!(pets.len(), 1);
        assert!(pets[0].is_neutered);
        assert_eq!(store.appointment_count(), 1);

        assert!(!store.insert_seed_if_empty(&plan).await.unwrap());
        assert_eq!(store.list_owners().await.unwrap().len(), 1);
        assert_eq!(store.appointment_count(), 1);
    }

    #[tokio::test]
    async fn upcoming_rows_are_joined_with_pet_and_owner() {
        let store = MemoryStore::new();
        let owner = store.insert_owner(new_owner("Ana")).await.unwrap();
        let pet = store.insert_pet(new_pet(owner.owner_id, "Rex")).await.unwrap();
        let now = Utc::now();
        store
            .insert_appointment(new_appointment(pet.pet_id, now + Duration::days(2)))
            .await
            .unwrap();
        store
            .insert_appointment(new_appointment(pet.pet_id, now - Duration::days(2)))
            .await
            .unwrap();

        let upcoming = store.list_upcoming_appointments(now, 10).await.unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].pet_name, "Rex");
        assert_eq!(upcoming[0].owner_name, "Ana");
        assert_eq!(upcoming[0].phone.as_deref(), Some("555-0101"));
    }
}
