use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, postgres::PgRow, PgExecutor, PgPool, Row};

use crate::model::{
    Appointment, AppointmentId, AppointmentStatus, NewAppointment, NewOwner, NewPet, Owner,
    OwnerBrief, OwnerId, Pet, PetId, PetWithOwner, UpcomingAppointment,
};
use crate::seed::plan::SeedOwner;
use crate::store::traits::{AppointmentStore, OwnerStore, PetStore, SeedStore};

const PET_COLUMNS: &str = "p.pet_id, p.pet_name, p.species, p.breed, p.birth_date, p.is_neutered, p.owner_id";

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Apply the embedded migrations under `migrations/`
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }
}

fn owner_from_row(row: &PgRow) -> Owner {
    Owner {
        owner_id: row.get("owner_id"),
        name: row.get("full_name"),
        email: row.get("email"),
        phone: row.get("phone"),
    }
}

fn pet_from_row(row: &PgRow) -> Pet {
    Pet {
        pet_id: row.get("pet_id"),
        name: row.get("pet_name"),
        species: row.get("species"),
        breed: row.get("breed"),
        birth_date: row.get("birth_date"),
        is_neutered: row.get("is_neutered"),
        owner_id: row.get("owner_id"),
    }
}

fn status_from_row(row: &PgRow) -> Result<AppointmentStatus> {
    let status: String = row.get("status");
    status
        .parse()
        .with_context(|| format!("Stored appointment has invalid status '{}'", status))
}

async fn insert_owner_row<'e, E: PgExecutor<'e>>(executor: E, owner: &NewOwner) -> Result<OwnerId> {
    sqlx::query_scalar(
        r#"
        INSERT INTO clinic.owners (full_name, email, phone)
        VALUES ($1, $2, $3)
        RETURNING owner_id
        "#,
    )
    .bind(&owner.name)
    .bind(&owner.email)
    .bind(&owner.phone)
    .fetch_one(executor)
    .await
    .context("Failed to insert owner")
}

async fn insert_pet_row<'e, E: PgExecutor<'e>>(executor: E, pet: &NewPet) -> Result<PetId> {
    sqlx::query_scalar(
        r#"
        INSERT INTO clinic.pets (pet_name, species, breed, birth_date, is_neutered, owner_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING pet_id
        "#,
    )
    .bind(&pet.name)
    .bind(&pet.species)
    .bind(&pet.breed)
    .bind(pet.birth_date)
    .bind(pet.is_neutered)
    .bind(pet.owner_id)
    .fetch_one(executor)
    .await
    .context("Failed to insert pet")
}

async fn insert_appointment_row<'e, E: PgExecutor<'e>>(
    executor: E,
    appointment: &NewAppointment,
) -> Result<AppointmentId> {
    sqlx::query_scalar(
        r#"
        INSERT INTO clinic.appointments (pet_id, visit_date, reason, status, notes)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING appointment_id
        "#,
    )
    .bind(appointment.pet_id)
    .bind(appointment.visit_date)
    .bind(&appointment.reason)
    .bind(appointment.status.as_str())
    .bind(&appointment.notes)
    .fetch_one(executor)
    .await
    .context("Failed to insert appointment")
}

#[async_trait::async_trait]
impl OwnerStore for PostgresStore {
    async fn list_owners(&self) -> Result<Vec<Owner>> {
        let rows = sqlx::query("SELECT owner_id, full_name, email, phone FROM clinic.owners ORDER BY owner_id")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list owners")?;

        Ok(rows.iter().map(owner_from_row).collect())
    }

    async fn get_owner(&self, id: OwnerId) -> Result<Option<Owner>> {
        let row = sqlx::query("SELECT owner_id, full_name, email, phone FROM clinic.owners WHERE owner_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch owner")?;

        Ok(row.as_ref().map(owner_from_row))
    }

    async fn owner_exists(&self, id: OwnerId) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM clinic.owners WHERE owner_id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to check owner existence")?;

        Ok(exists)
    }

    async fn insert_owner(&self, owner: NewOwner) -> Result<Owner> {
        let owner_id = insert_owner_row(&self.pool, &owner).await?;
        Ok(owner.into_owner(owner_id))
    }

    async fn delete_owner(&self, id: OwnerId) -> Result<bool> {
        // pets and appointments follow through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM clinic.owners WHERE owner_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete owner")?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl PetStore for PostgresStore {
    async fn list_pets_with_owner(&self) -> Result<Vec<PetWithOwner>> {
        let sql = format!(
            r#"
            SELECT {}, o.full_name AS owner_name, o.phone AS owner_phone
            FROM clinic.pets p
            JOIN clinic.owners o ON o.owner_id = p.owner_id
            ORDER BY p.pet_id
            "#,
            PET_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list pets")?;

        Ok(rows
            .iter()
            .map(|row| {
                let pet = pet_from_row(row);
                let owner = OwnerBrief {
                    owner_id: pet.owner_id,
                    name: row.get("owner_name"),
                    phone: row.get("owner_phone"),
                };
                PetWithOwner { pet, owner }
            })
            .collect())
    }

    async fn list_pets_for_owner(&self, owner_id: OwnerId) -> Result<Vec<Pet>> {
        let sql = format!(
            "SELECT {} FROM clinic.pets p WHERE p.owner_id = $1 ORDER BY p.pet_id",
            PET_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list pets for owner")?;

        Ok(rows.iter().map(pet_from_row).collect())
    }

    async fn pet_exists(&self, id: PetId) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM clinic.pets WHERE pet_id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to check pet existence")?;

        Ok(exists)
    }

    async fn insert_pet(&self, pet: NewPet) -> Result<Pet> {
        let pet_id = insert_pet_row(&self.pool, &pet).await?;
        Ok(pet.into_pet(pet_id))
    }

    async fn delete_pet(&self, id: PetId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM clinic.pets WHERE pet_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete pet")?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl AppointmentStore for PostgresStore {
    async fn list_upcoming_appointments(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<UpcomingAppointment>> {
        let rows = sqlx::query(
            r#"
            SELECT a.appointment_id, a.visit_date, a.status,
                   p.pet_name, p.species, o.full_name, o.phone
            FROM clinic.appointments a
            JOIN clinic.pets p ON p.pet_id = a.pet_id
            JOIN clinic.owners o ON o.owner_id = p.owner_id
            WHERE a.visit_date >= $1
            ORDER BY a.visit_date, a.appointment_id
            LIMIT $2
            "#,
        )
        .bind(now)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list upcoming appointments")?;

        rows.iter()
            .map(|row| -> Result<UpcomingAppointment> {
                Ok(UpcomingAppointment {
                    appointment_id: row.get("appointment_id"),
                    visit_date: row.get("visit_date"),
                    status: status_from_row(row)?,
                    pet_name: row.get("pet_name"),
                    species: row.get("species"),
                    owner_name: row.get("full_name"),
                    phone: row.get("phone"),
                })
            })
            .collect()
    }

    async fn insert_appointment(&self, appointment: NewAppointment) -> Result<Appointment> {
        let appointment_id = insert_appointment_row(&self.pool, &appointment).await?;
        Ok(appointment.into_appointment(appointment_id))
    }
}

#[async_trait::async_trait]
impl SeedStore for PostgresStore {
    async fn insert_seed_if_empty(&self, plan: &[SeedOwner]) -> Result<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to start seed transaction")?;

        // Concurrent bootstraps wait here instead of both seeing an empty table
        sqlx::query("LOCK TABLE clinic.owners IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await
            .context("Failed to lock owners for seeding")?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM clinic.owners)")
            .fetch_one(&mut *tx)
            .await
            .context("Failed to check for owners")?;
        if exists {
            tx.rollback().await.context("Failed to release seed transaction")?;
            return Ok(false);
        }

        // Dropping `tx` on an early return rolls every insert back
        for seed_owner in plan {
            let owner_id = insert_owner_row(&mut *tx, &seed_owner.owner).await?;
            for seed_pet in &seed_owner.pets {
                let pet_id = insert_pet_row(&mut *tx, &seed_pet.to_new_pet(owner_id)).await?;
                for seed_visit in &seed_pet.visits {
                    insert_appointment_row(&mut *tx, &seed_visit.to_new_appointment(pet_id))
                        .await?;
                }
            }
        }

        tx.commit().await.context("Failed to commit seed data")?;
        Ok(true)
    }
}
