use crate::model::{AppointmentStatus, NewOwner};
use crate::seed::plan::{plan_totals, SeedOwner, SeedPet, SeedVisit};
use crate::store::traits::Store;
use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDate, Utc};

/// What a seeding run did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Skipped,
    Seeded {
        owners: usize,
        pets: usize,
        appointments: usize,
    },
}

/// Helper function to create an owner with contact details
fn owner(name: &str, email: &str, phone: &str, pets: Vec<SeedPet>) -> SeedOwner {
    SeedOwner {
        owner: NewOwner {
            name: name.to_string(),
            email: Some(email.to_string()),
            phone: Some(phone.to_string()),
        },
        pets,
    }
}

fn pet(
    name: &str,
    species: &str,
    breed: &str,
    birth_date: (i32, u32, u32),
    is_neutered: bool,
    visits: Vec<SeedVisit>,
) -> SeedPet {
    let (year, month, day) = birth_date;
    SeedPet {
        name: name.to_string(),
        species: species.to_string(),
        breed: Some(breed.to_string()),
        birth_date: NaiveDate::from_ymd_opt(year, month, day),
        is_neutered,
        visits,
    }
}

fn visit(
    visit_date: DateTime<Utc>,
    reason: &str,
    notes: Option<&str>,
    status: AppointmentStatus,
) -> SeedVisit {
    SeedVisit {
        visit_date,
        reason: reason.to_string(),
        status,
        notes: notes.map(str::to_string),
    }
}

/// The sample clinic: three owners, five pets and six visits.
///
/// Visit times are relative to `now`, so a fresh install always shows
/// some upcoming visits alongside past ones.
pub fn sample_clinic(now: DateTime<Utc>) -> Vec<SeedOwner> {
    use AppointmentStatus::{Cancelled, Completed, Scheduled};
    let days = Duration::days;

    vec![
        owner(
            "John Doe",
            "john.doe@example.com",
            "555-1234",
            vec![
                pet(
                    "Buddy",
                    "Dog",
                    "Golden Retriever",
                    (2020, 5, 10),
                    true,
                    vec![
                        visit(now + days(7), "Annual check-up", None, Scheduled),
                        visit(now - days(30), "Vaccination", Some("Rabies vaccine"), Completed),
                    ],
                ),
                pet(
                    "Mittens",
                    "Cat",
                    "Siamese",
                    (2019, 8, 15),
                    false,
                    vec![visit(now + days(14), "Dental cleaning", None, Scheduled)],
                ),
            ],
        ),
        owner(
            "Jane Smith",
            "jane.smith@example.com",
            "555-5678",
            vec![
                pet(
                    "Charlie",
                    "Dog",
                    "Beagle",
                    (2021, 3, 22),
                    true,
                    vec![visit(
                        now - days(10),
                        "Skin allergy treatment",
                        Some("Prescribed ointment"),
                        Completed,
                    )],
                ),
                pet(
                    "Whiskers",
                    "Cat",
                    "Persian",
                    (2022, 1, 10),
                    false,
                    vec![visit(now + days(3), "Neutering surgery", None, Cancelled)],
                ),
            ],
        ),
        owner(
            "Alice Johnson",
            "alice.johnson@example.com",
            "555-8765",
            vec![pet(
                "Coco",
                "Other",
                "Parrot",
                (2018, 7, 5),
                false,
                vec![visit(now - days(5), "Wing trimming", None, Completed)],
            )],
        ),
    ]
}

/// Write `plan` in one unit of work, but only into a store with no owners.
pub async fn seed_plan_if_empty<S: Store>(store: &S, plan: &[SeedOwner]) -> Result<SeedOutcome> {
    if !store.insert_seed_if_empty(plan).await? {
        log::info!("Owners already present, skipping seed data");
        return Ok(SeedOutcome::Skipped);
    }

    let (owners, pets, appointments) = plan_totals(plan);
    let outcome = SeedOutcome::Seeded {
        owners,
        pets,
        appointments,
    };
    log::info!("Seed data loaded: {:?}", outcome);
    Ok(outcome)
}

/// Insert the sample clinic data, but only into a store with no owners.
pub async fn seed_if_empty<S: Store>(store: &S, now: DateTime<Utc>) -> Result<SeedOutcome> {
    seed_plan_if_empty(store, &sample_clinic(now)).await
}
