use crate::model::{
    Appointment, Owner, OwnerBrief, OwnerDetail, Pet, PetWithOwner, UpcomingAppointment,
};
use chrono::{DateTime, Utc};

/// Maximum number of rows returned by the upcoming-appointments read.
pub const UPCOMING_LIMIT: usize = 10;

/// Filter to visits at or after `now`, order ascending by visit time, keep the first `limit`.
///
/// Visits at the same instant are ordered by appointment id.
pub fn select_upcoming<'a, I>(appointments: I, now: DateTime<Utc>, limit: usize) -> Vec<&'a Appointment>
where
    I: IntoIterator<Item = &'a Appointment>,
{
    let mut upcoming: Vec<&Appointment> = appointments
        .into_iter()
        .filter(|appointment| appointment.visit_date >= now)
        .collect();
    upcoming.sort_by_key(|appointment| (appointment.visit_date, appointment.appointment_id));
    upcoming.truncate(limit);
    upcoming
}

pub fn upcoming_view(appointment: &Appointment, pet: &Pet, owner: &Owner) -> UpcomingAppointment {
    UpcomingAppointment {
        appointment_id: appointment.appointment_id,
        visit_date: appointment.visit_date,
        status: appointment.status,
        pet_name: pet.name.clone(),
        species: pet.species.clone(),
        owner_name: owner.name.clone(),
        phone: owner.phone.clone(),
    }
}

pub fn pet_with_owner(pet: &Pet, owner: &Owner) -> PetWithOwner {
    PetWithOwner {
        pet: pet.clone(),
        owner: OwnerBrief::from(owner),
    }
}

pub fn owner_detail(owner: Owner, pets: Vec<Pet>) -> OwnerDetail {
    OwnerDetail { owner, pets }
}
