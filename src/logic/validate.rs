//! Create-request validation.
//!
//! Every validator is a pure function of the request and the existence of the
//! rows it references; callers perform the existence read right before the
//! write and pass the answer in.

use crate::logic::ValidationError;
use crate::model::{
    AppointmentCreate, AppointmentStatus, EntitySchema, NewAppointment, NewOwner, NewPet,
    OwnerCreate, PetCreate, APPOINTMENT_SCHEMA, OWNER_SCHEMA, PET_SCHEMA, STATUS_VALUES,
};

type Validated<T> = Result<T, ValidationError>;

pub fn validate_owner_create(input: OwnerCreate) -> Validated<NewOwner> {
    let name = non_blank(input.name.as_deref()).ok_or_else(|| ValidationError::invalid("Name is required."))?;
    check_len(&OWNER_SCHEMA, "name", "Name", name)?;

    Ok(NewOwner {
        name: name.to_string(),
        email: optional_text(&OWNER_SCHEMA, "email", "Email", input.email)?,
        phone: optional_text(&OWNER_SCHEMA, "phone", "Phone", input.phone)?,
    })
}

pub fn validate_pet_create(input: PetCreate, owner_exists: bool) -> Validated<NewPet> {
    let (Some(name), Some(species)) = (
        non_blank(input.name.as_deref()),
        non_blank(input.species.as_deref()),
    ) else {
        return Err(ValidationError::invalid("Name and Species are required."));
    };

    if !owner_exists {
        return Err(ValidationError::missing_reference("OwnerId not found."));
    }

    check_len(&PET_SCHEMA, "name", "Name", name)?;
    check_len(&PET_SCHEMA, "species", "Species", species)?;

    Ok(NewPet {
        name: name.to_string(),
        species: species.to_string(),
        breed: optional_text(&PET_SCHEMA, "breed", "Breed", input.breed)?,
        birth_date: input.birth_date,
        is_neutered: input.is_neutered,
        owner_id: input.owner_id,
    })
}

pub fn validate_appointment_create(
    input: AppointmentCreate,
    pet_exists: bool,
) -> Validated<NewAppointment> {
    if !pet_exists {
        return Err(ValidationError::missing_reference("PetId not found."));
    }

    let reason = non_blank(input.reason.as_deref()).ok_or_else(|| ValidationError::invalid("Reason is required."))?;
    check_len(&APPOINTMENT_SCHEMA, "reason", "Reason", reason)?;

    let status = match non_blank(input.status.as_deref()) {
        None => AppointmentStatus::default(),
        Some(raw) => raw.parse::<AppointmentStatus>().map_err(|_| {
            ValidationError::invalid(format!(
                "Status must be one of {}.",
                STATUS_VALUES.join(", ")
            ))
        })?,
    };

    Ok(NewAppointment {
        pet_id: input.pet_id,
        visit_date: input.visit_date,
        reason: reason.to_string(),
        status,
        notes: optional_text(&APPOINTMENT_SCHEMA, "notes", "Notes", input.notes)?,
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn check_len(schema: &EntitySchema, field: &str, label: &str, value: &str) -> Validated<()> {
    match schema.max_len(field) {
        Some(max_len) if value.chars().count() > max_len => Err(ValidationError::invalid(
            format!("{} must be at most {} characters.", label, max_len),
        )),
        _ => Ok(()),
    }
}

fn optional_text(
    schema: &EntitySchema,
    field: &str,
    label: &str,
    value: Option<String>,
) -> Validated<Option<String>> {
    match non_blank(value.as_deref()) {
        None => Ok(None),
        Some(text) => {
            check_len(schema, field, label, text)?;
            Ok(Some(text.to_string()))
        }
    }
}
