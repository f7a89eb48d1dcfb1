use chrono::{DateTime, Utc};

use crate::logic::projection::{owner_detail, UPCOMING_LIMIT};
use crate::logic::{ClinicError, ClinicResult};
use crate::model::{Owner, OwnerDetail, OwnerId, PetWithOwner, UpcomingAppointment};
use crate::store::traits::Store;

pub async fn list_owners<S: Store>(store: &S) -> ClinicResult<Vec<Owner>> {
    Ok(store.list_owners().await?)
}

pub async fn get_owner_detail<S: Store>(store: &S, id: OwnerId) -> ClinicResult<OwnerDetail> {
    let owner = store.get_owner(id).await?.ok_or(ClinicError::NotFound)?;
    let pets = store.list_pets_for_owner(id).await?;
    Ok(owner_detail(owner, pets))
}

pub async fn list_pets<S: Store>(store: &S) -> ClinicResult<Vec<PetWithOwner>> {
    Ok(store.list_pets_with_owner().await?)
}

pub async fn upcoming_appointments<S: Store>(
    store: &S,
    now: DateTime<Utc>,
) -> ClinicResult<Vec<UpcomingAppointment>> {
    Ok(store.list_upcoming_appointments(now, UPCOMING_LIMIT).await?)
}
