use crate::model::{deserialize_birth_date, OwnerId, PetId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub pet_id: PetId,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub is_neutered: bool,
    pub owner_id: OwnerId,
}

/// Request payload for `POST /pets`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetCreate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default, deserialize_with = "deserialize_birth_date")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_neutered: bool,
    pub owner_id: OwnerId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPet {
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub is_neutered: bool,
    pub owner_id: OwnerId,
}

impl NewPet {
    pub fn into_pet(self, pet_id: PetId) -> Pet {
        Pet {
            pet_id,
            name: self.name,
            species: self.species,
            breed: self.breed,
            birth_date: self.birth_date,
            is_neutered: self.is_neutered,
            owner_id: self.owner_id,
        }
    }
}
