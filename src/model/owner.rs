use crate::model::OwnerId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub owner_id: OwnerId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Request payload for `POST /owners`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerCreate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Validated owner ready to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOwner {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl NewOwner {
    pub fn into_owner(self, owner_id: OwnerId) -> Owner {
        Owner {
            owner_id,
            name: self.name,
            email: self.email,
            phone: self.phone,
        }
    }
}
