//! Declarative table of entity fields and foreign keys.
//!
//! The SQL migration under `migrations/` encodes the same constraints; the
//! validators read max lengths from here so both sides stay in step.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Owner,
    Pet,
    Appointment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Identifier,
    Text,
    Date,
    Timestamp,
    Boolean,
    /// Closed set of text values
    Enum(&'static [&'static str]),
    Reference(Entity),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePolicy {
    Cascade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Name used in request and response payloads
    pub name: &'static str,
    pub column: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    pub max_len: Option<usize>,
    pub default: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub field: &'static str,
    pub references: Entity,
    pub on_delete: DeletePolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySchema {
    pub entity: Entity,
    pub table: &'static str,
    pub fields: &'static [FieldDef],
    pub foreign_keys: &'static [ForeignKey],
}

impl EntitySchema {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn max_len(&self, name: &str) -> Option<usize> {
        self.field(name).and_then(|field| field.max_len)
    }
}

const fn field(
    name: &'static str,
    column: &'static str,
    field_type: FieldType,
    required: bool,
    max_len: Option<usize>,
) -> FieldDef {
    FieldDef {
        name,
        column,
        field_type,
        required,
        max_len,
        default: None,
    }
}

pub const STATUS_VALUES: &[&str] = &["Scheduled", "Completed", "Cancelled"];

pub const OWNER_SCHEMA: EntitySchema = EntitySchema {
    entity: Entity::Owner,
    table: "clinic.owners",
    fields: &[
        field("ownerId", "owner_id", FieldType::Identifier, true, None),
        field("name", "full_name", FieldType::Text, true, Some(120)),
        field("email", "email", FieldType::Text, false, Some(160)),
        field("phone", "phone", FieldType::Text, false, Some(40)),
    ],
    foreign_keys: &[],
};

pub const PET_SCHEMA: EntitySchema = EntitySchema {
    entity: Entity::Pet,
    table: "clinic.pets",
    fields: &[
        field("petId", "pet_id", FieldType::Identifier, true, None),
        field("name", "pet_name", FieldType::Text, true, Some(80)),
        field("species", "species", FieldType::Text, true, Some(40)),
        field("breed", "breed", FieldType::Text, false, Some(80)),
        field("birthDate", "birth_date", FieldType::Date, false, None),
        FieldDef {
            default: Some("false"),
            ..field("isNeutered", "is_neutered", FieldType::Boolean, true, None)
        },
        field("ownerId", "owner_id", FieldType::Reference(Entity::Owner), true, None),
    ],
    foreign_keys: &[ForeignKey {
        field: "ownerId",
        references: Entity::Owner,
        on_delete: DeletePolicy::Cascade,
    }],
};

pub const APPOINTMENT_SCHEMA: EntitySchema = EntitySchema {
    entity: Entity::Appointment,
    table: "clinic.appointments",
    fields: &[
        field("appointmentId", "appointment_id", FieldType::Identifier, true, None),
        field("petId", "pet_id", FieldType::Reference(Entity::Pet), true, None),
        field("visitDate", "visit_date", FieldType::Timestamp, true, None),
        field("reason", "reason", FieldType::Text, true, Some(200)),
        FieldDef {
            default: Some("Scheduled"),
            ..field("status", "status", FieldType::Enum(STATUS_VALUES), true, Some(20))
        },
        field("notes", "notes", FieldType::Text, false, Some(400)),
    ],
    foreign_keys: &[ForeignKey {
        field: "petId",
        references: Entity::Pet,
        on_delete: DeletePolicy::Cascade,
    }],
};

pub const ALL_SCHEMAS: &[EntitySchema] = &[OWNER_SCHEMA, PET_SCHEMA, APPOINTMENT_SCHEMA];

pub fn schema_for(entity: Entity) -> &'static EntitySchema {
    match entity {
        Entity::Owner => &OWNER_SCHEMA,
        Entity::Pet => &PET_SCHEMA,
        Entity::Appointment => &APPOINTMENT_SCHEMA,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIGRATION: &str = include_str!("../../migrations/0001_clinic_schema.sql");

    #[test]
    fn migration_matches_declared_text_limits() {
        for schema in ALL_SCHEMAS {
            for field in schema.fields {
                if let Some(max_len) = field.max_len {
                    let column = format!("{} VARCHAR({})", field.column, max_len);
                    assert!(
                        MIGRATION.contains(&column),
                        "{} is missing `{}`",
                        schema.table,
                        column
                    );
                }
            }
        }
    }

    #[test]
    fn every_foreign_key_cascades_in_migration() {
        for schema in ALL_SCHEMAS {
            for fk in schema.foreign_keys {
                let column = schema.field(fk.field).unwrap().column;
                let target = schema_for(fk.references);
                let target_key = target.fields[0].column;
                let clause = format!(
                    "{} INTEGER NOT NULL REFERENCES {} ({}) ON DELETE CASCADE",
                    column, target.table, target_key
                );
                assert_eq!(fk.on_delete, DeletePolicy::Cascade);
                assert!(MIGRATION.contains(&clause), "missing `{}`", clause);
            }
        }
    }

    #[test]
    fn ownership_forms_a_tree() {
        assert!(OWNER_SCHEMA.foreign_keys.is_empty());
        assert_eq!(PET_SCHEMA.foreign_keys[0].references, Entity::Owner);
        assert_eq!(APPOINTMENT_SCHEMA.foreign_keys[0].references, Entity::Pet);
    }

    #[test]
    fn defaults_are_declared() {
        assert_eq!(
            APPOINTMENT_SCHEMA.field("status").and_then(|f| f.default),
            Some("Scheduled")
        );
        assert_eq!(
            PET_SCHEMA.field("isNeutered").and_then(|f| f.default),
            Some("false")
        );
        assert_eq!(OWNER_SCHEMA.max_len("name"), Some(120));
        assert_eq!(OWNER_SCHEMA.max_len("unknown"), None);
    }
}
