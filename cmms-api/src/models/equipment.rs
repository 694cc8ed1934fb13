use std::fmt;

use diesel::{Associations, Identifiable, Insertable, Queryable, QueryableByName};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::schema::equipment;

/// Operational state of a piece of equipment. Free-standing: never derived
/// from maintenance history. The serialized label is the stored value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum EquipmentStatus {
    Operational,
    #[serde(rename = "In Maintenance")]
    InMaintenance,
    Broken,
    #[serde(rename = "Out Of Service")]
    OutOfService,
}

impl EquipmentStatus {
    pub const ALL: [EquipmentStatus; 4] = [
        EquipmentStatus::Operational,
        EquipmentStatus::InMaintenance,
        EquipmentStatus::Broken,
        EquipmentStatus::OutOfService,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EquipmentStatus::Operational => "Operational",
            EquipmentStatus::InMaintenance => "In Maintenance",
            EquipmentStatus::Broken => "Broken",
            EquipmentStatus::OutOfService => "Out Of Service",
        }
    }

    pub fn from_label(label: &str) -> Option<EquipmentStatus> {
        EquipmentStatus::ALL.iter().copied().find(|s| s.label() == label)
    }
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed category list; the first entry is the creation-form default.
pub const EQUIPMENT_CATEGORIES: [&str; 6] = [
    "Mechanical",
    "Electrical",
    "Hydraulic",
    "Pneumatic",
    "Instrumentation",
    "Building",
];

/// Coordinates on a floor plan, stored as JSON in the row.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Raw equipment row as stored. Status and position stay text here; the
/// API-facing [`Equipment`] carries the typed forms.
#[derive(Clone, Queryable, Identifiable, Associations, QueryableByName, Debug)]
#[diesel(belongs_to(crate::models::site::Site))]
#[diesel(table_name = equipment)]
pub struct EquipmentRow {
    pub id: String,
    pub name: String,
    pub location: String,
    pub site_id: i32,
    pub category: String,
    pub status: String,
    pub last_maintenance: Option<String>,
    pub floor_plan_id: Option<i32>,
    pub position: Option<String>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = equipment)]
pub struct NewEquipment {
    pub id: String,
    pub name: String,
    pub location: String,
    pub site_id: i32,
    pub category: String,
    pub status: String,
    pub last_maintenance: Option<String>,
    pub floor_plan_id: Option<i32>,
    pub position: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub location: String,
    pub site_id: i32,
    pub category: String,
    pub status: EquipmentStatus,
    pub last_maintenance: Option<String>,
    pub floor_plan_id: Option<i32>,
    pub position: Option<Position>,
}

// For API inputs and validation
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EquipmentInput {
    pub name: String,
    pub category: String,
    pub location: String,
    pub site_id: i32,
    pub status: EquipmentStatus,
}

impl TryFrom<EquipmentRow> for Equipment {
    type Error = String;

    fn try_from(row: EquipmentRow) -> Result<Self, Self::Error> {
        let status = EquipmentStatus::from_label(&row.status)
            .ok_or_else(|| format!("unknown equipment status '{}'", row.status))?;
        let position = match row.position {
            Some(raw) => Some(
                serde_json::from_str::<Position>(&raw)
                    .map_err(|e| format!("invalid position payload: {e}"))?,
            ),
            None => None,
        };
        Ok(Equipment {
            id: row.id,
            name: row.name,
            location: row.location,
            site_id: row.site_id,
            category: row.category,
            status,
            last_maintenance: row.last_maintenance,
            floor_plan_id: row.floor_plan_id,
            position,
        })
    }
}
