//! Maintenance-request type model.
//!
//! These types describe maintenance records for the API surface and the
//! generated TypeScript bindings. The maintenance pages are stubs: no table
//! and no endpoints exist for them yet, only the shared type model.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum MaintenanceStatus {
    #[serde(rename = "To Send")]
    ToSend,
    #[serde(rename = "In Discussion")]
    InDiscussion,
    Scheduled,
    Resolved,
    Superseded,
    Rejected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum MaintenanceType {
    Periodic,
    Extraordinary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Completion state of a single equipment item inside a periodic plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PeriodicEquipmentStatus {
    #[serde(rename = "Not Performed")]
    NotPerformed,
    Overdue,
    #[serde(rename = "Due Soon")]
    DueSoon,
    Complete,
    #[serde(rename = "Not Applicable")]
    NotApplicable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PeriodicityUnit {
    Days,
    Months,
    Years,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Periodicity {
    pub value: u32,
    pub unit: PeriodicityUnit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum AssignmentType {
    Fixed,
    Variable,
}

#[derive(Clone, Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExecutionRecord {
    pub completion_date: String,
    pub notes: Option<String>,
    pub attachment: Option<String>,
    pub user_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MaintenanceEquipmentLink {
    pub equipment_id: String,
    pub status: PeriodicEquipmentStatus,
    pub due_date: Option<String>,
    pub execution_history: Vec<ExecutionRecord>,
    pub notes: Option<String>,
    pub attachment: Option<String>,
    pub manager_id: Option<String>,
    pub assignee_id: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MaintenanceRequest {
    pub id: i32,
    /// Serves as the title; `details` holds the long description.
    pub description: String,
    pub details: Option<String>,
    pub status: MaintenanceStatus,
    pub priority: Priority,
    #[serde(rename = "type")]
    pub kind: MaintenanceType,
    pub creation_date: String,
    pub requester_id: String,
    pub assignee_id: Option<String>,
    pub manager_id: Option<String>,
    // Extraordinary maintenance
    pub equipment_id: Option<String>,
    pub scheduled_date: Option<String>,
    // Periodic maintenance
    pub assignment_type: Option<AssignmentType>,
    pub linked_categories: Option<Vec<String>>,
    pub equipment_list: Option<Vec<MaintenanceEquipmentLink>>,
    pub periodicity: Option<Periodicity>,
    pub due_soon_days: Option<u32>,
    // General details, used for approval notes in extraordinary maintenance
    pub notes: Option<String>,
    pub attachment: Option<String>,
}
