use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Roles a user can hold. The serialized label doubles as the stored
/// identifier and the UI label, so there is no separate display mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Role {
    Admin,
    #[serde(rename = "Periodic Maintenance Manager")]
    PeriodicMaintenanceManager,
    #[serde(rename = "Periodic Maintenance Worker")]
    PeriodicMaintenanceWorker,
    #[serde(rename = "Extraordinary Maintenance Manager")]
    ExtraordinaryMaintenanceManager,
    #[serde(rename = "Extraordinary Maintenance Worker")]
    ExtraordinaryMaintenanceWorker,
    #[serde(rename = "Warehouse Manager")]
    WarehouseManager,
    #[serde(rename = "Purchasing Manager")]
    PurchasingManager,
    Requester,
}

impl Role {
    /// Every role, in the order the role pickers present them.
    pub const ALL: [Role; 8] = [
        Role::Admin,
        Role::PeriodicMaintenanceManager,
        Role::PeriodicMaintenanceWorker,
        Role::ExtraordinaryMaintenanceManager,
        Role::ExtraordinaryMaintenanceWorker,
        Role::WarehouseManager,
        Role::PurchasingManager,
        Role::Requester,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::PeriodicMaintenanceManager => "Periodic Maintenance Manager",
            Role::PeriodicMaintenanceWorker => "Periodic Maintenance Worker",
            Role::ExtraordinaryMaintenanceManager => "Extraordinary Maintenance Manager",
            Role::ExtraordinaryMaintenanceWorker => "Extraordinary Maintenance Worker",
            Role::WarehouseManager => "Warehouse Manager",
            Role::PurchasingManager => "Purchasing Manager",
            Role::Requester => "Requester",
        }
    }

    /// Parses a stored/displayed label back into a role.
    pub fn from_label(label: &str) -> Option<Role> {
        Role::ALL.iter().copied().find(|r| r.label() == label)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::from_label(role.label()), Some(role));
        }
        assert_eq!(Role::from_label("No Such Role"), None);
    }

    #[test]
    fn test_serialized_form_is_the_label() {
        let json = serde_json::to_string(&Role::WarehouseManager).unwrap();
        assert_eq!(json, "\"Warehouse Manager\"");
        let parsed: Role = serde_json::from_str("\"Requester\"").unwrap();
        assert_eq!(parsed, Role::Requester);
    }
}
