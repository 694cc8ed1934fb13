//! TypeScript type generation module.
//!
//! Exports TypeScript definitions for every struct annotated with
//! `#[ts(export)]`. Running this test writes .ts files for the SPA to
//! consume.

#[cfg(test)]
mod tests {
    use std::{env, path::Path};

    use ts_rs::TS;

    #[test]
    fn generate_typescript_types() {
        let output_dir_str =
            env::var("CMMS_TS_OUTPUT_DIR").unwrap_or_else(|_| "../ts-bindings".to_string());
        let output_dir = Path::new(&output_dir_str);

        if !output_dir.exists() {
            std::fs::create_dir_all(output_dir).expect("Failed to create output directory");
        }

        // Clean up old TypeScript files so removed or renamed Rust types do
        // not leave orphaned definitions behind.
        for entry in std::fs::read_dir(output_dir).expect("Failed to read output directory") {
            let entry = entry.expect("Failed to read directory entry");
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("ts") {
                std::fs::remove_file(&path)
                    .unwrap_or_else(|_| panic!("Failed to remove {:?}", path));
            }
        }

        unsafe {
            env::set_var("TS_RS_EXPORT_DIR", output_dir);
        }

        use crate::{
            api::{
                company::ErrorResponse as CompanyErrorResponse,
                equipment::{EquipmentOptions, ErrorResponse as EquipmentErrorResponse},
                login::{
                    ErrorResponse as LoginErrorResponse, LoginRequest, SessionIdentity,
                    SignupRequest,
                },
                site::ErrorResponse as SiteErrorResponse,
                status::HealthStatus,
                user::ErrorResponse as UserErrorResponse,
            },
            models::*,
            reference::ReferenceSnapshot,
        };

        // Domain model types
        User::export().expect("Failed to export User type");
        UserInput::export().expect("Failed to export UserInput type");
        Role::export().expect("Failed to export Role type");
        Company::export().expect("Failed to export Company type");
        CompanyInput::export().expect("Failed to export CompanyInput type");
        Site::export().expect("Failed to export Site type");
        SiteInput::export().expect("Failed to export SiteInput type");
        Equipment::export().expect("Failed to export Equipment type");
        EquipmentInput::export().expect("Failed to export EquipmentInput type");
        EquipmentStatus::export().expect("Failed to export EquipmentStatus type");
        Position::export().expect("Failed to export Position type");
        FloorPlan::export().expect("Failed to export FloorPlan type");

        // Declared-only page types
        MaintenanceRequest::export().expect("Failed to export MaintenanceRequest type");
        MaintenanceStatus::export().expect("Failed to export MaintenanceStatus type");
        MaintenanceType::export().expect("Failed to export MaintenanceType type");
        MaintenanceEquipmentLink::export()
            .expect("Failed to export MaintenanceEquipmentLink type");
        ExecutionRecord::export().expect("Failed to export ExecutionRecord type");
        PeriodicEquipmentStatus::export()
            .expect("Failed to export PeriodicEquipmentStatus type");
        Periodicity::export().expect("Failed to export Periodicity type");
        PeriodicityUnit::export().expect("Failed to export PeriodicityUnit type");
        Priority::export().expect("Failed to export Priority type");
        AssignmentType::export().expect("Failed to export AssignmentType type");
        SparePart::export().expect("Failed to export SparePart type");
        PurchaseRequest::export().expect("Failed to export PurchaseRequest type");
        PurchaseStatus::export().expect("Failed to export PurchaseStatus type");

        // Reference-data snapshot
        ReferenceSnapshot::export().expect("Failed to export ReferenceSnapshot type");

        // API types
        SessionIdentity::export().expect("Failed to export SessionIdentity type");
        LoginRequest::export().expect("Failed to export LoginRequest type");
        SignupRequest::export().expect("Failed to export SignupRequest type");
        EquipmentOptions::export().expect("Failed to export EquipmentOptions type");
        HealthStatus::export().expect("Failed to export HealthStatus type");
        LoginErrorResponse::export().expect("Failed to export login::ErrorResponse type");
        CompanyErrorResponse::export().expect("Failed to export company::ErrorResponse type");
        SiteErrorResponse::export().expect("Failed to export site::ErrorResponse type");
        EquipmentErrorResponse::export()
            .expect("Failed to export equipment::ErrorResponse type");
        UserErrorResponse::export().expect("Failed to export user::ErrorResponse type");

        println!("TypeScript types generated successfully in {:?}", output_dir);
    }
}
