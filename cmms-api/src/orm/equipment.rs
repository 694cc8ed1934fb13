use diesel::prelude::*;
use uuid::Uuid;

use crate::models::{Equipment, EquipmentInput, EquipmentRow, NewEquipment};

fn deserialization_error(message: String) -> diesel::result::Error {
    diesel::result::Error::DeserializationError(message.into())
}

/// Generates a new equipment code. The hosted store assigned string codes
/// on insert; here the code is minted before the insert so the row can be
/// returned without a second round trip.
fn generate_equipment_code() -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!("EQ-{}", token[..8].to_uppercase())
}

fn row_to_equipment(row: EquipmentRow) -> Result<Equipment, diesel::result::Error> {
    Equipment::try_from(row).map_err(deserialization_error)
}

/// Inserts a new equipment record. `last_maintenance`, `floor_plan_id` and
/// `position` start absent; status is stored exactly as submitted.
pub fn insert_equipment(
    conn: &mut SqliteConnection,
    input: EquipmentInput,
) -> Result<Equipment, diesel::result::Error> {
    use crate::schema::equipment::dsl::*;

    let new_equipment = NewEquipment {
        id: generate_equipment_code(),
        name: input.name,
        location: input.location,
        site_id: input.site_id,
        category: input.category,
        status: input.status.label().to_string(),
        last_maintenance: None,
        floor_plan_id: None,
        position: None,
    };

    diesel::insert_into(equipment)
        .values(&new_equipment)
        .execute(conn)?;

    let row = equipment
        .filter(id.eq(&new_equipment.id))
        .first::<EquipmentRow>(conn)?;
    row_to_equipment(row)
}

/// Returns all equipment ordered by name ascending - the list-view order.
pub fn list_all_equipment(
    conn: &mut SqliteConnection,
) -> Result<Vec<Equipment>, diesel::result::Error> {
    use crate::schema::equipment::dsl::*;
    equipment
        .order(name.asc())
        .load::<EquipmentRow>(conn)?
        .into_iter()
        .map(row_to_equipment)
        .collect()
}

/// Gets a single equipment record by its string code.
pub fn get_equipment_by_id(
    conn: &mut SqliteConnection,
    equipment_id: &str,
) -> Result<Option<Equipment>, diesel::result::Error> {
    use crate::schema::equipment::dsl::*;
    let row = equipment
        .filter(id.eq(equipment_id))
        .first::<EquipmentRow>(conn)
        .optional()?;
    row.map(row_to_equipment).transpose()
}

/// Case-insensitive substring filter over name, code and category. An empty
/// or blank term returns the list unchanged.
pub fn filter_equipment(list: Vec<Equipment>, term: &str) -> Vec<Equipment> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return list;
    }
    list.into_iter()
        .filter(|item| {
            item.name.to_lowercase().contains(&term)
                || item.id.to_lowercase().contains(&term)
                || item.category.to_lowercase().contains(&term)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EquipmentStatus;
    use crate::orm::company::insert_company;
    use crate::orm::site::insert_site;
    use crate::orm::testing::setup_test_db;

    fn seeded_site(conn: &mut SqliteConnection) -> i32 {
        let company = insert_company(conn, "Acme Manufacturing".to_string()).unwrap();
        insert_site(conn, "North Plant".to_string(), company.id)
            .unwrap()
            .id
    }

    #[test]
    fn test_insert_equipment_round_trip() {
        let mut conn = setup_test_db();
        let site_id = seeded_site(&mut conn);

        let created = insert_equipment(
            &mut conn,
            EquipmentInput {
                name: "Hydraulic Press".to_string(),
                category: "Mechanical".to_string(),
                location: "Hall A".to_string(),
                site_id,
                status: EquipmentStatus::Operational,
            },
        )
        .expect("Failed to insert equipment");

        assert!(created.id.starts_with("EQ-"));
        assert!(created.last_maintenance.is_none());
        assert!(created.position.is_none());

        let listed = list_all_equipment(&mut conn).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Hydraulic Press");
        assert_eq!(listed[0].category, "Mechanical");
        assert_eq!(listed[0].site_id, site_id);
        assert_eq!(listed[0].status, EquipmentStatus::Operational);
        assert!(listed[0].last_maintenance.is_none());
    }

    #[test]
    fn test_list_orders_by_name() {
        let mut conn = setup_test_db();
        let site_id = seeded_site(&mut conn);

        for name in ["Zeta Conveyor", "Alpha Press", "Mid Lathe"] {
            insert_equipment(
                &mut conn,
                EquipmentInput {
                    name: name.to_string(),
                    category: "Mechanical".to_string(),
                    location: "Hall A".to_string(),
                    site_id,
                    status: EquipmentStatus::Operational,
                },
            )
            .unwrap();
        }

        let names: Vec<_> = list_all_equipment(&mut conn)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Alpha Press", "Mid Lathe", "Zeta Conveyor"]);
    }

    #[test]
    fn test_filter_is_case_insensitive_over_name_id_and_category() {
        let mut conn = setup_test_db();
        let site_id = seeded_site(&mut conn);

        let press = insert_equipment(
            &mut conn,
            EquipmentInput {
                name: "Hydraulic Press".to_string(),
                category: "Mechanical".to_string(),
                location: "Hall A".to_string(),
                site_id,
                status: EquipmentStatus::Operational,
            },
        )
        .unwrap();
        insert_equipment(
            &mut conn,
            EquipmentInput {
                name: "Switchboard".to_string(),
                category: "Electrical".to_string(),
                location: "Hall B".to_string(),
                site_id,
                status: EquipmentStatus::Broken,
            },
        )
        .unwrap();

        let all = list_all_equipment(&mut conn).unwrap();

        // Empty term returns everything.
        assert_eq!(filter_equipment(all.clone(), "").len(), 2);
        assert_eq!(filter_equipment(all.clone(), "   ").len(), 2);

        // Name match, any case.
        let by_name = filter_equipment(all.clone(), "hYdRaUlIc");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Hydraulic Press");

        // Category match.
        let by_category = filter_equipment(all.clone(), "electr");
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].name, "Switchboard");

        // Code match.
        let code_fragment = press.id[..5].to_lowercase();
        let by_code = filter_equipment(all.clone(), &code_fragment);
        assert!(by_code.iter().any(|e| e.id == press.id));

        // No match.
        assert!(filter_equipment(all, "turbine").is_empty());
    }

    #[test]
    fn test_get_equipment_by_id_missing() {
        let mut conn = setup_test_db();
        assert!(get_equipment_by_id(&mut conn, "EQ-MISSING").unwrap().is_none());
    }
}
