use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Floor-plan record referenced by equipment positions. The floor-plan page
/// is a stub; the type exists for the shared bindings only.
#[derive(Clone, Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FloorPlan {
    pub id: i32,
    pub name: String,
    pub site_id: i32,
    pub svg_url: String,
}
