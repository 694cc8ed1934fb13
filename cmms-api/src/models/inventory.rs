//! Spare-part and purchasing type model. Stub pages only: declared for the
//! API surface and TypeScript bindings, with no tables or endpoints behind
//! them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PurchaseStatus {
    Open,
    Approved,
    Ordered,
    Received,
    Completed,
}

#[derive(Clone, Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SparePart {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub min_stock: u32,
    pub location: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PurchaseRequest {
    pub id: i32,
    pub item: String,
    pub quantity: u32,
    pub maintenance_id: Option<i32>,
    pub spare_part_id: Option<String>,
    pub request_date: String,
    pub status: PurchaseStatus,
}
