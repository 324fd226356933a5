use serde::{Deserialize, Serialize};

/// Postal address attached to every student record. All three parts are
/// required; the persisted JSON always carries the full sub-object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub area: String,
    pub zip: String,
}

/// One student's stored data. `id` is assigned by the caller and never
/// regenerated here; `status` is an open string tag ("Active", "Inactive",
/// "Graduated", ...), not a closed enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: u64,
    pub name: String,
    pub age: u32,
    pub course: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    pub status: String,
}

impl StudentRecord {
    /// Single-cell rendering of the address, "city, area, zip".
    pub fn address_display(&self) -> String {
        format!(
            "{}, {}, {}",
            self.address.city, self.address.area, self.address.zip
        )
    }
}
