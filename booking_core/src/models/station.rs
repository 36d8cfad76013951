use serde::{Deserialize, Serialize};

/// A rental station. Reference data, never mutated by the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub address: String,
}

impl Station {
    pub fn new(id: impl Into<String>, name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
        }
    }

    /// Case-insensitive substring match on name or address.
    ///
    /// A blank query matches every station.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query) || self.address.to_lowercase().contains(&query)
    }
}
