use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistSuggestion {
    pub event_name: String,
    pub items: Vec<String>,
}

impl WishlistSuggestion {
    pub fn new(event_name: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            event_name: event_name.into(),
            items,
        }
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}
