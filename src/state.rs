//! Session-scoped selection state.
//!
//! Replaces hidden module-level globals with an explicit object owned by
//! the coordinator, so the current selection can be inspected and cleared
//! when its target disappears.

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Collection whose items are currently shown.
    pub current_collection_id: Option<String>,
    /// Order whose items are currently shown.
    pub current_order_id: Option<String>,
}

impl SessionState {
    pub fn select_collection(&mut self, id: &str) {
        self.current_collection_id = Some(id.to_string());
    }

    pub fn select_order(&mut self, id: &str) {
        self.current_order_id = Some(id.to_string());
    }

    /// Drop any selection pointing at a collection that no longer exists.
    pub fn clear_if_current(&mut self, id: &str) {
        if self.current_collection_id.as_deref() == Some(id) {
            self.current_collection_id = None;
        }
        if self.current_order_id.as_deref() == Some(id) {
            self.current_order_id = None;
        }
    }
}
