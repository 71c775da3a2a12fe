//! Remote cursor registry.
//!
//! Tracks the other participant's cursor as an opaque position descriptor.
//! Entries are only removed explicitly; a `participant_left` notification
//! is informational and does not evict anything.

use std::collections::HashMap;

/// A remote participant's cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteCursor {
    pub display_name: String,
    pub position: serde_json::Value,
}

/// Cursor state per remote participant id.
#[derive(Debug, Clone, Default)]
pub struct CursorRegistry {
    cursors: HashMap<String, RemoteCursor>,
}

impl CursorRegistry {
    /// Upsert a cursor observation. Returns `false` for self-echo, which is
    /// never applied.
    pub fn observe(
        &mut self,
        self_id: &str,
        user_id: &str,
        user_name: &str,
        position: serde_json::Value,
    ) -> bool {
        if user_id == self_id {
            return false;
        }
        self.cursors.insert(
            user_id.to_string(),
            RemoteCursor {
                display_name: user_name.to_string(),
                position,
            },
        );
        true
    }

    pub fn remove(&mut self, user_id: &str) -> Option<RemoteCursor> {
        self.cursors.remove(user_id)
    }

    pub fn get(&self, user_id: &str) -> Option<&RemoteCursor> {
        self.cursors.get(user_id)
    }

    pub fn snapshot(&self) -> HashMap<String, RemoteCursor> {
        self.cursors.clone()
    }

    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }
}
