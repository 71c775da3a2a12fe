//! Editor convergence without echo loops.
//!
//! Two independently-edited buffers are kept consistent by whole-buffer
//! replacement: the last full update wins. This is a deliberate trade for
//! the two-participant, human-typing-speed case — concurrent edits to
//! disjoint regions can overwrite each other, which is a documented
//! limitation, not a bug. Fine-grained merging would need an OT/CRDT core.
//!
//! Every buffer mutation flows through this engine with an explicit origin
//! (user keystroke vs. programmatic write), so echo suppression never
//! depends on a flag that could be left set.

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// What to do after a user-originated buffer change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalOutcome {
    /// The content changed; transmit it.
    Send { content: String },
    /// Content identical to what is already applied; nothing to transmit.
    Unchanged,
}

/// What to do after a remote or snapshot update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOutcome {
    /// Write `content` into the buffer as a programmatic update. The
    /// resulting buffer-change callback must not be fed back through
    /// [`EditorSync::local_edit`].
    Replace { content: String },
    /// Self-echo or no-op; leave the buffer alone.
    Ignored,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Per-session sync state for the shared editor buffer.
#[derive(Debug, Clone, Default)]
pub struct EditorSync {
    /// Content last transmitted by this client.
    last_sent: String,
    /// Content last written into the buffer, from any source.
    last_applied: String,
}

impl EditorSync {
    /// Start from the authoritative content fetched at session start.
    pub fn with_baseline(content: &str) -> Self {
        Self {
            last_sent: content.to_string(),
            last_applied: content.to_string(),
        }
    }

    /// A user keystroke changed the buffer to `content`.
    pub fn local_edit(&mut self, content: &str) -> LocalOutcome {
        if content == self.last_applied {
            return LocalOutcome::Unchanged;
        }
        self.last_sent = content.to_string();
        self.last_applied = content.to_string();
        LocalOutcome::Send {
            content: content.to_string(),
        }
    }

    /// An `editor_update` arrived from the relay.
    pub fn remote_update(&mut self, sender_id: &str, self_id: &str, content: &str) -> RemoteOutcome {
        if sender_id == self_id || content == self.last_applied {
            return RemoteOutcome::Ignored;
        }
        self.last_applied = content.to_string();
        RemoteOutcome::Replace {
            content: content.to_string(),
        }
    }

    /// A `room_state` snapshot arrived. The room state always wins at
    /// session start, regardless of who produced the local content.
    pub fn apply_snapshot(&mut self, content: &str) -> RemoteOutcome {
        if content == self.last_applied {
            return RemoteOutcome::Ignored;
        }
        self.last_applied = content.to_string();
        RemoteOutcome::Replace {
            content: content.to_string(),
        }
    }

    /// The content currently known to be in the buffer.
    pub fn current(&self) -> &str {
        &self.last_applied
    }

    /// The content this client last transmitted.
    pub fn last_sent(&self) -> &str {
        &self.last_sent
    }
}
