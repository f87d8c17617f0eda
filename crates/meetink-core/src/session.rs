//! Session identity for the local participant.

use uuid::Uuid;

/// Display label used when a participant's real name is not (yet) known.
pub const FALLBACK_NAME: &str = "Participant";

/// Who the local participant is on the wire.
///
/// The id is opaque and generated once at plugin load; it is not guaranteed
/// globally unique beyond practical collision odds. The display name is
/// best-effort: the host environment may resolve the real participant name
/// asynchronously, at which point [`SessionIdentity::set_display_name`]
/// updates the stored name for future strokes and labels — already-rendered
/// labels are not retroactively relabeled.
#[derive(Debug, Clone)]
pub struct SessionIdentity {
    user_id: String,
    display_name: String,
}

impl SessionIdentity {
    pub fn new() -> Self {
        Self {
            user_id: Uuid::new_v4().to_string(),
            display_name: FALLBACK_NAME.to_string(),
        }
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        let mut identity = Self::new();
        identity.display_name = name.into();
        identity
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Apply a late name resolution from the host environment.
    pub fn set_display_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !name.is_empty() {
            self.display_name = name;
        }
    }
}

impl Default for SessionIdentity {
    fn default() -> Self {
        Self::new()
    }
}
