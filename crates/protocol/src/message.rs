use serde::{Deserialize, Serialize};

/// A contact form submission bound for the `messages` collection.
///
/// The server assigns the timestamp at write time, so the wire record
/// carries only the user-entered fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    /// Whether every required field is non-empty after trimming.
    ///
    /// This is the only validation the system performs; semantic checks
    /// (email format and the like) stay with the presentation host.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.message.trim().is_empty()
    }
}
