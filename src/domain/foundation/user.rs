//! Chat room member as seen by the order engine.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use super::UserId;

/// A room member. Equality and hashing use the identity only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub display_name: String,
    pub id: UserId,
}

impl User {
    pub fn new(display_name: impl Into<String>, id: UserId) -> Self {
        Self {
            display_name: display_name.into(),
            id,
        }
    }

    /// Builds a user whose display name is the identity's local part.
    pub fn from_identity(id: UserId) -> Self {
        let display_name = id.localpart().to_string();
        Self { display_name, id }
    }

    pub fn is(&self, id: &UserId) -> bool {
        &self.id == id
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
