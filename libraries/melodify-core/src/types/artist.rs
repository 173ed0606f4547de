/// Artist domain type
use serde::{Deserialize, Serialize};

/// Artist profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    /// Unique artist identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Opaque profile image locator
    #[serde(default)]
    pub image_ref: String,

    /// Genre tags
    #[serde(default)]
    pub genres: Vec<String>,
}
