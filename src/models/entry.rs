use serde::{Deserialize, Serialize};

/// One agenda entry as shown to every connected viewer.
///
/// Entries come into existence when the broker broadcasts a Show event and
/// disappear on the matching Hide; they are never edited in place. The id is
/// assigned server-side and is stable for the entry's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i32,
    pub name: String,
    /// Category string; looked up in the ordering table at insertion time
    pub talk_type: String,
    pub desc: String,
}

impl Entry {
    pub fn new(
        id: i32,
        name: impl Into<String>,
        talk_type: impl Into<String>,
        desc: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            talk_type: talk_type.into(),
            desc: desc.into(),
        }
    }
}
