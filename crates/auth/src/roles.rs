use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role label attached to a principal.
///
/// Roles are intentionally opaque strings at this layer; employee role labels
/// come from the role repository at sign-in/refresh time, while admins always
/// carry the fixed [`Role::super_admin`] label and never hit storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// The implicit role of every platform administrator.
    pub fn super_admin() -> Self {
        Self(Cow::Borrowed("SuperAdmin"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
