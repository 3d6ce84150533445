use serde::{Deserialize, Serialize};

/// Acting role resolved for a request. `Guest` is the unauthenticated
/// fallback and is never a member of any operation allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Director,
    Finance,
    Vetting,
    Documentation,
    Guest,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Director => "DIRECTOR",
            Role::Finance => "FINANCE",
            Role::Vetting => "VETTING",
            Role::Documentation => "DOCUMENTATION",
            Role::Guest => "GUEST",
        }
    }

    /// The four department roles an account may be created with.
    pub fn is_assignable(&self) -> bool {
        !matches!(self, Role::Guest)
    }

    /// Short prefix used when minting invite codes, e.g. `FIN-A3K9Z`.
    pub fn invite_prefix(&self) -> &'static str {
        &self.as_str()[..3]
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
