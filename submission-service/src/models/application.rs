//! Application lifecycle: the five-state pipeline and the role-keyed
//! transition table that gates every explicit status change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Role;

/// Pipeline states, in order. `PendingDocs` is the sole initial state and
/// `Approved` the sole terminal one; there is no backward edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    PendingDocs,
    FinancePending,
    VettingProgress,
    NafdacSubmitted,
    Approved,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::PendingDocs,
        ApplicationStatus::FinancePending,
        ApplicationStatus::VettingProgress,
        ApplicationStatus::NafdacSubmitted,
        ApplicationStatus::Approved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::PendingDocs => "PENDING_DOCS",
            ApplicationStatus::FinancePending => "FINANCE_PENDING",
            ApplicationStatus::VettingProgress => "VETTING_PROGRESS",
            ApplicationStatus::NafdacSubmitted => "NAFDAC_SUBMITTED",
            ApplicationStatus::Approved => "APPROVED",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Role {
    /// The single `(current, requested)` edge a role may execute through an
    /// explicit status-change request. Each department owns exactly one edge
    /// so no role can skip another department's gate; Documentation's edge
    /// is triggered implicitly by document upload and is therefore absent
    /// here.
    pub fn direct_edge(&self) -> Option<(ApplicationStatus, ApplicationStatus)> {
        match self {
            Role::Finance => Some((
                ApplicationStatus::FinancePending,
                ApplicationStatus::VettingProgress,
            )),
            Role::Vetting => Some((
                ApplicationStatus::VettingProgress,
                ApplicationStatus::NafdacSubmitted,
            )),
            Role::Director => Some((
                ApplicationStatus::NafdacSubmitted,
                ApplicationStatus::Approved,
            )),
            Role::Documentation | Role::Guest => None,
        }
    }
}

/// A client product moving through the submission pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct Application {
    pub id: i64,
    pub product_name: String,
    pub client_id: i64,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}
