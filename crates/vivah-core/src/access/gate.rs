//! Plan-based visibility policy
//!
//! | Field class                 | free              | premium |
//! |-----------------------------|-------------------|---------|
//! | basics (name, age, photos…) | visible           | visible |
//! | phone / email               | masked            | visible |
//! | mutual match list           | hidden (upsell)   | visible |

use serde::{Deserialize, Serialize};

use crate::entities::{ContactDetails, MatchSummary, ProfileBasics, ProfileRecord};
use crate::value_objects::{PlanTier, UserId};

use super::mask::mask_contact;

const UPSELL_MESSAGE: &str = "Upgrade to premium to see your matches and their contact details";

/// Derived viewer context; never persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccessContext {
    pub viewer_plan: PlanTier,
}

impl AccessContext {
    pub fn new(viewer_plan: PlanTier) -> Self {
        Self { viewer_plan }
    }

    /// Redact a full record for this viewer
    pub fn redact(&self, record: &ProfileRecord) -> RedactedProfile {
        visible_fields(self.viewer_plan, record)
    }

    /// Gate a bare match list for this viewer
    pub fn gate_matches(&self, matches: Vec<MatchSummary>) -> MatchListView {
        visible_match_list(self.viewer_plan, matches)
    }
}

/// Contact fields after the gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactView {
    pub phone: Option<String>,
    pub email: Option<String>,
    /// True when the values above are masked
    pub masked: bool,
}

/// Prompt shown in place of gated content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsellPrompt {
    pub message: String,
    pub required_plan: PlanTier,
}

impl Default for UpsellPrompt {
    fn default() -> Self {
        Self {
            message: UPSELL_MESSAGE.to_string(),
            required_plan: PlanTier::Premium,
        }
    }
}

/// Match list after the gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "visibility", rename_all = "snake_case")]
pub enum MatchListView {
    Visible { matches: Vec<MatchSummary> },
    Hidden { upsell: UpsellPrompt },
}

impl MatchListView {
    /// Entries the viewer may see; always empty when hidden
    pub fn entries(&self) -> &[MatchSummary] {
        match self {
            Self::Visible { matches } => matches,
            Self::Hidden { .. } => &[],
        }
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        matches!(self, Self::Hidden { .. })
    }
}

/// Profile after the gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactedProfile {
    pub user_id: UserId,
    pub basics: ProfileBasics,
    pub contact: ContactView,
    pub matches: MatchListView,
}

/// Apply the visibility policy to a full record
pub fn visible_fields(viewer_plan: PlanTier, record: &ProfileRecord) -> RedactedProfile {
    RedactedProfile {
        user_id: record.user_id.clone(),
        basics: record.basics.clone(),
        contact: contact_view(viewer_plan, &record.contact),
        matches: visible_match_list(viewer_plan, record.matches.clone()),
    }
}

/// Apply the match-list row of the policy on its own
pub fn visible_match_list(viewer_plan: PlanTier, matches: Vec<MatchSummary>) -> MatchListView {
    match viewer_plan {
        PlanTier::Premium => MatchListView::Visible { matches },
        PlanTier::Free => MatchListView::Hidden {
            upsell: UpsellPrompt::default(),
        },
    }
}

fn contact_view(viewer_plan: PlanTier, contact: &ContactDetails) -> ContactView {
    match viewer_plan {
        PlanTier::Premium => ContactView {
            phone: contact.phone.clone(),
            email: contact.email.clone(),
            masked: false,
        },
        PlanTier::Free => ContactView {
            phone: contact.phone.as_deref().map(mask_contact),
            email: contact.email.as_deref().map(mask_contact),
            masked: true,
        },
    }
}
