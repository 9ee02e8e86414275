//! The player's daily input to the resolution engine.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{LawId, MissionId, OrderId};

/// The rule the player wants to invoke today.
///
/// At most one of the three is applied per day. When several are set the
/// engine takes the law first, then the order, then the mission, and logs
/// the rest as ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TurnActionChoice {
    /// Law to enact.
    pub law: Option<LawId>,
    /// Emergency order to issue.
    pub order: Option<OrderId>,
    /// Mission to dispatch.
    pub mission: Option<MissionId>,
}

impl TurnActionChoice {
    /// A day with no action.
    pub const fn idle() -> Self {
        Self {
            law: None,
            order: None,
            mission: None,
        }
    }

    /// Enact a law.
    pub fn enact(law: impl Into<LawId>) -> Self {
        Self {
            law: Some(law.into()),
            ..Self::idle()
        }
    }

    /// Issue an emergency order.
    pub fn issue(order: impl Into<OrderId>) -> Self {
        Self {
            order: Some(order.into()),
            ..Self::idle()
        }
    }

    /// Dispatch a mission.
    pub fn dispatch(mission: impl Into<MissionId>) -> Self {
        Self {
            mission: Some(mission.into()),
            ..Self::idle()
        }
    }

    /// Whether no field is populated.
    pub const fn is_idle(&self) -> bool {
        self.law.is_none() && self.order.is_none() && self.mission.is_none()
    }
}
