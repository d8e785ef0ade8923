//! Participant references.
//!
//! Records keep pointing at people after their account is deleted: the
//! stored reference becomes empty. [`Member`] makes that explicit so every
//! aggregation step has to match on presence instead of assuming it.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

/// Opaque identifier of a group participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(Uuid);

impl ParticipantId {
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generates a fresh random id.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub const fn uuid(self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for ParticipantId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ParticipantId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| EngineError::InvalidId(format!("invalid participant id: {s}")))
    }
}

/// Reference to a participant that may have been deleted.
///
/// Serialized as a nullable id: `null` means [`Member::Deleted`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<ParticipantId>", into = "Option<ParticipantId>")]
pub enum Member {
    Active(ParticipantId),
    Deleted,
}

impl Member {
    /// Returns the participant id if the account still exists.
    #[must_use]
    pub const fn active(self) -> Option<ParticipantId> {
        match self {
            Member::Active(id) => Some(id),
            Member::Deleted => None,
        }
    }

    #[must_use]
    pub const fn is_deleted(self) -> bool {
        matches!(self, Member::Deleted)
    }
}

impl From<ParticipantId> for Member {
    fn from(value: ParticipantId) -> Self {
        Member::Active(value)
    }
}

impl From<Option<ParticipantId>> for Member {
    fn from(value: Option<ParticipantId>) -> Self {
        value.map_or(Member::Deleted, Member::Active)
    }
}

impl From<Member> for Option<ParticipantId> {
    fn from(value: Member) -> Self {
        value.active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_deserializes_as_deleted() {
        let member: Member = serde_json::from_str("null").unwrap();
        assert_eq!(member, Member::Deleted);
    }

    #[test]
    fn active_member_round_trips_as_plain_uuid() {
        let id = ParticipantId::random();
        let json = serde_json::to_string(&Member::Active(id)).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        assert_eq!(serde_json::from_str::<Member>(&json).unwrap(), Member::Active(id));
    }
}
