//! Derived relationship and application status.
//!
//! Everything here is a pure function of its inputs and is recomputed on
//! every call. Nothing is cached, so the offered action always follows the
//! latest fetched collections.

use crate::{Application, PositionId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipStatus {
    IsSelf,
    NotConnected,
    RequestPending,
    Connected,
}

/// Action offered on a user profile or card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    EditProfile,
    Connect,
    Pending,
    Message,
}

impl RelationshipStatus {
    pub fn action(self) -> UserAction {
        match self {
            RelationshipStatus::IsSelf => UserAction::EditProfile,
            RelationshipStatus::NotConnected => UserAction::Connect,
            RelationshipStatus::RequestPending => UserAction::Pending,
            RelationshipStatus::Connected => UserAction::Message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    NotApplied,
    Applied,
}

/// Action offered on an open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionAction {
    OwnerDisabled,
    Apply,
    Applied,
}

/// Precedence: self, then connected, then pending. A target listed as both
/// connected and pending resolves to `Connected`.
pub fn resolve_relationship(
    viewer: &UserId,
    target: &UserId,
    connected: &[UserId],
    pending: &[UserId],
) -> RelationshipStatus {
    if viewer == target {
        RelationshipStatus::IsSelf
    } else if connected.contains(target) {
        RelationshipStatus::Connected
    } else if pending.contains(target) {
        RelationshipStatus::RequestPending
    } else {
        RelationshipStatus::NotConnected
    }
}

pub fn resolve_application(
    applications: &[Application],
    position: &PositionId,
) -> ApplicationStatus {
    if applications
        .iter()
        .any(|application| &application.position_id == position)
    {
        ApplicationStatus::Applied
    } else {
        ApplicationStatus::NotApplied
    }
}

/// Owners cannot apply to their own positions.
pub fn resolve_position_action(
    viewer: &UserId,
    position_owner: &UserId,
    status: ApplicationStatus,
) -> PositionAction {
    if viewer == position_owner {
        return PositionAction::OwnerDisabled;
    }
    match status {
        ApplicationStatus::NotApplied => PositionAction::Apply,
        ApplicationStatus::Applied => PositionAction::Applied,
    }
}
