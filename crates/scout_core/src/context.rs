use crate::relationship::{
    resolve_application, resolve_position_action, resolve_relationship, ApplicationStatus,
    PositionAction, RelationshipStatus,
};
use crate::{Application, PositionId, UserId};

/// The viewer and the relationship collections fetched for them.
///
/// `None` means "not loaded yet". Unknown collections resolve to the
/// least-committal status, never to an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerContext {
    viewer: UserId,
    connected: Option<Vec<UserId>>,
    pending: Option<Vec<UserId>>,
    applications: Option<Vec<Application>>,
}

impl ViewerContext {
    pub fn new(viewer: UserId) -> Self {
        Self {
            viewer,
            connected: None,
            pending: None,
            applications: None,
        }
    }

    pub fn viewer(&self) -> &UserId {
        &self.viewer
    }

    pub fn is_loaded(&self) -> bool {
        self.connected.is_some() && self.pending.is_some() && self.applications.is_some()
    }

    /// Replaces the collections that were fetched; `None` keeps the current value.
    pub fn replace(
        &mut self,
        connected: Option<Vec<UserId>>,
        pending: Option<Vec<UserId>>,
        applications: Option<Vec<Application>>,
    ) {
        if connected.is_some() {
            self.connected = connected;
        }
        if pending.is_some() {
            self.pending = pending;
        }
        if applications.is_some() {
            self.applications = applications;
        }
    }

    pub fn record_request_sent(&mut self, target: UserId) {
        let pending = self.pending.get_or_insert_with(Vec::new);
        if !pending.contains(&target) {
            pending.push(target);
        }
    }

    pub fn record_connection_accepted(&mut self, target: UserId) {
        if let Some(pending) = self.pending.as_mut() {
            pending.retain(|user| user != &target);
        }
        let connected = self.connected.get_or_insert_with(Vec::new);
        if !connected.contains(&target) {
            connected.push(target);
        }
    }

    pub fn record_application(&mut self, application: Application) {
        self.applications
            .get_or_insert_with(Vec::new)
            .push(application);
    }

    pub fn relationship_to(&self, target: &UserId) -> RelationshipStatus {
        resolve_relationship(
            &self.viewer,
            target,
            self.connected.as_deref().unwrap_or_default(),
            self.pending.as_deref().unwrap_or_default(),
        )
    }

    pub fn application_status(&self, position: &PositionId) -> ApplicationStatus {
        resolve_application(self.applications.as_deref().unwrap_or_default(), position)
    }

    pub fn position_action(&self, position: &PositionId, owner: &UserId) -> PositionAction {
        resolve_position_action(&self.viewer, owner, self.application_status(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unloaded_collections_are_least_committal() {
        let context = ViewerContext::new(UserId::from("me"));
        assert!(!context.is_loaded());
        assert_eq!(
            context.relationship_to(&UserId::from("bob")),
            RelationshipStatus::NotConnected
        );
        assert_eq!(
            context.application_status(&PositionId::from("p1")),
            ApplicationStatus::NotApplied
        );
    }

    #[test]
    fn acceptance_moves_pending_to_connected() {
        let mut context = ViewerContext::new(UserId::from("me"));
        let bob = UserId::from("bob");

        context.record_request_sent(bob.clone());
        assert_eq!(context.relationship_to(&bob), RelationshipStatus::RequestPending);

        context.record_connection_accepted(bob.clone());
        assert_eq!(context.relationship_to(&bob), RelationshipStatus::Connected);
        assert_eq!(context.pending.as_deref(), Some(&[][..]));
    }

    #[test]
    fn partial_reload_keeps_known_collections() {
        let mut context = ViewerContext::new(UserId::from("me"));
        context.replace(Some(vec![UserId::from("bob")]), Some(Vec::new()), None);
        context.replace(None, None, Some(Vec::new()));

        assert!(context.is_loaded());
        assert_eq!(
            context.relationship_to(&UserId::from("bob")),
            RelationshipStatus::Connected
        );
    }
}
