use scout_core::{
    update, AppState, Application, ApplicationStatus, Msg, PositionAction, PositionId,
    RelationshipStatus, UserAction, UserId,
};

fn ids(values: &[&str]) -> Vec<UserId> {
    values.iter().copied().map(UserId::from).collect()
}

fn loaded(connected: &[&str], pending: &[&str], positions: &[&str]) -> AppState {
    let applications = positions
        .iter()
        .enumerate()
        .map(|(index, position)| Application {
            id: format!("app-{index}"),
            position_id: PositionId::from(*position),
        })
        .collect();
    let (state, _) = update(
        AppState::new(UserId::from("me")),
        Msg::RelationsLoaded {
            connected: Some(ids(connected)),
            pending: Some(ids(pending)),
            applications: Some(applications),
        },
    );
    state
}

#[test]
fn relationship_precedence_follows_lists() {
    let state = loaded(&["ann", "both"], &["both", "pete"], &[]);
    let viewer = state.viewer();

    assert_eq!(viewer.relationship_to(&UserId::from("me")), RelationshipStatus::IsSelf);
    assert_eq!(viewer.relationship_to(&UserId::from("both")), RelationshipStatus::Connected);
    assert_eq!(
        viewer.relationship_to(&UserId::from("pete")),
        RelationshipStatus::RequestPending
    );
    assert_eq!(
        viewer.relationship_to(&UserId::from("zoe")).action(),
        UserAction::Connect
    );
}

#[test]
fn context_messages_apply_without_mounted_page() {
    let state = loaded(&[], &[], &[]);
    let zoe = UserId::from("zoe");

    let (state, _) = update(state, Msg::ConnectionRequestSent(zoe.clone()));
    assert_eq!(state.viewer().relationship_to(&zoe), RelationshipStatus::RequestPending);

    let (state, _) = update(state, Msg::ConnectionAccepted(zoe.clone()));
    assert_eq!(state.viewer().relationship_to(&zoe).action(), UserAction::Message);
}

#[test]
fn application_status_is_stable_across_calls() {
    let state = loaded(&[], &[], &["p1"]);
    let p1 = PositionId::from("p1");

    let first = state.viewer().application_status(&p1);
    let second = state.viewer().application_status(&p1);
    assert_eq!(first, ApplicationStatus::Applied);
    assert_eq!(first, second);

    let p2 = PositionId::from("p2");
    assert_eq!(
        state.viewer().position_action(&p2, &UserId::from("founder")),
        PositionAction::Apply
    );
    assert_eq!(
        state.viewer().position_action(&p2, &UserId::from("me")),
        PositionAction::OwnerDisabled
    );

    let (state, _) = update(
        state,
        Msg::ApplicationSubmitted(Application {
            id: "app-new".to_string(),
            position_id: p2.clone(),
        }),
    );
    assert_eq!(
        state.viewer().position_action(&p2, &UserId::from("founder")),
        PositionAction::Applied
    );
}

#[test]
fn failed_collection_keeps_least_committal_status() {
    let (state, _) = update(
        AppState::new(UserId::from("me")),
        Msg::RelationsLoaded {
            connected: None,
            pending: Some(ids(&["pete"])),
            applications: None,
        },
    );

    assert!(!state.viewer().is_loaded());
    assert_eq!(
        state.viewer().relationship_to(&UserId::from("ann")),
        RelationshipStatus::NotConnected
    );
    assert_eq!(
        state.viewer().application_status(&PositionId::from("p1")),
        ApplicationStatus::NotApplied
    );
}
