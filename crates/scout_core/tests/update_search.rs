use std::sync::Once;
use std::time::Duration;

use pretty_assertions::assert_eq;
use scout_core::{
    update, AppState, Effect, FilterField, ListingSummary, Msg, Notice, QueryFailure,
    ResultSource, UserId, DEFAULT_DEBOUNCE_WINDOW,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(scout_logging::initialize_for_tests);
}

fn listing(id: &str) -> ListingSummary {
    ListingSummary {
        id: id.to_string(),
        title: format!("Listing {id}"),
        description: None,
        stage: None,
        category: Some("SaaS".to_string()),
        location: None,
    }
}

fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Mounted page with the bulk collection already delivered.
fn mounted(bulk: Vec<ListingSummary>) -> AppState {
    let (state, _) = update(AppState::new(UserId::from("viewer")), Msg::Mounted);
    let (mut state, _) = update(state, Msg::BulkLoaded(Ok(bulk)));
    state.consume_dirty();
    state
}

fn armed_generation(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::ArmDebounce { generation, .. } => Some(*generation),
            _ => None,
        })
        .expect("arm effect")
}

fn issued(effects: &[Effect]) -> Vec<(u64, Vec<(String, String)>)> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::IssueSearch { seq, params } => Some((*seq, params.clone())),
            _ => None,
        })
        .collect()
}

#[test]
fn mount_loads_bulk_and_relations() {
    init_logging();
    let (state, effects) = update(AppState::new(UserId::from("viewer")), Msg::Mounted);

    assert!(state.view().mounted);
    assert_eq!(
        effects,
        vec![
            Effect::LoadBulk,
            Effect::LoadRelations {
                viewer: UserId::from("viewer")
            }
        ]
    );

    let (_, effects) = update(state, Msg::Mounted);
    assert!(effects.is_empty());
}

#[test]
fn rapid_typing_settles_once_with_last_text() {
    init_logging();
    let state = mounted(vec![listing("bulk")]);

    let mut generations = Vec::new();
    let mut state = state;
    for text in ["a", "ab", "abc"] {
        let (next, effects) = update(state, Msg::TextChanged(text.to_string()));
        assert_eq!(
            effects,
            vec![Effect::ArmDebounce {
                generation: armed_generation(&effects),
                window: DEFAULT_DEBOUNCE_WINDOW,
            }]
        );
        generations.push(armed_generation(&effects));
        state = next;
    }

    // Superseded timers that still fire settle nothing.
    let mut requests = Vec::new();
    for generation in &generations {
        let (next, effects) = update(
            state,
            Msg::DebounceElapsed {
                generation: *generation,
            },
        );
        requests.extend(issued(&effects));
        state = next;
    }

    assert_eq!(requests, vec![(1, params(&[("search", "abc")]))]);
    assert!(state.view().searching);
}

#[test]
fn category_only_request_displays_items_in_received_order() {
    init_logging();
    let state = mounted(vec![listing("bulk")]);

    let (state, _) = update(
        state,
        Msg::FilterChanged {
            field: FilterField::Stage,
            value: "All".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::FilterChanged {
            field: FilterField::Location,
            value: "All".to_string(),
        },
    );
    let (state, effects) = update(
        state,
        Msg::FilterChanged {
            field: FilterField::Category,
            value: "SaaS".to_string(),
        },
    );
    let generation = armed_generation(&effects);
    let (state, effects) = update(state, Msg::DebounceElapsed { generation });

    let requests = issued(&effects);
    assert_eq!(requests, vec![(1, params(&[("category", "SaaS")]))]);

    let response = vec![listing("z"), listing("a"), listing("m")];
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            seq: 1,
            result: Ok(response.clone()),
        },
    );

    let view = state.view();
    assert_eq!(view.results, response);
    assert_eq!(view.source, ResultSource::Server);
    assert!(!view.searching);
    assert_eq!(view.notice, None);
    assert_eq!(view.filters.category, "SaaS");
    assert_eq!(view.filters.stage, "All");
}

#[test]
fn stale_response_never_replaces_newer_result() {
    init_logging();
    let state = mounted(Vec::new());

    let (state, effects) = update(state, Msg::TextChanged("ai".to_string()));
    let (state, effects) = update(
        state,
        Msg::DebounceElapsed {
            generation: armed_generation(&effects),
        },
    );
    let (seq_a, _) = issued(&effects)[0].clone();

    let (state, effects) = update(state, Msg::TextChanged("aix".to_string()));
    assert!(effects.contains(&Effect::AbortSearch { seq: seq_a }));
    let (state, effects) = update(
        state,
        Msg::DebounceElapsed {
            generation: armed_generation(&effects),
        },
    );
    let (seq_b, _) = issued(&effects)[0].clone();
    assert!(seq_b > seq_a);

    // B answers first, then A straggles in.
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            seq: seq_b,
            result: Ok(vec![listing("b")]),
        },
    );
    let (mut state, _) = update(
        state,
        Msg::SearchCompleted {
            seq: seq_a,
            result: Ok(vec![listing("a")]),
        },
    );

    assert_eq!(state.view().results, vec![listing("b")]);
    state.consume_dirty();

    // A late failure for A changes nothing either.
    let (mut state, _) = update(
        state,
        Msg::SearchCompleted {
            seq: seq_a,
            result: Err(QueryFailure::Transport),
        },
    );
    assert!(!state.consume_dirty());
    assert_eq!(state.view().results, vec![listing("b")]);
}

#[test]
fn default_state_uses_bulk_without_request() {
    init_logging();
    let bulk = vec![listing("1"), listing("2")];
    let state = mounted(bulk.clone());

    let (state, effects) = update(state, Msg::TextChanged("x".to_string()));
    let (state, effects) = update(
        state,
        Msg::DebounceElapsed {
            generation: armed_generation(&effects),
        },
    );
    let (seq, _) = issued(&effects)[0].clone();

    let (state, effects) = update(state, Msg::TextChanged(String::new()));
    assert_eq!(effects[0], Effect::AbortSearch { seq });
    let (state, effects) = update(
        state,
        Msg::DebounceElapsed {
            generation: armed_generation(&effects),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.results, bulk);
    assert_eq!(view.source, ResultSource::Bulk);
    assert!(!view.searching);
}

#[test]
fn reset_arms_debounce_once() {
    init_logging();
    let state = mounted(vec![listing("bulk")]);
    let (state, _) = update(state, Msg::TextChanged("abc".to_string()));
    let (state, _) = update(
        state,
        Msg::FilterChanged {
            field: FilterField::Stage,
            value: "MVP".to_string(),
        },
    );

    let (state, effects) = update(state, Msg::FiltersReset);

    assert_eq!(effects.len(), 1);
    let generation = armed_generation(&effects);
    let (state, effects) = update(state, Msg::DebounceElapsed { generation });
    assert!(effects.is_empty());
    assert_eq!(state.view().results, vec![listing("bulk")]);
    assert_eq!(state.view().filters.stage, "All");
    assert_eq!(state.view().filters.text, "");
}

#[test]
fn failed_search_shows_try_again_and_empty_list() {
    init_logging();
    let state = mounted(vec![listing("bulk")]);
    let (state, effects) = update(state, Msg::TextChanged("x".to_string()));
    let (state, effects) = update(
        state,
        Msg::DebounceElapsed {
            generation: armed_generation(&effects),
        },
    );
    let (seq, _) = issued(&effects)[0].clone();

    let (state, effects) = update(
        state,
        Msg::SearchCompleted {
            seq,
            result: Err(QueryFailure::Timeout),
        },
    );

    // No automatic retry.
    assert!(effects.is_empty());
    let view = state.view();
    assert!(view.results.is_empty());
    assert_eq!(view.notice, Some(Notice::TryAgain));
}

#[test]
fn empty_response_shows_no_matches() {
    init_logging();
    let state = mounted(vec![listing("bulk")]);
    let (state, effects) = update(state, Msg::TextChanged("zzz".to_string()));
    let (state, effects) = update(
        state,
        Msg::DebounceElapsed {
            generation: armed_generation(&effects),
        },
    );
    let (seq, _) = issued(&effects)[0].clone();
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            seq,
            result: Ok(Vec::new()),
        },
    );

    assert_eq!(state.view().notice, Some(Notice::NoMatches));
}

#[test]
fn configured_window_is_carried_by_arm_effect() {
    let window = Duration::from_millis(450);
    let state = AppState::new(UserId::from("viewer")).with_debounce_window(window);
    let (state, _) = update(state, Msg::Mounted);

    let (_, effects) = update(state, Msg::TextChanged("q".to_string()));

    assert_eq!(
        effects,
        vec![Effect::ArmDebounce {
            generation: 1,
            window
        }]
    );
}

#[test]
fn filter_change_invalidates_request_in_flight() {
    init_logging();
    let state = mounted(vec![listing("bulk")]);
    let (state, effects) = update(
        state,
        Msg::FilterChanged {
            field: FilterField::Category,
            value: "SaaS".to_string(),
        },
    );
    let (state, effects) = update(
        state,
        Msg::DebounceElapsed {
            generation: armed_generation(&effects),
        },
    );
    let (seq, _) = issued(&effects)[0].clone();

    let (state, effects) = update(
        state,
        Msg::FilterChanged {
            field: FilterField::Category,
            value: "Fintech".to_string(),
        },
    );
    let fintech_generation = armed_generation(&effects);
    assert_eq!(
        effects,
        vec![
            Effect::AbortSearch { seq },
            Effect::ArmDebounce {
                generation: fintech_generation,
                window: DEFAULT_DEBOUNCE_WINDOW,
            },
        ]
    );
    assert!(!state.view().searching);

    // The SaaS answer arrives before the Fintech intent settles.
    let (mut state, _) = update(
        state,
        Msg::SearchCompleted {
            seq,
            result: Ok(vec![listing("saas-result")]),
        },
    );

    let view = state.view();
    assert_eq!(view.filters.category, "Fintech");
    assert_eq!(view.results, vec![listing("bulk")]);
    assert_eq!(view.source, ResultSource::Bulk);
    state.consume_dirty();

    // Settling the new intent issues a fresh request with nothing left to abort.
    let (_, effects) = update(
        state,
        Msg::DebounceElapsed {
            generation: fintech_generation,
        },
    );
    assert_eq!(
        effects,
        vec![Effect::IssueSearch {
            seq: seq + 1,
            params: params(&[("category", "Fintech")]),
        }]
    );
}
