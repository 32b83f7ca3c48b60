use alloy::transports::mock::Asserter;
use std::sync::atomic::Ordering;
use volley_bundle::RoundError;
use volley_test_utils::{
    init_tracing,
    provider::{mock_provider, push_quantity},
    relay::{MockConnector, MockRelay},
    rounds::{test_round, test_tx},
    test_constants::CORE_CONTRACT,
};
use volley_types::{Resolution, SlotState};

/// Queue the nonce and height reads of one round starting at height 100.
fn settlement() -> Asserter {
    let asserter = Asserter::new();
    push_quantity(&asserter, 7);
    push_quantity(&asserter, 100);
    asserter
}

#[tokio::test]
async fn inclusion_skips_later_slots() {
    init_tracing();

    let relay = MockRelay::new().with_resolution(101, Resolution::Included);
    let connector = MockConnector::new(relay);
    let asserter = settlement();
    let (mut round, completions) = test_round(connector.clone(), mock_provider(&asserter), 3);
    let rx = round.subscribe();

    let included = round.submit(&[test_tx(CORE_CONTRACT, 1)]).await.unwrap();
    assert_eq!(included, Some(101));

    // slot 102 was never awaited
    assert_eq!(connector.relay().awaited_slots(), vec![100, 101]);

    let state = round.state();
    assert_eq!(
        state.states(),
        vec![SlotState::PassedWithoutInclusion, SlotState::Included, SlotState::Skipped]
    );
    assert_eq!(state.included_slot(), Some(101));
    assert!(round.is_submitting());
    assert!(round.is_completed());
    assert!(round.last_error().is_none());
    assert_eq!(completions.load(Ordering::SeqCst), 1);

    // start, three broadcasts, three resolutions, completion
    assert_eq!(rx.borrow().version, 8);
    assert_eq!(*rx.borrow(), state);
}

#[tokio::test]
async fn round_without_inclusion_still_completes() {
    let relay = MockRelay::new().with_resolution(100, Resolution::AccountNonceTooHigh);
    let connector = MockConnector::new(relay);
    let asserter = settlement();
    let (mut round, completions) = test_round(connector.clone(), mock_provider(&asserter), 3);

    let included = round.submit(&[test_tx(CORE_CONTRACT, 1)]).await.unwrap();
    assert_eq!(included, None);
    assert_eq!(connector.relay().awaited_slots(), vec![100, 101, 102]);
    assert_eq!(
        round.state().states(),
        vec![
            SlotState::NonceTooHigh,
            SlotState::PassedWithoutInclusion,
            SlotState::PassedWithoutInclusion
        ]
    );
    assert!(round.is_completed());
    assert_eq!(completions.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn await_failure_ends_the_round() {
    let relay = MockRelay::new().failing_await(101);
    let connector = MockConnector::new(relay);
    let asserter = settlement();
    let (mut round, completions) = test_round(connector.clone(), mock_provider(&asserter), 3);

    let err = round.submit(&[test_tx(CORE_CONTRACT, 1)]).await.unwrap_err();
    assert!(matches!(err, RoundError::ResultAwait { slot: 101, .. }));

    assert_eq!(connector.relay().awaited_slots(), vec![100, 101]);
    assert_eq!(
        round.state().states(),
        vec![SlotState::PassedWithoutInclusion, SlotState::Submitted, SlotState::Submitted]
    );
    assert_eq!(round.last_error().as_deref(), Some("Could not await bundle result"));
    assert!(!round.is_completed());
    assert_eq!(completions.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn setup_failure_records_error_and_completes_once() {
    let asserter = Asserter::new();
    asserter.push_failure_msg("node unavailable");
    let connector = MockConnector::new(MockRelay::new());
    let (mut round, completions) = test_round(connector.clone(), mock_provider(&asserter), 3);

    let err = round.submit(&[test_tx(CORE_CONTRACT, 1)]).await.unwrap_err();
    assert!(matches!(err, RoundError::SequenceFetch(_)));

    assert!(connector.relay().sends().is_empty());
    assert_eq!(round.last_error().as_deref(), Some("Could not retrieve nonce"));
    assert_eq!(round.state().states(), vec![SlotState::Submitting; 3]);
    assert!(!round.is_completed());
    assert_eq!(completions.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_submission_fires_callback() {
    let asserter = Asserter::new();
    let connector = MockConnector::new(MockRelay::new());
    let (mut round, completions) = test_round(connector.clone(), mock_provider(&asserter), 2);

    let err = round.submit(&[]).await.unwrap_err();
    assert!(matches!(err, RoundError::NoTransactions));
    assert_eq!(round.last_error().as_deref(), Some("No transactions to submit"));
    assert_eq!(completions.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn clear_resets_the_handle() {
    let relay = MockRelay::new().with_resolution(100, Resolution::Included);
    let connector = MockConnector::new(relay);
    let asserter = settlement();
    let (mut round, completions) = test_round(connector.clone(), mock_provider(&asserter), 2);

    round.submit(&[test_tx(CORE_CONTRACT, 1)]).await.unwrap();
    assert!(round.is_completed());

    round.clear();
    let state = round.state();
    assert!(state.slots.is_empty());
    assert!(!round.is_submitting());
    assert!(!round.is_completed());
    assert!(round.last_error().is_none());

    // clearing is not a completion
    assert_eq!(completions.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn handle_runs_consecutive_rounds() {
    let relay = MockRelay::new().with_resolution(100, Resolution::Included);
    let connector = MockConnector::new(relay);
    let asserter = settlement();
    push_quantity(&asserter, 8);
    push_quantity(&asserter, 200);
    let (mut round, completions) = test_round(connector.clone(), mock_provider(&asserter), 2);

    assert_eq!(round.submit(&[test_tx(CORE_CONTRACT, 1)]).await.unwrap(), Some(100));
    assert_eq!(round.submit(&[test_tx(CORE_CONTRACT, 2)]).await.unwrap(), None);

    let sends = connector.relay().sends();
    assert_eq!(sends.len(), 4);
    assert!(sends[..2].iter().all(|(_, bundle)| bundle.nonces().eq([7])));
    assert!(sends[2..].iter().all(|(_, bundle)| bundle.nonces().eq([8])));
    assert_eq!(
        round.state().states(),
        vec![SlotState::PassedWithoutInclusion, SlotState::PassedWithoutInclusion]
    );
    assert_eq!(completions.load(Ordering::SeqCst), 2);
}
