//! Reducer-level tests for the registration builder and the busy guard.

#![allow(clippy::unwrap_used)]

use boxoffice_checkout::mocks::{
    MockAccessGate, MockPaymentProcessor, MockTicketingBackend, RecordingNotifier,
};
use boxoffice_checkout::money::Money;
use boxoffice_checkout::state::{CheckoutState, NoticeLevel, PaymentPhase, Registration};
use boxoffice_checkout::types::{EventContext, EventId, RatePlan, RatePlanId};
use boxoffice_checkout::{CheckoutAction, CheckoutConfig, CheckoutEnvironment, CheckoutReducer};
use boxoffice_testing::reducer_test::assertions;
use boxoffice_testing::{test_clock, ReducerTest};
use std::sync::Arc;

type TestEnvironment = CheckoutEnvironment<
    MockAccessGate,
    MockTicketingBackend,
    MockPaymentProcessor,
    RecordingNotifier,
>;

type TestReducer =
    CheckoutReducer<MockAccessGate, MockTicketingBackend, MockPaymentProcessor, RecordingNotifier>;

fn test_env() -> TestEnvironment {
    CheckoutEnvironment::new(
        MockAccessGate::valid(),
        MockTicketingBackend::new(),
        MockPaymentProcessor::new(),
        RecordingNotifier::new(),
        Arc::new(test_clock()),
        CheckoutConfig::default(),
    )
}

fn paid_event() -> EventContext {
    EventContext {
        event_id: EventId::new(),
        country_id: "US".to_string(),
        currency: "usd".to_string(),
        name: "RustConf".to_string(),
        is_paid: true,
        rate_plans: vec![general_admission()],
    }
}

fn general_admission() -> RatePlan {
    RatePlan {
        id: RatePlanId::new(),
        label: "General Admission".to_string(),
        unit_price: Money::from_cents(5_000),
    }
}

fn initial_state() -> CheckoutState {
    CheckoutState::new(paid_event(), Some("Ada".to_string()))
}

#[test]
fn valid_attendee_count_initializes_prefilled_list() {
    ReducerTest::new(TestReducer::new())
        .with_env(test_env())
        .given_state(initial_state())
        .when_action(CheckoutAction::SetAttendeeCount {
            raw: "3".to_string(),
        })
        .then_state(|state| {
            let registrations = state.registrations.as_ref().unwrap();
            assert_eq!(registrations.len(), 3);
            // First entry prefilled with the signed-in user's name
            assert_eq!(registrations[0].name, "Ada");
            assert!(registrations[1].name.is_empty());
        })
        .then_effects(|effects| assertions::assert_no_effects(effects))
        .run();
}

#[test]
fn attendee_count_out_of_bounds_leaves_list_unset() {
    for raw in ["0", "11", "abc", ""] {
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(initial_state())
            .when_action(CheckoutAction::SetAttendeeCount {
                raw: raw.to_string(),
            })
            .then_state(|state| {
                assert!(state.registrations.is_none());
                let notice = state.notice.as_ref().unwrap();
                assert_eq!(notice.level, NoticeLevel::Error);
            })
            .run();
    }
}

#[test]
fn add_registration_respects_the_cap() {
    ReducerTest::new(TestReducer::new())
        .with_env(test_env())
        .given_state(initial_state())
        .when_action(CheckoutAction::SetAttendeeCount {
            raw: "10".to_string(),
        })
        .when_action(CheckoutAction::AddRegistration)
        .then_state(|state| {
            assert_eq!(state.registration_count(), 10);
        })
        .run();
}

#[test]
fn ticket_type_sets_charge_and_subtotal() {
    let rate = general_admission();
    ReducerTest::new(TestReducer::new())
        .with_env(test_env())
        .given_state(initial_state())
        .when_action(CheckoutAction::SetAttendeeCount {
            raw: "2".to_string(),
        })
        .when_action(CheckoutAction::SetTicketType { index: 0, rate })
        .then_state(|state| {
            let registrations = state.registrations.as_ref().unwrap();
            assert_eq!(registrations[0].charge, Money::from_cents(5_000));
            assert_eq!(registrations[1].charge, Money::ZERO);
            assert_eq!(state.subtotal, Money::from_cents(5_000));
            assert_eq!(state.grand_total, Money::from_cents(5_000));
        })
        .run();
}

#[test]
fn copy_first_to_all_overwrites_on_toggle_not_live() {
    let rate = general_admission();
    ReducerTest::new(TestReducer::new())
        .with_env(test_env())
        .given_state(initial_state())
        .when_action(CheckoutAction::SetAttendeeCount {
            raw: "3".to_string(),
        })
        .when_action(CheckoutAction::SetAge {
            index: 0,
            value: "36".to_string(),
        })
        .when_action(CheckoutAction::SetTicketType { index: 0, rate })
        .when_action(CheckoutAction::ToggleCopyFirstToAll)
        // Edits to registration 0 after the toggle must NOT propagate
        .when_action(CheckoutAction::SetName {
            index: 0,
            value: "Grace".to_string(),
        })
        .then_state(|state| {
            let registrations = state.registrations.as_ref().unwrap();
            assert_eq!(registrations[0].name, "Grace");
            // Copied at toggle time, before the rename
            assert_eq!(registrations[1].name, "Ada");
            assert_eq!(registrations[1].age, "36");
            assert!(registrations[1].ticket_type.is_some());
            assert_eq!(registrations[2].name, "Ada");
            // All three carry the copied charge
            assert_eq!(state.subtotal, Money::from_cents(15_000));
        })
        .run();
}

#[test]
fn add_registration_clones_first_when_copy_is_active() {
    let rate = general_admission();
    ReducerTest::new(TestReducer::new())
        .with_env(test_env())
        .given_state(initial_state())
        .when_action(CheckoutAction::SetAttendeeCount {
            raw: "1".to_string(),
        })
        .when_action(CheckoutAction::SetAge {
            index: 0,
            value: "36".to_string(),
        })
        .when_action(CheckoutAction::SetTicketType { index: 0, rate })
        .when_action(CheckoutAction::ToggleCopyFirstToAll)
        .when_action(CheckoutAction::AddRegistration)
        .then_state(|state| {
            let registrations = state.registrations.as_ref().unwrap();
            assert_eq!(registrations.len(), 2);
            assert_eq!(registrations[1].name, "Ada");
            assert_eq!(registrations[1].charge, Money::from_cents(5_000));
        })
        .run();
}

#[test]
fn pay_is_a_noop_while_an_attempt_is_in_flight() {
    let mut state = initial_state();
    state.registrations = Some(vec![Registration {
        name: "Ada".to_string(),
        age: "36".to_string(),
        ticket_type: Some(general_admission()),
        charge: Money::from_cents(5_000),
    }]);
    state.recompute_totals();
    state.attempt.in_flight = true;

    ReducerTest::new(TestReducer::new())
        .with_env(test_env())
        .given_state(state)
        .when_action(CheckoutAction::PayPressed)
        .then_state(|state| {
            // No new attempt was started
            assert!(state.attempt.client_secret.is_none());
            assert!(state.attempt.in_flight);
        })
        .then_effects(|effects| assertions::assert_no_effects(effects))
        .run();
}

#[test]
fn sheet_completion_without_secret_releases_the_busy_guard() {
    let mut state = initial_state();
    state.attempt.phase = PaymentPhase::SheetPresented;
    state.attempt.in_flight = true;

    ReducerTest::new(TestReducer::new())
        .with_env(test_env())
        .given_state(state)
        .when_action(CheckoutAction::SheetCompleted)
        .then_state(|state| {
            // The guard must not wedge the pay action permanently
            assert!(!state.attempt.in_flight);
        })
        .then_effects(|effects| assertions::assert_no_effects(effects))
        .run();
}

#[test]
fn order_mutations_are_rejected_while_frozen() {
    let mut state = initial_state();
    state.registrations = Some(vec![Registration::default(), Registration::default()]);
    state.attempt.in_flight = true;

    ReducerTest::new(TestReducer::new())
        .with_env(test_env())
        .given_state(state)
        .when_action(CheckoutAction::RemoveRegistration { index: 0 })
        .then_state(|state| {
            assert_eq!(state.registration_count(), 2);
            let notice = state.notice.as_ref().unwrap();
            assert_eq!(notice.level, NoticeLevel::Error);
        })
        .then_effects(|effects| assertions::assert_no_effects(effects))
        .run();
}

#[test]
fn incomplete_registrations_block_payment_with_all_flags() {
    let mut state = initial_state();
    state.registrations = Some(vec![
        Registration::default(),
        Registration {
            name: "Grace".to_string(),
            age: "41".to_string(),
            ticket_type: Some(general_admission()),
            charge: Money::from_cents(5_000),
        },
    ]);
    state.recompute_totals();

    ReducerTest::new(TestReducer::new())
        .with_env(test_env())
        .given_state(state)
        .when_action(CheckoutAction::PayPressed)
        .then_state(|state| {
            assert!(!state.attempt.in_flight);
            assert!(state.field_flags[0].name_missing);
            assert!(state.field_flags[0].age_missing);
            assert!(state.field_flags[0].ticket_missing);
            assert!(!state.field_flags[1].any());
        })
        .then_effects(|effects| assertions::assert_no_effects(effects))
        .run();
}
