//! Integration tests for the step lifecycle.
//!
//! These tests drive a single step through the public entity protocol:
//! 1. Activation waits for behaviors, then transitions and their conditions
//! 2. Deactivation winds transitions down before behaviors
//! 3. Fast-forwarding resolves stages without waiting for ticks
//!
//! Every scenario runs against the default runtime configuration.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use course_runtime::domain::behavior::Behavior;
use course_runtime::domain::condition::Condition;
use course_runtime::domain::foundation::{LifeCycleOperation, Stage};
use course_runtime::domain::lifecycle::Entity;
use course_runtime::domain::mode::RuntimeConfiguration;
use course_runtime::domain::step::Step;
use course_runtime::domain::transition::Transition;

const TICK: Duration = Duration::from_millis(100);

// =============================================================================
// Test Infrastructure
// =============================================================================

fn configured(mut step: Step) -> Step {
    step.configure(&RuntimeConfiguration::default());
    step
}

/// A step waiting on one endless condition, with an endless behavior.
fn gated_step() -> Step {
    configured(
        Step::new("Gated")
            .with_behavior(Behavior::endless("Idle").with_blocking(false))
            .with_transition(Transition::new().with_condition(Condition::endless("Gate"))),
    )
}

/// Ticks until the step reaches `stage`, returning the number of ticks.
fn run_until(step: &mut Step, stage: Stage) -> usize {
    for ticks in 0..1_000 {
        if step.stage() == stage {
            return ticks;
        }
        step.update(TICK);
    }
    panic!("step '{}' never reached {}", step.name(), stage);
}

fn record_stages(step: &mut Step) -> Rc<RefCell<Vec<Stage>>> {
    let stages = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&stages);
    step.on_stage_changed(move |event| sink.borrow_mut().push(event.stage));
    stages
}

fn assert_all_children_in(step: &Step, stage: Stage) {
    for behavior in step.behaviors() {
        assert_eq!(behavior.stage(), stage, "behavior '{}'", behavior.name());
    }
    for transition in step.transitions() {
        assert_eq!(transition.stage(), stage, "transition");
        for condition in transition.conditions() {
            assert_eq!(condition.stage(), stage, "condition '{}'", condition.name());
        }
    }
}

// =============================================================================
// Setup
// =============================================================================

#[test]
fn new_step_starts_inactive_with_children_inactive() {
    let step = gated_step();

    assert_eq!(step.stage(), Stage::Inactive);
    assert_all_children_in(&step, Stage::Inactive);
}

#[test]
fn deactivating_an_inactive_step_fails() {
    let mut step = gated_step();

    let err = step.deactivate().unwrap_err();

    assert_eq!(err.operation, LifeCycleOperation::Deactivate);
    assert_eq!(err.stage, Stage::Inactive);
    assert_eq!(step.stage(), Stage::Inactive);
}

#[test]
fn activating_twice_is_a_no_op() {
    let mut step = gated_step();
    step.activate().unwrap();

    step.activate().unwrap();

    assert_eq!(step.stage(), Stage::Activating);
}

// =============================================================================
// Events
// =============================================================================

#[test]
fn stage_changes_are_published_in_order() {
    let mut step = configured(Step::new("Empty"));
    let stages = record_stages(&mut step);

    step.activate().unwrap();
    run_until(&mut step, Stage::Active);
    step.deactivate().unwrap();
    run_until(&mut step, Stage::Inactive);

    assert_eq!(
        *stages.borrow(),
        vec![Stage::Activating, Stage::Active, Stage::Deactivating, Stage::Inactive]
    );
}

#[test]
fn unsubscribed_observer_hears_nothing() {
    let mut step = configured(Step::new("Empty"));
    let stages = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&stages);
    let id = step.on_stage_changed(move |event| sink.borrow_mut().push(event.stage));

    assert!(step.life_cycle_mut().unsubscribe(id));
    step.activate().unwrap();

    assert!(stages.borrow().is_empty());
}

// =============================================================================
// Activation
// =============================================================================

#[test]
fn endless_condition_holds_step_until_autocompleted() {
    let mut step = gated_step();
    step.activate().unwrap();
    run_until(&mut step, Stage::Active);

    for _ in 0..20 {
        step.update(TICK);
    }
    assert!(step.completed_transition().is_none());

    step.transitions_mut()[0].conditions_mut()[0].autocomplete();
    step.update(TICK);

    assert_eq!(step.stage(), Stage::Active);
    assert!(step.completed_transition().is_some());
}

#[test]
fn pre_completed_condition_is_reset_on_activation() {
    let mut step = gated_step();
    step.transitions_mut()[0].conditions_mut()[0].autocomplete();
    assert!(step.transitions()[0].conditions()[0].is_completed());

    step.activate().unwrap();
    run_until(&mut step, Stage::Active);

    assert!(!step.transitions()[0].conditions()[0].is_completed());
    assert!(step.completed_transition().is_none());
}

#[test]
fn conditions_activate_only_after_behaviors() {
    let mut step = configured(
        Step::new("Ordered")
            .with_behavior(Behavior::timeout("Intro", Duration::from_secs(1)))
            .with_transition(Transition::new().with_condition(Condition::endless("Gate"))),
    );

    step.activate().unwrap();

    assert_eq!(step.behaviors()[0].stage(), Stage::Activating);
    assert_eq!(step.transitions()[0].stage(), Stage::Inactive);
    assert_eq!(step.transitions()[0].conditions()[0].stage(), Stage::Inactive);

    step.update(TICK);

    assert_eq!(step.behaviors()[0].stage(), Stage::Activating);
    assert_eq!(step.transitions()[0].conditions()[0].stage(), Stage::Active);
    assert_eq!(step.stage(), Stage::Activating);
}

#[test]
fn timeout_behavior_holds_activation_for_its_duration() {
    let duration = Duration::from_secs(1);
    let mut step = configured(
        Step::new("Timed")
            .with_behavior(Behavior::timeout("Pause", duration))
            .with_transition(Transition::new()),
    );
    step.activate().unwrap();

    let ticks = run_until(&mut step, Stage::Active) as u32;
    let elapsed = TICK * ticks;

    assert!(elapsed >= duration, "activated early after {:?}", elapsed);
    assert!(elapsed <= duration + TICK, "activated late after {:?}", elapsed);
}

// =============================================================================
// Fast-forward
// =============================================================================

#[test]
fn marking_an_inactive_step_changes_nothing_until_activation() {
    let mut step = gated_step();

    step.mark_to_fast_forward();

    assert_eq!(step.stage(), Stage::Inactive);
    assert_all_children_in(&step, Stage::Inactive);
    assert!(step.life_cycle().is_marked_to_fast_forward(Stage::Activating));
}

#[test]
fn marked_inactive_step_resolves_on_activation() {
    let mut step = gated_step();
    step.mark_to_fast_forward();

    step.activate().unwrap();

    assert_eq!(step.stage(), Stage::Active);
    assert_all_children_in(&step, Stage::Active);
    assert!(step.completed_transition().is_some());
}

#[test]
fn marking_an_active_step_completes_its_transitions() {
    let mut step = gated_step();
    step.activate().unwrap();
    run_until(&mut step, Stage::Active);
    assert!(step.completed_transition().is_none());

    step.mark_to_fast_forward();

    assert_eq!(step.stage(), Stage::Active);
    assert!(step.transitions()[0].conditions()[0].is_completed());
    assert!(step.completed_transition().is_some());
}

#[test]
fn marked_step_deactivates_without_ticks() {
    let mut step = gated_step();
    step.mark_to_fast_forward();
    step.activate().unwrap();

    step.deactivate().unwrap();

    assert_eq!(step.stage(), Stage::Inactive);
    assert_all_children_in(&step, Stage::Inactive);
}

// =============================================================================
// Deactivation
// =============================================================================

#[test]
fn deactivating_mid_activation_winds_everything_down() {
    let mut step = configured(
        Step::new("Interrupted")
            .with_behavior(Behavior::timeout("Long intro", Duration::from_secs(10)))
            .with_transition(Transition::new().with_condition(Condition::endless("Gate"))),
    );
    step.activate().unwrap();
    step.update(TICK);
    step.update(TICK);
    assert_eq!(step.stage(), Stage::Activating);

    step.deactivate().unwrap();
    assert_eq!(step.stage(), Stage::Deactivating);
    run_until(&mut step, Stage::Inactive);

    assert_all_children_in(&step, Stage::Inactive);
}

#[test]
fn full_round_trip_leaves_nothing_running_or_completed() {
    let mut step = gated_step();
    step.activate().unwrap();
    run_until(&mut step, Stage::Active);
    step.transitions_mut()[0].conditions_mut()[0].autocomplete();
    step.update(TICK);

    step.deactivate().unwrap();
    run_until(&mut step, Stage::Inactive);

    assert_all_children_in(&step, Stage::Inactive);
    assert!(!step.transitions()[0].conditions()[0].is_completed());
}

#[test]
fn step_can_run_again_after_round_trip() {
    let mut step = gated_step();
    step.activate().unwrap();
    run_until(&mut step, Stage::Active);
    step.deactivate().unwrap();
    run_until(&mut step, Stage::Inactive);

    step.activate().unwrap();
    run_until(&mut step, Stage::Active);

    // The endless behavior never blocks, so it may still be activating.
    assert_eq!(step.behaviors()[0].stage(), Stage::Activating);
    assert_eq!(step.transitions()[0].stage(), Stage::Active);
    assert_eq!(step.transitions()[0].conditions()[0].stage(), Stage::Active);
}
