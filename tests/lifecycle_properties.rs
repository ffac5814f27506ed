//! Property tests for the lifecycle protocol.
//!
//! Random sequences of protocol calls are applied to a step with mixed
//! children; after every call the step tree must still be consistent.

use std::time::Duration;

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use course_runtime::domain::behavior::Behavior;
use course_runtime::domain::condition::Condition;
use course_runtime::domain::foundation::Stage;
use course_runtime::domain::lifecycle::Entity;
use course_runtime::domain::mode::RuntimeConfiguration;
use course_runtime::domain::step::Step;
use course_runtime::domain::transition::Transition;

const TICK: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy)]
enum Op {
    Activate,
    Deactivate,
    Tick,
    FastForward,
    FastForwardStage(Stage),
    /// Completes the first running condition, as a user interaction would.
    Complete,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => Just(Op::Activate),
        2 => Just(Op::Deactivate),
        6 => Just(Op::Tick),
        1 => Just(Op::FastForward),
        1 => prop::sample::select(Stage::ALL.to_vec()).prop_map(Op::FastForwardStage),
        2 => Just(Op::Complete),
    ]
}

fn mixed_step() -> Step {
    let mut step = Step::new("Mixed")
        .with_behavior(Behavior::timeout("Intro", Duration::from_millis(300)))
        .with_behavior(Behavior::endless("Ambience").with_blocking(false))
        .with_transition(Transition::new().with_condition(Condition::endless("Gate")))
        .with_transition(
            Transition::new()
                .with_condition(Condition::timeout("Wait", Duration::from_millis(200)))
                .with_condition(Condition::endless("Confirm")),
        );
    step.configure(&RuntimeConfiguration::default());
    step
}

fn complete_first_running_condition(step: &mut Step) {
    let running = step
        .transitions_mut()
        .iter_mut()
        .flat_map(|transition| transition.conditions_mut().iter_mut())
        .find(|condition| condition.stage() == Stage::Active && !condition.is_completed());
    if let Some(condition) = running {
        condition.autocomplete();
    }
}

/// Applies `op`, checking the protocol's accept/reject contract.
fn apply(step: &mut Step, op: Op) -> Result<(), TestCaseError> {
    let before = step.stage();
    match op {
        Op::Activate => {
            let result = step.activate();
            prop_assert_eq!(result.is_err(), before == Stage::Deactivating);
            if result.is_err() {
                prop_assert_eq!(step.stage(), before);
            }
        }
        Op::Deactivate => {
            let result = step.deactivate();
            prop_assert_eq!(result.is_err(), before == Stage::Inactive);
            if result.is_err() {
                prop_assert_eq!(step.stage(), before);
            }
        }
        Op::Tick => step.update(TICK),
        Op::FastForward => step.mark_to_fast_forward(),
        Op::FastForwardStage(stage) => step.mark_to_fast_forward_stage(stage),
        Op::Complete => complete_first_running_condition(step),
    }
    Ok(())
}

fn check_consistent(step: &Step) -> Result<(), TestCaseError> {
    match step.stage() {
        Stage::Inactive => {
            for behavior in step.behaviors() {
                prop_assert_eq!(behavior.stage(), Stage::Inactive);
            }
            for transition in step.transitions() {
                prop_assert_eq!(transition.stage(), Stage::Inactive);
            }
        }
        Stage::Active => {
            for transition in step.transitions() {
                prop_assert_eq!(transition.stage(), Stage::Active);
            }
            for behavior in step.behaviors().iter().filter(|b| b.is_blocking()) {
                prop_assert_eq!(behavior.stage(), Stage::Active);
            }
        }
        Stage::Activating | Stage::Deactivating => {}
    }

    for transition in step.transitions() {
        for condition in transition.conditions() {
            if transition.stage() == Stage::Inactive {
                prop_assert_eq!(condition.stage(), Stage::Inactive);
            }
            if condition.stage() == Stage::Inactive {
                prop_assert!(!condition.is_completed(), "inactive condition still completed");
            }
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, ..ProptestConfig::default() })]

    #[test]
    fn random_protocol_calls_keep_the_tree_consistent(ops in prop::collection::vec(op(), 0..60)) {
        let mut step = mixed_step();
        for op in ops {
            apply(&mut step, op)?;
            check_consistent(&step)?;
        }
    }

    #[test]
    fn any_reachable_state_winds_down_to_inactive(ops in prop::collection::vec(op(), 0..60)) {
        let mut step = mixed_step();
        for op in ops {
            apply(&mut step, op)?;
        }

        if step.stage() != Stage::Inactive {
            step.deactivate().map_err(|err| TestCaseError::fail(err.to_string()))?;
        }
        for _ in 0..50 {
            if step.stage() == Stage::Inactive {
                break;
            }
            step.update(TICK);
        }

        prop_assert_eq!(step.stage(), Stage::Inactive);
        check_consistent(&step)?;
    }

    #[test]
    fn deactivating_inactive_is_always_rejected(ticks in 0usize..20) {
        let mut step = mixed_step();
        for _ in 0..ticks {
            step.update(TICK);
        }

        prop_assert!(step.deactivate().is_err());
        prop_assert_eq!(step.stage(), Stage::Inactive);
    }
}
