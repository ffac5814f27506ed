//! Transition entity - a guarded edge to the next step.
//!
//! A transition owns an ordered list of conditions and fires once all of
//! them are completed. An empty transition is completed as soon as it is
//! active.

use std::time::Duration;

use crate::domain::condition::Condition;
use crate::domain::foundation::{EntityKind, EntityLabel, Stage, StepId};
use crate::domain::lifecycle::{cascade, Entity, LifeCycle, Progress, StageProcess};
use crate::domain::mode::RuntimeConfiguration;

#[derive(Debug)]
pub struct Transition {
    life_cycle: LifeCycle,
    conditions: Vec<Condition>,
    /// Step entered when this transition fires; `None` ends the chapter.
    target: Option<StepId>,
}

impl Transition {
    /// Creates a transition that ends the chapter.
    pub fn new() -> Self {
        Self {
            life_cycle: LifeCycle::new(EntityLabel::new(EntityKind::Transition, "Transition")),
            conditions: Vec::new(),
            target: None,
        }
    }

    pub fn to(target: StepId) -> Self {
        Self::new().with_target(Some(target))
    }

    pub fn with_target(mut self, target: Option<StepId>) -> Self {
        self.target = target;
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn target(&self) -> Option<StepId> {
        self.target
    }

    pub fn set_target(&mut self, target: Option<StepId>) {
        self.target = target;
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn conditions_mut(&mut self) -> &mut [Condition] {
        &mut self.conditions
    }

    pub fn add_condition(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    /// Returns true if the transition is active and every condition is
    /// completed.
    pub fn is_completed(&self) -> bool {
        self.stage() == Stage::Active && self.conditions.iter().all(Condition::is_completed)
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Transition {
    type Process<'a> = TransitionProcess<'a>;

    fn life_cycle(&self) -> &LifeCycle {
        &self.life_cycle
    }

    fn life_cycle_mut(&mut self) -> &mut LifeCycle {
        &mut self.life_cycle
    }

    fn split(&mut self) -> (&mut LifeCycle, TransitionProcess<'_>) {
        (
            &mut self.life_cycle,
            TransitionProcess {
                conditions: &mut self.conditions,
            },
        )
    }

    fn configure(&mut self, runtime: &RuntimeConfiguration) {
        for condition in &mut self.conditions {
            condition.configure(runtime);
        }
    }
}

/// Stage work of a [`Transition`].
pub struct TransitionProcess<'a> {
    conditions: &'a mut Vec<Condition>,
}

impl StageProcess for TransitionProcess<'_> {
    fn start(&mut self, stage: Stage) {
        match stage {
            Stage::Activating => self.conditions.iter_mut().for_each(cascade::activate_if_inactive),
            Stage::Deactivating => self.conditions.iter_mut().for_each(cascade::deactivate_if_running),
            Stage::Inactive | Stage::Active => {}
        }
    }

    fn update(&mut self, stage: Stage, delta: Duration) -> Progress {
        cascade::update_all(self.conditions.iter_mut(), delta);
        match stage {
            Stage::Activating => Progress::done_if(cascade::all_in(self.conditions.iter(), Stage::Active)),
            Stage::Deactivating => {
                Progress::done_if(cascade::all_in(self.conditions.iter(), Stage::Inactive))
            }
            // Conditions keep evaluating until the step moves on.
            Stage::Active | Stage::Inactive => Progress::Pending,
        }
    }

    fn fast_forward(&mut self, stage: Stage) {
        for condition in self.conditions.iter_mut() {
            match stage {
                Stage::Activating => cascade::force_active(condition),
                Stage::Active => cascade::fast_forward_if_in(condition, Stage::Active),
                Stage::Deactivating => cascade::force_inactive(condition),
                Stage::Inactive => {}
            }
        }
    }
}
