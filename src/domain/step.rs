//! Step entity - behaviors plus the transitions leading out of the step.
//!
//! Activation order inside a step:
//!
//! 1. `activate()` starts every behavior.
//! 2. Once every behavior is at or past `Activating`, transitions (and with
//!    them their conditions) are activated.
//! 3. The step is `Active` when blocking behaviors are `Active`,
//!    non-blocking ones are at least `Activating` and every transition is
//!    `Active`.
//!
//! Deactivation runs the other way round: transitions first, behaviors once
//! every transition is `Inactive`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::behavior::Behavior;
use crate::domain::foundation::{EntityKind, EntityLabel, Position, Stage, StepId};
use crate::domain::lifecycle::{cascade, Entity, LifeCycle, Progress, StageProcess};
use crate::domain::mode::RuntimeConfiguration;
use crate::domain::transition::Transition;

/// Editor annotations of a step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StepMetadata {
    pub position: Position,
}

/// Children of a step.
#[derive(Debug, Default)]
pub struct StepData {
    pub name: String,
    pub behaviors: Vec<Behavior>,
    pub transitions: Vec<Transition>,
}

#[derive(Debug)]
pub struct Step {
    id: StepId,
    life_cycle: LifeCycle,
    data: StepData,
    metadata: StepMetadata,
}

impl Step {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(StepId::new(), name)
    }

    pub fn with_id(id: StepId, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            life_cycle: LifeCycle::new(EntityLabel::new(EntityKind::Step, name.clone())),
            data: StepData {
                name,
                ..StepData::default()
            },
            metadata: StepMetadata::default(),
        }
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.data.behaviors.push(behavior);
        self
    }

    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.data.transitions.push(transition);
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.metadata.position = position;
        self
    }

    pub fn id(&self) -> StepId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.life_cycle.rename(name.clone());
        self.data.name = name;
    }

    pub fn behaviors(&self) -> &[Behavior] {
        &self.data.behaviors
    }

    pub fn behaviors_mut(&mut self) -> &mut [Behavior] {
        &mut self.data.behaviors
    }

    pub fn add_behavior(&mut self, behavior: Behavior) {
        self.data.behaviors.push(behavior);
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.data.transitions
    }

    pub fn transitions_mut(&mut self) -> &mut [Transition] {
        &mut self.data.transitions
    }

    pub fn add_transition(&mut self, transition: Transition) {
        self.data.transitions.push(transition);
    }

    pub fn metadata(&self) -> &StepMetadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut StepMetadata {
        &mut self.metadata
    }

    /// First completed transition in insertion order.
    pub fn completed_transition(&self) -> Option<&Transition> {
        self.data.transitions.iter().find(|t| t.is_completed())
    }
}

impl Entity for Step {
    type Process<'a> = &'a mut StepData;

    fn life_cycle(&self) -> &LifeCycle {
        &self.life_cycle
    }

    fn life_cycle_mut(&mut self) -> &mut LifeCycle {
        &mut self.life_cycle
    }

    fn split(&mut self) -> (&mut LifeCycle, &mut StepData) {
        (&mut self.life_cycle, &mut self.data)
    }

    fn configure(&mut self, runtime: &RuntimeConfiguration) {
        for behavior in &mut self.data.behaviors {
            behavior.configure(runtime);
        }
        for transition in &mut self.data.transitions {
            transition.configure(runtime);
        }
    }
}

impl StepData {
    /// Conditions may start once no behavior is still waiting to begin.
    fn behaviors_started(&self) -> bool {
        self.behaviors
            .iter()
            .all(|behavior| behavior.stage().is_at_least_activating())
    }

    fn activation_finished(&self) -> bool {
        self.behaviors.iter().all(Behavior::allows_step_activation)
            && cascade::all_in(self.transitions.iter(), Stage::Active)
    }

    fn everything_inactive(&self) -> bool {
        cascade::all_in(self.behaviors.iter(), Stage::Inactive)
            && cascade::all_in(self.transitions.iter(), Stage::Inactive)
    }
}

impl StageProcess for StepData {
    fn start(&mut self, stage: Stage) {
        match stage {
            Stage::Activating => self.behaviors.iter_mut().for_each(cascade::activate_if_inactive),
            Stage::Deactivating => self
                .transitions
                .iter_mut()
                .for_each(cascade::deactivate_if_running),
            Stage::Inactive | Stage::Active => {}
        }
    }

    fn update(&mut self, stage: Stage, delta: Duration) -> Progress {
        match stage {
            Stage::Activating => {
                cascade::update_all(self.behaviors.iter_mut(), delta);
                if self.behaviors_started() {
                    self.transitions
                        .iter_mut()
                        .for_each(cascade::activate_if_inactive);
                }
                cascade::update_all(self.transitions.iter_mut(), delta);
                Progress::done_if(self.activation_finished())
            }
            Stage::Active => {
                cascade::update_all(self.behaviors.iter_mut(), delta);
                cascade::update_all(self.transitions.iter_mut(), delta);
                Progress::Pending
            }
            Stage::Deactivating => {
                cascade::update_all(self.transitions.iter_mut(), delta);
                if cascade::all_in(self.transitions.iter(), Stage::Inactive) {
                    self.behaviors
                        .iter_mut()
                        .for_each(cascade::deactivate_if_running);
                }
                cascade::update_all(self.behaviors.iter_mut(), delta);
                Progress::done_if(self.everything_inactive())
            }
            Stage::Inactive => Progress::Done,
        }
    }

    fn fast_forward(&mut self, stage: Stage) {
        match stage {
            Stage::Activating => {
                self.behaviors.iter_mut().for_each(cascade::force_active);
                self.transitions.iter_mut().for_each(cascade::force_active);
            }
            Stage::Active => {
                for behavior in self.behaviors.iter_mut() {
                    cascade::force_active(behavior);
                    cascade::fast_forward_if_in(behavior, Stage::Active);
                }
                for transition in self.transitions.iter_mut() {
                    cascade::force_active(transition);
                    cascade::fast_forward_if_in(transition, Stage::Active);
                }
            }
            Stage::Deactivating => {
                self.transitions.iter_mut().for_each(cascade::force_inactive);
                self.behaviors.iter_mut().for_each(cascade::force_inactive);
            }
            Stage::Inactive => {}
        }
    }
}
