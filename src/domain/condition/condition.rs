//! Condition entity - a predicate guarding a transition.
//!
//! A condition only evaluates while `Active`. Completion is not sticky:
//! entering `Activating` and finishing deactivation both clear it.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::foundation::{EntityKind, EntityLabel, ScenePropertyReference, Stage};
use crate::domain::lifecycle::{Entity, LifeCycle, Progress, StageProcess};
use crate::domain::mode::RuntimeConfiguration;
use crate::ports::SceneObject;

use super::ConditionKind;

/// Serializable payload of a condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionData {
    pub name: String,
    pub kind: ConditionKind,
    #[serde(default)]
    pub is_completed: bool,
}

#[derive(Default)]
struct ConditionRuntime {
    elapsed: Duration,
    scene_object: Option<Arc<dyn SceneObject>>,
}

impl fmt::Debug for ConditionRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionRuntime")
            .field("elapsed", &self.elapsed)
            .field("resolved", &self.scene_object.is_some())
            .finish()
    }
}

#[derive(Debug)]
pub struct Condition {
    life_cycle: LifeCycle,
    data: ConditionData,
    runtime: ConditionRuntime,
}

impl Condition {
    pub fn new(name: impl Into<String>, kind: ConditionKind) -> Self {
        Self::from_data(ConditionData {
            name: name.into(),
            kind,
            is_completed: false,
        })
    }

    pub fn from_data(data: ConditionData) -> Self {
        Self {
            life_cycle: LifeCycle::new(EntityLabel::new(EntityKind::Condition, data.name.clone())),
            data,
            runtime: ConditionRuntime::default(),
        }
    }

    pub fn endless(name: impl Into<String>) -> Self {
        Self::new(name, ConditionKind::Endless)
    }

    pub fn timeout(name: impl Into<String>, duration: Duration) -> Self {
        Self::new(name, ConditionKind::Timeout { duration })
    }

    pub fn property_triggered(name: impl Into<String>, target: ScenePropertyReference) -> Self {
        Self::new(name, ConditionKind::PropertyTriggered { target })
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn data(&self) -> &ConditionData {
        &self.data
    }

    pub fn is_completed(&self) -> bool {
        self.data.is_completed
    }

    /// Marks the condition completed, whatever its predicate says.
    pub fn autocomplete(&mut self) {
        self.data.is_completed = true;
    }
}

impl Entity for Condition {
    type Process<'a> = ConditionProcess<'a>;

    fn life_cycle(&self) -> &LifeCycle {
        &self.life_cycle
    }

    fn life_cycle_mut(&mut self) -> &mut LifeCycle {
        &mut self.life_cycle
    }

    fn split(&mut self) -> (&mut LifeCycle, ConditionProcess<'_>) {
        (
            &mut self.life_cycle,
            ConditionProcess {
                data: &mut self.data,
                runtime: &mut self.runtime,
            },
        )
    }

    fn configure(&mut self, runtime: &RuntimeConfiguration) {
        let skipped = runtime.current_mode().skips_condition(self.data.kind.tag());
        self.life_cycle.set_skipped(skipped);

        self.runtime.scene_object = match &self.data.kind {
            ConditionKind::PropertyTriggered { target } => runtime
                .scene()
                .resolve(&target.object)
                .filter(|object| has_property(object.as_ref(), target)),
            ConditionKind::Endless | ConditionKind::Timeout { .. } => None,
        };
    }
}

fn has_property(object: &dyn SceneObject, target: &ScenePropertyReference) -> bool {
    let present = object.has_property(target.property);
    if !present {
        warn!(property = %target, "Scene object lacks referenced property");
    }
    present
}

/// Stage work of a [`Condition`].
pub struct ConditionProcess<'a> {
    data: &'a mut ConditionData,
    runtime: &'a mut ConditionRuntime,
}

impl ConditionProcess<'_> {
    fn evaluate(&mut self, delta: Duration) -> bool {
        match &self.data.kind {
            ConditionKind::Endless => false,
            ConditionKind::Timeout { duration } => {
                self.runtime.elapsed += delta;
                self.runtime.elapsed >= *duration
            }
            ConditionKind::PropertyTriggered { target } => self
                .runtime
                .scene_object
                .as_ref()
                .is_some_and(|object| object.is_triggered(target.property)),
        }
    }
}

impl StageProcess for ConditionProcess<'_> {
    fn start(&mut self, stage: Stage) {
        if stage == Stage::Activating {
            self.data.is_completed = false;
            self.runtime.elapsed = Duration::ZERO;
        }
    }

    fn update(&mut self, stage: Stage, delta: Duration) -> Progress {
        if stage != Stage::Active {
            return Progress::Done;
        }
        if !self.data.is_completed && self.evaluate(delta) {
            self.data.is_completed = true;
        }
        Progress::done_if(self.data.is_completed)
    }

    fn end(&mut self, stage: Stage) {
        if stage == Stage::Deactivating {
            self.data.is_completed = false;
        }
    }

    fn fast_forward(&mut self, stage: Stage) {
        if stage == Stage::Active {
            self.data.is_completed = true;
        }
    }
}
