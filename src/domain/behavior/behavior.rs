//! Behavior entity - an action the system performs within a step.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::foundation::{EntityKind, EntityLabel, SceneObjectReference, Stage};
use crate::domain::lifecycle::{Entity, LifeCycle, Progress, StageProcess};
use crate::domain::mode::RuntimeConfiguration;
use crate::ports::SceneObject;

use super::{BehaviorKind, ExecutionStages};

/// Serializable payload of a behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorData {
    pub name: String,
    pub kind: BehaviorKind,
    #[serde(default)]
    pub execution: ExecutionStages,
    /// A blocking behavior must be `Active` before its step is.
    #[serde(default = "default_blocking")]
    pub is_blocking: bool,
}

fn default_blocking() -> bool {
    true
}

#[derive(Default)]
struct BehaviorRuntime {
    elapsed: Duration,
    executed: bool,
    scene_object: Option<Arc<dyn SceneObject>>,
}

impl fmt::Debug for BehaviorRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorRuntime")
            .field("elapsed", &self.elapsed)
            .field("executed", &self.executed)
            .field(
                "scene_object",
                &self.scene_object.as_ref().map(|o| o.unique_name().to_string()),
            )
            .finish()
    }
}

/// An action performed while its step activates or deactivates.
#[derive(Debug)]
pub struct Behavior {
    life_cycle: LifeCycle,
    data: BehaviorData,
    runtime: BehaviorRuntime,
}

impl Behavior {
    pub fn new(name: impl Into<String>, kind: BehaviorKind) -> Self {
        Self::from_data(BehaviorData {
            name: name.into(),
            kind,
            execution: ExecutionStages::default(),
            is_blocking: true,
        })
    }

    pub fn from_data(data: BehaviorData) -> Self {
        Self {
            life_cycle: LifeCycle::new(EntityLabel::new(EntityKind::Behavior, data.name.clone())),
            data,
            runtime: BehaviorRuntime::default(),
        }
    }

    pub fn endless(name: impl Into<String>) -> Self {
        Self::new(name, BehaviorKind::Endless)
    }

    pub fn timeout(name: impl Into<String>, duration: Duration) -> Self {
        Self::new(name, BehaviorKind::Timeout { duration })
    }

    pub fn set_enabled(
        name: impl Into<String>,
        target: SceneObjectReference,
        enabled: bool,
    ) -> Self {
        Self::new(name, BehaviorKind::SetEnabled { target, enabled })
    }

    pub fn with_execution(mut self, execution: ExecutionStages) -> Self {
        self.data.execution = execution;
        self
    }

    pub fn with_blocking(mut self, is_blocking: bool) -> Self {
        self.data.is_blocking = is_blocking;
        self
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn data(&self) -> &BehaviorData {
        &self.data
    }

    pub fn is_blocking(&self) -> bool {
        self.data.is_blocking
    }

    /// Returns true if the behavior no longer holds its step's activation
    /// back.
    pub(crate) fn allows_step_activation(&self) -> bool {
        match self.stage() {
            Stage::Active => true,
            Stage::Activating => !self.data.is_blocking,
            Stage::Inactive | Stage::Deactivating => false,
        }
    }
}

impl Entity for Behavior {
    type Process<'a> = BehaviorProcess<'a>;

    fn life_cycle(&self) -> &LifeCycle {
        &self.life_cycle
    }

    fn life_cycle_mut(&mut self) -> &mut LifeCycle {
        &mut self.life_cycle
    }

    fn split(&mut self) -> (&mut LifeCycle, BehaviorProcess<'_>) {
        (
            &mut self.life_cycle,
            BehaviorProcess {
                data: &self.data,
                runtime: &mut self.runtime,
            },
        )
    }

    fn configure(&mut self, runtime: &RuntimeConfiguration) {
        let skipped = runtime.current_mode().skips_behavior(self.data.kind.tag());
        self.life_cycle.set_skipped(skipped);

        self.runtime.scene_object = match &self.data.kind {
            BehaviorKind::SetEnabled { target, .. } => runtime.scene().resolve(target),
            BehaviorKind::Endless | BehaviorKind::Timeout { .. } => None,
        };
    }
}

/// Stage work of a [`Behavior`].
pub struct BehaviorProcess<'a> {
    data: &'a BehaviorData,
    runtime: &'a mut BehaviorRuntime,
}

impl BehaviorProcess<'_> {
    fn execute(&mut self) {
        if self.runtime.executed {
            return;
        }
        self.runtime.executed = true;

        if let BehaviorKind::SetEnabled { target, enabled } = &self.data.kind {
            match &self.runtime.scene_object {
                Some(object) => object.set_enabled(*enabled),
                None => debug!(behavior = %self.data.name, target = %target, "No scene object to toggle"),
            }
        }
    }
}

impl StageProcess for BehaviorProcess<'_> {
    fn start(&mut self, _stage: Stage) {
        self.runtime.elapsed = Duration::ZERO;
        self.runtime.executed = false;
    }

    fn update(&mut self, stage: Stage, delta: Duration) -> Progress {
        if let BehaviorKind::Endless = self.data.kind {
            return Progress::done_if(stage != Stage::Activating);
        }
        if !self.data.execution.includes(stage) {
            return Progress::Done;
        }

        match self.data.kind {
            BehaviorKind::Timeout { duration } => {
                self.runtime.elapsed += delta;
                Progress::done_if(self.runtime.elapsed >= duration)
            }
            _ => {
                self.execute();
                Progress::Done
            }
        }
    }

    fn fast_forward(&mut self, stage: Stage) {
        if self.data.execution.includes(stage) {
            self.execute();
        }
    }
}
