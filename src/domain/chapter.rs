//! Chapter entity - a graph of steps walked one step at a time.
//!
//! While `Activating`, a chapter runs its current step until one of the
//! step's transitions completes, deactivates the step and enters the
//! transition's target. A transition without target ends the chapter, which
//! then resolves to `Active`.

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::foundation::{
    DomainError, EntityKind, EntityLabel, ErrorCode, Position, Stage, StepId,
};
use crate::domain::lifecycle::{cascade, Entity, LifeCycle, Progress, StageProcess};
use crate::domain::mode::RuntimeConfiguration;
use crate::domain::step::Step;
use crate::domain::transition::Transition;

/// Editor annotations of a chapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChapterMetadata {
    pub last_selected_step: Option<StepId>,
    pub entry_node_position: Position,
}

#[derive(Debug, Default)]
pub struct ChapterData {
    pub name: String,
    pub steps: Vec<Step>,
    /// Entry step; the first added step unless set explicitly.
    pub first_step: Option<StepId>,
}

#[derive(Debug, Default)]
struct ChapterRuntime {
    current: Option<StepId>,
    /// Set while the current step deactivates; holds the step to enter next.
    pending: Option<Option<StepId>>,
}

#[derive(Debug)]
pub struct Chapter {
    life_cycle: LifeCycle,
    data: ChapterData,
    metadata: ChapterMetadata,
    runtime: ChapterRuntime,
}

impl Chapter {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            life_cycle: LifeCycle::new(EntityLabel::new(EntityKind::Chapter, name.clone())),
            data: ChapterData {
                name,
                ..ChapterData::default()
            },
            metadata: ChapterMetadata::default(),
            runtime: ChapterRuntime::default(),
        }
    }

    pub fn with_step(mut self, step: Step) -> Self {
        self.add_step(step);
        self
    }

    pub fn with_metadata(mut self, metadata: ChapterMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Appends a step. The first step added becomes the entry step.
    pub fn add_step(&mut self, step: Step) {
        if self.data.first_step.is_none() {
            self.data.first_step = Some(step.id());
        }
        self.data.steps.push(step);
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.life_cycle.rename(name.clone());
        self.data.name = name;
    }

    pub fn steps(&self) -> &[Step] {
        &self.data.steps
    }

    pub fn steps_mut(&mut self) -> &mut [Step] {
        &mut self.data.steps
    }

    pub fn step(&self, id: StepId) -> Option<&Step> {
        self.data.steps.iter().find(|step| step.id() == id)
    }

    pub fn step_mut(&mut self, id: StepId) -> Option<&mut Step> {
        find_step(&mut self.data.steps, id)
    }

    pub fn first_step(&self) -> Option<StepId> {
        self.data.first_step
    }

    /// Sets the entry step. The step must belong to this chapter.
    pub fn set_first_step(&mut self, id: Option<StepId>) -> Result<(), DomainError> {
        if let Some(id) = id {
            if self.step(id).is_none() {
                return Err(DomainError::new(
                    ErrorCode::StepNotFound,
                    format!("Step {} is not part of chapter '{}'", id, self.data.name),
                )
                .with_detail("step_id", id.to_string()));
            }
        }
        self.data.first_step = id;
        Ok(())
    }

    pub fn metadata(&self) -> &ChapterMetadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut ChapterMetadata {
        &mut self.metadata
    }

    /// The step the chapter is currently running, if any.
    pub fn current_step(&self) -> Option<&Step> {
        self.runtime.current.and_then(|id| self.step(id))
    }

    pub fn current_step_mut(&mut self) -> Option<&mut Step> {
        let id = self.runtime.current?;
        self.step_mut(id)
    }
}

fn find_step(steps: &mut [Step], id: StepId) -> Option<&mut Step> {
    steps.iter_mut().find(|step| step.id() == id)
}

impl Entity for Chapter {
    type Process<'a> = ChapterProcess<'a>;

    fn life_cycle(&self) -> &LifeCycle {
        &self.life_cycle
    }

    fn life_cycle_mut(&mut self) -> &mut LifeCycle {
        &mut self.life_cycle
    }

    fn split(&mut self) -> (&mut LifeCycle, ChapterProcess<'_>) {
        (
            &mut self.life_cycle,
            ChapterProcess {
                data: &mut self.data,
                runtime: &mut self.runtime,
            },
        )
    }

    fn configure(&mut self, runtime: &RuntimeConfiguration) {
        for step in &mut self.data.steps {
            step.configure(runtime);
        }
    }
}

/// Stage work of a [`Chapter`].
pub struct ChapterProcess<'a> {
    data: &'a mut ChapterData,
    runtime: &'a mut ChapterRuntime,
}

impl ChapterProcess<'_> {
    /// Makes `id` the current step and activates it. Returns false when
    /// there is no step to run.
    fn enter_step(&mut self, id: Option<StepId>) -> bool {
        self.runtime.current = id;
        let Some(id) = id else {
            return false;
        };
        match find_step(&mut self.data.steps, id) {
            Some(step) => {
                debug!(chapter = %self.data.name, step = %step.name(), "Entering step");
                cascade::activate_if_inactive(step);
                true
            }
            None => {
                warn!(chapter = %self.data.name, step_id = %id, "Transition targets unknown step");
                self.runtime.current = None;
                false
            }
        }
    }

    /// Moves past the current step once it has completed and wound down.
    fn advance(&mut self) -> Progress {
        let Some(id) = self.runtime.current else {
            return Progress::Done;
        };
        let Some(step) = find_step(&mut self.data.steps, id) else {
            self.runtime.current = None;
            return Progress::Done;
        };

        if self.runtime.pending.is_none() {
            if step.stage() != Stage::Active {
                return Progress::Pending;
            }
            let Some(transition) = step.completed_transition() else {
                return Progress::Pending;
            };
            self.runtime.pending = Some(transition.target());
            debug!(chapter = %self.data.name, step = %step.name(), "Step completed");
            cascade::deactivate_if_running(step);
        }

        if step.stage() != Stage::Inactive {
            return Progress::Pending;
        }

        let next = self.runtime.pending.take().flatten();
        Progress::done_if(!self.enter_step(next))
    }
}

impl StageProcess for ChapterProcess<'_> {
    fn start(&mut self, stage: Stage) {
        match stage {
            Stage::Activating => {
                self.runtime.pending = None;
                let first = self.data.first_step;
                self.enter_step(first);
            }
            Stage::Deactivating => {
                if let Some(step) = self
                    .runtime
                    .current
                    .and_then(|id| find_step(&mut self.data.steps, id))
                {
                    cascade::deactivate_if_running(step);
                }
            }
            Stage::Inactive | Stage::Active => {}
        }
    }

    fn update(&mut self, stage: Stage, delta: Duration) -> Progress {
        if let Some(step) = self
            .runtime
            .current
            .and_then(|id| find_step(&mut self.data.steps, id))
        {
            step.update(delta);
        }

        match stage {
            Stage::Activating => self.advance(),
            Stage::Deactivating => Progress::done_if(
                self.runtime
                    .current
                    .and_then(|id| find_step(&mut self.data.steps, id))
                    .map_or(true, |step| step.stage() == Stage::Inactive),
            ),
            Stage::Active | Stage::Inactive => Progress::Done,
        }
    }

    fn end(&mut self, stage: Stage) {
        if stage == Stage::Deactivating {
            self.runtime.current = None;
            self.runtime.pending = None;
        }
    }

    fn fast_forward(&mut self, stage: Stage) {
        match stage {
            Stage::Activating => self.fast_forward_steps(),
            Stage::Deactivating => {
                if let Some(step) = self
                    .runtime
                    .current
                    .and_then(|id| find_step(&mut self.data.steps, id))
                {
                    cascade::force_inactive(step);
                }
            }
            Stage::Inactive | Stage::Active => {}
        }
    }
}

impl ChapterProcess<'_> {
    /// Runs the remaining steps to completion, following the first
    /// transition of each.
    fn fast_forward_steps(&mut self) {
        let mut visited = HashSet::new();

        while let Some(id) = self.runtime.current {
            let Some(step) = find_step(&mut self.data.steps, id) else {
                warn!(chapter = %self.data.name, step_id = %id, "Transition targets unknown step");
                self.runtime.current = None;
                break;
            };

            if self.runtime.pending.is_none() {
                if !visited.insert(id) {
                    warn!(
                        chapter = %self.data.name,
                        step = %step.name(),
                        "Step graph loops back; stopping fast-forward"
                    );
                    cascade::force_inactive(step);
                    self.runtime.current = None;
                    break;
                }
                step.mark_to_fast_forward();
                cascade::activate_if_inactive(step);
                self.runtime.pending = Some(step.completed_transition().and_then(Transition::target));
            }

            cascade::force_inactive(step);
            self.runtime.current = self.runtime.pending.take().flatten();
        }
    }
}
