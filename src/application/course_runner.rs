//! CourseRunner - drives a course tick by tick.
//!
//! The runner is the external driver of the entity tree: it configures the
//! course once, activates it, forwards every tick to the root and keeps the
//! restrictive environment aligned with whichever step is running.

use std::time::Duration;

use tracing::{info, warn};

use crate::domain::course::Course;
use crate::domain::foundation::{DomainError, ErrorCode, Stage, StepId};
use crate::domain::lifecycle::Entity;
use crate::domain::mode::RuntimeConfiguration;
use crate::domain::restriction::{LockableRegistry, RestrictiveEnvironment};
use crate::domain::step::Step;

pub struct CourseRunner {
    course: Course,
    runtime: RuntimeConfiguration,
    environment: Option<RestrictiveEnvironment>,
    /// Step the environment was last aligned with.
    entered_step: Option<StepId>,
    ticks: u64,
}

impl CourseRunner {
    pub fn new(course: Course, runtime: RuntimeConfiguration) -> Self {
        Self {
            course,
            runtime,
            environment: None,
            entered_step: None,
            ticks: 0,
        }
    }

    /// Locks scene interactions that the running step does not wait for.
    pub fn with_restrictive_environment(mut self, registry: LockableRegistry) -> Self {
        self.environment = Some(RestrictiveEnvironment::new(
            self.runtime.scene_handle(),
            registry,
        ));
        self
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn runtime(&self) -> &RuntimeConfiguration {
        &self.runtime
    }

    /// Selects the execution mode for the next `run()`.
    pub fn set_mode(&mut self, name: &str) -> Result<(), DomainError> {
        self.runtime.set_mode(name)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn into_course(self) -> Course {
        self.course
    }

    /// Returns true until the course is back to `Inactive`.
    pub fn is_running(&self) -> bool {
        self.course.stage() != Stage::Inactive
    }

    /// Returns true once every chapter has been completed.
    pub fn is_finished(&self) -> bool {
        self.course.stage() == Stage::Active
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.course.current_step()
    }

    /// Configures the course with the current mode and activates it.
    pub fn run(&mut self) -> Result<(), DomainError> {
        if self.is_running() {
            return Err(DomainError::new(
                ErrorCode::AlreadyRunning,
                format!("Course '{}' is already running", self.course.name()),
            ));
        }

        self.course.configure(&self.runtime);
        self.course.activate()?;
        self.ticks = 0;
        info!(
            course = %self.course.name(),
            mode = %self.runtime.current_mode().name(),
            "Course started"
        );
        self.sync_environment();
        Ok(())
    }

    /// Advances the course by one tick.
    pub fn tick(&mut self, delta: Duration) -> Result<(), DomainError> {
        self.ensure_running()?;
        let was_finished = self.is_finished();

        self.course.update(delta);
        self.ticks += 1;
        self.sync_environment();

        if !was_finished && self.is_finished() {
            info!(course = %self.course.name(), ticks = self.ticks, "Course finished");
        }
        Ok(())
    }

    /// Completes the running step at once; the chapter moves on.
    pub fn skip_current_step(&mut self) -> Result<(), DomainError> {
        self.ensure_running()?;
        let step = self.course.current_step_mut().ok_or_else(|| {
            DomainError::new(ErrorCode::StepNotFound, "No step is currently running")
        })?;
        info!(step = %step.name(), "Skipping step");
        step.mark_to_fast_forward();
        Ok(())
    }

    /// Completes every remaining step of the running chapter at once.
    pub fn skip_current_chapter(&mut self) -> Result<(), DomainError> {
        self.ensure_running()?;
        let chapter = self.course.current_chapter_mut().ok_or_else(|| {
            DomainError::new(ErrorCode::ChapterNotFound, "No chapter is currently running")
        })?;
        info!(chapter = %chapter.name(), "Skipping chapter");
        chapter.mark_to_fast_forward();
        Ok(())
    }

    /// Deactivates the course without waiting for ticks.
    pub fn stop(&mut self) -> Result<(), DomainError> {
        self.course.deactivate()?;
        self.course.mark_to_fast_forward_stage(Stage::Deactivating);
        if self.course.stage() != Stage::Inactive {
            warn!(course = %self.course.name(), stage = %self.course.stage(), "Course did not stop at once");
        }
        self.sync_environment();
        info!(course = %self.course.name(), ticks = self.ticks, "Course stopped");
        Ok(())
    }

    fn ensure_running(&self) -> Result<(), DomainError> {
        if self.is_running() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::NotRunning,
                format!("Course '{}' is not running", self.course.name()),
            ))
        }
    }

    fn sync_environment(&mut self) {
        let Some(environment) = self.environment.as_mut() else {
            return;
        };
        let running = self
            .course
            .current_step()
            .filter(|step| step.stage().is_running());
        let running_id = running.map(Step::id);
        if running_id == self.entered_step {
            return;
        }

        match running {
            Some(step) => environment.enter_step(step),
            None => environment.leave_step(),
        }
        self.entered_step = running_id;
    }
}
