//! EntityBuilder - builds entities for the authoring surface and announces
//! each creation.

use serde::{Deserialize, Serialize};

use crate::domain::course::Course;
use crate::domain::foundation::{EntityLabel, Observers, Position, StepId, SubscriptionId};
use crate::domain::lifecycle::Entity;
use crate::domain::step::Step;

use super::{CourseFactory, Factory, StepFactory};

/// Fired after the builder created an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCreated {
    pub entity: EntityLabel,
    /// Set when the created entity is a step.
    pub step_id: Option<StepId>,
}

/// Builds steps and courses through swappable factories.
///
/// One builder is constructed by the host and passed to whatever creates
/// entities; there is no global instance.
pub struct EntityBuilder {
    steps: Box<dyn Factory<Step>>,
    courses: Box<dyn Factory<Course>>,
    observers: Observers<EntityCreated>,
}

impl EntityBuilder {
    pub fn new() -> Self {
        Self {
            steps: Box::new(StepFactory::new()),
            courses: Box::new(CourseFactory::new()),
            observers: Observers::new(),
        }
    }

    pub fn with_step_factory(mut self, factory: impl Factory<Step> + 'static) -> Self {
        self.steps = Box::new(factory);
        self
    }

    pub fn with_course_factory(mut self, factory: impl Factory<Course> + 'static) -> Self {
        self.courses = Box::new(factory);
        self
    }

    pub fn on_entity_created(
        &mut self,
        callback: impl FnMut(&EntityCreated) + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Builds a default step placed at `position` on the canvas.
    pub fn build_step(&mut self, position: Position) -> Step {
        let step = self.steps.create_default().with_position(position);
        self.observers.notify(&EntityCreated {
            entity: step.label().clone(),
            step_id: Some(step.id()),
        });
        step
    }

    /// Builds a course with its first chapter.
    pub fn build_course(&mut self, name: &str) -> Course {
        let course = self.courses.create(name);
        self.observers.notify(&EntityCreated {
            entity: course.label().clone(),
            step_id: None,
        });
        course
    }
}

impl Default for EntityBuilder {
    fn default() -> Self {
        Self::new()
    }
}
