//! Factories for each entity kind.
//!
//! Composite factories hold the factory of their children behind a trait
//! object, so customizing how every step's transition is made means
//! swapping one nested factory.

use crate::domain::chapter::Chapter;
use crate::domain::course::Course;
use crate::domain::step::Step;
use crate::domain::transition::Transition;

/// Creates entities of one kind.
pub trait Factory<T> {
    /// Name used by [`create_default`](Factory::create_default).
    fn default_name(&self) -> &str;

    fn create(&self, name: &str) -> T;

    fn create_default(&self) -> T {
        self.create(self.default_name())
    }
}

/// Makes transitions that end the chapter and carry no conditions.
#[derive(Debug, Default, Clone, Copy)]
pub struct TransitionFactory;

impl Factory<Transition> for TransitionFactory {
    fn default_name(&self) -> &str {
        "Transition"
    }

    /// Transitions are unnamed; `name` is ignored.
    fn create(&self, _name: &str) -> Transition {
        Transition::new()
    }
}

/// Makes steps with a single transition from the nested factory.
pub struct StepFactory {
    transitions: Box<dyn Factory<Transition>>,
}

impl StepFactory {
    pub fn new() -> Self {
        Self {
            transitions: Box::new(TransitionFactory),
        }
    }

    pub fn with_transition_factory(mut self, factory: impl Factory<Transition> + 'static) -> Self {
        self.transitions = Box::new(factory);
        self
    }
}

impl Default for StepFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl Factory<Step> for StepFactory {
    fn default_name(&self) -> &str {
        "New Step"
    }

    fn create(&self, name: &str) -> Step {
        Step::new(name).with_transition(self.transitions.create_default())
    }
}

/// Makes empty chapters.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChapterFactory;

impl Factory<Chapter> for ChapterFactory {
    fn default_name(&self) -> &str {
        "New Chapter"
    }

    fn create(&self, name: &str) -> Chapter {
        Chapter::new(name)
    }
}

/// Makes courses holding one chapter from the nested factory.
pub struct CourseFactory {
    chapters: Box<dyn Factory<Chapter>>,
}

impl CourseFactory {
    pub const FIRST_CHAPTER_NAME: &'static str = "Chapter 1";

    pub fn new() -> Self {
        Self {
            chapters: Box::new(ChapterFactory),
        }
    }

    pub fn with_chapter_factory(mut self, factory: impl Factory<Chapter> + 'static) -> Self {
        self.chapters = Box::new(factory);
        self
    }
}

impl Default for CourseFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl Factory<Course> for CourseFactory {
    fn default_name(&self) -> &str {
        "New Course"
    }

    fn create(&self, name: &str) -> Course {
        Course::new(name).with_chapter(self.chapters.create(Self::FIRST_CHAPTER_NAME))
    }
}
