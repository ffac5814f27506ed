//! Application layer - drivers that run the domain.
//!
//! - `CourseRunner` - configures, activates and ticks a course

mod course_runner;

pub use course_runner::CourseRunner;
