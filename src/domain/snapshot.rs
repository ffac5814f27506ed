//! Plain-data snapshots of a course tree.
//!
//! Entities carry runtime state (lifecycles, resolved scene handles) that
//! must never be persisted. A snapshot holds only Data and Metadata and can
//! therefore be handed to any serde format. Snapshots are taken while the
//! course is `Inactive`.

use serde::{Deserialize, Serialize};

use crate::domain::behavior::{Behavior, BehaviorData};
use crate::domain::chapter::{Chapter, ChapterMetadata};
use crate::domain::condition::{Condition, ConditionData};
use crate::domain::course::Course;
use crate::domain::foundation::{DomainError, ErrorCode, Stage, StepId};
use crate::domain::lifecycle::Entity;
use crate::domain::step::{Step, StepMetadata};
use crate::domain::transition::Transition;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSnapshot {
    pub name: String,
    pub chapters: Vec<ChapterSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterSnapshot {
    pub name: String,
    pub first_step: Option<StepId>,
    #[serde(default)]
    pub metadata: ChapterMetadata,
    pub steps: Vec<StepSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSnapshot {
    pub id: StepId,
    pub name: String,
    #[serde(default)]
    pub metadata: StepMetadata,
    pub behaviors: Vec<BehaviorData>,
    pub transitions: Vec<TransitionSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionSnapshot {
    pub target: Option<StepId>,
    pub conditions: Vec<ConditionData>,
}

impl Course {
    /// Captures the course's Data and Metadata.
    ///
    /// # Errors
    ///
    /// `NotInactive` unless the course is `Inactive`.
    pub fn snapshot(&self) -> Result<CourseSnapshot, DomainError> {
        if self.stage() != Stage::Inactive {
            return Err(DomainError::new(
                ErrorCode::NotInactive,
                format!("Cannot snapshot course '{}' while it is {}", self.name(), self.stage()),
            )
            .with_detail("stage", self.stage().to_string()));
        }

        Ok(CourseSnapshot {
            name: self.name().to_string(),
            chapters: self.chapters().iter().map(snapshot_chapter).collect(),
        })
    }

    /// Rebuilds a fresh, inactive course from a snapshot.
    ///
    /// # Errors
    ///
    /// `StepNotFound` if an entry step or transition target does not name a
    /// step of its chapter.
    pub fn from_snapshot(snapshot: CourseSnapshot) -> Result<Course, DomainError> {
        let mut course = Course::new(snapshot.name);
        for chapter in snapshot.chapters {
            course.add_chapter(restore_chapter(chapter)?);
        }
        Ok(course)
    }
}

fn snapshot_chapter(chapter: &Chapter) -> ChapterSnapshot {
    ChapterSnapshot {
        name: chapter.name().to_string(),
        first_step: chapter.first_step(),
        metadata: *chapter.metadata(),
        steps: chapter.steps().iter().map(snapshot_step).collect(),
    }
}

fn snapshot_step(step: &Step) -> StepSnapshot {
    StepSnapshot {
        id: step.id(),
        name: step.name().to_string(),
        metadata: *step.metadata(),
        behaviors: step.behaviors().iter().map(|b| b.data().clone()).collect(),
        transitions: step
            .transitions()
            .iter()
            .map(|t| TransitionSnapshot {
                target: t.target(),
                conditions: t.conditions().iter().map(|c| c.data().clone()).collect(),
            })
            .collect(),
    }
}

fn restore_chapter(snapshot: ChapterSnapshot) -> Result<Chapter, DomainError> {
    let known: Vec<StepId> = snapshot.steps.iter().map(|s| s.id).collect();
    let mut chapter = Chapter::new(snapshot.name).with_metadata(snapshot.metadata);

    for step in snapshot.steps {
        for transition in &step.transitions {
            if let Some(target) = transition.target {
                if !known.contains(&target) {
                    return Err(unknown_step(target, chapter.name()));
                }
            }
        }
        chapter.add_step(restore_step(step));
    }

    chapter.set_first_step(snapshot.first_step)?;
    Ok(chapter)
}

fn restore_step(snapshot: StepSnapshot) -> Step {
    let mut step = Step::with_id(snapshot.id, snapshot.name);
    *step.metadata_mut() = snapshot.metadata;

    for data in snapshot.behaviors {
        step.add_behavior(Behavior::from_data(data));
    }
    for transition in snapshot.transitions {
        let mut restored = Transition::new().with_target(transition.target);
        for data in transition.conditions {
            restored.add_condition(Condition::from_data(data));
        }
        step.add_transition(restored);
    }
    step
}

fn unknown_step(id: StepId, chapter: &str) -> DomainError {
    DomainError::new(
        ErrorCode::StepNotFound,
        format!("Transition targets step {} outside chapter '{}'", id, chapter),
    )
    .with_detail("step_id", id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Position;
    use crate::domain::mode::RuntimeConfiguration;
    use std::time::Duration;

    fn sample_course() -> Course {
        let end = Step::new("End").with_position(Position::new(200.0, 0.0));
        let end_id = end.id();
        let start = Step::new("Start")
            .with_behavior(Behavior::timeout("Intro", Duration::from_secs(2)))
            .with_transition(
                Transition::to(end_id).with_condition(Condition::timeout("Wait", Duration::from_secs(1))),
            );
        Course::new("Onboarding").with_chapter(Chapter::new("Basics").with_step(start).with_step(end))
    }

    #[test]
    fn snapshot_survives_json() {
        let course = sample_course();

        let snapshot = course.snapshot().unwrap();
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: CourseSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn restored_course_matches_original_shape() {
        let course = sample_course();
        let snapshot = course.snapshot().unwrap();

        let restored = Course::from_snapshot(snapshot.clone()).unwrap();

        assert_eq!(restored.stage(), Stage::Inactive);
        assert_eq!(restored.snapshot().unwrap(), snapshot);
        let chapter = &restored.chapters()[0];
        assert_eq!(chapter.first_step(), Some(course.chapters()[0].steps()[0].id()));
        assert_eq!(chapter.steps()[1].metadata().position, Position::new(200.0, 0.0));
    }

    #[test]
    fn snapshot_of_running_course_is_refused() {
        let mut course = sample_course();
        course.configure(&RuntimeConfiguration::default());
        course.activate().unwrap();

        let err = course.snapshot().unwrap_err();

        assert_eq!(err.code, ErrorCode::NotInactive);
    }

    #[test]
    fn dangling_transition_target_is_rejected() {
        let mut snapshot = sample_course().snapshot().unwrap();
        snapshot.chapters[0].steps[0].transitions[0].target = Some(StepId::new());

        let err = Course::from_snapshot(snapshot).unwrap_err();

        assert_eq!(err.code, ErrorCode::StepNotFound);
    }
}
