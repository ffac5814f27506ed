//! Course entity - the root of the entity tree.
//!
//! A course runs its chapters in order and is `Active` once the last one
//! has finished.

use std::time::Duration;

use tracing::info;

use crate::domain::chapter::Chapter;
use crate::domain::foundation::{EntityKind, EntityLabel, Stage};
use crate::domain::lifecycle::{cascade, Entity, LifeCycle, Progress, StageProcess};
use crate::domain::mode::RuntimeConfiguration;
use crate::domain::step::Step;

#[derive(Debug, Default)]
pub struct CourseData {
    pub name: String,
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Default)]
struct CourseRuntime {
    current: Option<usize>,
}

#[derive(Debug)]
pub struct Course {
    life_cycle: LifeCycle,
    data: CourseData,
    runtime: CourseRuntime,
}

impl Course {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            life_cycle: LifeCycle::new(EntityLabel::new(EntityKind::Course, name.clone())),
            data: CourseData {
                name,
                chapters: Vec::new(),
            },
            runtime: CourseRuntime::default(),
        }
    }

    pub fn with_chapter(mut self, chapter: Chapter) -> Self {
        self.data.chapters.push(chapter);
        self
    }

    pub fn add_chapter(&mut self, chapter: Chapter) {
        self.data.chapters.push(chapter);
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.life_cycle.rename(name.clone());
        self.data.name = name;
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.data.chapters
    }

    pub fn chapters_mut(&mut self) -> &mut [Chapter] {
        &mut self.data.chapters
    }

    pub fn current_chapter(&self) -> Option<&Chapter> {
        self.runtime.current.and_then(|i| self.data.chapters.get(i))
    }

    pub fn current_chapter_mut(&mut self) -> Option<&mut Chapter> {
        self.runtime.current.and_then(|i| self.data.chapters.get_mut(i))
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.current_chapter().and_then(Chapter::current_step)
    }

    pub fn current_step_mut(&mut self) -> Option<&mut Step> {
        self.current_chapter_mut().and_then(Chapter::current_step_mut)
    }
}

impl Entity for Course {
    type Process<'a> = CourseProcess<'a>;

    fn life_cycle(&self) -> &LifeCycle {
        &self.life_cycle
    }

    fn life_cycle_mut(&mut self) -> &mut LifeCycle {
        &mut self.life_cycle
    }

    fn split(&mut self) -> (&mut LifeCycle, CourseProcess<'_>) {
        (
            &mut self.life_cycle,
            CourseProcess {
                data: &mut self.data,
                runtime: &mut self.runtime,
            },
        )
    }

    fn configure(&mut self, runtime: &RuntimeConfiguration) {
        for chapter in &mut self.data.chapters {
            chapter.configure(runtime);
        }
    }
}

/// Stage work of a [`Course`].
pub struct CourseProcess<'a> {
    data: &'a mut CourseData,
    runtime: &'a mut CourseRuntime,
}

impl CourseProcess<'_> {
    fn current(&mut self) -> Option<&mut Chapter> {
        self.runtime
            .current
            .and_then(|i| self.data.chapters.get_mut(i))
    }

    /// Makes the chapter at `index` current and activates it. Returns false
    /// when the course has no such chapter.
    fn enter_chapter(&mut self, index: usize) -> bool {
        match self.data.chapters.get_mut(index) {
            Some(chapter) => {
                info!(course = %self.data.name, chapter = %chapter.name(), "Chapter started");
                self.runtime.current = Some(index);
                cascade::activate_if_inactive(chapter);
                true
            }
            None => {
                self.runtime.current = None;
                false
            }
        }
    }
}

impl StageProcess for CourseProcess<'_> {
    fn start(&mut self, stage: Stage) {
        match stage {
            Stage::Activating => {
                self.enter_chapter(0);
            }
            Stage::Deactivating => {
                if let Some(chapter) = self.current() {
                    cascade::deactivate_if_running(chapter);
                }
            }
            Stage::Inactive | Stage::Active => {}
        }
    }

    fn update(&mut self, stage: Stage, delta: Duration) -> Progress {
        let Some(index) = self.runtime.current else {
            return Progress::Done;
        };
        let Some(chapter) = self.data.chapters.get_mut(index) else {
            return Progress::Done;
        };
        chapter.update(delta);

        match stage {
            Stage::Activating => {
                if chapter.stage() == Stage::Active {
                    info!(course = %self.data.name, chapter = %chapter.name(), "Chapter finished");
                    cascade::deactivate_if_running(chapter);
                }
                if chapter.stage() != Stage::Inactive {
                    return Progress::Pending;
                }
                Progress::done_if(!self.enter_chapter(index + 1))
            }
            Stage::Deactivating => Progress::done_if(chapter.stage() == Stage::Inactive),
            Stage::Active | Stage::Inactive => Progress::Done,
        }
    }

    fn end(&mut self, stage: Stage) {
        if stage == Stage::Deactivating {
            self.runtime.current = None;
        }
    }

    fn fast_forward(&mut self, stage: Stage) {
        match stage {
            Stage::Activating => {
                while let Some(index) = self.runtime.current {
                    let Some(chapter) = self.data.chapters.get_mut(index) else {
                        self.runtime.current = None;
                        break;
                    };
                    chapter.mark_to_fast_forward();
                    cascade::activate_if_inactive(chapter);
                    cascade::force_inactive(chapter);
                    self.enter_chapter(index + 1);
                }
            }
            Stage::Deactivating => {
                if let Some(chapter) = self.current() {
                    cascade::force_inactive(chapter);
                }
            }
            Stage::Inactive | Stage::Active => {}
        }
    }
}
