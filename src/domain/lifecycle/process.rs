//! Per-stage work performed by an entity while its lifecycle sits in a stage.

use std::time::Duration;

use crate::domain::foundation::Stage;

/// Outcome of one tick of stage work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// The stage needs more ticks.
    Pending,
    /// The stage's work is finished.
    Done,
}

impl Progress {
    /// `Done` when `finished` holds, `Pending` otherwise.
    pub fn done_if(finished: bool) -> Self {
        if finished {
            Progress::Done
        } else {
            Progress::Pending
        }
    }
}

/// Hooks the [`LifeCycle`](super::LifeCycle) calls into while driving an
/// entity through its stages.
///
/// For every non-inactive stage the lifecycle calls `start` once on entry,
/// `update` once per tick until it reports [`Progress::Done`], and `end`
/// once on exit. A fast-forwarded stage gets a single `fast_forward` call
/// in place of the remaining updates, followed by `end`.
///
/// A finished `Activating` stage moves on to `Active`, a finished
/// `Deactivating` stage to `Inactive`. A finished `Active` stage stays put
/// and stops receiving updates until the entity is deactivated.
pub trait StageProcess {
    fn start(&mut self, _stage: Stage) {}

    fn update(&mut self, stage: Stage, delta: Duration) -> Progress;

    fn end(&mut self, _stage: Stage) {}

    fn fast_forward(&mut self, _stage: Stage) {}
}

impl<P: StageProcess + ?Sized> StageProcess for &mut P {
    fn start(&mut self, stage: Stage) {
        (**self).start(stage)
    }

    fn update(&mut self, stage: Stage, delta: Duration) -> Progress {
        (**self).update(stage, delta)
    }

    fn end(&mut self, stage: Stage) {
        (**self).end(stage)
    }

    fn fast_forward(&mut self, stage: Stage) {
        (**self).fast_forward(stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn done_if_maps_booleans() {
        assert_eq!(Progress::done_if(true), Progress::Done);
        assert_eq!(Progress::done_if(false), Progress::Pending);
    }
}
