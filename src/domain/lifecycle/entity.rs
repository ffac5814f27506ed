//! Entity trait - the common surface of every lifecycle-owning kind.

use std::time::Duration;

use crate::domain::foundation::{
    EntityLabel, InvalidStateError, Stage, StageChanged, SubscriptionId,
};
use crate::domain::mode::RuntimeConfiguration;

use super::{LifeCycle, StageProcess};

/// A unit of the course graph that owns a [`LifeCycle`].
///
/// Implementors hand out their lifecycle and their stage work as disjoint
/// borrows through [`split`](Entity::split); every protocol method below is
/// expressed in terms of that pair.
pub trait Entity {
    /// Stage work of this entity, borrowing everything except the lifecycle.
    type Process<'a>: StageProcess
    where
        Self: 'a;

    fn life_cycle(&self) -> &LifeCycle;

    fn life_cycle_mut(&mut self) -> &mut LifeCycle;

    /// Borrows the lifecycle and the stage process at the same time.
    fn split(&mut self) -> (&mut LifeCycle, Self::Process<'_>);

    /// Binds the current execution mode and resolves scene references.
    ///
    /// Must be called before the first `activate()`.
    fn configure(&mut self, runtime: &RuntimeConfiguration);

    fn label(&self) -> &EntityLabel {
        self.life_cycle().owner()
    }

    fn stage(&self) -> Stage {
        self.life_cycle().stage()
    }

    fn activate(&mut self) -> Result<(), InvalidStateError> {
        let (life_cycle, mut process) = self.split();
        life_cycle.activate(&mut process)
    }

    fn deactivate(&mut self) -> Result<(), InvalidStateError> {
        let (life_cycle, mut process) = self.split();
        life_cycle.deactivate(&mut process)
    }

    fn update(&mut self, delta: Duration) {
        let (life_cycle, mut process) = self.split();
        life_cycle.update(&mut process, delta);
    }

    fn mark_to_fast_forward(&mut self) {
        let (life_cycle, mut process) = self.split();
        life_cycle.mark_to_fast_forward(&mut process);
    }

    fn mark_to_fast_forward_stage(&mut self, stage: Stage) {
        let (life_cycle, mut process) = self.split();
        life_cycle.mark_to_fast_forward_stage(stage, &mut process);
    }

    fn on_stage_changed(
        &mut self,
        callback: impl FnMut(&StageChanged) + 'static,
    ) -> SubscriptionId
    where
        Self: Sized,
    {
        self.life_cycle_mut().subscribe(callback)
    }
}
