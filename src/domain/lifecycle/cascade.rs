//! Helpers composites use to drive their children.

use std::time::Duration;

use tracing::error;

use crate::domain::foundation::Stage;

use super::Entity;

/// Activates a child that is inactive; leaves running children alone.
pub(crate) fn activate_if_inactive<E: Entity>(child: &mut E) {
    if child.stage() != Stage::Inactive {
        return;
    }
    if let Err(err) = child.activate() {
        error!(entity = %child.label(), error = %err, "Child refused activation");
    }
}

/// Deactivates a child that is activating or active.
pub(crate) fn deactivate_if_running<E: Entity>(child: &mut E) {
    if !child.stage().is_running() {
        return;
    }
    if let Err(err) = child.deactivate() {
        error!(entity = %child.label(), error = %err, "Child refused deactivation");
    }
}

/// Fast-forwards `stage` on a child only if the child currently sits in it.
pub(crate) fn fast_forward_if_in<E: Entity>(child: &mut E, stage: Stage) {
    if child.stage() == stage {
        child.mark_to_fast_forward_stage(stage);
    }
}

/// Brings a child to `Active` without waiting for ticks.
pub(crate) fn force_active<E: Entity>(child: &mut E) {
    activate_if_inactive(child);
    fast_forward_if_in(child, Stage::Activating);
}

/// Brings a child to `Inactive` without waiting for ticks.
pub(crate) fn force_inactive<E: Entity>(child: &mut E) {
    deactivate_if_running(child);
    fast_forward_if_in(child, Stage::Deactivating);
}

pub(crate) fn update_all<'a, E: Entity + 'a>(
    children: impl IntoIterator<Item = &'a mut E>,
    delta: Duration,
) {
    for child in children {
        child.update(delta);
    }
}

pub(crate) fn all_in<'a, E: Entity + 'a>(
    children: impl IntoIterator<Item = &'a E>,
    stage: Stage,
) -> bool {
    children.into_iter().all(|child| child.stage() == stage)
}
