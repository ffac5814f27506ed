//! LifeCycle - the stage machine every entity owns.
//!
//! The lifecycle holds the current [`Stage`], the fast-forward marks and
//! the stage-change observers. It does no work of its own: every call that
//! may move the stage receives the owning entity's [`StageProcess`], which
//! the lifecycle starts, ticks, fast-forwards and ends as stages come and go.

use std::fmt;
use std::time::Duration;

use tracing::{debug, error};

use crate::domain::foundation::{
    EntityLabel, InvalidStateError, LifeCycleOperation, Observers, Stage, StageChanged,
    StateMachine, SubscriptionId,
};

use super::{Progress, StageMarks, StageProcess};

/// Activation state machine owned by exactly one entity.
pub struct LifeCycle {
    owner: EntityLabel,
    stage: Stage,
    /// Set once the `Active` stage's process reported `Done`.
    active_finished: bool,
    marks: StageMarks,
    /// Set by the execution mode; a skipped entity fast-forwards every stage.
    skipped: bool,
    observers: Observers<StageChanged>,
}

impl LifeCycle {
    /// Creates an inactive lifecycle for the given owner.
    pub fn new(owner: EntityLabel) -> Self {
        Self {
            owner,
            stage: Stage::Inactive,
            active_finished: false,
            marks: StageMarks::default(),
            skipped: false,
            observers: Observers::new(),
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    /// Returns the entity this lifecycle belongs to.
    pub fn owner(&self) -> &EntityLabel {
        &self.owner
    }

    /// Returns the current stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns true if the entity's kind is skipped by the current mode.
    pub fn is_skipped(&self) -> bool {
        self.skipped
    }

    /// Returns true if the given stage carries a fast-forward mark.
    pub fn is_marked_to_fast_forward(&self, stage: Stage) -> bool {
        self.marks.contains(stage)
    }

    pub(crate) fn rename(&mut self, name: impl Into<String>) {
        self.owner.name = name.into();
    }

    pub(crate) fn set_skipped(&mut self, skipped: bool) {
        self.skipped = skipped;
    }

    // ───────────────────────────────────────────────────────────────
    // Observers
    // ───────────────────────────────────────────────────────────────

    /// Registers a stage-change callback.
    pub fn subscribe(&mut self, callback: impl FnMut(&StageChanged) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    /// Removes a stage-change callback.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // ───────────────────────────────────────────────────────────────
    // Protocol
    // ───────────────────────────────────────────────────────────────

    /// Starts activation.
    ///
    /// No-op when already activating or active. Fails while deactivating.
    pub fn activate<P: StageProcess + ?Sized>(
        &mut self,
        process: &mut P,
    ) -> Result<(), InvalidStateError> {
        match self.stage {
            Stage::Activating | Stage::Active => Ok(()),
            Stage::Deactivating => Err(self.invalid(LifeCycleOperation::Activate)),
            Stage::Inactive => {
                self.enter(Stage::Activating, process);
                Ok(())
            }
        }
    }

    /// Starts deactivation.
    ///
    /// An activation in flight is ended where it stands; the process's
    /// deactivation then winds down whatever it had already started.
    /// No-op when already deactivating. Fails while inactive.
    pub fn deactivate<P: StageProcess + ?Sized>(
        &mut self,
        process: &mut P,
    ) -> Result<(), InvalidStateError> {
        match self.stage {
            Stage::Inactive => Err(self.invalid(LifeCycleOperation::Deactivate)),
            Stage::Deactivating => Ok(()),
            Stage::Activating | Stage::Active => {
                process.end(self.stage);
                self.enter(Stage::Deactivating, process);
                Ok(())
            }
        }
    }

    /// Runs one tick of the current stage's work.
    pub fn update<P: StageProcess + ?Sized>(&mut self, process: &mut P, delta: Duration) {
        let stage = self.stage;
        if stage == Stage::Inactive || (stage == Stage::Active && self.active_finished) {
            return;
        }

        if self.should_fast_forward(stage) {
            self.fast_forward_current(process);
            return;
        }

        if process.update(stage, delta) == Progress::Done {
            self.complete_stage(process);
        }
    }

    /// Marks every stage to be fast-forwarded.
    ///
    /// While inactive this only arms the marks; the next `activate` then
    /// resolves instantly.
    pub fn mark_to_fast_forward<P: StageProcess + ?Sized>(&mut self, process: &mut P) {
        for stage in Stage::FAST_FORWARDABLE {
            self.mark_to_fast_forward_stage(stage, process);
        }
    }

    /// Marks one stage to be fast-forwarded. If the entity is currently in
    /// that stage it resolves immediately, otherwise the mark waits for the
    /// stage to be entered.
    pub fn mark_to_fast_forward_stage<P: StageProcess + ?Sized>(
        &mut self,
        stage: Stage,
        process: &mut P,
    ) {
        if !self.marks.mark(stage) {
            debug!(entity = %self.owner, "Ignoring fast-forward mark on {}", stage);
            return;
        }

        if self.stage == stage {
            self.fast_forward_current(process);
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Internals
    // ───────────────────────────────────────────────────────────────

    fn should_fast_forward(&self, stage: Stage) -> bool {
        self.skipped || self.marks.contains(stage)
    }

    fn fast_forward_current<P: StageProcess + ?Sized>(&mut self, process: &mut P) {
        let stage = self.stage;
        self.marks.take(stage);
        process.fast_forward(stage);
        self.complete_stage(process);
    }

    fn complete_stage<P: StageProcess + ?Sized>(&mut self, process: &mut P) {
        match self.stage {
            Stage::Activating => {
                process.end(Stage::Activating);
                self.enter(Stage::Active, process);
            }
            Stage::Deactivating => {
                process.end(Stage::Deactivating);
                self.enter(Stage::Inactive, process);
            }
            // Active is left only through deactivate(), which ends it.
            Stage::Active => self.active_finished = true,
            Stage::Inactive => {}
        }
    }

    fn enter<P: StageProcess + ?Sized>(&mut self, stage: Stage, process: &mut P) {
        let previous = self.stage;
        if !previous.can_transition_to(&stage) {
            error!(
                entity = %self.owner,
                "Refusing stage change from {} to {}", previous, stage
            );
            return;
        }

        self.stage = stage;
        self.active_finished = false;
        if stage == Stage::Inactive {
            self.marks.clear();
        }

        debug!(entity = %self.owner, from = %previous, to = %stage, "Stage changed");
        self.observers.notify(&StageChanged {
            sender: self.owner.clone(),
            previous,
            stage,
        });

        if stage == Stage::Inactive {
            return;
        }

        process.start(stage);
        // start() may have cascaded into children that moved us already.
        if self.stage == stage && self.should_fast_forward(stage) {
            self.fast_forward_current(process);
        }
    }

    fn invalid(&self, operation: LifeCycleOperation) -> InvalidStateError {
        InvalidStateError::new(self.owner.clone(), operation, self.stage)
    }
}

impl fmt::Debug for LifeCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifeCycle")
            .field("owner", &self.owner)
            .field("stage", &self.stage)
            .field("marks", &self.marks)
            .field("skipped", &self.skipped)
            .field("observers", &self.observers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::EntityKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    const TICK: Duration = Duration::from_millis(10);

    /// Process that needs a fixed number of ticks per transient stage and
    /// records every hook call.
    #[derive(Default)]
    struct ScriptedProcess {
        ticks_per_stage: u32,
        ticks: u32,
        calls: Vec<String>,
    }

    impl ScriptedProcess {
        fn taking(ticks_per_stage: u32) -> Self {
            Self {
                ticks_per_stage,
                ..Self::default()
            }
        }
    }

    impl StageProcess for ScriptedProcess {
        fn start(&mut self, stage: Stage) {
            self.ticks = 0;
            self.calls.push(format!("start {}", stage));
        }

        fn update(&mut self, stage: Stage, _delta: Duration) -> Progress {
            self.calls.push(format!("update {}", stage));
            if stage == Stage::Active {
                return Progress::Pending;
            }
            self.ticks += 1;
            Progress::done_if(self.ticks >= self.ticks_per_stage)
        }

        fn end(&mut self, stage: Stage) {
            self.calls.push(format!("end {}", stage));
        }

        fn fast_forward(&mut self, stage: Stage) {
            self.calls.push(format!("fast_forward {}", stage));
        }
    }

    fn life_cycle() -> LifeCycle {
        LifeCycle::new(EntityLabel::new(EntityKind::Behavior, "Scripted"))
    }

    fn record_stages(lc: &mut LifeCycle) -> Rc<RefCell<Vec<Stage>>> {
        let stages = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&stages);
        lc.subscribe(move |event| sink.borrow_mut().push(event.stage));
        stages
    }

    // ───────────────────────────────────────────────────────────────
    // Protocol Tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn new_life_cycle_is_inactive() {
        assert_eq!(life_cycle().stage(), Stage::Inactive);
    }

    #[test]
    fn deactivate_while_inactive_fails_and_keeps_stage() {
        let mut lc = life_cycle();
        let mut process = ScriptedProcess::taking(1);

        let err = lc.deactivate(&mut process).unwrap_err();

        assert_eq!(err.stage, Stage::Inactive);
        assert_eq!(err.operation, LifeCycleOperation::Deactivate);
        assert_eq!(lc.stage(), Stage::Inactive);
        assert!(process.calls.is_empty());
    }

    #[test]
    fn activate_while_deactivating_fails() {
        let mut lc = life_cycle();
        let mut process = ScriptedProcess::taking(3);
        lc.activate(&mut process).unwrap();
        lc.deactivate(&mut process).unwrap();

        let err = lc.activate(&mut process).unwrap_err();

        assert_eq!(err.operation, LifeCycleOperation::Activate);
        assert_eq!(lc.stage(), Stage::Deactivating);
    }

    #[test]
    fn activate_is_idempotent() {
        let mut lc = life_cycle();
        let mut process = ScriptedProcess::taking(2);

        lc.activate(&mut process).unwrap();
        lc.activate(&mut process).unwrap();

        assert_eq!(lc.stage(), Stage::Activating);
        assert_eq!(process.calls, vec!["start Activating"]);
    }

    #[test]
    fn full_cycle_takes_configured_ticks() {
        let mut lc = life_cycle();
        let mut process = ScriptedProcess::taking(2);

        lc.activate(&mut process).unwrap();
        lc.update(&mut process, TICK);
        assert_eq!(lc.stage(), Stage::Activating);
        lc.update(&mut process, TICK);
        assert_eq!(lc.stage(), Stage::Active);

        lc.deactivate(&mut process).unwrap();
        lc.update(&mut process, TICK);
        lc.update(&mut process, TICK);
        assert_eq!(lc.stage(), Stage::Inactive);
    }

    #[test]
    fn update_while_inactive_does_nothing() {
        let mut lc = life_cycle();
        let mut process = ScriptedProcess::taking(1);

        lc.update(&mut process, TICK);

        assert!(process.calls.is_empty());
    }

    #[test]
    fn deactivating_mid_activation_ends_activation_and_skips_active() {
        let mut lc = life_cycle();
        let stages = record_stages(&mut lc);
        let mut process = ScriptedProcess::taking(5);

        lc.activate(&mut process).unwrap();
        lc.update(&mut process, TICK);
        lc.deactivate(&mut process).unwrap();
        while lc.stage() != Stage::Inactive {
            lc.update(&mut process, TICK);
        }

        assert_eq!(
            *stages.borrow(),
            vec![Stage::Activating, Stage::Deactivating, Stage::Inactive]
        );
        assert!(process.calls.contains(&"end Activating".to_string()));
    }

    #[test]
    fn observers_see_sender_and_previous_stage() {
        let mut lc = life_cycle();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        lc.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        let mut process = ScriptedProcess::taking(1);

        lc.activate(&mut process).unwrap();

        let events = events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].sender.name, "Scripted");
        assert_eq!(events[0].previous, Stage::Inactive);
        assert_eq!(events[0].stage, Stage::Activating);
    }

    // ───────────────────────────────────────────────────────────────
    // Fast-Forward Tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn fast_forward_while_inactive_only_arms() {
        let mut lc = life_cycle();
        let mut process = ScriptedProcess::taking(100);

        lc.mark_to_fast_forward(&mut process);

        assert_eq!(lc.stage(), Stage::Inactive);
        assert!(process.calls.is_empty());
        assert!(lc.is_marked_to_fast_forward(Stage::Activating));
    }

    #[test]
    fn armed_activation_resolves_instantly() {
        let mut lc = life_cycle();
        let mut process = ScriptedProcess::taking(100);

        lc.mark_to_fast_forward(&mut process);
        lc.activate(&mut process).unwrap();

        assert_eq!(lc.stage(), Stage::Active);
        assert_eq!(
            process.calls,
            vec![
                "start Activating",
                "fast_forward Activating",
                "end Activating",
                "start Active",
                "fast_forward Active",
            ]
        );
    }

    #[test]
    fn marking_current_stage_resolves_it_immediately() {
        let mut lc = life_cycle();
        let mut process = ScriptedProcess::taking(100);
        lc.activate(&mut process).unwrap();

        lc.mark_to_fast_forward_stage(Stage::Activating, &mut process);

        assert_eq!(lc.stage(), Stage::Active);
        assert!(!lc.is_marked_to_fast_forward(Stage::Activating));
    }

    #[test]
    fn marks_are_cleared_on_return_to_inactive() {
        let mut lc = life_cycle();
        let mut process = ScriptedProcess::taking(1);
        lc.activate(&mut process).unwrap();
        lc.mark_to_fast_forward(&mut process);
        assert!(lc.is_marked_to_fast_forward(Stage::Deactivating));

        lc.deactivate(&mut process).unwrap();

        assert_eq!(lc.stage(), Stage::Inactive);
        assert!(!lc.is_marked_to_fast_forward(Stage::Deactivating));
    }

    #[test]
    fn fast_forwarded_active_stage_stops_updating() {
        let mut lc = life_cycle();
        let mut process = ScriptedProcess::taking(1);
        lc.activate(&mut process).unwrap();
        lc.update(&mut process, TICK);
        lc.mark_to_fast_forward_stage(Stage::Active, &mut process);
        let calls_before = process.calls.len();

        lc.update(&mut process, TICK);

        assert_eq!(process.calls.len(), calls_before);
        assert_eq!(lc.stage(), Stage::Active);
    }

    #[test]
    fn skipped_life_cycle_fast_forwards_every_stage() {
        let mut lc = life_cycle();
        lc.set_skipped(true);
        let mut process = ScriptedProcess::taking(100);

        lc.activate(&mut process).unwrap();
        assert_eq!(lc.stage(), Stage::Active);

        lc.deactivate(&mut process).unwrap();
        assert_eq!(lc.stage(), Stage::Inactive);
    }

    #[test]
    fn marking_inactive_is_ignored() {
        let mut lc = life_cycle();
        let mut process = ScriptedProcess::taking(1);

        lc.mark_to_fast_forward_stage(Stage::Inactive, &mut process);

        assert_eq!(lc.stage(), Stage::Inactive);
        assert!(process.calls.is_empty());
    }
}
