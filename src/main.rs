//! Demo driver: runs a small training course against an in-memory scene.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use course_runtime::adapters::{InMemorySceneObject, InMemorySceneRegistry};
use course_runtime::application::CourseRunner;
use course_runtime::config::AppConfig;
use course_runtime::domain::behavior::{Behavior, BehaviorKindTag};
use course_runtime::domain::condition::{Condition, ConditionKindTag};
use course_runtime::domain::course::Course;
use course_runtime::domain::factory::EntityBuilder;
use course_runtime::domain::foundation::{
    Position, PropertyKind, SceneObjectReference, ScenePropertyReference, Stage, StepId,
};
use course_runtime::domain::lifecycle::Entity;
use course_runtime::domain::mode::{KindRule, Mode, RuntimeConfiguration};
use course_runtime::domain::restriction::LockableRegistry;
use course_runtime::domain::step::Step;
use course_runtime::domain::transition::Transition;

const WRENCH: &str = "Wrench";

fn main() -> Result<(), Box<dyn Error>> {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Falling back to default configuration: {}", err);
            AppConfig::default()
        }
    };
    init_tracing(&config);

    if let Err(err) = config.validate() {
        warn!(error = %err, "Invalid configuration, using defaults");
        return run(&AppConfig::default());
    }
    run(&config)
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.runtime.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.features.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let scene = Arc::new(InMemorySceneRegistry::new());
    let wrench = scene.register(InMemorySceneObject::new(WRENCH).with_property(PropertyKind::Grabbable));

    let mut runtime = RuntimeConfiguration::new(scene)
        .with_mode(Mode::default())
        .with_mode(
            Mode::new("Skip timeouts")
                .with_skipped_behaviors(KindRule::new().add(BehaviorKindTag::Timeout))
                .with_skipped_conditions(KindRule::new().add(ConditionKindTag::Timeout)),
        );
    runtime.set_mode(&config.runtime.mode)?;

    let (course, grab_step) = build_course()?;
    let mut runner = CourseRunner::new(course, runtime);
    if config.features.restrictive_environment {
        runner = runner.with_restrictive_environment(LockableRegistry::with_defaults());
    }

    let delta = config.runtime.tick_delta();
    runner.run()?;
    while runner.is_running() && !runner.is_finished() {
        if runner.ticks() >= config.runtime.max_ticks {
            warn!(ticks = runner.ticks(), "Tick budget exhausted, stopping course");
            runner.stop()?;
            return Ok(());
        }
        runner.tick(delta)?;

        // Stand-in for the trainee: grab the wrench once the step waits for it.
        let waiting = runner
            .current_step()
            .is_some_and(|step| step.id() == grab_step && step.stage() == Stage::Active);
        if waiting {
            wrench.trigger(PropertyKind::Grabbable);
        }
    }

    info!(ticks = runner.ticks(), "Demo complete");
    Ok(())
}

/// Welcome, then pick up the wrench, then wrap up.
fn build_course() -> Result<(Course, StepId), Box<dyn Error>> {
    let mut builder = EntityBuilder::new();
    builder.on_entity_created(|created| info!(entity = %created.entity, "Entity created"));

    let wrench = SceneObjectReference::new(WRENCH)?;

    let mut wrap_up = builder.build_step(Position::new(400.0, 0.0));
    wrap_up.rename("Wrap up");
    wrap_up.add_behavior(Behavior::timeout("Outro", Duration::from_millis(500)));

    let grab = Step::new("Pick up the wrench")
        .with_position(Position::new(200.0, 0.0))
        .with_behavior(Behavior::set_enabled("Show wrench", wrench.clone(), true))
        .with_transition(Transition::to(wrap_up.id()).with_condition(Condition::property_triggered(
            "Wrench grabbed",
            ScenePropertyReference::new(wrench, PropertyKind::Grabbable),
        )));
    let grab_id = grab.id();

    let welcome = Step::new("Welcome")
        .with_behavior(Behavior::timeout("Intro", Duration::from_secs(1)))
        .with_transition(
            Transition::to(grab_id).with_condition(Condition::timeout("Read", Duration::from_secs(2))),
        );

    let mut course = builder.build_course("Workshop basics");
    let chapter = course
        .chapters_mut()
        .first_mut()
        .ok_or("course factory produced no chapter")?;
    chapter.add_step(welcome);
    chapter.add_step(grab);
    chapter.add_step(wrap_up);
    Ok((course, grab_id))
}
