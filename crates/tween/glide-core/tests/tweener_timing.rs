use std::cell::{Cell, RefCell};
use std::rc::Rc;

use approx::assert_relative_eq;
use glide_core::shortcuts::to;
use glide_core::{
    Accessor, Config, Ease, LoopType, PlaybackState, TweenEngine, TweenEvent, TweenSettings,
};

fn init_tracing() {
    let default_filter = "glide_core=debug";
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

fn linear_engine() -> TweenEngine {
    TweenEngine::new(Config {
        default_ease: Ease::Linear,
        ..Config::default()
    })
}

#[test]
fn linear_tween_reaches_exact_end_and_autokills() {
    init_tracing();
    let mut engine = linear_engine();
    let x = Rc::new(Cell::new(0.0f32));
    let id = engine
        .add(to(Accessor::cell(&x), 10.0, 2.0).expect("tween"))
        .expect("add");

    let events = engine.update(1.0).events.clone();
    assert_relative_eq!(x.get(), 5.0);
    assert_eq!(
        events,
        vec![TweenEvent::Played { id }, TweenEvent::Started { id }]
    );

    let events = engine.update(1.3).events.clone();
    assert_eq!(x.get(), 10.0);
    assert!(events.contains(&TweenEvent::Completed { id }));
    assert!(events.contains(&TweenEvent::Killed { id }));
    assert!(!engine.contains(id));
}

#[test]
fn goto_and_complete_apply_exact_values() {
    let mut engine = linear_engine();
    let x = Rc::new(Cell::new(0.0f32));
    let id = engine
        .add(to(Accessor::cell(&x), 10.0, 2.0).expect("tween").paused())
        .expect("add");

    assert_eq!(engine.goto(id, 1.0, false), 1);
    assert_relative_eq!(x.get(), 5.0);
    assert_eq!(engine.status(id).map(|s| s.state), Some(PlaybackState::Paused));

    assert_eq!(engine.complete(id), 1);
    assert_eq!(x.get(), 10.0);
    assert!(!engine.contains(id), "autokill after complete");
}

#[test]
fn goto_clamps_out_of_range_positions() {
    let mut engine = linear_engine();
    let x = Rc::new(Cell::new(0.0f32));
    let tween = to(Accessor::cell(&x), 4.0, 1.0)
        .expect("tween")
        .with_auto_kill(false);
    let id = engine.add(tween).expect("add");

    engine.goto(id, -3.0, false);
    assert_eq!(x.get(), 0.0);
    engine.goto(id, 99.0, false);
    assert_eq!(x.get(), 4.0);
    assert_eq!(engine.status(id).map(|s| s.state), Some(PlaybackState::Complete));
}

#[test]
fn delay_holds_the_value_until_elapsed() {
    let mut engine = linear_engine();
    let x = Rc::new(Cell::new(3.0f32));
    let id = engine
        .add(
            to(Accessor::cell(&x), 13.0, 2.0)
                .expect("tween")
                .with_delay(1.0),
        )
        .expect("add");

    let events = engine.update(0.5).events.clone();
    assert_eq!(x.get(), 3.0);
    assert!(!events.contains(&TweenEvent::Started { id }));

    engine.update(1.0);
    assert_relative_eq!(x.get(), 5.5);
    let status = engine.status(id).expect("status");
    assert_relative_eq!(status.elapsed_delay, 1.0);
    assert_relative_eq!(status.position, 0.5);
}

#[test]
fn yoyo_reflects_odd_cycles() {
    let mut engine = linear_engine();
    let x = Rc::new(Cell::new(0.0f32));
    let tween = to(Accessor::cell(&x), 10.0, 1.0)
        .expect("tween")
        .with_loops(2, LoopType::Yoyo)
        .with_auto_kill(false);
    let id = engine.add(tween).expect("add");

    engine.goto(id, 0.25, false);
    assert_relative_eq!(x.get(), 2.5);
    engine.goto(id, 1.25, false);
    assert_relative_eq!(x.get(), 7.5);
    engine.goto(id, 1.75, false);
    assert_relative_eq!(x.get(), 2.5);
    engine.goto(id, 2.0, false);
    assert_eq!(x.get(), 0.0);
}

#[test]
fn restart_loops_jump_back_at_each_boundary() {
    let mut engine = linear_engine();
    let x = Rc::new(Cell::new(0.0f32));
    let steps = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&steps);
    let tween = to(Accessor::cell(&x), 10.0, 1.0)
        .expect("tween")
        .with_loops(3, LoopType::Restart)
        .on_step_complete(move || counter.set(counter.get() + 1));
    let id = engine.add(tween).expect("add");

    engine.update(1.0);
    // The boundary belongs to the start of the next cycle.
    assert_eq!(x.get(), 0.0);
    assert_eq!(steps.get(), 1);
    engine.update(0.5);
    assert_relative_eq!(x.get(), 5.0);
    assert_eq!(engine.status(id).map(|s| s.completed_loops), Some(1));

    engine.update(2.0);
    assert_eq!(x.get(), 10.0);
    assert_eq!(steps.get(), 3);
    assert!(!engine.contains(id));
}

#[test]
fn incremental_loops_accumulate_change() {
    let mut engine = linear_engine();
    let x = Rc::new(Cell::new(0.0f32));
    let tween = to(Accessor::cell(&x), 10.0, 1.0)
        .expect("tween")
        .with_loops(3, LoopType::Incremental)
        .with_auto_kill(false);
    let id = engine.add(tween).expect("add");

    engine.goto(id, 1.5, false);
    assert_relative_eq!(x.get(), 15.0);
    engine.goto(id, 3.0, false);
    assert_eq!(x.get(), 30.0);
}

#[test]
fn infinite_loops_never_complete() {
    let mut engine = linear_engine();
    let x = Rc::new(Cell::new(0.0f32));
    let tween = to(Accessor::cell(&x), 1.0, 1.0)
        .expect("tween")
        .with_infinite_loops(LoopType::Yoyo);
    let id = engine.add(tween).expect("add");

    for _ in 0..40 {
        engine.update(0.3);
    }
    assert!(engine.contains(id));
    assert_eq!(engine.complete(id), 0);
    assert_eq!(
        engine.status(id).map(|s| s.state),
        Some(PlaybackState::Playing)
    );
}

#[test]
fn relative_end_is_offset_from_captured_start() {
    let mut engine = linear_engine();
    let x = Rc::new(Cell::new(4.0f32));
    engine
        .add(to(Accessor::cell(&x), 6.0, 1.0).expect("tween").relative())
        .expect("add");
    engine.update(0.5);
    assert_relative_eq!(x.get(), 7.0);
    engine.update(0.5);
    assert_eq!(x.get(), 10.0);
}

#[test]
fn explicit_start_overrides_the_getter() {
    let mut engine = linear_engine();
    let x = Rc::new(Cell::new(100.0f32));
    engine
        .add(to(Accessor::cell(&x), 10.0, 1.0).expect("tween").with_start(0.0))
        .expect("add");
    engine.update(0.25);
    assert_relative_eq!(x.get(), 2.5);
}

#[test]
fn callbacks_fire_in_lifecycle_order() {
    let mut engine = linear_engine();
    let x = Rc::new(Cell::new(0.0f32));
    let log = Rc::new(RefCell::new(Vec::new()));
    let push = |name: &'static str| {
        let log = Rc::clone(&log);
        move || log.borrow_mut().push(name)
    };
    let tween = to(Accessor::cell(&x), 1.0, 1.0)
        .expect("tween")
        .on_play(push("play"))
        .on_start(push("start"))
        .on_update(push("update"))
        .on_step_complete(push("step"))
        .on_complete(push("complete"))
        .on_kill(push("kill"));
    engine.add(tween).expect("add");

    engine.update(2.0);
    assert_eq!(
        *log.borrow(),
        vec!["play", "start", "update", "step", "complete", "kill"]
    );
}

#[test]
fn time_scales_multiply() {
    let mut engine = linear_engine();
    engine.set_time_scale(2.0);
    let x = Rc::new(Cell::new(0.0f32));
    let tween = to(Accessor::cell(&x), 8.0, 4.0)
        .expect("tween")
        .with_time_scale(0.5);
    engine.add(tween).expect("add");

    engine.update(1.0);
    assert_relative_eq!(x.get(), 2.0);
    engine.update(-5.0);
    assert_relative_eq!(x.get(), 2.0);
}

#[test]
fn invalid_settings_are_rejected_at_creation() {
    let x = Rc::new(Cell::new(0.0f32));
    assert!(to(Accessor::cell(&x), 1.0, 0.0).is_err());
    assert!(to(Accessor::cell(&x), 1.0, f32::NAN).is_err());

    let mut engine = linear_engine();
    let bad_delay = to(Accessor::cell(&x), 1.0, 1.0)
        .expect("tween")
        .with_delay(-1.0);
    let err = engine.add(bad_delay).unwrap_err();
    assert_eq!(err.category(), "configuration");
    assert!(engine.is_empty());
}

#[test]
fn default_ease_comes_from_config() {
    let mut engine = TweenEngine::default();
    let x = Rc::new(Cell::new(0.0f32));
    let id = engine
        .add(to(Accessor::cell(&x), 1.0, 1.0).expect("tween").paused())
        .expect("add");
    assert_eq!(engine.core(id).map(|c| c.ease().clone()), Some(Ease::OutQuad));
    engine.goto(id, 0.5, false);
    assert_relative_eq!(x.get(), 0.75);
}

#[test]
fn seeking_to_the_end_matches_natural_completion() {
    for (loops, loop_type) in [
        (1, LoopType::Restart),
        (3, LoopType::Restart),
        (2, LoopType::Yoyo),
        (3, LoopType::Yoyo),
        (3, LoopType::Incremental),
    ] {
        for ease in [Ease::Linear, Ease::OutBack, Ease::InOutElastic] {
            let run = Rc::new(Cell::new(1.0f32));
            let seek = Rc::new(Cell::new(1.0f32));
            let build = |cell: &Rc<Cell<f32>>| {
                to(Accessor::cell(cell), 4.0, 0.5)
                    .expect("tween")
                    .with_loops(loops, loop_type)
                    .with_ease(ease.clone())
                    .with_auto_kill(false)
            };
            let mut engine = TweenEngine::default();
            engine.add(build(&run)).expect("add");
            let seek_id = engine.add(build(&seek).paused()).expect("add");
            for _ in 0..100 {
                engine.update(0.07);
            }
            engine.goto(seek_id, 0.0, false);
            engine.goto(seek_id, 0.5 * loops as f32, false);
            assert_relative_eq!(run.get(), seek.get(), epsilon = 1e-5);
        }
    }
}

#[test]
fn completed_and_killed_playables_no_longer_match_their_target() {
    let mut engine = linear_engine();
    let x = Rc::new(Cell::new(0.0f32));
    let id = engine
        .add(to(Accessor::cell(&x), 10.0, 2.0).expect("tween").with_target(5u64))
        .expect("add");
    engine.goto(id, 1.0, false);
    assert_relative_eq!(x.get(), 5.0);
    assert_eq!(engine.complete(glide_core::TargetRef::new(5)), 1);
    assert_eq!(x.get(), 10.0);
    assert_eq!(engine.play(glide_core::TargetRef::new(5)), 0);
}

#[test]
fn infinite_loops_keep_moving_far_into_the_timeline() {
    let mut engine = linear_engine();
    let x = Rc::new(Cell::new(0.0f32));
    let tween = to(Accessor::cell(&x), 1.0, 1.0)
        .expect("tween")
        .with_infinite_loops(LoopType::Restart);
    let id = engine.add(tween).expect("add");

    engine.goto(id, 600000.25, true);
    assert_relative_eq!(x.get(), 0.25);
    for _ in 0..30 {
        engine.update(1.0 / 60.0);
    }
    assert_relative_eq!(x.get(), 0.75, epsilon = 1e-3);
    assert_eq!(engine.status(id).map(|s| s.completed_loops), Some(600000));
}

#[test]
fn infinite_yoyo_keeps_its_direction_after_a_long_seek() {
    let mut engine = linear_engine();
    let x = Rc::new(Cell::new(0.0f32));
    let tween = to(Accessor::cell(&x), 1.0, 1.0)
        .expect("tween")
        .with_infinite_loops(LoopType::Yoyo);
    let id = engine.add(tween).expect("add");

    engine.goto(id, 1001.5, true);
    assert_relative_eq!(x.get(), 0.5);
    engine.update(0.25);
    assert_relative_eq!(x.get(), 0.25, epsilon = 1e-4);
    engine.update(0.5);
    assert_relative_eq!(x.get(), 0.25, epsilon = 1e-4);
}
