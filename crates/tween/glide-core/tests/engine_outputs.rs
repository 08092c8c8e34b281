use std::cell::Cell;
use std::rc::Rc;

use glide_core::shortcuts::to;
use glide_core::{
    Accessor, Config, Ease, PlaybackState, TweenEngine, TweenEvent, TweenId, TweenSettings,
    TweenStatus,
};

fn init_tracing() {
    let default_filter = "glide_core=trace";
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

#[test]
fn config_loads_from_json_with_defaults() {
    let cfg = Config::from_json_str(
        r#"{ "default_ease": "InOutSine", "default_auto_kill": false, "max_events_per_tick": 8 }"#,
    )
    .expect("config");
    assert_eq!(cfg.default_ease, Ease::InOutSine);
    assert!(!cfg.default_auto_kill);
    assert_eq!(cfg.time_scale, 1.0);

    let err = Config::from_json_str("{ nope").unwrap_err();
    assert_eq!(err.category(), "serialization");
}

#[test]
fn config_defaults_apply_only_to_unset_settings() {
    let mut engine = TweenEngine::new(Config {
        default_auto_kill: false,
        ..Config::default()
    });
    let x = Rc::new(Cell::new(0.0f32));
    let keep = engine
        .add(to(Accessor::cell(&x), 1.0, 1.0).expect("tween"))
        .expect("add");
    let drop = engine
        .add(
            to(Accessor::cell(&x), 1.0, 1.0)
                .expect("tween")
                .with_auto_kill(true),
        )
        .expect("add");
    engine.update(2.0);
    assert!(engine.contains(keep));
    assert!(!engine.contains(drop));
}

#[test]
fn paused_playables_wait_for_play() {
    let mut engine = TweenEngine::default();
    let x = Rc::new(Cell::new(0.0f32));
    let id = engine
        .add(to(Accessor::cell(&x), 1.0, 1.0).expect("tween").paused())
        .expect("add");
    let outputs = engine.update(0.5);
    assert!(outputs.is_empty());
    assert_eq!(x.get(), 0.0);
    assert_eq!(engine.playing_count(), 0);

    assert_eq!(engine.play(id), 1);
    let events: Vec<_> = engine.update(0.5).events_for(id).cloned().collect();
    assert_eq!(
        events,
        vec![TweenEvent::Played { id }, TweenEvent::Started { id }]
    );
    assert_eq!(engine.playing_count(), 1);
}

#[test]
fn callbacks_queue_commands_for_the_tick_boundary() {
    init_tracing();
    let mut engine = TweenEngine::default();
    let queue = engine.commands();
    let (a, b) = (Rc::new(Cell::new(0.0f32)), Rc::new(Cell::new(0.0f32)));

    let b_tween = to(Accessor::cell(&b), 1.0, 1.0).expect("tween").paused();
    let b_id = engine.add(b_tween).expect("add");
    let a_tween = to(Accessor::cell(&a), 1.0, 1.0)
        .expect("tween")
        .on_complete(move || queue.play(b_id));
    engine.add(a_tween).expect("add");

    let outputs = engine.update(1.0);
    assert!(outputs.events.contains(&TweenEvent::Played { id: b_id }));
    assert_eq!(engine.status(b_id).map(|s| s.state), Some(PlaybackState::Playing));
    assert_eq!(b.get(), 0.0);
    engine.update(1.0);
    assert_eq!(b.get(), 1.0);
}

#[test]
fn spawned_playables_register_after_the_advance() {
    let mut engine = TweenEngine::default();
    let queue = engine.commands();
    let spawned: Rc<Cell<Option<TweenId>>> = Rc::new(Cell::new(None));
    let slot = Rc::clone(&spawned);
    let (a, b) = (Rc::new(Cell::new(0.0f32)), Rc::new(Cell::new(0.0f32)));
    let a_tween = to(Accessor::cell(&a), 1.0, 1.0)
        .expect("tween")
        .on_complete(move || {
            let next = to(Accessor::cell(&b), 5.0, 1.0).expect("tween");
            slot.set(Some(queue.spawn(next)));
        });
    let a_id = engine.add(a_tween).expect("add");

    engine.update(1.0);
    let b_id = spawned.get().expect("spawned");
    assert_ne!(a_id, b_id);
    assert!(engine.contains(b_id));
    assert!(!engine.contains(a_id));
    assert_eq!(engine.commands().pending(), 0);

    engine.update(2.0);
    assert!(engine.is_empty());
}

#[test]
fn events_are_capped_per_tick() {
    let mut engine = TweenEngine::new(Config {
        max_events_per_tick: 3,
        ..Config::default()
    });
    let cells: Vec<_> = (0..4).map(|_| Rc::new(Cell::new(0.0f32))).collect();
    for cell in &cells {
        engine
            .add(to(Accessor::cell(cell), 1.0, 1.0).expect("tween"))
            .expect("add");
    }
    assert_eq!(engine.update(0.1).events.len(), 3);
    assert_eq!(engine.update(0.1).events.len(), 0);
}

#[test]
fn status_snapshot_serializes() {
    let mut engine = TweenEngine::default();
    let x = Rc::new(Cell::new(0.0f32));
    let id = engine
        .add(
            to(Accessor::cell(&x), 1.0, 2.0)
                .expect("tween")
                .with_delay(0.5)
                .with_target(3u64),
        )
        .expect("add");
    engine.update(1.0);

    let status = engine.status(id).expect("status");
    assert_eq!(status.state, PlaybackState::Playing);
    assert_eq!(status.delay, 0.5);
    assert_eq!(status.position, 0.5);
    let json = serde_json::to_string(&status).expect("serialize");
    let back: TweenStatus = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, status);
    assert!(engine.status(TweenId(77)).is_none());
}

#[test]
fn dropping_the_engine_releases_callbacks() {
    let x = Rc::new(Cell::new(0.0f32));
    let witness = Rc::new(());
    {
        let mut engine = TweenEngine::default();
        let queue = engine.commands();
        let held = Rc::clone(&witness);
        let tween = to(Accessor::cell(&x), 1.0, 1.0)
            .expect("tween")
            .on_complete(move || {
                let _ = &held;
                queue.kill(glide_core::Filter::All, false);
            });
        engine.add(tween).expect("add");
        assert_eq!(Rc::strong_count(&witness), 2);
    }
    assert_eq!(Rc::strong_count(&witness), 1);
}
