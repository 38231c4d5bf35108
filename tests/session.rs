use fruit_slice::feedback::{FeedbackSink, Recorder, SoundEffect};
use fruit_slice::sim::{
    Command, Fruit, FruitState, GameEvent, GamePhase, GameState, TickInput, tick,
};
use fruit_slice::{PhysicsMode, Settings};
use glam::Vec2;

const DT: f32 = 1.0 / 30.0;

/// Settings with smoothing off so the tracked point lands exactly on the input
fn sharp_settings() -> Settings {
    Settings {
        smoothing: 0.0,
        ..Settings::default()
    }
}

/// Run one frame and forward its events to the recorder
fn frame(state: &mut GameState, input: &TickInput, recorder: &mut Recorder) -> Vec<GameEvent> {
    tick(state, input, DT);
    let events = state.drain_events();
    recorder.dispatch(&events);
    events
}

#[test]
fn test_full_session() {
    let mut state = GameState::new(sharp_settings(), 2024);
    let mut recorder = Recorder::default();
    let mut escalations = Vec::new();

    // Chase the first live fruit until the last rule has fired
    for _ in 0..3000 {
        let target = state.fruits.iter().find(|f| f.is_alive()).map(|f| f.pos);
        let events = frame(&mut state, &TickInput::with_fingertip(target), &mut recorder);
        escalations.extend(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::Escalation { .. }))
                .copied(),
        );
        assert_eq!(state.phase, GamePhase::Playing);
        if state.score >= 45 {
            break;
        }
    }

    assert!(state.score >= 45);
    assert_eq!(state.fruits.len(), 4);
    assert_eq!(state.spawner.respawn_delay(), 0.65);
    assert_eq!(escalations.len(), 3);
    assert!(matches!(escalations[0], GameEvent::Escalation { score: 10, fruits: 2, .. }));
    assert!(matches!(escalations[2], GameEvent::Escalation { score: 40, fruits: 4, .. }));
    assert_eq!(recorder.played.len() as u64, state.score);
    assert!(recorder.played.iter().all(|e| *e == SoundEffect::Swish));

    // Dead slots never carry a negative timer
    for f in &state.fruits {
        if let FruitState::Respawning { timer } = f.state {
            assert!(timer >= 0.0);
        }
    }

    // Hand leaves; with nothing slicing, a fruit soon drops out
    state.trail.clear();
    let final_score = state.score;
    let mut game_over_events = 0;
    for _ in 0..600 {
        let events = frame(&mut state, &TickInput::default(), &mut recorder);
        game_over_events += events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        if state.is_game_over() {
            break;
        }
    }
    assert!(state.is_game_over());
    assert_eq!(game_over_events, 1);
    assert_eq!(state.score, final_score);
    assert_eq!(recorder.played.last(), Some(&SoundEffect::GameOver));

    // Frozen until restart, even with the hand back over a fruit
    let snapshot: Vec<Vec2> = state.fruits.iter().map(|f| f.pos).collect();
    for _ in 0..10 {
        let target = state.fruits.iter().find(|f| f.is_alive()).map(|f| f.pos);
        frame(&mut state, &TickInput::with_fingertip(target), &mut recorder);
    }
    let after: Vec<Vec2> = state.fruits.iter().map(|f| f.pos).collect();
    assert_eq!(snapshot, after);
    assert_eq!(state.score, final_score);

    let restart = TickInput {
        fingertip: None,
        command: Some(Command::Restart),
    };
    let events = frame(&mut state, &restart, &mut recorder);
    assert_eq!(events, vec![GameEvent::Restart]);
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.score, 0);
    assert!(state.trail.is_empty());
    assert_eq!(state.fruits.len(), 1);
    assert_eq!(state.spawner.respawn_delay(), 0.85);
    assert_eq!(state.spawner.next_threshold(), Some(10));
}

#[test]
fn test_scaled_physics_is_frame_rate_independent() {
    let settings = Settings {
        physics: PhysicsMode::Scaled { nominal_dt: DT },
        ..Settings::default()
    };
    let launch = Fruit {
        pos: Vec2::new(320.0, 475.0),
        vel: Vec2::new(0.0, -22.0),
        angle: 0.0,
        spin: 0.0,
        state: FruitState::Alive,
        appearance: 0,
    };

    // One second of flight at 30 fps and at 60 fps
    let mut slow = launch.clone();
    for _ in 0..30 {
        slow.step(DT, &settings);
    }
    let mut fast = launch.clone();
    for _ in 0..60 {
        fast.step(DT / 2.0, &settings);
    }
    assert!((slow.pos.y - fast.pos.y).abs() < 10.0);

    // Frame-coupled mode runs twice as fast at 60 fps
    let coupled = Settings::default();
    let mut fast = launch.clone();
    for _ in 0..60 {
        fast.step(DT / 2.0, &coupled);
    }
    assert!((slow.pos.y - fast.pos.y).abs() > 100.0);
}
