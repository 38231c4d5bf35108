//! Fruit Slice entry point
//!
//! Headless frame driver. A scripted hand stands in for the camera and the
//! landmark detector, so the full loop (tracking, slicing, escalation, game
//! over and restart) runs without any capture hardware.

use std::error::Error;
use std::f32::consts::TAU;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use fruit_slice::feedback::{self, FeedbackSink, Silent, SoundEffect};
use fruit_slice::landmarks::{self, HandLandmarks, INDEX_TIP, LANDMARK_COUNT, Landmark, WRIST};
use fruit_slice::sim::{
    Command, FrameClock, FrameView, GameEvent, GameState, LoopControl, TickInput, tick,
};
use fruit_slice::Settings;

#[derive(Parser, Debug)]
#[command(name = "fruit-slice")]
#[command(about = "Run the fruit slicing simulation against a scripted hand", long_about = None)]
struct Args {
    /// Settings file (JSON); defaults are used when omitted
    #[arg(long)]
    settings: Option<PathBuf>,

    /// RNG seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Frames to simulate before quitting
    #[arg(long, default_value_t = 3000)]
    frames: u64,

    /// Simulated camera frame rate
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Frames to linger on the game over screen before restarting
    #[arg(long, default_value_t = 60)]
    restart_after: u64,

    /// Print every frame's drawable list as a JSON line on stdout
    #[arg(long, default_value_t = false)]
    dump: bool,

    /// Drop sound cues instead of sending them to the player thread
    #[arg(long, default_value_t = false)]
    mute: bool,
}

/// Stand-in for camera + landmark detector: a hand sweeping figure-eights
/// across the frame with sensor jitter and periodic tracking dropouts
struct ScriptedHand {
    rng: Pcg32,
    phase: f32,
}

impl ScriptedHand {
    /// Frames per dropout cycle and how many of them have no hand
    const DROPOUT_CYCLE: u64 = 90;
    const DROPOUT_FRAMES: u64 = 6;

    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed ^ 0x5eed_4a4d),
            phase: 0.0,
        }
    }

    /// Detections for one frame, in normalized coordinates
    fn detect(&mut self, frame: u64) -> Vec<HandLandmarks> {
        self.phase = (self.phase + 0.09) % TAU;
        if frame % Self::DROPOUT_CYCLE < Self::DROPOUT_FRAMES {
            return Vec::new();
        }

        let jitter = 0.004;
        let tip = Landmark {
            x: 0.5 + 0.42 * self.phase.sin() + self.rng.random_range(-jitter..jitter),
            y: 0.62 + 0.2 * (2.0 * self.phase).sin() + self.rng.random_range(-jitter..jitter),
            z: 0.0,
        };
        let mut points = vec![Landmark::default(); LANDMARK_COUNT];
        points[WRIST] = Landmark {
            x: tip.x,
            y: (tip.y + 0.2).min(1.0),
            z: 0.0,
        };
        points[INDEX_TIP] = tip;
        vec![HandLandmarks::new(points)]
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut settings = Settings::load_or_default(args.settings.as_deref())?;
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    let seed = settings.seed.unwrap_or_else(clock_seed);
    let (width, height, mirror) = (settings.frame_width, settings.frame_height, settings.mirror);

    log::info!("Fruit Slice (headless) starting...");
    log::info!("Game initialized with seed: {}", seed);

    let mut state = GameState::new(settings, seed);
    let mut hand = ScriptedHand::new(seed);
    let mut clock = FrameClock::new();
    let mut best = 0u64;

    let mut player = None;
    let mut sink: Box<dyn FeedbackSink> = if args.mute {
        Box::new(Silent)
    } else {
        let (sink, handle) = feedback::spawn_player(|effect| match effect {
            SoundEffect::Swish => log::debug!("Playing {}", effect.asset()),
            SoundEffect::GameOver => log::info!("Playing {}", effect.asset()),
        });
        player = Some(handle);
        Box::new(sink)
    };

    let mut game_over_frames = 0u64;
    for frame in 0..args.frames {
        let dt = clock.advance(frame as f64 / args.fps);

        let command = if frame + 1 == args.frames {
            Some(Command::Quit)
        } else if state.is_game_over() && game_over_frames >= args.restart_after {
            Some(Command::Restart)
        } else {
            None
        };
        let input = TickInput {
            fingertip: landmarks::fingertip(&hand.detect(frame), width, height, mirror),
            command,
        };

        if tick(&mut state, &input, dt) == LoopControl::Quit {
            break;
        }

        let events = state.drain_events();
        for event in &events {
            if let GameEvent::GameOver { score, .. } = event {
                best = best.max(*score);
            }
        }
        sink.dispatch(&events);

        game_over_frames = if state.is_game_over() { game_over_frames + 1 } else { 0 };

        if args.dump {
            println!("{}", serde_json::to_string(&FrameView::capture(&state))?);
        }
    }

    // The run still going at quit time counts too
    best = best.max(state.score);

    // Closing the channel lets the player thread drain and exit
    drop(sink);
    if let Some(handle) = player {
        if handle.join().is_err() {
            log::warn!("Sound player thread panicked");
        }
    }

    eprintln!("\nRuns played: {}", state.runs);
    eprintln!("Best score: {}", best);

    Ok(())
}
