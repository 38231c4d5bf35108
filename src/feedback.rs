//! Sound cue dispatch
//!
//! The simulation never plays audio itself. It records [`GameEvent`]s, and the
//! frame loop hands them to a [`FeedbackSink`] after each tick. Playback is
//! fire-and-forget: sinks never report back into the game.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Blade swish when a fruit is sliced
    Swish,
    /// Run ended
    GameOver,
}

impl SoundEffect {
    /// Sound cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Slice { .. } => Some(SoundEffect::Swish),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::Escalation { .. } | GameEvent::Restart => None,
        }
    }

    /// Asset the audio player should load for this cue
    pub fn asset(&self) -> &'static str {
        match self {
            SoundEffect::Swish => "asset/airswish.wav",
            SoundEffect::GameOver => "asset/gameover.wav",
        }
    }
}

/// Anything that consumes sound cues
pub trait FeedbackSink {
    fn play(&mut self, effect: SoundEffect);

    /// Forward the cues for a batch of events
    fn dispatch(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}

/// Sink that drops every cue (muted)
#[derive(Debug, Default)]
pub struct Silent;

impl FeedbackSink for Silent {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Sink that records cues, for tests and replays
#[derive(Debug, Default)]
pub struct Recorder {
    pub played: Vec<SoundEffect>,
}

impl FeedbackSink for Recorder {
    fn play(&mut self, effect: SoundEffect) {
        self.played.push(effect);
    }
}

/// Sink that forwards cues to a player on another thread
#[derive(Debug)]
pub struct ChannelFeedback {
    tx: Sender<SoundEffect>,
}

impl ChannelFeedback {
    pub fn new(tx: Sender<SoundEffect>) -> Self {
        Self { tx }
    }
}

impl FeedbackSink for ChannelFeedback {
    fn play(&mut self, effect: SoundEffect) {
        // Player gone means audio is off; the game carries on
        if self.tx.send(effect).is_err() {
            log::warn!("Sound player disconnected, dropping {:?}", effect);
        }
    }
}

/// Run `player` on its own thread and return a sink feeding it. The thread
/// exits once the sink is dropped.
pub fn spawn_player<F>(mut player: F) -> (ChannelFeedback, thread::JoinHandle<()>)
where
    F: FnMut(SoundEffect) + Send + 'static,
{
    let (tx, rx): (Sender<SoundEffect>, Receiver<SoundEffect>) = mpsc::channel();
    let handle = thread::spawn(move || {
        for effect in rx {
            player(effect);
        }
    });
    (ChannelFeedback::new(tx), handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use std::sync::{Arc, Mutex};

    fn sample_events() -> Vec<GameEvent> {
        vec![
            GameEvent::Slice {
                slot: 0,
                pos: Vec2::new(1.0, 2.0),
                score: 1,
            },
            GameEvent::Escalation {
                score: 10,
                fruits: 2,
                respawn_delay: 0.9,
            },
            GameEvent::GameOver { slot: 0, score: 10 },
            GameEvent::Restart,
        ]
    }

    #[test]
    fn test_event_mapping() {
        let mut recorder = Recorder::default();
        recorder.dispatch(&sample_events());
        assert_eq!(recorder.played, vec![SoundEffect::Swish, SoundEffect::GameOver]);
        assert_eq!(SoundEffect::Swish.asset(), "asset/airswish.wav");
    }

    #[test]
    fn test_channel_player_receives_cues() {
        let heard = Arc::new(Mutex::new(Vec::new()));
        let sink_heard = Arc::clone(&heard);
        let (mut sink, handle) =
            spawn_player(move |effect| sink_heard.lock().unwrap().push(effect));

        sink.dispatch(&sample_events());
        drop(sink);
        handle.join().unwrap();

        assert_eq!(*heard.lock().unwrap(), vec![SoundEffect::Swish, SoundEffect::GameOver]);
    }

    #[test]
    fn test_disconnected_player_is_harmless() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut sink = ChannelFeedback::new(tx);
        sink.play(SoundEffect::Swish);

        let mut silent = Silent;
        silent.dispatch(&sample_events());
    }
}
