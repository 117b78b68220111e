//! Boundary traits for the external collaborators
//!
//! Rendering, audio, and the warp visual effect live outside this engine.
//! The mediators talk to them through these traits; mock implementations
//! in [`test_utils`] record calls for assertions, and the stock
//! implementations here are enough for headless hosts.

use glam::Vec2;

use crate::models::constants::SECTOR_EDGE;
use crate::models::coordinates::Coordinates;

/// Sound cues the engine emits. Fire-and-forget; the engine never reads
/// anything back from the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    ImpulseEngine,
    WarpEngine,
    EnemyMove,
    Blocked,
    Docking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

/// Trait for the audio collaborator.
pub trait SoundSink {
    fn play(&mut self, sound: Sound);
}

/// Trait for the message console the player sees.
pub trait Console {
    fn notify(&mut self, severity: Severity, message: &str);
}

/// Trait for the timed warp visual effect. The engine holds no timers of
/// its own; the helm mediator polls this once per tick while a warp is
/// pending.
pub trait WarpEffect {
    fn is_complete(&self) -> bool;
}

/// Translation between grid cells and render-space pixel positions.
pub trait ScreenMap {
    /// Screen-space center of a sector.
    fn screen_position(&self, coordinates: Coordinates) -> Vec2;
    /// Inverse mapping. Unchecked: the result may be off-grid, callers
    /// gate with `Coordinates::valid`.
    fn sector_coordinates(&self, point: Vec2) -> Coordinates;
}

/// Uniform grid layout: `origin` is the top-left corner of sector (0,0),
/// every sector is `sector_edge` screen units square.
#[derive(Debug, Clone, Copy)]
pub struct LinearScreenMap {
    origin: Vec2,
    sector_edge: f32,
}

impl LinearScreenMap {
    pub fn new(origin: Vec2, sector_edge: f32) -> Self {
        LinearScreenMap {
            origin,
            sector_edge,
        }
    }
}

impl Default for LinearScreenMap {
    fn default() -> Self {
        LinearScreenMap::new(Vec2::ZERO, SECTOR_EDGE)
    }
}

impl ScreenMap for LinearScreenMap {
    fn screen_position(&self, coordinates: Coordinates) -> Vec2 {
        self.origin
            + Vec2::new(
                (coordinates.x as f32 + 0.5) * self.sector_edge,
                (coordinates.y as f32 + 0.5) * self.sector_edge,
            )
    }

    fn sector_coordinates(&self, point: Vec2) -> Coordinates {
        let local = (point - self.origin) / self.sector_edge;
        Coordinates::new(local.x.floor() as i32, local.y.floor() as i32)
    }
}

/// No-op audio sink for hosts without sound.
#[derive(Debug, Default)]
pub struct SilentSound;

impl SoundSink for SilentSound {
    fn play(&mut self, _sound: Sound) {}
}

/// Console that prints to stdout, for terminal hosts.
#[derive(Debug, Default)]
pub struct TerminalConsole;

impl Console for TerminalConsole {
    fn notify(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => println!("{}", message),
            Severity::Warning => println!("*** {} ***", message),
        }
    }
}

/// Warp effect that is always finished — for hosts without the animation.
#[derive(Debug, Default)]
pub struct InstantEffect;

impl WarpEffect for InstantEffect {
    fn is_complete(&self) -> bool {
        true
    }
}

pub mod test_utils {
    //! Recording collaborators for tests and headless drivers.

    use std::cell::Cell;

    use super::*;

    #[derive(Debug, Default)]
    pub struct RecordingSound {
        pub played: Vec<Sound>,
    }

    impl RecordingSound {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl SoundSink for RecordingSound {
        fn play(&mut self, sound: Sound) {
            self.played.push(sound);
        }
    }

    #[derive(Debug, Default)]
    pub struct RecordingConsole {
        pub messages: Vec<(Severity, String)>,
    }

    impl RecordingConsole {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl Console for RecordingConsole {
        fn notify(&mut self, severity: Severity, message: &str) {
            self.messages.push((severity, message.to_string()));
        }
    }

    /// Effect that completes after a fixed number of polls.
    #[derive(Debug)]
    pub struct CountdownEffect {
        polls_remaining: Cell<u32>,
    }

    impl CountdownEffect {
        pub fn new(polls: u32) -> Self {
            CountdownEffect {
                polls_remaining: Cell::new(polls),
            }
        }
    }

    impl WarpEffect for CountdownEffect {
        fn is_complete(&self) -> bool {
            let remaining = self.polls_remaining.get();
            if remaining == 0 {
                return true;
            }
            self.polls_remaining.set(remaining - 1);
            false
        }
    }
}
