use super::timer::Countdown;

/// Audio substrate for the marker's brush sound
pub trait AudioSink {
    /// Start the clip from the beginning
    fn play_once(&mut self);

    fn is_playing(&self) -> bool;

    /// Clip duration in seconds
    fn clip_length(&self) -> f32;

    /// Advance playback (optional, for sinks driven by the tick loop)
    fn update(&mut self, _delta: f32) {}
}

/// Simulated clip whose playback lasts `clip_length` seconds of ticks
#[derive(Debug, Clone)]
pub struct ClipPlayer {
    playback: Countdown,
    plays: u32,
}

impl ClipPlayer {
    pub fn new(clip_length: f32) -> Self {
        Self {
            playback: Countdown::new(clip_length),
            plays: 0,
        }
    }

    /// Number of times playback was started
    pub fn play_count(&self) -> u32 {
        self.plays
    }
}

impl AudioSink for ClipPlayer {
    fn play_once(&mut self) {
        self.playback.start();
        self.plays += 1;
    }

    fn is_playing(&self) -> bool {
        self.playback.is_active()
    }

    fn clip_length(&self) -> f32 {
        self.playback.duration()
    }

    fn update(&mut self, delta: f32) {
        self.playback.tick(delta);
    }
}
