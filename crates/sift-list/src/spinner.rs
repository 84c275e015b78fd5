//! Activity spinner shown at the end of the title bar.

use std::time::Duration;

use ratatui::style::{Color, Style};
use sift_core::Command;
use tracing::debug;

use crate::runeutil;

/// Built-in spinner frame sets.
pub mod frames {
    /// Classic ASCII line spinner: |, /, -, \.
    pub const LINE: &[&str] = &["|", "/", "-", "\\"];
    /// Braille dot spinner cycling through ten positions.
    pub const DOTS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    /// Compact braille dot spinner with six frames.
    pub const MINI_DOT: &[&str] = &["⠋", "⠙", "⠸", "⠴", "⠦", "⠇"];
    /// Three-dot pattern with a moving filled dot.
    pub const POINTS: &[&str] = &["∙∙∙", "●∙∙", "∙●∙", "∙∙●"];
    /// Growing ellipsis from empty to three dots.
    pub const ELLIPSIS: &[&str] = &["", ".", "..", "..."];
}

/// Frame interval used by [`Spinner::default`].
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

/// A frame-cycling spinner driven by one-shot tick commands.
///
/// Each [`start`](Spinner::start) bumps a generation id; ticks carry the
/// generation they were scheduled for and stale ones are dropped, so starting
/// twice never doubles the animation speed and a stopped spinner stops
/// rescheduling.
#[derive(Debug, Clone)]
pub struct Spinner {
    frames: &'static [&'static str],
    frame_index: usize,
    interval: Duration,
    style: Style,
    spinning: bool,
    generation: u64,
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spinner {
    /// A stopped spinner using [`frames::LINE`] at a 100ms interval.
    pub fn new() -> Self {
        Self {
            frames: frames::LINE,
            frame_index: 0,
            interval: DEFAULT_INTERVAL,
            style: Style::default().fg(Color::DarkGray),
            spinning: false,
            generation: 0,
        }
    }

    pub fn with_frames(mut self, frames: &'static [&'static str]) -> Self {
        self.set_frames(frames);
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Swap the frame set and restart from its first frame.
    pub fn set_frames(&mut self, frames: &'static [&'static str]) {
        self.frames = frames;
        self.frame_index = 0;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The frame currently shown.
    pub fn frame(&self) -> &'static str {
        self.frames.get(self.frame_index).copied().unwrap_or("")
    }

    /// Columns taken by the widest frame.
    pub fn width(&self) -> usize {
        self.frames
            .iter()
            .map(|f| runeutil::display_width(f))
            .max()
            .unwrap_or(0)
    }

    /// Start animating. The returned command fires the first tick.
    pub fn start<Msg: Send + 'static>(&mut self, on_tick: fn(u64) -> Msg) -> Command<Msg> {
        self.spinning = true;
        self.generation = self.generation.wrapping_add(1);
        debug!(id = self.generation, "spinner started");
        self.schedule(on_tick)
    }

    /// Stop animating. A tick already in flight is ignored when it lands.
    pub fn stop(&mut self) {
        if self.spinning {
            debug!(id = self.generation, "spinner stopped");
        }
        self.spinning = false;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Advance one frame for tick `id` and schedule the next.
    ///
    /// Ticks from an older generation, or that land after
    /// [`stop`](Spinner::stop), do nothing.
    pub fn tick<Msg: Send + 'static>(&mut self, id: u64, on_tick: fn(u64) -> Msg) -> Command<Msg> {
        if !self.spinning || id != self.generation {
            return Command::none();
        }
        if !self.frames.is_empty() {
            self.frame_index = (self.frame_index + 1) % self.frames.len();
        }
        self.schedule(on_tick)
    }

    fn schedule<Msg: Send + 'static>(&self, on_tick: fn(u64) -> Msg) -> Command<Msg> {
        let id = self.generation;
        Command::tick(self.interval, move |_| on_tick(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Tick(u64);

    #[test]
    fn starts_stopped_on_first_frame() {
        let spinner = Spinner::new();
        assert!(!spinner.is_spinning());
        assert_eq!(spinner.frame(), "|");
        assert_eq!(spinner.width(), 1);
    }

    #[test]
    fn ticks_advance_and_wrap() {
        let mut spinner = Spinner::new();
        let _ = spinner.start(Tick);
        let id = spinner.generation();
        let seen: Vec<&str> = (0..5)
            .map(|_| {
                let cmd = spinner.tick(id, Tick);
                assert!(cmd.is_deferred());
                spinner.frame()
            })
            .collect();
        assert_eq!(seen, vec!["/", "-", "\\", "|", "/"]);
    }

    #[test]
    fn stale_tick_is_dropped() {
        let mut spinner = Spinner::new();
        let _ = spinner.start(Tick);
        let old = spinner.generation();
        let _ = spinner.start(Tick);
        assert!(spinner.tick(old, Tick).is_none());
        assert_eq!(spinner.frame(), "|");
    }

    #[test]
    fn tick_after_stop_does_nothing() {
        let mut spinner = Spinner::new();
        let _ = spinner.start(Tick);
        let id = spinner.generation();
        spinner.stop();
        assert!(spinner.tick(id, Tick).is_none());
        assert!(!spinner.is_spinning());
    }

    #[test]
    fn width_covers_widest_frame() {
        let spinner = Spinner::new().with_frames(frames::POINTS);
        assert_eq!(spinner.width(), 3);
        assert_eq!(Spinner::new().with_frames(&[]).frame(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn tick_fires_after_interval() {
        let mut spinner = Spinner::new().with_interval(Duration::from_millis(80));
        let cmd = spinner.start(Tick);
        let start = tokio::time::Instant::now();
        let msg = cmd.into_future().unwrap().await;
        assert_eq!(msg, Tick(spinner.generation()));
        assert!(start.elapsed() >= Duration::from_millis(80));
    }
}
