//! Feedback sinks and the log-and-swallow dispatcher.

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use tracing::{debug, warn};

use crate::cues::CueSet;
use crate::types::FeedbackEvent;

/// Terminal bell control character.
const BEL: u8 = 0x07;

/// Something that can play a feedback cue.
pub trait FeedbackSink {
    fn play(&mut self, event: FeedbackEvent) -> Result<()>;
}

/// Play every event on `sink`, logging and swallowing failures.
///
/// Returns the number of events that failed.
pub fn dispatch<S, I>(sink: &mut S, events: I) -> usize
where
    S: FeedbackSink + ?Sized,
    I: IntoIterator<Item = FeedbackEvent>,
{
    let mut failed = 0;
    for event in events {
        match sink.play(event) {
            Ok(()) => debug!(event = event.as_str(), "cue played"),
            Err(err) => {
                failed += 1;
                warn!(event = event.as_str(), error = %format!("{err:#}"), "cue failed");
            }
        }
    }
    failed
}

/// Terminal feedback: the bell stands in for haptics.
///
/// With a [`CueSet`] configured, every sound cue is resolved first so a
/// missing asset surfaces as an error (and thus a log line).
pub struct TerminalFeedback<W: Write> {
    out: W,
    bell: bool,
    cues: Option<CueSet>,
}

impl TerminalFeedback<io::Stdout> {
    pub fn stdout(bell: bool, cues: Option<CueSet>) -> Self {
        Self::new(io::stdout(), bell, cues)
    }
}

impl<W: Write> TerminalFeedback<W> {
    pub fn new(out: W, bell: bool, cues: Option<CueSet>) -> Self {
        Self { out, bell, cues }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FeedbackSink for TerminalFeedback<W> {
    fn play(&mut self, event: FeedbackEvent) -> Result<()> {
        if let Some(cues) = &self.cues {
            cues.resolve(event)?;
        }

        if self.bell && event == FeedbackEvent::Haptic {
            self.out.write_all(&[BEL]).context("ringing terminal bell")?;
            self.out.flush().context("flushing terminal bell")?;
        }
        Ok(())
    }
}

/// Discards every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn play(&mut self, _event: FeedbackEvent) -> Result<()> {
        Ok(())
    }
}

/// Records cues in order; optionally fails a chosen event.
#[derive(Debug, Clone, Default)]
pub struct RecordingFeedback {
    pub played: Vec<FeedbackEvent>,
    pub fail_on: Option<FeedbackEvent>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(event: FeedbackEvent) -> Self {
        Self {
            played: Vec::new(),
            fail_on: Some(event),
        }
    }

    pub fn count(&self, event: FeedbackEvent) -> usize {
        self.played.iter().filter(|e| **e == event).count()
    }
}

impl FeedbackSink for RecordingFeedback {
    fn play(&mut self, event: FeedbackEvent) -> Result<()> {
        if self.fail_on == Some(event) {
            bail!("cue engine unavailable for {}", event.as_str());
        }
        self.played.push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bell_rings_only_for_haptic() {
        let mut sink = TerminalFeedback::new(Vec::new(), true, None);
        sink.play(FeedbackEvent::CorrectTap).unwrap();
        sink.play(FeedbackEvent::WrongTap).unwrap();
        sink.play(FeedbackEvent::Haptic).unwrap();
        sink.play(FeedbackEvent::Victory).unwrap();
        assert_eq!(sink.into_inner(), vec![BEL]);
    }

    #[test]
    fn bell_can_be_disabled() {
        let mut sink = TerminalFeedback::new(Vec::new(), false, None);
        sink.play(FeedbackEvent::Haptic).unwrap();
        assert!(sink.into_inner().is_empty());
    }

    #[test]
    fn dispatch_swallows_failures_and_keeps_going() {
        let mut sink = RecordingFeedback::failing_on(FeedbackEvent::WrongTap);
        let failed = dispatch(
            &mut sink,
            [
                FeedbackEvent::CorrectTap,
                FeedbackEvent::WrongTap,
                FeedbackEvent::Haptic,
            ],
        );
        assert_eq!(failed, 1);
        assert_eq!(
            sink.played,
            vec![FeedbackEvent::CorrectTap, FeedbackEvent::Haptic]
        );
    }

    #[test]
    fn missing_assets_fail_but_still_ring() {
        let cues = CueSet::new(std::env::temp_dir().join("tui-recall-no-such-dir"));
        let mut sink = TerminalFeedback::new(Vec::new(), true, Some(cues));

        let failed = dispatch(&mut sink, [FeedbackEvent::WrongTap, FeedbackEvent::Haptic]);
        assert_eq!(failed, 1);
        assert_eq!(sink.into_inner(), vec![BEL]);
    }

    #[test]
    fn null_feedback_accepts_everything() {
        let mut sink = NullFeedback;
        assert_eq!(dispatch(&mut sink, [FeedbackEvent::Victory]), 0);
    }
}
