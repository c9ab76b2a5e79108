use anyhow::{Result, anyhow};
use netguessr_types::{GuessResult, Subject};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Idle,            // Nothing to guess (first load, or the last fetch failed)
    AwaitingSubject, // Subject request in flight
    Ready,           // Subject shown, guess accepted
    Submitting,      // Guess request in flight
    Resolved,        // Verdict shown, waiting for skip/next
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoundPhase::Idle => "idle",
            RoundPhase::AwaitingSubject => "awaiting subject",
            RoundPhase::Ready => "ready",
            RoundPhase::Submitting => "submitting",
            RoundPhase::Resolved => "resolved",
        };
        f.write_str(name)
    }
}

/// One guess-the-net-worth round as the player sees it.
///
/// The submit lock is the phase itself: a guess is only accepted in
/// [`RoundPhase::Ready`], and the only way back to `Ready` is a fresh
/// subject fetch. That makes every round one-shot.
#[derive(Debug, Clone)]
pub struct Round {
    pub phase: RoundPhase,
    pub subject: Option<Subject>,
    pub last_result: Option<GuessResult>,
}

impl Round {
    pub fn new() -> Self {
        Self {
            phase: RoundPhase::Idle,
            subject: None,
            last_result: None,
        }
    }

    /// A subject request is going out. Allowed from any phase so that
    /// skip/next always work as a retry.
    pub fn begin_fetch(&mut self) {
        self.last_result = None;
        self.phase = RoundPhase::AwaitingSubject;
        tracing::debug!("Round awaiting subject");
    }

    pub fn subject_loaded(&mut self, subject: Subject) -> Result<()> {
        if self.phase != RoundPhase::AwaitingSubject {
            return Err(anyhow!("No subject request pending (round is {})", self.phase));
        }

        // Replace, never merge with the previous subject
        self.subject = Some(subject);
        self.phase = RoundPhase::Ready;
        Ok(())
    }

    /// The subject request failed. The previous subject stays on screen.
    pub fn fetch_failed(&mut self) {
        if self.phase == RoundPhase::AwaitingSubject {
            self.phase = RoundPhase::Idle;
        }
    }

    pub fn can_submit(&self) -> bool {
        self.phase == RoundPhase::Ready
    }

    pub fn begin_submit(&mut self) -> Result<()> {
        if !self.can_submit() {
            return Err(anyhow!("Submit is locked (round is {})", self.phase));
        }

        self.phase = RoundPhase::Submitting;
        tracing::debug!("Round submitting guess");
        Ok(())
    }

    pub fn resolve(&mut self, result: GuessResult) -> Result<()> {
        if self.phase != RoundPhase::Submitting {
            return Err(anyhow!("No guess pending (round is {})", self.phase));
        }

        self.last_result = Some(result);
        self.phase = RoundPhase::Resolved;
        Ok(())
    }

    /// The guess request errored before any verdict arrived. Submit stays
    /// locked until the next round; skip/next become available again.
    pub fn abandon_submit(&mut self) {
        if self.phase == RoundPhase::Submitting {
            self.phase = RoundPhase::Idle;
        }
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::new()
    }
}
