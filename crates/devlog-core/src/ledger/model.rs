//! Session ledger domain model.
//!
//! The ledger is a text log with one line per session: `<n>` while the
//! session is open and `<n> end` once it has been closed. Only the last line
//! matters for deciding what may happen next, so the whole ledger collapses
//! into a [`LedgerState`].

use crate::error::{DevlogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker token appended to a ledger line when its session ends.
pub const END_MARKER: &str = "end";

/// Lifecycle phase of the most recent session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Started,
    Ended,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Started => write!(f, "started"),
            Phase::Ended => write!(f, "ended"),
        }
    }
}

/// A requested ledger transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Begin,
    End,
}

/// One parsed ledger line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerEntry {
    pub session: u32,
    pub phase: Phase,
}

impl LedgerEntry {
    pub fn started(session: u32) -> Self {
        Self {
            session,
            phase: Phase::Started,
        }
    }

    pub fn ended(session: u32) -> Self {
        Self {
            session,
            phase: Phase::Ended,
        }
    }

    /// Parses a single ledger line.
    ///
    /// `line_no` is only used for error reporting (1-based).
    pub fn parse(line: &str, line_no: usize) -> Result<Self> {
        let mut tokens = line.split_whitespace();

        let number = tokens
            .next()
            .ok_or_else(|| DevlogError::corrupt_ledger(line_no, line, "empty line"))?;
        let session: u32 = number.parse().map_err(|_| {
            DevlogError::corrupt_ledger(line_no, line, "not a session number")
        })?;

        let phase = match tokens.next() {
            None => Phase::Started,
            Some(END_MARKER) => Phase::Ended,
            Some(other) => {
                return Err(DevlogError::corrupt_ledger(
                    line_no,
                    line,
                    format!("unexpected token '{other}'"),
                ));
            }
        };

        if tokens.next().is_some() {
            return Err(DevlogError::corrupt_ledger(line_no, line, "trailing tokens"));
        }

        // Session 0 only exists as the `0 end` seed.
        if session == 0 && phase == Phase::Started {
            return Err(DevlogError::corrupt_ledger(
                line_no,
                line,
                "session 0 cannot be open",
            ));
        }

        Ok(Self { session, phase })
    }
}

impl fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.phase {
            Phase::Started => write!(f, "{}", self.session),
            Phase::Ended => write!(f, "{} {}", self.session, END_MARKER),
        }
    }
}

/// The whole ledger, reduced to what the start/end guard needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    pub last_session: u32,
    pub phase: Phase,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self::initial()
    }
}

impl LedgerState {
    /// State of a ledger with no entries: session 0, already ended.
    pub fn initial() -> Self {
        Self {
            last_session: 0,
            phase: Phase::Ended,
        }
    }

    /// Derives the state from full ledger text using its last non-blank line.
    pub fn from_ledger_text(text: &str) -> Result<Self> {
        let last = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .last();

        match last {
            None => Ok(Self::initial()),
            Some((idx, line)) => Ok(LedgerEntry::parse(line, idx + 1)?.into()),
        }
    }

    pub fn is_open(&self) -> bool {
        self.phase == Phase::Started
    }

    /// Number the next `Begin` would allocate.
    pub fn next_session(&self) -> Result<u32> {
        self.last_session.checked_add(1).ok_or_else(|| {
            DevlogError::protocol(format!(
                "session numbers exhausted: session {} is the last one",
                self.last_session
            ))
        })
    }

    /// Validates a transition and returns the resulting state.
    pub fn apply(self, transition: Transition) -> Result<Self> {
        match (transition, self.phase) {
            (Transition::Begin, Phase::Started) => Err(DevlogError::protocol(format!(
                "session already open: session {} must be ended first",
                self.last_session
            ))),
            (Transition::Begin, Phase::Ended) => Ok(Self {
                last_session: self.next_session()?,
                phase: Phase::Started,
            }),
            (Transition::End, Phase::Ended) => Err(DevlogError::protocol(
                "no open session: start a session before ending one",
            )),
            (Transition::End, Phase::Started) => Ok(Self {
                last_session: self.last_session,
                phase: Phase::Ended,
            }),
        }
    }
}

impl From<LedgerEntry> for LedgerState {
    fn from(entry: LedgerEntry) -> Self {
        Self {
            last_session: entry.session,
            phase: entry.phase,
        }
    }
}
