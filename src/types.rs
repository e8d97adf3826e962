//! Core machine vocabulary: symbols, moves, track operations and actions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a machine state
pub type StateName = String;

/// Name of the sink state every unspecified transition leads to
pub const INVALID_STATE: &str = "invalid";

/// Halt message of the sink state unless the caller provides one
pub const INVALID_MESSAGE: &str = "Invalid State, halting";

/// A tape symbol from the fixed three-symbol alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    Zero,
    One,
    Blank,
}

impl Symbol {
    /// The alphabet in canonical scan order
    pub const ALPHABET: [Symbol; 3] = [Symbol::Zero, Symbol::One, Symbol::Blank];

    /// Character drawn on the display for this symbol
    pub fn as_char(self) -> char {
        match self {
            Symbol::Zero => '0',
            Symbol::One => '1',
            Symbol::Blank => '#',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Symbol::Zero),
            '1' => Some(Symbol::One),
            '#' => Some(Symbol::Blank),
            _ => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Head movement applied to a track after writing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Move {
    Left,
    Right,
    Stay,
}

impl Move {
    pub fn as_char(self) -> char {
        match self {
            Move::Left => 'L',
            Move::Right => 'R',
            Move::Stay => 'N',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'L' => Some(Move::Left),
            'R' => Some(Move::Right),
            'N' => Some(Move::Stay),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One of the two tape tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Track {
    First,
    Second,
}

impl Track {
    pub const BOTH: [Track; 2] = [Track::First, Track::Second];

    /// 1-based index, also the display line the track is drawn on
    pub fn index(self) -> u16 {
        match self {
            Track::First => 1,
            Track::Second => 2,
        }
    }
}

/// Write-then-move operation on a single track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackOp {
    pub write: Symbol,
    pub shift: Move,
}

impl TrackOp {
    pub fn new(write: Symbol, shift: Move) -> Self {
        Self { write, shift }
    }

    /// Write a blank without moving
    pub fn idle() -> Self {
        Self::new(Symbol::Blank, Move::Stay)
    }
}

impl fmt::Display for TrackOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.write, self.shift)
    }
}

/// The two symbols currently under the heads, track 1 first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolPair(pub Symbol, pub Symbol);

impl SymbolPair {
    /// All nine pairs in canonical scan order
    pub fn all() -> impl Iterator<Item = SymbolPair> {
        Symbol::ALPHABET
            .into_iter()
            .flat_map(|a| Symbol::ALPHABET.into_iter().map(move |b| SymbolPair(a, b)))
    }

    pub fn get(self, track: Track) -> Symbol {
        match track {
            Track::First => self.0,
            Track::Second => self.1,
        }
    }
}

impl fmt::Display for SymbolPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

/// Output of one transition: next state plus one operation per track
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action {
    pub next: StateName,
    pub tracks: [TrackOp; 2],
}

impl Action {
    pub fn new(next: impl Into<StateName>, first: TrackOp, second: TrackOp) -> Self {
        Self {
            next: next.into(),
            tracks: [first, second],
        }
    }

    /// The action inserted for every transition the machine leaves unspecified
    pub fn invalid() -> Self {
        Self::new(INVALID_STATE, TrackOp::idle(), TrackOp::idle())
    }

    pub fn op(&self, track: Track) -> TrackOp {
        match track {
            Track::First => self.tracks[0],
            Track::Second => self.tracks[1],
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.next, self.tracks[0], self.tracks[1])
    }
}
