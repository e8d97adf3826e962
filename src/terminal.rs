//! Terminal formatting backend
//!
//! Pure functions producing the control sequences the artifacts are made of.
//! Nothing here knows about machine states; callers supply symbols, moves and
//! display geometry. The strings are consumed byte-for-byte by the external
//! driver, so their layout must not drift.

use crate::types::{Move, Symbol, Track, TrackOp};

/// Display line carrying the prompt and status messages
pub const STATUS_LINE: u16 = 3;

/// Default number of columns a track spans
pub const DEFAULT_WIDTH: u16 = 120;

/// Footer appended to every halt message
pub const HALT_FOOTER: &str = "Press ^C to close";

const ESC: &str = "\x1b";

pub fn clear() -> String {
    format!("{ESC}[2J")
}

pub fn clear_line() -> String {
    format!("{ESC}[2K")
}

pub fn move_cursor(row: u16, col: u16) -> String {
    format!("{ESC}[{row};{col}H")
}

/// Copy the rectangle `(top, left)-(bottom, right)` so its corner lands on `(row, col)`
pub fn copy_rect(top: u16, left: u16, bottom: u16, right: u16, row: u16, col: u16) -> String {
    format!("{ESC}[{top};{left};{bottom};{right};1;{row};{col};1$v")
}

/// Reply the terminal sends for a checksum request over a cell holding `symbol`
///
/// The checksum is the 16-bit two's complement of the character code.
pub fn checksum_reply(symbol: Symbol, track: Track) -> String {
    let negsum = 0x10000u32 - symbol.as_char() as u32;
    format!("{ESC}P{}!~{:04X}{ESC}\\", track.index(), negsum)
}

/// Both dispatch keys for a symbol pair, track-1-first ordering first
pub fn dispatch_keys(first: Symbol, second: Symbol) -> [String; 2] {
    let one = checksum_reply(first, Track::First);
    let two = checksum_reply(second, Track::Second);
    [format!("{one}{two}"), format!("{two}{one}")]
}

/// Display geometry shared by every rendered artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminal {
    width: u16,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

impl Terminal {
    pub fn new(width: u16) -> Self {
        Self { width }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    /// Column of the tape heads
    pub fn head_column(&self) -> u16 {
        self.width / 2
    }

    /// Ask the terminal for the checksum of the cell under a track's head
    pub fn request_checksum(&self, track: Track) -> String {
        let line = track.index();
        let head = self.head_column();
        format!("{ESC}[{line};1;{line};{head};{line};{head}*y")
    }

    /// Slide the track window so the head ends up one cell further right
    pub fn shift_right(&self, track: Track) -> String {
        let line = track.index();
        let mut out = copy_rect(line, 2, line, self.width, line, 1);
        out.push_str(&move_cursor(line, self.width));
        out.push(Symbol::Blank.as_char());
        out
    }

    /// Slide the track window so the head ends up one cell further left
    pub fn shift_left(&self, track: Track) -> String {
        let line = track.index();
        let mut out = copy_rect(line, 1, line, self.width - 1, line, 2);
        out.push_str(&move_cursor(line, 1));
        out.push(Symbol::Blank.as_char());
        out
    }

    /// Write under the head of one track, then shift its window
    pub fn write_track(&self, track: Track, op: TrackOp) -> String {
        let mut out = move_cursor(track.index(), self.head_column());
        out.push(op.write.as_char());
        out.push_str(&move_cursor(STATUS_LINE, 1));
        match op.shift {
            Move::Left => out.push_str(&self.shift_left(track)),
            Move::Right => out.push_str(&self.shift_right(track)),
            Move::Stay => {}
        }
        out
    }

    fn request_both(&self) -> String {
        let mut out = move_cursor(STATUS_LINE, 1);
        for track in Track::BOTH {
            out.push_str(&self.request_checksum(track));
        }
        out
    }

    /// One machine step: write and move both tracks, then re-request both checksums
    pub fn step_program(&self, ops: [TrackOp; 2]) -> String {
        let mut out = String::new();
        for (track, op) in Track::BOTH.into_iter().zip(ops) {
            out.push_str(&self.write_track(track, op));
        }
        out.push_str(&self.request_both());
        out
    }

    pub fn halt_program(&self, message: &str) -> String {
        format!(
            "{}{:30}{}{}{}",
            move_cursor(STATUS_LINE, 1),
            message,
            move_cursor(STATUS_LINE + 1, 1),
            HALT_FOOTER,
            move_cursor(STATUS_LINE + 2, 1),
        )
    }

    /// Clear the display, paint two blank tracks and show the prompt
    pub fn init_program(&self, prompt: &str) -> String {
        let blank: String = std::iter::repeat(Symbol::Blank.as_char())
            .take(self.width as usize)
            .collect();
        let mut out = clear();
        for track in Track::BOTH {
            out.push_str(&move_cursor(track.index(), 1));
            out.push_str(&blank);
        }
        out.push_str(&move_cursor(STATUS_LINE, 1));
        out.push_str(prompt);
        out.push_str(&move_cursor(Track::First.index(), self.head_column()));
        out
    }

    /// Marker written after the operator's first input so the first read looks like any other
    pub fn post_init_program(&self) -> String {
        let mut out = move_cursor(STATUS_LINE, self.head_column());
        out.push_str(&clear_line());
        out.push('^');
        out.push_str(&self.request_both());
        out
    }
}
