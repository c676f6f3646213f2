// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Stand-alone whitespace trimming.
//!
//! A [`Trimmer`] watches one run of literal text (the bytes between two tags)
//! and decides how much of it may be removed when the tag on either side of
//! the run turns out to be stand-alone:
//!
//! - the **left** decision covers the tail of the line the *previous* tag
//!   sits on: whitespace up to and including the first line break;
//! - the **right** decision covers the head of the line the *next* tag sits
//!   on: whitespace after the last line break.
//!
//! The trimmer only reports what *may* be trimmed. Whether a tag actually is
//! stand-alone depends on the runs on both sides of it and is decided by the
//! parser.
//!
//! ```rust
//! use stache::trimmer::{Boundary, RunCursor, TrimDecision, Trimmer};
//!
//! let text = b"  \nABC\n  ";
//! let mut trimmer = Trimmer::new();
//! for offset in 0..text.len() {
//!     trimmer.advance(&RunCursor::new(text, 0, offset));
//! }
//! assert_eq!(trimmer.left_decision(), TrimDecision::AllowTrim(Boundary::line(2)));
//! assert_eq!(trimmer.right_decision(), TrimDecision::AllowTrim(Boundary::line(7)));
//! ```

/// Read access to the scanner position while a literal run is consumed.
pub trait TextCursor {
    /// Absolute offset of the current byte in the template source.
    fn offset(&self) -> usize;
    /// Absolute offset where the current literal run starts.
    fn block_start(&self) -> usize;
    /// The byte at [`offset`](Self::offset).
    fn current(&self) -> u8;
}

/// A minimal [`TextCursor`] over a byte slice.
#[derive(Debug, Clone, Copy)]
pub struct RunCursor<'s> {
    source: &'s [u8],
    block_start: usize,
    offset: usize,
}

impl<'s> RunCursor<'s> {
    /// Creates a cursor positioned at `offset` inside a run starting at `block_start`.
    pub fn new(source: &'s [u8], block_start: usize, offset: usize) -> Self {
        Self {
            source,
            block_start,
            offset,
        }
    }
}

impl TextCursor for RunCursor<'_> {
    fn offset(&self) -> usize {
        self.offset
    }

    fn block_start(&self) -> usize {
        self.block_start
    }

    fn current(&self) -> u8 {
        self.source[self.offset]
    }
}

/// Where a permitted trim stops (left) or starts (right), relative to the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    /// Run-relative byte offset.
    ///
    /// For a left decision this is the last byte removed (the line feed of
    /// the first line break). For a right decision it is the first byte
    /// removed.
    pub index: usize,
    /// `false` when the run holds no line break at all and is whitespace
    /// only. Such a run may only be trimmed if what precedes it (for a right
    /// trim) independently starts a line.
    pub at_line_break: bool,
}

impl Boundary {
    /// A boundary anchored at a line break.
    pub const fn line(index: usize) -> Self {
        Self {
            index,
            at_line_break: true,
        }
    }

    /// The start of a whitespace-only run with no line break.
    pub const fn run_start() -> Self {
        Self {
            index: 0,
            at_line_break: false,
        }
    }
}

/// The trimming verdict for one side of a literal run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimDecision {
    /// Nothing on this side may be removed.
    Preserve,
    /// Bytes up to (left) or from (right) the boundary may be removed.
    AllowTrim(Boundary),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LeftState {
    Scanning,
    NotFound,
    Found(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RightState {
    Waiting,
    NotFound,
    Found(usize),
}

/// Per-run trimming state machine.
///
/// Feed every byte of the run, in order, through [`advance`](Self::advance),
/// then read the two decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trimmer {
    pending_cr: bool,
    left: LeftState,
    right: RightState,
}

impl Default for Trimmer {
    fn default() -> Self {
        Self::new()
    }
}

impl Trimmer {
    /// Creates the state for a fresh literal run.
    pub const fn new() -> Self {
        Self {
            pending_cr: false,
            left: LeftState::Scanning,
            right: RightState::Waiting,
        }
    }

    /// Consumes the byte under `cursor`.
    pub fn advance<C: TextCursor + ?Sized>(&mut self, cursor: &C) {
        let at = cursor.offset() - cursor.block_start();
        let byte = cursor.current();

        if self.pending_cr {
            self.pending_cr = false;
            if byte == b'\n' {
                self.line_break(at);
                return;
            }
            // a lone carriage return is content, not a terminator
            self.content();
        }

        match byte {
            b'\r' => self.pending_cr = true,
            b'\n' => self.line_break(at),
            b' ' | b'\t' => {}
            _ => self.content(),
        }
    }

    fn line_break(&mut self, at: usize) {
        if self.left == LeftState::Scanning {
            self.left = LeftState::Found(at);
        }
        self.right = RightState::Found(at);
    }

    fn content(&mut self) {
        match self.left {
            LeftState::Scanning => self.left = LeftState::NotFound,
            _ => {
                if self.right != RightState::Waiting {
                    self.right = RightState::NotFound;
                }
            }
        }
    }

    /// Whether the run's head, through its first line break, may be trimmed.
    pub fn left_decision(&self) -> TrimDecision {
        match self.left {
            LeftState::Scanning | LeftState::NotFound => TrimDecision::Preserve,
            LeftState::Found(index) => TrimDecision::AllowTrim(Boundary::line(index)),
        }
    }

    /// Whether the run's tail, after its last line break, may be trimmed.
    pub fn right_decision(&self) -> TrimDecision {
        if self.pending_cr {
            return TrimDecision::Preserve;
        }
        match self.right {
            RightState::Found(index) => TrimDecision::AllowTrim(Boundary::line(index + 1)),
            RightState::NotFound => TrimDecision::Preserve,
            RightState::Waiting => {
                if self.left == LeftState::Scanning {
                    TrimDecision::AllowTrim(Boundary::run_start())
                } else {
                    TrimDecision::Preserve
                }
            }
        }
    }

    /// Runs a trimmer over a whole run of `source` and returns it.
    pub fn scan(source: &[u8], start: usize, end: usize) -> Self {
        let mut trimmer = Self::new();
        for offset in start..end {
            trimmer.advance(&RunCursor::new(source, start, offset));
        }
        trimmer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Trimmer {
        Trimmer::scan(text.as_bytes(), 0, text.len())
    }

    #[test]
    fn test_leading_and_trailing_lines() {
        let text = "  \nABC\n  ";
        let trimmer = scan(text);

        assert_eq!(
            trimmer.left_decision(),
            TrimDecision::AllowTrim(Boundary::line(2))
        );
        assert_eq!(
            trimmer.right_decision(),
            TrimDecision::AllowTrim(Boundary::line(7))
        );
        assert_eq!(&text[3..7], "ABC\n");
    }

    #[test]
    fn test_content_on_both_ends_preserves() {
        let trimmer = scan("   ABC\nABC   ");
        assert_eq!(trimmer.left_decision(), TrimDecision::Preserve);
        assert_eq!(trimmer.right_decision(), TrimDecision::Preserve);
    }

    #[test]
    fn test_whitespace_only_run() {
        let trimmer = scan("   ");
        assert_eq!(trimmer.left_decision(), TrimDecision::Preserve);
        assert_eq!(
            trimmer.right_decision(),
            TrimDecision::AllowTrim(Boundary::run_start())
        );
    }

    #[test]
    fn test_content_then_line_break() {
        let trimmer = scan("|\n");
        assert_eq!(trimmer.left_decision(), TrimDecision::Preserve);
        assert_eq!(
            trimmer.right_decision(),
            TrimDecision::AllowTrim(Boundary::line(2))
        );
    }

    #[test]
    fn test_empty_run_is_whitespace_only() {
        let trimmer = scan("");
        assert_eq!(trimmer.left_decision(), TrimDecision::Preserve);
        assert_eq!(
            trimmer.right_decision(),
            TrimDecision::AllowTrim(Boundary::run_start())
        );
    }

    #[test]
    fn test_crlf_is_one_terminator() {
        let trimmer = scan(" \r\nA\r\n ");
        assert_eq!(
            trimmer.left_decision(),
            TrimDecision::AllowTrim(Boundary::line(2))
        );
        assert_eq!(
            trimmer.right_decision(),
            TrimDecision::AllowTrim(Boundary::line(6))
        );
    }

    #[test]
    fn test_lone_carriage_return_is_content() {
        let trimmer = scan(" \r ");
        assert_eq!(trimmer.left_decision(), TrimDecision::Preserve);
        assert_eq!(trimmer.right_decision(), TrimDecision::Preserve);

        let trailing = scan("\n \r");
        assert_eq!(trailing.right_decision(), TrimDecision::Preserve);
    }

    #[test]
    fn test_later_line_break_reopens_right_trim() {
        let trimmer = scan("\nx\n\t");
        assert_eq!(
            trimmer.left_decision(),
            TrimDecision::AllowTrim(Boundary::line(0))
        );
        assert_eq!(
            trimmer.right_decision(),
            TrimDecision::AllowTrim(Boundary::line(3))
        );

        let closed = scan("\nx\n y");
        assert_eq!(closed.right_decision(), TrimDecision::Preserve);
    }

    #[test]
    fn test_offsets_are_relative_to_block_start() {
        let source = b"abc  \n  ";
        let trimmer = Trimmer::scan(source, 3, source.len());
        assert_eq!(
            trimmer.left_decision(),
            TrimDecision::AllowTrim(Boundary::line(2))
        );
        assert_eq!(
            trimmer.right_decision(),
            TrimDecision::AllowTrim(Boundary::line(3))
        );
    }
}
