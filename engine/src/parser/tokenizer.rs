//! Single-pass CSV record tokenizer.
//!
//! Walks the text once, switching between four states:
//!
//! ```text
//!              ┌──── blank ────┐
//!              ▼               │
//!        ┌────────────┐ ───────┘      '"'      ┌───────────────┐
//!   ┌──▶ │ FieldStart │ ────────────────────▶ │ InQuotedField │ ◀─┐ '""'
//!   │    └────────────┘                       └───────────────┘ ──┘
//!   │          │ other                               │ '"'
//!   │          ▼                                     ▼
//!   │  ┌─────────────────┐                    ┌────────────┐
//!   │  │ InUnquotedField │                    │ AfterQuote │
//!   │  └─────────────────┘                    └────────────┘
//!   │          │ ',' / EOL                           │ ',' / EOL
//!   └──────────┴─────────────────────────────────────┘
//! ```
//!
//! Field separator is `,`, record separator any of `\n`, `\r`, `\r\n`.
//! Nothing here can fail: an unterminated quote swallows the rest of the input.

use std::iter::Peekable;
use std::str::Chars;

const FIELD_SEPARATOR: char = ',';
const QUOTE: char = '"';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    FieldStart,
    InQuotedField,
    InUnquotedField,
    AfterQuote,
}

/// A field as read from the text, with quotes removed and `""` unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub value: String,
    pub quoted: bool,
}

/// One record: the fields between two line breaks.
pub type Record = Vec<Field>;

/// Returns true for a record made of nothing but an empty unquoted field,
/// i.e. a blank line.
pub fn is_blank(record: &[Field]) -> bool {
    matches!(record, [only] if !only.quoted && only.value.is_empty())
}

fn is_blank_char(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Iterator over the records of a CSV text.
pub struct Tokenizer<'a> {
    chars: Peekable<Chars<'a>>,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            finished: false,
        }
    }

    /// Consume the `\n` of a `\r\n` pair.
    fn eat_crlf_tail(&mut self) {
        if self.chars.peek() == Some(&'\n') {
            self.chars.next();
        }
    }
}

/// Accumulates the current field. Blanks seen outside quotes are held back
/// until a non-blank character proves they are not trailing.
#[derive(Default)]
struct FieldBuffer {
    value: String,
    pending_blanks: String,
    quoted: bool,
}

impl FieldBuffer {
    fn push(&mut self, c: char) {
        if !self.pending_blanks.is_empty() {
            self.value.push_str(&self.pending_blanks);
            self.pending_blanks.clear();
        }
        self.value.push(c);
    }

    fn push_blank(&mut self, c: char) {
        self.pending_blanks.push(c);
    }

    fn take(&mut self) -> Field {
        self.pending_blanks.clear();
        Field {
            value: std::mem::take(&mut self.value),
            quoted: std::mem::replace(&mut self.quoted, false),
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        if self.finished {
            return None;
        }

        let mut record = Record::new();
        let mut field = FieldBuffer::default();
        let mut state = State::FieldStart;
        let mut consumed = false;

        loop {
            let Some(c) = self.chars.next() else {
                self.finished = true;
                if !consumed {
                    return None;
                }
                record.push(field.take());
                return Some(record);
            };
            consumed = true;

            match state {
                State::FieldStart => match c {
                    c if is_blank_char(c) => {}
                    QUOTE => {
                        field.quoted = true;
                        state = State::InQuotedField;
                    }
                    FIELD_SEPARATOR => record.push(field.take()),
                    '\r' | '\n' => {
                        if c == '\r' {
                            self.eat_crlf_tail();
                        }
                        record.push(field.take());
                        return Some(record);
                    }
                    c => {
                        field.push(c);
                        state = State::InUnquotedField;
                    }
                },

                State::InUnquotedField | State::AfterQuote => match c {
                    FIELD_SEPARATOR => {
                        record.push(field.take());
                        state = State::FieldStart;
                    }
                    '\r' | '\n' => {
                        if c == '\r' {
                            self.eat_crlf_tail();
                        }
                        record.push(field.take());
                        return Some(record);
                    }
                    c if is_blank_char(c) => field.push_blank(c),
                    c => field.push(c),
                },

                State::InQuotedField => match c {
                    QUOTE if self.chars.peek() == Some(&QUOTE) => {
                        self.chars.next();
                        field.value.push(QUOTE);
                    }
                    QUOTE => state = State::AfterQuote,
                    c => field.value.push(c),
                },
            }
        }
    }
}
