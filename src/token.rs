//! The [`Token`] and [`TokenKind`] produced by the lexer.
//!
//! A token only ever borrows from its source indirectly: it stores byte offsets, not a slice, so
//! it stays `Copy` and outlives any particular borrow of the [`SourceBuffer`](crate::source::SourceBuffer)
//! it was read from. Looking up text (currently only meaningful for identifiers, see
//! [`Token::identifier_name`]) requires the buffer again.

use crate::keyword::Keyword;
use crate::punctuator::Punctuator;
use crate::source::SourceBuffer;
use crate::span::Span;

/// The kind of a [`Token`]; see the crate-level docs for the full taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// The synthetic final token; `begin == end` at the logical end of the source.
    EndOfFile,
    /// An identifier. Escapes, if any, have already been normalized in place (see
    /// [`Token::identifier_name`]).
    Identifier,
    /// A reserved or contextual keyword. Never produced for a spelling that contained a `\u`
    /// escape; see [`crate::error::ErrorKind::KeywordsCannotContainEscapeSequences`].
    Keyword(Keyword),
    /// A numeric literal in any of the recognized bases, BigInt or not. No value is computed.
    Number,
    /// A single- or double-quoted string literal. No escape interpretation is performed.
    String,
    /// A regular expression literal, produced only via [`crate::Lexer::reparse_as_regexp`].
    Regexp,
    /// A template literal (or its tail) with no further substitution: `` `...` `` or `` }...` ``.
    CompleteTemplate,
    /// A template literal (or its head/middle) immediately followed by `${`.
    IncompleteTemplate,
    /// One of the fixed punctuators, recognized by maximal munch.
    Punctuator(Punctuator),
}

/// A lexical token: a [`kind`](Self::kind), a byte [`span`](Self::span), and whether a line
/// terminator preceded it.
///
/// Cheap to copy; see the module docs for why it does not borrow from the source directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    begin: u32,
    end: u32,
    has_leading_newline: bool,
    /// End of the normalized identifier name, for [`TokenKind::Identifier`] tokens whose
    /// spelling contained a `\u` escape. Equal to `end` for every other token.
    normalized_end: u32,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, begin: u32, end: u32, has_leading_newline: bool) -> Self {
        Self {
            kind,
            begin,
            end,
            has_leading_newline,
            normalized_end: end,
        }
    }

    /// Overrides the normalized-name end for an identifier whose spelling was rewritten in
    /// place. See [`crate::source::SourceBuffer::splice_and_pad`].
    pub(crate) fn with_normalized_end(mut self, normalized_end: u32) -> Self {
        self.normalized_end = normalized_end;
        self
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn span(&self) -> Span {
        Span::new(self.begin, self.end)
    }

    #[inline]
    #[must_use]
    pub fn begin(&self) -> u32 {
        self.begin
    }

    #[inline]
    #[must_use]
    pub fn end(&self) -> u32 {
        self.end
    }

    /// `true` iff a line terminator was skipped between the previous token's end and this
    /// token's begin, including line terminators inside an intervening block comment.
    #[inline]
    #[must_use]
    pub fn has_leading_newline(&self) -> bool {
        self.has_leading_newline
    }

    /// The identifier's normalized name: for an escape-free spelling this is simply
    /// `[begin, end)`; for a spelling that contained a `\u` escape, the lexer rewrote the
    /// decoded code points in place starting at `begin` and padded the remainder of
    /// `[begin, end)` with ASCII spaces, so this returns the shorter prefix before the padding.
    ///
    /// # Panics
    ///
    /// Panics if `self.kind() != TokenKind::Identifier`.
    #[must_use]
    pub fn identifier_name<'a>(&self, buffer: &'a SourceBuffer) -> &'a str {
        assert!(
            matches!(self.kind, TokenKind::Identifier),
            "identifier_name() called on a {:?} token",
            self.kind
        );
        buffer.slice(Span::new(self.begin, self.normalized_end))
    }
}
