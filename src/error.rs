//! Diagnostics reported by the lexer.
//!
//! The lexer never fails outright: malformed input is recovered from locally and reported as a
//! [`Diagnostic`] carrying a [`ErrorKind`] and exactly one named [`Span`]. See the crate-level
//! docs for the recovery philosophy.

use crate::span::Span;

/// The full taxonomy of conditions the lexer can report.
///
/// Every variant is recoverable: reporting one never stops the lexer from producing a token
/// for the input that triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// A `/* ...` block comment with no matching `*/`.
    #[error("unterminated block comment")]
    UnclosedBlockComment,
    /// A `'...`/`"..."` string with no matching closing quote before a line terminator or EOF.
    #[error("unterminated string literal")]
    UnclosedStringLiteral,
    /// A `` `...`` `` template with no matching closing backtick before EOF.
    #[error("unterminated template literal")]
    UnclosedTemplate,
    /// A `/.../ ` regular expression with no matching closing slash before EOF.
    #[error("unterminated regular expression literal")]
    UnclosedRegexpLiteral,
    /// A `\u` or `\u{` escape inside an identifier with no terminating digits/`}` before EOF.
    #[error("unterminated identifier escape sequence")]
    UnclosedIdentifierEscapeSequence,
    /// `0b`/`0B` with no binary digits following.
    #[error("binary number literal has no digits")]
    NoDigitsInBinaryNumber,
    /// `0o`/`0O` with no octal digits following.
    #[error("octal number literal has no digits")]
    NoDigitsInOctalNumber,
    /// `0x`/`0X` with no hex digits following.
    #[error("hex number literal has no digits")]
    NoDigitsInHexNumber,
    /// Trailing identifier-part bytes after a fully-scanned decimal number.
    #[error("unexpected characters in number literal")]
    UnexpectedCharactersInNumber,
    /// Trailing identifier-part bytes after a fully-scanned binary number.
    #[error("unexpected characters in binary number literal")]
    UnexpectedCharactersInBinaryNumber,
    /// `8`/`9`/`.`, or other trailing garbage, following `0o` digits.
    #[error("unexpected characters in octal number literal")]
    UnexpectedCharactersInOctalNumber,
    /// Trailing identifier-part bytes after a fully-scanned hex number.
    #[error("unexpected characters in hex number literal")]
    UnexpectedCharactersInHexNumber,
    /// A legacy octal literal (e.g. `0123`) followed by a decimal point.
    #[error("octal literal may not have a decimal point")]
    OctalLiteralMayNotHaveDecimal,
    /// A legacy octal literal followed by an exponent part.
    #[error("octal literal may not have an exponent")]
    OctalLiteralMayNotHaveExponent,
    /// A legacy octal literal followed by a `n` BigInt suffix.
    #[error("octal literal may not be a BigInt")]
    OctalLiteralMayNotBeBigInt,
    /// A `n` BigInt suffix on a literal that also has a decimal point.
    #[error("BigInt literal contains a decimal point")]
    BigIntLiteralContainsDecimalPoint,
    /// A `n` BigInt suffix on a literal that also has an exponent part.
    #[error("BigInt literal contains an exponent")]
    BigIntLiteralContainsExponent,
    /// Two or more `_` digit separators in a row.
    #[error("number literal contains consecutive underscores")]
    NumberLiteralContainsConsecutiveUnderscores,
    /// A `_` digit separator at the start or end of a digit run.
    #[error("number literal contains a trailing underscore")]
    NumberLiteralContainsTrailingUnderscores,
    /// A `\u`/`\u{` escape whose digits are missing, non-hex, or (for `{...}`) unterminated.
    #[error("expected hex digits in unicode escape")]
    ExpectedHexDigitsInUnicodeEscape,
    /// A `\u{H...}` escape whose value exceeds `U+10FFFF`.
    #[error("escaped code point in identifier is out of range")]
    EscapedCodePointInIdentifierOutOfRange,
    /// A decoded escape whose code point is not legal at its position in the identifier.
    #[error("escaped character is disallowed in identifiers")]
    EscapedCharacterDisallowedInIdentifiers,
    /// A raw (non-escaped) code point that is not legal at its position in the identifier.
    #[error("character is disallowed in identifiers")]
    CharacterDisallowedInIdentifiers,
    /// A `\` inside an identifier that is not followed by `u`.
    #[error("unexpected backslash in identifier")]
    UnexpectedBackslashInIdentifier,
    /// A reserved keyword spelled with at least one `\u` escape.
    #[error("keywords cannot contain escape sequences")]
    KeywordsCannotContainEscapeSequences,
    /// A `\u` escape among a regular expression's trailing flag characters.
    #[error("regular expression literal flags cannot contain unicode escapes")]
    RegexpLiteralFlagsCannotContainUnicodeEscapes,
    /// A malformed UTF-8 byte sequence, coalesced over the maximal invalid run.
    #[error("invalid UTF-8 sequence")]
    InvalidUtf8Sequence,
    /// A `#` that is not the start of a line-0 shebang.
    #[error("unexpected '#' character")]
    UnexpectedHashCharacter,
    /// A stray `@` encountered outside of any token.
    #[error("unexpected '@' character")]
    UnexpectedAtCharacter,
    /// A stray ASCII control character encountered outside of any token.
    #[error("unexpected control character")]
    UnexpectedControlCharacter,
}

/// A single reported problem: a [`kind`](Self::kind), and the one named span identifying the
/// offending bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostic {
    kind: ErrorKind,
    field: &'static str,
    span: Span,
}

impl Diagnostic {
    #[must_use]
    pub fn new(kind: ErrorKind, field: &'static str, span: Span) -> Self {
        Self { kind, field, span }
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The name of the span field, e.g. `"escape_sequence"` or `"comment_open"`.
    #[inline]
    #[must_use]
    pub fn field(&self) -> &'static str {
        self.field
    }

    #[inline]
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }
}

/// The sink diagnostics are reported to.
///
/// The lexer holds a borrowed `&mut dyn DiagnosticSink` and never retains diagnostics itself;
/// implementors are expected to be append-only and synchronous.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// A [`DiagnosticSink`] that discards everything reported to it.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDiagnosticSink;

impl DiagnosticSink for NullDiagnosticSink {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}
