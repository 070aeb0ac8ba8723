//! The token cursor: the public driver that ties the scanners together.
//!
//! [`Lexer`] owns a mutable borrow of the source buffer for its whole lifetime (see the
//! crate-level docs on identifier normalization) and a borrow of the caller's diagnostic sink.
//! It exposes a tiny cursor API — [`peek`](Lexer::peek), [`skip`](Lexer::skip),
//! [`reparse_as_regexp`](Lexer::reparse_as_regexp), [`skip_in_template`](Lexer::skip_in_template),
//! and [`insert_semicolon`](Lexer::insert_semicolon) — rather than a plain iterator, because
//! regexp/template/ASI all need the caller (a parser) to tell the lexer something about the
//! grammar context it otherwise has no way to infer from bytes alone.

use crate::char_class::{is_decimal_digit, is_stray_ascii_control, is_whitespace};
use crate::error::{Diagnostic, DiagnosticSink, ErrorKind};
use crate::punctuator::Punctuator;
use crate::source::SourceBuffer;
use crate::span::Span;
use crate::token::{Token, TokenKind};
use crate::utf8::{self, Decoded};

/// A lexer over a single source buffer, producing a stream of [`Token`]s and side-channeling
/// diagnostics to `S`.
pub struct Lexer<'b, S: DiagnosticSink> {
    buffer: &'b mut SourceBuffer,
    sink: &'b mut S,
    pos: usize,
    last_token_end: u32,
    current: Token,
    stashed: Option<Token>,
}

impl<'b, S: DiagnosticSink> Lexer<'b, S> {
    /// Builds a lexer over `buffer`, immediately scanning the first token.
    ///
    /// `buffer` is borrowed exclusively for as long as the lexer lives: identifier normalization
    /// (see [`SourceBuffer::splice_and_pad`]) rewrites bytes in place, so nothing else may read or
    /// write the buffer while a `Lexer` exists over it.
    pub fn new(buffer: &'b mut SourceBuffer, sink: &'b mut S) -> Self {
        let mut lexer = Self {
            buffer,
            sink,
            pos: 0,
            last_token_end: 0,
            current: Token::new(TokenKind::EndOfFile, 0, 0, false),
            stashed: None,
        };
        lexer.current = lexer.scan_next_token();
        lexer
    }

    /// The source buffer this lexer was built over.
    #[inline]
    #[must_use]
    pub fn source(&self) -> &SourceBuffer {
        self.buffer
    }

    /// Returns the current token without advancing. Idempotent.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Token {
        self.current
    }

    /// Advances past the current token and returns the new one.
    ///
    /// If [`insert_semicolon`](Self::insert_semicolon) stashed a token, that token becomes current
    /// (no rescanning); otherwise the next token is scanned from the buffer.
    pub fn skip(&mut self) -> Token {
        if let Some(stashed) = self.stashed.take() {
            self.current = stashed;
        } else {
            self.last_token_end = self.current.end();
            self.current = self.scan_next_token();
        }
        self.current
    }

    /// Rewinds to the current token (which must be [`Punctuator::Slash`] or
    /// [`Punctuator::SlashEqual`]) and rescans it as a regexp literal.
    ///
    /// # Panics
    ///
    /// Panics if the current token is not `slash` or `slash_equal`.
    pub fn reparse_as_regexp(&mut self) -> Token {
        let begin = self.current.begin() as usize;
        assert!(
            matches!(
                self.current.kind(),
                TokenKind::Punctuator(Punctuator::Slash) | TokenKind::Punctuator(Punctuator::SlashEqual)
            ),
            "reparse_as_regexp() called with current token {:?}",
            self.current.kind()
        );
        let has_leading_newline = self.current.has_leading_newline();
        self.current = self.scan_regexp(begin, has_leading_newline);
        self.current
    }

    /// Resumes scanning a template literal after the `}` that closed a `${ … }` substitution.
    ///
    /// The current token must be `right_curly`. `template_begin` is the byte offset of the
    /// template's opening `` ` ``; it anchors only the `UnclosedTemplate` error span should this
    /// segment hit EOF. The resulting token's own `begin` is the resume point just past the `}`,
    /// not `template_begin` — a continuation token never reaches back over bytes the head or
    /// substitution tokens already claimed.
    ///
    /// # Panics
    ///
    /// Panics if the current token is not `right_curly`.
    pub fn skip_in_template(&mut self, template_begin: u32) -> Token {
        assert_eq!(
            self.current.kind(),
            TokenKind::Punctuator(Punctuator::RightCurly),
            "skip_in_template() called with current token {:?}",
            self.current.kind()
        );
        self.pos = self.current.end() as usize;
        self.last_token_end = self.current.end();
        // The continuation token begins at the resume point (just past the `}`), not at the
        // opening backtick — `template_begin` is only used to anchor the `UnclosedTemplate` error
        // span to the whole literal.
        self.current = self.scan_template_body(self.pos, template_begin as usize, false);
        self.current
    }

    /// Synthesizes a `semicolon` token at the end of the last consumed token and stashes the
    /// current token so the next [`skip`](Self::skip) restores it untouched.
    pub fn insert_semicolon(&mut self) -> Token {
        let pos = self.last_token_end;
        let semicolon = Token::new(TokenKind::Punctuator(Punctuator::Semicolon), pos, pos, false);
        self.stashed = Some(self.current);
        self.current = semicolon;
        semicolon
    }

    pub(crate) fn report(&mut self, kind: ErrorKind, field: &'static str, span: Span) {
        self.sink.report(Diagnostic::new(kind, field, span));
    }

    /// Skips whitespace and comments, then dispatches the next token. Recovers from stray `#`,
    /// `@`, and control-character bytes by reporting and skipping exactly one byte, so it always
    /// makes progress without ever failing to produce a token.
    fn scan_next_token(&mut self) -> Token {
        let mut has_leading_newline = false;
        loop {
            self.skip_trivia(&mut has_leading_newline);
            let begin = self.pos;

            if begin >= self.buffer.len() {
                return Token::new(TokenKind::EndOfFile, begin as u32, begin as u32, has_leading_newline);
            }

            match self.buffer.byte_at(begin) {
                b'#' => {
                    self.report(
                        ErrorKind::UnexpectedHashCharacter,
                        "character",
                        Span::new(begin as u32, (begin + 1) as u32),
                    );
                    self.pos = begin + 1;
                }
                b'@' => {
                    self.report(
                        ErrorKind::UnexpectedAtCharacter,
                        "character",
                        Span::new(begin as u32, (begin + 1) as u32),
                    );
                    self.pos = begin + 1;
                }
                byte if is_stray_ascii_control(byte) => {
                    self.report(
                        ErrorKind::UnexpectedControlCharacter,
                        "character",
                        Span::new(begin as u32, (begin + 1) as u32),
                    );
                    self.pos = begin + 1;
                }
                _ => return self.dispatch(begin, has_leading_newline),
            }
        }
    }

    /// Advances past whitespace, line/block/HTML-open comments, and (only at offset 0) a
    /// shebang line, setting `*has_leading_newline` if any line terminator is crossed.
    fn skip_trivia(&mut self, has_leading_newline: &mut bool) {
        loop {
            if self.pos == 0 && self.buffer.starts_with(0, b"#!") {
                self.pos += 2;
                self.skip_to_line_terminator_or_eof();
                continue;
            }

            let byte = self.buffer.byte_at(self.pos);

            match byte {
                b' ' | b'\t' | 0x0B | 0x0C => {
                    self.pos += 1;
                }
                b'\n' => {
                    *has_leading_newline = true;
                    self.pos += 1;
                }
                b'\r' => {
                    *has_leading_newline = true;
                    self.pos += 1;
                    if self.buffer.byte_at(self.pos) == b'\n' {
                        self.pos += 1;
                    }
                }
                b'/' if self.buffer.byte_at(self.pos + 1) == b'/' => {
                    self.pos += 2;
                    self.skip_to_line_terminator_or_eof();
                }
                b'/' if self.buffer.byte_at(self.pos + 1) == b'*' => {
                    self.skip_block_comment(has_leading_newline);
                }
                b'<' if self.buffer.starts_with(self.pos, b"<!--") => {
                    self.pos += 4;
                    self.skip_to_line_terminator_or_eof();
                }
                _ if byte >= 0x80 => match utf8::decode(&self.buffer.raw()[self.pos..]) {
                    Decoded::Char { ch, byte_len } if is_whitespace(ch) => {
                        if matches!(ch, '\u{2028}' | '\u{2029}') {
                            *has_leading_newline = true;
                        }
                        self.pos += byte_len as usize;
                    }
                    _ => return,
                },
                _ => return,
            }
        }
    }

    fn skip_block_comment(&mut self, has_leading_newline: &mut bool) {
        let begin = self.pos;
        self.pos += 2;
        loop {
            if self.pos >= self.buffer.len() {
                self.report(
                    ErrorKind::UnclosedBlockComment,
                    "comment_open",
                    Span::new(begin as u32, (begin + 2) as u32),
                );
                return;
            }
            let byte = self.buffer.byte_at(self.pos);
            if byte == b'*' && self.buffer.byte_at(self.pos + 1) == b'/' {
                self.pos += 2;
                return;
            }
            if byte == b'\n' {
                *has_leading_newline = true;
                self.pos += 1;
            } else if byte == b'\r' {
                *has_leading_newline = true;
                self.pos += 1;
                if self.buffer.byte_at(self.pos) == b'\n' {
                    self.pos += 1;
                }
            } else if byte >= 0x80 {
                match utf8::decode(&self.buffer.raw()[self.pos..]) {
                    Decoded::Char { ch, byte_len } => {
                        if matches!(ch, '\u{2028}' | '\u{2029}') {
                            *has_leading_newline = true;
                        }
                        self.pos += byte_len as usize;
                    }
                    Decoded::Invalid { byte_len } => self.pos += byte_len as usize,
                }
            } else {
                self.pos += 1;
            }
        }
    }

    /// Advances to (but not past) the next LF/CR/LS/PS, or to EOF.
    fn skip_to_line_terminator_or_eof(&mut self) {
        loop {
            if self.pos >= self.buffer.len() {
                return;
            }
            let byte = self.buffer.byte_at(self.pos);
            if byte == b'\n' || byte == b'\r' {
                return;
            }
            if byte >= 0x80 {
                match utf8::decode(&self.buffer.raw()[self.pos..]) {
                    Decoded::Char { ch, byte_len } => {
                        if matches!(ch, '\u{2028}' | '\u{2029}') {
                            return;
                        }
                        self.pos += byte_len as usize;
                    }
                    Decoded::Invalid { byte_len } => self.pos += byte_len as usize,
                }
            } else {
                self.pos += 1;
            }
        }
    }

    fn dispatch(&mut self, begin: usize, has_leading_newline: bool) -> Token {
        match self.buffer.byte_at(begin) {
            b'"' | b'\'' => {
                let quote = self.buffer.byte_at(begin);
                self.pos = begin;
                self.scan_string(quote, has_leading_newline)
            }
            b'`' => {
                self.pos = begin + 1;
                self.scan_template_body(begin, begin, has_leading_newline)
            }
            b'0'..=b'9' => {
                self.pos = begin;
                self.scan_number(has_leading_newline)
            }
            b'.' if is_decimal_digit(self.buffer.byte_at(begin + 1)) => {
                self.pos = begin;
                self.scan_number(has_leading_newline)
            }
            _ => {
                if let Some((punctuator, len)) = Punctuator::scan(&self.buffer.raw()[begin..]) {
                    self.pos = begin + len;
                    Token::new(
                        TokenKind::Punctuator(punctuator),
                        begin as u32,
                        self.pos as u32,
                        has_leading_newline,
                    )
                } else {
                    self.pos = begin;
                    self.scan_identifier(has_leading_newline)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyword::Keyword;

    fn tokens(src: &str) -> Vec<TokenKind> {
        let mut buffer = SourceBuffer::from_str(src);
        let mut sink = Vec::new();
        let mut lexer = Lexer::new(&mut buffer, &mut sink);
        let mut kinds = Vec::new();
        loop {
            let tok = lexer.peek();
            kinds.push(tok.kind());
            if tok.kind() == TokenKind::EndOfFile {
                break;
            }
            lexer.skip();
        }
        kinds
    }

    #[test]
    fn block_comment_then_identifier() {
        let mut buffer = SourceBuffer::from_str("/* */ hello");
        let mut sink = Vec::new();
        let mut lexer = Lexer::new(&mut buffer, &mut sink);
        let token = lexer.peek();
        assert_eq!(token.kind(), TokenKind::Identifier);
        assert_eq!(token.identifier_name(lexer.source()), "hello");
        assert!(sink.is_empty());
    }

    #[test]
    fn shebang_at_offset_zero_is_skipped() {
        let mut buffer = SourceBuffer::from_str("#!/usr/bin/env node\nhello");
        let mut sink = Vec::new();
        let mut lexer = Lexer::new(&mut buffer, &mut sink);
        let token = lexer.peek();
        assert_eq!(token.kind(), TokenKind::Identifier);
        assert_eq!(token.identifier_name(lexer.source()), "hello");
        assert!(sink.is_empty());
    }

    #[test]
    fn hash_not_at_offset_zero_is_rejected_but_recovers() {
        let mut buffer = SourceBuffer::from_str("  #!x\n");
        let mut sink = Vec::new();
        let mut lexer = Lexer::new(&mut buffer, &mut sink);
        let token = lexer.peek();
        assert_eq!(token.kind(), TokenKind::Punctuator(Punctuator::Bang));
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].kind(), crate::error::ErrorKind::UnexpectedHashCharacter);
        assert_eq!(sink[0].span(), Span::new(2, 3));
    }

    #[test]
    fn leading_newline_flag_tracks_skipped_terminators() {
        let mut buffer = SourceBuffer::from_str("a\nb");
        let mut sink = Vec::new();
        let mut lexer = Lexer::new(&mut buffer, &mut sink);
        let first = lexer.peek();
        assert!(!first.has_leading_newline());
        lexer.skip();
        let second = lexer.peek();
        assert!(second.has_leading_newline());
    }

    #[test]
    fn identifier_with_escapes_is_normalized_in_place() {
        let mut buffer = SourceBuffer::from_str(r"hell\u{6F} = \u{77}orld;");
        let mut sink = Vec::new();
        let mut lexer = Lexer::new(&mut buffer, &mut sink);

        let first = lexer.peek();
        assert_eq!(first.kind(), TokenKind::Identifier);
        assert_eq!(first.identifier_name(lexer.source()), "hello");
        lexer.skip();

        let eq = lexer.peek();
        assert_eq!(eq.kind(), TokenKind::Punctuator(Punctuator::Equal));
        lexer.skip();

        let second = lexer.peek();
        assert_eq!(second.kind(), TokenKind::Identifier);
        assert_eq!(second.identifier_name(lexer.source()), "world");
        lexer.skip();

        let semi = lexer.peek();
        assert_eq!(semi.kind(), TokenKind::Punctuator(Punctuator::Semicolon));

        assert_eq!(&lexer.source().as_bytes()[..23], b"hello      = world     ;"[..23].as_ref());
    }

    #[test]
    fn keyword_round_trips() {
        assert_eq!(
            tokens("function"),
            vec![TokenKind::Keyword(Keyword::Function), TokenKind::EndOfFile]
        );
    }

    #[test]
    fn asi_stashes_and_restores_lookahead() {
        let mut buffer = SourceBuffer::from_str("a\nb");
        let mut sink = Vec::new();
        let mut lexer = Lexer::new(&mut buffer, &mut sink);
        assert_eq!(lexer.peek().kind(), TokenKind::Identifier);
        lexer.skip(); // now looking at `b`, which has a leading newline
        let lookahead = lexer.peek();
        assert_eq!(lookahead.kind(), TokenKind::Identifier);

        let semi = lexer.insert_semicolon();
        assert_eq!(semi.kind(), TokenKind::Punctuator(Punctuator::Semicolon));
        assert_eq!(semi.span(), Span::new(1, 1));

        let restored = lexer.skip();
        assert_eq!(restored.kind(), TokenKind::Identifier);
        assert_eq!(restored.span(), lookahead.span());
    }
}
