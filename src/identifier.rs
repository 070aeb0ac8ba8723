//! Identifier (and keyword) scanning, including `\u` escape handling and in-place normalization.
//!
//! See the crate-level docs for the normalization invariant: an identifier spelled with at least
//! one escape gets its decoded code points UTF-8-encoded back into the source buffer starting at
//! its own `begin`, with the leftover footprint padded with ASCII spaces.

use crate::char_class::{is_identifier_part, is_identifier_start};
use crate::error::ErrorKind;
use crate::escape::decode_unicode_escape;
use crate::keyword::Keyword;
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};
use crate::utf8::{self, Decoded};

impl<'b, S: crate::error::DiagnosticSink> Lexer<'b, S> {
    /// Scans an identifier (or keyword) starting at `self.pos`.
    ///
    /// The caller has already established that `self.pos` begins something that should be
    /// treated as an identifier: an ASCII `IdentifierStart` byte, a `\`, or any non-ASCII byte
    /// (valid or not) that the driver's punctuator/digit/quote dispatch didn't otherwise claim.
    pub(crate) fn scan_identifier(&mut self, has_leading_newline: bool) -> Token {
        let begin = self.pos;
        let mut decoded = String::new();
        let mut rewritten = false;
        let mut first = true;

        loop {
            if self.pos >= self.buffer.len() {
                break;
            }
            let byte = self.buffer.byte_at(self.pos);

            if byte == b'\\' {
                let escape_begin = self.pos;
                self.pos += 1;
                if self.buffer.byte_at(self.pos) == b'u' {
                    self.pos += 1;
                    rewritten = true;
                    let (decoded_ch, next_pos) =
                        decode_unicode_escape(self.buffer, self.sink, escape_begin, self.pos);
                    self.pos = next_pos;
                    if let Some(ch) = decoded_ch {
                        let legal = if first {
                            is_identifier_start(ch)
                        } else {
                            is_identifier_part(ch)
                        };
                        if !legal {
                            self.report(
                                ErrorKind::EscapedCharacterDisallowedInIdentifiers,
                                "escape_sequence",
                                Span::new(escape_begin as u32, self.pos as u32),
                            );
                        }
                        decoded.push(ch);
                    }
                } else {
                    self.report(
                        ErrorKind::UnexpectedBackslashInIdentifier,
                        "backslash",
                        Span::new(escape_begin as u32, (escape_begin + 1) as u32),
                    );
                    decoded.push('\\');
                }
                first = false;
                continue;
            }

            if byte < 0x80 {
                let ch = byte as char;
                let legal = if first {
                    is_identifier_start(ch)
                } else {
                    is_identifier_part(ch)
                };
                if !legal {
                    break;
                }
                decoded.push(ch);
                self.pos += 1;
                first = false;
                continue;
            }

            match utf8::decode(&self.buffer.raw()[self.pos..]) {
                Decoded::Invalid { byte_len } => {
                    let run_begin = self.pos;
                    self.pos += byte_len as usize;
                    while self.pos < self.buffer.len() && self.buffer.byte_at(self.pos) >= 0x80 {
                        match utf8::decode(&self.buffer.raw()[self.pos..]) {
                            Decoded::Invalid { byte_len } => self.pos += byte_len as usize,
                            Decoded::Char { .. } => break,
                        }
                    }
                    self.report(
                        ErrorKind::InvalidUtf8Sequence,
                        "sequence",
                        Span::new(run_begin as u32, self.pos as u32),
                    );
                    // The invalid bytes cannot be losslessly kept in a `&str`; dropping them from
                    // the normalized name and forcing a rewrite keeps `identifier_name()` sound.
                    rewritten = true;
                    first = false;
                }
                Decoded::Char { ch, byte_len } => {
                    let legal = if first {
                        is_identifier_start(ch)
                    } else {
                        is_identifier_part(ch)
                    };
                    if !legal {
                        if first {
                            self.report(
                                ErrorKind::CharacterDisallowedInIdentifiers,
                                "character",
                                Span::new(self.pos as u32, (self.pos + byte_len as usize) as u32),
                            );
                            decoded.push(ch);
                            self.pos += byte_len as usize;
                            first = false;
                            continue;
                        }
                        break;
                    }
                    decoded.push(ch);
                    self.pos += byte_len as usize;
                    first = false;
                }
            }
        }

        let end = self.pos;
        let normalized_end = if rewritten {
            self.buffer.splice_and_pad(begin, end - begin, decoded.as_bytes());
            (begin + decoded.len()) as u32
        } else {
            end as u32
        };

        self.classify_identifier(begin as u32, end as u32, normalized_end, has_leading_newline, rewritten)
    }

    fn classify_identifier(
        &mut self,
        begin: u32,
        end: u32,
        normalized_end: u32,
        has_leading_newline: bool,
        had_escape: bool,
    ) -> Token {
        let name = self.buffer.slice(Span::new(begin, normalized_end));
        match name.parse::<Keyword>() {
            Ok(keyword) if !had_escape => {
                Token::new(TokenKind::Keyword(keyword), begin, end, has_leading_newline)
            }
            Ok(_) => {
                self.report(
                    ErrorKind::KeywordsCannotContainEscapeSequences,
                    "sequence",
                    Span::new(begin, end),
                );
                Token::new(TokenKind::Identifier, begin, end, has_leading_newline)
                    .with_normalized_end(normalized_end)
            }
            Err(_) => Token::new(TokenKind::Identifier, begin, end, has_leading_newline)
                .with_normalized_end(normalized_end),
        }
    }
}
