//! A lexical analyzer for JavaScript source code.
//!
//! The lexer splits a byte-addressable source buffer into a sequence of [`Token`]s, carrying
//! only byte-offset spans (not line/column positions — that is a presentation concern for
//! whatever renders diagnostics). It never aborts on malformed input: every scanner recovers
//! locally, still produces a token, and reports what went wrong as a [`Diagnostic`] on the
//! caller-supplied [`DiagnosticSink`].
//!
//! The only way the lexer mutates its source buffer is in-place identifier normalization: an
//! identifier spelled with a `\u` escape has its decoded code points rewritten as UTF-8 at the
//! identifier's own starting position, with the leftover footprint padded with ASCII spaces. See
//! [`Token::identifier_name`] for how to read the result.
//!
//! ```
//! use js_lex::{Lexer, SourceBuffer, TokenKind};
//!
//! let mut buffer = SourceBuffer::from_str("let x = 1;");
//! let mut diagnostics = Vec::new();
//! let mut lexer = Lexer::new(&mut buffer, &mut diagnostics);
//!
//! while lexer.peek().kind() != TokenKind::EndOfFile {
//!     lexer.skip();
//! }
//! assert!(diagnostics.is_empty());
//! ```

mod char_class;
mod error;
mod escape;
mod identifier;
mod keyword;
mod lexer;
mod number;
mod punctuator;
mod regexp;
mod source;
mod span;
mod string;
mod template;
mod token;
mod utf8;

pub use error::{Diagnostic, DiagnosticSink, ErrorKind, NullDiagnosticSink};
pub use keyword::Keyword;
pub use lexer::Lexer;
pub use punctuator::Punctuator;
pub use source::SourceBuffer;
pub use span::Span;
pub use token::{Token, TokenKind};
