use logos::Logos as _;

use crate::span::Span;

pub fn tokenize(src: &str) -> Tokens<'_> {
    let mut tokens = Tokens::new(src);

    for (kind, span) in TokenKind::lexer(src).spanned() {
        let kind = kind.unwrap_or_else(|_| TokenKind::Error);
        tokens.append(kind, span.into());
    }

    tokens
}

pub struct Tokens<'src> {
    src: &'src str,
    kind: Vec<TokenKind>,
    span: Vec<Span>,
}

impl<'src> Tokens<'src> {
    fn new(src: &'src str) -> Self {
        Self {
            src,
            kind: Vec::new(),
            span: Vec::new(),
        }
    }

    fn append(&mut self, kind: TokenKind, span: Span) {
        self.kind.push(kind);
        self.span.push(span);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.kind.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kind.is_empty()
    }

    /// Saturates to `Eof` past the end of input.
    #[inline]
    pub fn kind(&self, index: usize) -> TokenKind {
        self.kind.get(index).copied().unwrap_or(TokenKind::Eof)
    }

    #[inline]
    pub fn span(&self, index: usize) -> Span {
        self.span.get(index).copied().unwrap_or(Span {
            start: self.src.len() as u32,
            end: self.src.len() as u32,
        })
    }

    #[inline]
    pub fn lexeme(&self, index: usize) -> &'src str {
        let span = self.span(index);
        &self.src[span.start()..span.end()]
    }
}

impl std::fmt::Debug for Tokens<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for index in 0..self.len() {
            list.entry(&format_args!(
                "{:?}({:?}, {})",
                self.kind(index),
                self.lexeme(index),
                self.span(index)
            ));
        }
        list.finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, logos::Logos)]
pub enum TokenKind {
    #[token("node")]
    Node,
    #[token("type")]
    Type,
    #[token("factory")]
    Factory,

    #[token("{")]
    BraceL,
    #[token("}")]
    BraceR,
    #[token("[")]
    BracketL,
    #[token("]")]
    BracketR,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token("=")]
    Eq,
    #[token("|")]
    Pipe,

    #[regex(r"[a-zA-Z_][a-zA-Z_0-9]*")]
    Ident,

    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Whitespace,
    #[regex(r"#[^\n]*", logos::skip)]
    Comment,

    Error,
    Eof,
}

impl TokenKind {
    pub fn bare_lexeme(self) -> &'static str {
        match self {
            TokenKind::Node => "node",
            TokenKind::Type => "type",
            TokenKind::Factory => "factory",
            TokenKind::BraceL => "{",
            TokenKind::BraceR => "}",
            TokenKind::BracketL => "[",
            TokenKind::BracketR => "]",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Semi => ";",
            TokenKind::Eq => "=",
            TokenKind::Pipe => "|",
            TokenKind::Ident => "identifier",
            TokenKind::Whitespace | TokenKind::Comment => "",
            TokenKind::Error => "invalid token",
            TokenKind::Eof => "end of input",
        }
    }
}
