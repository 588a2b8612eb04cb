use std::fmt;
use tramp_ast::span::Span;

#[derive(Debug, Clone, PartialEq)]
pub enum TokKind {
    // trivia / eof / error
    Eof,
    /// Lexical error, carried to the parser so it can report it in place
    Error(String),
    /// A character that cannot start any token
    Unknown(char),
    // punctuation
    LParen,
    RParen,
    Eq,
    EqEq,
    Plus,
    Star,
    // idents / keywords
    Ident(String),
    KwTrue,
    KwFalse,
    KwLet,
    KwIn,
    KwIf,
    KwThen,
    KwElse,
    KwFun,
    // literals (sign already applied)
    Int(i64),
}

impl fmt::Display for TokKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokKind::Eof => write!(f, "end of file"),
            TokKind::Error(msg) => write!(f, "{msg}"),
            TokKind::Unknown(c) => write!(f, "{c}"),
            TokKind::LParen => write!(f, "("),
            TokKind::RParen => write!(f, ")"),
            TokKind::Eq => write!(f, "="),
            TokKind::EqEq => write!(f, "=="),
            TokKind::Plus => write!(f, "+"),
            TokKind::Star => write!(f, "*"),
            TokKind::Ident(s) => write!(f, "{s}"),
            TokKind::KwTrue => write!(f, "_true"),
            TokKind::KwFalse => write!(f, "_false"),
            TokKind::KwLet => write!(f, "_let"),
            TokKind::KwIn => write!(f, "_in"),
            TokKind::KwIf => write!(f, "_if"),
            TokKind::KwThen => write!(f, "_then"),
            TokKind::KwElse => write!(f, "_else"),
            TokKind::KwFun => write!(f, "_fun"),
            TokKind::Int(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tok {
    pub kind: TokKind,
    pub span: Span,
}
