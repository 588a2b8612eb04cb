use crate::token::{Tok, TokKind};
use tramp_ast::span::Span;

pub struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    fn bump(&mut self) -> Option<u8> {
        if self.pos >= self.bytes.len() {
            None
        } else {
            let b = self.bytes[self.pos];
            self.pos += 1;
            Some(b)
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn span(&self, start: usize) -> Span {
        Span {
            start: start as u32,
            end: self.pos as u32,
        }
    }

    fn tok(&self, kind: TokKind, start: usize) -> Tok {
        Tok {
            kind,
            span: self.span(start),
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.bump();
        }
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if pred(b)) {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    pub fn next_tok(&mut self) -> Tok {
        self.skip_ws();
        let start = self.pos;
        let Some(b) = self.peek() else {
            return self.tok(TokKind::Eof, start);
        };

        // 2-char operator first
        if b == b'=' {
            self.bump();
            if self.peek() == Some(b'=') {
                self.bump();
                return self.tok(TokKind::EqEq, start);
            }
            return self.tok(TokKind::Eq, start);
        }

        let single = match b {
            b'(' => Some(TokKind::LParen),
            b')' => Some(TokKind::RParen),
            b'+' => Some(TokKind::Plus),
            b'*' => Some(TokKind::Star),
            _ => None,
        };
        if let Some(k) = single {
            self.bump();
            return self.tok(k, start);
        }

        // number, optionally negative: `-` must be followed directly by digits
        if b == b'-' || b.is_ascii_digit() {
            let negative = b == b'-';
            if negative {
                self.bump();
                if !matches!(self.peek(), Some(d) if d.is_ascii_digit()) {
                    return self.tok(TokKind::Error("expected a digit after -".into()), start);
                }
            }
            let digits = self.take_while(|d| d.is_ascii_digit());
            let kind = match digits.parse::<i64>() {
                Ok(v) if negative => TokKind::Int(-v),
                Ok(v) => TokKind::Int(v),
                Err(_) => TokKind::Error("number literal out of range".into()),
            };
            return self.tok(kind, start);
        }

        // identifiers are letters only
        if b.is_ascii_alphabetic() {
            let name = self.take_while(|c| c.is_ascii_alphabetic());
            return self.tok(TokKind::Ident(name.to_string()), start);
        }

        // keywords: `_` followed by letters
        if b == b'_' {
            self.bump();
            let word = self.take_while(|c| c.is_ascii_alphabetic());
            let kind = match word {
                "true" => TokKind::KwTrue,
                "false" => TokKind::KwFalse,
                "let" => TokKind::KwLet,
                "in" => TokKind::KwIn,
                "if" => TokKind::KwIf,
                "then" => TokKind::KwThen,
                "else" => TokKind::KwElse,
                "fun" => TokKind::KwFun,
                other => TokKind::Error(format!("unexpected keyword _{other}")),
            };
            return self.tok(kind, start);
        }

        // fallback: consume one whole character so the span stays on a
        // char boundary
        let c = self.src[start..].chars().next().unwrap_or(b as char);
        self.pos += c.len_utf8();
        self.tok(TokKind::Unknown(c), start)
    }
}
