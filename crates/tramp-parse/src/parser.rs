use crate::lexer::Lexer;
use crate::token::{Tok, TokKind};
use anyhow::{bail, Result};
use tramp_ast::Expr;

/// Maximum nesting of sub-expressions (parentheses, binders, call
/// applications and the right operands of `+`, `*` and `==`).
pub const MAX_NESTING: usize = 512;

/// Parse a complete expression. Trailing input is an error.
///
/// `file` only labels error messages.
pub fn parse_str(file: &str, src: &str) -> Result<Expr> {
    let mut p = Parser::new(file, src);
    let e = p.parse_expr()?;
    match &p.cur.kind {
        TokKind::Eof => Ok(e),
        TokKind::Error(msg) => p.fail(msg),
        other => p.fail(&format!("expected end of file at {other}")),
    }
}

struct Parser<'a> {
    file: &'a str,
    lex: Lexer<'a>,
    cur: Tok,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(file: &'a str, src: &'a str) -> Self {
        let mut lex = Lexer::new(src);
        let cur = lex.next_tok();
        Self {
            file,
            lex,
            cur,
            depth: 0,
        }
    }

    fn bump(&mut self) {
        self.cur = self.lex.next_tok();
    }

    fn at(&self, k: &TokKind) -> bool {
        std::mem::discriminant(&self.cur.kind) == std::mem::discriminant(k)
    }

    fn fail<T>(&self, msg: &str) -> Result<T> {
        bail!("{msg} [{}:{}]", self.file, self.cur.span.start)
    }

    fn expect(&mut self, k: TokKind, msg: &str) -> Result<Tok> {
        if self.at(&k) {
            let t = self.cur.clone();
            self.bump();
            Ok(t)
        } else {
            self.fail(msg)
        }
    }

    fn too_deep<T>(&self) -> Result<T> {
        self.fail(&format!("nesting depth exceeds limit of {MAX_NESTING}"))
    }

    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_NESTING {
            return self.too_deep();
        }
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        out
    }

    // ======= grammar =======
    //
    //   expr      := comparg ( "==" expr )?
    //   comparg   := addend ( "+" comparg )?
    //   addend    := multicand ( "*" addend )?
    //   multicand := inner ( "(" expr ")" )*
    //
    // `==`, `+` and `*` are right-associative; application is left-associative
    // and binds tightest.

    fn parse_expr(&mut self) -> Result<Expr> {
        self.nested(|p| {
            let lhs = p.parse_comparg()?;
            if p.at(&TokKind::EqEq) {
                p.bump();
                let rhs = p.parse_expr()?;
                return Ok(Expr::compare(lhs, rhs));
            }
            Ok(lhs)
        })
    }

    fn parse_comparg(&mut self) -> Result<Expr> {
        let lhs = self.parse_addend()?;
        if self.at(&TokKind::Plus) {
            self.bump();
            let rhs = self.nested(|p| p.parse_comparg())?;
            return Ok(Expr::plus(lhs, rhs));
        }
        Ok(lhs)
    }

    fn parse_addend(&mut self) -> Result<Expr> {
        let lhs = self.parse_multicand()?;
        if self.at(&TokKind::Star) {
            self.bump();
            let rhs = self.nested(|p| p.parse_addend())?;
            return Ok(Expr::times(lhs, rhs));
        }
        Ok(lhs)
    }

    // Each application wraps the callee one level deeper, so a chain of
    // `(arg)` suffixes counts against the nesting limit like parentheses do.
    fn parse_multicand(&mut self) -> Result<Expr> {
        let mut e = self.parse_inner()?;
        let base = self.depth;
        while self.at(&TokKind::LParen) {
            if self.depth >= MAX_NESTING {
                return self.too_deep();
            }
            self.depth += 1;
            self.bump();
            let arg = self.parse_expr()?;
            self.expect(TokKind::RParen, "expected a close parenthesis")?;
            e = Expr::call(e, arg);
        }
        self.depth = base;
        Ok(e)
    }

    fn parse_inner(&mut self) -> Result<Expr> {
        // Snapshot current token to avoid borrow issues when bumping
        let tok_kind = self.cur.kind.clone();

        match tok_kind {
            TokKind::LParen => {
                self.bump();
                let inner = self.parse_expr()?;
                self.expect(TokKind::RParen, "expected a close parenthesis")?;
                Ok(inner)
            }
            TokKind::Int(v) => {
                let Ok(n) = i32::try_from(v) else {
                    return self.fail("number literal out of range");
                };
                self.bump();
                Ok(Expr::num(n))
            }
            TokKind::Ident(name) => {
                self.bump();
                Ok(Expr::Variable(name))
            }
            TokKind::KwTrue => {
                self.bump();
                Ok(Expr::boolean(true))
            }
            TokKind::KwFalse => {
                self.bump();
                Ok(Expr::boolean(false))
            }
            TokKind::KwLet => self.parse_let(),
            TokKind::KwIf => self.parse_if(),
            TokKind::KwFun => self.parse_fun(),
            TokKind::Error(msg) => self.fail(&msg),
            TokKind::Eof => self.fail("unexpected end of file"),
            other => self.fail(&format!("expected a digit or open parenthesis at {other}")),
        }
    }

    fn parse_name(&mut self, what: &str) -> Result<String> {
        match &self.cur.kind {
            TokKind::Ident(s) => {
                let s = s.clone();
                self.bump();
                Ok(s)
            }
            _ => self.fail(&format!("expected {what}, found {}", self.cur.kind)),
        }
    }

    /// `_let name = expr _in expr`
    fn parse_let(&mut self) -> Result<Expr> {
        self.expect(TokKind::KwLet, "expected _let")?;
        let name = self.parse_name("a variable name after _let")?;
        self.expect(TokKind::Eq, "expected = after the _let variable")?;
        let rhs = self.parse_expr()?;
        self.expect(TokKind::KwIn, "expected _in")?;
        let body = self.parse_expr()?;
        Ok(Expr::let_in(name, rhs, body))
    }

    /// `_if expr _then expr _else expr`
    fn parse_if(&mut self) -> Result<Expr> {
        self.expect(TokKind::KwIf, "expected _if")?;
        let cond = self.parse_expr()?;
        self.expect(TokKind::KwThen, "expected _then")?;
        let then_ = self.parse_expr()?;
        self.expect(TokKind::KwElse, "expected _else")?;
        let else_ = self.parse_expr()?;
        Ok(Expr::if_then_else(cond, then_, else_))
    }

    /// `_fun ( name ) expr`
    fn parse_fun(&mut self) -> Result<Expr> {
        self.expect(TokKind::KwFun, "expected _fun")?;
        self.expect(TokKind::LParen, "expected ( after _fun")?;
        let param = self.parse_name("a parameter name")?;
        self.expect(TokKind::RParen, "expected a close parenthesis")?;
        let body = self.parse_expr()?;
        Ok(Expr::fun(param, body))
    }
}
