use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Unexpected end of input")]
    UnexpectedEof,
    #[error("Unexpected token at byte {0}: {1}")]
    UnexpectedToken(usize, String),
    #[error("Unterminated string starting at byte {0}")]
    UnterminatedString(usize),
    #[error("Trailing input at byte {0}")]
    TrailingInput(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SExp {
    Atom(String),
    List(Vec<SExp>),
}

impl SExp {
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            SExp::Atom(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[SExp]> {
        match self {
            SExp::List(items) => Some(items),
            _ => None,
        }
    }

    /// The leading atom of a list, e.g. `symbol` for `(symbol ...)`.
    pub fn tag(&self) -> Option<&str> {
        self.as_list()?.first()?.as_atom()
    }

    /// The atom at `index` within a list (index 0 is the tag).
    pub fn atom_at(&self, index: usize) -> Option<&str> {
        self.as_list()?.get(index)?.as_atom()
    }

    /// First direct child list whose tag is `key`.
    pub fn child(&self, key: &str) -> Option<&SExp> {
        self.children(key).next()
    }

    /// All direct child lists whose tag is `key`, in document order.
    pub fn children<'a: 'k, 'k>(&'a self, key: &'k str) -> impl Iterator<Item = &'a SExp> + 'k {
        self.as_list()
            .unwrap_or(&[])
            .iter()
            .filter(move |item| item.tag() == Some(key))
    }

    /// Value of a `(key value ...)` child, the common KiCad field shape.
    pub fn string_value(&self, key: &str) -> Option<&str> {
        self.child(key)?.atom_at(1)
    }
}

/// Deepest list nesting accepted before the input is rejected.
pub const MAX_DEPTH: usize = 256;

/// Reader for a single S-expression document.
///
/// Positions in errors are byte offsets into the input.
pub struct SExpParser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> SExpParser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
        }
    }

    /// Parse one expression and require that only whitespace follows it.
    pub fn parse(&mut self) -> Result<SExp, ParseError> {
        let sexp = self.parse_sexp()?;
        self.skip_whitespace();
        if self.pos < self.input.len() {
            return Err(ParseError::TrailingInput(self.pos));
        }
        Ok(sexp)
    }

    fn parse_sexp(&mut self) -> Result<SExp, ParseError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(ParseError::UnexpectedEof),
            Some('(') => self.parse_list(),
            Some(')') => Err(ParseError::UnexpectedToken(self.pos, ")".to_string())),
            Some('"') => self.parse_string(),
            Some(_) => Ok(self.parse_symbol()),
        }
    }

    fn parse_list(&mut self) -> Result<SExp, ParseError> {
        if self.depth == MAX_DEPTH {
            return Err(ParseError::UnexpectedToken(
                self.pos,
                format!("list nested deeper than {}", MAX_DEPTH),
            ));
        }
        self.bump();
        self.depth += 1;
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(ParseError::UnexpectedEof),
                Some(')') => {
                    self.bump();
                    self.depth -= 1;
                    return Ok(SExp::List(items));
                }
                Some(_) => items.push(self.parse_sexp()?),
            }
        }
    }

    fn parse_string(&mut self) -> Result<SExp, ParseError> {
        let start = self.pos;
        self.bump();
        let mut s = String::new();
        loop {
            match self.bump() {
                None => return Err(ParseError::UnterminatedString(start)),
                Some('"') => return Ok(SExp::Atom(s)),
                Some('\\') => match self.bump() {
                    None => return Err(ParseError::UnterminatedString(start)),
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some('r') => s.push('\r'),
                    Some(other) => s.push(other),
                },
                Some(ch) => s.push(ch),
            }
        }
    }

    fn parse_symbol(&mut self) -> SExp {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || ch == '(' || ch == ')' || ch == '"' {
                break;
            }
            self.bump();
        }
        SExp::Atom(self.input[start..self.pos].to_string())
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.bump();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }
}
