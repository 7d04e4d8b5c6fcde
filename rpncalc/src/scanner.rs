use crate::classify;

/// Walks the significant (non-whitespace) chars of an expression.
/// Keeps what it has seen so the parser can look back at the chars
/// that preceded the current one.
pub struct Scanner<I: Iterator<Item=char>> {
    src: I,
    buf: Vec<char>,
    pos: isize,
}

impl<I: Iterator<Item=char>> Iterator for Scanner<I> {
    type Item = char;
    fn next(&mut self) -> Option<char> {
        self.pos += 1;
        self.prep_buffer();
        let blen = self.buf.len() as isize;
        if self.pos >= blen {
            self.pos = blen;
        }
        self.curr()
    }
}

impl<I: Iterator<Item=char>> Scanner<I> {
    pub fn new(source: I) -> Scanner<I> {
        Scanner{src: source, buf: Vec::new(), pos: -1}
    }

    pub fn curr(&self) -> Option<char> {
        if self.pos < 0 {
            return None;
        }
        self.buf.get(self.pos as usize).copied()
    }

    // pull from the source until pos is covered, dropping whitespace
    fn prep_buffer(&mut self) {
        while self.pos >= (self.buf.len() as isize) {
            match self.src.next() {
                Some(c) if classify::is_whitespace(c) => continue,
                Some(c) => self.buf.push(c),
                None => break,
            }
        }
    }

    pub fn peek(&mut self) -> Option<char> {
        let backtrack = self.pos;
        let peeked = self.next();
        self.pos = backtrack;
        peeked
    }

    // n-th significant char before the current one, 1 being the previous
    pub fn lookbehind(&self, n: usize) -> Option<char> {
        let idx = self.pos - n as isize;
        if idx < 0 {
            return None;
        }
        self.buf.get(idx as usize).copied()
    }
}
