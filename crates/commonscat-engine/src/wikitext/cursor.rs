/// A byte cursor over wikitext with absolute position tracking.
///
/// `base` is the offset of `s` inside the whole document, so spans built from
/// [`Cursor::pos`] stay valid when a parameter value is parsed on its own.
#[derive(Clone)]
pub struct Cursor<'a> {
    pub s: &'a str,
    pub base: usize,
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str, base: usize) -> Self {
        Self { s, base, i: 0 }
    }

    /// Absolute byte position (base + local index).
    pub fn pos(&self) -> usize {
        self.base + self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s
            .as_bytes()
            .get(self.i..)
            .is_some_and(|rest| rest.starts_with(pat))
    }

    pub fn bump(&mut self) -> Option<u8> {
        let b = self.s.as_bytes().get(self.i).copied()?;
        self.i += 1;
        Some(b)
    }

    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Advances past the next occurrence of `close`, returning false (and
    /// leaving the cursor at EOF) when it never appears.
    pub fn skip_past(&mut self, close: &[u8]) -> bool {
        while !self.eof() {
            if self.starts_with(close) {
                self.bump_n(close.len());
                return true;
            }
            self.bump();
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_offset_by_base() {
        let mut cur = Cursor::new("{{x}}", 40);
        assert_eq!(cur.pos(), 40);
        cur.bump_n(2);
        assert_eq!(cur.pos(), 42);
        assert_eq!(cur.peek(), Some(b'x'));
    }

    #[test]
    fn starts_with_past_end_is_false() {
        let mut cur = Cursor::new("}", 0);
        assert!(!cur.starts_with(b"}}"));
        cur.bump_n(5);
        assert!(cur.eof());
        assert!(!cur.starts_with(b"}"));
    }

    #[test]
    fn skip_past_finds_closer() {
        let mut cur = Cursor::new("a comment --> rest", 0);
        assert!(cur.skip_past(b"-->"));
        assert_eq!(&cur.s[cur.i..], " rest");
    }

    #[test]
    fn skip_past_unclosed_hits_eof() {
        let mut cur = Cursor::new("never closed", 0);
        assert!(!cur.skip_past(b"-->"));
        assert!(cur.eof());
    }
}
