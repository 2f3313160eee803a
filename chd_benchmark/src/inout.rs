use std::io::BufRead;

/// Iterator over raw lines of `buf`, without separators.
pub struct RawLines<B> {
    buf: B,
    separator: u8,
}

impl<B> RawLines<B> {
    pub fn separated_by_newlines(buf: B) -> Self { Self { buf, separator: b'\n' } }
    pub fn separated_by_zeros(buf: B) -> Self { Self { buf, separator: 0 } }
}

impl<B: BufRead> Iterator for RawLines<B> {
    type Item = std::io::Result<Box<[u8]>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = Vec::new();
        match self.buf.read_until(self.separator, &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.last() == Some(&self.separator) {
                    buf.pop();
                    if self.separator == b'\n' && buf.last() == Some(&b'\r') {
                        buf.pop();
                    }
                }
                Some(Ok(buf.into_boxed_slice()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Takes `keys_num` keys and then `foreign_keys_num` foreign keys from `generator`.
pub fn gen_data<I: Iterator>(keys_num: usize, foreign_keys_num: usize, mut generator: I) -> (Vec<I::Item>, Vec<I::Item>) {
    let keys = generator.by_ref().take(keys_num).collect();
    let foreign = generator.take(foreign_keys_num).collect();
    (keys, foreign)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_lines() {
        let lines = RawLines::separated_by_newlines(&b"ab\r\ncd\n\nef"[..]).map(|l| l.unwrap()).collect::<Vec<_>>();
        assert_eq!(lines, vec![b"ab"[..].into(), b"cd"[..].into(), b""[..].into(), b"ef"[..].into()]);
        let lines = RawLines::separated_by_zeros(&b"a\0b\r\0"[..]).map(|l| l.unwrap()).collect::<Vec<Box<[u8]>>>();
        assert_eq!(lines, vec![b"a"[..].into(), b"b\r"[..].into()]);
    }

    #[test]
    fn test_gen_data() {
        let (keys, foreign) = gen_data(3, 2, 0..10);
        assert_eq!(keys, vec![0, 1, 2]);
        assert_eq!(foreign, vec![3, 4]);
    }
}
