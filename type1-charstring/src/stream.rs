/// A bounds-checked cursor over a charstring buffer.
///
/// A stream doubles as a subroutine zone: the buffer is the zone's byte range
/// and the offset its saved instruction pointer.
#[derive(Clone, Copy, Default, Debug)]
pub(crate) struct Stream<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Stream<'a> {
    #[inline]
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    #[cfg(test)]
    pub(crate) fn at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    #[inline]
    pub(crate) fn read_byte(&mut self) -> Option<u8> {
        let b = *self.data.get(self.offset)?;
        self.offset += 1;
        Some(b)
    }

    #[inline]
    pub(crate) fn read_bytes(&mut self, len: usize) -> Option<&'a [u8]> {
        let v = self.data.get(self.offset..self.offset.checked_add(len)?)?;
        self.offset += len;
        Some(v)
    }

    #[inline]
    pub(crate) fn read_i32(&mut self) -> Option<i32> {
        let bytes = self.read_bytes(4)?;
        Some(i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Consumes `tag` if the stream continues with exactly these bytes.
    ///
    /// Nothing is consumed otherwise.
    #[inline]
    pub(crate) fn forward_tag(&mut self, tag: &[u8]) -> Option<()> {
        let end = self.offset.checked_add(tag.len())?;

        if self.data.get(self.offset..end)? == tag {
            self.offset = end;
            Some(())
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn tail(&self) -> &'a [u8] {
        self.data.get(self.offset..).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_i32_big_endian() {
        let mut s = Stream::new(&[0xFF, 0xFF, 0xFF, 0xFE, 0x01]);
        assert_eq!(s.read_i32(), Some(-2));
        assert_eq!(s.read_byte(), Some(1));
        assert!(s.at_end());
    }

    #[test]
    fn truncated_i32() {
        let mut s = Stream::new(&[0, 0, 1]);
        assert_eq!(s.read_i32(), None);
        // Nothing consumed on failure.
        assert_eq!(s.tail(), &[0, 0, 1]);
    }

    #[test]
    fn forward_tag() {
        let mut s = Stream::new(&[12, 17, 12, 33]);
        assert_eq!(s.forward_tag(&[12, 33]), None);
        assert_eq!(s.forward_tag(&[12, 17]), Some(()));
        assert_eq!(s.forward_tag(&[12, 33, 0]), None);
        assert_eq!(s.forward_tag(&[12, 33]), Some(()));
        assert!(s.at_end());
    }
}
