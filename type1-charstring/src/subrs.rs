//! Subroutine tables.

use crate::error::{DecodeError, Result};

/// The subroutines a charstring can call with `callsubr`.
#[derive(Clone, Copy, Debug)]
pub enum Subroutines<'a> {
    /// One decrypted buffer per subroutine, as found in Type 1 fonts.
    /// `None` marks an empty slot.
    Separate(&'a [Option<&'a [u8]>]),
    /// All subroutines in a single block, as found in CID fonts.
    ///
    /// Subroutine `i` spans `offsets[i]..offsets[i + 1]` of `data` and
    /// still starts with `len_iv` seed bytes.
    Contiguous {
        /// The decrypted subroutine block.
        data: &'a [u8],
        /// The start offsets of all subroutines, followed by the end offset
        /// of the last one.
        offsets: &'a [usize],
        /// The number of seed bytes at the start of each subroutine.
        len_iv: i32,
    },
}

impl<'a> Subroutines<'a> {
    /// An empty subroutine table.
    pub const EMPTY: Self = Self::Separate(&[]);

    /// Returns the number of subroutines.
    pub fn len(&self) -> usize {
        match self {
            Self::Separate(subrs) => subrs.len(),
            Self::Contiguous { offsets, .. } => offsets.len().saturating_sub(1),
        }
    }

    /// Returns `true` if there are no subroutines.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the body of subroutine `index`.
    pub fn get(&self, index: i32) -> Result<&'a [u8]> {
        let index = usize::try_from(index).map_err(|_| DecodeError::InvalidSubroutineIndex)?;

        if index >= self.len() {
            return Err(DecodeError::InvalidSubroutineIndex);
        }

        match *self {
            Self::Separate(subrs) => subrs[index].ok_or(DecodeError::InvalidSubroutineIndex),
            Self::Contiguous {
                data,
                offsets,
                len_iv,
            } => {
                let skip = usize::try_from(len_iv).unwrap_or(0);
                let start = offsets[index].saturating_add(skip);
                let end = offsets[index + 1];

                data.get(start..end)
                    .ok_or(DecodeError::InvalidSubroutineIndex)
            }
        }
    }
}

impl Default for Subroutines<'_> {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separate() {
        let subrs: [Option<&[u8]>; 3] = [Some(&[11]), None, Some(&[139, 11])];
        let subrs = Subroutines::Separate(&subrs);

        assert_eq!(subrs.len(), 3);
        assert_eq!(subrs.get(0), Ok(&[11][..]));
        assert_eq!(subrs.get(2), Ok(&[139, 11][..]));
        assert_eq!(subrs.get(1), Err(DecodeError::InvalidSubroutineIndex));
        assert_eq!(subrs.get(3), Err(DecodeError::InvalidSubroutineIndex));
        assert_eq!(subrs.get(-1), Err(DecodeError::InvalidSubroutineIndex));
    }

    #[test]
    fn contiguous_skips_seed_bytes() {
        let data = [0, 0, 11, 0, 0, 139, 11];
        let offsets = [0, 3, 7];
        let subrs = Subroutines::Contiguous {
            data: &data,
            offsets: &offsets,
            len_iv: 2,
        };

        assert_eq!(subrs.len(), 2);
        assert_eq!(subrs.get(0), Ok(&[11][..]));
        assert_eq!(subrs.get(1), Ok(&[139, 11][..]));
        assert_eq!(subrs.get(2), Err(DecodeError::InvalidSubroutineIndex));
    }

    #[test]
    fn contiguous_negative_len_iv() {
        let data = [139, 11];
        let offsets = [0, 2];
        let subrs = Subroutines::Contiguous {
            data: &data,
            offsets: &offsets,
            len_iv: -1,
        };

        assert_eq!(subrs.get(0), Ok(&[139, 11][..]));
    }

    #[test]
    fn empty() {
        assert!(Subroutines::EMPTY.is_empty());
        assert_eq!(
            Subroutines::default().get(0),
            Err(DecodeError::InvalidSubroutineIndex)
        );
    }
}
