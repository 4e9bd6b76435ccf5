use crate::error::{DecodeError, Result};

/// The maximum number of operands a charstring may push.
pub(crate) const MAX_ARGUMENTS_STACK_LEN: usize = 32;

/// The operand stack of the charstring interpreter.
///
/// Popped values stay in the backing storage until they are overwritten, which
/// is what the `pop` operator relies on to retrieve othersubr results.
pub(crate) struct ArgumentsStack {
    data: [i32; MAX_ARGUMENTS_STACK_LEN],
    len: usize,
}

impl ArgumentsStack {
    #[inline]
    pub(crate) fn new() -> Self {
        Self {
            data: [0; MAX_ARGUMENTS_STACK_LEN],
            len: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub(crate) fn push(&mut self, n: i32) -> Result<()> {
        if self.len == MAX_ARGUMENTS_STACK_LEN {
            Err(DecodeError::StackOverflow)
        } else {
            self.data[self.len] = n;
            self.len += 1;
            Ok(())
        }
    }

    /// Returns the topmost `count` operands without consuming them.
    #[inline]
    pub(crate) fn top(&self, count: usize) -> Result<&[i32]> {
        let start = self
            .len
            .checked_sub(count)
            .ok_or(DecodeError::StackUnderflow)?;

        Ok(&self.data[start..self.len])
    }

    /// Consumes the topmost `count` operands, returning them for in-place
    /// modification.
    #[inline]
    pub(crate) fn pop_slice(&mut self, count: usize) -> Result<&mut [i32]> {
        let start = self
            .len
            .checked_sub(count)
            .ok_or(DecodeError::StackUnderflow)?;
        let end = self.len;
        self.len = start;

        Ok(&mut self.data[start..end])
    }

    /// Consumes the topmost `N` operands, bottom-most first.
    #[inline]
    pub(crate) fn pop_array<const N: usize>(&mut self) -> Result<[i32; N]> {
        let mut out = [0; N];
        out.copy_from_slice(self.pop_slice(N)?);

        Ok(out)
    }

    /// Brings the most recently popped value back onto the stack.
    #[inline]
    pub(crate) fn unpop(&mut self) -> Result<()> {
        if self.len == MAX_ARGUMENTS_STACK_LEN {
            return Err(DecodeError::StackOverflow);
        }

        self.len += 1;
        Ok(())
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.len = 0;
    }
}

impl core::fmt::Debug for ArgumentsStack {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(&self.data[..self.len]).finish()
    }
}
