//! Buffer read helpers for ABI decoding.

use super::CodecError;

/// Size in bytes of one VM word.
pub const WORD_SIZE: usize = 8;

/// Safe buffer read helper - returns error instead of panicking.
#[inline]
pub fn read_byte(buffer: &[u8], offset: usize) -> Result<u8, CodecError> {
    buffer
        .get(offset)
        .copied()
        .ok_or(CodecError::BufferTooSmall {
            needed: offset + 1,
            available: buffer.len(),
        })
}

/// Safe buffer slice read helper.
#[inline]
pub fn read_slice(buffer: &[u8], start: usize, len: usize) -> Result<&[u8], CodecError> {
    let end = start.checked_add(len).ok_or(CodecError::BufferTooSmall {
        needed: usize::MAX,
        available: buffer.len(),
    })?;
    buffer.get(start..end).ok_or(CodecError::BufferTooSmall {
        needed: end,
        available: buffer.len(),
    })
}

/// Read a fixed-size array starting at `start`.
#[inline]
pub fn read_array<const N: usize>(buffer: &[u8], start: usize) -> Result<[u8; N], CodecError> {
    read_slice(buffer, start, N)?
        .try_into()
        .map_err(|_| CodecError::BufferTooSmall {
            needed: start + N,
            available: buffer.len(),
        })
}

/// Read one big-endian word starting at `start`.
#[inline]
pub fn read_word(buffer: &[u8], start: usize) -> Result<u64, CodecError> {
    read_array::<WORD_SIZE>(buffer, start).map(u64::from_be_bytes)
}

/// The bytes of `buffer` from `offset` onwards.
#[inline]
pub fn tail(buffer: &[u8], offset: usize) -> Result<&[u8], CodecError> {
    buffer.get(offset..).ok_or(CodecError::BufferTooSmall {
        needed: offset,
        available: buffer.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_word_big_endian() {
        let data = [0, 0, 0, 0, 0, 0, 1, 2, 0xff];
        assert_eq!(read_word(&data, 0), Ok(258));
    }

    #[test]
    fn test_read_slice_out_of_bounds() {
        let data = [1, 2, 3];
        assert_eq!(
            read_slice(&data, 2, 4),
            Err(CodecError::BufferTooSmall {
                needed: 6,
                available: 3
            })
        );
    }

    #[test]
    fn test_tail_at_end_is_empty() {
        let data = [1, 2, 3];
        assert_eq!(tail(&data, 3), Ok(&[][..]));
        assert!(tail(&data, 4).is_err());
    }
}
