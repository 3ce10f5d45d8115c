//! PKCS#7 padding.
//!
//! Every pad byte carries the pad length, and at least one byte is always
//! appended: input that is already block-aligned gains a whole extra block.
//! That keeps [`unpad`] unambiguous.

use crate::error::EncrypterError;

/// Pad `data` to a multiple of `block_size`.
///
/// `block_size` must be in `1..=255`.
pub fn pad(data: &[u8], block_size: usize) -> Vec<u8> {
    debug_assert!((1..=255).contains(&block_size));
    let n = block_size - (data.len() % block_size);
    let mut out = Vec::with_capacity(data.len() + n);
    out.extend_from_slice(data);
    // n <= block_size <= 255
    out.resize(data.len() + n, n as u8);
    out
}

/// Strip PKCS#7 padding from `data`.
///
/// The trailing byte `p` is valid iff `1 <= p <= block_size` and the last `p`
/// bytes all equal `p`. The trailing bytes are compared without early exit.
///
/// # Errors
///
/// Returns [`EncrypterError::InvalidPadding`] if the padding is invalid or
/// `data` is empty.
pub fn unpad(data: &[u8], block_size: usize) -> Result<&[u8], EncrypterError> {
    let Some(&last) = data.last() else {
        return Err(EncrypterError::InvalidPadding);
    };
    let p = usize::from(last);
    if p == 0 || p > block_size || p > data.len() {
        return Err(EncrypterError::InvalidPadding);
    }

    let split = data.len() - p;
    let diff = data[split..].iter().fold(0u8, |acc, &b| acc | (b ^ last));
    if diff != 0 {
        return Err(EncrypterError::InvalidPadding);
    }
    Ok(&data[..split])
}
