//! The Type 1 font encryption.
//!
//! Charstrings and the private part of a Type 1 font are encrypted with the
//! same byte cipher, only with different seeds.

/// The seed of charstring and subroutine encryption.
pub const CHARSTRING_SEED: u16 = 4330;
/// The seed of `eexec` encryption.
pub const EEXEC_SEED: u16 = 55665;

/// The number of random bytes at the start of an `eexec` section.
const EEXEC_SKIP: usize = 4;

/// Decrypts a charstring or subroutine, dropping its `len_iv` leading
/// random bytes.
///
/// A negative `len_iv` means the data is not encrypted.
pub fn decrypt_charstring(data: &[u8], len_iv: i32) -> Vec<u8> {
    let Ok(skip) = usize::try_from(len_iv) else {
        return data.to_vec();
    };

    let mut r = CHARSTRING_SEED;

    data.iter()
        .map(|&b| decrypt_byte(b, &mut r))
        .skip(skip)
        .collect()
}

/// Decrypts an `eexec` section given in binary or hexadecimal form,
/// dropping its four leading random bytes.
pub fn decrypt_eexec(data: &[u8]) -> Option<Vec<u8>> {
    let start = data.iter().position(|&c| !is_white_space_after_token_eexec(c))?;
    let data = &data[start..];
    let head = data.get(..EEXEC_SKIP)?;

    let mut r = EEXEC_SEED;

    if head.iter().all(u8::is_ascii_hexdigit) {
        let digits: Vec<u8> = data
            .iter()
            .copied()
            .filter(|c| !is_whitespace(*c))
            .take_while(u8::is_ascii_hexdigit)
            .collect();

        let out = digits
            .chunks(2)
            .map(|pair| {
                let hi = hex_to_dec(pair[0])?;
                // Pad an odd trailing digit with zero.
                let lo = pair.get(1).map_or(Some(0), |&c| hex_to_dec(c))?;

                Some(decrypt_byte((hi << 4) | lo, &mut r))
            })
            .collect::<Option<Vec<_>>>()?;

        Some(out.get(EEXEC_SKIP..).unwrap_or_default().to_vec())
    } else {
        Some(
            data.iter()
                .map(|&b| decrypt_byte(b, &mut r))
                .skip(EEXEC_SKIP)
                .collect(),
        )
    }
}

#[inline]
pub(crate) fn decrypt_byte(cipher: u8, r: &mut u16) -> u8 {
    let plain = cipher ^ (*r >> 8) as u8;
    *r = (u16::from(cipher).wrapping_add(*r))
        .wrapping_mul(52845)
        .wrapping_add(22719);

    plain
}

fn is_white_space_after_token_eexec(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r')
}

fn is_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r' | b'\0' | b'\x0C')
}

fn hex_to_dec(hex: u8) -> Option<u8> {
    match hex {
        b'0'..=b'9' => Some(hex - b'0'),
        b'A'..=b'F' => Some(hex - b'A' + 10),
        b'a'..=b'f' => Some(hex - b'a' + 10),
        _ => None,
    }
}
