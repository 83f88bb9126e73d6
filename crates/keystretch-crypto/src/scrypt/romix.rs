//! scrypt BlockMix and ROMix (RFC 7914 Sections 4 and 5).
//!
//! BlockMix shuffles a 2r-block buffer through Salsa20/8 with XOR chaining.
//! ROMix is the sequential memory-hard stage: it materializes N successive
//! BlockMix states into a large arena, then revisits them in a data-dependent
//! pseudorandom order. Every mix step depends on the immediately preceding
//! one, so the arena cannot be traded for recomputation without a cost that
//! grows with N.

use crate::scrypt::salsa::salsa20_8;

/// Pseudorandom arena index: the last 64-byte block of `block`, read as a
/// little-endian integer and reduced modulo `n` (a power of two).
fn integerify(block: &[u8], n: usize) -> usize {
    let tail = &block[block.len() - 64..block.len() - 56];
    let word = u64::from_le_bytes(tail.try_into().unwrap());
    (word & (n as u64 - 1)) as usize
}

/// scryptBlockMix: mix the 2r-block `input` into `output` (both 128r bytes).
///
/// A running accumulator seeded with the last block is XORed with each input
/// block and passed through Salsa20/8. Results are de-interleaved: blocks at
/// even input indices land in the first half of the output, odd indices in
/// the second half. ROMix's addressing depends on this reordering.
fn block_mix(input: &[u8], output: &mut [u8]) {
    debug_assert_eq!(input.len(), output.len());
    debug_assert_eq!(input.len() % 128, 0);

    let half = input.len() / 2;
    let mut x = [0u8; 64];
    x.copy_from_slice(&input[input.len() - 64..]);
    let mut t = [0u8; 64];

    for (i, block) in input.chunks_exact(64).enumerate() {
        for ((t_b, &x_b), &in_b) in t.iter_mut().zip(x.iter()).zip(block.iter()) {
            *t_b = x_b ^ in_b;
        }
        salsa20_8(&t, &mut x);
        let pos = if i % 2 == 0 {
            i / 2 * 64
        } else {
            half + i / 2 * 64
        };
        output[pos..pos + 64].copy_from_slice(&x);
    }
}

/// scryptROMix: transform the 128r-byte `block` in place.
///
/// `v` is the arena holding the N stored states (`n * block.len()` bytes);
/// `scratch` is a single-block work buffer (`block.len()` bytes). Both are
/// owned by the caller so worker threads can reuse one arena across lanes.
pub(crate) fn ro_mix(block: &mut [u8], v: &mut [u8], scratch: &mut [u8], n: usize) {
    let len = block.len();
    debug_assert_eq!(v.len(), n * len);
    debug_assert_eq!(scratch.len(), len);

    // Fill phase: V[i] = BlockMix^i(B)
    for chunk in v.chunks_mut(len) {
        chunk.copy_from_slice(block);
        block_mix(chunk, block);
    }

    // Mix phase: fold a data-dependent arena entry back in at every step
    for _ in 0..n {
        let j = integerify(block, n);
        let entry = &v[j * len..(j + 1) * len];
        for ((s, &b), &e) in scratch.iter_mut().zip(block.iter()).zip(entry.iter()) {
            *s = b ^ e;
        }
        block_mix(scratch, block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_hex(h: &str) -> Vec<u8> {
        let h: String = h.split_whitespace().collect();
        (0..h.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&h[i..i + 2], 16).unwrap())
            .collect()
    }

    // RFC 7914 Section 9 input B (r = 1), shared by the Section 10 test.
    const BLOCK_IN: &str = "
        f7 ce 0b 65 3d 2d 72 a4 10 8c f5 ab e9 12 ff dd
        77 76 16 db bb 27 a7 0e 82 04 f3 ae 2d 0f 6f ad
        89 f6 8f 48 11 d1 e8 7b cc 3b d7 40 0a 9f fd 29
        09 4f 01 84 63 95 74 f3 9a e5 a1 31 52 17 bc d7
        89 49 91 44 72 13 bb 22 6c 25 b5 4d a8 63 70 fb
        cd 98 43 80 37 46 66 bb 8f fc b5 bf 40 c2 54 b0
        67 d2 7c 51 ce 4a d5 fe d8 29 c9 0b 50 5a 57 1b
        7f 4d 1c ad 6a 52 3c da 77 0e 67 bc ea af 7e 89";

    // RFC 7914 Section 9
    #[test]
    fn test_block_mix_rfc7914_vector() {
        let input = from_hex(BLOCK_IN);
        let expected = from_hex(
            "a4 1f 85 9c 66 08 cc 99 3b 81 ca cb 02 0c ef 05
             04 4b 21 81 a2 fd 33 7d fd 7b 1c 63 96 68 2f 29
             b4 39 31 68 e3 c9 e6 bc fe 6b c5 b7 a0 6d 96 ba
             e4 24 cc 10 2c 91 74 5c 24 ad 67 3d c7 61 8f 81
             20 ed c9 75 32 38 81 a8 05 40 f6 4c 16 2d cd 3c
             21 07 7c fe 5f 8d 5f e2 b1 a4 16 8f 95 36 78 b7
             7d 3b 3d 80 3b 60 e4 ab 92 09 96 e5 9b 4d 53 b6
             5d 2a 22 58 77 d5 ed f5 84 2c b9 f1 4e ef e4 25",
        );

        let mut output = vec![0u8; input.len()];
        block_mix(&input, &mut output);
        assert_eq!(output, expected);
    }

    // RFC 7914 Section 10 (r = 1, N = 16)
    #[test]
    fn test_ro_mix_rfc7914_vector() {
        let mut block = from_hex(BLOCK_IN);
        let expected = from_hex(
            "79 cc c1 93 62 9d eb ca 04 7f 0b 70 60 4b f6 b6
             2c e3 dd 4a 96 26 e3 55 fa fc 61 98 e6 ea 2b 46
             d5 84 13 67 3b 99 b0 29 d6 65 c3 57 60 1f b4 26
             a0 b2 f4 bb a2 00 ee 9f 0a 43 d1 9b 57 1a 9c 71
             ef 11 42 e6 5d 5a 26 6f dd ca 83 2c e5 9f aa 7c
             ac 0b 9c f1 be 2b ff ca 30 0d 01 ee 38 76 19 c4
             ae 12 fd 44 38 f2 03 a0 e4 e1 c4 7e c3 14 86 1f
             4e 90 87 cb 33 39 6a 68 73 e8 f9 d2 53 9a 4b 8e",
        );

        let n = 16;
        let mut v = vec![0u8; n * block.len()];
        let mut scratch = vec![0u8; block.len()];
        ro_mix(&mut block, &mut v, &mut scratch, n);
        assert_eq!(block, expected);
    }

    #[test]
    fn test_integerify_masks_to_range() {
        let mut block = vec![0u8; 128];
        // Last 64-byte block starts at offset 64; plant a large LE word there.
        block[64..72].copy_from_slice(&u64::MAX.to_le_bytes());
        assert_eq!(integerify(&block, 16), 15);
        block[64..72].copy_from_slice(&21u64.to_le_bytes());
        assert_eq!(integerify(&block, 16), 5);
    }
}
