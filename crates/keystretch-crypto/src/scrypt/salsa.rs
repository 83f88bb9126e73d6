//! Salsa20/8 core permutation.
//!
//! The reduced-round (8 instead of 20) variant of the Salsa20 core used by
//! scrypt as its block-mixing primitive (RFC 7914 Section 3). This is the
//! bare permutation with feed-forward, not a stream cipher: no key, no
//! nonce, no counter.

/// Apply the Salsa20/8 core to a 64-byte block.
pub(crate) fn salsa20_8(input: &[u8; 64], output: &mut [u8; 64]) {
    let mut state = [0u32; 16];
    for (word, chunk) in state.iter_mut().zip(input.chunks_exact(4)) {
        *word = u32::from_le_bytes(chunk.try_into().unwrap());
    }

    let initial = state;

    // 8 rounds (4 double rounds)
    for _ in 0..4 {
        // Column rounds
        quarter_round(&mut state, 0, 4, 8, 12);
        quarter_round(&mut state, 5, 9, 13, 1);
        quarter_round(&mut state, 10, 14, 2, 6);
        quarter_round(&mut state, 15, 3, 7, 11);
        // Row rounds
        quarter_round(&mut state, 0, 1, 2, 3);
        quarter_round(&mut state, 5, 6, 7, 4);
        quarter_round(&mut state, 10, 11, 8, 9);
        quarter_round(&mut state, 15, 12, 13, 14);
    }

    // Add initial state (feed-forward)
    for (word, &init) in state.iter_mut().zip(initial.iter()) {
        *word = word.wrapping_add(init);
    }

    // Serialize to bytes
    for (chunk, word) in output.chunks_exact_mut(4).zip(state.iter()) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
}

#[inline]
fn quarter_round(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    state[b] ^= state[a].wrapping_add(state[d]).rotate_left(7);
    state[c] ^= state[b].wrapping_add(state[a]).rotate_left(9);
    state[d] ^= state[c].wrapping_add(state[b]).rotate_left(13);
    state[a] ^= state[d].wrapping_add(state[c]).rotate_left(18);
}
