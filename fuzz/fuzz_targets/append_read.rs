#![no_main]

use libfuzzer_sys::fuzz_target;
use bufchain::{Chain, ChainError};

fuzz_target!(|input: (u8, u8, Vec<Vec<u8>>)| {
    let (capacity, chunks, writes) = input;
    let chunk_capacity = capacity as usize % 32 + 1;
    let max_chunks = chunks as usize % 16 + 1;
    let mut chain = Chain::new(chunk_capacity, max_chunks).unwrap();

    let mut expected = Vec::new();
    for write in &writes {
        match chain.extend_from_slice(write) {
            Ok(()) => expected.extend_from_slice(write),
            Err(ChainError::Overflow { written, .. }) => {
                // Committed prefix must be exactly what fit
                expected.extend_from_slice(&write[..written]);
                assert_eq!(chain.remaining(), 0);
            }
            Err(e) => panic!("unexpected error: {e}"),
        }
        assert_eq!(chain.size(), expected.len());
    }

    // Verify: bytes round-trip in order
    let collected: Vec<u8> = chain.bytes().collect();
    assert_eq!(collected, expected);

    // Verify: every position is addressable and matches
    for (i, &byte) in expected.iter().enumerate() {
        assert_eq!(chain.cursor_at(i).unwrap().peek().unwrap(), byte);
    }

    // Verify: digest matches the contiguous copy
    let mut copy = Chain::new(expected.len().max(1), 1).unwrap();
    copy.extend_from_slice(&expected).unwrap();
    assert_eq!(chain.digest(), copy.digest());
});
