#![no_main]

use libfuzzer_sys::fuzz_target;
use bufchain::Chain;

fuzz_target!(|input: (Vec<u8>, Vec<u8>, Vec<(bool, u8)>)| {
    let (data, pattern, moves) = input;
    let mut chain = Chain::new(7, 64).unwrap();
    let data = &data[..data.len().min(chain.capacity())];
    chain.extend_from_slice(data).unwrap();

    if data.is_empty() {
        assert!(chain.head().peek().is_err());
        assert!(chain.find(&pattern).is_none());
        return;
    }

    // Verify: seeks clamp to [0, size) and report the distance moved
    let mut cursor = chain.head();
    for (forward, n) in moves {
        let before = cursor.position();
        let moved = if forward {
            cursor.advance(n as usize)
        } else {
            cursor.rewind(n as usize)
        };
        assert!(moved <= n as usize);
        assert!(cursor.position() < chain.size());
        assert_eq!(cursor.position().abs_diff(before), moved);
        assert_eq!(cursor.peek().unwrap(), data[cursor.position()]);
    }

    // Verify: any hit really is the pattern
    if let Some(found) = chain.find(&pattern) {
        let start = found.position();
        assert_eq!(&data[start..start + pattern.len()], pattern.as_slice());
    }
});
