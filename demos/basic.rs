//! Basic append, seek and search over a small chain.
//!
//! Run with:
//!     cargo run --example basic

use bufchain::{Chain, ChainError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 10 chunks of 5 bytes: 50 bytes total
    let mut chain = Chain::new(5, 10)?;

    chain.extend_from_slice(b"Hello World, ")?;
    chain.append(b"xxsegmented bufferxx", 2, 16)?;

    println!(
        "Wrote {} bytes across {} chunks (capacity {}, {} left)\n",
        chain.size(),
        chain.chunk_count(),
        chain.capacity(),
        chain.remaining()
    );

    for (i, chunk) in chain.chunks().enumerate() {
        println!(
            "Chunk {}: {:?}",
            i,
            String::from_utf8_lossy(chunk.as_slice())
        );
    }

    // Seek forward and back across chunk boundaries
    let mut cursor = chain.head();
    let moved = cursor.advance(6);
    println!(
        "\nAdvanced {} to position {}: {:?}",
        moved,
        cursor.position(),
        cursor.peek()? as char
    );
    let moved = cursor.rewind(2);
    println!(
        "Rewound {} to position {}: {:?}",
        moved,
        cursor.position(),
        cursor.peek()? as char
    );

    // Search for patterns, including one that straddles chunks
    for pattern in [&b"World"[..], &b"segmented"[..], &b"missing"[..]] {
        let name = String::from_utf8_lossy(pattern);
        match chain.find(pattern) {
            Some(found) => println!(
                "Found {:?} at {} (chunk {}, offset {})",
                name,
                found.position(),
                found.chunk_index(),
                found.offset()
            ),
            None => println!("{:?} not found", name),
        }
    }

    // Overflow keeps the prefix that fit
    let before = chain.size();
    match chain.extend_from_slice(&[b'!'; 32]) {
        Err(ChainError::Overflow { written, requested }) => {
            println!(
                "\nOverflow: kept {} of {} bytes (size {} -> {})",
                written,
                requested,
                before,
                chain.size()
            );
        }
        other => other?,
    }

    #[cfg(feature = "hash-blake3")]
    println!("Digest: {}", &chain.digest().to_hex()[..16]);

    Ok(())
}
