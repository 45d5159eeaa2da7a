//! Skip Index - Binary Entry Point
//!
//! Builds a seeded index, runs a few operations and prints the resulting
//! level profile and shape root.

use std::time::Instant;

use skip_index::{IndexError, SkipList, SkipListConfig};

const KEY_COUNT: u64 = 100_000;
const SEED: u64 = 42;

fn main() -> Result<(), IndexError> {
    println!("===========================================");
    println!("  Skip Index");
    println!("===========================================");
    println!();

    let config = SkipListConfig::new(32, 0.25)
        .with_seed(SEED)
        .with_capacity(KEY_COUNT as usize);
    println!("Creating index...");
    println!("  max_height:  {}", config.max_height);
    println!("  probability: {}", config.probability);
    println!("  seed:        {}", config.seed);
    let mut list = SkipList::new(config)?;
    println!();

    println!("Inserting {} keys...", KEY_COUNT);
    let start = Instant::now();
    for key in 0..KEY_COUNT {
        // Spread keys so insertion order is not sorted order
        list.try_insert(key.wrapping_mul(0x9E37_79B9_7F4A_7C15))?;
    }
    println!("  Inserted in {:.2?}", start.elapsed());
    println!("  len:    {}", list.len());
    println!("  height: {}", list.height());
    println!();

    println!("Duplicate insert...");
    match list.try_insert(0) {
        Err(err) => println!("  Rejected: {}", err),
        Ok(()) => println!("  ERROR: duplicate accepted"),
    }
    println!();

    println!("Level profile:");
    for level in 0..list.height() {
        println!("  level {:>2}: {:>8} keys", level, list.level_len(level));
    }
    println!();

    println!("Removing every other key...");
    let start = Instant::now();
    for key in (0..KEY_COUNT).step_by(2) {
        list.try_remove(&key.wrapping_mul(0x9E37_79B9_7F4A_7C15))?;
    }
    println!("  Removed in {:.2?}", start.elapsed());
    println!("  len:    {}", list.len());
    println!("  height: {}", list.height());
    println!();

    match list.validate() {
        Ok(()) => println!("Invariants hold."),
        Err(violation) => println!("ERROR: {}", violation),
    }
    println!("Shape root: {}", list.shape_root_hex());

    Ok(())
}
