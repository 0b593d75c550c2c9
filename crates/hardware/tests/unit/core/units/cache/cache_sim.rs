//! Cache Unit Tests.
//!
//! Exercises the cache directly, with no processor: hit/miss logic, LRU
//! replacement, write-back of dirty victims, write-allocate stores, flushing,
//! and bounds checking.
//!
//! With block size 4 and 2 sets:
//!   - block offset = addr % 4
//!   - set index    = (addr / 4) % 2
//!   - tag          = addr / 8

use cachesim_core::common::addr::WordAddr;
use cachesim_core::common::data::AccessType;
use cachesim_core::common::error::ExecError;
use cachesim_core::config::CacheConfig;
use cachesim_core::core::units::cache::{Cache, HitOrMiss, Lookup, Request};
use cachesim_core::memory::MainMemory;
use cachesim_core::trace::{TraceLog, Transfer};
use rstest::rstest;

fn cache(block: usize, sets: usize, ways: usize) -> Cache<TraceLog> {
    let image: Vec<i32> = (0..64).map(|i| i * 10).collect();
    let memory = MainMemory::with_image(&image).unwrap();
    Cache::new(
        CacheConfig::new(block, sets, ways).unwrap(),
        memory,
        TraceLog::new(),
    )
    .unwrap()
}

fn load(cache: &mut Cache<TraceLog>, addr: u32) -> HitOrMiss {
    cache.access(WordAddr(addr), Request::Load).unwrap().outcome
}

// ══════════════════════════════════════════════════════════
// 1. Reference scenarios
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::direct_mapped(1, [HitOrMiss::Miss, HitOrMiss::Miss, HitOrMiss::Miss, HitOrMiss::Miss])]
#[case::two_way(2, [HitOrMiss::Miss, HitOrMiss::Miss, HitOrMiss::Miss, HitOrMiss::Hit])]
fn loads_0_4_8_0(#[case] ways: usize, #[case] expected: [HitOrMiss; 4]) {
    let mut c = cache(4, 2, ways);
    let outcomes = [0, 4, 8, 0].map(|addr| load(&mut c, addr));
    assert_eq!(outcomes, expected);
}

// ══════════════════════════════════════════════════════════
// 2. Cold miss and warm hit
// ══════════════════════════════════════════════════════════

#[test]
fn cold_miss_installs_the_whole_block() {
    let mut c = cache(4, 2, 1);
    let access = c.access(WordAddr(6), Request::Load).unwrap();

    assert_eq!(access.outcome, HitOrMiss::Miss);
    assert_eq!(access.value, 60);
    assert!(!access.wrote_back);

    let block = c.sets()[1].block(0);
    assert!(block.is_valid());
    assert!(!block.is_dirty());
    assert_eq!(block.words(), &[40, 50, 60, 70]);
}

#[test]
fn installed_block_hits_for_every_word() {
    let mut c = cache(4, 2, 1);
    let _ = load(&mut c, 9);
    for addr in 8..12 {
        assert_eq!(load(&mut c, addr), HitOrMiss::Hit, "addr {addr}");
    }
    assert!(!c.contains(WordAddr(12)));
}

#[test]
fn repeated_load_changes_nothing_but_recency() {
    let mut c = cache(4, 1, 2);
    let _ = load(&mut c, 0);
    let _ = load(&mut c, 4);
    let sets_before = c.sets()[0].blocks().to_vec();

    let _ = load(&mut c, 0);
    let _ = load(&mut c, 0);

    assert_eq!(c.sets()[0].blocks(), sets_before.as_slice());
    assert_eq!(c.sets()[0].recency_order(), &[0, 1]);
    assert_eq!(c.memory().words()[..8], [0, 10, 20, 30, 40, 50, 60, 70]);
}

#[test]
fn lookup_and_peek_have_no_side_effects() {
    let mut c = cache(4, 1, 2);
    let _ = load(&mut c, 0);
    let _ = load(&mut c, 4);
    let events = c.sink().len();

    assert_eq!(c.lookup(WordAddr(1)), Lookup::Hit { set: 0, way: 0 });
    assert_eq!(c.lookup(WordAddr(8)), Lookup::Miss { set: 0 });
    assert_eq!(c.peek(WordAddr(2)), Some(20));
    assert_eq!(c.peek(WordAddr(8)), None);

    assert_eq!(c.sink().len(), events);
    assert_eq!(c.sets()[0].recency_order(), &[1, 0]);
}

// ══════════════════════════════════════════════════════════
// 3. LRU replacement
// ══════════════════════════════════════════════════════════

/// After `associativity` distinct misses, the next miss evicts the oldest block.
#[test]
fn next_miss_evicts_block_installed_longest_ago() {
    let mut c = cache(4, 1, 4);
    for addr in [0, 4, 8, 12] {
        assert_eq!(load(&mut c, addr), HitOrMiss::Miss);
    }

    let _ = load(&mut c, 16);
    assert!(!c.contains(WordAddr(0)));
    for addr in [4, 8, 12, 16] {
        assert!(c.contains(WordAddr(addr)), "addr {addr}");
    }
}

#[test]
fn hit_protects_block_from_eviction() {
    let mut c = cache(4, 1, 2);
    let _ = load(&mut c, 0);
    let _ = load(&mut c, 4);
    let _ = load(&mut c, 0);

    let _ = load(&mut c, 8);
    assert!(c.contains(WordAddr(0)));
    assert!(!c.contains(WordAddr(4)));
}

#[test]
fn invalid_way_is_filled_before_any_eviction() {
    let mut c = cache(1, 1, 3);
    for addr in [5, 6, 7] {
        let _ = load(&mut c, addr);
    }
    assert!(c.sets()[0].blocks().iter().all(|b| b.is_valid()));
    assert!(!c.sink().directions().contains(&Transfer::CacheToMemory));
}

// ══════════════════════════════════════════════════════════
// 4. Stores and write-back
// ══════════════════════════════════════════════════════════

#[test]
fn store_then_load_returns_stored_value_without_write_back() {
    let mut c = cache(4, 2, 1);
    let store = c.access(WordAddr(3), Request::Store(-7)).unwrap();
    assert_eq!(store.outcome, HitOrMiss::Miss, "write-allocate");

    let access = c.access(WordAddr(3), Request::Load).unwrap();
    assert_eq!(access.value, -7);
    assert_eq!(access.outcome, HitOrMiss::Hit);

    assert_eq!(c.memory().read(WordAddr(3)), Some(30));
    assert!(c.sets()[0].block(0).is_dirty());
    assert!(!c.sink().directions().contains(&Transfer::CacheToMemory));
}

#[test]
fn loads_and_fetches_never_dirty_a_block() {
    let mut c = cache(4, 2, 1);
    let _ = c.access(WordAddr(0), Request::Fetch).unwrap();
    let _ = c.access(WordAddr(1), Request::Load).unwrap();
    assert!(!c.sets()[0].block(0).is_dirty());
}

#[test]
fn dirty_victim_is_written_back_to_its_own_address() {
    let mut c = cache(4, 2, 1);
    let _ = c.access(WordAddr(1), Request::Store(77)).unwrap();

    // 9 maps to set 0 as well and evicts block [0-3].
    let access = c.access(WordAddr(9), Request::Load).unwrap();
    assert!(access.wrote_back);
    assert_eq!(access.value, 90);

    assert_eq!(c.memory().words()[..4], [0, 77, 20, 30]);
    assert!(!c.contains(WordAddr(1)));

    // The written-back value survives a round trip through memory.
    assert_eq!(c.access(WordAddr(1), Request::Load).unwrap().value, 77);
}

#[test]
fn clean_victim_is_dropped_silently() {
    let mut c = cache(4, 2, 1);
    let _ = load(&mut c, 1);
    let access = c.access(WordAddr(9), Request::Load).unwrap();
    assert!(!access.wrote_back);
    assert!(!c.sink().directions().contains(&Transfer::CacheToMemory));
}

// ══════════════════════════════════════════════════════════
// 5. Flush
// ══════════════════════════════════════════════════════════

#[test]
fn flush_writes_back_dirty_blocks_and_keeps_them_resident() {
    let mut c = cache(4, 2, 2);
    let _ = c.access(WordAddr(0), Request::Store(1)).unwrap();
    let _ = c.access(WordAddr(5), Request::Store(2)).unwrap();
    let _ = load(&mut c, 8);

    assert_eq!(c.flush().unwrap(), 2);
    assert_eq!(c.memory().read(WordAddr(0)), Some(1));
    assert_eq!(c.memory().read(WordAddr(5)), Some(2));
    assert!(c.contains(WordAddr(0)));
    assert!(c.sets().iter().flat_map(|s| s.blocks()).all(|b| !b.is_dirty()));

    assert_eq!(c.flush().unwrap(), 0, "second flush has nothing to do");
}

// ══════════════════════════════════════════════════════════
// 6. Bounds
// ══════════════════════════════════════════════════════════

#[test]
fn access_beyond_memory_is_rejected_before_any_transfer() {
    let mut c = cache(4, 2, 1);
    let err = c.access(WordAddr(65536), Request::Load).unwrap_err();
    assert_eq!(
        err,
        ExecError::AddressOutOfRange {
            addr: 65536,
            kind: AccessType::Load,
        }
    );
    assert!(c.sink().is_empty());
}

#[test]
fn last_word_of_memory_is_reachable() {
    let mut c = cache(256, 1, 1);
    let access = c.access(WordAddr(65535), Request::Store(5)).unwrap();
    assert_eq!(access.value, 5);
    assert_eq!(c.sink().events()[0].addr, 65280);
}
