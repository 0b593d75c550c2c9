//! LRU Recency Stack Tests.

use cachesim_core::core::units::cache::lru::LruStack;
use proptest::prelude::*;

/// Fresh stack: way 0 most recent, last way least recent.
#[test]
fn initial_order_is_way_order() {
    let stack = LruStack::new(4);
    assert_eq!(stack.order(), &[0, 1, 2, 3]);
    assert_eq!(stack.mru(), 0);
    assert_eq!(stack.lru(), 3);
}

/// Classic LRU scenario: access 0,1,2,3 then re-access 0, so LRU becomes 1.
#[test]
fn evicts_true_lru_after_reaccess() {
    let mut stack = LruStack::new(4);
    for way in 0..4 {
        stack.touch(way);
    }
    assert_eq!(stack.order(), &[3, 2, 1, 0]);
    assert_eq!(stack.lru(), 0);

    stack.touch(0);
    assert_eq!(stack.order(), &[0, 3, 2, 1]);
    assert_eq!(stack.lru(), 1);
}

#[test]
fn repeated_touch_is_stable() {
    let mut stack = LruStack::new(3);
    stack.touch(2);
    stack.touch(2);
    assert_eq!(stack.order(), &[2, 0, 1]);
}

#[test]
fn direct_mapped_stack_has_one_way() {
    let mut stack = LruStack::new(1);
    stack.touch(0);
    assert_eq!(stack.lru(), 0);
    assert_eq!(stack.mru(), 0);
}

proptest! {
    #[test]
    fn order_stays_a_permutation(
        ways in 1usize..=8,
        touches in proptest::collection::vec(0usize..8, 0..64),
    ) {
        let mut stack = LruStack::new(ways);
        let mut last = None;
        for way in touches.into_iter().filter(|&w| w < ways) {
            stack.touch(way);
            last = Some(way);
        }

        let mut sorted = stack.order().to_vec();
        sorted.sort_unstable();
        prop_assert_eq!(sorted, (0..ways).collect::<Vec<_>>());
        if let Some(way) = last {
            prop_assert_eq!(stack.mru(), way);
        }
    }
}
