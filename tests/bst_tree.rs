use std::collections::BTreeSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use bst_tree::{BstTree, Identity, LessBy, Position, ReversePosition};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

fn key_strategy() -> impl Strategy<Value = i32> {
    -1_000i32..1_000i32
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum TreeOp {
    Insert(i32),
    InsertAtEnd(i32),
    InsertBeforeLowerBound(i32),
    EraseKey(i32),
    EraseAtLowerBound(i32),
    Find(i32),
    Count(i32),
    EqualRange(i32),
    PopFirst,
    PopLast,
}

fn tree_op_strategy() -> impl Strategy<Value = TreeOp> {
    prop_oneof![
        5 => key_strategy().prop_map(TreeOp::Insert),
        1 => key_strategy().prop_map(TreeOp::InsertAtEnd),
        2 => key_strategy().prop_map(TreeOp::InsertBeforeLowerBound),
        2 => key_strategy().prop_map(TreeOp::EraseKey),
        2 => key_strategy().prop_map(TreeOp::EraseAtLowerBound),
        1 => key_strategy().prop_map(TreeOp::Find),
        1 => key_strategy().prop_map(TreeOp::Count),
        1 => key_strategy().prop_map(TreeOp::EqualRange),
        1 => Just(TreeOp::PopFirst),
        1 => Just(TreeOp::PopLast),
    ]
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

// ─── Model-based tests ───────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both BstTree and BTreeSet and asserts
    /// identical results at every step.
    #[test]
    fn tree_ops_match_btreeset(ops in proptest::collection::vec(tree_op_strategy(), TEST_SIZE)) {
        let mut tree: BstTree<i32> = BstTree::new();
        let mut set: BTreeSet<i32> = BTreeSet::new();

        for op in &ops {
            match *op {
                TreeOp::Insert(k) => {
                    let (position, inserted) = tree.insert(k);
                    prop_assert_eq!(inserted, set.insert(k), "insert({})", k);
                    prop_assert_eq!(tree.get(position), Some(&k));
                }
                TreeOp::InsertAtEnd(k) => {
                    let position = tree.insert_hint(tree.end(), k);
                    set.insert(k);
                    prop_assert_eq!(tree.get(position), Some(&k), "insert_hint(end, {})", k);
                }
                TreeOp::InsertBeforeLowerBound(k) => {
                    let hint = tree.lower_bound(&k);
                    let position = tree.insert_hint(hint, k);
                    set.insert(k);
                    prop_assert_eq!(tree.get(position), Some(&k), "insert_hint(lower_bound, {})", k);
                }
                TreeOp::EraseKey(k) => {
                    prop_assert_eq!(tree.erase_key(&k), usize::from(set.remove(&k)), "erase_key({})", k);
                }
                TreeOp::EraseAtLowerBound(k) => {
                    let position = tree.lower_bound(&k);
                    let expected = set.range(k..).next().copied();
                    if position.is_end() {
                        prop_assert_eq!(expected, None);
                    } else {
                        let erased = tree.erase(position);
                        prop_assert_eq!(Some(erased), expected, "erase(lower_bound({}))", k);
                        set.remove(&erased);
                    }
                }
                TreeOp::Find(k) => {
                    prop_assert_eq!(tree.get(tree.find(&k)), set.get(&k), "find({})", k);
                }
                TreeOp::Count(k) => {
                    prop_assert_eq!(tree.count(&k), usize::from(set.contains(&k)), "count({})", k);
                }
                TreeOp::EqualRange(k) => {
                    let (low, high) = tree.equal_range(&k);
                    let inside: Vec<_> = tree.iter_between(low, high).copied().collect();
                    let expected: Vec<_> = set.range(k..=k).copied().collect();
                    prop_assert_eq!(inside, expected, "equal_range({})", k);
                    prop_assert_eq!(tree.get(high), set.range(k + 1..).next(), "upper_bound({})", k);
                }
                TreeOp::PopFirst => {
                    prop_assert_eq!(tree.pop_first(), set.pop_first(), "pop_first");
                }
                TreeOp::PopLast => {
                    prop_assert_eq!(tree.pop_last(), set.pop_last(), "pop_last");
                }
            }
            prop_assert_eq!(tree.len(), set.len());
            prop_assert_eq!(tree.is_empty(), set.is_empty());
        }

        prop_assert!(tree.iter().eq(set.iter()));
        prop_assert_eq!(tree.first(), set.first());
        prop_assert_eq!(tree.last(), set.last());
    }

    /// Reverse positions visit the elements in descending order.
    #[test]
    fn reverse_positions_match_btreeset(keys in proptest::collection::vec(key_strategy(), 0..TEST_SIZE)) {
        let tree: BstTree<i32> = keys.iter().copied().collect();
        let set: BTreeSet<i32> = keys.iter().copied().collect();

        let mut descending = Vec::new();
        let mut position = tree.rbegin();
        while position != tree.rend() {
            descending.push(*tree.get_rev(position).unwrap());
            position = tree.next_rev(position);
        }
        prop_assert!(descending.iter().eq(set.iter().rev()));
        prop_assert!(tree.iter().rev().eq(set.iter().rev()));
    }

    /// Erasing some elements leaves positions of the others valid.
    #[test]
    fn erase_preserves_other_positions(keys in proptest::collection::vec(key_strategy(), 1..TEST_SIZE), stride in 2usize..5) {
        let mut tree: BstTree<i32> = keys.iter().copied().collect();
        let mut positions: Vec<(Position, i32)> = Vec::new();
        let mut position = tree.begin();
        while !position.is_end() {
            positions.push((position, *tree.get(position).unwrap()));
            position = tree.next(position);
        }

        let mut kept = Vec::new();
        for (index, (position, key)) in positions.into_iter().enumerate() {
            if index % stride == 0 {
                prop_assert_eq!(tree.erase(position), key);
            } else {
                kept.push((position, key));
            }
        }

        for &(position, key) in &kept {
            prop_assert_eq!(tree.get(position), Some(&key));
        }
        prop_assert!(tree.iter().eq(kept.iter().map(|(_, key)| key)));
    }

    /// Equal trees hash equally and compare like their element sequences.
    #[test]
    fn comparisons_match_btreeset(
        a in proptest::collection::vec(key_strategy(), 0..64),
        b in proptest::collection::vec(key_strategy(), 0..64),
    ) {
        let tree_a: BstTree<i32> = a.iter().copied().collect();
        let tree_b: BstTree<i32> = b.iter().copied().collect();
        let set_a: BTreeSet<i32> = a.iter().copied().collect();
        let set_b: BTreeSet<i32> = b.iter().copied().collect();

        prop_assert_eq!(tree_a == tree_b, set_a == set_b);
        prop_assert_eq!(tree_a.cmp(&tree_b), set_a.cmp(&set_b));
        prop_assert_eq!(tree_a.partial_cmp(&tree_b), set_a.partial_cmp(&set_b));

        let rebuilt: BstTree<i32> = set_a.iter().rev().copied().collect();
        prop_assert_eq!(hash_of(&rebuilt), hash_of(&tree_a));
    }
}

// ─── Deterministic tests ─────────────────────────────────────────────────────

#[test]
fn concrete_scenario() {
    let mut tree = BstTree::new();
    for key in [5, 3, 8, 1, 4, 7, 9] {
        tree.insert(key);
    }
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 7, 8, 9]);
    assert_eq!(tree.get(tree.lower_bound(&4)), Some(&4));
    assert_eq!(tree.get(tree.upper_bound(&4)), Some(&5));

    assert_eq!(tree.erase_key(&5), 1);
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3, 4, 7, 8, 9]);
    assert_eq!(tree.find(&100), tree.end());
    assert_eq!(tree.count(&8), 1);
}

#[test]
fn empty_tree_positions() {
    let tree: BstTree<i32> = BstTree::new();
    assert_eq!(tree.begin(), tree.end());
    assert_eq!(tree.rbegin(), tree.rend());
    assert!(tree.find(&1).is_end());
    assert_eq!(tree.equal_range(&1), (tree.end(), tree.end()));
    assert_eq!(tree.iter().next(), None);
    assert_eq!(tree.first(), None);
}

#[test]
#[should_panic(expected = "`BstTree::prev()` - the tree is empty!")]
fn stepping_back_from_end_of_empty_tree_panics() {
    let tree: BstTree<i32> = BstTree::new();
    let _ = tree.prev(tree.end());
}

#[test]
fn reverse_position_base_round_trip() {
    let tree = BstTree::from([10, 20, 30]);
    let at_twenty = tree.find(&20);
    let reverse = ReversePosition::new(at_twenty);
    assert_eq!(reverse.base(), at_twenty);
    assert_eq!(tree.get_rev(reverse), Some(&10));
    assert_eq!(tree.get_rev(tree.rbegin()), Some(&30));
    assert_eq!(tree.get_rev(tree.prev_rev(reverse)), Some(&20));
}

#[test]
fn descending_comparator() {
    let mut tree: BstTree<i32, Identity, _> = BstTree::with_comparator(LessBy::new(|a: &i32, b: &i32| a > b));
    tree.extend([3, 1, 4, 1, 5, 9, 2, 6]);
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [9, 6, 5, 4, 3, 2, 1]);
    // Bounds follow the comparator's order.
    assert_eq!(tree.get(tree.lower_bound(&7)), Some(&6));
    assert_eq!(tree.get(tree.upper_bound(&6)), Some(&5));
}

#[test]
fn clear_then_reuse() {
    let mut tree: BstTree<String> = ["b", "a", "c"].into_iter().map(String::from).collect();
    let copy = tree.clone();
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.begin(), tree.end());
    tree.insert(String::from("z"));
    assert_eq!(tree.len(), 1);
    assert_eq!(copy.iter().map(String::as_str).collect::<Vec<_>>(), ["a", "b", "c"]);
}

#[test]
fn cursor_from_end() {
    let tree = BstTree::from([2, 4, 6]);
    let mut cursor = tree.cursor(tree.end());
    assert_eq!(cursor.get(), None);
    cursor.move_prev();
    assert_eq!(cursor.get(), Some(&6));
    cursor.move_prev();
    cursor.move_prev();
    assert_eq!(cursor.get(), Some(&2));
    assert_eq!(cursor.position(), tree.begin());
}

#[test]
fn swap_moves_positions_with_elements() {
    let mut a = BstTree::from([1, 2, 3]);
    let mut b = BstTree::from([7]);
    let two = a.find(&2);
    a.swap(&mut b);
    assert_eq!(b.get(two), Some(&2));
    assert_eq!(a.iter().copied().collect::<Vec<_>>(), [7]);
    assert_eq!(format!("{b:?}"), "{1, 2, 3}");
}
