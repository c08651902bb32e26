use blockmerge::bit_array::BitArray;
use blockmerge::blocks::permute_blocks;
use blockmerge::observe::Access;
use blockmerge::rotate::{ALL_ROTATIONS, rotate_with};
use blockmerge::scratch::Scratch;
use blockmerge::{
    DEFAULT_PARAMS, NoopObserver, OpCounts, all_strategies, budget_for, merge_by, sort_by_key,
    sort_with,
};
use proptest::prelude::*;
use proptest::strategy::Strategy as PropStrategy;

/// Keys from a small alphabet so most inputs carry duplicates.
fn keys_strategy() -> impl PropStrategy<Value = Vec<u32>> {
    prop::collection::vec(0_u32..40, 0..700)
}

fn tagged(keys: &[u32]) -> Vec<(u32, u32)> {
    keys.iter()
        .enumerate()
        .map(|(i, &k)| (k, i as u32))
        .collect()
}

fn stable_reference(data: &[(u32, u32)]) -> Vec<(u32, u32)> {
    let mut expected = data.to_vec();
    expected.sort_by_key(|p| p.0);
    expected
}

#[derive(Clone, Copy, Debug)]
enum BitOp {
    Set(usize),
    Xor(usize),
    Incr,
    Decr,
    Swap(usize),
}

fn bit_op_strategy() -> impl PropStrategy<Value = (BitOp, usize)> {
    let op = prop_oneof![
        any::<usize>().prop_map(BitOp::Set),
        any::<usize>().prop_map(BitOp::Xor),
        Just(BitOp::Incr),
        Just(BitOp::Decr),
        any::<usize>().prop_map(BitOp::Swap),
    ];
    (op, any::<usize>())
}

fn permutation_strategy() -> impl PropStrategy<Value = Vec<usize>> {
    (0_usize..12).prop_flat_map(|k| Just((0..k).collect::<Vec<_>>()).prop_shuffle())
}

proptest! {
    #[test]
    fn prop_every_tier_is_stable(keys in keys_strategy()) {
        let data = tagged(&keys);
        let expected = stable_reference(&data);

        for &strategy in all_strategies() {
            let Some(budget) = budget_for(data.len(), strategy) else {
                continue;
            };
            let mut actual = data.clone();
            sort_by_key(&mut actual, budget, |p| p.0);
            prop_assert_eq!(&actual, &expected, "{:?}", strategy);
        }
    }

    #[test]
    fn prop_any_budget_sorts(keys in keys_strategy(), budget in 0_usize..400) {
        let data = tagged(&keys);
        let mut actual = data.clone();
        sort_by_key(&mut actual, budget, |p| p.0);
        prop_assert_eq!(actual, stable_reference(&data));
    }

    #[test]
    fn prop_sorted_input_is_free(mut keys in keys_strategy(), budget in 0_usize..400) {
        keys.sort();
        let counts =
            sort_with(&mut keys, budget, &DEFAULT_PARAMS, |a, b| a < b, OpCounts::default())
                .unwrap();
        prop_assert!(counts.compares <= keys.len().saturating_sub(1) as u64);
        prop_assert_eq!(counts.moves(), 0);
    }

    #[test]
    fn prop_merge_by_is_stable(
        mut left in keys_strategy(),
        mut right in keys_strategy(),
        budget in 0_usize..400,
    ) {
        left.sort();
        right.sort();
        let mid = left.len();
        left.extend(right);
        let data = tagged(&left);

        let mut actual = data.clone();
        merge_by(&mut actual, mid, budget, |a, b| a.0.cmp(&b.0));
        prop_assert_eq!(actual, stable_reference(&data));
    }

    #[test]
    fn prop_rotations_match_std(len in 0_usize..300, a in 0_usize..300, m in 0_usize..300) {
        let a = a.min(len);
        let m = a + m % (len - a + 1);
        for &rotation in &ALL_ROTATIONS {
            let mut actual: Vec<u32> = (0..len as u32).collect();
            let mut expected = actual.clone();
            expected[a..].rotate_left(m - a);

            let mut acc = Access::new(|x: &u32, y: &u32| x < y, NoopObserver);
            rotate_with(rotation, &mut actual, a, m, len, &mut acc);
            prop_assert_eq!(actual, expected, "{:?}", rotation);
        }
    }

    #[test]
    fn prop_bit_array_matches_reference(
        size in 1_usize..16,
        width in 1_usize..9,
        ops in prop::collection::vec(bit_op_strategy(), 0..200),
    ) {
        let mut cells: Vec<u32> = (0..(2 * size * width) as u32).collect();
        let original = cells.clone();
        let mask = (1_usize << width) - 1;
        let mut reference = vec![0_usize; size];
        let mut acc = Access::new(|x: &u32, y: &u32| x < y, NoopObserver);

        {
            let mut bits = BitArray::carve(&mut cells, size, width, &mut acc).unwrap();
            for (op, i) in ops {
                let i = i % size;
                match op {
                    BitOp::Set(value) => {
                        bits.set(i, value & mask, &mut acc);
                        reference[i] = value & mask;
                    }
                    BitOp::Xor(value) => {
                        bits.set_xor(i, value & mask, &mut acc);
                        reference[i] ^= value & mask;
                    }
                    BitOp::Incr if reference[i] < mask => {
                        bits.incr(i, &mut acc);
                        reference[i] += 1;
                    }
                    BitOp::Decr if reference[i] > 0 => {
                        bits.decr(i, &mut acc);
                        reference[i] -= 1;
                    }
                    BitOp::Swap(j) => {
                        let j = j % size;
                        bits.swap(i, j, &mut acc);
                        reference.swap(i, j);
                    }
                    BitOp::Incr | BitOp::Decr => {}
                }
                for (k, &word) in reference.iter().enumerate() {
                    prop_assert_eq!(bits.get(k, &mut acc), word);
                }
            }
            bits.free(&mut acc);
        }

        prop_assert_eq!(cells, original);
    }

    #[test]
    fn prop_block_mover_is_linear(perm in permutation_strategy(), block_len in 1_usize..6) {
        let k = perm.len();
        let original: Vec<u32> = (0..(k * block_len) as u32).collect();
        let mut v = original.clone();
        let mut tags = perm.clone();
        let mut scratch = Scratch::with_capacity(block_len);
        let mut acc = Access::new(|x: &u32, y: &u32| x < y, OpCounts::default());

        permute_blocks(&mut v, block_len, k, &mut tags[..], &mut scratch, &mut acc);

        for (o, &src) in perm.iter().enumerate() {
            prop_assert_eq!(
                &v[o * block_len..(o + 1) * block_len],
                &original[src * block_len..(src + 1) * block_len]
            );
        }
        let moved = perm.iter().enumerate().filter(|&(o, &src)| o != src).count();
        prop_assert_eq!(acc.into_observer().writes, (moved * block_len) as u64);
    }
}
