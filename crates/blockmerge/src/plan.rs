#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Strategy {
    OutOfPlace,
    KeyTable,
    BitTags,
    Rotation,
}

pub const ALL_STRATEGIES: [Strategy; 4] = [
    Strategy::OutOfPlace,
    Strategy::KeyTable,
    Strategy::BitTags,
    Strategy::Rotation,
];

pub fn strategy_name(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::OutOfPlace => "out_of_place",
        Strategy::KeyTable => "key_table",
        Strategy::BitTags => "bit_tags",
        Strategy::Rotation => "rotation",
    }
}

// One tag and one origin per block.
const KEY_SLOTS_PER_BLOCK: usize = 2;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Plan {
    pub strategy: Strategy,
    pub block_len: usize,
    pub buffer_len: usize,
    pub key_len: usize,
}

/// Smallest power of two `L` with `L * L >= n`.
pub fn block_len_for(n: usize) -> usize {
    let mut len = 1;
    while len < n.div_ceil(len) {
        len *= 2;
    }
    len
}

fn key_table_footprint(n: usize, block_len: usize) -> usize {
    block_len + KEY_SLOTS_PER_BLOCK * (n / block_len)
}

pub fn plan(n: usize, budget: usize) -> Plan {
    let min_block = block_len_for(n);

    let (strategy, block_len, buffer_len, key_len) = if budget >= n / 2 {
        (Strategy::OutOfPlace, min_block, n / 2, 0)
    } else if budget >= key_table_footprint(n, min_block) {
        let mut len = min_block;
        while key_table_footprint(n, 2 * len) <= budget {
            len *= 2;
        }
        (Strategy::KeyTable, len, len, KEY_SLOTS_PER_BLOCK * (n / len))
    } else if budget >= min_block {
        let mut len = min_block;
        while 2 * len <= budget {
            len *= 2;
        }
        (Strategy::BitTags, min_block, len, 0)
    } else {
        (Strategy::Rotation, min_block, budget, 0)
    };

    Plan {
        strategy,
        block_len,
        buffer_len,
        key_len,
    }
}

/// Smallest budget for which [`plan`] picks `strategy` on `n` elements, or `None` when the tier
/// is unreachable at this size.
pub fn budget_for(n: usize, strategy: Strategy) -> Option<usize> {
    let half = n / 2;
    let min_block = block_len_for(n);

    let budget = match strategy {
        Strategy::OutOfPlace => return Some(half),
        Strategy::KeyTable => key_table_footprint(n, min_block),
        Strategy::BitTags => min_block,
        Strategy::Rotation => 0,
    };
    (budget < half).then_some(budget)
}
