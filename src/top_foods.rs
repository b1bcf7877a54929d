// 🥇 Top-K Food Selector
//
// k full scans over the frequency table instead of a sort: k is a small
// constant, so O(k·n) is enough. Ties on frequency go to the
// lexicographically smallest food, which makes the answer independent of
// HashMap iteration order.

use crate::aggregate::AggregateResult;

/// Number of foods shown in the report
pub const DEFAULT_TOP_FOODS: usize = 3;

/// Up to `k` distinct foods, most frequent first
pub fn top_foods(result: &AggregateResult, k: usize) -> Vec<String> {
    top_food_counts(result, k)
        .into_iter()
        .map(|(food, _)| food)
        .collect()
}

/// Same selection as `top_foods`, paired with each food's count
pub fn top_food_counts(result: &AggregateResult, k: usize) -> Vec<(String, u64)> {
    let mut selected: Vec<(String, u64)> = Vec::with_capacity(k);

    for _ in 0..k {
        let mut best: Option<(&String, u64)> = None;

        for (food, &count) in result.food_frequency() {
            if count == 0 || selected.iter().any(|(chosen, _)| chosen == food) {
                continue;
            }

            let better = match best {
                None => true,
                Some((best_food, best_count)) => {
                    count > best_count || (count == best_count && food < best_food)
                }
            };
            if better {
                best = Some((food, count));
            }
        }

        match best {
            Some((food, count)) => selected.push((food.clone(), count)),
            // Fewer than k foods
            None => break,
        }
    }

    selected
}
