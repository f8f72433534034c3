// ABOUTME: Pixel redistribution across grid tracks.
// ABOUTME: Spreads a new axis total over an existing list of track sizes.

use tabgrid_core::Redistribution;

/// Resize `sizes` so they sum to `new_total`.
///
/// The returned list always has the same length as `sizes`. Under
/// [`Redistribution::Priority`] the designated tracks absorb the whole delta;
/// if that would push a designated track below `min_size`, or the other tracks
/// no longer fit, the result falls back to an even split.
pub fn redistribute(
    sizes: &[u32],
    new_total: u32,
    strategy: &Redistribution,
    min_size: u32,
) -> Vec<u32> {
    match strategy {
        Redistribution::Even => even(sizes.len(), new_total),
        Redistribution::Priority { priorities } => {
            let designated = priorities.resolve(sizes.len());
            by_priority(sizes, new_total, &designated, min_size).unwrap_or_else(|| {
                tracing::debug!(
                    new_total,
                    min_size,
                    ?designated,
                    "priority redistribution infeasible, sharing evenly"
                );
                even(sizes.len(), new_total)
            })
        }
    }
}

/// Split `total` into `count` equal tracks, the last one taking the remainder.
pub fn even(count: usize, total: u32) -> Vec<u32> {
    if count == 0 {
        return Vec::new();
    }
    let share = total / count as u32;
    let mut sizes = vec![share; count];
    sizes[count - 1] += total - share * count as u32;
    sizes
}

/// Append one track to `sizes` without changing their `total`.
///
/// Under [`Redistribution::Priority`] the new track is `floor(mean)` of the
/// existing ones and the designated existing tracks give up that much. When
/// they cannot, or under [`Redistribution::Even`], every track gets an even
/// share of `total`.
pub fn make_room(sizes: &[u32], total: u32, strategy: &Redistribution, min_size: u32) -> Vec<u32> {
    if let Redistribution::Priority { priorities } = strategy {
        if !sizes.is_empty() {
            let mean = total / sizes.len() as u32;
            let designated = priorities.resolve(sizes.len());
            if let Some(mut resized) = by_priority(sizes, total - mean, &designated, min_size) {
                resized.push(mean);
                return resized;
            }
            tracing::debug!(total, min_size, ?designated, "designated tracks cannot make room, sharing evenly");
        }
    }
    even(sizes.len() + 1, total)
}

fn by_priority(
    sizes: &[u32],
    new_total: u32,
    designated: &[usize],
    min_size: u32,
) -> Option<Vec<u32>> {
    if designated.is_empty() {
        return None;
    }
    let min_size = min_size.max(1);

    let kept: u64 = sizes
        .iter()
        .enumerate()
        .filter(|(i, _)| !designated.contains(i))
        .map(|(_, &s)| u64::from(s))
        .sum();
    let reserved = designated.len() as u64 * u64::from(min_size);
    if kept + reserved > u64::from(new_total) {
        return None;
    }

    let current: i64 = sizes.iter().map(|&s| i64::from(s)).sum();
    let delta = i64::from(new_total) - current;
    let count = designated.len() as i64;
    let share = delta / count;
    let remainder = delta - share * count;

    let mut result = sizes.to_vec();
    for (n, &index) in designated.iter().enumerate() {
        let mut size = i64::from(sizes[index]) + share;
        if n == designated.len() - 1 {
            size += remainder;
        }
        if size < i64::from(min_size) {
            return None;
        }
        result[index] = u32::try_from(size).ok()?;
    }
    Some(result)
}
