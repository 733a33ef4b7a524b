#![forbid(unsafe_code)]

//! The constraint solver itself, kept separate from the `Rect`-facing API.

use crate::Constraint;

/// Priority rank used when shrinking an over-subscribed axis. Lower ranks
/// shrink first (are sacrificed before higher-priority constraints).
fn shrink_rank(c: Constraint) -> u8 {
    match c {
        Constraint::Fill(_) => 0,
        Constraint::Max(_) => 1,
        Constraint::Percentage(_) | Constraint::Ratio(_, _) => 2,
        Constraint::Length(_) => 3,
        Constraint::Min(_) => 4,
    }
}

/// Distribute `total` across `weights` using integer largest-remainder:
/// `floor(total * w_i / sum_w)` per slot, then hand out the leftover units
/// one at a time to the slots with the largest fractional remainder,
/// breaking ties by earliest index. Falls back to an even split when every
/// weight is zero.
fn largest_remainder(total: u32, weights: &[u32]) -> Vec<u32> {
    let n = weights.len();
    if n == 0 {
        return Vec::new();
    }
    let sum_w: u64 = weights.iter().map(|&w| u64::from(w)).sum();
    if sum_w == 0 {
        let base = total / n as u32;
        let rem = total % n as u32;
        return (0..n as u32).map(|i| base + u32::from(i < rem)).collect();
    }

    let mut shares = vec![0u32; n];
    let mut remainders: Vec<(usize, u64)> = Vec::with_capacity(n);
    let mut allocated = 0u32;
    for (i, &w) in weights.iter().enumerate() {
        let numerator = u64::from(total) * u64::from(w);
        let share = (numerator / sum_w) as u32;
        shares[i] = share;
        allocated += share;
        remainders.push((i, numerator % sum_w));
    }
    let mut residual = total - allocated;
    remainders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    for &(i, _) in &remainders {
        if residual == 0 {
            break;
        }
        shares[i] += 1;
        residual -= 1;
    }
    shares
}

#[must_use]
pub fn solve_axis(constraints: &[Constraint], total: u16, spacing: u16) -> Vec<u16> {
    let n = constraints.len();
    let total_spacing = spacing.saturating_mul(n.saturating_sub(1) as u16);
    let length = u32::from(total.saturating_sub(total_spacing));

    let mut sizes: Vec<u32> = constraints
        .iter()
        .map(|c| match *c {
            Constraint::Length(v) | Constraint::Min(v) => u32::from(v),
            Constraint::Percentage(p) => ((length * u32::from(p)) as f64 / 100.0).round() as u32,
            Constraint::Ratio(a, b) => {
                ((f64::from(length) * f64::from(a)) / f64::from(b.max(1))).round() as u32
            }
            Constraint::Max(v) => u32::from(v).min(length),
            Constraint::Fill(_) => 0,
        })
        .collect();

    let desired: u32 = sizes.iter().sum();

    if desired < length {
        let remainder = length - desired;
        let fill_indices: Vec<usize> = constraints
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c, Constraint::Fill(_)))
            .map(|(i, _)| i)
            .collect();
        if !fill_indices.is_empty() {
            let weights: Vec<u32> = fill_indices
                .iter()
                .map(|&i| match constraints[i] {
                    Constraint::Fill(w) => u32::from(w),
                    _ => unreachable!(),
                })
                .collect();
            let shares = largest_remainder(remainder, &weights);
            for (slot, &i) in fill_indices.iter().enumerate() {
                sizes[i] += shares[slot];
            }
        }
    } else if desired > length {
        let mut deficit = desired - length;
        for rank in 0..=4u8 {
            if deficit == 0 {
                break;
            }
            let group: Vec<usize> = constraints
                .iter()
                .enumerate()
                .filter(|(_, c)| shrink_rank(**c) == rank)
                .map(|(i, _)| i)
                .collect();
            if group.is_empty() {
                continue;
            }
            let group_total: u32 = group.iter().map(|&i| sizes[i]).sum();
            if group_total <= deficit {
                for &i in &group {
                    sizes[i] = 0;
                }
                deficit -= group_total;
            } else {
                let weights: Vec<u32> = group.iter().map(|&i| sizes[i]).collect();
                let cuts = largest_remainder(deficit, &weights);
                for (slot, &i) in group.iter().enumerate() {
                    sizes[i] -= cuts[slot];
                }
                deficit = 0;
            }
        }
    }

    sizes
        .iter()
        .map(|&s| s.min(u32::from(u16::MAX)) as u16)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn largest_remainder_sums_to_total() {
        let shares = largest_remainder(10, &[1, 1, 1]);
        assert_eq!(shares.iter().sum::<u32>(), 10);
    }

    #[test]
    fn largest_remainder_ties_favor_earlier_index() {
        let shares = largest_remainder(1, &[1, 1]);
        assert_eq!(shares, vec![1, 0]);
    }

    #[test]
    fn zero_weights_falls_back_to_even_split() {
        let shares = largest_remainder(5, &[0, 0]);
        assert_eq!(shares.iter().sum::<u32>(), 5);
    }
}
