/// Difficulty level → grid size.
/// Levels run 1..=20 and map onto square mazes from 7×7 up to 31×31,
/// eased toward the top end so early levels grow gently. Sizes are kept
/// odd, which renders a symmetric wall lattice.

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 20;

pub const MIN_SIZE: usize = 7;
pub const MAX_SIZE: usize = 31;

const EASING_EXPONENT: f64 = 1.35;

/// Out-of-range levels are clamped, never turned into degenerate grids.
pub fn clamp_level(level: u8) -> u8 {
    level.clamp(MIN_LEVEL, MAX_LEVEL)
}

/// Grid dimensions (cols, rows) for a difficulty level.
/// Monotone non-decreasing in `level`.
pub fn dims_for_level(level: u8) -> (usize, usize) {
    let level = clamp_level(level);
    let t = f64::from(level - MIN_LEVEL) / f64::from(MAX_LEVEL - MIN_LEVEL);
    let span = (MAX_SIZE - MIN_SIZE) as f64;
    let size = MIN_SIZE + (t.powf(EASING_EXPONENT) * span).round() as usize;
    let size = if size % 2 == 0 { size + 1 } else { size };
    (size, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_hit_the_bounds() {
        assert_eq!(dims_for_level(1), (MIN_SIZE, MIN_SIZE));
        assert_eq!(dims_for_level(20), (MAX_SIZE, MAX_SIZE));
    }

    #[test]
    fn cell_count_is_monotone() {
        let mut prev = 0;
        for level in MIN_LEVEL..=MAX_LEVEL {
            let (c, r) = dims_for_level(level);
            assert!(c * r >= prev, "level {level} shrank");
            prev = c * r;
        }
    }

    #[test]
    fn sizes_are_odd_and_sane() {
        for level in MIN_LEVEL..=MAX_LEVEL {
            let (c, r) = dims_for_level(level);
            assert_eq!(c, r);
            assert_eq!(c % 2, 1);
            assert!((MIN_SIZE..=MAX_SIZE).contains(&c));
        }
    }

    #[test]
    fn out_of_range_levels_clamp() {
        assert_eq!(dims_for_level(0), dims_for_level(1));
        assert_eq!(dims_for_level(200), dims_for_level(20));
        assert_eq!(clamp_level(0), 1);
        assert_eq!(clamp_level(21), 20);
    }
}
