//! # Worker — One Search Lane
//!
//! The odd numbers of the range are dealt round-robin to `w` lanes per
//! direction. Forward lane `i` visits `start + 2i + 2wk` upward until it
//! leaves the range; backward lane `i` visits `(upper - 2i - 1) - 2wk`
//! downward until it drops below `start`. Together the `w` forward lanes cover
//! every odd number in `[start, upper)` and the backward lanes cover every odd
//! number in `[start, upper)` from the other end, so the two halves meet
//! somewhere in the middle.
//!
//! A lane owns its candidate outright; the only shared state it touches is
//! the cancellation flag and the progress counters.

use rug::Integer;
use serde::Serialize;
use std::sync::atomic::Ordering;
use tracing::debug;

use crate::config::SearchMode;
use crate::progress::Progress;
use crate::range::SearchRange;
use crate::signal::CancellationFlag;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

/// Identity and stride of one lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Lane {
    pub direction: Direction,
    pub index: usize,
    /// Lanes per direction; consecutive candidates are `2 * stride_count` apart.
    pub stride_count: usize,
}

/// The value carried by the result slot.
#[derive(Clone, Debug)]
pub struct Winner {
    pub prime: Integer,
    pub lane: Lane,
}

/// First candidate visited by `lane`.
pub fn lane_origin(lane: Lane, range: &SearchRange, start: &Integer) -> Integer {
    let offset = Integer::from(lane.index) * 2u32;
    match lane.direction {
        Direction::Forward => Integer::from(start + &offset),
        Direction::Backward => {
            let mut origin = Integer::from(&range.upper - &offset);
            origin -= 1u32;
            if origin.is_even() {
                origin -= 1u32;
            }
            origin
        }
    }
}

fn in_lane_bounds(lane: Lane, candidate: &Integer, range: &SearchRange, start: &Integer) -> bool {
    match lane.direction {
        Direction::Forward => *candidate < range.upper,
        Direction::Backward => candidate >= start,
    }
}

/// Walk one lane until it accepts a candidate, runs out of range, or sees the
/// flag set.
///
/// Returns `Some(candidate)` only if this lane both accepted the candidate and
/// won the claim on `flag`; the caller is then the sole writer of the result.
pub fn scan(
    lane: Lane,
    range: &SearchRange,
    start: &Integer,
    mode: SearchMode,
    flag: &CancellationFlag,
    progress: &Progress,
) -> Option<Integer> {
    let step = Integer::from(lane.stride_count) * 2u32;
    let mut candidate = lane_origin(lane, range, start);

    loop {
        if flag.is_set() {
            return None;
        }
        if !in_lane_bounds(lane, &candidate, range, start) {
            progress.exhausted.fetch_add(1, Ordering::Relaxed);
            debug!(direction = ?lane.direction, lane = lane.index, "lane exhausted");
            return None;
        }

        progress.tested.fetch_add(1, Ordering::Relaxed);
        if mode.accepts(&candidate) {
            if flag.try_claim() {
                return Some(candidate);
            }
            return None;
        }

        match lane.direction {
            Direction::Forward => candidate += &step,
            Direction::Backward => candidate -= &step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle;

    fn lane(direction: Direction, index: usize, stride_count: usize) -> Lane {
        Lane {
            direction,
            index,
            stride_count,
        }
    }

    // ── Origins ────────────────────────────────────────────────────

    #[test]
    fn forward_origin_offsets_by_two_per_lane() {
        let range = SearchRange::for_digits(3).unwrap();
        let start = Integer::from(501u32);
        assert_eq!(lane_origin(lane(Direction::Forward, 0, 4), &range, &start), 501u32);
        assert_eq!(lane_origin(lane(Direction::Forward, 3, 4), &range, &start), 507u32);
    }

    #[test]
    fn backward_origin_is_largest_odd_below_upper() {
        let range = SearchRange::for_digits(3).unwrap();
        let start = Integer::from(501u32);
        assert_eq!(lane_origin(lane(Direction::Backward, 0, 4), &range, &start), 999u32);
        assert_eq!(lane_origin(lane(Direction::Backward, 2, 4), &range, &start), 995u32);
    }

    #[test]
    fn origin_of_huge_lane_index_does_not_wrap() {
        let range = SearchRange::for_digits(3).unwrap();
        let start = Integer::from(501u32);
        let forward = lane_origin(lane(Direction::Forward, usize::MAX, 1), &range, &start);
        assert_eq!(forward, Integer::from(usize::MAX) * 2u32 + 501u32);
        let backward = lane_origin(lane(Direction::Backward, usize::MAX, 1), &range, &start);
        assert!(backward < 0u32 && backward.is_odd());
    }

    #[test]
    fn backward_origin_with_odd_upper_stays_below_it() {
        let range = SearchRange::new(Integer::from(10u32), Integer::from(51u32)).unwrap();
        let start = Integer::from(11u32);
        assert_eq!(lane_origin(lane(Direction::Backward, 0, 2), &range, &start), 49u32);
        assert_eq!(lane_origin(lane(Direction::Backward, 1, 2), &range, &start), 47u32);
    }

    // ── Scanning ───────────────────────────────────────────────────

    #[test]
    fn single_forward_lane_finds_next_accepted() {
        let range = SearchRange::for_digits(3).unwrap();
        let start = Integer::from(891u32);
        let flag = CancellationFlag::new();
        let progress = Progress::new();
        let found = scan(
            lane(Direction::Forward, 0, 1),
            &range,
            &start,
            SearchMode::Prime,
            &flag,
            &progress,
        );
        // 891 = 81*11, 893 = 19*47, 899 = 29*31, 901 = 17*53; the rest divide by 3 or 5
        assert_eq!(found, Some(Integer::from(907u32)));
        assert!(flag.is_set());
        assert_eq!(progress.tested.load(Ordering::Relaxed), 9);
    }

    #[test]
    fn single_backward_lane_finds_previous_accepted() {
        let range = SearchRange::for_digits(3).unwrap();
        let start = Integer::from(101u32);
        let flag = CancellationFlag::new();
        let progress = Progress::new();
        let found = scan(
            lane(Direction::Backward, 0, 1),
            &range,
            &start,
            SearchMode::Prime,
            &flag,
            &progress,
        );
        assert_eq!(found, Some(Integer::from(997u32)));
    }

    #[test]
    fn set_flag_stops_lane_before_testing() {
        let range = SearchRange::for_digits(3).unwrap();
        let start = Integer::from(101u32);
        let flag = CancellationFlag::new();
        flag.set();
        let progress = Progress::new();
        let found = scan(
            lane(Direction::Forward, 0, 1),
            &range,
            &start,
            SearchMode::Prime,
            &flag,
            &progress,
        );
        assert_eq!(found, None);
        assert_eq!(progress.tested.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn prime_free_range_exhausts_both_directions() {
        // 1327 and 1361 are consecutive primes
        let range = SearchRange::new(Integer::from(1328u32), Integer::from(1360u32)).unwrap();
        let start = Integer::from(1329u32);
        let flag = CancellationFlag::new();
        let progress = Progress::new();
        for direction in [Direction::Forward, Direction::Backward] {
            for index in 0..3 {
                let found = scan(
                    lane(direction, index, 3),
                    &range,
                    &start,
                    SearchMode::Prime,
                    &flag,
                    &progress,
                );
                assert_eq!(found, None);
            }
        }
        assert!(!flag.is_set());
        assert_eq!(progress.exhausted.load(Ordering::Relaxed), 6);
        // 16 odd numbers in [1329, 1359], visited once from each end
        assert_eq!(progress.tested.load(Ordering::Relaxed), 32);
    }

    #[test]
    fn forward_lanes_partition_odd_numbers() {
        let range = SearchRange::for_digits(3).unwrap();
        let start = Integer::from(101u32);
        let w = 4usize;
        let mut visited = Vec::new();
        for index in 0..w {
            let l = lane(Direction::Forward, index, w);
            let mut c = lane_origin(l, &range, &start);
            while in_lane_bounds(l, &c, &range, &start) {
                visited.push(c.to_u32().unwrap());
                c += 2 * w as u32;
            }
        }
        visited.sort_unstable();
        let expected: Vec<u32> = (101..1000).step_by(2).collect();
        assert_eq!(visited, expected);
    }

    #[test]
    fn twin_mode_accepts_only_pairs() {
        let range = SearchRange::for_digits(3).unwrap();
        let start = Integer::from(191u32);
        let flag = CancellationFlag::new();
        let progress = Progress::new();
        let found = scan(
            lane(Direction::Forward, 0, 1),
            &range,
            &start,
            SearchMode::Twin,
            &flag,
            &progress,
        )
        .unwrap();
        // 191/193 is the first twin pair at or above 191
        assert_eq!(found, 191u32);
        assert!(oracle::accepts(&Integer::from(&found + 2u32)));
    }
}
