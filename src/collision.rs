// Collision detection
// Overlap queries against the active entity kind's materialized ranges.

use crate::models::time_range::TimeRange;

/// Snapshot of the active collection's ranges for overlap queries. Indices
/// line up with the drag target that produced the ranges. All-day and
/// malformed entities are already excluded by the target.
#[derive(Debug, Clone)]
pub struct CollisionIndex {
    ranges: Vec<TimeRange>,
}

impl CollisionIndex {
    pub fn new(ranges: Vec<TimeRange>) -> Self {
        Self { ranges }
    }

    /// Indices of entities whose half-open ranges intersect the candidate.
    /// Touching endpoints do not collide, so back-to-back entities pass.
    pub fn overlaps(&self, candidate: &TimeRange, excluding: Option<usize>) -> Vec<usize> {
        self.ranges
            .iter()
            .enumerate()
            .filter(|(index, range)| excluding != Some(*index) && candidate.intersects(range))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn is_free(&self, candidate: &TimeRange, excluding: Option<usize>) -> bool {
        self.ranges
            .iter()
            .enumerate()
            .all(|(index, range)| excluding == Some(index) || !candidate.intersects(range))
    }

    /// Shrink a candidate's end to the earliest obstruction so it seats just
    /// before the first occupied range. Returns `None` when the candidate's
    /// start is already inside an obstruction.
    pub fn clip_before_first(
        &self,
        candidate: &TimeRange,
        excluding: Option<usize>,
    ) -> Option<TimeRange> {
        let earliest = self
            .overlaps(candidate, excluding)
            .into_iter()
            .map(|index| self.ranges[index].start)
            .min();
        match earliest {
            None => Some(*candidate),
            Some(obstruction) if obstruction > candidate.start => {
                Some(candidate.with_end(obstruction))
            }
            Some(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn dt(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, h, m, 0).unwrap()
    }

    fn range(h1: u32, m1: u32, h2: u32, m2: u32) -> TimeRange {
        TimeRange::new(dt(h1, m1), dt(h2, m2)).unwrap()
    }

    fn index() -> CollisionIndex {
        CollisionIndex::new(vec![range(9, 0, 10, 0), range(14, 0, 15, 0)])
    }

    #[test]
    fn test_overlap_detection() {
        let index = index();
        assert_eq!(index.overlaps(&range(9, 30, 10, 30), None), vec![0]);
        assert_eq!(index.overlaps(&range(8, 0, 16, 0), None), vec![0, 1]);
        assert!(index.overlaps(&range(11, 0, 12, 0), None).is_empty());
    }

    #[test]
    fn test_touching_endpoints_do_not_collide() {
        let index = index();
        assert!(index.is_free(&range(10, 0, 11, 0), None));
        assert!(index.is_free(&range(8, 0, 9, 0), None));
    }

    #[test]
    fn test_excluding_skips_the_dragged_entity() {
        let index = index();
        assert!(!index.is_free(&range(9, 30, 10, 30), None));
        assert!(index.is_free(&range(9, 30, 10, 30), Some(0)));
    }

    #[test]
    fn test_clip_before_first_shrinks_to_obstruction() {
        let index = index();
        let clipped = index.clip_before_first(&range(13, 30, 14, 30), None).unwrap();
        assert_eq!(clipped.start, dt(13, 30));
        assert_eq!(clipped.end, dt(14, 0));
    }

    #[test]
    fn test_clip_before_first_rejects_start_inside_obstruction() {
        let index = index();
        assert_eq!(index.clip_before_first(&range(14, 30, 15, 30), None), None);
    }

    #[test]
    fn test_clip_before_first_passthrough_when_free() {
        let index = index();
        let candidate = range(11, 0, 12, 0);
        assert_eq!(index.clip_before_first(&candidate, None), Some(candidate));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = range(9, 0, 10, 0);
        for offset in (-120..120).step_by(7) {
            let b = TimeRange::new(
                a.start + Duration::minutes(offset),
                a.end + Duration::minutes(offset + 30),
            )
            .unwrap();
            assert_eq!(a.intersects(&b), b.intersects(&a));
        }
    }
}
