use std::num::NonZeroUsize;

use crate::core::data::tile::IndexRange;

/// Splits `[0, total_pixels)` into at most `num_workers` contiguous ranges of
/// `ceil(total_pixels / num_workers)` pixels, the last clipped to the true end.
///
/// Ranges that would start past the end are dropped, so the result never
/// contains an empty range.
#[must_use]
pub fn partition_worker_ranges(total_pixels: usize, num_workers: NonZeroUsize) -> Vec<IndexRange> {
    let increment = total_pixels.div_ceil(num_workers.get());

    if increment == 0 {
        return Vec::new();
    }

    (0..num_workers.get())
        .map(|worker| {
            let start = (worker * increment).min(total_pixels);
            let stop = ((worker + 1) * increment).min(total_pixels);
            IndexRange::new(start, stop)
        })
        .filter(|range| !range.is_empty())
        .collect()
}

/// Pixels per batch for `batch_rows` rows of `pixel_width`; `None` means the
/// whole worker range is one batch.
#[must_use]
pub fn batch_pixels(batch_rows: u32, pixel_width: u32) -> Option<NonZeroUsize> {
    NonZeroUsize::new(batch_rows as usize * pixel_width as usize)
}

/// Splits a worker range into consecutive batches in increasing index order.
#[must_use]
pub fn split_into_batches(range: IndexRange, batch_pixels: Option<NonZeroUsize>) -> Vec<IndexRange> {
    let Some(step) = batch_pixels else {
        return vec![range];
    };

    (range.start..range.stop)
        .step_by(step.get())
        .map(|start| IndexRange::new(start, (start + step.get()).min(range.stop)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workers(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn assert_exact_cover(ranges: &[IndexRange], total: usize) {
        let mut expected_start = 0;
        for range in ranges {
            assert_eq!(range.start, expected_start, "gap or overlap at {range:?}");
            assert!(range.stop > range.start, "empty range {range:?}");
            assert!(range.stop <= total, "range {range:?} overruns {total}");
            expected_start = range.stop;
        }
        assert_eq!(expected_start, total);
    }

    #[test]
    fn test_single_worker_takes_everything() {
        assert_eq!(
            partition_worker_ranges(100, workers(1)),
            vec![IndexRange::new(0, 100)]
        );
    }

    #[test]
    fn test_even_split() {
        assert_eq!(
            partition_worker_ranges(12, workers(3)),
            vec![
                IndexRange::new(0, 4),
                IndexRange::new(4, 8),
                IndexRange::new(8, 12)
            ]
        );
    }

    #[test]
    fn test_last_range_is_clipped() {
        assert_eq!(
            partition_worker_ranges(10, workers(3)),
            vec![
                IndexRange::new(0, 4),
                IndexRange::new(4, 8),
                IndexRange::new(8, 10)
            ]
        );
    }

    #[test]
    fn test_more_workers_than_pixels_drops_empty_ranges() {
        let ranges = partition_worker_ranges(5, workers(4));

        assert_eq!(
            ranges,
            vec![
                IndexRange::new(0, 2),
                IndexRange::new(2, 4),
                IndexRange::new(4, 5)
            ]
        );
    }

    #[test]
    fn test_partitions_cover_exactly_for_many_shapes() {
        for width in [1_usize, 2, 3, 7, 64, 641] {
            for height in [1_usize, 2, 5, 48, 479] {
                for n in [1, 2, 3, 4, 8, 16, 32, 64] {
                    let total = width * height;
                    let ranges = partition_worker_ranges(total, workers(n));

                    assert!(ranges.len() <= n);
                    assert_exact_cover(&ranges, total);
                }
            }
        }
    }

    #[test]
    fn test_zero_batch_rows_means_whole_range() {
        assert_eq!(batch_pixels(0, 640), None);
        assert_eq!(
            split_into_batches(IndexRange::new(10, 500), None),
            vec![IndexRange::new(10, 500)]
        );
    }

    #[test]
    fn test_batches_are_rows_of_width() {
        let step = batch_pixels(2, 10);
        assert_eq!(step, NonZeroUsize::new(20));

        assert_eq!(
            split_into_batches(IndexRange::new(0, 50), step),
            vec![
                IndexRange::new(0, 20),
                IndexRange::new(20, 40),
                IndexRange::new(40, 50)
            ]
        );
    }

    #[test]
    fn test_batches_cover_worker_range_in_order() {
        let range = IndexRange::new(123, 4567);

        for rows in [1, 3, 25, 50, 1000] {
            let batches = split_into_batches(range, batch_pixels(rows, 17));

            let mut cursor = range.start;
            for batch in &batches {
                assert_eq!(batch.start, cursor);
                assert!(batch.len() <= rows as usize * 17);
                cursor = batch.stop;
            }
            assert_eq!(cursor, range.stop);
        }
    }
}
