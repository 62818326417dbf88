//! Integration tests for the tier engine across every shape and tier count

use cakeform::core::tiers::{
    available_options, on_shape_changed, on_tier_count_changed, on_tier_size_changed, repair,
};
use cakeform::prelude::*;

const COUNTS: [TierCount; 3] = [TierCount::ONE, TierCount::TWO, TierCount::THREE];

fn smallest(shape: Shape) -> Option<SizeToken> {
    sizes_for(shape).iter().rev().find(|s| !s.is_custom()).copied()
}

/// Every tier above `index` is smaller than the one below, unless the one
/// below is already the smallest size on offer
fn ordered_above(tiers: &TierSet, index: usize, shape: Shape) -> bool {
    tiers.sizes().windows(2).skip(index).all(|pair| {
        let below = pair[0].numeric().unwrap();
        let above = pair[1].numeric().unwrap();
        above < below || Some(pair[0]) == smallest(shape)
    })
}

// =============================================================================
// Shape change
// =============================================================================

mod shape_change_tests {
    use super::*;

    #[test]
    fn test_defaults_match_count_and_vocabulary() {
        for shape in Shape::ALL {
            for count in COUNTS {
                let tiers = on_shape_changed(shape, count);
                assert_eq!(tiers.len(), count.get(), "{shape:?} x {}", count.get());
                assert!(tiers.sizes().iter().all(|s| sizes_for(shape).contains(s)));
                assert!(!tiers.contains_custom());
            }
        }
    }

    #[test]
    fn test_monotonic_defaults_are_strictly_decreasing() {
        for shape in Shape::ALL.into_iter().filter(Shape::is_monotonic) {
            for count in COUNTS {
                let tiers = on_shape_changed(shape, count);
                assert!(tiers.is_monotonic_for(shape), "{shape:?}: {}", tiers.joined(" / "));
            }
        }
    }

    #[test]
    fn test_rectangle_defaults() {
        let tiers = on_shape_changed(Shape::Rectangle, TierCount::THREE);
        assert_eq!(tiers.joined(" / "), "60x40 / 40x30 / 40x30");
    }
}

// =============================================================================
// Tier count change
// =============================================================================

mod tier_count_tests {
    use super::*;

    #[test]
    fn test_round_grows_from_last_tier() {
        let start = TierSet::from_sizes(vec![SizeToken::diameter(24)]);
        let grown = on_tier_count_changed(TierCount::THREE, &start, Shape::Round);
        assert_eq!(grown.joined(" / "), "24 / 22 / 18");
    }

    #[test]
    fn test_shrink_keeps_lower_tiers() {
        for shape in Shape::ALL {
            let three = on_shape_changed(shape, TierCount::THREE);
            let one = on_tier_count_changed(TierCount::ONE, &three, shape);
            assert_eq!(one.sizes(), &three.sizes()[..1]);
        }
    }

    #[test]
    fn test_growth_never_picks_custom_size() {
        let custom = TierSet::from_sizes(vec![SizeToken::Custom]);
        let grown = on_tier_count_changed(TierCount::THREE, &custom, Shape::Rectangle);
        assert_eq!(grown.len(), 3);
        assert_eq!(grown.get(0), Some(SizeToken::Custom));
        assert!(grown.sizes()[1..].iter().all(|s| !s.is_custom()));
    }

    #[test]
    fn test_growth_repeats_smallest_when_exhausted() {
        let start = TierSet::from_sizes(vec![SizeToken::diameter(16)]);
        let grown = on_tier_count_changed(TierCount::TWO, &start, Shape::Heart);
        assert_eq!(grown.joined(" / "), "16 / 16");
        assert!(!grown.is_monotonic_for(Shape::Heart));
    }
}

// =============================================================================
// Tier size change
// =============================================================================

mod tier_size_tests {
    use super::*;

    #[test]
    fn test_repair_holds_for_every_edit() {
        for shape in Shape::ALL.into_iter().filter(Shape::is_monotonic) {
            for count in COUNTS {
                let start = on_shape_changed(shape, count);
                for index in 0..count.get() {
                    let offered = available_options(index, &start, shape);
                    for size in sizes_for(shape) {
                        let result = on_tier_size_changed(index, *size, &start, shape);
                        if !offered.contains(size) {
                            let err = result.unwrap_err();
                            assert_eq!(err.error_code(), "SIZE_NOT_OFFERED");
                            continue;
                        }

                        let tiers = result.unwrap();
                        assert_eq!(tiers.len(), count.get());
                        assert_eq!(tiers.get(index), Some(*size));
                        assert_eq!(&tiers.sizes()[..index], &start.sizes()[..index]);
                        assert!(
                            ordered_above(&tiers, 0, shape),
                            "{shape:?} set {index} to {size}: {}",
                            tiers.joined(" / ")
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_upper_tier_larger_than_lower_is_rejected() {
        let start = on_shape_changed(Shape::Round, TierCount::ONE);
        let start = on_tier_count_changed(TierCount::THREE, &start, Shape::Round);
        assert_eq!(start.joined(" / "), "26 / 24 / 22");

        let err = on_tier_size_changed(1, SizeToken::diameter(26), &start, Shape::Round)
            .unwrap_err();
        assert_eq!(err.error_code(), "SIZE_NOT_OFFERED");

        let err = on_tier_size_changed(2, SizeToken::diameter(24), &start, Shape::Round)
            .unwrap_err();
        assert_eq!(err.error_code(), "SIZE_NOT_OFFERED");
    }

    #[test]
    fn test_round_bottom_shrink_cascades() {
        let start = on_tier_count_changed(
            TierCount::THREE,
            &TierSet::from_sizes(vec![SizeToken::diameter(26)]),
            Shape::Round,
        );
        assert_eq!(start.joined(" / "), "26 / 24 / 22");

        let tiers = on_tier_size_changed(0, SizeToken::diameter(18), &start, Shape::Round).unwrap();
        assert_eq!(tiers.joined(" / "), "18 / 16 / 14");
    }

    #[test]
    fn test_heart_smallest_bottom_leaves_upper_tier() {
        let start = on_shape_changed(Shape::Heart, TierCount::THREE);
        let tiers = on_tier_size_changed(0, SizeToken::diameter(16), &start, Shape::Heart).unwrap();
        assert_eq!(tiers.joined(" / "), "16 / 18 / 16");
        assert!(available_options(1, &tiers, Shape::Heart).is_empty());
    }

    #[test]
    fn test_rectangle_is_not_repaired() {
        let start = on_shape_changed(Shape::Rectangle, TierCount::TWO);
        let tiers =
            on_tier_size_changed(0, SizeToken::dimensions(40, 30), &start, Shape::Rectangle)
                .unwrap();
        assert_eq!(tiers.joined(" / "), "40x30 / 40x30");
        assert_eq!(repair(&tiers, Shape::Rectangle), tiers);
    }

    #[test]
    fn test_invalid_edits_are_rejected() {
        let start = on_shape_changed(Shape::Square, TierCount::TWO);

        let err = on_tier_size_changed(2, SizeToken::diameter(20), &start, Shape::Square)
            .unwrap_err();
        assert_eq!(err.error_code(), "TIER_INDEX_OUT_OF_RANGE");

        let err = on_tier_size_changed(0, SizeToken::diameter(26), &start, Shape::Square)
            .unwrap_err();
        assert_eq!(err.error_code(), "SIZE_NOT_OFFERED");
    }

    #[test]
    fn test_repair_is_idempotent() {
        for shape in Shape::ALL {
            for count in COUNTS {
                let tiers = on_shape_changed(shape, count);
                assert_eq!(repair(&tiers, shape), tiers);
                assert_eq!(repair(&repair(&tiers, shape), shape), repair(&tiers, shape));
            }
        }
    }
}

// =============================================================================
// Offered options
// =============================================================================

mod option_tests {
    use super::*;

    #[test]
    fn test_options_are_smaller_than_tier_below() {
        for shape in Shape::ALL.into_iter().filter(Shape::is_monotonic) {
            let tiers = on_shape_changed(shape, TierCount::THREE);
            assert_eq!(available_options(0, &tiers, shape), sizes_for(shape).to_vec());

            for index in 1..3 {
                let below = tiers.get(index - 1).and_then(|s| s.numeric()).unwrap();
                let options = available_options(index, &tiers, shape);
                assert!(options.iter().all(|s| s.numeric().unwrap() < below));
            }
        }
    }

    #[test]
    fn test_rectangle_offers_full_vocabulary() {
        let tiers = on_shape_changed(Shape::Rectangle, TierCount::THREE);
        for index in 0..3 {
            let options = available_options(index, &tiers, Shape::Rectangle);
            assert_eq!(options, sizes_for(Shape::Rectangle).to_vec());
            assert!(options.contains(&SizeToken::Custom));
        }
    }
}
