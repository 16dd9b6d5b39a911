use chronoguard_core::time::year_start;
use chronoguard_core::TimeWindow;
use proptest::prelude::*;

fn arb_window() -> impl Strategy<Value = TimeWindow> {
    (1500i32..2100, 0i32..80).prop_filter_map("representable", |(from, len)| {
        TimeWindow::years(from, from + len)
    })
}

proptest! {
    #[test]
    fn iou_is_symmetric_and_bounded(a in arb_window(), b in arb_window()) {
        let ab = a.iou(&b);
        prop_assert!((0.0..=1.0).contains(&ab));
        prop_assert!((ab - b.iou(&a)).abs() < 1e-12);
    }

    #[test]
    fn positive_iou_implies_intersection(a in arb_window(), b in arb_window()) {
        if a.iou(&b) > 0.0 {
            prop_assert!(a.intersects(&b));
            prop_assert!(b.intersects(&a));
            prop_assert_eq!(a.gap_days(&b), 0.0);
        }
    }

    #[test]
    fn self_iou_is_one(a in arb_window()) {
        prop_assert!((a.iou(&a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn slices_tile_the_window(a in arb_window(), n in 1usize..12) {
        let slices = a.slices(n);
        prop_assert!(!slices.is_empty());
        prop_assert_eq!(slices[0].start, a.start);
        prop_assert_eq!(slices[slices.len() - 1].end, a.end);
        for pair in slices.windows(2) {
            prop_assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn year_windows_cover_their_last_year(from in 1500i32..2100, len in 0i32..80) {
        let w = TimeWindow::years(from, from + len).unwrap();
        prop_assert!(w.contains(year_start(from).unwrap()));
        prop_assert!(w.contains(year_start(from + len).unwrap()));
        prop_assert!(!w.contains(year_start(from + len + 1).unwrap()));
    }
}
