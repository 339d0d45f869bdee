#[cfg(test)]
mod tests {
    use crate::interval::{BusyInterval, WorkingHours};
    use crate::logic::find_available_slots;
    use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
    use chrono_tz::Tz;
    use proptest::prelude::*;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 12, 0, 0, 0).unwrap()
    }

    // Busy intervals as (offset minutes from base, length minutes)
    fn busy_strategy() -> impl Strategy<Value = Vec<(i64, i64)>> {
        prop::collection::vec((0..(7 * 24 * 60i64), 1..(6 * 60i64)), 0..25)
    }

    fn to_intervals(raw: &[(i64, i64)]) -> Vec<BusyInterval> {
        raw.iter()
            .map(|(offset, length)| {
                let start = base() + Duration::minutes(*offset);
                BusyInterval::new(start, start + Duration::minutes(*length)).unwrap()
            })
            .collect()
    }

    proptest! {
        #[test]
        fn test_slots_never_overlap_busy_intervals(
            raw in busy_strategy(),
            duration_minutes in 15..180i64,
            now_offset in 0..(24 * 60i64),
        ) {
            let busy = to_intervals(&raw);
            let now = base() + Duration::minutes(now_offset);
            let slots = find_available_slots(
                &busy,
                Duration::minutes(duration_minutes),
                WorkingHours::default(),
                now,
                Tz::UTC,
                7,
            );
            for slot in &slots {
                for interval in &busy {
                    prop_assert!(
                        !interval.overlaps(slot.start, slot.end),
                        "slot {:?} overlaps busy {:?}",
                        slot,
                        interval
                    );
                }
            }
        }

        #[test]
        fn test_slots_long_enough_ordered_and_in_window(
            raw in busy_strategy(),
            duration_minutes in 15..180i64,
            work_start_hour in 0..12u32,
            work_end_hour in 13..23u32,
            now_offset in 0..(24 * 60i64),
        ) {
            let busy = to_intervals(&raw);
            let now = base() + Duration::minutes(now_offset);
            let duration = Duration::minutes(duration_minutes);
            let hours = WorkingHours::new(work_start_hour, work_end_hour).unwrap();
            let slots = find_available_slots(&busy, duration, hours, now, Tz::UTC, 7);

            for slot in &slots {
                prop_assert!(slot.end - slot.start >= duration);
                prop_assert!(slot.start >= now);
                prop_assert_eq!(slot.start.date_naive(), slot.end.date_naive());
                prop_assert!(slot.start.hour() >= work_start_hour);
                let end_of_day = slot
                    .start
                    .date_naive()
                    .and_hms_opt(work_end_hour, 0, 0)
                    .unwrap()
                    .and_utc();
                prop_assert!(slot.end <= end_of_day);
            }
            for pair in slots.windows(2) {
                prop_assert!(pair[0].end <= pair[1].start);
            }
        }
    }
}
