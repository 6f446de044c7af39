use std::collections::BTreeMap;

use super::{ClassSchedule, Day};

/// Classes grouped by the days they meet on, earliest first.
///
/// Every day of the week is present, possibly with no classes. A class
/// meeting on several days appears under each of them.
pub fn timetable(classes: &[ClassSchedule]) -> BTreeMap<Day, Vec<&ClassSchedule>> {
    let mut by_day: BTreeMap<Day, Vec<&ClassSchedule>> =
        Day::ALL.iter().map(|d| (*d, Vec::new())).collect();

    for class in classes {
        for day in &class.days {
            by_day.entry(*day).or_default().push(class);
        }
    }
    for day_classes in by_day.values_mut() {
        day_classes.sort_by_key(|c| (c.time, c.end_time));
    }
    by_day
}
