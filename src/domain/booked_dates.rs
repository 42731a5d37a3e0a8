use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Dates already claimed by confirmed bookings, in confirmation order.
///
/// The registry only grows: there is no removal API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookedDateSet {
    dates: Vec<NaiveDate>,
}

impl BookedDateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `date`; returns `false` when it was already booked.
    pub fn insert(&mut self, date: NaiveDate) -> bool {
        if self.contains(date) {
            return false;
        }
        self.dates.push(date);
        true
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NaiveDate> {
        self.dates.iter()
    }

    pub fn as_slice(&self) -> &[NaiveDate] {
        &self.dates
    }
}

impl<'a> IntoIterator for &'a BookedDateSet {
    type Item = &'a NaiveDate;
    type IntoIter = std::slice::Iter<'a, NaiveDate>;

    fn into_iter(self) -> Self::IntoIter {
        self.dates.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn keeps_insertion_order() {
        let mut set = BookedDateSet::new();
        assert!(set.insert(date(20)));
        assert!(set.insert(date(3)));
        assert_eq!(set.as_slice(), &[date(20), date(3)]);
    }

    #[test]
    fn duplicate_insert_is_ignored() {
        let mut set = BookedDateSet::new();
        set.insert(date(15));
        assert!(!set.insert(date(15)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn serializes_as_plain_date_list() {
        let mut set = BookedDateSet::new();
        set.insert(date(15));
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "[\"2024-06-15\"]");
    }
}
