use super::Record;
use crate::types::{Defaulted, SortCriterion};
use dicom_core::Tag;

/// Sort key of a record: its slice location, or negative infinity if missing
pub fn slice_location_key(record: &Record, slice_location: Tag) -> Defaulted {
    Defaulted::or_neg_infinity(record.float_value(slice_location))
}

/// Reorders records according to `criterion`
///
/// `SliceLocation` sorts ascending by slice location; records without one
/// come first. The sort is stable, so ties keep their discovery order.
/// `None` returns the records unchanged.
pub fn order_by<R: AsRef<Record>>(
    criterion: Option<SortCriterion>,
    mut records: Vec<R>,
    slice_location: Tag,
) -> Vec<R> {
    match criterion {
        Some(SortCriterion::SliceLocation) => {
            records.sort_by(|a, b| {
                let ka = slice_location_key(a.as_ref(), slice_location).get();
                let kb = slice_location_key(b.as_ref(), slice_location).get();
                ka.total_cmp(&kb)
            });
            records
        }
        None => records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::tags::{MODALITY, SLICE_LOCATION};
    use dicom_core::{DataElement, PrimitiveValue, VR};
    use dicom_object::InMemDicomObject;
    use std::path::Path;

    fn make_record(name: &str, location: Option<&str>) -> Record {
        let mut obj = InMemDicomObject::new_empty();
        obj.put(DataElement::new(MODALITY, VR::CS, PrimitiveValue::from("CT")));
        if let Some(location) = location {
            obj.put(DataElement::new(
                SLICE_LOCATION,
                VR::DS,
                PrimitiveValue::from(location),
            ));
        }
        Record::new(name, obj)
    }

    fn names(records: &[Record]) -> Vec<&str> {
        records
            .iter()
            .map(|r| r.path().to_str().unwrap())
            .collect()
    }

    fn sample() -> Vec<Record> {
        vec![
            make_record("a", Some("68.0")),
            make_record("b", Some("56.125")),
            make_record("c", None),
            make_record("d", Some("60.5")),
            make_record("e", Some("56.125")),
            make_record("f", Some("-3.0")),
        ]
    }

    #[test]
    fn test_sorts_by_slice_location_missing_first() {
        let sorted = order_by(Some(SortCriterion::SliceLocation), sample(), SLICE_LOCATION);
        assert_eq!(names(&sorted), vec!["c", "f", "b", "e", "d", "a"]);
    }

    #[test]
    fn test_sort_is_idempotent_and_stable() {
        let once = order_by(Some(SortCriterion::SliceLocation), sample(), SLICE_LOCATION);
        let first: Vec<String> = names(&once).into_iter().map(String::from).collect();
        let twice = order_by(Some(SortCriterion::SliceLocation), once, SLICE_LOCATION);
        assert_eq!(names(&twice), first);
        // "b" was discovered before "e" and both sit at 56.125
        let b = first.iter().position(|n| n == "b").unwrap();
        let e = first.iter().position(|n| n == "e").unwrap();
        assert!(b < e);
    }

    #[test]
    fn test_no_criterion_keeps_order() {
        let unchanged = order_by(None, sample(), SLICE_LOCATION);
        assert_eq!(names(&unchanged), vec!["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn test_sorts_borrowed_views() {
        let records = sample();
        let view: Vec<&Record> = records.iter().collect();
        let sorted = order_by(Some(SortCriterion::SliceLocation), view, SLICE_LOCATION);
        assert_eq!(sorted[0].path(), Path::new("c"));
        assert_eq!(sorted[5].path(), Path::new("a"));
        // The underlying records are untouched
        assert_eq!(records[0].path(), Path::new("a"));
    }

    #[test]
    fn test_slice_location_key() {
        let records = sample();
        assert_eq!(slice_location_key(&records[0], SLICE_LOCATION).value(), Some(68.0));
        assert!(slice_location_key(&records[2], SLICE_LOCATION).is_missing());
    }
}
