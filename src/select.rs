//! Field selection

use crate::range::FieldList;

/// Applies a field list to records
#[derive(Debug, Clone, Default)]
pub struct FieldSelector {
    fields: Option<FieldList>,
}

impl FieldSelector {
    /// `None` passes every field through unchanged
    pub fn new(fields: Option<FieldList>) -> Self {
        Self { fields }
    }

    /// Fields of `record` picked by each range in list order. Positions past
    /// the end of the record contribute nothing.
    pub fn select<'r>(&self, record: &'r [String]) -> Vec<&'r str> {
        let Some(ref list) = self.fields else {
            return record.iter().map(String::as_str).collect();
        };

        let mut out = Vec::with_capacity(record.len());
        for range in list.ranges() {
            out.extend(record[range.span(record.len())].iter().map(String::as_str));
        }
        out
    }

    pub fn is_identity(&self) -> bool {
        self.fields.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn selector(spec: &str) -> FieldSelector {
        FieldSelector::new(Some(spec.parse().unwrap()))
    }

    #[test]
    fn test_select_ranges() {
        let rec = record(&["a", "b", "c", "d"]);
        assert_eq!(selector("1,3-4").select(&rec), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_upper_bound_past_end() {
        let rec = record(&["a", "b", "c"]);
        assert_eq!(selector("2-100").select(&rec), vec!["b", "c"]);
    }

    #[test]
    fn test_lower_bound_past_end() {
        let rec = record(&["a", "b"]);
        assert!(selector("5-").select(&rec).is_empty());
        assert_eq!(selector("5,1").select(&rec), vec!["a"]);
    }

    #[test]
    fn test_overlap_repeats_fields() {
        let rec = record(&["a", "b", "c"]);
        assert_eq!(selector("1-2,2-").select(&rec), vec!["a", "b", "b", "c"]);
    }

    #[test]
    fn test_reordering() {
        let rec = record(&["a", "b", "c"]);
        assert_eq!(selector("3,-2").select(&rec), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_identity() {
        let rec = record(&["a", "b", "c"]);
        let selector = FieldSelector::new(None);
        assert!(selector.is_identity());
        assert_eq!(selector.select(&rec), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_record() {
        assert!(selector("1-").select(&[]).is_empty());
    }
}
