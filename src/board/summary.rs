//! Summary counts shown above the order list

use crate::core::{OrderRecord, Size};
use serde::Serialize;

/// Total and per-size counts over a set of orders
///
/// Always derived from the records at hand and never stored, so it cannot
/// drift from the list it describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeSummary {
    counts: [usize; Size::ALL.len()],
}

impl SizeSummary {
    pub fn from_records(records: &[OrderRecord]) -> Self {
        let mut counts = [0; Size::ALL.len()];
        for record in records {
            counts[Self::slot(record.size)] += 1;
        }
        Self { counts }
    }

    fn slot(size: Size) -> usize {
        match size {
            Size::Xs => 0,
            Size::S => 1,
            Size::M => 2,
            Size::L => 3,
            Size::Xl => 4,
        }
    }

    /// Number of orders; always the sum of the per-size counts
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn count(&self, size: Size) -> usize {
        self.counts[Self::slot(size)]
    }

    /// `(size, count)` pairs in display order, zeros included
    pub fn by_size(&self) -> impl Iterator<Item = (Size, usize)> + '_ {
        Size::ALL.into_iter().map(|size| (size, self.count(size)))
    }
}

impl Serialize for SizeSummary {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(Size::ALL.len() + 1))?;
        map.serialize_entry("total", &self.total())?;
        for (size, count) in self.by_size() {
            map.serialize_entry(size.as_str(), &count)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NewOrder, Quantity, StoreReceipt};

    fn record(size: Size) -> OrderRecord {
        OrderRecord::from_new(
            NewOrder::new("A", "a@b.c", "1", "x", size, Quantity::default()),
            StoreReceipt::new(),
        )
    }

    #[test]
    fn test_empty_summary() {
        let summary = SizeSummary::from_records(&[]);
        assert_eq!(summary.total(), 0);
        assert!(summary.by_size().all(|(_, count)| count == 0));
    }

    #[test]
    fn test_counts_group_by_size() {
        let records = vec![
            record(Size::M),
            record(Size::M),
            record(Size::Xl),
            record(Size::Xs),
        ];
        let summary = SizeSummary::from_records(&records);

        assert_eq!(summary.total(), 4);
        assert_eq!(summary.count(Size::M), 2);
        assert_eq!(summary.count(Size::Xl), 1);
        assert_eq!(summary.count(Size::Xs), 1);
        assert_eq!(summary.count(Size::S), 0);
        assert_eq!(
            summary.total(),
            summary.by_size().map(|(_, count)| count).sum::<usize>()
        );
    }

    #[test]
    fn test_serializes_with_total_first() {
        let summary = SizeSummary::from_records(&[record(Size::L)]);
        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(json, r#"{"total":1,"XS":0,"S":0,"M":0,"L":1,"XL":0}"#);
    }
}
