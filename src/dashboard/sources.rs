//! Raw inputs for a dashboard run.

use crate::domain::{Series, SeriesId};

/// Raw segments per series, in the order the series were first supplied.
///
/// Insertion order is significant: it becomes the processing order and the
/// column order of the combined table.
#[derive(Debug, Clone, Default)]
pub struct SourceSet {
    entries: Vec<(SeriesId, Vec<Series>)>,
}

impl SourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment for `id`. Segments of one series keep their order
    /// (later segments take precedence when merged).
    pub fn push(&mut self, id: SeriesId, segment: Series) {
        match self.entries.iter_mut().find(|(k, _)| *k == id) {
            Some((_, segments)) => segments.push(segment),
            None => self.entries.push((id, vec![segment])),
        }
    }

    pub fn with(mut self, id: SeriesId, segment: Series) -> Self {
        self.push(id, segment);
        self
    }

    pub fn contains(&self, id: SeriesId) -> bool {
        self.entries.iter().any(|(k, _)| *k == id)
    }

    /// Series ids in discovery order.
    pub fn ids(&self) -> impl Iterator<Item = SeriesId> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<(SeriesId, Vec<Series>)> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_discovery_order() {
        let set = SourceSet::new()
            .with(SeriesId::Gasoline, Series::default())
            .with(SeriesId::Cpi, Series::default())
            .with(SeriesId::Gasoline, Series::default());
        assert_eq!(set.ids().collect::<Vec<_>>(), vec![SeriesId::Gasoline, SeriesId::Cpi]);
        let entries = set.into_entries();
        assert_eq!(entries[0].1.len(), 2);
    }
}
