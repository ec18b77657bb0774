use ecomap_model::FacilityId;
use std::collections::VecDeque;

/// Ids of the rows currently rendered, oldest first, bounded by `ceiling`.
#[derive(Debug, Clone)]
pub struct RenderedList {
    rows: VecDeque<FacilityId>,
    ceiling: usize,
    active: Option<FacilityId>,
}

impl RenderedList {
    pub fn new(ceiling: usize) -> Self {
        Self {
            rows: VecDeque::with_capacity(ceiling),
            ceiling,
            active: None,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    pub fn contains(&self, id: FacilityId) -> bool {
        self.rows.contains(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = FacilityId> + '_ {
        self.rows.iter().copied()
    }

    pub fn active(&self) -> Option<FacilityId> {
        self.active
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.active = None;
    }

    /// Replace every row; repeated ids keep their first position.
    pub fn replace(
        &mut self,
        ids: impl IntoIterator<Item = FacilityId>,
    ) -> Vec<FacilityId> {
        self.clear();
        self.append(ids)
    }

    /// Push ids that are not rendered yet; returns the ones pushed.
    pub fn append(
        &mut self,
        ids: impl IntoIterator<Item = FacilityId>,
    ) -> Vec<FacilityId> {
        let mut added = Vec::new();
        for id in ids {
            if !self.rows.contains(&id) {
                self.rows.push_back(id);
                added.push(id);
            }
        }
        added
    }

    /// Pop rows from the head until within the ceiling; returns how many.
    pub fn evict_overflow(&mut self) -> usize {
        let mut evicted = 0;
        while self.rows.len() > self.ceiling {
            if let Some(id) = self.rows.pop_front() {
                if self.active == Some(id) {
                    self.active = None;
                }
                evicted += 1;
            }
        }
        evicted
    }

    /// Mark `id` active if it is rendered; otherwise clear the active row.
    pub fn set_active(&mut self, id: FacilityId) -> Option<FacilityId> {
        self.active = self.contains(id).then_some(id);
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(range: std::ops::RangeInclusive<u64>) -> Vec<FacilityId> {
        range.map(FacilityId).collect()
    }

    #[test]
    fn eviction_trims_oldest_rows() {
        let mut list = RenderedList::new(100);
        list.append(ids(1..=105));

        assert_eq!(list.evict_overflow(), 5);
        assert_eq!(list.len(), 100);
        assert_eq!(list.ids().next(), Some(FacilityId(6)));
        assert!(!list.contains(FacilityId(5)));
    }

    #[test]
    fn evicting_active_row_clears_it() {
        let mut list = RenderedList::new(2);
        list.append(ids(1..=2));
        list.set_active(FacilityId(1));
        list.append(ids(3..=3));
        list.evict_overflow();
        assert_eq!(list.active(), None);
    }

    #[test]
    fn duplicates_are_not_rendered_twice() {
        let mut list = RenderedList::new(100);
        list.append(ids(1..=5));
        let added = list.append(ids(4..=7));
        assert_eq!(added, ids(6..=7));
        assert_eq!(list.len(), 7);
    }

    #[test]
    fn set_active_ignores_missing_rows() {
        let mut list = RenderedList::new(10);
        list.append(ids(1..=3));
        assert_eq!(list.set_active(FacilityId(2)), Some(FacilityId(2)));
        assert_eq!(list.set_active(FacilityId(9)), None);
        assert_eq!(list.active(), None);
    }
}
