use super::FilePath;
use std::collections::BTreeSet;

/// Pending files, kept sorted and free of duplicates.
///
/// Backed by a `BTreeSet`, so both invariants hold after every mutation
/// without a separate sort/dedup pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkList {
    entries: BTreeSet<FilePath>,
}

impl WorkList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge new paths into the list.
    ///
    /// Duplicates among the input and against existing entries collapse to
    /// a single entry. Returns the number of entries that were not pending
    /// before the call.
    pub fn merge<I>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = FilePath>,
    {
        let before = self.entries.len();
        self.entries.extend(paths);
        self.entries.len() - before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, path: &FilePath) -> bool {
        self.entries.contains(path)
    }

    /// Iterate in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &FilePath> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a WorkList {
    type Item = &'a FilePath;
    type IntoIter = std::collections::btree_set::Iter<'a, FilePath>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(items: &[&str]) -> Vec<FilePath> {
        items.iter().map(|p| FilePath::from(*p)).collect()
    }

    fn as_strings(list: &WorkList) -> Vec<&str> {
        list.iter().map(FilePath::as_str).collect()
    }

    #[test]
    fn test_new_work_list_is_empty() {
        let list = WorkList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_merge_sorts_and_dedups() {
        let mut list = WorkList::new();
        let added = list.merge(paths(&["/tmp/b.exe", "/tmp/a.exe", "/tmp/b.exe"]));

        assert_eq!(added, 2);
        assert_eq!(as_strings(&list), vec!["/tmp/a.exe", "/tmp/b.exe"]);
    }

    #[test]
    fn test_merge_against_existing() {
        let mut list = WorkList::new();
        list.merge(paths(&["/tmp/c.exe", "/tmp/a.exe"]));
        let added = list.merge(paths(&["/tmp/a.exe", "/tmp/b.exe"]));

        assert_eq!(added, 1);
        assert_eq!(as_strings(&list), vec!["/tmp/a.exe", "/tmp/b.exe", "/tmp/c.exe"]);
    }

    #[test]
    fn test_merge_empty_is_noop() {
        let mut list = WorkList::new();
        list.merge(paths(&["/tmp/a.exe"]));
        let snapshot = list.clone();

        assert_eq!(list.merge(Vec::new()), 0);
        assert_eq!(list, snapshot);
    }

    #[test]
    fn test_clear() {
        let mut list = WorkList::new();
        list.merge(paths(&["/tmp/a.exe", "/tmp/b.exe"]));
        list.clear();

        assert!(list.is_empty());
        assert!(!list.contains(&FilePath::from("/tmp/a.exe")));
    }
}
