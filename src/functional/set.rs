use super::narrow::{Narrow, Tagged};
use std::collections::HashSet;
use std::hash::{BuildHasher, Hash};

/// 無序集合上的函數式擴充，不保證任何順序
pub trait SetExt<T> {
    /// 對每個元素套用 `transform` 並依相等性去重。
    ///
    /// `transform` 不是單射時，輸出可能比輸入少。
    fn map_with<U, F>(&self, transform: F) -> HashSet<U>
    where
        U: Eq + Hash,
        F: FnMut(&T) -> U;

    fn objects_of_type<U>(&self) -> HashSet<U>
    where
        T: Narrow<U>,
        U: Eq + Hash + Clone;

    fn objects_of_kind(&self, kind: <T as Tagged>::Kind) -> HashSet<T>
    where
        T: Tagged + Eq + Hash + Clone;

    /// 任一個滿足 `predicate` 的元素；多個符合時選哪一個沒有保證
    fn any_matching<F>(&self, predicate: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool;

    fn try_map_with<U, E, F>(&self, transform: F) -> Result<HashSet<U>, E>
    where
        U: Eq + Hash,
        F: FnMut(&T) -> Result<U, E>;

    fn try_any_matching<E, F>(&self, predicate: F) -> Result<Option<&T>, E>
    where
        F: FnMut(&T) -> Result<bool, E>;
}

impl<T, S: BuildHasher> SetExt<T> for HashSet<T, S> {
    fn map_with<U, F>(&self, transform: F) -> HashSet<U>
    where
        U: Eq + Hash,
        F: FnMut(&T) -> U,
    {
        self.iter().map(transform).collect()
    }

    fn objects_of_type<U>(&self) -> HashSet<U>
    where
        T: Narrow<U>,
        U: Eq + Hash + Clone,
    {
        self.iter()
            .filter_map(|item| Narrow::<U>::narrow(item))
            .cloned()
            .collect()
    }

    fn objects_of_kind(&self, kind: <T as Tagged>::Kind) -> HashSet<T>
    where
        T: Tagged + Eq + Hash + Clone,
    {
        self.iter()
            .filter(|item| item.kind() == kind)
            .cloned()
            .collect()
    }

    fn any_matching<F>(&self, mut predicate: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().find(|item| predicate(item))
    }

    fn try_map_with<U, E, F>(&self, transform: F) -> Result<HashSet<U>, E>
    where
        U: Eq + Hash,
        F: FnMut(&T) -> Result<U, E>,
    {
        self.iter().map(transform).collect()
    }

    fn try_any_matching<E, F>(&self, mut predicate: F) -> Result<Option<&T>, E>
    where
        F: FnMut(&T) -> Result<bool, E>,
    {
        for item in self {
            if predicate(item)? {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }
}
