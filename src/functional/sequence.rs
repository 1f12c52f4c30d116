//! 有序序列（`[T]`，也就是 `Vec<T>`）上的函數式擴充。
//!
//! 所有操作都只讀取輸入並建立新的容器，每個元素最多呼叫一次呼叫端提供的閉包。
//! `try_` 版本在閉包第一次回傳錯誤時立即中止，並原樣回傳該錯誤，不產生部分結果。

use super::narrow::{Narrow, Tagged};
use std::collections::HashMap;
use std::hash::Hash;

pub trait SequenceExt<T> {
    /// 對每個元素套用 `transform`，保持長度與順序
    fn map_with<U, F>(&self, transform: F) -> Vec<U>
    where
        F: FnMut(&T) -> U;

    /// 保留 `predicate` 為真的元素，維持原本的相對順序
    fn filter_with<F>(&self, predicate: F) -> Vec<T>
    where
        T: Clone,
        F: FnMut(&T) -> bool;

    /// 依序串接每個元素產生的子序列；空的或 `None` 的子序列不貢獻任何元素
    fn flatten_with<U, I, F>(&self, transform: F) -> Vec<U>
    where
        I: IntoIterator<Item = U>,
        F: FnMut(&T) -> I;

    /// 將每個元素產生的零或多個鍵值對合併成字典。
    ///
    /// 鍵衝突時以迭代順序中最後寫入的值為準。
    fn map_to_dictionary<K, V, I, F>(&self, transform: F) -> HashMap<K, V>
    where
        K: Eq + Hash,
        I: IntoIterator<Item = (K, V)>,
        F: FnMut(&T) -> I;

    /// 只保留能窄化成 `U` 的元素，依序回傳窄化後的複本
    fn objects_of_type<U>(&self) -> Vec<U>
    where
        T: Narrow<U>,
        U: Clone;

    /// 只保留標籤等於 `kind` 的元素
    fn objects_of_kind(&self, kind: <T as Tagged>::Kind) -> Vec<T>
    where
        T: Tagged + Clone;

    /// 第一個滿足 `predicate` 的元素
    fn first_matching<F>(&self, predicate: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool;

    fn contains_matching<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&T) -> bool;

    fn try_map_with<U, E, F>(&self, transform: F) -> Result<Vec<U>, E>
    where
        F: FnMut(&T) -> Result<U, E>;

    fn try_filter_with<E, F>(&self, predicate: F) -> Result<Vec<T>, E>
    where
        T: Clone,
        F: FnMut(&T) -> Result<bool, E>;

    fn try_flatten_with<U, I, E, F>(&self, transform: F) -> Result<Vec<U>, E>
    where
        I: IntoIterator<Item = U>,
        F: FnMut(&T) -> Result<I, E>;

    fn try_map_to_dictionary<K, V, I, E, F>(&self, transform: F) -> Result<HashMap<K, V>, E>
    where
        K: Eq + Hash,
        I: IntoIterator<Item = (K, V)>,
        F: FnMut(&T) -> Result<I, E>;

    fn try_first_matching<E, F>(&self, predicate: F) -> Result<Option<&T>, E>
    where
        F: FnMut(&T) -> Result<bool, E>;

    fn try_contains_matching<E, F>(&self, predicate: F) -> Result<bool, E>
    where
        F: FnMut(&T) -> Result<bool, E>;
}

impl<T> SequenceExt<T> for [T] {
    fn map_with<U, F>(&self, transform: F) -> Vec<U>
    where
        F: FnMut(&T) -> U,
    {
        self.iter().map(transform).collect()
    }

    fn filter_with<F>(&self, mut predicate: F) -> Vec<T>
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        self.iter().filter(|item| predicate(item)).cloned().collect()
    }

    fn flatten_with<U, I, F>(&self, transform: F) -> Vec<U>
    where
        I: IntoIterator<Item = U>,
        F: FnMut(&T) -> I,
    {
        self.iter().flat_map(transform).collect()
    }

    fn map_to_dictionary<K, V, I, F>(&self, transform: F) -> HashMap<K, V>
    where
        K: Eq + Hash,
        I: IntoIterator<Item = (K, V)>,
        F: FnMut(&T) -> I,
    {
        // HashMap 的 FromIterator 逐一 insert，後到的值覆蓋先前的值
        self.iter().flat_map(transform).collect()
    }

    fn objects_of_type<U>(&self) -> Vec<U>
    where
        T: Narrow<U>,
        U: Clone,
    {
        self.iter().filter_map(|item| Narrow::<U>::narrow(item)).cloned().collect()
    }

    fn objects_of_kind(&self, kind: <T as Tagged>::Kind) -> Vec<T>
    where
        T: Tagged + Clone,
    {
        self.filter_with(|item| item.kind() == kind)
    }

    fn first_matching<F>(&self, mut predicate: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().find(|item| predicate(item))
    }

    fn contains_matching<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().any(predicate)
    }

    fn try_map_with<U, E, F>(&self, transform: F) -> Result<Vec<U>, E>
    where
        F: FnMut(&T) -> Result<U, E>,
    {
        self.iter().map(transform).collect()
    }

    fn try_filter_with<E, F>(&self, mut predicate: F) -> Result<Vec<T>, E>
    where
        T: Clone,
        F: FnMut(&T) -> Result<bool, E>,
    {
        let mut kept = Vec::new();
        for item in self {
            if predicate(item)? {
                kept.push(item.clone());
            }
        }
        Ok(kept)
    }

    fn try_flatten_with<U, I, E, F>(&self, mut transform: F) -> Result<Vec<U>, E>
    where
        I: IntoIterator<Item = U>,
        F: FnMut(&T) -> Result<I, E>,
    {
        let mut flattened = Vec::new();
        for item in self {
            flattened.extend(transform(item)?);
        }
        Ok(flattened)
    }

    fn try_map_to_dictionary<K, V, I, E, F>(&self, mut transform: F) -> Result<HashMap<K, V>, E>
    where
        K: Eq + Hash,
        I: IntoIterator<Item = (K, V)>,
        F: FnMut(&T) -> Result<I, E>,
    {
        let mut dictionary = HashMap::new();
        for item in self {
            dictionary.extend(transform(item)?);
        }
        Ok(dictionary)
    }

    fn try_first_matching<E, F>(&self, mut predicate: F) -> Result<Option<&T>, E>
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

    fn try_contains_matching<E, F>(&self, predicate: F) -> Result<bool, E>
    where
        F: FnMut(&T) -> Result<bool, E>,
    {
        Ok(self.try_first_matching(predicate)?.is_some())
    }
}
