//! Ordered numeric sequences backing vectors
//!
//! [`Tuple`] is a plain index-addressable list of reals. Deleting an element
//! shifts the tail down so indices never have gaps. [`CompactedTuple`] stores
//! the same values as a sorted multiset.

use crate::error::{check_finite, MatrixError, Result};

/// Ordered, 0-indexed sequence of real numbers
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tuple {
    data: Vec<f64>,
}

impl Tuple {
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.data.len() {
            return Err(MatrixError::invalid(format!(
                "Wrong index: {}, Tuple size is: {}",
                index,
                self.data.len()
            )));
        }
        Ok(())
    }

    pub fn element(&self, index: usize) -> Result<f64> {
        self.check_index(index)?;
        Ok(self.data[index])
    }

    pub fn set_element(&mut self, index: usize, value: f64) -> Result<()> {
        self.check_index(index)?;
        check_finite(value)?;
        self.data[index] = value;
        Ok(())
    }

    /// Append a value, returning its index
    pub fn add_element(&mut self, value: f64) -> Result<usize> {
        check_finite(value)?;
        self.data.push(value);
        Ok(self.data.len() - 1)
    }

    /// Remove the element at `index`; later elements move down by one
    pub fn del_element(&mut self, index: usize) -> Result<f64> {
        self.check_index(index)?;
        Ok(self.data.remove(index))
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    fn require_data(&self) -> Result<()> {
        if self.data.is_empty() {
            return Err(MatrixError::Uninitialized("Tuple has no elements".to_string()));
        }
        Ok(())
    }

    pub fn min(&self) -> Result<f64> {
        self.require_data()?;
        Ok(self.data.iter().copied().fold(f64::INFINITY, f64::min))
    }

    pub fn max(&self) -> Result<f64> {
        self.require_data()?;
        Ok(self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max))
    }

    pub fn min_max(&self) -> Result<(f64, f64)> {
        Ok((self.min()?, self.max()?))
    }

    /// Position of the first element equal to `value`
    pub fn value_index(&self, value: f64) -> Option<usize> {
        self.data.iter().position(|&x| x == value)
    }

    /// First index whose element no other element beats under `better`
    fn extreme_index(&self, better: fn(f64, f64) -> bool) -> Result<usize> {
        self.require_data()?;
        let mut idx = 0;
        for (i, &x) in self.data.iter().enumerate().skip(1) {
            if better(x, self.data[idx]) {
                idx = i;
            }
        }
        Ok(idx)
    }

    /// Index of the first occurrence of the minimum
    pub fn min_index(&self) -> Result<usize> {
        self.extreme_index(|x, best| x < best)
    }

    pub fn max_index(&self) -> Result<usize> {
        self.extreme_index(|x, best| x > best)
    }

    pub fn min_max_index(&self) -> Result<(usize, usize)> {
        Ok((self.min_index()?, self.max_index()?))
    }

    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|&x| x == 0.0)
    }
}

impl From<Vec<f64>> for Tuple {
    fn from(data: Vec<f64>) -> Self {
        Self::new(data)
    }
}

impl From<&[f64]> for Tuple {
    fn from(data: &[f64]) -> Self {
        Self::new(data.to_vec())
    }
}

impl std::fmt::Display for Tuple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.data.iter().map(|x| x.to_string()).collect();
        write!(f, "{{ {} }}", parts.join(", "))
    }
}

/// Multiset of reals: each distinct value is stored once with its count
///
/// Entries are kept sorted by value so `data()` expands deterministically.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompactedTuple {
    entries: Vec<(f64, usize)>,
}

impl CompactedTuple {
    pub fn new(values: &[f64]) -> Result<Self> {
        let mut compacted = Self::default();
        for &v in values {
            compacted.add_element(v)?;
        }
        Ok(compacted)
    }

    fn search(&self, value: f64) -> std::result::Result<usize, usize> {
        self.entries.binary_search_by(|(v, _)| v.total_cmp(&value))
    }

    /// Total number of values, counting repeats
    pub fn size(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Number of distinct values
    pub fn compacted_size(&self) -> usize {
        self.entries.len()
    }

    /// `(value, count)` pairs in ascending value order
    pub fn compacted_data(&self) -> &[(f64, usize)] {
        &self.entries
    }

    /// Expanded, sorted values
    pub fn data(&self) -> Vec<f64> {
        self.entries
            .iter()
            .flat_map(|&(v, count)| std::iter::repeat(v).take(count))
            .collect()
    }

    pub fn add_element(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(MatrixError::invalid(format!(
                "Error, a numeric value is needed. You used: {}",
                value
            )));
        }
        self.insert(value);
        Ok(())
    }

    fn insert(&mut self, value: f64) {
        match self.search(value) {
            Ok(pos) => self.entries[pos].1 += 1,
            Err(pos) => self.entries.insert(pos, (value, 1)),
        }
    }

    /// Remove one occurrence of `value`
    pub fn del_element(&mut self, value: f64) -> Result<()> {
        match self.search(value) {
            Ok(pos) => {
                self.entries[pos].1 -= 1;
                if self.entries[pos].1 == 0 {
                    self.entries.remove(pos);
                }
                Ok(())
            }
            Err(_) => Err(MatrixError::invalid(format!(
                "value {} does not exist in compacted tuple",
                value
            ))),
        }
    }

    pub fn has_element(&self, value: f64) -> bool {
        self.search(value).is_ok()
    }
}

impl From<&Tuple> for CompactedTuple {
    fn from(tuple: &Tuple) -> Self {
        let mut compacted = Self::default();
        for &v in tuple.data() {
            compacted.insert(v);
        }
        compacted
    }
}
