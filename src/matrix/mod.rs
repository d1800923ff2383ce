//! Compressed sparse row storage for the corpus representation matrix

use crate::{Error, Result};

/// One encoded document: index-value pairs for its non-zero features.
#[derive(Debug, Clone)]
pub struct SparseVector {
    pub indices: Vec<u32>,
    pub values: Vec<f32>,
}

impl SparseVector {
    /// # Panics
    /// Panics if `indices` and `values` have different lengths.
    pub fn new(indices: Vec<u32>, values: Vec<f32>) -> Self {
        assert_eq!(
            indices.len(),
            values.len(),
            "indices and values must have the same length"
        );
        SparseVector { indices, values }
    }

    pub fn empty() -> Self {
        SparseVector {
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Number of non-zero entries.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Row-major sparse matrix: documents are rows, features are columns.
///
/// Stored as row offsets + column indices + values. Row `i` occupies
/// `col_indices[row_offsets[i]..row_offsets[i + 1]]` (same range in
/// `values`). Absent entries are zero.
pub struct CsrMatrix {
    row_offsets: Vec<usize>,
    col_indices: Vec<u32>,
    values: Vec<f32>,
    cols: usize,
}

impl CsrMatrix {
    /// Pack encoded rows into CSR form. Rejects any feature index at or
    /// beyond `cols`, since a row that leaks outside the declared feature
    /// space can never align with query representations.
    pub fn from_rows(rows: &[SparseVector], cols: usize) -> Result<Self> {
        let nnz = rows.iter().map(SparseVector::len).sum();
        let mut row_offsets = Vec::with_capacity(rows.len() + 1);
        let mut col_indices = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);

        row_offsets.push(0);
        for row in rows {
            if let Some(&bad) = row.indices.iter().find(|&&c| c as usize >= cols) {
                return Err(Error::Encoding(format!(
                    "Row feature index {bad} outside the feature space of {cols}"
                )));
            }
            col_indices.extend_from_slice(&row.indices);
            values.extend_from_slice(&row.values);
            row_offsets.push(col_indices.len());
        }

        Ok(Self {
            row_offsets,
            col_indices,
            values,
            cols,
        })
    }

    pub fn rows(&self) -> usize {
        self.row_offsets.len() - 1
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    fn row(&self, i: usize) -> (&[u32], &[f32]) {
        let range = self.row_offsets[i]..self.row_offsets[i + 1];
        (&self.col_indices[range.clone()], &self.values[range])
    }

    /// Matrix-vector product against a dense query vector. The caller must
    /// have validated `query.len() == self.cols()`.
    pub fn dot(&self, query: &[f32]) -> Vec<f32> {
        debug_assert_eq!(query.len(), self.cols);

        (0..self.rows())
            .map(|i| {
                let (cols, vals) = self.row(i);
                cols.iter()
                    .zip(vals)
                    .map(|(&c, &v)| v * query[c as usize])
                    .sum()
            })
            .collect()
    }

    /// Per-row sum over a set of selected columns. Builds a column-membership
    /// bitmap, then scans every stored entry once: O(cols) setup plus O(nnz),
    /// independent of how many columns are selected.
    pub fn sum_columns(&self, selected: &[u32]) -> Vec<f32> {
        let mut member = vec![false; self.cols];
        for &c in selected {
            member[c as usize] = true;
        }

        (0..self.rows())
            .map(|i| {
                let (cols, vals) = self.row(i);
                cols.iter()
                    .zip(vals)
                    .filter(|(&c, _)| member[c as usize])
                    .map(|(_, &v)| v)
                    .sum()
            })
            .collect()
    }
}
