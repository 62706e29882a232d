//! Square matrix storage and arithmetic.

use std::fmt;

use crate::error::{GraphError, Result};

/// A dense `size`×`size` integer matrix stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquareMatrix {
    size: usize,
    cells: Vec<i64>,
}

impl SquareMatrix {
    /// Build a matrix from explicit rows.
    ///
    /// Fails with [`GraphError::NotSquare`] if any row's length differs from
    /// the number of rows.
    pub fn new(grid: Vec<Vec<i64>>) -> Result<Self> {
        let size = grid.len();
        if let Some((row, columns)) = grid
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != size)
        {
            return Err(GraphError::NotSquare {
                rows: size,
                row,
                columns,
            });
        }
        Ok(Self {
            size,
            cells: grid.into_iter().flatten().collect(),
        })
    }

    /// Build a matrix from `size * size` row-major values.
    pub fn from_row_major(size: usize, cells: Vec<i64>) -> Result<Self> {
        if cells.len() != size * size {
            return Err(GraphError::NotSquare {
                rows: size,
                row: cells.len() / size.max(1),
                columns: cells.len() % size.max(1),
            });
        }
        Ok(Self { size, cells })
    }

    /// Create a zero-filled matrix.
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Create the multiplicative identity.
    pub fn identity(size: usize) -> Self {
        let mut m = Self::zeros(size);
        for i in 0..size {
            m.cells[i * size + i] = 1;
        }
        m
    }

    /// Matrix dimension.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get matrix element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<i64> {
        let idx = self.index(row, col)?;
        Ok(self.cells[idx])
    }

    /// Set matrix element at (row, col).
    ///
    /// Graphs treat their matrix as immutable; this exists for owning code
    /// that edits a private copy.
    pub fn set(&mut self, row: usize, col: usize, value: i64) -> Result<()> {
        let idx = self.index(row, col)?;
        self.cells[idx] = value;
        Ok(())
    }

    /// Zero row `index` and column `index`. Returns how many `j` had a
    /// nonzero entry at `(index, j)` or `(j, index)`; an index outside the
    /// matrix changes nothing.
    pub(crate) fn clear_row_and_column(&mut self, index: usize) -> usize {
        let n = self.size;
        if index >= n {
            return 0;
        }

        let mut cleared = 0;
        for j in 0..n {
            let (in_row, in_col) = (index * n + j, j * n + index);
            if self.cells[in_row] != 0 || self.cells[in_col] != 0 {
                cleared += 1;
            }
            self.cells[in_row] = 0;
            self.cells[in_col] = 0;
        }
        cleared
    }

    /// Iterate over the rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[i64]> {
        // chunks(0) panics, and an empty matrix has no rows anyway
        self.cells.chunks(self.size.max(1)).take(self.size)
    }

    /// All row-major values.
    pub fn as_slice(&self) -> &[i64] {
        &self.cells
    }

    /// The `size` entries where row == column, in order.
    pub fn diagonal(&self) -> Vec<i64> {
        (0..self.size)
            .map(|i| self.cells[i * self.size + i])
            .collect()
    }

    /// Check `a[i][j] == a[j][i]` for every pair.
    pub fn is_symmetric(&self) -> bool {
        let n = self.size;
        (0..n).all(|i| ((i + 1)..n).all(|j| self.cells[i * n + j] == self.cells[j * n + i]))
    }

    /// Replace every non-zero entry with 1.
    pub fn presence(&self) -> Self {
        Self {
            size: self.size,
            cells: self.cells.iter().map(|&v| i64::from(v != 0)).collect(),
        }
    }

    /// Standard matrix product `self · other`.
    pub fn multiply(&self, other: &SquareMatrix) -> Result<Self> {
        self.check_same_size(other)?;
        let n = self.size;
        let mut result = Self::zeros(n);

        for row in 0..n {
            for k in 0..n {
                let a = self.cells[row * n + k];
                if a == 0 {
                    continue;
                }
                for col in 0..n {
                    let term = a
                        .checked_mul(other.cells[k * n + col])
                        .ok_or(GraphError::ArithmeticOverflow {
                            operation: "matrix multiplication",
                        })?;
                    let cell = &mut result.cells[row * n + col];
                    *cell = cell.checked_add(term).ok_or(GraphError::ArithmeticOverflow {
                        operation: "matrix multiplication",
                    })?;
                }
            }
        }

        Ok(result)
    }

    /// Boolean-semiring product: 1 where any term of the exact product is
    /// non-zero, 0 elsewhere.
    pub fn multiply_existence(&self, other: &SquareMatrix) -> Result<Self> {
        self.check_same_size(other)?;
        let n = self.size;
        let mut result = Self::zeros(n);

        for row in 0..n {
            for col in 0..n {
                let reachable = (0..n)
                    .any(|k| self.cells[row * n + k] != 0 && other.cells[k * n + col] != 0);
                result.cells[row * n + col] = i64::from(reachable);
            }
        }

        Ok(result)
    }

    /// Raise the matrix to a non-negative power. `power(0)` is the identity.
    pub fn power(&self, exponent: u32) -> Result<Self> {
        let mut result = Self::identity(self.size);
        let mut base = self.clone();
        let mut e = exponent;

        while e > 0 {
            if e & 1 == 1 {
                result = result.multiply(&base)?;
            }
            e >>= 1;
            if e > 0 {
                base = base.multiply(&base)?;
            }
        }

        Ok(result)
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.size {
            return Err(GraphError::index_out_of_range(row, self.size));
        }
        if col >= self.size {
            return Err(GraphError::index_out_of_range(col, self.size));
        }
        Ok(row * self.size + col)
    }

    fn check_same_size(&self, other: &SquareMatrix) -> Result<()> {
        if self.size != other.size {
            return Err(GraphError::DimensionMismatch {
                left: self.size,
                right: other.size,
            });
        }
        Ok(())
    }
}

impl fmt::Display for SquareMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: Vec<String> = row.iter().map(i64::to_string).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
