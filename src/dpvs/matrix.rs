//! Square matrices over a prime field.

use core::ops::Mul;
use group::ff::Field;
use rand::RngCore;

/// Square matrix stored row by row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix<F> {
    dim: usize,
    rows: Vec<Vec<F>>,
}

impl<F: Field> Matrix<F> {
    pub fn zero(dim: usize) -> Self {
        Matrix {
            dim,
            rows: vec![vec![F::zero(); dim]; dim],
        }
    }

    pub fn identity(dim: usize) -> Self {
        let mut m = Self::zero(dim);
        for i in 0..dim {
            m.rows[i][i] = F::one();
        }

        m
    }

    /// Matrix with independent uniformly random entries.
    pub fn random<R: RngCore>(dim: usize, rng: &mut R) -> Self {
        let rows = (0..dim)
            .map(|_| (0..dim).map(|_| F::random(&mut *rng)).collect())
            .collect();

        Matrix { dim, rows }
    }

    pub fn from_rows(rows: Vec<Vec<F>>) -> Self {
        let dim = rows.len();
        debug_assert!(rows.iter().all(|row| row.len() == dim));

        Matrix { dim, rows }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn row(&self, i: usize) -> &[F] {
        &self.rows[i]
    }

    pub fn get(&self, i: usize, j: usize) -> F {
        self.rows[i][j]
    }

    pub fn transpose(&self) -> Self {
        let rows = (0..self.dim)
            .map(|j| (0..self.dim).map(|i| self.rows[i][j]).collect())
            .collect();

        Matrix {
            dim: self.dim,
            rows,
        }
    }

    /// Gauss-Jordan elimination on `[A | I]`. Returns `None` for a singular matrix.
    pub fn invert(&self) -> Option<Self> {
        let n = self.dim;
        let mut aug: Vec<Vec<F>> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let mut r = row.clone();
                r.extend((0..n).map(|j| if i == j { F::one() } else { F::zero() }));
                r
            })
            .collect();

        for col in 0..n {
            let pivot = (col..n).find(|&r| !bool::from(aug[r][col].is_zero()))?;
            aug.swap(col, pivot);

            let inv = Option::<F>::from(aug[col][col].invert())?;
            for x in aug[col].iter_mut() {
                *x *= inv;
            }

            let pivot_row = aug[col].clone();
            for (r, row) in aug.iter_mut().enumerate() {
                if r == col {
                    continue;
                }

                let factor = row[col];
                if bool::from(factor.is_zero()) {
                    continue;
                }

                for (x, p) in row.iter_mut().zip(pivot_row.iter()) {
                    *x -= factor * *p;
                }
            }
        }

        let rows = aug.into_iter().map(|row| row[n..].to_vec()).collect();

        Some(Matrix { dim: n, rows })
    }
}

impl<'a, F: Field> Mul<&'a Matrix<F>> for &'a Matrix<F> {
    type Output = Matrix<F>;

    fn mul(self, rhs: &'a Matrix<F>) -> Matrix<F> {
        debug_assert_eq!(self.dim, rhs.dim);

        let mut out = Matrix::zero(self.dim);
        for i in 0..self.dim {
            for j in 0..self.dim {
                out.rows[i][j] = (0..self.dim).fold(F::zero(), |acc, k| {
                    acc + self.rows[i][k] * rhs.rows[k][j]
                });
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use irmaseal_curve::Scalar;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn random_inverse() {
        let mut rng = ChaCha20Rng::seed_from_u64(13);

        for dim in [1usize, 2, 5, 13].iter() {
            let m = Matrix::<Scalar>::random(*dim, &mut rng);
            let inv = m.invert().unwrap();

            assert_eq!(&m * &inv, Matrix::identity(*dim));
            assert_eq!(&inv * &m, Matrix::identity(*dim));
        }
    }

    #[test]
    fn inverse_of_transpose_is_dual() {
        let mut rng = ChaCha20Rng::seed_from_u64(14);
        let m = Matrix::<Scalar>::random(7, &mut rng);
        let dual = m.transpose().invert().unwrap();

        // rows of m and rows of the dual are biorthogonal
        assert_eq!(&m * &dual.transpose(), Matrix::identity(7));
    }

    #[test]
    fn needs_row_swap() {
        let zero = Scalar::zero();
        let one = Scalar::one();
        let m = Matrix::from_rows(vec![vec![zero, one], vec![one, zero]]);

        assert_eq!(m.invert().unwrap(), m);
    }

    #[test]
    fn singular() {
        let one = Scalar::one();
        let two = one + one;
        let m = Matrix::from_rows(vec![vec![one, two], vec![two, two + two]]);

        assert!(m.invert().is_none());
        assert!(Matrix::<Scalar>::zero(3).invert().is_none());
    }
}
