//! Dense matrix product kernel used by [`crate::Matrix::multiply`].
//!
//! A plain triple loop over row-major buffers. Shapes are validated by the caller.

/// Computes `c = a · b` where `a` is `(m, k)`, `b` is `(k, n)` and `c` is `(m, n)`,
/// all row-major. `c` is overwritten.
#[inline]
pub(crate) fn gemm(m: usize, n: usize, k: usize, a: &[f64], b: &[f64], c: &mut [f64]) {
    debug_assert_eq!(a.len(), m * k);
    debug_assert_eq!(b.len(), k * n);
    debug_assert_eq!(c.len(), m * n);

    for i in 0..m {
        let a_row = &a[i * k..(i + 1) * k];
        for j in 0..n {
            let mut acc = 0.0_f64;
            for (p, &av) in a_row.iter().enumerate() {
                acc += av * b[p * n + j];
            }
            c[i * n + j] = acc;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gemm_matches_hand_computed_product() {
        // (2x3) * (3x2)
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = [7.0, 8.0, 9.0, 10.0, 11.0, 12.0];
        let mut c = [0.0; 4];
        gemm(2, 2, 3, &a, &b, &mut c);
        assert_eq!(c, [58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn gemm_overwrites_output() {
        let a = [2.0];
        let b = [3.0];
        let mut c = [100.0];
        gemm(1, 1, 1, &a, &b, &mut c);
        assert_eq!(c, [6.0]);
    }
}
