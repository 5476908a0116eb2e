//! LAPACK routines: singular value decomposition.
//!
//! `sgesdd` follows the LAPACK driver contract:
//!
//! - **Two-phase workspace protocol**: call once with `lwork == -1` and the
//!   routine reports the required scratch length in `work[0]` without
//!   computing; call again with a buffer of that length to decompose.
//! - **Integer status codes**: 0 on success, `-i` when the i-th argument
//!   is invalid, > 0 when the iteration fails to converge.
//!
//! The algorithm is the classical dense path: Householder reduction to
//! upper bidiagonal form, factor accumulation by backward application of
//! the reflectors, then implicit-shift QR (Golub-Kahan) on the bidiagonal
//! with zero-diagonal deflation. Wide inputs (M < N) are decomposed through
//! their transpose with the factor roles swapped. All scratch lives in the
//! caller-supplied `work` buffer.

use marlin_core::layout::{Layout, SvdJob};

/// Relative threshold for treating a superdiagonal or diagonal as zero.
const TOL: f32 = 1.0e-6;

/// QR iteration budget per singular value.
const MAX_STEPS_PER_VALUE: usize = 100;

/// Single-precision SVD: A = U * diag(S) * Vt.
///
/// Factor shapes per job are documented on [`SvdJob`]. `a` is read only;
/// the working copy lives in `work`.
///
/// - `a` - M x N input matrix, leading dimension `lda`
/// - `s` - receives min(M, N) singular values, descending, non-negative
/// - `u`, `vt` - factor outputs (not referenced for `ValuesOnly`)
/// - `work` - scratch; pass `lwork == -1` to query the required length
/// - `iwork` - integer scratch, at least 8 * min(M, N) entries
///
/// Returns 0 on success, -i if the i-th argument is invalid, or the number
/// of superdiagonals that failed to converge.
pub fn sgesdd(
    layout: Layout,
    job: SvdJob,
    m: usize,
    n: usize,
    a: &[f32],
    lda: usize,
    s: &mut [f32],
    u: &mut [f32],
    ldu: usize,
    vt: &mut [f32],
    ldvt: usize,
    work: &mut [f32],
    lwork: isize,
    iwork: &mut [usize],
) -> i32 {
    let k = m.min(n);
    let mm = m.max(n);

    if m < 1 {
        return -3;
    }
    if n < 1 {
        return -4;
    }
    if lda < layout.leading_dim(m, n) {
        return -6;
    }
    let a_needed = match layout {
        Layout::ColMajor => lda * n,
        Layout::RowMajor => lda * m,
    };
    if a.len() < a_needed {
        return -5;
    }
    if s.len() < k {
        return -7;
    }
    let u_cols = job.u_cols(m, k);
    let vt_rows = job.vt_rows(k, n);
    if job.wants_factors() {
        if ldu < layout.leading_dim(m, u_cols) {
            return -9;
        }
        let u_needed = match layout {
            Layout::ColMajor => ldu * u_cols,
            Layout::RowMajor => ldu * m,
        };
        if u.len() < u_needed {
            return -8;
        }
        if ldvt < layout.leading_dim(vt_rows, n) {
            return -11;
        }
        let vt_needed = match layout {
            Layout::ColMajor => ldvt * n,
            Layout::RowMajor => ldvt * vt_rows,
        };
        if vt.len() < vt_needed {
            return -10;
        }
    }
    if work.is_empty() {
        return -12;
    }

    let required = required_lwork(job, m, n);
    if lwork == -1 {
        work[0] = required as f32;
        return 0;
    }
    if lwork < required as isize {
        return -13;
    }
    if work.len() < required {
        return -12;
    }
    if iwork.len() < 8 * k {
        return -14;
    }

    let transposed = m < n;
    let t = if matches!(job, SvdJob::Full) { mm } else { k };

    // Partition the workspace: bidiagonal working matrix, reflector
    // scalars, the bidiagonal itself, then the factor accumulators.
    let (bmat, rest) = work.split_at_mut(mm * k);
    let (tauq, rest) = rest.split_at_mut(k);
    let (taup, rest) = rest.split_at_mut(k);
    let (d, rest) = rest.split_at_mut(k);
    let (e, rest) = rest.split_at_mut(k);
    let (mut uacc, mut vacc): (Option<&mut [f32]>, Option<&mut [f32]>) = if job.wants_factors() {
        let (ua, rest) = rest.split_at_mut(mm * t);
        let (va, _) = rest.split_at_mut(k * k);
        (Some(ua), Some(va))
    } else {
        (None, None)
    };

    // Copy A into the tall orientation (column-major, mm x k, lead mm).
    // Wide inputs are decomposed through their transpose.
    for j in 0..k {
        for i in 0..mm {
            bmat[i + j * mm] = if transposed {
                a[layout.index(j, i, lda)]
            } else {
                a[layout.index(i, j, lda)]
            };
        }
    }

    bidiagonalize(bmat, mm, k, tauq, taup);

    for i in 0..k {
        d[i] = bmat[i + i * mm];
        e[i] = if i + 1 < k { bmat[i + (i + 1) * mm] } else { 0.0 };
    }

    if let Some(ua) = uacc.as_deref_mut() {
        accumulate_left(bmat, mm, k, tauq, ua, t);
    }
    if let Some(va) = vacc.as_deref_mut() {
        accumulate_right(bmat, mm, k, taup, va);
    }

    let info = diagonalize(d, e, k, uacc.as_deref_mut(), mm, vacc.as_deref_mut(), k);
    if info != 0 {
        return info;
    }

    // Flip negative singular values into the left factor
    for i in 0..k {
        if d[i] < 0.0 {
            d[i] = -d[i];
            if let Some(ua) = uacc.as_deref_mut() {
                for r in 0..mm {
                    ua[r + i * mm] = -ua[r + i * mm];
                }
            }
        }
    }

    // Descending sort; the permutation lives in the integer scratch
    let perm = &mut iwork[..k];
    for (i, p) in perm.iter_mut().enumerate() {
        *p = i;
    }
    for i in 0..k {
        let mut best = i;
        for j in (i + 1)..k {
            if d[perm[j]] > d[perm[best]] {
                best = j;
            }
        }
        perm.swap(i, best);
    }

    for (j, &src) in perm.iter().enumerate() {
        s[j] = d[src];
    }

    if let (Some(ua), Some(va)) = (uacc.as_deref(), vacc.as_deref()) {
        if !transposed {
            // A = Uacc * B * Vacc^T
            for j in 0..u_cols {
                let src = if j < k { perm[j] } else { j };
                for i in 0..m {
                    u[layout.index(i, j, ldu)] = ua[i + src * mm];
                }
            }
            for i in 0..vt_rows {
                let src = perm[i];
                for j in 0..n {
                    vt[layout.index(i, j, ldvt)] = va[j + src * k];
                }
            }
        } else {
            // A^T = Uacc * B * Vacc^T, so A = Vacc * B * Uacc^T
            for j in 0..u_cols {
                let src = perm[j];
                for i in 0..m {
                    u[layout.index(i, j, ldu)] = va[i + src * k];
                }
            }
            for i in 0..vt_rows {
                let src = if i < k { perm[i] } else { i };
                for j in 0..n {
                    vt[layout.index(i, j, ldvt)] = ua[j + src * mm];
                }
            }
        }
    }

    0
}

/// Scratch length for a given job and shape: the working matrix, four
/// length-K reflector/bidiagonal arrays, and the factor accumulators.
fn required_lwork(job: SvdJob, m: usize, n: usize) -> usize {
    let k = m.min(n);
    let mm = m.max(n);
    let mut len = mm * k + 4 * k;
    if job.wants_factors() {
        let t = if matches!(job, SvdJob::Full) { mm } else { k };
        len += mm * t + k * k;
    }
    len
}

/// Householder reduction of a tall (rows >= cols) column-major matrix to
/// upper bidiagonal form. Left reflector vectors are stored below the
/// diagonal, right reflector vectors right of the superdiagonal, with the
/// implicit leading 1 of each vector not stored.
fn bidiagonalize(b: &mut [f32], rows: usize, cols: usize, tauq: &mut [f32], taup: &mut [f32]) {
    for kk in 0..cols {
        // Left reflector: zero b[kk+1.., kk]
        let mut norm_sq = 0.0f32;
        for i in kk..rows {
            let v = b[i + kk * rows];
            norm_sq += v * v;
        }
        let norm = norm_sq.sqrt();
        if norm == 0.0 {
            tauq[kk] = 0.0;
        } else {
            let akk = b[kk + kk * rows];
            let sign = if akk >= 0.0 { 1.0 } else { -1.0 };
            let alpha = -sign * norm;
            let beta = akk - alpha;
            for i in (kk + 1)..rows {
                b[i + kk * rows] /= beta;
            }
            tauq[kk] = -beta / alpha;
            b[kk + kk * rows] = alpha;

            for j in (kk + 1)..cols {
                let mut w = b[kk + j * rows];
                for i in (kk + 1)..rows {
                    w += b[i + kk * rows] * b[i + j * rows];
                }
                w *= tauq[kk];
                b[kk + j * rows] -= w;
                for i in (kk + 1)..rows {
                    let vik = b[i + kk * rows];
                    b[i + j * rows] -= w * vik;
                }
            }
        }

        // Right reflector: zero b[kk, kk+2..]
        if kk + 2 < cols {
            let mut norm_sq = 0.0f32;
            for j in (kk + 1)..cols {
                let v = b[kk + j * rows];
                norm_sq += v * v;
            }
            let norm = norm_sq.sqrt();
            if norm == 0.0 {
                taup[kk] = 0.0;
            } else {
                let akk = b[kk + (kk + 1) * rows];
                let sign = if akk >= 0.0 { 1.0 } else { -1.0 };
                let alpha = -sign * norm;
                let beta = akk - alpha;
                for j in (kk + 2)..cols {
                    b[kk + j * rows] /= beta;
                }
                taup[kk] = -beta / alpha;
                b[kk + (kk + 1) * rows] = alpha;

                for i in (kk + 1)..rows {
                    let mut w = b[i + (kk + 1) * rows];
                    for j in (kk + 2)..cols {
                        w += b[kk + j * rows] * b[i + j * rows];
                    }
                    w *= taup[kk];
                    b[i + (kk + 1) * rows] -= w;
                    for j in (kk + 2)..cols {
                        let vkj = b[kk + j * rows];
                        b[i + j * rows] -= w * vkj;
                    }
                }
            }
        } else {
            taup[kk] = 0.0;
        }
    }
}

/// Accumulate the left orthogonal factor: apply the stored left reflectors
/// to the leading `t` columns of the identity, in reverse order.
fn accumulate_left(b: &[f32], rows: usize, cols: usize, tauq: &[f32], uacc: &mut [f32], t: usize) {
    for v in uacc.iter_mut() {
        *v = 0.0;
    }
    for i in 0..t {
        uacc[i + i * rows] = 1.0;
    }
    for kk in (0..cols).rev() {
        let tau = tauq[kk];
        if tau == 0.0 {
            continue;
        }
        for j in 0..t {
            let mut w = uacc[kk + j * rows];
            for i in (kk + 1)..rows {
                w += b[i + kk * rows] * uacc[i + j * rows];
            }
            w *= tau;
            uacc[kk + j * rows] -= w;
            for i in (kk + 1)..rows {
                uacc[i + j * rows] -= w * b[i + kk * rows];
            }
        }
    }
}

/// Accumulate the right orthogonal factor from the stored right reflectors.
fn accumulate_right(b: &[f32], rows: usize, cols: usize, taup: &[f32], vacc: &mut [f32]) {
    for v in vacc.iter_mut() {
        *v = 0.0;
    }
    for i in 0..cols {
        vacc[i + i * cols] = 1.0;
    }
    if cols < 3 {
        return;
    }
    for kk in (0..cols - 2).rev() {
        let tau = taup[kk];
        if tau == 0.0 {
            continue;
        }
        for j in 0..cols {
            let mut w = vacc[(kk + 1) + j * cols];
            for r in (kk + 2)..cols {
                w += b[kk + r * rows] * vacc[r + j * cols];
            }
            w *= tau;
            vacc[(kk + 1) + j * cols] -= w;
            for r in (kk + 2)..cols {
                vacc[r + j * cols] -= w * b[kk + r * rows];
            }
        }
    }
}

/// Givens pair (c, s) with c*f + s*g = r and -s*f + c*g = 0.
#[inline]
fn rot2(f: f32, g: f32) -> (f32, f32) {
    if g == 0.0 {
        (1.0, 0.0)
    } else if f == 0.0 {
        (0.0, 1.0)
    } else {
        let r = f.hypot(g);
        (f / r, g / r)
    }
}

/// Mix columns i and j of a column-major matrix:
/// col_i' = c*col_i + s*col_j, col_j' = -s*col_i + c*col_j.
#[inline]
fn rotate_cols(mat: &mut [f32], lead: usize, i: usize, j: usize, c: f32, s: f32) {
    for r in 0..lead {
        let mi = mat[r + i * lead];
        let mj = mat[r + j * lead];
        mat[r + i * lead] = c * mi + s * mj;
        mat[r + j * lead] = -s * mi + c * mj;
    }
}

/// Implicit-shift QR on the bidiagonal (d, e), rotations mirrored into the
/// accumulated factors. Returns 0 on convergence, otherwise the number of
/// superdiagonals still coupled when the iteration budget ran out.
fn diagonalize(
    d: &mut [f32],
    e: &mut [f32],
    nn: usize,
    mut u: Option<&mut [f32]>,
    u_lead: usize,
    mut v: Option<&mut [f32]>,
    v_lead: usize,
) -> i32 {
    if nn < 2 {
        if nn == 1 {
            e[0] = 0.0;
        }
        return 0;
    }
    e[nn - 1] = 0.0;

    let mut bnorm = 0.0f32;
    for i in 0..nn {
        bnorm = bnorm.max(d[i].abs()).max(e[i].abs());
    }
    if bnorm == 0.0 {
        return 0;
    }

    let max_steps = MAX_STEPS_PER_VALUE * nn;
    let mut steps = 0usize;
    let mut q = nn;
    while q > 1 {
        for i in 0..q - 1 {
            if e[i].abs() <= TOL * (d[i].abs() + d[i + 1].abs()) {
                e[i] = 0.0;
            }
        }
        while q > 1 && e[q - 2] == 0.0 {
            q -= 1;
        }
        if q <= 1 {
            break;
        }
        let mut p = q - 1;
        while p > 0 && e[p - 1] != 0.0 {
            p -= 1;
        }

        steps += 1;
        if steps > max_steps {
            return e[..nn - 1].iter().filter(|v| **v != 0.0).count() as i32;
        }

        // A negligible diagonal lets the coupled superdiagonal be chased out
        if let Some(i) = (p..q - 1).find(|&i| d[i].abs() <= TOL * bnorm) {
            chase_zero_row(d, e, i, q, u.as_deref_mut(), u_lead);
            continue;
        }
        if d[q - 1].abs() <= TOL * bnorm {
            chase_zero_col(d, e, p, q, v.as_deref_mut(), v_lead);
            continue;
        }

        qr_step(d, e, p, q, u.as_deref_mut(), u_lead, v.as_deref_mut(), v_lead);
    }
    0
}

/// d[zero_idx] is negligible: rotate e[zero_idx] down the diagonal and off
/// the end, updating U columns as the rows mix.
fn chase_zero_row(
    d: &mut [f32],
    e: &mut [f32],
    zero_idx: usize,
    q: usize,
    mut u: Option<&mut [f32]>,
    u_lead: usize,
) {
    let mut f = e[zero_idx];
    e[zero_idx] = 0.0;
    for kk in (zero_idx + 1)..q {
        let (c, s) = rot2(d[kk], f);
        d[kk] = c * d[kk] + s * f;
        if kk < q - 1 {
            f = -s * e[kk];
            e[kk] = c * e[kk];
        }
        if let Some(buf) = u.as_deref_mut() {
            rotate_cols(buf, u_lead, kk, zero_idx, c, s);
        }
    }
}

/// d[q-1] is negligible: rotate e[q-2] up the last column and out,
/// updating V columns as the columns mix.
fn chase_zero_col(
    d: &mut [f32],
    e: &mut [f32],
    p: usize,
    q: usize,
    mut v: Option<&mut [f32]>,
    v_lead: usize,
) {
    let mut f = e[q - 2];
    e[q - 2] = 0.0;
    for kk in (p..q - 1).rev() {
        let (c, s) = rot2(d[kk], f);
        d[kk] = c * d[kk] + s * f;
        if kk > p {
            f = -s * e[kk - 1];
            e[kk - 1] = c * e[kk - 1];
        }
        if let Some(buf) = v.as_deref_mut() {
            rotate_cols(buf, v_lead, kk, q - 1, c, s);
        }
    }
}

/// One Golub-Kahan step on the unreduced block [p, q): Wilkinson shift from
/// the trailing 2x2 of B^T B, then bulge chasing with alternating right and
/// left rotations.
fn qr_step(
    d: &mut [f32],
    e: &mut [f32],
    p: usize,
    q: usize,
    mut u: Option<&mut [f32]>,
    u_lead: usize,
    mut v: Option<&mut [f32]>,
    v_lead: usize,
) {
    let dq1 = d[q - 1];
    let dq2 = d[q - 2];
    let eq2 = e[q - 2];
    let eq3 = if q - 2 > p { e[q - 3] } else { 0.0 };
    let t11 = dq2 * dq2 + eq3 * eq3;
    let t12 = dq2 * eq2;
    let t22 = dq1 * dq1 + eq2 * eq2;
    let delta = 0.5 * (t11 - t22);
    let denom = delta + delta.signum() * (delta * delta + t12 * t12).sqrt();
    let mut mu = if denom != 0.0 { t22 - t12 * t12 / denom } else { t22 };
    if !mu.is_finite() {
        mu = t22;
    }

    let mut y = d[p] * d[p] - mu;
    let mut z = d[p] * e[p];

    for kk in p..q - 1 {
        // Right rotation on columns (kk, kk+1)
        let (c, s) = rot2(y, z);
        if kk > p {
            e[kk - 1] = c * e[kk - 1] + s * z;
        }
        let dk = d[kk];
        let ek = e[kk];
        let dk1 = d[kk + 1];
        d[kk] = c * dk + s * ek;
        e[kk] = -s * dk + c * ek;
        let bulge = s * dk1;
        d[kk + 1] = c * dk1;
        if let Some(buf) = v.as_deref_mut() {
            rotate_cols(buf, v_lead, kk, kk + 1, c, s);
        }

        // Left rotation on rows (kk, kk+1) to annihilate the bulge
        let (c2, s2) = rot2(d[kk], bulge);
        d[kk] = c2 * d[kk] + s2 * bulge;
        let ek = e[kk];
        let dk1 = d[kk + 1];
        e[kk] = c2 * ek + s2 * dk1;
        d[kk + 1] = -s2 * ek + c2 * dk1;
        if kk + 1 < q - 1 {
            let ek1 = e[kk + 1];
            z = s2 * ek1;
            e[kk + 1] = c2 * ek1;
            y = e[kk];
        }
        if let Some(buf) = u.as_deref_mut() {
            rotate_cols(buf, u_lead, kk, kk + 1, c2, s2);
        }
    }
}
