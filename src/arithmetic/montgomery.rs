//! Multi-precision word primitives and Montgomery multiplication over
//! fixed-width limb arrays.
//!
//! Everything here works on `[u64; N]` in little-limb-first order. The
//! prime field layer only ever calls into this module; it never touches
//! double-width products itself.

/// Add with carry: `a + b + carry` -> (sum, carry_out).
#[inline(always)]
pub const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let res = a as u128 + b as u128 + carry as u128;
    (res as u64, (res >> 64) as u64)
}

/// Subtract with borrow: `a - b - borrow` -> (difference, borrow_out).
/// `borrow` must be 0 or 1.
#[inline(always)]
pub const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let res = (a as u128).wrapping_sub(b as u128 + borrow as u128);
    (res as u64, (res >> 127) as u64)
}

/// Multiply-accumulate: `a + b * c + carry` -> (low, high).
#[inline(always)]
pub const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let res = a as u128 + (b as u128 * c as u128) + carry as u128;
    (res as u64, (res >> 64) as u64)
}

/// `a += b`, returning the carry out of the top limb.
#[inline]
pub fn add_assign_carry<const N: usize>(a: &mut [u64; N], b: &[u64; N]) -> u64 {
    let mut carry = 0u64;
    for i in 0..N {
        let (sum, c) = adc(a[i], b[i], carry);
        a[i] = sum;
        carry = c;
    }
    carry
}

/// `a -= b`, returning the borrow out of the top limb.
#[inline]
pub fn sub_assign_borrow<const N: usize>(a: &mut [u64; N], b: &[u64; N]) -> u64 {
    let mut borrow = 0u64;
    for i in 0..N {
        let (diff, br) = sbb(a[i], b[i], borrow);
        a[i] = diff;
        borrow = br;
    }
    borrow
}

/// Shift right by one bit, shifting `top_bit` in at the most significant end.
#[inline]
pub fn div2<const N: usize>(a: &mut [u64; N], top_bit: u64) {
    let mut carry = top_bit << 63;
    for limb in a.iter_mut().rev() {
        let next = *limb << 63;
        *limb = (*limb >> 1) | carry;
        carry = next;
    }
}

/// Limb-wise comparison, most significant limb first.
#[inline]
pub fn geq<const N: usize>(a: &[u64; N], b: &[u64; N]) -> bool {
    for i in (0..N).rev() {
        if a[i] != b[i] {
            return a[i] > b[i];
        }
    }
    true
}

/// Montgomery multiplication (CIOS): returns `a * b * R^-1 mod n` where
/// `R = 2^(64 N)` and `n_prime = -n^-1 mod 2^64`.
///
/// Inputs must satisfy `a * b < R * n`, which holds whenever both are
/// reduced, or when one is reduced and the other is any N-limb value.
/// The result is fully reduced.
pub fn mont_mul<const N: usize>(
    a: &[u64; N],
    b: &[u64; N],
    n: &[u64; N],
    n_prime: u64,
) -> [u64; N] {
    let mut t = [0u64; N];
    let mut t_hi = 0u64;

    for i in 0..N {
        // t += a * b[i]
        let mut carry = 0u64;
        for j in 0..N {
            let (lo, hi) = mac(t[j], a[j], b[i], carry);
            t[j] = lo;
            carry = hi;
        }
        let (hi0, hi1) = adc(t_hi, carry, 0);

        // t = (t + m * n) / 2^64
        let m = t[0].wrapping_mul(n_prime);
        let (_, mut carry) = mac(t[0], m, n[0], 0);
        for j in 1..N {
            let (lo, hi) = mac(t[j], m, n[j], carry);
            t[j - 1] = lo;
            carry = hi;
        }
        let (top, c) = adc(hi0, carry, 0);
        t[N - 1] = top;
        t_hi = hi1 + c;
    }

    if t_hi != 0 || geq(&t, n) {
        sub_assign_borrow(&mut t, n);
    }
    t
}

/// Montgomery reduction of a single-width value: `a * R^-1 mod n`.
#[inline]
pub fn mont_reduce<const N: usize>(a: &[u64; N], n: &[u64; N], n_prime: u64) -> [u64; N] {
    let mut one = [0u64; N];
    one[0] = 1;
    mont_mul(a, &one, n, n_prime)
}

/// Computes `-n^-1 mod 2^64` for odd `n0`.
pub const fn mont_inv(n0: u64) -> u64 {
    let mut inv = 1u64;
    let mut i = 0;
    while i < 63 {
        inv = inv.wrapping_mul(inv);
        inv = inv.wrapping_mul(n0);
        i += 1;
    }
    inv.wrapping_neg()
}
