//! Fixed-width limb arithmetic shared by `Fp` and `Scalar`.
//!
//! Values are little-endian arrays of `u64` words. Every modulus used here
//! leaves the top bit of its highest word clear, so the sum of two reduced
//! values fits in `N` words and a Montgomery product stays below `2m`.

/// a + b + carry, returning (sum, carry)
#[inline(always)]
pub(crate) const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + (b as u128) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// a - (b + borrow), returning (difference, borrow mask)
///
/// The incoming borrow is read from its top bit, the outgoing one is
/// either `0` or `u64::MAX`.
#[inline(always)]
pub(crate) const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let ret = (a as u128).wrapping_sub((b as u128) + ((borrow >> 63) as u128));
    (ret as u64, (ret >> 64) as u64)
}

/// a + b * c + carry, returning (low, high)
#[inline(always)]
pub(crate) const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + ((b as u128) * (c as u128)) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// All ones when `a < b`, zero otherwise
#[inline]
pub(crate) const fn lt_mask<const N: usize>(a: &[u64; N], b: &[u64; N]) -> u64 {
    let mut borrow = 0;
    let mut i = 0;
    while i < N {
        let (_, br) = sbb(a[i], b[i], borrow);
        borrow = br;
        i += 1;
    }
    borrow
}

/// `a - m` when `a >= m`, `a` otherwise
#[inline]
pub(crate) const fn reduce_once<const N: usize>(a: &[u64; N], m: &[u64; N]) -> [u64; N] {
    let mut d = [0u64; N];
    let mut borrow = 0;
    let mut i = 0;
    while i < N {
        let (v, br) = sbb(a[i], m[i], borrow);
        d[i] = v;
        borrow = br;
        i += 1;
    }

    let mut i = 0;
    while i < N {
        d[i] = (a[i] & borrow) | (d[i] & !borrow);
        i += 1;
    }
    d
}

#[inline]
pub(crate) const fn add_mod<const N: usize>(a: &[u64; N], b: &[u64; N], m: &[u64; N]) -> [u64; N] {
    let mut s = [0u64; N];
    let mut carry = 0;
    let mut i = 0;
    while i < N {
        let (v, c) = adc(a[i], b[i], carry);
        s[i] = v;
        carry = c;
        i += 1;
    }
    reduce_once(&s, m)
}

#[inline]
pub(crate) const fn sub_mod<const N: usize>(a: &[u64; N], b: &[u64; N], m: &[u64; N]) -> [u64; N] {
    let mut d = [0u64; N];
    let mut borrow = 0;
    let mut i = 0;
    while i < N {
        let (v, br) = sbb(a[i], b[i], borrow);
        d[i] = v;
        borrow = br;
        i += 1;
    }

    // Add the modulus back when the subtraction wrapped
    let mut carry = 0;
    let mut i = 0;
    while i < N {
        let (v, c) = adc(d[i], m[i] & borrow, carry);
        d[i] = v;
        carry = c;
        i += 1;
    }
    d
}

/// `m - a`, mapping zero to zero
#[inline]
pub(crate) const fn neg_mod<const N: usize>(a: &[u64; N], m: &[u64; N]) -> [u64; N] {
    let mut d = [0u64; N];
    let mut borrow = 0;
    let mut any = 0;
    let mut i = 0;
    while i < N {
        let (v, br) = sbb(m[i], a[i], borrow);
        d[i] = v;
        borrow = br;
        any |= a[i];
        i += 1;
    }

    let mask = ((any == 0) as u64).wrapping_sub(1);
    let mut i = 0;
    while i < N {
        d[i] &= mask;
        i += 1;
    }
    d
}

/// Montgomery product `a * b / 2^(64N) mod m` (CIOS).
///
/// `inv` is `-m^{-1} mod 2^64`. Inputs must be reduced.
#[inline]
pub(crate) const fn mont_mul<const N: usize>(
    a: &[u64; N],
    b: &[u64; N],
    m: &[u64; N],
    inv: u64,
) -> [u64; N] {
    let mut t = [0u64; N];
    let mut hi = 0u64;

    let mut i = 0;
    while i < N {
        let mut carry = 0;
        let mut j = 0;
        while j < N {
            let (v, c) = mac(t[j], a[j], b[i], carry);
            t[j] = v;
            carry = c;
            j += 1;
        }
        let (acc, top) = adc(hi, carry, 0);

        // Clear the low word and shift down by one limb
        let k = t[0].wrapping_mul(inv);
        let (_, c0) = mac(t[0], k, m[0], 0);
        let mut carry = c0;
        let mut j = 1;
        while j < N {
            let (v, c) = mac(t[j], k, m[j], carry);
            t[j - 1] = v;
            carry = c;
            j += 1;
        }
        let (v, c) = adc(acc, carry, 0);
        t[N - 1] = v;
        hi = top + c;

        i += 1;
    }

    reduce_once(&t, m)
}

/// Leave Montgomery form: `a / 2^(64N) mod m`
#[inline]
pub(crate) const fn from_mont<const N: usize>(a: &[u64; N], m: &[u64; N], inv: u64) -> [u64; N] {
    let mut one = [0u64; N];
    one[0] = 1;
    mont_mul(a, &one, m, inv)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2^61 - 1, small enough to check products with u128 arithmetic
    const M: [u64; 1] = [0x1fff_ffff_ffff_ffff];

    fn inv_of(m: u64) -> u64 {
        let mut inv = 1u64;
        for _ in 0..63 {
            inv = inv.wrapping_mul(inv);
            inv = inv.wrapping_mul(m);
        }
        inv.wrapping_neg()
    }

    #[test]
    fn carries_and_borrows() {
        assert_eq!(adc(u64::MAX, 1, 0), (0, 1));
        assert_eq!(adc(u64::MAX, u64::MAX, 1), (u64::MAX, 1));
        assert_eq!(sbb(0, 1, 0), (u64::MAX, u64::MAX));
        assert_eq!(sbb(5, 2, u64::MAX), (2, 0));
        assert_eq!(mac(1, u64::MAX, u64::MAX, 0), (2, u64::MAX - 1));
    }

    #[test]
    fn modular_add_sub_neg() {
        let m = M[0];
        let a = [m - 3];
        let b = [10];
        assert_eq!(add_mod(&a, &b, &M), [7]);
        assert_eq!(sub_mod(&b, &a, &M), [13]);
        assert_eq!(neg_mod(&[0], &M), [0]);
        assert_eq!(neg_mod(&b, &M), [m - 10]);
        assert_eq!(lt_mask(&a, &M), u64::MAX);
        assert_eq!(lt_mask(&M, &M), 0);
    }

    #[test]
    fn montgomery_product_matches_u128() {
        let m = M[0];
        let inv = inv_of(m);
        let r = ((1u128 << 64) % m as u128) as u64;
        let r2 = ((r as u128 * r as u128) % m as u128) as u64;

        for (x, y) in [(3u64, 5u64), (m - 1, m - 1), (0x1234_5678_9abc, 0xfeed_beef)] {
            let xm = mont_mul(&[x], &[r2], &M, inv);
            let ym = mont_mul(&[y], &[r2], &M, inv);
            let prod = from_mont(&mont_mul(&xm, &ym, &M, inv), &M, inv);
            assert_eq!(prod[0] as u128, (x as u128 * y as u128) % m as u128);
        }
    }
}
