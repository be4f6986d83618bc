//! Scalar field `GF(r)` of BLS12-381, the exponent ring of G1, G2 and Gt.
//!
//! r = 0x73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001
//!
//! Four little-endian limbs in Montgomery form with R = 2^256.

use core::fmt;

use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::field::arith::{add_mod, from_mont, lt_mask, mont_mul, neg_mod, sub_mod};
use crate::error::{validate, Error, Result};

const MODULUS: [u64; 4] = [
    0xffff_ffff_0000_0001,
    0x53bd_a402_fffe_5bfe,
    0x3339_d808_09a1_d805,
    0x73ed_a753_299d_7d48,
];

/// -r^{-1} mod 2^64
const INV: u64 = 0xffff_fffe_ffff_ffff;

/// 2^256 mod r
const R: [u64; 4] = [
    0x0000_0001_ffff_fffe,
    0x5884_b7fa_0003_4802,
    0x998c_4fef_ecbc_4ff5,
    0x1824_b159_acc5_056f,
];

/// 2^512 mod r
const R2: [u64; 4] = [
    0xc999_e990_f3f2_9c6d,
    0x2b6c_edcb_8792_5c23,
    0x05d3_1496_7254_398f,
    0x0748_d9d9_9f59_ff11,
];

/// 2^768 mod r
const R3: [u64; 4] = [
    0xc62c_1807_439b_73af,
    0x1b3e_0d18_8cf0_6990,
    0x73d1_3c71_c7b5_f418,
    0x6e2a_5bb9_c8db_33e9,
];

/// r - 2
const INV_EXP: [u64; 4] = [
    0xffff_fffe_ffff_ffff,
    0x53bd_a402_fffe_5bfe,
    0x3339_d808_09a1_d805,
    0x73ed_a753_299d_7d48,
];

/// r = 2^32 * T + 1 with T odd
const TWO_ADICITY: u32 = 32;

/// T
const TRACE: [u64; 4] = [
    0xfffe_5bfe_ffff_ffff,
    0x09a1_d805_53bd_a402,
    0x299d_7d48_3339_d808,
    0x0000_0000_73ed_a753,
];

/// (T + 1) / 2
const TRACE_PLUS_ONE_HALF: [u64; 4] = [
    0x7fff_2dff_8000_0000,
    0x04d0_ec02_a9de_d201,
    0x94ce_bea4_199c_ec04,
    0x0000_0000_39f6_d3a9,
];

/// 7^T, a primitive 2^32-th root of unity (Montgomery form)
const ROOT_OF_UNITY: Scalar = Scalar([
    0xb9b5_8d8c_5f0e_466a,
    0x5b1b_4c80_1819_d7ec,
    0x0af5_3ae3_52a3_1e64,
    0x5bf3_adda_19e9_b27b,
]);

/// An integer modulo r
#[derive(Clone, Copy, Eq)]
pub struct Scalar(pub(crate) [u64; 4]);

#[inline]
fn le_limbs<const N: usize>(bytes: &[u8]) -> [u64; N] {
    let mut limbs = [0u64; N];
    for (limb, chunk) in limbs.iter_mut().zip(bytes.chunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        *limb = u64::from_le_bytes(word);
    }
    limbs
}

impl Scalar {
    /// Additive identity
    #[inline]
    pub const fn zero() -> Scalar {
        Scalar([0; 4])
    }

    /// Multiplicative identity
    #[inline]
    pub const fn one() -> Scalar {
        Scalar(R)
    }

    /// Whether this is zero
    #[inline]
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Scalar::zero())
    }

    /// Sum modulo the field order
    #[inline]
    pub const fn add(&self, rhs: &Scalar) -> Scalar {
        Scalar(add_mod(&self.0, &rhs.0, &MODULUS))
    }

    /// Difference modulo the field order
    #[inline]
    pub const fn sub(&self, rhs: &Scalar) -> Scalar {
        Scalar(sub_mod(&self.0, &rhs.0, &MODULUS))
    }

    /// Additive inverse
    #[inline]
    pub const fn neg(&self) -> Scalar {
        Scalar(neg_mod(&self.0, &MODULUS))
    }

    /// Double this element
    #[inline]
    pub const fn double(&self) -> Scalar {
        Scalar::add(self, self)
    }

    /// Montgomery product
    #[inline]
    pub const fn mul(&self, rhs: &Scalar) -> Scalar {
        Scalar(mont_mul(&self.0, &rhs.0, &MODULUS, INV))
    }

    /// Square this element
    #[inline]
    pub const fn square(&self) -> Scalar {
        Scalar::mul(self, self)
    }

    /// Decode 32 little-endian bytes, rejecting values at or above r
    pub fn from_bytes(bytes: &[u8; 32]) -> CtOption<Scalar> {
        let limbs = le_limbs::<4>(bytes);
        let canonical = Choice::from((lt_mask(&limbs, &MODULUS) & 1) as u8);
        CtOption::new(Scalar(mont_mul(&limbs, &R2, &MODULUS, INV)), canonical)
    }

    /// Encode as 32 little-endian bytes
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (chunk, limb) in out.chunks_exact_mut(8).zip(self.to_canonical_limbs().iter()) {
            chunk.copy_from_slice(&limb.to_le_bytes());
        }
        out
    }

    /// Convert canonical little-endian limbs into Montgomery form.
    /// Limbs at or above r are reduced.
    pub const fn from_raw(limbs: [u64; 4]) -> Scalar {
        Scalar(mont_mul(&limbs, &R2, &MODULUS, INV))
    }

    /// Reduce a big-endian integer of any length modulo r
    pub fn from_be_bytes_reduced(bytes: &[u8]) -> Scalar {
        let radix = Scalar::from_raw([0, 1, 0, 0]);
        let head = bytes.len() % 8;

        let mut acc = Scalar::zero();
        let mut absorb = |chunk: &[u8]| {
            let mut word = [0u8; 8];
            word[8 - chunk.len()..].copy_from_slice(chunk);
            acc = acc * radix + Scalar::from(u64::from_be_bytes(word));
        };
        if head != 0 {
            absorb(&bytes[..head]);
        }
        bytes[head..].chunks_exact(8).for_each(absorb);
        acc
    }

    /// Reduce a 512-bit little-endian integer modulo r
    pub fn from_bytes_wide(bytes: &[u8; 64]) -> Scalar {
        let lo = le_limbs::<4>(&bytes[..32]);
        let hi = le_limbs::<4>(&bytes[32..]);
        Scalar(mont_mul(&lo, &R2, &MODULUS, INV)).add(&Scalar(mont_mul(&hi, &R3, &MODULUS, INV)))
    }

    /// Uniform scalar, reduced from 512 random bits
    pub fn random(mut rng: impl RngCore) -> Scalar {
        let mut buf = [0u8; 64];
        rng.fill_bytes(&mut buf);
        Scalar::from_bytes_wide(&buf)
    }

    /// The canonical little-endian limbs. Window digits for multi-scalar
    /// multiplication and Gt exponents are read from these.
    pub const fn to_canonical_limbs(&self) -> [u64; 4] {
        from_mont(&self.0, &MODULUS, INV)
    }

    /// Exponentiation by a public little-endian exponent
    pub fn pow_vartime(&self, by: &[u64; 4]) -> Scalar {
        let mut res = Scalar::one();
        for limb in by.iter().rev() {
            for i in (0..64).rev() {
                res = res.square();
                if (limb >> i) & 1 == 1 {
                    res = res.mul(self);
                }
            }
        }
        res
    }

    /// Square root by Tonelli-Shanks. Variable time.
    pub fn sqrt(&self) -> CtOption<Scalar> {
        if bool::from(self.is_zero()) {
            return CtOption::new(Scalar::zero(), Choice::from(1));
        }

        let mut z = ROOT_OF_UNITY;
        let mut x = self.pow_vartime(&TRACE_PLUS_ONE_HALF);
        let mut b = self.pow_vartime(&TRACE);
        let mut m = TWO_ADICITY;

        // x^2 = self * b and b lies in the 2^m-torsion
        loop {
            let mut order = 0;
            let mut t = b;
            while t != Scalar::one() {
                t = t.square();
                order += 1;
            }
            if order == 0 {
                break;
            }
            if order == m {
                return CtOption::new(Scalar::zero(), Choice::from(0));
            }

            let mut c = z;
            for _ in 0..(m - order - 1) {
                c = c.square();
            }
            z = c.square();
            x = x.mul(&c);
            b = b.mul(&z);
            m = order;
        }

        CtOption::new(x, x.square().ct_eq(self))
    }

    /// Multiplicative inverse. Zero has none.
    pub fn invert(&self) -> Result<Scalar> {
        if bool::from(self.is_zero()) {
            return Err(Error::DivisionByZero {
                context: "Scalar::invert",
            });
        }
        Ok(self.pow_vartime(&INV_EXP))
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x")?;
        for b in self.to_bytes().iter().rev() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl From<u64> for Scalar {
    fn from(val: u64) -> Scalar {
        Scalar(mont_mul(&[val, 0, 0, 0], &R2, &MODULUS, INV))
    }
}

impl From<Scalar> for [u8; 32] {
    fn from(value: Scalar) -> [u8; 32] {
        value.to_bytes()
    }
}

impl<'a> From<&'a Scalar> for [u8; 32] {
    fn from(value: &'a Scalar) -> [u8; 32] {
        value.to_bytes()
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0
            .iter()
            .zip(other.0.iter())
            .fold(Choice::from(1), |acc, (a, b)| acc & a.ct_eq(b))
    }
}

impl PartialEq for Scalar {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut out = [0u64; 4];
        for (i, limb) in out.iter_mut().enumerate() {
            *limb = u64::conditional_select(&a.0[i], &b.0[i], choice);
        }
        Scalar(out)
    }
}

impl Default for Scalar {
    #[inline]
    fn default() -> Self {
        Scalar::zero()
    }
}

impl zeroize::DefaultIsZeroes for Scalar {}

impl shercrypto_api::Serialize for Scalar {
    fn to_bytes(&self) -> Vec<u8> {
        Scalar::to_bytes(self).to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> shercrypto_api::Result<Self> {
        validate::length("Scalar::from_bytes", bytes.len(), 32)?;

        let mut array = [0u8; 32];
        array.copy_from_slice(bytes);

        Option::from(Scalar::from_bytes(&array))
            .ok_or_else(|| Error::param("scalar_bytes", "non-canonical scalar").into())
    }
}

impl<'a> core::ops::Neg for &'a Scalar {
    type Output = Scalar;

    #[inline]
    fn neg(self) -> Scalar {
        Scalar::neg(self)
    }
}

impl<'a, 'b> core::ops::Add<&'b Scalar> for &'a Scalar {
    type Output = Scalar;

    #[inline]
    fn add(self, rhs: &'b Scalar) -> Scalar {
        Scalar::add(self, rhs)
    }
}

impl<'a, 'b> core::ops::Sub<&'b Scalar> for &'a Scalar {
    type Output = Scalar;

    #[inline]
    fn sub(self, rhs: &'b Scalar) -> Scalar {
        Scalar::sub(self, rhs)
    }
}

impl<'a, 'b> core::ops::Mul<&'b Scalar> for &'a Scalar {
    type Output = Scalar;

    #[inline]
    fn mul(self, rhs: &'b Scalar) -> Scalar {
        Scalar::mul(self, rhs)
    }
}

impl_neg_owned!(Scalar);
impl_binops_additive!(Scalar, Scalar);
impl_binops_multiplicative!(Scalar, Scalar);

impl<T> core::iter::Sum<T> for Scalar
where
    T: core::borrow::Borrow<Scalar>,
{
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(Scalar::zero(), |acc, item| acc + item.borrow())
    }
}

impl<T> core::iter::Product<T> for Scalar
where
    T: core::borrow::Borrow<Scalar>,
{
    fn product<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(Scalar::one(), |acc, item| acc * item.borrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(0x5ca1a)
    }

    #[test]
    fn montgomery_constants() {
        let mut inv = 1u64;
        for _ in 0..63 {
            inv = inv.wrapping_mul(inv);
            inv = inv.wrapping_mul(MODULUS[0]);
        }
        assert_eq!(inv.wrapping_neg(), INV);
        assert_eq!(Scalar(R2).mul(&Scalar(R2)), Scalar(R3));
    }

    #[test]
    fn debug_prints_the_canonical_value() {
        assert_eq!(
            format!("{:?}", Scalar::zero()),
            "0x0000000000000000000000000000000000000000000000000000000000000000"
        );
        assert_eq!(
            format!("{}", Scalar::from(0x1234u64)),
            "0x0000000000000000000000000000000000000000000000000000000000001234"
        );
    }

    #[test]
    fn canonical_limbs() {
        assert_eq!(Scalar::zero().to_canonical_limbs(), [0; 4]);
        assert_eq!(Scalar::one().to_canonical_limbs(), [1, 0, 0, 0]);
        assert_eq!(Scalar::from(u64::MAX).to_canonical_limbs(), [u64::MAX, 0, 0, 0]);

        let mut r_minus_one = MODULUS;
        r_minus_one[0] -= 1;
        assert_eq!((-Scalar::one()).to_canonical_limbs(), r_minus_one);
    }

    #[test]
    fn byte_encoding() {
        let mut rng = rng();
        for _ in 0..16 {
            let k = Scalar::random(&mut rng);
            assert_eq!(Scalar::from_bytes(&k.to_bytes()).unwrap(), k);
            assert_eq!(<[u8; 32]>::from(&k), k.to_bytes());
        }

        let mut one = [0u8; 32];
        one[0] = 1;
        assert_eq!(Scalar::one().to_bytes(), one);

        // r itself is not canonical, r - 1 is
        let mut r = [0u8; 32];
        for (chunk, limb) in r.chunks_exact_mut(8).zip(MODULUS.iter()) {
            chunk.copy_from_slice(&limb.to_le_bytes());
        }
        assert!(bool::from(Scalar::from_bytes(&r).is_none()));
        r[0] -= 1;
        assert_eq!(Scalar::from_bytes(&r).unwrap(), -Scalar::one());
    }

    #[test]
    fn wide_reduction() {
        // 2^256 mod r is R
        let mut wide = [0u8; 64];
        wide[32] = 1;
        let two_256 = Scalar::from_bytes_wide(&wide);
        assert_eq!(two_256.to_canonical_limbs(), R);

        // All ones: (2^256 - 1) + (2^256 - 1) * 2^256
        let max = Scalar::from_bytes_wide(&[0xff; 64]);
        let low = Scalar::from_bytes_wide(&{
            let mut b = [0u8; 64];
            b[..32].copy_from_slice(&[0xff; 32]);
            b
        });
        assert_eq!(max, low + low * two_256);
    }

    #[test]
    fn field_laws() {
        let mut rng = rng();
        let a = Scalar::random(&mut rng);
        let b = Scalar::random(&mut rng);
        let c = Scalar::random(&mut rng);

        assert_eq!(a + b, b + a);
        assert_eq!(a * (b + c), a * b + a * c);
        assert_eq!(a - b, -(b - a));
        assert_eq!(a.double(), a + a);
        assert_eq!(a.square(), a * a);
        assert_eq!(-Scalar::zero(), Scalar::zero());

        let sum: Scalar = [a, b, c].iter().sum();
        let product: Scalar = [a, b, c].iter().product();
        assert_eq!(sum, a + b + c);
        assert_eq!(product, a * b * c);
    }

    #[test]
    fn inversion() {
        let mut rng = rng();
        for _ in 0..8 {
            let a = Scalar::random(&mut rng);
            assert_eq!(a * a.invert().unwrap(), Scalar::one());
        }
        assert_eq!(Scalar::one().invert().unwrap(), Scalar::one());
        assert_eq!((-Scalar::one()).invert().unwrap(), -Scalar::one());
        assert!(matches!(
            Scalar::zero().invert(),
            Err(Error::DivisionByZero { .. })
        ));
    }

    #[test]
    fn raw_limbs_and_big_endian_reduction() {
        assert_eq!(Scalar::from_raw([7, 0, 0, 0]), Scalar::from(7u64));
        assert_eq!(Scalar::from_raw(MODULUS), Scalar::zero());
        let mut low_ones = [0u8; 64];
        low_ones[..32].copy_from_slice(&[0xff; 32]);
        assert_eq!(Scalar::from_raw([u64::MAX; 4]), Scalar::from_bytes_wide(&low_ones));

        assert_eq!(Scalar::from_be_bytes_reduced(&[]), Scalar::zero());
        assert_eq!(Scalar::from_be_bytes_reduced(&[0x01, 0x02]), Scalar::from(0x0102u64));

        let mut rng = rng();
        let k = Scalar::random(&mut rng);
        let mut be = k.to_bytes();
        be.reverse();
        assert_eq!(Scalar::from_be_bytes_reduced(&be), k);

        // A leading byte pushes the value past 2^256
        let mut long = vec![0x03];
        long.extend_from_slice(&be);
        let two_256 = Scalar::from_raw([0, 0, 0, 1 << 63]).double();
        assert_eq!(
            Scalar::from_be_bytes_reduced(&long),
            Scalar::from(3u64) * two_256 + k
        );
    }

    #[test]
    fn square_roots() {
        assert_eq!(ROOT_OF_UNITY, Scalar::from(7u64).pow_vartime(&TRACE));
        assert_eq!(Scalar::zero().sqrt().unwrap(), Scalar::zero());

        let mut rng = rng();
        for _ in 0..8 {
            let a = Scalar::random(&mut rng);
            let root = a.square().sqrt().unwrap();
            assert!(root == a || root == -a);
        }

        // 7 generates the multiplicative group, so it is a non-residue
        assert!(bool::from(Scalar::from(7u64).sqrt().is_none()));
        assert_eq!(Scalar::from(4u64).sqrt().unwrap().square(), Scalar::from(4u64));
    }

    #[test]
    fn serialize_trait_rejects_bad_input() {
        use shercrypto_api::Serialize;

        let s = Scalar::from(42u64);
        let bytes = Serialize::to_bytes(&s);
        assert_eq!(<Scalar as Serialize>::from_bytes(&bytes).unwrap(), s);
        assert!(<Scalar as Serialize>::from_bytes(&bytes[..31]).is_err());
        assert!(<Scalar as Serialize>::from_bytes(&[0xff; 32]).is_err());
    }

    #[test]
    fn zeroize_clears() {
        use zeroize::Zeroize;

        let mut a = Scalar::from(99u64);
        a.zeroize();
        assert!(bool::from(a.is_zero()));
    }
}
