//! Base field `GF(p)` of BLS12-381.
//!
//! p = 0x1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab
//!
//! Elements are six little-endian limbs in Montgomery form with R = 2^384.

use core::fmt;

use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::arith::{add_mod, from_mont, lt_mask, mont_mul, neg_mod, sub_mod};
use crate::error::{Error, Result};

const MODULUS: [u64; 6] = [
    0xb9fe_ffff_ffff_aaab,
    0x1eab_fffe_b153_ffff,
    0x6730_d2a0_f6b0_f624,
    0x6477_4b84_f385_12bf,
    0x4b1b_a7b6_434b_acd7,
    0x1a01_11ea_397f_e69a,
];

/// -p^{-1} mod 2^64
const INV: u64 = 0x89f3_fffc_fffc_fffd;

/// 2^384 mod p
const R: [u64; 6] = [
    0x7609_0000_0002_fffd,
    0xebf4_000b_c40c_0002,
    0x5f48_9857_53c7_58ba,
    0x77ce_5853_7052_5745,
    0x5c07_1a97_a256_ec6d,
    0x15f6_5ec3_fa80_e493,
];

/// 2^768 mod p
const R2: [u64; 6] = [
    0xf4df_1f34_1c34_1746,
    0x0a76_e6a6_09d1_04f1,
    0x8de5_476c_4c95_b6d5,
    0x67eb_88a9_939d_83c0,
    0x9a79_3e85_b519_952d,
    0x1198_8fe5_92ca_e3aa,
];

/// 2^1152 mod p
const R3: [u64; 6] = [
    0xed48_ac6b_d94c_a1e0,
    0x315f_831e_03a7_adf8,
    0x9a53_352a_615e_29dd,
    0x34c0_4e5e_921e_1761,
    0x2512_d435_6572_4728,
    0x0aa6_3460_9175_5d4d,
];

/// (p + 1) / 4, the square-root exponent for p = 3 mod 4
const SQRT_EXP: [u64; 6] = [
    0xee7f_bfff_ffff_eaab,
    0x07aa_ffff_ac54_ffff,
    0xd9cc_34a8_3dac_3d89,
    0xd91d_d2e1_3ce1_44af,
    0x92c6_e9ed_90d2_eb35,
    0x0680_447a_8e5f_f9a6,
];

/// p - 2
const INV_EXP: [u64; 6] = [
    0xb9fe_ffff_ffff_aaa9,
    0x1eab_fffe_b153_ffff,
    0x6730_d2a0_f6b0_f624,
    0x6477_4b84_f385_12bf,
    0x4b1b_a7b6_434b_acd7,
    0x1a01_11ea_397f_e69a,
];

/// (p - 1) / 2 + 1. Canonical values at or above this are the "larger" root.
const HALF_P_PLUS_ONE: [u64; 6] = [
    0xdcff_7fff_ffff_d556,
    0x0f55_ffff_58a9_ffff,
    0xb398_6950_7b58_7b12,
    0xb23b_a5c2_79c2_895f,
    0x258d_d3db_21a5_d66b,
    0x0d00_88f5_1cbf_f34d,
];

/// An element of the base field
#[derive(Copy, Clone)]
pub struct Fp(pub(crate) [u64; 6]);

impl Fp {
    /// Additive identity
    #[inline]
    pub const fn zero() -> Fp {
        Fp([0; 6])
    }

    /// Multiplicative identity
    #[inline]
    pub const fn one() -> Fp {
        Fp(R)
    }

    /// Whether this is zero
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Fp::zero())
    }

    /// Wrap limbs that are already in Montgomery form. No reduction or
    /// range check is performed.
    pub const fn from_raw_unchecked(v: [u64; 6]) -> Fp {
        Fp(v)
    }

    /// Map a small integer into the field
    pub const fn from_u64(v: u64) -> Fp {
        Fp(mont_mul(&[v, 0, 0, 0, 0, 0], &R2, &MODULUS, INV))
    }

    /// Sum modulo the field order
    #[inline]
    pub const fn add(&self, rhs: &Fp) -> Fp {
        Fp(add_mod(&self.0, &rhs.0, &MODULUS))
    }

    /// Difference modulo the field order
    #[inline]
    pub const fn sub(&self, rhs: &Fp) -> Fp {
        Fp(sub_mod(&self.0, &rhs.0, &MODULUS))
    }

    /// Additive inverse
    #[inline]
    pub const fn neg(&self) -> Fp {
        Fp(neg_mod(&self.0, &MODULUS))
    }

    /// Double this element
    #[inline]
    pub const fn double(&self) -> Fp {
        Fp::add(self, self)
    }

    /// Montgomery product
    #[inline]
    pub const fn mul(&self, rhs: &Fp) -> Fp {
        Fp(mont_mul(&self.0, &rhs.0, &MODULUS, INV))
    }

    /// Square this element
    #[inline]
    pub const fn square(&self) -> Fp {
        Fp::mul(self, self)
    }

    /// Exponentiation by a little-endian exponent. Runs in time dependent
    /// on the exponent, so only use it with public exponents.
    pub fn pow_vartime(&self, by: &[u64; 6]) -> Fp {
        let mut res = Fp::one();
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

    /// Square root, when one exists
    pub fn sqrt(&self) -> CtOption<Fp> {
        let root = self.pow_vartime(&SQRT_EXP);
        CtOption::new(root, root.square().ct_eq(self))
    }

    /// Multiplicative inverse via Fermat. Zero has none.
    pub fn invert(&self) -> Result<Fp> {
        if bool::from(self.is_zero()) {
            return Err(Error::DivisionByZero { context: "Fp::invert" });
        }
        Ok(self.pow_vartime(&INV_EXP))
    }

    /// Whether the canonical value exceeds (p - 1) / 2. This picks the sign
    /// bit of compressed point encodings.
    pub fn lexicographically_largest(&self) -> Choice {
        let canonical = from_mont(&self.0, &MODULUS, INV);
        Choice::from((!lt_mask(&canonical, &HALF_P_PLUS_ONE) & 1) as u8)
    }

    /// Decode 48 big-endian bytes. Values at or above p are rejected.
    pub fn from_bytes(bytes: &[u8; 48]) -> CtOption<Fp> {
        let mut limbs = [0u64; 6];
        for (limb, chunk) in limbs.iter_mut().rev().zip(bytes.chunks_exact(8)) {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            *limb = u64::from_be_bytes(word);
        }

        let canonical = Choice::from((lt_mask(&limbs, &MODULUS) & 1) as u8);
        CtOption::new(Fp(mont_mul(&limbs, &R2, &MODULUS, INV)), canonical)
    }

    /// Encode as 48 big-endian bytes
    pub fn to_bytes(self) -> [u8; 48] {
        let canonical = from_mont(&self.0, &MODULUS, INV);
        let mut out = [0u8; 48];
        for (chunk, limb) in out.chunks_exact_mut(8).zip(canonical.iter().rev()) {
            chunk.copy_from_slice(&limb.to_be_bytes());
        }
        out
    }

    /// Uniform element, from 768 random bits reduced mod p
    pub fn random(mut rng: impl RngCore) -> Fp {
        let mut lo = [0u64; 6];
        let mut hi = [0u64; 6];
        for limb in lo.iter_mut().chain(hi.iter_mut()) {
            *limb = rng.next_u64();
        }

        // lo + hi * 2^384, each half first brought into range by one
        // Montgomery multiplication
        Fp(mont_mul(&lo, &R2, &MODULUS, INV)).add(&Fp(mont_mul(&hi, &R3, &MODULUS, INV)))
    }
}

impl fmt::Debug for Fp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x")?;
        for b in self.to_bytes().iter() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl Default for Fp {
    fn default() -> Self {
        Fp::zero()
    }
}

impl zeroize::DefaultIsZeroes for Fp {}

impl ConstantTimeEq for Fp {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0
            .iter()
            .zip(other.0.iter())
            .fold(Choice::from(1), |acc, (a, b)| acc & a.ct_eq(b))
    }
}

impl Eq for Fp {}
impl PartialEq for Fp {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl ConditionallySelectable for Fp {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut out = [0u64; 6];
        for (i, limb) in out.iter_mut().enumerate() {
            *limb = u64::conditional_select(&a.0[i], &b.0[i], choice);
        }
        Fp(out)
    }
}

impl<'a> core::ops::Neg for &'a Fp {
    type Output = Fp;

    #[inline]
    fn neg(self) -> Fp {
        Fp::neg(self)
    }
}

impl<'a, 'b> core::ops::Add<&'b Fp> for &'a Fp {
    type Output = Fp;

    #[inline]
    fn add(self, rhs: &'b Fp) -> Fp {
        Fp::add(self, rhs)
    }
}

impl<'a, 'b> core::ops::Sub<&'b Fp> for &'a Fp {
    type Output = Fp;

    #[inline]
    fn sub(self, rhs: &'b Fp) -> Fp {
        Fp::sub(self, rhs)
    }
}

impl<'a, 'b> core::ops::Mul<&'b Fp> for &'a Fp {
    type Output = Fp;

    #[inline]
    fn mul(self, rhs: &'b Fp) -> Fp {
        Fp::mul(self, rhs)
    }
}

impl_neg_owned!(Fp);
impl_binops_additive!(Fp, Fp);
impl_binops_multiplicative!(Fp, Fp);
