//! Degree-12 extension `Fp12 = Fp6[w] / (w² - v)`, the pairing target field

use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::fp::Fp;
use super::fp2::Fp2;
use super::fp6::Fp6;
use crate::ec::bls12_381::BLS_X;
use crate::error::{Error, Result};

// ============================================================================
// Frobenius Constants
// ============================================================================
//
// With ξ = 1 + u, the coefficient of w^j picks up ξ^(j(p^k - 1)/6) under
// x -> x^(p^k). Components are listed in (c0.c1, c0.c2, c1.c0, c1.c1, c1.c2)
// order, i.e. j = 2, 4, 1, 3, 5.

/// ξ^((p - 1)/6)
const FROB1_W1: Fp2 = Fp2 {
    c0: Fp::from_raw_unchecked([
        0x0708_9552_b319_d465,
        0xc669_5f92_b50a_8313,
        0x97e8_3ccc_d117_228f,
        0xa35b_aeca_b2dc_29ee,
        0x1ce3_93ea_5daa_ce4d,
        0x08f2_220f_b0fb_66eb,
    ]),
    c1: Fp::from_raw_unchecked([
        0xb2f6_6aad_4ce5_d646,
        0x5842_a06b_fc49_7cec,
        0xcf48_95d4_2599_d394,
        0xc11b_9cba_40a8_e8d0,
        0x2e38_13cb_e5a0_de89,
        0x110e_efda_8884_7faf,
    ]),
};

/// Imaginary part of ξ^((p - 1)/3); the real part is zero
const FROB1_W2_C1: Fp = Fp::from_raw_unchecked([
    0xcd03_c9e4_8671_f071,
    0x5dab_2246_1fcd_a5d2,
    0x5870_42af_d385_1b95,
    0x8eb6_0ebe_01ba_cb9e,
    0x03f9_7d6e_83d0_50d2,
    0x18f0_2065_5463_8741,
]);

/// Both coordinates of ξ^((p - 1)/2) share this value
const FROB1_W3_C: Fp = Fp::from_raw_unchecked([
    0x7bcf_a7a2_5aa3_0fda,
    0xdc17_dec1_2a92_7e7c,
    0x2f08_8dd8_6b4e_bef1,
    0xd1ca_2087_da74_d4a7,
    0x2da2_5966_96ce_bc1d,
    0x0e2b_7eed_bbfd_87d2,
]);

/// ξ^(2(p - 1)/3), which lies in Fp
const FROB1_W4: Fp = Fp::from_raw_unchecked([
    0x890d_c9e4_8675_45c3,
    0x2af3_2253_3285_a5d5,
    0x5088_0866_309b_7e2c,
    0xa20d_1b8c_7e88_1024,
    0x14e4_f04f_e2db_9068,
    0x14e5_6d3f_1564_853a,
]);

/// ξ^(5(p - 1)/6)
const FROB1_W5: Fp2 = Fp2 {
    c0: Fp::from_raw_unchecked([
        0x82d8_3cf5_0dbc_e43f,
        0xa281_3e53_df9d_018f,
        0xc6f0_caa5_3c65_e181,
        0x7525_cf52_8d50_fe95,
        0x4a85_ed50_f479_8a6b,
        0x171d_a0fd_6cf8_eebd,
    ]),
    c1: Fp::from_raw_unchecked([
        0x3726_c30a_f242_c66c,
        0x7c2a_c1aa_d1b6_fe70,
        0xa040_07fb_ba4b_14a2,
        0xef51_7c32_6634_1429,
        0x0095_ba65_4ed2_226b,
        0x02e3_70ec_cc86_f7dd,
    ]),
};

/// ξ^((p² - 1)/6)
const FROB2_W1: Fp = Fp::from_raw_unchecked([
    0xecfb_361b_798d_ba3a,
    0xc100_ddb8_9186_5a2c,
    0x0ec0_8ff1_232b_da8e,
    0xd5c1_3cc6_f1ca_4721,
    0x4722_2a47_bf7b_5c04,
    0x0110_f184_e51c_5f59,
]);

/// ξ^((p² - 1)/3)
const FROB2_W2: Fp = Fp::from_raw_unchecked([
    0x30f1_361b_798a_64e8,
    0xf3b8_ddab_7ece_5a2a,
    0x16a8_ca3a_c615_77f7,
    0xc26a_2ff8_74fd_029b,
    0x3636_b766_6070_1c6e,
    0x051b_a4ab_241b_6160,
]);

/// ξ^((p² - 1)/2), which is -1
const FROB2_W3: Fp = Fp::from_raw_unchecked([
    0x43f5_ffff_fffc_aaae,
    0x32b7_fff2_ed47_fffd,
    0x07e8_3a49_a2e9_9d69,
    0xeca8_f331_8332_bb7a,
    0xef14_8d1e_a0f4_c069,
    0x040a_b326_3eff_0206,
]);

/// ξ^(2(p² - 1)/3)
const FROB2_W4: Fp = FROB1_W2_C1;

/// ξ^(5(p² - 1)/6)
const FROB2_W5: Fp = FROB1_W4;

/// Real part shared by the cube-Frobenius factors of w, w³ and w⁵
const FROB3_C: Fp = Fp::from_raw_unchecked([
    0x3e2f_585d_a55c_9ad1,
    0x4294_213d_86c1_8183,
    0x3828_44c8_8b62_3732,
    0x92ad_2afd_1910_3e18,
    0x1d79_4e4f_ac7c_f0b9,
    0x0bd5_92fc_7d82_5ec8,
]);

/// ξ^((p³ - 1)/6)
const FROB3_W1: Fp2 = Fp2 {
    c0: FROB3_C,
    c1: FROB1_W3_C,
};

/// ξ^((p³ - 1)/2)
const FROB3_W3: Fp2 = Fp2 {
    c0: FROB3_C,
    c1: FROB3_C,
};

/// ξ^(5(p³ - 1)/6)
const FROB3_W5: Fp2 = Fp2 {
    c0: FROB1_W3_C,
    c1: FROB3_C,
};

// ξ^((p³ - 1)/3) = u and ξ^(2(p³ - 1)/3) = -1 are applied inline.

// ============================================================================
// Element Type
// ============================================================================

/// Element `c0 + c1·w`
#[derive(Copy, Clone)]
pub struct Fp12 {
    /// Constant coefficient
    pub c0: Fp6,
    /// Coefficient of w
    pub c1: Fp6,
}

impl From<Fp> for Fp12 {
    fn from(f: Fp) -> Fp12 {
        Fp12::from(Fp6::from(f))
    }
}

impl From<Fp2> for Fp12 {
    fn from(f: Fp2) -> Fp12 {
        Fp12::from(Fp6::from(f))
    }
}

impl From<Fp6> for Fp12 {
    fn from(f: Fp6) -> Fp12 {
        Fp12 {
            c0: f,
            c1: Fp6::zero(),
        }
    }
}

impl PartialEq for Fp12 {
    fn eq(&self, other: &Fp12) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Fp12 {}

impl Default for Fp12 {
    fn default() -> Self {
        Fp12::zero()
    }
}

impl zeroize::DefaultIsZeroes for Fp12 {}

impl fmt::Debug for Fp12 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} + ({:?})*w", self.c0, self.c1)
    }
}

impl ConditionallySelectable for Fp12 {
    #[inline(always)]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp12 {
            c0: Fp6::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp6::conditional_select(&a.c1, &b.c1, choice),
        }
    }
}

impl ConstantTimeEq for Fp12 {
    #[inline(always)]
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1)
    }
}

impl Fp12 {
    /// Additive identity
    #[inline]
    pub fn zero() -> Self {
        Fp12 {
            c0: Fp6::zero(),
            c1: Fp6::zero(),
        }
    }

    /// Multiplicative identity
    #[inline]
    pub fn one() -> Self {
        Fp12 {
            c0: Fp6::one(),
            c1: Fp6::zero(),
        }
    }

    /// Uniformly random element
    pub fn random(mut rng: impl RngCore) -> Self {
        Fp12 {
            c0: Fp6::random(&mut rng),
            c1: Fp6::random(&mut rng),
        }
    }

    /// Check if element is zero
    pub fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero()
    }

    /// Multiply by the sparse element `c0 + c1·v + c4·v·w` produced by a
    /// line evaluation.
    pub fn mul_by_014(&self, c0: &Fp2, c1: &Fp2, c4: &Fp2) -> Fp12 {
        let aa = self.c0.mul_by_01(c0, c1);
        let bb = self.c1.mul_by_1(c4);
        let o = c1 + c4;
        let c1 = self.c1 + self.c0;
        let c1 = c1.mul_by_01(c0, &o);
        let c1 = c1 - aa - bb;
        let c0 = bb;
        let c0 = c0.mul_by_nonresidue();
        let c0 = c0 + aa;

        Fp12 { c0, c1 }
    }

    /// `c0 - c1·w`. On the cyclotomic subgroup this is the inverse.
    #[inline(always)]
    pub fn conjugate(&self) -> Self {
        Fp12 {
            c0: self.c0,
            c1: -self.c1,
        }
    }

    /// Inverse of an element of the cyclotomic subgroup (norm one)
    #[inline(always)]
    pub fn cyclotomic_inverse(&self) -> Self {
        self.conjugate()
    }

    /// x -> x^p
    pub fn frobenius(&self) -> Self {
        let a = &self.c0;
        let b = &self.c1;

        Fp12 {
            c0: Fp6 {
                c0: a.c0.conjugate(),
                c1: a.c1.conjugate()
                    * Fp2 {
                        c0: Fp::zero(),
                        c1: FROB1_W2_C1,
                    },
                c2: a.c2.conjugate().mul_by_fp(&FROB1_W4),
            },
            c1: Fp6 {
                c0: b.c0.conjugate() * FROB1_W1,
                c1: b.c1.conjugate()
                    * Fp2 {
                        c0: FROB1_W3_C,
                        c1: FROB1_W3_C,
                    },
                c2: b.c2.conjugate() * FROB1_W5,
            },
        }
    }

    /// x -> x^(p²). All factors lie in Fp and no conjugation is needed.
    pub fn frobenius_square(&self) -> Self {
        let a = &self.c0;
        let b = &self.c1;

        Fp12 {
            c0: Fp6 {
                c0: a.c0,
                c1: a.c1.mul_by_fp(&FROB2_W2),
                c2: a.c2.mul_by_fp(&FROB2_W4),
            },
            c1: Fp6 {
                c0: b.c0.mul_by_fp(&FROB2_W1),
                c1: b.c1.mul_by_fp(&FROB2_W3),
                c2: b.c2.mul_by_fp(&FROB2_W5),
            },
        }
    }

    /// x -> x^(p³)
    pub fn frobenius_cube(&self) -> Self {
        let a = &self.c0;
        let b = &self.c1;

        // (x + yu)·u = -y + xu
        let a1 = a.c1.conjugate();
        let a1 = Fp2 {
            c0: -a1.c1,
            c1: a1.c0,
        };

        Fp12 {
            c0: Fp6 {
                c0: a.c0.conjugate(),
                c1: a1,
                c2: a.c2.conjugate().mul_by_fp(&FROB2_W3),
            },
            c1: Fp6 {
                c0: b.c0.conjugate() * FROB3_W1,
                c1: b.c1.conjugate() * FROB3_W3,
                c2: b.c2.conjugate() * FROB3_W5,
            },
        }
    }

    /// Exponentiation by the curve seed x (negative), for elements of the
    /// cyclotomic subgroup.
    pub fn expt(&self) -> Self {
        let mut res = *self;

        // |x| has its top bit set; walk the remaining 63 bits
        for i in (0..63).rev() {
            res = res.square();
            if (BLS_X >> i) & 1 == 1 {
                res *= self;
            }
        }

        res.conjugate()
    }

    /// Complex squaring: two Fp6 multiplications
    #[inline]
    pub fn square(&self) -> Self {
        let ab = self.c0 * self.c1;
        let c0c1 = self.c0 + self.c1;
        let c0 = self.c1.mul_by_nonresidue();
        let c0 = c0 + self.c0;
        let c0 = c0 * c0c1;
        let c0 = c0 - ab;
        let c1 = ab + ab;
        let c0 = c0 - ab.mul_by_nonresidue();

        Fp12 { c0, c1 }
    }

    /// Multiplicative inverse via the Fp6 norm
    pub fn invert(&self) -> Result<Self> {
        let t = self.c0.square() - self.c1.square().mul_by_nonresidue();
        let t = t
            .invert()
            .map_err(|_| Error::DivisionByZero { context: "Fp12::invert" })?;

        Ok(Fp12 {
            c0: self.c0 * t,
            c1: self.c1 * -t,
        })
    }

    /// Variable-time exponentiation by a little-endian limb exponent
    pub fn pow_vartime(&self, by: &[u64]) -> Self {
        let mut res = Self::one();
        for e in by.iter().rev() {
            for i in (0..64).rev() {
                res = res.square();

                if ((*e >> i) & 1) == 1 {
                    res *= self;
                }
            }
        }
        res
    }
}

impl<'a, 'b> Mul<&'b Fp12> for &'a Fp12 {
    type Output = Fp12;

    #[inline]
    fn mul(self, other: &'b Fp12) -> Self::Output {
        let aa = self.c0 * other.c0;
        let bb = self.c1 * other.c1;
        let o = other.c0 + other.c1;
        let c1 = self.c1 + self.c0;
        let c1 = c1 * o;
        let c1 = c1 - aa;
        let c1 = c1 - bb;
        let c0 = bb.mul_by_nonresidue();
        let c0 = c0 + aa;

        Fp12 { c0, c1 }
    }
}

impl<'a, 'b> Add<&'b Fp12> for &'a Fp12 {
    type Output = Fp12;

    #[inline]
    fn add(self, rhs: &'b Fp12) -> Self::Output {
        Fp12 {
            c0: self.c0 + rhs.c0,
            c1: self.c1 + rhs.c1,
        }
    }
}

impl<'a> Neg for &'a Fp12 {
    type Output = Fp12;

    #[inline]
    fn neg(self) -> Self::Output {
        Fp12 {
            c0: -self.c0,
            c1: -self.c1,
        }
    }
}

impl_neg_owned!(Fp12);

impl<'a, 'b> Sub<&'b Fp12> for &'a Fp12 {
    type Output = Fp12;

    #[inline]
    fn sub(self, rhs: &'b Fp12) -> Self::Output {
        Fp12 {
            c0: self.c0 - rhs.c0,
            c1: self.c1 - rhs.c1,
        }
    }
}

impl_binops_additive!(Fp12, Fp12);
impl_binops_multiplicative!(Fp12, Fp12);
