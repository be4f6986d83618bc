//! Quadratic extension `Fp2 = Fp[u] / (u² + 1)`

use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::fp::Fp;
use crate::error::{Error, Result};

/// Element `c0 + c1·u` of the quadratic extension
#[derive(Copy, Clone)]
pub struct Fp2 {
    /// Real part
    pub c0: Fp,
    /// Coefficient of u
    pub c1: Fp,
}

impl fmt::Debug for Fp2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} + {:?}*u", self.c0, self.c1)
    }
}

impl Default for Fp2 {
    fn default() -> Self {
        Fp2::zero()
    }
}

impl zeroize::DefaultIsZeroes for Fp2 {}

impl From<Fp> for Fp2 {
    fn from(f: Fp) -> Fp2 {
        Fp2 {
            c0: f,
            c1: Fp::zero(),
        }
    }
}

impl ConstantTimeEq for Fp2 {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1)
    }
}

impl Eq for Fp2 {}
impl PartialEq for Fp2 {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl ConditionallySelectable for Fp2 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp2 {
            c0: Fp::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp::conditional_select(&a.c1, &b.c1, choice),
        }
    }
}

impl<'a> Neg for &'a Fp2 {
    type Output = Fp2;

    #[inline]
    fn neg(self) -> Fp2 {
        self.neg()
    }
}

impl_neg_owned!(Fp2);

impl<'a, 'b> Sub<&'b Fp2> for &'a Fp2 {
    type Output = Fp2;

    #[inline]
    fn sub(self, rhs: &'b Fp2) -> Fp2 {
        self.sub(rhs)
    }
}

impl<'a, 'b> Add<&'b Fp2> for &'a Fp2 {
    type Output = Fp2;

    #[inline]
    fn add(self, rhs: &'b Fp2) -> Fp2 {
        self.add(rhs)
    }
}

impl<'a, 'b> Mul<&'b Fp2> for &'a Fp2 {
    type Output = Fp2;

    #[inline]
    fn mul(self, rhs: &'b Fp2) -> Fp2 {
        self.mul(rhs)
    }
}

impl_binops_additive!(Fp2, Fp2);
impl_binops_multiplicative!(Fp2, Fp2);

impl Fp2 {
    /// Additive identity
    #[inline]
    pub const fn zero() -> Fp2 {
        Fp2 {
            c0: Fp::zero(),
            c1: Fp::zero(),
        }
    }

    /// Multiplicative identity
    #[inline]
    pub const fn one() -> Fp2 {
        Fp2 {
            c0: Fp::one(),
            c1: Fp::zero(),
        }
    }

    /// Check if element is zero
    pub fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero()
    }

    /// Uniformly random element
    pub fn random(mut rng: impl RngCore) -> Fp2 {
        Fp2 {
            c0: Fp::random(&mut rng),
            c1: Fp::random(&mut rng),
        }
    }

    /// Raise to the power p. In Fp2 this is conjugation.
    #[inline(always)]
    pub fn frobenius_map(&self) -> Self {
        self.conjugate()
    }

    /// `c0 - c1·u`
    #[inline(always)]
    pub const fn conjugate(&self) -> Self {
        Fp2 {
            c0: self.c0,
            c1: Fp::neg(&self.c1),
        }
    }

    /// Multiply by the cubic non-residue `1 + u` used to build Fp6
    #[inline(always)]
    pub const fn mul_by_nonresidue(&self) -> Fp2 {
        // (a + bu)(1 + u) = (a - b) + (a + b)u
        Fp2 {
            c0: Fp::sub(&self.c0, &self.c1),
            c1: Fp::add(&self.c0, &self.c1),
        }
    }

    /// Multiply both coefficients by a base field element
    #[inline]
    pub const fn mul_by_fp(&self, k: &Fp) -> Fp2 {
        Fp2 {
            c0: Fp::mul(&self.c0, k),
            c1: Fp::mul(&self.c1, k),
        }
    }

    /// `c0² + c1²`, the norm down to Fp
    #[inline]
    pub const fn norm(&self) -> Fp {
        Fp::add(&Fp::square(&self.c0), &Fp::square(&self.c1))
    }

    /// Returns whether this element is lexicographically larger than its
    /// negation, comparing c1 first.
    #[inline]
    pub fn lexicographically_largest(&self) -> Choice {
        self.c1.lexicographically_largest()
            | (self.c1.is_zero() & self.c0.lexicographically_largest())
    }

    /// Complex squaring: two base field multiplications
    pub const fn square(&self) -> Fp2 {
        // (a + bu)² = (a + b)(a - b) + 2ab·u
        let a = Fp::add(&self.c0, &self.c1);
        let b = Fp::sub(&self.c0, &self.c1);
        let c = Fp::double(&self.c0);

        Fp2 {
            c0: Fp::mul(&a, &b),
            c1: Fp::mul(&c, &self.c1),
        }
    }

    /// Karatsuba multiplication: three base field multiplications
    pub const fn mul(&self, rhs: &Fp2) -> Fp2 {
        let v0 = Fp::mul(&self.c0, &rhs.c0);
        let v1 = Fp::mul(&self.c1, &rhs.c1);
        let s = Fp::mul(
            &Fp::add(&self.c0, &self.c1),
            &Fp::add(&rhs.c0, &rhs.c1),
        );

        Fp2 {
            c0: Fp::sub(&v0, &v1),
            c1: Fp::sub(&Fp::sub(&s, &v0), &v1),
        }
    }

    /// Add two elements
    #[inline]
    pub const fn add(&self, rhs: &Fp2) -> Fp2 {
        Fp2 {
            c0: Fp::add(&self.c0, &rhs.c0),
            c1: Fp::add(&self.c1, &rhs.c1),
        }
    }

    /// Subtract two elements
    #[inline]
    pub const fn sub(&self, rhs: &Fp2) -> Fp2 {
        Fp2 {
            c0: Fp::sub(&self.c0, &rhs.c0),
            c1: Fp::sub(&self.c1, &rhs.c1),
        }
    }

    /// Negate an element
    #[inline]
    pub const fn neg(&self) -> Fp2 {
        Fp2 {
            c0: Fp::neg(&self.c0),
            c1: Fp::neg(&self.c1),
        }
    }

    /// Double an element
    #[inline]
    pub const fn double(&self) -> Fp2 {
        Fp2::add(self, self)
    }

    /// Square root via Algorithm 9 of <https://eprint.iacr.org/2012/685.pdf>
    pub fn sqrt(&self) -> CtOption<Self> {
        CtOption::new(Fp2::zero(), self.is_zero()).or_else(|| {
            // a1 = self^((p - 3) / 4)
            let a1 = self.pow_vartime(&[
                0xee7f_bfff_ffff_eaaa,
                0x07aa_ffff_ac54_ffff,
                0xd9cc_34a8_3dac_3d89,
                0xd91d_d2e1_3ce1_44af,
                0x92c6_e9ed_90d2_eb35,
                0x0680_447a_8e5f_f9a6,
            ]);

            // alpha = self^((p - 1) / 2)
            let alpha = a1.square() * self;

            // x0 = self^((p + 1) / 4)
            let x0 = a1 * self;

            // alpha = -1 means self lies in Fp with no root there; the root is x0·u
            CtOption::new(
                Fp2 {
                    c0: -x0.c1,
                    c1: x0.c0,
                },
                alpha.ct_eq(&(&Fp2::one()).neg()),
            )
            .or_else(|| {
                // (1 + alpha)^((p - 1) / 2) * x0
                CtOption::new(
                    (alpha + Fp2::one()).pow_vartime(&[
                        0xdcff_7fff_ffff_d555,
                        0x0f55_ffff_58a9_ffff,
                        0xb398_6950_7b58_7b12,
                        0xb23b_a5c2_79c2_895f,
                        0x258d_d3db_21a5_d66b,
                        0x0d00_88f5_1cbf_f34d,
                    ]) * x0,
                    Choice::from(1),
                )
            })
            .and_then(|sqrt| CtOption::new(sqrt, sqrt.square().ct_eq(self)))
        })
    }

    /// Multiplicative inverse via the norm: `(a - bu) / (a² + b²)`
    pub fn invert(&self) -> Result<Self> {
        let t = self
            .norm()
            .invert()
            .map_err(|_| Error::DivisionByZero { context: "Fp2::invert" })?;

        Ok(Fp2 {
            c0: self.c0 * t,
            c1: -(self.c1 * t),
        })
    }

    /// Variable-time exponentiation by a 384-bit exponent
    pub fn pow_vartime(&self, by: &[u64; 6]) -> Self {
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

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    #[test]
    fn test_nonresidue_matches_generic_mul() {
        let mut rng = ChaCha20Rng::seed_from_u64(0xf2);
        let xi = Fp2 {
            c0: Fp::one(),
            c1: Fp::one(),
        };
        for _ in 0..10 {
            let a = Fp2::random(&mut rng);
            assert_eq!(a.mul_by_nonresidue(), a * xi);
        }
    }

    #[test]
    fn test_u_squared_is_minus_one() {
        let u = Fp2 {
            c0: Fp::zero(),
            c1: Fp::one(),
        };
        assert_eq!(u.square(), -Fp2::one());
    }

    #[test]
    fn test_const_evaluation() {
        // Evaluated by the compiler
        const XI: Fp2 = Fp2::one().mul_by_nonresidue();
        const XI_SQUARED: Fp2 = XI.square();
        const XI_PRODUCT: Fp2 = Fp2::sub(&Fp2::mul(&XI, &XI.conjugate()), &Fp2::one()).double();
        const XI_NORM: Fp = XI.norm();
        const SCALED: Fp2 = Fp2::add(&Fp2::neg(&XI), &XI).mul_by_fp(&Fp::one());

        let two = Fp::one().double();
        assert_eq!(XI_SQUARED, Fp2 { c0: Fp::zero(), c1: two });
        assert_eq!(XI_PRODUCT, Fp2 { c0: two, c1: Fp::zero() });
        assert_eq!(XI_NORM, two);
        assert_eq!(SCALED, Fp2::zero());
        assert_eq!(XI_SQUARED, XI * XI);
    }

    #[test]
    fn test_frobenius_is_pth_power() {
        let mut rng = ChaCha20Rng::seed_from_u64(0xf3);
        let p = [
            0xb9fe_ffff_ffff_aaab,
            0x1eab_fffe_b153_ffff,
            0x6730_d2a0_f6b0_f624,
            0x6477_4b84_f385_12bf,
            0x4b1b_a7b6_434b_acd7,
            0x1a01_11ea_397f_e69a,
        ];
        let a = Fp2::random(&mut rng);
        assert_eq!(a.frobenius_map(), a.pow_vartime(&p));
    }

    #[test]
    fn test_invert_zero() {
        assert_eq!(
            Fp2::zero().invert(),
            Err(Error::DivisionByZero { context: "Fp2::invert" })
        );
    }
}
