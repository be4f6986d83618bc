//! Optimal-ate pairing on BLS12-381.
//!
//! The Miller loop runs over |x| with Jacobian line functions on the twist
//! (Costello, Lange, Naehrig, "Faster pairing computations on curves with
//! high-degree twists", ePrint 2010/354). Because x is negative the loop
//! output is conjugated. The final exponentiation is split into the easy
//! part `(p^6 - 1)(p^2 + 1)` and a hard part evaluated with five
//! exponentiations by x.

use core::borrow::Borrow;
use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul, Neg, Sub};

use rand_core::RngCore;
use shercrypto_params::pairing::bls12_381::{BLS12_381_FP_SIZE, BLS12_381_GT_SIZE};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::field::{Fp, Fp12, Fp2, Fp6};
use super::{G1Affine, G2Affine, G2Projective, Scalar, BLS_X, BLS_X_IS_NEGATIVE};
use crate::error::{validate, Error, Result};

/// Output of the Miller loop, before the final exponentiation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MillerLoopResult(pub(crate) Fp12);

impl Default for MillerLoopResult {
    fn default() -> Self {
        MillerLoopResult(Fp12::one())
    }
}

impl MillerLoopResult {
    /// Map the Miller loop output into Gt.
    pub fn final_exponentiation(&self) -> Gt {
        let f = self.0;

        // Easy part: f^((p^6 - 1)(p^2 + 1)). Miller loop outputs are products
        // of non-zero line values, so the inverse exists.
        debug_assert!(
            !bool::from(f.is_zero()),
            "zero Miller loop value has no image in Gt"
        );
        let f_inv = match f.invert() {
            Ok(inv) => inv,
            // Unreachable from the loops in this module. Zero is not in Gt,
            // so it stays distinguishable from every real pairing value.
            Err(_) => return Gt(Fp12::zero()),
        };
        let t0 = f.frobenius_cube().frobenius_cube() * f_inv;
        let result = t0.frobenius_square() * t0;

        // Hard part
        let t0 = result.conjugate().square();
        let t5 = result.expt();
        let t1 = t5.square();
        let t3 = t0 * t5;
        let t0 = t3.expt();
        let t2 = t0.expt();
        let t4 = t2.expt();
        let t4 = t1 * t4;
        let t1 = t4.expt();
        let t3 = t3.conjugate();
        let t1 = t3 * t1;
        let t1 = t1 * result;
        let t0 = t0 * result;
        let t0 = t0.frobenius_cube();
        let t3 = result.conjugate();
        let t4 = t3 * t4;
        let t4 = t4.frobenius();
        let t5 = t2 * t5;
        let t5 = t5.frobenius_square();
        let t5 = t5 * t0;
        let t5 = t5 * t4;
        let t5 = t5 * t1;

        Gt(t5)
    }
}

impl<'a, 'b> Add<&'b MillerLoopResult> for &'a MillerLoopResult {
    type Output = MillerLoopResult;

    #[inline]
    fn add(self, rhs: &'b MillerLoopResult) -> MillerLoopResult {
        MillerLoopResult(self.0 * rhs.0)
    }
}

impl_add_binop_specify_output!(MillerLoopResult, MillerLoopResult, MillerLoopResult);

impl core::ops::AddAssign<MillerLoopResult> for MillerLoopResult {
    #[inline]
    fn add_assign(&mut self, rhs: MillerLoopResult) {
        *self = *self + rhs;
    }
}

/// Element of the order-r target group.
///
/// Written additively: `+` is multiplication in Fp12, negation is
/// conjugation and `Gt * Scalar` is exponentiation.
///
/// The wrapped value is always a non-zero r-th root of unity.
#[derive(Copy, Clone, Debug)]
pub struct Gt(pub(crate) Fp12);

impl Default for Gt {
    fn default() -> Self {
        Self::identity()
    }
}

impl zeroize::DefaultIsZeroes for Gt {}

impl fmt::Display for Gt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl ConstantTimeEq for Gt {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl ConditionallySelectable for Gt {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Gt(Fp12::conditional_select(&a.0, &b.0, choice))
    }
}

impl Eq for Gt {}
impl PartialEq for Gt {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl Gt {
    /// The group identity, 1 in Fp12
    pub fn identity() -> Gt {
        Gt(Fp12::one())
    }

    /// `e(g1, g2)`
    pub fn generator() -> Gt {
        Gt(GT_GENERATOR)
    }

    /// The underlying Fp12 element
    pub fn as_fp12(&self) -> &Fp12 {
        &self.0
    }

    /// Whether this is the identity
    pub fn is_identity(&self) -> Choice {
        self.0.ct_eq(&Fp12::one())
    }

    /// A uniformly random element, as a random multiple of the generator.
    pub fn random(mut rng: impl RngCore) -> Gt {
        Gt::generator() * Scalar::random(&mut rng)
    }

    /// `2·self`
    pub fn double(&self) -> Gt {
        Gt(self.0.square())
    }

    /// Serialize as the twelve Fp coefficients, big-endian, from `c0.c0.c0`
    /// up to `c1.c2.c1`.
    pub fn to_bytes(&self) -> [u8; BLS12_381_GT_SIZE] {
        let mut res = [0u8; BLS12_381_GT_SIZE];
        for (chunk, c) in res.chunks_mut(BLS12_381_FP_SIZE).zip(coefficients(&self.0)) {
            chunk.copy_from_slice(&c.to_bytes());
        }
        res
    }

    /// Parse the output of [`Gt::to_bytes`].
    ///
    /// Every coefficient must be canonical and the element must lie in the
    /// order-r subgroup.
    pub fn from_bytes(bytes: &[u8; BLS12_381_GT_SIZE]) -> Result<Gt> {
        let mut c = [Fp::zero(); 12];
        for (slot, chunk) in c.iter_mut().zip(bytes.chunks(BLS12_381_FP_SIZE)) {
            let mut buf = [0u8; BLS12_381_FP_SIZE];
            buf.copy_from_slice(chunk);
            *slot = Option::from(Fp::from_bytes(&buf))
                .ok_or_else(|| Error::encoding("Gt::from_bytes", "non-canonical coefficient"))?;
        }

        let fp2 = |i: usize| Fp2 { c0: c[i], c1: c[i + 1] };
        let f = Fp12 {
            c0: Fp6 { c0: fp2(0), c1: fp2(2), c2: fp2(4) },
            c1: Fp6 { c0: fp2(6), c1: fp2(8), c2: fp2(10) },
        };

        // Gt elements have order r
        let r_minus_one = (-Scalar::one()).to_canonical_limbs();
        if f.pow_vartime(&r_minus_one) * f != Fp12::one() {
            return Err(Error::encoding("Gt::from_bytes", "element not in the target group"));
        }
        Ok(Gt(f))
    }
}

fn coefficients(f: &Fp12) -> [Fp; 12] {
    [
        f.c0.c0.c0, f.c0.c0.c1, f.c0.c1.c0, f.c0.c1.c1, f.c0.c2.c0, f.c0.c2.c1,
        f.c1.c0.c0, f.c1.c0.c1, f.c1.c1.c0, f.c1.c1.c1, f.c1.c2.c0, f.c1.c2.c1,
    ]
}

impl shercrypto_api::Serialize for Gt {
    fn to_bytes(&self) -> Vec<u8> {
        Gt::to_bytes(self).to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> shercrypto_api::Result<Self> {
        validate::length("Gt::from_bytes", bytes.len(), BLS12_381_GT_SIZE)?;
        let mut array = [0u8; BLS12_381_GT_SIZE];
        array.copy_from_slice(bytes);
        Ok(Gt::from_bytes(&array)?)
    }
}

impl<'a> Neg for &'a Gt {
    type Output = Gt;

    #[inline]
    fn neg(self) -> Gt {
        // Gt elements have norm one, so the conjugate is the inverse
        Gt(self.0.conjugate())
    }
}

impl_neg_owned!(Gt);

impl<'a, 'b> Add<&'b Gt> for &'a Gt {
    type Output = Gt;

    #[inline]
    fn add(self, rhs: &'b Gt) -> Gt {
        Gt(self.0 * rhs.0)
    }
}

impl<'a, 'b> Sub<&'b Gt> for &'a Gt {
    type Output = Gt;

    #[inline]
    fn sub(self, rhs: &'b Gt) -> Gt {
        self + (-rhs)
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a Gt {
    type Output = Gt;

    fn mul(self, other: &'b Scalar) -> Self::Output {
        Gt(self.0.pow_vartime(&other.to_canonical_limbs()))
    }
}

impl_binops_additive!(Gt, Gt);
impl_binops_multiplicative!(Gt, Scalar);

impl<T> Sum<T> for Gt
where
    T: Borrow<Gt>,
{
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(Self::identity(), |acc, item| acc + item.borrow())
    }
}

/// A G2 point with the line coefficients of its Miller loop precomputed.
///
/// Preparing once pays off when the same G2 point is paired many times,
/// as with a fixed verification key.
#[derive(Clone, Debug)]
pub struct G2Prepared {
    infinity: Choice,
    coeffs: Vec<(Fp2, Fp2, Fp2)>,
}

impl From<G2Affine> for G2Prepared {
    fn from(q: G2Affine) -> G2Prepared {
        struct Adder {
            cur: G2Projective,
            base: G2Affine,
            coeffs: Vec<(Fp2, Fp2, Fp2)>,
        }

        impl MillerLoopDriver for Adder {
            type Output = ();

            fn doubling_step(&mut self, _: Self::Output) -> Self::Output {
                let coeffs = doubling_step(&mut self.cur);
                self.coeffs.push(coeffs);
            }
            fn addition_step(&mut self, _: Self::Output) -> Self::Output {
                let coeffs = addition_step(&mut self.cur, &self.base);
                self.coeffs.push(coeffs);
            }
            fn square_output(_: Self::Output) -> Self::Output {}
            fn conjugate(_: Self::Output) -> Self::Output {}
            fn one() -> Self::Output {}
        }

        let is_identity = q.is_identity();
        let q = G2Affine::conditional_select(&q, &G2Affine::generator(), is_identity);

        let mut adder = Adder {
            cur: G2Projective::from(q),
            base: q,
            coeffs: Vec::with_capacity(68),
        };

        miller_loop(&mut adder);

        G2Prepared {
            infinity: is_identity,
            coeffs: adder.coeffs,
        }
    }
}

/// Evaluate `Π e'(P_i, Q_i)` up to the final exponentiation, sharing the
/// squarings between all pairs.
///
/// Pairs with either point at infinity contribute 1.
pub fn multi_miller_loop(terms: &[(&G1Affine, &G2Prepared)]) -> MillerLoopResult {
    struct Adder<'a, 'b, 'c> {
        terms: &'c [(&'a G1Affine, &'b G2Prepared)],
        index: usize,
    }

    impl<'a, 'b, 'c> MillerLoopDriver for Adder<'a, 'b, 'c> {
        type Output = Fp12;

        fn doubling_step(&mut self, f: Self::Output) -> Self::Output {
            let index = self.index;
            let f = self.terms.iter().fold(f, |f, term| {
                let either_identity = term.0.is_identity() | term.1.infinity;
                let new_f = ell(f, &term.1.coeffs[index], term.0);
                Fp12::conditional_select(&new_f, &f, either_identity)
            });
            self.index += 1;
            f
        }
        fn addition_step(&mut self, f: Self::Output) -> Self::Output {
            // Same bookkeeping: one stored coefficient per step
            self.doubling_step(f)
        }
        fn square_output(f: Self::Output) -> Self::Output {
            f.square()
        }
        fn conjugate(f: Self::Output) -> Self::Output {
            f.conjugate()
        }
        fn one() -> Self::Output {
            Fp12::one()
        }
    }

    let mut adder = Adder { terms, index: 0 };
    MillerLoopResult(miller_loop(&mut adder))
}

/// `e(p, q)`
pub fn pairing(p: &G1Affine, q: &G2Affine) -> Gt {
    struct Adder {
        cur: G2Projective,
        base: G2Affine,
        p: G1Affine,
    }

    impl MillerLoopDriver for Adder {
        type Output = Fp12;

        fn doubling_step(&mut self, f: Self::Output) -> Self::Output {
            let coeffs = doubling_step(&mut self.cur);
            ell(f, &coeffs, &self.p)
        }
        fn addition_step(&mut self, f: Self::Output) -> Self::Output {
            let coeffs = addition_step(&mut self.cur, &self.base);
            ell(f, &coeffs, &self.p)
        }
        fn square_output(f: Self::Output) -> Self::Output {
            f.square()
        }
        fn conjugate(f: Self::Output) -> Self::Output {
            f.conjugate()
        }
        fn one() -> Self::Output {
            Fp12::one()
        }
    }

    let either_identity = p.is_identity() | q.is_identity();
    let p = G1Affine::conditional_select(p, &G1Affine::generator(), either_identity);
    let q = G2Affine::conditional_select(q, &G2Affine::generator(), either_identity);

    let mut adder = Adder {
        cur: G2Projective::from(q),
        base: q,
        p,
    };

    let f = miller_loop(&mut adder);
    let f = Fp12::conditional_select(&f, &Fp12::one(), either_identity);
    MillerLoopResult(f).final_exponentiation()
}

/// `Π e(p_i, q_i)` with a single shared Miller loop and one final
/// exponentiation.
pub fn pairing_product(terms: &[(G1Affine, G2Affine)]) -> Result<Gt> {
    validate::min_length("pairing_product", terms.len(), 1)?;

    let prepared: Vec<(G1Affine, G2Prepared)> = terms
        .iter()
        .map(|(p, q)| (*p, G2Prepared::from(*q)))
        .collect();
    let refs: Vec<(&G1Affine, &G2Prepared)> = prepared.iter().map(|(p, q)| (p, q)).collect();

    Ok(multi_miller_loop(&refs).final_exponentiation())
}

trait MillerLoopDriver {
    type Output;

    fn doubling_step(&mut self, f: Self::Output) -> Self::Output;
    fn addition_step(&mut self, f: Self::Output) -> Self::Output;
    fn square_output(f: Self::Output) -> Self::Output;
    fn conjugate(f: Self::Output) -> Self::Output;
    fn one() -> Self::Output;
}

/// Walk the bits of |x| >> 1 below the leading one, then finish with a
/// doubling for the lowest bit (which is zero).
fn miller_loop<D: MillerLoopDriver>(driver: &mut D) -> D::Output {
    let mut f = D::one();

    let mut found_one = false;
    for i in (0..64).rev().map(|b| (((BLS_X >> 1) >> b) & 1) == 1) {
        if !found_one {
            found_one = i;
            continue;
        }

        f = driver.doubling_step(f);

        if i {
            f = driver.addition_step(f);
        }

        f = D::square_output(f);
    }

    f = driver.doubling_step(f);

    if BLS_X_IS_NEGATIVE {
        f = D::conjugate(f);
    }

    f
}

// Evaluate the line at p and multiply it into f
fn ell(f: Fp12, coeffs: &(Fp2, Fp2, Fp2), p: &G1Affine) -> Fp12 {
    let c0 = coeffs.0.mul_by_fp(&p.y);
    let c1 = coeffs.1.mul_by_fp(&p.x);

    f.mul_by_014(&coeffs.2, &c1, &c0)
}

// Algorithm 26 of 2010/354
fn doubling_step(r: &mut G2Projective) -> (Fp2, Fp2, Fp2) {
    let tmp0 = r.x.square();
    let tmp1 = r.y.square();
    let tmp2 = tmp1.square();
    let tmp3 = (tmp1 + r.x).square() - tmp0 - tmp2;
    let tmp3 = tmp3 + tmp3;
    let tmp4 = tmp0 + tmp0 + tmp0;
    let mut tmp6 = r.x + tmp4;
    let tmp5 = tmp4.square();
    let zsquared = r.z.square();
    r.x = tmp5 - tmp3 - tmp3;
    r.z = (r.z + r.y).square() - tmp1 - zsquared;
    r.y = (tmp3 - r.x) * tmp4;
    let tmp2 = tmp2 + tmp2;
    let tmp2 = tmp2 + tmp2;
    let tmp2 = tmp2 + tmp2;
    r.y = r.y - tmp2;
    let tmp3 = tmp4 * zsquared;
    let tmp3 = tmp3 + tmp3;
    let tmp3 = -tmp3;
    tmp6 = tmp6.square() - tmp0 - tmp5;
    let tmp1 = tmp1 + tmp1;
    let tmp1 = tmp1 + tmp1;
    tmp6 = tmp6 - tmp1;
    let tmp0 = r.z * zsquared;
    let tmp0 = tmp0 + tmp0;

    (tmp0, tmp3, tmp6)
}

// Algorithm 27 of 2010/354
fn addition_step(r: &mut G2Projective, q: &G2Affine) -> (Fp2, Fp2, Fp2) {
    let zsquared = r.z.square();
    let ysquared = q.y.square();
    let t0 = zsquared * q.x;
    let t1 = ((q.y + r.z).square() - ysquared - zsquared) * zsquared;
    let t2 = t0 - r.x;
    let t3 = t2.square();
    let t4 = t3 + t3;
    let t4 = t4 + t4;
    let t5 = t4 * t2;
    let t6 = t1 - r.y - r.y;
    let t9 = t6 * q.x;
    let t7 = t4 * r.x;
    r.x = t6.square() - t5 - t7 - t7;
    r.z = (r.z + t2).square() - zsquared - t3;
    let t10 = q.y + r.z;
    let t8 = (t7 - r.x) * t6;
    let t0 = r.y * t5;
    let t0 = t0 + t0;
    r.y = t8 - t0;
    let t10 = t10.square() - ysquared - r.z.square();
    let t9 = t9 + t9 - t10;
    let t10 = r.z + r.z;
    let t6 = -t6;
    let t1 = t6 + t6;

    (t10, t1, t9)
}

// e(g1, g2)
const GT_GENERATOR: Fp12 = Fp12 {
    c0: Fp6 {
        c0: Fp2 {
            c0: Fp::from_raw_unchecked([
                0x1972_e433_a01f_85c5,
                0x97d3_2b76_fd77_2538,
                0xc8ce_546f_c96b_cdf9,
                0xcef6_3e73_66d4_0614,
                0xa611_3427_8184_3780,
                0x13f3_448a_3fc6_d825,
            ]),
            c1: Fp::from_raw_unchecked([
                0xd263_31b0_2e9d_6995,
                0x9d68_a482_f779_7e7d,
                0x9c9b_2924_8d39_ea92,
                0xf480_1ca2_e131_07aa,
                0xa16c_0732_bdbc_b066,
                0x083c_a4af_ba36_0478,
            ]),
        },
        c1: Fp2 {
            c0: Fp::from_raw_unchecked([
                0x59e2_61db_0916_b641,
                0x2716_b6f4_b23e_960d,
                0xc8e5_5b10_a0bd_9c45,
                0x0bdb_0bd9_9c4d_eda8,
                0x8cf8_9ebf_57fd_aac5,
                0x12d6_b792_9e77_7a5e,
            ]),
            c1: Fp::from_raw_unchecked([
                0x5fc8_5188_b0e1_5f35,
                0x34a0_6e3a_8f09_6365,
                0xdb31_26a6_e02a_d62c,
                0xfc6f_5aa9_7d9a_990b,
                0xa12f_55f5_eb89_c210,
                0x1723_703a_926f_8889,
            ]),
        },
        c2: Fp2 {
            c0: Fp::from_raw_unchecked([
                0x9358_8f29_7182_8778,
                0x43f6_5b86_11ab_7585,
                0x3183_aaf5_ec27_9fdf,
                0xfa73_d7e1_8ac9_9df6,
                0x64e1_76a6_a64c_99b0,
                0x179f_a78c_5838_8f1f,
            ]),
            c1: Fp::from_raw_unchecked([
                0x672a_0a11_ca2a_ef12,
                0x0d11_b9b5_2aa3_f16b,
                0xa444_12d0_699d_056e,
                0xc01d_0177_221a_5ba5,
                0x66e0_cede_6c73_5529,
                0x05f5_a71e_9fdd_c339,
            ]),
        },
    },
    c1: Fp6 {
        c0: Fp2 {
            c0: Fp::from_raw_unchecked([
                0xd30a_88a1_b062_c679,
                0x5ac5_6a5d_35fc_8304,
                0xd0c8_34a6_a81f_290d,
                0xcd54_30c2_da37_07c7,
                0xf0c2_7ff7_8050_0af0,
                0x0924_5da6_e2d7_2eae,
            ]),
            c1: Fp::from_raw_unchecked([
                0x9f2e_0676_791b_5156,
                0xe2d1_c823_4918_fe13,
                0x4c9e_459f_3c56_1bf4,
                0xa3e8_5e53_b9d3_e3c1,
                0x820a_121e_21a7_0020,
                0x15af_6183_41c5_9acc,
            ]),
        },
        c1: Fp2 {
            c0: Fp::from_raw_unchecked([
                0x7c95_658c_2499_3ab1,
                0x73eb_3872_1ca8_86b9,
                0x5256_d749_4774_34bc,
                0x8ba4_1902_ea50_4a8b,
                0x04a3_d3f8_0c86_ce6d,
                0x18a6_4a87_fb68_6eaa,
            ]),
            c1: Fp::from_raw_unchecked([
                0xbb83_e71b_b920_cf26,
                0x2a52_77ac_92a7_3945,
                0xfc0e_e59f_94f0_46a0,
                0x7158_cdf3_7860_58f7,
                0x7cc1_061b_82f9_45f6,
                0x03f8_47aa_9fdb_e567,
            ]),
        },
        c2: Fp2 {
            c0: Fp::from_raw_unchecked([
                0x8078_dba5_6134_e657,
                0x1cd7_ec9a_4399_8a6e,
                0xb1aa_599a_1a99_3766,
                0xc9a0_f62f_0842_ee44,
                0x8e15_9be3_b605_dffa,
                0x0c86_ba0d_4af1_3fc2,
            ]),
            c1: Fp::from_raw_unchecked([
                0xe80f_f2a0_6a52_ffb1,
                0x7694_ca48_721a_906c,
                0x7583_183e_03b0_8514,
                0xf567_afdd_40ce_e4e2,
                0x9a6d_96d2_e526_a5fc,
                0x197e_9f49_861f_2242,
            ]),
        },
    },
};
