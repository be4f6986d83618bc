//! G₂ group implementation for BLS12-381.
//!
//! G₂ lives on the sextic twist `y² = x³ + 4(u + 1)` over Fp2, in the same
//! Jacobian representation as G₁.

use crate::error::{validate, Error, Result};
use rand_core::RngCore;
use shercrypto_api::PointEncoding;
use shercrypto_params::pairing::bls12_381::{
    BLS12_381_FP_SIZE, BLS12_381_G2_COMPRESSED_SIZE, BLS12_381_G2_UNCOMPRESSED_SIZE,
};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::field::fp::Fp;
use super::field::fp2::Fp2;
use super::group::CurveGroup;
use super::Scalar;

/// G₂ affine point representation.
#[derive(Copy, Clone, Debug)]
pub struct G2Affine {
    pub(crate) x: Fp2,
    pub(crate) y: Fp2,
    infinity: Choice,
}

/// Curve constant B = 4(u+1)
const B: Fp2 = Fp2 {
    c0: Fp::from_raw_unchecked([
        0xaa27_0000_000c_fff3,
        0x53cc_0032_fc34_000a,
        0x478f_e97a_6b0a_807f,
        0xb1d3_7ebe_e6ba_24d7,
        0x8ec9_733b_bf78_ab2f,
        0x09d6_4551_3d83_de7e,
    ]),
    c1: Fp::from_raw_unchecked([
        0xaa27_0000_000c_fff3,
        0x53cc_0032_fc34_000a,
        0x478f_e97a_6b0a_807f,
        0xb1d3_7ebe_e6ba_24d7,
        0x8ec9_733b_bf78_ab2f,
        0x09d6_4551_3d83_de7e,
    ]),
};

// 1 / ((u+1) ^ ((p-1)/3))
const PSI_COEFF_X: Fp2 = Fp2 {
    c0: Fp::zero(),
    c1: Fp::from_raw_unchecked([
        0x890d_c9e4_8675_45c3,
        0x2af3_2253_3285_a5d5,
        0x5088_0866_309b_7e2c,
        0xa20d_1b8c_7e88_1024,
        0x14e4_f04f_e2db_9068,
        0x14e5_6d3f_1564_853a,
    ]),
};

// 1 / ((u+1) ^ ((p-1)/2))
const PSI_COEFF_Y: Fp2 = Fp2 {
    c0: Fp::from_raw_unchecked([
        0x3e2f_585d_a55c_9ad1,
        0x4294_213d_86c1_8183,
        0x3828_44c8_8b62_3732,
        0x92ad_2afd_1910_3e18,
        0x1d79_4e4f_ac7c_f0b9,
        0x0bd5_92fc_7d82_5ec8,
    ]),
    c1: Fp::from_raw_unchecked([
        0x7bcf_a7a2_5aa3_0fda,
        0xdc17_dec1_2a92_7e7c,
        0x2f08_8dd8_6b4e_bef1,
        0xd1ca_2087_da74_d4a7,
        0x2da2_5966_96ce_bc1d,
        0x0e2b_7eed_bbfd_87d2,
    ]),
};

// 1 / 2^((p-1)/3)
const PSI2_COEFF_X: Fp2 = Fp2 {
    c0: Fp::from_raw_unchecked([
        0xcd03_c9e4_8671_f071,
        0x5dab_2246_1fcd_a5d2,
        0x5870_42af_d385_1b95,
        0x8eb6_0ebe_01ba_cb9e,
        0x03f9_7d6e_83d0_50d2,
        0x18f0_2065_5463_8741,
    ]),
    c1: Fp::zero(),
};

const COMPRESSION_FLAG: u8 = 1 << 7;
const INFINITY_FLAG: u8 = 1 << 6;
const SORT_FLAG: u8 = 1 << 5;
const FLAG_MASK: u8 = 0b0001_1111;

/// Read an Fp2 written as `c1 || c0`, clearing the flag bits of the first byte.
fn read_fp2(bytes: &[u8], masked: bool, context: &'static str) -> Result<Fp2> {
    let mut c1 = [0u8; BLS12_381_FP_SIZE];
    let mut c0 = [0u8; BLS12_381_FP_SIZE];
    c1.copy_from_slice(&bytes[..BLS12_381_FP_SIZE]);
    c0.copy_from_slice(&bytes[BLS12_381_FP_SIZE..2 * BLS12_381_FP_SIZE]);
    if masked {
        c1[0] &= FLAG_MASK;
    }

    let c1 = Option::<Fp>::from(Fp::from_bytes(&c1))
        .ok_or_else(|| Error::encoding(context, "non-canonical coordinate"))?;
    let c0 = Option::<Fp>::from(Fp::from_bytes(&c0))
        .ok_or_else(|| Error::encoding(context, "non-canonical coordinate"))?;
    Ok(Fp2 { c0, c1 })
}

fn write_fp2(out: &mut [u8], v: &Fp2) {
    out[..BLS12_381_FP_SIZE].copy_from_slice(&v.c1.to_bytes());
    out[BLS12_381_FP_SIZE..2 * BLS12_381_FP_SIZE].copy_from_slice(&v.c0.to_bytes());
}

impl G2Affine {
    /// Point at infinity, stored as `(0, 0)`.
    pub fn identity() -> G2Affine {
        G2Affine {
            x: Fp2::zero(),
            y: Fp2::zero(),
            infinity: Choice::from(1u8),
        }
    }

    /// Fixed generator.
    pub fn generator() -> G2Affine {
        G2Affine {
            x: Fp2 {
                c0: Fp::from_raw_unchecked([
                    0xf5f2_8fa2_0294_0a10,
                    0xb3f5_fb26_87b4_961a,
                    0xa1a8_93b5_3e2a_e580,
                    0x9894_999d_1a3c_aee9,
                    0x6f67_b763_1863_366b,
                    0x0581_9192_4350_bcd7,
                ]),
                c1: Fp::from_raw_unchecked([
                    0xa5a9_c075_9e23_f606,
                    0xaaa0_c59d_bccd_60c3,
                    0x3bb1_7e18_e286_7806,
                    0x1b1a_b6cc_8541_b367,
                    0xc2b6_ed0e_f215_8547,
                    0x1192_2a09_7360_edf3,
                ]),
            },
            y: Fp2 {
                c0: Fp::from_raw_unchecked([
                    0x4c73_0af8_6049_4c4a,
                    0x597c_fa1f_5e36_9c5a,
                    0xe7e6_856c_aa0a_635a,
                    0xbbef_b5e9_6e0d_495f,
                    0x07d3_a975_f0ef_25a2,
                    0x0083_fd8e_7e80_dae5,
                ]),
                c1: Fp::from_raw_unchecked([
                    0xadc0_fc92_df64_b05d,
                    0x18aa_270a_2b14_61dc,
                    0x86ad_ac6a_3be4_eba0,
                    0x7949_5c4e_c93d_a33a,
                    0xe717_5850_a43c_caed,
                    0x0b2b_c2a1_63de_1bf2,
                ]),
            },
            infinity: Choice::from(0u8),
        }
    }

    /// Compress to 96 bytes, `x.c1 || x.c0` plus flags.
    pub fn to_compressed(&self) -> [u8; BLS12_381_G2_COMPRESSED_SIZE] {
        let mut res = [0; BLS12_381_G2_COMPRESSED_SIZE];
        write_fp2(&mut res, &self.x);

        res[0] |= COMPRESSION_FLAG;
        res[0] |= u8::conditional_select(&0u8, &INFINITY_FLAG, self.infinity);
        res[0] |= u8::conditional_select(
            &0u8,
            &SORT_FLAG,
            (!self.infinity) & self.y.lexicographically_largest(),
        );
        res
    }

    /// Serialize to 192 bytes uncompressed.
    pub fn to_uncompressed(&self) -> [u8; BLS12_381_G2_UNCOMPRESSED_SIZE] {
        let mut res = [0; BLS12_381_G2_UNCOMPRESSED_SIZE];
        write_fp2(&mut res[..2 * BLS12_381_FP_SIZE], &self.x);
        write_fp2(&mut res[2 * BLS12_381_FP_SIZE..], &self.y);

        res[0] |= u8::conditional_select(&0u8, &INFINITY_FLAG, self.infinity);
        res
    }

    /// Deserialize from uncompressed bytes, checking subgroup membership.
    pub fn from_uncompressed(bytes: &[u8; BLS12_381_G2_UNCOMPRESSED_SIZE]) -> Result<Self> {
        Self::from_uncompressed_unchecked(bytes).and_then(Self::check_subgroup)
    }

    /// Deserialize from uncompressed bytes without the subgroup check.
    pub fn from_uncompressed_unchecked(bytes: &[u8; BLS12_381_G2_UNCOMPRESSED_SIZE]) -> Result<Self> {
        const CONTEXT: &str = "G2Affine::from_uncompressed";

        let flags = bytes[0];
        if flags & COMPRESSION_FLAG != 0 {
            return Err(Error::encoding(CONTEXT, "compression flag set"));
        }
        if flags & SORT_FLAG != 0 {
            return Err(Error::encoding(CONTEXT, "sign flag set"));
        }

        if flags & INFINITY_FLAG != 0 {
            let rest_is_zero =
                (bytes[0] & FLAG_MASK) == 0 && bytes[1..].iter().all(|b| *b == 0);
            if !rest_is_zero {
                return Err(Error::encoding(CONTEXT, "non-zero coordinates at infinity"));
            }
            return Ok(G2Affine::identity());
        }

        let x = read_fp2(&bytes[..2 * BLS12_381_FP_SIZE], true, CONTEXT)?;
        let y = read_fp2(&bytes[2 * BLS12_381_FP_SIZE..], false, CONTEXT)?;

        let p = G2Affine {
            x,
            y,
            infinity: Choice::from(0u8),
        };
        if !bool::from(p.is_on_curve()) {
            return Err(Error::encoding(CONTEXT, "point not on curve"));
        }
        Ok(p)
    }

    /// Deserialize from compressed bytes, checking subgroup membership.
    pub fn from_compressed(bytes: &[u8; BLS12_381_G2_COMPRESSED_SIZE]) -> Result<Self> {
        Self::from_compressed_unchecked(bytes).and_then(Self::check_subgroup)
    }

    /// Deserialize from compressed bytes without the subgroup check.
    pub fn from_compressed_unchecked(bytes: &[u8; BLS12_381_G2_COMPRESSED_SIZE]) -> Result<Self> {
        const CONTEXT: &str = "G2Affine::from_compressed";

        let flags = bytes[0];
        if flags & COMPRESSION_FLAG == 0 {
            return Err(Error::encoding(CONTEXT, "compression flag not set"));
        }

        if flags & INFINITY_FLAG != 0 {
            let rest_is_zero =
                (bytes[0] & FLAG_MASK) == 0 && bytes[1..].iter().all(|b| *b == 0);
            if flags & SORT_FLAG != 0 || !rest_is_zero {
                return Err(Error::encoding(CONTEXT, "non-canonical point at infinity"));
            }
            return Ok(G2Affine::identity());
        }

        let x = read_fp2(bytes, true, CONTEXT)?;
        let y = Option::<Fp2>::from(((x.square() * x) + B).sqrt())
            .ok_or_else(|| Error::encoding(CONTEXT, "point not on curve"))?;

        let sort = Choice::from((flags & SORT_FLAG != 0) as u8);
        let y = Fp2::conditional_select(&y, &-y, y.lexicographically_largest() ^ sort);

        Ok(G2Affine {
            x,
            y,
            infinity: Choice::from(0u8),
        })
    }

    fn check_subgroup(p: G2Affine) -> Result<G2Affine> {
        if !bool::from(p.is_torsion_free()) {
            return Err(Error::encoding("G2Affine", "point not in prime-order subgroup"));
        }
        Ok(p)
    }

    /// Check if point at infinity.
    #[inline]
    pub fn is_identity(&self) -> Choice {
        self.infinity
    }

    /// Check if on curve y² = x³ + B.
    pub fn is_on_curve(&self) -> Choice {
        (self.y.square() - (self.x.square() * self.x)).ct_eq(&B) | self.infinity
    }

    /// Check subgroup membership using psi endomorphism.
    pub fn is_torsion_free(&self) -> Choice {
        G2Projective::from(self).is_torsion_free()
    }
}

/// G₂ point in Jacobian coordinates.
#[derive(Copy, Clone, Debug)]
pub struct G2Projective {
    pub(crate) x: Fp2,
    pub(crate) y: Fp2,
    pub(crate) z: Fp2,
}

impl_jacobian_point!(G2Affine, G2Projective, Fp2);

impl G2Projective {
    /// Point at infinity, `(1, 1, 0)`.
    pub fn identity() -> G2Projective {
        G2Projective {
            x: Fp2::one(),
            y: Fp2::one(),
            z: Fp2::zero(),
        }
    }

    /// Fixed generator.
    pub fn generator() -> G2Projective {
        G2Projective::from(G2Affine::generator())
    }

    /// Random point in the prime-order subgroup.
    pub fn random(mut rng: impl RngCore) -> Self {
        loop {
            let x = Fp2::random(&mut rng);
            let flip_sign = rng.next_u32() % 2 != 0;

            let y = match Option::<Fp2>::from(((x.square() * x) + B).sqrt()) {
                Some(y) => y,
                None => continue,
            };
            let p = G2Affine {
                x,
                y: if flip_sign { -y } else { y },
                infinity: Choice::from(0u8),
            };

            let p_cleared = G2Projective::from(p).clear_cofactor();
            if !bool::from(p_cleared.is_identity()) {
                return p_cleared;
            }
        }
    }

    /// Point doubling (dbl-2007-bl with a = 0).
    pub fn double(&self) -> G2Projective {
        let xx = self.x.square();
        let yy = self.y.square();
        let yyyy = yy.square();
        let zz = self.z.square();

        let s = ((self.x + yy).square() - xx - yyyy).double();
        let m = xx.double() + xx;

        let x3 = m.square() - s.double();
        let y3 = m * (s - x3) - yyyy.double().double().double();
        let z3 = (self.y + self.z).square() - yy - zz;

        let tmp = G2Projective { x: x3, y: y3, z: z3 };
        G2Projective::conditional_select(&tmp, &G2Projective::identity(), self.is_identity())
    }

    /// Point addition (add-2007-bl).
    pub fn add(&self, rhs: &G2Projective) -> G2Projective {
        if bool::from(self.is_identity()) {
            return *rhs;
        }
        if bool::from(rhs.is_identity()) {
            return *self;
        }

        let z1z1 = self.z.square();
        let z2z2 = rhs.z.square();
        let u1 = self.x * z2z2;
        let u2 = rhs.x * z1z1;
        let s1 = self.y * rhs.z * z2z2;
        let s2 = rhs.y * self.z * z1z1;

        if u1 == u2 {
            if s1 == s2 {
                return self.double();
            }
            return G2Projective::identity();
        }

        let h = u2 - u1;
        let i = h.double().square();
        let j = h * i;
        let r = (s2 - s1).double();
        let v = u1 * i;

        let x3 = r.square() - j - v.double();
        let y3 = r * (v - x3) - (s1 * j).double();
        let z3 = ((self.z + rhs.z).square() - z1z1 - z2z2) * h;

        G2Projective { x: x3, y: y3, z: z3 }
    }

    /// Mixed addition with an affine point (madd-2007-bl).
    pub fn add_mixed(&self, rhs: &G2Affine) -> G2Projective {
        if bool::from(rhs.is_identity()) {
            return *self;
        }
        if bool::from(self.is_identity()) {
            return G2Projective::from(rhs);
        }

        let z1z1 = self.z.square();
        let u2 = rhs.x * z1z1;
        let s2 = rhs.y * self.z * z1z1;

        if self.x == u2 {
            if self.y == s2 {
                return self.double();
            }
            return G2Projective::identity();
        }

        let h = u2 - self.x;
        let hh = h.square();
        let i = hh.double().double();
        let j = h * i;
        let r = (s2 - self.y).double();
        let v = self.x * i;

        let x3 = r.square() - j - v.double();
        let y3 = r * (v - x3) - (self.y * j).double();
        let z3 = (self.z + h).square() - z1z1 - hh;

        G2Projective { x: x3, y: y3, z: z3 }
    }

    /// Clear cofactor.
    pub fn clear_cofactor(&self) -> G2Projective {
        let t1 = self.mul_by_x();
        let t2 = self.psi();
        self.double().psi2() + (t1 + t2).mul_by_x() - t1 - t2 - *self
    }

    /// Multiply by curve parameter x.
    fn mul_by_x(&self) -> G2Projective {
        let mut xself = G2Projective::identity();
        let mut x = super::BLS_X >> 1;
        let mut acc = *self;
        while x != 0 {
            acc = acc.double();
            if x % 2 == 1 {
                xself += acc;
            }
            x >>= 1;
        }
        if super::BLS_X_IS_NEGATIVE {
            xself = -xself;
        }
        xself
    }

    /// Untwist-Frobenius-twist endomorphism ψ.
    ///
    /// Frobenius is a field automorphism, so it can be applied to the
    /// Jacobian coordinates directly.
    fn psi(&self) -> G2Projective {
        G2Projective {
            x: self.x.frobenius_map() * PSI_COEFF_X,
            y: self.y.frobenius_map() * PSI_COEFF_Y,
            z: self.z.frobenius_map(),
        }
    }

    /// ψ², which fixes Fp2 coordinates up to constants.
    fn psi2(&self) -> G2Projective {
        G2Projective {
            x: self.x * PSI2_COEFF_X,
            y: self.y.neg(),
            z: self.z,
        }
    }

    /// Subgroup check: `ψ(P) == [x]P`.
    ///
    /// Section 4 of <https://eprint.iacr.org/2021/1130>.
    pub fn is_torsion_free(&self) -> Choice {
        self.psi().ct_eq(&self.mul_by_x())
    }

    /// Batch conversion to affine with one field inversion.
    ///
    /// Fails with `InvalidInputSize` when `q` is shorter than `p`.
    pub fn batch_normalize(p: &[Self], q: &mut [G2Affine]) -> Result<()> {
        validate::min_length("G2Projective::batch_normalize", q.len(), p.len())?;

        let mut acc = Fp2::one();
        for (p, q) in p.iter().zip(q.iter_mut()) {
            q.x = acc;
            acc = Fp2::conditional_select(&(acc * p.z), &acc, p.is_identity());
        }

        acc = acc.invert()?;

        for (p, q) in p.iter().rev().zip(q[..p.len()].iter_mut().rev()) {
            let skip = p.is_identity();
            let zinv = q.x * acc;
            acc = Fp2::conditional_select(&(acc * p.z), &acc, skip);
            let zinv2 = zinv.square();

            let tmp = G2Affine {
                x: p.x * zinv2,
                y: p.y * (zinv2 * zinv),
                infinity: Choice::from(0u8),
            };
            *q = G2Affine::conditional_select(&tmp, &G2Affine::identity(), skip);
        }

        Ok(())
    }

    /// Check if point at infinity.
    #[inline]
    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    /// Check `Y² = X³ + B·Z⁶`.
    pub fn is_on_curve(&self) -> Choice {
        let z2 = self.z.square();
        let z6 = z2.square() * z2;
        self.y.square().ct_eq(&(self.x.square() * self.x + z6 * B)) | self.z.is_zero()
    }
}

impl CurveGroup for G2Projective {
    type Affine = G2Affine;

    fn identity() -> Self {
        G2Projective::identity()
    }

    fn generator() -> Self {
        G2Projective::generator()
    }

    fn is_identity(&self) -> Choice {
        G2Projective::is_identity(self)
    }

    fn double(&self) -> Self {
        G2Projective::double(self)
    }

    fn add(&self, rhs: &Self) -> Self {
        G2Projective::add(self, rhs)
    }

    fn add_mixed(&self, rhs: &G2Affine) -> Self {
        G2Projective::add_mixed(self, rhs)
    }

    fn to_affine(&self) -> G2Affine {
        G2Affine::from(self)
    }

    fn from_affine(p: &G2Affine) -> Self {
        G2Projective::from(p)
    }

    fn batch_normalize(points: &[Self], out: &mut [G2Affine]) -> Result<()> {
        G2Projective::batch_normalize(points, out)
    }
}

impl PointEncoding for G2Affine {
    const COMPRESSED_SIZE: usize = BLS12_381_G2_COMPRESSED_SIZE;
    const UNCOMPRESSED_SIZE: usize = BLS12_381_G2_UNCOMPRESSED_SIZE;

    fn to_compressed_bytes(&self) -> Vec<u8> {
        self.to_compressed().to_vec()
    }

    fn to_uncompressed_bytes(&self) -> Vec<u8> {
        self.to_uncompressed().to_vec()
    }

    fn from_compressed_slice(bytes: &[u8]) -> shercrypto_api::Result<Self> {
        validate::length("G2Affine::from_compressed", bytes.len(), BLS12_381_G2_COMPRESSED_SIZE)?;
        let mut array = [0u8; BLS12_381_G2_COMPRESSED_SIZE];
        array.copy_from_slice(bytes);
        Ok(Self::from_compressed(&array)?)
    }

    fn from_uncompressed_slice(bytes: &[u8]) -> shercrypto_api::Result<Self> {
        validate::length(
            "G2Affine::from_uncompressed",
            bytes.len(),
            BLS12_381_G2_UNCOMPRESSED_SIZE,
        )?;
        let mut array = [0u8; BLS12_381_G2_UNCOMPRESSED_SIZE];
        array.copy_from_slice(bytes);
        Ok(Self::from_uncompressed(&array)?)
    }
}

impl PointEncoding for G2Projective {
    const COMPRESSED_SIZE: usize = BLS12_381_G2_COMPRESSED_SIZE;
    const UNCOMPRESSED_SIZE: usize = BLS12_381_G2_UNCOMPRESSED_SIZE;

    fn to_compressed_bytes(&self) -> Vec<u8> {
        G2Affine::from(self).to_compressed().to_vec()
    }

    fn to_uncompressed_bytes(&self) -> Vec<u8> {
        G2Affine::from(self).to_uncompressed().to_vec()
    }

    fn from_compressed_slice(bytes: &[u8]) -> shercrypto_api::Result<Self> {
        G2Affine::from_compressed_slice(bytes).map(G2Projective::from)
    }

    fn from_uncompressed_slice(bytes: &[u8]) -> shercrypto_api::Result<Self> {
        G2Affine::from_uncompressed_slice(bytes).map(G2Projective::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    #[test]
    fn test_generator_is_valid() {
        let g = G2Affine::generator();
        assert!(bool::from(g.is_on_curve()));
        assert!(bool::from(g.is_torsion_free()));
    }

    #[test]
    fn test_psi_matches_affine_definition() {
        let mut rng = ChaCha20Rng::seed_from_u64(0x92);
        let p = G2Projective::random(&mut rng).double();

        let lhs = G2Affine::from(p.psi());
        let a = G2Affine::from(p);
        let rhs = G2Affine {
            x: a.x.frobenius_map() * PSI_COEFF_X,
            y: a.y.frobenius_map() * PSI_COEFF_Y,
            infinity: Choice::from(0u8),
        };
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_psi2_is_psi_twice() {
        let g = G2Projective::generator().double();
        assert_eq!(g.psi().psi(), g.psi2());
    }

    #[test]
    fn test_clear_cofactor_lands_in_subgroup() {
        let mut rng = ChaCha20Rng::seed_from_u64(0x93);
        loop {
            let x = Fp2::random(&mut rng);
            if let Some(y) = Option::<Fp2>::from(((x.square() * x) + B).sqrt()) {
                let p = G2Projective::from(G2Affine {
                    x,
                    y,
                    infinity: Choice::from(0u8),
                });
                let cleared = p.clear_cofactor();
                assert!(bool::from(cleared.is_on_curve()));
                assert!(bool::from(cleared.is_torsion_free()));
                break;
            }
        }
    }

    #[test]
    fn test_add_degenerate_cases() {
        let g = G2Projective::generator();
        assert_eq!(g.add(&g), g.double());
        assert_eq!(g.add(&-g), G2Projective::identity());
        assert_eq!(g.add_mixed(&G2Affine::generator()), g.double());
        assert_eq!(G2Projective::identity().add(&g), g);
    }
}
