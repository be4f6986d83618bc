//! G₁ group implementation for BLS12-381.
//!
//! Points live on `y² = x³ + 4` over Fp. The projective form is Jacobian,
//! `(X, Y, Z)` standing for `(X/Z², Y/Z³)`, with the identity at `Z = 0`.

use crate::error::{validate, Error, Result};
use rand_core::RngCore;
use shercrypto_api::PointEncoding;
use shercrypto_params::pairing::bls12_381::{
    BLS12_381_FP_SIZE, BLS12_381_G1_COMPRESSED_SIZE, BLS12_381_G1_UNCOMPRESSED_SIZE,
};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::field::fp::Fp;
use super::group::CurveGroup;
use super::Scalar;

/// G₁ affine point representation.
#[derive(Copy, Clone, Debug)]
pub struct G1Affine {
    pub(crate) x: Fp,
    pub(crate) y: Fp,
    infinity: Choice,
}

// Curve parameter b = 4
const B: Fp = Fp::from_raw_unchecked([
    0xaa27_0000_000c_fff3,
    0x53cc_0032_fc34_000a,
    0x478f_e97a_6b0a_807f,
    0xb1d3_7ebe_e6ba_24d7,
    0x8ec9_733b_bf78_ab2f,
    0x09d6_4551_3d83_de7e,
]);

/// Cube root of unity in Fp
pub const BETA: Fp = Fp::from_raw_unchecked([
    0x30f1_361b_798a_64e8,
    0xf3b8_ddab_7ece_5a2a,
    0x16a8_ca3a_c615_77f7,
    0xc26a_2ff8_74fd_029b,
    0x3636_b766_6070_1c6e,
    0x051b_a4ab_241b_6160,
]);

const COMPRESSION_FLAG: u8 = 1 << 7;
const INFINITY_FLAG: u8 = 1 << 6;
const SORT_FLAG: u8 = 1 << 5;
const FLAG_MASK: u8 = 0b0001_1111;

impl G1Affine {
    /// Point at infinity, stored as `(0, 0)`.
    pub fn identity() -> G1Affine {
        G1Affine {
            x: Fp::zero(),
            y: Fp::zero(),
            infinity: Choice::from(1u8),
        }
    }

    /// Fixed generator.
    pub fn generator() -> G1Affine {
        G1Affine {
            x: Fp::from_raw_unchecked([
                0x5cb3_8790_fd53_0c16,
                0x7817_fc67_9976_fff5,
                0x154f_95c7_143b_a1c1,
                0xf0ae_6acd_f3d0_e747,
                0xedce_6ecc_21db_f440,
                0x1201_7741_9e0b_fb75,
            ]),
            y: Fp::from_raw_unchecked([
                0xbaac_93d5_0ce7_2271,
                0x8c22_631a_7918_fd8e,
                0xdd59_5f13_5707_25ce,
                0x51ac_5829_5040_5194,
                0x0e1c_8c3f_ad00_59c0,
                0x0bbc_3efc_5008_a26a,
            ]),
            infinity: Choice::from(0u8),
        }
    }

    /// Check if point at infinity.
    #[inline]
    pub fn is_identity(&self) -> Choice {
        self.infinity
    }

    /// Curve membership check.
    pub fn is_on_curve(&self) -> Choice {
        (self.y.square() - (self.x.square() * self.x)).ct_eq(&B) | self.infinity
    }

    /// Subgroup check using endomorphism.
    pub fn is_torsion_free(&self) -> Choice {
        G1Projective::from(self).is_torsion_free()
    }

    /// Compress to 48 bytes.
    pub fn to_compressed(&self) -> [u8; BLS12_381_G1_COMPRESSED_SIZE] {
        let mut res = Fp::conditional_select(&self.x, &Fp::zero(), self.infinity).to_bytes();
        res[0] |= COMPRESSION_FLAG;
        res[0] |= u8::conditional_select(&0u8, &INFINITY_FLAG, self.infinity);
        res[0] |= u8::conditional_select(
            &0u8,
            &SORT_FLAG,
            (!self.infinity) & self.y.lexicographically_largest(),
        );
        res
    }

    /// Serialize to 96 bytes uncompressed.
    pub fn to_uncompressed(&self) -> [u8; BLS12_381_G1_UNCOMPRESSED_SIZE] {
        let mut res = [0; BLS12_381_G1_UNCOMPRESSED_SIZE];
        res[..BLS12_381_FP_SIZE].copy_from_slice(&self.x.to_bytes());
        res[BLS12_381_FP_SIZE..].copy_from_slice(&self.y.to_bytes());
        res[0] |= u8::conditional_select(&0u8, &INFINITY_FLAG, self.infinity);
        res
    }

    /// Deserialize from uncompressed bytes, checking subgroup membership.
    pub fn from_uncompressed(bytes: &[u8; BLS12_381_G1_UNCOMPRESSED_SIZE]) -> Result<Self> {
        Self::from_uncompressed_unchecked(bytes).and_then(Self::check_subgroup)
    }

    /// Deserialize from uncompressed bytes without the subgroup check.
    ///
    /// The curve equation is still enforced.
    pub fn from_uncompressed_unchecked(bytes: &[u8; BLS12_381_G1_UNCOMPRESSED_SIZE]) -> Result<Self> {
        const CONTEXT: &str = "G1Affine::from_uncompressed";

        let flags = bytes[0];
        if flags & COMPRESSION_FLAG != 0 {
            return Err(Error::encoding(CONTEXT, "compression flag set"));
        }
        if flags & SORT_FLAG != 0 {
            return Err(Error::encoding(CONTEXT, "sign flag set"));
        }

        let mut xb = [0u8; BLS12_381_FP_SIZE];
        xb.copy_from_slice(&bytes[..BLS12_381_FP_SIZE]);
        xb[0] &= FLAG_MASK;

        if flags & INFINITY_FLAG != 0 {
            let rest_is_zero = xb.iter().chain(&bytes[BLS12_381_FP_SIZE..]).all(|b| *b == 0);
            if !rest_is_zero {
                return Err(Error::encoding(CONTEXT, "non-zero coordinates at infinity"));
            }
            return Ok(G1Affine::identity());
        }

        let mut yb = [0u8; BLS12_381_FP_SIZE];
        yb.copy_from_slice(&bytes[BLS12_381_FP_SIZE..]);

        let x = Option::<Fp>::from(Fp::from_bytes(&xb))
            .ok_or_else(|| Error::encoding(CONTEXT, "non-canonical x coordinate"))?;
        let y = Option::<Fp>::from(Fp::from_bytes(&yb))
            .ok_or_else(|| Error::encoding(CONTEXT, "non-canonical y coordinate"))?;

        let p = G1Affine {
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
    pub fn from_compressed(bytes: &[u8; BLS12_381_G1_COMPRESSED_SIZE]) -> Result<Self> {
        Self::from_compressed_unchecked(bytes).and_then(Self::check_subgroup)
    }

    /// Deserialize from compressed bytes without the subgroup check.
    pub fn from_compressed_unchecked(bytes: &[u8; BLS12_381_G1_COMPRESSED_SIZE]) -> Result<Self> {
        const CONTEXT: &str = "G1Affine::from_compressed";

        let flags = bytes[0];
        if flags & COMPRESSION_FLAG == 0 {
            return Err(Error::encoding(CONTEXT, "compression flag not set"));
        }

        let mut xb = *bytes;
        xb[0] &= FLAG_MASK;

        if flags & INFINITY_FLAG != 0 {
            if flags & SORT_FLAG != 0 || xb.iter().any(|b| *b != 0) {
                return Err(Error::encoding(CONTEXT, "non-canonical point at infinity"));
            }
            return Ok(G1Affine::identity());
        }

        let x = Option::<Fp>::from(Fp::from_bytes(&xb))
            .ok_or_else(|| Error::encoding(CONTEXT, "non-canonical x coordinate"))?;
        let y = Option::<Fp>::from(((x.square() * x) + B).sqrt())
            .ok_or_else(|| Error::encoding(CONTEXT, "point not on curve"))?;

        let sort = Choice::from((flags & SORT_FLAG != 0) as u8);
        let y = Fp::conditional_select(&y, &-y, y.lexicographically_largest() ^ sort);

        Ok(G1Affine {
            x,
            y,
            infinity: Choice::from(0u8),
        })
    }

    fn check_subgroup(p: G1Affine) -> Result<G1Affine> {
        if !bool::from(p.is_torsion_free()) {
            return Err(Error::encoding("G1Affine", "point not in prime-order subgroup"));
        }
        Ok(p)
    }
}

/// G₁ point in Jacobian coordinates.
#[derive(Copy, Clone, Debug)]
pub struct G1Projective {
    pub(crate) x: Fp,
    pub(crate) y: Fp,
    pub(crate) z: Fp,
}

impl_jacobian_point!(G1Affine, G1Projective, Fp);

impl G1Projective {
    /// Point at infinity, `(1, 1, 0)`.
    pub fn identity() -> G1Projective {
        G1Projective {
            x: Fp::one(),
            y: Fp::one(),
            z: Fp::zero(),
        }
    }

    /// Fixed generator.
    pub fn generator() -> G1Projective {
        G1Projective::from(G1Affine::generator())
    }

    /// Random point in the prime-order subgroup.
    pub fn random(mut rng: impl RngCore) -> Self {
        loop {
            let x = Fp::random(&mut rng);
            let flip_sign = rng.next_u32() % 2 != 0;

            let y = match Option::<Fp>::from(((x.square() * x) + B).sqrt()) {
                Some(y) => y,
                None => continue,
            };
            let p = G1Affine {
                x,
                y: if flip_sign { -y } else { y },
                infinity: Choice::from(0u8),
            };

            let p_cleared = G1Projective::from(p).clear_cofactor();
            if !bool::from(p_cleared.is_identity()) {
                return p_cleared;
            }
        }
    }

    /// Point doubling (dbl-2007-bl with a = 0).
    pub fn double(&self) -> G1Projective {
        let xx = self.x.square();
        let yy = self.y.square();
        let yyyy = yy.square();
        let zz = self.z.square();

        let s = ((self.x + yy).square() - xx - yyyy).double();
        let m = xx.double() + xx;

        let x3 = m.square() - s.double();
        let y3 = m * (s - x3) - yyyy.double().double().double();
        let z3 = (self.y + self.z).square() - yy - zz;

        let tmp = G1Projective { x: x3, y: y3, z: z3 };
        G1Projective::conditional_select(&tmp, &G1Projective::identity(), self.is_identity())
    }

    /// Point addition (add-2007-bl).
    pub fn add(&self, rhs: &G1Projective) -> G1Projective {
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
            return G1Projective::identity();
        }

        let h = u2 - u1;
        let i = h.double().square();
        let j = h * i;
        let r = (s2 - s1).double();
        let v = u1 * i;

        let x3 = r.square() - j - v.double();
        let y3 = r * (v - x3) - (s1 * j).double();
        let z3 = ((self.z + rhs.z).square() - z1z1 - z2z2) * h;

        G1Projective { x: x3, y: y3, z: z3 }
    }

    /// Mixed addition with an affine point (madd-2007-bl).
    pub fn add_mixed(&self, rhs: &G1Affine) -> G1Projective {
        if bool::from(rhs.is_identity()) {
            return *self;
        }
        if bool::from(self.is_identity()) {
            return G1Projective::from(rhs);
        }

        let z1z1 = self.z.square();
        let u2 = rhs.x * z1z1;
        let s2 = rhs.y * self.z * z1z1;

        if self.x == u2 {
            if self.y == s2 {
                return self.double();
            }
            return G1Projective::identity();
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

        G1Projective { x: x3, y: y3, z: z3 }
    }

    /// Multiply by the curve seed x (negative).
    fn mul_by_x(&self) -> G1Projective {
        let mut xself = G1Projective::identity();
        let mut x = super::BLS_X >> 1;
        let mut tmp = *self;
        while x != 0 {
            tmp = tmp.double();
            if x % 2 == 1 {
                xself += tmp;
            }
            x >>= 1;
        }
        if super::BLS_X_IS_NEGATIVE {
            xself = -xself;
        }
        xself
    }

    /// `(x·β, y)`, acting as multiplication by a cube root of unity mod r
    fn endomorphism(&self) -> G1Projective {
        G1Projective {
            x: self.x * BETA,
            y: self.y,
            z: self.z,
        }
    }

    /// Subgroup check: `-x²·P == φ(P)`.
    pub fn is_torsion_free(&self) -> Choice {
        let minus_x_squared_times_p = -self.mul_by_x().mul_by_x();
        minus_x_squared_times_p.ct_eq(&self.endomorphism())
    }

    /// Clear cofactor using [x - 1] method.
    pub fn clear_cofactor(&self) -> G1Projective {
        self - &self.mul_by_x()
    }

    /// Batch affine conversion with one field inversion.
    ///
    /// Fails with `InvalidInputSize` when `q` is shorter than `p`.
    pub fn batch_normalize(p: &[Self], q: &mut [G1Affine]) -> Result<()> {
        validate::min_length("G1Projective::batch_normalize", q.len(), p.len())?;

        let mut acc = Fp::one();
        for (p, q) in p.iter().zip(q.iter_mut()) {
            // Running product of the Z coordinates seen so far
            q.x = acc;
            acc = Fp::conditional_select(&(acc * p.z), &acc, p.is_identity());
        }

        acc = acc.invert()?;

        for (p, q) in p.iter().rev().zip(q[..p.len()].iter_mut().rev()) {
            let skip = p.is_identity();
            let zinv = q.x * acc;
            acc = Fp::conditional_select(&(acc * p.z), &acc, skip);
            let zinv2 = zinv.square();

            let tmp = G1Affine {
                x: p.x * zinv2,
                y: p.y * (zinv2 * zinv),
                infinity: Choice::from(0u8),
            };
            *q = G1Affine::conditional_select(&tmp, &G1Affine::identity(), skip);
        }

        Ok(())
    }

    /// Check if point at infinity.
    #[inline]
    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    /// Curve membership check: `Y² = X³ + b·Z⁶`.
    pub fn is_on_curve(&self) -> Choice {
        let z2 = self.z.square();
        let z6 = z2.square() * z2;
        (self.y.square()).ct_eq(&(self.x.square() * self.x + z6 * B)) | self.z.is_zero()
    }
}

impl CurveGroup for G1Projective {
    type Affine = G1Affine;

    fn identity() -> Self {
        G1Projective::identity()
    }

    fn generator() -> Self {
        G1Projective::generator()
    }

    fn is_identity(&self) -> Choice {
        G1Projective::is_identity(self)
    }

    fn double(&self) -> Self {
        G1Projective::double(self)
    }

    fn add(&self, rhs: &Self) -> Self {
        G1Projective::add(self, rhs)
    }

    fn add_mixed(&self, rhs: &G1Affine) -> Self {
        G1Projective::add_mixed(self, rhs)
    }

    fn to_affine(&self) -> G1Affine {
        G1Affine::from(self)
    }

    fn from_affine(p: &G1Affine) -> Self {
        G1Projective::from(p)
    }

    fn batch_normalize(points: &[Self], out: &mut [G1Affine]) -> Result<()> {
        G1Projective::batch_normalize(points, out)
    }
}

impl PointEncoding for G1Affine {
    const COMPRESSED_SIZE: usize = BLS12_381_G1_COMPRESSED_SIZE;
    const UNCOMPRESSED_SIZE: usize = BLS12_381_G1_UNCOMPRESSED_SIZE;

    fn to_compressed_bytes(&self) -> Vec<u8> {
        self.to_compressed().to_vec()
    }

    fn to_uncompressed_bytes(&self) -> Vec<u8> {
        self.to_uncompressed().to_vec()
    }

    fn from_compressed_slice(bytes: &[u8]) -> shercrypto_api::Result<Self> {
        validate::length("G1Affine::from_compressed", bytes.len(), BLS12_381_G1_COMPRESSED_SIZE)?;
        let mut array = [0u8; BLS12_381_G1_COMPRESSED_SIZE];
        array.copy_from_slice(bytes);
        Ok(Self::from_compressed(&array)?)
    }

    fn from_uncompressed_slice(bytes: &[u8]) -> shercrypto_api::Result<Self> {
        validate::length(
            "G1Affine::from_uncompressed",
            bytes.len(),
            BLS12_381_G1_UNCOMPRESSED_SIZE,
        )?;
        let mut array = [0u8; BLS12_381_G1_UNCOMPRESSED_SIZE];
        array.copy_from_slice(bytes);
        Ok(Self::from_uncompressed(&array)?)
    }
}

impl PointEncoding for G1Projective {
    const COMPRESSED_SIZE: usize = BLS12_381_G1_COMPRESSED_SIZE;
    const UNCOMPRESSED_SIZE: usize = BLS12_381_G1_UNCOMPRESSED_SIZE;

    fn to_compressed_bytes(&self) -> Vec<u8> {
        G1Affine::from(self).to_compressed().to_vec()
    }

    fn to_uncompressed_bytes(&self) -> Vec<u8> {
        G1Affine::from(self).to_uncompressed().to_vec()
    }

    fn from_compressed_slice(bytes: &[u8]) -> shercrypto_api::Result<Self> {
        G1Affine::from_compressed_slice(bytes).map(G1Projective::from)
    }

    fn from_uncompressed_slice(bytes: &[u8]) -> shercrypto_api::Result<Self> {
        G1Affine::from_uncompressed_slice(bytes).map(G1Projective::from)
    }
}
