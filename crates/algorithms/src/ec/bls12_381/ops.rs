//! Operator boilerplate shared by the field and group types.
//!
//! Each type implements the `&a op &b` form by hand; these macros derive the
//! owned and mixed-reference forms plus the assigning operators from it.

macro_rules! impl_add_binop_specify_output {
    ($lhs:ident, $rhs:ident, $output:ident) => {
        impl<'b> ::core::ops::Add<&'b $rhs> for $lhs {
            type Output = $output;

            #[inline]
            fn add(self, rhs: &'b $rhs) -> $output {
                &self + rhs
            }
        }

        impl<'a> ::core::ops::Add<$rhs> for &'a $lhs {
            type Output = $output;

            #[inline]
            fn add(self, rhs: $rhs) -> $output {
                self + &rhs
            }
        }

        impl ::core::ops::Add<$rhs> for $lhs {
            type Output = $output;

            #[inline]
            fn add(self, rhs: $rhs) -> $output {
                &self + &rhs
            }
        }
    };
}

macro_rules! impl_sub_binop_specify_output {
    ($lhs:ident, $rhs:ident, $output:ident) => {
        impl<'b> ::core::ops::Sub<&'b $rhs> for $lhs {
            type Output = $output;

            #[inline]
            fn sub(self, rhs: &'b $rhs) -> $output {
                &self - rhs
            }
        }

        impl<'a> ::core::ops::Sub<$rhs> for &'a $lhs {
            type Output = $output;

            #[inline]
            fn sub(self, rhs: $rhs) -> $output {
                self - &rhs
            }
        }

        impl ::core::ops::Sub<$rhs> for $lhs {
            type Output = $output;

            #[inline]
            fn sub(self, rhs: $rhs) -> $output {
                &self - &rhs
            }
        }
    };
}

macro_rules! impl_binops_additive_specify_output {
    ($lhs:ident, $rhs:ident, $output:ident) => {
        impl_add_binop_specify_output!($lhs, $rhs, $output);
        impl_sub_binop_specify_output!($lhs, $rhs, $output);
    };
}

macro_rules! impl_binops_multiplicative_mixed {
    ($lhs:ident, $rhs:ident, $output:ident) => {
        impl<'b> ::core::ops::Mul<&'b $rhs> for $lhs {
            type Output = $output;

            #[inline]
            fn mul(self, rhs: &'b $rhs) -> $output {
                &self * rhs
            }
        }

        impl<'a> ::core::ops::Mul<$rhs> for &'a $lhs {
            type Output = $output;

            #[inline]
            fn mul(self, rhs: $rhs) -> $output {
                self * &rhs
            }
        }

        impl ::core::ops::Mul<$rhs> for $lhs {
            type Output = $output;

            #[inline]
            fn mul(self, rhs: $rhs) -> $output {
                &self * &rhs
            }
        }
    };
}

macro_rules! impl_binops_additive {
    ($lhs:ident, $rhs:ident) => {
        impl_binops_additive_specify_output!($lhs, $rhs, $lhs);

        impl ::core::ops::SubAssign<$rhs> for $lhs {
            #[inline]
            fn sub_assign(&mut self, rhs: $rhs) {
                *self = &*self - &rhs;
            }
        }

        impl ::core::ops::AddAssign<$rhs> for $lhs {
            #[inline]
            fn add_assign(&mut self, rhs: $rhs) {
                *self = &*self + &rhs;
            }
        }

        impl<'b> ::core::ops::SubAssign<&'b $rhs> for $lhs {
            #[inline]
            fn sub_assign(&mut self, rhs: &'b $rhs) {
                *self = &*self - rhs;
            }
        }

        impl<'b> ::core::ops::AddAssign<&'b $rhs> for $lhs {
            #[inline]
            fn add_assign(&mut self, rhs: &'b $rhs) {
                *self = &*self + rhs;
            }
        }
    };
}

macro_rules! impl_binops_multiplicative {
    ($lhs:ident, $rhs:ident) => {
        impl_binops_multiplicative_mixed!($lhs, $rhs, $lhs);

        impl ::core::ops::MulAssign<$rhs> for $lhs {
            #[inline]
            fn mul_assign(&mut self, rhs: $rhs) {
                *self = &*self * &rhs;
            }
        }

        impl<'b> ::core::ops::MulAssign<&'b $rhs> for $lhs {
            #[inline]
            fn mul_assign(&mut self, rhs: &'b $rhs) {
                *self = &*self * rhs;
            }
        }
    };
}

macro_rules! impl_neg_owned {
    ($t:ident) => {
        impl ::core::ops::Neg for $t {
            type Output = $t;

            #[inline]
            fn neg(self) -> $t {
                -&self
            }
        }
    };
}

/// Conversions, comparisons and operators shared by the G1 and G2 point
/// types. Both groups use an affine form `(x, y, infinity)` and a Jacobian
/// form `(X, Y, Z)` over their coordinate field `$base`. The group law
/// itself (`add`, `add_mixed`, `double`) stays with each type.
macro_rules! impl_jacobian_point {
    ($affine:ident, $proj:ident, $base:ident) => {
        impl Default for $affine {
            fn default() -> $affine {
                $affine::identity()
            }
        }

        impl Default for $proj {
            fn default() -> $proj {
                $proj::identity()
            }
        }

        impl ::zeroize::DefaultIsZeroes for $affine {}
        impl ::zeroize::DefaultIsZeroes for $proj {}

        impl ::core::fmt::Display for $affine {
            fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
                write!(f, "{:?}", self)
            }
        }

        impl ::core::fmt::Display for $proj {
            fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
                write!(f, "{:?}", self)
            }
        }

        impl<'a> From<&'a $proj> for $affine {
            fn from(p: &'a $proj) -> $affine {
                // Z = 0 has no inverse and maps to the identity
                let zinv = match p.z.invert() {
                    Ok(zinv) => zinv,
                    Err(_) => return $affine::identity(),
                };
                let zinv2 = zinv.square();

                $affine {
                    x: p.x * zinv2,
                    y: p.y * (zinv2 * zinv),
                    infinity: ::subtle::Choice::from(0u8),
                }
            }
        }

        impl From<$proj> for $affine {
            fn from(p: $proj) -> $affine {
                $affine::from(&p)
            }
        }

        impl<'a> From<&'a $affine> for $proj {
            fn from(p: &'a $affine) -> $proj {
                let lifted = $proj {
                    x: p.x,
                    y: p.y,
                    z: $base::one(),
                };
                <$proj as ::subtle::ConditionallySelectable>::conditional_select(
                    &lifted,
                    &$proj::identity(),
                    p.infinity,
                )
            }
        }

        impl From<$affine> for $proj {
            fn from(p: $affine) -> $proj {
                $proj::from(&p)
            }
        }

        impl ::subtle::ConstantTimeEq for $affine {
            fn ct_eq(&self, other: &Self) -> ::subtle::Choice {
                (self.infinity & other.infinity)
                    | ((!self.infinity)
                        & (!other.infinity)
                        & self.x.ct_eq(&other.x)
                        & self.y.ct_eq(&other.y))
            }
        }

        impl ::subtle::ConstantTimeEq for $proj {
            fn ct_eq(&self, other: &Self) -> ::subtle::Choice {
                // X1·Z2² = X2·Z1² and Y1·Z2³ = Y2·Z1³
                let z1z1 = self.z.square();
                let z2z2 = other.z.square();
                let x1 = self.x * z2z2;
                let x2 = other.x * z1z1;
                let y1 = self.y * z2z2 * other.z;
                let y2 = other.y * z1z1 * self.z;
                let lhs_zero = self.z.is_zero();
                let rhs_zero = other.z.is_zero();

                (lhs_zero & rhs_zero)
                    | ((!lhs_zero) & (!rhs_zero) & x1.ct_eq(&x2) & y1.ct_eq(&y2))
            }
        }

        impl ::subtle::ConditionallySelectable for $affine {
            fn conditional_select(a: &Self, b: &Self, choice: ::subtle::Choice) -> Self {
                $affine {
                    x: $base::conditional_select(&a.x, &b.x, choice),
                    y: $base::conditional_select(&a.y, &b.y, choice),
                    infinity: ::subtle::Choice::conditional_select(
                        &a.infinity,
                        &b.infinity,
                        choice,
                    ),
                }
            }
        }

        impl ::subtle::ConditionallySelectable for $proj {
            fn conditional_select(a: &Self, b: &Self, choice: ::subtle::Choice) -> Self {
                $proj {
                    x: $base::conditional_select(&a.x, &b.x, choice),
                    y: $base::conditional_select(&a.y, &b.y, choice),
                    z: $base::conditional_select(&a.z, &b.z, choice),
                }
            }
        }

        impl Eq for $affine {}
        impl PartialEq for $affine {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                bool::from(::subtle::ConstantTimeEq::ct_eq(self, other))
            }
        }

        impl Eq for $proj {}
        impl PartialEq for $proj {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                bool::from(::subtle::ConstantTimeEq::ct_eq(self, other))
            }
        }

        impl<'a> ::core::ops::Neg for &'a $affine {
            type Output = $affine;

            #[inline]
            fn neg(self) -> $affine {
                // The identity keeps y = 0
                $affine {
                    x: self.x,
                    y: -self.y,
                    infinity: self.infinity,
                }
            }
        }

        impl<'a> ::core::ops::Neg for &'a $proj {
            type Output = $proj;

            #[inline]
            fn neg(self) -> $proj {
                $proj {
                    x: self.x,
                    y: -self.y,
                    z: self.z,
                }
            }
        }

        impl_neg_owned!($affine);
        impl_neg_owned!($proj);

        impl<'a, 'b> ::core::ops::Add<&'b $proj> for &'a $proj {
            type Output = $proj;

            #[inline]
            fn add(self, rhs: &'b $proj) -> $proj {
                $proj::add(self, rhs)
            }
        }

        impl<'a, 'b> ::core::ops::Add<&'b $proj> for &'a $affine {
            type Output = $proj;

            #[inline]
            fn add(self, rhs: &'b $proj) -> $proj {
                rhs.add_mixed(self)
            }
        }

        impl<'a, 'b> ::core::ops::Add<&'b $affine> for &'a $proj {
            type Output = $proj;

            #[inline]
            fn add(self, rhs: &'b $affine) -> $proj {
                self.add_mixed(rhs)
            }
        }

        impl<'a, 'b> ::core::ops::Sub<&'b $proj> for &'a $proj {
            type Output = $proj;

            #[inline]
            fn sub(self, rhs: &'b $proj) -> $proj {
                self + &(-rhs)
            }
        }

        impl<'a, 'b> ::core::ops::Sub<&'b $proj> for &'a $affine {
            type Output = $proj;

            #[inline]
            fn sub(self, rhs: &'b $proj) -> $proj {
                self + &(-rhs)
            }
        }

        impl<'a, 'b> ::core::ops::Sub<&'b $affine> for &'a $proj {
            type Output = $proj;

            #[inline]
            fn sub(self, rhs: &'b $affine) -> $proj {
                self + &(-rhs)
            }
        }

        // Scalar multiplication goes through the fixed-window ladder
        impl<'a, 'b> ::core::ops::Mul<&'b Scalar> for &'a $proj {
            type Output = $proj;

            fn mul(self, k: &'b Scalar) -> $proj {
                $crate::ec::bls12_381::msm::window::mul(self, k)
            }
        }

        impl<'a, 'b> ::core::ops::Mul<&'b Scalar> for &'a $affine {
            type Output = $proj;

            fn mul(self, k: &'b Scalar) -> $proj {
                $crate::ec::bls12_381::msm::window::mul(&$proj::from(self), k)
            }
        }

        impl<'a, 'b> ::core::ops::Mul<&'b $proj> for &'a Scalar {
            type Output = $proj;

            #[inline]
            fn mul(self, rhs: &'b $proj) -> $proj {
                rhs * self
            }
        }

        impl<'a, 'b> ::core::ops::Mul<&'b $affine> for &'a Scalar {
            type Output = $proj;

            #[inline]
            fn mul(self, rhs: &'b $affine) -> $proj {
                rhs * self
            }
        }

        impl<T> ::core::iter::Sum<T> for $proj
        where
            T: ::core::borrow::Borrow<$proj>,
        {
            fn sum<I>(iter: I) -> Self
            where
                I: Iterator<Item = T>,
            {
                iter.fold($proj::identity(), |acc, item| acc + item.borrow())
            }
        }

        impl_binops_additive!($proj, $affine);
        impl_binops_additive_specify_output!($affine, $proj, $proj);
        impl_binops_additive!($proj, $proj);
        impl_binops_multiplicative!($proj, Scalar);
        impl_binops_multiplicative_mixed!($affine, Scalar, $proj);
        impl_binops_multiplicative_mixed!(Scalar, $affine, $proj);
        impl_binops_multiplicative_mixed!(Scalar, $proj, $proj);
    };
}
