//! Group elements in Jacobian coordinates.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use num_traits::{One, Zero};
use rand::Rng;

use super::observer;
use super::scalar_mul::{scalar_mul, CurveGroup};
use super::{CurveError, CurveParams};
use crate::arithmetic::bigint::BigInteger;
use crate::arithmetic::traits::{Field, PrimeField};
use crate::field::{batch_invert, FieldResult};

/// A point `(X : Y : Z)` standing for the affine point `(X/Z^2, Y/Z^3)`.
///
/// `Z = 0` is the point at infinity; its canonical representative is
/// `(0 : 1 : 0)`. Coordinates are not canonical, so two points compare
/// equal by cross-multiplication rather than limb equality.
pub struct G1<C: CurveParams> {
    pub x: C::BaseField,
    pub y: C::BaseField,
    pub z: C::BaseField,
    _curve: PhantomData<C>,
}

impl<C: CurveParams> G1<C> {
    pub fn new(x: C::BaseField, y: C::BaseField, z: C::BaseField) -> Self {
        Self {
            x,
            y,
            z,
            _curve: PhantomData,
        }
    }

    /// The point `(x, y)` with `Z = 1`. No curve check is made.
    pub fn from_affine(x: C::BaseField, y: C::BaseField) -> Self {
        Self::new(x, y, C::BaseField::one())
    }

    /// The canonical point at infinity.
    pub fn zero() -> Self {
        Self::new(
            C::BaseField::zero(),
            C::BaseField::one(),
            C::BaseField::zero(),
        )
    }

    /// The subgroup generator.
    pub fn one() -> Self {
        C::config().generator
    }

    pub fn coeff_a() -> C::BaseField {
        C::config().coeff_a
    }

    pub fn coeff_b() -> C::BaseField {
        C::config().coeff_b
    }

    /// Bits needed for a compressed point: one coordinate plus a sign bit.
    pub fn size_in_bits() -> usize {
        C::BaseField::size_in_bits() + 1
    }

    pub fn base_field_char() -> <C::BaseField as PrimeField>::BigInt {
        C::BaseField::modulus()
    }

    /// Order `r` of the prime subgroup.
    pub fn order() -> <C::ScalarField as PrimeField>::BigInt {
        C::ScalarField::modulus()
    }

    pub fn is_zero(&self) -> bool {
        self.z.is_zero()
    }

    /// Zero or affine (`Z = 1`); the form `mixed_add` expects on its right.
    pub fn is_special(&self) -> bool {
        self.is_zero() || self.z.is_one()
    }

    /// Recovers the affine point with abscissa `x` whose ordinate has the
    /// given parity. `None` if `x^3 + a x + b` is not a square.
    pub fn from_x(x: C::BaseField, y_is_odd: bool) -> Option<Self> {
        let config = C::config();
        let mut rhs = x.square() * x + config.coeff_b;
        if !config.coeff_a.is_zero() {
            rhs += config.coeff_a * x;
        }
        let mut y = rhs.sqrt().ok()?;
        if y.into_bigint().is_odd() != y_is_odd {
            y = -y;
        }
        Some(Self::from_affine(x, y))
    }

    /// Affine form of this point: `Z = 1`, or the canonical zero.
    pub fn to_affine(&self) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        let z_inv = match self.z.inverse() {
            Ok(z_inv) => z_inv,
            Err(_) => return Self::zero(),
        };
        let z2_inv = z_inv.square();
        let z3_inv = z2_inv * z_inv;
        Self::from_affine(self.x * z2_inv, self.y * z3_inv)
    }

    /// Rewrites this point into affine form in place.
    pub fn normalize(&mut self) {
        *self = self.to_affine();
    }

    /// Normalizes every point with one field inversion in total.
    ///
    /// All points must be non-zero; otherwise `DivisionByZero` is returned
    /// and the slice is left untouched. The results are identical to calling
    /// [`G1::to_affine`] on each point.
    #[tracing::instrument(skip_all, name = "G1::batch_normalize", fields(curve = C::NAME, len = points.len()))]
    pub fn batch_normalize(points: &mut [Self]) -> FieldResult<()> {
        let mut z_inv: Vec<C::BaseField> = points.iter().map(|p| p.z).collect();
        batch_invert(&mut z_inv)?;

        let rescale = |(point, z_inv): (&mut Self, &C::BaseField)| {
            let z2_inv = z_inv.square();
            let z3_inv = z2_inv * *z_inv;
            point.x *= z2_inv;
            point.y *= z3_inv;
            point.z = C::BaseField::one();
        };

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            points.par_iter_mut().zip(z_inv.par_iter()).for_each(rescale);
        }
        #[cfg(not(feature = "parallel"))]
        points.iter_mut().zip(z_inv.iter()).for_each(rescale);

        Ok(())
    }

    /// Doubling: "dbl-2009-l" when `a = 0`, otherwise "dbl-2007-bl".
    pub fn dbl(&self) -> Self {
        observer::notify(|o| o.on_double(C::NAME));

        if self.is_zero() {
            return *self;
        }

        let coeff_a = C::config().coeff_a;
        if !coeff_a.is_zero() {
            return self.dbl_generic_a(coeff_a);
        }

        // A = X1^2
        let a = self.x.square();
        // B = Y1^2
        let b = self.y.square();
        // C = B^2
        let c = b.square();
        // D = 2 * ((X1 + B)^2 - A - C)
        let d = ((self.x + b).square() - a - c).double();
        // E = 3 * A
        let e = a.double() + a;
        // F = E^2
        let f = e.square();
        // X3 = F - 2 * D
        let x3 = f - d.double();
        // Y3 = E * (D - X3) - 8 * C
        let y3 = e * (d - x3) - c.double().double().double();
        // Z3 = 2 * Y1 * Z1
        let z3 = (self.y * self.z).double();

        Self::new(x3, y3, z3)
    }

    fn dbl_generic_a(&self, coeff_a: C::BaseField) -> Self {
        let xx = self.x.square();
        let yy = self.y.square();
        let yyyy = yy.square();
        let zz = self.z.square();
        // S = 2 * ((X1 + YY)^2 - XX - YYYY)
        let s = ((self.x + yy).square() - xx - yyyy).double();
        // M = 3 * XX + a * ZZ^2
        let m = xx.double() + xx + coeff_a * zz.square();
        // T = M^2 - 2 * S
        let t = m.square() - s.double();
        // Y3 = M * (S - T) - 8 * YYYY
        let y3 = m * (s - t) - yyyy.double().double().double();
        // Z3 = (Y1 + Z1)^2 - YY - ZZ
        let z3 = (self.y + self.z).square() - yy - zz;

        Self::new(t, y3, z3)
    }

    /// Addition where `other` has `Z = 1` (or is zero), "madd-2007-bl".
    ///
    /// # Panics
    ///
    /// If `other` is neither zero nor affine.
    pub fn mixed_add(&self, other: &Self) -> Self {
        assert!(
            other.is_special(),
            "mixed_add requires an affine right operand"
        );

        if self.is_zero() {
            return *other;
        }
        if other.is_zero() {
            return *self;
        }

        let z1z1 = self.z.square();
        // U2 = X2 * Z1Z1
        let u2 = other.x * z1z1;
        // S2 = Y2 * Z1 * Z1Z1
        let s2 = other.y * (self.z * z1z1);

        if self.x == u2 && self.y == s2 {
            return self.dbl();
        }

        observer::notify(|o| o.on_mixed_add(C::NAME));

        // H = U2 - X1
        let h = u2 - self.x;
        // HH = H^2
        let hh = h.square();
        // I = 4 * HH
        let i = hh.double().double();
        // J = H * I
        let j = h * i;
        // r = 2 * (S2 - Y1)
        let r = (s2 - self.y).double();
        // V = X1 * I
        let v = self.x * i;
        // X3 = r^2 - J - 2 * V
        let x3 = r.square() - j - v.double();
        // Y3 = r * (V - X3) - 2 * Y1 * J
        let y3 = r * (v - x3) - (self.y * j).double();
        // Z3 = (Z1 + H)^2 - Z1Z1 - HH
        let z3 = (self.z + h).square() - z1z1 - hh;

        Self::new(x3, y3, z3)
    }

    /// `h * self`, projecting any curve point into the prime-order subgroup.
    pub fn mul_by_cofactor(&self) -> Self {
        scalar_mul(self, &C::config().cofactor)
    }

    /// Checks the Jacobian curve equation `Y^2 = X^3 + a X Z^4 + b Z^6`.
    pub fn is_well_formed(&self) -> bool {
        if self.is_zero() {
            return true;
        }

        let config = C::config();
        let x2 = self.x.square();
        let y2 = self.y.square();
        let z2 = self.z.square();
        let z4 = z2.square();
        let z6 = z4 * z2;

        let mut rhs = x2 * self.x + config.coeff_b * z6;
        if !config.coeff_a.is_zero() {
            rhs += config.coeff_a * self.x * z4;
        }
        y2 == rhs
    }

    /// `r * self == O`. Costs a full scalar multiplication; meant for
    /// points coming from outside.
    #[tracing::instrument(skip_all, name = "G1::is_in_safe_subgroup", fields(curve = C::NAME))]
    pub fn is_in_safe_subgroup(&self) -> bool {
        self.mul_bigint(Self::order().as_ref()).is_zero()
    }

    /// Checks a point received from an untrusted source.
    pub fn validate(&self, check_subgroup: bool) -> Result<(), CurveError> {
        if !self.is_well_formed() {
            return Err(CurveError::NotOnCurve);
        }
        if check_subgroup && !self.is_in_safe_subgroup() {
            return Err(CurveError::NotInSubgroup);
        }
        Ok(())
    }

    /// `scalar * self` for a little-limb-first scalar.
    pub fn mul_bigint(&self, scalar: &[u64]) -> Self {
        scalar_mul(self, scalar)
    }

    pub fn mul_u64(&self, scalar: u64) -> Self {
        scalar_mul(self, &[scalar])
    }

    /// A uniformly random subgroup element.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let k = C::ScalarField::random(rng);
        Self::one().mul_bigint(k.into_bigint().as_ref())
    }

    pub fn random_element() -> Self {
        Self::random(&mut rand::thread_rng())
    }
}

impl<C: CurveParams> Clone for G1<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: CurveParams> Copy for G1<C> {}

impl<C: CurveParams> Default for G1<C> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<C: CurveParams> PartialEq for G1<C> {
    fn eq(&self, other: &Self) -> bool {
        if self.is_zero() {
            return other.is_zero();
        }
        if other.is_zero() {
            return false;
        }

        // X1 * Z2^2 == X2 * Z1^2 and Y1 * Z2^3 == Y2 * Z1^3
        let z1_squared = self.z.square();
        let z2_squared = other.z.square();
        let z1_cubed = self.z * z1_squared;
        let z2_cubed = other.z * z2_squared;

        self.x * z2_squared == other.x * z1_squared && self.y * z2_cubed == other.y * z1_cubed
    }
}

impl<C: CurveParams> Eq for G1<C> {}

/// General addition, "add-2007-bl".
impl<C: CurveParams> Add for G1<C> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        observer::notify(|o| o.on_add(C::NAME));

        if self.is_zero() {
            return other;
        }
        if other.is_zero() {
            return self;
        }

        let z1z1 = self.z.square();
        let z2z2 = other.z.square();

        let u1 = self.x * z2z2;
        let u2 = other.x * z1z1;

        // S1 = Y1 * Z2 * Z2Z2
        let s1 = self.y * (other.z * z2z2);
        // S2 = Y2 * Z1 * Z1Z1
        let s2 = other.y * (self.z * z1z1);

        if u1 == u2 && s1 == s2 {
            return self.dbl();
        }

        // For P + (-P), H = 0 and the result below has Z3 = 0.

        // H = U2 - U1
        let h = u2 - u1;
        // I = (2 * H)^2
        let i = h.double().square();
        // J = H * I
        let j = h * i;
        // r = 2 * (S2 - S1)
        let r = (s2 - s1).double();
        // V = U1 * I
        let v = u1 * i;
        // X3 = r^2 - J - 2 * V
        let x3 = r.square() - j - v.double();
        // Y3 = r * (V - X3) - 2 * S1 * J
        let y3 = r * (v - x3) - (s1 * j).double();
        // Z3 = ((Z1 + Z2)^2 - Z1Z1 - Z2Z2) * H
        let z3 = ((self.z + other.z).square() - z1z1 - z2z2) * h;

        Self::new(x3, y3, z3)
    }
}

impl<C: CurveParams> AddAssign for G1<C> {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl<C: CurveParams> Neg for G1<C> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(self.x, -self.y, self.z)
    }
}

impl<C: CurveParams> Sub for G1<C> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + (-other)
    }
}

impl<C: CurveParams> SubAssign for G1<C> {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl<C: CurveParams> Mul<C::ScalarField> for G1<C> {
    type Output = Self;

    fn mul(self, scalar: C::ScalarField) -> Self {
        self.mul_bigint(scalar.into_bigint().as_ref())
    }
}

impl<C: CurveParams> CurveGroup for G1<C> {
    fn identity() -> Self {
        Self::zero()
    }

    fn is_identity(&self) -> bool {
        self.is_zero()
    }

    fn double(&self) -> Self {
        self.dbl()
    }
}

/// `O`, or the affine coordinates as `(x , y)`.
impl<C: CurveParams> fmt::Display for G1<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "O");
        }
        let affine = self.to_affine();
        write!(f, "({} , {})", affine.x, affine.y)
    }
}

impl<C: CurveParams> fmt::Debug for G1<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} : {} : {})", self.x, self.y, self.z)
    }
}
