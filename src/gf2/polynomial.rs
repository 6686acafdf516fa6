/*
 * @file polynomial.rs
 * @author The digital_net authors
 * @copyright 2026 The digital_net authors, MIT license
 *
 * Polynomials over GF(2) of degree at most 63, packed into a u64.
 * Bit i is the coefficient of x^i.
 */

use core::fmt;
use std::ops::{Add,AddAssign,BitXor};
use rand::Rng;

/** GF(2) polynomial */
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug, Default)]
#[repr(transparent)]
pub struct Polynomial(u64);

impl Polynomial {
    pub const ZERO : Polynomial = Polynomial(0);
    pub const ONE  : Polynomial = Polynomial(1);
    pub const X    : Polynomial = Polynomial(2);

    /** Create from the packed coefficients */
    pub const fn from_bits(bits:u64) -> Polynomial { Polynomial(bits) }

    /** The packed coefficients */
    pub const fn bits(self) -> u64 { self.0 }

    /** Degree of the polynomial, or None for zero */
    pub fn degree(self) -> Option<usize> {
        if self.0 == 0 { None } else { Some(63 - self.0.leading_zeros() as usize) }
    }

    pub fn is_zero(self) -> bool { self.0 == 0 }

    /** Coefficient of x^i */
    pub fn coeff(self, i:usize) -> bool {
        i < 64 && (self.0 >> i) & 1 != 0
    }

    /** Remainder of self modulo m. Panics if m is zero. */
    pub fn rem(self, m:Polynomial) -> Polynomial {
        let dm = match m.degree() {
            None => panic!("division by the zero polynomial"),
            Some(d) => d
        };
        let mut a = self.0;
        while a != 0 {
            let da = 63 - a.leading_zeros() as usize;
            if da < dm { break; }
            a ^= m.0 << (da - dm);
        }
        Polynomial(a)
    }

    /** Product of self and b modulo m.  Both inputs are reduced first. */
    pub fn mul_mod(self, b:Polynomial, m:Polynomial) -> Polynomial {
        let dm = match m.degree() {
            None => panic!("division by the zero polynomial"),
            Some(0) => return Polynomial::ZERO,
            Some(d) => d
        };
        let top = 1u64 << dm;
        let mut a = self.rem(m).0;
        let mut b = b.rem(m).0;
        let mut ret = 0;
        while b != 0 {
            if b & 1 != 0 { ret ^= a; }
            b >>= 1;
            /* deg a < dm <= 63, so the shift can't lose a bit */
            a <<= 1;
            if a & top != 0 { a ^= m.0; }
        }
        Polynomial(ret)
    }

    /** self^e modulo m, by square-and-multiply */
    pub fn pow_mod(self, mut e:u64, m:Polynomial) -> Polynomial {
        let mut base = self.rem(m);
        let mut ret = Polynomial::ONE.rem(m);
        while e != 0 {
            if e & 1 != 0 { ret = ret.mul_mod(base, m); }
            base = base.mul_mod(base, m);
            e >>= 1;
        }
        ret
    }

    /** Greatest common divisor */
    pub fn gcd(self, b:Polynomial) -> Polynomial {
        let (mut a, mut b) = (self, b);
        while !b.is_zero() {
            let r = a.rem(b);
            a = b;
            b = r;
        }
        a
    }

    /**
     * Is this polynomial primitive, i.e. does x have multiplicative
     * order 2^d - 1 modulo self?  Primitive polynomials are irreducible.
     */
    pub fn is_primitive(self) -> bool {
        let d = match self.degree() {
            None | Some(0) => return false,
            Some(d) => d
        };
        if !self.coeff(0) { return false; }
        let order = (1u64 << d) - 1;
        if Polynomial::X.pow_mod(order, self) != Polynomial::ONE { return false; }
        prime_factors(order).into_iter().all(|q| {
            Polynomial::X.pow_mod(order / q, self) != Polynomial::ONE
        })
    }

    /** Sample a uniformly random polynomial of degree less than `degree` */
    pub fn random_below<R:Rng+?Sized>(degree:usize, rng:&mut R) -> Polynomial {
        let mask = if degree >= 64 { !0 } else { (1u64 << degree) - 1 };
        Polynomial(rng.gen::<u64>() & mask)
    }

    /**
     * Digits u_1, ..., u_n of the Laurent expansion
     * self / m = sum_{l >= 1} u_l x^(-l).  Requires deg self < deg m.
     */
    pub fn laurent_digits(self, m:Polynomial, n:usize) -> Vec<bool> {
        let dm = m.degree().unwrap_or(0);
        debug_assert!(self.degree().map_or(true, |d| d < dm));
        let mut u = Vec::with_capacity(n);
        for l in 1..=n {
            let mut bit = l <= dm && self.coeff(dm - l);
            for k in dm.saturating_sub(l-1)..dm {
                if m.coeff(k) && u[l - 1 - (dm - k)] { bit = !bit; }
            }
            u.push(bit);
        }
        u
    }
}

/** Distinct prime factors by trial division */
fn prime_factors(mut n:u64) -> Vec<u64> {
    let mut ret = Vec::new();
    let mut p = 2u64;
    while p.saturating_mul(p) <= n {
        if n % p == 0 {
            ret.push(p);
            while n % p == 0 { n /= p; }
        }
        p += if p == 2 { 1 } else { 2 };
    }
    if n > 1 { ret.push(n); }
    ret
}

/* Add is the same as xor */
impl Add for Polynomial {
    type Output = Self;
    fn add(self, rhs:Self) -> Self { Polynomial(self.0 ^ rhs.0) }
}

impl AddAssign for Polynomial {
    fn add_assign(&mut self, rhs:Self) { self.0 ^= rhs.0; }
}

impl BitXor for Polynomial {
    type Output = Self;
    fn bitxor(self, rhs:Self) -> Self { self + rhs }
}

impl From<u64> for Polynomial {
    fn from(bits:u64) -> Self { Polynomial(bits) }
}

/** Formats as e.g. `x^3 + x + 1` */
impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = match self.degree() {
            None => return write!(f, "0"),
            Some(d) => d
        };
        let mut first = true;
        for i in (0..=d).rev() {
            if !self.coeff(i) { continue; }
            if !first { write!(f, " + ")?; }
            first = false;
            match i {
                0 => write!(f, "1")?,
                1 => write!(f, "x")?,
                _ => write!(f, "x^{}", i)?
            }
        }
        Ok(())
    }
}

/**
 * Iterator over the primitive polynomials, by increasing degree and
 * then by increasing packed value: x+1, x^2+x+1, x^3+x+1, x^3+x^2+1, ...
 */
#[derive(Clone, Debug)]
pub struct PrimitivePolynomials {
    next: u64
}

impl PrimitivePolynomials {
    pub fn new() -> Self { PrimitivePolynomials { next: 3 } }

    /** Resume the enumeration at the packed value `start` (rounded up to odd) */
    pub fn starting_at(start:u64) -> Self { PrimitivePolynomials { next: start.max(3) | 1 } }
}

impl Default for PrimitivePolynomials {
    fn default() -> Self { Self::new() }
}

impl Iterator for PrimitivePolynomials {
    type Item = Polynomial;
    fn next(&mut self) -> Option<Polynomial> {
        /* Only odd candidates: a primitive polynomial has a constant term */
        while self.next != 1 {
            let p = Polynomial(self.next);
            self.next = self.next.wrapping_add(2);
            if p.is_primitive() { return Some(p); }
        }
        None
    }
}

/** The n-th primitive polynomial (0-based) in the order of [`PrimitivePolynomials`] */
pub fn nth_primitive(n:usize) -> Option<Polynomial> {
    PrimitivePolynomials::new().nth(n)
}
