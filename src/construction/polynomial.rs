/*
 * @file polynomial.rs
 * @author The digital_net authors
 * @copyright 2026 The digital_net authors, MIT license
 *
 * Polynomial lattice rules.  The size parameter is a modulus P; the
 * generating value of a coordinate is a polynomial q with deg q < deg P,
 * and its matrix is the Hankel matrix of the Laurent digits of q/P.
 */

use std::sync::Arc;
use rand::Rng;

use crate::construction::{Construction,Enumerable,NetConstruction};
use crate::error::{NetError,Result};
use crate::gf2::matrix::GeneratingMatrix;
use crate::gf2::polynomial::Polynomial;
use crate::net::{Coordinate,OutputStyle};

/** Polynomial lattice rule construction method */
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PolynomialLattice;

/** Degree of a modulus, which must be at least 1 */
fn modulus_degree(modulus:Polynomial, coord:usize) -> Result<usize> {
    match modulus.degree() {
        Some(d) if d >= 1 => Ok(d),
        _ => Err(NetError::incompatible(coord,
            format!("modulus {} must have positive degree", modulus)))
    }
}

impl Construction for PolynomialLattice {
    type GenValue = Polynomial;
    type SizeParameter = Polynomial;
    const KIND : NetConstruction = NetConstruction::Polynomial;
    const SEQUENCE_VIEWABLE : bool = false;

    fn num_rows(modulus:&Polynomial) -> usize { modulus.degree().unwrap_or(0) }
    fn num_cols(modulus:&Polynomial) -> usize { modulus.degree().unwrap_or(0) }

    fn build_matrix(q:&Polynomial, modulus:&Polynomial, coord:usize) -> Result<GeneratingMatrix> {
        let m = modulus_degree(*modulus, coord)?;
        match q.degree() {
            None => return Err(NetError::incompatible(coord, "generating polynomial is zero")),
            Some(d) if d >= m => return Err(NetError::incompatible(coord,
                format!("degree {} >= modulus degree {}", d, m))),
            _ => ()
        }
        let u = q.laurent_digits(*modulus, 2*m);
        let mut ret = GeneratingMatrix::new(m, m);
        for i in 0..m {
            for j in 0..m {
                if u[i+j] { ret.set_bit(i,j); }
            }
        }
        Ok(ret)
    }

    fn random_gen_value<R:Rng+?Sized>(modulus:&Polynomial, coord:usize, rng:&mut R)
        -> Result<Polynomial>
    {
        let m = modulus_degree(*modulus, coord)?;
        if coord == 0 { return Ok(Polynomial::ONE); }
        loop {
            let q = Polynomial::random_below(m, rng);
            if !q.is_zero() && q.gcd(*modulus) == Polynomial::ONE { return Ok(q); }
        }
    }

    fn format_extra(coordinates:&[Arc<Coordinate<Polynomial>>], modulus:&Polynomial,
        style:OutputStyle, _interlacing_factor:usize) -> String
    {
        match style {
            OutputStyle::Terminal => {
                let mut res = format!("{}  // Polynomial modulus: {}\n", modulus.bits(), modulus);
                for (j,c) in coordinates.iter().enumerate() {
                    res += &format!("{}  // Generating polynomial {}: {}\n",
                        c.value().bits(), j+1, c.value());
                }
                res
            },
            OutputStyle::Net => format!("\n# Polynomial modulus: {}", modulus)
        }
    }
}

/** Nonzero polynomials of degree below the modulus and coprime with it */
#[derive(Clone, Debug)]
pub struct CoprimePolynomials {
    modulus: Polynomial,
    next: u64,
    end: u64
}

impl Iterator for CoprimePolynomials {
    type Item = Polynomial;
    fn next(&mut self) -> Option<Polynomial> {
        while self.next < self.end {
            let q = Polynomial::from_bits(self.next);
            self.next += 1;
            if q.gcd(self.modulus) == Polynomial::ONE { return Some(q); }
        }
        None
    }
}

impl Enumerable for PolynomialLattice {
    type Values = CoprimePolynomials;

    fn gen_values(modulus:&Polynomial, coord:usize) -> Result<CoprimePolynomials> {
        let m = modulus_degree(*modulus, coord)?;
        let end = if coord == 0 { 2 } else { 1u64 << m };
        Ok(CoprimePolynomials { modulus: *modulus, next: 1, end })
    }
}

/**************************************************************************
 * Tests
 **************************************************************************/
