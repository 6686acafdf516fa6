/*
 * @file sobol.rs
 * @author The digital_net authors
 * @copyright 2026 The digital_net authors, MIT license
 *
 * Sobol nets.  Coordinate j >= 1 is driven by the j-th primitive
 * polynomial and a set of initial direction numbers; coordinate 0 is
 * the van der Corput coordinate.
 */

use std::sync::{Arc,RwLock};
use rand::Rng;

use crate::construction::{Construction,Enumerable,NetConstruction};
use crate::error::{NetError,Result};
use crate::gf2::matrix::GeneratingMatrix;
use crate::gf2::polynomial::{Polynomial,PrimitivePolynomials};
use crate::net::{Coordinate,OutputStyle};

/** Sobol construction method.  The size parameter is the number of columns. */
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Sobol;

/** Initial direction numbers m_1, ..., m_s of one coordinate */
#[derive(Clone, PartialOrd, Ord, PartialEq, Eq, Hash, Debug, Default)]
pub struct SobolDirections(pub Vec<u64>);

impl From<Vec<u64>> for SobolDirections {
    fn from(numbers:Vec<u64>) -> Self { SobolDirections(numbers) }
}

/** Primitive polynomials found so far, in enumeration order */
static PRIMITIVES : RwLock<Vec<Polynomial>> = RwLock::new(Vec::new());

/** The primitive polynomial of coordinate `coord >= 1` */
pub fn primitive_polynomial(coord:usize) -> Polynomial {
    debug_assert!(coord >= 1);
    let n = coord - 1;
    {
        let table = PRIMITIVES.read().unwrap_or_else(|e| e.into_inner());
        if let Some(p) = table.get(n) { return *p; }
    }
    let mut table = PRIMITIVES.write().unwrap_or_else(|e| e.into_inner());
    let start = table.last().map_or(3, |p| p.bits() + 2);
    let needed = n + 1 - table.len().min(n + 1);
    let found = PrimitivePolynomials::starting_at(start).take(needed);
    table.extend(found);
    table[n]
}

/** Degree of the primitive polynomial of coordinate `coord >= 1` */
fn degree_of(coord:usize) -> usize {
    primitive_polynomial(coord).degree().unwrap_or(0)
}

/** Check that a value holds s odd direction numbers with m_k < 2^k */
fn check_directions(value:&SobolDirections, s:usize, coord:usize) -> Result<()> {
    if value.0.len() != s {
        return Err(NetError::incompatible(coord,
            format!("expected {} direction numbers, found {}", s, value.0.len())));
    }
    for (i,&mk) in value.0.iter().enumerate() {
        let k = i + 1;
        if mk & 1 == 0 || (k < 64 && mk >> k != 0) {
            return Err(NetError::incompatible(coord,
                format!("direction number m_{} = {} must be odd and below 2^{}", k, mk, k)));
        }
    }
    Ok(())
}

/**
 * Extend initial direction numbers to m_1..m_n with the recurrence
 * m_k = 2 a_1 m_{k-1} ^ 4 a_2 m_{k-2} ^ ... ^ 2^s m_{k-s} ^ m_{k-s}
 * where the polynomial is x^s + a_1 x^{s-1} + ... + a_{s-1} x + 1.
 */
fn direction_numbers(poly:Polynomial, initial:&[u64], n:usize) -> Vec<u64> {
    let s = initial.len();
    let mut m = Vec::with_capacity(n);
    for k in 0..n {
        if k < s {
            m.push(initial[k]);
            continue;
        }
        let mut mk = m[k-s] ^ (m[k-s] << s);
        for i in 1..s {
            if poly.coeff(s-i) { mk ^= m[k-i] << i; }
        }
        m.push(mk);
    }
    m
}

impl Construction for Sobol {
    type GenValue = SobolDirections;
    type SizeParameter = usize;
    const KIND : NetConstruction = NetConstruction::Sobol;
    const SEQUENCE_VIEWABLE : bool = true;

    fn num_rows(size:&usize) -> usize { *size }
    fn num_cols(size:&usize) -> usize { *size }

    fn build_matrix(value:&SobolDirections, size:&usize, coord:usize) -> Result<GeneratingMatrix> {
        let m = *size;
        if coord == 0 {
            if !value.0.is_empty() {
                return Err(NetError::incompatible(0, "the first coordinate takes no direction numbers"));
            }
            return Ok(GeneratingMatrix::identity(m));
        }
        let poly = primitive_polynomial(coord);
        check_directions(value, poly.degree().unwrap_or(0), coord)?;

        /* Column k-1 holds m_k, most significant bit in row 0 */
        let mut ret = GeneratingMatrix::new(m, m);
        for (col,mk) in direction_numbers(poly, &value.0, m).into_iter().enumerate() {
            for row in 0..=col {
                if (mk >> (col - row)) & 1 != 0 { ret.set_bit(row, col); }
            }
        }
        Ok(ret)
    }

    fn random_gen_value<R:Rng+?Sized>(_size:&usize, coord:usize, rng:&mut R)
        -> Result<SobolDirections>
    {
        if coord == 0 { return Ok(SobolDirections::default()); }
        let s = degree_of(coord);
        Ok(SobolDirections((1..=s).map(|k| (rng.gen_range(0..(1u64 << (k-1))) << 1) | 1).collect()))
    }

    fn format_extra(coordinates:&[Arc<Coordinate<SobolDirections>>], _size:&usize,
        style:OutputStyle, _interlacing_factor:usize) -> String
    {
        if style != OutputStyle::Terminal { return String::new(); }
        let mut res = String::from("// Initial direction numbers, one coordinate per line\n");
        for (j,c) in coordinates.iter().enumerate() {
            res += &format!("{}:", j+1);
            for m in c.value().0.iter() { res += &format!(" {}", m); }
            res.push('\n');
        }
        res
    }
}

/**
 * Every odd direction-number tuple for one coordinate, in mixed-radix
 * order with m_1 varying slowest.
 */
#[derive(Clone, Debug)]
pub struct SobolDirectionSpace {
    degree: usize,
    next: u64,
    total: u64
}

impl Iterator for SobolDirectionSpace {
    type Item = SobolDirections;
    fn next(&mut self) -> Option<SobolDirections> {
        if self.next >= self.total { return None; }
        let mut rest = self.next;
        self.next += 1;
        /* m_k has k-1 free bits; peel them off from m_s down to m_1 */
        let mut numbers = vec![0u64; self.degree];
        for k in (1..=self.degree).rev() {
            let free = k - 1;
            numbers[k-1] = ((rest & ((1u64 << free) - 1)) << 1) | 1;
            rest >>= free;
        }
        Some(SobolDirections(numbers))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::try_from(self.total - self.next).ok();
        (left.unwrap_or(usize::MAX), left)
    }
}

impl Enumerable for Sobol {
    type Values = SobolDirectionSpace;

    fn gen_values(_size:&usize, coord:usize) -> Result<SobolDirectionSpace> {
        if coord == 0 {
            return Ok(SobolDirectionSpace { degree: 0, next: 0, total: 1 });
        }
        let s = degree_of(coord);
        let bits = s * (s - 1) / 2;
        if bits >= 64 {
            return Err(NetError::incompatible(coord,
                format!("2^{} direction-number tuples are too many to enumerate", bits)));
        }
        Ok(SobolDirectionSpace { degree: s, next: 0, total: 1u64 << bits })
    }
}

/**************************************************************************
 * Tests
 **************************************************************************/
