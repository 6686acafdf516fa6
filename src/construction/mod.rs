/*
 * @file mod.rs
 * @author The digital_net authors
 * @copyright 2026 The digital_net authors, MIT license
 *
 * Construction methods.  A construction method says how one coordinate's
 * generating matrix is derived from a per-coordinate generating value and
 * a size parameter shared by the whole net.  The net itself never looks
 * inside either; it only calls through the [`Construction`] trait.
 */

use core::fmt;
use core::str::FromStr;
use std::sync::Arc;
use rand::Rng;

use crate::error::{NetError,Result};
use crate::gf2::matrix::GeneratingMatrix;
use crate::net::{Coordinate,OutputStyle};

pub mod sobol;
pub mod polynomial;
pub mod explicit;
pub mod lms;

pub use sobol::{Sobol,SobolDirections};
pub use polynomial::PolynomialLattice;
pub use explicit::{Explicit,MatrixSize};
pub use lms::{LeftMatrixScramble,ScrambleSize};

/** Tag naming one of the construction methods */
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub enum NetConstruction {
    Sobol,
    Polynomial,
    Explicit,
    Lms
}

impl NetConstruction {
    pub const ALL : [NetConstruction; 4] = [
        NetConstruction::Sobol,
        NetConstruction::Polynomial,
        NetConstruction::Explicit,
        NetConstruction::Lms
    ];

    /** Lower-case name, as accepted by `from_str` */
    pub fn name(self) -> &'static str {
        match self {
            NetConstruction::Sobol      => "sobol",
            NetConstruction::Polynomial => "polynomial",
            NetConstruction::Explicit   => "explicit",
            NetConstruction::Lms        => "lms"
        }
    }
}

impl fmt::Display for NetConstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NetConstruction {
    type Err = NetError;
    fn from_str(s:&str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        NetConstruction::ALL.into_iter()
            .find(|c| c.name() == lower)
            .ok_or(NetError::ParseConstruction(s.to_string()))
    }
}

/**
 * The per-method half of a digital net.
 *
 * Implementors are marker types; everything is associated.  The net
 * guarantees that `build_matrix` is called once per coordinate, in
 * coordinate order, with the coordinate's 0-based index.
 */
pub trait Construction: 'static {
    /** Per-coordinate seed of a generating matrix; the thing a search explores. */
    type GenValue: Clone + PartialEq + fmt::Debug + Send + Sync;

    /** Data shared by every coordinate of a net; fixes the matrix shape. */
    type SizeParameter: Clone + fmt::Debug + Send + Sync;

    /** Which method this is */
    const KIND: NetConstruction;

    /** Can a net of this kind be read as a prefix of an infinite sequence? */
    const SEQUENCE_VIEWABLE: bool;

    /** Number of rows of the generating matrices */
    fn num_rows(size:&Self::SizeParameter) -> usize;

    /** Number of columns of the generating matrices */
    fn num_cols(size:&Self::SizeParameter) -> usize;

    /**
     * Build the generating matrix of coordinate `coordinate`.
     * Fails if `value` is not legal for `size` (or for this coordinate).
     */
    fn build_matrix(value:&Self::GenValue, size:&Self::SizeParameter, coordinate:usize)
        -> Result<GeneratingMatrix>;

    /** Sample a random legal generating value for a coordinate. */
    fn random_gen_value<R:Rng+?Sized>(size:&Self::SizeParameter, coordinate:usize, rng:&mut R)
        -> Result<Self::GenValue>;

    /**
     * Method-specific text appended after the generic rendering of a net.
     * Default: nothing.
     */
    fn format_extra(
        _coordinates: &[Arc<Coordinate<Self::GenValue>>],
        _size: &Self::SizeParameter,
        _style: OutputStyle,
        _interlacing_factor: usize
    ) -> String {
        String::new()
    }
}

/** Construction methods whose generating values can be listed exhaustively. */
pub trait Enumerable: Construction {
    type Values: Iterator<Item=Self::GenValue>;

    /** Every legal generating value for a coordinate. */
    fn gen_values(size:&Self::SizeParameter, coordinate:usize) -> Result<Self::Values>;
}

#[cfg(test)]
mod tests {
    use crate::construction::NetConstruction;
    use crate::error::NetError;

    #[test]
    fn names_round_trip() {
        for c in NetConstruction::ALL {
            assert_eq!(c.to_string().parse::<NetConstruction>(), Ok(c));
        }
        assert_eq!(" Sobol ".parse::<NetConstruction>(), Ok(NetConstruction::Sobol));
        assert_eq!("halton".parse::<NetConstruction>(),
            Err(NetError::ParseConstruction("halton".to_string())));
    }
}
