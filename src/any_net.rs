/*
 * @file any_net.rs
 * @author The digital_net authors
 * @copyright 2026 The digital_net authors, MIT license
 *
 * Nets whose construction method is chosen at runtime.
 */

use crate::construction::{
    Explicit,LeftMatrixScramble,NetConstruction,PolynomialLattice,Sobol,SobolDirections
};
use crate::error::{NetError,Result};
use crate::gf2::matrix::GeneratingMatrix;
use crate::gf2::polynomial::Polynomial;
use crate::net::{Net,DigitalNet,OutputStyle};

/** A digital net built by any of the construction methods */
#[derive(Clone, Debug)]
pub enum AnyNet {
    Sobol(DigitalNet<Sobol>),
    Polynomial(DigitalNet<PolynomialLattice>),
    Explicit(DigitalNet<Explicit>),
    Lms(DigitalNet<LeftMatrixScramble>)
}

/** A generating value for any of the construction methods */
#[derive(Clone, PartialEq, Debug)]
pub enum AnyGenValue {
    Sobol(SobolDirections),
    Polynomial(Polynomial),
    Explicit(GeneratingMatrix),
    Lms(GeneratingMatrix)
}

impl AnyGenValue {
    /** Construction method this value belongs to */
    pub fn construction(&self) -> NetConstruction {
        match self {
            AnyGenValue::Sobol(_)      => NetConstruction::Sobol,
            AnyGenValue::Polynomial(_) => NetConstruction::Polynomial,
            AnyGenValue::Explicit(_)   => NetConstruction::Explicit,
            AnyGenValue::Lms(_)        => NetConstruction::Lms
        }
    }
}

macro_rules! dispatch {
    ($self:expr, $net:ident => $body:expr) => {
        match $self {
            AnyNet::Sobol($net)      => $body,
            AnyNet::Polynomial($net) => $body,
            AnyNet::Explicit($net)   => $body,
            AnyNet::Lms($net)        => $body
        }
    }
}

impl AnyNet {
    /**
     * Return a new net with one more coordinate, as
     * [`DigitalNet::append_new_coordinate`].  The value must belong to the
     * same construction method as the net.
     */
    pub fn append_new_coordinate(&self, value:AnyGenValue) -> Result<AnyNet> {
        Ok(match (self, value) {
            (AnyNet::Sobol(n),      AnyGenValue::Sobol(v))      => AnyNet::Sobol(n.append_new_coordinate(v)?),
            (AnyNet::Polynomial(n), AnyGenValue::Polynomial(v)) => AnyNet::Polynomial(n.append_new_coordinate(v)?),
            (AnyNet::Explicit(n),   AnyGenValue::Explicit(v))   => AnyNet::Explicit(n.append_new_coordinate(v)?),
            (AnyNet::Lms(n),        AnyGenValue::Lms(v))        => AnyNet::Lms(n.append_new_coordinate(v)?),
            (net, value) => return Err(NetError::ConstructionMismatch {
                expected: net.construction().name(),
                found: value.construction().name()
            })
        })
    }

    /** Generating value of a coordinate, or None if out of range */
    pub fn gen_value(&self, coord:usize) -> Option<AnyGenValue> {
        if coord >= self.dimension() { return None; }
        Some(match self {
            AnyNet::Sobol(n)      => AnyGenValue::Sobol(n.gen_value(coord).clone()),
            AnyNet::Polynomial(n) => AnyGenValue::Polynomial(*n.gen_value(coord)),
            AnyNet::Explicit(n)   => AnyGenValue::Explicit(n.gen_value(coord).clone()),
            AnyNet::Lms(n)        => AnyGenValue::Lms(n.gen_value(coord).clone())
        })
    }
}

impl Net for AnyNet {
    fn num_columns(&self) -> usize { dispatch!(self, n => n.num_columns()) }
    fn num_rows(&self) -> usize { dispatch!(self, n => n.num_rows()) }
    fn dimension(&self) -> usize { dispatch!(self, n => n.dimension()) }

    fn get_generating_matrix(&self, coord:usize) -> Option<&GeneratingMatrix> {
        dispatch!(self, n => n.get_generating_matrix(coord))
    }

    fn format(&self, style:OutputStyle, interlacing_factor:usize) -> String {
        dispatch!(self, n => n.format(style, interlacing_factor))
    }

    fn is_sequence_viewable(&self) -> bool { dispatch!(self, n => n.is_sequence_viewable()) }
    fn construction(&self) -> NetConstruction { dispatch!(self, n => n.construction()) }
}

impl From<DigitalNet<Sobol>> for AnyNet {
    fn from(n:DigitalNet<Sobol>) -> Self { AnyNet::Sobol(n) }
}

impl From<DigitalNet<PolynomialLattice>> for AnyNet {
    fn from(n:DigitalNet<PolynomialLattice>) -> Self { AnyNet::Polynomial(n) }
}

impl From<DigitalNet<Explicit>> for AnyNet {
    fn from(n:DigitalNet<Explicit>) -> Self { AnyNet::Explicit(n) }
}

impl From<DigitalNet<LeftMatrixScramble>> for AnyNet {
    fn from(n:DigitalNet<LeftMatrixScramble>) -> Self { AnyNet::Lms(n) }
}
