/*
 * @file explicit.rs
 * @author The digital_net authors
 * @copyright 2026 The digital_net authors, MIT license
 *
 * Explicit nets: the generating value of each coordinate is its matrix.
 */

use rand::Rng;

use crate::construction::{Construction,NetConstruction};
use crate::error::{NetError,Result};
use crate::gf2::matrix::GeneratingMatrix;

/** Explicit construction method */
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Explicit;

/** Shape of the matrices of an explicit net */
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug, Default)]
pub struct MatrixSize {
    pub rows: usize,
    pub cols: usize
}

impl Construction for Explicit {
    type GenValue = GeneratingMatrix;
    type SizeParameter = MatrixSize;
    const KIND : NetConstruction = NetConstruction::Explicit;
    const SEQUENCE_VIEWABLE : bool = false;

    fn num_rows(size:&MatrixSize) -> usize { size.rows }
    fn num_cols(size:&MatrixSize) -> usize { size.cols }

    fn build_matrix(value:&GeneratingMatrix, size:&MatrixSize, coord:usize) -> Result<GeneratingMatrix> {
        if value.num_rows() != size.rows || value.num_cols() != size.cols {
            return Err(NetError::incompatible(coord, format!("matrix is {}x{}, net is {}x{}",
                value.num_rows(), value.num_cols(), size.rows, size.cols)));
        }
        Ok(value.clone())
    }

    fn random_gen_value<R:Rng+?Sized>(size:&MatrixSize, _coord:usize, rng:&mut R)
        -> Result<GeneratingMatrix>
    {
        Ok(GeneratingMatrix::random(size.rows, size.cols, rng))
    }
}
