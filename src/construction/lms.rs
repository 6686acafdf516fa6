/*
 * @file lms.rs
 * @author The digital_net authors
 * @copyright 2026 The digital_net authors, MIT license
 *
 * Left matrix scrambles.  Each coordinate of a base net is multiplied on
 * the left by a lower-triangular matrix with unit diagonal, which keeps
 * the net's equidistribution and may add output rows.
 */

use std::sync::Arc;
use rand::Rng;

use crate::construction::{Construction,NetConstruction};
use crate::error::{NetError,Result};
use crate::gf2::matrix::{GeneratingMatrix,ROW_BITS};
use crate::net::Net;

/** Left matrix scramble construction method */
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LeftMatrixScramble;

/** The net being scrambled, and the number of rows after scrambling */
#[derive(Clone, Debug)]
pub struct ScrambleSize {
    pub rows: usize,
    pub base: Arc<dyn Net>
}

impl ScrambleSize {
    pub fn new(rows:usize, base:Arc<dyn Net>) -> Self { ScrambleSize { rows, base } }

    /** Base matrix of a coordinate; its rows must fit in a scramble row */
    fn base_matrix(&self, coord:usize) -> Result<&GeneratingMatrix> {
        let base = self.base.get_generating_matrix(coord).ok_or(NetError::CoordinateOutOfRange {
            coordinate: coord,
            available: self.base.dimension()
        })?;
        if base.num_rows() > ROW_BITS {
            return Err(NetError::incompatible(coord, format!(
                "base net has {} rows, a scramble holds at most {} columns", base.num_rows(), ROW_BITS)));
        }
        Ok(base)
    }
}

impl Construction for LeftMatrixScramble {
    type GenValue = GeneratingMatrix;
    type SizeParameter = ScrambleSize;
    const KIND : NetConstruction = NetConstruction::Lms;
    const SEQUENCE_VIEWABLE : bool = true;

    fn num_rows(size:&ScrambleSize) -> usize { size.rows }
    fn num_cols(size:&ScrambleSize) -> usize { size.base.num_columns() }

    fn build_matrix(scramble:&GeneratingMatrix, size:&ScrambleSize, coord:usize)
        -> Result<GeneratingMatrix>
    {
        let base = size.base_matrix(coord)?;
        if scramble.num_rows() != size.rows || scramble.num_cols() != base.num_rows() {
            return Err(NetError::incompatible(coord, format!("scramble is {}x{}, expected {}x{}",
                scramble.num_rows(), scramble.num_cols(), size.rows, base.num_rows())));
        }
        if !scramble.is_unit_lower_triangular() {
            return Err(NetError::incompatible(coord,
                "scramble is not lower triangular with unit diagonal"));
        }
        Ok(scramble.mul(base))
    }

    fn random_gen_value<R:Rng+?Sized>(size:&ScrambleSize, coord:usize, rng:&mut R)
        -> Result<GeneratingMatrix>
    {
        let base = size.base_matrix(coord)?;
        Ok(GeneratingMatrix::random_unit_lower_triangular(size.rows, base.num_rows(), rng))
    }
}

/**************************************************************************
 * Tests
 **************************************************************************/
#[cfg(test)]
mod tests {
    use crate::construction::{Construction,Explicit,LeftMatrixScramble,MatrixSize,ScrambleSize,Sobol};
    use crate::error::NetError;
    use crate::gf2::matrix::GeneratingMatrix;
    use crate::net::{Net,DigitalNet};
    use rand::thread_rng;
    use std::sync::Arc;

    fn sobol_base(m:usize, dim:usize) -> Arc<DigitalNet<Sobol>> {
        let mut rng = thread_rng();
        let values = (0..dim).map(|j| Sobol::random_gen_value(&m, j, &mut rng).unwrap()).collect();
        Arc::new(DigitalNet::<Sobol>::new(dim, m, values).unwrap())
    }

    #[test]
    fn scrambles_base() {
        let base = sobol_base(10, 4);
        let size = ScrambleSize::new(31, base.clone());
        let mut rng = thread_rng();
        let scrambles : Vec<_> = (0..4)
            .map(|j| LeftMatrixScramble::random_gen_value(&size, j, &mut rng).unwrap())
            .collect();
        let net = DigitalNet::<LeftMatrixScramble>::from_values(size, scrambles.clone()).unwrap();
        assert_eq!((net.num_rows(), net.num_columns(), net.dimension()), (31, 10, 4));
        assert!(net.is_sequence_viewable());
        for j in 0..4 {
            assert_eq!(net.generating_matrix(j), &scrambles[j].mul(base.generating_matrix(j)));
            assert_eq!(net.generating_matrix(j).rank(), 10);
        }
    }

    #[test]
    fn identity_scramble_is_neutral() {
        let base = sobol_base(6, 2);
        let size = ScrambleSize::new(6, base.clone());
        let c = LeftMatrixScramble::build_matrix(&GeneratingMatrix::identity(6), &size, 1).unwrap();
        assert_eq!(&c, base.generating_matrix(1));
    }

    #[test]
    fn errors() {
        let base = sobol_base(6, 2);
        let size = ScrambleSize::new(8, base);
        let mut rng = thread_rng();
        assert_eq!(LeftMatrixScramble::random_gen_value(&size, 2, &mut rng).unwrap_err(),
            NetError::CoordinateOutOfRange { coordinate: 2, available: 2 });
        assert!(LeftMatrixScramble::build_matrix(&GeneratingMatrix::identity(6), &size, 0).is_err());
        let mut s = GeneratingMatrix::random_unit_lower_triangular(8, 6, &mut rng);
        s.set_bit(0, 5);
        assert!(matches!(LeftMatrixScramble::build_matrix(&s, &size, 0),
            Err(NetError::IncompatibleValue { coordinate: 0, .. })));
    }

    /** A base taller than a scramble row is rejected, not a panic */
    #[test]
    fn tall_base() {
        let size = MatrixSize { rows: 70, cols: 4 };
        let base = DigitalNet::<Explicit>::from_values(size,
            vec![GeneratingMatrix::random(70, 4, &mut thread_rng())]).unwrap();
        assert_eq!(base.num_rows(), 70);
        let size = ScrambleSize::new(70, Arc::new(base));
        assert!(matches!(LeftMatrixScramble::random_gen_value(&size, 0, &mut thread_rng()),
            Err(NetError::IncompatibleValue { coordinate: 0, .. })));
        assert!(matches!(LeftMatrixScramble::build_matrix(&GeneratingMatrix::new(70, 64), &size, 0),
            Err(NetError::IncompatibleValue { coordinate: 0, .. })));
        assert!(DigitalNet::<LeftMatrixScramble>::from_values(size, vec![GeneratingMatrix::new(70, 64)]).is_err());
    }
}
