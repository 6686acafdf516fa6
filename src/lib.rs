/*!
 * Digital nets in base 2.
 *
 * A digital net in base 2 is a point set for quasi-Monte Carlo integration,
 * described by one binary generating matrix per coordinate.  This crate
 * provides a [`DigitalNet<C>`] type, generic over a construction method `C`
 * that says how each coordinate's matrix is derived from a per-coordinate
 * *generating value*, and an object-safe [`Net`] trait that hides `C`.
 *
 * # Construction methods
 *
 * Four methods are provided, each implementing [`Construction`]:
 *
 * * [`Sobol`]: the size parameter is the number of columns `m`; the value of
 *   coordinate `j >= 1` is the initial direction numbers for the `j`-th
 *   primitive polynomial.  Coordinate 0 is the identity.
 * * [`PolynomialLattice`]: the size parameter is a modulus polynomial `P`;
 *   each value is a polynomial `q` with `deg q < deg P`.
 * * [`Explicit`]: each value is the generating matrix itself.
 * * [`LeftMatrixScramble`]: each value is a lower-triangular matrix with
 *   unit diagonal, multiplied on the left of another net's matrices.
 *
 * When the method is only known at runtime, use [`AnyNet`].
 *
 * # Growing nets
 *
 * Nets are immutable.  [`DigitalNet::append_new_coordinate`] returns a new
 * net of one more dimension, sharing every existing coordinate with the
 * original through an [`Arc`](std::sync::Arc); only the new matrix is built.
 * This is what component-by-component search does many times per coordinate,
 * see [`search::random_cbc`] and [`search::exhaustive_cbc`].
 *
 * # Output
 *
 * [`Net::format`] renders a net either for humans ([`OutputStyle::Terminal`])
 * or as a digital net file ([`OutputStyle::Net`]), in which each coordinate's
 * columns are written as 31-bit integers, most significant bit first.
 *
 * # Limits
 *
 * At most [`MAX_COLUMNS`] = 63 columns are supported, so that the number of
 * points always fits in a `u64`.  Larger size parameters are rejected when
 * the net is built.
 *
 * ## Threading
 *
 * With the `threading` feature enabled, the figures of merit of the
 * candidates for one coordinate are evaluated on scoped threads.
 *
 * # Logging
 *
 * The crate logs through the [`log`] facade: net construction and extension
 * at `trace` level, search progress at `debug` level.
 */

pub mod error;
pub mod gf2;
pub mod net;
pub mod construction;
pub mod any_net;
pub mod search;

pub use error::{NetError,Result};
pub use gf2::matrix::GeneratingMatrix;
pub use gf2::polynomial::Polynomial;
pub use net::{Net,DigitalNet,Coordinate,OutputStyle,MAX_COLUMNS,checked_num_points};
pub use construction::{
    Construction,Enumerable,NetConstruction,
    Sobol,SobolDirections,PolynomialLattice,Explicit,MatrixSize,LeftMatrixScramble,ScrambleSize
};
pub use any_net::{AnyNet,AnyGenValue};
pub use search::{SearchOptions,SearchOutcome};
