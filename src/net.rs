/*
 * @file net.rs
 * @author The digital_net authors
 * @copyright 2026 The digital_net authors, MIT license
 *
 * Digital nets in base 2: the abstract interface, and the generic net
 * parameterized by a construction method.
 */

use core::fmt;
use core::str::FromStr;
use core::marker::PhantomData;
use std::sync::Arc;

use crate::construction::{Construction,NetConstruction};
use crate::error::{NetError,Result};
use crate::gf2::matrix::{GeneratingMatrix,OUTPUT_DIGITS};

/** Largest supported number of columns, so that the point count fits in a u64 */
pub const MAX_COLUMNS : usize = 63;

/** Number of points of a net with `cols` columns, or None past [`MAX_COLUMNS`] */
pub fn checked_num_points(cols:usize) -> Option<u64> {
    if cols > MAX_COLUMNS { None } else { Some(1u64 << cols) }
}

/** Text rendering style of a net */
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug, Default)]
pub enum OutputStyle {
    /** Human-readable, one commented value per line */
    #[default]
    Terminal,
    /** Machine-readable digital net file */
    Net
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputStyle::Terminal => "terminal",
            OutputStyle::Net => "net"
        })
    }
}

impl FromStr for OutputStyle {
    type Err = NetError;
    fn from_str(s:&str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "terminal" => Ok(OutputStyle::Terminal),
            "net" => Ok(OutputStyle::Net),
            _ => Err(NetError::ParseStyle(s.to_string()))
        }
    }
}

/**
 * A digital net in base 2: one generating matrix per coordinate, all of
 * the same shape.
 */
pub trait Net: fmt::Debug + Send + Sync {
    /** Number of columns of each generating matrix */
    fn num_columns(&self) -> usize;

    /** Number of rows of each generating matrix */
    fn num_rows(&self) -> usize;

    /** Number of points, 2^num_columns() */
    fn num_points(&self) -> u64 {
        match checked_num_points(self.num_columns()) {
            Some(n) => n,
            None => panic!("{} columns exceed the supported {}", self.num_columns(), MAX_COLUMNS)
        }
    }

    /** Number of coordinates */
    fn dimension(&self) -> usize;

    /** Generating matrix of a coordinate, or None if out of range */
    fn get_generating_matrix(&self, coord:usize) -> Option<&GeneratingMatrix>;

    /** Generating matrix of a coordinate.  Panics if `coord >= dimension()`. */
    fn generating_matrix(&self, coord:usize) -> &GeneratingMatrix {
        match self.get_generating_matrix(coord) {
            Some(m) => m,
            None => panic!("coordinate {} out of range for a net of dimension {}",
                coord, self.dimension())
        }
    }

    /** Render the net as text.  `interlacing_factor` must be at least 1. */
    fn format(&self, style:OutputStyle, interlacing_factor:usize) -> String;

    /** Can the net be read as a prefix of an infinite digital sequence? */
    fn is_sequence_viewable(&self) -> bool;

    /** Construction method of the net */
    fn construction(&self) -> NetConstruction;
}

/** Render the part of the text output common to every construction method */
fn format_common(net:&dyn Net, style:OutputStyle, interlacing_factor:usize) -> String {
    assert!(interlacing_factor >= 1, "interlacing factor must be positive");
    let mut res = String::new();
    match style {
        OutputStyle::Terminal => {
            res += &format!("{}  // Number of columns\n", net.num_columns());
            res += &format!("{}  // Number of rows\n", net.num_rows());
            res += &format!("{}  // Number of points\n", net.num_points());
            res += &format!("{}  // Dimension of points\n", net.dimension() / interlacing_factor);
            if interlacing_factor > 1 {
                res += &format!("{}  // Interlacing factor\n", interlacing_factor);
                res += &format!("{}  // Number of components = interlacing factor x dimension\n",
                    net.dimension());
            }
        },
        OutputStyle::Net => {
            let d = net.dimension();
            let k = net.num_columns();
            res += "# Parameters for a digital net in base 2\n";
            res += &format!("{}    # {} dimensions\n", d, d);
            if interlacing_factor > 1 {
                res += &format!("{}  // Interlacing factor\n", interlacing_factor);
                res += &format!("{}  // Number of components = interlacing factor x dimension\n", d);
            }
            res += &format!("{}   # k = {},  n = 2^{} = {} points\n", k, k, k, net.num_points());
            res += &format!("{}   # r = {} binary output digits\n", OUTPUT_DIGITS, OUTPUT_DIGITS);
            if interlacing_factor == 1 {
                res += "# Columns of gen. matrices C_1,...,C_s, one matrix per line:\n";
            } else {
                res += "# Columns of gen. matrices C_1,...,C_{ds}, one matrix per line:\n";
            }
            for coord in 0..d {
                res += &net.generating_matrix(coord).format_to_columns_reverse();
                res.push('\n');
            }
            /* The matrix block ends without a newline */
            res.pop();
        }
    }
    res
}

/** One coordinate of a net: its generating value and the matrix built from it */
#[derive(Clone, PartialEq, Debug)]
pub struct Coordinate<V> {
    value: V,
    matrix: GeneratingMatrix
}

impl <V> Coordinate<V> {
    /** Generating value */
    pub fn value(&self) -> &V { &self.value }

    /** Generating matrix */
    pub fn matrix(&self) -> &GeneratingMatrix { &self.matrix }
}

/**
 * A digital net built by the construction method `C`.
 *
 * Nets are immutable.  Each coordinate lives in its own shared allocation,
 * so [`append_new_coordinate`](DigitalNet::append_new_coordinate) copies
 * only pointers to the existing coordinates and builds one new matrix.
 */
pub struct DigitalNet<C:Construction> {
    size: C::SizeParameter,
    rows: usize,
    cols: usize,
    coordinates: Vec<Arc<Coordinate<C::GenValue>>>,
    _phantom: PhantomData<fn() -> C>
}

impl <C:Construction> Clone for DigitalNet<C> {
    fn clone(&self) -> Self {
        DigitalNet {
            size: self.size.clone(),
            rows: self.rows,
            cols: self.cols,
            coordinates: self.coordinates.clone(),
            _phantom: PhantomData
        }
    }
}

impl <C:Construction> fmt::Debug for DigitalNet<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigitalNet")
            .field("construction", &C::KIND)
            .field("size", &self.size)
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("coordinates", &self.coordinates)
            .finish()
    }
}

impl <C:Construction> DigitalNet<C> {
    /** Compute the shape from a size parameter, checking capacity */
    fn shape(size:&C::SizeParameter) -> Result<(usize,usize)> {
        let cols = C::num_cols(size);
        if cols > MAX_COLUMNS {
            return Err(NetError::TooManyColumns { cols, max: MAX_COLUMNS });
        }
        Ok((C::num_rows(size), cols))
    }

    fn build_coordinate(value:C::GenValue, size:&C::SizeParameter, coord:usize)
        -> Result<Arc<Coordinate<C::GenValue>>>
    {
        let matrix = C::build_matrix(&value, size, coord)?;
        Ok(Arc::new(Coordinate { value, matrix }))
    }

    /**
     * Build a net of the given dimension from one generating value per
     * coordinate.  Coordinates are built in order; the first builder error
     * is returned as is.
     */
    pub fn new(dimension:usize, size:C::SizeParameter, values:Vec<C::GenValue>) -> Result<Self> {
        if values.len() != dimension {
            return Err(NetError::DimensionMismatch { expected: dimension, found: values.len() });
        }
        let (rows, cols) = Self::shape(&size)?;
        let mut coordinates = Vec::with_capacity(dimension);
        for (coord, value) in values.into_iter().enumerate() {
            coordinates.push(Self::build_coordinate(value, &size, coord)?);
        }
        log::trace!("built {} net: dimension {}, {}x{} matrices", C::KIND, dimension, rows, cols);
        Ok(DigitalNet { size, rows, cols, coordinates, _phantom: PhantomData })
    }

    /** Build a net whose dimension is the number of values */
    pub fn from_values<I>(size:C::SizeParameter, values:I) -> Result<Self>
    where I: IntoIterator<Item=C::GenValue> {
        let values : Vec<C::GenValue> = values.into_iter().collect();
        Self::new(values.len(), size, values)
    }

    /** A net of dimension 0 with the given size parameter */
    pub fn empty(size:C::SizeParameter) -> Result<Self> {
        Self::new(0, size, Vec::new())
    }

    /**
     * Return a new net with one more coordinate.  The existing coordinates
     * are shared with `self`, which is left unchanged.
     */
    pub fn append_new_coordinate(&self, value:C::GenValue) -> Result<Self> {
        let coord = self.coordinates.len();
        let new = Self::build_coordinate(value, &self.size, coord)?;
        let mut coordinates = Vec::with_capacity(coord + 1);
        coordinates.extend(self.coordinates.iter().cloned());
        coordinates.push(new);
        log::trace!("extended {} net to dimension {}", C::KIND, coord + 1);
        Ok(DigitalNet {
            size: self.size.clone(),
            rows: self.rows,
            cols: self.cols,
            coordinates,
            _phantom: PhantomData
        })
    }

    /** A copy of the size parameter */
    pub fn size_parameter(&self) -> C::SizeParameter { self.size.clone() }

    /** Generating value of a coordinate.  Panics if out of range. */
    pub fn gen_value(&self, coord:usize) -> &C::GenValue {
        &self.coordinates[coord].value
    }

    /** Generating values, in coordinate order */
    pub fn gen_values(&self) -> impl Iterator<Item=&C::GenValue> + '_ {
        self.coordinates.iter().map(|c| &c.value)
    }

    /** The shared per-coordinate slots */
    pub fn coordinates(&self) -> &[Arc<Coordinate<C::GenValue>>] { &self.coordinates }
}

impl <C:Construction> Default for DigitalNet<C>
where C::SizeParameter: Default {
    /** Placeholder net: dimension 0 with the default size parameter */
    fn default() -> Self {
        let size = C::SizeParameter::default();
        let (rows, cols) = (C::num_rows(&size), C::num_cols(&size));
        assert!(cols <= MAX_COLUMNS, "default size parameter has {} columns", cols);
        DigitalNet { size, rows, cols, coordinates: Vec::new(), _phantom: PhantomData }
    }
}

impl <C:Construction> Net for DigitalNet<C> {
    fn num_columns(&self) -> usize { self.cols }
    fn num_rows(&self) -> usize { self.rows }
    fn dimension(&self) -> usize { self.coordinates.len() }

    fn get_generating_matrix(&self, coord:usize) -> Option<&GeneratingMatrix> {
        self.coordinates.get(coord).map(|c| &c.matrix)
    }

    fn format(&self, style:OutputStyle, interlacing_factor:usize) -> String {
        let mut res = format_common(self, style, interlacing_factor);
        res += &C::format_extra(&self.coordinates, &self.size, style, interlacing_factor);
        res
    }

    fn is_sequence_viewable(&self) -> bool { C::SEQUENCE_VIEWABLE }

    fn construction(&self) -> NetConstruction { C::KIND }
}

/**************************************************************************
 * Tests
 **************************************************************************/
#[cfg(test)]
mod tests {
    use crate::net::{Net,DigitalNet,OutputStyle,checked_num_points,MAX_COLUMNS};
    use crate::construction::{Construction,Explicit,MatrixSize,Sobol,SobolDirections};
    use crate::error::NetError;
    use crate::gf2::matrix::GeneratingMatrix;
    use rand::{Rng,thread_rng};
    use std::sync::Arc;

    fn random_explicit(rows:usize, cols:usize, dim:usize) -> (MatrixSize, Vec<GeneratingMatrix>) {
        let size = MatrixSize { rows, cols };
        let values = (0..dim).map(|_| GeneratingMatrix::random(rows, cols, &mut thread_rng())).collect();
        (size, values)
    }

    #[test]
    fn point_counts() {
        for cols in 0..=MAX_COLUMNS {
            assert_eq!(checked_num_points(cols), Some(1u64 << cols));
        }
        assert_eq!(checked_num_points(MAX_COLUMNS+1), None);
        let net = DigitalNet::<Explicit>::empty(MatrixSize { rows: 5, cols: 63 }).unwrap();
        assert_eq!(net.num_points(), 1u64 << 63);
    }

    #[test]
    fn too_many_columns() {
        let size = MatrixSize { rows: 1, cols: 64 };
        assert_eq!(DigitalNet::<Explicit>::empty(size).unwrap_err(),
            NetError::TooManyColumns { cols: 64, max: MAX_COLUMNS });
    }

    #[test]
    fn dimension_mismatch() {
        let (size, values) = random_explicit(3, 3, 2);
        assert_eq!(DigitalNet::<Explicit>::new(3, size, values).unwrap_err(),
            NetError::DimensionMismatch { expected: 3, found: 2 });
    }

    /** Every matrix is what the builder gives for its value and index */
    #[test]
    fn matrices_match_builder() {
        for _ in 0..20 {
            let rows = thread_rng().gen_range(0..=40);
            let cols = thread_rng().gen_range(0..=20);
            let dim = thread_rng().gen_range(0..=8);
            let (size, values) = random_explicit(rows, cols, dim);
            let net = DigitalNet::<Explicit>::new(dim, size.clone(), values.clone()).unwrap();
            assert_eq!(net.dimension(), dim);
            assert_eq!(net.num_rows(), rows);
            assert_eq!(net.num_columns(), cols);
            for (j,v) in values.iter().enumerate() {
                assert_eq!(net.generating_matrix(j), &Explicit::build_matrix(v, &size, j).unwrap());
                assert_eq!(net.gen_value(j), v);
            }
            assert!(net.get_generating_matrix(dim).is_none());
        }
    }

    /** Extension shares the parent's slots and leaves the parent alone */
    #[test]
    fn extension_shares() {
        let (size, values) = random_explicit(8, 6, 5);
        let net1 = DigitalNet::<Explicit>::from_values(size.clone(), values.clone()).unwrap();
        let extra = GeneratingMatrix::random(8, 6, &mut thread_rng());
        let net2 = net1.append_new_coordinate(extra.clone()).unwrap();
        let net3 = net1.append_new_coordinate(GeneratingMatrix::new(8, 6)).unwrap();

        assert_eq!(net1.dimension(), 5);
        assert_eq!(net2.dimension(), 6);
        for j in 0..5 {
            assert!(Arc::ptr_eq(&net1.coordinates()[j], &net2.coordinates()[j]));
            assert!(core::ptr::eq(net1.generating_matrix(j), net3.generating_matrix(j)));
        }
        assert_eq!(net2.generating_matrix(5), &extra);
        assert!(net3.generating_matrix(5).is_zero());

        let wrong = GeneratingMatrix::new(7, 6);
        assert!(matches!(net1.append_new_coordinate(wrong),
            Err(NetError::IncompatibleValue { coordinate: 5, .. })));
        assert_eq!(net1.dimension(), 5);
    }

    /** Growing one coordinate at a time is the same as building directly */
    #[test]
    fn placeholder_then_extend() {
        let (size, values) = random_explicit(10, 10, 6);
        let direct = DigitalNet::<Explicit>::from_values(size.clone(), values.clone()).unwrap();
        let mut grown = DigitalNet::<Explicit>::empty(size).unwrap();
        for v in values { grown = grown.append_new_coordinate(v).unwrap(); }
        assert_eq!(grown.dimension(), direct.dimension());
        for j in 0..direct.dimension() {
            assert_eq!(grown.generating_matrix(j), direct.generating_matrix(j));
        }
        assert_eq!(grown.format(OutputStyle::Net, 1), direct.format(OutputStyle::Net, 1));
    }

    #[test]
    fn default_placeholder() {
        let net = DigitalNet::<Sobol>::default();
        assert_eq!((net.dimension(), net.num_rows(), net.num_columns(), net.num_points()), (0,0,0,1));
        let net = net.append_new_coordinate(SobolDirections::default()).unwrap();
        assert_eq!(net.dimension(), 1);
    }

    #[test]
    #[should_panic]
    fn out_of_range_matrix() {
        let (size, values) = random_explicit(2, 2, 2);
        let net = DigitalNet::<Explicit>::from_values(size, values).unwrap();
        net.generating_matrix(2);
    }

    #[test]
    fn terminal_format() {
        let (size, values) = random_explicit(3, 3, 2);
        let net = DigitalNet::<Explicit>::from_values(size, values).unwrap();
        assert_eq!(net.format(OutputStyle::Terminal, 1),
            "3  // Number of columns\n3  // Number of rows\n8  // Number of points\n\
             2  // Dimension of points\n");
        assert_eq!(net.format(OutputStyle::Terminal, 2),
            "3  // Number of columns\n3  // Number of rows\n8  // Number of points\n\
             1  // Dimension of points\n2  // Interlacing factor\n\
             2  // Number of components = interlacing factor x dimension\n");
    }

    #[test]
    fn net_format() {
        let size = MatrixSize { rows: 2, cols: 2 };
        let net = DigitalNet::<Explicit>::from_values(size, vec![GeneratingMatrix::identity(2)]).unwrap();
        let top = 1u64 << 30;
        assert_eq!(net.format(OutputStyle::Net, 1), format!(
            "# Parameters for a digital net in base 2\n\
             1    # 1 dimensions\n\
             2   # k = 2,  n = 2^2 = 4 points\n\
             31   # r = 31 binary output digits\n\
             # Columns of gen. matrices C_1,...,C_s, one matrix per line:\n\
             {} {}", top, top >> 1));
        let text = net.append_new_coordinate(GeneratingMatrix::identity(2)).unwrap()
            .format(OutputStyle::Net, 2);
        assert!(text.contains("2  // Interlacing factor\n"));
        assert!(text.contains("C_1,...,C_{ds}"));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn styles_parse() {
        assert_eq!("terminal".parse::<OutputStyle>(), Ok(OutputStyle::Terminal));
        assert_eq!("NET".parse::<OutputStyle>(), Ok(OutputStyle::Net));
        assert_eq!(OutputStyle::default(), OutputStyle::Terminal);
        assert_eq!(OutputStyle::Net.to_string(), "net");
        assert_eq!("csv".parse::<OutputStyle>(), Err(NetError::ParseStyle("csv".to_string())));
    }

    #[test]
    fn shareable_across_threads() {
        fn is_send_sync<T:Send+Sync>() {}
        is_send_sync::<DigitalNet<Explicit>>();
        is_send_sync::<DigitalNet<Sobol>>();
    }
}
