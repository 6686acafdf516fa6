/*
 * @file matrix.rs
 * @author The digital_net authors
 * @copyright 2026 The digital_net authors, MIT license
 *
 * Generating matrices: small GF(2) matrices stored one 64-bit word per row.
 * Column j of a row is bit j of the word.
 */

use core::fmt;
use rand::Rng;

/** Storage for one row */
pub type Row = u64;

/** Maximum number of columns a matrix can hold */
pub const ROW_BITS : usize = Row::BITS as usize;

/** Number of binary output digits in the column-reversed text format */
pub const OUTPUT_DIGITS : usize = 31;

/** Mask of the low `cols` bits */
#[inline(always)]
fn col_mask(cols:usize) -> Row {
    if cols >= ROW_BITS { !0 } else { (1 << cols) - 1 }
}

/** GF(2) generating matrix */
#[derive(Clone, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct GeneratingMatrix {
    rows : usize,
    cols : usize,
    data : Vec<Row>
}

impl GeneratingMatrix {
    /** Create a new zero matrix. */
    pub fn new(rows:usize, cols:usize) -> GeneratingMatrix {
        assert!(cols <= ROW_BITS, "at most {} columns fit in a row", ROW_BITS);
        GeneratingMatrix { rows, cols, data: vec![0; rows] }
    }

    /** Create the n*n identity matrix. */
    pub fn identity(n:usize) -> GeneratingMatrix {
        let mut ret = GeneratingMatrix::new(n,n);
        for i in 0..n { ret.data[i] = 1 << i; }
        ret
    }

    /**
     * Create a matrix from its raw row words.
     * Return None if the number of words is not `rows`, or if any word
     * has bits set beyond column `cols`.
     */
    pub fn from_rows(rows:usize, cols:usize, data:Vec<Row>) -> Option<GeneratingMatrix> {
        if cols > ROW_BITS || data.len() != rows { return None; }
        if data.iter().any(|r| r & !col_mask(cols) != 0) { return None; }
        Some(GeneratingMatrix { rows, cols, data })
    }

    /**
     * Create a matrix from column words, bit i of a column being row i.
     * Bits beyond row `rows` are ignored.
     */
    pub fn from_columns(rows:usize, columns:&[Row]) -> GeneratingMatrix {
        let mut ret = GeneratingMatrix::new(rows, columns.len());
        for (j,col) in columns.iter().enumerate() {
            for i in 0..rows.min(ROW_BITS) {
                if (col >> i) & 1 != 0 { ret.set_bit(i,j); }
            }
        }
        ret
    }

    /** Number of rows */
    pub fn num_rows(&self) -> usize { self.rows }

    /** Number of columns */
    pub fn num_cols(&self) -> usize { self.cols }

    /** Raw row words */
    pub fn rows(&self) -> &[Row] { &self.data }

    /** One row as a word */
    pub fn row(&self, row:usize) -> Row { self.data[row] }

    /** One column as a word, bit i being row i (rows past 64 are dropped) */
    pub fn column(&self, col:usize) -> Row {
        debug_assert!(col < self.cols);
        let mut ret = 0;
        for (i,r) in self.data.iter().take(ROW_BITS).enumerate() {
            ret |= ((r >> col) & 1) << i;
        }
        ret
    }

    /** Return a single bit of the matrix */
    #[inline(always)]
    pub fn get_bit(&self, row:usize, col:usize) -> bool {
        debug_assert!(col < self.cols);
        (self.data[row] >> col) & 1 != 0
    }

    /** Set one bit of the matrix */
    #[inline(always)]
    pub fn set_bit(&mut self, row:usize, col:usize) {
        debug_assert!(col < self.cols);
        self.data[row] |= 1 << col;
    }

    /** Clear one bit of the matrix */
    #[inline(always)]
    pub fn clear_bit(&mut self, row:usize, col:usize) {
        debug_assert!(col < self.cols);
        self.data[row] &= !(1 << col);
    }

    /** Toggle one bit of the matrix */
    #[inline(always)]
    pub fn toggle_bit(&mut self, row:usize, col:usize) {
        debug_assert!(col < self.cols);
        self.data[row] ^= 1 << col;
    }

    /** Return true if every entry is zero */
    pub fn is_zero(&self) -> bool { self.data.iter().all(|r| *r == 0) }

    /** Multiply self by another matrix, and return the result. */
    pub fn mul(&self, b:&GeneratingMatrix) -> GeneratingMatrix {
        assert_eq!(self.cols, b.rows, "inner dimensions must agree");
        let mut result = GeneratingMatrix::new(self.rows, b.cols);
        for (out,row) in result.data.iter_mut().zip(self.data.iter()) {
            let mut bits = *row;
            while bits != 0 {
                let k = bits.trailing_zeros() as usize;
                *out ^= b.data[k];
                bits &= bits - 1;
            }
        }
        result
    }

    /**
     * Return true if the matrix is lower triangular with ones on
     * the diagonal.  Rows past the number of columns are unconstrained.
     */
    pub fn is_unit_lower_triangular(&self) -> bool {
        self.data.iter().enumerate().all(|(i,r)| {
            if i >= self.cols { return true; }
            let above = col_mask(self.cols) & !col_mask(i+1);
            (r >> i) & 1 == 1 && r & above == 0
        })
    }

    /** Return the rank of the matrix, by elimination on a copy. */
    pub fn rank(&self) -> usize {
        let mut rows = self.data.clone();
        let mut rank = 0;
        for col in 0..self.cols {
            let pivot = match (rank..rows.len()).find(|&r| (rows[r] >> col) & 1 != 0) {
                None => continue,
                Some(p) => p
            };
            rows.swap(rank, pivot);
            let prow = rows[rank];
            for (r,row) in rows.iter_mut().enumerate() {
                if r != rank && (*row >> col) & 1 != 0 { *row ^= prow; }
            }
            rank += 1;
        }
        rank
    }

    /** Sample a uniformly random matrix. */
    pub fn random<R:Rng+?Sized>(rows:usize, cols:usize, rng:&mut R) -> GeneratingMatrix {
        let mut ret = GeneratingMatrix::new(rows, cols);
        for r in ret.data.iter_mut() { *r = rng.gen::<Row>() & col_mask(cols); }
        ret
    }

    /**
     * Sample a random lower-triangular matrix with unit diagonal.
     * Rows past the number of columns are uniformly random.
     */
    pub fn random_unit_lower_triangular<R:Rng+?Sized>(rows:usize, cols:usize, rng:&mut R)
        -> GeneratingMatrix
    {
        let mut ret = GeneratingMatrix::new(rows, cols);
        for (i,r) in ret.data.iter_mut().enumerate() {
            *r = if i < cols {
                (rng.gen::<Row>() & col_mask(i)) | (1 << i)
            } else {
                rng.gen::<Row>() & col_mask(cols)
            };
        }
        ret
    }

    /**
     * Format the matrix one column at a time.  Each column becomes an
     * integer on `OUTPUT_DIGITS` bits, with row 0 as the most significant
     * bit; rows past `OUTPUT_DIGITS` are not emitted.  Columns are separated
     * by single spaces.
     */
    pub fn format_to_columns_reverse(&self) -> String {
        let nrows = self.rows.min(OUTPUT_DIGITS);
        let mut words = Vec::with_capacity(self.cols);
        for col in 0..self.cols {
            let mut word = 0u64;
            for row in 0..nrows {
                word |= ((self.data[row] >> col) & 1) << (OUTPUT_DIGITS - 1 - row);
            }
            words.push(word.to_string());
        }
        words.join(" ")
    }
}

/** One line per row, column 0 first */
impl fmt::Display for GeneratingMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i,r) in self.data.iter().enumerate() {
            if i > 0 { writeln!(f)?; }
            for j in 0..self.cols {
                write!(f, "{}", (r >> j) & 1)?;
            }
        }
        Ok(())
    }
}

/**************************************************************************
 * Tests
 **************************************************************************/
#[cfg(test)]
mod tests {
    use crate::gf2::matrix::{GeneratingMatrix,OUTPUT_DIGITS};
    use rand::{Rng,thread_rng};

    fn random_matrix(rows:usize, cols:usize) -> GeneratingMatrix {
        GeneratingMatrix::random(rows, cols, &mut thread_rng())
    }

    /** Test that multiplication associates and that the identity is neutral */
    #[test]
    fn mul_identities() {
        for _ in 0..100 {
            let a = thread_rng().gen_range(1..=40);
            let b = thread_rng().gen_range(1..=40);
            let c = thread_rng().gen_range(1..=40);
            let d = thread_rng().gen_range(1..=40);
            let x = random_matrix(a,b);
            let y = random_matrix(b,c);
            let z = random_matrix(c,d);
            assert_eq!(GeneratingMatrix::identity(a).mul(&x), x);
            assert_eq!(x.mul(&GeneratingMatrix::identity(b)), x);
            assert_eq!(x.mul(&y).mul(&z), x.mul(&y.mul(&z)));
        }
    }

    /** Test that single bits compose like matrix units */
    #[test]
    fn single_bits() {
        for _ in 0..100 {
            let i = thread_rng().gen_range(0..16);
            let j = thread_rng().gen_range(0..16);
            let k = thread_rng().gen_range(0..16);
            let mut eij = GeneratingMatrix::new(16,16);
            let mut ejk = GeneratingMatrix::new(16,16);
            let mut eik = GeneratingMatrix::new(16,16);
            eij.set_bit(i,j);
            ejk.set_bit(j,k);
            eik.set_bit(i,k);
            assert_eq!(eij.mul(&ejk), eik);
            eik.toggle_bit(i,k);
            assert!(eik.is_zero());
        }
    }

    #[test]
    fn from_rows_checks_shape() {
        assert!(GeneratingMatrix::from_rows(2,2,vec![0b01,0b11]).is_some());
        assert!(GeneratingMatrix::from_rows(2,2,vec![0b01]).is_none());
        assert!(GeneratingMatrix::from_rows(2,2,vec![0b01,0b100]).is_none());
        assert!(GeneratingMatrix::from_rows(1,65,vec![0]).is_none());
    }

    #[test]
    fn columns_round_trip() {
        for _ in 0..20 {
            let m = random_matrix(30, 12);
            let cols : Vec<u64> = (0..12).map(|j| m.column(j)).collect();
            assert_eq!(GeneratingMatrix::from_columns(30, &cols), m);
        }
    }

    #[test]
    fn unit_lower_triangular() {
        let mut rng = thread_rng();
        for _ in 0..50 {
            let cols = rng.gen_range(1..=31);
            let rows = rng.gen_range(cols..=40);
            let s = GeneratingMatrix::random_unit_lower_triangular(rows, cols, &mut rng);
            assert!(s.is_unit_lower_triangular());
            assert_eq!(s.rank(), cols);
        }
        assert!(GeneratingMatrix::identity(5).is_unit_lower_triangular());
        let mut m = GeneratingMatrix::identity(5);
        m.set_bit(1,3);
        assert!(!m.is_unit_lower_triangular());
        m.clear_bit(1,3);
        m.clear_bit(2,2);
        assert!(!m.is_unit_lower_triangular());
    }

    #[test]
    fn rank() {
        assert_eq!(GeneratingMatrix::identity(7).rank(), 7);
        assert_eq!(GeneratingMatrix::new(4,4).rank(), 0);
        let m = GeneratingMatrix::from_rows(3,3,vec![0b011,0b110,0b101]).unwrap();
        assert_eq!(m.rank(), 2);
    }

    /** Column-reversed format puts row 0 in the top output digit */
    #[test]
    fn columns_reverse_format() {
        let top = 1u64 << (OUTPUT_DIGITS-1);
        assert_eq!(GeneratingMatrix::identity(3).format_to_columns_reverse(),
            format!("{} {} {}", top, top>>1, top>>2));
        let m = GeneratingMatrix::from_rows(2,2,vec![0b11,0b01]).unwrap();
        assert_eq!(m.format_to_columns_reverse(), format!("{} {}", top|(top>>1), top));
        assert_eq!(GeneratingMatrix::new(0,0).format_to_columns_reverse(), "");
    }

    #[test]
    fn display() {
        let m = GeneratingMatrix::from_rows(2,3,vec![0b001,0b110]).unwrap();
        assert_eq!(m.to_string(), "100\n011");
    }
}
