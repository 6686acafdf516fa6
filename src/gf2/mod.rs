/*
 * @file mod.rs
 * @author The digital_net authors
 * @copyright 2026 The digital_net authors, MIT license
 *
 * GF(2) building blocks for digital nets: small bit matrices stored one
 * word per row, and polynomials packed into a single word.
 */
pub mod matrix;
pub mod polynomial;
