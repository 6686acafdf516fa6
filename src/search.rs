/*
 * @file search.rs
 * @author The digital_net authors
 * @copyright 2026 The digital_net authors, MIT license
 *
 * Component-by-component search.  A net is grown one coordinate at a
 * time; for each new coordinate, candidate generating values are tried
 * by extending the current net, and the candidate with the lowest
 * figure of merit is kept.  Candidates share every earlier coordinate
 * with the current net, so each costs one matrix build.
 */

use core::hash::Hash;
use std::collections::HashSet;
use rand::{RngCore,SeedableRng};
use rand::rngs::{OsRng,StdRng};
use siphasher::sip128::{Hasher128,SipHasher13};

use crate::construction::{Construction,Enumerable};
use crate::error::{NetError,Result};
use crate::gf2::matrix::GeneratingMatrix;
use crate::net::{Net,DigitalNet};

type SearchHasher = SipHasher13;

/** A key for the SipHash13 hash function. */
pub type HasherKey = [u8; 16];

/** Domain separation for the uses of the search key */
#[derive(Hash)]
enum WhyHashing {
    DerivingNewKey,
    SeedingRng,
    FingerprintingCandidate
}

/**
 * Options for a random search.  Construct with `SearchOptions::default()`
 * and override what you need.
 */
#[derive(Copy,Clone,PartialEq,Eq,Debug,Ord,PartialOrd)]
pub struct SearchOptions {
    /**
     * How many distinct candidates to evaluate for each new coordinate.
     * Candidates are distinct when their generating matrices differ.
     *
     * Default: 64.
     */
    pub candidates_per_coordinate : usize,

    /**
     * How many random values to draw at most for each new coordinate.
     * Small value spaces may run out of distinct candidates before
     * `candidates_per_coordinate` is reached; drawing stops here.
     *
     * Default: 256.
     */
    pub max_tries : usize,

    /**
     * In-out-parameter: total number of values drawn so far.
     * Mostly useful for diagnostics.
     */
    pub try_num : usize,

    /**
     * Optional hash key to make the search deterministic.
     * If a key is given, the random stream of each coordinate is derived
     * from it.  If omitted, a fresh random key is used for each coordinate.
     *
     * Default: `None`.
     */
    pub key_gen : Option<HasherKey>
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            candidates_per_coordinate : 64,
            max_tries : 256,
            try_num : 0,
            key_gen : None
        }
    }
}

/** Result of a search */
#[derive(Clone, Debug)]
pub struct SearchOutcome<C:Construction> {
    /** The net found */
    pub net: DigitalNet<C>,
    /** Figure of merit of `net` */
    pub merit: f64,
    /** Number of candidate nets evaluated, over all coordinates */
    pub candidates_evaluated: usize
}

/** Derive the key for one coordinate from the base key */
fn choose_key(base_key: Option<HasherKey>, n:usize) -> HasherKey {
    match base_key {
        None => {
            let mut key = [0u8; 16];
            OsRng.fill_bytes(&mut key);
            key
        },
        Some(key) => {
            let mut hasher = SearchHasher::new_with_key(&key);
            WhyHashing::DerivingNewKey.hash(&mut hasher);
            n.hash(&mut hasher);
            let hash = hasher.finish128();

            let mut ret = [0u8; 16];
            ret[0..8] .copy_from_slice(&hash.h1.to_le_bytes());
            ret[8..16].copy_from_slice(&hash.h2.to_le_bytes());
            ret
        }
    }
}

/** Seed a random number generator from a key */
fn rng_from_key(key:&HasherKey) -> StdRng {
    let mut seed = [0u8; 32];
    for (half,chunk) in seed.chunks_mut(16).enumerate() {
        let mut hasher = SearchHasher::new_with_key(key);
        WhyHashing::SeedingRng.hash(&mut hasher);
        half.hash(&mut hasher);
        let hash = hasher.finish128();
        chunk[0..8] .copy_from_slice(&hash.h1.to_le_bytes());
        chunk[8..16].copy_from_slice(&hash.h2.to_le_bytes());
    }
    StdRng::from_seed(seed)
}

/** 128-bit fingerprint of a candidate matrix */
fn fingerprint(key:&HasherKey, matrix:&GeneratingMatrix) -> u128 {
    let mut hasher = SearchHasher::new_with_key(key);
    WhyHashing::FingerprintingCandidate.hash(&mut hasher);
    matrix.hash(&mut hasher);
    let hash = hasher.finish128();
    ((hash.h1 as u128) << 64) | hash.h2 as u128
}

/** Evaluate the merit of every candidate */
#[cfg(not(feature="threading"))]
fn evaluate<C,F>(candidates:&[DigitalNet<C>], merit:&F) -> Vec<f64>
where C:Construction, F:Fn(&DigitalNet<C>) -> f64 + Sync {
    candidates.iter().map(|n| merit(n)).collect()
}

/** Evaluate the merit of every candidate, one chunk per available thread */
#[cfg(feature="threading")]
fn evaluate<C,F>(candidates:&[DigitalNet<C>], merit:&F) -> Vec<f64>
where C:Construction, F:Fn(&DigitalNet<C>) -> f64 + Sync {
    let nthreads = std::thread::available_parallelism().map_or(1, |n| n.get());
    let chunk = ((candidates.len() + nthreads - 1) / nthreads).max(1);
    std::thread::scope(|s| {
        let handles : Vec<_> = candidates.chunks(chunk)
            .map(|c| s.spawn(move || c.iter().map(|n| merit(n)).collect::<Vec<f64>>()))
            .collect();
        handles.into_iter().flat_map(|h| match h.join() {
            Ok(merits) => merits,
            Err(e) => std::panic::resume_unwind(e)
        }).collect()
    })
}

/** Merit used for ranking: NaN of either sign ranks after every number */
fn rank_key(merit:f64) -> f64 {
    if merit.is_nan() { f64::INFINITY } else { merit }
}

/** Keep the candidate of lowest merit; the first one wins ties */
fn select_best<C,F>(coord:usize, candidates:Vec<DigitalNet<C>>, merit:&F)
    -> Result<(DigitalNet<C>, f64)>
where C:Construction, F:Fn(&DigitalNet<C>) -> f64 + Sync {
    let merits = evaluate(&candidates, merit);
    let best = merits.iter().enumerate()
        .min_by(|a,b| rank_key(*a.1).total_cmp(&rank_key(*b.1)))
        .map(|(i,m)| (i,*m));
    let (index, value) = best.ok_or(NetError::EmptySearchSpace { coordinate: coord })?;
    log::debug!("coordinate {}: best merit {} among {} candidates", coord, value, candidates.len());
    match candidates.into_iter().nth(index) {
        Some(net) => Ok((net, value)),
        None => Err(NetError::EmptySearchSpace { coordinate: coord })
    }
}

/**
 * Random component-by-component search.
 *
 * Starting from `start`, add coordinates until the net has dimension
 * `target_dimension`.  For each new coordinate, draw random generating
 * values until `candidates_per_coordinate` distinct candidate matrices
 * are found or `max_tries` values were drawn, and keep the candidate net
 * of lowest `merit`.  A start net already at the target is returned as is.
 */
pub fn random_cbc<C,F>(
    start: &DigitalNet<C>,
    target_dimension: usize,
    options: &mut SearchOptions,
    merit: F
) -> Result<SearchOutcome<C>>
where C:Construction, F:Fn(&DigitalNet<C>) -> f64 + Sync {
    let size = start.size_parameter();
    let mut current = start.clone();
    let mut current_merit = None;
    let mut evaluated = 0;

    for coord in start.dimension()..target_dimension {
        let key = choose_key(options.key_gen, coord);
        let mut rng = rng_from_key(&key);
        let mut seen = HashSet::new();
        let mut candidates = Vec::with_capacity(options.candidates_per_coordinate);

        let mut tries = 0;
        while candidates.len() < options.candidates_per_coordinate && tries < options.max_tries {
            tries += 1;
            options.try_num += 1;
            let value = C::random_gen_value(&size, coord, &mut rng)?;
            let candidate = current.append_new_coordinate(value)?;
            if seen.insert(fingerprint(&key, candidate.generating_matrix(coord))) {
                candidates.push(candidate);
            }
        }

        evaluated += candidates.len();
        let (best, value) = select_best(coord, candidates, &merit)?;
        current = best;
        current_merit = Some(value);
    }

    let final_merit = match current_merit {
        Some(m) => m,
        None => merit(&current)
    };
    Ok(SearchOutcome { net: current, merit: final_merit, candidates_evaluated: evaluated })
}

/**
 * Exhaustive component-by-component search: as [`random_cbc`], but every
 * legal generating value of each new coordinate is tried.
 */
pub fn exhaustive_cbc<C,F>(
    start: &DigitalNet<C>,
    target_dimension: usize,
    merit: F
) -> Result<SearchOutcome<C>>
where C:Enumerable, F:Fn(&DigitalNet<C>) -> f64 + Sync {
    let size = start.size_parameter();
    let mut current = start.clone();
    let mut current_merit = None;
    let mut evaluated = 0;

    for coord in start.dimension()..target_dimension {
        let candidates = C::gen_values(&size, coord)?
            .map(|value| current.append_new_coordinate(value))
            .collect::<Result<Vec<_>>>()?;
        evaluated += candidates.len();
        let (best, value) = select_best(coord, candidates, &merit)?;
        current = best;
        current_merit = Some(value);
    }

    let final_merit = match current_merit {
        Some(m) => m,
        None => merit(&current)
    };
    Ok(SearchOutcome { net: current, merit: final_merit, candidates_evaluated: evaluated })
}

/**************************************************************************
 * Tests
 **************************************************************************/
