//! Permutation operators behind the tour crossover and mutation.
//!
//! These work on `&[usize]` index vectors, where every vector is a
//! permutation of `0..n`. [`Solution`](super::Solution) maps the indices
//! onto its shared point set.
//!
//! - [`greedy_subtour_crossover`] (GSX): grows a child outward from a
//!   shared anchor, O(n)
//! - [`random_pair`]: two distinct uniform positions, O(1)
//!
//! # References
//!
//! - Sengoku & Yoshihara (1998), "A Fast TSP Solver Using GA on JAVA"

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

/// Greedy Subtour Crossover (GSX) for permutations.
///
/// # Algorithm
///
/// 1. Pick a random anchor value `t`; let `x` be its index in `parent1`
///    and `y` its index in `parent2`
/// 2. Alternately walk left through `parent1` (from `x`, wrapping) and
///    right through `parent2` (from `y`, wrapping). Values from the left
///    walk are prepended, values from the right walk appended. A side
///    stops for good at the first value already in the child.
/// 3. Append the values neither walk reached, in uniformly random order
///
/// The child therefore always contains a subtour shared with the parents'
/// local ordering around `t`, and is always a full permutation.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths.
pub fn greedy_subtour_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n < 2 {
        return parent1.to_vec();
    }

    let mut position2 = vec![0usize; n];
    for (i, &v) in parent2.iter().enumerate() {
        position2[v] = i;
    }

    let mut x = rng.random_range(0..n);
    let anchor = parent1[x];
    let mut y = position2[anchor];

    let mut placed = vec![false; n];
    let mut child = VecDeque::with_capacity(n);
    child.push_back(anchor);
    placed[anchor] = true;

    let mut left_open = true;
    let mut right_open = true;
    while (left_open || right_open) && child.len() < n {
        if left_open {
            x = (x + n - 1) % n;
            let v = parent1[x];
            if placed[v] {
                left_open = false;
            } else {
                placed[v] = true;
                child.push_front(v);
            }
        }
        if right_open && child.len() < n {
            y = (y + 1) % n;
            let v = parent2[y];
            if placed[v] {
                right_open = false;
            } else {
                placed[v] = true;
                child.push_back(v);
            }
        }
    }

    let mut child: Vec<usize> = child.into();
    if child.len() < n {
        let mut rest: Vec<usize> = (0..n).filter(|&v| !placed[v]).collect();
        rest.shuffle(rng);
        child.extend(rest);
    }
    child
}

/// Two distinct uniformly random positions in `0..n`.
///
/// Returns `None` when `n < 2`.
pub fn random_pair<R: Rng>(n: usize, rng: &mut R) -> Option<(usize, usize)> {
    if n < 2 {
        return None;
    }
    let a = rng.random_range(0..n);
    let mut b = rng.random_range(0..n - 1);
    if b >= a {
        b += 1;
    }
    Some((a, b))
}
