//! Smallest-largest-prime search, used to size the probe table's hash
//! modulus.

use alloc::vec;

/// Returns the largest prime strictly below `n`, or `None` when no such
/// prime exists (`n <= 2`).
///
/// Sieve of Eratosthenes over `[0, n)`: composites are struck out by every
/// prime up to `sqrt(n)`, and the highest index left standing is the answer.
///
/// # Examples
///
/// ```
/// use ravl_tree::primes::largest_prime_below;
///
/// assert_eq!(largest_prime_below(10), Some(7));
/// assert_eq!(largest_prime_below(8), Some(7));
/// assert_eq!(largest_prime_below(3), Some(2));
/// assert_eq!(largest_prime_below(2), None);
/// ```
///
/// # Complexity
///
/// O(n log log n)
#[must_use]
pub fn largest_prime_below(n: usize) -> Option<usize> {
    if n <= 2 {
        return None;
    }

    let mut is_prime = vec![true; n];
    is_prime[0] = false;
    is_prime[1] = false;

    let mut i = 2;
    while i * i < n {
        if is_prime[i] {
            // Multiples below i * i were already struck out by a smaller
            // prime factor.
            let mut j = i * i;
            while j < n {
                is_prime[j] = false;
                j += i;
            }
        }
        i += 1;
    }

    is_prime.iter().rposition(|&prime| prime)
}
