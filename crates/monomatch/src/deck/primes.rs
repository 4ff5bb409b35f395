//! Small prime helpers used to pick a valid design order.

/// Returns `true` when `n` is prime.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut d = 5u64;
    while d.saturating_mul(d) <= n {
        if n % d == 0 || n % (d + 2) == 0 {
            return false;
        }
        d += 6;
    }
    true
}

/// Largest prime `<= n`, or `None` when `n < 2`.
pub fn prev_prime(n: u64) -> Option<u64> {
    (2..=n).rev().find(|&k| is_prime(k))
}

/// Smallest prime strictly greater than `n`.
pub fn next_prime(n: u64) -> u64 {
    let mut k = n.saturating_add(1).max(2);
    while !is_prime(k) {
        k += 1;
    }
    k
}
