//! Trial-division primality test

/// Whether `n` is prime. Values below 2 are never prime.
pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    let mut i: i64 = 2;
    // i <= n / i avoids overflowing i * i near i64::MAX
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_values() {
        assert!(!is_prime(-7));
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(!is_prime(4));
        assert!(is_prime(13));
        assert!(!is_prime(15));
    }

    #[test]
    fn squares_of_primes() {
        for p in [2i64, 3, 5, 7, 11, 13, 97] {
            assert!(!is_prime(p * p), "{} is composite", p * p);
        }
    }

    #[test]
    fn primes_below_fifty() {
        let primes: Vec<i64> = (0..50).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47]);
    }

    #[test]
    fn large_prime() {
        assert!(is_prime(2_147_483_647));
    }
}
