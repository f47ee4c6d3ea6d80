/// Reduce `n` to a single decimal digit by repeatedly summing its digits.
pub fn digital_root(mut n: u64) -> u64 {
    while n >= 10 {
        n = digit_sum(n);
    }
    n
}

fn digit_sum(mut n: u64) -> u64 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

/// True only for three-digit palindromes. Shorter or longer numbers are
/// rejected even when they read the same both ways.
pub fn is_palindrome(n: u64) -> bool {
    let s = n.to_string();
    if s.len() != 3 {
        return false;
    }
    let reversed: String = s.chars().rev().collect();
    s == reversed
}

/// Count the positive divisors of `n` by trial division up to its square root.
///
/// Zero is given no divisors, so `count_divisors(0)` is 0 and never prime.
pub fn count_divisors(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }

    let mut count = 0;
    let mut i = 1u64;
    while i * i <= n {
        if n % i == 0 {
            count += if i * i == n { 1 } else { 2 };
        }
        i += 1;
    }
    count
}

/// Trial-division primality test.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut i = 2u64;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}
