use crate::errors::InvalidArgument;
use crate::models::Verification;
use crate::validator::normalize_dni;

/// Positional weights applied to the 10 digits of a prefix + DNI
/// concatenation.
pub const WEIGHTS: [u32; 10] = [5, 4, 3, 2, 7, 6, 5, 4, 3, 2];

/// Modulus of the checksum.
const FACTOR: u32 = 11;

/// Multiplies the digits of `prefix_code` followed by the normalized digits
/// of `dni` by the weight table, position by position.
///
/// The concatenation must come out to exactly 10 digits: a two-digit prefix
/// code and an 8-digit DNI (a 7-digit DNI is left-padded with one zero
/// first). Returns the 10 products in source-digit order.
pub fn weighted_digits(prefix_code: u32, dni: &str) -> Result<Vec<u32>, InvalidArgument> {
    if prefix_code == 0 {
        return Err(InvalidArgument::NonPositive("Prefix code"));
    }
    let prefix = prefix_code.to_string();
    if prefix.chars().count() != 2 {
        return Err(InvalidArgument::WrongDigitCount {
            what: "Prefix code",
            expected: 2,
            actual: prefix.chars().count(),
        });
    }

    let dni = normalize_dni(dni);
    if dni.is_empty() || !dni.chars().all(|c| c.is_ascii_digit()) {
        return Err(InvalidArgument::InvalidDni(dni));
    }
    let value: u64 = dni
        .parse()
        .map_err(|_| InvalidArgument::InvalidDni(dni.clone()))?;
    if value == 0 {
        return Err(InvalidArgument::NonPositive("DNI"));
    }
    if dni.chars().count() != 8 {
        return Err(InvalidArgument::WrongDigitCount {
            what: "DNI",
            expected: 8,
            actual: dni.chars().count(),
        });
    }

    // Both pieces were digit-checked above, so this yields exactly 10 digits.
    let products = prefix
        .chars()
        .chain(dni.chars())
        .filter_map(|c| c.to_digit(10))
        .zip(WEIGHTS.iter())
        .map(|(digit, weight)| digit * weight)
        .collect();

    Ok(products)
}

/// Sums the weighted products and reduces the sum modulo 11.
///
/// The remainder is computed with explicit floor division rather than the
/// `%` operator, matching the arithmetic the form has always used.
pub fn reduce_checksum(products: &[u32]) -> Result<u32, InvalidArgument> {
    if products.is_empty() {
        return Err(InvalidArgument::EmptyProducts);
    }
    let sum: u32 = products.iter().sum();
    if sum == 0 {
        return Err(InvalidArgument::NonPositive("Checksum sum"));
    }
    let div = sum / FACTOR;
    Ok(sum - div * FACTOR)
}

/// Derives the verification digit for a prefix code from the checksum
/// remainder.
///
/// Base digit is `11 - remainder`, with two overrides:
/// - remainder 0 yields digit 0;
/// - remainder 1 reassigns prefix 20 to 23 with digit 9, and prefix 27 to 23
///   with digit 4. Any other prefix keeps the base digit 10, two characters
///   wide. That oddity is deliberately not clamped here; the engine's
///   length filter is the only mitigation.
pub fn verification_digit(prefix_code: u32, remainder: u32) -> Verification {
    let mut digit = FACTOR - remainder;
    let mut prefix = prefix_code;
    if remainder == 0 {
        digit = 0;
    }
    if remainder == 1 {
        if prefix_code == 20 {
            digit = 9;
            prefix = 23;
        }
        if prefix_code == 27 {
            digit = 4;
            prefix = 23;
        }
    }
    Verification {
        prefix_code: prefix,
        digit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_reference_dni() {
        // 2012345678 against [5,4,3,2,7,6,5,4,3,2]
        let products = weighted_digits(20, "12345678").unwrap();
        assert_eq!(products, vec![10, 0, 3, 4, 21, 24, 25, 24, 21, 16]);
        assert_eq!(products.iter().sum::<u32>(), 148);
    }

    #[test]
    fn pads_seven_digit_dni_before_weighting() {
        let products = weighted_digits(20, "1234567").unwrap();
        // 2001234567
        assert_eq!(products, vec![10, 0, 0, 2, 14, 18, 20, 20, 18, 14]);
        assert_eq!(products.iter().sum::<u32>(), 116);
    }

    #[test]
    fn rejects_bad_weighting_input() {
        assert_eq!(
            weighted_digits(0, "12345678"),
            Err(InvalidArgument::NonPositive("Prefix code"))
        );
        assert_eq!(
            weighted_digits(5, "12345678"),
            Err(InvalidArgument::WrongDigitCount {
                what: "Prefix code",
                expected: 2,
                actual: 1,
            })
        );
        assert_eq!(
            weighted_digits(20, "00000000"),
            Err(InvalidArgument::NonPositive("DNI"))
        );
        assert_eq!(
            weighted_digits(20, "123456"),
            Err(InvalidArgument::WrongDigitCount {
                what: "DNI",
                expected: 8,
                actual: 6,
            })
        );
        assert!(matches!(
            weighted_digits(20, "abcdefgh"),
            Err(InvalidArgument::InvalidDni(_))
        ));
        assert!(matches!(
            weighted_digits(20, ""),
            Err(InvalidArgument::InvalidDni(_))
        ));
    }

    #[test]
    fn reduces_sum_modulo_eleven() {
        let products = weighted_digits(20, "12345678").unwrap();
        assert_eq!(reduce_checksum(&products), Ok(5));
        assert_eq!(reduce_checksum(&[11, 11]), Ok(0));
        assert_eq!(reduce_checksum(&[12]), Ok(1));
    }

    #[test]
    fn rejects_empty_or_zero_sum() {
        assert_eq!(reduce_checksum(&[]), Err(InvalidArgument::EmptyProducts));
        assert_eq!(
            reduce_checksum(&[0, 0, 0]),
            Err(InvalidArgument::NonPositive("Checksum sum"))
        );
    }

    #[test]
    fn base_verification_digit() {
        assert_eq!(
            verification_digit(20, 5),
            Verification {
                prefix_code: 20,
                digit: 6,
            }
        );
    }

    #[test]
    fn remainder_zero_yields_digit_zero() {
        assert_eq!(
            verification_digit(27, 0),
            Verification {
                prefix_code: 27,
                digit: 0,
            }
        );
    }

    #[test]
    fn remainder_one_reassigns_known_prefixes() {
        assert_eq!(
            verification_digit(20, 1),
            Verification {
                prefix_code: 23,
                digit: 9,
            }
        );
        assert_eq!(
            verification_digit(27, 1),
            Verification {
                prefix_code: 23,
                digit: 4,
            }
        );
    }

    #[test]
    fn remainder_one_leaves_other_prefixes_with_digit_ten() {
        assert_eq!(
            verification_digit(24, 1),
            Verification {
                prefix_code: 24,
                digit: 10,
            }
        );
        assert_eq!(
            verification_digit(30, 1),
            Verification {
                prefix_code: 30,
                digit: 10,
            }
        );
    }
}
