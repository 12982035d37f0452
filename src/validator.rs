/// DNI validation and normalization.
///
/// A DNI reaches this module as whatever string a form field held. Validation
/// is a pure boolean check: trim, digits only, digit count inside the
/// configured window, value strictly positive. Nothing here logs or fails;
/// diagnostics belong to the engine that calls it.

/// Accepted digit-count window for a DNI.
///
/// The two historical deployments of the form disagree on the minimum: one
/// accepts 7 or 8 digits, the other exactly 8. Both are expressed through
/// this policy instead of a code fork.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DniPolicy {
    /// Minimum accepted number of digits.
    pub min_digits: usize,
    /// Maximum accepted number of digits.
    pub max_digits: usize,
}

impl Default for DniPolicy {
    fn default() -> Self {
        Self {
            min_digits: 7,
            max_digits: 8,
        }
    }
}

impl DniPolicy {
    /// Policy of the legacy deployment: exactly 8 digits.
    pub const fn strict_eight() -> Self {
        Self {
            min_digits: 8,
            max_digits: 8,
        }
    }
}

/// Checks whether `value` is an acceptable DNI under `policy`.
///
/// Rejects empty strings, anything containing a non-digit character, digit
/// counts outside the policy window, and the all-zeros value. Leading zeros
/// are allowed and count toward the digit count.
pub fn is_valid_dni(value: &str, policy: &DniPolicy) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let digit_count = trimmed.chars().count();
    if digit_count < policy.min_digits || digit_count > policy.max_digits {
        return false;
    }
    match trimmed.parse::<u64>() {
        Ok(value) => value > 0,
        Err(_) => false,
    }
}

/// Normalizes a DNI to its 8-digit form.
///
/// Trims whitespace and left-pads a single `0` when the value has exactly 7
/// digits. Any other input is returned trimmed but otherwise untouched.
pub fn normalize_dni(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.chars().count() == 7 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        format!("0{}", trimmed)
    } else {
        trimmed.to_string()
    }
}
