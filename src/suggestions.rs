/// Suggestion engine: drives the checksum pipeline across the configured
/// prefix codes and produces the deduplicated list the form renders.
///
/// The engine owns the fail-soft contract: whatever goes wrong inside the
/// pipeline (invalid DNI, arithmetic precondition violation), the caller
/// gets an empty list and a diagnostic on the error channel, never an error
/// value.
use crate::checksum::{reduce_checksum, verification_digit, weighted_digits};
use crate::errors::InvalidArgument;
use crate::models::{PrefixCode, FULL_PREFIX_SET, SIMPLE_PREFIX_SET};
use crate::validator::{is_valid_dni, normalize_dni, DniPolicy};
use std::collections::HashSet;

/// Builds the final identifier string: prefix code, DNI, verification digit,
/// no separators.
///
/// Padding the DNI to 8 digits is variant-dependent; the legacy deployment
/// assembles the DNI exactly as entered. No validation happens here.
pub fn assemble_identifier(prefix_code: u32, dni: &str, digit: u32, pad_dni_to_8: bool) -> String {
    let dni = if pad_dni_to_8 {
        normalize_dni(dni)
    } else {
        dni.trim().to_string()
    };
    format!("{}{}{}", prefix_code, dni, digit)
}

/// Knobs that distinguish the two deployed behaviors of the form.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Accepted DNI digit-count window.
    pub dni_policy: DniPolicy,
    /// Prefix codes to try, in output order.
    pub prefixes: Vec<PrefixCode>,
    /// Left-pad 7-digit DNIs to 8 before assembly.
    pub pad_dni_to_8: bool,
    /// Suffix each identifier with its uppercased category label.
    pub include_category_label: bool,
    /// Discard identifiers longer than this many characters, if set.
    pub max_identifier_len: Option<usize>,
}

impl Default for EngineConfig {
    /// The richer deployment: 7-8 digit DNIs, all nine prefixes, padded
    /// assembly, labeled output capped at 11 characters.
    fn default() -> Self {
        Self {
            dni_policy: DniPolicy::default(),
            prefixes: FULL_PREFIX_SET.to_vec(),
            pad_dni_to_8: true,
            include_category_label: true,
            max_identifier_len: Some(11),
        }
    }
}

impl EngineConfig {
    /// The legacy deployment: exactly 8 digits, five prefixes, bare
    /// identifiers, no padding, no length cap.
    pub fn simple() -> Self {
        Self {
            dni_policy: DniPolicy::strict_eight(),
            prefixes: SIMPLE_PREFIX_SET.to_vec(),
            pad_dni_to_8: false,
            include_category_label: false,
            max_identifier_len: None,
        }
    }
}

/// Stateless generator of CUIL/CUIT suggestions for a DNI.
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    config: EngineConfig,
}

impl SuggestionEngine {
    /// Creates an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Generates every suggestion for `dni` that passes the checksum
    /// pipeline.
    ///
    /// Fail-soft boundary: any internal failure is logged and collapsed to
    /// an empty list. Deterministic for a given input and configuration.
    pub fn generate(&self, dni: &str) -> Vec<String> {
        match self.try_generate(dni) {
            Ok(suggestions) => suggestions,
            Err(e) => {
                tracing::error!("Suggestion generation failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Internal fallible pipeline; errors collapse to an empty list in
    /// [`generate`](Self::generate).
    fn try_generate(&self, dni: &str) -> Result<Vec<String>, InvalidArgument> {
        let dni = dni.trim();
        if !is_valid_dni(dni, &self.config.dni_policy) {
            return Err(InvalidArgument::InvalidDni(dni.to_string()));
        }

        let mut results = Vec::with_capacity(self.config.prefixes.len());
        // A failure for any prefix discards the whole batch, matching the
        // single catch the form has always wrapped this loop in.
        for prefix in &self.config.prefixes {
            let identifier = self.generate_one(prefix.code, dni)?;
            if let Some(max_len) = self.config.max_identifier_len {
                if identifier.chars().count() > max_len {
                    tracing::warn!(
                        "Discarding over-length identifier {} for prefix {}",
                        identifier,
                        prefix.code
                    );
                    continue;
                }
            }
            if self.config.include_category_label {
                results.push(format!(
                    "{} - {}",
                    identifier,
                    prefix.category.label().to_uppercase()
                ));
            } else {
                results.push(identifier);
            }
        }

        Ok(dedup_preserving_order(results))
    }

    /// Runs one (prefix, DNI) pair through weighting, reduction,
    /// verification, and assembly.
    fn generate_one(&self, prefix_code: u32, dni: &str) -> Result<String, InvalidArgument> {
        let products = weighted_digits(prefix_code, dni)?;
        let remainder = reduce_checksum(&products)?;
        let verification = verification_digit(prefix_code, remainder);
        Ok(assemble_identifier(
            verification.prefix_code,
            dni,
            verification.digit,
            self.config.pad_dni_to_8,
        ))
    }
}

/// Set-semantics dedup that keeps the first occurrence of each element.
fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
