use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// ============ Domain Models ============

/// Legal-person category attached to a CUIL/CUIT prefix code.
///
/// Used only for display in the annotated suggestion format; the checksum
/// arithmetic never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersonCategory {
    /// Natural person ("persona física").
    Fisica,
    /// Juridical person ("persona jurídica").
    Juridica,
}

impl PersonCategory {
    /// Human-readable Spanish label for the category.
    pub fn label(&self) -> &'static str {
        match self {
            PersonCategory::Fisica => "persona física",
            PersonCategory::Juridica => "persona jurídica",
        }
    }
}

/// One of the fixed person-type prefix codes a CUIL/CUIT can start with.
///
/// Defined at process start and never created at runtime; the engine only
/// iterates over one of the two predefined sets below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixCode {
    /// The two-digit numeric code (e.g. 20, 27, 30).
    pub code: u32,
    /// Display category for the annotated output format.
    pub category: PersonCategory,
}

impl PrefixCode {
    /// Creates a prefix code constant.
    pub const fn new(code: u32, category: PersonCategory) -> Self {
        Self { code, category }
    }
}

/// Every known prefix code: natural-person variants first, then the
/// juridical-person variants. Iteration order is part of the output contract.
pub const FULL_PREFIX_SET: [PrefixCode; 9] = [
    PrefixCode::new(20, PersonCategory::Fisica),
    PrefixCode::new(23, PersonCategory::Fisica),
    PrefixCode::new(24, PersonCategory::Fisica),
    PrefixCode::new(25, PersonCategory::Fisica),
    PrefixCode::new(26, PersonCategory::Fisica),
    PrefixCode::new(27, PersonCategory::Fisica),
    PrefixCode::new(30, PersonCategory::Juridica),
    PrefixCode::new(33, PersonCategory::Juridica),
    PrefixCode::new(34, PersonCategory::Juridica),
];

/// Reduced prefix set used by the legacy deployment of the form.
pub const SIMPLE_PREFIX_SET: [PrefixCode; 5] = [
    PrefixCode::new(20, PersonCategory::Fisica),
    PrefixCode::new(23, PersonCategory::Fisica),
    PrefixCode::new(24, PersonCategory::Fisica),
    PrefixCode::new(27, PersonCategory::Fisica),
    PrefixCode::new(30, PersonCategory::Juridica),
];

/// Outcome of the verification-digit derivation for one (prefix, DNI) pair.
///
/// Carries the possibly reassigned prefix code: remainder 1 moves prefix 20
/// and 27 to 23. The digit is normally 0-9 but the remainder-1 edge case for
/// other prefixes yields 10, which downstream code must not clamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verification {
    /// Prefix code to assemble with (after any reassignment).
    pub prefix_code: u32,
    /// Derived verification digit.
    pub digit: u32,
}

// ============ API Models ============

/// JSON body for `POST /api/v1/cuil/suggestions`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SuggestionRequest {
    /// The DNI to derive CUIL/CUIT suggestions for.
    pub dni: String,
}

/// Query parameters for `GET /api/v1/cuil/suggestions`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SuggestionQueryParams {
    /// The DNI to derive CUIL/CUIT suggestions for.
    pub dni: Option<String>,
}

/// Response envelope for the suggestion endpoints.
///
/// An empty `suggestions` array is the "no valid suggestions" signal; the
/// caller renders a placeholder in that case.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SuggestionResponse {
    /// The DNI as received (trimmed).
    pub dni: String,
    /// Deduplicated suggestion strings, in generation order.
    pub suggestions: Vec<String>,
    /// Number of suggestions returned.
    pub count: usize,
    /// When this response was generated.
    pub generated_at: DateTime<Utc>,
}
