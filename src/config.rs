use crate::suggestions::EngineConfig;
use serde::Deserialize;

/// Which of the two deployed form behaviors the engine reproduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum SuggestionVariant {
    /// Nine prefixes, 7-8 digit DNIs, padded assembly, labeled output,
    /// 11-character cap.
    Full,
    /// Five prefixes, exactly 8 digits, bare identifiers, no cap.
    Simple,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub variant: SuggestionVariant,
    pub min_dni_digits: Option<usize>,
    pub max_dni_digits: Option<usize>,
    pub cache_ttl_secs: u64,
    pub cache_capacity: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            variant: match std::env::var("CUIL_VARIANT")
                .unwrap_or_else(|_| "full".to_string())
                .trim()
                .to_ascii_lowercase()
                .as_str()
            {
                "full" => SuggestionVariant::Full,
                "simple" => SuggestionVariant::Simple,
                other => {
                    anyhow::bail!("CUIL_VARIANT must be 'full' or 'simple', got '{}'", other)
                }
            },
            min_dni_digits: std::env::var("CUIL_MIN_DNI_DIGITS")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|s| {
                    s.parse::<usize>().map_err(|_| {
                        anyhow::anyhow!("CUIL_MIN_DNI_DIGITS must be a positive number")
                    })
                })
                .transpose()?,
            max_dni_digits: std::env::var("CUIL_MAX_DNI_DIGITS")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|s| {
                    s.parse::<usize>().map_err(|_| {
                        anyhow::anyhow!("CUIL_MAX_DNI_DIGITS must be a positive number")
                    })
                })
                .transpose()?,
            cache_ttl_secs: std::env::var("SUGGESTION_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("SUGGESTION_CACHE_TTL_SECS must be a number"))?,
            cache_capacity: std::env::var("SUGGESTION_CACHE_CAPACITY")
                .unwrap_or_else(|_| "100000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("SUGGESTION_CACHE_CAPACITY must be a number"))?,
        };

        if let (Some(min), Some(max)) = (config.min_dni_digits, config.max_dni_digits) {
            if min == 0 || min > max {
                anyhow::bail!(
                    "CUIL_MIN_DNI_DIGITS must be between 1 and CUIL_MAX_DNI_DIGITS (got {}-{})",
                    min,
                    max
                );
            }
        }

        // Log successful configuration load
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Server Port: {}", config.port);
        tracing::debug!("Suggestion variant: {:?}", config.variant);
        if let Some(min) = config.min_dni_digits {
            tracing::info!("DNI minimum digit override: {}", min);
        }
        if let Some(max) = config.max_dni_digits {
            tracing::info!("DNI maximum digit override: {}", max);
        }
        tracing::debug!(
            "Suggestion cache: {}s TTL, {} max entries",
            config.cache_ttl_secs,
            config.cache_capacity
        );

        Ok(config)
    }

    /// Resolves the configured variant (plus any digit-window overrides)
    /// into an engine configuration.
    pub fn engine_config(&self) -> EngineConfig {
        let mut engine_config = match self.variant {
            SuggestionVariant::Full => EngineConfig::default(),
            SuggestionVariant::Simple => EngineConfig::simple(),
        };
        if let Some(min) = self.min_dni_digits {
            engine_config.dni_policy.min_digits = min;
        }
        if let Some(max) = self.max_dni_digits {
            engine_config.dni_policy.max_digits = max;
        }
        engine_config
    }
}
