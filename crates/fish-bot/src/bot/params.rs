use serde::Deserialize;

/// Tunables for move selection and automatic declaration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BotParams {
    /// Tier-one floor on `P[opponent][card]`.
    pub min_probability: f32,
    /// Tier-two floor inside the chosen group.
    pub min_suit_probability: f32,
    /// Public perception at or above which a card counts toward possible loss.
    pub loss_count_threshold: f32,
    pub risk_factor: f32,
    /// Slack around `1.0` when checking whether a team holds a whole group.
    pub certainty_tolerance: f32,
}

impl Default for BotParams {
    fn default() -> Self {
        Self {
            min_probability: 0.5,
            min_suit_probability: 0.0,
            loss_count_threshold: 0.9,
            risk_factor: 1.0,
            certainty_tolerance: 0.01,
        }
    }
}

impl BotParams {
    /// Applies `FISH_*` environment overrides on top of `self`. Unparsable or
    /// out-of-range values leave the current setting in place.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides<F>(self, mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut unit = |key: &str, current: f32| {
            read(key)
                .and_then(|raw| raw.trim().parse::<f32>().ok())
                .filter(|value| value.is_finite() && (0.0..=1.0).contains(value))
                .unwrap_or(current)
        };

        let min_probability = unit("FISH_MIN_PROBABILITY", self.min_probability);
        let min_suit_probability = unit("FISH_MIN_SUIT_PROBABILITY", self.min_suit_probability);
        let loss_count_threshold = unit("FISH_LOSS_THRESHOLD", self.loss_count_threshold);

        let risk_factor = read("FISH_RISK_FACTOR")
            .and_then(|raw| raw.trim().parse::<f32>().ok())
            .filter(|value| value.is_finite() && *value >= 0.0)
            .unwrap_or(self.risk_factor);

        Self {
            min_probability,
            min_suit_probability,
            loss_count_threshold,
            risk_factor,
            ..self
        }
    }
}
