use serde::Serialize;

/// Qualitative bucket used to emphasise scores on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Top,
    Strong,
    Plausible,
    Weak,
    Discard,
}

impl Band {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Top,
            Self::Strong,
            Self::Plausible,
            Self::Weak,
            Self::Discard,
        ]
    }

    /// Only defined for computed scores; callers render "–" for incomplete candidates.
    pub const fn for_score(score: u8) -> Self {
        if score >= 8 {
            Self::Top
        } else if score >= 4 {
            Self::Strong
        } else if score >= 2 {
            Self::Plausible
        } else if score >= 1 {
            Self::Weak
        } else {
            Self::Discard
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Top => "Top",
            Self::Strong => "Strong",
            Self::Plausible => "Plausible",
            Self::Weak => "Weak",
            Self::Discard => "Discard",
        }
    }

    /// Lowest reachable score inside the band, used by the legend.
    pub const fn representative_score(self) -> u8 {
        match self {
            Self::Top => 8,
            Self::Strong => 4,
            Self::Plausible => 2,
            Self::Weak => 1,
            Self::Discard => 0,
        }
    }

    pub const fn tone(self) -> &'static str {
        match self {
            Self::Top => "emphasis",
            Self::Strong => "positive",
            Self::Plausible => "caution",
            Self::Weak => "muted",
            Self::Discard => "subdued",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_map_to_labels() {
        let cases = [
            (8, "Top"),
            (5, "Strong"),
            (4, "Strong"),
            (3, "Plausible"),
            (2, "Plausible"),
            (1, "Weak"),
            (0, "Discard"),
        ];
        for (score, label) in cases {
            assert_eq!(Band::for_score(score).label(), label, "score {score}");
        }
    }

    #[test]
    fn representative_scores_round_trip() {
        for band in Band::ordered() {
            assert_eq!(Band::for_score(band.representative_score()), band);
        }
    }
}
