// The static sound catalog: every ambient layer flowtty knows about, with its
// display metadata and how many recorded takes exist on disk. Audio files are
// named "<key>_<variation>.wav" with a 1-based variation, e.g. "river_2.wav".

use serde::{Deserialize, Serialize};

/// One of the supported ambient sound categories.
///
/// Declaration order is catalog order; the picker lists types in exactly this
/// order. The serialized form is the lowercase key, which is also what saved
/// flows and audio file names use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundType {
    River,
    Rain,
    Insect,
    Wind,
    Fire,
    Birds,
}

/// Largest variation count across the catalog; sizes the engine's sound bank.
pub const MAX_VARIATIONS: usize = 3;

impl SoundType {
    pub const ALL: [SoundType; 6] = [
        SoundType::River,
        SoundType::Rain,
        SoundType::Insect,
        SoundType::Wind,
        SoundType::Fire,
        SoundType::Birds,
    ];

    pub fn icon(self) -> &'static str {
        match self {
            SoundType::River => "🌊",
            SoundType::Rain => "🌧",
            SoundType::Insect => "🦗",
            SoundType::Wind => "🌬",
            SoundType::Fire => "🔥",
            SoundType::Birds => "🐦",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SoundType::River => "River",
            SoundType::Rain => "Rain",
            SoundType::Insect => "Insects",
            SoundType::Wind => "Wind",
            SoundType::Fire => "Fire",
            SoundType::Birds => "Birds",
        }
    }

    // stable key, shared by the durable store and the asset file names
    pub fn key(self) -> &'static str {
        match self {
            SoundType::River => "river",
            SoundType::Rain => "rain",
            SoundType::Insect => "insect",
            SoundType::Wind => "wind",
            SoundType::Fire => "fire",
            SoundType::Birds => "birds",
        }
    }

    /// How many recorded takes exist for this type. Always at least 1.
    pub fn variation_count(self) -> u8 {
        // every type ships three takes right now; kept per-type so counts can
        // diverge later without touching callers
        match self {
            SoundType::River
            | SoundType::Rain
            | SoundType::Insect
            | SoundType::Wind
            | SoundType::Fire
            | SoundType::Birds => 3,
        }
    }

    /// Next take in the cycle: 1 -> 2 -> ... -> count -> 1.
    pub fn next_variation(self, variation: u8) -> u8 {
        if variation >= self.variation_count() {
            1
        } else {
            variation + 1
        }
    }

    /// File stem for a take, e.g. "fire_2".
    pub fn file_stem(self, variation: u8) -> String {
        format!("{}_{}", self.key(), variation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variation_cycle_wraps() {
        for sound in SoundType::ALL {
            let count = sound.variation_count();
            assert!(count >= 1);

            // walk a full cycle and then some; we must never leave [1, count]
            let mut v = 1;
            for _ in 0..(count as usize * 2) {
                v = sound.next_variation(v);
                assert!((1..=count).contains(&v));
            }
            assert_eq!(sound.next_variation(count), 1);
        }
    }

    #[test]
    fn keys_round_trip_through_serde() {
        for sound in SoundType::ALL {
            let json = serde_json::to_string(&sound).unwrap();
            assert_eq!(json, format!("\"{}\"", sound.key()));
            let back: SoundType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, sound);
        }
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(serde_json::from_str::<SoundType>("\"thunder\"").is_err());
    }

    #[test]
    fn file_stems_follow_the_naming_convention() {
        assert_eq!(SoundType::River.file_stem(1), "river_1");
        assert_eq!(SoundType::Birds.file_stem(3), "birds_3");
    }

    #[test]
    fn catalog_order_is_declaration_order() {
        assert_eq!(SoundType::ALL[0], SoundType::River);
        assert_eq!(SoundType::ALL[5], SoundType::Birds);
        assert_eq!(SoundType::ALL.len(), 6);
    }

    #[test]
    fn counts_fit_the_bank() {
        for sound in SoundType::ALL {
            assert!((sound.variation_count() as usize) <= MAX_VARIATIONS);
        }
    }
}
