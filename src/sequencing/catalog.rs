//! Read-only pattern catalog addressable by string id.

use std::sync::OnceLock;

use super::{Difficulty, Drum, Pattern, PatternDef, PatternStep, Subdivision};
use crate::error::{Error, PatternError, Result};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    patterns: Vec<Pattern>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(patterns: Vec<Pattern>) -> std::result::Result<Self, PatternError> {
        for (index, pattern) in patterns.iter().enumerate() {
            if patterns[..index].iter().any(|p| p.id() == pattern.id()) {
                return Err(PatternError::DuplicateId(pattern.id().to_string()));
            }
        }
        Ok(Self { patterns })
    }

    /// The built-in patterns, constructed once per process.
    pub fn builtin() -> &'static Catalog {
        static BUILTIN: OnceLock<Catalog> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let patterns = builtin_defs()
                .into_iter()
                .filter_map(|def| match Pattern::new(def) {
                    Ok(pattern) => Some(pattern),
                    Err(err) => {
                        log::error!("skipping built-in pattern: {err}");
                        None
                    }
                })
                .collect();
            Catalog { patterns }
        })
    }

    /// Parse a TOML document of `[[pattern]]` tables. Every pattern is
    /// validated; the first invalid one fails the whole load.
    #[cfg(feature = "serde")]
    pub fn from_toml_str(source: &str) -> Result<Self> {
        #[derive(serde::Deserialize)]
        struct CatalogFile {
            #[serde(rename = "pattern", default)]
            patterns: Vec<Pattern>,
        }

        let file: CatalogFile =
            toml::from_str(source).map_err(|err| Error::Config(err.to_string()))?;
        Ok(Self::new(file.patterns)?)
    }

    pub fn get(&self, id: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.id() == id)
    }

    /// Steps of the pattern with this id.
    pub fn steps_for(&self, id: &str) -> Option<&[PatternStep]> {
        self.get(id).map(Pattern::steps)
    }

    /// Like [`get`](Self::get), but an absent pattern is an error. Use this
    /// at session startup, where a missing pattern is fatal.
    pub fn require(&self, id: &str) -> Result<&Pattern> {
        self.get(id)
            .ok_or_else(|| Error::UnknownPattern(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn builtin_defs() -> Vec<PatternDef> {
    use Difficulty::*;
    use Drum::*;
    use Subdivision::Eighth;

    const REST: &[Drum] = &[];
    const HAT: &[Drum] = &[HiHat];

    vec![
        // Level 1 progression
        PatternDef::from_grid(
            "l1-counting",
            "Counting 1 2 3 4",
            Easy,
            "Just tap along with the beat. Feel the steady pulse!",
            50,
            Eighth,
            &[&[HiHat], REST, &[HiHat], REST, &[HiHat], REST, &[HiHat], REST],
        ),
        PatternDef::from_grid(
            "l1-hihat-quarters",
            "Hi Hat on Every Beat",
            Easy,
            "Play the hi hat four times - 1, 2, 3, 4. Keep it steady!",
            55,
            Eighth,
            &[&[HiHat], REST, &[HiHat], REST, &[HiHat], REST, &[HiHat], REST],
        ),
        PatternDef::from_grid(
            "l1-snare-quarters",
            "Snare on Every Beat",
            Easy,
            "Now try the snare. Hit it four times - 1, 2, 3, 4.",
            55,
            Eighth,
            &[&[Snare], REST, &[Snare], REST, &[Snare], REST, &[Snare], REST],
        ),
        PatternDef::from_grid(
            "l1-kick-quarters",
            "Kick on Every Beat",
            Easy,
            "Time for your foot! Kick drum on 1, 2, 3, 4.",
            55,
            Eighth,
            &[&[Kick], REST, &[Kick], REST, &[Kick], REST, &[Kick], REST],
        ),
        PatternDef::from_grid(
            "l1-backbeat-intro",
            "Hi Hat Steady, Snare on 3",
            Easy,
            "Hi hat goes 1, 2, 3, 4. Snare only on beat 3. This is the backbeat!",
            60,
            Eighth,
            &[&[HiHat], REST, &[HiHat], REST, &[HiHat, Snare], REST, &[HiHat], REST],
        ),
        PatternDef::from_grid(
            "l1-downbeat-intro",
            "Hi Hat Steady, Kick on 1",
            Easy,
            "Hi hat on 1, 2, 3, 4. Kick only on beat 1. Feel that downbeat!",
            60,
            Eighth,
            &[&[HiHat, Kick], REST, &[HiHat], REST, &[HiHat], REST, &[HiHat], REST],
        ),
        PatternDef::from_grid(
            "l1-first-groove",
            "First Groove: Kick 1, Snare 3",
            Easy,
            "Your first full groove! Hi hat steady, kick on 1, snare on 3.",
            60,
            Eighth,
            &[&[HiHat, Kick], REST, &[HiHat], REST, &[HiHat, Snare], REST, &[HiHat], REST],
        ),
        PatternDef::from_grid(
            "l1-groove-variation",
            "Groove Variation: Kick 1 and 3",
            Easy,
            "Same as before, but now kick on beat 1 AND beat 3 with the snare.",
            65,
            Eighth,
            &[
                &[HiHat, Kick],
                REST,
                &[HiHat],
                REST,
                &[HiHat, Kick, Snare],
                REST,
                &[HiHat],
                REST,
            ],
        ),
        PatternDef::from_grid(
            "l1-hihat-eighths",
            "Introducing the \"And\": Hi Hat Eighth Notes",
            Easy,
            "Now the hi hat plays twice as fast: 1 and 2 and 3 and 4 and!",
            60,
            Eighth,
            &[HAT; 8],
        ),
        PatternDef::from_grid(
            "l1-and-kick-groove",
            "First Groove with an \"And\" Kick",
            Easy,
            "Hi hat eighth notes, kick on 1 and the 'and' of 3, snare on 3. A real rock beat!",
            70,
            Eighth,
            &[
                &[HiHat, Kick],
                &[HiHat],
                &[HiHat],
                &[HiHat],
                &[HiHat, Snare],
                &[HiHat, Kick],
                &[HiHat],
                &[HiHat],
            ],
        ),
        // Standalone grooves
        PatternDef::from_grid(
            "boots-and-cats",
            "Boots and Cats Rock Beat",
            Easy,
            "The classic rock beat you hear in loads of songs. Say 'boots' on the kick and 'cats' on the snare!",
            80,
            Eighth,
            &[
                &[Kick, HiHat],
                &[HiHat],
                &[Snare, HiHat],
                &[HiHat],
                &[Kick, HiHat],
                &[HiHat],
                &[Snare, HiHat],
                &[HiHat],
            ],
        ),
        PatternDef::from_grid(
            "simple-quarters",
            "Quarter Note Groove",
            Easy,
            "Hi hats on the main beats only, perfect for getting the feel.",
            70,
            Eighth,
            &[
                &[Kick, HiHat],
                REST,
                &[Snare, HiHat],
                REST,
                &[Kick, HiHat],
                REST,
                &[Snare, HiHat],
                REST,
            ],
        ),
        PatternDef::from_grid(
            "busy-rock",
            "Busy Rock Beat",
            Medium,
            "Boots and Cats with an extra kick before beat 3 for a bit of drive!",
            85,
            Eighth,
            &[
                &[Kick, HiHat],
                &[HiHat],
                &[Snare, HiHat],
                &[HiHat],
                &[Kick, HiHat],
                &[Kick, HiHat],
                &[Snare, HiHat],
                &[HiHat],
            ],
        ),
    ]
}
