use crate::{
    config::KeyBindings,
    error::{Error, Result},
    sequencing::Drum,
};

/// Keyboard characters bound to drums. Letters match either case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    bindings: Vec<(char, Drum)>,
}

impl Keymap {
    pub fn new(bindings: impl IntoIterator<Item = (char, Drum)>) -> Result<Self> {
        let mut keymap = Keymap {
            bindings: Vec::new(),
        };
        for (key, drum) in bindings {
            let key = normalize(key);
            if keymap.drum_for(key).is_some() {
                return Err(Error::Config(format!("key {key:?} is bound twice")));
            }
            keymap.bindings.push((key, drum));
        }
        Ok(keymap)
    }

    /// Build from configured strings; each must be exactly one character.
    pub fn from_bindings(keys: &KeyBindings) -> Result<Self> {
        Self::new([
            (single_char(&keys.kick, Drum::Kick)?, Drum::Kick),
            (single_char(&keys.snare, Drum::Snare)?, Drum::Snare),
            (single_char(&keys.hihat, Drum::HiHat)?, Drum::HiHat),
        ])
    }

    pub fn drum_for(&self, key: char) -> Option<Drum> {
        let key = normalize(key);
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == key)
            .map(|(_, drum)| *drum)
    }

    pub fn key_for(&self, drum: Drum) -> Option<char> {
        self.bindings
            .iter()
            .find(|(_, bound)| *bound == drum)
            .map(|(key, _)| *key)
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Keymap {
            bindings: vec![('f', Drum::Kick), ('j', Drum::Snare), (' ', Drum::HiHat)],
        }
    }
}

fn normalize(key: char) -> char {
    key.to_lowercase().next().unwrap_or(key)
}

fn single_char(binding: &str, drum: Drum) -> Result<char> {
    let mut chars = binding.chars();
    match (chars.next(), chars.next()) {
        (Some(key), None) => Ok(key),
        _ => Err(Error::Config(format!(
            "{drum} key must be a single character, got {binding:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_ignore_case() {
        let keymap = Keymap::default();

        assert_eq!(keymap.drum_for('f'), Some(Drum::Kick));
        assert_eq!(keymap.drum_for('F'), Some(Drum::Kick));
        assert_eq!(keymap.drum_for('J'), Some(Drum::Snare));
        assert_eq!(keymap.drum_for(' '), Some(Drum::HiHat));
        assert_eq!(keymap.drum_for('x'), None);
        assert_eq!(keymap.key_for(Drum::Snare), Some('j'));
    }

    #[test]
    fn configured_bindings_are_validated() {
        let keymap = Keymap::from_bindings(&KeyBindings::default()).unwrap();
        assert_eq!(keymap, Keymap::default());

        let bad = KeyBindings {
            kick: "ff".to_string(),
            ..KeyBindings::default()
        };
        assert!(matches!(Keymap::from_bindings(&bad), Err(Error::Config(_))));

        let dup = KeyBindings {
            snare: "F".to_string(),
            ..KeyBindings::default()
        };
        assert!(matches!(Keymap::from_bindings(&dup), Err(Error::Config(_))));
    }
}
