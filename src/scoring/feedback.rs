use rand::{seq::SliceRandom, Rng};

const THREE_STARS: [&str; 4] = [
    "Amazing! You're a natural drummer!",
    "Perfect timing! That was brilliant!",
    "Wow! You absolutely nailed it!",
    "Incredible! Your rhythm is spot on!",
];

const TWO_STARS: [&str; 4] = [
    "Excellent work! You've got this beat down!",
    "Great job! Your timing is really improving!",
    "Brilliant! Keep up that steady rhythm!",
    "Well done! You're getting the hang of it!",
];

const ONE_STAR: [&str; 4] = [
    "Good effort! You're on the right track!",
    "Nice try! Practice makes perfect!",
    "You're getting there! Keep practising!",
    "Well done for having a go! Try it again!",
];

const NO_STARS: [&str; 4] = [
    "Give it another try! You can do this!",
    "Keep practising! You'll get it!",
    "Don't give up! Every drummer started here!",
    "Try again! Focus on keeping steady!",
];

/// Messages for a star tier. Anything above three uses the top tier.
pub fn pool(stars: u8) -> &'static [&'static str] {
    match stars {
        0 => &NO_STARS,
        1 => &ONE_STAR,
        2 => &TWO_STARS,
        _ => &THREE_STARS,
    }
}

/// Uniform pick from the tier's pool.
pub fn pick<R: Rng + ?Sized>(stars: u8, rng: &mut R) -> &'static str {
    pool(stars).choose(rng).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn every_tier_has_messages() {
        for stars in 0..=3 {
            assert!(!pool(stars).is_empty());
        }
        assert_eq!(pool(7), pool(3));
    }

    #[test]
    fn pick_stays_inside_its_tier() {
        let mut rng = StdRng::seed_from_u64(7);
        for stars in 0..=3 {
            for _ in 0..32 {
                assert!(pool(stars).contains(&pick(stars, &mut rng)));
            }
        }
    }

    #[test]
    fn pick_reaches_every_message() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 4];
        for _ in 0..400 {
            let message = pick(2, &mut rng);
            if let Some(index) = TWO_STARS.iter().position(|m| *m == message) {
                seen[index] = true;
            }
        }
        assert!(seen.iter().all(|s| *s));
    }
}
