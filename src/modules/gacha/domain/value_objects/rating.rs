use serde::Serialize;

use super::variables::LOWEST_POPULARITY;
use crate::modules::catalog::domain::value_objects::CharacterRole;

/// Fewest stars a pull may award
pub const MIN_STARS: u8 = 1;

/// Star tier of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rating {
    pub stars: u8,
}

impl Rating {
    pub fn new(stars: u8) -> Self {
        Self { stars }
    }

    pub fn meets_minimum(&self) -> bool {
        self.stars >= MIN_STARS
    }
}

/// Maps popularity and role to a star tier
pub trait RatingCalculator: Send + Sync {
    fn rate(&self, popularity: u32, role: Option<CharacterRole>) -> Rating;
}

/// Standard tiers: popularity bands, raised for main roles
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRating;

impl RatingCalculator for StandardRating {
    fn rate(&self, popularity: u32, role: Option<CharacterRole>) -> Rating {
        let main = role == Some(CharacterRole::Main);

        let stars = if popularity < LOWEST_POPULARITY {
            0
        } else if role == Some(CharacterRole::Background) || popularity < 50_000 {
            1
        } else if popularity < 200_000 {
            if main {
                3
            } else {
                2
            }
        } else if popularity < 400_000 {
            if main {
                4
            } else {
                3
            }
        } else {
            match role {
                Some(CharacterRole::Main) => 5,
                Some(CharacterRole::Supporting) => 4,
                _ => 3,
            }
        };

        Rating::new(stars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        let rating = StandardRating;

        assert_eq!(rating.rate(999, Some(CharacterRole::Main)).stars, 0);
        assert_eq!(rating.rate(1000, Some(CharacterRole::Main)).stars, 1);
        assert_eq!(rating.rate(49_999, Some(CharacterRole::Main)).stars, 1);
        assert_eq!(rating.rate(50_000, Some(CharacterRole::Main)).stars, 3);
        assert_eq!(rating.rate(50_000, Some(CharacterRole::Supporting)).stars, 2);
        assert_eq!(rating.rate(200_000, Some(CharacterRole::Main)).stars, 4);
        assert_eq!(rating.rate(200_000, None).stars, 3);
        assert_eq!(rating.rate(400_000, Some(CharacterRole::Main)).stars, 5);
        assert_eq!(rating.rate(400_000, Some(CharacterRole::Supporting)).stars, 4);
        assert_eq!(rating.rate(400_000, None).stars, 3);
    }

    #[test]
    fn test_background_is_always_one_star() {
        let rating = StandardRating.rate(1_000_000, Some(CharacterRole::Background));
        assert_eq!(rating.stars, 1);
        assert!(rating.meets_minimum());
        assert!(!Rating::new(0).meets_minimum());
    }
}
