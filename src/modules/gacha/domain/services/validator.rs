//! Candidate checks of a draw
//!
//! A candidate is checked twice: once as fetched, and again after its primary
//! media edge is resolved, when the edge role and node popularity are known.

use crate::modules::catalog::domain::entities::{AggregatedCharacter, DisaggregatedCharacter};
use crate::modules::catalog::domain::value_objects::CharacterRole;
use crate::modules::gacha::domain::value_objects::{
    PopularityRange, RatingCalculator, LOWEST_POPULARITY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullValidator {
    Range {
        range: PopularityRange,
        role: Option<CharacterRole>,
    },
    Guaranteed {
        stars: u8,
    },
}

impl PullValidator {
    pub fn accepts_disaggregated(
        &self,
        character: &DisaggregatedCharacter,
        rating: &dyn RatingCalculator,
    ) -> bool {
        let popularity = character.info.popularity;

        match *self {
            PullValidator::Range { range, role } => {
                if popularity.is_some_and(|popularity| !range.contains(popularity)) {
                    return false;
                }

                match role {
                    Some(role) => character.primary_role() == Some(role),
                    None => true,
                }
            }
            PullValidator::Guaranteed { stars } => popularity.map_or(true, |popularity| {
                rating.rate(popularity, character.primary_role()).stars == stars
            }),
        }
    }

    pub fn accepts_aggregated(&self, character: &AggregatedCharacter, rating: &dyn RatingCalculator) -> bool {
        let Some(edge) = character.primary_edge() else {
            return match *self {
                PullValidator::Range { range, .. } => character
                    .info
                    .popularity
                    .map_or(true, |popularity| range.contains(popularity)),
                PullValidator::Guaranteed { stars } => character
                    .info
                    .popularity
                    .map_or(true, |popularity| rating.rate(popularity, None).stars == stars),
            };
        };

        let popularity = effective_popularity(character);

        match *self {
            PullValidator::Range { range, role } => {
                if character
                    .info
                    .popularity
                    .is_some_and(|popularity| !range.contains(popularity))
                {
                    return false;
                }

                range.contains(popularity) && role.map_or(true, |role| edge.role == role)
            }
            PullValidator::Guaranteed { stars } => {
                rating.rate(popularity, Some(edge.role)).stars == stars
            }
        }
    }
}

/// Character popularity, else the primary media's, else the floor
pub fn effective_popularity(character: &AggregatedCharacter) -> u32 {
    let own = character.info.popularity.filter(|popularity| *popularity > 0);

    let media = character
        .primary_edge()
        .and_then(|edge| edge.node.info.popularity)
        .filter(|popularity| *popularity > 0);

    own.or(media).unwrap_or(LOWEST_POPULARITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::domain::entities::{
        Alias, CharacterMediaRef, Connection, DisaggregatedMedia, MediaRoleEdge,
    };
    use crate::modules::gacha::domain::value_objects::StandardRating;

    fn disaggregated(popularity: Option<u32>, role: Option<CharacterRole>) -> DisaggregatedCharacter {
        let mut character = DisaggregatedCharacter::new("1", Alias::english("name"));
        character.info.popularity = popularity;
        if let Some(role) = role {
            character.media.push(CharacterMediaRef {
                role,
                media_id: "anilist:1".to_string(),
            });
        }
        character
    }

    fn aggregated(
        popularity: Option<u32>,
        role: CharacterRole,
        media_popularity: Option<u32>,
    ) -> AggregatedCharacter {
        let mut node = DisaggregatedMedia::new("1", Alias::english("media"));
        node.info.popularity = media_popularity;

        AggregatedCharacter {
            info: disaggregated(popularity, None).info,
            media: Connection::from(vec![MediaRoleEdge { role, node }]),
        }
    }

    fn range(lower: u32, upper: Option<u32>, role: Option<CharacterRole>) -> PullValidator {
        PullValidator::Range {
            range: PopularityRange::new(lower, upper),
            role,
        }
    }

    #[test]
    fn test_range_popularity_check() {
        let validator = range(50_000, Some(100_000), None);

        assert!(validator.accepts_disaggregated(&disaggregated(Some(75_000), None), &StandardRating));
        assert!(!validator.accepts_disaggregated(&disaggregated(Some(100_001), None), &StandardRating));
        assert!(validator.accepts_disaggregated(&disaggregated(None, None), &StandardRating));
    }

    #[test]
    fn test_range_role_needs_matching_primary_media() {
        let validator = range(50_000, Some(100_000), Some(CharacterRole::Main));

        assert!(validator.accepts_disaggregated(
            &disaggregated(Some(60_000), Some(CharacterRole::Main)),
            &StandardRating
        ));
        assert!(!validator.accepts_disaggregated(
            &disaggregated(Some(60_000), Some(CharacterRole::Supporting)),
            &StandardRating
        ));
        assert!(!validator.accepts_disaggregated(&disaggregated(Some(60_000), None), &StandardRating));
    }

    #[test]
    fn test_aggregated_falls_back_to_media_popularity() {
        let validator = range(50_000, Some(100_000), Some(CharacterRole::Supporting));

        assert!(validator.accepts_aggregated(
            &aggregated(None, CharacterRole::Supporting, Some(80_000)),
            &StandardRating
        ));
        assert!(!validator.accepts_aggregated(
            &aggregated(None, CharacterRole::Supporting, None),
            &StandardRating
        ));
        assert!(!validator.accepts_aggregated(
            &aggregated(None, CharacterRole::Main, Some(80_000)),
            &StandardRating
        ));
    }

    #[test]
    fn test_lowest_range_accepts_floor() {
        let validator = range(LOWEST_POPULARITY, Some(50_000), None);

        assert!(validator.accepts_aggregated(
            &aggregated(None, CharacterRole::Background, None),
            &StandardRating
        ));
    }

    #[test]
    fn test_guaranteed_uses_edge_role() {
        let validator = PullValidator::Guaranteed { stars: 5 };

        assert!(validator.accepts_aggregated(
            &aggregated(Some(500_000), CharacterRole::Main, None),
            &StandardRating
        ));
        assert!(!validator.accepts_aggregated(
            &aggregated(Some(500_000), CharacterRole::Supporting, None),
            &StandardRating
        ));
    }

    #[test]
    fn test_guaranteed_disaggregated_uses_primary_role() {
        let validator = PullValidator::Guaranteed { stars: 4 };

        assert!(validator.accepts_disaggregated(
            &disaggregated(Some(250_000), Some(CharacterRole::Main)),
            &StandardRating
        ));
        assert!(!validator.accepts_disaggregated(
            &disaggregated(Some(10_000), Some(CharacterRole::Main)),
            &StandardRating
        ));
    }

    #[test]
    fn test_effective_popularity_ignores_zero() {
        assert_eq!(
            effective_popularity(&aggregated(Some(0), CharacterRole::Main, Some(70_000))),
            70_000
        );
        assert_eq!(
            effective_popularity(&aggregated(None, CharacterRole::Main, None)),
            LOWEST_POPULARITY
        );
    }
}
