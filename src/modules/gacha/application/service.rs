//! Gacha draws
//!
//! A draw picks a pool and a validator, then samples the pool without
//! replacement until a candidate survives every check and, for a user, is
//! committed by the inventory backend.

use std::sync::Arc;

use crate::modules::catalog::domain::entities::{CharacterRecord, MediaRecord};
use crate::modules::catalog::{AggregateOptions, Aggregator};
use crate::modules::gacha::domain::{
    repositories::{AddCharacterRequest, Inventory, InventoryBackend, MutationResponse, PoolSource},
    services::effective_popularity,
    value_objects::{GachaVariables, RatingCalculator, StandardRating},
    PoolEntry, PoolFilter, Pull, PullError, PullRequest, PullResult, PullValidator,
};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{logger::LogContext, RandomSource, StdRandom, TimedOperation};

pub struct GachaService {
    aggregator: Arc<Aggregator>,
    pool_source: Arc<dyn PoolSource>,
    inventory: Option<Arc<dyn InventoryBackend>>,
    random: Arc<dyn RandomSource>,
    rating: Arc<dyn RatingCalculator>,
    variables: GachaVariables,
    enabled: bool,
}

impl GachaService {
    pub fn new(aggregator: Arc<Aggregator>, pool_source: Arc<dyn PoolSource>) -> Self {
        Self {
            aggregator,
            pool_source,
            inventory: None,
            random: Arc::new(StdRandom::new()),
            rating: Arc::new(StandardRating),
            variables: GachaVariables::default(),
            enabled: true,
        }
    }

    pub fn with_inventory(mut self, inventory: Arc<dyn InventoryBackend>) -> Self {
        self.inventory = Some(inventory);
        self
    }

    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    pub fn with_rating(mut self, rating: Arc<dyn RatingCalculator>) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_variables(mut self, variables: GachaVariables) -> Self {
        self.variables = variables;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn rating(&self) -> &Arc<dyn RatingCalculator> {
        &self.rating
    }

    /// Pool of one drawn rarity range, and of one drawn role above the lowest range
    pub async fn range_pool(&self, guild_id: &str) -> AppResult<(Vec<PoolEntry>, PullValidator)> {
        let range = self
            .variables
            .ranges
            .draw(self.random.as_ref())
            .ok_or_else(|| AppError::ConfigError("Range table is empty".to_string()))?;

        let role = if range.excludes_lowest() {
            self.variables.roles.draw(self.random.as_ref())
        } else {
            None
        };

        log::debug!("Gacha: Drew range {:?} with role {:?}", range, role);

        let pool = self
            .pool_source
            .pool(&PoolFilter::range(range, role), guild_id)
            .await?;

        Ok((pool, PullValidator::Range { range, role }))
    }

    /// Pool of one star tier
    pub async fn guaranteed_pool(&self, guild_id: &str, stars: u8) -> AppResult<(Vec<PoolEntry>, PullValidator)> {
        let pool = self.pool_source.pool(&PoolFilter::stars(stars), guild_id).await?;

        Ok((pool, PullValidator::Guaranteed { stars }))
    }

    pub async fn rng_pull(&self, request: PullRequest) -> PullResult<Pull> {
        let timer = TimedOperation::new(format!("Gacha pull in {}", request.guild_id));

        let result = self.draw(request).await;

        let outcome = match &result {
            Ok(pull) => format!("{} stars", pull.rating.stars),
            Err(error) => error.to_string(),
        };
        timer.finish(&outcome);

        result
    }

    async fn draw(&self, request: PullRequest) -> PullResult<Pull> {
        if !self.enabled {
            return Err(PullError::Maintenance);
        }

        let guild_id = request.guild_id.as_str();

        let (mut pool, validator) = match request.guarantee {
            Some(stars) => self.guaranteed_pool(guild_id, stars).await?,
            None => self.range_pool(guild_id).await?,
        };

        log::debug!("Gacha: [{}] pool of {} candidates", guild_id, pool.len());

        let resolver = self.aggregator.resolver();
        let conflicts = resolver.conflicts();
        let rating = self.rating.as_ref();
        let options = AggregateOptions::for_guild(Some(guild_id));

        while !pool.is_empty() {
            let index = self.random.below(pool.len());
            let candidate_id = pool.remove(index).id;
            let candidate_name = candidate_id.to_string();

            if conflicts.is_disabled(&candidate_id, Some(guild_id)) {
                LogContext::pull_operation(guild_id, &candidate_name, "disabled");
                continue;
            }

            let Some(character) = resolver
                .resolve_characters(vec![candidate_id], Some(guild_id))
                .await?
                .into_iter()
                .next()
            else {
                LogContext::pull_operation(guild_id, &candidate_name, "unresolved");
                continue;
            };

            if !validator.accepts_disaggregated(&character, rating) {
                LogContext::pull_operation(guild_id, &candidate_name, "rejected");
                continue;
            }

            // disabled media never make it into the edges
            let character = self
                .aggregator
                .character(CharacterRecord::from(character), &options.clone().with_end(1))
                .await?;

            let Some(edge) = character.primary_edge() else {
                LogContext::pull_operation(guild_id, &candidate_name, "no media");
                continue;
            };

            if !validator.accepts_aggregated(&character, rating) {
                LogContext::pull_operation(guild_id, &candidate_name, "rejected after aggregation");
                continue;
            }

            let media_id = match edge.node.info.composite_id() {
                Some(id) if !conflicts.is_disabled(&id, Some(guild_id)) => id,
                _ => {
                    LogContext::pull_operation(guild_id, &candidate_name, "media disabled");
                    continue;
                }
            };

            let stars = rating.rate(effective_popularity(&character), Some(edge.role));

            if !stars.meets_minimum() {
                LogContext::pull_operation(guild_id, &candidate_name, "below minimum rating");
                continue;
            }

            let mut inventory = None;

            if let Some(user_id) = &request.user_id {
                let commit = AddCharacterRequest {
                    user_id: user_id.clone(),
                    guild_id: guild_id.to_string(),
                    character_id: candidate_name.clone(),
                    media_id: media_id.to_string(),
                    guaranteed: request.guarantee.is_some(),
                    rating: stars.stars,
                    extra: request.extra.clone(),
                    mutation: request.mutation.clone(),
                };

                match self.commit(&commit).await? {
                    Some(committed) => inventory = Some(committed),
                    None => {
                        LogContext::pull_operation(guild_id, &candidate_name, "already owned");
                        continue;
                    }
                }
            }

            LogContext::pull_operation(guild_id, &candidate_name, "pulled");

            let media = self
                .aggregator
                .media(MediaRecord::from(edge.node.clone()), &options)
                .await?;

            return Ok(Pull {
                character,
                media,
                rating: stars,
                remaining: inventory.as_ref().and_then(|inventory| inventory.available_pulls),
                guarantees: inventory
                    .and_then(|inventory| inventory.user)
                    .map(|user| user.guarantees),
            });
        }

        Err(PullError::PoolExhausted)
    }

    /// Send the commit; `None` means the user already owns the character
    async fn commit(&self, request: &AddCharacterRequest) -> PullResult<Option<Inventory>> {
        let backend = self.inventory.as_ref().ok_or_else(|| {
            AppError::ConfigError("No inventory backend configured for user pulls".to_string())
        })?;

        let MutationResponse {
            ok,
            error,
            inventory,
        } = backend.add_character(request).await?;

        if ok {
            return Ok(Some(inventory.unwrap_or_default()));
        }

        match error.as_deref() {
            Some("CHARACTER_EXISTS") => Ok(None),
            Some("NO_GUARANTEES") => Err(PullError::NoGuarantees),
            Some("NO_PULLS_AVAILABLE") => Err(PullError::NoPullsAvailable {
                recharge_timestamp: inventory.and_then(|inventory| inventory.recharge_timestamp),
            }),
            Some("CHARACTER_NOT_OWNED") => Err(PullError::CharacterNotOwned),
            Some(code) => Err(PullError::Unexpected(code.to_string())),
            None => Err(PullError::Unexpected("UNKNOWN".to_string())),
        }
    }
}
