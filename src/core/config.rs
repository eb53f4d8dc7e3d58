//! Rules configuration.
//!
//! Every tunable constant of the game lives in `RulesConfig`. The defaults
//! reproduce the stock board game; tests and alternative scenarios override
//! individual values with the `with_*` builders.

use serde::{Deserialize, Serialize};

/// How agents choose their actions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Per-round auction followed by the prioritized decision policy.
    #[default]
    Coordinated,
    /// No auction. Agents handle victims on their own cell, then try the
    /// four directions in shuffled order.
    RandomWalk,
}

/// Complete rules configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// AP granted at the start of every round.
    pub max_ap: u32,

    /// Maximum leftover AP carried into the next round.
    pub ap_carryover_cap: u32,

    /// Knockdowns that take an agent out of play.
    pub max_knockdowns: u32,

    /// Rescued victims needed for victory.
    pub rescue_quota: u32,

    /// Lost victims that end the game in defeat.
    pub lost_quota: u32,

    /// Structural damage that collapses the building.
    pub collapse_threshold: u32,

    /// Minimum of (unrevealed POIs + revealed victims) kept on the board.
    pub min_active_pois: u32,

    /// Probability that a replenished POI is a victim.
    pub victim_probability: f64,

    /// Maximum unrevealed POIs handed out per auction.
    pub max_poi_assignments: usize,

    /// Hard cap on actions per agent turn.
    pub max_actions_per_turn: u32,

    /// Faces of the die that selects the row.
    pub row_die_sides: u8,

    /// Faces of the die that selects the column.
    pub column_die_sides: u8,

    /// Replenishment gives up after `cells * placement_attempts_per_cell` draws.
    pub placement_attempts_per_cell: u32,

    /// Decision strategy for all agents.
    pub strategy: Strategy,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_ap: 4,
            ap_carryover_cap: 4,
            max_knockdowns: 2,
            rescue_quota: 7,
            lost_quota: 4,
            collapse_threshold: 24,
            min_active_pois: 3,
            victim_probability: 0.67,
            max_poi_assignments: 3,
            max_actions_per_turn: 20,
            row_die_sides: 6,
            column_die_sides: 8,
            placement_attempts_per_cell: 32,
            strategy: Strategy::Coordinated,
        }
    }
}

impl RulesConfig {
    /// Set the number of rescues needed to win.
    #[must_use]
    pub fn with_rescue_quota(mut self, quota: u32) -> Self {
        self.rescue_quota = quota;
        self
    }

    /// Set the number of lost victims that ends the game.
    #[must_use]
    pub fn with_lost_quota(mut self, quota: u32) -> Self {
        self.lost_quota = quota;
        self
    }

    /// Set the structural damage that collapses the building.
    #[must_use]
    pub fn with_collapse_threshold(mut self, threshold: u32) -> Self {
        self.collapse_threshold = threshold;
        self
    }

    /// Set the per-round AP grant.
    #[must_use]
    pub fn with_max_ap(mut self, ap: u32) -> Self {
        self.max_ap = ap;
        self
    }

    /// Set the knockdown limit.
    #[must_use]
    pub fn with_max_knockdowns(mut self, knockdowns: u32) -> Self {
        self.max_knockdowns = knockdowns;
        self
    }

    /// Set the replenishment floor. Zero disables replenishment.
    #[must_use]
    pub fn with_min_active_pois(mut self, count: u32) -> Self {
        self.min_active_pois = count;
        self
    }

    /// Set the decision strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// AP an agent starts a round with, given its leftover AP.
    ///
    /// ```
    /// use rescue_sim::core::RulesConfig;
    ///
    /// let config = RulesConfig::default();
    /// assert_eq!(config.replenished_ap(0), 4);
    /// assert_eq!(config.replenished_ap(3), 7);
    /// assert_eq!(config.replenished_ap(6), 8);
    /// ```
    #[must_use]
    pub fn replenished_ap(&self, leftover: u32) -> u32 {
        self.max_ap + leftover.min(self.ap_carryover_cap)
    }
}
