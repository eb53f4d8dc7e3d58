//! The world: board, roster, counters and the round history.

use im::Vector;
use tracing::info;

use super::export::{InitialLayout, Snapshot};
use super::record::{ActionKind, ActionRecord, GameStatus, Outcome, RoundRecord};
use crate::agents::{Agent, Pathfinder};
use crate::board::Board;
use crate::core::{AgentId, GameRng, Position, RulesConfig};
use crate::scenario::Scenario;

/// Complete simulation state.
///
/// A world is an explicit value: every mutation goes through its methods,
/// and once an [`Outcome`] is set nothing changes any more.
#[derive(Clone, Debug)]
pub struct World {
    pub(super) config: RulesConfig,
    pub(super) board: Board,
    pub(super) agents: Vec<Agent>,
    pub(super) rng: GameRng,

    pub(super) rescued: u32,
    pub(super) lost: u32,
    pub(super) structural_damage: u32,
    pub(super) explosions: u32,
    pub(super) false_alarms: u32,
    /// Victims that have ever been on the board (initial plus replenished).
    pub(super) victims_placed: u32,

    pub(super) round: u32,
    pub(super) outcome: Option<Outcome>,

    pub(super) history: Vector<RoundRecord>,
    /// Record of the round in progress.
    pub(super) current: RoundRecord,
    layout: InitialLayout,
}

impl World {
    /// Build a world from a scenario.
    ///
    /// Agent `i` starts at entrance `i % entrances`, or at the origin when
    /// the scenario has no entrances.
    #[must_use]
    pub fn new(scenario: &Scenario, config: RulesConfig, seed: u64) -> Self {
        let mut board = scenario.build_board();
        let exits = board.exits().to_vec();

        let agents: Vec<Agent> = AgentId::all(scenario.agent_count)
            .map(|id| {
                let start = if exits.is_empty() {
                    Position::new(0, 0)
                } else {
                    exits[id.index() % exits.len()]
                };
                Agent::new(id, start)
            })
            .collect();
        for agent in &agents {
            if let Some(cell) = board.cell_mut(agent.position) {
                cell.enter(agent.id);
            }
        }

        let victims_placed = board.victims_on_board();
        let layout = InitialLayout::capture(&board, &agents, scenario.structural_damage);

        info!(
            width = board.width(),
            height = board.height(),
            agents = agents.len(),
            seed,
            "World created"
        );

        Self {
            config,
            board,
            agents,
            rng: GameRng::new(seed),
            rescued: 0,
            lost: 0,
            structural_damage: scenario.structural_damage,
            explosions: 0,
            false_alarms: 0,
            victims_placed,
            round: 0,
            outcome: None,
            history: Vector::new(),
            current: RoundRecord::default(),
            layout,
        }
    }

    /// Rules in force.
    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board, for setting up situations by hand.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// All agents in roster order.
    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// One agent.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in the roster.
    #[must_use]
    pub fn agent(&self, id: AgentId) -> &Agent {
        &self.agents[id.index()]
    }

    pub(crate) fn agent_mut(&mut self, id: AgentId) -> &mut Agent {
        &mut self.agents[id.index()]
    }

    pub(crate) fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    #[must_use]
    pub fn rescued(&self) -> u32 {
        self.rescued
    }

    #[must_use]
    pub fn lost(&self) -> u32 {
        self.lost
    }

    #[must_use]
    pub fn structural_damage(&self) -> u32 {
        self.structural_damage
    }

    #[must_use]
    pub fn explosions(&self) -> u32 {
        self.explosions
    }

    #[must_use]
    pub fn false_alarms(&self) -> u32 {
        self.false_alarms
    }

    /// Victims that have ever been on the board, including replenished ones.
    #[must_use]
    pub fn victims_placed(&self) -> u32 {
        self.victims_placed
    }

    /// Victims currently carried by agents.
    #[must_use]
    pub fn victims_carried(&self) -> u32 {
        self.agents.iter().filter(|a| a.carrying_victim).count() as u32
    }

    /// Rounds started so far.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Terminal outcome, once the game is over.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// True once an outcome is set.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Completed round records.
    #[must_use]
    pub fn history(&self) -> &Vector<RoundRecord> {
        &self.history
    }

    /// Counters as they stand now.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        GameStatus {
            rescued: self.rescued,
            lost: self.lost,
            structural_damage: self.structural_damage,
            explosions: self.explosions,
            false_alarms: self.false_alarms,
            finished: self.is_finished(),
            outcome: self.outcome,
        }
    }

    /// Initial layout plus every completed round.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            layout: self.layout.clone(),
            rounds: self.history.iter().cloned().collect(),
        }
    }

    /// Route search from `agent`'s point of view.
    #[must_use]
    pub fn pathfinder(&self, agent: AgentId) -> Pathfinder<'_> {
        Pathfinder::new(&self.board, self.agent(agent).carrying_victim)
    }

    /// `agent`'s weighted cost to reach `target`.
    #[must_use]
    pub fn cost_to(&self, agent: AgentId, target: Position) -> u32 {
        self.pathfinder(agent).cost_to(self.agent(agent).position, target)
    }

    /// The exit `agent` can reach most cheaply; the first listed wins ties.
    #[must_use]
    pub fn cheapest_exit(&self, agent: AgentId) -> Option<Position> {
        let finder = self.pathfinder(agent);
        let from = self.agent(agent).position;
        self.board
            .exits()
            .iter()
            .copied()
            .min_by_key(|&exit| finder.cost_to(from, exit))
    }

    /// Set the terminal outcome. Only the first call has any effect.
    pub(crate) fn finish(&mut self, outcome: Outcome) {
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(outcome);
        info!(
            round = self.round,
            ?outcome,
            rescued = self.rescued,
            lost = self.lost,
            damage = self.structural_damage,
            "Game over"
        );
    }

    pub(crate) fn record_action(
        &mut self,
        agent: AgentId,
        kind: ActionKind,
        from: Position,
        to: Position,
        ap_cost: u32,
    ) {
        self.current.actions.push(ActionRecord {
            agent,
            kind,
            from,
            to,
            ap_cost,
        });
    }
}
