//! Per-round task auction.
//!
//! A greedy allocator, run once at the start of every round before anyone
//! moves. Bids are route costs from [`World::cost_to`]; the cheapest bidder
//! wins and the first one in roster order wins ties.
//!
//! ## Order
//!
//! 1. Goals of idle agents (in play, hands free) are cleared.
//! 2. Carriers are sent to their cheapest exit. They do not bid.
//! 3. Revealed victims, in row-major order: one agent each.
//! 4. Unrevealed POIs not under a blaze: up to `max_poi_assignments`, each
//!    time the cheapest (agent, POI) pair overall.
//! 5. Blazes: each remaining agent, in roster order, takes its cheapest
//!    remaining blaze.
//!
//! Agents left over get no goal and search on their own. Exterior cells
//! are never auctioned.

use tracing::debug;

use crate::agents::Goal;
use crate::core::{AgentId, Position};
use crate::engine::{Assignment, World};

/// Assign goals for this round and return what was assigned, in order.
pub fn run_auction(world: &mut World) -> Vec<Assignment> {
    let mut assignments = Vec::new();

    for agent in AgentId::all(world.agents().len()) {
        if world.agent(agent).is_idle() {
            set_goal(world, agent, None);
        }
    }
    let mut available: Vec<AgentId> = world
        .agents()
        .iter()
        .filter(|a| a.is_idle())
        .map(|a| a.id)
        .collect();

    let carriers: Vec<AgentId> = world
        .agents()
        .iter()
        .filter(|a| a.alive && a.carrying_victim)
        .map(|a| a.id)
        .collect();
    for agent in carriers {
        if let Some(exit) = world.cheapest_exit(agent) {
            let cost = world.cost_to(agent, exit);
            assign(world, &mut assignments, agent, Goal::Deliver(exit), cost);
        }
    }

    let victims = targets(world, |c| c.has_revealed_victim());
    for victim in victims {
        let Some((agent, cost)) = cheapest_agent(world, &available, victim) else {
            break;
        };
        available.retain(|&a| a != agent);
        assign(world, &mut assignments, agent, Goal::Rescue(victim), cost);
    }

    let mut pois = targets(world, |c| c.has_hidden_poi() && !c.hazard.is_blaze());
    let rounds = world
        .config()
        .max_poi_assignments
        .min(available.len())
        .min(pois.len());
    for _ in 0..rounds {
        let best = available
            .iter()
            .flat_map(|&agent| pois.iter().map(move |&poi| (agent, poi)))
            .map(|(agent, poi)| (agent, poi, world.cost_to(agent, poi)))
            .min_by_key(|&(_, _, cost)| cost);
        let Some((agent, poi, cost)) = best else {
            break;
        };
        available.retain(|&a| a != agent);
        pois.retain(|&p| p != poi);
        assign(world, &mut assignments, agent, Goal::Investigate(poi), cost);
    }

    let mut blazes = targets(world, |c| c.hazard.is_blaze());
    for agent in available {
        let best = blazes
            .iter()
            .map(|&blaze| (blaze, world.cost_to(agent, blaze)))
            .min_by_key(|&(_, cost)| cost);
        let Some((blaze, cost)) = best else {
            break;
        };
        blazes.retain(|&b| b != blaze);
        assign(world, &mut assignments, agent, Goal::SuppressBlaze(blaze), cost);
    }

    assignments
}

/// Non-exterior cells matching `pred`, row-major.
fn targets(world: &World, pred: impl Fn(&crate::board::Cell) -> bool) -> Vec<Position> {
    world
        .board()
        .cells()
        .filter(|c| !c.exterior && pred(c))
        .map(|c| c.position)
        .collect()
}

fn cheapest_agent(world: &World, pool: &[AgentId], target: Position) -> Option<(AgentId, u32)> {
    pool.iter()
        .map(|&agent| (agent, world.cost_to(agent, target)))
        .min_by_key(|&(_, cost)| cost)
}

fn set_goal(world: &mut World, agent: AgentId, goal: Option<Goal>) {
    world.agent_mut(agent).goal = goal;
}

fn assign(world: &mut World, out: &mut Vec<Assignment>, agent: AgentId, goal: Goal, cost: u32) {
    debug!(?agent, ?goal, cost, "Goal assigned");
    set_goal(world, agent, Some(goal));
    out.push(Assignment { agent, goal, cost });
}
