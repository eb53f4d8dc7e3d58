//! Turn policies: how an agent picks its next atomic action.
//!
//! The round loop calls [`TurnPolicy::act`] repeatedly during an agent's
//! turn. Each call performs at most one action (suppressing the hazard on
//! the agent's own cell counts as one, however many stages it takes) and
//! returns `false` when nothing could be done, which ends the turn.

use super::agent::Goal;
use super::pathfinder::UNREACHABLE;
use crate::board::Cell;
use crate::core::{AgentId, Direction, Position, Strategy};
use crate::engine::World;

/// Chooses and performs one action for an agent.
pub trait TurnPolicy {
    /// Perform one action. Returns false if none was possible.
    fn act(&self, world: &mut World, agent: AgentId) -> bool;
}

/// The policy implementing `strategy`.
#[must_use]
pub fn policy_for(strategy: Strategy) -> &'static dyn TurnPolicy {
    match strategy {
        Strategy::Coordinated => &CoordinatedPolicy,
        Strategy::RandomWalk => &RandomWalkPolicy,
    }
}

/// Prioritized decision rules, working with goals from the auction.
///
/// ## Priorities
///
/// 1. Carrying on an exit: deposit.
/// 2. Carrying elsewhere: step toward the cheapest exit.
/// 3. Revealed victim here: pick it up.
/// 4. Unrevealed POI here: reveal it.
/// 5. Hazard here: suppress it as far as AP allows.
/// 6. Hazard next door, not behind a wall or closed door on this side:
///    suppress it.
/// 7. Goal: act on it, or take one step toward it.
/// 8. Otherwise pick the cheapest POI, then the cheapest blaze, as a goal;
///    failing both, step in a random direction.
#[derive(Clone, Copy, Debug, Default)]
pub struct CoordinatedPolicy;

/// No planning: handle the agent's own cell, then try the four directions
/// in random order, suppressing a visible blaze or stepping.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomWalkPolicy;

/// What the agent sees before deciding.
struct View {
    position: Position,
    carrying: bool,
    ap: u32,
    goal: Option<Goal>,
    on_exit: bool,
    here: Cell,
}

impl View {
    fn of(world: &World, agent: AgentId) -> Option<Self> {
        let a = world.agent(agent);
        let here = world.board().cell(a.position)?.clone();
        Some(Self {
            position: a.position,
            carrying: a.carrying_victim,
            ap: a.ap,
            goal: a.goal,
            on_exit: world.board().is_exit(a.position),
            here,
        })
    }
}

impl TurnPolicy for CoordinatedPolicy {
    fn act(&self, world: &mut World, agent: AgentId) -> bool {
        let Some(view) = View::of(world, agent) else {
            return false;
        };

        if view.carrying {
            if view.on_exit {
                return world.deposit_victim(agent);
            }
            return step_toward_exit(world, agent);
        }
        if view.here.has_revealed_victim() {
            return world.pick_up_victim(agent);
        }
        if view.here.has_hidden_poi() {
            return world.reveal_poi(agent);
        }
        if view.here.hazard.is_present() && suppress_here(world, agent) {
            return true;
        }
        if let Some(target) = adjacent_hazard(world, &view) {
            return world.suppress(agent, target);
        }
        if let Some(goal) = view.goal {
            if let Some(acted) = follow_goal(world, agent, goal) {
                return acted;
            }
        }
        fallback(world, agent)
    }
}

impl TurnPolicy for RandomWalkPolicy {
    fn act(&self, world: &mut World, agent: AgentId) -> bool {
        let Some(view) = View::of(world, agent) else {
            return false;
        };

        if view.carrying && view.on_exit {
            return world.deposit_victim(agent);
        }
        if !view.carrying && view.here.has_revealed_victim() {
            return world.pick_up_victim(agent);
        }
        if view.here.has_hidden_poi() {
            return world.reveal_poi(agent);
        }

        for direction in shuffled_directions(world) {
            let Some(next) = world.board().neighbor(view.position, direction) else {
                continue;
            };
            let visible_blaze = world.board().hazard(next).is_blaze()
                && world.board().can_see(view.position, direction);
            if visible_blaze && view.ap >= 2 {
                return world.suppress(agent, next);
            }
            if world.move_agent(agent, direction) {
                return true;
            }
        }
        false
    }
}

fn shuffled_directions(world: &mut World) -> [Direction; 4] {
    let mut directions = Direction::ALL;
    world.rng_mut().shuffle(&mut directions);
    directions
}

/// Blaze to ember while AP allows, then ember to clear.
fn suppress_here(world: &mut World, agent: AgentId) -> bool {
    let at = world.agent(agent).position;
    let mut acted = false;
    while world.suppress(agent, at) {
        acted = true;
    }
    acted
}

/// First adjacent hazard the agent can afford to knock down, looking
/// through passable faces on its own side only.
fn adjacent_hazard(world: &World, view: &View) -> Option<Position> {
    let board = world.board();
    Direction::ALL.into_iter().find_map(|direction| {
        let next = board.neighbor(view.position, direction)?;
        if board.is_blocked_from(view.position, direction) {
            return None;
        }
        let hazard = board.hazard(next);
        let affordable =
            (hazard.is_blaze() && view.ap >= 2) || (hazard.is_ember() && view.ap >= 1);
        affordable.then_some(next)
    })
}

fn step_toward_exit(world: &mut World, agent: AgentId) -> bool {
    let Some(exit) = world.cheapest_exit(agent) else {
        return false;
    };
    world.agent_mut(agent).goal = Some(Goal::Deliver(exit));
    step_toward(world, agent, exit).unwrap_or(false)
}

/// One step along the cheapest route. `None` when there is no route.
fn step_toward(world: &mut World, agent: AgentId, target: Position) -> Option<bool> {
    let from = world.agent(agent).position;
    let first = *world.pathfinder(agent).route_to(from, target)?.first()?;
    Some(world.move_agent(agent, first))
}

/// Work on `goal`. `None` means the goal was dropped and the agent should
/// look for something else this action.
fn follow_goal(world: &mut World, agent: AgentId, goal: Goal) -> Option<bool> {
    let (from, carrying, ap) = {
        let a = world.agent(agent);
        (a.position, a.carrying_victim, a.ap)
    };
    let target = goal.target();

    if from == target {
        let (hidden, victim, hazard) = {
            let here = world.board().cell(from)?;
            (here.has_hidden_poi(), here.has_revealed_victim(), here.hazard.is_present())
        };
        let on_exit = world.board().is_exit(from);
        let acted = match goal {
            Goal::Investigate(_) | Goal::Rescue(_) if hidden => Some(world.reveal_poi(agent)),
            Goal::Investigate(_) | Goal::Rescue(_) if victim && !carrying => {
                Some(world.pick_up_victim(agent))
            }
            Goal::Deliver(_) if carrying && on_exit => Some(world.deposit_victim(agent)),
            Goal::SuppressBlaze(_) if hazard => Some(suppress_here(world, agent)),
            _ => None,
        };
        if acted.is_none() {
            world.agent_mut(agent).goal = None;
        }
        return acted;
    }

    let route = world.pathfinder(agent).route_to(from, target);
    let Some(&first) = route.as_ref().and_then(|r| r.first()) else {
        world.agent_mut(agent).goal = None;
        return None;
    };
    let next = world.board().neighbor(from, first)?;
    if world.board().hazard(next).is_blaze() {
        if ap >= 2 {
            return Some(world.suppress(agent, next));
        }
        return Some(false);
    }
    Some(world.move_agent(agent, first))
}

/// Rule 8: pick a goal for ourselves, or wander.
fn fallback(world: &mut World, agent: AgentId) -> bool {
    let goal = cheapest_target(world, agent, |c| c.poi.is_some() && !c.hazard.is_blaze())
        .map(|pos| {
            let revealed = world.board().cell(pos).is_some_and(Cell::has_revealed_victim);
            if revealed {
                Goal::Rescue(pos)
            } else {
                Goal::Investigate(pos)
            }
        })
        .or_else(|| cheapest_target(world, agent, |c| c.hazard.is_blaze()).map(Goal::SuppressBlaze));

    if let Some(goal) = goal {
        world.agent_mut(agent).goal = Some(goal);
        return follow_goal(world, agent, goal).unwrap_or(false);
    }

    for direction in shuffled_directions(world) {
        if world.move_agent(agent, direction) {
            return true;
        }
    }
    false
}

/// Reachable non-exterior cell matching `pred` with the lowest route cost;
/// row-major order breaks ties.
fn cheapest_target(world: &World, agent: AgentId, pred: impl Fn(&Cell) -> bool) -> Option<Position> {
    let finder = world.pathfinder(agent);
    let from = world.agent(agent).position;
    let mut best: Option<(u32, Position)> = None;
    for cell in world.board().cells() {
        if cell.exterior || !pred(cell) {
            continue;
        }
        let cost = finder.cost_to(from, cell.position);
        if cost < best.map_or(UNREACHABLE, |(c, _)| c) {
            best = Some((cost, cell.position));
        }
    }
    best.map(|(_, pos)| pos)
}
