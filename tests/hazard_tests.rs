//! Hazard propagation scenarios: explosions, chains and collapse.

use rescue_sim::engine::RollEffect;
use rescue_sim::{AgentId, Hazard, Outcome, Position, RulesConfig, Scenario, World};

fn p(x: u32, y: u32) -> Position {
    Position::new(x, y)
}

/// A blaze in the middle of an open 3x3 board explodes into all four
/// neighbours, knocking down the agent on the cell and the one next door.
#[test]
fn test_explosion_chain() {
    let scenario = Scenario::new(3, 3)
        .with_blaze(p(1, 1))
        .with_entrance(p(1, 1))
        .with_entrance(p(1, 0))
        .with_agents(2);
    let config = RulesConfig::default().with_min_active_pois(0);
    let mut world = World::new(&scenario, config, 1);

    world.advance_hazard_at(p(1, 1));

    for pos in [p(1, 0), p(1, 2), p(2, 1), p(0, 1)] {
        assert_eq!(world.board().hazard(pos), Hazard::Blaze, "{pos:?}");
    }
    assert_eq!(world.board().hazard(p(0, 0)), Hazard::Clear);
    assert_eq!(world.explosions(), 1);
    assert_eq!(world.structural_damage(), 0);
    for id in AgentId::all(2) {
        assert_eq!(world.agent(id).knockdowns, 1);
        assert!(world.agent(id).alive);
    }
}

/// Embers next to a fresh blaze catch in the same roll.
#[test]
fn test_explosion_triggers_flashover() {
    let scenario = Scenario::new(3, 1).with_blaze(p(0, 0)).with_agents(0);
    let mut world = World::new(&scenario, RulesConfig::default().with_min_active_pois(0), 1);
    world.board_mut().set_hazard(p(2, 0), Hazard::Ember);

    world.advance_hazard_at(p(0, 0));

    assert_eq!(world.board().hazard(p(1, 0)), Hazard::Blaze);
    assert_eq!(world.board().hazard(p(2, 0)), Hazard::Blaze);
}

/// Every cell walled and ablaze, one point short of collapse: the first
/// explosion brings the building down after a single wall hit.
#[test]
fn test_collapse() {
    let mut scenario = Scenario::new(8, 6)
        .with_all_walls()
        .with_structural_damage(23)
        .with_agents(1);
    for y in 0..6 {
        for x in 0..8 {
            scenario = scenario.with_blaze(p(x, y));
        }
    }
    let config = RulesConfig::default().with_min_active_pois(0);
    let mut world = World::new(&scenario, config, 5);

    world.run(200);

    assert_eq!(world.outcome(), Some(Outcome::DefeatCollapse));
    assert_eq!(world.structural_damage(), 24);

    let last = world.history().last().unwrap();
    let roll = last.rolls.last().unwrap();
    assert_eq!(roll.effect, RollEffect::Explosion);
    assert_eq!(roll.changes.walls.len(), 1);
    assert!(roll.changes.blazes_added.is_empty());
    assert!(last.status.finished);

    let rounds = world.history().len();
    assert!(!world.run_round());
    assert_eq!(world.history().len(), rounds);
}

/// A hidden victim caught under a blaze is lost.
#[test]
fn test_victim_lost_to_fire() {
    let scenario = Scenario::new(2, 1)
        .with_poi(p(1, 0), rescue_sim::PoiKind::Victim)
        .with_agents(0);
    let mut world = World::new(&scenario, RulesConfig::default().with_min_active_pois(0), 1);
    world.board_mut().set_hazard(p(1, 0), Hazard::Ember);

    world.advance_hazard_at(p(1, 0));

    assert_eq!(world.lost(), 1);
    assert!(world.board().cell(p(1, 0)).unwrap().poi.is_none());
}
