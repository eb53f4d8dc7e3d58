//! End-to-end rescue scenarios.
//!
//! These tests play whole rounds through the public API and check that
//! agents find victims, carry them out and win.

use rescue_sim::engine::ActionKind;
use rescue_sim::{AgentId, Outcome, PoiKind, Position, RulesConfig, Scenario, Strategy, World};

fn p(x: u32, y: u32) -> Position {
    Position::new(x, y)
}

/// One agent, one victim two cells from the entrance, quota of one.
#[test]
fn test_single_victim_rescue() {
    let scenario = Scenario::new(8, 6)
        .with_entrance(p(0, 0))
        .with_poi(p(2, 0), PoiKind::Victim)
        .with_agents(1);
    let config = RulesConfig::default()
        .with_rescue_quota(1)
        .with_min_active_pois(0);
    let mut world = World::new(&scenario, config, 42);

    world.run(10);

    assert_eq!(world.outcome(), Some(Outcome::Victory));
    assert_eq!(world.rescued(), 1);
    assert!(world.round() <= 3);

    let kinds: Vec<ActionKind> = world
        .history()
        .iter()
        .flat_map(|r| r.actions.iter().map(|a| a.kind))
        .collect();
    assert!(kinds.contains(&ActionKind::RevealPoi {
        outcome: PoiKind::Victim
    }));
    assert!(kinds.contains(&ActionKind::PickUpVictim));
    assert_eq!(kinds.last(), Some(&ActionKind::DepositVictim));
}

/// The first round goes to the auction: the victim is assigned before
/// anyone moves.
#[test]
fn test_first_round_assigns_victim() {
    let scenario = Scenario::new(8, 6)
        .with_entrance(p(0, 0))
        .with_poi(p(2, 0), PoiKind::Victim)
        .with_agents(1);
    let config = RulesConfig::default().with_min_active_pois(0);
    let mut world = World::new(&scenario, config, 42);

    world.run_round();

    let record = &world.history()[0];
    assert_eq!(record.assignments.len(), 1);
    assert_eq!(record.assignments[0].agent, AgentId::new(0));
    assert_eq!(record.assignments[0].cost, 2);
}

/// Carrying costs double, so the walk back takes longer than the walk out.
#[test]
fn test_carrying_costs_double() {
    let scenario = Scenario::new(8, 6)
        .with_entrance(p(0, 0))
        .with_poi(p(2, 0), PoiKind::Victim)
        .with_agents(1);
    let config = RulesConfig::default()
        .with_rescue_quota(1)
        .with_min_active_pois(0);
    let mut world = World::new(&scenario, config, 42);
    world.run(10);

    let moves: Vec<u32> = world
        .history()
        .iter()
        .flat_map(|r| r.actions.iter())
        .filter(|a| a.kind == ActionKind::Move)
        .map(|a| a.ap_cost)
        .collect();
    assert!(moves.contains(&1));
    assert!(moves.contains(&2));
}

/// Both strategies play the sample map to a clean stop.
#[test]
fn test_sample_map_both_strategies() {
    for strategy in [Strategy::Coordinated, Strategy::RandomWalk] {
        let config = RulesConfig::default().with_strategy(strategy);
        let mut world = World::new(&Scenario::sample(), config, 7);
        let played = world.run(300);

        assert_eq!(world.history().len() as u32, played);
        for (i, record) in world.history().iter().enumerate() {
            assert_eq!(record.round, i as u32 + 1);
        }
        if let Some(last) = world.history().last() {
            assert_eq!(last.status, world.status());
        }
    }
}

/// Agents surrounded by plain walls cannot do anything and end their turn.
#[test]
fn test_walled_in_agent_passes() {
    let scenario = Scenario::new(2, 2)
        .with_all_walls()
        .with_entrance(p(0, 0))
        .with_agents(1);
    let config = RulesConfig::default().with_min_active_pois(0);
    let mut world = World::new(&scenario, config, 3);

    world.run_round();
    assert_eq!(world.agent(AgentId::new(0)).position, p(0, 0));
}
