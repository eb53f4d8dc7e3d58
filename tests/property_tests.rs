//! Property tests for the board and the round loop.

use proptest::prelude::*;

use rescue_sim::board::WallArena;
use rescue_sim::Strategy as AgentStrategy;
use rescue_sim::{Direction, Hazard, Outcome, Position, RulesConfig, Scenario, WallId, World};

const SIZE: u32 = 4;

#[derive(Clone, Copy, Debug)]
enum WallOp {
    Open,
    Close,
    Hit,
    Destroy,
}

fn wall_op() -> impl Strategy<Value = WallOp> {
    prop_oneof![
        Just(WallOp::Open),
        Just(WallOp::Close),
        Just(WallOp::Hit),
        Just(WallOp::Destroy),
    ]
}

fn hazard() -> impl Strategy<Value = Hazard> {
    prop_oneof![Just(Hazard::Clear), Just(Hazard::Ember), Just(Hazard::Blaze)]
}

/// A 4x4 scenario with the given interior east/south walls, every east wall
/// with a door when `doors` says so.
fn walled_scenario(east: &[bool], south: &[bool], doors: &[bool]) -> Scenario {
    let mut scenario = Scenario::new(SIZE, SIZE);
    for y in 0..SIZE {
        for x in 0..SIZE {
            let i = (y * SIZE + x) as usize;
            let here = Position::new(x, y);
            if x + 1 < SIZE && east[i] {
                scenario = scenario.with_wall(here, Direction::East);
                if doors[i] {
                    scenario = scenario.with_door(here, Position::new(x + 1, y));
                }
            }
            if y + 1 < SIZE && south[i] {
                scenario = scenario.with_wall(here, Direction::South);
            }
        }
    }
    scenario
}

fn all_symmetric(arena: &WallArena) -> bool {
    arena.iter().all(|(id, _)| arena.is_symmetric(id))
}

fn agent_strategy() -> impl Strategy<Value = AgentStrategy> {
    prop_oneof![Just(AgentStrategy::Coordinated), Just(AgentStrategy::RandomWalk)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A wall and its mirror never disagree, whatever is done to either face.
    #[test]
    fn prop_wall_symmetry(
        east in prop::collection::vec(any::<bool>(), 16),
        south in prop::collection::vec(any::<bool>(), 16),
        doors in prop::collection::vec(any::<bool>(), 16),
        ops in prop::collection::vec((any::<prop::sample::Index>(), wall_op()), 0..40),
    ) {
        let mut board = walled_scenario(&east, &south, &doors).build_board();
        prop_assert!(all_symmetric(board.walls()));

        let count = board.walls().len();
        if count > 0 {
            for (index, op) in ops {
                let id = WallId(index.index(count) as u32);
                let arena = board.walls_mut();
                match op {
                    WallOp::Open => { arena.open_door(id); }
                    WallOp::Close => { arena.close_door(id); }
                    WallOp::Hit => { arena.apply_hit(id); }
                    WallOp::Destroy => { arena.destroy(id); }
                }
                prop_assert!(all_symmetric(board.walls()));
            }
        }
    }

    /// Flashover runs to a fixed point: a second pass changes nothing and no
    /// ember is left next to a blaze it could catch from.
    #[test]
    fn prop_flashover_idempotent(
        hazards in prop::collection::vec(hazard(), 16),
        east in prop::collection::vec(any::<bool>(), 16),
        south in prop::collection::vec(any::<bool>(), 16),
        doors in prop::collection::vec(any::<bool>(), 16),
    ) {
        let scenario = walled_scenario(&east, &south, &doors).with_agents(0);
        let mut world = World::new(&scenario, RulesConfig::default(), 0);
        for (i, &h) in hazards.iter().enumerate() {
            let pos = Position::new(i as u32 % SIZE, i as u32 / SIZE);
            world.board_mut().set_hazard(pos, h);
        }

        world.flashover();
        let before = world.board().clone();
        prop_assert!(world.flashover().is_empty());
        prop_assert_eq!(world.board(), &before);

        let board = world.board();
        for cell in board.cells().filter(|c| c.hazard.is_ember()) {
            for d in Direction::ALL {
                let exposed = board
                    .neighbor(cell.position, d)
                    .is_some_and(|n| board.hazard(n).is_blaze())
                    && !board.is_blocked_from(cell.position, d);
                prop_assert!(!exposed);
            }
        }
    }

    /// Over whole games: AP stays within bounds, every victim is accounted
    /// for after each round, and the game ends at most once.
    #[test]
    fn prop_round_invariants(seed in any::<u64>(), strategy in agent_strategy()) {
        let config = RulesConfig::default().with_strategy(strategy);
        let mut world = World::new(&Scenario::sample(), config, seed);
        let ap_cap = world.config().max_ap + world.config().ap_carryover_cap;

        for _ in 0..80 {
            let going = world.run_round();

            for agent in world.agents() {
                prop_assert!(agent.ap <= ap_cap);
                prop_assert!(agent.knockdowns <= world.config().max_knockdowns);
                prop_assert!(agent.alive || agent.knockdowns == world.config().max_knockdowns);
            }

            let accounted = world.rescued()
                + world.lost()
                + world.board().victims_on_board()
                + world.victims_carried();
            prop_assert_eq!(accounted, world.victims_placed());

            prop_assert_eq!(going, !world.is_finished());
            if !going {
                break;
            }
        }

        let config = world.config().clone();
        match world.outcome() {
            Some(Outcome::Victory) => prop_assert!(world.rescued() >= config.rescue_quota),
            Some(Outcome::DefeatCollapse) => {
                prop_assert!(world.structural_damage() >= config.collapse_threshold)
            }
            Some(Outcome::DefeatVictimsLost) => prop_assert!(world.lost() >= config.lost_quota),
            None => {}
        }

        if world.is_finished() {
            let rounds = world.history().len();
            let status = world.status();
            prop_assert!(!world.run_round());
            prop_assert_eq!(world.history().len(), rounds);
            prop_assert_eq!(world.status(), status);
            let finished = world.history().iter().filter(|r| r.status.finished).count();
            prop_assert_eq!(finished, 1);
        }
    }
}
