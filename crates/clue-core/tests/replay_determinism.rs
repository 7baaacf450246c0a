use clue_core::game::{
    AccusationRule, GameRules, GameState, Phase, ReplayLog, Verdict,
};
use clue_core::game::setup::Deal;
use clue_core::model::assumption::Theory;
use clue_core::model::card::{Card, Room, Suspect, Weapon};
use clue_core::model::hand::Hand;
use clue_core::model::participant::ParticipantConfig;
use clue_core::model::seat::Seat;

/// A plain scripted driver: heads for the first listed room, assumes the
/// turn's suspect and weapon, and accuses wrongly from turn `accuse_on` on.
fn drive(game: &mut GameState, accuse_on: u32) {
    while !game.is_over() {
        match game.phase().clone() {
            Phase::TurnStart => {
                game.start_turn().expect("turn");
            }
            Phase::AwaitingMovementChoice { seat, .. } => {
                if game.turn() >= accuse_on {
                    let wrong = surely_wrong(game, seat);
                    game.submit_accusation(wrong).expect("accuse");
                    continue;
                }
                let position = game.position(seat).expect("seat");
                let (room, _) = game.board().destinations(position)[0];
                game.submit_destination(room).expect("move");
            }
            Phase::AwaitingAssumption { .. } => {
                let index = game.turn() as usize;
                let suspect = Suspect::ALL[index % Suspect::ALL.len()];
                let weapon = Weapon::ALL[(index / 2) % Weapon::ALL.len()];
                game.submit_assumption(suspect, weapon).expect("assume");
            }
            Phase::AwaitingDisproval { candidates, .. } => {
                game.submit_disproval_choice(candidates[candidates.len() - 1])
                    .expect("choice");
            }
            Phase::AwaitingAccusation { .. } => {
                game.end_turn().expect("end");
            }
            Phase::Rolling { .. } | Phase::Resolved { .. } | Phase::GameOver(_) => {
                unreachable!("the machine never rests here")
            }
        }
    }
}

/// Names a card from the accuser's own hand, so it cannot be the solution.
fn surely_wrong(game: &GameState, seat: Seat) -> Theory {
    let mut theory = Theory::new(Suspect::Scarlet, Weapon::Candlestick, Room::Kitchen);
    let held = game.participant(seat).expect("seat").hand().iter().next();
    match held {
        Some(Card::Suspect(suspect)) => theory.suspect = suspect,
        Some(Card::Weapon(weapon)) => theory.weapon = weapon,
        Some(Card::Room(room)) => theory.room = room,
        None => {}
    }
    theory
}

#[test]
fn recorded_inputs_reproduce_the_game() {
    for seed in [1u64, 42, 9001] {
        let mut game = GameState::new(ParticipantConfig::reference_table(4), seed).expect("game");
        drive(&mut game, 30);
        let log = ReplayLog::capture(&game);
        assert!(log.outcome.is_some());

        let json = log.to_json().expect("encode");
        let parsed = ReplayLog::from_json(&json).expect("decode");
        let first = parsed.replay().expect("replay");
        let second = parsed.replay().expect("replay");

        assert_eq!(first.transitions(), game.transitions());
        assert_eq!(first.transitions(), second.transitions());
        assert_eq!(first.outcome(), game.outcome());
        assert!(parsed.matches_outcome(&second));
    }
}

#[test]
fn elimination_games_replay_too() {
    let rules = GameRules::default().with_accusation(AccusationRule::EliminatesAccuser);
    let mut game =
        GameState::with_rules(ParticipantConfig::reference_table(3), 77, rules).expect("game");
    drive(&mut game, 12);
    let outcome = *game.outcome().expect("over");
    assert_eq!(outcome.verdict, Verdict::Loss);
    assert!(outcome.winner.is_some());

    let replayed = ReplayLog::capture(&game).replay().expect("replay");
    assert_eq!(replayed.outcome(), Some(&outcome));
}

/// Seat 0 holds Scarlet and the Kitchen, seat 1 holds the Knife but nothing
/// else that gets named, seat 2 holds none of the three.
fn scenario_deal() -> Deal {
    use Card::{Room as R, Suspect as S, Weapon as W};
    Deal::from_parts(
        vec![
            Hand::with_cards([
                S(Suspect::Scarlet),
                R(Room::Kitchen),
                R(Room::Ballroom),
                W(Weapon::Candlestick),
                S(Suspect::White),
                R(Room::Lounge),
            ]),
            Hand::with_cards([
                W(Weapon::Knife),
                R(Room::DiningRoom),
                R(Room::BilliardRoom),
                S(Suspect::Green),
                W(Weapon::LeadPipe),
                R(Room::Conservatory),
            ]),
            Hand::with_cards([
                S(Suspect::Mustard),
                W(Weapon::Rope),
                R(Room::Library),
                R(Room::Study),
                S(Suspect::Peacock),
                W(Weapon::Revolver),
            ]),
        ],
        Theory::new(Suspect::Plum, Weapon::Wrench, Room::Hall),
    )
    .expect("fixture partitions the catalog")
}

#[test]
fn witness_learns_that_not_what() {
    let configs = vec![
        ParticipantConfig::automated().starting_in(Room::Study),
        ParticipantConfig::automated(),
        ParticipantConfig::automated(),
    ];
    let mut game =
        GameState::from_deal(configs, scenario_deal(), 42, GameRules::default()).expect("game");
    let revealer_before = game.belief(Seat::new(1)).expect("automated").eliminated();
    let witness_before = game.belief(Seat::new(2)).expect("automated").clone();

    assert_eq!(game.start_turn().expect("turn"), Seat::new(0));
    assert!(game.submit_destination(Room::Kitchen).expect("passage").arrived());
    let outcome = game
        .submit_assumption(Suspect::Scarlet, Weapon::Knife)
        .expect("assume");
    assert_eq!(
        outcome,
        clue_core::game::DisprovalOutcome::Revealed {
            by: Seat::new(1),
            card: Card::Weapon(Weapon::Knife)
        }
    );

    let revealer = game.belief(Seat::new(1)).expect("automated");
    assert_eq!(revealer.eliminated(), revealer_before);
    assert_eq!(revealer.open_constraints(), 0);

    let witness = game.belief(Seat::new(2)).expect("automated");
    for card in [Card::Suspect(Suspect::Scarlet), Card::Room(Room::Kitchen)] {
        assert!(witness.weight(card) > witness_before.weight(card));
    }
    assert!(!witness.is_eliminated(Card::Weapon(Weapon::Knife)));
    assert_eq!(witness.holder(Card::Weapon(Weapon::Knife)), None);

    let asker = game.belief(Seat::new(0)).expect("automated");
    assert!(asker.is_eliminated(Card::Weapon(Weapon::Knife)));
    assert!(game.solution().is_none());
}
