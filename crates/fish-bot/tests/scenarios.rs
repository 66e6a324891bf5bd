use fish_bot::{Advisor, BotParams, Reconciler, Strategy};
use fish_core::error::ObservationError;
use fish_core::model::call::{CallResult, CardCall, SuitCall};
use fish_core::model::card::CardId;
use fish_core::model::catalog::{Catalog, DEFAULT_PLAYER_NAMES};
use fish_core::model::half_suit::{GroupStatus, HalfSuit};
use fish_core::model::player::{PlayerId, Team};
use rand::rngs::StdRng;

const SPREAD_HAND: [&str; 9] = ["2C", "9C", "2D", "9D", "2H", "9H", "2S", "9S", "8C"];

fn seat(index: usize) -> PlayerId {
    PlayerId::from_index(index).unwrap()
}

fn advisor(seed: u64) -> Advisor<StdRng> {
    let catalog = Catalog::standard(&DEFAULT_PLAYER_NAMES).unwrap();
    let hand = catalog.cards_by_name(&SPREAD_HAND).unwrap();
    Advisor::seeded(catalog, &hand, BotParams::default(), seed).unwrap()
}

fn card(advisor: &Advisor<StdRng>, name: &str) -> CardId {
    advisor.catalog().card_by_name(name).unwrap()
}

fn hit(sender: usize, target: usize, card: CardId) -> CardCall {
    CardCall::new(seat(sender), seat(target), card, CallResult::Hit)
}

struct ScriptedCounts {
    answers: Vec<[u8; 6]>,
    calls: usize,
}

impl Reconciler for ScriptedCounts {
    fn group_counts(&mut self, _group: &HalfSuit) -> [u8; 6] {
        let answer = self.answers[self.calls];
        self.calls += 1;
        answer
    }
}

fn unexpected(_: &HalfSuit) -> [u8; 6] {
    panic!("reconciliation requested for a successful declaration")
}

#[test]
fn opening_move_falls_past_the_probability_tier() {
    for seed in 0..16 {
        let mut advisor = advisor(seed);
        let candidate = advisor.select_move().expect("opening move");
        assert_ne!(candidate.strategy, Strategy::Probability);
        assert!(candidate.probability > 0.0 && candidate.probability < 0.5);

        let catalog = advisor.catalog();
        assert_ne!(catalog.team_of(candidate.target), catalog.agent_team());
        assert!(!advisor.state().hand().contains(candidate.card));
        let group = catalog.half_suit(catalog.half_suit_of(candidate.card));
        assert!(advisor.state().hand().count_in(group) > 0);
    }
}

#[test]
fn six_hits_by_one_opponent_then_declaration_clears_the_group() {
    let mut advisor = advisor(5);
    let names = ["9S", "10S", "JS", "QS", "KS", "AS"];
    let targets = [0, 2, 4, 3, 5, 2];
    for (name, target) in names.iter().zip(targets) {
        let declared = advisor
            .apply_observed_call(hit(1, target, card(&advisor, name)))
            .unwrap();
        assert!(declared.is_empty());
    }

    let group = advisor.catalog().half_suit_by_name("high-spades").unwrap();
    assert_eq!(advisor.view().group_count(seat(1), group), 6);
    assert_eq!(advisor.view().hand_size(seat(1)), 15);
    assert_eq!(advisor.view().hand_size(seat(2)), 7);
    assert_eq!(advisor.view().hand_size(PlayerId::AGENT), 8);

    let declaration = SuitCall::new(group, Team::Red, seat(1), CallResult::Hit);
    let auto = advisor
        .apply_observed_declaration(declaration, &mut unexpected)
        .unwrap();
    assert!(auto.is_empty());

    assert_eq!(advisor.view().hand_size(seat(1)), 9);
    assert_eq!(
        advisor.state().status(group),
        GroupStatus::Declared { owner: Team::Red }
    );
    for member in advisor.catalog().half_suit(group).cards {
        for player in PlayerId::LOOP {
            assert_eq!(advisor.view().probability(player, member), 0.0);
            assert!(!advisor.view().is_locked(player, member));
        }
    }
    for player in PlayerId::LOOP {
        assert_eq!(advisor.view().group_count(player, group), 0);
    }
}

#[test]
fn failed_declaration_asks_for_counts_once_per_attempt() {
    let mut advisor = advisor(9);
    let group = advisor.catalog().half_suit_by_name("high-hearts").unwrap();
    let declaration = SuitCall::new(group, Team::Red, seat(1), CallResult::Miss);

    let mut short = ScriptedCounts {
        answers: vec![[1, 1, 1, 1, 1, 0]],
        calls: 0,
    };
    let err = advisor
        .apply_observed_declaration(declaration, &mut short)
        .unwrap_err();
    assert_eq!(short.calls, 1);
    assert!(matches!(
        err,
        ObservationError::ReconciliationMismatch { found: 5, expected: 6, .. }
    ));
    assert!(advisor.state().is_in_play(group));
    assert_eq!(advisor.view().hand_size(seat(1)), 9);

    let mut wrong_agent = ScriptedCounts {
        answers: vec![[0, 2, 1, 1, 1, 1]],
        calls: 0,
    };
    assert!(matches!(
        advisor.apply_observed_declaration(declaration, &mut wrong_agent),
        Err(ObservationError::ReconciliationAgentMismatch { reported: 0, held: 1, .. })
    ));
    assert_eq!(wrong_agent.calls, 1);

    let mut valid = ScriptedCounts {
        answers: vec![[1, 2, 1, 1, 1, 0]],
        calls: 0,
    };
    advisor
        .apply_observed_declaration(declaration, &mut valid)
        .unwrap();
    assert_eq!(valid.calls, 1);
    assert_eq!(
        advisor.state().status(group),
        GroupStatus::Declared { owner: Team::Blue }
    );
    assert_eq!(advisor.view().hand_size(seat(1)), 7);
    assert_eq!(advisor.view().hand_size(seat(5)), 9);
    assert_eq!(advisor.view().hand_size(PlayerId::AGENT), 8);
    assert!(!advisor.state().hand().contains(card(&advisor, "9H")));
}

#[test]
fn team_collecting_a_group_triggers_one_automatic_declaration() {
    let mut advisor = advisor(13);
    let three = card(&advisor, "3C");
    let four = card(&advisor, "4C");
    let five = card(&advisor, "5C");

    assert!(advisor.apply_observed_call(hit(2, 1, three)).unwrap().is_empty());
    assert!(advisor.apply_observed_call(hit(2, 3, four)).unwrap().is_empty());
    let declared = advisor.apply_observed_call(hit(2, 1, five)).unwrap();

    let group = advisor.catalog().half_suit_by_name("low-clubs").unwrap();
    assert_eq!(
        declared,
        vec![SuitCall::new(group, Team::Blue, PlayerId::AGENT, CallResult::Hit)]
    );
    assert_eq!(
        advisor.state().status(group),
        GroupStatus::Declared { owner: Team::Blue }
    );
    assert_eq!(advisor.view().hand_size(seat(2)), 7);
    assert_eq!(advisor.view().hand_size(PlayerId::AGENT), 8);
    assert!(!advisor.state().hand().contains(card(&advisor, "2C")));

    let late = advisor.apply_observed_call(hit(3, 2, card(&advisor, "7C")));
    assert!(matches!(late, Err(ObservationError::CardOutOfPlay { .. })));
}

#[test]
fn one_observation_can_complete_two_groups() {
    let catalog = Catalog::standard(&DEFAULT_PLAYER_NAMES).unwrap();
    let hand = catalog
        .cards_by_name(&["2C", "3C", "4C", "5C", "6C", "7C", "2D", "3D", "4D"])
        .unwrap();
    let mut advisor = Advisor::seeded(catalog, &hand, BotParams::default(), 17).unwrap();
    let low_clubs = advisor.catalog().half_suit_by_name("low-clubs").unwrap();
    let low_diamonds = advisor.catalog().half_suit_by_name("low-diamonds").unwrap();
    assert!(advisor.state().is_in_play(low_clubs));

    // Agent 3 + seat 2 at least 2 + 2D..4D ruled out for seat 2 locks 6D and 7D.
    let declared = advisor
        .apply_observed_call(hit(2, 1, card(&advisor, "5D")))
        .unwrap();

    assert_eq!(
        declared,
        vec![
            SuitCall::new(low_clubs, Team::Blue, PlayerId::AGENT, CallResult::Hit),
            SuitCall::new(low_diamonds, Team::Blue, PlayerId::AGENT, CallResult::Hit),
        ]
    );
    for group in [low_clubs, low_diamonds] {
        assert_eq!(
            advisor.state().status(group),
            GroupStatus::Declared { owner: Team::Blue }
        );
    }
    assert!(advisor.state().hand().is_empty());
    assert_eq!(advisor.view().hand_size(PlayerId::AGENT), 0);
    assert_eq!(advisor.view().hand_size(seat(2)), 7);
    assert_eq!(advisor.view().hand_size(seat(1)), 8);
}

#[test]
fn advice_never_targets_teammates_or_owned_cards() {
    let mut advisor = advisor(2024);
    let mut turns = 0;
    for turn in 0..40 {
        let Ok(candidate) = advisor.select_move() else {
            break;
        };
        let catalog = advisor.catalog();
        assert_ne!(catalog.team_of(candidate.target), catalog.agent_team());
        assert!(!advisor.state().hand().contains(candidate.card));
        let group = catalog.half_suit(catalog.half_suit_of(candidate.card));
        assert!(advisor.state().hand().count_in(group) > 0);

        let result = if turn % 3 == 0 {
            CallResult::Hit
        } else {
            CallResult::Miss
        };
        advisor
            .apply_observed_call(candidate.into_call(result))
            .unwrap();
        turns += 1;
    }
    assert!(turns > 0);
}

#[test]
fn probabilities_stay_in_range_after_mixed_observations() {
    let mut advisor = advisor(77);
    let calls = [
        CardCall::new(seat(1), seat(2), card(&advisor, "KD"), CallResult::Miss),
        CardCall::new(seat(3), seat(4), card(&advisor, "KD"), CallResult::Miss),
        CardCall::new(seat(5), seat(2), card(&advisor, "KD"), CallResult::Miss),
        hit(4, 5, card(&advisor, "QD")),
        CardCall::new(seat(1), PlayerId::AGENT, card(&advisor, "3D"), CallResult::Miss),
        hit(3, PlayerId::AGENT.index(), card(&advisor, "9D")),
    ];
    for call in calls {
        advisor.apply_observed_call(call).unwrap();
    }
    for player in PlayerId::LOOP {
        for id in CardId::all() {
            let probability = advisor.view().probability(player, id);
            assert!((0.0..=1.0).contains(&probability), "{player} {id} {probability}");
        }
    }
}
