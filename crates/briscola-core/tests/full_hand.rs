use briscola_core::game::public_state::PublicState;
use briscola_core::game::state::{GameState, PlayOutcome};
use briscola_core::model::player::Seat;
use briscola_core::model::score::TOTAL_POINTS;

fn cards_accounted(state: &GameState) -> usize {
    let in_hands: usize = Seat::LOOP.iter().map(|seat| state.hand(*seat).len()).sum();
    let discarded: usize = Seat::LOOP
        .iter()
        .map(|seat| state.discard_pile(*seat).len())
        .sum();
    let reserved = if state.trump_dealt() { 0 } else { 1 };
    state.cards_in_deck() + in_hands + state.current_trick().plays().len() + discarded + reserved
}

#[test]
fn many_seeded_hands_hold_the_engine_invariants() {
    let mut exhausted_games = 0;

    for seed in 0..50u64 {
        let mut state = GameState::with_seed(seed);
        let mut last_deck_card_watch = false;

        while let Some(seat) = state.expected_seat() {
            assert_eq!(cards_accounted(&state), 40, "seed {seed}");

            // Spread the choices around instead of always leading slot 0.
            let index = (seed as usize + state.turns_played() as usize) % state.hand(seat).len();

            let deck_before = state.cards_in_deck();
            if deck_before == 1 && state.current_trick().plays().len() == 1 {
                last_deck_card_watch = true;
            }

            match state.play_from_hand(seat, index).unwrap() {
                PlayOutcome::Played(_) => {}
                PlayOutcome::TrickResolved { winner, points, .. } => {
                    // The winner leads the next trick.
                    assert_eq!(state.leader(), winner, "seed {seed}");
                    assert!(points <= 22, "seed {seed}");

                    // When the draw phase drains the deck, the winner took
                    // the last pile card and the loser the reserved trump.
                    if last_deck_card_watch {
                        assert!(state.trump_dealt(), "seed {seed}");
                        assert_eq!(state.cards_in_deck(), 0, "seed {seed}");
                        assert!(
                            state.hand(winner.opponent()).contains(state.trump()),
                            "seed {seed}"
                        );
                        last_deck_card_watch = false;
                    }
                }
            }
        }

        assert!(state.is_finished(), "seed {seed}");
        assert_eq!(cards_accounted(&state), 40, "seed {seed}");

        let [north, south] = *state.scores().standings();
        let threshold = north > TOTAL_POINTS / 2 || south > TOTAL_POINTS / 2;
        let exhausted = state.cards_in_deck() == 0
            && Seat::LOOP.iter().all(|seat| state.hand(*seat).is_empty());
        assert!(threshold || exhausted, "seed {seed}");

        if exhausted {
            exhausted_games += 1;
            assert_eq!(state.turns_played(), 20, "seed {seed}");
            assert_eq!(north + south, TOTAL_POINTS, "seed {seed}");
        }

        let outcome = state.outcome().expect("finished hand has an outcome");
        match outcome {
            briscola_core::HandOutcome::Win(seat) => {
                assert!(
                    state.scores().score(seat) > state.scores().score(seat.opponent()),
                    "seed {seed}"
                );
            }
            briscola_core::HandOutcome::Draw => {
                assert_eq!(north, south, "seed {seed}");
            }
        }
    }

    assert!(
        exhausted_games > 0,
        "no hand reached deck exhaustion across the sweep"
    );
}

#[test]
fn projection_card_counts_match_engine_state_every_turn() {
    let mut state = GameState::with_seed(77);

    while let Some(seat) = state.expected_seat() {
        for viewer in Seat::LOOP {
            let view = PublicState::capture(&state, viewer);
            let hand_cards = view.hand.iter().filter(|code| !code.is_none()).count();
            assert_eq!(hand_cards, state.hand(viewer).len());
            assert_eq!(view.hand_size as usize, hand_cards);

            let table_cards = view.table.iter().filter(|code| !code.is_none()).count();
            assert_eq!(table_cards, state.current_trick().plays().len());

            let mine = view.my_discarded.iter().filter(|c| !c.is_none()).count();
            let theirs = view.other_discarded.iter().filter(|c| !c.is_none()).count();
            assert_eq!(mine, state.discard_pile(viewer).len());
            assert_eq!(theirs, state.discard_pile(viewer.opponent()).len());

            assert!(view.my_points + view.other_points <= TOTAL_POINTS);
        }
        state.play_from_hand(seat, 0).unwrap();
    }
}
