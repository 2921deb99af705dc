use briscola_core::game::public_state::{CardCode, DISCARD_PAD, PublicState, TABLE_PAD};
use briscola_core::model::hand::HAND_SIZE;

/// Length of the flat encoding: scores, hand size, hand, table, both
/// discard histories, turn counter, trump, lead flag.
pub const OBS_LEN: usize = 2 + 1 + (HAND_SIZE + TABLE_PAD + 2 * DISCARD_PAD) * 2 + 1 + 2 + 1;

/// Flatten a projection into a fixed-arity numeric vector.
///
/// Card slots contribute (value, suit) pairs with the all-zero sentinel for
/// padding, in the field order of [`PublicState`]. Any framework-specific
/// observation space maps 1:1 onto this layout.
pub fn encode(view: &PublicState) -> Vec<i64> {
    let mut data = Vec::with_capacity(OBS_LEN);
    data.push(view.my_points as i64);
    data.push(view.other_points as i64);
    data.push(view.hand_size as i64);
    push_codes(&mut data, &view.hand);
    push_codes(&mut data, &view.table);
    push_codes(&mut data, &view.my_discarded);
    push_codes(&mut data, &view.other_discarded);
    data.push(view.turn as i64);
    push_codes(&mut data, &[view.trump]);
    data.push(view.leads as i64);
    debug_assert_eq!(data.len(), OBS_LEN);
    data
}

fn push_codes(data: &mut Vec<i64>, codes: &[CardCode]) {
    for code in codes {
        data.push(code.value as i64);
        data.push(code.suit as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::{OBS_LEN, encode};
    use briscola_core::game::public_state::PublicState;
    use briscola_core::game::state::GameState;
    use briscola_core::model::player::Seat;

    #[test]
    fn encoding_has_the_declared_arity() {
        let state = GameState::with_seed(3);
        let view = PublicState::capture(&state, Seat::North);
        assert_eq!(encode(&view).len(), OBS_LEN);
    }

    #[test]
    fn fresh_hand_encodes_sentinel_zeros_for_empty_slots() {
        let state = GameState::with_seed(3);
        let view = PublicState::capture(&state, Seat::North);
        let data = encode(&view);

        assert_eq!(data[0], 0, "no points yet");
        assert_eq!(data[1], 0);
        assert_eq!(data[2], 3, "full hand");
        // Hand slots hold real cards, the table is still empty.
        let hand = &data[3..9];
        assert!(hand.iter().all(|&x| x > 0));
        let table = &data[9..13];
        assert!(table.iter().all(|&x| x == 0));
    }

    #[test]
    fn encoding_is_stable_for_equal_views() {
        let state = GameState::with_seed(14);
        let a = encode(&PublicState::capture(&state, Seat::South));
        let b = encode(&PublicState::capture(&state, Seat::South));
        assert_eq!(a, b);
    }
}
