use memoline_core::{
    decode_card_from_storage, encode_card_for_storage, init_card, next_card_state, Card,
    IntegerCard, Rating, State,
};

fn sample() -> Card {
    Card {
        due: 1_700_864_000,
        stability: 12.3456,
        difficulty: 6.789,
        elapsed_days: 3.14159,
        scheduled_days: 10.0,
        reps: 7,
        lapses: 2,
        state: State::Review,
        last_review: 1_700_000_000,
    }
}

#[test]
fn encode_scales_and_truncates() {
    let i = encode_card_for_storage(sample());
    assert_eq!(
        i,
        IntegerCard {
            due: 1_700_864_000,
            stability: 1234,
            difficulty: 67,
            elapsed_days: 31,
            scheduled_days: 100,
            reps: 7,
            lapses: 2,
            state: 2,
            last_review: 1_700_000_000,
        }
    );
}

#[test]
fn decode_divides_back() {
    let c = decode_card_from_storage(encode_card_for_storage(sample()));
    assert_eq!(c.stability, 12.34);
    assert_eq!(c.difficulty, 6.7);
    assert_eq!(c.elapsed_days, 3.1);
    assert_eq!(c.scheduled_days, 10.0);
    assert_eq!(c.reps, 7);
    assert_eq!(c.lapses, 2);
    assert_eq!(c.state, State::Review);
    assert_eq!(c.due, 1_700_864_000);
    assert_eq!(c.last_review, 1_700_000_000);
}

#[test]
fn counters_saturate_at_255() {
    let mut card = sample();
    card.reps = 1000;
    card.lapses = 256;
    let i = encode_card_for_storage(card);
    assert_eq!(i.reps, 255);
    assert_eq!(i.lapses, 255);

    let back = decode_card_from_storage(i);
    assert_eq!(back.reps, 255);
    assert_eq!(back.lapses, 255);
}

#[test]
fn integer_side_is_idempotent_over_a_review_history() {
    let mut card = init_card();
    let mut now = 1_700_000_000;
    for rating in [
        Rating::Good,
        Rating::Good,
        Rating::Hard,
        Rating::Again,
        Rating::Good,
        Rating::Easy,
    ] {
        card = next_card_state(card, rating, now);
        let i = encode_card_for_storage(card.clone());
        assert_eq!(encode_card_for_storage(decode_card_from_storage(i)), i);
        now = card.due;
    }
}

#[test]
fn new_card_encodes_as_zeroes() {
    let i = encode_card_for_storage(init_card());
    assert_eq!(i.state, 0);
    assert_eq!(i.stability, 0);
    assert_eq!(i.reps, 0);
    assert_eq!(i.last_review, 0);
    assert_eq!(i.difficulty, 50);
}

#[test]
fn unknown_state_is_an_error() {
    let mut i = encode_card_for_storage(sample());
    i.state = 4;
    assert!(Card::try_from(i).is_err());
}

#[test]
#[should_panic(expected = "corrupt stored card")]
fn decoding_unknown_state_panics() {
    let mut i = encode_card_for_storage(sample());
    i.state = 9;
    decode_card_from_storage(i);
}

#[test]
fn integer_card_serializes_as_plain_numbers() {
    let i = encode_card_for_storage(sample());
    let json = serde_json::to_value(i).unwrap();
    assert_eq!(json["stability"], 1234);
    assert_eq!(json["state"], 2);
    let back: IntegerCard = serde_json::from_value(json).unwrap();
    assert_eq!(back, i);
}
