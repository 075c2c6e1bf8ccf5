//! End-to-end walks of the placement round state machine.

use rand::SeedableRng;
use rand::rngs::StdRng;
use spellplay::{
    HINT_PENALTY, ImageRef, NullFeedback, PlacementEngine, RecordingFeedback, RecordingSink,
    RoundStatus, Signal, TileId, word_value,
};

fn engine(seed: u64) -> PlacementEngine<StdRng> {
    PlacementEngine::new(StdRng::seed_from_u64(seed))
}

fn place_letter(
    engine: &mut PlacementEngine<StdRng>,
    letter: char,
    sink: &mut RecordingSink,
    feedback: &mut RecordingFeedback,
) {
    let id = engine
        .round()
        .unwrap()
        .rack()
        .iter()
        .find(|t| t.letter == letter)
        .unwrap_or_else(|| panic!("expected {letter} on the rack"))
        .id;
    engine.place_from_rack(id, sink, feedback);
}

#[test]
fn test_solve_round_by_placement() {
    let mut engine = engine(3);
    let mut sink = RecordingSink::default();
    let mut feedback = RecordingFeedback::default();

    engine.start_round("LANTERN", "a portable light", ImageRef::placeholder());
    assert_eq!(engine.status(), RoundStatus::Playing);

    for letter in "LANTERN".chars() {
        place_letter(&mut engine, letter, &mut sink, &mut feedback);
    }

    assert_eq!(engine.status(), RoundStatus::Won);
    assert_eq!(sink.deltas, vec![word_value("LANTERN") as i32]);
    assert_eq!(feedback.signals, vec![Signal::Win]);
}

#[test]
fn test_misfill_then_rearrange_to_win() {
    let mut engine = engine(4);
    let mut sink = RecordingSink::default();
    let mut feedback = RecordingFeedback::default();

    engine.start_round("DOG", "a loyal animal", ImageRef::placeholder());
    // Fill wrongly: G O D.
    for letter in "GOD".chars() {
        place_letter(&mut engine, letter, &mut sink, &mut feedback);
    }
    assert_eq!(engine.status(), RoundStatus::Playing);
    assert_eq!(feedback.signals, vec![Signal::Error]);
    assert!(engine.round().unwrap().message().is_some());

    // Take G and D back, replace correctly.
    assert!(engine.pick_up(0));
    assert!(engine.pick_up(2));
    for letter in "DG".chars() {
        place_letter(&mut engine, letter, &mut sink, &mut feedback);
    }

    assert_eq!(engine.status(), RoundStatus::Won);
    assert_eq!(sink.deltas, vec![word_value("DOG") as i32]);
}

#[test]
fn test_conservation_under_random_walk() {
    let mut engine = engine(9);
    let mut sink = RecordingSink::default();
    engine.start_round("COMPASS", "points north", ImageRef::placeholder());

    // A scripted mix of placements, pickups, hints, and shuffles; the tile
    // count must stay split exactly between rack and board throughout.
    let word_len = 7;
    let check = |engine: &PlacementEngine<StdRng>| {
        let round = engine.round().unwrap();
        let placed = round.slots().iter().flatten().count();
        assert_eq!(round.rack().len() + placed, word_len);
    };

    for step in 0..30 {
        match step % 5 {
            0 | 3 => {
                if let Some(id) = engine.round().unwrap().rack().first().map(|t| t.id) {
                    engine.place_from_rack(id, &mut sink, &mut NullFeedback);
                }
            }
            1 => {
                engine.pick_up(step % word_len);
            }
            2 => {
                engine.use_hint(&mut sink, &mut NullFeedback);
            }
            _ => engine.shuffle_rack(),
        }
        check(&engine);
        if engine.status() == RoundStatus::Won {
            break;
        }
    }
}

#[test]
fn test_hint_sequence_on_empty_board() {
    let mut engine = engine(12);
    let mut sink = RecordingSink::default();
    engine.start_round("DOG", "barks", ImageRef::placeholder());

    engine.use_hint(&mut sink, &mut NullFeedback);
    let round = engine.round().unwrap();
    let first = round.slots()[0].as_ref().expect("slot 0 filled by hint");
    assert_eq!(first.letter, 'D');
    assert!(first.hinted);
    assert_eq!(sink.deltas, vec![-HINT_PENALTY]);

    // The hinted tile is immune to pick up but a later hint could displace
    // a wrong occupant; here the player simply cannot take D back.
    assert!(!engine.pick_up(0));
    let round = engine.round().unwrap();
    assert_eq!(round.slots()[0].as_ref().unwrap().letter, 'D');
}

#[test]
fn test_unknown_tile_ids_are_ignored() {
    let mut engine = engine(2);
    let mut sink = RecordingSink::default();
    engine.start_round("RIVER", "flows to the sea", ImageRef::placeholder());
    engine.place_from_rack(TileId(999), &mut sink, &mut NullFeedback);
    let round = engine.round().unwrap();
    assert_eq!(round.rack().len(), 5);
    assert!(round.slots().iter().all(Option::is_none));
    assert!(sink.deltas.is_empty());
}

#[test]
fn test_new_round_replaces_terminal_round() {
    let mut engine = engine(6);
    let mut sink = RecordingSink::default();
    engine.start_round("AT", "a preposition", ImageRef::placeholder());
    for letter in "AT".chars() {
        let id = engine
            .round()
            .unwrap()
            .rack()
            .iter()
            .find(|t| t.letter == letter)
            .unwrap()
            .id;
        engine.place_from_rack(id, &mut sink, &mut NullFeedback);
    }
    assert_eq!(engine.status(), RoundStatus::Won);

    engine.start_round("CLOUD", "in the sky", ImageRef::placeholder());
    assert_eq!(engine.status(), RoundStatus::Playing);
    assert_eq!(engine.round().unwrap().board_score(), 0);
    assert_eq!(engine.recent_words(), vec!["AT", "CLOUD"]);
}
