use std::io::Cursor;

use hangterm::core::config::SessionConfig;
use hangterm::games::hangman::{RoundEnd, Session};
use hangterm::words::{WordBank, WordEntry};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn single_word_bank(word: &str) -> WordBank {
    WordBank::from_entries(vec![WordEntry::new("en", "animals", word)])
}

fn fixed_config() -> SessionConfig {
    SessionConfig {
        language: Some("en".to_string()),
        category: Some("animals".to_string()),
        ..SessionConfig::default()
    }
}

fn run(bank: &WordBank, config: SessionConfig, input: &str) -> (Vec<RoundEnd>, String) {
    let mut session = Session::new(bank, StdRng::seed_from_u64(9), config).unwrap();
    let mut out = Vec::new();
    let rounds = session.run(Cursor::new(input.to_string()), &mut out).unwrap();
    (rounds, String::from_utf8(out).unwrap())
}

#[test]
fn winning_round() {
    let bank = single_word_bank("cat");

    let (rounds, out) = run(&bank, fixed_config(), "c\nz\na\nt\nn\n");

    assert_eq!(
        rounds,
        vec![RoundEnd::Won {
            word: "cat".to_string(),
            mistakes: 1,
            hints: 0
        }]
    );
    assert!(out.contains("Word: c _ _"));
    assert!(out.contains("Sorry, 'z' is not in the word."));
    assert!(out.contains("Lives remaining: 5"));
    assert!(out.contains("Congrats! You WON!"));
}

#[test]
fn losing_round_reveals_word() {
    let bank = single_word_bank("dog");
    let config = SessionConfig {
        max_mistakes: 1,
        ..fixed_config()
    };

    let (rounds, out) = run(&bank, config, "z\n");

    assert_eq!(
        rounds,
        vec![RoundEnd::Lost {
            word: "dog".to_string()
        }]
    );
    assert!(out.contains("You LOST! The word was: d o g"));
}

#[test]
fn invalid_guesses_reported_and_retried() {
    let bank = single_word_bank("ox");

    let (rounds, out) = run(&bank, fixed_config(), "ab\n7\no\no\nx\n");

    assert_eq!(
        rounds,
        vec![RoundEnd::Won {
            word: "ox".to_string(),
            mistakes: 0,
            hints: 0
        }]
    );
    assert!(out.contains("exactly one letter"));
    assert!(out.contains("'7' is not one"));
    assert!(out.contains("\"o\" was already guessed."));
}

#[test]
fn quit_command_abandons_round() {
    let bank = single_word_bank("cat");

    let (rounds, out) = run(&bank, fixed_config(), "c\n:q\nn\n");

    assert_eq!(rounds, vec![RoundEnd::Abandoned]);
    assert!(out.contains("The word was: c a t"));
}

#[test]
fn end_of_input_abandons_round() {
    let bank = single_word_bank("cat");

    let (rounds, _) = run(&bank, fixed_config(), "c\n");

    assert_eq!(rounds, vec![RoundEnd::Abandoned]);
}

#[test]
fn accepted_hint_after_streak() {
    let bank = single_word_bank("aaa");
    let config = SessionConfig {
        hint_after: 2,
        ..fixed_config()
    };

    let (rounds, out) = run(&bank, config, "x\ny\ny\na\nn\n");

    assert_eq!(
        rounds,
        vec![RoundEnd::Won {
            word: "aaa".to_string(),
            mistakes: 2,
            hints: 1
        }]
    );
    assert!(out.contains("Do you want a hint?"));
    assert!(out.contains("Hint: the letter 'a' is in the word."));
}

#[test]
fn declined_hint_resets_streak() {
    let bank = single_word_bank("cat");
    let config = SessionConfig {
        hint_after: 2,
        ..fixed_config()
    };

    // Offer after x,y (declined), then z alone must not trigger another offer.
    let (rounds, out) = run(&bank, config, "x\ny\nn\nz\nc\na\nt\nn\n");

    assert_eq!(
        rounds,
        vec![RoundEnd::Won {
            word: "cat".to_string(),
            mistakes: 3,
            hints: 0
        }]
    );
    assert_eq!(out.matches("Do you want a hint?").count(), 1);
}

#[test]
fn hint_completing_word_wins() {
    let bank = single_word_bank("ab");
    let config = SessionConfig {
        hint_after: 1,
        ..fixed_config()
    };

    // 'a' is correct; then a miss triggers the hint which reveals the only hidden 'b'.
    let (rounds, _) = run(&bank, config, "a\nz\ny\nn\n");

    assert_eq!(
        rounds,
        vec![RoundEnd::Won {
            word: "ab".to_string(),
            mistakes: 1,
            hints: 1
        }]
    );
}

#[test]
fn prompts_until_valid_combination() {
    let bank = single_word_bank("ox");

    let (rounds, out) = run(
        &bank,
        SessionConfig::default(),
        "fr\nanimals\nen\nanimals\no\nx\nn\n",
    );

    assert_eq!(
        rounds,
        vec![RoundEnd::Won {
            word: "ox".to_string(),
            mistakes: 0,
            hints: 0
        }]
    );
    assert!(out.contains("Choose language (en)"));
    assert!(out.contains("This combination does not exist"));
}

#[test]
fn configured_unknown_combination_is_an_error() {
    let bank = single_word_bank("ox");
    let config = SessionConfig {
        language: Some("ro".to_string()),
        ..fixed_config()
    };
    let mut session = Session::new(&bank, StdRng::seed_from_u64(1), config).unwrap();

    let result = session.run(Cursor::new(String::new()), Vec::new());

    assert!(result.is_err());
}

#[test]
fn play_again_starts_new_round() {
    let bank = single_word_bank("ox");

    let (rounds, _) = run(&bank, fixed_config(), "o\nx\ny\n:q\nn\n");

    assert_eq!(rounds.len(), 2);
    assert_eq!(rounds[1], RoundEnd::Abandoned);
}

#[test]
fn zero_lives_config_rejected() {
    let bank = single_word_bank("ox");
    let config = SessionConfig {
        max_mistakes: 0,
        ..fixed_config()
    };

    assert!(Session::new(&bank, StdRng::seed_from_u64(1), config).is_err());
}
