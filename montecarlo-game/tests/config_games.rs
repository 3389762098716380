use montecarlo_game::{Analyzer, DiceError, Face, Game, GameConfig, ResultForm};
use serde::Deserialize;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Suit {
    Hearts,
    Spades,
    Clubs,
}

fn game_from_json<F: Face + DeserializeOwned>(json: &str) -> Result<Game<F>, DiceError> {
    GameConfig::<F>::from_json(json)?.build()
}

const TWO_LOADED_COINS: &str = r#"{
    "seed": 2024,
    "dice": [
        {"faces": ["H", "T"], "copies": 2, "weights": [{"face": "T", "weight": 4.0}]}
    ]
}"#;

#[test]
fn configured_game_plays_and_analyzes() {
    let _ = env_logger::builder().is_test(true).try_init();
    let cfg: GameConfig<String> = GameConfig::from_json(TWO_LOADED_COINS).unwrap();
    let mut game = cfg.build().unwrap();
    game.play(200).unwrap();

    let analyzer = Analyzer::new(&game).unwrap();
    assert_eq!(analyzer.die_count(), 2);
    assert_eq!(analyzer.combo().total(), 200);
    let tails = analyzer.combo().count_of(&["T".to_string(), "T".to_string()]);
    // P(T, T) = 0.64
    assert!(tails > 100, "expected mostly double tails, got {tails}");
}

#[test]
fn configured_seed_is_reproducible() {
    let cfg: GameConfig<String> = GameConfig::from_json(TWO_LOADED_COINS).unwrap();
    let mut a = cfg.build().unwrap();
    let mut b = cfg.build().unwrap();
    a.play(15).unwrap();
    b.play(15).unwrap();
    assert_eq!(a.show_results(ResultForm::Narrow), b.show_results(ResultForm::Narrow));
}

#[test]
fn exported_results_are_json() {
    let cfg: GameConfig<String> = GameConfig::from_json(TWO_LOADED_COINS).unwrap();
    let mut game = cfg.build().unwrap();
    game.play(3).unwrap();
    let json = serde_json::to_value(game.show_results(ResultForm::Narrow)).unwrap();
    assert_eq!(json["form"], "narrow");
    assert_eq!(json["rows"].as_array().map(Vec::len), Some(6));
}

#[test]
fn invalid_face_lists_surface_as_errors() {
    let cfg: GameConfig<u8> =
        GameConfig::from_json(r#"{"dice":[{"faces":[1,1,2]}]}"#).unwrap();
    assert!(matches!(cfg.build(), Err(DiceError::DuplicateFace { .. })));
}

#[test]
fn custom_face_types_load_through_generic_config() {
    let mut game: Game<Suit> = game_from_json(
        r#"{
            "seed": 3,
            "dice": [
                {"faces": ["hearts", "spades", "clubs"], "copies": 2,
                 "weights": [{"face": "clubs", "weight": 0.5}]}
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(game.dice()[0].weight(&Suit::Clubs), Some(0.5));
    game.play(12).unwrap();
    let counts = Analyzer::new(&game).unwrap().face_counts_per_roll();
    assert_eq!(counts.faces, vec![Suit::Hearts, Suit::Spades, Suit::Clubs]);
}

#[test]
fn weights_overflowing_the_total_fail_to_build() {
    let err = game_from_json::<u8>(
        r#"{"dice":[{"faces":[1,2],"weights":[{"face":1,"weight":1e308},{"face":2,"weight":1e308}]}]}"#,
    )
    .unwrap_err();
    assert!(matches!(err, DiceError::InvalidWeight { .. }));
}
