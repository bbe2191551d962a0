use std::fs;
use tilematch_cli::run;
use tilematch_engine::logger::GameRecord;

fn run_cli(args: &[&str]) -> (i32, String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(args.iter().copied(), &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn sim_writes_one_record_per_game() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("games.jsonl");
    let hs = dir.path().join("hs.json");

    let (code, out, err) = run_cli(&[
        "tilematch",
        "sim",
        "--games",
        "5",
        "--seed",
        "11",
        "--pairs",
        "6",
        "--output",
        output.to_str().unwrap(),
        "--file",
        hs.to_str().unwrap(),
    ]);
    assert_eq!(code, 0, "stderr: {}", err);
    assert!(out.contains("Simulated: 5 games"));

    let content = fs::read_to_string(&output).unwrap();
    let records: Vec<GameRecord> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 5);
    for (i, r) in records.iter().enumerate() {
        assert!(r.game_id.ends_with(&format!("{:06}", i + 1)));
        assert_eq!(r.seed, 11);
        assert_eq!(r.pairs, 6);
        assert!(r.ts.is_some());
        assert_eq!(u64::from(r.flips), r.elapsed_secs);
    }
    // the first win always beats an empty store
    assert!(records[0].new_highscore);

    let best = records.iter().map(|r| r.final_score).max().unwrap();
    assert!(out.contains(&format!("Best score: {}", best)));
    let stored: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&hs).unwrap()).unwrap();
    assert_eq!(stored["highscore"].as_u64(), Some(u64::from(best)));
}

#[test]
fn sim_keeps_higher_stored_highscore() {
    let dir = tempfile::tempdir().unwrap();
    let hs = dir.path().join("hs.json");
    fs::write(&hs, r#"{"highscore": 100000}"#).unwrap();

    let (code, out, _) = run_cli(&[
        "tilematch",
        "sim",
        "--games",
        "2",
        "--seed",
        "3",
        "--pairs",
        "4",
        "--file",
        hs.to_str().unwrap(),
    ]);
    assert_eq!(code, 0);
    assert!(out.contains("New highscores: 0"));
    assert!(out.contains("Highscore: 100000"));
}

#[test]
fn sim_rejects_zero_games() {
    let dir = tempfile::tempdir().unwrap();
    let hs = dir.path().join("hs.json");
    let (code, _, err) = run_cli(&[
        "tilematch",
        "sim",
        "--games",
        "0",
        "--file",
        hs.to_str().unwrap(),
    ]);
    assert_eq!(code, 2);
    assert!(err.contains("--games must be >= 1"));
    assert!(!hs.exists());
}
