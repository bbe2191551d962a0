use std::fs;
use tilematch_cli::run;

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
fn highscore_reads_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hs.json");
    fs::write(&path, r#"{"highscore": 42, "updated_at": "2025-01-01T00:00:00Z"}"#).unwrap();

    let (code, out, err) = run_cli(&["tilematch", "highscore", "--file", path.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert_eq!(out, "Highscore: 42\n");
    assert!(err.is_empty());
}

#[test]
fn highscore_reset_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("hs.json");
    let path = path.to_str().unwrap();

    let (code, out, _) = run_cli(&["tilematch", "highscore", "--file", path, "--reset"]);
    assert_eq!(code, 0);
    assert!(out.starts_with("Highscore reset:"));

    let raw = fs::read_to_string(path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["highscore"], 0);
    assert!(json["updated_at"].is_string());

    let (code, out, _) = run_cli(&["tilematch", "highscore", "--file", path]);
    assert_eq!(code, 0);
    assert_eq!(out, "Highscore: 0\n");
}

#[test]
fn highscore_corrupt_file_warns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hs.json");
    fs::write(&path, "not json").unwrap();

    let (code, out, err) = run_cli(&["tilematch", "highscore", "--file", path.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert_eq!(out, "Highscore: 0\n");
    assert!(err.contains("WARNING:"));
}
