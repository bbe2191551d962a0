use tilematch_cli::run;

fn run_ok(args: &[&str]) -> String {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(args.iter().copied(), &mut out, &mut err);
    assert_eq!(code, 0, "stderr: {}", String::from_utf8_lossy(&err));
    String::from_utf8(out).unwrap()
}

#[test]
fn deal_prints_seed_and_grid() {
    let s = run_ok(&["tilematch", "deal", "--seed", "1", "--pairs", "8", "--cols", "4"]);
    let lines: Vec<&str> = s.lines().collect();
    assert_eq!(lines[0], "Seed: 1");
    assert_eq!(lines[1], "Pairs: 8");
    assert_eq!(lines.len(), 2 + 4);

    let mut ids: Vec<u16> = lines[2..]
        .iter()
        .flat_map(|l| l.split_whitespace())
        .map(|c| c.parse().unwrap())
        .collect();
    ids.sort_unstable();
    let expected: Vec<u16> = (0..8).flat_map(|i| [i, i]).collect();
    assert_eq!(ids, expected);
}

#[test]
fn deal_same_seed_same_layout() {
    let a = run_ok(&["tilematch", "deal", "--seed", "77", "--pairs", "10"]);
    let b = run_ok(&["tilematch", "deal", "--seed", "77", "--pairs", "10"]);
    assert_eq!(a, b);
}

#[test]
fn deal_rejects_too_few_pairs() {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(
        ["tilematch", "deal", "--seed", "1", "--pairs", "1"],
        &mut out,
        &mut err,
    );
    assert_eq!(code, 2);
    let stderr = String::from_utf8_lossy(&err);
    assert!(stderr.starts_with("Error: Invalid input:"), "{}", stderr);
    assert!(out.is_empty());
}
