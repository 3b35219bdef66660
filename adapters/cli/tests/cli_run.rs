use std::process::Command;

fn run_cli(args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_tower-defence"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to launch the tower-defence binary");

    assert!(
        output.status.success(),
        "tower-defence {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is utf-8")
}

#[test]
fn json_mode_reports_the_final_snapshot() {
    let stdout = run_cli(&["--waves", "test", "--ticks", "40", "--json"]);
    let last = stdout.lines().last().expect("at least one snapshot");
    let snapshot: serde_json::Value = serde_json::from_str(last).expect("snapshot is json");

    assert_eq!(snapshot["tick"], 40);
    assert_eq!(snapshot["columns"], 12);
    assert_eq!(snapshot["progress"]["wave_count"], 2);
    assert_eq!(snapshot["paused"], false);
}

#[test]
fn scripted_builds_spend_gold() {
    let stdout = run_cli(&[
        "--build",
        "normal@1,1",
        "--build",
        "heavy@4,2",
        "--ticks",
        "1",
        "--json",
    ]);
    let last = stdout.lines().last().expect("at least one snapshot");
    let snapshot: serde_json::Value = serde_json::from_str(last).expect("snapshot is json");

    assert_eq!(snapshot["gold"], 0);
    assert_eq!(snapshot["towers"].as_array().map(Vec::len), Some(2));
}

#[test]
fn text_mode_prints_the_board_and_outcome_banner() {
    let stdout = run_cli(&["--ticks", "3", "--render-every", "1"]);

    assert!(stdout.starts_with("Welcome to Tower Defence.\n"));
    assert!(stdout.contains("== tick 3 | health 20 | gold 150 | wave 1/10"));
    assert!(stdout.contains("waves: >Wave 1: Regular x20"));
}
