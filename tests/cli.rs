use assert_cmd::Command;

#[test]
fn help_describes_flags() {
    let output = Command::cargo_bin("multitables")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--difficulty"));
    assert!(stdout.contains("--questions"));
    assert!(stdout.contains("--seed"));
}

#[test]
fn refuses_non_tty_stdin() {
    Command::cargo_bin("multitables")
        .unwrap()
        .write_stdin("")
        .assert()
        .failure();
}

#[test]
fn rejects_question_count_outside_choices() {
    Command::cargo_bin("multitables")
        .unwrap()
        .args(["-q", "7"])
        .write_stdin("")
        .assert()
        .failure();
}
