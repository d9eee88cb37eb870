use std::process::Command;

fn tagpath() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tagpath"))
}

#[test]
fn test_help_goes_to_stderr() {
    for args in [&[][..], &["--help"][..]] {
        let output = tagpath().args(args).output().unwrap();
        assert!(output.status.success());
        assert!(output.stdout.is_empty());
        let stderr = String::from_utf8(output.stderr).unwrap();
        assert!(stderr.contains("generate query selectors\nusage:\n"), "{stderr}");
    }
}

#[test]
fn test_missing_query_fails() {
    let output = tagpath().arg("page.html").output().unwrap();
    assert!(!output.status.success());
    assert_eq!(
        String::from_utf8(output.stderr).unwrap(),
        "missing argument: target\n"
    );
}
