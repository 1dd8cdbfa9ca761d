use std::process::Command;

fn mqttif(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_mqttif")).args(args).output().unwrap()
}

#[test]
fn unopenable_port_exits_with_1_and_names_the_port() {
    let output = mqttif(&[
        "--port",
        "/dev/null/nonexistent",
        "--baud",
        "115200",
        "--cmd",
        "getDeviceName",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("/dev/null/nonexistent"), "stderr was: {stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn unknown_command_is_a_usage_error_not_a_port_error() {
    let output = mqttif(&["--port", "p", "--baud", "9600", "--cmd", "frobnicate"]);

    assert!(!output.status.success());
    assert_ne!(output.status.code(), Some(1));
}

#[test]
fn missing_port_without_config_is_a_usage_error() {
    let output = mqttif(&["--baud", "9600", "--cmd", "save"]);

    assert!(!output.status.success());
    assert_ne!(output.status.code(), Some(1));
}

#[test]
fn oversized_payload_is_rejected_before_the_port_is_touched() {
    let data = "x".repeat(300);
    let output = mqttif(&[
        "--port",
        "/dev/null/nonexistent",
        "--baud",
        "9600",
        "--cmd",
        "startAP",
        "--data",
        data.as_str(),
    ]);

    // Exit 2 and no mention of an open failure: the frame was refused first.
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("payload"), "stderr was: {stderr}");
    assert!(!stderr.contains("Failed to open"), "stderr was: {stderr}");
}
