// End-to-end checks of the binary's failure paths. None of these reach the
// point of opening a raw socket, so they run without privileges.

use std::path::PathBuf;
use std::process::{Command, Output};

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sdn-traffic-gen"))
}

fn run(args: &[&str]) -> Output {
    binary()
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .expect("failed to run sdn-traffic-gen")
}

fn write_topology(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("{}_{}.txt", name, std::process::id()));
    std::fs::write(&path, contents).expect("failed to write topology fixture");
    path
}

#[test]
fn missing_argument_prints_usage() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr: {stderr}");
}

#[test]
fn help_exits_cleanly() {
    let output = run(&["--help"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("DST_HOST"));
}

#[test]
fn unknown_host_exits_before_sending() {
    let output = run(&["h9"]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid host to send to: h9"), "stderr: {stderr}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Sent"));
    assert!(!stdout.contains("###[ Ethernet ]###"));
}

#[test]
fn missing_interface_is_fatal() {
    let output = run(&["h2", "--iface", "nosuch-eth9"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("No interface for output: nosuch-eth9"),
        "stderr: {stderr}"
    );
}

#[test]
fn bad_topology_header_is_fatal() {
    let path = write_topology("bad_topo", "routers 2\nhosts 3\nh1 s1\n");
    let output = run(&["h2", "--topo", path.to_str().unwrap(), "--iface", "nosuch-eth9"]);
    let _ = std::fs::remove_file(&path);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to parse topology"), "stderr: {stderr}");
}

#[test]
fn valid_topology_gets_as_far_as_the_interface() {
    let path = write_topology("good_topo", "switches 2\nhosts 3\nh1 s1\nh2 s1\n");
    let output = run(&["h2", "--topo", path.to_str().unwrap(), "--iface", "nosuch-eth9"]);
    let _ = std::fs::remove_file(&path);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("Failed to parse topology"), "stderr: {stderr}");
    assert!(stderr.contains("No interface for output"), "stderr: {stderr}");
}

#[test]
fn zero_port_count_is_rejected() {
    let output = run(&["h1", "--ports", "0"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid traffic profile"), "stderr: {stderr}");
}

#[test]
fn payload_above_one_frame_is_rejected() {
    let output = run(&["h1", "--max-payload", "70000", "--iface", "nosuch-eth9"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid traffic profile"), "stderr: {stderr}");
    assert!(!stderr.contains("No interface for output"), "stderr: {stderr}");
}
