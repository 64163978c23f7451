use std::path::PathBuf;

use assert_cmd::cargo;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn path_to_test_resource(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("resources");
    path.push("test");
    path.push(name);
    path
}

#[test]
fn version_when_run_then_prints_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("ezdis"));
    cmd.arg("version");
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("ezdis version"));

    Ok(())
}

#[test]
fn decode_when_valid_hex_then_prints_infix() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("ezdis"));
    cmd.arg("decode").arg("41 42 8D 43 8F A1");
    cmd.assert().success().stdout("(1 + 2) * 3\n");

    Ok(())
}

#[test]
fn decode_when_stack_underflow_then_err() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("ezdis"));
    cmd.arg("decode").arg("418DA1");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("stack underflow"));

    Ok(())
}

#[test]
fn decode_when_invalid_hex_then_err() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("ezdis"));
    cmd.arg("decode").arg("xyz");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid hex input"));

    Ok(())
}

#[test]
fn decode_when_command_without_metadata_then_err() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("ezdis"));
    cmd.arg("decode").arg("4142 8B060C000000 A1");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no argument count for command 6:12"));

    Ok(())
}

#[test]
fn decode_when_commands_file_then_uses_names() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("ezdis"));
    cmd.arg("decode")
        .arg("4142 8B060C000000 A1")
        .arg("--commands")
        .arg(path_to_test_resource("commands.json"));
    cmd.assert().success().stdout("SetEventFlag(1, 2)\n");

    Ok(())
}

#[test]
fn decode_when_file_then_prints_infix() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("ezdis"));
    cmd.arg("decode")
        .arg("--file")
        .arg(path_to_test_resource("add.bin"));
    cmd.assert().success().stdout("1 + 2\n");

    Ok(())
}

#[test]
fn decode_when_file_does_not_exist_then_err() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let missing = dir.path().join("missing.bin");

    let mut cmd = Command::new(cargo::cargo_bin!("ezdis"));
    cmd.arg("decode").arg("--file").arg(&missing);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unable to read"));

    Ok(())
}

#[test]
fn decode_when_require_terminator_and_missing_then_err() -> Result<(), Box<dyn std::error::Error>>
{
    let mut cmd = Command::new(cargo::cargo_bin!("ezdis"));
    cmd.arg("decode").arg("41").arg("--require-terminator");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("end-marker"));

    Ok(())
}

#[test]
fn disasm_when_valid_hex_then_prints_json_listing() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("ezdis"));
    cmd.arg("disasm").arg("8200010000 A1");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"instruction\": \"PUSH_I32 256\""))
        .stdout(predicate::str::contains("\"text\": \"256\""));

    Ok(())
}

#[test]
fn roundtrip_when_valid_hex_then_identical() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("ezdis"));
    cmd.arg("roundtrip").arg("800000803F A1");
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("identical: 6 bytes, terminated"));

    Ok(())
}

#[test]
fn decode_when_log_file_then_writes_log() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let log_path = dir.path().join("ezdis.log");

    let mut cmd = Command::new(cargo::cargo_bin!("ezdis"));
    cmd.arg("-vvv")
        .arg("--log-file")
        .arg(&log_path)
        .arg("decode")
        .arg("41A1");
    cmd.assert().success().stdout("1\n");

    let log = std::fs::read_to_string(&log_path)?;
    assert!(log.contains("Decoded 2 bytes"), "{log}");

    Ok(())
}
