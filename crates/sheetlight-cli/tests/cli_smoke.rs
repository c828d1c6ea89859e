use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn input_file(content: &str) -> Result<NamedTempFile, Box<dyn std::error::Error>> {
    let mut tmp = NamedTempFile::new()?;
    write!(tmp, "{content}")?;
    Ok(tmp)
}

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("sheetlight-cli"))
}

#[test]
fn help_works() -> Result<(), Box<dyn std::error::Error>> {
    cli().arg("--help").assert().success();
    Ok(())
}

#[test]
fn parse_outputs_grid_json() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = input_file("a,1\r\nb,true\r\n")?;
    let output = cli().arg(tmp.path()).output()?;
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(
        v,
        serde_json::json!({"headers": [], "isTable": true, "rows": [["a", 1], ["b", true]]})
    );
    Ok(())
}

#[test]
fn dialect_flags_apply() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = input_file("id;name\n7;x\n")?;
    let output = cli()
        .args(["--delimiter", "semicolon", "--line-break", "lf", "--headers", "--no-coerce"])
        .arg(tmp.path())
        .output()?;
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(v["headers"], serde_json::json!(["id", "name"]));
    assert_eq!(v["rows"], serde_json::json!([["7", "x"]]));
    Ok(())
}

#[test]
fn dialect_file_is_read() -> Result<(), Box<dyn std::error::Error>> {
    let dialect = input_file(r#"{"delimiter": "|", "brk": "\n"}"#)?;
    let tmp = input_file("1|2\n3|4")?;
    let output = cli()
        .arg("--dialect")
        .arg(dialect.path())
        .args(["--cell", "@bottom", "@right"])
        .arg(tmp.path())
        .output()?;
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout)?.trim(), "4");
    Ok(())
}

#[test]
fn range_prints_rows() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = input_file("a,b,c\r\nd,e,f")?;
    let output = cli().args(["--range", "B1", "@right-bottom"]).arg(tmp.path()).output()?;
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(v, serde_json::json!([["b", "c"], ["e", "f"]]));
    Ok(())
}

#[test]
fn encode_rows_to_text() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = input_file(r#"[["a,b", 1], [null, true]]"#)?;
    cli()
        .args(["--encode", "--line-break", "lf"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout("\"a,b\",1\nnull,true\n");
    Ok(())
}

#[test]
fn encode_accepts_parse_output() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = input_file(r#"{"headers": ["k"], "isTable": true, "rows": [["v"]]}"#)?;
    cli()
        .args(["--encode", "--delimiter", "tab"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout("\"k\"\r\n\"v\"\n");
    Ok(())
}

#[test]
fn parse_errors_show_a_diagnostic() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = input_file("a,\"b")?;
    cli()
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("error here"))
        .stderr(predicate::str::contains("failed to parse input"));

    cli().arg("--lenient").arg(tmp.path()).assert().success();
    Ok(())
}

#[test]
fn missing_cell_fails() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = input_file("a,b")?;
    cli()
        .args(["--cell", "5", "A"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no cell"));
    Ok(())
}
