//! End-to-end transform tests against stand-in holehe processes
//!
//! The invoker runs `<binary> <identifier>`; with `/bin/sh` as the binary the
//! identifier is a script path, which lets each test script holehe's output.

use holehe_maltego::config::{Config, ConfigOverrides};
use holehe_maltego::entities::EntityKind;
use holehe_maltego::invoker::ProcessInvoker;
use holehe_maltego::patterns::PatternRegistry;
use holehe_maltego::transform::{response_for, Transform};
use holehe_maltego::transport::{render, OutputFormat};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn write_script(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body).unwrap();
    path
}

fn sh_transform(timeout: Duration) -> Transform {
    Transform::new(
        ProcessInvoker::new(PathBuf::from("/bin/sh"), timeout),
        Arc::new(PatternRegistry::builtin().unwrap()),
        "holehe",
    )
}

fn write_config(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, body).unwrap();
    path
}

const VALID_CONFIG: &str = r#"
[_meta]
schema_version = "1.0.0"

[tool]
relative_path = "venv/bin/holehe"
timeout_secs = 30

[output]
source = "holehe"
"#;

fn identifier(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[cfg(unix)]
#[test]
fn test_successful_run() {
    let dir = TempDir::new().unwrap();
    let script = write_script(
        &dir,
        "holehe.sh",
        r#"
echo "[+] amazon.com"
echo "[-] docker.com"
echo "[x] instagram.com"
echo "[+] amazon.com"
echo "Traceback: this goes to stderr" 1>&2
echo "121 websites checked in 10.11 seconds"
echo "Twitter : @palenath"
echo "Github : https://github.com/megadose/holehe"
"#,
    );

    let response = sh_transform(Duration::from_secs(10)).run(identifier(&script));

    let kinds: Vec<EntityKind> = response.entities.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            EntityKind::Website,
            EntityKind::Website,
            EntityKind::Website,
            EntityKind::Phrase,
            EntityKind::Phrase,
            EntityKind::Url,
        ]
    );
    assert_eq!(response.entities[0].value, "amazon.com");
    assert_eq!(response.entities[2].field("status"), Some("rate_limited"));
    assert!(response.entities[3].value.ends_with("checked=121 | seconds=10.11"));
    assert!(response
        .entities
        .iter()
        .all(|e| !e.value.contains("Traceback")));
}

#[cfg(unix)]
#[test]
fn test_identifier_is_sole_argument() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "args.sh", "echo \"[+] argc-$#\"\n");

    let response = sh_transform(Duration::from_secs(10)).run(identifier(&script));

    // sh consumes the script path as $0, leaving no further arguments
    assert_eq!(response.entities[0].value, "argc-0");
    assert_eq!(
        response.entities[0].field("input_email"),
        Some(identifier(&script))
    );
}

#[cfg(unix)]
#[test]
fn test_non_zero_exit_still_parsed() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "fails.sh", "echo \"[+] amazon.com\"\nexit 3\n");

    let response = sh_transform(Duration::from_secs(10)).run(identifier(&script));

    assert_eq!(response.entities[0].value, "amazon.com");
    assert_eq!(response.len(), 2);
}

#[cfg(unix)]
#[test]
fn test_silent_run_yields_summary_and_fallback() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "silent.sh", "exit 0\n");

    let response = sh_transform(Duration::from_secs(10)).run(identifier(&script));

    assert_eq!(response.len(), 2);
    assert!(response.entities[0].value.starts_with("HOLEHE Summary for"));
    assert!(response.entities[1]
        .value
        .starts_with("HOLEHE executed but no domains were parsed for"));
}

#[cfg(unix)]
#[test]
fn test_timeout_yields_single_execution_error() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "hangs.sh", "echo \"[+] amazon.com\"\nexec sleep 30\n");

    let started = std::time::Instant::now();
    let response = sh_transform(Duration::from_secs(1)).run(identifier(&script));

    assert!(started.elapsed() < Duration::from_secs(20));
    assert_eq!(response.len(), 1);
    assert_eq!(
        response.entities[0].value,
        "HOLEHE: execution error: Command '/bin/sh' timed out after 1 seconds"
    );
}

#[test]
fn test_missing_binary_from_config() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("venv").join("bin").join("holehe");

    let mut config = Config::default();
    config.tool.binary = Some(missing.clone());

    let response = Transform::from_config(&config)
        .unwrap()
        .run("someone@example.com");

    assert_eq!(response.len(), 1);
    assert_eq!(
        response.entities[0].value,
        format!("HOLEHE: binary not found: {}", missing.display())
    );
    assert!(response.entities[0].fields.is_empty());
}

#[cfg(unix)]
#[test]
fn test_config_file_drives_transform() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        r#"
[_meta]
schema_version = "1.0.0"

[tool]
binary = "/bin/sh"
relative_path = "venv/bin/holehe"
timeout_secs = 30

[output]
source = "holehe-lab"
format = "json"
"#,
    )
    .unwrap();
    let script = write_script(&dir, "holehe.sh", "echo \"[+] amazon.com\"\n");

    let config = Config::load(&config_path).unwrap();
    assert_eq!(config.output.format, OutputFormat::Json);

    let response = Transform::from_config(&config)
        .unwrap()
        .run(identifier(&script));
    assert_eq!(response.entities[0].field("source"), Some("holehe-lab"));

    let json = render(&response, config.output.format).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["entities"][0]["type"], "maltego.Website");
    assert_eq!(value["entities"][0]["value"], "amazon.com");
}

#[test]
fn test_invalid_config_file_rejected() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        r#"
[_meta]
schema_version = "1.0.0"

[tool]
relative_path = "venv/bin/holehe"
timeout_secs = 0

[output]
source = "holehe"
"#,
    )
    .unwrap();

    assert!(Config::load(&config_path).is_err());
}

#[test]
fn test_init_config_round_trip() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");

    Config::default().save(&config_path).unwrap();
    let loaded = Config::load(&config_path).unwrap();

    assert_eq!(loaded.tool.timeout_secs, 180);
    assert_eq!(loaded.output.source, "holehe");
}

#[test]
fn test_invalid_config_yields_single_configuration_error() {
    let dir = TempDir::new().unwrap();
    let config_path = write_config(
        &dir,
        r#"
[_meta]
schema_version = "1.0.0"

[tool]
relative_path = "venv/bin/holehe"
timeout_secs = 0

[output]
source = "holehe"
"#,
    );

    let config = Config::load_with_overrides(Some(&config_path), &ConfigOverrides::default());
    let response = response_for(config.as_ref(), "someone@example.com", None);

    assert_eq!(response.len(), 1);
    assert!(response.entities[0]
        .value
        .starts_with("HOLEHE: configuration error: "));
    assert!(response.entities[0].value.contains("tool.timeout_secs"));
    assert!(response.entities[0].fields.is_empty());
}

#[test]
fn test_bad_pattern_yields_single_configuration_error() {
    let dir = TempDir::new().unwrap();
    let config_path = write_config(
        &dir,
        &format!(
            "{}{}",
            VALID_CONFIG,
            r#"
[patterns]
checked_summary = '(unclosed'
key_value = '^(\w+)\s*:\s*(.+)$'
"#
        ),
    );

    let config = Config::load_with_overrides(Some(&config_path), &ConfigOverrides::default());
    let response = response_for(config.as_ref(), "someone@example.com", Some("[+] a.com"));

    assert_eq!(response.len(), 1);
    assert!(response.entities[0]
        .value
        .starts_with("HOLEHE: configuration error: "));
    assert!(response.entities[0].value.contains("patterns"));
}

#[test]
fn test_command_line_timeout_is_validated() {
    let dir = TempDir::new().unwrap();
    let config_path = write_config(&dir, VALID_CONFIG);

    for timeout in [0, 99_999] {
        let overrides = ConfigOverrides {
            timeout_secs: Some(timeout),
            ..ConfigOverrides::default()
        };
        let config = Config::load_with_overrides(Some(&config_path), &overrides);
        assert!(config.is_err(), "timeout {} accepted", timeout);

        let response = response_for(config.as_ref(), "someone@example.com", None);
        assert_eq!(response.len(), 1);
        assert!(response.entities[0]
            .value
            .starts_with("HOLEHE: configuration error: "));
    }
}

#[test]
fn test_command_line_overrides_applied() {
    let dir = TempDir::new().unwrap();
    let config_path = write_config(&dir, VALID_CONFIG);

    let overrides = ConfigOverrides {
        binary: Some(PathBuf::from("/opt/holehe/bin/holehe")),
        timeout_secs: Some(60),
        format: Some(OutputFormat::Json),
    };
    let config = Config::load_with_overrides(Some(&config_path), &overrides).unwrap();

    assert_eq!(config.tool.timeout_secs, 60);
    assert_eq!(config.output.format, OutputFormat::Json);
    assert_eq!(
        config.tool.binary.as_deref(),
        Some(Path::new("/opt/holehe/bin/holehe"))
    );
}
