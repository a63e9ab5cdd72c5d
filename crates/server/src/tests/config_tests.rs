use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn defaults_listen_on_local_port_5000() {
    let settings = Settings::default();
    assert_eq!(settings.server_bind, "127.0.0.1:5000");
    assert_eq!(settings.body_limit_bytes, 64 * 1024);
    assert_eq!(settings.status_log_path, PathBuf::from("statuslog.txt"));
}

#[test]
fn file_values_override_defaults() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("value_server_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join(CONFIG_FILE);
    fs::write(
        &path,
        "bind_addr = \"0.0.0.0:8080\"\nbody_limit_bytes = 1024\nstatus_log = \"/var/log/machine.txt\"\n",
    )
    .expect("write");

    let mut settings = Settings::default();
    apply_file(&mut settings, &path);
    assert_eq!(settings.server_bind, "0.0.0.0:8080");
    assert_eq!(settings.body_limit_bytes, 1024);
    assert_eq!(settings.status_log_path, PathBuf::from("/var/log/machine.txt"));

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn missing_or_malformed_file_keeps_defaults() {
    let mut settings = Settings::default();
    apply_file(&mut settings, Path::new("/nonexistent/server.toml"));
    assert_eq!(settings, Settings::default());

    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("value_server_bad_config_{suffix}.toml"));
    fs::write(&path, "bind_addr = [").expect("write");
    apply_file(&mut settings, &path);
    assert_eq!(settings, Settings::default());
    fs::remove_file(path).expect("cleanup");
}

#[test]
fn app_prefixed_env_wins_over_legacy_name() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_from(&[
            ("SERVER_BIND", "127.0.0.1:7000"),
            ("APP__BIND_ADDR", "127.0.0.1:7001"),
            ("APP__BODY_LIMIT_BYTES", "2048"),
        ]),
    );
    assert_eq!(settings.server_bind, "127.0.0.1:7001");
    assert_eq!(settings.body_limit_bytes, 2048);
}

#[test]
fn invalid_body_limit_is_ignored() {
    let mut settings = Settings::default();
    apply_env(&mut settings, env_from(&[("APP__BODY_LIMIT_BYTES", "lots")]));
    assert_eq!(settings.body_limit_bytes, Settings::default().body_limit_bytes);
}

#[test]
fn status_log_path_comes_from_env() {
    let mut settings = Settings::default();
    apply_env(&mut settings, env_from(&[("APP__STATUS_LOG", "/tmp/status.txt")]));
    assert_eq!(settings.status_log_path, PathBuf::from("/tmp/status.txt"));
}
