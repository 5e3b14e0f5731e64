use std::{collections::HashMap, fs, path::Path};

#[derive(Debug, Clone)]
pub struct Settings {
    pub service_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_url: "http://127.0.0.1:8000".into(),
        }
    }
}

/// Precedence, lowest to highest: built-in default, dashboard.toml (the
/// working directory copy, or the per-user config dir when absent),
/// GATE_SERVICE_URL / APP__SERVICE_URL, then the CLI flag.
pub fn load_settings(config_path: Option<&Path>, cli_service_url: Option<String>) -> Settings {
    let mut settings = Settings::default();

    let raw = match config_path {
        Some(path) => fs::read_to_string(path).ok(),
        None => fs::read_to_string("dashboard.toml").ok().or_else(|| {
            let path = dirs::config_dir()?.join("smartwarehouse").join("dashboard.toml");
            fs::read_to_string(path).ok()
        }),
    };
    if let Some(raw) = raw {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("service_url") {
                settings.service_url = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("GATE_SERVICE_URL") {
        settings.service_url = v;
    }
    if let Ok(v) = std::env::var("APP__SERVICE_URL") {
        settings.service_url = v;
    }

    if let Some(v) = cli_service_url {
        settings.service_url = v;
    }

    settings
}

#[cfg(test)]
mod tests {
    use std::{
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    #[test]
    fn defaults_to_local_service() {
        let settings = load_settings(Some(Path::new("/nonexistent/dashboard.toml")), None);
        assert_eq!(settings.service_url, "http://127.0.0.1:8000");
    }

    #[test]
    fn settings_file_overrides_default() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("dashboard_gui_test_{suffix}.toml"));
        fs::write(&path, "service_url = \"http://gate.internal:8000\"\n").expect("write config");

        let settings = load_settings(Some(&path), None);
        assert_eq!(settings.service_url, "http://gate.internal:8000");

        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn cli_flag_wins_over_settings_file() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("dashboard_gui_test_cli_{suffix}.toml"));
        fs::write(&path, "service_url = \"http://gate.internal:8000\"\n").expect("write config");

        let settings = load_settings(Some(&path), Some("http://10.0.0.5:9000".to_string()));
        assert_eq!(settings.service_url, "http://10.0.0.5:9000");

        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn unparseable_settings_file_falls_back_to_default() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("dashboard_gui_test_bad_{suffix}.toml"));
        fs::write(&path, "service_url = [not, toml, strings]").expect("write config");

        let settings = load_settings(Some(&path), None);
        assert_eq!(settings.service_url, "http://127.0.0.1:8000");

        fs::remove_file(path).expect("cleanup");
    }
}
