use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GuardConfig {
    pub snapshot_path: String,
    pub http: HttpConf,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HttpConf {
    pub host: String,
    pub port: u16,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            snapshot_path: "data/snapshot.json".into(),
            http: HttpConf { host: "0.0.0.0".into(), port: 8080 },
        }
    }
}

pub async fn load_config() -> GuardConfig {
    let path = std::env::var("VMGUARD_CONFIG").unwrap_or_else(|_| "vmguard.yaml".into());
    let mut cfg = if Path::new(&path).exists() {
        let txt = fs::read_to_string(&path).await.unwrap_or_default();
        if txt.trim().is_empty() {
            GuardConfig::default()
        } else {
            serde_yaml::from_str(&txt).unwrap_or_else(|e| {
                eprintln!("[vmguard] config invalide: {e}");
                GuardConfig::default()
            })
        }
    } else {
        eprintln!("[vmguard] pas de vmguard.yaml, usage config par défaut");
        GuardConfig::default()
    };

    // VMGUARD_SNAPSHOT prioritaire sur le fichier de config
    if let Ok(p) = std::env::var("VMGUARD_SNAPSHOT") {
        cfg.snapshot_path = p;
    }
    cfg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = GuardConfig::default();
        assert_eq!(cfg.snapshot_path, "data/snapshot.json");
        assert_eq!(cfg.http.port, 8080);
        assert_eq!(cfg.http.host, "0.0.0.0");
    }

    #[test]
    fn test_parse_yaml_config() {
        let yaml = "snapshot_path: /var/lib/vmguard/snap.json\nhttp:\n  host: 127.0.0.1\n  port: 9090\n";
        let cfg: GuardConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.snapshot_path, "/var/lib/vmguard/snap.json");
        assert_eq!(cfg.http.host, "127.0.0.1");
        assert_eq!(cfg.http.port, 9090);
    }
}
