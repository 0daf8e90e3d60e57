use crate::models::{FirewallRule, RawSnapshot, VirtualMachine};
use std::path::Path;
use tokio::fs;

/// Erreurs de chargement du snapshot. Les deux sont fatales au démarrage :
/// un fichier illisible ou un enregistrement invalide interdit de servir.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Snapshot validé, prêt à construire le modèle d'accès.
#[derive(Debug)]
pub struct Snapshot {
    pub vms: Vec<VirtualMachine>,
    pub fw_rules: Vec<FirewallRule>,
}

/// Lit et décode le fichier snapshot JSON.
/// Une clé de premier niveau absente vaut collection vide (avec warning) ;
/// un enregistrement avec champ requis manquant ou null échoue le décodage.
pub async fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Snapshot, SnapshotError> {
    let txt = fs::read_to_string(&path).await?;
    let raw: RawSnapshot = serde_json::from_str(&txt)?;

    let vms = raw.vms.unwrap_or_else(|| {
        eprintln!("[snapshot] warning: no 'vms' key in snapshot, using empty list");
        Vec::new()
    });
    let fw_rules = raw.fw_rules.unwrap_or_else(|| {
        eprintln!("[snapshot] warning: no 'fw_rules' key in snapshot, using empty list");
        Vec::new()
    });

    Ok(Snapshot { vms, fw_rules })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::TempDir;

    fn write_fixture(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std_fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_fail_on_non_existing_file() {
        let err = load_snapshot("unexisting.json").await.unwrap_err();
        assert!(matches!(err, SnapshotError::Io(_)));
    }

    #[tokio::test]
    async fn test_load_valid_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(
            &dir,
            "snap.json",
            r#"{
                "vms": [
                    {"vm_id": "vm-a211de", "tags": ["web"]},
                    {"vm_id": "vm-c7bac01a07", "tags": ["db"]}
                ],
                "fw_rules": [
                    {"source_tag": "db", "dest_tag": "web"}
                ]
            }"#,
        );

        let snap = load_snapshot(&path).await.unwrap();
        assert_eq!(snap.vms.len(), 2);
        assert_eq!(snap.fw_rules.len(), 1);
        assert_eq!(snap.vms[0].vm_id, "vm-a211de");
        assert!(snap.vms[0].tags.contains("web"));
        assert_eq!(snap.fw_rules[0].source_tag, "db");
        assert_eq!(snap.fw_rules[0].dest_tag, "web");
    }

    #[tokio::test]
    async fn test_fail_on_record_with_missing_field() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(
            &dir,
            "snap.json",
            r#"{"vms": [{"vm_id": "vm-1"}], "fw_rules": []}"#,
        );

        let err = load_snapshot(&path).await.unwrap_err();
        assert!(matches!(err, SnapshotError::Json(_)));
    }

    #[tokio::test]
    async fn test_fail_on_record_with_null_field() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(
            &dir,
            "snap.json",
            r#"{"vms": [{"vm_id": null, "tags": ["web"]}], "fw_rules": []}"#,
        );

        let err = load_snapshot(&path).await.unwrap_err();
        assert!(matches!(err, SnapshotError::Json(_)));
    }

    #[tokio::test]
    async fn test_missing_top_level_keys_default_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, "snap.json", r#"{}"#);

        let snap = load_snapshot(&path).await.unwrap();
        assert!(snap.vms.is_empty());
        assert!(snap.fw_rules.is_empty());
    }

    #[tokio::test]
    async fn test_fail_on_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, "snap.json", "{ not json");

        let err = load_snapshot(&path).await.unwrap_err();
        assert!(matches!(err, SnapshotError::Json(_)));
    }
}
