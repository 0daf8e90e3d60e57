use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Machine virtuelle telle que décrite dans le snapshot.
/// Les tags en doublon s'effondrent via le set ; une clé requise absente
/// ou à null fait échouer le décodage (pas de champ silencieusement vide).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VirtualMachine {
    pub vm_id: String,
    pub tags: HashSet<String>,
}

/// Règle firewall directionnelle : toute VM portant `source_tag`
/// peut atteindre toute VM portant `dest_tag`. Jamais symétrique.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FirewallRule {
    pub source_tag: String,
    pub dest_tag: String,
}

/// Forme brute du fichier snapshot : les clés de premier niveau
/// peuvent manquer (tolérées comme collections vides par le loader).
#[derive(Debug, Deserialize)]
pub struct RawSnapshot {
    pub vms: Option<Vec<VirtualMachine>>,
    pub fw_rules: Option<Vec<FirewallRule>>,
}
