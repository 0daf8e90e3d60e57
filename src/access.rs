/**
 * MODÈLE D'ACCÈS - Calcul de la surface d'attaque par tags
 *
 * RÔLE :
 * Ce module répond à la question "qui peut atteindre cette VM ?" sur un parc
 * chargé une fois en mémoire : des VMs étiquetées par tags et des règles
 * firewall directionnelles source_tag -> dest_tag.
 *
 * FONCTIONNEMENT :
 * - résolution de la cible par scan linéaire sur vm_id
 * - collecte des source_tags de toutes les règles dont le dest_tag
 *   appartient aux tags de la cible
 * - toute VM dont les tags intersectent cet ensemble est un attaquant
 *   potentiel (la cible elle-même incluse si ses propres tags matchent)
 *
 * Le modèle est immuable après construction : aucune opération ne le mute,
 * les lectures concurrentes sont donc sûres sans verrou interne.
 */

use crate::models::{FirewallRule, VirtualMachine};
use std::collections::HashSet;

#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("Virtual machine with id {0} was not found")]
    NotFound(String),
}

pub struct AccessModel {
    vms: Vec<VirtualMachine>,
    fw_rules: Vec<FirewallRule>,
}

impl AccessModel {
    /// Construit le modèle par copie directe des collections validées.
    /// Pas de dédoublonnage ni de tri : l'ordre du snapshot fait foi.
    pub fn load(vms: Vec<VirtualMachine>, fw_rules: Vec<FirewallRule>) -> Self {
        Self { vms, fw_rules }
    }

    pub fn vm_count(&self) -> usize {
        self.vms.len()
    }

    /// Retourne les ids des VMs ayant accès à la VM donnée, dans l'ordre
    /// de la collection. Seule erreur possible : vm_id inconnu.
    pub fn find_attackers(&self, vm_id: &str) -> Result<Vec<String>, AccessError> {
        let target = self.vm_by_id(vm_id)?;
        let granting_tags = self.tags_granted_by_rules(&target.tags);

        Ok(self
            .vms
            .iter()
            .filter(|vm| !vm.tags.is_disjoint(&granting_tags))
            .map(|vm| vm.vm_id.clone())
            .collect())
    }

    // premier enregistrement qui matche ; l'unicité des ids est
    // la responsabilité du producteur du snapshot
    fn vm_by_id(&self, vm_id: &str) -> Result<&VirtualMachine, AccessError> {
        self.vms
            .iter()
            .find(|vm| vm.vm_id == vm_id)
            .ok_or_else(|| AccessError::NotFound(vm_id.to_string()))
    }

    /// Ensemble des source_tags autorisés à atteindre l'un des tags donnés.
    /// Plusieurs règles sur un même dest_tag = union des sources.
    fn tags_granted_by_rules(&self, dest_tags: &HashSet<String>) -> HashSet<String> {
        self.fw_rules
            .iter()
            .filter(|rule| dest_tags.contains(&rule.dest_tag))
            .map(|rule| rule.source_tag.clone())
            .collect()
    }
}
