use crate::state::{new_state, Shared};
use serde::Serialize;

/// Compteurs de requêtes du modèle courant. Sérialise directement
/// au format exposé par /api/v1/stats.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatsData {
    pub vm_count: usize,
    pub request_count: u64,
    pub average_request_time: f64,
}

impl StatsData {
    fn fresh(vm_count: usize) -> Self {
        Self { vm_count, request_count: 0, average_request_time: 0.0 }
    }
}

/// Tracker clonable partagé entre handlers. `record_query` est le seul
/// mutateur : la moyenne et le compteur bougent sous un même verrou,
/// deux mises à jour concurrentes ne peuvent pas s'entrelacer.
#[derive(Clone)]
pub struct StatsTracker {
    inner: Shared<StatsData>,
}

impl StatsTracker {
    pub fn new(vm_count: usize) -> Self {
        Self { inner: new_state(StatsData::fresh(vm_count)) }
    }

    /// Moyenne en ligne : (n * avg + d) / (n + 1), puis n += 1.
    /// Appelé exactement une fois par requête traitée, quel que soit l'issue.
    pub fn record_query(&self, duration_secs: f64) {
        let mut stats = self.inner.lock();
        let n = stats.request_count as f64;
        stats.average_request_time =
            (n * stats.average_request_time + duration_secs) / (n + 1.0);
        stats.request_count += 1;
    }

    /// Lecture pure, sans effet de bord : pollable librement par le monitoring.
    pub fn snapshot(&self) -> StatsData {
        self.inner.lock().clone()
    }

    /// Les stats sont scopées à la vie du modèle courant :
    /// un reload du modèle repart de zéro.
    pub fn reset(&self, vm_count: usize) {
        *self.inner.lock() = StatsData::fresh(vm_count);
    }
}
