/**
 * API REST VMGUARD - Serveur HTTP du service
 *
 * RÔLE :
 * Ce module expose l'API REST du service pour les requêtes de surface
 * d'attaque et de statistiques. Seule interface entre l'extérieur et le cœur.
 *
 * FONCTIONNEMENT :
 * - Serveur Axum avec routes /health, /api/v1/attack, /api/v1/stats
 * - Sérialisation JSON automatique des réponses
 * - Gestion erreurs HTTP standardisée (400, 404) avec les corps d'erreur
 *   textuels historiques du service
 * - Chaque requête (succès ou échec) nourrit le tracker de stats avec
 *   sa durée de traitement
 */

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use crate::access::AccessModel;
use crate::snapshot;
use crate::state::{new_model, SharedModel};
use crate::stats::{StatsData, StatsTracker};

#[derive(Clone)]
pub struct AppState {
    pub model: SharedModel<AccessModel>,
    pub stats: StatsTracker,
}

impl AppState {
    pub fn new(model: AccessModel) -> Self {
        let stats = StatsTracker::new(model.vm_count());
        Self { model: new_model(model), stats }
    }

    /// Remplace le modèle entier sous le verrou en écriture puis remet les
    /// stats à zéro : un lecteur voit l'ancien modèle ou le nouveau,
    /// jamais un état partiel.
    pub fn install_model(&self, model: AccessModel) {
        let vm_count = model.vm_count();
        *self.model.write() = model;
        self.stats.reset(vm_count);
    }

    /// Recharge le snapshot depuis le disque et swap le modèle.
    /// Le nouveau modèle est entièrement construit avant le swap.
    pub async fn reload_from<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let snap = snapshot::load_snapshot(path).await?;
        self.install_model(AccessModel::load(snap.vms, snap.fw_rules));
        Ok(())
    }
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/v1/attack", get(get_attack))
        .route("/api/v1/stats", get(get_stats))
        .with_state(app_state)
}

// GET /api/v1/attack?vm_id=... (VMs ayant accès à la machine donnée)
async fn get_attack(
    State(app): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let started = Instant::now();
    println!("[http] handling attack request");

    let response = match params.get("vm_id") {
        Some(vm_id) => match app.model.read().find_attackers(vm_id) {
            Ok(attacker_ids) => Json(attacker_ids).into_response(),
            Err(e) => {
                eprintln!("[http] {e}");
                (StatusCode::NOT_FOUND, format!("Error: {e}")).into_response()
            }
        },
        None => {
            let msg = "No virtual machine id was provided. Please specify an vm_id.";
            eprintln!("[http] {msg}");
            (StatusCode::BAD_REQUEST, format!("Error: {msg}")).into_response()
        }
    };

    app.stats.record_query(started.elapsed().as_secs_f64());
    response
}

// GET /api/v1/stats (compteurs du modèle courant)
// Lecture pure d'abord, enregistrement de sa propre durée ensuite :
// une requête stats compte comme requête mais ne se voit pas elle-même.
async fn get_stats(State(app): State<AppState>) -> Json<StatsData> {
    let started = Instant::now();
    println!("[http] handling stats request");

    let stats = app.stats.snapshot();

    app.stats.record_query(started.elapsed().as_secs_f64());
    Json(stats)
}
