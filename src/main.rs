/**
 * VMGUARD - Point d'entrée principal du service
 *
 * RÔLE : Orchestration des modules : config, snapshot, modèle d'accès, stats, HTTP.
 * Bootstrap du service complet avec gestion d'erreurs fatales au démarrage.
 *
 * ARCHITECTURE : Snapshot JSON chargé une fois au boot → modèle d'accès immuable
 * en mémoire + tracker de stats, servis via API REST.
 * UTILITÉ : Répondre à "qui peut atteindre cette VM ?" sur le parc chargé.
 */

mod access;
mod config;
mod http;
mod models;
mod snapshot;
mod state;
mod stats;

use crate::access::AccessModel;
use crate::config::load_config;
use crate::http::AppState;

use std::net::SocketAddr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    // Charger les variables d'environnement depuis .env (si présent)
    dotenvy::dotenv().ok(); // Ok si .env n'existe pas

    let cfg = load_config().await;

    // Snapshot illisible ou invalide = fatal : on ne sert pas avec des données douteuses
    let snap = match snapshot::load_snapshot(&cfg.snapshot_path).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[vmguard] failed to load snapshot '{}': {}", cfg.snapshot_path, e);
            std::process::exit(1);
        }
    };
    println!(
        "[vmguard] loaded snapshot from '{}' ({} vms, {} fw rules)",
        cfg.snapshot_path,
        snap.vms.len(),
        snap.fw_rules.len()
    );

    // fabrique l'état unique pour Axum (modèle + stats scopées à ce modèle)
    let app_state = AppState::new(AccessModel::load(snap.vms, snap.fw_rules));

    // HTTP
    let app = http::build_router(app_state);

    let addr: SocketAddr = match format!("{}:{}", cfg.http.host, cfg.http.port).parse() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("[vmguard] invalid bind address: {e}");
            std::process::exit(1);
        }
    };
    println!("[vmguard] listening on http://{addr}");
    let listener = TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
