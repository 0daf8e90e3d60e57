use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

pub type Shared<T> = Arc<Mutex<T>>;

/// Lecteurs concurrents sans contention ; le swap complet du modèle
/// prend le verrou en écriture et se sérialise contre les lectures en vol.
pub type SharedModel<T> = Arc<RwLock<T>>;

pub fn new_state<T>(value: T) -> Shared<T> {
    Arc::new(Mutex::new(value))
}

pub fn new_model<T>(value: T) -> SharedModel<T> {
    Arc::new(RwLock::new(value))
}
