use crate::pulse::PulseMonitor;
use crate::store::StoreSet;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_dir: PathBuf,
    pub stores: Arc<Mutex<StoreSet>>,
    pub pulse: Arc<Mutex<PulseMonitor>>,
}

impl AppState {
    pub fn new(data_dir: PathBuf, stores: StoreSet, pulse: PulseMonitor) -> Self {
        Self {
            data_dir,
            stores: Arc::new(Mutex::new(stores)),
            pulse: Arc::new(Mutex::new(pulse)),
        }
    }
}
