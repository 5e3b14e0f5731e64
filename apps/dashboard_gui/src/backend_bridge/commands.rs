//! Backend commands queued from UI to backend worker.

use std::path::PathBuf;

pub enum BackendCommand {
    ScanEntrance { image_path: PathBuf },
    SubmitOrder { text: String },
    CheckHealth,
}
