use std::sync::mpsc::Receiver;

use thiserror::Error;

/// Raw image buffer as delivered by the camera. The pipeline never looks
/// inside it; it is handed to the hand-pose detector as-is.
pub type Frame = Vec<u8>;

#[derive(Debug, Clone)]
pub enum DeviceCameraEvent {
    Connected,
    Disconnected,
}

#[derive(Debug, Error)]
pub enum CameraError {
    #[error("camera is not running")]
    NotRunning,
}

pub trait DeviceCamera: Send + Sync {
    fn start(&self) -> Result<(), CameraError>;
    fn stop(&self) -> Result<(), CameraError>;
    /// Latest available frame, pulled at sampling time. `None` when the
    /// camera has not produced a frame yet.
    fn latest_frame(&self) -> Result<Option<Frame>, CameraError>;
    fn events(&self) -> Receiver<DeviceCameraEvent>;
}
