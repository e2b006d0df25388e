use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver};

use crate::device_camera::interface::{CameraError, DeviceCamera, DeviceCameraEvent, Frame};

const FAKE_FRAME_WIDTH: usize = 640;
const FAKE_FRAME_HEIGHT: usize = 480;

pub struct DeviceCameraFake {
    running: AtomicBool,
}

impl DeviceCameraFake {
    pub fn new() -> Self {
        Self {
            running: AtomicBool::new(false),
        }
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn start(&self) -> Result<(), CameraError> {
        self.running.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&self) -> Result<(), CameraError> {
        self.running.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn latest_frame(&self) -> Result<Option<Frame>, CameraError> {
        if !self.running.load(Ordering::SeqCst) {
            return Err(CameraError::NotRunning);
        }
        Ok(Some(vec![0; FAKE_FRAME_WIDTH * FAKE_FRAME_HEIGHT * 3]))
    }

    fn events(&self) -> Receiver<DeviceCameraEvent> {
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let _ = tx.send(DeviceCameraEvent::Connected);
        });
        rx
    }
}
