pub mod recorder;

pub use recorder::{
    BroadcastRecorder, RecorderError, RecorderStatus, RecordingSnapshot,
};
