// Adapters - External system implementations

pub mod exec_ffmpeg;
pub mod probe_ffprobe;

// Re-export adapters
pub use exec_ffmpeg::FfmpegAdapter;
pub use probe_ffprobe::FfprobeAdapter;
