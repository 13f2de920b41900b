//! Module that contains all logic for spawning and probing the external commands
pub mod ffmpeg;
pub mod ytdl;
