//! Audio Adapter - 音频输出实现

mod command_player;
mod file_player;
mod stream_player;

pub use command_player::{CommandAudioPlayer, CommandAudioPlayerConfig};
pub use file_player::FileAudioPlayer;
pub use stream_player::{FanOutAudioPlayer, StdoutAudioPlayer, StreamAudioPlayer};
