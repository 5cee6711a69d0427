//! 服务端 HTTP 端点（相对于服务端根地址）

pub const PROCESS: &str = "process";
pub const VOICES: &str = "voices";
pub const DATA_TYPES: &str = "datatypes";
pub const AUDIO_FORMATS: &str = "audioformats";
pub const AUDIO_EFFECTS: &str = "audioeffects";
pub const AUDIO_EFFECT_DEFAULT_PARAM: &str = "audioeffect-default-param";
pub const AUDIO_EFFECT_HELP: &str = "audioeffect-help";
pub const EXAMPLE_TEXT: &str = "exampletext";
pub const VERSION: &str = "version";
pub const PERCEPTION_TEST: &str = "perceptionTest";
pub const USER_RATING: &str = "userRating";
pub const QUERY_STATEMENT: &str = "queryStatement";
pub const OPTIONS: &str = "options";
