//! 韵律修改选项的可见性规则

/// 是否展示 "modification" 选项
///
/// 仅当音色为 `unitselection` 且输出类型需要音频时为真；
/// 为假时请求中永远不会出现 `OUTPUT_TYPE_PARAMS=MODIFICATION`
pub fn should_show_modification(voice_type: &str, output_type: &str) -> bool {
    const OUTPUT_TYPES_WITH_AUDIO: [&str; 4] = [
        "AUDIO",
        "REALISED_ACOUSTPARAMS",
        "REALISED_DURATIONS",
        "PRAAT_TEXTGRID",
    ];

    voice_type == "unitselection" && OUTPUT_TYPES_WITH_AUDIO.contains(&output_type)
}
