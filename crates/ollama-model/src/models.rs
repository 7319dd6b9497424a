//! Identifiers of models commonly pulled into a local server.

pub const DEEPSEEK_R1_7B: &str = "deepseek-r1:7b";
pub const QWEN2_5: &str = "qwen2.5";
pub const QWEN2_5_LATEST: &str = "qwen2.5:latest";
pub const LLAMA3_2: &str = "llama3.2";
