pub const TEXTGEN_SYSTEM: &str = include_str!("../data/prompts/textgen_system.txt");

/// Model used for every chat completion.
pub const TEXTGEN_MODEL: &str = "llama-3.1-8b-instant";
