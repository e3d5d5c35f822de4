use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "memo_architect",
    version,
    about = "Guided policy memo drafting over the Gemini API"
)]
pub struct Args {
    /// Gemini API key; falls back to the GEMINI_API_KEY environment variable.
    #[arg(long)]
    pub api_key: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub temperature: Option<f32>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Path to a JSON array of memo parameter sets; skips the interactive
    /// questions.
    #[arg(long)]
    pub inputs: Option<String>,

    /// Which set to use from --inputs.
    #[arg(long, default_value_t = 0)]
    pub input_index: usize,

    /// Export path for the finished memo.
    #[arg(long)]
    pub out: Option<String>,

    /// Optional TOML config file overlaying the defaults.
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, default_value_t = true)]
    pub save_request: bool,

    #[arg(long, default_value_t = true)]
    pub save_response: bool,

    #[arg(long, default_value_t = false)]
    pub debug: bool,
}
