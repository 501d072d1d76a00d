use anyhow::{Context, Result};
use clap::Parser;

use std::fs::File;
use std::io;
use std::path::PathBuf;

use recue::enhancer::Enhancer;
use recue::opts::Opts;
use recue::output_type::OutputType;

fn main() -> Result<()> {
    recue::logging::init();
    let params = get_params()?;

    let api_key = params
        .api_key
        .or_else(|| std::env::var("OPENAI_API_KEY").ok())
        .context("no API key: pass --api-key or set OPENAI_API_KEY")?;

    let audio = File::open(&params.audio_path)
        .with_context(|| format!("failed to open audio file {:?}", params.audio_path))?;
    let subtitles = File::open(&params.subtitle_path)
        .with_context(|| format!("failed to open subtitle file {:?}", params.subtitle_path))?;

    let opts = Opts {
        language: params.language,
        enable_grammar_improvement: !params.no_improve,
        output_type: params.output_type,
    };

    let enhancer = Enhancer::openai(api_key);

    match &params.out_path {
        Some(path) => {
            let out = File::create(path)
                .with_context(|| format!("failed to create output file {path:?}"))?;
            enhancer.enhance(audio, subtitles, out, &opts)?;
        }
        None => {
            let stdout = io::stdout();
            enhancer.enhance(audio, subtitles, stdout.lock(), &opts)?;
        }
    }

    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "recue")]
#[command(about = "Re-text subtitle cues from a word-level transcription of the audio")]
struct Params {
    /// Audio file to transcribe (sent to the transcription provider as-is).
    #[arg(short = 'a', long = "audio")]
    pub audio_path: PathBuf,

    /// SubRip subtitle file whose cue windows will be kept.
    #[arg(short = 's', long = "subtitles")]
    pub subtitle_path: PathBuf,

    /// Output file. Defaults to stdout.
    #[arg(short = 'O', long = "out")]
    pub out_path: Option<PathBuf>,

    #[arg(
        short = 'o',
        long = "output-type",
        value_enum,
        default_value_t = OutputType::Srt
    )]
    pub output_type: OutputType,

    /// Language hint for the transcription provider (e.g. "en").
    #[arg(short = 'l', long = "language")]
    pub language: Option<String>,

    /// Skip the grammar-improvement pass and emit the re-texted cues as-is.
    #[arg(long = "no-improve", default_value_t = false)]
    pub no_improve: bool,

    /// API key for the providers. Falls back to the OPENAI_API_KEY
    /// environment variable.
    #[arg(short = 'k', long = "api-key")]
    pub api_key: Option<String>,
}

fn get_params() -> Result<Params> {
    Ok(Params::parse())
}
