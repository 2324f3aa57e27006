use std::{
    fs::{self, File},
    io::{self, Write as _},
    path::Path,
};

use anyhow::Context as _;
use blockdrop_ai::weights::{ExtendedWeights, Weights};
use blockdrop_engine::GameBoard;
use tracing_subscriber::EnvFilter;

/// Installs the log subscriber; `RUST_LOG` takes precedence over `verbosity`.
pub fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;
    Ok(value)
}

pub fn read_weights_file<P>(path: P) -> anyhow::Result<Weights>
where
    P: AsRef<Path>,
{
    let weights: Weights = read_json_file("weights", path)?;
    tracing::debug!(?weights, "loaded weights");
    Ok(weights)
}

pub fn read_extended_weights_file<P>(path: P) -> anyhow::Result<ExtendedWeights>
where
    P: AsRef<Path>,
{
    let weights: ExtendedWeights = read_json_file("extended weights", path)?;
    tracing::debug!(?weights, "loaded extended weights");
    Ok(weights)
}

pub fn read_board_file<P>(path: P) -> anyhow::Result<GameBoard>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to open board file: {}", path.display()))?;
    text.parse::<GameBoard>()
        .with_context(|| format!("Failed to parse board file: {}", path.display()))
}

pub fn write_json_stdout<T>(value: &T) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).context("Failed to write JSON to stdout")?;
    writeln!(stdout).context("Failed to write newline to stdout")?;
    Ok(())
}
