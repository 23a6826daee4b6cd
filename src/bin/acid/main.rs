//! acid - terminal 303-style bass voice
//!
//! Run with: cargo run --bin acid

mod app;
mod sequencer;
mod ui;

use app::Acid;
use color_eyre::eyre::WrapErr;
use sequencer::Step;
use std::{fs::File, path::PathBuf};

/// The TUI owns the terminal, so log lines go to a file instead of stderr.
fn log_path() -> PathBuf {
    std::env::temp_dir().join("acid.log")
}

fn file_logger(file: File) -> env_logger::Builder {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    builder.target(env_logger::Target::Pipe(Box::new(file)));
    builder
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let path = log_path();
    let file = File::create(&path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    file_logger(file).init();

    // A minor line with two slides and a rest
    let pattern = vec![
        Step::note(0),
        Step::note(12),
        Step::REST,
        Step::note(0),
        Step::slide(3),
        Step::note(10),
        Step::note(0),
        Step::note(15),
        Step::note(0),
        Step::REST,
        Step::slide(7),
        Step::note(5),
        Step::note(0),
        Step::note(12),
        Step::slide(-2),
        Step::note(0),
    ];

    Acid::new().bpm(126.0).pattern(pattern).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log, Record};

    #[test]
    fn log_lines_land_in_the_file() {
        let path = std::env::temp_dir().join(format!("acid-log-{}.log", std::process::id()));
        let file = File::create(&path).expect("create log file");
        let logger = file_logger(file).build();

        logger.log(
            &Record::builder()
                .args(format_args!("audio stream error: device lost"))
                .level(Level::Error)
                .target("acid")
                .build(),
        );
        logger.flush();

        let written = std::fs::read_to_string(&path).expect("read log file");
        let _ = std::fs::remove_file(&path);
        assert!(written.contains("device lost"));
    }
}
