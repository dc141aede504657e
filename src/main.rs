use anyhow::{Context, Result};
use clap::{Arg, Command};
use drumtab::config::{TabConfig, load_note_map};
use drumtab::{Tab, midi, util};
use std::path::Path;

#[derive(Debug, PartialEq)]
enum FileFormat {
    Midi,
    Text,
}

fn detect_output_format(file_path: &str) -> Result<FileFormat> {
    let path = Path::new(file_path);
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| anyhow::anyhow!("File has no extension: {}", file_path))?;

    match extension.to_lowercase().as_str() {
        "mid" => Ok(FileFormat::Midi),
        "midi" => Ok(FileFormat::Midi),
        "smf" => Ok(FileFormat::Midi),
        "txt" => Ok(FileFormat::Text),
        _ => Err(anyhow::anyhow!(
            "Unsupported file extension: .{}",
            extension
        )),
    }
}

fn velocity_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .help(help)
        .long(name)
        .value_name("VELOCITY")
        .value_parser(clap::value_parser!(u8).range(0..=127))
}

fn main() -> Result<()> {
    let matches = Command::new("drumtab")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Drum tab to MIDI converter")
        .arg(
            Arg::new("input")
                .help("Input drum tab (plain text)")
                .required(true)
                .value_name("INPUT_FILE")
                .index(1),
        )
        .arg(
            Arg::new("output")
                .help("Output file (.mid or .txt)")
                .required(true)
                .value_name("OUTPUT_FILE")
                .index(2),
        )
        .arg(
            Arg::new("verbose")
                .help("Enable verbose output")
                .short('v')
                .long("verbose")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .help("JSON configuration file")
                .long("config")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("note-map")
                .help("JSON file mapping lane labels to MIDI keys, e.g. {\"S\": 38}")
                .long("note-map")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("bpm")
                .help("Tempo in beats per minute")
                .long("bpm")
                .value_name("BPM")
                .value_parser(clap::value_parser!(f32)),
        )
        .arg(velocity_arg("strike-velocity", "Velocity of a normal strike"))
        .arg(velocity_arg("accent-velocity", "Velocity of an accented strike (O)"))
        .arg(velocity_arg("ghost-velocity", "Velocity of a ghost note (g)"))
        .get_matches();

    let input_file = matches
        .get_one::<String>("input")
        .context("Missing input file")?;
    let output_file = matches
        .get_one::<String>("output")
        .context("Missing output file")?;
    let verbose = matches.get_flag("verbose");

    let default_filter = if verbose {
        "drumtab=debug"
    } else {
        "drumtab=info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let output_format = detect_output_format(output_file)
        .with_context(|| format!("Failed to detect output file format: {}", output_file))?;

    let mut config = match matches.get_one::<String>("config") {
        Some(path) => TabConfig::load(Path::new(path))
            .with_context(|| format!("Failed to load configuration: {}", path))?,
        None => TabConfig::default(),
    };
    if let Some(path) = matches.get_one::<String>("note-map") {
        let note_map = load_note_map(Path::new(path))
            .with_context(|| format!("Failed to load note map: {}", path))?;
        config.note_map = Some(note_map);
    }
    if let Some(bpm) = matches.get_one::<f32>("bpm") {
        config.bpm = *bpm;
    }
    if let Some(velocity) = matches.get_one::<u8>("strike-velocity") {
        config.velocities.strike = *velocity;
    }
    if let Some(velocity) = matches.get_one::<u8>("accent-velocity") {
        config.velocities.accent = *velocity;
    }
    if let Some(velocity) = matches.get_one::<u8>("ghost-velocity") {
        config.velocities.ghost = *velocity;
    }

    log::debug!("Reading drum tab: {}", input_file);
    let content = std::fs::read_to_string(input_file)
        .with_context(|| format!("Failed to read input file: {}", input_file))?;
    let tab = Tab::with_config(&content, &config)
        .with_context(|| format!("Failed to parse drum tab: {}", input_file))?;

    log::info!(
        "{} bar groups, {} divisions per bar, lanes: {}",
        tab.bar_groups().len(),
        tab.divisions_in_bar(),
        tab.note_types()
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    );
    let unknown = tab.unknown_strike_types();
    if !unknown.is_empty() {
        log::warn!(
            "Unknown strike types played at normal velocity: {}",
            unknown.iter().collect::<String>()
        );
    }

    match output_format {
        FileFormat::Midi => {
            log::debug!("Writing MIDI file: {}", output_file);
            let midi_bytes =
                midi::convert_tab_to_midi(&tab).context("Failed to convert drum tab to MIDI")?;
            std::fs::write(output_file, midi_bytes)
                .with_context(|| format!("Failed to write MIDI file: {}", output_file))?;
        }
        FileFormat::Text => {
            log::debug!("Writing event listing: {}", output_file);
            let listing = util::event_listing(&tab).context("Failed to list strike events")?;
            std::fs::write(output_file, listing)
                .with_context(|| format!("Failed to write output file: {}", output_file))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_output_format() {
        assert_eq!(detect_output_format("out.mid").unwrap(), FileFormat::Midi);
        assert_eq!(detect_output_format("out.MIDI").unwrap(), FileFormat::Midi);
        assert_eq!(detect_output_format("beat.txt").unwrap(), FileFormat::Text);
        assert!(detect_output_format("beat.wav").is_err());
        assert!(detect_output_format("beat").is_err());
    }
}
