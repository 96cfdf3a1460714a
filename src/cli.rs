use std::{env, fs, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use directories::ProjectDirs;

use crate::{
    audio::AudioEngineHandle,
    frontend::{run_ritual, TerminalFrontend},
    settings::{SettingsStore, SETTINGS_FILE_NAME},
    store::SessionStore,
    timer::{controller::TICK_INTERVAL, DeadlineScheduler, SessionController, SessionDuration},
};

const DEBUG_TICK_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(name = "kamvas")]
#[command(about = "Stain a tiny canvas while you focus", long_about = None)]
pub struct Cli {
    #[arg(long, global = true, help = "Directory for the session log and thumbnails")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(about = "Start the painting ritual (default)")]
    Paint {
        #[arg(long, short, help = "Session length in minutes (25 to 240, steps of 5)")]
        minutes: Option<u64>,

        #[arg(long, help = "Tag stored with the session")]
        tag: Option<String>,

        #[arg(long, help = "Description stored with the session")]
        desc: Option<String>,

        #[arg(long, help = "Play no sounds")]
        mute: bool,
    },

    #[command(about = "List saved sessions, oldest first")]
    Sessions,

    #[command(about = "Show or change stored defaults")]
    Settings {
        #[arg(long, short, help = "Default session length in minutes")]
        minutes: Option<u64>,

        #[arg(long, help = "Default tag")]
        tag: Option<String>,

        #[arg(long, help = "Default description")]
        desc: Option<String>,

        #[arg(long, value_enum, help = "Turn sounds on or off")]
        sound: Option<Toggle>,

        #[arg(long, help = "Directory with custom sound files")]
        sound_dir: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

/// `--data-dir`, then `KAMVAS_DATA_DIR`, then the platform data directory.
pub fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    let dir = flag
        .or_else(|| env::var_os("KAMVAS_DATA_DIR").map(PathBuf::from))
        .or_else(|| {
            ProjectDirs::from("com", "kamvas", "kamvas").map(|dirs| dirs.data_dir().to_path_buf())
        })
        .unwrap_or_else(|| PathBuf::from("data"));

    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create data directory {}", dir.display()))?;
    Ok(dir)
}

fn debug_mode() -> bool {
    env::var("KAMVAS_DEBUG")
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

pub fn paint(
    data_dir: PathBuf,
    minutes: Option<u64>,
    tag: Option<String>,
    desc: Option<String>,
    mute: bool,
) -> Result<()> {
    let settings = SettingsStore::new(data_dir.join(SETTINGS_FILE_NAME))?.get();
    let duration = SessionDuration::from_minutes(minutes.unwrap_or(settings.default_minutes))?;

    let audio = (settings.sound.enabled && !mute)
        .then(|| AudioEngineHandle::new(settings.sound.directory.clone()));
    let frontend = TerminalFrontend::new(std::io::stdout(), audio);
    let tick_interval = if debug_mode() {
        DEBUG_TICK_INTERVAL
    } else {
        TICK_INTERVAL
    };

    let mut controller =
        SessionController::new(SessionStore::new(&data_dir), DeadlineScheduler::new(), frontend)
            .with_tick_interval(tick_interval);
    controller.set_duration(duration);
    controller.set_tag(tag.unwrap_or(settings.tag));
    controller.set_desc(desc.unwrap_or(settings.desc));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the event loop")?;
    runtime.block_on(run_ritual(&mut controller))
}

pub fn list_sessions(data_dir: PathBuf) -> Result<()> {
    let store = SessionStore::new(data_dir);
    let records = store.read_all()?;

    if records.is_empty() {
        println!("No sessions yet.");
        return Ok(());
    }

    println!("{:18} {:>5}  {:12} {}", "DATE", "MIN", "TAG", "DESCRIPTION");
    println!("{}", "-".repeat(50));
    for record in &records {
        println!(
            "{:18} {:>5}  {:12} {}",
            record.date, record.duration_minutes, record.tag, record.desc
        );
    }
    println!("{}", "-".repeat(50));

    let total: u64 = records.iter().map(|r| r.duration_minutes).sum();
    println!(
        "{} sessions, {:02}:{:02} painted",
        records.len(),
        total / 60,
        total % 60
    );
    Ok(())
}

pub fn update_settings(
    data_dir: PathBuf,
    minutes: Option<u64>,
    tag: Option<String>,
    desc: Option<String>,
    sound: Option<Toggle>,
    sound_dir: Option<PathBuf>,
) -> Result<()> {
    if let Some(minutes) = minutes {
        SessionDuration::from_minutes(minutes)?;
    }

    let store = SettingsStore::new(data_dir.join(SETTINGS_FILE_NAME))?;
    let settings = store.update(|s| {
        if let Some(minutes) = minutes {
            s.default_minutes = minutes;
        }
        if let Some(tag) = tag {
            s.tag = tag;
        }
        if let Some(desc) = desc {
            s.desc = desc;
        }
        if let Some(toggle) = sound {
            s.sound.enabled = matches!(toggle, Toggle::On);
        }
        if sound_dir.is_some() {
            s.sound.directory = sound_dir;
        }
    })?;

    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir)?;

    match cli.command.unwrap_or(Command::Paint {
        minutes: None,
        tag: None,
        desc: None,
        mute: false,
    }) {
        Command::Paint {
            minutes,
            tag,
            desc,
            mute,
        } => paint(data_dir, minutes, tag, desc, mute),
        Command::Sessions => list_sessions(data_dir),
        Command::Settings {
            minutes,
            tag,
            desc,
            sound,
            sound_dir,
        } => update_settings(data_dir, minutes, tag, desc, sound, sound_dir),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_paint_flags_parse() {
        let cli = Cli::try_parse_from([
            "kamvas", "--data-dir", "/tmp/k", "paint", "-m", "45", "--tag", "ink",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/k")));
        assert!(matches!(
            cli.command,
            Some(Command::Paint {
                minutes: Some(45),
                ref tag,
                mute: false,
                ..
            }) if tag.as_deref() == Some("ink")
        ));
    }

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["kamvas"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_resolve_data_dir_prefers_flag_and_creates_it() {
        let dir = std::env::temp_dir().join(format!(
            "kamvas_data_dir_{}",
            std::time::SystemTime::now()
                .duration_since(std::time::SystemTime::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ));
        let resolved = resolve_data_dir(Some(dir.clone())).unwrap();
        assert_eq!(resolved, dir);
        assert!(dir.is_dir());
        fs::remove_dir_all(dir).ok();
    }
}
