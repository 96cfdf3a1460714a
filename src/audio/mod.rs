pub mod chime;

use chime::Chime;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    sync::{
        mpsc::{self, Sender},
        Arc, Mutex,
    },
    thread,
};

use crate::{log_debug, log_warn, timer::SoundEvent};

const ENABLE_LOGS: bool = true;

enum AudioCommand {
    Play(SoundEvent),
    Stop,
}

/// File played for each cue, looked up in the configured sound directory.
pub fn sound_file_name(event: SoundEvent) -> &'static str {
    match event {
        SoundEvent::SessionStarted => "toast.ogg",
        SoundEvent::SessionCommitted => "F.mp3",
        SoundEvent::SessionAborted => "menu_click.mp3",
        SoundEvent::SessionExpired => "dragon_end.ogg",
    }
}

/// Plays session cues on a dedicated thread. A new cue replaces the one
/// currently playing.
pub struct AudioEngineHandle {
    tx: Arc<Mutex<Option<Sender<AudioCommand>>>>,
    sound_dir: Option<PathBuf>,
}

impl AudioEngineHandle {
    pub fn new(sound_dir: Option<PathBuf>) -> Self {
        Self {
            tx: Arc::new(Mutex::new(None)),
            sound_dir,
        }
    }

    fn ensure_thread(&self) -> Result<Sender<AudioCommand>, String> {
        if let Some(tx) = self.tx.lock().map_err(|e| e.to_string())?.as_ref() {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<AudioCommand>();
        let sound_dir = self.sound_dir.clone();

        // The output stream is not Send, so it lives and dies on this thread.
        thread::Builder::new()
            .name("audio-engine".to_string())
            .spawn(move || {
                let mut output: Option<(OutputStream, OutputStreamHandle)> = None;
                let mut sink: Option<Sink> = None;

                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        AudioCommand::Play(event) => {
                            if let Some(s_old) = sink.take() {
                                s_old.stop();
                            }
                            match play_cue(&mut output, sound_dir.as_deref(), event) {
                                Ok(new_sink) => sink = Some(new_sink),
                                Err(e) => log_warn!("Failed to play {:?}: {}", event, e),
                            }
                        }
                        AudioCommand::Stop => {
                            if let Some(s_old) = sink.take() {
                                s_old.stop();
                            }
                            output = None;
                        }
                    }
                }
            })
            .map_err(|e| e.to_string())?;

        let tx_clone = tx.clone();
        *self.tx.lock().map_err(|e| e.to_string())? = Some(tx);
        Ok(tx_clone)
    }

    pub fn play(&self, event: SoundEvent) -> Result<(), String> {
        let tx = self.ensure_thread()?;
        tx.send(AudioCommand::Play(event))
            .map_err(|e| e.to_string())
    }

    pub fn stop(&self) -> Result<(), String> {
        if let Ok(Some(tx)) = self.tx.lock().map(|g| g.clone()) {
            let _ = tx.send(AudioCommand::Stop);
        }
        Ok(())
    }
}

fn play_cue(
    output: &mut Option<(OutputStream, OutputStreamHandle)>,
    sound_dir: Option<&Path>,
    event: SoundEvent,
) -> Result<Sink, String> {
    if output.is_none() {
        *output = Some(
            OutputStream::try_default()
                .map_err(|e| format!("Failed to create audio output stream: {}", e))?,
        );
    }
    let Some((_, handle)) = output.as_ref() else {
        return Err("audio output unavailable".to_string());
    };

    let sink =
        Sink::try_new(handle).map_err(|e| format!("Failed to create audio sink: {}", e))?;

    match sound_dir.map(|dir| decode_file(&dir.join(sound_file_name(event)))) {
        Some(Ok(decoder)) => sink.append(decoder),
        Some(Err(e)) => {
            log_debug!("Falling back to chime for {:?}: {}", event, e);
            sink.append(Chime::for_event(event));
        }
        None => sink.append(Chime::for_event(event)),
    }
    Ok(sink)
}

fn decode_file(path: &Path) -> Result<Decoder<BufReader<File>>, String> {
    let file = File::open(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    Decoder::new(BufReader::new(file)).map_err(|e| format!("{}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_files_are_distinct() {
        let names = [
            sound_file_name(SoundEvent::SessionStarted),
            sound_file_name(SoundEvent::SessionCommitted),
            sound_file_name(SoundEvent::SessionAborted),
            sound_file_name(SoundEvent::SessionExpired),
        ];
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_decode_missing_file_is_error() {
        let path = std::env::temp_dir().join("kamvas_no_such_sound.ogg");
        assert!(decode_file(&path).is_err());
    }
}
