//! Sound effect playback on a dedicated thread.
//!
//! [`audio_thread`] owns the raylib audio device and every loaded `Sound`.
//! The main thread talks to it only through the channels in
//! [`AudioBridge`]: game systems write [`AudioCmd`] messages,
//! [`forward_audio_cmds`] pushes them down the channel, and
//! [`poll_audio_messages`] brings replies back into the world where
//! [`log_audio_messages`] reports load failures.

use std::time::Duration;

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::AudioBridge;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use log::{debug, error, info, warn};
use raylib::core::audio::{RaylibAudio, Sound};
use rustc_hash::FxHashMap;

/// Drain replies from the audio thread into the ECS message queue.
pub fn poll_audio_messages(bridge: Res<AudioBridge>, mut writer: MessageWriter<AudioMessage>) {
    writer.write_batch(bridge.rx_msg.try_iter());
}

/// Advance the ECS message queue for [`AudioMessage`].
pub fn update_bevy_audio_messages(mut msgs: ResMut<Messages<AudioMessage>>) {
    msgs.update();
}

/// Forward ECS AudioCmd messages to the audio thread via the AudioBridge sender.
pub fn forward_audio_cmds(bridge: Res<AudioBridge>, mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        // the thread is gone only after shutdown
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the ECS message queue for AudioCmd.
pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// Report what the audio thread sent back.
pub fn log_audio_messages(mut reader: MessageReader<AudioMessage>) {
    for msg in reader.read() {
        match msg {
            AudioMessage::DeviceUnavailable { error } => {
                warn!("Audio disabled: {}", error)
            }
            AudioMessage::FxLoaded { id } => debug!("Sound '{}' ready", id),
            AudioMessage::FxLoadFailed { id, error } => {
                warn!("Sound '{}' unavailable: {}", id, error)
            }
            AudioMessage::FxUnloadedAll => debug!("All sounds unloaded"),
        }
    }
}

/// Entry point of the dedicated audio thread.
///
/// Blocks on the command channel until [`AudioCmd::Shutdown`] arrives or
/// the sender is dropped. If the audio device cannot be opened the thread
/// reports it once and keeps draining commands so senders never block.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_evt: Sender<AudioMessage>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            error!("Failed to initialize audio device: {}", e);
            let _ = tx_evt.send(AudioMessage::DeviceUnavailable {
                error: e.to_string(),
            });
            drain_until_shutdown(&rx_cmd);
            return;
        }
    };

    info!(
        "Audio thread starting (id={:?})",
        std::thread::current().id()
    );

    let mut sounds: FxHashMap<String, Sound> = FxHashMap::default();

    loop {
        let cmd = match rx_cmd.recv_timeout(Duration::from_millis(100)) {
            Ok(cmd) => cmd,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        match cmd {
            AudioCmd::LoadFx { id, path } => match audio.new_sound(&path) {
                Ok(sound) => {
                    info!("Loaded sound '{}' from {}", id, path);
                    sounds.insert(id.clone(), sound);
                    let _ = tx_evt.send(AudioMessage::FxLoaded { id });
                }
                Err(e) => {
                    let _ = tx_evt.send(AudioMessage::FxLoadFailed {
                        id,
                        error: format!("{}: {}", path, e),
                    });
                }
            },
            AudioCmd::PlayFx { id } => match sounds.get(&id) {
                Some(sound) => sound.play(),
                None => debug!("Sound '{}' not loaded, skipping", id),
            },
            AudioCmd::UnloadAllFx => {
                sounds.clear();
                let _ = tx_evt.send(AudioMessage::FxUnloadedAll);
            }
            AudioCmd::Shutdown => {
                debug!("Audio shutdown requested");
                break;
            }
        }
    }

    // `sounds` is declared after `audio`, so it drops first
    info!("Audio thread exiting");
}

fn drain_until_shutdown(rx_cmd: &Receiver<AudioCmd>) {
    for cmd in rx_cmd.iter() {
        if cmd == AudioCmd::Shutdown {
            break;
        }
    }
}
