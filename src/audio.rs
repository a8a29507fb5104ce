//! Audio capability
//!
//! The core never decodes or mixes audio. It names cues with [`SoundEffect`],
//! resolves them to host handles through [`AudioSystem::create_or_get_sound`]
//! and scales volumes with [`AudioMix`].

/// Host handle for a loaded sound asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundId(pub u32);

/// Host handle for one playing instance of a sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackId(pub u32);

/// Audio services provided by the host
pub trait AudioSystem {
    /// Resolve a sound by asset path, loading it on first use
    fn create_or_get_sound(&mut self, path: &str) -> SoundId;
    /// Start playing a sound
    fn play_sound(&mut self, sound: SoundId, looped: bool, volume: f32) -> PlaybackId;
    /// Stop a playing sound (no-op for finished playbacks)
    fn stop_sound(&mut self, playback: PlaybackId);
    /// Change the volume of a playing sound
    fn set_volume(&mut self, playback: PlaybackId, volume: f32);
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Entity took a non-lethal or lethal hit
    Hit,
    /// Enemy or asteroid destroyed
    EnemyDie,
    /// Player ship destroyed
    ShipDie,
    /// Ship respawned
    ShipRespawn,
    /// Regular shot
    Shoot,
    /// Fan special attack
    SpecialBurst,
    /// Cloak activated
    Cloak,
    /// Ship bumped a wall or the other ship
    Collision,
    /// New wave spawned
    NewWave,
    /// Session won
    Win,
    /// Session lost
    Lose,
    /// Multiplayer toggled on the attract screen
    MultiplayerToggle,
    /// Returned to the attract screen
    Back,
    /// Attract screen jingle
    AttractJingle,
    /// Background music
    Music,
}

impl SoundEffect {
    /// Asset path the host resolves
    pub fn path(&self) -> &'static str {
        match self {
            SoundEffect::Hit => "Data/Audio/BeHitted.wav",
            SoundEffect::EnemyDie => "Data/Audio/Die.wav",
            SoundEffect::ShipDie => "Data/Audio/ShipDie.wav",
            SoundEffect::ShipRespawn => "Data/Audio/ShipRespawn.wav",
            SoundEffect::Shoot => "Data/Audio/Shoot.wav",
            SoundEffect::SpecialBurst => "Data/Audio/SkillBullets.wav",
            SoundEffect::Cloak => "Data/Audio/SkillInvi.wav",
            SoundEffect::Collision => "Data/Audio/Collision.wav",
            SoundEffect::NewWave => "Data/Audio/NewWave.wav",
            SoundEffect::Win => "Data/Audio/win.mp3",
            SoundEffect::Lose => "Data/Audio/lose.wav",
            SoundEffect::MultiplayerToggle => "Data/Audio/Multiplayer.wav",
            SoundEffect::Back => "Data/Audio/Back.wav",
            SoundEffect::AttractJingle => "Data/Audio/FirstStart.mp3",
            SoundEffect::Music => "Data/Audio/BuMianZhiYe.mp3",
        }
    }

    /// Base volume before the mix is applied
    pub fn base_volume(&self) -> f32 {
        match self {
            SoundEffect::Shoot => 0.5,
            SoundEffect::Win | SoundEffect::Lose => 0.5,
            SoundEffect::NewWave => 0.3,
            SoundEffect::ShipDie => 0.01,
            SoundEffect::Collision => 0.005,
            SoundEffect::Music => 1.0,
            _ => 0.1,
        }
    }
}

/// Volume controls applied on top of each cue's base volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioMix {
    pub master_volume: f32,
    pub sfx_volume: f32,
    pub music_volume: f32,
    pub music_muted: bool,
}

impl Default for AudioMix {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 0.01,
            music_muted: false,
        }
    }
}

impl AudioMix {
    pub fn from_settings(settings: &crate::Settings) -> Self {
        Self {
            master_volume: settings.master_volume,
            sfx_volume: settings.sfx_volume,
            music_volume: settings.music_volume,
            music_muted: settings.mute_music,
        }
    }

    /// Effective volume of a one-shot cue
    pub fn effect_volume(&self, effect: SoundEffect) -> f32 {
        effect.base_volume() * self.master_volume * self.sfx_volume
    }

    /// Effective music volume
    pub fn music_level(&self) -> f32 {
        if self.music_muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// Play a one-shot cue
    pub fn play(&self, audio: &mut dyn AudioSystem, effect: SoundEffect) -> PlaybackId {
        let sound = audio.create_or_get_sound(effect.path());
        audio.play_sound(sound, false, self.effect_volume(effect))
    }

    /// Start a looping track at `volume`
    pub fn play_looped(&self, audio: &mut dyn AudioSystem, effect: SoundEffect, volume: f32) -> PlaybackId {
        let sound = audio.create_or_get_sound(effect.path());
        audio.play_sound(sound, true, volume)
    }
}

/// Headless audio backend that records every request
///
/// Used by the headless driver and by tests to count cues.
#[derive(Debug, Default)]
pub struct RecordingAudio {
    sounds: Vec<String>,
    /// (sound, looped, volume) per started playback
    pub played: Vec<(SoundId, bool, f32)>,
    pub stopped: Vec<PlaybackId>,
    pub volume_changes: Vec<(PlaybackId, f32)>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the cue has been started
    pub fn count(&self, effect: SoundEffect) -> usize {
        let Some(index) = self.sounds.iter().position(|p| p == effect.path()) else {
            return 0;
        };
        self.played
            .iter()
            .filter(|(sound, _, _)| sound.0 as usize == index)
            .count()
    }

    /// Total number of started playbacks
    pub fn total_played(&self) -> usize {
        self.played.len()
    }
}

impl AudioSystem for RecordingAudio {
    fn create_or_get_sound(&mut self, path: &str) -> SoundId {
        if let Some(index) = self.sounds.iter().position(|p| p == path) {
            return SoundId(index as u32);
        }
        self.sounds.push(path.to_string());
        SoundId((self.sounds.len() - 1) as u32)
    }

    fn play_sound(&mut self, sound: SoundId, looped: bool, volume: f32) -> PlaybackId {
        self.played.push((sound, looped, volume));
        PlaybackId((self.played.len() - 1) as u32)
    }

    fn stop_sound(&mut self, playback: PlaybackId) {
        self.stopped.push(playback);
    }

    fn set_volume(&mut self, playback: PlaybackId, volume: f32) {
        self.volume_changes.push((playback, volume));
    }
}
