//! Simulation error types
//!
//! The core has exactly one runtime failure mode: a spawn request against a
//! full pool. Callers decide whether that matters (the wave director ignores
//! it, the bullet-fire path reports it). Settings loading has its own error.

use std::fmt;

/// Which fixed-capacity pool a request targeted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    Asteroids,
    Bullets,
    Debris,
    Beetles,
    Wasps,
}

impl PoolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoolKind::Asteroids => "asteroids",
            PoolKind::Bullets => "bullets",
            PoolKind::Debris => "debris",
            PoolKind::Beetles => "beetles",
            PoolKind::Wasps => "wasps",
        }
    }
}

/// A spawn request that could not be placed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnError {
    /// Every slot in the pool is occupied
    PoolFull {
        pool: PoolKind,
        capacity: usize,
    },
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnError::PoolFull { pool, capacity } => write!(
                f,
                "maximum of {} {} alive at once; spawn request dropped",
                capacity,
                pool.as_str()
            ),
        }
    }
}

impl std::error::Error for SpawnError {}

/// Failure to read or parse a settings file
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "could not read settings: {}", e),
            SettingsError::Parse(e) => write!(f, "invalid settings JSON: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}
