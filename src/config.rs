//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`PHYSIM_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use physim_physics::SimConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Simulation tunables
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Headless runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`PHYSIM_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        // Load default config (required)
        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // PHYSIM_SIMULATION__GRAVITY=50 -> simulation.gravity = 50
        figment = figment.merge(Env::prefixed("PHYSIM_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Simulation tunables as they appear in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Downward acceleration scale
    pub gravity: f32,
    /// Collision elasticity, 0.0 to 1.0
    pub restitution: f32,
    /// Velocity damping coefficient
    pub air_resistance: f32,
    /// Multiplier applied to every frame delta
    pub time_acceleration: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let sim = SimConfig::default();
        Self {
            gravity: sim.gravity,
            restitution: sim.restitution,
            air_resistance: sim.air_resistance,
            time_acceleration: sim.time_acceleration,
        }
    }
}

impl SimulationConfig {
    /// Convert to the engine's tunables
    pub fn to_sim_config(&self) -> SimConfig {
        SimConfig {
            gravity: self.gravity,
            restitution: self.restitution,
            air_resistance: self.air_resistance,
            time_acceleration: self.time_acceleration,
        }
    }
}

/// Headless runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Number of fixed steps to simulate
    pub steps: u32,
    /// Fixed step length in seconds
    pub dt: f32,
    /// Apply a random stir impulse before the run starts
    pub impulse_on_start: bool,
    /// Flat file to load the starting collection from
    pub load_file: Option<String>,
    /// Flat file to save the final collection to
    pub save_file: Option<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            steps: 600,
            dt: 1.0 / 60.0,
            impulse_on_start: false,
            load_file: None,
            save_file: None,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
