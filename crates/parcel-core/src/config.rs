//! Top-level simulation configuration.
//!
//! Loaded from one or more TOML files by the application crate (merged in
//! the order given, later files overriding earlier ones) and passed to the
//! orchestrator.  Every field has a serde default so partial files are
//! valid; `simulator_id` is the one field that must be non-empty before the
//! simulation starts — there is no meaningful partition of the active
//! package population without it.

use crate::{CoreError, CoreResult, SimTime};

/// Effective configuration for one simulator process.
#[derive(Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Unique identifier of this simulator process.  Partition key for
    /// `active_packages`: each process only simulates the rows it owns.
    /// Required (checked by [`validate`][Self::validate]).
    pub simulator_id: String,

    /// Simulation epoch as a Unix timestamp.  `None` means "ask the store
    /// for its current time at bootstrap".
    pub start_time: Option<i64>,

    /// Worker thread count.  `None` uses available hardware parallelism.
    pub num_workers: Option<usize>,

    /// Master RNG seed.  The same seed and inputs reproduce each worker's
    /// schedule exactly.
    pub seed: u64,

    /// Delay between bootstrap connection/schema retries, in seconds.
    pub retry_delay_secs: u64,

    /// Port for the metrics endpoint.  Parsed (and overridable via
    /// `METRICS_PORT`) for parity with the deployment environment; the
    /// exporter itself is outside this crate family.
    pub metrics_port: Option<u16>,

    /// Travel/dwell physics knobs.
    pub physics: PhysicsConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            simulator_id:     String::new(),
            start_time:       None,
            num_workers:      None,
            seed:             42,
            retry_delay_secs: 1,
            metrics_port:     None,
            physics:          PhysicsConfig::default(),
        }
    }
}

impl SimConfig {
    /// Reject configurations that cannot produce a meaningful run.
    ///
    /// Fatal at startup: a process with no partition key or a zero worker
    /// count must not partially start.
    pub fn validate(&self) -> CoreResult<()> {
        if self.simulator_id.trim().is_empty() {
            return Err(CoreError::Config("simulator_id is required".into()));
        }
        if self.num_workers == Some(0) {
            return Err(CoreError::Config("num_workers must be at least 1".into()));
        }
        if self.retry_delay_secs == 0 {
            return Err(CoreError::Config("retry_delay_secs must be at least 1".into()));
        }
        self.physics.validate()
    }

    /// The configured epoch, if any.
    #[inline]
    pub fn start_time(&self) -> Option<SimTime> {
        self.start_time.map(SimTime)
    }
}

/// Speeds and dwell intervals for the synthetic package physics.
///
/// Defaults approximate real ground logistics: local pickup/delivery vans at
/// ~36 km/h, linehaul trucks at ~90 km/h, four-hour hub turnaround.
#[derive(Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Speed for first/last-mile legs, metres per second.
    pub pickup_speed_mps: f32,

    /// Speed for hub-to-hub linehaul legs, metres per second.
    pub linehaul_speed_mps: f32,

    /// Nominal dwell at an intermediate facility, seconds.
    pub hub_dwell_secs: i64,

    /// Trackers enter the simulation spread uniformly over this many seconds
    /// after the epoch, so the initial wave of pickups doesn't land on a
    /// single timestamp.
    pub initial_stagger_secs: i64,

    /// Fractional jitter (±) applied to travel and dwell intervals.
    pub jitter_frac: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            pickup_speed_mps:     10.0,
            linehaul_speed_mps:   25.0,
            hub_dwell_secs:       4 * 3_600,
            initial_stagger_secs: 3_600,
            jitter_frac:          0.10,
        }
    }
}

impl PhysicsConfig {
    fn validate(&self) -> CoreResult<()> {
        if self.pickup_speed_mps <= 0.0 || self.linehaul_speed_mps <= 0.0 {
            return Err(CoreError::Config("speeds must be positive".into()));
        }
        if !(0.0..1.0).contains(&self.jitter_frac) {
            return Err(CoreError::Config("jitter_frac must be in [0, 1)".into()));
        }
        Ok(())
    }
}
