use std::fmt;

pub const DANGER_RADIUS_FACTOR: f64 = 1.2;
pub const DANGER_RADIUS_MIN: f64 = 90.0;
pub const DANGER_RADIUS_MAX: f64 = 150.0;
pub const SCOOT_DISTANCE: f64 = 140.0;
pub const JITTER_SPAN: f64 = 60.0;
pub const STUCK_THRESHOLD: f64 = 40.0;
pub const CONTACT_RADIUS: f64 = 140.0;
pub const HOME_GAP: f64 = 12.0;

pub const BURST_COUNT: usize = 70;
pub const BURST_COUNT_MAX: usize = 400;
pub const HEART_SIZE_MIN: f64 = 14.0;
pub const HEART_SIZE_RANGE: f64 = 24.0;
pub const HEART_DRIFT_SPAN: f64 = 180.0;
pub const HEART_DURATION_MIN_MS: f64 = 1200.0;
pub const HEART_DURATION_RANGE_MS: f64 = 1400.0;
pub const HEART_DELAY_MAX_MS: f64 = 250.0;
pub const SPAWN_BOTTOM_INSET: f64 = 80.0;
pub const SPAWN_RISE: f64 = 60.0;
pub const CLEANUP_DELAY_MS: u32 = 3200;

const DISTANCE_MIN: f64 = 10.0;
const DISTANCE_MAX: f64 = 600.0;
const SPAN_MAX: f64 = 300.0;

pub const TUNING_KEYS: &[&str] = &[
    "hearts",
    "cleanup_ms",
    "scoot",
    "jitter",
    "stuck",
    "radius_min",
    "radius_max",
    "contact",
    "verbose",
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DodgeTuning {
    pub radius_factor: f64,
    pub radius_min: f64,
    pub radius_max: f64,
    pub scoot: f64,
    pub jitter: f64,
    pub stuck_threshold: f64,
    pub contact_radius: f64,
    pub home_gap: f64,
}

impl Default for DodgeTuning {
    fn default() -> Self {
        Self {
            radius_factor: DANGER_RADIUS_FACTOR,
            radius_min: DANGER_RADIUS_MIN,
            radius_max: DANGER_RADIUS_MAX,
            scoot: SCOOT_DISTANCE,
            jitter: JITTER_SPAN,
            stuck_threshold: STUCK_THRESHOLD,
            contact_radius: CONTACT_RADIUS,
            home_gap: HOME_GAP,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstTuning {
    pub count: usize,
    pub size_min: f64,
    pub size_range: f64,
    pub drift_span: f64,
    pub duration_min_ms: f64,
    pub duration_range_ms: f64,
    pub delay_max_ms: f64,
    pub bottom_inset: f64,
    pub rise: f64,
    pub cleanup_delay_ms: u32,
}

impl Default for BurstTuning {
    fn default() -> Self {
        Self {
            count: BURST_COUNT,
            size_min: HEART_SIZE_MIN,
            size_range: HEART_SIZE_RANGE,
            drift_span: HEART_DRIFT_SPAN,
            duration_min_ms: HEART_DURATION_MIN_MS,
            duration_range_ms: HEART_DURATION_RANGE_MS,
            delay_max_ms: HEART_DELAY_MAX_MS,
            bottom_inset: SPAWN_BOTTOM_INSET,
            rise: SPAWN_RISE,
            cleanup_delay_ms: CLEANUP_DELAY_MS,
        }
    }
}

impl BurstTuning {
    pub fn longest_lifetime_ms(&self) -> f64 {
        self.duration_min_ms + self.duration_range_ms + self.delay_max_ms
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.count == 0 || self.count > BURST_COUNT_MAX {
            return Err(TuningError::OutOfRange {
                key: "hearts",
                value: self.count as f64,
                min: 1.0,
                max: BURST_COUNT_MAX as f64,
            });
        }
        let longest = self.longest_lifetime_ms();
        if f64::from(self.cleanup_delay_ms) <= longest {
            return Err(TuningError::CleanupTooEarly {
                cleanup_ms: self.cleanup_delay_ms,
                longest_ms: longest,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tuning {
    pub dodge: DodgeTuning,
    pub burst: BurstTuning,
    pub verbose: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            dodge: DodgeTuning::default(),
            burst: BurstTuning::default(),
            verbose: false,
        }
    }
}

impl Tuning {
    /// Applies one `key=value` override. On error `self` is left untouched.
    pub fn apply_override(&mut self, key: &str, raw: &str) -> Result<(), TuningError> {
        let mut next = *self;
        match key {
            "hearts" => {
                next.burst.count = parse_range("hearts", raw, 1.0, BURST_COUNT_MAX as f64)? as usize;
            }
            "cleanup_ms" => {
                next.burst.cleanup_delay_ms = parse_range("cleanup_ms", raw, 0.0, 60_000.0)? as u32;
            }
            "scoot" => next.dodge.scoot = parse_range("scoot", raw, DISTANCE_MIN, DISTANCE_MAX)?,
            "jitter" => next.dodge.jitter = parse_range("jitter", raw, 0.0, SPAN_MAX)?,
            "stuck" => next.dodge.stuck_threshold = parse_range("stuck", raw, 0.0, SPAN_MAX)?,
            "radius_min" => {
                next.dodge.radius_min = parse_range("radius_min", raw, DISTANCE_MIN, DISTANCE_MAX)?;
            }
            "radius_max" => {
                next.dodge.radius_max = parse_range("radius_max", raw, DISTANCE_MIN, DISTANCE_MAX)?;
            }
            "contact" => {
                next.dodge.contact_radius = parse_range("contact", raw, DISTANCE_MIN, DISTANCE_MAX)?;
            }
            "verbose" => next.verbose = parse_flag("verbose", raw)?,
            _ => return Err(TuningError::UnknownKey(key.to_string())),
        }
        if next.dodge.radius_max < next.dodge.radius_min {
            return Err(TuningError::InvertedRadius {
                min: next.dodge.radius_min,
                max: next.dodge.radius_max,
            });
        }
        next.burst.validate()?;
        *self = next;
        Ok(())
    }
}

fn parse_range(key: &'static str, raw: &str, min: f64, max: f64) -> Result<f64, TuningError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| TuningError::NotANumber {
            key,
            raw: raw.to_string(),
        })?;
    if !value.is_finite() || value < min || value > max {
        return Err(TuningError::OutOfRange {
            key,
            value,
            min,
            max,
        });
    }
    Ok(value)
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, TuningError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(TuningError::NotAFlag {
            key,
            raw: raw.to_string(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    UnknownKey(String),
    NotANumber { key: &'static str, raw: String },
    NotAFlag { key: &'static str, raw: String },
    OutOfRange { key: &'static str, value: f64, min: f64, max: f64 },
    InvertedRadius { min: f64, max: f64 },
    CleanupTooEarly { cleanup_ms: u32, longest_ms: f64 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::UnknownKey(key) => write!(f, "unknown tuning key '{key}'"),
            TuningError::NotANumber { key, raw } => {
                write!(f, "{key}: '{raw}' is not a number")
            }
            TuningError::NotAFlag { key, raw } => {
                write!(f, "{key}: '{raw}' is not a boolean flag")
            }
            TuningError::OutOfRange {
                key,
                value,
                min,
                max,
            } => write!(f, "{key}: {value} outside {min}..={max}"),
            TuningError::InvertedRadius { min, max } => {
                write!(f, "danger radius ceiling {max} below floor {min}")
            }
            TuningError::CleanupTooEarly {
                cleanup_ms,
                longest_ms,
            } => write!(
                f,
                "cleanup after {cleanup_ms}ms would cut hearts living up to {longest_ms}ms"
            ),
        }
    }
}

impl std::error::Error for TuningError {}
