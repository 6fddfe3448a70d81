use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// En kolonne med målinger; `None` = ingen verdi (sensor mangler eller dropout).
pub type Series = Vec<Option<f64>>;

/// Navngitte kanaler fra aktivitetsleverandøren.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Channel {
    #[serde(rename = "time")]
    Time,
    #[serde(rename = "watts")]
    Watts,
    #[serde(rename = "heartrate")]
    HeartRate,
    #[serde(rename = "distance")]
    Distance,
    #[serde(rename = "altitude")]
    Altitude,
    #[serde(rename = "grade_smooth")]
    Grade,
}

impl Channel {
    pub const ALL: [Channel; 6] = [
        Channel::Time,
        Channel::Watts,
        Channel::HeartRate,
        Channel::Distance,
        Channel::Altitude,
        Channel::Grade,
    ];

    /// Leverandørens nøkkel for kanalen.
    pub fn key(self) -> &'static str {
        match self {
            Channel::Time => "time",
            Channel::Watts => "watts",
            Channel::HeartRate => "heartrate",
            Channel::Distance => "distance",
            Channel::Altitude => "altitude",
            Channel::Grade => "grade_smooth",
        }
    }

    pub fn from_key(key: &str) -> Option<Channel> {
        Channel::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Rå kanaler slik leverandøren sender dem: uavhengige, kan mangle, kan ha
/// ulik lengde.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawStreams {
    channels: BTreeMap<Channel, Series>,
}

impl RawStreams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Setter (eller erstatter) en kanal. Returnerer forrige verdi.
    pub fn insert(&mut self, channel: Channel, data: Series) -> Option<Series> {
        self.channels.insert(channel, data)
    }

    /// Builder-variant for tette verdier uten hull.
    pub fn with_values<I>(mut self, channel: Channel, values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        self.channels
            .insert(channel, values.into_iter().map(Some).collect());
        self
    }

    pub fn with_series(mut self, channel: Channel, data: Series) -> Self {
        self.channels.insert(channel, data);
        self
    }

    pub fn get(&self, channel: Channel) -> Option<&[Option<f64>]> {
        self.channels.get(&channel).map(Vec::as_slice)
    }

    pub fn contains(&self, channel: Channel) -> bool {
        self.channels.contains_key(&channel)
    }

    pub fn channels(&self) -> impl Iterator<Item = Channel> + '_ {
        self.channels.keys().copied()
    }
}

/// Justert tabell med fast skjema: én rad per sample, alle kolonner har
/// lengde N (lengden på `time`).
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    time: Series,
    power: Series,
    hr: Series,
    distance: Series,
    altitude: Series,
    grade: Series,
}

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}

impl NormalizedTable {
    /// Tabell med kun tid; øvrige kolonner er tomme (`None`).
    pub fn from_time(time: Series) -> Self {
        let n = time.len();
        Self {
            time: time.into_iter().map(finite).collect(),
            power: vec![None; n],
            hr: vec![None; n],
            distance: vec![None; n],
            altitude: vec![None; n],
            grade: vec![None; n],
        }
    }

    /// 1 Hz-tabell (`time = 0..N`) med kun watt.
    pub fn from_power_series(power: &[f64]) -> Self {
        let time = (0..power.len()).map(|i| Some(i as f64)).collect();
        let mut table = Self::from_time(time);
        table.power = power.iter().copied().map(Some).map(finite).collect();
        table
    }

    /// Erstatter en ikke-tid-kolonne. Lengden må være N.
    pub fn with_column(mut self, channel: Channel, data: Series) -> Result<Self> {
        if data.len() != self.len() {
            return Err(AnalysisError::ColumnLength {
                channel: channel.key(),
                expected: self.len(),
                actual: data.len(),
            });
        }
        let data: Series = data.into_iter().map(finite).collect();
        match channel {
            Channel::Time => self.time = data,
            Channel::Watts => self.power = data,
            Channel::HeartRate => self.hr = data,
            Channel::Distance => self.distance = data,
            Channel::Altitude => self.altitude = data,
            Channel::Grade => self.grade = data,
        }
        Ok(self)
    }

    /// Kolonnene er allerede justert til N av normalisereren.
    pub(crate) fn from_aligned(
        time: Series,
        power: Series,
        hr: Series,
        distance: Series,
        altitude: Series,
        grade: Series,
    ) -> Self {
        debug_assert!([&power, &hr, &distance, &altitude, &grade]
            .iter()
            .all(|c| c.len() == time.len()));
        Self {
            time,
            power,
            hr,
            distance,
            altitude,
            grade,
        }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn column(&self, channel: Channel) -> &[Option<f64>] {
        match channel {
            Channel::Time => &self.time,
            Channel::Watts => &self.power,
            Channel::HeartRate => &self.hr,
            Channel::Distance => &self.distance,
            Channel::Altitude => &self.altitude,
            Channel::Grade => &self.grade,
        }
    }

    pub fn time(&self) -> &[Option<f64>] {
        &self.time
    }

    pub fn power(&self) -> &[Option<f64>] {
        &self.power
    }

    pub fn hr(&self) -> &[Option<f64>] {
        &self.hr
    }

    pub fn distance(&self) -> &[Option<f64>] {
        &self.distance
    }

    pub fn altitude(&self) -> &[Option<f64>] {
        &self.altitude
    }

    pub fn grade(&self) -> &[Option<f64>] {
        &self.grade
    }
}

/// Faste varigheter for beste glidende snitt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffortDuration {
    TwentyMinute,
    TenMinute,
    FiveMinute,
    OneMinute,
    ThirtySecond,
    FiveSecond,
    OneSecond,
}

impl EffortDuration {
    pub const ALL: [EffortDuration; 7] = [
        EffortDuration::TwentyMinute,
        EffortDuration::TenMinute,
        EffortDuration::FiveMinute,
        EffortDuration::OneMinute,
        EffortDuration::ThirtySecond,
        EffortDuration::FiveSecond,
        EffortDuration::OneSecond,
    ];

    pub fn seconds(self) -> f64 {
        match self {
            EffortDuration::TwentyMinute => 1200.0,
            EffortDuration::TenMinute => 600.0,
            EffortDuration::FiveMinute => 300.0,
            EffortDuration::OneMinute => 60.0,
            EffortDuration::ThirtySecond => 30.0,
            EffortDuration::FiveSecond => 5.0,
            EffortDuration::OneSecond => 1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EffortDuration::TwentyMinute => "twenty_minute",
            EffortDuration::TenMinute => "ten_minute",
            EffortDuration::FiveMinute => "five_minute",
            EffortDuration::OneMinute => "one_minute",
            EffortDuration::ThirtySecond => "thirty_second",
            EffortDuration::FiveSecond => "five_second",
            EffortDuration::OneSecond => "one_second",
        }
    }
}

/// Beste glidende snitt per varighet. `None` = økten er kortere enn vinduet
/// (eller hvert vindu inneholder dropout).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RollingEffortResult {
    pub twenty_minute: Option<f64>,
    pub ten_minute: Option<f64>,
    pub five_minute: Option<f64>,
    pub one_minute: Option<f64>,
    pub thirty_second: Option<f64>,
    pub five_second: Option<f64>,
    pub one_second: Option<f64>,
}

impl RollingEffortResult {
    pub fn get(&self, d: EffortDuration) -> Option<f64> {
        match d {
            EffortDuration::TwentyMinute => self.twenty_minute,
            EffortDuration::TenMinute => self.ten_minute,
            EffortDuration::FiveMinute => self.five_minute,
            EffortDuration::OneMinute => self.one_minute,
            EffortDuration::ThirtySecond => self.thirty_second,
            EffortDuration::FiveSecond => self.five_second,
            EffortDuration::OneSecond => self.one_second,
        }
    }

    pub fn set(&mut self, d: EffortDuration, value: Option<f64>) {
        let slot = match d {
            EffortDuration::TwentyMinute => &mut self.twenty_minute,
            EffortDuration::TenMinute => &mut self.ten_minute,
            EffortDuration::FiveMinute => &mut self.five_minute,
            EffortDuration::OneMinute => &mut self.one_minute,
            EffortDuration::ThirtySecond => &mut self.thirty_second,
            EffortDuration::FiveSecond => &mut self.five_second,
            EffortDuration::OneSecond => &mut self.one_second,
        };
        *slot = value;
    }

    /// (varighet, verdi) i fast rekkefølge, lengste først.
    pub fn iter(&self) -> impl Iterator<Item = (EffortDuration, Option<f64>)> + '_ {
        EffortDuration::ALL.into_iter().map(|d| (d, self.get(d)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerSummary {
    pub normalized_power: f64,
    pub intensity_factor: f64,
    pub training_stress_score: f64,
}

/// Snitteffekt per segment for ett splittnivå (`splits.len() == split_count`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitLevel {
    pub split_count: usize,
    pub splits: Vec<Option<f64>>,
}

/// Aggregater for én avrundet stigningsprosent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientBin {
    pub grade: i64,
    pub power_mean: Option<f64>,
    pub power_max: Option<f64>,
    pub hr_mean: Option<f64>,
    pub hr_max: Option<f64>,
    pub duration_secs: f64,
}

impl GradientBin {
    /// Syntetisert bin uten rader (fyller hull i stigningsaksen).
    pub fn empty(grade: i64) -> Self {
        Self {
            grade,
            power_mean: None,
            power_max: None,
            hr_mean: None,
            hr_max: None,
            duration_secs: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RideStats {
    pub duration_secs: Option<f64>,
    pub average_power: Option<f64>,
    pub max_power: Option<f64>,
    pub average_hr: Option<f64>,
    pub max_hr: Option<f64>,
    pub distance_m: Option<f64>,
    pub elevation_gain_m: Option<f64>,
}

/// Rytterparametre som kan endres per forespørsel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisRequest {
    #[serde(alias = "FTP")]
    pub ftp: Option<f64>,
    #[serde(alias = "weight")]
    pub weight_kg: Option<f64>,
}

/// Alt rendering-laget trenger for én aktivitet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityReport {
    pub samples: usize,
    pub stats: RideStats,
    pub efforts: RollingEffortResult,
    pub power_to_weight: Option<RollingEffortResult>,
    pub summary: Option<PowerSummary>,
    pub splits: Vec<SplitLevel>,
    pub gradient_bins: Vec<GradientBin>,
}
