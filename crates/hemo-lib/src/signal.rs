use serde::{Deserialize, Serialize};

/// Numeric columns of a pressure recording, named after their CSV headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Time,
    AorticPressure,
    DistalPressure,
    PdPa,
    Ifr,
    MidSystolicRatio,
    AorticRatio,
    DiastolicRatio,
}

impl Channel {
    pub const ALL: [Channel; 8] = [
        Channel::Time,
        Channel::AorticPressure,
        Channel::DistalPressure,
        Channel::PdPa,
        Channel::Ifr,
        Channel::MidSystolicRatio,
        Channel::AorticRatio,
        Channel::DiastolicRatio,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            Channel::Time => "time",
            Channel::AorticPressure => "p_aortic_smooth",
            Channel::DistalPressure => "p_distal_smooth",
            Channel::PdPa => "pd/pa",
            Channel::Ifr => "iFR",
            Channel::MidSystolicRatio => "mid_systolic_ratio",
            Channel::AorticRatio => "aortic_ratio",
            Channel::DiastolicRatio => "diastolic_ratio",
        }
    }
}

/// Header of the peak annotation column.
pub const PEAKS_COLUMN: &str = "peaks";

/// Peak code marking a diastolic peak (cycle boundary).
pub const DIASTOLIC_PEAK: i64 = 2;

/// One measurement session stored column-wise. Missing numeric cells are NaN,
/// missing peak codes are 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recording {
    pub id: String,
    pub time: Vec<f64>,
    pub p_aortic: Vec<f64>,
    pub p_distal: Vec<f64>,
    pub pd_pa: Vec<f64>,
    pub ifr: Vec<f64>,
    pub mid_systolic_ratio: Vec<f64>,
    pub peaks: Vec<i64>,
    pub aortic_ratio: Vec<f64>,
    pub diastolic_ratio: Vec<f64>,
}

impl Recording {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn channel(&self, channel: Channel) -> &[f64] {
        match channel {
            Channel::Time => &self.time,
            Channel::AorticPressure => &self.p_aortic,
            Channel::DistalPressure => &self.p_distal,
            Channel::PdPa => &self.pd_pa,
            Channel::Ifr => &self.ifr,
            Channel::MidSystolicRatio => &self.mid_systolic_ratio,
            Channel::AorticRatio => &self.aortic_ratio,
            Channel::DiastolicRatio => &self.diastolic_ratio,
        }
    }

    pub fn channel_mut(&mut self, channel: Channel) -> &mut Vec<f64> {
        match channel {
            Channel::Time => &mut self.time,
            Channel::AorticPressure => &mut self.p_aortic,
            Channel::DistalPressure => &mut self.p_distal,
            Channel::PdPa => &mut self.pd_pa,
            Channel::Ifr => &mut self.ifr,
            Channel::MidSystolicRatio => &mut self.mid_systolic_ratio,
            Channel::AorticRatio => &mut self.aortic_ratio,
            Channel::DiastolicRatio => &mut self.diastolic_ratio,
        }
    }
}

/// Ordered, non-owning selection of samples from a [`Recording`].
///
/// Positions passed to the accessors index into the selection, not the
/// underlying recording.
#[derive(Debug, Clone)]
pub struct SampleView<'a> {
    recording: &'a Recording,
    indices: Vec<usize>,
}

impl<'a> SampleView<'a> {
    pub fn all(recording: &'a Recording) -> Self {
        Self {
            recording,
            indices: (0..recording.len()).collect(),
        }
    }

    /// Keep the samples for which `keep` returns true, preserving order.
    pub fn filter(&self, mut keep: impl FnMut(usize) -> bool) -> Self {
        Self {
            recording: self.recording,
            indices: self.indices.iter().copied().filter(|&i| keep(i)).collect(),
        }
    }

    pub fn recording(&self) -> &'a Recording {
        self.recording
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn value(&self, channel: Channel, pos: usize) -> f64 {
        self.recording.channel(channel)[self.indices[pos]]
    }

    pub fn time(&self, pos: usize) -> f64 {
        self.value(Channel::Time, pos)
    }

    pub fn peak(&self, pos: usize) -> i64 {
        self.recording.peaks[self.indices[pos]]
    }

    pub fn values(&self, channel: Channel) -> impl Iterator<Item = f64> + '_ {
        let column = self.recording.channel(channel);
        self.indices.iter().map(move |&i| column[i])
    }
}

/// Span between two consecutive boundary markers, as inclusive positions
/// into a [`SampleView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    pub start: usize,
    pub end: usize,
}

impl Cycle {
    pub fn len(&self) -> usize {
        (self.end + 1).saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn positions(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}
