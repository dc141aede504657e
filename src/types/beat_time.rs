use std::fmt;
use std::ops::Add;

/// Quarter-note time using fixed-point units
#[derive(Clone, Copy, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct BeatTime {
    repr: u64,
}

impl BeatTime {
    /// Number of bits for the sub-beat units.
    const FRAC_BEAT_BITS: u32 = 32;
    /// The number of sub-units in a single beat (2^32).
    pub const FRAC_BEAT_COUNT: u64 = 1 << Self::FRAC_BEAT_BITS;
    /// Bitmask to extract the sub-unit part from the total units.
    const FRAC_BEAT_MASK: u64 = Self::FRAC_BEAT_COUNT - 1;

    pub const fn zero() -> Self {
        Self { repr: 0 }
    }

    const fn from_units(units: u64) -> Self {
        Self { repr: units }
    }

    /// `numerator / denominator` beats, truncated to the sub-unit grid.
    /// Returns `None` for a zero denominator.
    pub fn from_ratio(numerator: u32, denominator: u32) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        let units = ((numerator as u128) << Self::FRAC_BEAT_BITS) / denominator as u128;
        Some(Self::from_units(units as u64))
    }

    pub fn as_f64(&self) -> f64 {
        self.repr_beat() as f64 + self.repr_frac() as f64 / Self::FRAC_BEAT_COUNT as f64
    }

    /// Position in MIDI ticks for the given resolution, rounded to the nearest tick.
    pub fn as_ticks(&self, ppqn: u16) -> u64 {
        let scaled = self.repr as u128 * ppqn as u128;
        let half = 1u128 << (Self::FRAC_BEAT_BITS - 1);
        ((scaled + half) >> Self::FRAC_BEAT_BITS) as u64
    }

    fn repr_beat(&self) -> u64 {
        self.repr >> Self::FRAC_BEAT_BITS
    }

    pub fn whole_beats(&self) -> u64 {
        self.repr_beat()
    }

    fn repr_frac(&self) -> u64 {
        self.repr & Self::FRAC_BEAT_MASK
    }

    fn repr_frac_f32(&self) -> f32 {
        (self.repr_frac() as f64 / Self::FRAC_BEAT_COUNT as f64) as f32
    }
}

impl fmt::Display for BeatTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut beat = self.repr_beat();
        let mut frac_val = (self.repr_frac_f32() as f64 * 100_000.0).round() as u32;
        if frac_val >= 100_000 {
            beat += 1;
            frac_val -= 100_000;
        }

        let mut frac = format!("{:05}", frac_val);
        while frac.ends_with('0') {
            frac.pop();
            if frac.is_empty() {
                frac.push('0');
                break;
            }
        }
        f.pad(&format!("{}.{}", beat, frac))
    }
}

impl fmt::Debug for BeatTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Time({})", self)
    }
}

impl Add for BeatTime {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::from_units(self.repr + other.repr)
    }
}
