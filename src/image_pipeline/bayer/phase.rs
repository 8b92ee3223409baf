//! Bayer phase descriptors

use std::fmt;
use std::str::FromStr;

use crate::image_pipeline::common::BayerError;

/// Color channel sampled at a sensor position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Red = 0,
    Green = 1,
    Blue = 2,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Plane index of this channel in an `(H, W, 3)` color image.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn letter(self) -> char {
        match self {
            Self::Red => 'r',
            Self::Green => 'g',
            Self::Blue => 'b',
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'r' => Some(Self::Red),
            'g' => Some(Self::Green),
            'b' => Some(Self::Blue),
            _ => None,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => f.write_str("R"),
            Self::Green => f.write_str("G"),
            Self::Blue => f.write_str("B"),
        }
    }
}

/// Channel layout of a 2x2 Bayer tile in row-major order.
///
/// Position 0 is top-left, 1 top-right, 2 bottom-left and 3 bottom-right.
/// A `Phase` always holds exactly one red, one blue and two green entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Phase([Channel; 4]);

use Channel::{Blue, Green, Red};

impl Phase {
    pub const RGGB: Phase = Phase([Red, Green, Green, Blue]);
    pub const BGGR: Phase = Phase([Blue, Green, Green, Red]);
    pub const GRBG: Phase = Phase([Green, Red, Blue, Green]);
    pub const GBRG: Phase = Phase([Green, Blue, Red, Green]);

    /// Builds a phase from a tile layout, rejecting layouts that are not a Bayer pattern.
    pub fn new(tile: [Channel; 4]) -> Result<Self, BayerError> {
        let count = |channel| tile.iter().filter(|&&c| c == channel).count();
        let (reds, greens, blues) = (count(Red), count(Green), count(Blue));
        if reds != 1 || greens != 2 || blues != 1 {
            let phase: String = tile.iter().map(|c| c.letter()).collect();
            return Err(BayerError::InvalidPhase {
                phase,
                reason: format!(
                    "expected one r, two g and one b, found {reds} r, {greens} g, {blues} b"
                ),
            });
        }
        Ok(Self(tile))
    }

    pub fn tile(&self) -> [Channel; 4] {
        self.0
    }

    /// Channel sampled at `(row, col)` of a frame tiled with this phase.
    #[inline]
    pub fn channel_at(&self, row: usize, col: usize) -> Channel {
        self.0[(row % 2) * 2 + (col % 2)]
    }

    /// 2x2 occupancy template for `channel`, indexed `[row][col]`.
    pub fn template(&self, channel: Channel) -> [[bool; 2]; 2] {
        let t = self.0;
        [
            [t[0] == channel, t[1] == channel],
            [t[2] == channel, t[3] == channel],
        ]
    }

    /// Tile row (0 or 1) that carries the red sample.
    pub fn red_row(&self) -> usize {
        self.0.iter().position(|&c| c == Red).unwrap_or(0) / 2
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::RGGB
    }
}

impl FromStr for Phase {
    type Err = BayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| BayerError::InvalidPhase {
            phase: s.to_string(),
            reason,
        };

        let letters: Vec<char> = s.chars().collect();
        if letters.len() != 4 {
            return Err(invalid(format!(
                "must have 4 characters, got {}",
                letters.len()
            )));
        }

        let mut tile = [Green; 4];
        for (slot, &letter) in tile.iter_mut().zip(&letters) {
            *slot = Channel::from_letter(letter)
                .ok_or_else(|| invalid(format!("unexpected character {letter:?}")))?;
        }

        Phase::new(tile).map_err(|e| match e {
            BayerError::InvalidPhase { reason, .. } => invalid(reason),
            other => other,
        })
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for channel in self.0 {
            write!(f, "{}", channel.letter())?;
        }
        Ok(())
    }
}
