//! Quality tiers, frame rates and platform tags

use crate::error::{AmbientError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A coarse quality tier. Ordered `Low < Medium < High`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Low,
    Medium,
    High,
}

/// Device capability bucket. Shares its tiers with [`Quality`].
pub type CapabilityGrade = Quality;

impl Quality {
    pub const ALL: [Quality; 3] = [Quality::Low, Quality::Medium, Quality::High];

    /// One tier lower, saturating at `Low`
    pub fn step_down(self) -> Self {
        match self {
            Quality::High => Quality::Medium,
            Quality::Medium | Quality::Low => Quality::Low,
        }
    }

    /// One tier higher, saturating at `High`
    pub fn step_up(self) -> Self {
        match self {
            Quality::Low => Quality::Medium,
            Quality::Medium | Quality::High => Quality::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Low => "low",
            Quality::Medium => "medium",
            Quality::High => "high",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quality {
    type Err = AmbientError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Quality::Low),
            "medium" => Ok(Quality::Medium),
            "high" => Ok(Quality::High),
            _ => Err(AmbientError::InvalidQuality(s.to_string())),
        }
    }
}

/// Target frame rate. Only 15, 30 and 60 are supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Fps {
    Fifteen,
    Thirty,
    Sixty,
}

impl Fps {
    pub fn as_u32(self) -> u32 {
        match self {
            Fps::Fifteen => 15,
            Fps::Thirty => 30,
            Fps::Sixty => 60,
        }
    }

    /// 60 → 30 → 15, saturating at 15
    pub fn step_down(self) -> Self {
        match self {
            Fps::Sixty => Fps::Thirty,
            Fps::Thirty | Fps::Fifteen => Fps::Fifteen,
        }
    }

    /// 15 → 30 → 60, saturating at 60
    pub fn step_up(self) -> Self {
        match self {
            Fps::Fifteen => Fps::Thirty,
            Fps::Thirty | Fps::Sixty => Fps::Sixty,
        }
    }
}

impl TryFrom<u32> for Fps {
    type Error = AmbientError;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            15 => Ok(Fps::Fifteen),
            30 => Ok(Fps::Thirty),
            60 => Ok(Fps::Sixty),
            other => Err(AmbientError::InvalidFps(other)),
        }
    }
}

impl From<Fps> for u32 {
    fn from(fps: Fps) -> Self {
        fps.as_u32()
    }
}

impl fmt::Display for Fps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}

/// Device platform tag reported by the host. Parsed case-insensitively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Platform {
    Ios,
    Android,
    Web,
    Other,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
            Platform::Web => "web",
            Platform::Other => "other",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = AmbientError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            "web" => Ok(Platform::Web),
            "other" | "windows" | "macos" | "linux" => Ok(Platform::Other),
            _ => Err(AmbientError::InvalidPlatform(s.to_string())),
        }
    }
}

impl TryFrom<String> for Platform {
    type Error = AmbientError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_steps_saturate() {
        assert_eq!(Quality::High.step_down(), Quality::Medium);
        assert_eq!(Quality::Medium.step_down(), Quality::Low);
        assert_eq!(Quality::Low.step_down(), Quality::Low);
        assert_eq!(Quality::Low.step_up(), Quality::Medium);
        assert_eq!(Quality::High.step_up(), Quality::High);
    }

    #[test]
    fn quality_ordering() {
        assert!(Quality::Low < Quality::Medium);
        assert!(Quality::Medium < Quality::High);
    }

    #[test]
    fn fps_steps_saturate() {
        assert_eq!(Fps::Sixty.step_down(), Fps::Thirty);
        assert_eq!(Fps::Fifteen.step_down(), Fps::Fifteen);
        assert_eq!(Fps::Thirty.step_up(), Fps::Sixty);
        assert_eq!(Fps::Sixty.step_up(), Fps::Sixty);
    }

    #[test]
    fn fps_rejects_unsupported_rates() {
        assert_eq!(Fps::try_from(30).unwrap(), Fps::Thirty);
        assert!(Fps::try_from(45).is_err());
    }

    #[test]
    fn fps_deserializes_from_integer() {
        #[derive(Deserialize)]
        struct Wrap {
            fps: Fps,
        }
        let w: Wrap = toml::from_str("fps = 15").unwrap();
        assert_eq!(w.fps, Fps::Fifteen);
        assert!(toml::from_str::<Wrap>("fps = 24").is_err());
    }

    #[test]
    fn platform_parse_is_case_insensitive() {
        assert_eq!("iOS".parse::<Platform>().unwrap(), Platform::Ios);
        assert_eq!("ANDROID".parse::<Platform>().unwrap(), Platform::Android);
        assert!("toaster".parse::<Platform>().is_err());
    }

    #[test]
    fn platform_deserializes_in_any_case() {
        #[derive(Deserialize)]
        struct Wrap {
            platform: Platform,
        }
        let w: Wrap = toml::from_str(r#"platform = "iOS""#).unwrap();
        assert_eq!(w.platform, Platform::Ios);
        let w: Wrap = toml::from_str(r#"platform = "Android""#).unwrap();
        assert_eq!(w.platform, Platform::Android);
        assert!(toml::from_str::<Wrap>(r#"platform = "toaster""#).is_err());
        assert_eq!(String::from(Platform::Web), "web");
    }
}
