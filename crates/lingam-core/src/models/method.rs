//! Estimator selection enums shared by config, engine, and CLI.

use std::fmt;

use serde::{Deserialize, Serialize};

/// LiNGAM estimation method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Iterative root search on pairwise independence.
    #[default]
    Direct,
    /// FastICA followed by permutation and pruning of the unmixing matrix.
    Ica,
}

impl Method {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" | "directlingam" => Some(Self::Direct),
            "ica" | "icalingam" => Some(Self::Ica),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Ica => "ica",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Independence measure used by DirectLiNGAM to pick the next root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    /// Pairwise likelihood ratio based on entropy approximations.
    #[default]
    Pwling,
    /// Kernel-based mutual information.
    Kernel,
}

impl Measure {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pwling" => Some(Self::Pwling),
            "kernel" => Some(Self::Kernel),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pwling => "pwling",
            Self::Kernel => "kernel",
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// FastICA contrast function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IcaFunction {
    #[default]
    #[serde(rename = "logcosh")]
    LogCosh,
    Exp,
    Cube,
}

impl IcaFunction {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "logcosh" => Some(Self::LogCosh),
            "exp" => Some(Self::Exp),
            "cube" => Some(Self::Cube),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LogCosh => "logcosh",
            Self::Exp => "exp",
            Self::Cube => "cube",
        }
    }
}

impl fmt::Display for IcaFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
