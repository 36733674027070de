use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;
use tracing::warn;

use crate::core::Ticks;
use crate::error::{SimError, SimResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    Fcfs,
    RoundRobin,
    Srtf,
}

impl Policy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::RoundRobin => "RR",
            Self::Srtf => "SRTF",
        }
    }

    pub const fn needs_quantum(&self) -> bool {
        matches!(self, Self::RoundRobin)
    }
}

impl FromStr for Policy {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(Self::Fcfs),
            "rr" | "round_robin" | "roundrobin" => Ok(Self::RoundRobin),
            "srtf" => Ok(Self::Srtf),
            _ => Err(SimError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Policy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Policy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Round-robin time slice, in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Quantum(NonZeroU64);

impl Quantum {
    pub fn new(ticks: i64) -> SimResult<Self> {
        u64::try_from(ticks)
            .ok()
            .and_then(NonZeroU64::new)
            .map(Self)
            .ok_or(SimError::InvalidQuantum(ticks))
    }

    #[inline]
    pub const fn ticks(&self) -> Ticks {
        self.0.get()
    }
}

/// Policy selection for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SchedConfig {
    policy: Policy,
    quantum: Option<Quantum>,
}

impl SchedConfig {
    pub fn new(policy: Policy, quantum: Option<i64>) -> SimResult<Self> {
        let quantum = match (policy.needs_quantum(), quantum) {
            (true, Some(ticks)) => Some(Quantum::new(ticks)?),
            (true, None) => return Err(SimError::MissingQuantum),
            (false, Some(ticks)) => {
                warn!(%policy, ticks, "quantum only applies to round-robin, ignoring it");
                None
            }
            (false, None) => None,
        };

        Ok(Self { policy, quantum })
    }

    pub fn fcfs() -> Self {
        Self {
            policy: Policy::Fcfs,
            quantum: None,
        }
    }

    pub fn srtf() -> Self {
        Self {
            policy: Policy::Srtf,
            quantum: None,
        }
    }

    pub fn round_robin(quantum: i64) -> SimResult<Self> {
        Self::new(Policy::RoundRobin, Some(quantum))
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn quantum(&self) -> Option<Quantum> {
        self.quantum
    }
}

impl<'de> Deserialize<'de> for SchedConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Inner {
            policy: Policy,
            #[serde(default)]
            quantum: Option<i64>,
        }

        let inner = Inner::deserialize(deserializer)?;
        Self::new(inner.policy, inner.quantum).map_err(serde::de::Error::custom)
    }
}
