//! Simulator configuration.
//!
//! A [SimConfig] is validated once when it is created. Everything built
//! from it afterwards can assume every width is in range.

use serde::{ Deserialize, Serialize };
use thiserror::Error;

use crate::predictor::{ PredictorKind, SaturatingCounterConfig, MAX_INDEX_BITS };

/// The largest local history (and pattern table) width for [PredictorConfig::YehPatt].
pub const MAX_HISTORY_BITS: usize = 30;

/// Errors detected while building a [SimConfig].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid predictor type '{0}'")]
    UnknownPredictor(String),

    #[error("wrong number of input parameters for {kind}: expected {expected}, got {found}")]
    WrongParamCount { kind: PredictorKind, expected: usize, found: usize },

    #[error("invalid value '{value}' for {name}")]
    InvalidParam { name: &'static str, value: String },

    #[error("{name} must be between {min} and {max} (got {value})")]
    OutOfRange { name: &'static str, value: usize, min: usize, max: usize },

    #[error("history width {history_bits} exceeds gshare table width {gshare_bits}")]
    HistoryTooWide { history_bits: usize, gshare_bits: usize },

    #[error("BTB size {size} must be a multiple of associativity {assoc} with a power-of-two number of sets")]
    BadBtbGeometry { size: usize, assoc: usize },
}

/// Table widths (in index bits) for each kind of predictor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PredictorConfig {
    Bimodal {
        bimodal_bits: usize,
    },
    Gshare {
        gshare_bits: usize,
        history_bits: usize,
    },
    Hybrid {
        chooser_bits: usize,
        gshare_bits: usize,
        history_bits: usize,
        bimodal_bits: usize,
    },
    YehPatt {
        bht_bits: usize,
        pattern_bits: usize,
    },
}
impl PredictorConfig {
    pub fn kind(&self) -> PredictorKind {
        match self {
            Self::Bimodal { .. } => PredictorKind::Bimodal,
            Self::Gshare { .. } => PredictorKind::Gshare,
            Self::Hybrid { .. } => PredictorKind::Hybrid,
            Self::YehPatt { .. } => PredictorKind::YehPatt,
        }
    }

    /// Check that every width is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Bimodal { bimodal_bits } => {
                check_range("bimodal table width", bimodal_bits, 1, MAX_INDEX_BITS)
            },
            Self::Gshare { gshare_bits, history_bits } => {
                check_gshare(gshare_bits, history_bits)
            },
            Self::Hybrid { chooser_bits, gshare_bits, history_bits, bimodal_bits } => {
                check_range("chooser table width", chooser_bits, 1, MAX_INDEX_BITS)?;
                check_gshare(gshare_bits, history_bits)?;
                check_range("bimodal table width", bimodal_bits, 1, MAX_INDEX_BITS)
            },
            Self::YehPatt { bht_bits, pattern_bits } => {
                check_range("history table width", bht_bits, 1, MAX_INDEX_BITS)?;
                check_range("pattern table width", pattern_bits, 1, MAX_HISTORY_BITS)
            },
        }
    }
}

fn check_range(name: &'static str, value: usize, min: usize, max: usize)
    -> Result<(), ConfigError>
{
    if value < min || value > max {
        return Err(ConfigError::OutOfRange { name, value, min, max });
    }
    Ok(())
}

fn check_gshare(gshare_bits: usize, history_bits: usize) -> Result<(), ConfigError> {
    check_range("gshare table width", gshare_bits, 1, MAX_INDEX_BITS)?;
    check_range("global history width", history_bits, 1, MAX_INDEX_BITS)?;
    if history_bits > gshare_bits {
        return Err(ConfigError::HistoryTooWide { history_bits, gshare_bits });
    }
    Ok(())
}

/// Geometry of the branch target buffer.
///
/// A size of zero means there is no BTB: every instruction is assumed to be
/// a branch and the associativity is ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BtbConfig {
    /// Number of entries
    pub size: usize,

    /// Number of ways in each set
    pub assoc: usize,
}
impl BtbConfig {
    pub fn is_enabled(&self) -> bool { self.size != 0 }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.is_enabled() {
            return Ok(());
        }
        let bad = ConfigError::BadBtbGeometry { size: self.size, assoc: self.assoc };
        if self.assoc == 0 || self.size % self.assoc != 0 {
            return Err(bad);
        }
        if !(self.size / self.assoc).is_power_of_two() {
            return Err(bad);
        }
        Ok(())
    }
}

/// Configuration for a whole simulation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    pub predictor: PredictorConfig,
    pub btb: BtbConfig,

    /// Width of every saturating counter
    pub counter_bits: u8,
}
impl SimConfig {
    pub const DEFAULT_COUNTER_BITS: u8 = 2;

    pub fn new(predictor: PredictorConfig, btb: BtbConfig)
        -> Result<Self, ConfigError>
    {
        Self::with_counter_bits(predictor, btb, Self::DEFAULT_COUNTER_BITS)
    }

    pub fn with_counter_bits(predictor: PredictorConfig, btb: BtbConfig,
        counter_bits: u8) -> Result<Self, ConfigError>
    {
        predictor.validate()?;
        btb.validate()?;
        check_range("counter width", counter_bits as usize, 1,
            SaturatingCounterConfig::MAX_BITS as usize)?;
        Ok(Self { predictor, btb, counter_bits })
    }

    /// Build a configuration from a predictor name and its positional
    /// parameters:
    ///
    /// - `bimodal <M2> <BTB size> <BTB assoc>`
    /// - `gshare <M1> <N> <BTB size> <BTB assoc>`
    /// - `hybrid <K> <M1> <N> <M2> <BTB size> <BTB assoc>`
    /// - `yehpatt <H> <P> <BTB size> <BTB assoc>`
    pub fn from_args<S: AsRef<str>>(name: &str, params: &[S])
        -> Result<Self, ConfigError>
    {
        let kind = match name {
            "bimodal" => PredictorKind::Bimodal,
            "gshare" => PredictorKind::Gshare,
            "hybrid" => PredictorKind::Hybrid,
            "yehpatt" => PredictorKind::YehPatt,
            _ => return Err(ConfigError::UnknownPredictor(name.to_string())),
        };
        let names = param_names(kind);
        if params.len() != names.len() {
            return Err(ConfigError::WrongParamCount {
                kind, expected: names.len(), found: params.len()
            });
        }
        let mut values = [0usize; 6];
        for (i, (name, raw)) in names.iter().zip(params).enumerate() {
            values[i] = parse_param(*name, raw.as_ref())?;
        }

        let predictor = match kind {
            PredictorKind::Bimodal => PredictorConfig::Bimodal {
                bimodal_bits: values[0],
            },
            PredictorKind::Gshare => PredictorConfig::Gshare {
                gshare_bits: values[0],
                history_bits: values[1],
            },
            PredictorKind::Hybrid => PredictorConfig::Hybrid {
                chooser_bits: values[0],
                gshare_bits: values[1],
                history_bits: values[2],
                bimodal_bits: values[3],
            },
            PredictorKind::YehPatt => PredictorConfig::YehPatt {
                bht_bits: values[0],
                pattern_bits: values[1],
            },
        };
        let n = names.len();
        let btb = BtbConfig { size: values[n - 2], assoc: values[n - 1] };
        Self::new(predictor, btb)
    }

    pub fn counter_config(&self) -> SaturatingCounterConfig {
        SaturatingCounterConfig::new(self.counter_bits)
    }
}

/// Names of the positional parameters expected for each kind.
pub fn param_names(kind: PredictorKind) -> &'static [&'static str] {
    match kind {
        PredictorKind::Bimodal => &["M2", "BTB size", "BTB assoc"],
        PredictorKind::Gshare => &["M1", "N", "BTB size", "BTB assoc"],
        PredictorKind::Hybrid => &["K", "M1", "N", "M2", "BTB size", "BTB assoc"],
        PredictorKind::YehPatt => &["H", "P", "BTB size", "BTB assoc"],
    }
}

fn parse_param(name: &'static str, raw: &str) -> Result<usize, ConfigError> {
    raw.trim().parse::<usize>().map_err(|_| ConfigError::InvalidParam {
        name, value: raw.to_string()
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_each_kind() {
        let c = SimConfig::from_args("bimodal", &["6", "0", "0"]).unwrap();
        assert_eq!(c.predictor, PredictorConfig::Bimodal { bimodal_bits: 6 });
        assert!(!c.btb.is_enabled());

        let c = SimConfig::from_args("gshare", &["9", "3", "16", "4"]).unwrap();
        assert_eq!(c.predictor, PredictorConfig::Gshare { gshare_bits: 9, history_bits: 3 });
        assert_eq!(c.btb, BtbConfig { size: 16, assoc: 4 });

        let c = SimConfig::from_args("hybrid", &["8", "14", "10", "5", "0", "0"]).unwrap();
        assert_eq!(c.predictor, PredictorConfig::Hybrid {
            chooser_bits: 8, gshare_bits: 14, history_bits: 10, bimodal_bits: 5,
        });

        let c = SimConfig::from_args("yehpatt", &["10", "6", "0", "0"]).unwrap();
        assert_eq!(c.predictor, PredictorConfig::YehPatt { bht_bits: 10, pattern_bits: 6 });
        assert_eq!(c.counter_bits, 2);
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = SimConfig::from_args("perceptron", &["1"]).unwrap_err();
        assert_eq!(err, ConfigError::UnknownPredictor("perceptron".to_string()));
    }

    #[test]
    fn rejects_wrong_parameter_count() {
        let err = SimConfig::from_args("gshare", &["9", "3", "0"]).unwrap_err();
        assert_eq!(err, ConfigError::WrongParamCount {
            kind: PredictorKind::Gshare, expected: 4, found: 3
        });
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            SimConfig::from_args("bimodal", &["x", "0", "0"]),
            Err(ConfigError::InvalidParam { name: "M2", .. })
        ));
        assert!(matches!(
            SimConfig::from_args("bimodal", &["0", "0", "0"]),
            Err(ConfigError::OutOfRange { value: 0, .. })
        ));
        assert!(matches!(
            SimConfig::from_args("bimodal", &["31", "0", "0"]),
            Err(ConfigError::OutOfRange { value: 31, .. })
        ));
        assert_eq!(
            SimConfig::from_args("gshare", &["4", "5", "0", "0"]),
            Err(ConfigError::HistoryTooWide { history_bits: 5, gshare_bits: 4 })
        );
        assert!(matches!(
            SimConfig::from_args("bimodal", &["4", "12", "8"]),
            Err(ConfigError::BadBtbGeometry { .. })
        ));
        assert!(matches!(
            SimConfig::from_args("bimodal", &["4", "12", "4"]),
            Err(ConfigError::BadBtbGeometry { .. })
        ));
    }

    #[test]
    fn disabled_btb_ignores_assoc() {
        assert!(SimConfig::from_args("bimodal", &["4", "0", "3"]).is_ok());
    }

    #[test]
    fn counter_width_is_validated() {
        let p = PredictorConfig::Bimodal { bimodal_bits: 4 };
        assert!(SimConfig::with_counter_bits(p, BtbConfig::default(), 3).is_ok());
        assert!(SimConfig::with_counter_bits(p, BtbConfig::default(), 9).is_err());
    }

    #[test]
    fn serializes_with_kind_tag() {
        let c = SimConfig::from_args("gshare", &["9", "3", "0", "0"]).unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"kind\":\"gshare\""));
        let back: SimConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
