//! Runtime catalog of every distribution, for callers that pick one by name.

use rand::Rng;
use serde::Serialize;

use crate::distribution::{
    Beta, ContinuousDistribution, Exponential, Gamma, Kumaraswamy, Reciprocal, Uniform,
};
use crate::error::{DistError, Result};

/// Static description of one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DistInfo {
    pub name: &'static str,
    pub params: &'static [&'static str],
    pub support: &'static str,
    /// Alternate names accepted by [`Dist::from_name`].
    pub aliases: &'static [&'static str],
}

const CATALOG: &[DistInfo] = &[
    DistInfo {
        name: Uniform::NAME,
        params: &["a", "b"],
        support: "[a, b]",
        aliases: &["unif"],
    },
    DistInfo {
        name: Reciprocal::NAME,
        params: &["a", "b"],
        support: "[a, b], 0 < a < b",
        aliases: &["loguniform", "log-uniform", "log_uniform"],
    },
    DistInfo {
        name: Kumaraswamy::NAME,
        params: &["a", "b"],
        support: "[0, 1]",
        aliases: &["kumar"],
    },
    DistInfo {
        name: Exponential::NAME,
        params: &["rate"],
        support: "[0, inf)",
        aliases: &["exp"],
    },
    DistInfo {
        name: Beta::NAME,
        params: &["alpha", "beta"],
        support: "[0, 1]",
        aliases: &[],
    },
    DistInfo {
        name: Gamma::NAME,
        params: &["shape", "rate"],
        support: "[0, inf)",
        aliases: &[],
    },
];

/// Any catalog distribution, with validated parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "distribution", rename_all = "snake_case")]
pub enum Dist {
    Uniform(Uniform),
    Reciprocal(Reciprocal),
    Kumaraswamy(Kumaraswamy),
    Exponential(Exponential),
    Beta(Beta),
    Gamma(Gamma),
}

macro_rules! dispatch {
    ($self:expr, $d:ident => $body:expr) => {
        match $self {
            Dist::Uniform($d) => $body,
            Dist::Reciprocal($d) => $body,
            Dist::Kumaraswamy($d) => $body,
            Dist::Exponential($d) => $body,
            Dist::Beta($d) => $body,
            Dist::Gamma($d) => $body,
        }
    };
}

impl Dist {
    /// Every catalog entry, in a stable order.
    pub fn catalog() -> &'static [DistInfo] {
        CATALOG
    }

    /// Looks up an entry by name or alias, case-insensitively.
    pub fn lookup(name: &str) -> Result<&'static DistInfo> {
        let wanted = name.trim().to_ascii_lowercase();
        CATALOG
            .iter()
            .find(|info| info.name == wanted || info.aliases.iter().any(|alias| *alias == wanted))
            .ok_or_else(|| DistError::UnknownDistribution(name.to_string()))
    }

    /// Builds a distribution from its name and positional parameters.
    ///
    /// ```
    /// use sd_math::{ContinuousDistribution, Dist};
    ///
    /// let d = Dist::from_name("kumaraswamy", &[3.0, 2.0]).unwrap();
    /// assert!((d.quantile(0.5) - 0.6641045243088701).abs() < 1e-15);
    /// assert!(Dist::from_name("kumaraswamy", &[3.0]).is_err());
    /// ```
    pub fn from_name(name: &str, params: &[f64]) -> Result<Self> {
        let info = Self::lookup(name)?;
        if params.len() != info.params.len() {
            return Err(DistError::ParameterCount {
                distribution: info.name,
                expected: info.params.len(),
                got: params.len(),
            });
        }
        let dist = match info.name {
            Uniform::NAME => Dist::Uniform(Uniform::new(params[0], params[1])?),
            Reciprocal::NAME => Dist::Reciprocal(Reciprocal::new(params[0], params[1])?),
            Kumaraswamy::NAME => Dist::Kumaraswamy(Kumaraswamy::new(params[0], params[1])?),
            Exponential::NAME => Dist::Exponential(Exponential::new(params[0])?),
            Beta::NAME => Dist::Beta(Beta::new(params[0], params[1])?),
            Gamma::NAME => Dist::Gamma(Gamma::new(params[0], params[1])?),
            other => return Err(DistError::UnknownDistribution(other.to_string())),
        };
        Ok(dist)
    }

    /// Positional parameters, in catalog order.
    pub fn params(&self) -> Vec<f64> {
        match self {
            Dist::Uniform(d) => vec![d.a(), d.b()],
            Dist::Reciprocal(d) => vec![d.a(), d.b()],
            Dist::Kumaraswamy(d) => vec![d.a(), d.b()],
            Dist::Exponential(d) => vec![d.rate()],
            Dist::Beta(d) => vec![d.alpha(), d.beta()],
            Dist::Gamma(d) => vec![d.shape(), d.rate()],
        }
    }

    pub fn info(&self) -> &'static DistInfo {
        let index = match self {
            Dist::Uniform(_) => 0,
            Dist::Reciprocal(_) => 1,
            Dist::Kumaraswamy(_) => 2,
            Dist::Exponential(_) => 3,
            Dist::Beta(_) => 4,
            Dist::Gamma(_) => 5,
        };
        &CATALOG[index]
    }
}

impl ContinuousDistribution for Dist {
    fn name(&self) -> &'static str {
        dispatch!(self, d => d.name())
    }
    fn pdf(&self, x: f64) -> f64 {
        dispatch!(self, d => d.pdf(x))
    }
    fn log_pdf(&self, x: f64) -> f64 {
        dispatch!(self, d => d.log_pdf(x))
    }
    fn cdf(&self, x: f64) -> f64 {
        dispatch!(self, d => d.cdf(x))
    }
    fn quantile(&self, p: f64) -> f64 {
        dispatch!(self, d => d.quantile(p))
    }
    fn mean(&self) -> f64 {
        dispatch!(self, d => d.mean())
    }
    fn variance(&self) -> f64 {
        dispatch!(self, d => d.variance())
    }
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        dispatch!(self, d => ContinuousDistribution::sample(d, rng))
    }
}

impl rand::distr::Distribution<f64> for Dist {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        ContinuousDistribution::sample(self, rng)
    }
}
