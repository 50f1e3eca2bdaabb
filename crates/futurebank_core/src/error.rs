use std::fmt;

/// Out-of-domain input detected before any simulation work begins
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A numeric field is NaN or infinite
    NonFinite { field: &'static str, value: f64 },
    /// A monetary field that must be non-negative is negative
    NegativeAmount { field: &'static str, value: f64 },
    /// A fraction field lies outside `[0, 1]`
    FractionOutOfRange { field: &'static str, value: f64 },
    NegativeInflation(f64),
    NonPositiveHorizon,
    HorizonTooLong { years: u32, max: u32 },
    NegativeVolatility(f64),
    /// Expected return at or below -100% has no finite monthly equivalent
    ReturnBelowTotalLoss(f64),
    GoalOutsideHorizon {
        name: String,
        year: u32,
        horizon_years: u32,
    },
    NonPositiveGoalAmount { name: String, amount: f64 },
    DuplicateGoalName(String),
    NonPositiveLoanPrincipal { name: String, principal: f64 },
    NegativeLoanRate { name: String, annual_rate: f64 },
    NonPositiveLoanTerm { name: String },
    ZeroPaths,
    TooManyPaths { requested: usize, max: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonFinite { field, value } => {
                write!(f, "{field} must be finite (got {value})")
            }
            ConfigError::NegativeAmount { field, value } => {
                write!(f, "{field} must be non-negative (got {value})")
            }
            ConfigError::FractionOutOfRange { field, value } => {
                write!(f, "{field} must be between 0 and 1 (got {value})")
            }
            ConfigError::NegativeInflation(value) => {
                write!(f, "inflation must be non-negative (got {value})")
            }
            ConfigError::NonPositiveHorizon => write!(f, "horizon_years must be positive"),
            ConfigError::HorizonTooLong { years, max } => {
                write!(f, "horizon_years {years} exceeds the maximum of {max}")
            }
            ConfigError::NegativeVolatility(value) => {
                write!(f, "volatility must be non-negative (got {value})")
            }
            ConfigError::ReturnBelowTotalLoss(value) => {
                write!(f, "expected_return must be greater than -1 (got {value})")
            }
            ConfigError::GoalOutsideHorizon {
                name,
                year,
                horizon_years,
            } => write!(
                f,
                "goal '{name}' is due in year {year}, outside the {horizon_years}-year horizon"
            ),
            ConfigError::NonPositiveGoalAmount { name, amount } => {
                write!(f, "goal '{name}' amount must be positive (got {amount})")
            }
            ConfigError::DuplicateGoalName(name) => {
                write!(f, "goal name '{name}' is used more than once")
            }
            ConfigError::NonPositiveLoanPrincipal { name, principal } => {
                write!(f, "loan '{name}' principal must be positive (got {principal})")
            }
            ConfigError::NegativeLoanRate { name, annual_rate } => {
                write!(
                    f,
                    "loan '{name}' annual_rate must be non-negative (got {annual_rate})"
                )
            }
            ConfigError::NonPositiveLoanTerm { name } => {
                write!(f, "loan '{name}' term must be at least one year")
            }
            ConfigError::ZeroPaths => write!(f, "n_paths must be positive"),
            ConfigError::TooManyPaths { requested, max } => {
                write!(f, "n_paths {requested} exceeds the maximum of {max}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Pipeline stage in which a non-finite value was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CashFlow,
    Compounding,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::CashFlow => write!(f, "cash flow precomputation"),
            Stage::Compounding => write!(f, "wealth compounding"),
        }
    }
}

/// Errors surfaced by [`crate::simulation::simulate`]
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    InvalidConfig(ConfigError),
    /// A NaN or infinite value appeared. `path` is `None` for path-independent stages.
    NumericInstability {
        stage: Stage,
        path: Option<usize>,
        month: usize,
        value: f64,
    },
    /// The run was cancelled through its progress handle
    Cancelled,
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidConfig(e) => write!(f, "invalid configuration: {e}"),
            SimulationError::NumericInstability {
                stage,
                path: Some(path),
                month,
                value,
            } => write!(
                f,
                "numeric instability during {stage}: path {path}, month {month} produced {value}"
            ),
            SimulationError::NumericInstability {
                stage,
                path: None,
                month,
                value,
            } => write!(
                f,
                "numeric instability during {stage}: month {month} produced {value}"
            ),
            SimulationError::Cancelled => write!(f, "simulation cancelled"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::InvalidConfig(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for SimulationError {
    fn from(e: ConfigError) -> Self {
        SimulationError::InvalidConfig(e)
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;
