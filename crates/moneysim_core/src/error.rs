use std::fmt;

/// A single problem found while validating `FinancialInputs`
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// An amount is negative, NaN or infinite
    InvalidAmount { field: String, value: f64 },
    /// Horizon outside the supported range
    MonthsOutOfRange { months: u32, min: u32, max: u32 },
    /// Due or charge day outside 1..=max
    DayOutOfRange { item: String, day: u32, max: u32 },
    /// A bill or subscription has a blank name
    EmptyName { id: String },
    /// Two bills (or two subscriptions) share an id
    DuplicateId(String),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::InvalidAmount { field, value } => {
                write!(f, "{field} must be a non-negative amount (got {value})")
            }
            InputError::MonthsOutOfRange { months, min, max } => {
                write!(f, "months must be between {min} and {max} (got {months})")
            }
            InputError::DayOutOfRange { item, day, max } => {
                write!(f, "{item} day must be between 1 and {max} (got {day})")
            }
            InputError::EmptyName { id } => write!(f, "item {id:?} has an empty name"),
            InputError::DuplicateId(id) => write!(f, "duplicate id {id:?}"),
        }
    }
}

impl std::error::Error for InputError {}

/// Every validation failure found in one pass
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(pub Vec<InputError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[InputError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid inputs: ")?;
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.first().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl From<InputError> for ValidationErrors {
    fn from(err: InputError) -> Self {
        ValidationErrors(vec![err])
    }
}
