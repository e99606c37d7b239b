//! Application settings, read from environment variables (optionally populated from a `.env` file
//! by the `main` function)
use std::env::VarError;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Settings required for every command accessing the database
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    /// PostgreSQL connection url, "postgres://{user}:{password}@{host}/{database}"
    pub database_url: String,
}

impl DatabaseSettings {
    pub fn from_env() -> Result<Self, SetupError> {
        Self::from_lookup(|name| std::env::var(name))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Result<String, VarError>) -> Result<Self, SetupError> {
        Ok(Self {
            database_url: required_var(&lookup, "DATABASE_URL")?,
        })
    }
}

/// Settings of the web server
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub listen_address: String,
    pub listen_port: u16,
    /// Time zone for displaying show start times and interpreting entered start times. Taken from
    /// the optional `TIME_ZONE` variable (IANA name like "America/New_York"), defaults to UTC.
    pub timezone: chrono_tz::Tz,
}

impl ServerSettings {
    pub fn from_env() -> Result<Self, SetupError> {
        Self::from_lookup(|name| std::env::var(name))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Result<String, VarError>) -> Result<Self, SetupError> {
        Ok(Self {
            listen_address: required_var(&lookup, "LISTEN_ADDRESS")?,
            listen_port: parse_var(required_var(&lookup, "LISTEN_PORT")?, "LISTEN_PORT")?,
            timezone: match optional_var(&lookup, "TIME_ZONE")? {
                Some(value) => parse_var(value, "TIME_ZONE")?,
                None => chrono_tz::UTC,
            },
        })
    }
}

fn optional_var(
    lookup: &impl Fn(&str) -> Result<String, VarError>,
    variable_name: &'static str,
) -> Result<Option<String>, SetupError> {
    match lookup(variable_name) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(SetupError::EnvVariableInvalid {
            variable_name,
            problem: "not valid unicode".to_owned(),
        }),
    }
}

fn required_var(
    lookup: &impl Fn(&str) -> Result<String, VarError>,
    variable_name: &'static str,
) -> Result<String, SetupError> {
    optional_var(lookup, variable_name)?
        .ok_or(SetupError::EnvVariableMissing { variable_name })
}

fn parse_var<T: FromStr>(value: String, variable_name: &'static str) -> Result<T, SetupError>
where
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| SetupError::EnvVariableInvalid {
            variable_name,
            problem: e.to_string(),
        })
}

#[derive(Debug)]
pub enum SetupError {
    EnvVariableMissing {
        variable_name: &'static str,
    },
    EnvVariableInvalid {
        variable_name: &'static str,
        problem: String,
    },
}

impl Display for SetupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::EnvVariableMissing { variable_name } => {
                write!(f, "Environment variable {} must be defined", variable_name)
            }
            SetupError::EnvVariableInvalid {
                variable_name,
                problem,
            } => write!(
                f,
                "Value of environment variable {} is invalid: {}",
                variable_name, problem
            ),
        }
    }
}

impl std::error::Error for SetupError {}
