use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::sql::mysql::MySqlGenerator;
use super::sql::postgis::PostgisGenerator;
use super::sql::sqlite::SqliteGenerator;
use super::sql::sqlserver::SqlServerGenerator;
use super::traits::SpatialGenerator;
use crate::error::{GeoError, GeoResult};

/// Built-in target dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// PostgreSQL with PostGIS.
    #[default]
    #[serde(alias = "postgis", alias = "postgresql")]
    Postgres,
    MySQL,
    /// Geometry stored as WKT text; no spatial functions.
    Sqlite,
    #[serde(alias = "mssql")]
    SqlServer,
}

impl Dialect {
    pub const ALL: [Dialect; 4] = [
        Dialect::Postgres,
        Dialect::MySQL,
        Dialect::Sqlite,
        Dialect::SqlServer,
    ];

    pub fn generator(&self) -> Box<dyn SpatialGenerator> {
        match self {
            Dialect::Postgres => Box::new(PostgisGenerator),
            Dialect::MySQL => Box::new(MySqlGenerator),
            Dialect::Sqlite => Box::new(SqliteGenerator),
            Dialect::SqlServer => Box::new(SqlServerGenerator),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::MySQL => "mysql",
            Dialect::Sqlite => "sqlite",
            Dialect::SqlServer => "sqlserver",
        }
    }
}

impl FromStr for Dialect {
    type Err = GeoError;

    fn from_str(s: &str) -> GeoResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "postgis" => Ok(Dialect::Postgres),
            "mysql" => Ok(Dialect::MySQL),
            "sqlite" => Ok(Dialect::Sqlite),
            "sqlserver" | "mssql" => Ok(Dialect::SqlServer),
            _ => Err(GeoError::UnknownDialect(s.to_string())),
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_parse() {
        for dialect in Dialect::ALL {
            assert_eq!(dialect.name().parse::<Dialect>().unwrap(), dialect);
            assert_eq!(dialect.generator().name(), dialect.name());
        }
        assert_eq!("PostGIS".parse::<Dialect>().unwrap(), Dialect::Postgres);
        assert!(matches!(
            "oracle".parse::<Dialect>(),
            Err(GeoError::UnknownDialect(name)) if name == "oracle"
        ));
    }

    #[test]
    fn test_serde_aliases() {
        let d: Dialect = serde_json::from_str("\"mssql\"").unwrap();
        assert_eq!(d, Dialect::SqlServer);
        let d: Dialect = serde_json::from_str("\"postgis\"").unwrap();
        assert_eq!(d, Dialect::Postgres);
        assert_eq!(serde_json::to_string(&Dialect::MySQL).unwrap(), "\"mysql\"");
    }
}
