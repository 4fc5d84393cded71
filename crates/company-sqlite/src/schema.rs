pub const TABLE: &str = "companies";

/// Table name used by databases written before the column names changed.
pub(crate) const LEGACY_TABLE: &str = "empresas";

// Old column name -> current name. Any subset may be present; `ciudad` maps
// to `locality` so the province migration picks it up.
pub(crate) const LEGACY_COLUMNS: &[(&str, &str)] = &[
    ("nombre", "name"),
    ("ciudad", "locality"),
    ("provincia", "province"),
    ("comunidad", "region"),
    ("latitud", "latitude"),
    ("longitud", "longitude"),
    ("link_empleados", "employee_link"),
];

/// Value stamped into `PRAGMA user_version` once every migration has run.
pub const CURRENT_SCHEMA_VERSION: i64 = 2;

pub const CREATE_COMPANIES: &str = r#"
CREATE TABLE companies (
  id              INTEGER PRIMARY KEY AUTOINCREMENT,
  name            TEXT NOT NULL,
  sector          TEXT,
  province        TEXT,
  region          TEXT,
  latitude        REAL NOT NULL,
  longitude       REAL NOT NULL,
  employee_link   TEXT
);
"#;

pub const SELECT_COMPANY: &str =
    "SELECT id, name, sector, province, region, latitude, longitude, employee_link FROM companies";

// Columns older tables may lack that can be added as nullable without
// touching existing rows. `latitude`/`longitude` are only NOT NULL on tables
// created fresh.
pub(crate) const ADDITIVE_COLUMNS: &[(&str, &str)] = &[
    ("sector", "TEXT"),
    ("latitude", "REAL"),
    ("longitude", "REAL"),
    ("employee_link", "TEXT"),
];
