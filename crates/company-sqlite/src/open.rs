use crate::query::{table_columns, table_exists};
use crate::schema::{
    ADDITIVE_COLUMNS, CREATE_COMPANIES, CURRENT_SCHEMA_VERSION, LEGACY_COLUMNS, LEGACY_TABLE, TABLE,
};
use crate::Result;
use atlas_core::provinces;
use rusqlite::{params, Connection, Transaction};
use tracing::{debug, info, warn};

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens (or creates) the database file and brings its schema up to date.
    pub fn open_or_create(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        apply_pragmas(&conn)?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Wraps an existing connection, running the startup migration first.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        let db = Db { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Creates the table on first run, otherwise applies every pending
    /// migration. Safe to call any number of times.
    pub fn initialize(&self) -> Result<()> {
        migrate(&self.conn)
    }

    pub fn schema_version(&self) -> Result<i64> {
        Ok(user_version(&self.conn)?)
    }
}

fn apply_pragmas(conn: &Connection) -> Result<()> {
    conn.pragma_update_and_check(None, "journal_mode", "WAL", |r| r.get::<_, String>(0))?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    Ok(())
}

fn user_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("PRAGMA user_version", [], |r| r.get(0))
}

struct Migration {
    version: i64,
    name: &'static str,
    apply: fn(&Transaction<'_>) -> Result<()>,
}

// Each step checks its own column precondition, so a table that already has
// the shape a step produces passes through unchanged.
const MIGRATIONS: &[Migration] = &[
    Migration { version: 1, name: "locality_to_province", apply: locality_to_province },
    Migration { version: 2, name: "additive_columns", apply: additive_columns },
];

fn migrate(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    adopt_legacy_table(&tx)?;
    if !table_exists(&tx, TABLE)? {
        tx.execute_batch(CREATE_COMPANIES)?;
        tx.pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION)?;
        tx.commit()?;
        info!(version = CURRENT_SCHEMA_VERSION, "created companies table");
        return Ok(());
    }

    let from = user_version(&tx)?;
    for step in MIGRATIONS.iter().filter(|m| m.version > from) {
        debug!(step = step.name, version = step.version, "applying migration");
        (step.apply)(&tx)?;
        tx.pragma_update(None, "user_version", step.version)?;
    }
    tx.commit()?;
    if from < CURRENT_SCHEMA_VERSION {
        info!(from, to = CURRENT_SCHEMA_VERSION, "schema migrated");
    }
    Ok(())
}

/// Renames a legacy `empresas` table (any generation) to `companies`, along
/// with its columns, and rewinds the version so every step runs on it. An
/// empty `companies` table left by an earlier open is replaced; one holding
/// rows is kept and the legacy table is left alone.
fn adopt_legacy_table(tx: &Transaction<'_>) -> Result<()> {
    if !table_exists(tx, LEGACY_TABLE)? {
        return Ok(());
    }
    if table_exists(tx, TABLE)? {
        let rows: i64 = tx.query_row("SELECT COUNT(*) FROM companies", [], |r| r.get(0))?;
        if rows > 0 {
            warn!(legacy = LEGACY_TABLE, rows, "companies table already has rows; legacy table not imported");
            return Ok(());
        }
        tx.execute_batch("DROP TABLE companies;")?;
    }

    tx.execute_batch(&format!("ALTER TABLE {LEGACY_TABLE} RENAME TO {TABLE};"))?;
    let columns = table_columns(tx, TABLE)?;
    for (old, new) in LEGACY_COLUMNS {
        if columns.iter().any(|c| c == old) {
            tx.execute_batch(&format!("ALTER TABLE {TABLE} RENAME COLUMN {old} TO {new};"))?;
        }
    }
    tx.pragma_update(None, "user_version", 0)?;
    info!(from = LEGACY_TABLE, columns = columns.len(), "adopted legacy table");
    Ok(())
}

/// Oldest layout stored a free-text `locality`. Copy it into `province` and
/// derive `region` from the province table where an entry exists.
fn locality_to_province(tx: &Transaction<'_>) -> Result<()> {
    let columns = table_columns(tx, TABLE)?;
    let has = |c: &str| columns.iter().any(|col| col == c);

    if has("locality") && !has("province") {
        tx.execute_batch(
            "ALTER TABLE companies ADD COLUMN province TEXT;
             ALTER TABLE companies ADD COLUMN region TEXT;
             UPDATE companies SET province = locality;",
        )?;

        let rows: Vec<(i64, Option<String>)> = {
            let mut stmt = tx.prepare("SELECT id, province FROM companies")?;
            let mapped = stmt.query_map([], |r| Ok((r.get(0)?, r.get(1)?)))?;
            mapped.collect::<rusqlite::Result<_>>()?
        };
        let mut filled = 0usize;
        for (id, province) in &rows {
            if let Some(region) = province.as_deref().and_then(provinces::region_for) {
                tx.execute("UPDATE companies SET region=? WHERE id=?", params![region, id])?;
                filled += 1;
            }
        }
        info!(rows = rows.len(), regions = filled, "copied locality into province");
        return Ok(());
    }

    if has("province") && !has("region") {
        tx.execute_batch("ALTER TABLE companies ADD COLUMN region TEXT;")?;
    }
    Ok(())
}

fn additive_columns(tx: &Transaction<'_>) -> Result<()> {
    let columns = table_columns(tx, TABLE)?;
    for (name, ty) in ADDITIVE_COLUMNS {
        if !columns.iter().any(|c| c == name) {
            tx.execute_batch(&format!("ALTER TABLE companies ADD COLUMN {name} {ty};"))?;
            info!(column = name, "added column");
        }
    }
    Ok(())
}
