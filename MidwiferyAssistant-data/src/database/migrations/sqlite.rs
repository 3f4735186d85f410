use rusqlite::Connection;
use tracing::debug;

/// Create every table and index used by the repositories.
///
/// All statements are idempotent, so this runs safely on every new connection.
/// Foreign keys are switched on per connection.
pub fn run_migrations(conn: &Connection) -> rusqlite::Result<()> {
    debug!("Running SQLite migrations");

    conn.pragma_update(None, "foreign_keys", true)?;
    create_patient_tables(conn)?;
    create_clinical_tables(conn)?;
    create_postnatal_tables(conn)?;

    debug!("SQLite migrations completed successfully");
    Ok(())
}

fn create_patient_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS patients (
            id TEXT PRIMARY KEY,
            midwife_id TEXT NOT NULL,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            date_of_birth TEXT,
            last_period_date TEXT,
            cycle_length INTEGER NOT NULL DEFAULT 28,
            notes TEXT,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_patients_midwife
        ON patients (midwife_id);",
    )
}

fn create_clinical_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS blood_pressure_records (
            id TEXT PRIMARY KEY,
            patient_id TEXT NOT NULL REFERENCES patients (id),
            midwife_id TEXT NOT NULL,
            systolic INTEGER NOT NULL,
            diastolic INTEGER NOT NULL,
            heart_rate INTEGER,
            notes TEXT,
            recorded_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_blood_pressure_records_recorded_at
        ON blood_pressure_records (midwife_id, recorded_at DESC);

        CREATE TABLE IF NOT EXISTS biomedical_records (
            id TEXT PRIMARY KEY,
            patient_id TEXT NOT NULL REFERENCES patients (id),
            midwife_id TEXT NOT NULL,
            hemoglobin REAL NOT NULL,
            platelets INTEGER NOT NULL,
            ferritin REAL,
            hematocrit REAL,
            ldh REAL,
            alt REAL,
            ast REAL,
            notes TEXT,
            recorded_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_biomedical_records_patient
        ON biomedical_records (patient_id, recorded_at DESC);",
    )
}

fn create_postnatal_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS deliveries (
            id TEXT PRIMARY KEY,
            patient_id TEXT NOT NULL REFERENCES patients (id),
            midwife_id TEXT NOT NULL,
            delivery_date TEXT NOT NULL,
            delivery_type TEXT NOT NULL,
            delivery_location TEXT,
            complications TEXT
        );

        CREATE TABLE IF NOT EXISTS babies (
            id TEXT PRIMARY KEY,
            mother_id TEXT NOT NULL REFERENCES patients (id),
            midwife_id TEXT NOT NULL,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            birth_date TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS postnatal_checkups (
            id TEXT PRIMARY KEY,
            midwife_id TEXT NOT NULL,
            checkup_type TEXT NOT NULL,
            patient_id TEXT REFERENCES patients (id),
            baby_id TEXT REFERENCES babies (id),
            checkup_date TEXT NOT NULL,
            temperature REAL,
            heart_rate INTEGER,
            blood_pressure_systolic INTEGER,
            blood_pressure_diastolic INTEGER,
            respiratory_rate INTEGER,
            weight REAL,
            symptoms TEXT,
            physical_exam TEXT,
            recommendations TEXT,
            medications TEXT,
            notes TEXT,
            next_checkup_date TEXT
        );

        CREATE TABLE IF NOT EXISTS vaccinations (
            id TEXT PRIMARY KEY,
            baby_id TEXT NOT NULL REFERENCES babies (id),
            midwife_id TEXT NOT NULL,
            vaccine_name TEXT NOT NULL,
            date_administered TEXT NOT NULL,
            dose TEXT,
            route TEXT,
            site TEXT,
            lot_number TEXT,
            expiration_date TEXT,
            reaction TEXT,
            notes TEXT
        );

        CREATE TABLE IF NOT EXISTS breastfeeding_records (
            id TEXT PRIMARY KEY,
            mother_id TEXT NOT NULL REFERENCES patients (id),
            baby_id TEXT NOT NULL REFERENCES babies (id),
            midwife_id TEXT NOT NULL,
            feeding_date TEXT NOT NULL,
            feeding_type TEXT NOT NULL,
            duration INTEGER,
            issues TEXT,
            notes TEXT
        );

        CREATE TABLE IF NOT EXISTS care_reminders (
            id TEXT PRIMARY KEY,
            midwife_id TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT,
            reminder_date TEXT NOT NULL,
            reminder_type TEXT NOT NULL,
            priority TEXT NOT NULL,
            patient_id TEXT,
            baby_id TEXT,
            completed INTEGER NOT NULL DEFAULT 0
        );
        CREATE INDEX IF NOT EXISTS idx_care_reminders_date
        ON care_reminders (midwife_id, reminder_date);",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 9);

        let foreign_keys: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(foreign_keys, 1);
    }
}
