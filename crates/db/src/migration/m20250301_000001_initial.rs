//! Initial database migration.
//!
//! Creates the client reference tables and the accountancy tables
//! (types, statuses, active-type links, monthly statuses, assignments).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: CLIENTS AND THEIR STAFF
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(EMISORS_SQL).await?;
        db.execute_unprepared(CLIENTS_SQL).await?;
        db.execute_unprepared(CLIENT_ASSIGNMENTS_SQL).await?;

        // ============================================================
        // PART 2: ACCOUNTANCY REFERENCE DATA
        // ============================================================
        db.execute_unprepared(ACCOUNTANCY_TYPES_SQL).await?;
        db.execute_unprepared(ASSIGNMENT_STATUSES_SQL).await?;
        db.execute_unprepared(CLIENT_ASSIGNMENTS_TYPES_SQL).await?;

        // ============================================================
        // PART 3: MONTHLY STATUS AND ASSIGNMENTS
        // ============================================================
        db.execute_unprepared(CLIENT_ACCOUNTANCY_STATUS_SQL).await?;
        db.execute_unprepared(CLIENT_ACCOUNTANCY_ASSIGNMENTS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    username VARCHAR(100) NOT NULL UNIQUE,
    active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const EMISORS_SQL: &str = r"
CREATE TABLE emisors (
    id SERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    active BOOLEAN NOT NULL DEFAULT true
);
";

const CLIENTS_SQL: &str = r"
CREATE TABLE clients (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    rfc VARCHAR(13),
    active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_clients_active_name ON clients(name) WHERE active = true;
";

const CLIENT_ASSIGNMENTS_SQL: &str = r"
-- Staff and issuing entity responsible for each client
CREATE TABLE client_assignments (
    client_id UUID PRIMARY KEY REFERENCES clients(id) ON DELETE CASCADE,
    supervisor_id UUID REFERENCES users(id),
    responsible_id UUID REFERENCES users(id),
    emisor_id INTEGER REFERENCES emisors(id)
);

CREATE INDEX idx_client_assignments_supervisor ON client_assignments(supervisor_id);
CREATE INDEX idx_client_assignments_responsible ON client_assignments(responsible_id);
";

const ACCOUNTANCY_TYPES_SQL: &str = r"
CREATE TABLE accountancy_types (
    id SERIAL PRIMARY KEY,
    name VARCHAR(100) NOT NULL UNIQUE
);
";

const ASSIGNMENT_STATUSES_SQL: &str = r"
CREATE TABLE assignment_statuses (
    id SERIAL PRIMARY KEY,
    name VARCHAR(100) NOT NULL UNIQUE
);
";

const CLIENT_ASSIGNMENTS_TYPES_SQL: &str = r"
-- Assignment types a client currently tracks, independent of month
CREATE TABLE client_assignments_types (
    client_id UUID NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
    assignment_type_id INTEGER NOT NULL REFERENCES accountancy_types(id),
    PRIMARY KEY (client_id, assignment_type_id)
);
";

const CLIENT_ACCOUNTANCY_STATUS_SQL: &str = r"
CREATE TABLE client_accountancy_status (
    id SERIAL PRIMARY KEY,
    client_id UUID NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
    month DATE NOT NULL,
    due_date DATE,
    observations TEXT,
    CONSTRAINT uq_client_accountancy_status_month UNIQUE (client_id, month)
);

CREATE INDEX idx_client_accountancy_status_client ON client_accountancy_status(client_id, month DESC);
";

const CLIENT_ACCOUNTANCY_ASSIGNMENTS_SQL: &str = r"
CREATE TABLE client_accountancy_assignments (
    id SERIAL PRIMARY KEY,
    status_id INTEGER NOT NULL REFERENCES client_accountancy_status(id) ON DELETE CASCADE,
    assignment_type_id INTEGER NOT NULL REFERENCES accountancy_types(id),
    assignment_status_id INTEGER NOT NULL REFERENCES assignment_statuses(id),
    CONSTRAINT uq_client_accountancy_assignment UNIQUE (status_id, assignment_type_id)
);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS client_accountancy_assignments CASCADE;
DROP TABLE IF EXISTS client_accountancy_status CASCADE;
DROP TABLE IF EXISTS client_assignments_types CASCADE;
DROP TABLE IF EXISTS assignment_statuses CASCADE;
DROP TABLE IF EXISTS accountancy_types CASCADE;
DROP TABLE IF EXISTS client_assignments CASCADE;
DROP TABLE IF EXISTS clients CASCADE;
DROP TABLE IF EXISTS emisors CASCADE;
DROP TABLE IF EXISTS users CASCADE;
";
