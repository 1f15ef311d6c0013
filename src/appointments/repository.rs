use chrono::{NaiveDate, NaiveTime};
use sqlx::{PgPool, Postgres, Transaction};

use super::models::{
    Appointment, AppointmentChangeLog, AppointmentListQuery, AppointmentStatus, ChangeType,
    Customer,
};
use crate::models::Service;

const APPOINTMENT_COLUMNS: &str = "id, appointment_code, customer_id, customer_name, \
     customer_phone, service_id, service_name, stylist_id, stylist_name, date, \
     start_time, end_time, notes, status, created_at, updated_at";

/// Repository for customer persistence
///
/// Customers are only ever written inside a booking transaction, so the
/// repository holds no pool of its own.
#[derive(Clone, Default)]
pub struct CustomersRepository;

impl CustomersRepository {
    pub fn new() -> Self {
        Self
    }

    /// Find a customer by phone, creating one on first contact.
    ///
    /// On a repeat phone the stored name is refreshed and the existing
    /// row is returned; RETURNING yields the row on both paths.
    pub async fn find_or_create(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
        phone: &str,
    ) -> Result<Customer, sqlx::Error> {
        sqlx::query_as::<_, Customer>(
            "INSERT INTO customers (name, phone)
             VALUES ($1, $2)
             ON CONFLICT (phone) DO UPDATE SET name = EXCLUDED.name
             RETURNING id, name, phone, created_at",
        )
        .bind(name)
        .bind(phone)
        .fetch_one(&mut **tx)
        .await
    }
}

/// Repository for appointment persistence
#[derive(Clone)]
pub struct AppointmentsRepository {
    pool: PgPool,
}

impl AppointmentsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_service(&self, service_id: i32) -> Result<Option<Service>, sqlx::Error> {
        sqlx::query_as::<_, Service>(
            "SELECT id, name, duration_minutes, price, is_active, created_at, updated_at
             FROM services WHERE id = $1",
        )
        .bind(service_id)
        .fetch_optional(&self.pool)
        .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
        customer: &Customer,
        service: &Service,
        stylist_id: i32,
        stylist_name: &str,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        notes: Option<&str>,
    ) -> Result<Appointment, sqlx::Error> {
        sqlx::query_as::<_, Appointment>(&format!(
            "INSERT INTO appointments
                 (appointment_code, customer_id, customer_name, customer_phone,
                  service_id, service_name, stylist_id, stylist_name,
                  date, start_time, end_time, notes, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, 'pending')
             RETURNING {}",
            APPOINTMENT_COLUMNS
        ))
        .bind(code)
        .bind(customer.id)
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(service.id)
        .bind(&service.name)
        .bind(stylist_id)
        .bind(stylist_name)
        .bind(date)
        .bind(start_time)
        .bind(end_time)
        .bind(notes)
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Appointment>, sqlx::Error> {
        sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {} FROM appointments WHERE id = $1",
            APPOINTMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Lock the row for the remainder of the transaction
    pub async fn find_by_id_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {} FROM appointments WHERE id = $1 FOR UPDATE",
            APPOINTMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
    }

    pub async fn find_by_code_and_phone(
        &self,
        code: &str,
        phone: &str,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {} FROM appointments
             WHERE appointment_code = $1 AND customer_phone = $2",
            APPOINTMENT_COLUMNS
        ))
        .bind(code)
        .bind(phone)
        .fetch_optional(&self.pool)
        .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
        customer_name: &str,
        customer_phone: &str,
        service_id: i32,
        service_name: &str,
        stylist_id: Option<i32>,
        stylist_name: Option<&str>,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        notes: Option<&str>,
    ) -> Result<Appointment, sqlx::Error> {
        sqlx::query_as::<_, Appointment>(&format!(
            "UPDATE appointments SET
                 customer_name = $2, customer_phone = $3,
                 service_id = $4, service_name = $5,
                 stylist_id = $6, stylist_name = $7,
                 date = $8, start_time = $9, end_time = $10,
                 notes = $11, updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            APPOINTMENT_COLUMNS
        ))
        .bind(id)
        .bind(customer_name)
        .bind(customer_phone)
        .bind(service_id)
        .bind(service_name)
        .bind(stylist_id)
        .bind(stylist_name)
        .bind(date)
        .bind(start_time)
        .bind(end_time)
        .bind(notes)
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn update_status_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
        status: AppointmentStatus,
    ) -> Result<Appointment, sqlx::Error> {
        sqlx::query_as::<_, Appointment>(&format!(
            "UPDATE appointments SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            APPOINTMENT_COLUMNS
        ))
        .bind(id)
        .bind(status)
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn list(
        &self,
        query: &AppointmentListQuery,
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {} FROM appointments
             WHERE ($1::date IS NULL OR date = $1)
               AND ($2::integer IS NULL OR stylist_id = $2)
               AND ($3::text IS NULL OR status = $3)
             ORDER BY date, start_time",
            APPOINTMENT_COLUMNS
        ))
        .bind(query.date)
        .bind(query.stylist_id)
        .bind(query.status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
    }
}

/// Repository for the append-only appointment change log
#[derive(Clone)]
pub struct ChangeLogRepository {
    pool: PgPool,
}

impl ChangeLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn append_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        appointment_id: i32,
        changed_by: &str,
        old_values: &serde_json::Value,
        new_values: &serde_json::Value,
        change_type: ChangeType,
    ) -> Result<AppointmentChangeLog, sqlx::Error> {
        sqlx::query_as::<_, AppointmentChangeLog>(
            "INSERT INTO appointment_change_log
                 (appointment_id, changed_by, old_values, new_values, change_type)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, appointment_id, changed_by, old_values, new_values,
                       change_type, created_at",
        )
        .bind(appointment_id)
        .bind(changed_by)
        .bind(old_values)
        .bind(new_values)
        .bind(change_type)
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn find_by_appointment(
        &self,
        appointment_id: i32,
    ) -> Result<Vec<AppointmentChangeLog>, sqlx::Error> {
        sqlx::query_as::<_, AppointmentChangeLog>(
            "SELECT id, appointment_id, changed_by, old_values, new_values,
                    change_type, created_at
             FROM appointment_change_log
             WHERE appointment_id = $1
             ORDER BY created_at, id",
        )
        .bind(appointment_id)
        .fetch_all(&self.pool)
        .await
    }
}

// Repository behavior against a live database is covered by the
// integration test suite.
