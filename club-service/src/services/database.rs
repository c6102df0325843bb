//! Database service for club-service.

use crate::models::{
    BillingProfile, Client, CreateClient, CreateDocument, CreateEvent, CreateExpense,
    CreateLineItem, CreatePlanning, CreateShift, Document, DocumentStatus, DocumentType, Event,
    Expense, LineItem, ListDocumentsFilter, Planning, Shift, UpdateClient, UpdateDocument,
    UpdateEvent, UpdateExpense, UpdateLineItem,
};
use crate::services::metrics::DB_QUERY_DURATION;
use chrono::NaiveDate;
use club_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "club-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Billing Profile Operations
    // -------------------------------------------------------------------------

    /// Create the billing profile for a tenant, starting its trial.
    /// `trial_started_at` is set by the insert and never rewritten.
    #[instrument(skip(self), fields(tenant_id = %tenant_id))]
    pub async fn create_billing_profile(
        &self,
        tenant_id: Uuid,
        club_name: &str,
    ) -> Result<BillingProfile, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_billing_profile"])
            .start_timer();

        let profile = sqlx::query_as::<_, BillingProfile>(
            r#"
            INSERT INTO billing_profiles (tenant_id, club_name, plan, trial_started_at)
            VALUES ($1, $2, 'free', NOW())
            RETURNING tenant_id, club_name, plan, trial_started_at, subscription_ends_at, created_utc
            "#,
        )
        .bind(tenant_id)
        .bind(club_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(anyhow::anyhow!(
                    "Billing profile already exists for this tenant"
                ))
            }
            _ => AppError::DatabaseError(anyhow::anyhow!("Failed to create profile: {}", e)),
        })?;

        timer.observe_duration();

        info!(tenant_id = %profile.tenant_id, "Billing profile created, trial started");

        Ok(profile)
    }

    /// Get a tenant's billing profile.
    #[instrument(skip(self), fields(tenant_id = %tenant_id))]
    pub async fn get_billing_profile(
        &self,
        tenant_id: Uuid,
    ) -> Result<Option<BillingProfile>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_billing_profile"])
            .start_timer();

        let profile = sqlx::query_as::<_, BillingProfile>(
            r#"
            SELECT tenant_id, club_name, plan, trial_started_at, subscription_ends_at, created_utc
            FROM billing_profiles
            WHERE tenant_id = $1
            "#,
        )
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get profile: {}", e)))?;

        timer.observe_duration();

        Ok(profile)
    }

    /// Record a plan change confirmed by the payment processor.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, plan = %plan))]
    pub async fn update_plan(
        &self,
        tenant_id: Uuid,
        plan: &str,
        subscription_ends_at: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<Option<BillingProfile>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_plan"])
            .start_timer();

        let profile = sqlx::query_as::<_, BillingProfile>(
            r#"
            UPDATE billing_profiles
            SET plan = $2, subscription_ends_at = $3
            WHERE tenant_id = $1
            RETURNING tenant_id, club_name, plan, trial_started_at, subscription_ends_at, created_utc
            "#,
        )
        .bind(tenant_id)
        .bind(plan)
        .bind(subscription_ends_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to update plan: {}", e)))?;

        timer.observe_duration();

        if profile.is_some() {
            info!(tenant_id = %tenant_id, plan = %plan, "Plan updated");
        }

        Ok(profile)
    }

    // -------------------------------------------------------------------------
    // Client Operations
    // -------------------------------------------------------------------------

    /// Create a client.
    #[instrument(skip(self, input), fields(tenant_id = %input.tenant_id))]
    pub async fn create_client(&self, input: &CreateClient) -> Result<Client, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_client"])
            .start_timer();

        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (client_id, tenant_id, name, email, phone, address, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING client_id, tenant_id, name, email, phone, address, notes, created_utc
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.tenant_id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .bind(&input.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to create client: {}", e)))?;

        timer.observe_duration();

        info!(client_id = %client.client_id, "Client created");

        Ok(client)
    }

    /// Get a client by ID.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, client_id = %client_id))]
    pub async fn get_client(
        &self,
        tenant_id: Uuid,
        client_id: Uuid,
    ) -> Result<Option<Client>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_client"])
            .start_timer();

        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT client_id, tenant_id, name, email, phone, address, notes, created_utc
            FROM clients
            WHERE tenant_id = $1 AND client_id = $2
            "#,
        )
        .bind(tenant_id)
        .bind(client_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get client: {}", e)))?;

        timer.observe_duration();

        Ok(client)
    }

    /// List clients for a tenant, newest first.
    #[instrument(skip(self), fields(tenant_id = %tenant_id))]
    pub async fn list_clients(
        &self,
        tenant_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Client>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_clients"])
            .start_timer();

        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT client_id, tenant_id, name, email, phone, address, notes, created_utc
            FROM clients
            WHERE tenant_id = $1
            ORDER BY created_utc DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(tenant_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list clients: {}", e)))?;

        timer.observe_duration();

        Ok(clients)
    }

    /// Update a client.
    #[instrument(skip(self, input), fields(tenant_id = %tenant_id, client_id = %client_id))]
    pub async fn update_client(
        &self,
        tenant_id: Uuid,
        client_id: Uuid,
        input: &UpdateClient,
    ) -> Result<Option<Client>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_client"])
            .start_timer();

        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET name = COALESCE($3, name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                address = COALESCE($6, address),
                notes = COALESCE($7, notes)
            WHERE tenant_id = $1 AND client_id = $2
            RETURNING client_id, tenant_id, name, email, phone, address, notes, created_utc
            "#,
        )
        .bind(tenant_id)
        .bind(client_id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .bind(&input.notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to update client: {}", e)))?;

        timer.observe_duration();

        Ok(client)
    }

    /// Delete a client.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, client_id = %client_id))]
    pub async fn delete_client(&self, tenant_id: Uuid, client_id: Uuid) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_client"])
            .start_timer();

        let result = sqlx::query(
            r#"
            DELETE FROM clients
            WHERE tenant_id = $1 AND client_id = $2
            "#,
        )
        .bind(tenant_id)
        .bind(client_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to delete client: {}", e)))?;

        timer.observe_duration();

        Ok(result.rows_affected() > 0)
    }

    // -------------------------------------------------------------------------
    // Document Operations
    // -------------------------------------------------------------------------

    /// Create a document in draft status.
    #[instrument(skip(self, input), fields(tenant_id = %input.tenant_id))]
    pub async fn create_document(&self, input: &CreateDocument) -> Result<Document, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_document"])
            .start_timer();

        let document = sqlx::query_as::<_, Document>(
            r#"
            INSERT INTO documents (
                document_id, tenant_id, document_type, status, client_id,
                creation_date, due_date, notes
            )
            VALUES ($1, $2, $3, 'draft', $4, $5, $6, $7)
            RETURNING document_id, tenant_id, document_type, status, client_id,
                creation_date, due_date, payment_date, notes, created_utc
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.tenant_id)
        .bind(input.document_type.as_str())
        .bind(input.client_id)
        .bind(input.creation_date)
        .bind(input.due_date)
        .bind(&input.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to create document: {}", e))
        })?;

        timer.observe_duration();

        info!(document_id = %document.document_id, document_type = %document.document_type, "Document created");

        Ok(document)
    }

    /// Get a document by ID.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, document_id = %document_id))]
    pub async fn get_document(
        &self,
        tenant_id: Uuid,
        document_id: Uuid,
    ) -> Result<Option<Document>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_document"])
            .start_timer();

        let document = sqlx::query_as::<_, Document>(
            r#"
            SELECT document_id, tenant_id, document_type, status, client_id,
                creation_date, due_date, payment_date, notes, created_utc
            FROM documents
            WHERE tenant_id = $1 AND document_id = $2
            "#,
        )
        .bind(tenant_id)
        .bind(document_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get document: {}", e)))?;

        timer.observe_duration();

        Ok(document)
    }

    /// List documents for a tenant with optional filters, newest first.
    #[instrument(skip(self, filter), fields(tenant_id = %tenant_id))]
    pub async fn list_documents(
        &self,
        tenant_id: Uuid,
        filter: &ListDocumentsFilter,
    ) -> Result<Vec<Document>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_documents"])
            .start_timer();

        let documents = sqlx::query_as::<_, Document>(
            r#"
            SELECT document_id, tenant_id, document_type, status, client_id,
                creation_date, due_date, payment_date, notes, created_utc
            FROM documents
            WHERE tenant_id = $1
              AND ($2::text IS NULL OR document_type = $2)
              AND ($3::text IS NULL OR status = $3)
              AND ($4::uuid IS NULL OR client_id = $4)
            ORDER BY created_utc DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(tenant_id)
        .bind(filter.document_type.map(|t| t.as_str()))
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.client_id)
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list documents: {}", e)))?;

        timer.observe_duration();

        Ok(documents)
    }

    /// Update a document's editable fields (draft only).
    #[instrument(skip(self, input), fields(tenant_id = %tenant_id, document_id = %document_id))]
    pub async fn update_document(
        &self,
        tenant_id: Uuid,
        document_id: Uuid,
        input: &UpdateDocument,
    ) -> Result<Option<Document>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_document"])
            .start_timer();

        let document = self.get_document(tenant_id, document_id).await?;
        match document {
            Some(doc) if doc.status == "draft" => {}
            Some(_) => {
                return Err(AppError::BadRequest(anyhow::anyhow!(
                    "Can only edit draft documents"
                )))
            }
            None => return Ok(None),
        };

        let document = sqlx::query_as::<_, Document>(
            r#"
            UPDATE documents
            SET client_id = COALESCE($3, client_id),
                creation_date = COALESCE($4, creation_date),
                due_date = COALESCE($5, due_date),
                notes = COALESCE($6, notes)
            WHERE tenant_id = $1 AND document_id = $2
            RETURNING document_id, tenant_id, document_type, status, client_id,
                creation_date, due_date, payment_date, notes, created_utc
            "#,
        )
        .bind(tenant_id)
        .bind(document_id)
        .bind(input.client_id)
        .bind(input.creation_date)
        .bind(input.due_date)
        .bind(&input.notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to update document: {}", e))
        })?;

        timer.observe_duration();

        Ok(document)
    }

    /// Move a document to a new status, enforcing the per-type vocabulary
    /// and the forward-only transition rules. Marking an invoice paid
    /// records the payment date.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, document_id = %document_id))]
    pub async fn update_document_status(
        &self,
        tenant_id: Uuid,
        document_id: Uuid,
        status: DocumentStatus,
        today: NaiveDate,
    ) -> Result<Option<Document>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_document_status"])
            .start_timer();

        let document = match self.get_document(tenant_id, document_id).await? {
            Some(doc) => doc,
            None => return Ok(None),
        };

        let document_type = DocumentType::from_string(&document.document_type);
        if !status.valid_for(document_type) {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Status '{}' is not valid for a {}",
                status.as_str(),
                document_type.as_str()
            )));
        }

        let current = DocumentStatus::from_string(&document.status);
        if !current.can_transition_to(status) {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Cannot change status from '{}' to '{}'",
                current.as_str(),
                status.as_str()
            )));
        }

        let payment_date = (status == DocumentStatus::Paid).then_some(today);

        let document = sqlx::query_as::<_, Document>(
            r#"
            UPDATE documents
            SET status = $3,
                payment_date = COALESCE($4, payment_date)
            WHERE tenant_id = $1 AND document_id = $2
            RETURNING document_id, tenant_id, document_type, status, client_id,
                creation_date, due_date, payment_date, notes, created_utc
            "#,
        )
        .bind(tenant_id)
        .bind(document_id)
        .bind(status.as_str())
        .bind(payment_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to update document status: {}", e))
        })?;

        timer.observe_duration();

        if let Some(ref doc) = document {
            info!(document_id = %doc.document_id, status = %doc.status, "Document status updated");
        }

        Ok(document)
    }

    /// Delete a document and its line items.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, document_id = %document_id))]
    pub async fn delete_document(
        &self,
        tenant_id: Uuid,
        document_id: Uuid,
    ) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_document"])
            .start_timer();

        let result = sqlx::query(
            r#"
            DELETE FROM documents
            WHERE tenant_id = $1 AND document_id = $2
            "#,
        )
        .bind(tenant_id)
        .bind(document_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to delete document: {}", e))
        })?;

        timer.observe_duration();

        Ok(result.rows_affected() > 0)
    }

    // -------------------------------------------------------------------------
    // Line Item Operations
    // -------------------------------------------------------------------------

    /// Add a line item to a draft document.
    #[instrument(skip(self, input), fields(tenant_id = %input.tenant_id, document_id = %input.document_id))]
    pub async fn add_line_item(&self, input: &CreateLineItem) -> Result<LineItem, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["add_line_item"])
            .start_timer();

        let document = self.get_document(input.tenant_id, input.document_id).await?;
        match document {
            Some(doc) if doc.status == "draft" => {}
            Some(_) => {
                return Err(AppError::BadRequest(anyhow::anyhow!(
                    "Can only add line items to draft documents"
                )))
            }
            None => {
                return Err(AppError::NotFound(anyhow::anyhow!("Document not found")));
            }
        };

        let line_item = sqlx::query_as::<_, LineItem>(
            r#"
            INSERT INTO line_items (
                line_item_id, document_id, tenant_id, designation, description,
                quantity, unit_price, vat_rate, sort_order
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING line_item_id, document_id, tenant_id, designation, description,
                quantity, unit_price, vat_rate, sort_order, created_utc
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.document_id)
        .bind(input.tenant_id)
        .bind(&input.designation)
        .bind(&input.description)
        .bind(input.quantity)
        .bind(input.unit_price)
        .bind(input.vat_rate)
        .bind(input.sort_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to add line item: {}", e)))?;

        timer.observe_duration();

        info!(line_item_id = %line_item.line_item_id, "Line item added");

        Ok(line_item)
    }

    /// Get line items for a document in display order.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, document_id = %document_id))]
    pub async fn get_line_items(
        &self,
        tenant_id: Uuid,
        document_id: Uuid,
    ) -> Result<Vec<LineItem>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_line_items"])
            .start_timer();

        let line_items = sqlx::query_as::<_, LineItem>(
            r#"
            SELECT line_item_id, document_id, tenant_id, designation, description,
                quantity, unit_price, vat_rate, sort_order, created_utc
            FROM line_items
            WHERE tenant_id = $1 AND document_id = $2
            ORDER BY sort_order, created_utc
            "#,
        )
        .bind(tenant_id)
        .bind(document_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get line items: {}", e)))?;

        timer.observe_duration();

        Ok(line_items)
    }

    /// Update a line item on a draft document.
    #[instrument(skip(self, input), fields(tenant_id = %tenant_id, line_item_id = %line_item_id))]
    pub async fn update_line_item(
        &self,
        tenant_id: Uuid,
        document_id: Uuid,
        line_item_id: Uuid,
        input: &UpdateLineItem,
    ) -> Result<Option<LineItem>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_line_item"])
            .start_timer();

        let document = self.get_document(tenant_id, document_id).await?;
        match document {
            Some(doc) if doc.status == "draft" => {}
            Some(_) => {
                return Err(AppError::BadRequest(anyhow::anyhow!(
                    "Can only update line items on draft documents"
                )))
            }
            None => return Ok(None),
        };

        let line_item = sqlx::query_as::<_, LineItem>(
            r#"
            UPDATE line_items
            SET designation = COALESCE($4, designation),
                description = COALESCE($5, description),
                quantity = COALESCE($6, quantity),
                unit_price = COALESCE($7, unit_price),
                vat_rate = COALESCE($8, vat_rate),
                sort_order = COALESCE($9, sort_order)
            WHERE tenant_id = $1 AND document_id = $2 AND line_item_id = $3
            RETURNING line_item_id, document_id, tenant_id, designation, description,
                quantity, unit_price, vat_rate, sort_order, created_utc
            "#,
        )
        .bind(tenant_id)
        .bind(document_id)
        .bind(line_item_id)
        .bind(&input.designation)
        .bind(&input.description)
        .bind(input.quantity)
        .bind(input.unit_price)
        .bind(input.vat_rate)
        .bind(input.sort_order)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to update line item: {}", e))
        })?;

        timer.observe_duration();

        Ok(line_item)
    }

    /// Remove a line item from a draft document.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, line_item_id = %line_item_id))]
    pub async fn remove_line_item(
        &self,
        tenant_id: Uuid,
        document_id: Uuid,
        line_item_id: Uuid,
    ) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["remove_line_item"])
            .start_timer();

        let document = self.get_document(tenant_id, document_id).await?;
        match document {
            Some(doc) if doc.status == "draft" => {}
            Some(_) => {
                return Err(AppError::BadRequest(anyhow::anyhow!(
                    "Can only remove line items from draft documents"
                )))
            }
            None => return Ok(false),
        };

        let result = sqlx::query(
            r#"
            DELETE FROM line_items
            WHERE tenant_id = $1 AND document_id = $2 AND line_item_id = $3
            "#,
        )
        .bind(tenant_id)
        .bind(document_id)
        .bind(line_item_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to remove line item: {}", e))
        })?;

        timer.observe_duration();

        Ok(result.rows_affected() > 0)
    }

    // -------------------------------------------------------------------------
    // Expense Operations
    // -------------------------------------------------------------------------

    /// Create an expense.
    #[instrument(skip(self, input), fields(tenant_id = %input.tenant_id))]
    pub async fn create_expense(&self, input: &CreateExpense) -> Result<Expense, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_expense"])
            .start_timer();

        let expense = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (expense_id, tenant_id, label, amount, category, incurred_on, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING expense_id, tenant_id, label, amount, category, incurred_on, notes, created_utc
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.tenant_id)
        .bind(&input.label)
        .bind(input.amount)
        .bind(&input.category)
        .bind(input.incurred_on)
        .bind(&input.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to create expense: {}", e)))?;

        timer.observe_duration();

        info!(expense_id = %expense.expense_id, "Expense created");

        Ok(expense)
    }

    /// Get an expense by ID.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, expense_id = %expense_id))]
    pub async fn get_expense(
        &self,
        tenant_id: Uuid,
        expense_id: Uuid,
    ) -> Result<Option<Expense>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_expense"])
            .start_timer();

        let expense = sqlx::query_as::<_, Expense>(
            r#"
            SELECT expense_id, tenant_id, label, amount, category, incurred_on, notes, created_utc
            FROM expenses
            WHERE tenant_id = $1 AND expense_id = $2
            "#,
        )
        .bind(tenant_id)
        .bind(expense_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get expense: {}", e)))?;

        timer.observe_duration();

        Ok(expense)
    }

    /// List expenses for a tenant, most recent first.
    #[instrument(skip(self), fields(tenant_id = %tenant_id))]
    pub async fn list_expenses(
        &self,
        tenant_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Expense>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_expenses"])
            .start_timer();

        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT expense_id, tenant_id, label, amount, category, incurred_on, notes, created_utc
            FROM expenses
            WHERE tenant_id = $1
            ORDER BY incurred_on DESC, created_utc DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(tenant_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list expenses: {}", e)))?;

        timer.observe_duration();

        Ok(expenses)
    }

    /// Update an expense.
    #[instrument(skip(self, input), fields(tenant_id = %tenant_id, expense_id = %expense_id))]
    pub async fn update_expense(
        &self,
        tenant_id: Uuid,
        expense_id: Uuid,
        input: &UpdateExpense,
    ) -> Result<Option<Expense>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_expense"])
            .start_timer();

        let expense = sqlx::query_as::<_, Expense>(
            r#"
            UPDATE expenses
            SET label = COALESCE($3, label),
                amount = COALESCE($4, amount),
                category = COALESCE($5, category),
                incurred_on = COALESCE($6, incurred_on),
                notes = COALESCE($7, notes)
            WHERE tenant_id = $1 AND expense_id = $2
            RETURNING expense_id, tenant_id, label, amount, category, incurred_on, notes, created_utc
            "#,
        )
        .bind(tenant_id)
        .bind(expense_id)
        .bind(&input.label)
        .bind(input.amount)
        .bind(&input.category)
        .bind(input.incurred_on)
        .bind(&input.notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to update expense: {}", e)))?;

        timer.observe_duration();

        Ok(expense)
    }

    /// Delete an expense.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, expense_id = %expense_id))]
    pub async fn delete_expense(
        &self,
        tenant_id: Uuid,
        expense_id: Uuid,
    ) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_expense"])
            .start_timer();

        let result = sqlx::query(
            r#"
            DELETE FROM expenses
            WHERE tenant_id = $1 AND expense_id = $2
            "#,
        )
        .bind(tenant_id)
        .bind(expense_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to delete expense: {}", e)))?;

        timer.observe_duration();

        Ok(result.rows_affected() > 0)
    }

    // -------------------------------------------------------------------------
    // Event Operations
    // -------------------------------------------------------------------------

    /// Create an event.
    #[instrument(skip(self, input), fields(tenant_id = %input.tenant_id))]
    pub async fn create_event(&self, input: &CreateEvent) -> Result<Event, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_event"])
            .start_timer();

        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (event_id, tenant_id, title, description, location, starts_at, ends_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING event_id, tenant_id, title, description, location, starts_at, ends_at, created_utc
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.tenant_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.location)
        .bind(input.starts_at)
        .bind(input.ends_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to create event: {}", e)))?;

        timer.observe_duration();

        info!(event_id = %event.event_id, "Event created");

        Ok(event)
    }

    /// Get an event by ID.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, event_id = %event_id))]
    pub async fn get_event(
        &self,
        tenant_id: Uuid,
        event_id: Uuid,
    ) -> Result<Option<Event>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_event"])
            .start_timer();

        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT event_id, tenant_id, title, description, location, starts_at, ends_at, created_utc
            FROM events
            WHERE tenant_id = $1 AND event_id = $2
            "#,
        )
        .bind(tenant_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get event: {}", e)))?;

        timer.observe_duration();

        Ok(event)
    }

    /// List events for a tenant, soonest first.
    #[instrument(skip(self), fields(tenant_id = %tenant_id))]
    pub async fn list_events(
        &self,
        tenant_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Event>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_events"])
            .start_timer();

        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT event_id, tenant_id, title, description, location, starts_at, ends_at, created_utc
            FROM events
            WHERE tenant_id = $1
            ORDER BY starts_at
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(tenant_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list events: {}", e)))?;

        timer.observe_duration();

        Ok(events)
    }

    /// Update an event.
    #[instrument(skip(self, input), fields(tenant_id = %tenant_id, event_id = %event_id))]
    pub async fn update_event(
        &self,
        tenant_id: Uuid,
        event_id: Uuid,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_event"])
            .start_timer();

        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                location = COALESCE($5, location),
                starts_at = COALESCE($6, starts_at),
                ends_at = COALESCE($7, ends_at)
            WHERE tenant_id = $1 AND event_id = $2
            RETURNING event_id, tenant_id, title, description, location, starts_at, ends_at, created_utc
            "#,
        )
        .bind(tenant_id)
        .bind(event_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.location)
        .bind(input.starts_at)
        .bind(input.ends_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to update event: {}", e)))?;

        timer.observe_duration();

        Ok(event)
    }

    /// Delete an event.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, event_id = %event_id))]
    pub async fn delete_event(&self, tenant_id: Uuid, event_id: Uuid) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_event"])
            .start_timer();

        let result = sqlx::query(
            r#"
            DELETE FROM events
            WHERE tenant_id = $1 AND event_id = $2
            "#,
        )
        .bind(tenant_id)
        .bind(event_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to delete event: {}", e)))?;

        timer.observe_duration();

        Ok(result.rows_affected() > 0)
    }

    // -------------------------------------------------------------------------
    // Planning Operations
    // -------------------------------------------------------------------------

    /// Create a planning.
    #[instrument(skip(self, input), fields(tenant_id = %input.tenant_id))]
    pub async fn create_planning(&self, input: &CreatePlanning) -> Result<Planning, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_planning"])
            .start_timer();

        let planning = sqlx::query_as::<_, Planning>(
            r#"
            INSERT INTO plannings (planning_id, tenant_id, event_id, title)
            VALUES ($1, $2, $3, $4)
            RETURNING planning_id, tenant_id, event_id, title, created_utc
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.tenant_id)
        .bind(input.event_id)
        .bind(&input.title)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to create planning: {}", e))
        })?;

        timer.observe_duration();

        info!(planning_id = %planning.planning_id, "Planning created");

        Ok(planning)
    }

    /// Get a planning by ID.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, planning_id = %planning_id))]
    pub async fn get_planning(
        &self,
        tenant_id: Uuid,
        planning_id: Uuid,
    ) -> Result<Option<Planning>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_planning"])
            .start_timer();

        let planning = sqlx::query_as::<_, Planning>(
            r#"
            SELECT planning_id, tenant_id, event_id, title, created_utc
            FROM plannings
            WHERE tenant_id = $1 AND planning_id = $2
            "#,
        )
        .bind(tenant_id)
        .bind(planning_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get planning: {}", e)))?;

        timer.observe_duration();

        Ok(planning)
    }

    /// List plannings for a tenant, newest first.
    #[instrument(skip(self), fields(tenant_id = %tenant_id))]
    pub async fn list_plannings(
        &self,
        tenant_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Planning>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_plannings"])
            .start_timer();

        let plannings = sqlx::query_as::<_, Planning>(
            r#"
            SELECT planning_id, tenant_id, event_id, title, created_utc
            FROM plannings
            WHERE tenant_id = $1
            ORDER BY created_utc DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(tenant_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list plannings: {}", e)))?;

        timer.observe_duration();

        Ok(plannings)
    }

    /// Delete a planning and its shifts.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, planning_id = %planning_id))]
    pub async fn delete_planning(
        &self,
        tenant_id: Uuid,
        planning_id: Uuid,
    ) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_planning"])
            .start_timer();

        let result = sqlx::query(
            r#"
            DELETE FROM plannings
            WHERE tenant_id = $1 AND planning_id = $2
            "#,
        )
        .bind(tenant_id)
        .bind(planning_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to delete planning: {}", e))
        })?;

        timer.observe_duration();

        Ok(result.rows_affected() > 0)
    }

    /// Add a shift to a planning.
    #[instrument(skip(self, input), fields(tenant_id = %input.tenant_id, planning_id = %input.planning_id))]
    pub async fn add_shift(&self, input: &CreateShift) -> Result<Shift, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["add_shift"])
            .start_timer();

        let planning = self.get_planning(input.tenant_id, input.planning_id).await?;
        if planning.is_none() {
            return Err(AppError::NotFound(anyhow::anyhow!("Planning not found")));
        }

        let shift = sqlx::query_as::<_, Shift>(
            r#"
            INSERT INTO shifts (shift_id, planning_id, tenant_id, role, starts_at, ends_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING shift_id, planning_id, tenant_id, role, starts_at, ends_at, volunteer_name, created_utc
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.planning_id)
        .bind(input.tenant_id)
        .bind(&input.role)
        .bind(input.starts_at)
        .bind(input.ends_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to add shift: {}", e)))?;

        timer.observe_duration();

        info!(shift_id = %shift.shift_id, "Shift added");

        Ok(shift)
    }

    /// Get shifts for a planning in chronological order.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, planning_id = %planning_id))]
    pub async fn get_shifts(
        &self,
        tenant_id: Uuid,
        planning_id: Uuid,
    ) -> Result<Vec<Shift>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_shifts"])
            .start_timer();

        let shifts = sqlx::query_as::<_, Shift>(
            r#"
            SELECT shift_id, planning_id, tenant_id, role, starts_at, ends_at, volunteer_name, created_utc
            FROM shifts
            WHERE tenant_id = $1 AND planning_id = $2
            ORDER BY starts_at, created_utc
            "#,
        )
        .bind(tenant_id)
        .bind(planning_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get shifts: {}", e)))?;

        timer.observe_duration();

        Ok(shifts)
    }

    /// Assign (or clear) the volunteer on a shift.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, shift_id = %shift_id))]
    pub async fn assign_shift(
        &self,
        tenant_id: Uuid,
        planning_id: Uuid,
        shift_id: Uuid,
        volunteer_name: Option<&str>,
    ) -> Result<Option<Shift>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["assign_shift"])
            .start_timer();

        let shift = sqlx::query_as::<_, Shift>(
            r#"
            UPDATE shifts
            SET volunteer_name = $4
            WHERE tenant_id = $1 AND planning_id = $2 AND shift_id = $3
            RETURNING shift_id, planning_id, tenant_id, role, starts_at, ends_at, volunteer_name, created_utc
            "#,
        )
        .bind(tenant_id)
        .bind(planning_id)
        .bind(shift_id)
        .bind(volunteer_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to assign shift: {}", e)))?;

        timer.observe_duration();

        Ok(shift)
    }

    /// Remove a shift.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, shift_id = %shift_id))]
    pub async fn remove_shift(
        &self,
        tenant_id: Uuid,
        planning_id: Uuid,
        shift_id: Uuid,
    ) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["remove_shift"])
            .start_timer();

        let result = sqlx::query(
            r#"
            DELETE FROM shifts
            WHERE tenant_id = $1 AND planning_id = $2 AND shift_id = $3
            "#,
        )
        .bind(tenant_id)
        .bind(planning_id)
        .bind(shift_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to remove shift: {}", e)))?;

        timer.observe_duration();

        Ok(result.rows_affected() > 0)
    }
}
