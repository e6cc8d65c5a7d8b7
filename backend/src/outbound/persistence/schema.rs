//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation. Regenerate with
//! `diesel print-schema` after a migration changes the schema.

diesel::table! {
    /// Registered accounts, both ambassadors and admins.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login email, stored lower-cased.
        email -> Varchar,
        /// SHA-256 hex digest of the password.
        password_hash -> Varchar,
        /// Display name.
        name -> Varchar,
        /// College or campus.
        college -> Varchar,
        /// Group leader name; empty string when unset.
        group_leader -> Varchar,
        /// Role string: `ambassador` or `admin`.
        role -> Varchar,
        /// Dashboard day counter.
        current_day -> Int4,
        /// Running points total; owned by the submission ledger.
        total_points -> Int4,
        /// Running referral total; owned by the submission ledger.
        total_referrals -> Int4,
        /// Registration timestamp.
        registered_at -> Timestamptz,
        /// Last successful login, when one has occurred.
        last_login_at -> Nullable<Timestamptz>,
        /// Soft-delete flag mirroring `status = 'active'`.
        is_active -> Bool,
        /// Status string: `active`, `inactive`, or `suspended`.
        status -> Varchar,
    }
}

diesel::table! {
    /// Day-indexed task catalog.
    tasks (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Programme day; 0 is orientation.
        day -> Int4,
        /// Short title shown in listings.
        title -> Varchar,
        /// Full description of the required activity.
        description -> Text,
        /// Kind string: `orientation` or `daily_task`.
        task_type -> Varchar,
        /// Base points awarded on submission.
        points_reward -> Int4,
        /// Inactive tasks are hidden from ambassadors.
        is_active -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Submission ledger; unique per `(user_id, task_id)`.
    submissions (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Submitting user.
        user_id -> Uuid,
        /// Task submitted against.
        task_id -> Uuid,
        /// Day index of the task at submission time.
        day -> Int4,
        /// Free-text status report.
        status_text -> Text,
        /// People connected during the activity.
        people_connected -> Int4,
        /// Points credited, including any proof bonus.
        points_earned -> Int4,
        /// One-time proof bonus latch.
        proof_bonus_awarded -> Bool,
        /// Completion flag; set on every accepted submission.
        is_completed -> Bool,
        /// First-submission timestamp.
        submitted_at -> Timestamptz,
        /// Last resubmission timestamp.
        updated_at -> Timestamptz,
        /// Reviewer identifier, when reviewed.
        reviewed_by -> Nullable<Uuid>,
        /// Review notes, when reviewed.
        review_notes -> Nullable<Text>,
        /// Review timestamp, when reviewed.
        reviewed_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Proof artifacts attached to submissions.
    submission_files (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning submission; cascades on delete.
        submission_id -> Uuid,
        /// Location returned by the file store.
        file_url -> Varchar,
        /// MIME type reported at upload time.
        file_type -> Nullable<Varchar>,
        /// Upload timestamp.
        uploaded_at -> Timestamptz,
    }
}

diesel::joinable!(submissions -> users (user_id));
diesel::joinable!(submissions -> tasks (task_id));
diesel::joinable!(submission_files -> submissions (submission_id));

diesel::allow_tables_to_appear_in_same_query!(users, tasks, submissions, submission_files);
