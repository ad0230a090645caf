//! Diesel schema for ingested content.

diesel::table! {
    /// Issue content records keyed by tracker node identifier.
    issues (id) {
        /// Tracker node identifier.
        id -> Varchar,
        /// Author identifier, `-1` when unknown.
        author_id -> BigInt,
        /// Repository visibility at creation.
        is_private -> Bool,
        /// Normalized, possibly redacted markdown.
        markdown -> Text,
        /// Originating webhook payload.
        payload -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        modified_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comment content records keyed by tracker node identifier.
    comments (id) {
        /// Tracker node identifier.
        id -> Varchar,
        /// Node identifier of the owning issue.
        issue_id -> Varchar,
        /// Author identifier, `-1` when unknown.
        author_id -> BigInt,
        /// Repository visibility at creation.
        is_private -> Bool,
        /// Possibly redacted markdown.
        markdown -> Text,
        /// Originating webhook payload.
        payload -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        modified_at -> Timestamptz,
    }
}
