//! Table definitions, applied idempotently by
//! [`DatabasePool::ensure_schema`](super::DatabasePool::ensure_schema).

pub const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS accounts (
        id CHAR(36) NOT NULL PRIMARY KEY,
        username VARCHAR(64) NOT NULL,
        email VARCHAR(255) NOT NULL,
        full_name VARCHAR(255) NOT NULL,
        avatar_url VARCHAR(1024) NOT NULL,
        cover_image_url VARCHAR(1024) NULL,
        password_hash VARCHAR(255) NOT NULL,
        refresh_token VARCHAR(1024) NULL,
        created_at DATETIME(6) NOT NULL,
        updated_at DATETIME(6) NOT NULL,
        UNIQUE KEY uq_accounts_username (username),
        UNIQUE KEY uq_accounts_email (email)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS subscriptions (
        subscriber_id CHAR(36) NOT NULL,
        channel_id CHAR(36) NOT NULL,
        status VARCHAR(16) NOT NULL,
        created_at DATETIME(6) NOT NULL,
        updated_at DATETIME(6) NOT NULL,
        PRIMARY KEY (subscriber_id, channel_id),
        KEY idx_subscriptions_channel (channel_id, status)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS videos (
        id CHAR(36) NOT NULL PRIMARY KEY,
        owner_id CHAR(36) NOT NULL,
        title VARCHAR(255) NOT NULL,
        thumbnail_url VARCHAR(1024) NOT NULL,
        duration_secs DOUBLE NOT NULL,
        created_at DATETIME(6) NOT NULL,
        KEY idx_videos_owner (owner_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS watch_history (
        account_id CHAR(36) NOT NULL,
        video_id CHAR(36) NOT NULL,
        position INT NOT NULL,
        watched_at DATETIME(6) NOT NULL,
        PRIMARY KEY (account_id, position)
    )
    "#,
];
