//! サーバー設定
//!
//! コマンドライン引数（それぞれ `ROOMDROP_*` 環境変数からも読める）を clap で
//! 解析し、検証済みの [`ServerConfig`] に変換します。

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use thiserror::Error;

use crate::domain::RoomCodePolicy;

/// 50 MiB
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// 1 週間
pub const DEFAULT_RETENTION_HOURS: u64 = 168;

/// 1 日
pub const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;

#[derive(Parser, Debug, Clone)]
#[command(name = "roomdrop-server")]
#[command(about = "Room-scoped ephemeral file sharing server", long_about = None)]
pub struct ServerArgs {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "ROOMDROP_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "ROOMDROP_PORT", default_value = "8080")]
    pub port: u16,

    /// Directory holding one sub-directory per room (created if missing)
    #[arg(long, env = "ROOMDROP_STORAGE_ROOT", default_value = "./rooms")]
    pub storage_root: PathBuf,

    /// Maximum upload size in bytes
    #[arg(long, env = "ROOMDROP_MAX_FILE_SIZE", default_value_t = DEFAULT_MAX_FILE_SIZE)]
    pub max_file_size: u64,

    /// Hours before an uploaded file is deleted (0 disables expiry)
    #[arg(long, env = "ROOMDROP_RETENTION_HOURS", default_value_t = DEFAULT_RETENTION_HOURS)]
    pub retention_hours: u64,

    /// Whether joining an unknown room code creates the room
    #[arg(
        long,
        env = "ROOMDROP_ALLOW_CREATE_ROOMS",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub allow_create_rooms: bool,

    /// Minimum room code length
    #[arg(long, env = "ROOMDROP_MIN_ROOM_LENGTH", default_value_t = 4)]
    pub min_room_length: usize,

    /// Maximum room code length
    #[arg(long, env = "ROOMDROP_MAX_ROOM_LENGTH", default_value_t = 32)]
    pub max_room_length: usize,

    /// Seconds between retention sweeps
    #[arg(long, env = "ROOMDROP_SWEEP_INTERVAL_SECS", default_value_t = 300)]
    pub sweep_interval_secs: u64,

    /// Seconds a session may stay idle before its room binding is dropped
    #[arg(long, env = "ROOMDROP_SESSION_TTL_SECS", default_value_t = DEFAULT_SESSION_TTL_SECS)]
    pub session_ttl_secs: u64,
}

/// 設定の検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("min room length must be at least 1")]
    MinRoomLengthZero,

    #[error("min room length {min} exceeds max room length {max}")]
    RoomLengthBounds { min: usize, max: usize },

    #[error("max file size must be greater than 0")]
    MaxFileSizeZero,

    #[error("sweep interval must be greater than 0")]
    SweepIntervalZero,

    #[error("session ttl must be greater than 0")]
    SessionTtlZero,
}

/// 検証済みのサーバー設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub storage_root: PathBuf,
    pub max_file_size: u64,
    /// 0 で期限切れ削除を無効化
    pub retention_hours: u64,
    pub allow_create_rooms: bool,
    pub room_code_policy: RoomCodePolicy,
    pub sweep_interval: Duration,
    /// セッションの無操作期限。Cookie の Max-Age にも使う
    pub session_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            storage_root: PathBuf::from("./rooms"),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            retention_hours: DEFAULT_RETENTION_HOURS,
            allow_create_rooms: true,
            room_code_policy: RoomCodePolicy::default(),
            sweep_interval: Duration::from_secs(300),
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
        }
    }
}

impl TryFrom<ServerArgs> for ServerConfig {
    type Error = ConfigError;

    fn try_from(args: ServerArgs) -> Result<Self, Self::Error> {
        if args.min_room_length == 0 {
            return Err(ConfigError::MinRoomLengthZero);
        }
        if args.min_room_length > args.max_room_length {
            return Err(ConfigError::RoomLengthBounds {
                min: args.min_room_length,
                max: args.max_room_length,
            });
        }
        if args.max_file_size == 0 {
            return Err(ConfigError::MaxFileSizeZero);
        }
        if args.sweep_interval_secs == 0 {
            return Err(ConfigError::SweepIntervalZero);
        }
        if args.session_ttl_secs == 0 {
            return Err(ConfigError::SessionTtlZero);
        }

        Ok(Self {
            host: args.host,
            port: args.port,
            storage_root: args.storage_root,
            max_file_size: args.max_file_size,
            retention_hours: args.retention_hours,
            allow_create_rooms: args.allow_create_rooms,
            room_code_policy: RoomCodePolicy {
                min_len: args.min_room_length,
                max_len: args.max_room_length,
            },
            sweep_interval: Duration::from_secs(args.sweep_interval_secs),
            session_ttl: Duration::from_secs(args.session_ttl_secs),
        })
    }
}
