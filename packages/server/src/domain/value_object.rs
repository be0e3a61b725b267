//! Value Object 定義
//!
//! ルームコード・保存名と、それらを支える純粋なサニタイズ関数。

use std::{fmt, path::Component, path::Path};

use sha2::{Digest, Sha256};

use super::error::{RoomCodeError, StorageError};

/// サニタイズ後のファイル名の最大長（文字数）
pub const MAX_FILENAME_LENGTH: usize = 200;

/// content_id の長さ（SHA-256 の 16 進表記）
const CONTENT_ID_LENGTH: usize = 64;

fn is_room_code_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn is_filename_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-'
}

/// 入力されたルームコードから `[A-Za-z0-9_-]` 以外の文字を取り除く
pub fn sanitize_room_code(raw: &str) -> String {
    raw.chars().filter(|c| is_room_code_char(*c)).collect()
}

/// アップロードされたファイル名をディスク上で安全な名前に変換
///
/// `[A-Za-z0-9._-]` 以外の文字は `_` に置き換え、連続する `_` は 1 つにまとめ、
/// [`MAX_FILENAME_LENGTH`] で切り詰めます。結果が空なら使用できない名前です。
pub fn sanitize_filename(raw: &str) -> String {
    let mut sanitized = String::with_capacity(raw.len().min(MAX_FILENAME_LENGTH));
    for ch in raw.chars() {
        let ch = if is_filename_char(ch) { ch } else { '_' };
        if ch == '_' && sanitized.ends_with('_') {
            continue;
        }
        sanitized.push(ch);
    }
    // only ASCII survives, so byte and char positions agree
    sanitized.truncate(MAX_FILENAME_LENGTH);
    sanitized
}

/// `value` が content_id の形式かどうか
pub fn is_content_id(value: &str) -> bool {
    value.len() == CONTENT_ID_LENGTH && value.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// ルームコードの長さ制約
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomCodePolicy {
    pub min_len: usize,
    pub max_len: usize,
}

impl Default for RoomCodePolicy {
    fn default() -> Self {
        Self {
            min_len: 4,
            max_len: 32,
        }
    }
}

impl RoomCodePolicy {
    /// サニタイズ済みの候補を、長さが範囲内の場合のみ受け付ける
    pub fn validate(&self, candidate: String) -> Result<RoomCode, RoomCodeError> {
        if candidate.len() < self.min_len {
            return Err(RoomCodeError::TooShort { min: self.min_len });
        }
        if candidate.len() > self.max_len {
            return Err(RoomCodeError::TooLong { max: self.max_len });
        }
        Ok(RoomCode(candidate))
    }
}

/// ルームコード Value Object
///
/// ルームの同一性はサニタイズ済みのコードそのもの
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomCode(String);

impl RoomCode {
    /// 入力されたルームコードをサニタイズして検証
    pub fn parse(raw: &str, policy: &RoomCodePolicy) -> Result<Self, RoomCodeError> {
        policy.validate(sanitize_room_code(raw))
    }

    /// 既存のルームディレクトリ名をルームコードとして認識
    ///
    /// 文字種のみを確認するため、別の長さ制約で作られたルームも見つかります。
    pub fn from_namespace(name: &str) -> Option<Self> {
        if !name.is_empty() && name.chars().all(is_room_code_char) {
            Some(Self(name.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ルーム内のファイルの保存名: `<unix_time>_<sanitized_name>`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StoredName(String);

impl StoredName {
    /// `unix_time` に受け付けたファイルの保存名を組み立てる
    pub fn compose(unix_time: i64, sanitized_name: &str) -> Self {
        Self(format!("{}_{}", unix_time, sanitized_name))
    }

    /// クライアントが指定した名前を、ルーム直下の通常のエントリを指す場合のみ受け付ける
    ///
    /// パス区切り文字、NUL、隠しエントリ（`.` と `..` を含む）、単一の通常の
    /// パス要素でないものは拒否します。
    pub fn parse(token: &str) -> Result<Self, StorageError> {
        let invalid = || StorageError::InvalidName(token.to_string());

        if token.is_empty()
            || token.starts_with('.')
            || token.contains(['/', '\\', '\0'])
        {
            return Err(invalid());
        }
        let mut components = Path::new(token).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(Self(token.to_string())),
            _ => Err(invalid()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 表示名: 保存名から数値のプレフィックスを除いたもの
    pub fn display_name(&self) -> &str {
        let digits = self.0.bytes().take_while(u8::is_ascii_digit).count();
        if digits > 0 && self.0.as_bytes().get(digits) == Some(&b'_') {
            &self.0[digits + 1..]
        } else {
            &self.0
        }
    }

    /// 外部向けの安定した識別子: 保存名の SHA-256（16 進）
    pub fn content_id(&self) -> String {
        format!("{:x}", Sha256::digest(self.0.as_bytes()))
    }
}

impl fmt::Display for StoredName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `n` 番目に衝突したアップロードのための名前
///
/// `report.pdf` は `report-2.pdf` に、拡張子のない名前は末尾にサフィックスが付きます。
pub(crate) fn with_collision_suffix(sanitized_name: &str, n: usize) -> String {
    match sanitized_name.rfind('.') {
        Some(dot) if dot > 0 => format!(
            "{}-{}{}",
            &sanitized_name[..dot],
            n,
            &sanitized_name[dot..]
        ),
        _ => format!("{}-{}", sanitized_name, n),
    }
}
