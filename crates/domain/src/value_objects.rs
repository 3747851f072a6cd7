//! # 値オブジェクト
//!
//! 通知の宛先を表現する値オブジェクトを定義する。
//!
//! ## 含まれる型
//!
//! | 型 | ラップ対象 | 用途 |
//! |---|-----------|------|
//! | [`Email`] | `String` | 検証済みメールアドレス |
//! | [`Recipient`] | `Email` + 表示名 | メールの宛先 |

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// メールアドレス（値オブジェクト）
///
/// ホストの入力は前後の空白を含むことがあるため trim してから検証する。
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - `local@domain` の形式
    /// - 最大 255 文字
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスは必須です".to_string(),
            ));
        }

        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::Validation(format!(
                "メールアドレスの形式が不正です: {value}"
            )));
        };

        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(DomainError::Validation(format!(
                "メールアドレスの形式が不正です: {value}"
            )));
        }

        if value.len() > 255 {
            return Err(DomainError::Validation(
                "メールアドレスは255文字以内である必要があります".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// 顧客の個人情報なのでログに平文で出さない
impl std::fmt::Debug for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Email").field(&"[REDACTED]").finish()
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// メールの宛先
///
/// 表示名は任意。空白のみの表示名は `None` として扱う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    email: Email,
    name:  Option<String>,
}

impl Recipient {
    pub fn new(email: Email, name: Option<&str>) -> Self {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        Self { email, name }
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
