//! 値オブジェクト定義マクロ
//!
//! 申込フォームの必須テキスト項目はすべて「前後の空白を除去 → 必須チェック →
//! 最大長チェック」の同じ規則で検証する。その定型部分をここにまとめる。

use crate::DomainError;

/// 必須テキスト項目を正規化する
///
/// 前後の空白を除去した値を返す。空、または `max_length` 文字を超える場合は
/// フォームにそのまま表示できるメッセージを持つエラーになる。
pub(crate) fn normalize_required(
    value: String,
    label: &str,
    max_length: usize,
) -> Result<String, DomainError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(DomainError::Validation(format!("{label}は必須です")));
    }

    if value.chars().count() > max_length {
        return Err(DomainError::Validation(format!(
            "{label}は {max_length} 文字以内である必要があります"
        )));
    }

    Ok(value.to_string())
}

/// UUID v7 で採番する ID 型を定義する
///
/// ```rust
/// use seminar_domain::registration::RegistrationId;
///
/// let id = RegistrationId::new();
/// assert_eq!(id.as_uuid().get_version_num(), 7);
/// ```
macro_rules! define_uuid_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
        #[display("{_0}")]
        $vis struct $Name(uuid::Uuid);

        impl $Name {
            /// 新しい ID を採番する（時刻順にソート可能）
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7())
            }

            pub fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl Default for $Name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

/// 申込者個人に紐づく値の `Debug` 出力を伏せ字にする
///
/// 申込レコードをログに出しても氏名・連絡先が残らないようにする。
macro_rules! impl_personal_debug {
    ($Name:ident) => {
        impl std::fmt::Debug for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(concat!(stringify!($Name), "(***)"))
            }
        }
    };
}

/// 申込フォームの必須テキスト項目を定義する
///
/// `personal: true` の項目は `Debug` 出力が伏せ字になる。
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use seminar_domain::registration::{CompanyName, PersonName};
///
/// let name = PersonName::new("  山田太郎 ")?;
/// assert_eq!(name.as_str(), "山田太郎");
/// assert_eq!(format!("{name:?}"), "PersonName(***)");
///
/// let err = CompanyName::new("   ").unwrap_err();
/// assert_eq!(err.into_message(), "会社名は必須です");
/// # Ok(())
/// # }
/// ```
macro_rules! define_form_text {
    (@debug $Name:ident, true) => {
        impl_personal_debug!($Name);
    };
    (@debug $Name:ident, false) => {
        impl std::fmt::Debug for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($Name)).field(&self.0).finish()
            }
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident {
            label: $label:literal,
            max_length: $max_length:literal,
            personal: $personal:tt $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq)]
        $vis struct $Name(String);

        impl $Name {
            /// フォーム上の項目名（エラーメッセージに使う）
            pub const LABEL: &'static str = $label;
            pub const MAX_LENGTH: usize = $max_length;

            pub fn new(value: impl Into<String>) -> Result<Self, $crate::DomainError> {
                $crate::macros::normalize_required(value.into(), Self::LABEL, Self::MAX_LENGTH)
                    .map(Self)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        define_form_text!(@debug $Name, $personal);
    };
}
