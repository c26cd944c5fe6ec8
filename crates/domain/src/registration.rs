//! # セミナー申込
//!
//! 申込フォームの入力検証と、永続化される申込エンティティを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 |
//! |---|------------|
//! | [`RegistrationInput`] | 申込入力（検証前） |
//! | [`ValidatedRegistration`] | 検証済み申込内容 |
//! | [`SeminarRegistration`] | 申込（永続化される不変レコード） |
//! | [`FieldErrors`] | フィールド単位の検証エラー集合 |
//!
//! ## 設計方針
//!
//! - **全フィールドを検証**: 最初のエラーで打ち切らず、失敗したフィールドを
//!   すべて [`FieldErrors`] に集める
//! - **サーバー側で必ず再検証**: クライアント側の事前検証は信用しない
//! - **不変**: 申込は作成後に更新・削除しない

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::IntoStaticStr;
use thiserror::Error;

use crate::DomainError;

define_uuid_id! {
    /// 申込 ID
    ///
    /// seminar_registrations テーブルの主キー。UUID v7 を使用。
    pub struct RegistrationId;
}

define_form_text! {
    /// 会社名
    pub struct CompanyName {
        label: "会社名",
        max_length: 255,
        personal: false,
    }
}

define_form_text! {
    /// 氏名（PII）
    pub struct PersonName {
        label: "氏名",
        max_length: 100,
        personal: true,
    }
}

define_form_text! {
    /// 役職
    pub struct Position {
        label: "役職",
        max_length: 100,
        personal: false,
    }
}

define_form_text! {
    /// 電話番号（PII）
    ///
    /// 表記揺れ（ハイフン有無、全角数字）が多いため形式は検証しない。
    pub struct PhoneNumber {
        label: "電話番号",
        max_length: 30,
        personal: true,
    }
}

/// 課題（自由記述）の最大長
const CHALLENGE_MAX_LENGTH: usize = 2000;

/// メールアドレス（値オブジェクト）
///
/// `local@domain` の形式で、ドメイン部はドット区切りの空でないラベルを
/// 2 つ以上持つことを要求する。
#[derive(Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl_personal_debug!(EmailAddress);

impl EmailAddress {
    pub const LABEL: &'static str = "メールアドレス";
    pub const MAX_LENGTH: usize = 255;

    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 前後の空白を除去したうえで空文字列ではない
    /// - `@` をちょうど 1 つ含み、ローカル部とドメイン部が空ではない
    /// - 空白を含まない
    /// - ドメイン部が `example.com` のようにドットで区切られている
    /// - 最大 255 文字
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = crate::macros::normalize_required(value.into(), Self::LABEL, Self::MAX_LENGTH)?;

        if !Self::is_well_formed(&value) {
            return Err(DomainError::Validation(
                "有効なメールアドレスを入力してください".to_string(),
            ));
        }

        Ok(Self(value))
    }

    fn is_well_formed(value: &str) -> bool {
        if value.chars().any(char::is_whitespace) {
            return false;
        }

        let Some((local, domain)) = value.split_once('@') else {
            return false;
        };

        if local.is_empty() || domain.contains('@') {
            return false;
        }

        let labels: Vec<&str> = domain.split('.').collect();
        labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 課題に感じていること（任意・自由記述）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge(String);

impl Challenge {
    /// 任意入力の課題を解釈する
    ///
    /// 未入力、または空白のみの場合は `None`（未回答）として扱う。
    pub fn parse(value: Option<String>) -> Result<Option<Self>, DomainError> {
        let Some(value) = value else {
            return Ok(None);
        };

        let value = value.trim().to_string();
        if value.is_empty() {
            return Ok(None);
        }

        if value.chars().count() > CHALLENGE_MAX_LENGTH {
            return Err(DomainError::Validation(format!(
                "課題は {CHALLENGE_MAX_LENGTH} 文字以内である必要があります"
            )));
        }

        Ok(Some(Self(value)))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 申込フォームのフィールド
///
/// 検証エラーのキーとして使用する。シリアライズ時は API の JSON キー
/// （`company`, `name`, ...）と一致する。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    IntoStaticStr,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RegistrationField {
    Company,
    Name,
    Position,
    Email,
    Phone,
    Challenge,
}

/// フィールド単位の検証エラー集合
///
/// JSON では `{ "email": "有効なメールアドレスを入力してください" }` の形になる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("入力内容に誤りがあります（{} 件）", .0.len())]
pub struct FieldErrors(BTreeMap<RegistrationField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// フィールドのエラーメッセージを登録する
    pub fn insert(&mut self, field: RegistrationField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// フィールドのエラーメッセージを取得する
    pub fn get(&self, field: RegistrationField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// エラーのあるフィールドを列挙する（宣言順）
    pub fn fields(&self) -> impl Iterator<Item = RegistrationField> + '_ {
        self.0.keys().copied()
    }

    /// フィールドとメッセージの組を列挙する（宣言順）
    pub fn iter(&self) -> impl Iterator<Item = (RegistrationField, &str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// 値オブジェクト生成の結果を取り込み、失敗時はメッセージを登録する
    fn collect<T>(
        &mut self,
        field: RegistrationField,
        result: Result<T, DomainError>,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.insert(field, e.into_message());
                None
            }
        }
    }
}

/// 申込入力（検証前）
///
/// フォームから送信された値をそのまま保持する。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationInput {
    pub company:   String,
    pub name:      String,
    pub position:  String,
    pub email:     String,
    pub phone:     String,
    pub challenge: Option<String>,
}

impl RegistrationInput {
    /// 全フィールドを検証する
    ///
    /// 失敗したフィールドはすべて [`FieldErrors`] に含まれる。
    pub fn validate(self) -> Result<ValidatedRegistration, FieldErrors> {
        let mut errors = FieldErrors::new();

        let company = errors.collect(RegistrationField::Company, CompanyName::new(self.company));
        let name = errors.collect(RegistrationField::Name, PersonName::new(self.name));
        let position = errors.collect(RegistrationField::Position, Position::new(self.position));
        let email = errors.collect(RegistrationField::Email, EmailAddress::new(self.email));
        let phone = errors.collect(RegistrationField::Phone, PhoneNumber::new(self.phone));
        let challenge = errors.collect(
            RegistrationField::Challenge,
            Challenge::parse(self.challenge),
        );

        match (company, name, position, email, phone, challenge) {
            (Some(company), Some(name), Some(position), Some(email), Some(phone), Some(challenge)) => {
                Ok(ValidatedRegistration {
                    company,
                    name,
                    position,
                    email,
                    phone,
                    challenge,
                })
            }
            _ => Err(errors),
        }
    }
}

/// 検証済み申込内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRegistration {
    pub company:   CompanyName,
    pub name:      PersonName,
    pub position:  Position,
    pub email:     EmailAddress,
    pub phone:     PhoneNumber,
    pub challenge: Option<Challenge>,
}

/// セミナー申込（エンティティ）
///
/// 検証済みの申込内容に ID と受付日時を付与した不変レコード。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeminarRegistration {
    id:         RegistrationId,
    company:    CompanyName,
    name:       PersonName,
    position:   Position,
    email:      EmailAddress,
    phone:      PhoneNumber,
    challenge:  Option<Challenge>,
    created_at: DateTime<Utc>,
}

impl SeminarRegistration {
    /// 検証済み内容から申込を作成する
    pub fn new(id: RegistrationId, validated: ValidatedRegistration, now: DateTime<Utc>) -> Self {
        Self {
            id,
            company: validated.company,
            name: validated.name,
            position: validated.position,
            email: validated.email,
            phone: validated.phone,
            challenge: validated.challenge,
            created_at: now,
        }
    }

    pub fn id(&self) -> &RegistrationId {
        &self.id
    }

    pub fn company(&self) -> &CompanyName {
        &self.company
    }

    pub fn name(&self) -> &PersonName {
        &self.name
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    pub fn challenge(&self) -> Option<&Challenge> {
        self.challenge.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
