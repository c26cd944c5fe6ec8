//! # セミナー申込ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /api/seminar/registrations` - セミナー申込
//!
//! JSON のキーが欠けている項目、`null` や文字列以外の値が入った項目は
//! 未入力として扱い、フィールド単位の検証エラーとして返す。

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use seminar_domain::registration::RegistrationInput;
use seminar_shared::ApiResponse;
use serde::{Deserialize, Deserializer, de::IgnoredAny};

use crate::{
    error::SeminarError,
    usecase::{RegistrationOutput, RegistrationUseCase},
};

/// 申込ハンドラの共有状態
pub struct RegistrationState {
    pub usecase: Arc<dyn RegistrationUseCase>,
}

/// セミナー申込リクエスト
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegistrationRequest {
    #[serde(deserialize_with = "form_text")]
    pub company:   String,
    #[serde(deserialize_with = "form_text")]
    pub name:      String,
    #[serde(deserialize_with = "form_text")]
    pub position:  String,
    #[serde(deserialize_with = "form_text")]
    pub email:     String,
    #[serde(deserialize_with = "form_text")]
    pub phone:     String,
    #[serde(deserialize_with = "optional_form_text")]
    pub challenge: Option<String>,
}

/// フォーム項目の JSON 値
///
/// 文字列以外（`null`、数値、配列など）はボディ全体のエラーにせず、
/// 項目単位の検証に回す。
#[derive(Deserialize)]
#[serde(untagged)]
enum FormValue {
    Text(String),
    Other(IgnoredAny),
}

impl FormValue {
    fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Other(IgnoredAny) => None,
        }
    }
}

/// 必須項目: 文字列以外は空文字列（未入力）とする
fn form_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(FormValue::deserialize(deserializer)?
        .into_text()
        .unwrap_or_default())
}

/// 任意項目: 文字列以外は未回答とする
fn optional_form_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(FormValue::deserialize(deserializer)?.into_text())
}

impl From<RegistrationRequest> for RegistrationInput {
    fn from(req: RegistrationRequest) -> Self {
        Self {
            company:   req.company,
            name:      req.name,
            position:  req.position,
            email:     req.email,
            phone:     req.phone,
            challenge: req.challenge,
        }
    }
}

/// POST /api/seminar/registrations
///
/// 申込を受け付け、完了メッセージを返す。
#[tracing::instrument(skip_all)]
pub async fn submit_registration(
    State(state): State<Arc<RegistrationState>>,
    payload: Result<Json<RegistrationRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<RegistrationOutput>>, SeminarError> {
    let Json(req) = payload.map_err(|rejection| SeminarError::BadRequest(rejection.body_text()))?;

    let output = state.usecase.submit(req.into()).await?;

    Ok(Json(ApiResponse::new(output)))
}
