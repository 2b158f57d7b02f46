//! One-shot user messages attached to redirects.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Info,
    Success,
    Error,
}

/// Message to show on the page the client is redirected to.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

/// `303 See Other` to `location`, optionally carrying a [`Flash`] body.
#[derive(Debug, Clone)]
pub struct FlashRedirect {
    location: &'static str,
    flash: Option<Flash>,
}

impl FlashRedirect {
    pub fn new(location: &'static str, level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            location,
            flash: Some(Flash {
                level,
                message: message.into(),
            }),
        }
    }

    pub fn to(location: &'static str) -> Self {
        Self {
            location,
            flash: None,
        }
    }
}

impl IntoResponse for FlashRedirect {
    fn into_response(self) -> Response {
        let location = [(header::LOCATION, self.location)];
        match self.flash {
            Some(flash) => (StatusCode::SEE_OTHER, location, Json(flash)).into_response(),
            None => (StatusCode::SEE_OTHER, location).into_response(),
        }
    }
}
