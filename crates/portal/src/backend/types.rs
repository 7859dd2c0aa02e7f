//! Wire shapes of the kost REST backend.
//!
//! Field names follow the backend's JSON exactly (Indonesian, camelCase).
//! Status-like fields are carried as plain strings here; turning them into
//! typed values is the job of [`super::conversions`], so a malformed payload
//! becomes a structured decode error instead of a silent default.

use serde::{Deserialize, Serialize};

/// `POST /api/auth/login` response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenWire {
    pub token: String,
}

/// `POST /api/auth/login` request body.
#[derive(Debug, Clone, Serialize)]
pub struct LoginWire<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// `GET /api/auth/user-info` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoWire {
    pub username: String,
    pub email: String,
    pub role: String,
    pub room_id: Option<i64>,
    pub phone_number: Option<String>,
}

/// Room as returned by `/api/kamar`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomWire {
    pub id: i64,
    pub nomor_kamar: String,
    pub status: String,
    pub harga_bulanan: i64,
    pub fasilitas: Option<String>,
    pub judul: Option<String>,
    pub deskripsi: Option<String>,
    pub status_pembayaran: String,
}

/// Room create/update body for `/api/kamar`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPayload {
    pub nomor_kamar: String,
    pub status: String,
    pub harga_bulanan: i64,
    /// Comma-joined facility list.
    pub fasilitas: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judul: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deskripsi: Option<String>,
    pub status_pembayaran: String,
}

/// User as returned by `/api/users`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWire {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    pub room_id: Option<i64>,
}

/// User create/update body for `/api/users`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<i64>,
    /// Set on registration and password reset only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Announcement as returned by `/api/pengumuman`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnouncementWire {
    pub id: i64,
    pub judul: String,
    pub isi: String,
    /// `YYYY-MM-DD`.
    pub tanggal: String,
}

/// Announcement create/update body.
#[derive(Debug, Clone, Serialize)]
pub struct AnnouncementPayload {
    pub judul: String,
    pub isi: String,
    pub tanggal: String,
}

/// House rule as returned by `/api/peraturan`.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleWire {
    pub id: i64,
    pub judul: String,
    pub deskripsi: String,
}

/// House rule create/update body.
#[derive(Debug, Clone, Serialize)]
pub struct RulePayload {
    pub judul: String,
    pub deskripsi: String,
}

/// FAQ as returned by `/api/faqs`.
#[derive(Debug, Clone, Deserialize)]
pub struct FaqWire {
    pub id: i64,
    pub pertanyaan: String,
    pub jawaban: String,
}

/// FAQ create/update body.
#[derive(Debug, Clone, Serialize)]
pub struct FaqPayload {
    pub pertanyaan: String,
    pub jawaban: String,
}

/// Cleaning assignment as returned by `/api/kebersihan`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningWire {
    pub nomor_kamar: String,
    pub parkiran: bool,
    pub teras: bool,
    pub koridor: bool,
    pub taman: bool,
    pub catatan: Option<String>,
    pub waktu: String,
}
