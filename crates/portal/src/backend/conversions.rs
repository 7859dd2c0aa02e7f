//! Wire-to-domain conversions.
//!
//! This is the single place where the backend's duck-typed JSON becomes
//! typed domain data. Anything that doesn't parse is a [`DecodeError`]
//! naming the entity and field, never a silent default.

use std::str::FromStr;

use chrono::NaiveDate;
use thiserror::Error;

use kostpanel_core::{
    Announcement, AnnouncementId, CleaningAreas, CleaningAssignment, CleaningTime, FacilityList,
    Faq, FaqId, PaymentStatus, Role, Room, RoomId, RoomStatus, Rule, RuleId, Rupiah, User, UserId,
};

use super::types::{
    AnnouncementWire, CleaningWire, FaqWire, RoomWire, RuleWire, UserInfoWire, UserWire,
};
use crate::models::VerifiedIdentity;

/// A field of a backend payload failed to decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot decode {entity}.{field}: {problem}")]
pub struct DecodeError {
    pub entity: &'static str,
    pub field: &'static str,
    pub problem: String,
}

impl DecodeError {
    fn new(entity: &'static str, field: &'static str, problem: impl Into<String>) -> Self {
        Self {
            entity,
            field,
            problem: problem.into(),
        }
    }
}

/// Convert a wire room into the domain entity.
///
/// # Errors
///
/// Returns a [`DecodeError`] for an unknown status string or a negative
/// price.
pub fn room_from_wire(wire: RoomWire) -> Result<Room, DecodeError> {
    let status = RoomStatus::from_str(&wire.status)
        .map_err(|problem| DecodeError::new("kamar", "status", problem))?;
    let payment_status = PaymentStatus::from_str(&wire.status_pembayaran)
        .map_err(|problem| DecodeError::new("kamar", "statusPembayaran", problem))?;
    if wire.harga_bulanan < 0 {
        return Err(DecodeError::new(
            "kamar",
            "hargaBulanan",
            format!("negative price: {}", wire.harga_bulanan),
        ));
    }

    Ok(Room {
        id: RoomId::new(wire.id),
        number: wire.nomor_kamar,
        status,
        monthly_price: Rupiah::new(wire.harga_bulanan),
        facilities: wire
            .fasilitas
            .as_deref()
            .map_or_else(FacilityList::new, FacilityList::from_wire),
        title: wire.judul,
        description: wire.deskripsi,
        payment_status,
    })
}

/// Convert a wire user into the domain entity.
///
/// # Errors
///
/// Returns a [`DecodeError`] for an unknown role string.
pub fn user_from_wire(wire: UserWire) -> Result<User, DecodeError> {
    let role =
        Role::from_str(&wire.role).map_err(|problem| DecodeError::new("user", "role", problem))?;

    Ok(User {
        id: UserId::new(wire.id),
        username: wire.username,
        email: wire.email,
        phone: wire.phone,
        role,
        room_id: wire.room_id.map(RoomId::new),
    })
}

/// Convert the who-am-I response into a verified identity.
///
/// # Errors
///
/// Returns a [`DecodeError`] for an unknown role string.
pub fn identity_from_wire(wire: UserInfoWire) -> Result<VerifiedIdentity, DecodeError> {
    let role = Role::from_str(&wire.role)
        .map_err(|problem| DecodeError::new("user-info", "role", problem))?;

    Ok(VerifiedIdentity {
        username: wire.username,
        email: wire.email,
        role,
        room_id: wire.room_id.map(|id| id.to_string()),
        phone: wire.phone_number,
    })
}

/// Convert a wire announcement into the domain entity.
///
/// # Errors
///
/// Returns a [`DecodeError`] when the date is not `YYYY-MM-DD`.
pub fn announcement_from_wire(wire: AnnouncementWire) -> Result<Announcement, DecodeError> {
    let effective_date = NaiveDate::parse_from_str(&wire.tanggal, "%Y-%m-%d")
        .map_err(|e| DecodeError::new("pengumuman", "tanggal", e.to_string()))?;

    Ok(Announcement {
        id: AnnouncementId::new(wire.id),
        title: wire.judul,
        body: wire.isi,
        effective_date,
    })
}

/// Convert a wire rule into the domain entity.
pub fn rule_from_wire(wire: RuleWire) -> Rule {
    Rule {
        id: RuleId::new(wire.id),
        title: wire.judul,
        description: wire.deskripsi,
    }
}

/// Convert a wire FAQ into the domain entity.
pub fn faq_from_wire(wire: FaqWire) -> Faq {
    Faq {
        id: FaqId::new(wire.id),
        question: wire.pertanyaan,
        answer: wire.jawaban,
    }
}

/// Convert a wire cleaning assignment into the domain entity.
///
/// # Errors
///
/// Returns a [`DecodeError`] for an unknown execution-time string.
pub fn cleaning_from_wire(wire: CleaningWire) -> Result<CleaningAssignment, DecodeError> {
    let time = CleaningTime::from_str(&wire.waktu)
        .map_err(|problem| DecodeError::new("kebersihan", "waktu", problem))?;

    Ok(CleaningAssignment {
        room_number: wire.nomor_kamar,
        areas: CleaningAreas {
            parking: wire.parkiran,
            terrace: wire.teras,
            corridor: wire.koridor,
            garden: wire.taman,
        },
        notes: wire.catatan.unwrap_or_default(),
        time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room_wire() -> RoomWire {
        RoomWire {
            id: 1,
            nomor_kamar: "A-01".to_owned(),
            status: "terisi".to_owned(),
            harga_bulanan: 2_500_000,
            fasilitas: Some("AC,TV,Wifi".to_owned()),
            judul: Some("Kamar pojok".to_owned()),
            deskripsi: None,
            status_pembayaran: "Belum Bayar".to_owned(),
        }
    }

    #[test]
    fn room_decodes_statuses_and_facilities() {
        let room = room_from_wire(room_wire()).expect("decode");
        assert_eq!(room.status, RoomStatus::Terisi);
        assert_eq!(room.payment_status, PaymentStatus::BelumBayar);
        assert_eq!(room.facilities.len(), 3);
    }

    #[test]
    fn unknown_room_status_is_a_decode_error() {
        let mut wire = room_wire();
        wire.status = "renovasi".to_owned();
        let err = room_from_wire(wire).expect_err("must fail");
        assert_eq!(err.entity, "kamar");
        assert_eq!(err.field, "status");
    }

    #[test]
    fn negative_price_is_a_decode_error() {
        let mut wire = room_wire();
        wire.harga_bulanan = -1;
        let err = room_from_wire(wire).expect_err("must fail");
        assert_eq!(err.field, "hargaBulanan");
    }

    #[test]
    fn identity_stringifies_the_room_id() {
        let identity = identity_from_wire(UserInfoWire {
            username: "sari".to_owned(),
            email: "sari@example.com".to_owned(),
            role: "TENANT".to_owned(),
            room_id: Some(3),
            phone_number: None,
        })
        .expect("decode");
        assert_eq!(identity.role, Role::Tenant);
        assert_eq!(identity.room_id.as_deref(), Some("3"));
    }

    #[test]
    fn bad_announcement_date_is_a_decode_error() {
        let err = announcement_from_wire(AnnouncementWire {
            id: 1,
            judul: "Info".to_owned(),
            isi: "Isi".to_owned(),
            tanggal: "07-08-2026".to_owned(),
        })
        .expect_err("must fail");
        assert_eq!(err.entity, "pengumuman");
        assert_eq!(err.field, "tanggal");
    }
}
